//! Envelope follower for tracking signal amplitude.
//!
//! Used for the reverb's feedback ducking and for dynamics processing.

use libm::expf;

/// Peak-detecting envelope follower with separate attack and release times.
///
/// # Example
///
/// ```rust
/// use bruma_core::EnvFollower;
///
/// let mut env = EnvFollower::new(48000.0);
/// let level = env.process(0.5);
/// assert!(level > 0.0 && level <= 0.5);
/// ```
#[derive(Debug, Clone)]
pub struct EnvFollower {
    envelope: f32,
    attack_coeff: f32,
    release_coeff: f32,
    sample_rate: f32,
    attack_ms: f32,
    release_ms: f32,
}

impl EnvFollower {
    /// Create a follower with 10 ms attack and 100 ms release.
    pub fn new(sample_rate: f32) -> Self {
        let mut follower = Self {
            envelope: 0.0,
            attack_coeff: 0.0,
            release_coeff: 0.0,
            sample_rate,
            attack_ms: 10.0,
            release_ms: 100.0,
        };
        follower.recalculate_coefficients();
        follower
    }

    /// Create with explicit attack and release times in milliseconds.
    pub fn with_times(sample_rate: f32, attack_ms: f32, release_ms: f32) -> Self {
        let mut follower = Self::new(sample_rate);
        follower.attack_ms = attack_ms.max(0.1);
        follower.release_ms = release_ms.max(1.0);
        follower.recalculate_coefficients();
        follower
    }

    /// Set the attack time in milliseconds (floored at 0.1).
    pub fn set_attack_ms(&mut self, attack_ms: f32) {
        self.attack_ms = attack_ms.max(0.1);
        self.recalculate_coefficients();
    }

    /// Set the release time in milliseconds (floored at 1.0).
    pub fn set_release_ms(&mut self, release_ms: f32) {
        self.release_ms = release_ms.max(1.0);
        self.recalculate_coefficients();
    }

    /// Track one sample; returns the current envelope level (≥ 0).
    #[inline]
    pub fn process(&mut self, input: f32) -> f32 {
        let rectified = input.abs();
        let coeff = if rectified > self.envelope {
            self.attack_coeff
        } else {
            self.release_coeff
        };
        self.envelope += coeff * (rectified - self.envelope);
        self.envelope
    }

    /// Current envelope level without advancing.
    #[inline]
    pub fn level(&self) -> f32 {
        self.envelope
    }

    /// Reset the envelope to zero.
    pub fn reset(&mut self) {
        self.envelope = 0.0;
    }

    fn recalculate_coefficients(&mut self) {
        self.attack_coeff = 1.0 - expf(-1.0 / (self.attack_ms / 1000.0 * self.sample_rate));
        self.release_coeff = 1.0 - expf(-1.0 / (self.release_ms / 1000.0 * self.sample_rate));
    }
}
