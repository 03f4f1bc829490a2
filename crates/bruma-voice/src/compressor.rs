//! Feed-forward dynamics compressor.
//!
//! Envelope follower → dB-domain gain computer → gain reduction. The
//! ambience uses one per channel after the diffusion network to keep the
//! decay-dependent makeup stage from pumping the wet signal out of range.

use bruma_core::{EnvFollower, db_to_linear, linear_to_db};

/// Hard-knee feed-forward compressor.
///
/// # Example
///
/// ```rust
/// use bruma_voice::Compressor;
///
/// let mut comp = Compressor::new(48000.0);
/// comp.set_threshold(-20.0);
/// let out = comp.process(0.5);
/// assert!(out.is_finite());
/// ```
#[derive(Debug, Clone)]
pub struct Compressor {
    envelope: EnvFollower,
    threshold_db: f32,
    ratio: f32,
}

impl Compressor {
    /// Create with default threshold (-18 dB) and ratio (4:1).
    pub fn new(sample_rate: f32) -> Self {
        Self {
            envelope: EnvFollower::with_times(sample_rate, 5.0, 120.0),
            threshold_db: -18.0,
            ratio: 4.0,
        }
    }

    /// Set the threshold in dB, clamped to [-60, 0].
    pub fn set_threshold(&mut self, threshold_db: f32) {
        self.threshold_db = threshold_db.clamp(-60.0, 0.0);
    }

    /// Set the compression ratio, clamped to [1, 20].
    pub fn set_ratio(&mut self, ratio: f32) {
        self.ratio = ratio.clamp(1.0, 20.0);
    }

    /// Process one sample, applying gain reduction above the threshold.
    #[inline]
    pub fn process(&mut self, input: f32) -> f32 {
        let level = self.envelope.process(input);
        let level_db = linear_to_db(level);
        let overshoot = level_db - self.threshold_db;

        if overshoot <= 0.0 {
            input
        } else {
            let reduction_db = -overshoot * (1.0 - 1.0 / self.ratio);
            input * db_to_linear(reduction_db)
        }
    }

    /// Reset the envelope state.
    pub fn reset(&mut self) {
        self.envelope.reset();
    }
}
