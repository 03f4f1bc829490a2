//! Feedback-path damping filter.
//!
//! One instance per stereo channel of the reverb. Approximates a pair of
//! shelving filters with two one-pole stages: a tracking lowpass whose
//! coefficient sets the high-frequency damping, and a lowpass-of-the-lowpass
//! whose subtraction emulates a highpass for low-frequency damping.
//!
//! Both controls take a damping amount in decibels, -0.5 (minimal) to
//! -40 (heavy); the mapping to coefficients is linear with the clamp
//! guaranteeing the filters never fully open or fully freeze.

use bruma_core::{OnePole, map};

/// Heaviest damping amount accepted, in dB.
pub const DAMP_HEAVY_DB: f32 = -40.0;
/// Lightest damping amount accepted, in dB.
pub const DAMP_LIGHT_DB: f32 = -0.5;

/// High/low damping filter for one reverb feedback path.
#[derive(Debug, Clone, Default)]
pub struct Damp {
    lowpass: OnePole,
    tracker: OnePole,
}

impl Damp {
    /// Create with both stages frozen (no signal until configured).
    pub fn new() -> Self {
        Self::default()
    }

    /// Set high-frequency damping from an attenuation amount in dB.
    ///
    /// Heavy damping closes the lowpass (coefficient toward 0), minimal
    /// damping opens it (toward 1).
    pub fn set_hi(&mut self, db: f32) {
        let coeff = map(db, DAMP_HEAVY_DB, DAMP_LIGHT_DB, 0.05, 0.9);
        self.lowpass.set_coefficient(coeff.clamp(0.001, 0.999));
    }

    /// Set low-frequency damping from an attenuation amount in dB.
    ///
    /// Inverted mapping: heavy damping pushes the tracking coefficient
    /// toward 1, so the tracker converges on the already-lowpassed signal
    /// and the subtraction cancels the bass.
    pub fn set_lo(&mut self, db: f32) {
        let coeff = map(db, DAMP_HEAVY_DB, DAMP_LIGHT_DB, 0.9, 0.05);
        self.tracker.set_coefficient(coeff.clamp(0.001, 0.999));
    }

    /// Current lowpass (high-damping) coefficient.
    pub fn hi_coefficient(&self) -> f32 {
        self.lowpass.coefficient()
    }

    /// Current tracker (low-damping) coefficient.
    pub fn lo_coefficient(&self) -> f32 {
        self.tracker.coefficient()
    }

    /// Process one sample.
    ///
    /// Updates the lowpass state, then the tracking state, and returns the
    /// band-limited combination `lowpass - tracker` so both damping
    /// controls shape the feedback. Returning the lowpass state alone (high
    /// damping only, the classic reverb-damping convention) is the
    /// alternative; this implementation keeps the low-damping control
    /// audible.
    #[inline]
    pub fn process(&mut self, input: f32) -> f32 {
        let lp = self.lowpass.process(input);
        let track = self.tracker.process(lp);
        lp - track
    }

    /// Reset both filter states.
    pub fn reset(&mut self) {
        self.lowpass.reset();
        self.tracker.reset();
    }
}
