//! Sine oscillator.
//!
//! Phase-accumulating sine used for slow modulation (the reverb's auto-pan
//! runs one of these at block rate). Alias-free by construction at the
//! frequencies it is used for.

use core::f32::consts::PI;
use libm::sinf;

/// Phase-accumulating sine oscillator.
///
/// # Example
///
/// ```rust
/// use bruma_core::SineOscillator;
///
/// let mut osc = SineOscillator::new(750.0); // block rate
/// osc.set_frequency(2.0);
/// let value = osc.generate(); // in [-1, 1]
/// assert!(value.abs() <= 1.0);
/// ```
#[derive(Debug, Clone)]
pub struct SineOscillator {
    phase: f32,
    phase_inc: f32,
    sample_rate: f32,
}

impl SineOscillator {
    /// Create an oscillator running at `sample_rate` (which may be a block
    /// rate for per-block modulators), initially silent at 0 Hz.
    pub fn new(sample_rate: f32) -> Self {
        Self {
            phase: 0.0,
            phase_inc: 0.0,
            sample_rate,
        }
    }

    /// Set oscillation frequency in Hz.
    #[inline]
    pub fn set_frequency(&mut self, freq_hz: f32) {
        self.phase_inc = freq_hz / self.sample_rate;
    }

    /// Current frequency in Hz.
    pub fn frequency(&self) -> f32 {
        self.phase_inc * self.sample_rate
    }

    /// Produce the next sample in [-1, 1] and advance the phase.
    #[inline]
    pub fn generate(&mut self) -> f32 {
        let output = sinf(self.phase * 2.0 * PI);
        self.phase += self.phase_inc;
        if self.phase >= 1.0 {
            self.phase -= 1.0;
        }
        output
    }

    /// Reset phase to zero.
    pub fn reset(&mut self) {
        self.phase = 0.0;
    }
}
