//! One-pole tracking lowpass.
//!
//! The simplest IIR lowpass:
//!
//! ```text
//! y[n] = y[n-1] + coeff * (x[n] - y[n-1])
//! ```
//!
//! 6 dB/octave, zero latency, one multiply per sample. The coefficient can
//! be set directly — reverb damping maps an attenuation amount straight to
//! a coefficient rather than a cutoff — or derived from a frequency.
//!
//! # Reference
//!
//! Julius O. Smith III, "Introduction to Digital Filters with Audio
//! Applications", Section: One-Pole Filter.

use crate::flush_denormal;
use libm::expf;

/// One-pole (6 dB/oct) lowpass filter with direct coefficient control.
///
/// # Invariants
///
/// - `coeff` stays in [0, 1]; 0 freezes the state, 1 tracks the input
///   instantly
/// - `state` is flushed to zero below 1e-20 (denormal protection)
#[derive(Debug, Clone, Default)]
pub struct OnePole {
    state: f32,
    coeff: f32,
}

impl OnePole {
    /// Create a filter with the given coefficient (clamped to [0, 1]).
    pub fn new(coeff: f32) -> Self {
        Self {
            state: 0.0,
            coeff: coeff.clamp(0.0, 1.0),
        }
    }

    /// Create a filter from a cutoff frequency.
    ///
    /// `coeff = 1 - exp(-2π * freq / sample_rate)`: low cutoff → small
    /// coefficient → heavy filtering.
    pub fn from_frequency(sample_rate: f32, freq_hz: f32) -> Self {
        Self {
            state: 0.0,
            coeff: 1.0 - expf(-core::f32::consts::TAU * freq_hz / sample_rate),
        }
    }

    /// Set the tracking coefficient directly (clamped to [0, 1]).
    #[inline]
    pub fn set_coefficient(&mut self, coeff: f32) {
        self.coeff = coeff.clamp(0.0, 1.0);
    }

    /// Current tracking coefficient.
    #[inline]
    pub fn coefficient(&self) -> f32 {
        self.coeff
    }

    /// Process one sample, returning the lowpassed value.
    #[inline]
    pub fn process(&mut self, input: f32) -> f32 {
        self.state = flush_denormal(self.state + self.coeff * (input - self.state));
        self.state
    }

    /// Current filter state without advancing.
    #[inline]
    pub fn state(&self) -> f32 {
        self.state
    }

    /// Reset filter state to zero.
    pub fn reset(&mut self) {
        self.state = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn passes_dc() {
        let mut lp = OnePole::new(0.1);
        let mut out = 0.0;
        for _ in 0..1000 {
            out = lp.process(1.0);
        }
        assert!((out - 1.0).abs() < 1e-4, "DC should pass, got {out}");
    }

    #[test]
    fn attenuates_nyquist() {
        let mut lp = OnePole::from_frequency(48000.0, 100.0);
        let mut sum = 0.0f32;
        for i in 0..4800 {
            let input = if i % 2 == 0 { 1.0 } else { -1.0 };
            sum += lp.process(input).abs();
        }
        let avg = sum / 4800.0;
        assert!(avg < 0.05, "Nyquist should be heavily attenuated: {avg}");
    }

    #[test]
    fn coefficient_clamped_to_unit_range() {
        let mut lp = OnePole::new(5.0);
        assert_eq!(lp.coefficient(), 1.0);
        lp.set_coefficient(-2.0);
        assert_eq!(lp.coefficient(), 0.0);
    }

    #[test]
    fn unity_coefficient_tracks_instantly() {
        let mut lp = OnePole::new(1.0);
        assert_eq!(lp.process(0.7), 0.7);
    }

    #[test]
    fn reset_clears_state() {
        let mut lp = OnePole::new(0.5);
        lp.process(1.0);
        lp.reset();
        assert_eq!(lp.state(), 0.0);
    }
}
