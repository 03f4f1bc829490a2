//! DC blocking filter.
//!
//! First-order highpass with transfer function:
//!
//! ```text
//! H(z) = (1 - z^-1) / (1 - R * z^-1)
//! ```
//!
//! R close to 1.0 sets a cutoff of a few Hz — below audibility but enough
//! to drain the DC that feedback networks otherwise accumulate.
//!
//! Reference: Julius O. Smith, "Introduction to Digital Filters with Audio
//! Applications", DC Blocker chapter.

use core::f32::consts::PI;

/// DC blocking filter using a first-order highpass.
///
/// At 48 kHz the default R of ~0.999 puts the -3 dB point near 7 Hz.
#[derive(Debug, Clone)]
pub struct DcBlocker {
    coeff: f32,
    x_prev: f32,
    y_prev: f32,
}

impl DcBlocker {
    /// Default cutoff frequency target in Hz.
    const DEFAULT_CUTOFF_HZ: f32 = 7.0;

    /// Create a DC blocker for the given sample rate with the default
    /// ~7 Hz cutoff.
    pub fn new(sample_rate: f32) -> Self {
        Self {
            coeff: Self::calculate_coeff(Self::DEFAULT_CUTOFF_HZ, sample_rate),
            x_prev: 0.0,
            y_prev: 0.0,
        }
    }

    /// Create with an explicit R coefficient, clamped to [0.9, 0.9999].
    pub fn with_coeff(coeff: f32) -> Self {
        Self {
            coeff: coeff.clamp(0.9, 0.9999),
            x_prev: 0.0,
            y_prev: 0.0,
        }
    }

    /// R for a given -3 dB cutoff: `R = 1 - 2π * f_c / f_s`.
    fn calculate_coeff(cutoff_hz: f32, sample_rate: f32) -> f32 {
        (1.0 - 2.0 * PI * cutoff_hz / sample_rate).clamp(0.9, 0.9999)
    }

    /// Process one sample: `y[n] = x[n] - x[n-1] + R * y[n-1]`.
    #[inline]
    pub fn process(&mut self, input: f32) -> f32 {
        let output = input - self.x_prev + self.coeff * self.y_prev;
        self.x_prev = input;
        self.y_prev = output;
        output
    }

    /// Clear filter history.
    pub fn reset(&mut self) {
        self.x_prev = 0.0;
        self.y_prev = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn removes_dc_offset() {
        let mut blocker = DcBlocker::new(48000.0);
        let mut out = 1.0;
        // Constant input should decay toward zero output
        for _ in 0..48000 {
            out = blocker.process(0.5);
        }
        assert!(out.abs() < 1e-3, "DC should be removed, got {out}");
    }

    #[test]
    fn passes_audio_band() {
        let mut blocker = DcBlocker::new(48000.0);
        // 1 kHz sine should pass nearly untouched
        let mut peak = 0.0f32;
        for i in 0..4800 {
            let x = libm::sinf(i as f32 * core::f32::consts::TAU * 1000.0 / 48000.0);
            peak = peak.max(blocker.process(x).abs());
        }
        assert!(peak > 0.95, "1 kHz should pass, peak = {peak}");
    }

    #[test]
    fn reset_clears_history() {
        let mut blocker = DcBlocker::new(48000.0);
        blocker.process(1.0);
        blocker.reset();
        assert_eq!(blocker.process(0.0), 0.0);
    }
}
