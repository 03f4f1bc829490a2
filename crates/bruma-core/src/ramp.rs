//! Scoped linear parameter ramps for zipper-free control changes.
//!
//! A control value that steps once per block produces audible "zipper"
//! artifacts. [`InterpolationRamp`] spreads the step across the block:
//! it borrows the persistent state cell, walks from the stored value toward
//! the new target one increment per sample, and commits the final value
//! back to the cell when it goes out of scope.
//!
//! The exclusive borrow is load-bearing: a ramp cannot be copied or cloned,
//! so exactly one write-back happens per activation, and the borrow checker
//! rejects a second ramp over the same cell within the scope.
//!
//! # Usage
//!
//! ```rust
//! use bruma_core::InterpolationRamp;
//!
//! let mut gain = 0.0_f32;
//! {
//!     let mut ramp = InterpolationRamp::new(&mut gain, 1.0, 4);
//!     assert_eq!(ramp.next(), 0.25);
//!     assert_eq!(ramp.next(), 0.5);
//! }
//! // Scope exit committed the last interpolated value.
//! assert_eq!(gain, 0.5);
//! ```

/// Linear ramp from a stored value toward a target, committed on drop.
#[derive(Debug)]
pub struct InterpolationRamp<'a> {
    state: &'a mut f32,
    value: f32,
    increment: f32,
}

impl<'a> InterpolationRamp<'a> {
    /// Ramp by block size: the delta is divided by `size` so the target is
    /// reached exactly on the `size`-th call to [`next`](Self::next).
    ///
    /// `size` of zero degenerates to a flat ramp (no movement, no commit
    /// drift).
    pub fn new(state: &'a mut f32, target: f32, size: usize) -> Self {
        let value = *state;
        let increment = if size > 0 {
            (target - value) / size as f32
        } else {
            0.0
        };
        Self {
            state,
            value,
            increment,
        }
    }

    /// Ramp by step factor: each call moves a fixed fraction of the delta.
    /// Used where the caller wants a rate rather than an arrival time.
    pub fn with_step(state: &'a mut f32, target: f32, step: f32) -> Self {
        let value = *state;
        Self {
            state,
            value,
            increment: (target - value) * step,
        }
    }

    /// Advance one sample and return the interpolated value.
    #[inline]
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> f32 {
        self.value += self.increment;
        self.value
    }

    /// Peek at a fractional position ahead of the current value without
    /// advancing.
    #[inline]
    pub fn subsample(&self, t: f32) -> f32 {
        self.value + self.increment * t
    }
}

impl Drop for InterpolationRamp<'_> {
    fn drop(&mut self) {
        *self.state = self.value;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-4;

    #[test]
    fn ramps_up_and_commits() {
        let mut state = 0.0;
        {
            let mut ramp = InterpolationRamp::new(&mut state, 1.0, 4);
            assert!((ramp.next() - 0.25).abs() < EPS);
            assert!((ramp.next() - 0.50).abs() < EPS);
            assert!((ramp.next() - 0.75).abs() < EPS);
            assert!((ramp.next() - 1.00).abs() < EPS);
        }
        assert!((state - 1.0).abs() < EPS);
    }

    #[test]
    fn ramps_down_and_commits() {
        let mut state = 1.0;
        {
            let mut ramp = InterpolationRamp::new(&mut state, 0.0, 4);
            assert!((ramp.next() - 0.75).abs() < EPS);
            assert!((ramp.next() - 0.50).abs() < EPS);
        }
        // Commit reflects where the ramp stopped, not the target.
        assert!((state - 0.5).abs() < EPS);
    }

    #[test]
    fn flat_when_target_matches_state() {
        let mut state = 0.5;
        {
            let mut ramp = InterpolationRamp::new(&mut state, 0.5, 4);
            assert!((ramp.next() - 0.5).abs() < EPS);
            assert!((ramp.next() - 0.5).abs() < EPS);
        }
        assert!((state - 0.5).abs() < EPS);
    }

    #[test]
    fn subsample_peeks_between_samples() {
        let mut state = 0.0;
        let ramp = InterpolationRamp::new(&mut state, 1.0, 4);
        assert!((ramp.subsample(0.5) - 0.125).abs() < EPS);
    }

    #[test]
    fn step_mode_moves_by_fraction_of_delta() {
        let mut state = 0.0;
        {
            let mut ramp = InterpolationRamp::with_step(&mut state, 1.0, 0.01);
            assert!((ramp.next() - 0.01).abs() < EPS);
            assert!((ramp.next() - 0.02).abs() < EPS);
        }
        assert!((state - 0.02).abs() < EPS);
    }

    #[test]
    fn zero_size_stays_flat() {
        let mut state = 0.3;
        {
            let mut ramp = InterpolationRamp::new(&mut state, 1.0, 0);
            assert!((ramp.next() - 0.3).abs() < EPS);
        }
        assert!((state - 0.3).abs() < EPS);
    }
}
