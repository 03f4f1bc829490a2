//! Delay line with crossfaded dual-length reads.
//!
//! A circular buffer sized once at construction. Besides the plain
//! fractional read, [`DelayLine::read_crossfaded`] blends two delay lengths
//! by a phase value — the mechanism the diffusion network uses to glide
//! from an old delay time to a new one across a block without clicks:
//! the caller ramps `phase` from 0 to 1 over the block and commits the
//! pending length at the block boundary.
//!
//! No allocation occurs after construction.

#[cfg(not(feature = "std"))]
extern crate alloc;

#[cfg(feature = "std")]
extern crate std as alloc;

use alloc::vec;
use alloc::vec::Vec;

/// Circular delay line with linear-interpolated fractional reads.
///
/// # Example
///
/// ```rust
/// use bruma_core::DelayLine;
///
/// let mut delay = DelayLine::new(4800);
/// delay.write(1.0);
/// let out = delay.read(0.0); // most recent sample
/// assert_eq!(out, 1.0);
/// ```
#[derive(Debug, Clone)]
pub struct DelayLine {
    buffer: Vec<f32>,
    write_pos: usize,
}

impl DelayLine {
    /// Create a delay line holding up to `capacity` samples.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is 0.
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "Delay capacity must be > 0");
        Self {
            buffer: vec![0.0; capacity],
            write_pos: 0,
        }
    }

    /// Write a sample and advance the write position.
    #[inline]
    pub fn write(&mut self, sample: f32) {
        self.buffer[self.write_pos] = sample;
        self.write_pos = (self.write_pos + 1) % self.buffer.len();
    }

    /// Read `delay_samples` behind the write head, linearly interpolating
    /// fractional positions. Delays beyond capacity clamp to the oldest
    /// stored sample; negative delays clamp to the newest.
    #[inline]
    pub fn read(&self, delay_samples: f32) -> f32 {
        let len = self.buffer.len();
        let delay = delay_samples.clamp(0.0, (len - 1) as f32);

        let delay_int = delay as usize;
        let frac = delay - delay_int as f32;

        // Points at the sample `delay_int` samples before the last written.
        let read_pos = (self.write_pos + len - delay_int - 1) % len;
        let next_pos = (read_pos + len - 1) % len;

        let a = self.buffer[read_pos];
        let b = self.buffer[next_pos];
        a + (b - a) * frac
    }

    /// Read at two delay lengths and blend by `phase` (0 → `active`,
    /// 1 → `pending`).
    #[inline]
    pub fn read_crossfaded(&self, active: f32, pending: f32, phase: f32) -> f32 {
        let a = self.read(active);
        let b = self.read(pending);
        a + (b - a) * phase
    }

    /// Zero the buffer and rewind the write position.
    pub fn clear(&mut self) {
        self.buffer.fill(0.0);
        self.write_pos = 0;
    }

    /// Maximum delay capacity in samples.
    pub fn capacity(&self) -> usize {
        self.buffer.len()
    }
}
