//! Block-reversed playback buffer.
//!
//! A circular store whose read head walks backwards through fixed-size
//! blocks of previously-written audio while the write head moves forward.
//! Each block is shaped by a parabolic window `4x(1-x)` that reaches zero
//! at both block edges, so the jump back to the write position at each
//! block boundary never produces a click — the smooth "reverse tape"
//! effect instead of a periodic zipper artifact.

#[cfg(not(feature = "std"))]
extern crate alloc;

#[cfg(feature = "std")]
extern crate std as alloc;

use alloc::vec;
use alloc::vec::Vec;

use bruma_core::hard_clip;

/// Circular store playing fixed-size blocks back in reverse.
#[derive(Debug, Clone)]
pub struct ReversedBuffer {
    line: Vec<f32>,
    write_idx: usize,
    read_idx: isize,
    block_size: usize,
    countdown: usize,
    window_recip: f32,
    out: f32,
}

impl ReversedBuffer {
    /// Create with the given capacity. The reversal block starts at half
    /// the capacity (its maximum).
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is less than 2.
    pub fn new(capacity: usize) -> Self {
        assert!(capacity >= 2, "Reversal buffer needs at least 2 samples");
        let block_size = capacity >> 1;
        Self {
            line: vec![0.0; capacity],
            write_idx: 0,
            read_idx: capacity as isize - 1,
            block_size,
            countdown: block_size,
            window_recip: 1.0 / block_size as f32,
            out: 0.0,
        }
    }

    /// Set the reversal block size, clamped to [1, capacity/2]. Takes
    /// effect at the next block boundary.
    pub fn set_delay(&mut self, block: usize) {
        self.block_size = block.clamp(1, self.line.len() >> 1);
    }

    /// Current reversal block size.
    pub fn delay(&self) -> usize {
        self.block_size
    }

    /// The most recent windowed output, without advancing state. The
    /// orchestrator reads this one sample ahead of feeding the next input.
    #[inline]
    pub fn last_out(&self) -> f32 {
        self.out
    }

    /// The raw sample the read head will consume next, unwindowed and
    /// without advancing state.
    #[inline]
    pub fn next_out(&self) -> f32 {
        self.line[self.read_idx as usize]
    }

    /// Write one input sample and produce one reversed, windowed sample.
    #[inline]
    pub fn process(&mut self, input: f32) -> f32 {
        self.line[self.write_idx] = input;
        self.write_idx += 1;
        if self.write_idx == self.line.len() {
            self.write_idx = 0;
        }

        let x = self.countdown as f32 * self.window_recip;
        let g = 4.0 * x * (1.0 - x);
        self.out = hard_clip(self.line[self.read_idx as usize] * g, 3.0);
        self.read_idx -= 1;
        self.countdown -= 1;

        if self.countdown == 0 {
            // Restart just behind the write head with the (possibly updated)
            // block size; the window fraction is rescaled with it.
            self.read_idx = self.write_idx as isize - 1;
            self.countdown = self.block_size;
            self.window_recip = 1.0 / self.block_size as f32;
        }
        while self.read_idx < 0 {
            self.read_idx += self.line.len() as isize;
        }

        self.out
    }

    /// Zero the stored audio and the output latch.
    pub fn clear(&mut self) {
        self.line.fill(0.0);
        self.out = 0.0;
    }
}
