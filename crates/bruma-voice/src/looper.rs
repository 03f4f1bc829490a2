//! Stereo loop ring buffer with crossfaded recording and variable-speed,
//! bidirectional playback.
//!
//! One large sample store logically split into two equal contiguous
//! regions (left then right). Two [`WriteHead`]s record into their own
//! regions; the playback path reads four neighboring samples per channel
//! and interpolates with a Catmull-Rom Hermite curve, so the loop can play
//! at any fractional rate in either direction without zipper artifacts.
//!
//! The buffer is pre-filled with a low-level noise floor: un-recorded
//! regions are near-inaudible but never digital silence. Clearing restores
//! that floor incrementally, one bounded sub-block per call, so a full
//! clear spreads across many blocks instead of stalling one.

#[cfg(not(feature = "std"))]
extern crate alloc;

#[cfg(feature = "std")]
extern crate std as alloc;

use alloc::vec::Vec;

use bruma_core::NoiseSource;

use crate::write_head::WriteHead;

/// Samples per channel region (10 seconds at 48 kHz).
pub const CHANNEL_LENGTH: usize = 480_000;
/// Total buffer length across both channel regions.
pub const TOTAL_LENGTH: usize = CHANNEL_LENGTH * 2;
/// Punch crossfade length in samples (10 ms at 48 kHz).
pub const FADE_LENGTH: usize = 480;
/// Samples re-randomized per [`LooperBuffer::clear`] call.
const CLEAR_BLOCK: usize = 9600;
/// Amplitude of the idle noise floor.
const NOISE_LEVEL: f32 = 2e-3;

/// Playback direction for [`LooperBuffer::read`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlaybackDirection {
    /// Not moving: playback yields silence.
    Stalled,
    /// Normal playback.
    #[default]
    Forward,
    /// Reversed playback.
    Backward,
}

impl PlaybackDirection {
    /// Index step per sample: 0, +1 or -1.
    #[inline]
    pub fn step(self) -> i64 {
        match self {
            PlaybackDirection::Stalled => 0,
            PlaybackDirection::Forward => 1,
            PlaybackDirection::Backward => -1,
        }
    }
}

/// Wrap an arbitrary (possibly negative or over-capacity) position into
/// `[0, len)`.
#[inline]
fn wrap(position: i64, len: i64) -> usize {
    let mut p = position % len;
    if p < 0 {
        p += len;
    }
    p as usize
}

/// Catmull-Rom Hermite interpolation through four neighboring samples at
/// fractional position `f` past `x0`.
#[inline]
fn hermite(xm1: f32, x0: f32, x1: f32, x2: f32, f: f32) -> f32 {
    let c1 = 0.5 * (x1 - xm1);
    let c2 = xm1 - 2.5 * x0 + 2.0 * x1 - 0.5 * x2;
    let c3 = 0.5 * (x2 - xm1) + 1.5 * (x0 - x1);
    ((c3 * f + c2) * f + c1) * f + x0
}

/// Stereo loop buffer: shared sample store, two write heads, Hermite reads.
#[derive(Debug)]
pub struct LooperBuffer {
    buffer: Vec<f32>,
    heads: [WriteHead; 2],
    clear_cursor: usize,
    noise: NoiseSource,
}

impl Default for LooperBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl LooperBuffer {
    /// Create a looper pre-filled with the idle noise floor.
    pub fn new() -> Self {
        let mut noise = NoiseSource::default();
        let buffer = (0..TOTAL_LENGTH)
            .map(|_| noise.next_bipolar() * NOISE_LEVEL)
            .collect();

        Self {
            buffer,
            heads: [WriteHead::new(FADE_LENGTH), WriteHead::new(FADE_LENGTH)],
            clear_cursor: 0,
            noise,
        }
    }

    /// The raw sample store (left region first, then right).
    pub fn buffer(&self) -> &[f32] {
        &self.buffer
    }

    /// Re-randomize one sub-block of the buffer back to the noise floor,
    /// advancing an internal cursor. Returns `true` exactly when the cursor
    /// wraps past the buffer end, signalling a complete clear cycle.
    pub fn clear(&mut self) -> bool {
        if self.clear_cursor >= TOTAL_LENGTH {
            self.clear_cursor = 0;

            #[cfg(feature = "tracing")]
            tracing::debug!("looper: clear cycle complete");

            return true;
        }

        let end = (self.clear_cursor + CLEAR_BLOCK).min(TOTAL_LENGTH);
        for sample in &mut self.buffer[self.clear_cursor..end] {
            *sample = self.noise.next_bipolar() * NOISE_LEVEL;
        }
        self.clear_cursor += CLEAR_BLOCK;

        false
    }

    /// Record one stereo sample at loop index `i`: each head writes into
    /// its own channel region, so the single-writer-per-region discipline
    /// holds by construction.
    #[inline]
    pub fn write(&mut self, i: usize, left: f32, right: f32) {
        let (left_region, right_region) = self.buffer.split_at_mut(CHANNEL_LENGTH);
        self.heads[0].write(left_region, i, left);
        self.heads[1].write(right_region, i, right);
    }

    /// True only while both channel heads are writing (symmetric stereo
    /// recording).
    #[inline]
    pub fn is_recording(&self) -> bool {
        self.heads[0].is_writing() && self.heads[1].is_writing()
    }

    /// Punch in on both channels.
    pub fn start_recording(&mut self) {
        #[cfg(feature = "tracing")]
        tracing::debug!("looper: recording started");

        self.heads[0].start();
        self.heads[1].start();
    }

    /// Punch out on both channels.
    pub fn stop_recording(&mut self) {
        #[cfg(feature = "tracing")]
        tracing::debug!("looper: recording stopping");

        self.heads[0].stop();
        self.heads[1].stop();
    }

    /// Read one sample from a channel region with full wrap normalization.
    #[inline]
    fn read_channel(&self, region_offset: usize, position: i64) -> f32 {
        self.buffer[region_offset + wrap(position, CHANNEL_LENGTH as i64)]
    }

    /// Four taps around integer position `p` in playback order.
    #[inline]
    fn read4(&self, region_offset: usize, p: i64, dir: i64) -> (f32, f32, f32, f32) {
        (
            self.read_channel(region_offset, p - dir),
            self.read_channel(region_offset, p),
            self.read_channel(region_offset, p + dir),
            self.read_channel(region_offset, p + 2 * dir),
        )
    }

    /// Read a stereo sample at fractional `position`, interpolated with a
    /// Catmull-Rom Hermite curve over four taps laid out along the play
    /// direction. `Stalled` yields silence.
    #[inline]
    pub fn read(&self, position: f32, direction: PlaybackDirection) -> (f32, f32) {
        let dir = direction.step();
        if dir == 0 {
            return (0.0, 0.0);
        }

        let i = libm::floorf(position) as i64;
        let f = position - libm::floorf(position);

        let (lm1, l0, l1, l2) = self.read4(0, i, dir);
        let (rm1, r0, r1, r2) = self.read4(CHANNEL_LENGTH, i, dir);

        (hermite(lm1, l0, l1, l2, f), hermite(rm1, r0, r1, r2, f))
    }
}
