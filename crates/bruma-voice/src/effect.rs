//! Stereo effect boundary and block interchange type.
//!
//! The host invokes each effect once per audio block with an input and an
//! output buffer of equal fixed length plus a read-only control snapshot.
//! Effects never retain buffer references beyond the call.

#[cfg(not(feature = "std"))]
extern crate alloc;

#[cfg(feature = "std")]
extern crate std as alloc;

use alloc::vec;
use alloc::vec::Vec;

use crate::controls::ControlFrame;

/// A pair of stereo audio buffers (left and right channels).
///
/// The standard interchange type for block processing. Each channel is a
/// `Vec<f32>` of equal length, allocated once and reused across blocks.
///
/// # Example
///
/// ```rust
/// use bruma_voice::StereoBuffer;
///
/// let block = StereoBuffer::new(64);
/// assert_eq!(block.len(), 64);
/// ```
#[derive(Debug, Clone)]
pub struct StereoBuffer {
    /// Left channel samples.
    pub left: Vec<f32>,
    /// Right channel samples.
    pub right: Vec<f32>,
}

impl StereoBuffer {
    /// Create a silent buffer of `block_size` samples per channel.
    pub fn new(block_size: usize) -> Self {
        Self {
            left: vec![0.0; block_size],
            right: vec![0.0; block_size],
        }
    }

    /// Create from existing channel data.
    ///
    /// # Panics
    ///
    /// Panics if the channels differ in length.
    pub fn from_channels(left: Vec<f32>, right: Vec<f32>) -> Self {
        assert_eq!(left.len(), right.len(), "Channels must have same length");
        Self { left, right }
    }

    /// Samples per channel.
    pub fn len(&self) -> usize {
        self.left.len()
    }

    /// Whether the buffer holds no samples.
    pub fn is_empty(&self) -> bool {
        self.left.is_empty()
    }

    /// Zero both channels in place.
    pub fn clear(&mut self) {
        self.left.fill(0.0);
        self.right.fill(0.0);
    }
}

/// A block-processing stereo effect driven by a per-block control snapshot.
pub trait StereoEffect {
    /// Process one block: read `input`, write `output` (same length),
    /// consulting the control `frame`. Must not allocate or block.
    fn process(&mut self, frame: &ControlFrame, input: &StereoBuffer, output: &mut StereoBuffer);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_buffer_is_silent() {
        let block = StereoBuffer::new(16);
        assert_eq!(block.len(), 16);
        assert!(block.left.iter().all(|&s| s == 0.0));
        assert!(block.right.iter().all(|&s| s == 0.0));
    }

    #[test]
    #[should_panic]
    fn mismatched_channels_panic() {
        let _ = StereoBuffer::from_channels(vec![0.0; 4], vec![0.0; 8]);
    }

    #[test]
    fn clear_zeroes_in_place() {
        let mut block = StereoBuffer::from_channels(vec![1.0; 4], vec![-1.0; 4]);
        block.clear();
        assert!(block.left.iter().chain(block.right.iter()).all(|&s| s == 0.0));
    }
}
