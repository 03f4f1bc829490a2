//! Crossfaded punch-in/punch-out recording head.
//!
//! A recording head is a four-state machine: Inactive → FadeIn → Active →
//! FadeOut → Inactive. While fading, every written sample is an equal-power
//! blend of the incoming value with the buffer's pre-existing content, so a
//! punch never lands as a hard cut. The head owns no audio: the ring slice
//! it records into is passed to [`WriteHead::write`] each call, which makes
//! exclusive access a borrow-checker fact rather than a pointer discipline.

use bruma_core::equal_power_crossfade;

/// Recording state of a [`WriteHead`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum WriteState {
    Inactive,
    FadeIn,
    FadeOut,
    Active,
}

/// Per-channel punch-in/out state machine.
#[derive(Debug, Clone)]
pub struct WriteHead {
    state: WriteState,
    fade_index: usize,
    fade_length: usize,
    fade_recip: f32,
}

impl WriteHead {
    /// Create a head with the given crossfade length in samples.
    ///
    /// # Panics
    ///
    /// Panics if `fade_length` is 0.
    pub fn new(fade_length: usize) -> Self {
        assert!(fade_length > 0, "Fade length must be > 0");
        Self {
            state: WriteState::Inactive,
            fade_index: 0,
            fade_length,
            fade_recip: 1.0 / fade_length as f32,
        }
    }

    /// Whether the head is currently writing (any state but Inactive).
    #[inline]
    pub fn is_writing(&self) -> bool {
        self.state != WriteState::Inactive
    }

    /// Begin recording. Only honored from Inactive; a head mid-fade or
    /// already active ignores the request.
    #[inline]
    pub fn start(&mut self) {
        if self.state == WriteState::Inactive {
            self.state = WriteState::FadeIn;
            self.fade_index = 0;
        }
    }

    /// End recording. Only honored from Active.
    #[inline]
    pub fn stop(&mut self) {
        if self.state == WriteState::Active {
            self.state = WriteState::FadeOut;
            self.fade_index = 0;
        }
    }

    /// Record one sample at `position` (wrap-normalized into the slice).
    ///
    /// During a fade the written value is crossfaded against the existing
    /// content; the exact last fade sample settles fully into the new
    /// state — a completing fade-in writes the raw input, a completing
    /// fade-out leaves the buffer untouched. Inactive heads write nothing.
    #[inline]
    pub fn write(&mut self, buffer: &mut [f32], position: usize, value: f32) {
        let position = position % buffer.len();
        let mut value = value;

        if self.state == WriteState::FadeIn || self.state == WriteState::FadeOut {
            let mut x = self.fade_index as f32 * self.fade_recip;
            if self.state == WriteState::FadeIn {
                x = 1.0 - x;
            }
            self.fade_index += 1;
            if self.fade_index == self.fade_length {
                x = if self.state == WriteState::FadeOut { 1.0 } else { 0.0 };
                self.state = if self.state == WriteState::FadeIn {
                    WriteState::Active
                } else {
                    WriteState::Inactive
                };
            }
            value = equal_power_crossfade(value, buffer[position], x);
        }

        if self.state != WriteState::Inactive {
            buffer[position] = value;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inactive_head_writes_nothing() {
        let mut head = WriteHead::new(32);
        let mut buffer = vec![0.5; 8];
        head.write(&mut buffer, 3, 1.0);
        assert_eq!(buffer[3], 0.5);
        assert!(!head.is_writing());
    }

    #[test]
    fn fade_in_reaches_raw_input_at_boundary() {
        let mut head = WriteHead::new(32);
        let mut buffer = vec![0.0; 64];
        head.start();
        for i in 0..31 {
            head.write(&mut buffer, i, 1.0);
        }
        // 32nd fade sample settles fully on the new input
        head.write(&mut buffer, 31, 1.0);
        assert_eq!(buffer[31], 1.0);
        assert!(head.is_writing());
    }

    #[test]
    fn fade_in_ramps_toward_input() {
        let mut head = WriteHead::new(32);
        let mut buffer = vec![0.0; 64];
        head.start();
        for i in 0..32 {
            head.write(&mut buffer, i, 1.0);
        }
        // Early fade samples are mostly old content, late ones mostly new
        assert!(buffer[0] < 0.2, "first fade sample: {}", buffer[0]);
        assert!(buffer[30] > 0.8, "late fade sample: {}", buffer[30]);
    }

    #[test]
    fn fade_out_leaves_existing_content_at_boundary() {
        let mut head = WriteHead::new(4);
        let mut buffer = vec![0.25; 16];
        head.start();
        for i in 0..4 {
            head.write(&mut buffer, i, 1.0);
        }
        assert!(head.is_writing());
        head.stop();
        for i in 4..8 {
            head.write(&mut buffer, i, 1.0);
        }
        // Fade-out boundary sample writes nothing: pre-existing content wins
        assert_eq!(buffer[7], 0.25);
        assert!(!head.is_writing());
    }

    #[test]
    fn start_ignored_while_fading() {
        let mut head = WriteHead::new(8);
        let mut buffer = vec![0.0; 16];
        head.start();
        head.write(&mut buffer, 0, 1.0);
        head.start(); // should not restart the fade
        for i in 1..8 {
            head.write(&mut buffer, i, 1.0);
        }
        // Fade completed on schedule despite the second start
        assert_eq!(buffer[7], 1.0);
    }

    #[test]
    fn stop_ignored_unless_active() {
        let mut head = WriteHead::new(8);
        head.stop();
        assert!(!head.is_writing());
        head.start();
        head.stop(); // mid-fade-in: ignored
        assert!(head.is_writing());
    }

    #[test]
    fn position_wraps_into_bounds() {
        let mut head = WriteHead::new(1);
        let mut buffer = vec![0.0; 8];
        head.start();
        head.write(&mut buffer, 8 + 3, 1.0);
        // fade_length 1 settles instantly; the wrapped slot received the value
        assert_eq!(buffer[3], 1.0);
    }

    #[test]
    fn crossfade_bounded_by_envelope() {
        // No fade sample may exceed the blend of old and new beyond the
        // equal-power transient
        let mut head = WriteHead::new(16);
        let mut buffer = vec![0.5; 32];
        head.start();
        for i in 0..16 {
            head.write(&mut buffer, i, 1.0);
            assert!(buffer[i] <= 1.4 * 1.0 + 1e-6);
            assert!(buffer[i] >= 0.0);
        }
    }
}
