//! Diffusion network for one reverb channel.
//!
//! A chain of delay taps, each mixing its input with hard-clipped feedback,
//! smears a transient into a dense decaying tail. The final tap is the
//! anchor: its (longest) delay sets the loop period the decay-time control
//! is resolved against, and its output — scaled by the decay-derived
//! feedback gain — is what the caller feeds back across channels.
//!
//! Delay-time changes are double-buffered: [`Diffuse::set_size`] writes
//! pending lengths, per-sample reads crossfade between active and pending
//! by the caller's 0→1 block phase, and [`Diffuse::commit_delay_times`]
//! promotes pending to active exactly once per block. Nothing mutates an
//! active length mid-block.

use bruma_core::{DelayLine, db_to_linear, hard_clip, note_to_delay};

/// Number of delay taps in the chain.
pub const NUM_TAPS: usize = 8;

/// One delay tap: its line plus the double-buffered delay length and the
/// output sample carried between mixing steps.
#[derive(Debug, Clone)]
struct DelayTap {
    line: DelayLine,
    active: f32,
    pending: f32,
    last_out: f32,
}

/// Diffusion network with decay-stabilized feedback.
///
/// # Stability
///
/// The feedback gain computed by [`set_decay_time`](Self::set_decay_time)
/// is clamped to ≤ 1.0, so feedback energy per loop traversal never exceeds
/// unity and the output stays bounded for any decay-time input. Hard
/// clipping at every mixing junction contains transient overshoot.
#[derive(Debug, Clone)]
pub struct Diffuse {
    taps: [DelayTap; NUM_TAPS],
    sample_rate: f32,
    size: f32,
    time: f32,
    feedback_gain: f32,
    diffusion: f32,
    fb_out: f32,
    needs_update: bool,
}

impl Diffuse {
    /// Create a network with one second of delay capacity per tap.
    pub fn new(sample_rate: f32) -> Self {
        let capacity = (sample_rate as usize).max(1);
        let taps = core::array::from_fn(|_| DelayTap {
            line: DelayLine::new(capacity),
            active: 1.0,
            pending: 1.0,
            last_out: 0.0,
        });

        let mut diffuse = Self {
            taps,
            sample_rate,
            size: 0.0,
            time: 0.0,
            feedback_gain: 0.0,
            diffusion: 0.0,
            fb_out: 0.0,
            needs_update: false,
        };
        diffuse.set_size(1.0);
        diffuse.commit_delay_times();
        diffuse.set_decay_time(0.0);
        diffuse
    }

    /// Retune every tap from a musical size value.
    ///
    /// Taps 0..N-2 sit at `size + 2(i+1)`; the anchor tap sits seven
    /// semitones below `size`, giving it the longest delay of the chain.
    /// All lengths are clamped to the line capacity and marked pending;
    /// the decay coefficient is re-resolved against the new anchor delay so
    /// a size change does not detune the advertised decay time.
    pub fn set_size(&mut self, size: f32) {
        self.size = size;
        let max_delay = (self.taps[0].line.capacity() - 1) as f32;
        for (i, tap) in self.taps.iter_mut().take(NUM_TAPS - 1).enumerate() {
            let note = size + 2.0 * (i + 1) as f32;
            tap.pending = note_to_delay(note, self.sample_rate).clamp(1.0, max_delay);
        }
        self.taps[NUM_TAPS - 1].pending =
            note_to_delay(size - 7.0, self.sample_rate).clamp(1.0, max_delay);

        self.set_decay_time(self.time);
        self.needs_update = true;
    }

    /// Resolve the decay-time control into a feedback gain.
    ///
    /// `gain = dB→linear((anchor_delay / note_to_delay(time)) * -60 dB)`:
    /// when the requested decay period dwarfs the loop period the exponent
    /// approaches zero and the gain approaches (but never exceeds) unity.
    pub fn set_decay_time(&mut self, time: f32) {
        self.time = time;
        let loop_delay = self.taps[NUM_TAPS - 1].pending;
        let decay_delay = note_to_delay(time, self.sample_rate);
        debug_assert!(decay_delay > 0.0, "decay mapping must exclude zero");
        let gain = db_to_linear((loop_delay / decay_delay) * -60.0);
        self.feedback_gain = gain.min(1.0);
    }

    /// Set the per-tap diffusion coefficient, clamped to [0, 1].
    pub fn set_diffusion(&mut self, diffusion: f32) {
        self.diffusion = diffusion.clamp(0.0, 1.0);
    }

    /// Current feedback gain (≤ 1.0 by construction).
    pub fn feedback_gain(&self) -> f32 {
        self.feedback_gain
    }

    /// The anchor tap's pending delay length in samples.
    pub fn anchor_delay(&self) -> f32 {
        self.taps[NUM_TAPS - 1].pending
    }

    /// The decay-scaled anchor output, read by the opposite channel's
    /// feedback path.
    #[inline]
    pub fn feedback_out(&self) -> f32 {
        self.fb_out
    }

    /// Promote pending delay lengths to active. Call once per block, after
    /// the sample loop — never mid-block, to avoid tearing the crossfade.
    pub fn commit_delay_times(&mut self) {
        if !self.needs_update {
            return;
        }
        for tap in &mut self.taps {
            tap.active = tap.pending;
        }
        self.needs_update = false;
    }

    /// Process one sample.
    ///
    /// `mod_phase` is the caller's 0→1 ramp across the block, used to
    /// crossfade each tap read between its active and pending delay length.
    #[inline]
    pub fn process(&mut self, input: f32, mod_phase: f32) -> f32 {
        let mut out = input;

        for tap in self.taps.iter_mut().take(NUM_TAPS - 1) {
            let prev = hard_clip(out - tap.last_out * self.diffusion, 1.0);
            tap.line.write(prev);
            out = hard_clip(prev * self.diffusion + tap.last_out, 1.0);
            tap.last_out = tap.line.read_crossfaded(tap.active, tap.pending, mod_phase);
        }

        let anchor = &mut self.taps[NUM_TAPS - 1];
        self.fb_out = anchor.last_out * self.feedback_gain;
        anchor.line.write(out);
        anchor.last_out = anchor.line.read_crossfaded(anchor.active, anchor.pending, mod_phase);

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn feedback_gain_never_exceeds_unity() {
        let mut diffuse = Diffuse::new(48000.0);
        for time in [-160.0, -100.0, -40.0, -7.0, 0.0] {
            diffuse.set_decay_time(time);
            assert!(
                diffuse.feedback_gain() <= 1.0,
                "gain {} at time {time}",
                diffuse.feedback_gain()
            );
        }
    }

    #[test]
    fn longer_decay_time_raises_gain() {
        let mut diffuse = Diffuse::new(48000.0);
        diffuse.set_decay_time(0.0);
        let short = diffuse.feedback_gain();
        diffuse.set_decay_time(-160.0);
        let long = diffuse.feedback_gain();
        assert!(long > short, "long {long} vs short {short}");
        assert!(long > 0.9, "deep decay should approach unity: {long}");
    }

    #[test]
    fn anchor_tap_is_longest() {
        let mut diffuse = Diffuse::new(48000.0);
        diffuse.set_size(-10.0);
        let anchor = diffuse.anchor_delay();
        for tap in diffuse.taps.iter().take(NUM_TAPS - 1) {
            assert!(tap.pending < anchor, "{} >= anchor {anchor}", tap.pending);
        }
    }

    #[test]
    fn delays_clamped_to_capacity() {
        let mut diffuse = Diffuse::new(48000.0);
        diffuse.set_size(-60.0); // absurdly large room
        for tap in &diffuse.taps {
            assert!(tap.pending < tap.line.capacity() as f32);
            assert!(tap.pending >= 1.0);
        }
    }

    #[test]
    fn commit_promotes_pending_once() {
        let mut diffuse = Diffuse::new(48000.0);
        diffuse.set_size(5.0);
        let pending: Vec<f32> = diffuse.taps.iter().map(|t| t.pending).collect();
        diffuse.commit_delay_times();
        for (tap, want) in diffuse.taps.iter().zip(&pending) {
            assert_eq!(tap.active, *want);
        }
    }

    #[test]
    fn output_bounded_under_feedback() {
        let mut diffuse = Diffuse::new(48000.0);
        diffuse.set_diffusion(0.75);
        diffuse.set_decay_time(-160.0);
        let mut phase = 0.0;
        for i in 0..48000 {
            let input = if i < 64 { 1.0 } else { 0.0 };
            let out = diffuse.process(input + diffuse.feedback_out(), phase);
            assert!(out.abs() <= 1.0, "clipped mixing must bound output");
            phase = (phase + 1.0 / 64.0) % 1.0;
        }
    }

    #[test]
    fn impulse_produces_tail() {
        let mut diffuse = Diffuse::new(48000.0);
        diffuse.set_diffusion(0.6);
        diffuse.set_size(20.0);
        diffuse.commit_delay_times();
        diffuse.set_decay_time(-80.0);
        diffuse.process(1.0, 0.0);
        let mut energy = 0.0;
        for _ in 0..4800 {
            energy += diffuse.process(0.0, 0.0).abs();
        }
        assert!(energy > 0.0, "diffusion chain should smear the impulse");
    }
}
