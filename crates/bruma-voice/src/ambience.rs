//! Stereo diffusion reverb with buffer-reversal ("ambience").
//!
//! Two channels of damping, diffusion and reverse-granular playback under
//! one macro control. Per block the control snapshot is resolved into
//! targets (pan, decay, and everything the spacetime macro drives); per
//! sample the targets are read through [`InterpolationRamp`]s and the
//! signal runs the chain:
//!
//! ```text
//! in → reverse blend → +cross-channel feedback → damp → clip →
//!   envelope ducking → DC block → diffuse → makeup → compress →
//!   equal-power wet/dry
//! ```
//!
//! The diffusers' delay-time targets move once per block and are committed
//! after the sample loop, never mid-block.

use bruma_core::{
    DcBlocker, EnvFollower, ExpoLut, InterpolationRamp, SineOscillator, center_map_default,
    equal_power_crossfade_boost, hard_clip, map, map_expo, quantize_index,
};

use crate::compressor::Compressor;
use crate::controls::{ControlFrame, EngineState, modulate};
use crate::damp::Damp;
use crate::diffuse::Diffuse;
use crate::effect::{StereoBuffer, StereoEffect};
use crate::reversed_buffer::ReversedBuffer;

const LEFT: usize = 0;
const RIGHT: usize = 1;

/// Heaviest damping the macro can request, in dB.
const DAMP_MAX_DB: f32 = -40.0;
/// Lightest damping the macro can request, in dB.
const DAMP_MIN_DB: f32 = -0.5;
/// Wet gain range on the forward (positive spacetime) side.
const GAIN_MIN: f32 = 0.1;
const GAIN_MAX: f32 = 1.0;
/// Wet gain range on the reverse (negative spacetime) side.
const REV_GAIN_MIN: f32 = 0.1;
const REV_GAIN_MAX: f32 = 1.2;
/// Post-compressor makeup gain.
const MAKEUP_GAIN: f32 = 1.9;
/// Auto-pan oscillator frequency ceiling (middle C).
const PAN_FREQ_MAX: f32 = 261.63;
/// Clock multipliers selectable by the auto-pan knob.
const CLOCK_RATIOS: [f32; 8] = [0.125, 0.25, 0.5, 1.0, 2.0, 4.0, 8.0, 16.0];

/// Stereo ambience reverb.
///
/// # Example
///
/// ```rust
/// use bruma_voice::{Ambience, Controls, ControlFrame, CvInputs, EngineState, StereoBuffer,
///     StereoEffect};
///
/// let state = EngineState::default();
/// let mut ambience = Ambience::new(&state);
/// let controls = Controls::default();
/// let cvs = CvInputs::default();
/// let frame = ControlFrame { controls: &controls, cvs: &cvs, state: &state };
///
/// let input = StereoBuffer::new(64);
/// let mut output = StereoBuffer::new(64);
/// ambience.process(&frame, &input, &mut output);
/// ```
#[derive(Debug)]
pub struct Ambience {
    damps: [Damp; 2],
    diffusers: [Diffuse; 2],
    reversers: [ReversedBuffer; 2],
    followers: [EnvFollower; 2],
    compressors: [Compressor; 2],
    dc_blockers: [DcBlocker; 2],
    panner: SineOscillator,
    decay_lut: ExpoLut<32>,

    decay: f32,
    spacetime: f32,
    size: f32,
    low_damp_db: f32,
    high_damp_db: f32,
    amp: f32,
    reverse: f32,
    pan_target: f32,

    // Smoothing state committed by the per-block ramps
    reverse_z: f32,
    pan_z: f32,
    amp_z: f32,
    vol_z: f32,
}

impl Ambience {
    /// Build the reverb for the given engine rates. All buffers are sized
    /// here; processing never allocates.
    pub fn new(state: &EngineState) -> Self {
        let sr = state.sample_rate;
        let reverse_capacity = (sr as usize).max(2);

        let mut compressors = [Compressor::new(sr), Compressor::new(sr)];
        for comp in &mut compressors {
            comp.set_threshold(-20.0);
        }

        let mut ambience = Self {
            damps: [Damp::new(), Damp::new()],
            diffusers: [Diffuse::new(sr), Diffuse::new(sr)],
            reversers: [
                ReversedBuffer::new(reverse_capacity),
                ReversedBuffer::new(reverse_capacity),
            ],
            followers: [EnvFollower::new(sr), EnvFollower::new(sr)],
            compressors,
            dc_blockers: [DcBlocker::new(sr), DcBlocker::new(sr)],
            panner: SineOscillator::new(state.block_rate),
            decay_lut: ExpoLut::new(0.0, -160.0),
            decay: 0.0,
            spacetime: 0.0,
            size: 0.0,
            low_damp_db: DAMP_MIN_DB,
            high_damp_db: DAMP_MIN_DB,
            amp: 1.0,
            reverse: 0.0,
            pan_target: 0.5,
            reverse_z: 0.0,
            pan_z: 0.5,
            amp_z: 1.0,
            vol_z: 0.0,
        };
        ambience.set_decay(0.5);
        ambience.set_spacetime(0.0);
        ambience
    }

    /// Resolve the bipolar spacetime macro into damping, size, wet gain and
    /// reverse mix. `value` is the already center-mapped control: 0.0 is
    /// the knob detent, -1 full reverse-wash, +1 full forward-wash.
    pub fn set_spacetime(&mut self, value: f32) {
        let st = value.clamp(-1.0, 1.0);
        self.spacetime = st;
        let a = st.abs();

        // Minimal damping at the center; the low shelf closes first, the
        // high shelf takes over beyond |st| = 0.4.
        let (low_damp, high_damp) = if a < 0.4 {
            (map(a, 0.0, 0.4, DAMP_MIN_DB, DAMP_MAX_DB), DAMP_MIN_DB)
        } else {
            (DAMP_MAX_DB, map(a, 0.4, 1.0, DAMP_MIN_DB, DAMP_MAX_DB))
        };

        let size;
        if st < 0.0 {
            size = 60.1 - map_expo(st, -1.0, 0.0, 0.1, 60.0);
            self.amp = REV_GAIN_MAX + REV_GAIN_MIN - map_expo(st, -1.0, 0.0, REV_GAIN_MIN, REV_GAIN_MAX);
        } else {
            size = map_expo(st, 0.0, 1.0, 0.1, 60.0);
            self.amp = map_expo(st, 0.0, 1.0, GAIN_MIN, GAIN_MAX);
        }

        self.set_low_damp(low_damp);
        self.set_high_damp(high_damp);
        self.set_size(size);

        // Reverse playback dominates at and below the center, fading out
        // across a narrow band above it.
        self.reverse = if st <= 0.0 {
            1.0
        } else if st >= 0.2 {
            0.0
        } else {
            map(st, 0.0, 0.2, 1.0, 0.0)
        };
    }

    /// Set the decay control (0..1) via the quantized exponential curve.
    pub fn set_decay(&mut self, value: f32) {
        self.decay = value.clamp(0.0, 1.0);
        let time = self.decay_lut.quantized(self.decay);
        for diffuser in &mut self.diffusers {
            diffuser.set_decay_time(time);
        }
    }

    /// Resolved reverb size (0.1 minimal .. 60 maximal).
    pub fn reverb_size(&self) -> f32 {
        self.size
    }

    /// Current reverse-mix target in [0, 1].
    pub fn reverse_mix(&self) -> f32 {
        self.reverse
    }

    /// Current low-damping amount in dB (-0.5 minimal .. -40 heavy).
    pub fn low_damp_db(&self) -> f32 {
        self.low_damp_db
    }

    /// Current high-damping amount in dB (-0.5 minimal .. -40 heavy).
    pub fn high_damp_db(&self) -> f32 {
        self.high_damp_db
    }

    /// Current wet gain target.
    pub fn wet_gain(&self) -> f32 {
        self.amp
    }

    /// Current centered spacetime value.
    pub fn spacetime(&self) -> f32 {
        self.spacetime
    }

    fn set_high_damp(&mut self, damp_db: f32) {
        self.high_damp_db = damp_db;
        for damp in &mut self.damps {
            damp.set_hi(damp_db);
        }
    }

    fn set_low_damp(&mut self, damp_db: f32) {
        self.low_damp_db = damp_db;
        for damp in &mut self.damps {
            damp.set_lo(damp_db);
        }
    }

    fn set_size(&mut self, size: f32) {
        self.size = size;
        let sz = -(size - 30.0);
        let diffusion = size * (1.0 / 240.0) + 0.5;
        for diffuser in &mut self.diffusers {
            diffuser.set_size(sz);
            diffuser.set_diffusion(diffusion);
        }
    }

    fn update_pan(&mut self, frame: &ControlFrame) {
        let depth = frame.controls.ambience_auto_pan;
        let ratio = CLOCK_RATIOS[quantize_index(depth, CLOCK_RATIOS.len())];
        let freq = (ratio * frame.state.clock_frequency).clamp(0.0, PAN_FREQ_MAX);
        self.panner.set_frequency(freq);
        self.pan_target = 0.5 + self.panner.generate() * depth * 0.5;
    }
}

impl StereoEffect for Ambience {
    fn process(&mut self, frame: &ControlFrame, input: &StereoBuffer, output: &mut StereoBuffer) {
        let block = output.len().min(input.len());
        if block == 0 {
            return;
        }
        let c = frame.controls;
        let s = frame.state;

        self.update_pan(frame);

        let decay_value = modulate(
            c.ambience_decay,
            c.ambience_decay_mod_amount,
            s.mod_value,
            c.ambience_decay_cv_amount,
            frame.cvs.ambience_decay,
            -1.0,
            1.0,
            s.mod_attenuverters,
            s.cv_attenuverters,
        );
        self.set_decay(decay_value);

        let spacetime_value = modulate(
            c.ambience_spacetime,
            c.ambience_spacetime_mod_amount,
            s.mod_value,
            c.ambience_spacetime_cv_amount,
            frame.cvs.ambience_spacetime,
            -1.0,
            1.0,
            s.mod_attenuverters,
            s.cv_attenuverters,
        );
        self.set_spacetime(center_map_default(spacetime_value));

        let Self {
            damps,
            diffusers,
            reversers,
            followers,
            compressors,
            dc_blockers,
            decay,
            amp,
            reverse,
            pan_target,
            reverse_z,
            pan_z,
            amp_z,
            vol_z,
            ..
        } = self;

        let mut reverse_ramp = InterpolationRamp::new(reverse_z, *reverse, block);
        let mut pan_ramp = InterpolationRamp::new(pan_z, *pan_target, block);
        let mut amp_ramp = InterpolationRamp::new(amp_z, *amp, block);
        let mut vol_ramp = InterpolationRamp::new(vol_z, c.ambience_vol, block);

        let phase_inc = 1.0 / block as f32;
        let mut phase = 0.0;

        for i in 0..block {
            let reverse = reverse_ramp.next();
            let pan = pan_ramp.next();
            let amp = amp_ramp.next();
            let vol = vol_ramp.next();
            let direct = 1.0 - reverse;

            let l_in = hard_clip(input.left[i], 3.0);
            let r_in = hard_clip(input.right[i], 3.0);

            // One-sample-ahead blend of the reversed playback with the
            // direct input, then feed the reversers
            let left = reversers[LEFT].last_out() * reverse + l_in * direct;
            let right = reversers[RIGHT].last_out() * reverse + r_in * direct;
            reversers[LEFT].process(l_in);
            reversers[RIGHT].process(r_in);

            // Cross-channel feedback through the damping filters
            let mut left_fb = damps[LEFT].process(left + diffusers[RIGHT].feedback_out());
            let mut right_fb = damps[RIGHT].process(right + diffusers[LEFT].feedback_out());

            left_fb = hard_clip(left * (1.0 - pan) + left_fb, 1.0);
            right_fb = hard_clip(right * pan + right_fb, 1.0);

            // Duck the feedback by its own envelope
            left_fb *= 1.0 - followers[LEFT].process(left_fb);
            right_fb *= 1.0 - followers[RIGHT].process(right_fb);

            left_fb = dc_blockers[LEFT].process(left_fb);
            right_fb = dc_blockers[RIGHT].process(right_fb);

            let mut left_wet = diffusers[LEFT].process(left_fb, phase);
            let mut right_wet = diffusers[RIGHT].process(right_fb, phase);
            phase += phase_inc;

            let gain = map(*decay, 0.0, 1.0, amp * 1.3, amp);
            left_wet = compressors[LEFT].process(left_wet * gain) * MAKEUP_GAIN;
            right_wet = compressors[RIGHT].process(right_wet * gain) * MAKEUP_GAIN;

            output.left[i] = equal_power_crossfade_boost(l_in, left_wet, vol, 1.4);
            output.right[i] = equal_power_crossfade_boost(r_in, right_wet, vol, 1.4);
        }

        diffusers[LEFT].commit_delay_times();
        diffusers[RIGHT].commit_delay_times();
    }
}
