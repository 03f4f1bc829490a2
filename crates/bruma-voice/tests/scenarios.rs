//! End-to-end scenarios across the voice.
//!
//! Exercises the effects through their block-processing entry points with
//! realistic control frames, the way the host drives them.

use bruma_voice::{
    Ambience, ControlFrame, Controls, CvInputs, EngineState, LooperBuffer, PlaybackDirection,
    ReversedBuffer, StereoBuffer, StereoEffect, StereoWavefolder, TOTAL_LENGTH,
};

const BLOCK: usize = 64;

fn sine_block(freq: f32, sample_rate: f32, start: usize) -> StereoBuffer {
    let mut buffer = StereoBuffer::new(BLOCK);
    for i in 0..BLOCK {
        let t = (start + i) as f32 / sample_rate;
        buffer.left[i] = libm::sinf(core::f32::consts::TAU * freq * t) * 0.5;
        buffer.right[i] = libm::sinf(core::f32::consts::TAU * freq * 1.01 * t) * 0.5;
    }
    buffer
}

fn run_blocks(
    effect: &mut dyn StereoEffect,
    frame: &ControlFrame,
    blocks: usize,
    sample_rate: f32,
) -> f32 {
    let mut output = StereoBuffer::new(BLOCK);
    let mut peak = 0.0f32;
    for b in 0..blocks {
        let input = sine_block(220.0, sample_rate, b * BLOCK);
        effect.process(frame, &input, &mut output);
        for &s in output.left.iter().chain(output.right.iter()) {
            assert!(s.is_finite(), "non-finite output in block {b}");
            peak = peak.max(s.abs());
        }
    }
    peak
}

#[test]
fn spacetime_detent_selects_center_voicing() {
    let state = EngineState::default();
    let mut controls = Controls::default();
    controls.ambience_spacetime = 0.55; // knob at the detent
    let cvs = CvInputs::default();
    let frame = ControlFrame {
        controls: &controls,
        cvs: &cvs,
        state: &state,
    };

    let mut ambience = Ambience::new(&state);
    let input = StereoBuffer::new(BLOCK);
    let mut output = StereoBuffer::new(BLOCK);
    ambience.process(&frame, &input, &mut output);

    assert!(
        ambience.reverb_size() < 0.2,
        "center must be near-minimal: {}",
        ambience.reverb_size()
    );
    assert!(ambience.low_damp_db() > -1.0, "minimal low damping");
    assert!(ambience.high_damp_db() > -1.0, "minimal high damping");
    assert!(
        (ambience.reverse_mix() - 1.0).abs() < 0.05,
        "center-band reverse mapping: {}",
        ambience.reverse_mix()
    );
}

#[test]
fn spacetime_full_clockwise_selects_forward_wash() {
    let state = EngineState::default();
    let mut controls = Controls::default();
    controls.ambience_spacetime = 0.99; // fully clockwise
    let cvs = CvInputs::default();
    let frame = ControlFrame {
        controls: &controls,
        cvs: &cvs,
        state: &state,
    };

    let mut ambience = Ambience::new(&state);
    let input = StereoBuffer::new(BLOCK);
    let mut output = StereoBuffer::new(BLOCK);
    ambience.process(&frame, &input, &mut output);

    assert!(
        ambience.reverb_size() > 59.0,
        "maximal size: {}",
        ambience.reverb_size()
    );
    assert!(
        ambience.high_damp_db() < -39.0,
        "maximal high damping: {}",
        ambience.high_damp_db()
    );
    assert_eq!(ambience.reverse_mix(), 0.0);
}

#[test]
fn ambience_runs_indefinitely_bounded() {
    let state = EngineState::default();
    let controls = Controls::default();
    let cvs = CvInputs::default();
    let frame = ControlFrame {
        controls: &controls,
        cvs: &cvs,
        state: &state,
    };

    let mut ambience = Ambience::new(&state);
    let peak = run_blocks(&mut ambience, &frame, 2000, state.sample_rate);
    assert!(peak < 10.0, "long-run peak {peak}");
    assert!(peak > 0.0, "voice should produce signal");
}

#[test]
fn ambience_dry_at_zero_volume() {
    let state = EngineState::default();
    let mut controls = Controls::default();
    controls.ambience_vol = 0.0;
    let cvs = CvInputs::default();
    let frame = ControlFrame {
        controls: &controls,
        cvs: &cvs,
        state: &state,
    };

    let mut ambience = Ambience::new(&state);
    let mut output = StereoBuffer::new(BLOCK);
    // Let the volume ramp settle at zero
    for b in 0..50 {
        let input = sine_block(220.0, state.sample_rate, b * BLOCK);
        ambience.process(&frame, &input, &mut output);
    }
    let input = sine_block(220.0, state.sample_rate, 50 * BLOCK);
    ambience.process(&frame, &input, &mut output);
    for i in 0..BLOCK {
        assert!(
            (output.left[i] - input.left[i]).abs() < 1e-3,
            "dry path must pass input at sample {i}"
        );
    }
}

#[test]
fn reversed_buffer_reverses_across_block_resize() {
    let mut rev = ReversedBuffer::new(64);
    rev.set_delay(8);
    // Drain the initial 32-sample block so the new size takes effect
    for _ in 0..32 {
        rev.process(0.0);
    }
    // Write two 8-sample ramps; the second block reads the first in reverse
    for i in 0..8 {
        rev.process(i as f32);
    }
    let outs: Vec<f32> = (0..8).map(|i| rev.process((8 + i) as f32)).collect();
    // Reverse order under the parabolic window: sample k reads value 7-k
    for (k, &out) in outs.iter().enumerate() {
        let x = (8 - k) as f32 / 8.0;
        let expected = (7 - k) as f32 * 4.0 * x * (1.0 - x);
        assert!(
            (out - expected.clamp(-3.0, 3.0)).abs() < 1e-5,
            "sample {k}: {out} vs {expected}"
        );
    }
}

#[test]
fn looper_punch_in_then_out_round_trip() {
    let mut looper = LooperBuffer::new();
    assert!(!looper.is_recording());

    looper.start_recording();
    assert!(looper.is_recording());

    // Record two full fades worth of a constant, then punch out
    let span = bruma_voice::FADE_LENGTH * 2;
    for i in 0..span {
        looper.write(i, 0.5, 0.5);
    }
    looper.stop_recording();
    for i in span..(span + bruma_voice::FADE_LENGTH) {
        looper.write(i, 0.5, 0.5);
    }
    assert!(!looper.is_recording());

    // The settled middle of the recording reads back exactly
    let (l, r) = looper.read((span / 2) as f32, PlaybackDirection::Forward);
    assert!((l - 0.5).abs() < 1e-4);
    assert!((r - 0.5).abs() < 1e-4);

    // Un-recorded territory stays at the noise floor
    let (l, _) = looper.read((span * 8) as f32, PlaybackDirection::Forward);
    assert!(l.abs() < 0.01, "idle region should be near-silent: {l}");
}

#[test]
fn looper_stalled_direction_is_silent_while_recorded() {
    let mut looper = LooperBuffer::new();
    looper.start_recording();
    for i in 0..(bruma_voice::FADE_LENGTH * 2) {
        looper.write(i, 0.9, 0.9);
    }
    assert_eq!(
        looper.read(bruma_voice::FADE_LENGTH as f32, PlaybackDirection::Stalled),
        (0.0, 0.0)
    );
}

#[test]
fn looper_clear_spreads_across_calls() {
    let mut looper = LooperBuffer::new();
    let mut cycles = 0;
    let mut calls = 0;
    while cycles < 2 {
        if looper.clear() {
            cycles += 1;
        }
        calls += 1;
        assert!(calls < 10 * TOTAL_LENGTH, "clear must terminate");
    }
    // Two full cycles take two passes over the buffer plus the wrap calls
    assert!(calls > 2 * (TOTAL_LENGTH / 9600));
}

#[test]
fn wavefolder_shapes_hot_signal() {
    let state = EngineState::default();
    let mut controls = Controls::default();
    controls.folder_vol = 1.0;
    controls.folder_fold = 0.8;
    controls.folder_drive = 0.4;
    let cvs = CvInputs::default();
    let frame = ControlFrame {
        controls: &controls,
        cvs: &cvs,
        state: &state,
    };

    let mut folder = StereoWavefolder::new();
    let peak = run_blocks(&mut folder, &frame, 50, state.sample_rate);
    assert!(peak > 0.0);
    assert!(peak < 4.0, "folded output bounded: {peak}");
}
