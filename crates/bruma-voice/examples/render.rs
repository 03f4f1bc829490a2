//! Render a few seconds of the ambience voice to a stereo WAV file.
//!
//! Run with: cargo run -p bruma-voice --example render
//!
//! Feeds a short plucked burst into the reverb at three spacetime
//! positions and writes the result to `bruma_render.wav`.
#![allow(missing_docs)]

use bruma_voice::{
    Ambience, ControlFrame, Controls, CvInputs, EngineState, StereoBuffer, StereoEffect,
};

fn main() {
    let state = EngineState::default();
    let mut controls = Controls::default();
    controls.ambience_vol = 0.8;
    controls.ambience_decay = 0.7;
    let cvs = CvInputs::default();

    let mut ambience = Ambience::new(&state);

    let spec = hound::WavSpec {
        channels: 2,
        sample_rate: state.sample_rate as u32,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };
    let mut writer = hound::WavWriter::create("bruma_render.wav", spec).unwrap();

    let seconds_per_scene = 2.0;
    let blocks_per_scene = (state.sample_rate * seconds_per_scene) as usize / state.block_size;
    let mut input = StereoBuffer::new(state.block_size);
    let mut output = StereoBuffer::new(state.block_size);

    // Below center, at center, above center
    for (scene, knob) in [0.2_f32, 0.55, 0.9].into_iter().enumerate() {
        controls.ambience_spacetime = knob;
        let frame = ControlFrame {
            controls: &controls,
            cvs: &cvs,
            state: &state,
        };

        for block in 0..blocks_per_scene {
            for i in 0..state.block_size {
                let n = block * state.block_size + i;
                let t = n as f32 / state.sample_rate;
                // 100 ms burst at the start of each scene
                let env = if t < 0.1 { 1.0 - t / 0.1 } else { 0.0 };
                let sample = (2.0 * std::f32::consts::PI * 220.0 * t).sin() * env * 0.7;
                input.left[i] = sample;
                input.right[i] = sample;
            }
            ambience.process(&frame, &input, &mut output);
            for i in 0..state.block_size {
                let l = (output.left[i].clamp(-1.0, 1.0) * 32767.0) as i16;
                let r = (output.right[i].clamp(-1.0, 1.0) * 32767.0) as i16;
                writer.write_sample(l).unwrap();
                writer.write_sample(r).unwrap();
            }
        }
        println!("scene {scene}: spacetime knob {knob}");
    }

    writer.finalize().unwrap();
    println!("wrote bruma_render.wav");
}
