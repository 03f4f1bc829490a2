//! Stereo wavefolder with post-fold saturation.
//!
//! A stateless per-sample nonlinearity: the input is driven into a
//! triangle-fold, then through a tanh saturator with its own drive. All
//! three controls (fold amount, drive, DC offset) are smoothed across the
//! block with [`InterpolationRamp`]s so knob moves never step audibly.

use bruma_core::{InterpolationRamp, center_map_default, equal_power_crossfade_boost};
use libm::{fabsf, fmodf, tanhf};

use crate::controls::{ControlFrame, modulate};
use crate::effect::{StereoBuffer, StereoEffect};

/// Level compensation after fold + saturation.
const FOLDER_MAKEUP_GAIN: f32 = 0.85;

/// Triangle wavefold: drive the input up, reflect it through a period-4
/// triangle, then normalize the drive back out.
#[inline]
fn wavefold(input: f32, amount: f32) -> f32 {
    let drive = 1.0 + amount * 3.0;
    let x = input * drive;
    let folded = fabsf(fmodf(x + 1.0, 4.0) - 2.0) - 1.0;
    folded * (1.0 / drive)
}

/// Tanh saturation with drive-dependent output compensation.
#[inline]
fn saturate(input: f32, drive: f32) -> f32 {
    let x = input * (1.0 + drive * 9.0);
    tanhf(x) * (1.0 + drive * 2.0)
}

/// Stereo fold/saturate stage.
///
/// # Example
///
/// ```rust
/// use bruma_voice::{Controls, ControlFrame, CvInputs, EngineState, StereoBuffer, StereoEffect,
///     StereoWavefolder};
///
/// let state = EngineState::default();
/// let controls = Controls::default();
/// let cvs = CvInputs::default();
/// let frame = ControlFrame { controls: &controls, cvs: &cvs, state: &state };
///
/// let mut folder = StereoWavefolder::new();
/// let input = StereoBuffer::new(64);
/// let mut output = StereoBuffer::new(64);
/// folder.process(&frame, &input, &mut output);
/// ```
#[derive(Debug, Clone, Default)]
pub struct StereoWavefolder {
    fold_z: f32,
    drive_z: f32,
    offset_z: f32,
}

impl StereoWavefolder {
    /// Create with all smoothing state at rest.
    pub fn new() -> Self {
        Self::default()
    }
}

impl StereoEffect for StereoWavefolder {
    fn process(&mut self, frame: &ControlFrame, input: &StereoBuffer, output: &mut StereoBuffer) {
        let block = output.len().min(input.len());
        if block == 0 {
            return;
        }
        let c = frame.controls;
        let s = frame.state;

        let amount = modulate(
            c.folder_fold,
            c.folder_fold_mod_amount,
            s.mod_value,
            c.folder_fold_cv_amount,
            frame.cvs.folder_fold,
            0.0,
            1.0,
            s.mod_attenuverters,
            s.cv_attenuverters,
        );
        let drive = modulate(
            c.folder_drive,
            c.folder_drive_mod_amount,
            s.mod_value,
            c.folder_drive_cv_amount,
            frame.cvs.folder_drive,
            0.0,
            1.0,
            s.mod_attenuverters,
            s.cv_attenuverters,
        );
        let offset = modulate(
            center_map_default(c.folder_offset),
            0.0,
            s.mod_value,
            0.0,
            0.0,
            -1.0,
            1.0,
            s.mod_attenuverters,
            s.cv_attenuverters,
        );

        let mut amount_ramp = InterpolationRamp::new(&mut self.fold_z, amount, block);
        let mut drive_ramp = InterpolationRamp::new(&mut self.drive_z, drive, block);
        let mut offset_ramp = InterpolationRamp::new(&mut self.offset_z, offset, block);

        for i in 0..block {
            let amt = amount_ramp.next();
            let drv = drive_ramp.next();
            let off = offset_ramp.next();

            let left = input.left[i] + off;
            let right = input.right[i] + off;

            let folded_left = wavefold(left, amt);
            let folded_right = wavefold(right, amt);

            let saturated_left = saturate(folded_left, drv);
            let saturated_right = saturate(folded_right, drv);

            output.left[i] = equal_power_crossfade_boost(
                input.left[i],
                saturated_left * FOLDER_MAKEUP_GAIN,
                c.folder_vol,
                1.4,
            );
            output.right[i] = equal_power_crossfade_boost(
                input.right[i],
                saturated_right * FOLDER_MAKEUP_GAIN,
                c.folder_vol,
                1.4,
            );
        }
    }
}
