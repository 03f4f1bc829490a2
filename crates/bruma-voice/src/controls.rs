//! Control-surface snapshot model.
//!
//! The host hands the voice a read-only snapshot of knob positions, CV
//! inputs and engine state once per block. Nothing here is retained across
//! the call — effects copy what they need into their own smoothing state.

use bruma_core::center_map_default;

/// CV values below this magnitude are floored to it, keeping downstream
/// modulation math away from the zero crossing of noisy idle inputs.
const CV_MIN_THRESHOLD: f32 = 0.007;

/// Knob positions and per-parameter modulation/CV depth controls.
///
/// All values are raw control positions in [0, 1] unless noted; bipolar
/// interpretation (detent at 0.55) happens in the consuming effect via
/// [`center_map_default`].
#[derive(Debug, Clone)]
pub struct Controls {
    /// Reverb decay amount.
    pub ambience_decay: f32,
    /// Modulation-bus depth for decay.
    pub ambience_decay_mod_amount: f32,
    /// CV depth for decay.
    pub ambience_decay_cv_amount: f32,
    /// Spacetime macro knob (bipolar around the 0.55 detent).
    pub ambience_spacetime: f32,
    /// Modulation-bus depth for spacetime.
    pub ambience_spacetime_mod_amount: f32,
    /// CV depth for spacetime.
    pub ambience_spacetime_cv_amount: f32,
    /// Auto-pan depth; also selects the pan clock ratio.
    pub ambience_auto_pan: f32,
    /// Reverb wet/dry volume.
    pub ambience_vol: f32,

    /// Wavefolder fold amount.
    pub folder_fold: f32,
    /// Modulation-bus depth for fold.
    pub folder_fold_mod_amount: f32,
    /// CV depth for fold.
    pub folder_fold_cv_amount: f32,
    /// Wavefolder drive.
    pub folder_drive: f32,
    /// Modulation-bus depth for drive.
    pub folder_drive_mod_amount: f32,
    /// CV depth for drive.
    pub folder_drive_cv_amount: f32,
    /// Wavefolder DC offset (bipolar around the detent).
    pub folder_offset: f32,
    /// Wavefolder wet/dry volume.
    pub folder_vol: f32,
}

impl Default for Controls {
    fn default() -> Self {
        Self {
            ambience_decay: 0.5,
            ambience_decay_mod_amount: 0.0,
            ambience_decay_cv_amount: 0.0,
            ambience_spacetime: 0.55,
            ambience_spacetime_mod_amount: 0.0,
            ambience_spacetime_cv_amount: 0.0,
            ambience_auto_pan: 0.0,
            ambience_vol: 0.5,
            folder_fold: 0.0,
            folder_fold_mod_amount: 0.0,
            folder_fold_cv_amount: 0.0,
            folder_drive: 0.0,
            folder_drive_mod_amount: 0.0,
            folder_drive_cv_amount: 0.0,
            folder_offset: 0.55,
            folder_vol: 0.5,
        }
    }
}

/// CV input snapshot for the modulatable parameters.
#[derive(Debug, Clone, Default)]
pub struct CvInputs {
    /// CV driving reverb decay.
    pub ambience_decay: f32,
    /// CV driving the spacetime macro.
    pub ambience_spacetime: f32,
    /// CV driving the fold amount.
    pub folder_fold: f32,
    /// CV driving the fold drive.
    pub folder_drive: f32,
}

/// Engine-wide state the host maintains between blocks.
#[derive(Debug, Clone)]
pub struct EngineState {
    /// Audio sample rate in Hz.
    pub sample_rate: f32,
    /// Block (control) rate in Hz.
    pub block_rate: f32,
    /// Samples per processing block.
    pub block_size: usize,
    /// Current modulation bus value, bipolar.
    pub mod_value: f32,
    /// Whether modulation depth knobs act as attenuverters.
    pub mod_attenuverters: bool,
    /// Whether CV depth knobs act as attenuverters.
    pub cv_attenuverters: bool,
    /// Host clock frequency in Hz (drives the auto-pan ratios).
    pub clock_frequency: f32,
}

impl Default for EngineState {
    fn default() -> Self {
        Self {
            sample_rate: 48000.0,
            block_rate: 750.0,
            block_size: 64,
            mod_value: 0.0,
            mod_attenuverters: false,
            cv_attenuverters: false,
            clock_frequency: 2.0,
        }
    }
}

/// Borrowed bundle of the three snapshots, passed to effects per block.
#[derive(Debug, Clone, Copy)]
pub struct ControlFrame<'a> {
    /// Knob snapshot.
    pub controls: &'a Controls,
    /// CV snapshot.
    pub cvs: &'a CvInputs,
    /// Engine state snapshot.
    pub state: &'a EngineState,
}

/// Combine a base control value with modulation-bus and CV contributions.
///
/// With attenuverters enabled the depth knobs become bipolar around the
/// detent, with a ±0.1 dead zone so a roughly-centered knob contributes
/// nothing. The summed result is clamped to `[min_value, max_value]` —
/// out-of-range control input is always absorbed, never rejected.
#[allow(clippy::too_many_arguments)]
pub fn modulate(
    base_value: f32,
    mod_amount: f32,
    mod_value: f32,
    cv_amount: f32,
    cv_value: f32,
    min_value: f32,
    max_value: f32,
    mod_attenuverters: bool,
    cv_attenuverters: bool,
) -> f32 {
    let mut mod_amount = mod_amount;
    let mut cv_amount = cv_amount;
    let mut cv_value = cv_value;

    if mod_attenuverters {
        mod_amount = center_map_default(mod_amount);
        if (-0.1..=0.1).contains(&mod_amount) {
            mod_amount = 0.0;
        }
    }
    if cv_attenuverters {
        cv_amount = center_map_default(cv_amount);
        if (-0.1..=0.1).contains(&cv_amount) {
            cv_amount = 0.0;
        }
    }
    if (-CV_MIN_THRESHOLD..=CV_MIN_THRESHOLD).contains(&cv_value) {
        cv_value = CV_MIN_THRESHOLD;
    }

    (base_value + mod_amount * mod_value + cv_amount * cv_value).clamp(min_value, max_value)
}
