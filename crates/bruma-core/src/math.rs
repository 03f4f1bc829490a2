//! Mathematical utility functions for the bruma signal path.
//!
//! Control-range mapping, level conversion, clipping and crossfading —
//! everything here is allocation-free and `no_std`-suitable.
//!
//! # Range Mapping
//!
//! - [`map`] - Linear range mapping (inverted output ranges allowed)
//! - [`map_expo`] - Squared-input exponential-feel mapping
//! - [`center_map`] - Knob [0,1] with off-center detent → bipolar [-1,1]
//!
//! # Level Conversions
//!
//! - [`db_to_linear`] / [`linear_to_db`] - dB and linear gain
//! - [`midi_to_freq`] / [`freq_to_samples`] / [`note_to_delay`] - musical
//!   pitch to delay-line lengths
//!
//! # Clipping & Crossfades
//!
//! - [`hard_clip`] - Abrupt limiting, used at every feedback mixing junction
//! - [`soft_clip`] / [`soft_limit`] - Cubic rational saturation
//! - [`linear_crossfade`] / [`equal_power_crossfade`] - Wet/dry blending

use libm::{expf, logf, powf};

/// Convert decibels to linear gain.
///
/// 0 dB → 1.0, -6 dB → 0.5, -60 dB → 0.001.
#[inline]
pub fn db_to_linear(db: f32) -> f32 {
    // 10^(dB/20) = e^(dB * ln(10)/20)
    const FACTOR: f32 = core::f32::consts::LN_10 / 20.0;
    expf(db * FACTOR)
}

/// Convert linear gain to decibels. Inputs ≤ 0 are floored at -200 dB.
#[inline]
pub fn linear_to_db(linear: f32) -> f32 {
    const FACTOR: f32 = 20.0 / core::f32::consts::LN_10;
    logf(linear.max(1e-10)) * FACTOR
}

/// Linearly map `value` from `[a_min, a_max]` to `[b_min, b_max]`.
///
/// The output range may be inverted (`b_max < b_min`); the input range
/// must be forward and non-degenerate.
#[inline]
pub fn map(value: f32, a_min: f32, a_max: f32, b_min: f32, b_max: f32) -> f32 {
    let k = (b_max - b_min).abs() / (a_max - a_min).abs() * if b_max > b_min { 1.0 } else { -1.0 };
    b_min + k * (value - a_min)
}

/// Map with a squared-input curve: slow start, fast finish.
///
/// Useful for controls whose perceptual effect grows exponentially
/// (reverb size, gain ranges).
#[inline]
pub fn map_expo(value: f32, a_min: f32, a_max: f32, b_min: f32, b_max: f32) -> f32 {
    let t = (value - a_min) / (a_max - a_min);
    b_min + (t * t) * (b_max - b_min)
}

/// Map a unipolar knob position to a bipolar value around an off-center
/// detent.
///
/// `[0, center]` maps to `[min, 0]` and `[center, 0.99]` maps to `[0, max]`,
/// so the physical detent at `center` reads as exactly zero. The top 1% of
/// knob travel overshoots slightly; callers clamp at the consuming end.
#[inline]
pub fn center_map(value: f32, min: f32, max: f32, center: f32) -> f32 {
    if value < center {
        map(value, 0.0, center, min, 0.0)
    } else {
        map(value, center, 0.99, 0.0, max)
    }
}

/// [`center_map`] with the standard bipolar range and the hardware detent
/// position (0.55).
#[inline]
pub fn center_map_default(value: f32) -> f32 {
    center_map(value, -1.0, 1.0, 0.55)
}

/// Hard clip to `[-limit, limit]`.
#[inline]
pub fn hard_clip(x: f32, limit: f32) -> f32 {
    x.clamp(-limit, limit)
}

/// Cubic rational soft limiter, transparent near zero and saturating
/// smoothly toward ±1 as the input approaches ±3.
#[inline]
pub fn soft_limit(x: f32) -> f32 {
    x * (27.0 + x * x) / (27.0 + 9.0 * x * x)
}

/// [`soft_limit`] with hard bounds: inputs beyond ±3 clip to ±1.
#[inline]
pub fn soft_clip(x: f32) -> f32 {
    if x <= -3.0 {
        -1.0
    } else if x >= 3.0 {
        1.0
    } else {
        soft_limit(x)
    }
}

/// Plain linear crossfade: `pos` = 0 → `a`, `pos` = 1 → `b`.
#[inline]
pub fn linear_crossfade(a: f32, b: f32, pos: f32) -> f32 {
    a * (1.0 - pos) + b * pos
}

/// Equal-power crossfade approximation with an adjustable center boost.
///
/// A linear crossfade dips ~3 dB at the midpoint; scaling it by
/// `1 + (boost - 1) * 4 * pos * (1 - pos)` restores the center level
/// without trig calls. `boost` = 1.4 puts the midpoint at ~0.7, matching
/// the ideal equal-power gain. The endpoints are exact: `pos` = 0 returns
/// `a`, `pos` = 1 returns `b`.
#[inline]
pub fn equal_power_crossfade_boost(a: f32, b: f32, pos: f32, boost: f32) -> f32 {
    linear_crossfade(a, b, pos) * (1.0 + (boost - 1.0) * 4.0 * pos * (1.0 - pos))
}

/// [`equal_power_crossfade_boost`] with the standard 1.4 boost.
#[inline]
pub fn equal_power_crossfade(a: f32, b: f32, pos: f32) -> f32 {
    equal_power_crossfade_boost(a, b, pos, 1.4)
}

/// Convert a MIDI note number (fractional allowed) to frequency in Hz.
/// Note 69 = A4 = 440 Hz.
#[inline]
pub fn midi_to_freq(note: f32) -> f32 {
    powf(2.0, (note - 69.0) / 12.0) * 440.0
}

/// Convert a frequency to its period in samples. Zero frequency yields
/// zero rather than a degenerate division.
#[inline]
pub fn freq_to_samples(freq: f32, sample_rate: f32) -> f32 {
    if freq == 0.0 { 0.0 } else { sample_rate / freq }
}

/// Convert a musical note value to a delay length in samples.
///
/// Lower notes give longer delays; the diffusion network leans on this so
/// its size control (negated upstream) scales all tap lengths musically
/// rather than linearly.
#[inline]
pub fn note_to_delay(note: f32, sample_rate: f32) -> f32 {
    freq_to_samples(midi_to_freq(note), sample_rate)
}

/// Quantize `x` in [0,1] onto `n` discrete steps, returning the step index.
#[inline]
pub fn quantize_index(x: f32, n: usize) -> usize {
    ((x.clamp(0.0, 1.0) * n as f32) as usize).min(n - 1)
}

/// Flush denormal float values to zero.
///
/// Denormals cause massive CPU spikes on some architectures. Any value
/// below 1e-20 in magnitude is inaudible and treated as zero.
#[inline]
pub fn flush_denormal(x: f32) -> f32 {
    if x.abs() < 1e-20 { 0.0 } else { x }
}
