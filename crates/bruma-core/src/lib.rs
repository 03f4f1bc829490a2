//! Bruma Core - DSP primitives for the bruma stereo voice
//!
//! Foundational building blocks for a continuously-running, allocation-free
//! audio pipeline: one output sample pair per input sample pair, with no
//! buffering latency beyond fixed algorithmic delay.
//!
//! # Core Abstractions
//!
//! ## Parameter Smoothing
//!
//! - [`InterpolationRamp`] - Scoped linear ramp that commits its final value
//!   back to the bound state cell on scope exit. The per-block mechanism
//!   that keeps control changes free of zipper noise.
//!
//! ## Delay & Filters
//!
//! - [`DelayLine`] - Circular delay with fractional reads and crossfaded
//!   dual-length reads (for glitch-free delay-time changes)
//! - [`OnePole`] - Tracking lowpass with direct coefficient control
//! - [`DcBlocker`] - First-order highpass for feedback paths
//!
//! ## Modulation & Dynamics
//!
//! - [`SineOscillator`] - Phase-accumulating sine (auto-pan source)
//! - [`EnvFollower`] - Peak envelope detection for ducking/compression
//!
//! ## Utilities
//!
//! - Math functions: [`map`], [`map_expo`], [`center_map`],
//!   [`db_to_linear`], [`hard_clip`], [`equal_power_crossfade`], etc.
//! - [`ExpoLut`] - Quantized exponential lookup table
//! - [`NoiseSource`] - Instance-owned LCG noise
//!
//! # no_std Support
//!
//! This crate is `no_std` compatible for embedded audio applications.
//! Disable the default `std` feature in your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! bruma-core = { version = "0.1", default-features = false }
//! ```
//!
//! # Design Principles
//!
//! - **Real-time safe**: No allocations in audio processing paths
//! - **No dependencies on std**: Pure `no_std` with `libm` for math
//! - **Numeric containment**: Out-of-range inputs are clamped or mapped,
//!   never rejected — there is no error channel in a signal path

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(not(feature = "std"))]
extern crate alloc;

pub mod dc_blocker;
pub mod delay;
pub mod envelope;
pub mod lut;
pub mod math;
pub mod one_pole;
pub mod oscillator;
pub mod ramp;
pub mod random;

// Re-export main types at crate root
pub use dc_blocker::DcBlocker;
pub use delay::DelayLine;
pub use envelope::EnvFollower;
pub use lut::ExpoLut;
pub use math::{
    center_map, center_map_default, db_to_linear, equal_power_crossfade,
    equal_power_crossfade_boost, flush_denormal, freq_to_samples, hard_clip, linear_crossfade,
    linear_to_db, map, map_expo, midi_to_freq, note_to_delay, quantize_index, soft_clip,
    soft_limit,
};
pub use one_pole::OnePole;
pub use oscillator::SineOscillator;
pub use ramp::InterpolationRamp;
pub use random::NoiseSource;
