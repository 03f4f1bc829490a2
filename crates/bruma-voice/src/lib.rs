//! Bruma Voice - stereo ambience reverb and looper
//!
//! The signal-processing core of an embedded stereo effects voice: a
//! continuously-running, allocation-free pipeline computing one output
//! sample pair per input sample pair. Two subsystems:
//!
//! - [`Ambience`] - a diffusion-network reverb with feedback damping
//!   ([`Damp`], [`Diffuse`]) and a triangular-windowed buffer-reversal
//!   effect ([`ReversedBuffer`]), all driven by a single bipolar
//!   "spacetime" macro.
//! - [`LooperBuffer`] - a punch-in/out circular-buffer looper with
//!   crossfaded recording ([`WriteHead`]) and cubic-interpolated,
//!   direction-reversible variable-speed playback.
//!
//! Plus the [`StereoWavefolder`] nonlinearity and the control-snapshot
//! model ([`Controls`], [`CvInputs`], [`EngineState`], [`ControlFrame`])
//! the host hands to every [`StereoEffect`] once per block.
//!
//! # Real-Time Contract
//!
//! Single-threaded and cooperative: one processing call runs to completion
//! per block. No operation blocks, allocates, or performs I/O after
//! construction; all control inputs are clamped or mapped into range, never
//! rejected. There is no error channel — numeric containment (feedback
//! gain ≤ 1, hard clips at mixing junctions, wrap-normalized indices) keeps
//! the pipeline running indefinitely.
//!
//! # Example
//!
//! ```rust
//! use bruma_voice::{Ambience, ControlFrame, Controls, CvInputs, EngineState, StereoBuffer,
//!     StereoEffect};
//!
//! let state = EngineState::default();
//! let controls = Controls::default();
//! let cvs = CvInputs::default();
//! let frame = ControlFrame { controls: &controls, cvs: &cvs, state: &state };
//!
//! let mut ambience = Ambience::new(&state);
//! let input = StereoBuffer::new(state.block_size);
//! let mut output = StereoBuffer::new(state.block_size);
//! ambience.process(&frame, &input, &mut output);
//! ```

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(not(feature = "std"))]
extern crate alloc;

pub mod ambience;
pub mod compressor;
pub mod controls;
pub mod damp;
pub mod diffuse;
pub mod effect;
pub mod looper;
pub mod reversed_buffer;
pub mod wavefolder;
pub mod write_head;

// Re-export main types at crate root
pub use ambience::Ambience;
pub use compressor::Compressor;
pub use controls::{ControlFrame, Controls, CvInputs, EngineState, modulate};
pub use damp::Damp;
pub use diffuse::{Diffuse, NUM_TAPS};
pub use effect::{StereoBuffer, StereoEffect};
pub use looper::{CHANNEL_LENGTH, FADE_LENGTH, LooperBuffer, PlaybackDirection, TOTAL_LENGTH};
pub use reversed_buffer::ReversedBuffer;
pub use wavefolder::StereoWavefolder;
pub use write_head::WriteHead;
