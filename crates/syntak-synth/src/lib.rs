//! Syntak Synth - monophonic synthesis engine core.
//!
//! This crate holds everything that turns parameter values into samples:
//!
//! - [`SynthParams`] / [`ParamId`] - lock-free, range-clamped parameter store
//! - [`Adsr`] - buffer-relative attack/decay/sustain/release envelope
//! - [`Oscillator`] - phase accumulator with sine, square, and saw shapes
//! - [`Renderer`] - oscillator × envelope × volume, the one path used for both
//!   audio and visualization
//! - [`scope`] - oscilloscope trace scaling
//! - [`gain`] - volume to device gain (dB) mapping
//!
//! ```rust
//! use syntak_synth::{ParamId, Renderer, SynthParams, WaveType};
//!
//! let params = SynthParams::new();
//! params.set_wave(WaveType::Square);
//! params.set(ParamId::Width, 0.5);
//! params.set(ParamId::Tune, 441.0);
//!
//! let mut renderer = Renderer::new();
//! let block = renderer.render(&params, 2048);
//! assert!(block.iter().all(|s| (-1.0..=1.0).contains(s)));
//! ```
//!
//! # no_std Support
//!
//! Disable the default `std` feature to build against `core` + `alloc`.

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(not(feature = "std"))]
extern crate alloc;

pub mod envelope;
pub mod gain;
pub mod oscillator;
pub mod params;
pub mod renderer;
pub mod scope;

pub use envelope::Adsr;
pub use oscillator::{OscSettings, Oscillator, wrap_phase};
pub use params::{ParamDescriptor, ParamId, ParamSnapshot, ParamUnit, SynthParams, WaveType};
pub use renderer::{Renderer, SAMPLE_RATE};
