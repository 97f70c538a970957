//! Supersaw Core - DSP primitives for the supersaw oscillator voice
//!
//! This crate provides the building blocks the supersaw engine is assembled
//! from, designed for hard real-time audio callbacks with zero allocation in
//! the audio path.
//!
//! # Core Abstractions
//!
//! ## Waveform Sources
//!
//! - [`SawWave`] - Seam for band-limited sawtooth generators
//! - [`PolyBlepSaw`] - 4th-order PolyBLEP sawtooth
//! - [`NaiveSaw`] - Trivial ramp, no anti-aliasing
//!
//! ## Filters
//!
//! - [`OnePoleHighpass`] - First-order high-pass with a retunable pole
//!
//! ## Host Conversions
//!
//! - [`Pitch`] / [`pitch_to_increment`] - Note pitch word to cycles per sample
//! - [`f32_to_q31`] / [`q31_to_f32`] - Fixed-point audio words
//! - [`param_val_to_f32`] / [`percent_to_unit`] - Control value scaling
//!
//! ## Utilities
//!
//! - [`clamp01`], [`crossfade`], [`wrap_phase`], [`cubic_soft_clip`]
//!
//! # no_std Support
//!
//! This crate is `no_std` compatible for embedded targets. Disable the
//! default `std` feature in your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! supersaw-core = { version = "0.1", default-features = false }
//! ```
//!
//! # Example
//!
//! ```rust
//! use supersaw_core::{Pitch, PolyBlepSaw, SawWave, pitch_to_increment, wrap_phase};
//!
//! let saw = PolyBlepSaw;
//! let increment = pitch_to_increment(Pitch::from_note(69), 48000.0);
//! let mut phase = 0.0;
//! let mut block = [0.0f32; 64];
//! for sample in block.iter_mut() {
//!     *sample = saw.sample(phase, increment);
//!     phase = wrap_phase(phase + increment);
//! }
//! ```
//!
//! # Design Principles
//!
//! - **Real-time safe**: No allocations in audio processing paths
//! - **No dependencies on std**: Pure `no_std` with `libm` for math
//! - **Stateless where possible**: waveform sources and shapers are pure

#![cfg_attr(not(feature = "std"), no_std)]

pub mod convert;
pub mod math;
pub mod one_pole;
pub mod pitch;
pub mod saw;

// Re-export main types at crate root
pub use convert::{KNOB_MAX, f32_to_q31, param_val_to_f32, percent_to_unit, q31_to_f32};
pub use math::{clamp01, crossfade, cubic_soft_clip, flush_denormal, hard_clip, lerp, wrap_phase};
pub use one_pole::{MAX_POLE_FREQ, MIN_POLE_FREQ, OnePoleHighpass};
pub use pitch::{MAX_INCREMENT, Pitch, hz_to_increment, midi_to_freq, pitch_to_increment};
pub use saw::{NaiveSaw, PolyBlepSaw, SawWave};
