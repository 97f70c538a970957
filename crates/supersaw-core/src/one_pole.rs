//! Pole-tracking one-pole high-pass filter.
//!
//! A first-order high-pass with unity gain at Nyquist:
//!
//! ```text
//! H(z) = g * (1 - z^-1) / (1 - p * z^-1),   g = (1 + p) / 2
//!
//! y[n] = g * (x[n] - x[n-1]) + p * y[n-1]
//! ```
//!
//! where `p = exp(-2π * f)` and `f` is the pole frequency in cycles per
//! sample. The oscillator retunes the pole every time the note pitch
//! changes, so the frequency is given in the same normalized unit as the
//! oscillator phase increments rather than in Hz.
//!
//! # Stability
//!
//! `f` is clamped to \[[`MIN_POLE_FREQ`], [`MAX_POLE_FREQ`]\], which keeps
//! `p` strictly inside (0, 1). The feedback state is flushed of denormals.
//!
//! # Usage
//!
//! ```rust
//! use supersaw_core::OnePoleHighpass;
//!
//! let mut hp = OnePoleHighpass::new();
//! hp.set_pole_frequency(110.0 / 48000.0);
//! let mut out = 0.0;
//! for _ in 0..48000 {
//!     out = hp.process(1.0);
//! }
//! assert!(out.abs() < 1e-3); // DC removed
//! ```
//!
//! # Reference
//!
//! Julius O. Smith III, "Introduction to Digital Filters with Audio
//! Applications", DC Blocker.

use crate::math::flush_denormal;
use libm::expf;

/// Lowest allowed pole frequency (cycles/sample).
pub const MIN_POLE_FREQ: f32 = 1e-5;

/// Highest allowed pole frequency (cycles/sample).
pub const MAX_POLE_FREQ: f32 = 0.45;

/// One-pole (6 dB/oct) high-pass filter with a retunable pole.
///
/// # Invariants
///
/// - `pole` is always in (0, 1)
/// - `y_prev` is flushed to zero when below 1e-20
#[derive(Debug, Clone, PartialEq)]
pub struct OnePoleHighpass {
    gain: f32,
    pole: f32,
    x_prev: f32,
    y_prev: f32,
    freq: f32,
}

impl Default for OnePoleHighpass {
    fn default() -> Self {
        Self::new()
    }
}

impl OnePoleHighpass {
    /// Create a filter with its pole at [`MIN_POLE_FREQ`] (near-transparent).
    pub fn new() -> Self {
        let mut filter = Self {
            gain: 1.0,
            pole: 0.0,
            x_prev: 0.0,
            y_prev: 0.0,
            freq: MIN_POLE_FREQ,
        };
        filter.recalculate_coeff();
        filter
    }

    /// Move the pole to `freq` cycles per sample.
    ///
    /// Out-of-range and NaN frequencies are clamped into the stable range.
    pub fn set_pole_frequency(&mut self, freq: f32) {
        self.freq = if freq.is_nan() {
            MIN_POLE_FREQ
        } else {
            freq.clamp(MIN_POLE_FREQ, MAX_POLE_FREQ)
        };
        self.recalculate_coeff();
    }

    /// Current (clamped) pole frequency in cycles per sample.
    pub fn pole_frequency(&self) -> f32 {
        self.freq
    }

    /// Current pole coefficient `p`.
    pub fn pole(&self) -> f32 {
        self.pole
    }

    /// Process one sample.
    #[inline]
    pub fn process(&mut self, input: f32) -> f32 {
        let output = flush_denormal(self.gain * (input - self.x_prev) + self.pole * self.y_prev);
        self.x_prev = input;
        self.y_prev = output;
        output
    }

    /// Clear the filter memory; the pole is kept.
    pub fn reset(&mut self) {
        self.x_prev = 0.0;
        self.y_prev = 0.0;
    }

    fn recalculate_coeff(&mut self) {
        self.pole = expf(-core::f32::consts::TAU * self.freq);
        self.gain = 0.5 * (1.0 + self.pole);
    }
}
