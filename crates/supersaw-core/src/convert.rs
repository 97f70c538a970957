//! Host value conversions.
//!
//! Hosts hand the oscillator raw integers: Q31 fixed-point audio and LFO
//! words, 10-bit knob positions, and percent-style parameter values. These
//! helpers turn them into the normalized floats the engine works with, and
//! back again for the output buffer.

use crate::math::clamp01;

/// Largest raw value of a 10-bit knob.
pub const KNOB_MAX: u16 = 1023;

/// Q31 full-scale as a float (2³¹).
const Q31_SCALE: f32 = 2_147_483_648.0;

/// Convert a float sample to Q31 fixed point.
///
/// Values outside \[-1, 1) saturate; `as` casts from float saturate in Rust,
/// so +1.0 lands on `i32::MAX` rather than wrapping.
///
/// # Example
/// ```rust
/// use supersaw_core::f32_to_q31;
///
/// assert_eq!(f32_to_q31(0.0), 0);
/// assert_eq!(f32_to_q31(1.0), i32::MAX);
/// assert_eq!(f32_to_q31(-1.0), i32::MIN);
/// ```
#[inline]
pub fn f32_to_q31(x: f32) -> i32 {
    (x * Q31_SCALE) as i32
}

/// Convert a Q31 fixed-point word to a float in \[-1, 1).
#[inline]
pub fn q31_to_f32(q: i32) -> f32 {
    q as f32 / Q31_SCALE
}

/// Convert a 10-bit knob position to \[0.0, 1.0\].
///
/// Raw values above [`KNOB_MAX`] are treated as full scale.
///
/// # Example
/// ```rust
/// use supersaw_core::param_val_to_f32;
///
/// assert_eq!(param_val_to_f32(0), 0.0);
/// assert_eq!(param_val_to_f32(1023), 1.0);
/// assert_eq!(param_val_to_f32(4000), 1.0);
/// ```
#[inline]
pub fn param_val_to_f32(raw: u16) -> f32 {
    f32::from(raw.min(KNOB_MAX)) / f32::from(KNOB_MAX)
}

/// Convert a percent parameter (`raw * 0.01`) and clamp it to \[0.0, 1.0\].
#[inline]
pub fn percent_to_unit(raw: u16) -> f32 {
    clamp01(f32::from(raw) * 0.01)
}
