//! Patch validation.
//!
//! The voice clamps every value it is given, so an out-of-range patch still
//! plays. Validation exists to catch typos in hand-edited files before they
//! are silently clamped: every problem is reported, not just the first.
//!
//! # Example
//!
//! ```rust
//! use supersaw_config::{Controls, Patch, ValidationError};
//!
//! let patch = Patch::new("Typo").with_controls(Controls {
//!     detune: 250,
//!     ..Controls::default()
//! });
//! assert!(matches!(
//!     patch.validate(),
//!     Err(ValidationError::OutOfRange { ref param, .. }) if param == "detune"
//! ));
//! ```

use crate::patch::{Controls, Patch};
use supersaw_core::KNOB_MAX;
use thiserror::Error;

/// Highest percent control value.
pub const PERCENT_MAX: u16 = 100;

/// Accepted sample rates, in Hz.
pub const SAMPLE_RATE_RANGE: core::ops::RangeInclusive<u32> = 8_000..=384_000;

/// Validation error types.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ValidationError {
    /// Patch has an empty name.
    #[error("patch name is empty")]
    EmptyName,

    /// Control value out of range.
    #[error("parameter '{param}' value {value} out of range [{min}, {max}]")]
    OutOfRange {
        /// Name of the control.
        param: String,
        /// The value that was out of range.
        value: f32,
        /// Minimum allowed value.
        min: f32,
        /// Maximum allowed value.
        max: f32,
    },

    /// Sample rate outside [`SAMPLE_RATE_RANGE`].
    #[error("unsupported sample rate {0} Hz")]
    SampleRate(u32),

    /// Side gain that is negative or not finite.
    #[error("invalid side gain {0}")]
    SideGain(f32),

    /// Multiple validation errors.
    #[error("multiple validation errors: {}", .0.iter().map(|e| e.to_string()).collect::<Vec<_>>().join("; "))]
    Multiple(Vec<ValidationError>),
}

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

fn check_range(param: &str, value: u16, min: u16, max: u16, errors: &mut Vec<ValidationError>) {
    if !(min..=max).contains(&value) {
        errors.push(ValidationError::OutOfRange {
            param: param.to_string(),
            value: f32::from(value),
            min: f32::from(min),
            max: f32::from(max),
        });
    }
}

fn collect_control_errors(controls: &Controls, errors: &mut Vec<ValidationError>) {
    check_range("mix_a", controls.mix_a, 0, PERCENT_MAX, errors);
    check_range("mix_b", controls.mix_b, 0, PERCENT_MAX, errors);
    check_range("ring_mix", controls.ring_mix, 0, PERCENT_MAX, errors);
    check_range("detune", controls.detune, 0, PERCENT_MAX, errors);
    check_range("chord", controls.chord, 1, 4, errors);
    check_range("shape", controls.shape, 0, KNOB_MAX, errors);
    check_range("shift_shape", controls.shift_shape, 0, KNOB_MAX, errors);
}

fn finish(mut errors: Vec<ValidationError>) -> ValidationResult<()> {
    match errors.len() {
        0 => Ok(()),
        1 => Err(errors.remove(0)),
        _ => Err(ValidationError::Multiple(errors)),
    }
}

/// Validate control values only.
pub fn validate_controls(controls: &Controls) -> ValidationResult<()> {
    let mut errors = Vec::new();
    collect_control_errors(controls, &mut errors);
    finish(errors)
}

/// Validate a whole patch.
pub fn validate_patch(patch: &Patch) -> ValidationResult<()> {
    let mut errors = Vec::new();

    if patch.name.trim().is_empty() {
        errors.push(ValidationError::EmptyName);
    }
    if !SAMPLE_RATE_RANGE.contains(&patch.sample_rate) {
        errors.push(ValidationError::SampleRate(patch.sample_rate));
    }
    if let Some(gain) = patch.engine.side_gain
        && !(gain.is_finite() && gain >= 0.0)
    {
        errors.push(ValidationError::SideGain(gain));
    }
    collect_control_errors(&patch.controls, &mut errors);

    finish(errors)
}
