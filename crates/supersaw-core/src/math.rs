//! Mathematical utility functions for DSP.
//!
//! Provides the small scalar operations the supersaw signal path is built
//! from. All functions are allocation-free and suitable for `no_std`.
//!
//! # Range Handling
//!
//! - [`clamp01`] - Clamp to the unit interval, mapping NaN to zero
//! - [`hard_clip`] - Clamp to ±threshold
//! - [`wrap_phase`] - Fold a phase accumulator back into \[0, 1)
//!
//! # Mixing
//!
//! - [`crossfade`] - Exact linear blend between two signals
//! - [`lerp`] - Linear interpolation
//!
//! # Waveshaping
//!
//! | Function | Character | Bound | Use Case |
//! |----------|-----------|-------|----------|
//! | [`cubic_soft_clip`] | Gentle cubic knee | ±(1 - knee) | Oscillator output stage |
//! | [`hard_clip`] | Flat tops | ±threshold | Safety limiting |

use libm::floorf;

/// Clamp a control value to \[0.0, 1.0\].
///
/// NaN is treated as 0.0 so that a malformed upstream value can never be
/// stored in a control field.
///
/// # Example
/// ```rust
/// use supersaw_core::clamp01;
///
/// assert_eq!(clamp01(1.5), 1.0);
/// assert_eq!(clamp01(-0.2), 0.0);
/// assert_eq!(clamp01(f32::NAN), 0.0);
/// ```
#[inline]
pub fn clamp01(x: f32) -> f32 {
    if x.is_nan() { 0.0 } else { x.clamp(0.0, 1.0) }
}

/// Hard clip to ±threshold range.
///
/// # Arguments
/// * `x` - Input sample
/// * `threshold` - Clipping threshold
///
/// # Returns
/// Hard-clipped output in range [-threshold, threshold]
#[inline]
pub fn hard_clip(x: f32, threshold: f32) -> f32 {
    x.clamp(-threshold, threshold)
}

/// Cubic soft clipper with a fixed knee.
///
/// The input is first hard-limited to \[-1, 1\], then shaped with
/// `x - knee * x³`. For `knee` in \[0, 1/3\] the curve is monotonic, so the
/// output is bounded by `±(1 - knee)` and never folds back.
///
/// # Arguments
/// * `knee` - Cubic coefficient (the oscillator output stage uses 0.125)
/// * `x` - Input sample (any range)
///
/// # Example
/// ```rust
/// use supersaw_core::cubic_soft_clip;
///
/// assert_eq!(cubic_soft_clip(0.125, 0.0), 0.0);
/// assert_eq!(cubic_soft_clip(0.125, 4.0), 0.875);
/// ```
#[inline]
pub fn cubic_soft_clip(knee: f32, x: f32) -> f32 {
    let x = hard_clip(x, 1.0);
    x - knee * (x * x * x)
}

/// Linear interpolation between two values.
///
/// # Arguments
/// * `a` - Start value (at t=0)
/// * `b` - End value (at t=1)
/// * `t` - Interpolation factor (0.0 to 1.0)
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Crossfade from `from` to `to` by `amount`.
///
/// Computed as `(1 - amount) * from + amount * to` rather than the cheaper
/// `from + (to - from) * amount`: the two-product form returns `from`
/// exactly at 0.0 and `to` exactly at 1.0, which the mix stages rely on.
///
/// # Example
/// ```rust
/// use supersaw_core::crossfade;
///
/// assert_eq!(crossfade(0.3, 0.9, 0.0), 0.3);
/// assert_eq!(crossfade(0.3, 0.9, 1.0), 0.9);
/// ```
#[inline]
pub fn crossfade(from: f32, to: f32, amount: f32) -> f32 {
    (1.0 - amount) * from + amount * to
}

/// Wrap a phase accumulator into \[0.0, 1.0).
///
/// Subtracts the integer part (floor, so negative phases wrap too). The
/// result is guaranteed strictly below 1.0 even when rounding of a tiny
/// negative input would otherwise produce exactly 1.0.
#[inline]
pub fn wrap_phase(phase: f32) -> f32 {
    let wrapped = phase - floorf(phase);
    if wrapped >= 1.0 || wrapped.is_nan() {
        0.0
    } else {
        wrapped
    }
}

/// Flush subnormal (denormalized) floats to zero.
///
/// Subnormal floats cause severe CPU slowdowns on most architectures. Values
/// below 1e-20 are replaced with zero, leaving margin before the IEEE 754
/// subnormal range. Used in the high-pass feedback path.
#[allow(clippy::inline_always)]
#[inline(always)]
pub fn flush_denormal(x: f32) -> f32 {
    if x.abs() < 1e-20 { 0.0 } else { x }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp01() {
        assert_eq!(clamp01(0.5), 0.5);
        assert_eq!(clamp01(2.0), 1.0);
        assert_eq!(clamp01(-1.0), 0.0);
        assert_eq!(clamp01(f32::NAN), 0.0);
        assert_eq!(clamp01(f32::INFINITY), 1.0);
        assert_eq!(clamp01(f32::NEG_INFINITY), 0.0);
    }

    #[test]
    fn test_cubic_soft_clip_bounds() {
        let knee = 0.125;
        for i in -400..=400 {
            let x = i as f32 * 0.01;
            let y = cubic_soft_clip(knee, x);
            assert!(y.abs() <= 0.875 + 1e-6, "x={x} y={y}");
        }
        assert_eq!(cubic_soft_clip(knee, 1.0), 0.875);
        assert_eq!(cubic_soft_clip(knee, -1.0), -0.875);
    }

    #[test]
    fn test_cubic_soft_clip_is_odd_and_monotonic() {
        let knee = 0.125;
        let mut prev = cubic_soft_clip(knee, -2.0);
        for i in -199..=200 {
            let x = i as f32 * 0.01;
            let y = cubic_soft_clip(knee, x);
            assert!(y >= prev, "not monotonic at {x}");
            assert!((y + cubic_soft_clip(knee, -x)).abs() < 1e-6);
            prev = y;
        }
    }

    #[test]
    fn test_lerp() {
        assert_eq!(lerp(0.0, 10.0, 0.0), 0.0);
        assert_eq!(lerp(0.0, 10.0, 0.5), 5.0);
        assert_eq!(lerp(0.0, 10.0, 1.0), 10.0);
    }

    #[test]
    fn test_crossfade_endpoints_exact() {
        let pairs = [(0.3, -0.7), (0.123_456, 0.987_654), (-1.0, 1.0), (1e-7, 0.5)];
        for (a, b) in pairs {
            assert_eq!(crossfade(a, b, 0.0), a);
            assert_eq!(crossfade(a, b, 1.0), b);
        }
        assert!((crossfade(0.0, 1.0, 0.25) - 0.25).abs() < 1e-7);
    }

    #[test]
    fn test_wrap_phase() {
        assert_eq!(wrap_phase(0.25), 0.25);
        assert!((wrap_phase(1.25) - 0.25).abs() < 1e-6);
        assert!((wrap_phase(3.5) - 0.5).abs() < 1e-6);
        assert!((wrap_phase(-0.25) - 0.75).abs() < 1e-6);
        assert_eq!(wrap_phase(1.0), 0.0);
        let tiny = wrap_phase(-1e-9);
        assert!((0.0..1.0).contains(&tiny), "got {tiny}");
    }

    #[test]
    fn test_flush_denormal() {
        assert_eq!(flush_denormal(1.0), 1.0);
        assert_eq!(flush_denormal(-0.5), -0.5);
        assert_eq!(flush_denormal(1e-10), 1e-10);
        assert_eq!(flush_denormal(1e-21), 0.0);
        assert_eq!(flush_denormal(-1e-38), 0.0);
    }
}
