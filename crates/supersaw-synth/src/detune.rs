//! Detune curve generator.
//!
//! Maps the linear detune knob `u ∈ [0, 1]` to the amount of spread applied
//! to the side oscillators. The curve is Adam Szabo's 11th-degree fit of the
//! detune response of the original hardware supersaw: nearly flat for the
//! first few percent, a long gentle rise through the middle, then a steep
//! climb to full spread in the last tenth of the knob.
//!
//! ```text
//! d(u) = clamp01( Σ cₖ · uᵏ ),  k = 0..=11
//! ```
//!
//! Two strategies produce the same values at the 101 knob positions:
//!
//! - [`DetuneStrategy::Table`] - evaluate once per step into a
//!   [`DetuneTable`] at initialization, then index by `round(u * 100)`
//! - [`DetuneStrategy::Direct`] - evaluate the polynomial when a detune
//!   change is drained at the start of a buffer
//!
//! The coefficients alternate in sign and reach ~1.4e5 in magnitude, so the
//! sum cancels heavily near `u = 1`. Evaluation is done in `f64` Horner
//! form and only the result is narrowed to `f32`.

use supersaw_core::clamp01;

/// Number of knob positions in the detune table (0..=100 percent).
pub const DETUNE_TABLE_SIZE: usize = 101;

/// Highest detune table index.
pub const MAX_DETUNE_INDEX: usize = DETUNE_TABLE_SIZE - 1;

/// Polynomial coefficients, constant term first.
const COEFFICIENTS: [f64; 12] = [
    0.003_011_559_6,
    0.671_741_763_4,
    -24.187_882_439_1,
    404.270_393_838_8,
    -3_425.083_659_131_8,
    17_019.951_858_008_0,
    -53_046.964_275_187_5,
    106_649.667_915_829_2,
    -138_150.676_108_054_8,
    111_363.480_872_936_8,
    -50_818.865_204_592_4,
    10_028.731_289_163_4,
];

/// How the curved detune amount is obtained from the knob.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DetuneStrategy {
    /// Precompute all 101 knob positions once, look up afterwards.
    #[default]
    Table,
    /// Evaluate the polynomial whenever the knob moves.
    Direct,
}

/// Evaluate the detune curve at `u`.
///
/// `u` is clamped to \[0, 1\] first (NaN reads as 0); the result is always
/// in \[0, 1\].
///
/// # Example
///
/// ```rust
/// use supersaw_synth::detune_curve;
///
/// assert!((detune_curve(0.0) - 0.003_011_56).abs() < 1e-7);
/// assert!((detune_curve(1.0) - 0.999_954).abs() < 1e-5);
/// ```
pub fn detune_curve(u: f32) -> f32 {
    let u = f64::from(clamp01(u));
    let sum = COEFFICIENTS.iter().rev().fold(0.0_f64, |acc, &c| acc * u + c);
    clamp01(sum as f32)
}

/// Table index for a knob value: `round(u * 100)`, clamped to the table.
#[inline]
pub fn detune_index(u: f32) -> usize {
    let scaled = libm::roundf(clamp01(u) * MAX_DETUNE_INDEX as f32);
    (scaled as usize).min(MAX_DETUNE_INDEX)
}

/// The detune curve sampled at every whole percent of the knob.
#[derive(Debug, Clone, PartialEq)]
pub struct DetuneTable {
    values: [f32; DETUNE_TABLE_SIZE],
}

impl Default for DetuneTable {
    fn default() -> Self {
        Self::new()
    }
}

impl DetuneTable {
    /// Build the table, evaluating the polynomial at `i / 100`.
    pub fn new() -> Self {
        let mut values = [0.0; DETUNE_TABLE_SIZE];
        for (i, value) in values.iter_mut().enumerate() {
            *value = detune_curve(i as f32 * 0.01);
        }
        Self { values }
    }

    /// Curved detune at table position `index` (saturates at 100).
    #[inline]
    pub fn get(&self, index: usize) -> f32 {
        self.values[index.min(MAX_DETUNE_INDEX)]
    }

    /// Curved detune for a knob value, via [`detune_index`].
    #[inline]
    pub fn lookup(&self, u: f32) -> f32 {
        self.get(detune_index(u))
    }

    /// All table entries.
    pub fn values(&self) -> &[f32; DETUNE_TABLE_SIZE] {
        &self.values
    }
}

/// Produces the curved detune amount with the configured strategy.
///
/// The table is only built by [`build`](Self::build); until then the
/// table strategy evaluates the polynomial at the rounded knob position,
/// which yields the same value the table would hold.
#[derive(Debug, Clone, PartialEq)]
pub struct DetuneCurveGenerator {
    strategy: DetuneStrategy,
    table: Option<DetuneTable>,
}

impl DetuneCurveGenerator {
    /// Create a generator; no table is built yet.
    pub fn new(strategy: DetuneStrategy) -> Self {
        Self {
            strategy,
            table: None,
        }
    }

    /// Build the lookup table if the strategy uses one. Repeated calls are
    /// no-ops.
    pub fn build(&mut self) {
        if self.strategy == DetuneStrategy::Table && self.table.is_none() {
            self.table = Some(DetuneTable::new());
        }
    }

    /// The configured strategy.
    pub fn strategy(&self) -> DetuneStrategy {
        self.strategy
    }

    /// The lookup table, once built.
    pub fn table(&self) -> Option<&DetuneTable> {
        self.table.as_ref()
    }

    /// Curved detune amount for knob value `u`.
    pub fn evaluate(&self, u: f32) -> f32 {
        match (self.strategy, &self.table) {
            (DetuneStrategy::Table, Some(table)) => table.lookup(u),
            (DetuneStrategy::Table, None) => detune_curve(detune_index(u) as f32 * 0.01),
            (DetuneStrategy::Direct, _) => detune_curve(u),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Straight power-sum evaluation, the way the curve is usually written.
    fn reference(u: f64) -> f64 {
        let mut sum = 0.0;
        let mut power = 1.0;
        for c in COEFFICIENTS {
            sum += c * power;
            power *= u;
        }
        sum.clamp(0.0, 1.0)
    }

    #[test]
    fn table_matches_reference_polynomial() {
        let table = DetuneTable::new();
        for (i, &value) in table.values().iter().enumerate() {
            let expected = reference(i as f64 * 0.01);
            assert!(
                (f64::from(value) - expected).abs() < 1e-4,
                "index {i}: {value} vs {expected}"
            );
        }
    }

    #[test]
    fn known_points() {
        let table = DetuneTable::new();
        assert!((table.get(0) - 0.003_011_56).abs() < 1e-6);
        assert!((table.get(1) - 0.007_681_86).abs() < 1e-6);
        assert!((table.get(50) - 0.097_955_15).abs() < 1e-6);
        assert!((table.get(90) - 0.353_913_5).abs() < 1e-5);
        assert!((table.get(100) - 0.999_953_7).abs() < 1e-5);
    }

    #[test]
    fn rises_over_the_knob() {
        let table = DetuneTable::new();
        let v = table.values();
        // the fit has a shallow dip around 4 percent
        for i in (0..3).chain(5..MAX_DETUNE_INDEX) {
            assert!(v[i + 1] >= v[i], "decreasing at {i}");
        }
    }

    #[test]
    fn index_rounds_and_clamps() {
        assert_eq!(detune_index(0.0), 0);
        assert_eq!(detune_index(0.004), 0);
        assert_eq!(detune_index(0.006), 1);
        assert_eq!(detune_index(0.5), 50);
        assert_eq!(detune_index(3.0), 100);
        assert_eq!(detune_index(-1.0), 0);
        assert_eq!(detune_index(f32::NAN), 0);
    }

    #[test]
    fn get_saturates() {
        let table = DetuneTable::new();
        assert_eq!(table.get(500), table.get(100));
    }

    #[test]
    fn strategies_agree_on_knob_steps() {
        let mut table = DetuneCurveGenerator::new(DetuneStrategy::Table);
        let unbuilt = table.clone();
        table.build();
        let direct = DetuneCurveGenerator::new(DetuneStrategy::Direct);
        for i in 0..=100 {
            let u = i as f32 * 0.01;
            assert_eq!(table.evaluate(u), unbuilt.evaluate(u));
            assert!((table.evaluate(u) - direct.evaluate(u)).abs() < 1e-6);
        }
    }

    #[test]
    fn build_only_for_table_strategy() {
        let mut direct = DetuneCurveGenerator::new(DetuneStrategy::Direct);
        direct.build();
        assert!(direct.table().is_none());

        let mut table = DetuneCurveGenerator::new(DetuneStrategy::Table);
        table.build();
        let first = table.clone();
        table.build();
        assert_eq!(table, first);
        assert!(table.table().is_some());
    }
}
