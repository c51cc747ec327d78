pub mod radial;

pub use radial::{GridMismatch, RadialGrid, RadialGridError};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct NumericTolerance {
    #[serde(rename = "absTol")]
    pub abs_tol: f64,
    #[serde(rename = "relTol")]
    pub rel_tol: f64,
}

impl NumericTolerance {
    /// Tolerance used when checking that orbitals share one radial grid.
    pub const GRID: Self = Self {
        abs_tol: 1.0e-12,
        rel_tol: 1.0e-9,
    };
}

impl Default for NumericTolerance {
    fn default() -> Self {
        Self::GRID
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToleranceComparison {
    pub abs_diff: f64,
    pub rel_diff: f64,
    pub passes: bool,
}

pub fn compare_with_tolerance(
    baseline: f64,
    actual: f64,
    tolerance: NumericTolerance,
) -> ToleranceComparison {
    let abs_diff = (actual - baseline).abs();
    let rel_denominator = baseline.abs().max(f64::MIN_POSITIVE);
    let rel_diff = abs_diff / rel_denominator;
    let passes = abs_diff <= tolerance.abs_tol || abs_diff <= tolerance.rel_tol * baseline.abs();

    ToleranceComparison {
        abs_diff,
        rel_diff,
        passes,
    }
}

/// Smallest and largest finite value, ignoring NaN and infinities.
pub fn finite_bounds(values: impl IntoIterator<Item = f64>) -> Option<(f64, f64)> {
    values
        .into_iter()
        .filter(|value| value.is_finite())
        .fold(None, |bounds, value| match bounds {
            None => Some((value, value)),
            Some((low, high)) => Some((low.min(value), high.max(value))),
        })
}

/// Like [`finite_bounds`] but restricted to strictly positive values, which is
/// what a logarithmic axis can show.
pub fn positive_bounds(values: impl IntoIterator<Item = f64>) -> Option<(f64, f64)> {
    finite_bounds(values.into_iter().filter(|value| *value > 0.0))
}

#[cfg(test)]
mod tests {
    use super::{NumericTolerance, compare_with_tolerance, finite_bounds, positive_bounds};

    #[test]
    fn tolerance_comparison_accepts_absolute_or_relative_match() {
        let tolerance = NumericTolerance {
            abs_tol: 1.0e-6,
            rel_tol: 1.0e-3,
        };

        assert!(compare_with_tolerance(0.0, 5.0e-7, tolerance).passes);
        assert!(compare_with_tolerance(100.0, 100.05, tolerance).passes);
        let failing = compare_with_tolerance(1.0, 1.01, tolerance);
        assert!(!failing.passes);
        assert!((failing.abs_diff - 0.01).abs() < 1.0e-12);
        assert!((failing.rel_diff - 0.01).abs() < 1.0e-12);
    }

    #[test]
    fn tolerance_deserializes_from_camel_case_keys() {
        let tolerance: NumericTolerance =
            serde_json::from_str(r#"{ "absTol": 1e-8, "relTol": 1e-6 }"#)
                .expect("tolerance should parse");
        assert_eq!(tolerance.abs_tol, 1.0e-8);
        assert_eq!(tolerance.rel_tol, 1.0e-6);
    }

    #[test]
    fn bounds_skip_non_finite_values() {
        let values = [f64::NAN, 3.0, f64::INFINITY, -2.0, 0.0];
        assert_eq!(finite_bounds(values), Some((-2.0, 3.0)));
        assert_eq!(positive_bounds(values), Some((3.0, 3.0)));
        assert_eq!(finite_bounds([f64::NAN]), None);
        assert_eq!(positive_bounds([0.0, -1.0]), None);
    }
}
