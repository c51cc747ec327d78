use super::{NumericTolerance, compare_with_tolerance};
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum RadialGridError {
    #[error("radial grid has no points")]
    Empty,
    #[error("r at row {} is not finite ({})", .index + 1, .value)]
    NonFinite { index: usize, value: f64 },
    #[error("r at row {} is negative ({})", .index + 1, .value)]
    Negative { index: usize, value: f64 },
    #[error(
        "r must be strictly increasing but row {} has r={} after r={}",
        .index + 1,
        .value,
        .previous
    )]
    NotIncreasing {
        index: usize,
        previous: f64,
        value: f64,
    },
}

/// First disagreement between two radial grids.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GridMismatch {
    Length { expected: usize, actual: usize },
    Point { index: usize, expected: f64, actual: f64 },
}

impl Display for GridMismatch {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Length { expected, actual } => write!(
                f,
                "grid has {} points but the reference grid has {}",
                actual, expected
            ),
            Self::Point {
                index,
                expected,
                actual,
            } => write!(
                f,
                "r at row {} is {} but the reference grid has {}",
                index + 1,
                actual,
                expected
            ),
        }
    }
}

/// Strictly increasing, non-negative radial sample points.
#[derive(Debug, Clone, PartialEq)]
pub struct RadialGrid {
    points: Vec<f64>,
}

impl RadialGrid {
    pub fn new(points: Vec<f64>) -> Result<Self, RadialGridError> {
        if points.is_empty() {
            return Err(RadialGridError::Empty);
        }

        for (index, value) in points.iter().copied().enumerate() {
            if !value.is_finite() {
                return Err(RadialGridError::NonFinite { index, value });
            }
            if value < 0.0 {
                return Err(RadialGridError::Negative { index, value });
            }
            if index > 0 && value <= points[index - 1] {
                return Err(RadialGridError::NotIncreasing {
                    index,
                    previous: points[index - 1],
                    value,
                });
            }
        }

        Ok(Self { points })
    }

    pub fn points(&self) -> &[f64] {
        &self.points
    }

    pub fn point_count(&self) -> usize {
        self.points.len()
    }

    pub fn first(&self) -> f64 {
        self.points[0]
    }

    pub fn last(&self) -> f64 {
        self.points[self.points.len() - 1]
    }

    pub fn contains_origin(&self) -> bool {
        self.first() == 0.0
    }

    /// Compares `other` against this grid, length first and then pointwise.
    pub fn mismatch_against(
        &self,
        other: &RadialGrid,
        tolerance: NumericTolerance,
    ) -> Option<GridMismatch> {
        if self.points.len() != other.points.len() {
            return Some(GridMismatch::Length {
                expected: self.points.len(),
                actual: other.points.len(),
            });
        }

        self.points
            .iter()
            .zip(&other.points)
            .enumerate()
            .find(|(_, (expected, actual))| {
                !compare_with_tolerance(**expected, **actual, tolerance).passes
            })
            .map(|(index, (expected, actual))| GridMismatch::Point {
                index,
                expected: *expected,
                actual: *actual,
            })
    }
}
