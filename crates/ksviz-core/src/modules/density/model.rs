use crate::domain::{OrbitalLabel, SingularityPolicy};
use crate::numerics::RadialGrid;

/// Occupancy-weighted density of one orbital, `occ * u^2 / (4 pi r^2)`.
#[derive(Debug, Clone, PartialEq)]
pub struct DensityCurve {
    pub label: OrbitalLabel,
    pub occupancy: f64,
    pub values: Vec<f64>,
}

/// Per-orbital curves and their sum for one atom, all on `grid`.
#[derive(Debug, Clone, PartialEq)]
pub struct DensityProfile {
    pub atom: String,
    pub grid: RadialGrid,
    pub orbitals: Vec<DensityCurve>,
    pub total: Vec<f64>,
    pub policy: SingularityPolicy,
}

impl DensityProfile {
    pub fn r(&self) -> &[f64] {
        self.grid.points()
    }

    /// Total number of electrons assumed by the occupancy model.
    pub fn electron_count(&self) -> f64 {
        self.orbitals.iter().map(|curve| curve.occupancy).sum()
    }

    pub fn curve(&self, label: OrbitalLabel) -> Option<&DensityCurve> {
        self.orbitals.iter().find(|curve| curve.label == label)
    }

    /// Indices where the total density is not finite.
    pub fn singular_points(&self) -> Vec<usize> {
        self.total
            .iter()
            .enumerate()
            .filter(|(_, value)| !value.is_finite())
            .map(|(index, _)| index)
            .collect()
    }
}
