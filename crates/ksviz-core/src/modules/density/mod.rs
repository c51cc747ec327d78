mod model;

pub use model::{DensityCurve, DensityProfile};

use super::discovery::no_orbital_files_error;
use crate::common::constants::FOUR_PI;
use crate::common::occupancy::OccupancyTable;
use crate::domain::{KsvizError, KsvizResult, LoadedOrbital, RadialSample, SingularityPolicy};
use crate::numerics::NumericTolerance;

/// Sums occupancy-weighted orbital densities onto a shared radial grid.
#[derive(Debug, Clone)]
pub struct DensityAggregator<'a> {
    occupancy: &'a OccupancyTable,
    policy: SingularityPolicy,
    grid_tolerance: NumericTolerance,
}

impl<'a> DensityAggregator<'a> {
    pub fn new(occupancy: &'a OccupancyTable) -> Self {
        Self {
            occupancy,
            policy: SingularityPolicy::default(),
            grid_tolerance: NumericTolerance::GRID,
        }
    }

    pub fn with_policy(mut self, policy: SingularityPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_grid_tolerance(mut self, tolerance: NumericTolerance) -> Self {
        self.grid_tolerance = tolerance;
        self
    }

    /// Builds the density profile of `atom`.
    ///
    /// The first orbital fixes the reference grid; every other orbital must
    /// match it in length and pointwise within the grid tolerance. Curves keep
    /// the input order.
    pub fn aggregate(&self, atom: &str, orbitals: &[LoadedOrbital]) -> KsvizResult<DensityProfile> {
        let Some(reference) = orbitals.first() else {
            return Err(no_orbital_files_error(atom));
        };
        let grid = reference.sample.grid().clone();

        let mut total = vec![0.0_f64; grid.point_count()];
        let mut curves = Vec::with_capacity(orbitals.len());

        for orbital in orbitals {
            if let Some(mismatch) = grid.mismatch_against(orbital.sample.grid(), self.grid_tolerance)
            {
                return Err(KsvizError::format(
                    "FORMAT.RADIAL_GRID_MISMATCH",
                    format!(
                        "orbital {} ({}) of atom {} does not share the radial grid of {} ({}): {}",
                        orbital.label(),
                        orbital.file.file_name(),
                        atom,
                        reference.label(),
                        reference.file.file_name(),
                        mismatch
                    ),
                ));
            }

            let occupancy = self.occupancy.occupancy_for(orbital.label())?;
            let values = orbital_density(&orbital.sample, occupancy, self.policy);
            for (sum, value) in total.iter_mut().zip(&values) {
                *sum += value;
            }

            curves.push(DensityCurve {
                label: orbital.label(),
                occupancy,
                values,
            });
        }

        Ok(DensityProfile {
            atom: atom.to_string(),
            grid,
            orbitals: curves,
            total,
            policy: self.policy,
        })
    }
}

pub fn aggregate_density(
    atom: &str,
    orbitals: &[LoadedOrbital],
    occupancy: &OccupancyTable,
    policy: SingularityPolicy,
) -> KsvizResult<DensityProfile> {
    DensityAggregator::new(occupancy)
        .with_policy(policy)
        .aggregate(atom, orbitals)
}

/// `occupancy * u^2 / (4 pi r^2)` on the sample's own grid.
pub fn orbital_density(
    sample: &RadialSample,
    occupancy: f64,
    policy: SingularityPolicy,
) -> Vec<f64> {
    let mut values: Vec<f64> = sample
        .r()
        .iter()
        .zip(sample.u())
        .map(|(r, u)| occupancy * u * u / (FOUR_PI * r * r))
        .collect();

    if policy == SingularityPolicy::NearestFinite {
        fill_non_finite_from_right(&mut values);
    }
    values
}

fn fill_non_finite_from_right(values: &mut [f64]) {
    let mut next_finite: Option<f64> = None;
    for value in values.iter_mut().rev() {
        if value.is_finite() {
            next_finite = Some(*value);
        } else if let Some(replacement) = next_finite {
            *value = replacement;
        }
    }
}
