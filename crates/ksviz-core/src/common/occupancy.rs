//! Shell occupancy model used to weight orbital densities.
//!
//! The default assumes every orbital present is a full closed subshell,
//! `2 (2l + 1)` electrons, regardless of the atom's real configuration.
//! Explicit overrides let callers describe partially filled shells such as
//! carbon `2p²`.

use crate::common::spectroscopic::MAX_ANGULAR_MOMENTUM;
use crate::domain::{KsvizError, KsvizResult, OrbitalLabel};
use std::collections::BTreeMap;

pub fn closed_shell_occupancy(l: u8) -> KsvizResult<u32> {
    if l > MAX_ANGULAR_MOMENTUM {
        return Err(KsvizError::range(
            "RANGE.ANGULAR_MOMENTUM",
            format!(
                "angular momentum l={} is outside the supported range 0..={}",
                l, MAX_ANGULAR_MOMENTUM
            ),
        ));
    }

    let l = u32::from(l);
    Ok(if l == 0 { 2 } else { 2 * (2 * l + 1) })
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct OccupancyTable {
    overrides: BTreeMap<OrbitalLabel, f64>,
}

impl OccupancyTable {
    pub fn closed_shell() -> Self {
        Self::default()
    }

    pub fn with_override(mut self, label: OrbitalLabel, electrons: f64) -> KsvizResult<Self> {
        let capacity = f64::from(closed_shell_occupancy(label.l())?);
        if !electrons.is_finite() || electrons < 0.0 || electrons > capacity {
            return Err(KsvizError::range(
                "RANGE.OCCUPANCY",
                format!(
                    "occupancy {} for orbital {} must lie within 0..={}",
                    electrons, label, capacity
                ),
            ));
        }

        self.overrides.insert(label, electrons);
        Ok(self)
    }

    pub fn occupancy_for(&self, label: OrbitalLabel) -> KsvizResult<f64> {
        match self.overrides.get(&label) {
            Some(electrons) => Ok(*electrons),
            None => closed_shell_occupancy(label.l()).map(f64::from),
        }
    }

    pub fn overrides(&self) -> impl Iterator<Item = (OrbitalLabel, f64)> + '_ {
        self.overrides
            .iter()
            .map(|(label, electrons)| (*label, *electrons))
    }

    pub fn is_closed_shell(&self) -> bool {
        self.overrides.is_empty()
    }
}
