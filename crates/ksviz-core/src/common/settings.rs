//! Pipeline settings, optionally loaded from a JSON file.
//!
//! Every key is optional; missing keys keep the defaults below. Command-line
//! flags are applied on top by the CLI crate.
//!
//! ```json
//! {
//!   "dataExtension": "dat",
//!   "imageFormat": "svg",
//!   "densityWindowBohr": 8.0,
//!   "singularityPolicy": "nearest-finite",
//!   "occupancy": { "2p": 2.0 }
//! }
//! ```

use super::constants::{
    DEFAULT_DATA_EXTENSION, DENSITY_WINDOW_CAP_BOHR, WAVEFUNCTION_WINDOW_CAP_BOHR,
};
use super::occupancy::OccupancyTable;
use crate::domain::{ImageFormat, KsvizError, KsvizResult, OrbitalLabel, SingularityPolicy};
use crate::numerics::NumericTolerance;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct PipelineSettings {
    pub data_extension: String,
    pub image_format: ImageFormat,
    pub wavefunction_window_bohr: f64,
    pub density_window_bohr: f64,
    pub singularity_policy: SingularityPolicy,
    pub grid_tolerance: NumericTolerance,
    pub occupancy: BTreeMap<String, f64>,
}

impl Default for PipelineSettings {
    fn default() -> Self {
        Self {
            data_extension: DEFAULT_DATA_EXTENSION.to_string(),
            image_format: ImageFormat::Png,
            wavefunction_window_bohr: WAVEFUNCTION_WINDOW_CAP_BOHR,
            density_window_bohr: DENSITY_WINDOW_CAP_BOHR,
            singularity_policy: SingularityPolicy::Propagate,
            grid_tolerance: NumericTolerance::GRID,
            occupancy: BTreeMap::new(),
        }
    }
}

impl PipelineSettings {
    pub fn validate(&self) -> KsvizResult<()> {
        let extension = self.data_extension.as_str();
        if extension.is_empty()
            || extension.contains(['.', '/', '\\'])
            || extension.contains(char::is_whitespace)
        {
            return Err(KsvizError::user(
                "USER.SETTINGS_EXTENSION",
                format!(
                    "data extension '{}' must be a bare suffix such as 'dat'",
                    extension
                ),
            ));
        }

        for (name, value) in [
            ("wavefunctionWindowBohr", self.wavefunction_window_bohr),
            ("densityWindowBohr", self.density_window_bohr),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(KsvizError::range(
                    "RANGE.SETTINGS_WINDOW",
                    format!("{} must be a positive number of Bohr, got {}", name, value),
                ));
            }
        }

        let tolerance = self.grid_tolerance;
        if !(tolerance.abs_tol >= 0.0 && tolerance.rel_tol >= 0.0) {
            return Err(KsvizError::range(
                "RANGE.SETTINGS_TOLERANCE",
                "gridTolerance absTol and relTol must be non-negative",
            ));
        }

        self.occupancy_table().map(|_| ())
    }

    pub fn occupancy_table(&self) -> KsvizResult<OccupancyTable> {
        self.occupancy
            .iter()
            .try_fold(OccupancyTable::closed_shell(), |table, (label, electrons)| {
                let label = label.parse::<OrbitalLabel>()?;
                table.with_override(label, *electrons)
            })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("settings file '{}' does not exist", path.display())]
    Missing { path: PathBuf },
    #[error("failed to read settings '{}': {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse settings '{}': {source}", path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

impl From<SettingsError> for KsvizError {
    fn from(error: SettingsError) -> Self {
        let message = error.to_string();
        match error {
            SettingsError::Missing { .. } => KsvizError::not_found("NOT_FOUND.SETTINGS", message),
            SettingsError::Read { .. } => KsvizError::io_system("IO.SETTINGS_READ", message),
            SettingsError::Parse { .. } => KsvizError::format("FORMAT.SETTINGS", message),
        }
    }
}

pub fn load_pipeline_settings(
    settings_path: impl AsRef<Path>,
) -> Result<PipelineSettings, SettingsError> {
    let settings_path = settings_path.as_ref();
    if !settings_path.is_file() {
        return Err(SettingsError::Missing {
            path: settings_path.to_path_buf(),
        });
    }

    let source = fs::read_to_string(settings_path).map_err(|source| SettingsError::Read {
        path: settings_path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&source).map_err(|source| SettingsError::Parse {
        path: settings_path.to_path_buf(),
        source,
    })
}
