pub mod errors;
mod orbital;

pub use errors::{ExitStatusMapping, KsvizError, KsvizErrorCategory, KsvizResult};
pub use orbital::{LoadedOrbital, OrbitalFile, OrbitalLabel, RadialSample};

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlotMode {
    /// Every orbital of the atom, one panel each.
    All,
    /// A single orbital file.
    Single(PathBuf),
    /// Occupancy-weighted radial charge density.
    Density,
}

impl PlotMode {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Single(_) => "single",
            Self::Density => "density",
        }
    }
}

impl Display for PlotMode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageFormat {
    #[default]
    Png,
    Svg,
}

impl ImageFormat {
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Svg => "svg",
        }
    }
}

impl Display for ImageFormat {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.extension())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlotRequest {
    pub atom: String,
    pub mode: PlotMode,
    pub data_dir: PathBuf,
    pub output_dir: PathBuf,
}

impl PlotRequest {
    pub fn new(
        atom: impl Into<String>,
        mode: PlotMode,
        data_dir: impl Into<PathBuf>,
        output_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            atom: atom.into(),
            mode,
            data_dir: data_dir.into(),
            output_dir: output_dir.into(),
        }
    }
}

/// How density values at a singular point (r = 0) are reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum SingularityPolicy {
    /// Keep the raw quotient; r = 0 yields infinity or NaN and figures leave
    /// those points out of their visible series.
    #[default]
    Propagate,
    /// Replace each non-finite entry with the nearest following finite value
    /// of the same curve.
    NearestFinite,
}

impl SingularityPolicy {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Propagate => "propagate",
            Self::NearestFinite => "nearest-finite",
        }
    }
}

impl Display for SingularityPolicy {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str((*self).as_str())
    }
}

/// File produced for a figure, relative to the request's output directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlotArtifact {
    pub relative_path: PathBuf,
}

impl PlotArtifact {
    pub fn new(relative_path: impl Into<PathBuf>) -> Self {
        Self {
            relative_path: relative_path.into(),
        }
    }

    pub fn with_extension(&self, extension: &str) -> Self {
        Self {
            relative_path: self.relative_path.with_extension(extension),
        }
    }
}
