use super::CliError;
use ksviz_core::domain::{ImageFormat, PlotMode, SingularityPolicy};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub(super) enum PlotModeArg {
    /// Every orbital of the atom, one panel each
    #[value(alias = "plot-all")]
    All,
    /// One orbital file, given as FILE
    #[value(alias = "plot-single")]
    Single,
    /// Occupancy-weighted radial charge density
    #[value(alias = "plot-density")]
    Density,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub(super) enum ImageFormatArg {
    Png,
    Svg,
}

impl From<ImageFormatArg> for ImageFormat {
    fn from(value: ImageFormatArg) -> Self {
        match value {
            ImageFormatArg::Png => Self::Png,
            ImageFormatArg::Svg => Self::Svg,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub(super) enum SingularityArg {
    /// Keep infinite or NaN values at r = 0
    Propagate,
    /// Replace them with the nearest finite value
    NearestFinite,
}

impl From<SingularityArg> for SingularityPolicy {
    fn from(value: SingularityArg) -> Self {
        match value {
            SingularityArg::Propagate => Self::Propagate,
            SingularityArg::NearestFinite => Self::NearestFinite,
        }
    }
}

/// Combines the positional mode and FILE into a [`PlotMode`].
pub(super) fn resolve_plot_mode(
    mode: PlotModeArg,
    file: Option<PathBuf>,
) -> Result<PlotMode, CliError> {
    match (mode, file) {
        (PlotModeArg::Single, Some(file)) => Ok(PlotMode::Single(file)),
        (PlotModeArg::Single, None) => Err(CliError::Usage(
            "mode 'single' requires an orbital FILE".to_string(),
        )),
        (PlotModeArg::All, None) => Ok(PlotMode::All),
        (PlotModeArg::Density, None) => Ok(PlotMode::Density),
        (other, Some(file)) => Err(CliError::Usage(format!(
            "unexpected FILE '{}' for mode '{}'; only 'single' takes a file",
            file.display(),
            mode_name(other)
        ))),
    }
}

fn mode_name(mode: PlotModeArg) -> &'static str {
    match mode {
        PlotModeArg::All => "all",
        PlotModeArg::Single => "single",
        PlotModeArg::Density => "density",
    }
}
