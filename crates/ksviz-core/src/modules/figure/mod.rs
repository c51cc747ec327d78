mod model;

pub use model::{AxisScale, Figure, PlotPanel, PlotSeries, StyleHint};

use super::density::DensityProfile;
use super::discovery::no_orbital_files_error;
use crate::common::constants::{DENSITY_AXIS_LABEL, RADIAL_AXIS_LABEL, WAVEFUNCTION_AXIS_LABEL};
use crate::domain::{ImageFormat, KsvizResult, LoadedOrbital, PlotArtifact};

pub const TOTAL_SERIES_LABEL: &str = "Total";

pub fn x_window(cap: f64, last_r: f64) -> (f64, f64) {
    (0.0, cap.min(last_r))
}

pub fn wavefunction_artifact(atom: &str, orbital_label: &str, format: ImageFormat) -> PlotArtifact {
    PlotArtifact::new(format!(
        "{}_{}_wavefunction.{}",
        atom,
        orbital_label,
        format.extension()
    ))
}

pub fn all_wavefunctions_artifact(atom: &str, format: ImageFormat) -> PlotArtifact {
    PlotArtifact::new(format!("{}_all_wavefunctions.{}", atom, format.extension()))
}

pub fn density_artifact(atom: &str, format: ImageFormat) -> PlotArtifact {
    PlotArtifact::new(format!("{}_charge_density.{}", atom, format.extension()))
}

/// Single orbital, one panel with a legend entry `{atom} {label}`.
pub fn wavefunction_figure(orbital: &LoadedOrbital, cap: f64, format: ImageFormat) -> Figure {
    let atom = orbital.file.atom();
    let label = orbital.label().to_string();
    let title = format!("{} Atom - {} Orbital Wavefunction", atom, label);
    let sample = &orbital.sample;

    let panel = PlotPanel {
        title: title.clone(),
        x_label: RADIAL_AXIS_LABEL.to_string(),
        y_label: WAVEFUNCTION_AXIS_LABEL.to_string(),
        series: vec![PlotSeries::new(
            format!("{} {}", atom, label),
            sample.r(),
            sample.u().to_vec(),
            StyleHint::Curve { palette_index: 0 },
        )],
        x_window: x_window(cap, sample.grid().last()),
        y_scale: AxisScale::Linear,
        show_legend: true,
        zero_line: false,
    };

    Figure {
        title,
        artifact: wavefunction_artifact(atom, &label, format),
        panels: vec![panel],
    }
}

/// One stacked panel per orbital, in input order.
pub fn all_wavefunctions_figure(
    atom: &str,
    orbitals: &[LoadedOrbital],
    cap: f64,
    format: ImageFormat,
) -> KsvizResult<Figure> {
    if orbitals.is_empty() {
        return Err(no_orbital_files_error(atom));
    }

    let panels = orbitals
        .iter()
        .enumerate()
        .map(|(index, orbital)| {
            let label = orbital.label().to_string();
            let sample = &orbital.sample;
            PlotPanel {
                title: format!("{} orbital", label),
                x_label: RADIAL_AXIS_LABEL.to_string(),
                y_label: WAVEFUNCTION_AXIS_LABEL.to_string(),
                series: vec![PlotSeries::new(
                    label,
                    sample.r(),
                    sample.u().to_vec(),
                    StyleHint::Curve {
                        palette_index: index,
                    },
                )],
                x_window: x_window(cap, sample.grid().last()),
                y_scale: AxisScale::Linear,
                show_legend: false,
                zero_line: true,
            }
        })
        .collect();

    Ok(Figure {
        title: format!("{} Atom - All Orbital Wavefunctions", atom),
        artifact: all_wavefunctions_artifact(atom, format),
        panels,
    })
}

/// Orbital contributions followed by the emphasised total, log y axis.
pub fn density_figure(profile: &DensityProfile, cap: f64, format: ImageFormat) -> Figure {
    let r = profile.r();
    let mut series: Vec<PlotSeries> = profile
        .orbitals
        .iter()
        .enumerate()
        .map(|(index, curve)| {
            PlotSeries::new(
                curve.label.to_string(),
                r,
                curve.values.clone(),
                StyleHint::Curve {
                    palette_index: index,
                },
            )
        })
        .collect();
    series.push(PlotSeries::new(
        TOTAL_SERIES_LABEL,
        r,
        profile.total.clone(),
        StyleHint::Emphasis,
    ));

    let title = format!("{} Atom - Radial Charge Density", profile.atom);
    let panel = PlotPanel {
        title: title.clone(),
        x_label: RADIAL_AXIS_LABEL.to_string(),
        y_label: DENSITY_AXIS_LABEL.to_string(),
        series,
        x_window: x_window(cap, profile.grid.last()),
        y_scale: AxisScale::Log,
        show_legend: true,
        zero_line: false,
    };

    Figure {
        title,
        artifact: density_artifact(&profile.atom, format),
        panels: vec![panel],
    }
}
