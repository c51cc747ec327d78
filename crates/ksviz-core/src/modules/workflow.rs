use super::density::{DensityAggregator, DensityProfile};
use super::discovery::discover_orbital_files;
use super::figure::{Figure, all_wavefunctions_figure, density_figure, wavefunction_figure};
use super::sample::load_orbital;
use super::traits::FigureRenderer;
use crate::common::settings::PipelineSettings;
use crate::domain::{KsvizError, KsvizResult, LoadedOrbital, PlotArtifact, PlotMode, PlotRequest};
use std::fs;
use std::path::{Path, PathBuf};

pub const DATA_EXPORT_EXTENSION: &str = "txt";

/// A figure ready to render, with the data it was built from.
#[derive(Debug, Clone, PartialEq)]
pub struct PreparedFigure {
    pub figure: Figure,
    pub orbitals: Vec<LoadedOrbital>,
    pub density: Option<DensityProfile>,
}

impl PreparedFigure {
    pub fn artifact(&self) -> &PlotArtifact {
        &self.figure.artifact
    }

    pub fn output_path(&self, output_dir: &Path) -> PathBuf {
        output_dir.join(&self.figure.artifact.relative_path)
    }

    pub fn data_export_path(&self, output_dir: &Path) -> PathBuf {
        output_dir.join(
            self.figure
                .artifact
                .with_extension(DATA_EXPORT_EXTENSION)
                .relative_path,
        )
    }
}

/// Discovers and loads every orbital of `atom`, in discovery order.
pub fn load_atom_orbitals(
    data_dir: &Path,
    atom: &str,
    extension: &str,
) -> KsvizResult<Vec<LoadedOrbital>> {
    discover_orbital_files(data_dir, atom, extension)?
        .iter()
        .map(|path| load_orbital(path))
        .collect()
}

/// Relative single-mode paths are looked up in the data directory.
pub fn resolve_single_path(data_dir: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        data_dir.join(path)
    }
}

pub fn prepare_figure(
    request: &PlotRequest,
    settings: &PipelineSettings,
) -> KsvizResult<PreparedFigure> {
    settings.validate()?;
    let format = settings.image_format;

    match &request.mode {
        PlotMode::All => {
            let orbitals = load_atom_orbitals(
                &request.data_dir,
                &request.atom,
                &settings.data_extension,
            )?;
            let figure = all_wavefunctions_figure(
                &request.atom,
                &orbitals,
                settings.wavefunction_window_bohr,
                format,
            )?;
            Ok(PreparedFigure {
                figure,
                orbitals,
                density: None,
            })
        }
        PlotMode::Single(path) => {
            let orbital = load_orbital(&resolve_single_path(&request.data_dir, path))?;
            let figure = wavefunction_figure(&orbital, settings.wavefunction_window_bohr, format);
            Ok(PreparedFigure {
                figure,
                orbitals: vec![orbital],
                density: None,
            })
        }
        PlotMode::Density => {
            let orbitals = load_atom_orbitals(
                &request.data_dir,
                &request.atom,
                &settings.data_extension,
            )?;
            let occupancy = settings.occupancy_table()?;
            let profile = DensityAggregator::new(&occupancy)
                .with_policy(settings.singularity_policy)
                .with_grid_tolerance(settings.grid_tolerance)
                .aggregate(&request.atom, &orbitals)?;
            let figure = density_figure(&profile, settings.density_window_bohr, format);
            Ok(PreparedFigure {
                figure,
                orbitals,
                density: Some(profile),
            })
        }
    }
}

/// Creates `output_dir` and hands the figure to `renderer`.
pub fn render_prepared(
    prepared: &PreparedFigure,
    output_dir: &Path,
    renderer: &dyn FigureRenderer,
) -> KsvizResult<PathBuf> {
    ensure_output_directory(output_dir)?;
    let output_path = prepared.output_path(output_dir);
    renderer.render(&prepared.figure, &output_path)?;
    Ok(output_path)
}

/// Writes [`Figure::to_table`] next to the image as `{stem}.txt`.
pub fn export_prepared_data(prepared: &PreparedFigure, output_dir: &Path) -> KsvizResult<PathBuf> {
    ensure_output_directory(output_dir)?;
    let export_path = prepared.data_export_path(output_dir);
    fs::write(&export_path, prepared.figure.to_table()).map_err(|source| {
        KsvizError::io_system(
            "IO.DATA_EXPORT",
            format!("failed to write '{}': {}", export_path.display(), source),
        )
    })?;
    Ok(export_path)
}

fn ensure_output_directory(output_dir: &Path) -> KsvizResult<()> {
    fs::create_dir_all(output_dir).map_err(|source| {
        KsvizError::io_system(
            "IO.OUTPUT_DIRECTORY",
            format!(
                "failed to create output directory '{}': {}",
                output_dir.display(),
                source
            ),
        )
    })
}

#[cfg(test)]
mod tests {
    use super::{
        PreparedFigure, export_prepared_data, load_atom_orbitals, prepare_figure, render_prepared,
        resolve_single_path,
    };
    use crate::common::settings::PipelineSettings;
    use crate::domain::{
        ImageFormat, KsvizErrorCategory, KsvizResult, PlotMode, PlotRequest, SingularityPolicy,
    };
    use crate::modules::figure::Figure;
    use crate::modules::traits::FigureRenderer;
    use std::cell::RefCell;
    use std::fs;
    use std::path::{Path, PathBuf};
    use tempfile::TempDir;

    #[derive(Default)]
    struct RecordingRenderer {
        calls: RefCell<Vec<(String, PathBuf)>>,
    }

    impl FigureRenderer for RecordingRenderer {
        fn render(&self, figure: &Figure, output_path: &Path) -> KsvizResult<()> {
            self.calls
                .borrow_mut()
                .push((figure.title.clone(), output_path.to_path_buf()));
            Ok(())
        }
    }

    fn stage_carbon(dir: &Path) {
        let grid = "0.0 0.0\n0.5 0.3\n1.0 0.2\n2.0 0.05\n";
        let shifted = "0.0 0.0\n0.5 -0.1\n1.0 0.25\n2.0 0.1\n";
        fs::write(dir.join("C_n1l0_nodes0.dat"), grid).expect("1s should be written");
        fs::write(dir.join("C_n2l0_nodes1.dat"), shifted).expect("2s should be written");
        fs::write(dir.join("C_n2l1_nodes0.dat"), grid).expect("2p should be written");
    }

    fn prepare(dir: &Path, mode: PlotMode, settings: &PipelineSettings) -> KsvizResult<PreparedFigure> {
        let request = PlotRequest::new("C", mode, dir, dir.join("out"));
        prepare_figure(&request, settings)
    }

    #[test]
    fn all_mode_loads_orbitals_in_file_name_order() {
        let temp = TempDir::new().expect("tempdir should be created");
        stage_carbon(temp.path());

        let prepared = prepare(temp.path(), PlotMode::All, &PipelineSettings::default())
            .expect("all mode should prepare");
        let labels: Vec<String> = prepared
            .orbitals
            .iter()
            .map(|orbital| orbital.label().to_string())
            .collect();
        assert_eq!(labels, ["1s", "2s", "2p"]);
        assert_eq!(prepared.figure.panels.len(), 3);
        assert!(prepared.density.is_none());
        assert_eq!(
            prepared.artifact().relative_path,
            Path::new("C_all_wavefunctions.png")
        );
    }

    #[test]
    fn single_mode_resolves_relative_paths_against_data_dir() {
        let temp = TempDir::new().expect("tempdir should be created");
        stage_carbon(temp.path());

        let prepared = prepare(
            temp.path(),
            PlotMode::Single(PathBuf::from("C_n2l1_nodes0.dat")),
            &PipelineSettings::default(),
        )
        .expect("single mode should prepare");
        assert_eq!(prepared.orbitals.len(), 1);
        assert_eq!(
            prepared.artifact().relative_path,
            Path::new("C_2p_wavefunction.png")
        );

        let absolute = temp.path().join("C_n1l0_nodes0.dat");
        assert_eq!(resolve_single_path(Path::new("elsewhere"), &absolute), absolute);
    }

    #[test]
    fn single_mode_missing_file_is_not_found() {
        let temp = TempDir::new().expect("tempdir should be created");
        let error = prepare(
            temp.path(),
            PlotMode::Single(PathBuf::from("C_n9l0_nodes8.dat")),
            &PipelineSettings::default(),
        )
        .expect_err("missing file should fail");
        assert_eq!(error.category(), KsvizErrorCategory::NotFoundError);
    }

    #[test]
    fn density_mode_applies_settings() {
        let temp = TempDir::new().expect("tempdir should be created");
        stage_carbon(temp.path());

        let mut settings = PipelineSettings::default();
        settings.singularity_policy = SingularityPolicy::NearestFinite;
        settings.image_format = ImageFormat::Svg;
        settings.occupancy.insert("2p".to_string(), 2.0);

        let prepared =
            prepare(temp.path(), PlotMode::Density, &settings).expect("density should prepare");
        let profile = prepared.density.as_ref().expect("density profile should be kept");
        assert_eq!(profile.electron_count(), 6.0);
        assert_eq!(profile.policy, SingularityPolicy::NearestFinite);
        assert!(profile.singular_points().is_empty());
        assert_eq!(
            prepared.artifact().relative_path,
            Path::new("C_charge_density.svg")
        );
    }

    #[test]
    fn invalid_settings_are_rejected_before_io() {
        let mut settings = PipelineSettings::default();
        settings.density_window_bohr = -1.0;
        let error = prepare(Path::new("does-not-exist"), PlotMode::Density, &settings)
            .expect_err("negative window should fail");
        assert_eq!(error.category(), KsvizErrorCategory::RangeError);
    }

    #[test]
    fn render_and_export_write_under_output_dir() {
        let temp = TempDir::new().expect("tempdir should be created");
        stage_carbon(temp.path());
        let output_dir = temp.path().join("nested").join("out");

        let prepared = prepare(temp.path(), PlotMode::Density, &PipelineSettings::default())
            .expect("density should prepare");
        let renderer = RecordingRenderer::default();
        let written = render_prepared(&prepared, &output_dir, &renderer)
            .expect("render should succeed");
        assert_eq!(written, output_dir.join("C_charge_density.png"));
        assert!(output_dir.is_dir());
        assert_eq!(
            *renderer.calls.borrow(),
            vec![("C Atom - Radial Charge Density".to_string(), written.clone())]
        );

        let exported = export_prepared_data(&prepared, &output_dir).expect("export should succeed");
        assert_eq!(exported, output_dir.join("C_charge_density.txt"));
        let table = fs::read_to_string(&exported).expect("export should be readable");
        assert!(table.lines().any(|line| line == "r 1s 2s 2p Total"));
    }

    #[test]
    fn load_atom_orbitals_propagates_format_errors() {
        let temp = TempDir::new().expect("tempdir should be created");
        fs::write(temp.path().join("C_n1l0_nodes0.dat"), "0.1 oops\n")
            .expect("file should be written");
        let error = load_atom_orbitals(temp.path(), "C", "dat").expect_err("bad table");
        assert_eq!(error.category(), KsvizErrorCategory::FormatError);
    }
}
