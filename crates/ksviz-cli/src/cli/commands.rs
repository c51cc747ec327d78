use super::CliError;
use super::dispatch::{ImageFormatArg, SingularityArg};
use super::helpers::*;
use super::render::PlottersRenderer;
use ksviz_core::domain::{PlotMode, PlotRequest};
use ksviz_core::modules::workflow::{export_prepared_data, prepare_figure, render_prepared};
use std::path::PathBuf;
use tracing::{info, warn};

#[derive(clap::Args, Debug)]
pub(super) struct PlotArgs {
    /// Directory holding the orbital tables
    #[arg(long, default_value = ".")]
    pub(super) data_dir: PathBuf,

    /// Directory receiving images and data exports
    #[arg(long, default_value = ".")]
    pub(super) output_dir: PathBuf,

    /// JSON settings file; flags below override its values
    #[arg(long, value_name = "JSON")]
    pub(super) config: Option<PathBuf>,

    /// Orbital table extension without the dot [default: dat]
    #[arg(long)]
    pub(super) extension: Option<String>,

    /// Image format [default: png]
    #[arg(long, value_enum)]
    pub(super) format: Option<ImageFormatArg>,

    /// Handling of the r = 0 density singularity [default: propagate]
    #[arg(long, value_enum)]
    pub(super) singularity: Option<SingularityArg>,

    /// Override the electron count of one orbital, e.g. 2p=2 (repeatable)
    #[arg(long = "occupancy", value_name = "LABEL=ELECTRONS")]
    pub(super) occupancy: Vec<String>,

    /// Write the plotted series as `<image stem>.txt`
    #[arg(long)]
    pub(super) export_data: bool,

    /// Skip drawing the image
    #[arg(long)]
    pub(super) no_render: bool,

    /// Log progress to stderr (KSVIZ_LOG takes precedence)
    #[arg(short, long)]
    pub(super) verbose: bool,
}

pub(super) fn run_plot_command(
    atom: String,
    mode: PlotMode,
    args: &PlotArgs,
) -> Result<i32, CliError> {
    let settings = resolve_settings(args)?;
    let request = PlotRequest::new(atom, mode, &args.data_dir, &args.output_dir);
    info!(
        atom = %request.atom,
        mode = %request.mode,
        data_dir = %request.data_dir.display(),
        "preparing figure"
    );

    let prepared = prepare_figure(&request, &settings)?;
    if !matches!(request.mode, PlotMode::Single(_)) {
        println!(
            "Found {} wavefunction files for {}",
            prepared.orbitals.len(),
            request.atom
        );
    }
    warn_on_inconsistent_orbitals(&request, &prepared.orbitals);

    if let Some(profile) = &prepared.density {
        let singular = profile.singular_points();
        if !singular.is_empty() {
            warn!(
                points = singular.len(),
                policy = %profile.policy,
                "total density is not finite at some radii; those points are not drawn"
            );
        }
        info!(electrons = profile.electron_count(), "aggregated density");
    }

    if args.export_data {
        let path = export_prepared_data(&prepared, &request.output_dir)?;
        println!("Saved: {}", path.display());
    }

    if args.no_render {
        info!(artifact = %prepared.artifact().relative_path.display(), "rendering skipped");
    } else {
        let renderer = PlottersRenderer::default();
        let path = render_prepared(&prepared, &request.output_dir, &renderer)?;
        println!("Saved: {}", path.display());
    }

    Ok(0)
}
