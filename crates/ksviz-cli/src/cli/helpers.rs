use super::commands::PlotArgs;
use ksviz_core::common::settings::{PipelineSettings, load_pipeline_settings};
use ksviz_core::domain::{KsvizError, KsvizResult, LoadedOrbital, OrbitalLabel, PlotMode, PlotRequest};
use tracing::{debug, warn};

/// Settings file (if any) with command-line overrides applied, validated.
pub(super) fn resolve_settings(args: &PlotArgs) -> KsvizResult<PipelineSettings> {
    let mut settings = match &args.config {
        Some(path) => {
            debug!(path = %path.display(), "loading settings");
            load_pipeline_settings(path)?
        }
        None => PipelineSettings::default(),
    };

    if let Some(extension) = &args.extension {
        settings.data_extension = extension.trim_start_matches('.').to_string();
    }
    if let Some(format) = args.format {
        settings.image_format = format.into();
    }
    if let Some(policy) = args.singularity {
        settings.singularity_policy = policy.into();
    }
    for flag in &args.occupancy {
        let (label, electrons) = parse_occupancy_flag(flag)?;
        settings.occupancy.insert(label.to_string(), electrons);
    }

    settings.validate()?;
    Ok(settings)
}

/// Parses `LABEL=ELECTRONS`, e.g. `2p=2` or `3d=5.5`.
pub(super) fn parse_occupancy_flag(flag: &str) -> KsvizResult<(OrbitalLabel, f64)> {
    let invalid = |detail: &str| {
        KsvizError::user(
            "USER.OCCUPANCY_FLAG",
            format!("--occupancy '{}': {}", flag, detail),
        )
    };

    let (label, electrons) = flag
        .split_once('=')
        .ok_or_else(|| invalid("expected LABEL=ELECTRONS"))?;
    let label = label
        .trim()
        .parse::<OrbitalLabel>()
        .map_err(|error| invalid(error.message()))?;
    let electrons = electrons
        .trim()
        .parse::<f64>()
        .map_err(|_| invalid("electron count is not a number"))?;
    Ok((label, electrons))
}

pub(super) fn warn_on_inconsistent_orbitals(request: &PlotRequest, orbitals: &[LoadedOrbital]) {
    for orbital in orbitals {
        let file = &orbital.file;
        if file.nodes() != file.expected_radial_nodes() {
            warn!(
                file = %file.file_name(),
                nodes = file.nodes(),
                expected = file.expected_radial_nodes(),
                "radial node count differs from n - l - 1"
            );
        }
        if matches!(request.mode, PlotMode::Single(_)) && file.atom() != request.atom {
            warn!(
                requested = %request.atom,
                file_atom = %file.atom(),
                "atom argument does not match the orbital file; using the file's atom"
            );
        }
    }
}
