mod commands;
mod dispatch;
mod helpers;
mod render;

use anyhow::anyhow;
use clap::{CommandFactory, Parser};
use dispatch::{PlotModeArg, resolve_plot_mode};
use ksviz_core::domain::KsvizError;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

pub const LOG_ENV_VAR: &str = "KSVIZ_LOG";

pub fn run_from_env() -> i32 {
    let args: Vec<String> = std::env::args().collect();
    match parse_and_dispatch(args) {
        Ok(code) => code,
        Err(error) => {
            let error = error.as_ksviz_error();
            eprintln!("{}", error.diagnostic_line());
            error.exit_code()
        }
    }
}

fn parse_and_dispatch(args: Vec<String>) -> Result<i32, CliError> {
    let cli = match Cli::try_parse_from(&args) {
        Ok(cli) => cli,
        Err(err) => {
            return match err.kind() {
                clap::error::ErrorKind::DisplayHelp | clap::error::ErrorKind::DisplayVersion => {
                    print!("{}", err);
                    Ok(0)
                }
                _ => Err(CliError::Usage(err.to_string())),
            };
        }
    };

    init_tracing(cli.plot.verbose)?;
    let mode = resolve_plot_mode(cli.mode, cli.file).map_err(with_usage)?;
    commands::run_plot_command(cli.atom, mode, &cli.plot)
}

fn init_tracing(verbose: bool) -> anyhow::Result<()> {
    let default_directive = if verbose { "info" } else { "warn" };
    let filter = EnvFilter::try_from_env(LOG_ENV_VAR)
        .unwrap_or_else(|_| EnvFilter::new(default_directive));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|error| anyhow!("failed to install log subscriber: {}", error))
}

fn with_usage(error: CliError) -> CliError {
    match error {
        CliError::Usage(message) => {
            CliError::Usage(format!("{}\n\n{}", message, Cli::command().render_usage()))
        }
        other => other,
    }
}

#[derive(Parser)]
#[command(
    name = "ksviz",
    version,
    about = "Plot radial wavefunctions and charge densities from Kohn-Sham solver output"
)]
struct Cli {
    /// Atom label used as the file-name prefix, e.g. C
    #[arg(value_name = "ATOM")]
    atom: String,

    /// What to plot
    #[arg(value_enum, value_name = "MODE", default_value = "all")]
    mode: PlotModeArg,

    /// Orbital table for the `single` mode, e.g. C_n2l1_nodes0.dat
    #[arg(value_name = "FILE")]
    file: Option<PathBuf>,

    #[command(flatten)]
    plot: commands::PlotArgs,
}

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("{0}")]
    Usage(String),
    #[error("{0}")]
    Compute(KsvizError),
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl From<KsvizError> for CliError {
    fn from(error: KsvizError) -> Self {
        Self::Compute(error)
    }
}

impl CliError {
    fn as_ksviz_error(&self) -> KsvizError {
        match self {
            Self::Usage(message) => KsvizError::user("USER.CLI_USAGE", message.clone()),
            Self::Compute(error) => error.clone(),
            Self::Internal(error) => KsvizError::internal("INTERNAL.CLI", format!("{error:#}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Cli, CliError};
    use crate::cli::dispatch::PlotModeArg;
    use clap::Parser;
    use ksviz_core::domain::{KsvizError, KsvizErrorCategory};

    #[test]
    fn mode_defaults_to_all_and_accepts_aliases() {
        let cli = Cli::try_parse_from(["ksviz", "C"]).expect("atom alone should parse");
        assert_eq!(cli.mode, PlotModeArg::All);

        let cli = Cli::try_parse_from(["ksviz", "C", "plot-density", "--no-render"])
            .expect("alias should parse");
        assert_eq!(cli.mode, PlotModeArg::Density);
        assert!(cli.plot.no_render);
    }

    #[test]
    fn unknown_mode_is_a_parse_error() {
        assert!(Cli::try_parse_from(["ksviz", "C", "spectrum"]).is_err());
        assert!(Cli::try_parse_from(["ksviz"]).is_err());
    }

    #[test]
    fn cli_errors_map_to_exit_codes() {
        let usage = CliError::Usage("bad".to_string()).as_ksviz_error();
        assert_eq!(usage.category(), KsvizErrorCategory::UserError);
        assert_eq!(usage.code(), "USER.CLI_USAGE");

        let compute = CliError::from(KsvizError::not_found("NOT_FOUND.ORBITAL_SAMPLE", "gone"));
        assert_eq!(compute.as_ksviz_error().exit_code(), 3);

        let internal = CliError::from(anyhow::anyhow!("boom")).as_ksviz_error();
        assert_eq!(internal.exit_code(), 7);
    }
}
