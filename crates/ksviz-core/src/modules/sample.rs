use crate::domain::{KsvizError, KsvizResult, LoadedOrbital, OrbitalFile, RadialSample};
use std::fs;
use std::path::Path;

const COMMENT_PREFIX: char = '#';

/// Reads the `(r, u)` columns of one orbital table.
pub fn load_radial_sample(path: &Path) -> KsvizResult<RadialSample> {
    if !path.exists() {
        return Err(KsvizError::not_found(
            "NOT_FOUND.ORBITAL_SAMPLE",
            format!("orbital file '{}' not found", path.display()),
        ));
    }

    let source = fs::read_to_string(path).map_err(|source| {
        KsvizError::io_system(
            "IO.ORBITAL_SAMPLE_READ",
            format!("failed to read orbital file '{}': {}", path.display(), source),
        )
    })?;

    parse_radial_table(&source).map_err(|error| {
        KsvizError::format(
            error.code(),
            format!("{}: {}", path.display(), error.message()),
        )
    })
}

/// Parses the file name of `path` and loads its samples.
pub fn load_orbital(path: &Path) -> KsvizResult<LoadedOrbital> {
    let file = OrbitalFile::from_path(path)?;
    let sample = load_radial_sample(path)?;
    Ok(LoadedOrbital::new(file, sample))
}

pub fn parse_radial_table(source: &str) -> KsvizResult<RadialSample> {
    let mut r = Vec::new();
    let mut u = Vec::new();

    for (index, line) in source.lines().enumerate() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with(COMMENT_PREFIX) {
            continue;
        }

        let line_number = index + 1;
        let values = trimmed
            .split_whitespace()
            .map(|token| {
                parse_numeric_token(token).ok_or_else(|| {
                    table_error(format!(
                        "line {}: '{}' is not a number",
                        line_number, token
                    ))
                })
            })
            .collect::<KsvizResult<Vec<f64>>>()?;

        if values.len() < 2 {
            return Err(table_error(format!(
                "line {}: expected at least 2 columns, found {}",
                line_number,
                values.len()
            )));
        }

        r.push(values[0]);
        u.push(values[1]);
    }

    if r.is_empty() {
        return Err(table_error("table has no data rows"));
    }

    RadialSample::new(r, u)
}

fn parse_numeric_token(token: &str) -> Option<f64> {
    let normalized = token.replace(['D', 'd'], "E");
    normalized.parse::<f64>().ok()
}

fn table_error(message: impl Into<String>) -> KsvizError {
    KsvizError::format("FORMAT.ORBITAL_SAMPLE", message)
}
