use crate::domain::{KsvizError, KsvizResult};
use globset::{GlobBuilder, GlobMatcher};
use std::fs;
use std::path::{Path, PathBuf};

/// Lists `{atom}_n*l*.{extension}` files in `dir`, sorted by file name.
pub fn discover_orbital_files(dir: &Path, atom: &str, extension: &str) -> KsvizResult<Vec<PathBuf>> {
    validate_atom_label(atom)?;
    let matcher = orbital_file_matcher(atom, extension)?;

    if !dir.is_dir() {
        return Err(KsvizError::not_found(
            "NOT_FOUND.DATA_DIRECTORY",
            format!("data directory '{}' not found", dir.display()),
        ));
    }

    let entries = fs::read_dir(dir).map_err(|source| {
        KsvizError::io_system(
            "IO.DATA_DIRECTORY_READ",
            format!("failed to list '{}': {}", dir.display(), source),
        )
    })?;

    let mut matches = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|source| {
            KsvizError::io_system(
                "IO.DATA_DIRECTORY_READ",
                format!("failed to list '{}': {}", dir.display(), source),
            )
        })?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let Some(name) = path.file_name().and_then(|name| name.to_str()) else {
            continue;
        };
        if matcher.is_match(name) {
            matches.push(path);
        }
    }

    if matches.is_empty() {
        return Err(no_orbital_files_error(atom));
    }

    matches.sort_by(|left, right| left.file_name().cmp(&right.file_name()));
    Ok(matches)
}

pub fn no_orbital_files_error(atom: &str) -> KsvizError {
    KsvizError::user(
        "USER.NO_ORBITAL_FILES",
        format!("no orbital files found for atom {}", atom),
    )
}

pub fn validate_atom_label(atom: &str) -> KsvizResult<()> {
    if atom.is_empty() {
        return Err(KsvizError::user("USER.ATOM_LABEL", "atom label is empty"));
    }
    if atom.contains(['_', '/', '\\']) {
        return Err(KsvizError::user(
            "USER.ATOM_LABEL",
            format!(
                "atom label '{}' must not contain underscores or path separators",
                atom
            ),
        ));
    }
    Ok(())
}

fn orbital_file_matcher(atom: &str, extension: &str) -> KsvizResult<GlobMatcher> {
    let pattern = format!(
        "{}_n*l*.{}",
        escape_glob_literal(atom),
        escape_glob_literal(extension)
    );
    GlobBuilder::new(&pattern)
        .literal_separator(true)
        .build()
        .map(|glob| glob.compile_matcher())
        .map_err(|source| {
            KsvizError::internal(
                "INTERNAL.DISCOVERY_GLOB",
                format!("invalid discovery pattern '{}': {}", pattern, source),
            )
        })
}

fn escape_glob_literal(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for character in text.chars() {
        if matches!(character, '*' | '?' | '[' | ']' | '{' | '}') {
            escaped.push('[');
            escaped.push(character);
            escaped.push(']');
        } else {
            escaped.push(character);
        }
    }
    escaped
}
