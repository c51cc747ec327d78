//! Quantum numbers encoded in solver output file names.
//!
//! Grammar: `{atom}_n{n}l{l}_nodes{nodes}.{ext}` where `{atom}` contains no
//! underscore and `n`, `l` are single decimal digits.

use crate::domain::{KsvizError, KsvizResult, OrbitalFile, OrbitalLabel};
use std::path::Path;

const NODES_PREFIX: &str = "nodes";

pub fn parse_orbital_file_name(name: &str) -> KsvizResult<OrbitalFile> {
    let segments: Vec<&str> = name.split('_').collect();
    if segments.len() < 3 {
        return Err(name_error(
            name,
            format!(
                "expected 3 underscore-separated segments, found {}",
                segments.len()
            ),
        ));
    }
    if segments.len() > 3 {
        return Err(name_error(
            name,
            "atom label and node segment must not contain underscores",
        ));
    }

    let atom = segments[0];
    if atom.is_empty() {
        return Err(name_error(name, "atom label is empty"));
    }

    let (n, l) = parse_quantum_segment(name, segments[1])?;
    let label = OrbitalLabel::new(n, l).map_err(|source| name_error(name, source.message()))?;
    let (nodes, extension) = parse_nodes_segment(name, segments[2])?;

    Ok(OrbitalFile::new(atom, label, nodes, extension))
}

impl OrbitalFile {
    /// Parses the base name of `path`; directories are ignored.
    pub fn from_path(path: &Path) -> KsvizResult<Self> {
        let name = path
            .file_name()
            .and_then(|name| name.to_str())
            .ok_or_else(|| {
                KsvizError::format(
                    "FORMAT.ORBITAL_FILE_NAME",
                    format!("'{}' has no UTF-8 file name", path.display()),
                )
            })?;
        parse_orbital_file_name(name)
    }
}

fn parse_quantum_segment(name: &str, segment: &str) -> KsvizResult<(u8, u8)> {
    let bytes = segment.as_bytes();
    if bytes.len() != 4 || bytes[0] != b'n' || bytes[2] != b'l' {
        return Err(name_error(
            name,
            format!("quantum-number segment '{}' must look like 'n2l1'", segment),
        ));
    }

    let n = decimal_digit(bytes[1])
        .ok_or_else(|| name_error(name, format!("n in '{}' is not a decimal digit", segment)))?;
    let l = decimal_digit(bytes[3])
        .ok_or_else(|| name_error(name, format!("l in '{}' is not a decimal digit", segment)))?;
    Ok((n, l))
}

fn parse_nodes_segment(name: &str, segment: &str) -> KsvizResult<(u32, String)> {
    let rest = segment.strip_prefix(NODES_PREFIX).ok_or_else(|| {
        name_error(
            name,
            format!("node segment '{}' must start with '{}'", segment, NODES_PREFIX),
        )
    })?;

    let (digits, extension) = rest.split_once('.').ok_or_else(|| {
        name_error(name, format!("node segment '{}' has no extension", segment))
    })?;
    if extension.is_empty() {
        return Err(name_error(name, "extension is empty"));
    }
    if digits.is_empty() || !digits.bytes().all(|byte| byte.is_ascii_digit()) {
        return Err(name_error(
            name,
            format!("node count '{}' is not a decimal integer", digits),
        ));
    }

    let nodes = digits
        .parse::<u32>()
        .map_err(|source| name_error(name, format!("node count '{}': {}", digits, source)))?;
    Ok((nodes, extension.to_string()))
}

fn decimal_digit(byte: u8) -> Option<u8> {
    byte.is_ascii_digit().then(|| byte - b'0')
}

fn name_error(name: &str, message: impl AsRef<str>) -> KsvizError {
    KsvizError::format(
        "FORMAT.ORBITAL_FILE_NAME",
        format!("orbital file name '{}': {}", name, message.as_ref()),
    )
}
