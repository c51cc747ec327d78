use super::errors::{KsvizError, KsvizResult};
use crate::common::spectroscopic::{
    MAX_ANGULAR_MOMENTUM, angular_momentum_for_letter, spectroscopic_letter,
};
use crate::numerics::RadialGrid;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Spectroscopic name of a bound orbital, e.g. `2p`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct OrbitalLabel {
    n: u8,
    l: u8,
}

impl OrbitalLabel {
    pub fn new(n: u8, l: u8) -> KsvizResult<Self> {
        if n == 0 {
            return Err(KsvizError::format(
                "FORMAT.ORBITAL_LABEL",
                "principal quantum number n must be positive",
            ));
        }
        if l > MAX_ANGULAR_MOMENTUM {
            return Err(KsvizError::format(
                "FORMAT.ORBITAL_LABEL",
                format!(
                    "angular momentum l={} has no spectroscopic letter (supported 0..={})",
                    l, MAX_ANGULAR_MOMENTUM
                ),
            ));
        }
        Ok(Self { n, l })
    }

    pub const fn n(&self) -> u8 {
        self.n
    }

    pub const fn l(&self) -> u8 {
        self.l
    }

    pub fn letter(&self) -> char {
        spectroscopic_letter(self.l).unwrap_or('?')
    }
}

impl Display for OrbitalLabel {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.n, self.letter())
    }
}

impl FromStr for OrbitalLabel {
    type Err = KsvizError;

    fn from_str(source: &str) -> Result<Self, Self::Err> {
        let trimmed = source.trim();
        let invalid = || {
            KsvizError::format(
                "FORMAT.ORBITAL_LABEL",
                format!("'{}' is not an orbital label like '1s' or '3d'", trimmed),
            )
        };

        let letter = trimmed.chars().last().ok_or_else(invalid)?;
        let digits = &trimmed[..trimmed.len() - letter.len_utf8()];
        if digits.is_empty() || !digits.chars().all(|character| character.is_ascii_digit()) {
            return Err(invalid());
        }
        let n = digits.parse::<u8>().map_err(|_| invalid())?;
        let l = angular_momentum_for_letter(letter).ok_or_else(invalid)?;
        Self::new(n, l)
    }
}

/// Identity of one solver output file, recovered from its name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrbitalFile {
    atom: String,
    label: OrbitalLabel,
    nodes: u32,
    extension: String,
}

impl OrbitalFile {
    pub(crate) fn new(
        atom: impl Into<String>,
        label: OrbitalLabel,
        nodes: u32,
        extension: impl Into<String>,
    ) -> Self {
        Self {
            atom: atom.into(),
            label,
            nodes,
            extension: extension.into(),
        }
    }

    pub fn atom(&self) -> &str {
        &self.atom
    }

    pub const fn n(&self) -> u8 {
        self.label.n()
    }

    pub const fn l(&self) -> u8 {
        self.label.l()
    }

    pub const fn label(&self) -> OrbitalLabel {
        self.label
    }

    pub const fn nodes(&self) -> u32 {
        self.nodes
    }

    pub fn extension(&self) -> &str {
        &self.extension
    }

    /// Radial node count of a hydrogen-like `(n, l)` state.
    pub const fn expected_radial_nodes(&self) -> u32 {
        (self.label.n() as u32).saturating_sub(self.label.l() as u32 + 1)
    }

    pub fn file_name(&self) -> String {
        format!(
            "{}_n{}l{}_nodes{}.{}",
            self.atom,
            self.label.n(),
            self.label.l(),
            self.nodes,
            self.extension
        )
    }
}

/// Radial samples `(r, u(r))` of one orbital on a validated grid.
#[derive(Debug, Clone, PartialEq)]
pub struct RadialSample {
    grid: RadialGrid,
    u: Vec<f64>,
}

impl RadialSample {
    pub fn new(r: Vec<f64>, u: Vec<f64>) -> KsvizResult<Self> {
        if r.len() != u.len() {
            return Err(KsvizError::format(
                "FORMAT.RADIAL_SAMPLE",
                format!(
                    "radial sample has {} r values but {} u values",
                    r.len(),
                    u.len()
                ),
            ));
        }
        if let Some((index, value)) = u
            .iter()
            .copied()
            .enumerate()
            .find(|(_, value)| !value.is_finite())
        {
            return Err(KsvizError::format(
                "FORMAT.RADIAL_SAMPLE",
                format!("u(r) at row {} is not finite ({})", index + 1, value),
            ));
        }

        let grid = RadialGrid::new(r).map_err(|source| {
            KsvizError::format("FORMAT.RADIAL_SAMPLE", source.to_string())
        })?;
        Ok(Self { grid, u })
    }

    pub fn grid(&self) -> &RadialGrid {
        &self.grid
    }

    pub fn r(&self) -> &[f64] {
        self.grid.points()
    }

    pub fn u(&self) -> &[f64] {
        &self.u
    }

    pub fn len(&self) -> usize {
        self.u.len()
    }

    pub fn is_empty(&self) -> bool {
        self.u.is_empty()
    }
}

/// A parsed file name paired with its loaded samples.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedOrbital {
    pub file: OrbitalFile,
    pub sample: RadialSample,
}

impl LoadedOrbital {
    pub fn new(file: OrbitalFile, sample: RadialSample) -> Self {
        Self { file, sample }
    }

    pub fn label(&self) -> OrbitalLabel {
        self.file.label()
    }
}
