//! Spectroscopic letter table for angular momentum quantum numbers.
//!
//! Lookups outside the table return `None`; callers pick the error kind.

pub const SPECTROSCOPIC_LETTERS: [char; 5] = ['s', 'p', 'd', 'f', 'g'];
pub const MAX_ANGULAR_MOMENTUM: u8 = (SPECTROSCOPIC_LETTERS.len() - 1) as u8;

pub const fn spectroscopic_letter(l: u8) -> Option<char> {
    if l > MAX_ANGULAR_MOMENTUM {
        None
    } else {
        Some(SPECTROSCOPIC_LETTERS[l as usize])
    }
}

pub fn angular_momentum_for_letter(letter: char) -> Option<u8> {
    let normalized = letter.to_ascii_lowercase();
    SPECTROSCOPIC_LETTERS
        .iter()
        .position(|candidate| *candidate == normalized)
        .map(|index| index as u8)
}
