//! Request validation and state construction.
//!
//! Raw request fields are checked in a fixed order and the first failed rule
//! is reported. A validated `Request` carries parsed solids only, so state
//! building cannot fail.

use thiserror::Error;

use crate::catalog::{piece_totals, SolidKind};
use crate::state::{State, SLOT_COUNT};

/// Why a request was rejected
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("you must enter 3 solo callout letters")]
    LetterLength(usize),
    #[error("you must enter three current 3D objects")]
    SolidCount(usize),
    #[error("the solo callout letters must be T (triangle), S (square), or C (circle)")]
    InvalidLetter(char),
    #[error("the solo callout letters must contain exactly one T, one S, and one C")]
    LetterCounts,
    #[error("the 3D object {0} is not valid")]
    UnknownSolid(String),
    #[error("the selected objects must add up to exactly 2 circles, 2 squares, and 2 triangles")]
    PieceTotals {
        circles: u8,
        squares: u8,
        triangles: u8,
    },
}

/// A request that passed validation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Request {
    /// Target solids in letter order
    pub target: [SolidKind; SLOT_COUNT],
    /// Current solids in input order
    pub current: [SolidKind; SLOT_COUNT],
}

impl Request {
    /// Build fresh current and target states.
    pub fn build_states(&self) -> (State, State) {
        (
            State::from_solids(&self.current),
            State::from_solids(&self.target),
        )
    }
}

/// Validate target letters and current solid names.
///
/// Letters are case-insensitive; solid names must match a catalog key exactly.
pub fn validate<S: AsRef<str>>(letters: &str, solids: &[S]) -> Result<Request, ValidationError> {
    let letter_count = letters.chars().count();
    if letter_count != SLOT_COUNT {
        return Err(ValidationError::LetterLength(letter_count));
    }
    if solids.len() != SLOT_COUNT {
        return Err(ValidationError::SolidCount(solids.len()));
    }

    let mut target = [SolidKind::Cylinder; SLOT_COUNT];
    for (slot, letter) in letters.chars().enumerate() {
        target[slot] = SolidKind::from_letter(letter).ok_or(ValidationError::InvalidLetter(letter))?;
    }
    let all_distinct = target[0] != target[1] && target[0] != target[2] && target[1] != target[2];
    if !all_distinct {
        return Err(ValidationError::LetterCounts);
    }

    let mut current = [SolidKind::Cylinder; SLOT_COUNT];
    for (slot, name) in solids.iter().enumerate() {
        let name = name.as_ref();
        current[slot] =
            SolidKind::from_name(name).ok_or_else(|| ValidationError::UnknownSolid(name.to_string()))?;
    }

    let [circles, squares, triangles] = piece_totals(&current);
    if (circles, squares, triangles) != (2, 2, 2) {
        return Err(ValidationError::PieceTotals {
            circles,
            squares,
            triangles,
        });
    }

    Ok(Request { target, current })
}
