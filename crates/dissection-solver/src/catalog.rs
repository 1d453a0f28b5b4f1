//! Piece and solid definitions.
//!
//! Every solid in the puzzle splits into exactly two flat pieces. The
//! decomposition table is a compile-time constant and is never mutated.

use serde::{Deserialize, Serialize};

/// A flat component piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PieceKind {
    Circle,
    Square,
    Triangle,
}

impl PieceKind {
    /// All piece kinds in canonical order. Search enumeration follows this order.
    pub const ALL: [PieceKind; 3] = [PieceKind::Circle, PieceKind::Square, PieceKind::Triangle];

    pub fn name(self) -> &'static str {
        match self {
            PieceKind::Circle => "circle",
            PieceKind::Square => "square",
            PieceKind::Triangle => "triangle",
        }
    }
}

/// A 3D solid built from two pieces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SolidKind {
    Cylinder,
    Cone,
    Prism,
    Sphere,
    Cube,
    Pyramid,
}

/// Decomposition of each solid, indexed in `SolidKind::ALL` order.
const DECOMPOSITIONS: [&[(PieceKind, u8)]; 6] = [
    &[(PieceKind::Circle, 1), (PieceKind::Square, 1)],
    &[(PieceKind::Circle, 1), (PieceKind::Triangle, 1)],
    &[(PieceKind::Square, 1), (PieceKind::Triangle, 1)],
    &[(PieceKind::Circle, 2)],
    &[(PieceKind::Square, 2)],
    &[(PieceKind::Triangle, 2)],
];

impl SolidKind {
    pub const ALL: [SolidKind; 6] = [
        SolidKind::Cylinder,
        SolidKind::Cone,
        SolidKind::Prism,
        SolidKind::Sphere,
        SolidKind::Cube,
        SolidKind::Pyramid,
    ];

    /// Canonical catalog key
    pub fn name(self) -> &'static str {
        match self {
            SolidKind::Cylinder => "cylinder",
            SolidKind::Cone => "cone",
            SolidKind::Prism => "prism",
            SolidKind::Sphere => "sphere",
            SolidKind::Cube => "cube",
            SolidKind::Pyramid => "pyramid",
        }
    }

    /// Look up a solid by its catalog key. Matching is exact-case.
    pub fn from_name(name: &str) -> Option<SolidKind> {
        SolidKind::ALL.into_iter().find(|solid| solid.name() == name)
    }

    /// Map a target letter to its solid: T is a cylinder, S a cone, C a prism.
    ///
    /// Letters are matched case-insensitively.
    pub fn from_letter(letter: char) -> Option<SolidKind> {
        match letter.to_ascii_uppercase() {
            'T' => Some(SolidKind::Cylinder),
            'S' => Some(SolidKind::Cone),
            'C' => Some(SolidKind::Prism),
            _ => None,
        }
    }

    /// The fixed two-piece decomposition of this solid.
    pub fn decomposition(self) -> &'static [(PieceKind, u8)] {
        DECOMPOSITIONS[self as usize]
    }

    /// The target letter naming this solid, if any
    pub fn letter(self) -> Option<char> {
        match self {
            SolidKind::Cylinder => Some('T'),
            SolidKind::Cone => Some('S'),
            SolidKind::Prism => Some('C'),
            _ => None,
        }
    }
}

/// Piece counts of a solid as `[circle, square, triangle]`.
pub fn piece_totals(solids: &[SolidKind]) -> [u8; 3] {
    let mut totals = [0u8; 3];
    for solid in solids {
        for &(kind, count) in solid.decomposition() {
            totals[kind as usize] += count;
        }
    }
    totals
}
