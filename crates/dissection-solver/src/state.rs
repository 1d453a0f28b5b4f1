//! Slot multisets, arrangement states and exchange steps.
//!
//! A `SlotState` is a sparse multiset of pieces. Entries are kept sorted by
//! piece kind and an entry is removed as soon as its count reaches zero, so
//! the derived equality is multiset equality and a missing kind reads as 0.

use std::fmt;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::catalog::{PieceKind, SolidKind};

/// Number of slots in an arrangement
pub const SLOT_COUNT: usize = 3;

/// Human-readable labels for slot positions
const SLOT_LABELS: [&str; SLOT_COUNT] = ["left", "middle", "right"];

/// Pieces currently held at one slot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct SlotState {
    counts: SmallVec<[(PieceKind, u8); 3]>,
}

impl SlotState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy a solid's decomposition out of the catalog
    pub fn from_solid(solid: SolidKind) -> Self {
        let mut slot = Self::new();
        for &(kind, count) in solid.decomposition() {
            for _ in 0..count {
                slot.add(kind);
            }
        }
        slot
    }

    /// Count of `kind` at this slot, 0 when absent.
    pub fn count(&self, kind: PieceKind) -> u8 {
        self.counts
            .iter()
            .find(|&&(k, _)| k == kind)
            .map_or(0, |&(_, count)| count)
    }

    /// Total pieces at this slot
    pub fn total(&self) -> u32 {
        self.counts.iter().map(|&(_, count)| count as u32).sum()
    }

    /// Piece kinds with a positive count, in canonical order.
    pub fn kinds(&self) -> impl Iterator<Item = PieceKind> + '_ {
        self.counts.iter().map(|&(kind, _)| kind)
    }

    pub fn add(&mut self, kind: PieceKind) {
        match self.counts.binary_search_by_key(&kind, |&(k, _)| k) {
            Ok(index) => self.counts[index].1 += 1,
            Err(index) => self.counts.insert(index, (kind, 1)),
        }
    }

    /// Take one piece of `kind` out. Returns false, leaving the slot
    /// untouched, if there is none to take.
    pub fn remove(&mut self, kind: PieceKind) -> bool {
        match self.counts.binary_search_by_key(&kind, |&(k, _)| k) {
            Ok(index) => {
                self.counts[index].1 -= 1;
                if self.counts[index].1 == 0 {
                    self.counts.remove(index);
                }
                true
            }
            Err(_) => false,
        }
    }
}

/// A single exchange: the `from_piece` at `from_slot` trades places with
/// the `to_piece` at `to_slot`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SwapStep {
    pub from_slot: usize,
    pub from_piece: PieceKind,
    pub to_slot: usize,
    pub to_piece: PieceKind,
}

impl SwapStep {
    pub fn new(from_slot: usize, from_piece: PieceKind, to_slot: usize, to_piece: PieceKind) -> Self {
        Self {
            from_slot,
            from_piece,
            to_slot,
            to_piece,
        }
    }
}

fn slot_label(slot: usize) -> &'static str {
    SLOT_LABELS.get(slot).copied().unwrap_or("unknown")
}

impl fmt::Display for SwapStep {
    // Dissecting both solids trades the two pieces between them
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Dissect {} on {} and dissect {} on {}",
            self.from_piece.name(),
            slot_label(self.from_slot),
            self.to_piece.name(),
            slot_label(self.to_slot)
        )
    }
}

/// Render a solution as numbered instructions, one line per step.
pub fn render_solution(steps: &[SwapStep]) -> String {
    steps
        .iter()
        .enumerate()
        .map(|(i, step)| format!("{}. {}\n", i + 1, step))
        .collect()
}

/// The pieces held at all three slots.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct State {
    pub slots: [SlotState; SLOT_COUNT],
}

impl State {
    /// Build an arrangement from three solids, in slot order
    pub fn from_solids(solids: &[SolidKind; SLOT_COUNT]) -> Self {
        Self {
            slots: solids.map(SlotState::from_solid),
        }
    }

    pub fn slot(&self, index: usize) -> &SlotState {
        &self.slots[index]
    }

    /// Total pieces across every slot
    pub fn total(&self) -> u32 {
        self.slots.iter().map(SlotState::total).sum()
    }

    /// Clone with one exchange applied.
    ///
    /// Returns `None` if either slot lacks the piece it is supposed to give up,
    /// or the step names a slot that does not exist.
    pub fn apply(&self, step: &SwapStep) -> Option<State> {
        if step.from_slot >= SLOT_COUNT || step.to_slot >= SLOT_COUNT || step.from_slot == step.to_slot {
            return None;
        }

        let mut next = self.clone();
        if !next.slots[step.from_slot].remove(step.from_piece)
            || !next.slots[step.to_slot].remove(step.to_piece)
        {
            return None;
        }
        next.slots[step.from_slot].add(step.to_piece);
        next.slots[step.to_slot].add(step.from_piece);
        Some(next)
    }

    /// Apply every step in order
    pub fn apply_all(&self, steps: &[SwapStep]) -> Option<State> {
        steps
            .iter()
            .try_fold(self.clone(), |state, step| state.apply(step))
    }
}
