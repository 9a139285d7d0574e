//! Matching a released drag path against the placed words.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::generator::Placement;
use crate::grid::Cell;

/// Indices of placements the player has already found.
///
/// Only grows during a puzzle; cleared when the puzzle is regenerated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FoundSet(BTreeSet<usize>);

impl FoundSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `false` if `index` was already present.
    pub fn insert(&mut self, index: usize) -> bool {
        self.0.insert(index)
    }

    #[must_use]
    pub fn contains(&self, index: usize) -> bool {
        self.0.contains(&index)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.0.iter().copied()
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }
}

/// What a single gesture amounted to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    /// The released path had no cells.
    Empty,
    /// The path found the placement at this index.
    Matched(usize),
    /// The path matched nothing still unfound and is discarded.
    Unmatched,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Evaluation {
    pub outcome: Outcome,
    /// Every placement is found. Never true for a puzzle without placements.
    pub completed: bool,
}

/// Whether `found` covers all of `placements` (and there is at least one).
#[must_use]
pub fn is_complete(placements: &[Placement], found: &FoundSet) -> bool {
    !placements.is_empty() && found.len() == placements.len()
}

/// Compare `path` with every unfound placement, forward and reversed.
///
/// The first match is recorded in `found`; a gesture finds at most one word.
/// Anything else leaves `found` untouched.
pub fn evaluate(path: &[Cell], placements: &[Placement], found: &mut FoundSet) -> Evaluation {
    let outcome = if path.is_empty() {
        Outcome::Empty
    } else {
        let hit = placements
            .iter()
            .enumerate()
            .find(|(i, placement)| !found.contains(*i) && placement.matches(path))
            .map(|(i, _)| i);
        match hit {
            Some(i) => {
                found.insert(i);
                Outcome::Matched(i)
            }
            None => Outcome::Unmatched,
        }
    };
    Evaluation { outcome, completed: is_complete(placements, found) }
}
