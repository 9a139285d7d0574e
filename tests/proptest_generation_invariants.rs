//! Property-based invariant tests for generation, selection and validation.
//!
//! These tests verify invariants that must hold for any word list, grid size
//! and random seed:
//!
//! 1. Every placement spells its word along one fixed direction.
//! 2. Every cell holds an alphabet letter after generation.
//! 3. Every placement is a start cell stepped in bounds along its direction.
//! 4. Each input word is either placed or reported unplaced.
//! 5. Dragging a placement backwards matches like dragging it forwards.
//! 6. Finding every placement fires completion exactly once.
//! 7. The found set never shrinks and only holds placement indices.
//! 8. The selection path is always a straight in-bounds run from its start.

use proptest::prelude::*;

use wordsearch::alphabet::Alphabet;
use wordsearch::generator::{generate_seeded, GeneratorConfig};
use wordsearch::grid::{Cell, Direction};
use wordsearch::selection::{SelectionState, SelectionTracker};
use wordsearch::session::{PointerAction, PuzzleEvent, PuzzleSession};
use wordsearch::validator::{evaluate, FoundSet};

// ── Helpers ─────────────────────────────────────────────────────────────

const ACTION_GRID: usize = 8;

fn words_strategy() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec("[A-Z]{1,9}", 0..8)
}

fn cell_strategy(limit: usize) -> impl Strategy<Value = Cell> {
    (0..limit, 0..limit).prop_map(|(r, c)| Cell::new(r, c))
}

/// Pointer actions, including cells past the grid edge.
fn action_strategy() -> impl Strategy<Value = PointerAction> {
    prop_oneof![
        1 => cell_strategy(ACTION_GRID + 3).prop_map(|cell| PointerAction::Down { cell }),
        4 => cell_strategy(ACTION_GRID + 3).prop_map(|cell| PointerAction::Enter { cell }),
        1 => Just(PointerAction::Up),
        1 => Just(PointerAction::Leave),
    ]
}

fn drag(session: &mut PuzzleSession, cells: &[Cell]) -> Vec<PuzzleEvent> {
    let mut events = session.pointer_down(cells[0]);
    for cell in &cells[1..] {
        events.extend(session.pointer_enter(*cell));
    }
    events.extend(session.pointer_up());
    events
}

// ═════════════════════════════════════════════════════════════════════════
// 1-4. Generation
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn placements_spell_their_words(words in words_strategy(), size in 1usize..=12, seed in any::<u64>()) {
        let puzzle = generate_seeded(&words, &GeneratorConfig::default().with_size(size), seed).unwrap();
        for p in &puzzle.placements {
            prop_assert_eq!(puzzle.grid.letters_at(&p.cells), p.word.clone());
            prop_assert_eq!(p.cells.len(), p.word.chars().count());
            for pair in p.cells.windows(2) {
                prop_assert_eq!(Direction::toward(pair[0], pair[1]), Some(p.direction));
                let (dr, dc) = p.direction.delta();
                prop_assert_eq!(pair[1].row as isize - pair[0].row as isize, dr);
                prop_assert_eq!(pair[1].col as isize - pair[0].col as isize, dc);
            }
        }
    }

    #[test]
    fn every_cell_is_filled(words in words_strategy(), size in 1usize..=12, seed in any::<u64>()) {
        let alphabet = Alphabet::latin();
        let puzzle = generate_seeded(&words, &GeneratorConfig::default().with_size(size), seed).unwrap();
        prop_assert_eq!(puzzle.grid.size(), size);
        prop_assert_eq!(puzzle.grid.rows().count(), size);
        for r in 0..size {
            for c in 0..size {
                let letter = puzzle.grid.get(Cell::new(r, c));
                prop_assert!(letter.is_some_and(|l| alphabet.contains(l)), "cell ({}, {}) holds {:?}", r, c, letter);
            }
        }
    }

    #[test]
    fn placements_are_reachable(words in words_strategy(), size in 1usize..=12, seed in any::<u64>()) {
        let puzzle = generate_seeded(&words, &GeneratorConfig::default().with_size(size), seed).unwrap();
        for p in &puzzle.placements {
            let start = p.start().unwrap();
            for (i, cell) in p.cells.iter().enumerate() {
                prop_assert_eq!(start.step(p.direction, i, size), Some(*cell));
                prop_assert!(cell.in_bounds(size));
            }
        }
    }

    #[test]
    fn every_word_is_accounted_for(words in words_strategy(), size in 1usize..=12, seed in any::<u64>()) {
        let puzzle = generate_seeded(&words, &GeneratorConfig::default().with_size(size), seed).unwrap();
        prop_assert_eq!(puzzle.placements.len() + puzzle.unplaced.len(), words.len());
        for word in words.iter().filter(|w| w.chars().count() > size) {
            prop_assert!(puzzle.unplaced.contains(word));
        }
        // placements and unplaced words both keep input order
        let mut placed = puzzle.placements.iter().map(|p| &p.word).peekable();
        let mut unplaced = puzzle.unplaced.iter().peekable();
        for word in &words {
            if placed.peek() == Some(&word) {
                placed.next();
            } else {
                prop_assert_eq!(unplaced.next(), Some(word));
            }
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 5-6. Matching
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn reverse_drag_matches_like_forward(words in words_strategy(), seed in any::<u64>()) {
        let puzzle = generate_seeded(&words, &GeneratorConfig::default(), seed).unwrap();
        for p in &puzzle.placements {
            let forward = evaluate(&p.cells, &puzzle.placements, &mut FoundSet::new());
            let backward = evaluate(&p.reversed_cells(), &puzzle.placements, &mut FoundSet::new());
            prop_assert_eq!(forward, backward);
        }
    }

    #[test]
    fn completion_fires_once(words in words_strategy(), size in 1usize..=12, seed in any::<u64>()) {
        let mut session = PuzzleSession::with_seed(&words, GeneratorConfig::default().with_size(size), seed).unwrap();
        let placements = session.placements().to_vec();
        let mut completed = 0;
        for (i, p) in placements.iter().enumerate() {
            let events = drag(&mut session, &p.cells);
            let expected = PuzzleEvent::WordFound { index: i, word: p.word.clone() };
            prop_assert!(events.contains(&expected));
            completed += events.iter().filter(|e| **e == PuzzleEvent::Completed).count();
        }
        // dragging everything again changes nothing
        for p in &placements {
            completed += drag(&mut session, &p.cells).iter().filter(|e| **e == PuzzleEvent::Completed).count();
        }
        prop_assert_eq!(completed, usize::from(!placements.is_empty()));
        prop_assert_eq!(session.is_completed(), !placements.is_empty());
        prop_assert_eq!(session.found().len(), placements.len());
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 7-8. Gestures
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn found_set_only_grows(
        words in words_strategy(),
        seed in any::<u64>(),
        actions in prop::collection::vec(action_strategy(), 0..60),
    ) {
        let mut session = PuzzleSession::with_seed(&words, GeneratorConfig::default().with_size(ACTION_GRID), seed).unwrap();
        let mut previous: Vec<usize> = Vec::new();
        for action in actions {
            session.handle(action);
            let now: Vec<usize> = session.found().iter().collect();
            prop_assert!(previous.iter().all(|i| now.contains(i)));
            prop_assert!(now.iter().all(|i| *i < session.placements().len()));
            previous = now;
        }
    }

    #[test]
    fn selection_path_is_straight_and_in_bounds(actions in prop::collection::vec(action_strategy(), 0..60)) {
        let mut tracker = SelectionTracker::new(ACTION_GRID);
        for action in actions {
            match action {
                PointerAction::Down { cell } => { tracker.pointer_down(cell); }
                PointerAction::Enter { cell } => { tracker.pointer_enter(cell); }
                PointerAction::Up => { tracker.pointer_up(); }
                PointerAction::Leave => { tracker.pointer_leave(); }
            }
            match tracker.state() {
                SelectionState::Idle => {
                    prop_assert!(tracker.current_path().is_empty());
                }
                SelectionState::Dragging { start, direction, path } => {
                    prop_assert_eq!(path.first(), Some(start));
                    prop_assert!(path.iter().all(|c| c.in_bounds(ACTION_GRID)));
                    match direction {
                        None => {
                            prop_assert_eq!(path.len(), 1);
                        }
                        Some(d) => {
                            for pair in path.windows(2) {
                                prop_assert_eq!(Direction::toward(pair[0], pair[1]), Some(*d));
                            }
                        }
                    }
                }
            }
        }
    }
}
