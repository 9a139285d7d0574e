//! Integration tests for the word-search puzzle engine.
//!
//! These tests drive complete sessions: generation from a word list, pointer
//! gestures through the selection tracker, and validation against placements.

use std::collections::HashSet;

use rand::rngs::StdRng;
use rand::SeedableRng;

use wordsearch::generator::{generate, generate_seeded, GeneratedPuzzle, GeneratorConfig, Placement};
use wordsearch::grid::{Cell, Direction};
use wordsearch::selection::SelectionTracker;
use wordsearch::session::{PointerAction, PuzzleEvent, PuzzleSession};
use wordsearch::validator::{evaluate, FoundSet, Outcome};
use wordsearch::word_list::WordList;

/// Press on the first cell, enter every following cell, release.
fn drag(session: &mut PuzzleSession, cells: &[Cell]) -> Vec<PuzzleEvent> {
    let mut events = session.handle(PointerAction::Down { cell: cells[0] });
    for cell in &cells[1..] {
        events.extend(session.handle(PointerAction::Enter { cell: *cell }));
    }
    events.extend(session.handle(PointerAction::Up));
    events
}

fn completions(events: &[PuzzleEvent]) -> usize {
    events.iter().filter(|e| **e == PuzzleEvent::Completed).count()
}

/// Every cell on a `size` x `size` board.
fn all_cells(size: usize) -> impl Iterator<Item = Cell> {
    (0..size).flat_map(move |r| (0..size).map(move |c| Cell::new(r, c)))
}

fn assert_consistent(puzzle: &GeneratedPuzzle) {
    for p in &puzzle.placements {
        assert_eq!(puzzle.grid.letters_at(&p.cells), p.word);
        assert_eq!(p.cells.len(), p.word.chars().count());
        for pair in p.cells.windows(2) {
            assert_eq!(Direction::toward(pair[0], pair[1]), Some(p.direction));
        }
    }
}

#[cfg(test)]
mod single_word {
    use super::*;

    #[test]
    fn test_cat_in_three_by_three_forward() {
        for seed in 0..20 {
            let mut session = PuzzleSession::with_seed(&["CAT"], GeneratorConfig::default().with_size(3), seed).unwrap();
            assert_eq!(session.placements().len(), 1, "seed {seed}");
            assert_consistent(session.puzzle());

            let cells = session.placements()[0].cells.clone();
            let events = drag(&mut session, &cells);
            assert!(events.contains(&PuzzleEvent::WordFound { index: 0, word: "CAT".to_string() }));
            assert_eq!(completions(&events), 1);
            assert!(session.is_completed());
        }
    }

    #[test]
    fn test_cat_in_three_by_three_reversed() {
        let mut session = PuzzleSession::with_seed(&["cat"], GeneratorConfig::default().with_size(3), 5).unwrap();
        let cells = session.placements()[0].reversed_cells();
        let events = drag(&mut session, &cells);
        assert_eq!(completions(&events), 1);
        assert_eq!(session.found().len(), 1);
    }

    #[test]
    fn test_press_and_release_in_place() {
        let mut session = PuzzleSession::with_seed(&["CAT"], GeneratorConfig::default().with_size(3), 1).unwrap();
        for cell in all_cells(3) {
            let events = drag(&mut session, &[cell]);
            assert_eq!(events.last(), Some(&PuzzleEvent::PathChanged { path: vec![] }));
            assert!(session.found().is_empty());
        }
        assert!(session.handle(PointerAction::Up).is_empty());
        assert!(!session.is_completed());
    }
}

#[cfg(test)]
mod unplaceable {
    use super::*;

    #[test]
    fn test_elephant_does_not_fit() {
        let puzzle = generate_seeded(&["ELEPHANT"], &GeneratorConfig::default().with_size(3), 3).unwrap();
        assert!(puzzle.placements.is_empty());
        assert_eq!(puzzle.unplaced, vec!["ELEPHANT"]);
        assert_eq!(puzzle.grid.size(), 3);
        for cell in all_cells(3) {
            let letter = puzzle.grid.get(cell).unwrap();
            assert!(letter.is_ascii_uppercase());
        }
    }

    #[test]
    fn test_no_gesture_completes_an_empty_puzzle() {
        let mut session = PuzzleSession::with_seed(&["ELEPHANT"], GeneratorConfig::default().with_size(3), 3).unwrap();
        assert_eq!(session.unplaced(), ["ELEPHANT".to_string()]);
        let lines = [
            vec![Cell::new(0, 0), Cell::new(0, 1), Cell::new(0, 2)],
            vec![Cell::new(0, 0), Cell::new(1, 1), Cell::new(2, 2)],
            vec![Cell::new(2, 0), Cell::new(1, 0)],
            vec![Cell::new(1, 1)],
        ];
        for line in &lines {
            let events = drag(&mut session, line);
            assert_eq!(completions(&events), 0);
        }
        assert!(!session.is_completed());
        assert!(!session.stats().won);
    }
}

#[cfg(test)]
mod gestures {
    use super::*;

    fn cat_and_dog() -> Vec<Placement> {
        vec![
            Placement {
                word: "CAT".to_string(),
                direction: Direction::East,
                cells: vec![Cell::new(2, 2), Cell::new(2, 3), Cell::new(2, 4)],
            },
            Placement {
                word: "DOG".to_string(),
                direction: Direction::South,
                cells: vec![Cell::new(5, 1), Cell::new(6, 1), Cell::new(7, 1)],
            },
        ]
    }

    #[test]
    fn test_horizontal_drag_finds_exactly_one_word() {
        let placements = cat_and_dog();
        let mut tracker = SelectionTracker::new(10);
        let mut found = FoundSet::new();

        tracker.pointer_down(Cell::new(2, 2));
        tracker.pointer_enter(Cell::new(2, 3));
        tracker.pointer_enter(Cell::new(2, 4));
        let path = tracker.pointer_up().unwrap();
        assert_eq!(path, vec![Cell::new(2, 2), Cell::new(2, 3), Cell::new(2, 4)]);

        let eval = evaluate(&path, &placements, &mut found);
        assert_eq!(eval.outcome, Outcome::Matched(0));
        assert!(!eval.completed);
        assert_eq!(found.iter().collect::<Vec<_>>(), vec![0]);
        assert!(!tracker.is_dragging());
    }

    #[test]
    fn test_drag_against_generated_puzzle() {
        let mut session = PuzzleSession::with_seed(&["CAT", "DOG"], GeneratorConfig::default(), 2024).unwrap();
        assert_eq!(session.size(), 10);

        let mut events = session.pointer_down(Cell::new(2, 2));
        events.extend(session.pointer_enter(Cell::new(2, 3)));
        assert_eq!(session.current_path(), [Cell::new(2, 2), Cell::new(2, 3)]);
        events.extend(session.pointer_enter(Cell::new(2, 4)));
        let path = session.current_path().to_vec();
        assert_eq!(path, vec![Cell::new(2, 2), Cell::new(2, 3), Cell::new(2, 4)]);

        let expected: Vec<usize> = session
            .placements()
            .iter()
            .enumerate()
            .filter(|(_, p)| p.matches(&path))
            .map(|(i, _)| i)
            .take(1)
            .collect();
        let release = session.pointer_up();
        let found: Vec<usize> = release
            .iter()
            .filter_map(|e| match e {
                PuzzleEvent::WordFound { index, .. } => Some(*index),
                _ => None,
            })
            .collect();
        assert_eq!(found, expected);
        assert_eq!(session.found().len(), expected.len());
    }

    #[test]
    fn test_pointer_leaving_area_releases() {
        let mut session = PuzzleSession::with_seed(&["CAT", "DOG"], GeneratorConfig::default(), 8).unwrap();
        let cells = session.placements()[1].cells.clone();
        session.handle(PointerAction::Down { cell: cells[0] });
        session.handle(PointerAction::Enter { cell: cells[2] });
        let events = session.handle(PointerAction::Leave);
        assert!(events.contains(&PuzzleEvent::WordFound { index: 1, word: "DOG".to_string() }));
        assert!(session.current_path().is_empty());
    }

    #[test]
    fn test_overshoot_is_truncated_at_edge() {
        let mut tracker = SelectionTracker::new(5);
        tracker.pointer_down(Cell::new(3, 3));
        tracker.pointer_enter(Cell::new(4, 4));
        tracker.pointer_enter(Cell::new(9, 9));
        assert_eq!(tracker.current_path(), [Cell::new(3, 3), Cell::new(4, 4)]);
    }
}

#[cfg(test)]
mod regeneration {
    use super::*;

    #[test]
    fn test_new_word_list_resets_completed_session() {
        let mut session = PuzzleSession::with_seed(&["CAT"], GeneratorConfig::default().with_size(3), 4).unwrap();
        let cells = session.placements()[0].cells.clone();
        assert_eq!(completions(&drag(&mut session, &cells)), 1);

        assert_eq!(session.set_words(&["SOL", "MAR", "LUNA"]), Ok(true));
        assert!(session.found().is_empty());
        assert!(!session.is_completed());
        assert_consistent(session.puzzle());
        let words: HashSet<&str> = session.placements().iter().map(|p| p.word.as_str()).collect();
        assert!(!words.contains("CAT"));

        // completion fires again for the new puzzle
        let placements = session.placements().to_vec();
        let mut fired = 0;
        for p in &placements {
            fired += completions(&drag(&mut session, &p.cells));
        }
        assert_eq!(fired, 1);
    }

    #[test]
    fn test_same_words_different_case_keep_progress() {
        let mut session = PuzzleSession::with_seed(&["cat", "dog"], GeneratorConfig::default(), 6).unwrap();
        let cells = session.placements()[0].cells.clone();
        drag(&mut session, &cells);
        assert_eq!(session.set_puzzle(&["CAT", "DOG"], 10), Ok(false));
        assert_eq!(session.found().len(), 1);
    }
}

#[cfg(test)]
mod generation {
    use super::*;

    #[test]
    fn test_injected_rng_is_reproducible() {
        let words = ["ESTRELLA", "LUNA", "NUBE", "MAR", "SOL"];
        let config = GeneratorConfig::default().with_size(8);
        let a = generate(&words, &config, &mut StdRng::seed_from_u64(31)).unwrap();
        let b = generate(&words, &config, &mut StdRng::seed_from_u64(31)).unwrap();
        assert_eq!(a, b);
        assert_consistent(&a);
    }

    #[test]
    fn test_word_list_fixture_feeds_generator() {
        let list = WordList::load_from_path("tests/fixtures/words.txt", 50).unwrap();
        assert_eq!(list.words, vec!["ARCOIRIS", "ESTRELLA", "LUNA", "NUBE", "MAR", "SOL"]);

        let puzzle = generate_seeded(&list.words, &GeneratorConfig::default().with_size(12), 17).unwrap();
        assert_eq!(puzzle.placements.len() + puzzle.unplaced.len(), list.len());
        assert_consistent(&puzzle);
    }

    #[test]
    fn test_puzzle_serializes_to_json() {
        let puzzle = generate_seeded(&["CAT"], &GeneratorConfig::default().with_size(3), 9).unwrap();
        let json = serde_json::to_value(&puzzle).unwrap();
        assert_eq!(json["placements"][0]["word"], "CAT");
        assert_eq!(json["placements"][0]["cells"].as_array().map(Vec::len), Some(3));
        assert!(json["unplaced"].as_array().is_some_and(Vec::is_empty));
    }
}
