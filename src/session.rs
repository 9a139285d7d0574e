//! One playable puzzle: generation, gesture tracking, and validation wired
//! together behind a single event-returning API.
//!
//! Every pointer method returns the [`PuzzleEvent`]s the rendering layer should
//! react to. The session owns the exactly-once completion latch, and it replaces
//! grid, placements, found set and selection together whenever the word list or
//! size actually changes.
//!
//! # Examples
//!
//! ```
//! use wordsearch::generator::GeneratorConfig;
//! use wordsearch::session::{PuzzleEvent, PuzzleSession};
//!
//! let config = GeneratorConfig::default().with_size(3);
//! let mut session = PuzzleSession::with_seed(&["cat"], config, 11)?;
//!
//! let cells = session.placements()[0].cells.clone();
//! session.pointer_down(cells[0]);
//! for cell in &cells[1..] {
//!     session.pointer_enter(*cell);
//! }
//! let events = session.pointer_up();
//! assert!(events.contains(&PuzzleEvent::Completed));
//! # Ok::<(), wordsearch::errors::GenerateError>(())
//! ```

use std::collections::hash_map::DefaultHasher;
use std::collections::BTreeSet;
use std::hash::{Hash, Hasher};
use std::time::Duration;

use instant::Instant;
use log::{debug, info, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use crate::errors::GenerateError;
use crate::generator::{generate, GeneratedPuzzle, GeneratorConfig, Placement};
use crate::grid::{Cell, Grid};
use crate::score::{compute_score, GameStats, Hint, SessionOptions};
use crate::selection::SelectionTracker;
use crate::validator::{evaluate, is_complete, FoundSet, Outcome};

// Separates words in the content key so ["AB","C"] and ["A","BC"] differ
const HASH_SPLIT: u16 = 0xFFFFu16;

/// Pointer input from the rendering layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PointerAction {
    Down { cell: Cell },
    Enter { cell: Cell },
    Up,
    Leave,
}

/// Something the rendering layer should show.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PuzzleEvent {
    /// The highlighted drag path changed; empty once a gesture ends.
    PathChanged { path: Vec<Cell> },
    /// A word was found.
    WordFound { index: usize, word: String },
    /// Every placed word is found. Fires once per generated puzzle.
    Completed,
}

/// A placed word and whether it has been found, for the word list panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordStatus {
    pub word: String,
    pub found: bool,
}

pub struct PuzzleSession {
    config: GeneratorConfig,
    options: SessionOptions,
    rng: StdRng,
    words: Vec<String>,
    content_key: u64,
    puzzle: GeneratedPuzzle,
    found: FoundSet,
    tracker: SelectionTracker,
    completion_fired: bool,
    // set the first time the deadline is seen before completion
    expired: bool,
    hints_used: u32,
    started_at: Instant,
    finished_after: Option<Duration>,
}

/// Hash of the normalized word list and size; regeneration happens only when it changes.
fn content_key(words: &[String], size: usize) -> u64 {
    let mut hasher = DefaultHasher::new();
    size.hash(&mut hasher);
    for w in words {
        w.hash(&mut hasher);
        HASH_SPLIT.hash(&mut hasher);
    }
    hasher.finish()
}

fn normalize<S: AsRef<str>>(words: &[S]) -> Vec<String> {
    words.iter().map(|w| w.as_ref().to_uppercase()).collect()
}

impl PuzzleSession {
    /// Generate a puzzle from `words` (any case) using an OS-seeded random source.
    ///
    /// # Errors
    ///
    /// Returns a [`GenerateError`] for an invalid configuration or word.
    pub fn new<S: AsRef<str>>(words: &[S], config: GeneratorConfig) -> Result<Self, GenerateError> {
        Self::with_rng(words, config, StdRng::from_os_rng())
    }

    /// Like [`PuzzleSession::new`], but reproducible.
    ///
    /// # Errors
    ///
    /// Same as [`PuzzleSession::new`].
    pub fn with_seed<S: AsRef<str>>(words: &[S], config: GeneratorConfig, seed: u64) -> Result<Self, GenerateError> {
        Self::with_rng(words, config, StdRng::seed_from_u64(seed))
    }

    /// # Errors
    ///
    /// Same as [`PuzzleSession::new`].
    pub fn with_rng<S: AsRef<str>>(words: &[S], config: GeneratorConfig, mut rng: StdRng) -> Result<Self, GenerateError> {
        let words = normalize(words);
        let puzzle = generate(&words, &config, &mut rng)?;
        let content_key = content_key(&words, config.size);
        let tracker = SelectionTracker::new(config.size);
        let session = Self {
            config,
            options: SessionOptions::default(),
            rng,
            words,
            content_key,
            puzzle,
            found: FoundSet::new(),
            tracker,
            completion_fired: false,
            expired: false,
            hints_used: 0,
            started_at: Instant::now(),
            finished_after: None,
        };
        session.log_generated();
        Ok(session)
    }

    #[must_use]
    pub fn with_options(mut self, options: SessionOptions) -> Self {
        self.options = options;
        self
    }

    /// Change difficulty, hint budget or time limit mid-session. The clock keeps
    /// running from the current puzzle's start.
    pub fn set_options(&mut self, options: SessionOptions) {
        debug!("session options now {options:?}");
        self.options = options;
    }

    fn log_generated(&self) {
        info!(
            "new {size}x{size} puzzle with {} of {} words placed",
            self.puzzle.placements.len(),
            self.words.len(),
            size = self.config.size
        );
        for word in &self.puzzle.unplaced {
            warn!("could not place {word}; it is left out of this puzzle");
        }
    }

    /// Generate a fresh puzzle and reset all per-puzzle state in one step.
    ///
    /// On error nothing changes.
    fn install(&mut self, words: Vec<String>, size: usize) -> Result<(), GenerateError> {
        let config = self.config.clone().with_size(size);
        let puzzle = generate(&words, &config, &mut self.rng)?;

        self.content_key = content_key(&words, size);
        self.config = config;
        self.words = words;
        self.puzzle = puzzle;
        self.found.clear();
        self.tracker.reset(size);
        self.completion_fired = false;
        self.expired = false;
        self.hints_used = 0;
        self.started_at = Instant::now();
        self.finished_after = None;
        self.log_generated();
        Ok(())
    }

    /// Replace words and size, regenerating only if their content changed.
    /// Returns whether a new puzzle was generated.
    ///
    /// # Errors
    ///
    /// Returns a [`GenerateError`] and keeps the current puzzle if the new
    /// configuration is invalid.
    pub fn set_puzzle<S: AsRef<str>>(&mut self, words: &[S], size: usize) -> Result<bool, GenerateError> {
        let words = normalize(words);
        if content_key(&words, size) == self.content_key {
            debug!("word list and size unchanged; keeping current puzzle");
            return Ok(false);
        }
        self.install(words, size)?;
        Ok(true)
    }

    /// # Errors
    ///
    /// See [`PuzzleSession::set_puzzle`].
    pub fn set_words<S: AsRef<str>>(&mut self, words: &[S]) -> Result<bool, GenerateError> {
        self.set_puzzle(words, self.config.size)
    }

    /// # Errors
    ///
    /// See [`PuzzleSession::set_puzzle`].
    pub fn set_size(&mut self, size: usize) -> Result<bool, GenerateError> {
        let words = self.words.clone();
        self.set_puzzle(&words, size)
    }

    /// Regenerate with the same words and size (a "new puzzle" request).
    ///
    /// # Errors
    ///
    /// Returns a [`GenerateError`] if generation fails; the current configuration
    /// was already validated, so this does not happen in practice.
    pub fn reshuffle(&mut self) -> Result<(), GenerateError> {
        let words = self.words.clone();
        self.install(words, self.config.size)
    }

    #[must_use]
    pub fn grid(&self) -> &Grid {
        &self.puzzle.grid
    }

    #[must_use]
    pub fn size(&self) -> usize {
        self.config.size
    }

    #[must_use]
    pub fn placements(&self) -> &[Placement] {
        &self.puzzle.placements
    }

    /// Words that did not fit into the current grid.
    #[must_use]
    pub fn unplaced(&self) -> &[String] {
        &self.puzzle.unplaced
    }

    #[must_use]
    pub fn puzzle(&self) -> &GeneratedPuzzle {
        &self.puzzle
    }

    #[must_use]
    pub fn found(&self) -> &FoundSet {
        &self.found
    }

    #[must_use]
    pub fn options(&self) -> &SessionOptions {
        &self.options
    }

    #[must_use]
    pub fn current_path(&self) -> &[Cell] {
        self.tracker.current_path()
    }

    #[must_use]
    pub fn is_completed(&self) -> bool {
        self.completion_fired
    }

    /// The countdown ran out before the puzzle was completed.
    #[must_use]
    pub fn is_expired(&self) -> bool {
        self.expired || (!self.completion_fired && self.deadline_passed())
    }

    fn deadline_passed(&self) -> bool {
        self.options.time_limit.is_some_and(|limit| self.started_at.elapsed() >= limit)
    }

    /// Latch expiry so a late release can never complete the puzzle.
    fn check_expired(&mut self) -> bool {
        if !self.expired && !self.completion_fired && self.deadline_passed() {
            self.expired = true;
            info!("time is up with {}/{} words found", self.found.len(), self.puzzle.placements.len());
        }
        self.expired
    }

    #[must_use]
    pub fn word_status(&self) -> Vec<WordStatus> {
        self.puzzle
            .placements
            .iter()
            .enumerate()
            .map(|(i, p)| WordStatus { word: p.word.clone(), found: self.found.contains(i) })
            .collect()
    }

    /// Every cell covered by a found word.
    #[must_use]
    pub fn found_cells(&self) -> BTreeSet<Cell> {
        self.found
            .iter()
            .filter_map(|i| self.puzzle.placements.get(i))
            .flat_map(|p| p.cells.iter().copied())
            .collect()
    }

    pub fn handle(&mut self, action: PointerAction) -> Vec<PuzzleEvent> {
        match action {
            PointerAction::Down { cell } => self.pointer_down(cell),
            PointerAction::Enter { cell } => self.pointer_enter(cell),
            PointerAction::Up => self.pointer_up(),
            PointerAction::Leave => self.pointer_leave(),
        }
    }

    pub fn pointer_down(&mut self, cell: Cell) -> Vec<PuzzleEvent> {
        if self.check_expired() {
            debug!("time is up; ignoring pointer down at {cell}");
            return Vec::new();
        }
        if self.tracker.pointer_down(cell) {
            vec![self.path_changed()]
        } else {
            Vec::new()
        }
    }

    pub fn pointer_enter(&mut self, cell: Cell) -> Vec<PuzzleEvent> {
        if self.check_expired() {
            return Vec::new();
        }
        if self.tracker.pointer_enter(cell) {
            vec![self.path_changed()]
        } else {
            Vec::new()
        }
    }

    /// Release: the drag path is checked against the unfound words. A duplicate
    /// release (no gesture in progress) produces no events.
    pub fn pointer_up(&mut self) -> Vec<PuzzleEvent> {
        match self.tracker.pointer_up() {
            Some(path) => self.release(&path),
            None => Vec::new(),
        }
    }

    /// The pointer left the puzzle area; same as a release.
    pub fn pointer_leave(&mut self) -> Vec<PuzzleEvent> {
        match self.tracker.pointer_leave() {
            Some(path) => self.release(&path),
            None => Vec::new(),
        }
    }

    fn path_changed(&self) -> PuzzleEvent {
        PuzzleEvent::PathChanged { path: self.tracker.current_path().to_vec() }
    }

    fn release(&mut self, path: &[Cell]) -> Vec<PuzzleEvent> {
        let mut events = Vec::new();
        if self.check_expired() {
            debug!("time is up; discarding released path of {} cells", path.len());
            events.push(PuzzleEvent::PathChanged { path: Vec::new() });
            return events;
        }
        let evaluation = evaluate(path, &self.puzzle.placements, &mut self.found);

        if let Outcome::Matched(index) = evaluation.outcome {
            let word = self.puzzle.placements[index].word.clone();
            debug!("found {word} ({}/{})", self.found.len(), self.puzzle.placements.len());
            events.push(PuzzleEvent::WordFound { index, word });
        }
        if evaluation.completed && !self.completion_fired {
            self.completion_fired = true;
            let elapsed = self.started_at.elapsed();
            self.finished_after = Some(elapsed);
            info!("puzzle completed in {:.1}s", elapsed.as_secs_f64());
            events.push(PuzzleEvent::Completed);
        }
        events.push(PuzzleEvent::PathChanged { path: Vec::new() });
        events
    }

    /// Reveal where the first unfound word starts, spending one hint.
    ///
    /// Returns `None`, spending nothing, when no hints remain, nothing is left to
    /// find, or time is up.
    pub fn hint(&mut self) -> Option<Hint> {
        if self.check_expired() || self.hints_used >= self.options.hints {
            return None;
        }
        let (index, placement) = self
            .puzzle
            .placements
            .iter()
            .enumerate()
            .find(|(i, _)| !self.found.contains(*i))?;
        let start = placement.start()?;
        self.hints_used += 1;
        let hint = Hint {
            index,
            word: placement.word.clone(),
            start,
            hints_left: self.options.hints - self.hints_used,
        };
        debug!("hint: {} starts at {}", hint.word, hint.start);
        Some(hint)
    }

    #[must_use]
    pub fn hints_used(&self) -> u32 {
        self.hints_used
    }

    /// Play time so far, frozen at completion.
    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.finished_after.unwrap_or_else(|| self.started_at.elapsed())
    }

    #[must_use]
    pub fn stats(&self) -> GameStats {
        let time_remaining_secs = self
            .options
            .time_limit
            .map_or(0, |limit| limit.saturating_sub(self.elapsed()).as_secs());
        GameStats {
            difficulty: self.options.difficulty,
            hints_used: self.hints_used,
            time_remaining_secs,
            won: !self.expired && is_complete(&self.puzzle.placements, &self.found),
        }
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        compute_score(&self.stats())
    }
}
