//! Grid generation with constrained straight-line word placement.
//!
//! Each word gets a fixed budget of random attempts. An attempt picks one of the
//! eight directions, then a start cell from the range where the whole word stays
//! inside the grid, and walks the word letter by letter. The attempt is committed
//! only when every target cell is empty or already holds the same letter, so words
//! may cross on a shared letter. A word that never fits is left out of the puzzle
//! and reported in [`GeneratedPuzzle::unplaced`]; that is not an error.
//!
//! Once every word has been tried, the remaining empty cells are filled with
//! random alphabet letters.
//!
//! # Examples
//!
//! ```
//! use wordsearch::generator::{generate_seeded, GeneratorConfig};
//!
//! let config = GeneratorConfig::default().with_size(8);
//! let puzzle = generate_seeded(&["SOL", "LUNA", "MAR"], &config, 2024)?;
//!
//! for placement in &puzzle.placements {
//!     assert_eq!(puzzle.grid.letters_at(&placement.cells), placement.word);
//! }
//! # Ok::<(), wordsearch::errors::GenerateError>(())
//! ```

use std::ops::RangeInclusive;

use log::debug;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::alphabet::Alphabet;
use crate::errors::GenerateError;
use crate::grid::{Cell, Direction, Grid};

/// Grid dimension used when none is given.
pub const DEFAULT_SIZE: usize = 10;
/// Random placement attempts per word.
pub const DEFAULT_MAX_ATTEMPTS: usize = 300;

/// Generation parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorConfig {
    /// Rows and columns of the square grid.
    pub size: usize,
    /// Placement attempts per word before the word is dropped.
    pub max_attempts: usize,
    /// Letters allowed in words and used for the random fill.
    pub alphabet: Alphabet,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            size: DEFAULT_SIZE,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            alphabet: Alphabet::latin(),
        }
    }
}

impl GeneratorConfig {
    #[must_use]
    pub fn with_size(mut self, size: usize) -> Self {
        self.size = size;
        self
    }

    #[must_use]
    pub fn with_max_attempts(mut self, max_attempts: usize) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    #[must_use]
    pub fn with_alphabet(mut self, alphabet: Alphabet) -> Self {
        self.alphabet = alphabet;
        self
    }

    /// Check the parameters and every word before any cell is touched.
    ///
    /// # Errors
    ///
    /// Returns the first [`GenerateError`] found, checking the grid size, the
    /// retry budget, the alphabet, then each word in order.
    pub fn validate<S: AsRef<str>>(&self, words: &[S]) -> Result<(), GenerateError> {
        if self.size == 0 {
            return Err(GenerateError::InvalidSize { size: self.size });
        }
        if self.max_attempts == 0 {
            return Err(GenerateError::ZeroAttempts);
        }
        if self.alphabet.is_empty() {
            return Err(GenerateError::EmptyAlphabet);
        }
        for (index, word) in words.iter().enumerate() {
            let word = word.as_ref();
            if word.is_empty() {
                return Err(GenerateError::EmptyWord { index });
            }
            if let Some(invalid_char) = self.alphabet.first_foreign(word) {
                return Err(GenerateError::InvalidWordChar { word: word.to_string(), invalid_char });
            }
        }
        Ok(())
    }
}

/// The cells a placed word occupies, in reading order.
///
/// `cells.len()` equals the word's letter count and consecutive cells differ by
/// exactly `direction`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Placement {
    pub word: String,
    pub direction: Direction,
    pub cells: Vec<Cell>,
}

impl Placement {
    #[must_use]
    pub fn start(&self) -> Option<Cell> {
        self.cells.first().copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    #[must_use]
    pub fn reversed_cells(&self) -> Vec<Cell> {
        self.cells.iter().rev().copied().collect()
    }

    /// Whether `path` covers exactly this word, read from either end.
    #[must_use]
    pub fn matches(&self, path: &[Cell]) -> bool {
        path.len() == self.cells.len()
            && (path == self.cells.as_slice() || path.iter().eq(self.cells.iter().rev()))
    }
}

/// A finished puzzle: the filled grid plus where each word went.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedPuzzle {
    pub grid: Grid,
    /// Successfully placed words, in input order.
    pub placements: Vec<Placement>,
    /// Words that could not be placed, in input order.
    pub unplaced: Vec<String>,
}

/// Working board used while placing words; `None` marks a free cell.
struct Board {
    size: usize,
    cells: Vec<Option<char>>,
}

impl Board {
    fn new(size: usize) -> Self {
        Self { size, cells: vec![None; size * size] }
    }

    fn get(&self, cell: Cell) -> Option<char> {
        self.cells[cell.row * self.size + cell.col]
    }

    fn set(&mut self, cell: Cell, letter: char) {
        self.cells[cell.row * self.size + cell.col] = Some(letter);
    }

    fn fits(&self, cells: &[Cell], letters: &[char]) -> bool {
        cells
            .iter()
            .zip(letters)
            .all(|(cell, letter)| self.get(*cell).map_or(true, |existing| existing == *letter))
    }

    fn fill<R: Rng + ?Sized>(self, alphabet: &Alphabet, rng: &mut R) -> Grid {
        let size = self.size;
        let letters = self
            .cells
            .into_iter()
            .map(|slot| slot.unwrap_or_else(|| alphabet.random_letter(rng)))
            .collect();
        match Grid::from_letters(size, letters) {
            Some(grid) => grid,
            None => unreachable!("board always holds size * size cells"),
        }
    }
}

/// Valid start coordinates on one axis so that `len` letters moving by `delta`
/// stay inside `[0, size)`. `None` when the word is longer than the grid.
fn start_range(delta: isize, len: usize, size: usize) -> Option<RangeInclusive<usize>> {
    if len == 0 || len > size {
        return None;
    }
    Some(match delta {
        1 => 0..=size - len,
        -1 => len - 1..=size - 1,
        _ => 0..=size - 1,
    })
}

fn try_place<R: Rng + ?Sized>(
    board: &mut Board,
    word: &str,
    max_attempts: usize,
    rng: &mut R,
) -> Option<Placement> {
    let letters: Vec<char> = word.chars().collect();
    let size = board.size;
    if letters.len() > size {
        debug!("skipping {word}: {} letters do not fit a {size}x{size} grid", letters.len());
        return None;
    }

    for attempt in 1..=max_attempts {
        let direction = Direction::ALL[rng.random_range(0..Direction::ALL.len())];
        let (dr, dc) = direction.delta();
        let (Some(rows), Some(cols)) = (
            start_range(dr, letters.len(), size),
            start_range(dc, letters.len(), size),
        ) else {
            return None;
        };
        let start = Cell::new(rng.random_range(rows), rng.random_range(cols));

        let Some(cells) = (0..letters.len())
            .map(|i| start.step(direction, i, size))
            .collect::<Option<Vec<Cell>>>()
        else {
            continue;
        };
        if !board.fits(&cells, &letters) {
            continue;
        }

        for (cell, letter) in cells.iter().zip(&letters) {
            board.set(*cell, *letter);
        }
        debug!("placed {word} at {start} going {direction:?} (attempt {attempt})");
        return Some(Placement { word: word.to_string(), direction, cells });
    }

    debug!("skipping {word}: no free line after {max_attempts} attempts");
    None
}

/// Place `words` on a fresh grid and fill the rest with random letters.
///
/// Words must already be uppercased (or otherwise match `config.alphabet`).
/// All randomness comes from `rng`, so a seeded generator gives reproducible
/// puzzles.
///
/// # Errors
///
/// Returns a [`GenerateError`] if `config` is invalid or a word is empty or uses
/// a character outside the alphabet. Words that merely fail to fit are not
/// errors; they are listed in [`GeneratedPuzzle::unplaced`].
pub fn generate<S, R>(words: &[S], config: &GeneratorConfig, rng: &mut R) -> Result<GeneratedPuzzle, GenerateError>
where
    S: AsRef<str>,
    R: Rng + ?Sized,
{
    config.validate(words)?;

    let mut board = Board::new(config.size);
    let mut placements = Vec::with_capacity(words.len());
    let mut unplaced = Vec::new();

    for word in words {
        let word = word.as_ref();
        match try_place(&mut board, word, config.max_attempts, rng) {
            Some(placement) => placements.push(placement),
            None => unplaced.push(word.to_string()),
        }
    }

    debug!(
        "generated {size}x{size} grid: {} placed, {} unplaced",
        placements.len(),
        unplaced.len(),
        size = config.size
    );

    let grid = board.fill(&config.alphabet, rng);
    Ok(GeneratedPuzzle { grid, placements, unplaced })
}

/// [`generate`] with a [`StdRng`] seeded from `seed`.
///
/// # Errors
///
/// Same as [`generate`].
pub fn generate_seeded<S: AsRef<str>>(words: &[S], config: &GeneratorConfig, seed: u64) -> Result<GeneratedPuzzle, GenerateError> {
    let mut rng = StdRng::seed_from_u64(seed);
    generate(words, config, &mut rng)
}
