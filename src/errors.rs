//! Error types for puzzle configuration, with error codes and helpful messages.
//!
//! # Error Codes
//!
//! Each error variant has a unique code (G001-G006) for documentation lookup:
//!
//! - G001: `InvalidSize` (Grid size must be at least 1)
//! - G002: `ZeroAttempts` (Placement retry budget must be at least 1)
//! - G003: `EmptyAlphabet` (Alphabet has no letters)
//! - G004: `InvalidAlphabetChar` (Alphabet contains a non-letter)
//! - G005: `EmptyWord` (Word list contains an empty word)
//! - G006: `InvalidWordChar` (Word uses a letter outside the alphabet)
//!
//! Only configuration problems are errors. A word that cannot be placed is not:
//! it is reported through [`GeneratedPuzzle::unplaced`](crate::generator::GeneratedPuzzle::unplaced).
//!
//! # Examples
//!
//! ```
//! use wordsearch::errors::GenerateError;
//! use wordsearch::generator::{generate_seeded, GeneratorConfig};
//!
//! let config = GeneratorConfig::default().with_size(0);
//! match generate_seeded(&["CAT"], &config, 7) {
//!     Err(e) => {
//!         assert_eq!(e.code(), "G001");
//!         println!("{}", e.display_detailed());
//!     }
//!     Ok(_) => unreachable!("a zero-sized grid is rejected"),
//! }
//! ```

use std::io;

/// Configuration error raised synchronously by generation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GenerateError {
    #[error("Invalid grid size {size} (must be at least 1)")]
    InvalidSize { size: usize },

    #[error("Placement retry budget must be at least 1")]
    ZeroAttempts,

    #[error("Alphabet is empty")]
    EmptyAlphabet,

    #[error("Invalid alphabet character {invalid_char:?} (only letters allowed)")]
    InvalidAlphabetChar { invalid_char: char },

    #[error("Word #{index} is empty")]
    EmptyWord { index: usize },

    #[error("Word \"{word}\" contains '{invalid_char}', which is not in the alphabet")]
    InvalidWordChar { word: String, invalid_char: char },
}

impl From<GenerateError> for io::Error {
    fn from(ge: GenerateError) -> Self {
        io::Error::new(io::ErrorKind::InvalidInput, ge.to_string())
    }
}

impl GenerateError {
    /// Returns the error code for this error variant
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            GenerateError::InvalidSize { .. } => "G001",
            GenerateError::ZeroAttempts => "G002",
            GenerateError::EmptyAlphabet => "G003",
            GenerateError::InvalidAlphabetChar { .. } => "G004",
            GenerateError::EmptyWord { .. } => "G005",
            GenerateError::InvalidWordChar { .. } => "G006",
        }
    }

    /// Returns a short description of this error type (for documentation)
    #[must_use]
    pub fn description(&self) -> &'static str {
        match self {
            GenerateError::InvalidSize { .. } => "Grid size must be at least 1",
            GenerateError::ZeroAttempts => "Placement retry budget must be at least 1",
            GenerateError::EmptyAlphabet => "Alphabet has no letters",
            GenerateError::InvalidAlphabetChar { .. } => "Alphabet contains a non-letter",
            GenerateError::EmptyWord { .. } => "Word list contains an empty word",
            GenerateError::InvalidWordChar { .. } => "Word uses a letter outside the alphabet",
        }
    }

    /// Returns detailed explanation of this error type (for documentation)
    #[must_use]
    pub fn details(&self) -> &'static str {
        match self {
            GenerateError::InvalidSize { .. } => "The grid is square with `size` rows and `size` columns. A size of zero leaves no cells to fill.",
            GenerateError::ZeroAttempts => "Each word gets a fixed number of random placement attempts. With zero attempts no word could ever be placed.",
            GenerateError::EmptyAlphabet => "Empty cells are filled with random letters drawn from the alphabet, so it needs at least one letter.",
            GenerateError::InvalidAlphabetChar { .. } => "Alphabet characters are drawn into grid cells and must be alphabetic (digits, spaces and punctuation are rejected).",
            GenerateError::EmptyWord { .. } => "Every word must have at least one letter to occupy a cell.",
            GenerateError::InvalidWordChar { .. } => "Words are validated against the alphabet before generation so that the grid only ever contains alphabet letters.",
        }
    }

    /// Returns a helpful suggestion for this error
    #[must_use]
    pub fn help(&self) -> Option<&'static str> {
        match self {
            GenerateError::InvalidSize { .. } => Some("Use a size between 8 and 15 for a typical puzzle (e.g., '--size 10')"),
            GenerateError::ZeroAttempts => Some("The default of 300 attempts works well; use at least 100"),
            GenerateError::EmptyAlphabet => Some("Omit the alphabet to use A-Z, or pass letters like 'ABCDEFGHIJKLMNÑOPQRSTUVWXYZ'"),
            GenerateError::InvalidAlphabetChar { .. } => Some("Remove digits, spaces and punctuation from the alphabet"),
            GenerateError::EmptyWord { .. } => Some("Remove blank entries from the word list"),
            GenerateError::InvalidWordChar { .. } => Some("Remove spaces and punctuation from the word, or extend the alphabet with the missing letter"),
        }
    }

    /// Formats the error with code and optional help text
    #[must_use]
    pub fn display_detailed(&self) -> String {
        format_error_with_code_and_help(&self.to_string(), self.code(), self.help())
    }
}

/// Helper function to format error messages with code and optional help text
pub(crate) fn format_error_with_code_and_help(base_msg: &str, code: &str, help: Option<&str>) -> String {
    if let Some(help_text) = help {
        format!("{base_msg} ({code})\n{help_text}")
    } else {
        format!("{base_msg} ({code})")
    }
}
