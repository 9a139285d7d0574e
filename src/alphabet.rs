use std::fmt;
use std::sync::LazyLock;

use rand::Rng;

use crate::errors::GenerateError;

// Character-set constants
pub const LATIN_UPPERCASE: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";

static LATIN: LazyLock<Alphabet> = LazyLock::new(|| Alphabet {
    letters: LATIN_UPPERCASE.chars().collect(),
});

/// The letters a puzzle may contain: word letters must belong to it, and
/// leftover cells are filled from it.
///
/// Always non-empty, uppercase, and free of duplicates (first occurrence wins).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alphabet {
    letters: Vec<char>,
}

impl Alphabet {
    /// `A` through `Z`.
    #[must_use]
    pub fn latin() -> Alphabet {
        LATIN.clone()
    }

    /// Build an alphabet from the letters of `chars`, uppercased.
    ///
    /// # Errors
    ///
    /// [`GenerateError::EmptyAlphabet`] when `chars` has no letters, and
    /// [`GenerateError::InvalidAlphabetChar`] for anything non-alphabetic.
    pub fn new(chars: &str) -> Result<Alphabet, GenerateError> {
        let mut letters = Vec::new();
        for c in chars.chars().flat_map(char::to_uppercase) {
            if !c.is_alphabetic() {
                return Err(GenerateError::InvalidAlphabetChar { invalid_char: c });
            }
            if !letters.contains(&c) {
                letters.push(c);
            }
        }
        if letters.is_empty() {
            return Err(GenerateError::EmptyAlphabet);
        }
        Ok(Alphabet { letters })
    }

    #[must_use]
    pub fn contains(&self, c: char) -> bool {
        self.letters.contains(&c)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.letters.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.letters.is_empty()
    }

    /// First character of `word` that is not in this alphabet, if any.
    #[must_use]
    pub fn first_foreign(&self, word: &str) -> Option<char> {
        word.chars().find(|c| !self.contains(*c))
    }

    /// A uniformly random letter.
    pub fn random_letter<R: Rng + ?Sized>(&self, rng: &mut R) -> char {
        self.letters[rng.random_range(0..self.letters.len())]
    }
}

impl Default for Alphabet {
    fn default() -> Self {
        Alphabet::latin()
    }
}

impl fmt::Display for Alphabet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s: String = self.letters.iter().collect();
        write!(f, "{s}")
    }
}
