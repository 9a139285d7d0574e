//! End-of-game scoring and hint bookkeeping.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::grid::Cell;

const EASY_BASE: u32 = 100;
const MEDIUM_BASE: u32 = 200;
const HARD_BASE: u32 = 350;
const WIN_BONUS: u32 = 150;
const HINT_PENALTY: u32 = 25;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    #[must_use]
    pub fn base_score(self) -> u32 {
        match self {
            Difficulty::Easy => EASY_BASE,
            Difficulty::Medium => MEDIUM_BASE,
            Difficulty::Hard => HARD_BASE,
        }
    }
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            _ => Err(format!("Invalid difficulty '{s}' (expected: easy, medium, hard)")),
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        };
        write!(f, "{s}")
    }
}

/// Per-session play options that do not affect the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionOptions {
    pub difficulty: Difficulty,
    /// Hints available per generated puzzle.
    pub hints: u32,
    /// Countdown length; `None` for untimed play.
    pub time_limit: Option<Duration>,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self { difficulty: Difficulty::Medium, hints: 3, time_limit: None }
    }
}

impl SessionOptions {
    #[must_use]
    pub fn with_difficulty(mut self, difficulty: Difficulty) -> Self {
        self.difficulty = difficulty;
        self
    }

    #[must_use]
    pub fn with_hints(mut self, hints: u32) -> Self {
        self.hints = hints;
        self
    }

    #[must_use]
    pub fn with_time_limit(mut self, time_limit: Option<Duration>) -> Self {
        self.time_limit = time_limit;
        self
    }
}

/// A revealed word start.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hint {
    pub index: usize,
    pub word: String,
    pub start: Cell,
    pub hints_left: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameStats {
    pub difficulty: Difficulty,
    pub hints_used: u32,
    /// Whole seconds left on the countdown (0 when untimed or expired).
    pub time_remaining_secs: u64,
    pub won: bool,
}

/// Difficulty base, plus seconds remaining, plus the win bonus, minus a penalty
/// per hint; never below zero.
#[must_use]
pub fn compute_score(stats: &GameStats) -> u32 {
    let time_bonus = u32::try_from(stats.time_remaining_secs).unwrap_or(u32::MAX);
    let win_bonus = if stats.won { WIN_BONUS } else { 0 };
    stats
        .difficulty
        .base_score()
        .saturating_add(time_bonus)
        .saturating_add(win_bonus)
        .saturating_sub(stats.hints_used.saturating_mul(HINT_PENALTY))
}
