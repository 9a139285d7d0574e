use crate::alphabet::Alphabet;
use crate::errors::GenerateError;
use crate::generator::GeneratorConfig;
use crate::grid::Cell;
use crate::log::init_logger;
use crate::score::{Difficulty, SessionOptions};
use crate::session::{PuzzleEvent, PuzzleSession};
use crate::word_list::WordList;
use wasm_bindgen::prelude::*;

use std::time::Duration;

use serde_wasm_bindgen::{from_value, to_value};

/// Structured error information for JavaScript consumers
#[derive(serde::Serialize)]
struct WasmError {
    /// Error code (e.g., "G001", "WASM002")
    code: String,
    /// Display message
    message: String,
    /// Short description of error type
    description: String,
    /// Detailed explanation
    details: String,
    /// Optional helpful suggestion
    #[serde(skip_serializing_if = "Option::is_none")]
    help: Option<String>,
}

impl From<GenerateError> for WasmError {
    fn from(e: GenerateError) -> Self {
        WasmError {
            code: e.code().to_string(),
            message: e.to_string(),
            description: e.description().to_string(),
            details: e.details().to_string(),
            help: e.help().map(|s| s.to_string()),
        }
    }
}

impl From<WasmError> for JsValue {
    fn from(e: WasmError) -> Self {
        let mut msg = format!("Error {}: {}", e.code, e.message);

        if !e.details.is_empty() {
            msg.push_str(&format!("\n\n{}", e.details));
        }

        if let Some(help) = e.help {
            msg.push_str(&format!("\n\nSuggestion: {}", help));
        }

        js_sys::Error::new(&msg).into()
    }
}

fn generate_error(e: GenerateError) -> JsValue {
    WasmError::from(e).into()
}

fn serialization_error(e: serde_wasm_bindgen::Error, what: &str) -> JsValue {
    WasmError {
        code: "WASM002".to_string(),
        message: format!("serialization failed: {e}"),
        description: format!("Failed to serialize {what}"),
        details: format!("The {what} could not be converted to JavaScript format."),
        help: Some("This is an internal error. Please report this issue.".to_string()),
    }
    .into()
}

fn words_from_js(words: JsValue) -> Result<Vec<String>, JsValue> {
    from_value(words).map_err(|e| {
        WasmError {
            code: "WASM001".to_string(),
            message: format!("words must be string[]: {e}"),
            description: "Invalid word-list format".to_string(),
            details: "The words parameter must be a JavaScript array of strings.".to_string(),
            help: Some("Ensure you're passing a valid string array, e.g., ['sol', 'luna', 'mar']".to_string()),
        }
        .into()
    })
}

fn options_error(message: String) -> JsValue {
    WasmError {
        code: "WASM003".to_string(),
        message,
        description: "Invalid session options".to_string(),
        details: "Difficulty must be easy, medium or hard, and the time limit a non-negative number of seconds.".to_string(),
        help: Some("Example: puzzle.setOptions('hard', 2, 180)".to_string()),
    }
    .into()
}

fn events_to_js(events: &[PuzzleEvent]) -> Result<JsValue, JsValue> {
    to_value(events).map_err(|e| serialization_error(e, "events"))
}

/// Initialize logging and the panic hook.
///
/// This function must be called from JavaScript after the WASM module loads.
#[wasm_bindgen]
pub fn initialize(debug_enabled: bool) {
    console_error_panic_hook::set_once();
    init_logger(debug_enabled);
    log::info!("WASM module initialized");
}

/// Parse `word` or `word;score` lines into an uppercase `string[]`.
#[wasm_bindgen]
pub fn parse_word_list(text: &str, min_score: i32) -> Result<JsValue, JsValue> {
    let list = WordList::parse_from_str(text, min_score);
    to_value(&list.words).map_err(|e| serialization_error(e, "word list"))
}

/// A puzzle session driven by pointer events from the page.
///
/// Pointer methods return an array of events:
/// `{ type: "path_changed", path }`, `{ type: "word_found", index, word }`,
/// `{ type: "completed" }`.
#[wasm_bindgen]
pub struct WasmPuzzle {
    session: PuzzleSession,
}

#[wasm_bindgen]
impl WasmPuzzle {
    /// `new WasmPuzzle(words: string[], size: number, seed?: number, alphabet?: string)`
    #[wasm_bindgen(constructor)]
    pub fn new(words: JsValue, size: usize, seed: Option<f64>, alphabet: Option<String>) -> Result<WasmPuzzle, JsValue> {
        let words = words_from_js(words)?;
        let alphabet = match alphabet {
            Some(letters) => Alphabet::new(&letters).map_err(generate_error)?,
            None => Alphabet::latin(),
        };
        let config = GeneratorConfig::default().with_size(size).with_alphabet(alphabet);
        // Math.random() keeps the OS entropy source out of the browser build
        let seed = seed.unwrap_or_else(|| js_sys::Math::random() * 9_007_199_254_740_992.0) as u64;
        let session = PuzzleSession::with_seed(&words, config, seed).map_err(generate_error)?;
        Ok(WasmPuzzle { session })
    }

    /// `setOptions(difficulty: "easy" | "medium" | "hard", hints: number, timeLimitSecs?: number)`
    #[wasm_bindgen(js_name = setOptions)]
    pub fn set_options(&mut self, difficulty: &str, hints: u32, time_limit_secs: Option<f64>) -> Result<(), JsValue> {
        let difficulty: Difficulty = difficulty.parse().map_err(options_error)?;
        let time_limit = match time_limit_secs {
            Some(secs) => Some(
                Duration::try_from_secs_f64(secs)
                    .map_err(|e| options_error(format!("invalid time limit {secs}: {e}")))?,
            ),
            None => None,
        };
        let options = SessionOptions::default()
            .with_difficulty(difficulty)
            .with_hints(hints)
            .with_time_limit(time_limit);
        self.session.set_options(options);
        Ok(())
    }

    pub fn size(&self) -> usize {
        self.session.size()
    }

    /// Rows of single-letter strings.
    pub fn grid(&self) -> Result<JsValue, JsValue> {
        let rows: Vec<Vec<char>> = self.session.grid().rows().map(<[char]>::to_vec).collect();
        to_value(&rows).map_err(|e| serialization_error(e, "grid"))
    }

    pub fn placements(&self) -> Result<JsValue, JsValue> {
        to_value(self.session.placements()).map_err(|e| serialization_error(e, "placements"))
    }

    pub fn unplaced(&self) -> Result<JsValue, JsValue> {
        to_value(self.session.unplaced()).map_err(|e| serialization_error(e, "unplaced words"))
    }

    #[wasm_bindgen(js_name = wordStatus)]
    pub fn word_status(&self) -> Result<JsValue, JsValue> {
        to_value(&self.session.word_status()).map_err(|e| serialization_error(e, "word status"))
    }

    #[wasm_bindgen(js_name = foundCells)]
    pub fn found_cells(&self) -> Result<JsValue, JsValue> {
        to_value(&self.session.found_cells()).map_err(|e| serialization_error(e, "found cells"))
    }

    #[wasm_bindgen(js_name = pointerDown)]
    pub fn pointer_down(&mut self, row: usize, col: usize) -> Result<JsValue, JsValue> {
        events_to_js(&self.session.pointer_down(Cell::new(row, col)))
    }

    #[wasm_bindgen(js_name = pointerEnter)]
    pub fn pointer_enter(&mut self, row: usize, col: usize) -> Result<JsValue, JsValue> {
        events_to_js(&self.session.pointer_enter(Cell::new(row, col)))
    }

    #[wasm_bindgen(js_name = pointerUp)]
    pub fn pointer_up(&mut self) -> Result<JsValue, JsValue> {
        events_to_js(&self.session.pointer_up())
    }

    #[wasm_bindgen(js_name = pointerLeave)]
    pub fn pointer_leave(&mut self) -> Result<JsValue, JsValue> {
        events_to_js(&self.session.pointer_leave())
    }

    /// Returns `true` when a new grid was generated.
    #[wasm_bindgen(js_name = setWords)]
    pub fn set_words(&mut self, words: JsValue) -> Result<bool, JsValue> {
        let words = words_from_js(words)?;
        self.session.set_words(&words).map_err(generate_error)
    }

    /// Returns `true` when a new grid was generated.
    #[wasm_bindgen(js_name = setSize)]
    pub fn set_size(&mut self, size: usize) -> Result<bool, JsValue> {
        self.session.set_size(size).map_err(generate_error)
    }

    /// `{ index, word, start, hints_left }`, or `null` when no hint is available.
    pub fn hint(&mut self) -> Result<JsValue, JsValue> {
        to_value(&self.session.hint()).map_err(|e| serialization_error(e, "hint"))
    }

    #[wasm_bindgen(js_name = isCompleted)]
    pub fn is_completed(&self) -> bool {
        self.session.is_completed()
    }

    pub fn score(&self) -> u32 {
        self.session.score()
    }
}

/// Generate a debug report for troubleshooting.
///
/// Users can copy/paste this when reporting issues. It includes the error
/// message, the puzzle inputs, and environment information.
#[wasm_bindgen]
pub fn get_debug_info(
    error_message: &str,
    word_count: usize,
    size: usize,
    seed: Option<f64>,
) -> String {
    use std::fmt::Write;
    let mut report = String::new();

    // NB: writing to a String never fails
    let _ = writeln!(&mut report, "=== WORDSEARCH DEBUG REPORT ===");
    let _ = writeln!(&mut report, "Version: {} ({})", env!("CARGO_PKG_VERSION"), env!("GIT_HASH_FULL"));
    let _ = writeln!(&mut report, "Generated: {}", js_sys::Date::new_0().to_iso_string().as_string().unwrap_or_else(|| "unknown".to_string()));
    let _ = writeln!(&mut report);

    let _ = writeln!(&mut report, "## Error");
    let _ = writeln!(&mut report, "{}", error_message);
    let _ = writeln!(&mut report);

    let _ = writeln!(&mut report, "## Input");
    let _ = writeln!(&mut report, "Word Count: {}", word_count);
    let _ = writeln!(&mut report, "Grid Size: {}", size);
    match seed {
        Some(seed) => {
            let _ = writeln!(&mut report, "Seed: {}", seed as u64);
        }
        None => {
            let _ = writeln!(&mut report, "Seed: random");
        }
    }
    let _ = writeln!(&mut report);

    let _ = writeln!(&mut report, "## Environment");
    if let Some(window) = web_sys::window() {
        if let Ok(user_agent) = window.navigator().user_agent() {
            let _ = writeln!(&mut report, "User Agent: {}", user_agent);
        }
        let _ = writeln!(&mut report, "Location: {}", window.location().href().unwrap_or_else(|_| "unknown".to_string()));
    }
    let _ = writeln!(&mut report);

    let _ = writeln!(&mut report, "=== END DEBUG REPORT ===");

    report
}
