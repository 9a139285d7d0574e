// Library API shared by the CLI and WASM builds
pub mod alphabet;
pub mod errors;
pub mod generator;
pub mod grid;
pub mod log;
pub mod score;
pub mod selection;
pub mod session;
pub mod validator;
pub mod word_list;

// Compile the wasm glue only when targeting wasm32.
#[cfg(target_arch = "wasm32")]
pub mod wasm;

pub use errors::GenerateError;
pub use generator::{generate, generate_seeded, GeneratedPuzzle, GeneratorConfig, Placement};
pub use grid::{Cell, Direction, Grid};
pub use session::{PointerAction, PuzzleEvent, PuzzleSession};
