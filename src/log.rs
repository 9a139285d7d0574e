#[cfg(not(target_arch = "wasm32"))]
use log::LevelFilter;

/// Environment variable that turns on debug logging in the CLI.
pub const DEBUG_ENV_VAR: &str = "WORDSEARCH_DEBUG";

/// Initialize logging for the puzzle engine.
///
/// # Behavior
/// - **Native (CLI):** `Debug` level if `debug_enabled`, otherwise `Info`; `RUST_LOG`
///   overrides both when set.
/// - **WASM:** logs to the browser console at `Debug` or `Info` level.
///
/// Calling it twice is harmless; the second call only logs a warning.
pub fn init_logger(debug_enabled: bool) {
    #[cfg(target_arch = "wasm32")]
    {
        let level = if debug_enabled {
            log::Level::Debug
        } else {
            log::Level::Info
        };

        match console_log::init_with_level(level) {
            Ok(()) => {
                log::info!("WASM logger initialized at {level:?} level");
            }
            Err(e) => {
                let msg = format!("Failed to initialize console_log: {e}. Logging will be unavailable.");
                web_sys::console::error_1(&msg.into());
            }
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        use std::env;
        let level = if debug_enabled {
            LevelFilter::Debug
        } else {
            LevelFilter::Info
        };

        let mut builder = env_logger::Builder::new();
        builder
            .filter(None, level)
            .format_timestamp(None)
            .format_module_path(false)
            .format_target(false);

        // Let RUST_LOG override our defaults if explicitly set
        if let Ok(spec) = env::var("RUST_LOG") {
            builder.parse_filters(&spec);
        }

        match builder.try_init() {
            Ok(()) => log::debug!("Native logger initialized at {level:?} level"),
            Err(e) => log::warn!("logger already initialized: {e}"),
        }
    }
}
