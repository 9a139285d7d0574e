//! Generate error code documentation from the source of truth (the error enum).
//!
//! This binary reads the error codes, descriptions, details, and help text
//! directly from `GenerateError` via its `code()`, `description()`,
//! `details()`, and `help()` methods.
//!
//! Run with:
//! ```bash
//! cargo run --bin generate_error_docs > docs/ERROR_CODES.md
//! ```

use std::fmt::Write;

use wordsearch::errors::GenerateError;

/// Helper to create all `GenerateError` variants for documentation
fn all_generate_error_variants() -> Vec<GenerateError> {
    vec![
        GenerateError::InvalidSize { size: 0 },
        GenerateError::ZeroAttempts,
        GenerateError::EmptyAlphabet,
        GenerateError::InvalidAlphabetChar { invalid_char: '7' },
        GenerateError::EmptyWord { index: 3 },
        GenerateError::InvalidWordChar { word: "ICE CREAM".to_string(), invalid_char: ' ' },
    ]
}

fn write_error_docs(out: &mut String, errors: &[GenerateError]) -> std::fmt::Result {
    for error in errors {
        writeln!(out, "### {}: {}\n", error.code(), error.description())?;
        writeln!(out, "**Details:** {}\n", error.details())?;

        if let Some(help_text) = error.help() {
            writeln!(out, "**How to fix:**")?;
            writeln!(out, "```\n{help_text}\n```\n")?;
        }

        writeln!(out, "**Example error message:**")?;
        writeln!(out, "```\n{error}\n```\n")?;

        writeln!(out, "**Detailed format:**")?;
        writeln!(out, "```\n{}\n```\n", error.display_detailed())?;

        writeln!(out, "---\n")?;
    }
    Ok(())
}

fn render() -> Result<String, std::fmt::Error> {
    let mut out = String::new();
    writeln!(out, "# Error Code Reference\n")?;
    writeln!(out, "**⚠️ This document is auto-generated from the source code. Do not edit manually.**\n")?;

    writeln!(out, "## Table of Contents\n")?;
    writeln!(out, "- [Generation Errors (G001–G006)](#generation-errors)")?;
    writeln!(out, "- [How to Use Error Codes](#how-to-use-error-codes)\n")?;

    writeln!(out, "## Generation Errors\n")?;
    writeln!(out, "Configuration errors reported before any grid is built. Words that merely fail to fit are not errors; they are listed as unplaced.\n")?;
    write_error_docs(&mut out, &all_generate_error_variants())?;

    writeln!(out, "\n## How to Use Error Codes\n")?;
    writeln!(out, "When you see an error like:\n")?;
    writeln!(out, "```\n{}\n```\n", GenerateError::InvalidSize { size: 0 }.display_detailed())?;
    writeln!(out, "1. Note the error code (e.g., `G001`)")?;
    writeln!(out, "2. Look it up in this document for detailed explanation")?;
    writeln!(out, "3. Follow the suggested resolution steps")?;
    Ok(out)
}

fn main() -> std::process::ExitCode {
    match render() {
        Ok(doc) => {
            print!("{doc}");
            std::process::ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::ExitCode::FAILURE
        }
    }
}
