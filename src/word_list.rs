//! Loading the words for a puzzle from text.
//!
//! Words can come from a file (native builds) or an in-memory string (the only
//! option in WebAssembly, where the browser hands us the text).
//!
//! The parsing logic:
//! - One word per line, optionally followed by `;score`.
//! - Blank lines and lines starting with `#` are skipped.
//! - A line whose score does not parse is skipped; unscored lines always pass.
//! - Scored lines below `min_score` are skipped.
//! - Words are trimmed and uppercased, then deduplicated.
//! - The final list is ordered longest first, then alphabetically, which is the
//!   order the generator has the best chance of placing them in.

/// A processed, ready-to-generate list of uppercase words.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WordList {
    /// Example: `["ESTRELLA", "LUNA", "NUBE", "MAR", "SOL"]`
    pub words: Vec<String>,
}

impl WordList {
    /// Parse a word list from an in-memory string.
    ///
    /// 1. Splits the input into lines and trims them.
    /// 2. Skips blank lines and `#` comments.
    /// 3. Splits off an optional `;score`, skipping unparsable or low scores.
    /// 4. Uppercases the word.
    /// 5. Deduplicates.
    /// 6. Sorts by letter count (longest first), then alphabetically.
    #[must_use]
    pub fn parse_from_str(contents: &str, min_score: i32) -> WordList {
        // Steps 1-4: split lines, drop comments and low scores, uppercase
        let mut words: Vec<String> = contents
            .lines()
            .filter_map(|raw_line| {
                let line = raw_line.trim();
                if line.is_empty() || line.starts_with('#') {
                    return None;
                }
                let word = match line.split_once(';') {
                    Some((word_raw, score_raw)) => {
                        let score: i32 = score_raw.trim().parse().ok()?;
                        if score < min_score {
                            return None;
                        }
                        word_raw
                    }
                    None => line,
                };
                let word = word.trim().to_uppercase();
                (!word.is_empty()).then_some(word)
            })
            .collect();

        // Step 5: Deduplicate; dedup() only drops adjacent duplicates, so sort first
        words.sort();
        words.dedup();
        // Step 6: Longest first, then alphabetically
        words.sort_by(|a, b| {
            b.chars().count().cmp(&a.chars().count()).then_with(|| a.cmp(b))
        });

        WordList { words }
    }

    /// Native-only convenience method: read from a file path and parse.
    ///
    /// # Errors
    ///
    /// Will return an `Error` if unable to read a file at `path`.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_from_path<P: AsRef<std::path::Path>>(path: P, min_score: i32) -> std::io::Result<WordList> {
        let path_ref = path.as_ref();
        let data = std::fs::read_to_string(path_ref).map_err(|e| {
            std::io::Error::new(
                e.kind(),
                format!("failed to read word list from '{}': {}", path_ref.display(), e),
            )
        })?;
        Ok(Self::parse_from_str(&data, min_score))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.words.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}
