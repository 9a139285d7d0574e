use std::collections::BTreeSet;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::{Duration, Instant};

use clap::Parser;

use wordsearch::alphabet::Alphabet;
use wordsearch::errors::GenerateError;
use wordsearch::generator::{GeneratorConfig, DEFAULT_MAX_ATTEMPTS, DEFAULT_SIZE};
use wordsearch::grid::Cell;
use wordsearch::score::{Difficulty, SessionOptions};
use wordsearch::session::{PuzzleEvent, PuzzleSession};
use wordsearch::word_list::WordList;

const VERSION: &str = concat!(env!("CARGO_PKG_VERSION"), " (", env!("GIT_HASH"), ")");

/// Word-search puzzle generator
#[derive(Parser, Debug)]
#[command(author, version = VERSION, about, long_about = None)]
struct Cli {
    /// Words to hide in the grid (case-insensitive)
    words: Vec<String>,

    /// Path to a word list file (one word per line, optional ";score")
    #[arg(short = 'f', long)]
    word_list: Option<PathBuf>,

    /// Minimum score for scored word-list lines
    #[arg(short = 'm', long, default_value_t = 0)]
    min_score: i32,

    /// Rows and columns of the grid
    #[arg(short, long, default_value_t = DEFAULT_SIZE)]
    size: usize,

    /// Seed for a reproducible puzzle
    #[arg(long)]
    seed: Option<u64>,

    /// Placement attempts per word before it is left out
    #[arg(long, default_value_t = DEFAULT_MAX_ATTEMPTS)]
    attempts: usize,

    /// Letters allowed in words and used for filler (default A-Z)
    #[arg(long)]
    alphabet: Option<String>,

    /// Print the puzzle as JSON instead of text
    #[arg(long)]
    json: bool,

    /// Also print where each word was placed
    #[arg(long)]
    answers: bool,

    /// Play in the terminal: read drags ("row,col row,col") from stdin
    #[arg(long)]
    play: bool,

    /// Difficulty used for scoring
    #[arg(long, default_value_t = Difficulty::Medium)]
    difficulty: Difficulty,

    /// Hints available while playing
    #[arg(long, default_value_t = 3)]
    hints: u32,

    /// Time limit in seconds while playing
    #[arg(long)]
    time_limit: Option<u64>,
}

/// Entry point of the word-search CLI.
///
/// Delegates to [`try_main`], printing any error in a user-friendly way
/// before exiting with code 1.
fn main() -> ExitCode {
    let debug_enabled = std::env::var(wordsearch::log::DEBUG_ENV_VAR).is_ok();
    wordsearch::log::init_logger(debug_enabled);

    if let Err(e) = try_main() {
        if let Some(generate_err) = e.downcast_ref::<GenerateError>() {
            eprintln!("Error: {}", generate_err.display_detailed());
        } else {
            eprintln!("Error: {e}");
        }
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

/// Core application logic.
///
/// Steps:
/// 1. Gather words from the command line and the word-list file.
/// 2. Build the generator config and play options.
/// 3. Generate the puzzle.
/// 4. Print it (text or JSON), optionally with the answer key.
/// 5. Report unplaced words and timing on stderr.
/// 6. Optionally run an interactive game on stdin.
fn try_main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // 1. Gather words from the command line and the word-list file
    let mut words = cli.words.clone();
    if let Some(path) = &cli.word_list {
        let list = WordList::load_from_path(path, cli.min_score)?;
        log::info!("loaded {} words from {}", list.len(), path.display());
        words.extend(list.words);
    }
    if words.is_empty() {
        return Err("no words given (pass WORDS or --word-list)".into());
    }

    // 2. Build generator config and play options from the flags
    let alphabet = match cli.alphabet.as_deref() {
        Some(letters) => Alphabet::new(letters)?,
        None => Alphabet::latin(),
    };
    let config = GeneratorConfig::default()
        .with_size(cli.size)
        .with_max_attempts(cli.attempts)
        .with_alphabet(alphabet);
    let options = SessionOptions::default()
        .with_difficulty(cli.difficulty)
        .with_hints(cli.hints)
        .with_time_limit(cli.time_limit.map(Duration::from_secs));

    // 3. Generate the puzzle (seeded when --seed is given)
    let t_generate = Instant::now();
    let session = match cli.seed {
        Some(seed) => PuzzleSession::with_seed(&words, config, seed)?,
        None => PuzzleSession::new(&words, config)?,
    };
    let mut session = session.with_options(options);
    let generate_secs = t_generate.elapsed().as_secs_f64();

    // 4. Print the puzzle on stdout
    if cli.json {
        println!("{}", serde_json::to_string_pretty(session.puzzle())?);
    } else {
        print_board(&session);
        print_words(&session);
    }
    if cli.answers {
        print_answers(&session);
    }

    // 5. Print diagnostics (unplaced words, timing) to stderr
    for word in session.unplaced() {
        eprintln!("⚠️  Could not place {word}; it is not in this puzzle");
    }
    eprintln!(
        "Placed {}/{} words in a {size}x{size} grid in {:.3}s.",
        session.placements().len(),
        words.len(),
        generate_secs,
        size = session.size()
    );

    // 6. Optionally play interactively
    if cli.play {
        play(&mut session)?;
    }

    Ok(())
}

/// Print the grid; letters of found words are shown in lowercase.
fn print_board(session: &PuzzleSession) {
    let found = session.found_cells();
    let size = session.size();
    let header: Vec<String> = (0..size).map(|c| format!("{:>2}", c % 100)).collect();
    println!("   {}", header.join(""));
    for (r, row) in session.grid().rows().enumerate() {
        let line: String = row
            .iter()
            .enumerate()
            .map(|(c, letter)| format!(" {}", display_letter(*letter, found.contains(&Cell::new(r, c)))))
            .collect();
        println!("{:>2} {}", r % 100, line);
    }
}

fn display_letter(letter: char, found: bool) -> String {
    if found {
        letter.to_lowercase().collect()
    } else {
        letter.to_string()
    }
}

fn print_words(session: &PuzzleSession) {
    let words: Vec<String> = session
        .word_status()
        .into_iter()
        .map(|w| if w.found { format!("[{}]", w.word) } else { w.word })
        .collect();
    println!("Words: {}", words.join(" • "));
}

fn print_answers(session: &PuzzleSession) {
    for placement in session.placements() {
        if let (Some(start), Some(end)) = (placement.cells.first(), placement.cells.last()) {
            println!("{:<12} {start} → {end} ({:?})", placement.word, placement.direction);
        }
    }
}

fn parse_cell(token: &str) -> Option<Cell> {
    let (row, col) = token.split_once(',')?;
    Some(Cell::new(row.trim().parse().ok()?, col.trim().parse().ok()?))
}

fn parse_drag(line: &str) -> Option<(Cell, Cell)> {
    let mut tokens = line.split_whitespace();
    let from = parse_cell(tokens.next()?)?;
    let to = parse_cell(tokens.next()?)?;
    tokens.next().is_none().then_some((from, to))
}

/// Interactive loop: each line is a drag, `hint`, `grid`, or `quit`.
fn play(session: &mut PuzzleSession) -> io::Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    eprintln!("Drag with \"row,col row,col\" (e.g. \"2,2 2,4\"); also: hint, grid, quit");

    for line in stdin.lock().lines() {
        let line = line?;
        match line.trim() {
            "" => continue,
            "quit" | "q" => break,
            "grid" => print_board(session),
            "hint" => match session.hint() {
                Some(hint) => println!("{} starts at {} ({} hints left)", hint.word, hint.start, hint.hints_left),
                None => println!("No hint available"),
            },
            cmd => match parse_drag(cmd) {
                Some((from, to)) => drag(session, from, to),
                None => eprintln!("Could not read \"{cmd}\"; expected \"row,col row,col\""),
            },
        }
        stdout.flush()?;

        if session.is_completed() {
            println!("All words found! Score: {}", session.score());
            break;
        }
        if session.is_expired() {
            println!("Time is up. Score: {}", session.score());
            break;
        }
    }
    Ok(())
}

fn drag(session: &mut PuzzleSession, from: Cell, to: Cell) {
    let mut events = session.pointer_down(from);
    events.extend(session.pointer_enter(to));
    let selected = session.grid().letters_at(session.current_path());
    events.extend(session.pointer_up());

    let found: BTreeSet<&str> = events
        .iter()
        .filter_map(|e| match e {
            PuzzleEvent::WordFound { word, .. } => Some(word.as_str()),
            _ => None,
        })
        .collect();
    if found.is_empty() {
        println!("No word at {from} → {to} ({selected})");
    } else {
        for word in found {
            println!("Found {word}!");
        }
        print_board(session);
    }
}
