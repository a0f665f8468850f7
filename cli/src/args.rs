//! CLI argument definitions for topic2crossword.

use crate::output::DEFAULT_TOPIC;
use clap::{ArgAction, Parser};
use std::path::PathBuf;
use topic2crossword_core::PageSize;
use topic2crossword_questions::Profile;

const EXIT_CODES: &str = "\
EXIT CODES:
    0  PDFs written
    1  Input file or configuration unreadable, bad arguments
    2  Too few usable questions
    3  Grid sizing failed
    4  Crossword generation failed
    5  Output files missing or too small";

#[derive(Parser, Debug)]
#[command(name = "topic2crossword")]
#[command(version)]
#[command(about = "Turn a JSON list of trivia questions into crossword PDFs", long_about = None)]
#[command(after_help = EXIT_CODES)]
pub struct Cli {
    /// JSON (or CSV) file with question/answer pairs
    #[arg(value_name = "QUESTIONS")]
    pub questions: PathBuf,

    /// Topic shown in the puzzle title and used in the file names
    #[arg(default_value = DEFAULT_TOPIC)]
    pub topic: String,

    /// Validation profile (basic, standard, strict)
    #[arg(long, value_name = "PROFILE")]
    pub profile: Option<Profile>,

    /// Minimum number of usable questions
    #[arg(long, value_name = "N")]
    pub min_questions: Option<usize>,

    /// Shortest accepted answer, in letters
    #[arg(long, value_name = "N")]
    pub min_length: Option<usize>,

    /// Longest accepted answer, in letters
    #[arg(long, value_name = "N")]
    pub max_length: Option<usize>,

    /// Only accept questions ending in '?'
    #[arg(long)]
    pub require_question_mark: bool,

    /// Keep answers that repeat an earlier one
    #[arg(long)]
    pub no_dedupe: bool,

    /// Maximum grid rows
    #[arg(long, value_name = "N")]
    pub rows: Option<usize>,

    /// Maximum grid columns
    #[arg(long, value_name = "N")]
    pub cols: Option<usize>,

    /// Paper size for the PDFs (a4, letter)
    #[arg(long, value_name = "SIZE")]
    pub page_size: Option<PageSize>,

    /// Seed for a reproducible layout
    #[arg(long)]
    pub seed: Option<u64>,

    /// Layout passes to try before keeping the best
    #[arg(long, value_name = "N")]
    pub attempts: Option<usize>,

    /// Directory the PDFs are written to
    #[arg(short, long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Smallest acceptable PDF size in bytes
    #[arg(long, value_name = "BYTES")]
    pub min_pdf_bytes: Option<u64>,

    /// Also save the puzzle as JSON (or text, for a .txt path)
    #[arg(long, value_name = "PATH")]
    pub save_puzzle: Option<PathBuf>,

    /// Validate and size the grid without writing any files
    #[arg(long)]
    pub dry_run: bool,

    /// Configuration file (default: ~/.topic2crossword/config.json)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// More log output (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Suppress all non-essential output
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}
