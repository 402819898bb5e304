use clap::{Args, Parser, Subcommand, ValueEnum};
use leitner_core::Difficulty;
use std::path::PathBuf;

#[derive(Debug, Parser, Clone)]
#[command(name = "leitner", version, about = "Modified-Leitner flashcard scheduler")]
pub struct Cli {
    /// Deck file (defaults to the app data dir)
    #[arg(long, global = true)]
    pub deck: Option<PathBuf>,

    /// Logging level; falls back to LEITNER_LOG, then warn
    #[arg(long, value_enum, global = true)]
    pub log_level: Option<LogLevel>,

    #[command(subcommand)]
    pub cmd: Command,
}

#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Create a deck from a JSON list of cards, all in bucket 0
    Init(InitCmd),
    /// Print the cards due on a day
    Practice {
        #[arg(long)]
        day: u32,
    },
    /// Record how a practice trial went
    Answer(AnswerCmd),
    /// Print the hint for a card
    Hint {
        #[arg(long)]
        card: String,
    },
    /// Print the range of occupied buckets
    Range,
    /// Print progress statistics
    Progress,
    /// Print every bucket, empty ones included
    Buckets,
    /// Answer every due card the same way for a run of days
    Simulate(SimulateCmd),
}

#[derive(Debug, Args, Clone)]
pub struct InitCmd {
    /// JSON array of {front, back, hint?, tags?}
    #[arg(long)]
    pub cards: PathBuf,
    /// Overwrite an existing deck
    #[arg(long)]
    pub force: bool,
}

#[derive(Debug, Args, Clone)]
pub struct AnswerCmd {
    #[arg(long)]
    pub day: u32,
    #[arg(long)]
    pub card: String,
    #[arg(long, value_enum)]
    pub difficulty: DifficultyArg,
}

#[derive(Debug, Args, Clone)]
pub struct SimulateCmd {
    #[arg(long)]
    pub days: u32,
    /// First simulated day (defaults to the day after the last answer)
    #[arg(long)]
    pub start: Option<u32>,
    #[arg(long, value_enum, default_value_t = DifficultyArg::Easy)]
    pub difficulty: DifficultyArg,
}

#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum DifficultyArg {
    Wrong,
    Hard,
    Easy,
}

impl From<DifficultyArg> for Difficulty {
    fn from(d: DifficultyArg) -> Self {
        match d {
            DifficultyArg::Wrong => Difficulty::Wrong,
            DifficultyArg::Hard => Difficulty::Hard,
            DifficultyArg::Easy => Difficulty::Easy,
        }
    }
}
