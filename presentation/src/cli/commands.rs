//! CLI command definitions

use boardroom_domain::DiscussionMode;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Output format for command results
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable, colored text
    Text,
    /// Pretty-printed JSON
    Json,
}

/// Discussion mode accepted on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ModeArg {
    /// Everyone speaks once per round, in seat order
    #[value(name = "round_robin", alias = "round-robin")]
    RoundRobin,
    /// Pro and con sides alternate with rebuttals
    Debate,
    /// Each round digs one layer deeper
    Focus,
    /// The least recently heard speak next
    Free,
}

impl From<ModeArg> for DiscussionMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::RoundRobin => DiscussionMode::RoundRobin,
            ModeArg::Debate => DiscussionMode::Debate,
            ModeArg::Focus => DiscussionMode::Focus,
            ModeArg::Free => DiscussionMode::Free,
        }
    }
}

/// CLI arguments for boardroom
#[derive(Parser, Debug)]
#[command(name = "boardroom")]
#[command(author, version, about = "Round-table discussions between AI director personas")]
#[command(long_about = r#"
Boardroom runs round-table meetings between director personas. Each turn
picks the next speaker by the meeting's discussion mode, shows them the
recent conversation, and records what they say.

Configuration files are loaded from (in priority order):
1. BOARDROOM_* environment variables
2. --config <path>       Explicit config file
3. ./boardroom.toml      Project-level config
4. ~/.config/boardroom/config.toml   Global config

Example:
  boardroom create "Q3 offsite" --topic "Remote work" -d socrates -d lovelace --mode debate
  boardroom start <meeting-id>
  boardroom run <meeting-id>
  boardroom summary <meeting-id>
"#)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text", global = true)]
    pub output: OutputFormat,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// List the configured directors
    Directors,

    /// Draft a new director from a character description
    Hire {
        /// Free-text description of the character
        prompt: String,

        /// Director id (defaults to a slug of the drafted name)
        #[arg(long)]
        id: Option<String>,
    },

    /// Create a meeting in the preparing state
    Create {
        /// Meeting title
        title: String,

        /// What the directors discuss
        #[arg(short, long)]
        topic: String,

        /// Director ids in seat order (repeat or comma-separate)
        #[arg(short, long = "director", value_name = "ID", value_delimiter = ',', required = true)]
        directors: Vec<String>,

        /// Turn-order policy
        #[arg(short, long, value_enum, default_value = "round_robin")]
        mode: ModeArg,

        /// Round budget enforced by `run` (0 = default)
        #[arg(long, default_value_t = 0)]
        max_rounds: u32,

        /// Optional longer description
        #[arg(long, default_value = "")]
        description: String,
    },

    /// Start a prepared meeting
    Start { meeting: String },

    /// Generate and record the next turn
    Turn { meeting: String },

    /// Keep advancing turns until the round budget is spent, then finish
    Run {
        meeting: String,

        /// Stop after this many turns even if rounds remain
        #[arg(long, value_name = "N")]
        turns: Option<u32>,

        /// Leave the meeting open when the budget is spent
        #[arg(long)]
        no_finish: bool,
    },

    /// Ask the directors a question; it reframes the next turn
    Ask {
        meeting: String,

        question: String,

        /// Name shown for the asker
        #[arg(long, value_name = "NAME")]
        asker: Option<String>,
    },

    /// Have every active director answer a pending question directly
    Respond { meeting: String, question: String },

    /// Generate and store a structured summary of the meeting
    Summary { meeting: String },

    /// Mark a meeting completed
    Finish { meeting: String },

    /// Show a meeting with its transcript and questions
    Show { meeting: String },

    /// List meetings, newest first
    List,

    /// Show configuration file locations
    Config,
}
