//! Command line argument parsing for the Quanda CLI using clap.

use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Quanda - keyword question answering over knowledge graphs
#[derive(Parser, Debug, Clone)]
#[command(name = "quanda")]
#[command(about = "A keyword question answering engine over knowledge graphs")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(author = "Quanda Contributors")]
#[command(long_about = None)]
pub struct QuandaArgs {
    /// Verbosity level (0=quiet, 1=normal, 2=verbose, 3=debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (overrides verbose)
    #[arg(short, long)]
    pub quiet: bool,

    /// Output format
    #[arg(short = 'f', long = "format", default_value = "human")]
    pub output_format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

impl QuandaArgs {
    /// Get the effective verbosity level
    pub fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            match self.verbose {
                0 => 1, // Default to normal
                n => n,
            }
        }
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Answer a keyword question
    Answer(AnswerArgs),

    /// Print the candidate graph built for a question
    Graph(GraphArgs),

    /// Probe the dictionary for a single phrase
    Lookup(LookupArgs),
}

/// Inputs shared by every command: the surface-form dictionary and,
/// where relations are needed, the triple file.
#[derive(Parser, Debug, Clone)]
pub struct AnswerArgs {
    /// Tab-separated surface-form file (ENTITY\tFORM1\tFORM2...)
    #[arg(value_name = "FORMS_FILE")]
    pub forms_file: PathBuf,

    /// Tab-separated triple file (SUBJ\tPRED\tOBJ)
    #[arg(value_name = "TRIPLES_FILE")]
    pub triples_file: PathBuf,

    /// The question to answer
    #[arg(value_name = "QUESTION")]
    pub question: String,

    /// Use the fuzzy dictionary backend instead of exact matching
    #[arg(long)]
    pub fuzzy: bool,

    /// Maximum edit distance per word (fuzzy backend)
    #[arg(long, default_value = "1")]
    pub max_edit_distance: usize,

    /// Maximum ranked hits per lookup (fuzzy backend)
    #[arg(long, default_value = "100")]
    pub max_results: usize,

    /// Maximum graph expansion rounds
    #[arg(long, default_value = "6")]
    pub max_rounds: usize,

    /// Maximum candidate-graph nodes
    #[arg(long, default_value = "10000")]
    pub max_nodes: usize,
}

/// Arguments for printing the candidate graph
#[derive(Parser, Debug, Clone)]
pub struct GraphArgs {
    #[command(flatten)]
    pub inputs: AnswerArgs,
}

/// Arguments for a single dictionary probe
#[derive(Parser, Debug, Clone)]
pub struct LookupArgs {
    /// Tab-separated surface-form file (ENTITY\tFORM1\tFORM2...)
    #[arg(value_name = "FORMS_FILE")]
    pub forms_file: PathBuf,

    /// The phrase to look up
    #[arg(value_name = "PHRASE")]
    pub phrase: String,

    /// Use the fuzzy dictionary backend instead of exact matching
    #[arg(long)]
    pub fuzzy: bool,

    /// Maximum edit distance per word (fuzzy backend)
    #[arg(long, default_value = "1")]
    pub max_edit_distance: usize,

    /// Maximum ranked hits per lookup (fuzzy backend)
    #[arg(long, default_value = "100")]
    pub max_results: usize,
}

/// Output format options
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON output
    Json,
}
