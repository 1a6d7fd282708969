//! Command line argument parsing for the Polarity CLI using clap.

use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::analysis::analyzer::AnalyzerKind;
use crate::dataset::DEFAULT_DATASET_URL;

/// Polarity - binary sentiment classification for review text
#[derive(Parser, Debug, Clone)]
#[command(name = "polarity")]
#[command(about = "Binary sentiment classification for product review text")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(author = "Polarity Contributors")]
#[command(long_about = None)]
pub struct PolarityArgs {
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

impl PolarityArgs {
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
    /// Download the review dataset if it is not already present
    Fetch(FetchArgs),

    /// Train a sentiment model with a hyperparameter sweep
    Train(TrainArgs),

    /// Evaluate a saved model on a labeled TSV
    Evaluate(EvaluateArgs),

    /// Classify a piece of text with a saved model
    Predict(PredictArgs),

    /// Show a saved model's metadata and training statistics
    Info(InfoArgs),
}

/// Arguments for fetching the dataset
#[derive(Parser, Debug, Clone)]
pub struct FetchArgs {
    /// Path where the dataset TSV should live
    #[arg(value_name = "DATA_PATH")]
    pub data_path: PathBuf,

    /// URL to download the dataset from
    #[arg(long, default_value = DEFAULT_DATASET_URL)]
    pub url: String,
}

/// Arguments for training a model
#[derive(Parser, Debug, Clone)]
pub struct TrainArgs {
    /// Path to the review dataset TSV
    #[arg(value_name = "DATA_PATH")]
    pub data_path: PathBuf,

    /// Path to write the trained model to
    #[arg(value_name = "MODEL_PATH")]
    pub model_path: PathBuf,

    /// Download the dataset first if it is missing
    #[arg(long)]
    pub fetch: bool,

    /// URL used with --fetch
    #[arg(long, default_value = DEFAULT_DATASET_URL)]
    pub url: String,

    /// Number of hash buckets for text features
    #[arg(long, default_value = "65536")]
    pub num_features: usize,

    /// Analyzer used for featurization
    #[arg(long, value_enum, default_value = "standard")]
    pub analyzer: AnalyzerArg,

    /// Seed for the train/test/validation split
    #[arg(long, default_value = "42")]
    pub seed: u64,

    /// Iteration budget per sweep candidate
    #[arg(long, default_value = "100")]
    pub max_iter: usize,
}

/// Arguments for evaluating a model
#[derive(Parser, Debug, Clone)]
pub struct EvaluateArgs {
    /// Path to the saved model
    #[arg(value_name = "MODEL_PATH")]
    pub model_path: PathBuf,

    /// Path to the labeled TSV to evaluate on
    #[arg(value_name = "DATA_PATH")]
    pub data_path: PathBuf,
}

/// Arguments for classifying text
#[derive(Parser, Debug, Clone)]
pub struct PredictArgs {
    /// Path to the saved model
    #[arg(value_name = "MODEL_PATH")]
    pub model_path: PathBuf,

    /// Text to classify
    #[arg(value_name = "TEXT")]
    pub text: String,
}

/// Arguments for showing model information
#[derive(Parser, Debug, Clone)]
pub struct InfoArgs {
    /// Path to the saved model
    #[arg(value_name = "MODEL_PATH")]
    pub model_path: PathBuf,
}

/// Analyzer choices exposed on the command line
#[derive(ValueEnum, Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnalyzerArg {
    /// Unicode word tokenizer + lowercase
    Standard,
    /// Unicode word tokenizer + lowercase + English stop words
    StandardStop,
    /// Whitespace tokenizer + lowercase
    Whitespace,
}

impl From<AnalyzerArg> for AnalyzerKind {
    fn from(arg: AnalyzerArg) -> Self {
        match arg {
            AnalyzerArg::Standard => AnalyzerKind::Standard,
            AnalyzerArg::StandardStop => AnalyzerKind::StandardStop,
            AnalyzerArg::Whitespace => AnalyzerKind::Whitespace,
        }
    }
}

/// Output formats for CLI
#[derive(ValueEnum, Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON output
    Json,
}
