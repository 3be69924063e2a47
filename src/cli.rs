use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "bucketmap")]
#[command(about = "Normalize per-entity indicators into choropleth buckets", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Normalize entity fields into buckets
    Normalize {
        /// JSON object of entities keyed by identifier ("-" for stdin)
        input: PathBuf,

        /// Fields to normalize (defaults to `normalization.fields` from config)
        #[arg(short, long, value_delimiter = ',')]
        fields: Option<Vec<String>>,

        /// Configuration file (defaults to the nearest .bucketmap.toml)
        #[arg(short, long, env = "BUCKETMAP_CONFIG")]
        config: Option<PathBuf>,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Pretty-print JSON output
        #[arg(long)]
        pretty: bool,

        /// Disable parallel processing
        #[arg(long)]
        sequential: bool,
    },

    /// Show min/max statistics for entity fields
    ///
    /// Fields without any numeric value report `"Infinity"` / `"-Infinity"`
    /// bounds and a count of 0.
    Stats {
        /// JSON object of entities keyed by identifier ("-" for stdin)
        input: PathBuf,

        /// Fields to analyze (defaults to `normalization.fields` from config)
        #[arg(short, long, value_delimiter = ',')]
        fields: Option<Vec<String>>,

        /// Configuration file (defaults to the nearest .bucketmap.toml)
        #[arg(short, long, env = "BUCKETMAP_CONFIG")]
        config: Option<PathBuf>,

        /// Pretty-print JSON output
        #[arg(long)]
        pretty: bool,
    },

    /// Look ranks up in a classification table
    Classify {
        /// Table name: restriction, shortage, or a table from config
        #[arg(short, long)]
        table: String,

        /// Configuration file (defaults to the nearest .bucketmap.toml)
        #[arg(short, long, env = "BUCKETMAP_CONFIG")]
        config: Option<PathBuf>,

        /// Ranks to classify
        #[arg(required = true, allow_negative_numbers = true)]
        ranks: Vec<f64>,
    },

    /// Convert color strings to canonical hex
    Color {
        /// Colors to convert (hex, rgb(...), or a named color)
        #[arg(required = true)]
        values: Vec<String>,
    },

    /// Write a default .bucketmap.toml into the current directory
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}
