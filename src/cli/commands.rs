//! CLI arguments parsing

use chrono::NaiveDate;
use clap::Parser;
use std::path::PathBuf;

/// Fetch every page of an offset-paginated query endpoint and count the records
#[derive(Parser, Debug)]
#[command(name = "pagefetch")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Configuration file (JSON or YAML)
    #[arg(short = 'C', long)]
    pub config: Option<PathBuf>,

    /// Query endpoint URL
    #[arg(short, long)]
    pub endpoint: Option<String>,

    /// Bearer token
    #[arg(long, env = "PAGEFETCH_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// First day of the date range (YYYY-MM-DD)
    #[arg(long)]
    pub start_date: Option<NaiveDate>,

    /// Last day of the date range (YYYY-MM-DD)
    #[arg(long)]
    pub end_date: Option<NaiveDate>,

    /// Fields to select (comma-separated)
    #[arg(short, long, value_delimiter = ',')]
    pub fields: Option<Vec<String>>,

    /// Page size
    #[arg(short, long)]
    pub limit: Option<u32>,

    /// Stop once this many records have been received
    #[arg(long)]
    pub max_records: Option<u64>,

    /// Per-request timeout in seconds
    #[arg(long)]
    pub timeout_secs: Option<u64>,

    /// Where records sit in each response body
    #[arg(long, value_enum, conflicts_with = "records_path")]
    pub records: Option<RecordsArg>,

    /// Dot path to the records array in each response body
    #[arg(long)]
    pub records_path: Option<String>,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

/// Record location choices available as a flag
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum RecordsArg {
    /// The body is the records array
    Root,
    /// The array is the body or sits under items/data/results
    Envelope,
}
