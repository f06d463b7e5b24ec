use clap::{Parser, ValueEnum};
use std::path::PathBuf;

#[derive(ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// JSON response body
    #[default]
    Json,
    /// Human-readable report
    Text,
}

#[derive(Parser, Debug)]
#[command(
    name = "text-processor",
    about = "Count words, extract email addresses and build token frequency tables",
    version,
    long_about = None
)]
pub struct Args {
    /// Files to analyze, one document each (`-` reads standard input)
    pub files: Vec<PathBuf>,

    /// Analyze this text instead of reading files
    #[arg(long, conflicts_with = "files")]
    pub text: Option<String>,

    /// Treat each input as a JSON request body of the form {"text": "..."}
    #[arg(short, long)]
    pub json: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,

    /// Indent JSON output
    #[arg(long)]
    pub pretty: bool,

    /// Number of most frequent tokens to display
    #[arg(short, long)]
    pub top: Option<usize>,

    /// Number of least frequent tokens to display
    #[arg(long)]
    pub bottom: Option<usize>,

    /// Mask email addresses in the text report
    #[arg(long)]
    pub redact: bool,

    /// Runtime tag reported as the architecture
    #[arg(short, long, env = "RUNTIME_TAG")]
    pub arch: Option<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Number of worker threads for multi-document runs
    #[arg(short, long)]
    pub workers: Option<usize>,

    /// Print service information and exit
    #[arg(long)]
    pub info: bool,
}
