use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Evaluate serialized matcher rules against syslog records
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// TOML config file
    #[arg(short, long, global = true, env = "SYSLOG_MATCHER_CONFIG")]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Only print results, no diagnostics
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// When to colorize output
    #[arg(long, global = true, value_enum, default_value_t = ColorMode::Auto)]
    pub color: ColorMode,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Load and validate a rules file, printing each rule
    Check {
        /// Rules file (JSON or JSON5)
        rules: PathBuf,
    },
    /// Evaluate rules against newline-delimited JSON records
    Eval {
        /// Rules file (JSON or JSON5)
        rules: PathBuf,

        /// Records file, one JSON object per line
        records: PathBuf,

        /// Print every record with its verdict instead of only matches
        #[arg(long)]
        all: bool,

        /// Select records that match no rule
        #[arg(long)]
        invert: bool,

        /// Output format
        #[arg(short = 'F', long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// Print the canonical encoding of a rules file
    Fmt {
        /// Rules file (JSON or JSON5)
        rules: PathBuf,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorMode {
    Auto,
    Always,
    Never,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

pub fn cli_parse() -> Cli {
    Cli::parse()
}
