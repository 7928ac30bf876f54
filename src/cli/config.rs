// CLI configuration
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// id3lens - ID3v2.4 tag reader
#[derive(Parser, Debug)]
#[command(name = env!("CARGO_PKG_NAME"))]
#[command(about = "Reads text frames, lyrics and pictures from ID3v2.4 tags", long_about = None)]
#[command(version)]
pub struct Config {
    /// Set the log level (RUST_LOG overrides it per module)
    #[arg(long, global = true, value_enum, default_value_t = LogLevel::Warn)]
    pub loglevel: LogLevel,

    /// Quiet mode (suppress progress messages)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Subcommand
    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the tag of each file
    Show(ShowArgs),

    /// Write a text report and the attached pictures next to each file
    Extract(ExtractArgs),
}

#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Audio file path(s) or glob pattern(s)
    #[arg(value_name = "FILE", required = true)]
    pub files: Vec<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

#[derive(Args, Debug)]
pub struct ExtractArgs {
    /// Audio file path(s) or glob pattern(s)
    #[arg(value_name = "FILE", required = true)]
    pub files: Vec<String>,

    /// Directory for the report and images (defaults to each file's directory)
    #[arg(short, long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,
}

/// Output format for reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human readable report
    #[default]
    Text,
    /// Pretty-printed JSON, pictures as base64
    Json,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum LogLevel {
    /// Disable logging output.
    Off,
    /// No output except errors.
    Error,
    /// Show warnings and errors (default).
    Warn,
    /// Show info, warnings and errors.
    Info,
    /// Show every tag and frame header.
    Debug,
    /// Also show raw header bytes.
    Trace,
}

impl LogLevel {
    /// Convert LogLevel to log::LevelFilter
    pub fn to_level_filter(self) -> log::LevelFilter {
        match self {
            LogLevel::Off => log::LevelFilter::Off,
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}
