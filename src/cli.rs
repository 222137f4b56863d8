use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::cue::CueMode;

#[derive(Debug, Parser)]
#[command(name = "assvtt")]
#[command(about = "Convert parsed ASS/SSA subtitle documents (JSON) into WebVTT.")]
pub struct Args {
    /// Path to config TOML (defaults to ./assvtt.toml if present)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Override log level (trace, debug, info, warn, error)
    #[arg(long)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Convert a parsed ASS document to WebVTT
    Convert(ConvertCmd),
    /// Print the effective default config as TOML and exit
    PrintDefaultConfig,
}

#[derive(Debug, Parser)]
pub struct ConvertCmd {
    /// Parsed ASS JSON file path, or '-' for stdin
    pub input: String,

    /// Output file path (defaults to the input name with a .vtt extension)
    #[arg(short, long)]
    pub output: Option<String>,

    /// Cue body mode (overrides config)
    #[arg(long, value_enum)]
    pub mode: Option<CueMode>,

    /// Write the omitted/degraded line report here (.tsv or .json)
    #[arg(long)]
    pub report: Option<PathBuf>,

    /// Write to stdout instead of a file
    #[arg(long)]
    pub stdout: bool,

    /// Allow overwriting output file
    #[arg(long)]
    pub overwrite: bool,
}
