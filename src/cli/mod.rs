use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use csv_format_support::pipeline::OutputFormat;

mod config;
mod info;
mod process;

/// csv-format-support - Dataset Normalization Pipeline
#[derive(Parser)]
#[command(name = "csv-format-support")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Verbosity level (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

/// Output representation override.
#[derive(Clone, Copy, Debug, Default, ValueEnum)]
pub enum FormatArg {
    /// Canonical comma-delimited loader CSV
    #[default]
    Csv,
}

impl From<FormatArg> for OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Csv => OutputFormat::Csv,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Normalize a delimited molecule file into the canonical loader format
    Process {
        /// Input dataset file path (optionally gzip-compressed)
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        /// Directory receiving the loader file and annotation artifact
        #[arg(short = 'o', long, default_value = ".", value_name = "DIR")]
        output_dir: PathBuf,

        /// Whether the first line is a header row (default: true)
        #[arg(long, action = clap::ArgAction::Set, value_name = "BOOL")]
        header: Option<bool>,

        /// Synthesize identifiers for missing or invalid ones (default: true)
        #[arg(long, action = clap::ArgAction::Set, value_name = "BOOL")]
        generate_uuid: Option<bool>,

        /// Prefer tab when comma and tab are equally plausible delimiters
        #[arg(long, action = clap::ArgAction::Set, value_name = "BOOL")]
        prefer_tab: Option<bool>,

        /// Output representation
        #[arg(long, default_value = "csv", value_enum)]
        format: FormatArg,

        /// Load settings from a TOML config file
        #[arg(long, value_name = "FILE")]
        config: Option<PathBuf>,
    },

    /// Display the detected dialect and schema of an input file
    Info {
        /// Input dataset file path (optionally gzip-compressed)
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        /// Whether the first line is a header row (default: true)
        #[arg(long, action = clap::ArgAction::Set, value_name = "BOOL")]
        header: Option<bool>,
    },
}

impl Cli {
    pub fn verbosity(&self) -> u8 {
        self.verbose
    }
}

pub fn init_logging(verbosity: u8) {
    let log_level = match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();
}

pub fn dispatch(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Process {
            input,
            output_dir,
            header,
            generate_uuid,
            prefer_tab,
            format,
            config,
        } => process::run(
            input,
            output_dir,
            header,
            generate_uuid,
            prefer_tab,
            OutputFormat::from(format),
            config,
        ),
        Commands::Info { input, header } => info::run(input, header.unwrap_or(true)),
    }
}
