//! # csv-format-support
//!
//! Command-line entry point for the dataset format-support stage: normalize
//! a delimited molecule file into the canonical loader format.
//!
//! ## Usage
//!
//! ```bash
//! # Normalize a dataset into ./out/tmploaderfile.csv
//! csv-format-support process input.csv -o out
//!
//! # Strict identifiers: reject rows without a valid uuid
//! csv-format-support process input.csv -o out --generate-uuid false
//!
//! # Inspect the detected dialect and schema
//! csv-format-support info input.csv.gz
//! ```

use anyhow::Result;
use clap::Parser;

mod cli;

fn main() -> Result<()> {
    let args = cli::Cli::parse();
    cli::init_logging(args.verbosity());
    cli::dispatch(args)
}
