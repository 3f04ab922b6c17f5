//! # csv-format-support - Dataset Normalization Pipeline
//!
//! `csv_format_support` is the format-support stage of the dataset-processing
//! platform: it normalizes an arbitrary delimited text file of chemical
//! structures into the canonical loader format consumed by downstream stages,
//! validating each record and assigning stable identifiers along the way.
//!
//! ## Key Behaviors
//!
//! - **Transparent decompression**: gzip-wrapped inputs are decoded behind a
//!   single source abstraction; later stages only ever see a byte stream.
//!
//! - **Dialect inference**: comma vs tab is inferred from the head of the
//!   stream; header presence is an explicit configuration flag, never
//!   guessed from content.
//!
//! - **Streaming**: records flow through the pipeline one at a time in a
//!   single pass; no record is retained once classified.
//!
//! - **Fatal-first-record policy**: a validation failure on the first data
//!   record aborts the whole run (it signals the file's structure is wrong);
//!   the same failure on any later record only skips that record.
//!
//! - **Atomic output**: either the canonical loader file is produced in
//!   full, or (on abort) nothing is left behind. Skipped records are
//!   enumerated in a JSON annotation artifact alongside the output.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use csv_format_support::chem::SmilesSyntax;
//! use csv_format_support::pipeline::{run, ProcessOptions};
//! use std::path::Path;
//!
//! let options = ProcessOptions::default();
//! let report = run(
//!     Path::new("input.csv"),
//!     Path::new("output"),
//!     &options,
//!     &SmilesSyntax,
//! )?;
//!
//! println!(
//!     "{} processed, {} accepted, {} skipped",
//!     report.processed,
//!     report.accepted,
//!     report.skipped.len()
//! );
//! # Ok::<(), csv_format_support::pipeline::PipelineError>(())
//! ```
//!
//! This produces `output/tmploaderfile.csv` with the fixed column order
//! (identifier, molecule, extra fields) and, when records were skipped,
//! `output/tmploaderfile.annotations.json` describing them.
//!
//! ## Architecture
//!
//! The library is organized into the following modules, consumed by the
//! pipeline in dependency order:
//!
//! - [`source`]: path opening and transparent gzip decompression
//! - [`dialect`]: field-delimiter inference
//! - [`parser`]: schema location and lazy record parsing
//! - [`chem`]: the molecule validity predicate seam
//! - [`validate`]: per-record field classification
//! - [`assign`]: identifier generation and uniqueness
//! - [`classify`]: the fatal vs. non-fatal policy state machine
//! - [`writer`]: canonical loader output and the annotation artifact
//! - [`pipeline`]: single-run orchestration

// Documentation lints - enforce complete documentation for publication
#![deny(missing_docs)]
#![deny(rustdoc::missing_crate_level_docs)]

pub mod assign;
pub mod chem;
pub mod classify;
pub mod dialect;
pub mod parser;
pub mod pipeline;
pub mod record;
pub mod source;
pub mod validate;
pub mod writer;

/// Re-export commonly used types for convenience
pub mod prelude {
    pub use crate::assign::IdentifierAssigner;
    pub use crate::chem::{MoleculeCheck, SmilesSyntax};
    pub use crate::classify::{Disposition, ErrorClassifier, RunState, FIRST_DATA_INDEX};
    pub use crate::dialect::{DelimiterPreference, Dialect, DialectError};
    pub use crate::parser::{RecordParser, Schema, SchemaError, IDENTIFIER_COLUMN, MOLECULE_COLUMN};
    pub use crate::pipeline::{run, OutputFormat, PipelineError, ProcessOptions, RunReport};
    pub use crate::record::{Record, RunStatus, SkippedRecord, ValidationOutcome};
    pub use crate::source::{SourceError, SourceReader};
    pub use crate::writer::{LoaderWriter, WriterError, ANNOTATION_FILENAME, LOADER_FILENAME};
}
