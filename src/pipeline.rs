//! Single-run pipeline orchestration.
//!
//! Wires the stages (source, dialect, parser, validator, assigner,
//! classifier, writer) into one single-threaded streaming pass. All
//! configuration is an explicit immutable [`ProcessOptions`] constructed once
//! at run start; no component reads ambient process state.

use std::path::{Path, PathBuf};

use log::{debug, info, warn};

use crate::assign::IdentifierAssigner;
use crate::chem::MoleculeCheck;
use crate::classify::{Disposition, ErrorClassifier};
use crate::dialect::{self, DelimiterPreference, DialectError};
use crate::parser::{RecordParser, SchemaError};
use crate::record::{RunStatus, SkippedRecord, ValidationOutcome};
use crate::source::{SourceError, SourceReader};
use crate::validate::{self, BAD_MOLECULE};
use crate::writer::{self, LoaderWriter, WriterError};

/// Output representation. The canonical loader format is the only one today;
/// the option exists so the external caller can pin it explicitly.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Fixed-column-order, comma-delimited loader CSV.
    #[default]
    Csv,
}

/// Immutable per-run configuration.
#[derive(Debug, Clone)]
pub struct ProcessOptions {
    /// Whether the first line of the input is a header row.
    pub header: bool,
    /// Whether to synthesize identifiers for missing or invalid ones.
    pub generate_uuid: bool,
    /// Tie-break when comma and tab are equally plausible delimiters.
    pub delimiter_preference: DelimiterPreference,
    /// Output representation.
    pub output_format: OutputFormat,
}

impl Default for ProcessOptions {
    fn default() -> Self {
        Self {
            header: true,
            generate_uuid: true,
            delimiter_preference: DelimiterPreference::Comma,
            output_format: OutputFormat::Csv,
        }
    }
}

/// Fatal pipeline failures: no output is produced.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// Source could not be opened or decoded.
    #[error(transparent)]
    Source(#[from] SourceError),

    /// No usable delimiter.
    #[error(transparent)]
    Dialect(#[from] DialectError),

    /// The molecule column could not be located.
    #[error(transparent)]
    Schema(#[from] SchemaError),

    /// Output artifacts could not be written.
    #[error(transparent)]
    Writer(#[from] WriterError),
}

/// Aggregate result of one run.
#[derive(Debug)]
pub struct RunReport {
    /// Data records read from the source.
    pub processed: u64,
    /// Records folded into the output.
    pub accepted: u64,
    /// Skipped records, in input order.
    pub skipped: Vec<SkippedRecord>,
    /// Terminal status.
    pub status: RunStatus,
    /// Path of the loader file, present only on completion.
    pub output_path: Option<PathBuf>,
    /// Path of the annotation artifact, when records were skipped.
    pub annotation_path: Option<PathBuf>,
}

/// Run the normalization pipeline over one input file.
///
/// Returns `Err` for structural failures (source, dialect, schema, output
/// I/O) and `Ok` with [`RunStatus::Aborted`] when the fatal-first-record
/// policy terminated the run; both leave no output behind.
pub fn run(
    input: &Path,
    output_dir: &Path,
    options: &ProcessOptions,
    chem: &dyn MoleculeCheck,
) -> Result<RunReport, PipelineError> {
    let source = SourceReader::open(input)?;
    let dialect = dialect::detect(&source.head_text(), options.delimiter_preference)?;
    debug!("detected {} delimiter", dialect.delimiter_name());

    let mut parser = RecordParser::new(source.into_read(), dialect, options.header)?;
    let schema = parser.schema().clone();
    let has_identifier_column = schema.identifier_index.is_some();

    // The output carries an identifier column when the input declares one or
    // when generation will add one.
    let with_identifier = has_identifier_column || options.generate_uuid;
    let mut writer = match options.output_format {
        OutputFormat::Csv => LoaderWriter::new(output_dir, &schema, with_identifier)?,
    };

    let mut assigner = IdentifierAssigner::new(options.generate_uuid);
    let mut classifier = ErrorClassifier::new();

    let mut processed = 0u64;
    let mut skipped = Vec::new();

    for row in parser.by_ref() {
        processed += 1;

        let (index, raw, outcome) = match row {
            Ok(record) => {
                let report = validate::validate(&record, chem, has_identifier_column);
                if !report.molecule_ok {
                    (record.index, record.raw, invalid(BAD_MOLECULE))
                } else {
                    match assigner.resolve(report.identifier) {
                        Ok(identifier) => {
                            writer.write_record(&record, identifier.as_ref())?;
                            (record.index, record.raw, ValidationOutcome::Valid)
                        }
                        Err(reason) => (record.index, record.raw, invalid(&reason)),
                    }
                }
            }
            Err(parse_error) => {
                let reason = parse_error.to_string();
                (parse_error.index, parse_error.raw, invalid(&reason))
            }
        };

        match classifier.classify(index, outcome) {
            Disposition::Accept => {}
            Disposition::Skip(reason) => {
                warn!("record {index} skipped: {reason}");
                skipped.push(SkippedRecord { index, reason, raw });
            }
            Disposition::Abort(reason) => {
                // Dropping the writer discards the staged output.
                warn!("aborting run: {reason}");
                return Ok(RunReport {
                    processed,
                    accepted: 0,
                    skipped,
                    status: RunStatus::Aborted(reason),
                    output_path: None,
                    annotation_path: None,
                });
            }
        }
    }

    let accepted = writer.rows();
    let output_path = writer.finish()?;

    let annotation_path = if skipped.is_empty() {
        None
    } else {
        let source_name = input.display().to_string();
        Some(writer::write_annotations(
            output_dir,
            &source_name,
            &skipped,
        )?)
    };

    info!("{processed} records processed");
    info!("{} records skipped", skipped.len());
    info!("{accepted} records added");

    Ok(RunReport {
        processed,
        accepted,
        skipped,
        status: RunStatus::Completed,
        output_path: Some(output_path),
        annotation_path,
    })
}

fn invalid(reason: &str) -> ValidationOutcome {
    ValidationOutcome::Invalid(reason.to_string())
}
