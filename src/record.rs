//! Core data model for one normalization run.
//!
//! A [`Record`] is one parsed data row with a fixed molecule slot, an optional
//! identifier slot and an ordered list of extra fields. Records exist for
//! exactly one trip through the pipeline: they are classified with a single
//! [`ValidationOutcome`] and then either written out or folded into the
//! skipped list as a [`SkippedRecord`]; nothing retains them afterwards.

use serde::Serialize;

/// One parsed data row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    /// 1-based position among the data rows (the header, when present, is
    /// position 0).
    pub index: u64,
    /// Raw molecule representation (SMILES string), exactly as read.
    pub molecule: String,
    /// Raw identifier value, when the schema carries an identifier column and
    /// the field is non-empty.
    pub identifier: Option<String>,
    /// Remaining named fields in input order.
    pub extras: Vec<(String, String)>,
    /// The row's raw content, reconstructed for error reporting.
    pub raw: String,
}

/// Classification of a single record. Exactly one outcome per record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationOutcome {
    /// The record passed all checks and is part of the output.
    Valid,
    /// The record failed a check; the error classifier decides whether this
    /// is fatal or merely skips the record.
    Invalid(String),
    /// The record was excluded from the output but the run continues.
    Skipped(String),
}

/// Description of a skipped record, persisted in the annotation artifact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedRecord {
    /// Original 1-based data index of the record.
    pub index: u64,
    /// Why the record was rejected.
    pub reason: String,
    /// The record's raw content.
    pub raw: String,
}

/// Terminal status of one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunStatus {
    /// The stream was consumed to the end; the output file was produced.
    Completed,
    /// The run was aborted; no output was produced.
    Aborted(String),
}

impl RunStatus {
    /// True when the run completed and produced output.
    pub fn is_completed(&self) -> bool {
        matches!(self, RunStatus::Completed)
    }
}
