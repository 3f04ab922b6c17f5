//! Canonical loader output and the annotation artifact.
//!
//! The loader file is always comma-delimited with a fixed column order
//! (identifier first when the run carries one, then molecule, then the extra
//! fields in input order) regardless of the input dialect. Output is atomic
//! from the caller's perspective: rows are staged in a temp file inside the
//! output directory and persisted only when the run completes, so an aborted
//! run leaves nothing behind.

use std::fs::File;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::Serialize;
use tempfile::NamedTempFile;
use uuid::Uuid;

use crate::parser::{Schema, IDENTIFIER_COLUMN, MOLECULE_COLUMN};
use crate::record::{Record, SkippedRecord};

/// Fixed name of the canonical loader file.
pub const LOADER_FILENAME: &str = "tmploaderfile.csv";

/// Fixed name of the annotation artifact, written alongside the loader file
/// when records were skipped.
pub const ANNOTATION_FILENAME: &str = "tmploaderfile.annotations.json";

/// Errors raised while writing output artifacts.
#[derive(Debug, thiserror::Error)]
pub enum WriterError {
    /// I/O failure on the staged or final output file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV serialization failure.
    #[error("CSV write error: {0}")]
    Csv(#[from] csv::Error),

    /// Annotation artifact serialization failure.
    #[error("annotation serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    /// The staged file could not be moved into place.
    #[error("failed to persist output: {0}")]
    Persist(String),
}

/// Streaming writer for the canonical loader file.
pub struct LoaderWriter {
    writer: csv::Writer<NamedTempFile>,
    dest: PathBuf,
    extra_columns: Vec<String>,
    with_identifier: bool,
    rows: u64,
}

impl LoaderWriter {
    /// Stage a loader file in `output_dir` and write the canonical header
    /// row. `with_identifier` is true when the output carries an identifier
    /// column, whether original or generated.
    pub fn new(
        output_dir: &Path,
        schema: &Schema,
        with_identifier: bool,
    ) -> Result<Self, WriterError> {
        let staged = NamedTempFile::new_in(output_dir)?;
        let mut writer = csv::Writer::from_writer(staged);

        let extra_columns = schema.extra_columns();
        let mut header: Vec<&str> = Vec::with_capacity(extra_columns.len() + 2);
        if with_identifier {
            header.push(IDENTIFIER_COLUMN);
        }
        header.push(MOLECULE_COLUMN);
        header.extend(extra_columns.iter().map(String::as_str));
        writer.write_record(&header)?;

        Ok(Self {
            writer,
            dest: output_dir.join(LOADER_FILENAME),
            extra_columns,
            with_identifier,
            rows: 0,
        })
    }

    /// Append one accepted record.
    pub fn write_record(
        &mut self,
        record: &Record,
        identifier: Option<&Uuid>,
    ) -> Result<(), WriterError> {
        let identifier = identifier.map(Uuid::to_string);

        let mut row: Vec<&str> = Vec::with_capacity(self.extra_columns.len() + 2);
        if self.with_identifier {
            row.push(identifier.as_deref().unwrap_or(""));
        }
        row.push(&record.molecule);

        // Extras are emitted against the fixed header: short rows pad with
        // empty fields, overlong rows are truncated.
        for i in 0..self.extra_columns.len() {
            row.push(
                record
                    .extras
                    .get(i)
                    .map(|(_, value)| value.as_str())
                    .unwrap_or(""),
            );
        }

        self.writer.write_record(&row)?;
        self.rows += 1;
        Ok(())
    }

    /// Rows written so far, excluding the header.
    pub fn rows(&self) -> u64 {
        self.rows
    }

    /// Flush and move the staged file into place. Only a completed run calls
    /// this; dropping the writer instead discards the staged file.
    pub fn finish(self) -> Result<PathBuf, WriterError> {
        let staged = self
            .writer
            .into_inner()
            .map_err(|e| WriterError::Persist(e.to_string()))?;
        staged
            .persist(&self.dest)
            .map_err(|e| WriterError::Persist(e.to_string()))?;
        Ok(self.dest)
    }
}

#[derive(Serialize)]
struct Annotations<'a> {
    generated: DateTime<Utc>,
    source: &'a str,
    skipped: &'a [SkippedRecord],
}

/// Write the annotation artifact describing skipped records.
pub fn write_annotations(
    output_dir: &Path,
    source: &str,
    skipped: &[SkippedRecord],
) -> Result<PathBuf, WriterError> {
    let path = output_dir.join(ANNOTATION_FILENAME);
    let file = File::create(&path)?;
    serde_json::to_writer_pretty(
        file,
        &Annotations {
            generated: Utc::now(),
            source,
            skipped,
        },
    )?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn schema(columns: &[&str], molecule: usize, identifier: Option<usize>) -> Schema {
        Schema {
            columns: columns.iter().map(|c| c.to_string()).collect(),
            molecule_index: molecule,
            identifier_index: identifier,
        }
    }

    fn record(molecule: &str, extras: &[(&str, &str)]) -> Record {
        Record {
            index: 1,
            molecule: molecule.to_string(),
            identifier: None,
            extras: extras
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            raw: String::new(),
        }
    }

    #[test]
    fn test_canonical_column_order() {
        let dir = tempfile::tempdir().unwrap();
        let schema = schema(&["name", "smiles", "uuid"], 1, Some(2));

        let mut writer = LoaderWriter::new(dir.path(), &schema, true).unwrap();
        let id = Uuid::new_v4();
        writer
            .write_record(&record("CCO", &[("name", "ethanol")]), Some(&id))
            .unwrap();
        let path = writer.finish().unwrap();

        let content = std::fs::read_to_string(path).unwrap();
        assert_eq!(content, format!("uuid,smiles,name\n{id},CCO,ethanol\n"));
    }

    #[test]
    fn test_no_identifier_column() {
        let dir = tempfile::tempdir().unwrap();
        let schema = schema(&["smiles", "name"], 0, None);

        let mut writer = LoaderWriter::new(dir.path(), &schema, false).unwrap();
        writer
            .write_record(&record("CCO", &[("name", "ethanol")]), None)
            .unwrap();
        assert_eq!(writer.rows(), 1);
        let path = writer.finish().unwrap();

        let content = std::fs::read_to_string(path).unwrap();
        assert_eq!(content, "smiles,name\nCCO,ethanol\n");
    }

    #[test]
    fn test_dropped_writer_leaves_no_output() {
        let dir = tempfile::tempdir().unwrap();
        let schema = schema(&["smiles"], 0, None);
        let writer = LoaderWriter::new(dir.path(), &schema, false).unwrap();
        drop(writer);
        assert!(!dir.path().join(LOADER_FILENAME).exists());
    }

    #[test]
    fn test_annotation_artifact() {
        let dir = tempfile::tempdir().unwrap();
        let skipped = vec![SkippedRecord {
            index: 2,
            reason: "bad molecule".to_string(),
            raw: "garbage,row".to_string(),
        }];

        let path = write_annotations(dir.path(), "input.csv", &skipped).unwrap();
        let content = std::fs::read_to_string(path).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&content).unwrap();
        assert_eq!(parsed["source"], "input.csv");
        assert_eq!(parsed["skipped"][0]["index"], 2);
        assert_eq!(parsed["skipped"][0]["reason"], "bad molecule");
    }
}
