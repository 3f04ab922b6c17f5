//! Record parsing and schema location.
//!
//! The schema is fixed at stream start and immutable thereafter: with a
//! configured header the first line names the columns and the molecule and
//! identifier columns are located by their recognized names
//! (case-insensitive); without one, the molecule column is the first field
//! and a synthetic name is assigned. Records are yielded lazily in a single
//! pass; there is no restart.

use std::io::Read;

use crate::dialect::Dialect;
use crate::record::Record;

/// Recognized (case-insensitive) name of the mandatory molecule column.
pub const MOLECULE_COLUMN: &str = "smiles";

/// Recognized (case-insensitive) name of the optional identifier column.
pub const IDENTIFIER_COLUMN: &str = "uuid";

/// Errors raised while fixing the schema. Always fatal, raised before the
/// first record is emitted.
#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    /// A header is configured but carries no recognizable molecule column.
    #[error("missing required column: {0}")]
    MissingColumn(String),

    /// The header line itself could not be read.
    #[error("failed to read header: {0}")]
    Header(#[from] csv::Error),
}

/// Column layout of one dataset, derived once at stream start.
#[derive(Debug, Clone)]
pub struct Schema {
    /// All column names in input order (synthetic when headerless).
    pub columns: Vec<String>,
    /// Position of the molecule column.
    pub molecule_index: usize,
    /// Position of the identifier column, when the schema declares one.
    pub identifier_index: Option<usize>,
}

impl Schema {
    /// Names of the extra columns, in input order.
    pub fn extra_columns(&self) -> Vec<String> {
        self.columns
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != self.molecule_index && Some(*i) != self.identifier_index)
            .map(|(_, name)| name.clone())
            .collect()
    }
}

/// Per-row read failure. Carries the row's data index so the error
/// classifier can apply the first-record rule to unreadable rows too, and
/// the row's content so the annotation artifact can reproduce it.
#[derive(Debug, thiserror::Error)]
#[error("unreadable row {index}: {reason}")]
pub struct ParseError {
    /// 1-based data index of the offending row.
    pub index: u64,
    /// Lossily decoded content of the offending row. Empty when the failure
    /// happened below the row level (for example an I/O error).
    pub raw: String,
    /// Description of the underlying read failure.
    pub reason: String,
}

/// Lazy, single-pass record stream over the detected dialect.
pub struct RecordParser<R: Read> {
    reader: csv::Reader<R>,
    schema: Schema,
    delimiter: u8,
    next_index: u64,
}

impl<R: Read> RecordParser<R> {
    /// Build a parser over the decoded source stream, consuming the header
    /// line when one is configured.
    pub fn new(source: R, dialect: Dialect, header: bool) -> Result<Self, SchemaError> {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(dialect.delimiter)
            .flexible(true)
            .has_headers(header)
            .from_reader(source);

        let schema = if header {
            let names: Vec<String> = reader
                .headers()?
                .iter()
                .map(|name| name.trim().to_string())
                .collect();

            let find = |wanted: &str| {
                names
                    .iter()
                    .position(|name| name.eq_ignore_ascii_case(wanted))
            };

            let molecule_index = find(MOLECULE_COLUMN)
                .ok_or_else(|| SchemaError::MissingColumn(MOLECULE_COLUMN.to_string()))?;

            Schema {
                columns: names.clone(),
                molecule_index,
                identifier_index: find(IDENTIFIER_COLUMN),
            }
        } else {
            // Headerless: the molecule is the first field under a synthetic
            // name, the rest get positional names, no identifier column
            // exists.
            let mut columns = vec![MOLECULE_COLUMN.to_string()];
            columns.extend((2..=dialect.fields).map(|i| format!("field{i}")));
            Schema {
                columns,
                molecule_index: 0,
                identifier_index: None,
            }
        };

        Ok(Self {
            reader,
            schema,
            delimiter: dialect.delimiter,
            next_index: 0,
        })
    }

    /// The fixed schema of this stream.
    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    fn build_record(&self, index: u64, row: &csv::StringRecord) -> Record {
        let field = |i: usize| row.get(i).unwrap_or("").trim().to_string();

        let molecule = field(self.schema.molecule_index);
        let identifier = self
            .schema
            .identifier_index
            .map(field)
            .filter(|value| !value.is_empty());

        let extras = (0..row.len())
            .filter(|i| {
                *i != self.schema.molecule_index && Some(*i) != self.schema.identifier_index
            })
            .map(|i| (self.column_name(i), field(i)))
            .collect();

        let raw = row
            .iter()
            .collect::<Vec<_>>()
            .join(&(self.delimiter as char).to_string());

        Record {
            index,
            molecule,
            identifier,
            extras,
            raw,
        }
    }

    fn column_name(&self, index: usize) -> String {
        self.schema
            .columns
            .get(index)
            .cloned()
            .unwrap_or_else(|| format!("field{}", index + 1))
    }

    fn raw_of(&self, row: &csv::ByteRecord) -> String {
        let delimiter = (self.delimiter as char).to_string();
        row.iter()
            .map(String::from_utf8_lossy)
            .collect::<Vec<_>>()
            .join(&delimiter)
    }
}

impl<R: Read> std::fmt::Debug for RecordParser<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecordParser")
            .field("schema", &self.schema)
            .field("next_index", &self.next_index)
            .finish_non_exhaustive()
    }
}

impl<R: Read> Iterator for RecordParser<R> {
    type Item = Result<Record, ParseError>;

    fn next(&mut self) -> Option<Self::Item> {
        // Rows are read as bytes first so that a UTF-8 failure still leaves
        // the row content available for error reporting.
        let mut row = csv::ByteRecord::new();
        self.next_index += 1;
        match self.reader.read_byte_record(&mut row) {
            Ok(true) => Some(match csv::StringRecord::from_byte_record(row) {
                Ok(row) => Ok(self.build_record(self.next_index, &row)),
                Err(err) => {
                    let reason = err.to_string();
                    Err(ParseError {
                        index: self.next_index,
                        raw: self.raw_of(&err.into_byte_record()),
                        reason,
                    })
                }
            }),
            Ok(false) => None,
            Err(source) => Some(Err(ParseError {
                index: self.next_index,
                raw: String::new(),
                reason: source.to_string(),
            })),
        }
    }
}
