use anyhow::{Context, Result};
use std::path::PathBuf;

use csv_format_support::dialect::{self, DelimiterPreference};
use csv_format_support::parser::RecordParser;
use csv_format_support::source::SourceReader;

/// Display the detected dialect and schema of an input file.
pub fn run(input: PathBuf, header: bool) -> Result<()> {
    let source = SourceReader::open(&input).context("Failed to open input")?;
    let detected = dialect::detect(&source.head_text(), DelimiterPreference::Comma)
        .context("Failed to detect dialect")?;

    let parser = RecordParser::new(source.into_read(), detected, header)
        .context("Failed to read schema")?;
    let schema = parser.schema().clone();

    println!("Dataset Information");
    println!("===================");
    println!("File: {}", input.display());
    println!();
    println!("Dialect:");
    println!("  Delimiter: {}", detected.delimiter_name());
    println!("  Header: {}", if header { "configured" } else { "none" });
    println!();
    println!("Schema:");
    for (i, name) in schema.columns.iter().enumerate() {
        let role = if i == schema.molecule_index {
            " (molecule)"
        } else if Some(i) == schema.identifier_index {
            " (identifier)"
        } else {
            ""
        };
        println!("  {:3}. {}{}", i + 1, name, role);
    }
    println!();

    let mut records = 0u64;
    let mut unreadable = 0u64;
    for row in parser {
        match row {
            Ok(_) => records += 1,
            Err(_) => unreadable += 1,
        }
    }
    println!("Data records: {}", records);
    if unreadable > 0 {
        println!("Unreadable rows: {}", unreadable);
    }

    Ok(())
}
