//! Field-delimiter inference.
//!
//! Only the delimiter is inferred from content; header presence is governed
//! by an explicit configuration flag supplied by the caller. A candidate
//! separator is plausible when it appears in the first line and yields the
//! same field count across the sniffed lines. When comma and tab are both
//! plausible the tie is broken by an explicit [`DelimiterPreference`] rather
//! than a hidden precedence.

/// Number of head lines inspected during delimiter inference.
const SNIFF_LINES: usize = 4;

/// Tie-break when comma and tab are equally plausible.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DelimiterPreference {
    /// Prefer comma (the default).
    #[default]
    Comma,
    /// Prefer tab.
    Tab,
}

/// The inferred input dialect.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Dialect {
    /// Field separator byte, comma or tab.
    pub delimiter: u8,
    /// Field count of the sniffed lines under this delimiter.
    pub fields: usize,
}

impl Dialect {
    /// Human-readable name of the delimiter.
    pub fn delimiter_name(&self) -> &'static str {
        if self.delimiter == b'\t' {
            "tab"
        } else {
            "comma"
        }
    }
}

/// Errors raised during delimiter inference. Always fatal.
#[derive(Debug, thiserror::Error)]
pub enum DialectError {
    /// The sniffed head contains no data to inspect.
    #[error("input is empty")]
    EmptyInput,

    /// Neither comma nor tab yields a consistent field count.
    #[error("could not determine field delimiter - must be a comma or a tab")]
    NoDelimiter,
}

/// Infer the field delimiter from the head of the stream.
pub fn detect(sample: &str, preference: DelimiterPreference) -> Result<Dialect, DialectError> {
    let lines: Vec<&str> = sample
        .lines()
        .filter(|line| !line.is_empty())
        .take(SNIFF_LINES)
        .collect();

    if lines.is_empty() {
        return Err(DialectError::EmptyInput);
    }

    let comma = consistent_count(&lines, b',');
    let tab = consistent_count(&lines, b'\t');

    let (delimiter, separators) = match (comma, tab) {
        (Some(c), Some(t)) => match preference {
            DelimiterPreference::Comma => (b',', c),
            DelimiterPreference::Tab => (b'\t', t),
        },
        (Some(c), None) => (b',', c),
        (None, Some(t)) => (b'\t', t),
        (None, None) => return Err(DialectError::NoDelimiter),
    };

    Ok(Dialect {
        delimiter,
        fields: separators + 1,
    })
}

/// A candidate is plausible when it appears in the first line and every
/// sniffed line carries the same count of it. Returns that count.
fn consistent_count(lines: &[&str], candidate: u8) -> Option<usize> {
    let count = |line: &str| line.bytes().filter(|b| *b == candidate).count();

    let first = count(lines[0]);
    (first > 0 && lines.iter().all(|line| count(line) == first)).then_some(first)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_detects_comma() {
        let dialect = detect("smiles,uuid,name\nCCO,,ethanol\n", DelimiterPreference::Comma)
            .unwrap();
        assert_eq!(dialect.delimiter, b',');
        assert_eq!(dialect.fields, 3);
        assert_eq!(dialect.delimiter_name(), "comma");
    }

    #[test]
    fn test_detects_tab() {
        let dialect = detect("smiles\tname\nCCO\tethanol\n", DelimiterPreference::Comma).unwrap();
        assert_eq!(dialect.delimiter, b'\t');
    }

    #[test]
    fn test_tie_break_defaults_to_comma() {
        // One comma and one tab per line: both candidates are plausible.
        let sample = "smiles,x\ty\nCCO,a\tb\n";
        let dialect = detect(sample, DelimiterPreference::Comma).unwrap();
        assert_eq!(dialect.delimiter, b',');

        let dialect = detect(sample, DelimiterPreference::Tab).unwrap();
        assert_eq!(dialect.delimiter, b'\t');
    }

    #[test]
    fn test_inconsistent_candidate_is_rejected() {
        // Comma count varies; tab is consistent.
        let sample = "a,b\tc\nx\ty\n";
        let dialect = detect(sample, DelimiterPreference::Comma).unwrap();
        assert_eq!(dialect.delimiter, b'\t');
    }

    #[test]
    fn test_no_delimiter_is_an_error() {
        assert!(matches!(
            detect("justonecolumn\nanother\n", DelimiterPreference::Comma),
            Err(DialectError::NoDelimiter)
        ));
        assert!(matches!(
            detect("", DelimiterPreference::Comma),
            Err(DialectError::EmptyInput)
        ));
    }

    proptest! {
        /// Any grid of alphanumeric fields joined by a single delimiter is
        /// detected as that delimiter.
        #[test]
        fn prop_detects_joined_fields(
            rows in proptest::collection::vec(
                proptest::collection::vec("[a-zA-Z0-9]{1,8}", 2..5),
                1..4,
            ),
            tab in any::<bool>(),
        ) {
            let width = rows[0].len();
            let delim = if tab { "\t" } else { "," };
            let sample = rows
                .iter()
                .map(|r| {
                    let mut row = r.clone();
                    row.resize(width, "x".to_string());
                    row.join(delim)
                })
                .collect::<Vec<_>>()
                .join("\n");

            let dialect = detect(&sample, DelimiterPreference::Comma).unwrap();
            prop_assert_eq!(dialect.delimiter, if tab { b'\t' } else { b',' });
        }
    }
}
