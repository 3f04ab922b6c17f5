//! Per-record field validation.
//!
//! Purely classifies, with no side effects. The molecule check defers to the
//! [`MoleculeCheck`](crate::chem::MoleculeCheck) collaborator; the identifier
//! check is UUID syntax only. A record failing both reports the molecule
//! failure: the molecule is the structurally required field.

use uuid::Uuid;

use crate::chem::MoleculeCheck;
use crate::record::Record;

/// Rejection reason for an empty or unparsable molecule field.
pub const BAD_MOLECULE: &str = "bad molecule";

/// Rejection reason for a present-but-malformed identifier.
pub const BAD_IDENTIFIER: &str = "bad identifier";

/// Rejection reason when identifiers are required but the field is empty.
pub const MISSING_IDENTIFIER: &str = "missing identifier";

/// Rejection reason for an identifier already accepted in this run.
pub const DUPLICATE_IDENTIFIER: &str = "duplicate identifier";

/// State of a record's identifier field after syntactic checking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdentifierField {
    /// The schema declares no identifier column.
    NoColumn,
    /// The column exists but this record's field is empty.
    Absent,
    /// The field is present but not UUID-shaped. Carries the raw value.
    Malformed(String),
    /// A syntactically valid identifier.
    Present(Uuid),
}

/// Classification of one record's fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldReport {
    /// Whether the molecule field satisfied the validity predicate.
    pub molecule_ok: bool,
    /// Outcome of the identifier syntax check.
    pub identifier: IdentifierField,
}

/// Classify the mandatory molecule field and, when the schema carries an
/// identifier column, the identifier field.
pub fn validate(
    record: &Record,
    chem: &dyn MoleculeCheck,
    has_identifier_column: bool,
) -> FieldReport {
    let molecule_ok = !record.molecule.is_empty() && chem.is_valid(&record.molecule);

    let identifier = if !has_identifier_column {
        IdentifierField::NoColumn
    } else {
        match record.identifier.as_deref() {
            None => IdentifierField::Absent,
            Some(value) => match Uuid::parse_str(value) {
                Ok(uuid) => IdentifierField::Present(uuid),
                Err(_) => IdentifierField::Malformed(value.to_string()),
            },
        }
    };

    FieldReport {
        molecule_ok,
        identifier,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chem::SmilesSyntax;

    fn record(molecule: &str, identifier: Option<&str>) -> Record {
        Record {
            index: 1,
            molecule: molecule.to_string(),
            identifier: identifier.map(str::to_string),
            extras: Vec::new(),
            raw: String::new(),
        }
    }

    #[test]
    fn test_valid_molecule_and_identifier() {
        let rec = record("CCO", Some("123e4567-e89b-12d3-a456-426614174000"));
        let report = validate(&rec, &SmilesSyntax, true);
        assert!(report.molecule_ok);
        assert!(matches!(report.identifier, IdentifierField::Present(_)));
    }

    #[test]
    fn test_empty_molecule_fails() {
        let report = validate(&record("", None), &SmilesSyntax, false);
        assert!(!report.molecule_ok);
        assert_eq!(report.identifier, IdentifierField::NoColumn);
    }

    #[test]
    fn test_malformed_identifier() {
        let report = validate(&record("CCO", Some("not-a-uuid")), &SmilesSyntax, true);
        assert!(report.molecule_ok);
        assert_eq!(
            report.identifier,
            IdentifierField::Malformed("not-a-uuid".to_string())
        );
    }

    #[test]
    fn test_absent_identifier_is_not_invalid() {
        let report = validate(&record("CCO", None), &SmilesSyntax, true);
        assert_eq!(report.identifier, IdentifierField::Absent);
    }

    proptest::proptest! {
        /// Any hyphenated hex string in UUID shape classifies as present.
        #[test]
        fn prop_uuid_shaped_identifiers_are_present(
            value in "[0-9a-f]{8}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{12}"
        ) {
            let report = validate(&record("CCO", Some(&value)), &SmilesSyntax, true);
            proptest::prop_assert!(matches!(report.identifier, IdentifierField::Present(_)));
        }
    }
}
