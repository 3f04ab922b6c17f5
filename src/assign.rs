//! Identifier assignment and uniqueness.
//!
//! Governed by the `generate_uuid` option. When generation is on, records
//! lacking a usable identifier receive a fresh collision-checked UUID and
//! this is never a failure. When it is off, a missing, malformed or
//! duplicate identifier is a validation failure and flows into the error
//! classifier like any other. Uniqueness is tracked across all accepted
//! records of one run by a seen-set owned exclusively by the assigner.

use std::collections::HashSet;

use uuid::Uuid;

use crate::validate::{
    IdentifierField, BAD_IDENTIFIER, DUPLICATE_IDENTIFIER, MISSING_IDENTIFIER,
};

/// Stateful identifier assigner for one run.
#[derive(Debug)]
pub struct IdentifierAssigner {
    generate: bool,
    seen: HashSet<Uuid>,
}

impl IdentifierAssigner {
    /// Create an assigner; `generate` mirrors the `generate_uuid` option.
    pub fn new(generate: bool) -> Self {
        Self {
            generate,
            seen: HashSet::new(),
        }
    }

    /// Resolve a record's identifier.
    ///
    /// Returns the identifier to write (or `None` when the run carries no
    /// identifier column), or the rejection reason.
    pub fn resolve(&mut self, field: IdentifierField) -> Result<Option<Uuid>, String> {
        match field {
            IdentifierField::NoColumn if !self.generate => Ok(None),
            IdentifierField::NoColumn | IdentifierField::Absent if self.generate => {
                Ok(Some(self.fresh()))
            }
            IdentifierField::Malformed(_) if self.generate => Ok(Some(self.fresh())),
            IdentifierField::Present(uuid) => {
                if self.seen.insert(uuid) {
                    Ok(Some(uuid))
                } else if self.generate {
                    Ok(Some(self.fresh()))
                } else {
                    Err(DUPLICATE_IDENTIFIER.to_string())
                }
            }
            IdentifierField::Absent => Err(MISSING_IDENTIFIER.to_string()),
            IdentifierField::Malformed(_) => Err(BAD_IDENTIFIER.to_string()),
            // NoColumn with generation off is handled above.
            IdentifierField::NoColumn => Ok(None),
        }
    }

    /// Generate a fresh identifier, re-rolling on the (vanishingly unlikely)
    /// collision with one already accepted this run.
    fn fresh(&mut self) -> Uuid {
        loop {
            let uuid = Uuid::new_v4();
            if self.seen.insert(uuid) {
                return uuid;
            }
        }
    }
}
