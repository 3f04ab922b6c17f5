//! Fatal vs. non-fatal error policy.
//!
//! An explicit two-state machine, so the policy is testable independent of
//! parsing mechanics. The transition rule is data: an `Invalid` outcome on
//! the first data record ([`FIRST_DATA_INDEX`]) is evidence the whole file's
//! structure is wrong and aborts the run; the same failure class on any
//! later record only skips that record. There is no recovery from
//! `Aborted`.

use crate::record::ValidationOutcome;

/// Data index whose validation failure is fatal by policy.
pub const FIRST_DATA_INDEX: u64 = 1;

/// Classifier state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    /// Processing normally.
    Nominal,
    /// A fatal failure occurred; no further output is produced.
    Aborted,
}

/// What the pipeline should do with one classified record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Disposition {
    /// Fold the record into the output.
    Accept,
    /// Exclude the record, note it in the skipped list, continue.
    Skip(String),
    /// Terminate the run; no output is produced.
    Abort(String),
}

/// Two-state error classifier for one run.
#[derive(Debug)]
pub struct ErrorClassifier {
    state: RunState,
}

impl Default for ErrorClassifier {
    fn default() -> Self {
        Self::new()
    }
}

impl ErrorClassifier {
    /// Start in the `Nominal` state.
    pub fn new() -> Self {
        Self {
            state: RunState::Nominal,
        }
    }

    /// Current state.
    pub fn state(&self) -> RunState {
        self.state
    }

    /// Classify one record's outcome at the given data index.
    pub fn classify(&mut self, index: u64, outcome: ValidationOutcome) -> Disposition {
        match (self.state, outcome) {
            (RunState::Aborted, _) => Disposition::Abort("run already aborted".to_string()),
            (RunState::Nominal, ValidationOutcome::Valid) => Disposition::Accept,
            (RunState::Nominal, ValidationOutcome::Invalid(reason))
                if index == FIRST_DATA_INDEX =>
            {
                self.state = RunState::Aborted;
                Disposition::Abort(format!("record {index} invalid: {reason}"))
            }
            (RunState::Nominal, ValidationOutcome::Invalid(reason))
            | (RunState::Nominal, ValidationOutcome::Skipped(reason)) => {
                Disposition::Skip(reason)
            }
        }
    }
}
