//! Registration workflow: creating and editing submissions.
//!
//! Entering the workflow consumes a pending edit hand-off, if one exists,
//! which switches the form from creating a new registration to updating a
//! stored one. Submissions are validated as a whole; only valid forms ever
//! reach the store.

use chrono::{DateTime, Utc};
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::record::Registration;
use crate::storage::{Slot, Store};
use crate::validate::{Field, RegistrationForm, ValidationReport};
use crate::workflow::Destination;

/// How the registration workflow was entered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Creating a new registration.
    Create,
    /// Editing the stored registration with this id.
    Edit {
        /// Id of the registration being edited.
        target: i64,
    },
}

/// One visual pulse on an invalid field.
///
/// A rejected submission emits one pulse per failing field, whether or not
/// the field was already marked invalid, so the presentation layer re-arms
/// its feedback on every attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidPulse {
    /// The field to pulse.
    pub field: Field,
}

/// The outcome of a submission attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The submission was stored.
    Saved(Registration),
    /// Validation failed; nothing was stored.
    Rejected {
        /// The failing fields, in form order.
        report: ValidationReport,
        /// One pulse per failing field for this attempt.
        pulses: Vec<InvalidPulse>,
    },
}

impl SubmitOutcome {
    /// Where the application goes after this outcome.
    ///
    /// A rejected submission stays on the form.
    #[must_use]
    pub fn destination(&self) -> Option<Destination> {
        match self {
            Self::Saved(_) => Some(Destination::Confirmation),
            Self::Rejected { .. } => None,
        }
    }
}

/// The registration entry workflow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterWorkflow {
    /// How the workflow was entered.
    mode: Mode,
    /// The form as initially presented.
    form: RegistrationForm,
}

impl RegisterWorkflow {
    /// Enter the registration workflow.
    ///
    /// Consumes the edit hand-off exactly once. When a record is pending,
    /// the form arrives prefilled from it and the workflow remembers which
    /// id to update; otherwise the form starts empty in create mode.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    pub fn start(store: &Store) -> Result<Self> {
        match store.take_handoff(Slot::EditingSubmission)? {
            Some(record) => {
                debug!("Entering edit mode for registration {}", record.id);
                Ok(Self {
                    mode: Mode::Edit { target: record.id },
                    form: RegistrationForm::from_record(&record),
                })
            }
            None => Ok(Self {
                mode: Mode::Create,
                form: RegistrationForm::default(),
            }),
        }
    }

    /// How the workflow was entered.
    #[must_use]
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// The form as initially presented (prefilled when editing).
    #[must_use]
    pub fn form(&self) -> &RegistrationForm {
        &self.form
    }

    /// Submit a form.
    ///
    /// Invalid forms are rejected without touching the store. Valid forms
    /// are persisted (appended in create mode, merged over the target record
    /// in edit mode), placed in the last-submission hand-off for the
    /// confirmation view, and returned.
    ///
    /// # Errors
    ///
    /// Returns [`Error::RecordNotFound`] when the record being edited no
    /// longer exists; nothing is written in that case. Storage failures are
    /// propagated.
    pub fn submit(&self, store: &Store, form: &RegistrationForm) -> Result<SubmitOutcome> {
        let applicant = match form.parse() {
            Ok(applicant) => applicant,
            Err(report) => {
                let pulses = report
                    .failed()
                    .iter()
                    .map(|&field| InvalidPulse { field })
                    .collect();
                debug!("Submission rejected: {report}");
                return Ok(SubmitOutcome::Rejected { report, pulses });
            }
        };

        let mut records = store.load_all()?;
        let now = Utc::now();

        let saved = match self.mode {
            Mode::Create => {
                let id = next_id(&records, now);
                let record = Registration::create(applicant, id, now);
                records.push(record.clone());
                store.save_all(&records)?;
                info!("Created registration {id}");
                record
            }
            Mode::Edit { target } => {
                let Some(record) = records.iter_mut().find(|record| record.id == target) else {
                    return Err(Error::record_not_found(target));
                };
                record.apply(applicant, now);
                let updated = record.clone();
                store.save_all(&records)?;
                info!("Updated registration {target}");
                updated
            }
        };

        store.set_handoff(Slot::LastSubmission, Some(&saved))?;
        Ok(SubmitOutcome::Saved(saved))
    }
}

/// Pick the id for a new registration.
///
/// Ids are the submission time in milliseconds, bumped past the current
/// maximum when two submissions land in the same millisecond or the clock
/// steps backwards.
fn next_id(records: &[Registration], now: DateTime<Utc>) -> i64 {
    let max_id = records.iter().map(|record| record.id).max().unwrap_or(0);
    now.timestamp_millis().max(max_id + 1)
}
