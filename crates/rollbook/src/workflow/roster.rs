//! Listing workflow: browse, search, edit, and delete registrations.
//!
//! The collection is loaded once when the view opens. Visible rows are
//! always recomputed from the full collection under the active term; there
//! is no incremental filter state to fall out of sync.

use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::record::Registration;
use crate::storage::{Slot, Store};

/// The listing workflow over the stored registrations.
#[derive(Debug, Clone)]
pub struct RosterWorkflow {
    /// The full collection, in insertion order.
    records: Vec<Registration>,
    /// The active search term, exactly as entered.
    term: String,
}

impl RosterWorkflow {
    /// Open the listing, loading the full collection.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    pub fn open(store: &Store) -> Result<Self> {
        let records = store.load_all()?;
        debug!("Opened roster with {} registrations", records.len());
        Ok(Self {
            records,
            term: String::new(),
        })
    }

    /// All stored registrations, in insertion order.
    #[must_use]
    pub fn records(&self) -> &[Registration] {
        &self.records
    }

    /// Total number of stored registrations.
    #[must_use]
    pub fn total(&self) -> usize {
        self.records.len()
    }

    /// The active search term.
    #[must_use]
    pub fn term(&self) -> &str {
        &self.term
    }

    /// Set the active search term.
    pub fn search(&mut self, term: impl Into<String>) {
        self.term = term.into();
    }

    /// The rows currently visible under the active search term.
    ///
    /// A term that is empty after trimming shows the full collection; any
    /// other term is matched exactly as entered, against every record.
    #[must_use]
    pub fn visible(&self) -> Vec<&Registration> {
        if self.term.trim().is_empty() {
            self.records.iter().collect()
        } else {
            self.records
                .iter()
                .filter(|record| matches_term(record, &self.term))
                .collect()
        }
    }

    /// The message shown when no rows are visible.
    ///
    /// Distinguishes an empty store from a search with no matches. The
    /// wording follows whether any term was entered at all, even a blank
    /// one.
    #[must_use]
    pub fn empty_state(&self) -> Option<&'static str> {
        if !self.visible().is_empty() {
            return None;
        }
        if self.term.is_empty() {
            Some("No submissions yet")
        } else {
            Some("No results found")
        }
    }

    /// Permanently delete a registration.
    ///
    /// Returns `false` without error when the id is not present, so a
    /// repeated delete is harmless. The in-memory collection only changes
    /// once the reduced collection has been stored.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be written.
    pub fn delete(&mut self, store: &Store, id: i64) -> Result<bool> {
        if !self.records.iter().any(|record| record.id == id) {
            return Ok(false);
        }

        let remaining: Vec<Registration> = self
            .records
            .iter()
            .filter(|record| record.id != id)
            .cloned()
            .collect();
        store.save_all(&remaining)?;
        self.records = remaining;
        info!("Deleted registration {id}");
        Ok(true)
    }

    /// Queue a registration for editing.
    ///
    /// Fills the edit hand-off consumed by the registration workflow and
    /// returns the queued record.
    ///
    /// # Errors
    ///
    /// Returns [`Error::RecordNotFound`] if no registration has this id.
    pub fn request_edit(&self, store: &Store, id: i64) -> Result<Registration> {
        let Some(record) = self.records.iter().find(|record| record.id == id) else {
            return Err(Error::record_not_found(id));
        };

        store.set_handoff(Slot::EditingSubmission, Some(record))?;
        debug!("Queued registration {id} for editing");
        Ok(record.clone())
    }
}

/// Check a registration against a search term.
///
/// Name, email, gender, course, and address match case-insensitively; the
/// phone number is matched against the term exactly as entered.
#[must_use]
pub fn matches_term(record: &Registration, term: &str) -> bool {
    let needle = term.to_lowercase();
    record.full_name.to_lowercase().contains(&needle)
        || record.email.to_lowercase().contains(&needle)
        || record.phone.contains(term)
        || record.gender.to_string().contains(&needle)
        || record.course.to_string().contains(&needle)
        || record.address.to_lowercase().contains(&needle)
}
