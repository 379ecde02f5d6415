//! Confirmation workflow: presenting the record that was just submitted.

use tracing::debug;

use crate::error::Result;
use crate::record::Registration;
use crate::storage::{Slot, Store};

/// Take the record pending confirmation, if any.
///
/// The hand-off is consumed by this read: revisiting the confirmation view
/// after it has been shown finds nothing, and the caller redirects to the
/// registration form instead.
///
/// # Errors
///
/// Returns an error if the store cannot be read.
pub fn take_confirmation(store: &Store) -> Result<Option<Registration>> {
    let record = store.take_handoff(Slot::LastSubmission)?;
    if let Some(record) = &record {
        debug!("Presenting confirmation for registration {}", record.id);
    }
    Ok(record)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validate::RegistrationForm;
    use crate::workflow::register::{RegisterWorkflow, SubmitOutcome};

    fn test_store() -> Store {
        Store::open_in_memory().expect("failed to create test store")
    }

    #[test]
    fn test_no_pending_confirmation() {
        let store = test_store();
        assert_eq!(take_confirmation(&store).unwrap(), None);
    }

    #[test]
    fn test_confirmation_is_read_once() {
        let store = test_store();
        let form = RegistrationForm {
            full_name: "Jo Lee".to_string(),
            email: "jo@example.com".to_string(),
            phone: "123-456-7890".to_string(),
            gender: "other".to_string(),
            course: "web-development".to_string(),
            address: "12 Main St".to_string(),
        };

        let outcome = RegisterWorkflow::start(&store)
            .unwrap()
            .submit(&store, &form)
            .unwrap();
        let SubmitOutcome::Saved(saved) = outcome else {
            panic!("expected saved outcome");
        };

        assert_eq!(take_confirmation(&store).unwrap(), Some(saved));
        assert_eq!(take_confirmation(&store).unwrap(), None);
    }

    #[test]
    fn test_confirmation_reflects_submitted_fields() {
        let store = test_store();
        let form = RegistrationForm {
            full_name: "Sam Roy".to_string(),
            email: "sam@example.com".to_string(),
            phone: "9876543210".to_string(),
            gender: "female".to_string(),
            course: "ui-ux-design".to_string(),
            address: "4 Elm Road".to_string(),
        };

        RegisterWorkflow::start(&store)
            .unwrap()
            .submit(&store, &form)
            .unwrap();

        let shown = take_confirmation(&store).unwrap().unwrap();
        assert_eq!(shown.full_name, "Sam Roy");
        assert_eq!(shown.email, "sam@example.com");
        assert_eq!(shown.course.title(), "UI/UX Design");

        // The stored collection still holds the record
        assert_eq!(store.count().unwrap(), 1);
    }
}
