//! Workflows connecting the registration form, the confirmation view, and
//! the listing.
//!
//! Each workflow owns one page-sized unit of behavior over the store. They
//! communicate through the store's hand-off slots and return their results
//! as typed values, so callers never re-read ambient state to learn what
//! just happened.

pub mod confirm;
pub mod register;
pub mod roster;

/// A logical destination within the application.
///
/// The presentation layer decides what "navigating" means; the workflows
/// only name where an outcome leads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Destination {
    /// The registration form.
    Registration,
    /// The post-submission confirmation view.
    Confirmation,
    /// The listing of stored registrations.
    Listing,
}

impl std::fmt::Display for Destination {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Registration => write!(f, "registration"),
            Self::Confirmation => write!(f, "confirmation"),
            Self::Listing => write!(f, "listing"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_destination_display() {
        assert_eq!(Destination::Registration.to_string(), "registration");
        assert_eq!(Destination::Confirmation.to_string(), "confirmation");
        assert_eq!(Destination::Listing.to_string(), "listing");
    }
}
