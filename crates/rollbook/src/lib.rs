//! `rollbook` - A local-first registration desk for course providers
//!
//! This library provides the core functionality for validating, storing, and
//! working with course registrations: field validation, a keyed local store,
//! and the workflows that connect the registration form, the confirmation
//! view, and the listing.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod record;
pub mod storage;
pub mod validate;
pub mod workflow;

pub use config::Config;
pub use error::{Error, Result};
pub use logging::init_logging;
pub use record::{Applicant, Course, Gender, Registration};
pub use storage::{Slot, Store, StoreStats};
pub use validate::{Field, RegistrationForm, ValidationReport};
