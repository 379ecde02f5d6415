//! Form validation for rollbook.
//!
//! This module checks raw registration form input and converts it into a
//! validated [`Applicant`]. Every rule is evaluated independently, so a
//! report always lists all failing fields, not just the first one.

use std::sync::OnceLock;

use regex::Regex;

use crate::record::{Applicant, Course, Gender, Registration};

/// Pattern a well-formed email address must match.
const EMAIL_PATTERN: &str = r"^[^\s@]+@[^\s@]+\.[^\s@]+$";

/// Number of digits a phone number must contain.
const PHONE_DIGITS: usize = 10;

/// The compiled email pattern, built on first use.
fn email_regex() -> &'static Regex {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    EMAIL.get_or_init(|| Regex::new(EMAIL_PATTERN).expect("invalid email pattern"))
}

/// A field on the registration form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    /// The applicant's full name.
    FullName,
    /// The contact email address.
    Email,
    /// The contact phone number.
    Phone,
    /// The gender selection.
    Gender,
    /// The course selection.
    Course,
    /// The postal address.
    Address,
}

impl Field {
    /// All validated fields, in form order.
    pub const ORDER: [Self; 6] = [
        Self::FullName,
        Self::Email,
        Self::Phone,
        Self::Gender,
        Self::Course,
        Self::Address,
    ];

    /// Human-readable label, as shown on the form.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::FullName => "Full Name",
            Self::Email => "Email",
            Self::Phone => "Phone Number",
            Self::Gender => "Gender",
            Self::Course => "Course",
            Self::Address => "Address",
        }
    }

    /// What a value must look like to pass validation.
    #[must_use]
    pub fn requirement(&self) -> &'static str {
        match self {
            Self::FullName => "must not be blank",
            Self::Email => "must look like name@example.com",
            Self::Phone => "must contain exactly 10 digits",
            Self::Gender => "must be one of: male, female, other",
            Self::Course => {
                "must be one of: web-development, data-science, mobile-app, \
                 ui-ux-design, digital-marketing"
            }
            Self::Address => "must not be blank",
        }
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::FullName => write!(f, "fullName"),
            Self::Email => write!(f, "email"),
            Self::Phone => write!(f, "phone"),
            Self::Gender => write!(f, "gender"),
            Self::Course => write!(f, "course"),
            Self::Address => write!(f, "address"),
        }
    }
}

/// Raw registration form input, before validation.
///
/// All fields are free text at this stage; gender and course only become
/// typed values once the form is parsed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegistrationForm {
    /// Applicant's full name.
    pub full_name: String,
    /// Contact email address.
    pub email: String,
    /// Contact phone number.
    pub phone: String,
    /// Selected gender id.
    pub gender: String,
    /// Selected course id.
    pub course: String,
    /// Postal address.
    pub address: String,
}

impl RegistrationForm {
    /// Prefill a form from an existing registration, for editing.
    #[must_use]
    pub fn from_record(record: &Registration) -> Self {
        Self {
            full_name: record.full_name.clone(),
            email: record.email.clone(),
            phone: record.phone.clone(),
            gender: record.gender.to_string(),
            course: record.course.to_string(),
            address: record.address.clone(),
        }
    }

    /// Validate this form and convert it into an applicant.
    ///
    /// Field values are carried over exactly as entered; trimming only
    /// happens inside the checks themselves.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationReport`] listing every failing field, in form
    /// order.
    pub fn parse(&self) -> std::result::Result<Applicant, ValidationReport> {
        let mut failed = Vec::new();

        if self.full_name.trim().is_empty() {
            failed.push(Field::FullName);
        }
        if !is_valid_email(&self.email) {
            failed.push(Field::Email);
        }
        if !is_valid_phone(&self.phone) {
            failed.push(Field::Phone);
        }
        let gender = Gender::parse(&self.gender);
        if gender.is_none() {
            failed.push(Field::Gender);
        }
        let course = Course::parse(&self.course);
        if course.is_none() {
            failed.push(Field::Course);
        }
        if self.address.trim().is_empty() {
            failed.push(Field::Address);
        }

        match (gender, course) {
            (Some(gender), Some(course)) if failed.is_empty() => Ok(Applicant {
                full_name: self.full_name.clone(),
                email: self.email.clone(),
                phone: self.phone.clone(),
                gender,
                course,
                address: self.address.clone(),
            }),
            _ => Err(ValidationReport::from_failures(failed)),
        }
    }
}

/// The outcome of validating a registration form.
///
/// An empty report means the form passed. Reports produced by the validator
/// list failing fields in form order, so the first entry is the field to
/// bring into view.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    /// The failing fields, in form order.
    failed: Vec<Field>,
}

impl ValidationReport {
    /// Build a report from a list of failing fields.
    #[must_use]
    pub fn from_failures(failed: Vec<Field>) -> Self {
        Self { failed }
    }

    /// Whether the form passed validation.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.failed.is_empty()
    }

    /// The failing fields, in form order.
    #[must_use]
    pub fn failed(&self) -> &[Field] {
        &self.failed
    }

    /// The first failing field, the one to focus.
    #[must_use]
    pub fn first_invalid(&self) -> Option<Field> {
        self.failed.first().copied()
    }

    /// Whether a specific field failed.
    #[must_use]
    pub fn contains(&self, field: Field) -> bool {
        self.failed.contains(&field)
    }
}

impl std::fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.failed.is_empty() {
            return write!(f, "all fields valid");
        }
        let labels: Vec<&str> = self.failed.iter().map(|field| field.label()).collect();
        let noun = if self.failed.len() == 1 {
            "field"
        } else {
            "fields"
        };
        write!(f, "{} invalid {noun}: {}", self.failed.len(), labels.join(", "))
    }
}

/// Validate a registration form without converting it.
///
/// Every rule is evaluated; the report collects all failures rather than
/// stopping at the first.
#[must_use]
pub fn validate(form: &RegistrationForm) -> ValidationReport {
    form.parse().err().unwrap_or_default()
}

/// Check an email address against the accepted shape.
///
/// Empty values and values containing whitespace never match.
#[must_use]
pub fn is_valid_email(value: &str) -> bool {
    email_regex().is_match(value)
}

/// Check a phone number.
///
/// Hyphens and whitespace are stripped first; what remains must be exactly
/// ten decimal digits.
#[must_use]
pub fn is_valid_phone(value: &str) -> bool {
    let digits: String = value
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '-')
        .collect();
    digits.len() == PHONE_DIGITS && digits.chars().all(|c| c.is_ascii_digit())
}
