//! Core registration types for rollbook.
//!
//! This module defines the fundamental data structures for representing
//! course registrations and the applicants behind them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Gender selection offered on the registration form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    /// Male.
    Male,
    /// Female.
    Female,
    /// Other or undisclosed.
    Other,
}

impl Gender {
    /// All selectable genders, in form order.
    pub const ALL: [Self; 3] = [Self::Male, Self::Female, Self::Other];

    /// Parse a stored gender value.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "male" => Some(Self::Male),
            "female" => Some(Self::Female),
            "other" => Some(Self::Other),
            _ => None,
        }
    }

    /// Human-readable label for display.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Male => "Male",
            Self::Female => "Female",
            Self::Other => "Other",
        }
    }
}

impl std::fmt::Display for Gender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Male => write!(f, "male"),
            Self::Female => write!(f, "female"),
            Self::Other => write!(f, "other"),
        }
    }
}

/// Course open for enrollment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Course {
    /// Full-stack web development.
    WebDevelopment,
    /// Data science and analytics.
    DataScience,
    /// Mobile application development.
    MobileApp,
    /// Interface and experience design.
    UiUxDesign,
    /// Digital marketing.
    DigitalMarketing,
}

impl Course {
    /// All offered courses, in form order.
    pub const ALL: [Self; 5] = [
        Self::WebDevelopment,
        Self::DataScience,
        Self::MobileApp,
        Self::UiUxDesign,
        Self::DigitalMarketing,
    ];

    /// Parse a stored course id.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "web-development" => Some(Self::WebDevelopment),
            "data-science" => Some(Self::DataScience),
            "mobile-app" => Some(Self::MobileApp),
            "ui-ux-design" => Some(Self::UiUxDesign),
            "digital-marketing" => Some(Self::DigitalMarketing),
            _ => None,
        }
    }

    /// Human-readable course title for display.
    #[must_use]
    pub fn title(&self) -> &'static str {
        match self {
            Self::WebDevelopment => "Web Development",
            Self::DataScience => "Data Science",
            Self::MobileApp => "Mobile App Development",
            Self::UiUxDesign => "UI/UX Design",
            Self::DigitalMarketing => "Digital Marketing",
        }
    }
}

impl std::fmt::Display for Course {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::WebDevelopment => write!(f, "web-development"),
            Self::DataScience => write!(f, "data-science"),
            Self::MobileApp => write!(f, "mobile-app"),
            Self::UiUxDesign => write!(f, "ui-ux-design"),
            Self::DigitalMarketing => write!(f, "digital-marketing"),
        }
    }
}

/// A validated applicant, ready to be recorded.
///
/// Values are carried exactly as entered on the form; the only way to obtain
/// one is through `RegistrationForm::parse`, so the fields are known to have
/// passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Applicant {
    /// Applicant's full name.
    pub full_name: String,
    /// Contact email address.
    pub email: String,
    /// Contact phone number.
    pub phone: String,
    /// Selected gender.
    pub gender: Gender,
    /// Selected course.
    pub course: Course,
    /// Postal address.
    pub address: String,
}

/// A stored course registration.
///
/// Serializes with camelCase field names to match the persisted JSON layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Registration {
    /// Unique identifier, assigned when the registration is created.
    pub id: i64,

    /// Applicant's full name.
    pub full_name: String,

    /// Contact email address.
    pub email: String,

    /// Contact phone number.
    pub phone: String,

    /// Selected gender.
    pub gender: Gender,

    /// Selected course.
    pub course: Course,

    /// Postal address.
    pub address: String,

    /// When this registration was created or last updated.
    pub submitted_at: DateTime<Utc>,
}

impl Registration {
    /// Create a new registration from a validated applicant.
    #[must_use]
    pub fn create(applicant: Applicant, id: i64, submitted_at: DateTime<Utc>) -> Self {
        Self {
            id,
            full_name: applicant.full_name,
            email: applicant.email,
            phone: applicant.phone,
            gender: applicant.gender,
            course: applicant.course,
            address: applicant.address,
            submitted_at,
        }
    }

    /// Overwrite the applicant fields of this registration.
    ///
    /// The id is preserved; the submission time is refreshed.
    pub fn apply(&mut self, applicant: Applicant, submitted_at: DateTime<Utc>) {
        self.full_name = applicant.full_name;
        self.email = applicant.email;
        self.phone = applicant.phone;
        self.gender = applicant.gender;
        self.course = applicant.course;
        self.address = applicant.address;
        self.submitted_at = submitted_at;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_applicant() -> Applicant {
        Applicant {
            full_name: "Jo Lee".to_string(),
            email: "jo@example.com".to_string(),
            phone: "1234567890".to_string(),
            gender: Gender::Other,
            course: Course::WebDevelopment,
            address: "12 Main St".to_string(),
        }
    }

    #[test]
    fn test_gender_display() {
        assert_eq!(Gender::Male.to_string(), "male");
        assert_eq!(Gender::Female.to_string(), "female");
        assert_eq!(Gender::Other.to_string(), "other");
    }

    #[test]
    fn test_gender_parse() {
        assert_eq!(Gender::parse("male"), Some(Gender::Male));
        assert_eq!(Gender::parse("female"), Some(Gender::Female));
        assert_eq!(Gender::parse("other"), Some(Gender::Other));
        assert_eq!(Gender::parse("Male"), None);
        assert_eq!(Gender::parse(""), None);
    }

    #[test]
    fn test_gender_parse_display_round_trip() {
        for gender in Gender::ALL {
            assert_eq!(Gender::parse(&gender.to_string()), Some(gender));
        }
    }

    #[test]
    fn test_course_display() {
        assert_eq!(Course::WebDevelopment.to_string(), "web-development");
        assert_eq!(Course::DataScience.to_string(), "data-science");
        assert_eq!(Course::MobileApp.to_string(), "mobile-app");
        assert_eq!(Course::UiUxDesign.to_string(), "ui-ux-design");
        assert_eq!(Course::DigitalMarketing.to_string(), "digital-marketing");
    }

    #[test]
    fn test_course_parse() {
        assert_eq!(Course::parse("web-development"), Some(Course::WebDevelopment));
        assert_eq!(Course::parse("data-science"), Some(Course::DataScience));
        assert_eq!(Course::parse("mobile-app"), Some(Course::MobileApp));
        assert_eq!(Course::parse("ui-ux-design"), Some(Course::UiUxDesign));
        assert_eq!(
            Course::parse("digital-marketing"),
            Some(Course::DigitalMarketing)
        );
        assert_eq!(Course::parse("basket-weaving"), None);
        assert_eq!(Course::parse(""), None);
    }

    #[test]
    fn test_course_titles() {
        assert_eq!(Course::WebDevelopment.title(), "Web Development");
        assert_eq!(Course::MobileApp.title(), "Mobile App Development");
        assert_eq!(Course::UiUxDesign.title(), "UI/UX Design");
    }

    #[test]
    fn test_registration_create() {
        let now = Utc::now();
        let registration = Registration::create(sample_applicant(), 7, now);

        assert_eq!(registration.id, 7);
        assert_eq!(registration.full_name, "Jo Lee");
        assert_eq!(registration.email, "jo@example.com");
        assert_eq!(registration.course, Course::WebDevelopment);
        assert_eq!(registration.submitted_at, now);
    }

    #[test]
    fn test_registration_apply_preserves_id() {
        let created = Utc::now();
        let mut registration = Registration::create(sample_applicant(), 7, created);

        let mut updated = sample_applicant();
        updated.full_name = "Jo A. Lee".to_string();
        updated.course = Course::DataScience;

        let later = created + chrono::Duration::seconds(30);
        registration.apply(updated, later);

        assert_eq!(registration.id, 7);
        assert_eq!(registration.full_name, "Jo A. Lee");
        assert_eq!(registration.course, Course::DataScience);
        assert_eq!(registration.submitted_at, later);
    }

    #[test]
    fn test_registration_serializes_camel_case() {
        let registration = Registration::create(sample_applicant(), 1, Utc::now());
        let json = serde_json::to_string(&registration).unwrap();

        assert!(json.contains("\"fullName\":\"Jo Lee\""));
        assert!(json.contains("\"submittedAt\""));
        assert!(json.contains("\"gender\":\"other\""));
        assert!(json.contains("\"course\":\"web-development\""));
    }

    #[test]
    fn test_registration_deserializes_stored_layout() {
        let json = r#"{
            "id": 1700000000000,
            "fullName": "Sam Roy",
            "email": "sam@example.com",
            "phone": "987-654-3210",
            "gender": "female",
            "course": "ui-ux-design",
            "address": "4 Elm Road",
            "submittedAt": "2024-01-15T10:30:00Z"
        }"#;

        let registration: Registration = serde_json::from_str(json).unwrap();
        assert_eq!(registration.id, 1_700_000_000_000);
        assert_eq!(registration.full_name, "Sam Roy");
        assert_eq!(registration.gender, Gender::Female);
        assert_eq!(registration.course, Course::UiUxDesign);
    }

    #[test]
    fn test_registration_serialization_round_trip() {
        let registration = Registration::create(sample_applicant(), 42, Utc::now());
        let json = serde_json::to_string(&registration).unwrap();
        let back: Registration = serde_json::from_str(&json).unwrap();
        assert_eq!(registration, back);
    }
}
