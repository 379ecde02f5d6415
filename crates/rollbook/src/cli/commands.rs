//! CLI command definitions.
//!
//! This module defines the structure of all CLI subcommands.

use std::path::PathBuf;

use clap::{Args, Subcommand, ValueEnum};

use crate::validate::RegistrationForm;

/// Submit command arguments.
///
/// Every field is optional on the command line. Omitted fields keep whatever
/// the form already holds (prefilled values when an edit is pending, empty
/// strings otherwise) and are judged by the validator like any other value.
#[derive(Debug, Args)]
pub struct SubmitCommand {
    /// Applicant's full name
    #[arg(long)]
    pub full_name: Option<String>,

    /// Contact email address
    #[arg(long)]
    pub email: Option<String>,

    /// Contact phone number (10 digits; hyphens and spaces allowed)
    #[arg(long)]
    pub phone: Option<String>,

    /// Applicant's gender
    #[arg(long, value_enum)]
    pub gender: Option<GenderArg>,

    /// Course to register for
    #[arg(long, value_enum)]
    pub course: Option<CourseArg>,

    /// Postal address
    #[arg(long)]
    pub address: Option<String>,
}

impl SubmitCommand {
    /// Overlay the provided flags onto a registration form.
    pub fn apply_to(&self, form: &mut RegistrationForm) {
        if let Some(full_name) = &self.full_name {
            form.full_name = full_name.clone();
        }
        if let Some(email) = &self.email {
            form.email = email.clone();
        }
        if let Some(phone) = &self.phone {
            form.phone = phone.clone();
        }
        if let Some(gender) = self.gender {
            form.gender = crate::record::Gender::from(gender).to_string();
        }
        if let Some(course) = self.course {
            form.course = crate::record::Course::from(course).to_string();
        }
        if let Some(address) = &self.address {
            form.address = address.clone();
        }
    }
}

/// Last-submission command arguments.
#[derive(Debug, Args)]
pub struct LastCommand {
    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,
}

/// List command arguments.
#[derive(Debug, Args)]
pub struct ListCommand {
    /// Show only registrations matching this term
    #[arg(short, long)]
    pub search: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,
}

/// Edit command arguments.
#[derive(Debug, Args)]
pub struct EditCommand {
    /// Id of the registration to edit
    pub id: i64,
}

/// Delete command arguments.
#[derive(Debug, Args)]
pub struct DeleteCommand {
    /// Id of the registration to delete
    pub id: i64,

    /// Skip confirmation prompt
    #[arg(short, long)]
    pub yes: bool,
}

/// Status command arguments.
#[derive(Debug, Args)]
pub struct StatusCommand {
    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,
}

/// Configuration commands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration
    Show {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Show the configuration file path
    Path,

    /// Validate configuration
    Validate {
        /// Path to configuration file to validate
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
}

/// Gender argument for the submit command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum GenderArg {
    /// Male
    Male,
    /// Female
    Female,
    /// Other
    Other,
}

impl From<GenderArg> for crate::record::Gender {
    fn from(arg: GenderArg) -> Self {
        match arg {
            GenderArg::Male => Self::Male,
            GenderArg::Female => Self::Female,
            GenderArg::Other => Self::Other,
        }
    }
}

/// Course argument for the submit command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CourseArg {
    /// Web Development
    WebDevelopment,
    /// Data Science
    DataScience,
    /// Mobile App Development
    MobileApp,
    /// UI/UX Design
    UiUxDesign,
    /// Digital Marketing
    DigitalMarketing,
}

impl From<CourseArg> for crate::record::Course {
    fn from(arg: CourseArg) -> Self {
        match arg {
            CourseArg::WebDevelopment => Self::WebDevelopment,
            CourseArg::DataScience => Self::DataScience,
            CourseArg::MobileApp => Self::MobileApp,
            CourseArg::UiUxDesign => Self::UiUxDesign,
            CourseArg::DigitalMarketing => Self::DigitalMarketing,
        }
    }
}

/// Output format for commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Plain text output
    #[default]
    Plain,
    /// Formatted table
    Table,
    /// JSON output
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn empty_submit() -> SubmitCommand {
        SubmitCommand {
            full_name: None,
            email: None,
            phone: None,
            gender: None,
            course: None,
            address: None,
        }
    }

    #[test]
    fn test_gender_arg_conversion() {
        assert_eq!(
            crate::record::Gender::from(GenderArg::Male),
            crate::record::Gender::Male
        );
        assert_eq!(
            crate::record::Gender::from(GenderArg::Female),
            crate::record::Gender::Female
        );
        assert_eq!(
            crate::record::Gender::from(GenderArg::Other),
            crate::record::Gender::Other
        );
    }

    #[test]
    fn test_course_arg_conversion() {
        assert_eq!(
            crate::record::Course::from(CourseArg::WebDevelopment),
            crate::record::Course::WebDevelopment
        );
        assert_eq!(
            crate::record::Course::from(CourseArg::DataScience),
            crate::record::Course::DataScience
        );
        assert_eq!(
            crate::record::Course::from(CourseArg::MobileApp),
            crate::record::Course::MobileApp
        );
        assert_eq!(
            crate::record::Course::from(CourseArg::UiUxDesign),
            crate::record::Course::UiUxDesign
        );
        assert_eq!(
            crate::record::Course::from(CourseArg::DigitalMarketing),
            crate::record::Course::DigitalMarketing
        );
    }

    #[test]
    fn test_apply_to_overlays_provided_fields() {
        let cmd = SubmitCommand {
            full_name: Some("Jane Smith".to_string()),
            gender: Some(GenderArg::Female),
            course: Some(CourseArg::DataScience),
            ..empty_submit()
        };

        let mut form = RegistrationForm::default();
        cmd.apply_to(&mut form);

        assert_eq!(form.full_name, "Jane Smith");
        assert_eq!(form.gender, "female");
        assert_eq!(form.course, "data-science");
        assert_eq!(form.email, "");
        assert_eq!(form.phone, "");
        assert_eq!(form.address, "");
    }

    #[test]
    fn test_apply_to_keeps_prefilled_fields() {
        let cmd = SubmitCommand {
            email: Some("new@example.com".to_string()),
            ..empty_submit()
        };

        let mut form = RegistrationForm {
            full_name: "Jane Smith".to_string(),
            email: "old@example.com".to_string(),
            phone: "1234567890".to_string(),
            gender: "female".to_string(),
            course: "web-development".to_string(),
            address: "12 Main St".to_string(),
        };
        cmd.apply_to(&mut form);

        assert_eq!(form.email, "new@example.com");
        assert_eq!(form.full_name, "Jane Smith");
        assert_eq!(form.phone, "1234567890");
        assert_eq!(form.course, "web-development");
    }

    #[test]
    fn test_output_format_default() {
        assert_eq!(OutputFormat::default(), OutputFormat::Plain);
    }

    #[test]
    fn test_submit_command_debug() {
        let cmd = SubmitCommand {
            full_name: Some("Jane".to_string()),
            ..empty_submit()
        };
        let debug_str = format!("{cmd:?}");
        assert!(debug_str.contains("full_name"));
        assert!(debug_str.contains("Jane"));
    }

    #[test]
    fn test_list_command_debug() {
        let cmd = ListCommand {
            search: Some("web".to_string()),
            format: OutputFormat::Table,
        };
        let debug_str = format!("{cmd:?}");
        assert!(debug_str.contains("search"));
        assert!(debug_str.contains("web"));
    }

    #[test]
    fn test_delete_command_debug() {
        let cmd = DeleteCommand { id: 42, yes: false };
        let debug_str = format!("{cmd:?}");
        assert!(debug_str.contains("42"));
        assert!(debug_str.contains("yes"));
    }

    #[test]
    fn test_config_command_debug() {
        let cmd = ConfigCommand::Show { json: false };
        let debug_str = format!("{cmd:?}");
        assert!(debug_str.contains("Show"));
    }

    #[test]
    fn test_gender_arg_debug() {
        let arg = GenderArg::Other;
        let debug_str = format!("{arg:?}");
        assert_eq!(debug_str, "Other");
    }

    #[test]
    fn test_course_arg_clone() {
        let arg = CourseArg::MobileApp;
        let cloned = arg;
        assert_eq!(arg, cloned);
    }

    #[test]
    fn test_output_format_debug() {
        let format = OutputFormat::Json;
        let debug_str = format!("{format:?}");
        assert_eq!(debug_str, "Json");
    }
}
