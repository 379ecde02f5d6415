//! Command-line interface for rollbook.
//!
//! This module provides the CLI structure and command handlers for the
//! `rollbook` binary.

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use commands::{
    ConfigCommand, CourseArg, DeleteCommand, EditCommand, GenderArg, LastCommand, ListCommand,
    OutputFormat, StatusCommand, SubmitCommand,
};

/// rollbook - Keep course registrations on your own machine
///
/// A local registration desk that validates applicant details, stores them
/// in a local database, and lets you review, search, edit, and prune them.
#[derive(Debug, Parser)]
#[command(name = "rollbook")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to custom configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Increase verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// The command to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Submit a registration (finishes a pending edit when one is queued)
    Submit(SubmitCommand),

    /// Show the registration that was just submitted
    Last(LastCommand),

    /// List and search stored registrations
    List(ListCommand),

    /// Queue a stored registration for editing
    Edit(EditCommand),

    /// Permanently delete a registration
    Delete(DeleteCommand),

    /// Show store status
    Status(StatusCommand),

    /// View or validate configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

impl Cli {
    /// Get the verbosity level based on flags.
    #[must_use]
    pub fn verbosity(&self) -> crate::logging::Verbosity {
        if self.quiet {
            crate::logging::Verbosity::Quiet
        } else {
            match self.verbose {
                0 => crate::logging::Verbosity::Normal,
                1 => crate::logging::Verbosity::Verbose,
                _ => crate::logging::Verbosity::Trace,
            }
        }
    }
}
