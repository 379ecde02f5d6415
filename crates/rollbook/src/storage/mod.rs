//! Storage layer for rollbook.
//!
//! This module provides `SQLite`-based persistent storage for registrations.
//! The whole collection lives under one well-known key as a single JSON
//! document, and two further keys carry the transient hand-off slots that
//! connect the workflows.

pub mod migrations;
pub mod schema;

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension};
use tracing::{debug, info, warn};

use crate::error::{Error, Result};
use crate::record::Registration;

/// Key under which the registration collection is stored.
pub const REGISTRATIONS_KEY: &str = "registrations";

/// A transient hand-off slot carrying one record between workflows.
///
/// Each slot holds at most one registration and is consumed by a single
/// read: whichever workflow takes it also clears it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    /// The most recently submitted record, read by the confirmation view.
    LastSubmission,
    /// The record queued for editing, read by the registration workflow.
    EditingSubmission,
}

impl Slot {
    /// The storage key for this slot.
    #[must_use]
    pub fn key(&self) -> &'static str {
        match self {
            Self::LastSubmission => "lastSubmission",
            Self::EditingSubmission => "editingSubmission",
        }
    }
}

impl std::fmt::Display for Slot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

/// Storage engine for registrations.
///
/// Provides persistent storage using `SQLite` with support for:
/// - Loading and replacing the registration collection atomically
/// - Read-once hand-off slots between workflows
/// - Store statistics for the status view
#[derive(Debug)]
pub struct Store {
    /// Path to the database file.
    path: PathBuf,
    /// Database connection.
    conn: Connection,
}

impl Store {
    /// Open or create a store at the given path.
    ///
    /// Creates the parent directories and database file if they don't exist.
    /// Initializes the schema if this is a new database.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or schema
    /// initialization fails.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        // Create parent directories if needed
        if let Some(parent) = path.parent() {
            if !parent.exists() {
                std::fs::create_dir_all(parent).map_err(|source| Error::DirectoryCreate {
                    path: parent.to_path_buf(),
                    source,
                })?;
            }
        }

        debug!("Opening database at {}", path.display());
        let conn = Connection::open(&path).map_err(|source| Error::DatabaseOpen {
            path: path.clone(),
            source,
        })?;

        // Enable WAL mode for better concurrent read performance
        conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA synchronous=NORMAL;")?;

        // Initialize schema
        migrations::initialize_schema(&conn)?;

        info!("Database opened successfully at {}", path.display());
        Ok(Self { path, conn })
    }

    /// Create an in-memory store for testing.
    ///
    /// # Errors
    ///
    /// Returns an error if the in-memory database cannot be created.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().map_err(|source| Error::DatabaseOpen {
            path: PathBuf::from(":memory:"),
            source,
        })?;

        migrations::initialize_schema(&conn)?;

        Ok(Self {
            path: PathBuf::from(":memory:"),
            conn,
        })
    }

    /// Get the path to the database file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the full registration collection.
    ///
    /// An absent entry yields an empty collection. A stored payload that no
    /// longer parses is logged and treated as empty rather than failing the
    /// caller.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn load_all(&self) -> Result<Vec<Registration>> {
        let Some(raw) = self.read_entry(REGISTRATIONS_KEY)? else {
            return Ok(Vec::new());
        };

        match serde_json::from_str(&raw) {
            Ok(records) => Ok(records),
            Err(err) => {
                warn!("Discarding unreadable registration data: {err}");
                Ok(Vec::new())
            }
        }
    }

    /// Replace the stored registration collection.
    ///
    /// The collection is written as a single entry, so a failed write leaves
    /// the previous collection intact.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the database operation fails.
    pub fn save_all(&self, records: &[Registration]) -> Result<()> {
        let payload = serde_json::to_string(records)?;
        self.write_entry(REGISTRATIONS_KEY, &payload)?;
        debug!("Saved {} registrations", records.len());
        Ok(())
    }

    /// Fill or clear a hand-off slot.
    ///
    /// Passing `None` empties the slot.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the database operation fails.
    pub fn set_handoff(&self, slot: Slot, record: Option<&Registration>) -> Result<()> {
        match record {
            Some(record) => {
                let payload = serde_json::to_string(record)?;
                self.write_entry(slot.key(), &payload)?;
                debug!("Stored {slot} hand-off for id {}", record.id);
            }
            None => {
                self.delete_entry(slot.key())?;
                debug!("Cleared {slot} hand-off");
            }
        }
        Ok(())
    }

    /// Read and clear a hand-off slot.
    ///
    /// The slot is emptied even when its payload no longer parses; a stale
    /// or corrupt hand-off must not survive the read.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn take_handoff(&self, slot: Slot) -> Result<Option<Registration>> {
        let Some(raw) = self.read_entry(slot.key())? else {
            return Ok(None);
        };

        self.delete_entry(slot.key())?;

        match serde_json::from_str(&raw) {
            Ok(record) => Ok(Some(record)),
            Err(err) => {
                warn!("Discarding unreadable {slot} hand-off: {err}");
                Ok(None)
            }
        }
    }

    /// Check whether a hand-off slot is occupied, without consuming it.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn has_handoff(&self, slot: Slot) -> Result<bool> {
        let count: i32 = self.conn.query_row(
            "SELECT COUNT(*) FROM entries WHERE key = ?1",
            [slot.key()],
            |row| row.get(0),
        )?;
        Ok(count > 0)
    }

    /// Count stored registrations.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn count(&self) -> Result<usize> {
        Ok(self.load_all()?.len())
    }

    /// Get store statistics.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn stats(&self) -> Result<StoreStats> {
        let records = self.load_all()?;
        let newest_submission = records.iter().map(|record| record.submitted_at).max();

        // Get database file size
        let db_size_bytes = if self.path.to_string_lossy() == ":memory:" {
            0
        } else {
            std::fs::metadata(&self.path).map(|m| m.len()).unwrap_or(0)
        };

        Ok(StoreStats {
            total_records: records.len(),
            newest_submission,
            pending_edit: self.has_handoff(Slot::EditingSubmission)?,
            pending_confirmation: self.has_handoff(Slot::LastSubmission)?,
            db_size_bytes,
        })
    }

    /// Read the raw value stored under a key.
    fn read_entry(&self, key: &str) -> Result<Option<String>> {
        let value = self
            .conn
            .query_row("SELECT value FROM entries WHERE key = ?1", [key], |row| {
                row.get(0)
            })
            .optional()?;
        Ok(value)
    }

    /// Write a value under a key, replacing any previous value.
    fn write_entry(&self, key: &str, value: &str) -> Result<()> {
        self.conn.execute(
            "INSERT OR REPLACE INTO entries (key, value, updated_at) VALUES (?1, ?2, ?3)",
            params![key, value, Utc::now().to_rfc3339()],
        )?;
        Ok(())
    }

    /// Remove the entry stored under a key, if any.
    fn delete_entry(&self, key: &str) -> Result<()> {
        self.conn.execute("DELETE FROM entries WHERE key = ?1", [key])?;
        Ok(())
    }
}

/// Statistics about the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreStats {
    /// Total number of registrations stored.
    pub total_records: usize,
    /// Submission time of the most recent registration.
    pub newest_submission: Option<DateTime<Utc>>,
    /// Whether an edit hand-off is waiting to be consumed.
    pub pending_edit: bool,
    /// Whether a confirmation hand-off is waiting to be consumed.
    pub pending_confirmation: bool,
    /// Size of the database file in bytes.
    pub db_size_bytes: u64,
}
