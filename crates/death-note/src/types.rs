//! Core data types for note entries and their time-gated fields.

use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

/// Cause of death recorded when none is written in time.
pub const DEFAULT_CAUSE_OF_DEATH: &str = "heart attack";

/// Details recorded when none are written in time.
pub const DEFAULT_DETAILS_OF_DEATH: &str = "";

/// Whether a field may still be amended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldState {
    Writable,
    Frozen,
}

impl FieldState {
    /// State of a field created at `created_at` with the given window, as seen at `now`.
    ///
    /// The window edge itself is still writable.
    pub fn at(created_at: Instant, window: Duration, now: Instant) -> Self {
        if now.saturating_duration_since(created_at) > window {
            FieldState::Frozen
        } else {
            FieldState::Writable
        }
    }

    pub fn is_writable(self) -> bool {
        self == FieldState::Writable
    }
}

/// A name written in the note together with its cause and details of death.
#[derive(Debug, Clone)]
pub struct Entry {
    name: String,
    created_at: Instant,
    cause: String,
    details: String,
}

impl Entry {
    /// Create an entry with the default cause and empty details.
    pub fn new(name: impl Into<String>, created_at: Instant) -> Self {
        Self {
            name: name.into(),
            created_at,
            cause: DEFAULT_CAUSE_OF_DEATH.to_string(),
            details: DEFAULT_DETAILS_OF_DEATH.to_string(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn created_at(&self) -> Instant {
        self.created_at
    }

    pub fn cause(&self) -> &str {
        &self.cause
    }

    pub fn details(&self) -> &str {
        &self.details
    }

    /// Replace the cause if `now` is within `window` of creation.
    ///
    /// Returns `false` and leaves the cause untouched once the window has passed.
    pub fn write_cause(&mut self, cause: &str, window: Duration, now: Instant) -> bool {
        if !FieldState::at(self.created_at, window, now).is_writable() {
            return false;
        }
        self.cause = cause.to_string();
        true
    }

    /// Replace the details if `now` is within `window` of creation.
    pub fn write_details(&mut self, details: &str, window: Duration, now: Instant) -> bool {
        if !FieldState::at(self.created_at, window, now).is_writable() {
            return false;
        }
        self.details = details.to_string();
        true
    }
}

/// Read-only view of an entry, suitable for rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntrySnapshot {
    pub name: String,
    pub cause: String,
    pub details: String,
    pub cause_state: FieldState,
    pub details_state: FieldState,
    pub age_ms: u64,
}

/// Errors that can occur while using the note.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum NoteError {
    #[error("Null input: {0}")]
    NullInput(String),

    #[error("Illegal state: {0}")]
    IllegalState(String),

    #[error("Name {0} is not written in the note")]
    NotFound(String),

    #[error("Rule number {0} does not exist")]
    OutOfRange(i64),

    #[error("Invalid config: {0}")]
    InvalidConfig(String),
}

/// Convenience result type.
pub type NoteResult<T> = Result<T, NoteError>;
