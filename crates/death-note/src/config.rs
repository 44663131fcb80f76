//! Freeze window configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::types::{NoteError, NoteResult};

/// Default time allowed to write the cause of death.
pub const DEFAULT_CAUSE_WINDOW_MS: u64 = 40;

/// Default time allowed to write the details of death.
pub const DEFAULT_DETAILS_WINDOW_MS: u64 = 6000 + DEFAULT_CAUSE_WINDOW_MS;

/// How long each field of a new entry stays writable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteConfig {
    #[serde(rename = "cause_window_ms", with = "millis")]
    pub cause_window: Duration,
    #[serde(rename = "details_window_ms", with = "millis")]
    pub details_window: Duration,
}

impl Default for NoteConfig {
    fn default() -> Self {
        Self {
            cause_window: Duration::from_millis(DEFAULT_CAUSE_WINDOW_MS),
            details_window: Duration::from_millis(DEFAULT_DETAILS_WINDOW_MS),
        }
    }
}

impl NoteConfig {
    /// Build a validated config from the two windows.
    pub fn new(cause_window: Duration, details_window: Duration) -> NoteResult<Self> {
        let config = Self {
            cause_window,
            details_window,
        };
        config.validate()?;
        Ok(config)
    }

    /// The cause window must close before the details window.
    pub fn validate(&self) -> NoteResult<()> {
        if self.cause_window >= self.details_window {
            return Err(NoteError::InvalidConfig(format!(
                "cause window ({} ms) must be shorter than details window ({} ms)",
                self.cause_window.as_millis(),
                self.details_window.as_millis()
            )));
        }
        Ok(())
    }

    /// Parse and validate a JSON config such as
    /// `{"cause_window_ms": 40, "details_window_ms": 6040}`.
    pub fn from_json(json: &str) -> NoteResult<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| NoteError::InvalidConfig(format!("Failed to parse config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> NoteResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| NoteError::InvalidConfig(format!("Failed to serialize config: {e}")))
    }
}

mod millis {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_u64(d.as_millis() as u64)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Duration, D::Error> {
        u64::deserialize(d).map(Duration::from_millis)
    }
}
