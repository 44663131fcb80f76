//! Configuration loading and resolution.

use std::time::Duration;

use death_note::{NoteConfig, NoteError, NoteResult};

/// Environment variable overriding the cause window, in milliseconds.
pub const CAUSE_WINDOW_ENV: &str = "DEATH_NOTE_CAUSE_WINDOW_MS";

/// Environment variable overriding the details window, in milliseconds.
pub const DETAILS_WINDOW_ENV: &str = "DEATH_NOTE_DETAILS_WINDOW_MS";

/// Resolve the note windows: explicit flag, then environment, then default.
pub fn resolve_note_config(
    cause_window_ms: Option<u64>,
    details_window_ms: Option<u64>,
) -> NoteResult<NoteConfig> {
    resolve_with_env(cause_window_ms, details_window_ms, |key| {
        std::env::var(key).ok()
    })
}

/// Same as [`resolve_note_config`], reading variables through `env`.
pub fn resolve_with_env(
    cause_window_ms: Option<u64>,
    details_window_ms: Option<u64>,
    env: impl Fn(&str) -> Option<String>,
) -> NoteResult<NoteConfig> {
    let defaults = NoteConfig::default();

    let cause_window = resolve_window(cause_window_ms, CAUSE_WINDOW_ENV, &env)?
        .unwrap_or(defaults.cause_window);
    let details_window = resolve_window(details_window_ms, DETAILS_WINDOW_ENV, &env)?
        .unwrap_or(defaults.details_window);

    NoteConfig::new(cause_window, details_window)
}

fn resolve_window(
    explicit: Option<u64>,
    key: &str,
    env: &impl Fn(&str) -> Option<String>,
) -> NoteResult<Option<Duration>> {
    if let Some(ms) = explicit {
        return Ok(Some(Duration::from_millis(ms)));
    }

    match env(key) {
        Some(raw) => raw
            .trim()
            .parse::<u64>()
            .map(|ms| Some(Duration::from_millis(ms)))
            .map_err(|e| NoteError::InvalidConfig(format!("{key}={raw:?}: {e}"))),
        None => Ok(None),
    }
}
