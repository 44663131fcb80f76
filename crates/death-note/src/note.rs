//! The note itself: named entries, the current-entry pen position, and the
//! time-gated field writes.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use crate::clock::{Clock, SystemClock};
use crate::config::NoteConfig;
use crate::rules;
use crate::types::{Entry, EntrySnapshot, FieldState, NoteError, NoteResult};

/// An in-memory death note.
///
/// Field writes always target the most recently written name. Whether a field
/// is still writable is decided when the call is made, from the note's clock.
#[derive(Debug)]
pub struct DeathNote<C: Clock = SystemClock> {
    entries: Vec<Entry>,
    index: HashMap<String, usize>,
    current: Option<usize>,
    config: NoteConfig,
    clock: C,
}

impl DeathNote<SystemClock> {
    /// Create an empty note with the default windows and the system clock.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            index: HashMap::new(),
            current: None,
            config: NoteConfig::default(),
            clock: SystemClock,
        }
    }

    /// Create an empty note with custom windows and the system clock.
    pub fn with_config(config: NoteConfig) -> NoteResult<Self> {
        Self::with_clock(config, SystemClock)
    }
}

impl Default for DeathNote<SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> DeathNote<C> {
    /// Create an empty note reading time from `clock`.
    pub fn with_clock(config: NoteConfig, clock: C) -> NoteResult<Self> {
        config.validate()?;
        Ok(Self {
            entries: Vec::new(),
            index: HashMap::new(),
            current: None,
            config,
            clock,
        })
    }

    pub fn config(&self) -> &NoteConfig {
        &self.config
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Look up a rule by its 1-based number.
    pub fn get_rule(&self, number: i64) -> NoteResult<&'static str> {
        rules::get_rule(number)
    }

    /// Write a name in the note and make it the current entry.
    ///
    /// Empty or blank names are ignored. Writing a name that is already in the
    /// note replaces its entry in place with a fresh one.
    pub fn write_name<'a>(&mut self, name: impl Into<Option<&'a str>>) -> NoteResult<()> {
        let name = name.into().ok_or_else(|| {
            NoteError::NullInput("Parameter name can not be null, empty or blank".to_string())
        })?;

        if name.trim().is_empty() {
            tracing::trace!("Ignoring blank name");
            return Ok(());
        }

        let entry = Entry::new(name, self.clock.now());
        let position = match self.index.get(name) {
            Some(&i) => {
                tracing::debug!("Rewriting name '{name}'");
                self.entries[i] = entry;
                i
            }
            None => {
                tracing::debug!("Writing name '{name}'");
                self.entries.push(entry);
                let i = self.entries.len() - 1;
                self.index.insert(name.to_string(), i);
                i
            }
        };
        self.current = Some(position);
        Ok(())
    }

    /// Whether `name` has been written. An absent name is never written.
    pub fn is_name_written<'a>(&self, name: impl Into<Option<&'a str>>) -> bool {
        name.into().is_some_and(|n| self.index.contains_key(n))
    }

    /// Write the cause of death for the current entry.
    ///
    /// Returns `Ok(false)` if the cause window has already closed.
    pub fn write_death_cause<'a>(&mut self, cause: impl Into<Option<&'a str>>) -> NoteResult<bool> {
        let now = self.clock.now();
        let window = self.config.cause_window;
        let (entry, cause) = self.current_entry_mut(cause.into(), "death cause")?;

        let written = entry.write_cause(cause, window, now);
        log_write("cause", entry.name(), written);
        Ok(written)
    }

    /// Write the details of death for the current entry.
    ///
    /// Returns `Ok(false)` if the details window has already closed.
    pub fn write_details<'a>(&mut self, details: impl Into<Option<&'a str>>) -> NoteResult<bool> {
        let now = self.clock.now();
        let window = self.config.details_window;
        let (entry, details) = self.current_entry_mut(details.into(), "death details")?;

        let written = entry.write_details(details, window, now);
        log_write("details", entry.name(), written);
        Ok(written)
    }

    /// The cause of death recorded for `name`.
    pub fn get_death_cause(&self, name: &str) -> NoteResult<&str> {
        self.get(name).map(Entry::cause)
    }

    /// The details of death recorded for `name`.
    pub fn get_death_details(&self, name: &str) -> NoteResult<&str> {
        self.get(name).map(Entry::details)
    }

    /// Whether the cause of `name` can still be written.
    pub fn cause_state(&self, name: &str) -> NoteResult<FieldState> {
        let entry = self.get(name)?;
        Ok(self.state_of(entry, self.config.cause_window))
    }

    /// Whether the details of `name` can still be written.
    pub fn details_state(&self, name: &str) -> NoteResult<FieldState> {
        let entry = self.get(name)?;
        Ok(self.state_of(entry, self.config.details_window))
    }

    /// Name of the entry that field writes currently target.
    pub fn current_name(&self) -> Option<&str> {
        self.current.map(|i| self.entries[i].name())
    }

    /// All written names, in the order they were first written.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(Entry::name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// A read-only view of the entry for `name`, with field states as of now.
    pub fn snapshot(&self, name: &str) -> NoteResult<EntrySnapshot> {
        let entry = self.get(name)?;
        Ok(self.snapshot_of(entry, self.clock.now()))
    }

    /// Snapshots of every entry, in insertion order.
    pub fn snapshots(&self) -> Vec<EntrySnapshot> {
        let now = self.clock.now();
        self.entries
            .iter()
            .map(|e| self.snapshot_of(e, now))
            .collect()
    }

    fn get(&self, name: &str) -> NoteResult<&Entry> {
        self.index
            .get(name)
            .map(|&i| &self.entries[i])
            .ok_or_else(|| NoteError::NotFound(name.to_string()))
    }

    fn current_entry_mut<'p>(
        &mut self,
        payload: Option<&'p str>,
        what: &str,
    ) -> NoteResult<(&mut Entry, &'p str)> {
        match (self.current, payload) {
            (Some(i), Some(payload)) => Ok((&mut self.entries[i], payload)),
            _ => Err(NoteError::IllegalState(format!(
                "The {what} can't be written in the note"
            ))),
        }
    }

    fn state_of(&self, entry: &Entry, window: Duration) -> FieldState {
        FieldState::at(entry.created_at(), window, self.clock.now())
    }

    fn snapshot_of(&self, entry: &Entry, now: Instant) -> EntrySnapshot {
        EntrySnapshot {
            name: entry.name().to_string(),
            cause: entry.cause().to_string(),
            details: entry.details().to_string(),
            cause_state: FieldState::at(entry.created_at(), self.config.cause_window, now),
            details_state: FieldState::at(entry.created_at(), self.config.details_window, now),
            age_ms: now.saturating_duration_since(entry.created_at()).as_millis() as u64,
        }
    }
}

fn log_write(field: &str, name: &str, written: bool) {
    if written {
        tracing::debug!("Wrote {field} for '{name}'");
    } else {
        tracing::debug!("The {field} of '{name}' is frozen, write rejected");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::types::{DEFAULT_CAUSE_OF_DEATH, DEFAULT_DETAILS_OF_DEATH};

    fn manual_note() -> (DeathNote<ManualClock>, ManualClock) {
        let clock = ManualClock::new();
        let note = DeathNote::with_clock(NoteConfig::default(), clock.clone()).unwrap();
        (note, clock)
    }

    #[test]
    fn test_write_name() {
        let (mut note, _) = manual_note();
        assert!(!note.is_name_written("Mario"));
        note.write_name("Mario").unwrap();
        assert!(note.is_name_written("Mario"));
        assert_eq!(note.current_name(), Some("Mario"));
    }

    #[test]
    fn test_write_null_name_fails() {
        let (mut note, _) = manual_note();
        let err = note.write_name(None).unwrap_err();
        assert!(matches!(err, NoteError::NullInput(_)));
        assert!(note.is_empty());
    }

    #[test]
    fn test_blank_names_are_ignored() {
        let (mut note, _) = manual_note();
        for name in ["", "  ", "\t\n"] {
            note.write_name(name).unwrap();
            assert!(!note.is_name_written(name));
        }
        assert!(note.is_empty());
        assert_eq!(note.current_name(), None);
    }

    #[test]
    fn test_absent_name_is_not_written() {
        let (note, _) = manual_note();
        assert!(!note.is_name_written(None));
    }

    #[test]
    fn test_defaults_after_writing_name() {
        let (mut note, _) = manual_note();
        note.write_name("Mario").unwrap();
        assert_eq!(note.get_death_cause("Mario").unwrap(), DEFAULT_CAUSE_OF_DEATH);
        assert_eq!(note.get_death_details("Mario").unwrap(), DEFAULT_DETAILS_OF_DEATH);
    }

    #[test]
    fn test_field_writes_without_name_fail() {
        let (mut note, _) = manual_note();
        assert!(matches!(
            note.write_death_cause(None),
            Err(NoteError::IllegalState(_))
        ));
        assert!(matches!(
            note.write_death_cause("fake cause"),
            Err(NoteError::IllegalState(_))
        ));
        assert!(matches!(
            note.write_details(None),
            Err(NoteError::IllegalState(_))
        ));
        assert!(matches!(
            note.write_details("fake details"),
            Err(NoteError::IllegalState(_))
        ));
    }

    #[test]
    fn test_null_payload_with_current_entry_fails() {
        let (mut note, _) = manual_note();
        note.write_name("Mario").unwrap();
        assert!(matches!(
            note.write_death_cause(None),
            Err(NoteError::IllegalState(_))
        ));
        assert!(matches!(
            note.write_details(None),
            Err(NoteError::IllegalState(_))
        ));
        assert_eq!(note.get_death_cause("Mario").unwrap(), DEFAULT_CAUSE_OF_DEATH);
    }

    #[test]
    fn test_cause_window_edge() {
        let (mut note, clock) = manual_note();
        note.write_name("Mario").unwrap();

        clock.advance(Duration::from_millis(40));
        assert!(note.write_death_cause("karting accident").unwrap());
        assert_eq!(note.cause_state("Mario").unwrap(), FieldState::Writable);

        clock.advance(Duration::from_millis(1));
        assert!(!note.write_death_cause("other").unwrap());
        assert_eq!(note.cause_state("Mario").unwrap(), FieldState::Frozen);
        assert_eq!(note.get_death_cause("Mario").unwrap(), "karting accident");
    }

    #[test]
    fn test_details_outlive_cause() {
        let (mut note, clock) = manual_note();
        note.write_name("Mario").unwrap();

        clock.advance(Duration::from_secs(1));
        assert!(!note.write_death_cause("karting accident").unwrap());
        assert!(note.write_details("ran for too long").unwrap());

        clock.advance(Duration::from_millis(5040));
        assert!(note.write_details("ran for much too long").unwrap());

        clock.advance(Duration::from_millis(1));
        assert!(!note.write_details("never stopped").unwrap());
        assert_eq!(note.get_death_details("Mario").unwrap(), "ran for much too long");
        assert_eq!(note.details_state("Mario").unwrap(), FieldState::Frozen);
    }

    #[test]
    fn test_writes_target_current_entry() {
        let (mut note, clock) = manual_note();
        note.write_name("Mario").unwrap();
        assert!(note.write_death_cause("karting accident").unwrap());

        note.write_name("Lucia").unwrap();
        clock.advance(Duration::from_millis(100));
        assert!(!note.write_death_cause("other").unwrap());

        assert_eq!(note.get_death_cause("Mario").unwrap(), "karting accident");
        assert_eq!(note.get_death_cause("Lucia").unwrap(), DEFAULT_CAUSE_OF_DEATH);
    }

    #[test]
    fn test_unknown_name_not_found() {
        let (note, _) = manual_note();
        assert_eq!(
            note.get_death_cause("Light").unwrap_err(),
            NoteError::NotFound("Light".into())
        );
        assert!(matches!(
            note.get_death_details("Light"),
            Err(NoteError::NotFound(_))
        ));
        assert!(matches!(note.cause_state("Light"), Err(NoteError::NotFound(_))));
        assert!(matches!(note.snapshot("Light"), Err(NoteError::NotFound(_))));
    }

    #[test]
    fn test_rewriting_a_name_resets_entry_and_keeps_position() {
        let (mut note, clock) = manual_note();
        note.write_name("Mario").unwrap();
        note.write_death_cause("karting accident").unwrap();
        note.write_name("Lucia").unwrap();

        clock.advance(Duration::from_secs(10));
        note.write_name("Mario").unwrap();

        assert_eq!(note.len(), 2);
        assert_eq!(note.names().collect::<Vec<_>>(), vec!["Mario", "Lucia"]);
        assert_eq!(note.current_name(), Some("Mario"));
        assert_eq!(note.get_death_cause("Mario").unwrap(), DEFAULT_CAUSE_OF_DEATH);
        assert!(note.write_death_cause("fell").unwrap());
        assert_eq!(note.get_death_cause("Mario").unwrap(), "fell");
    }

    #[test]
    fn test_snapshots() {
        let (mut note, clock) = manual_note();
        note.write_name("Mario").unwrap();
        note.write_details("ran for too long").unwrap();
        clock.advance(Duration::from_millis(500));
        note.write_name("Lucia").unwrap();

        let all = note.snapshots();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].name, "Mario");
        assert_eq!(all[0].age_ms, 500);
        assert_eq!(all[0].cause_state, FieldState::Frozen);
        assert_eq!(all[0].details_state, FieldState::Writable);
        assert_eq!(all[0].details, "ran for too long");
        assert_eq!(all[1].age_ms, 0);

        assert_eq!(note.snapshot("Lucia").unwrap(), all[1]);
    }

    #[test]
    fn test_with_clock_rejects_invalid_config() {
        let config = NoteConfig {
            cause_window: Duration::from_secs(10),
            details_window: Duration::from_secs(1),
        };
        assert!(matches!(
            DeathNote::with_clock(config, ManualClock::new()),
            Err(NoteError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_get_rule_delegates_to_catalog() {
        let note = DeathNote::new();
        assert_eq!(note.get_rule(1).unwrap(), rules::RULES[0]);
        assert!(matches!(note.get_rule(0), Err(NoteError::OutOfRange(0))));
    }
}
