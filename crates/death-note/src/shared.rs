//! Thread-safe handle around a [`DeathNote`].

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::clock::{Clock, SystemClock};
use crate::config::NoteConfig;
use crate::note::DeathNote;
use crate::types::{EntrySnapshot, NoteResult};

/// A cloneable, lockable death note.
///
/// Each operation takes the lock once, so writing a name and moving the pen to
/// it can never interleave with another writer.
#[derive(Debug)]
pub struct SharedDeathNote<C: Clock = SystemClock> {
    inner: Arc<Mutex<DeathNote<C>>>,
}

impl<C: Clock> Clone for SharedDeathNote<C> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl SharedDeathNote<SystemClock> {
    pub fn new() -> Self {
        Self::from_note(DeathNote::new())
    }

    pub fn with_config(config: NoteConfig) -> NoteResult<Self> {
        DeathNote::with_config(config).map(Self::from_note)
    }
}

impl Default for SharedDeathNote<SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> SharedDeathNote<C> {
    pub fn from_note(note: DeathNote<C>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(note)),
        }
    }

    /// Run `f` with exclusive access to the underlying note.
    pub fn with<R>(&self, f: impl FnOnce(&mut DeathNote<C>) -> R) -> R {
        f(&mut self.lock())
    }

    pub fn get_rule(&self, number: i64) -> NoteResult<&'static str> {
        crate::rules::get_rule(number)
    }

    pub fn write_name<'a>(&self, name: impl Into<Option<&'a str>>) -> NoteResult<()> {
        self.lock().write_name(name)
    }

    pub fn is_name_written<'a>(&self, name: impl Into<Option<&'a str>>) -> bool {
        self.lock().is_name_written(name)
    }

    pub fn write_death_cause<'a>(&self, cause: impl Into<Option<&'a str>>) -> NoteResult<bool> {
        self.lock().write_death_cause(cause)
    }

    pub fn write_details<'a>(&self, details: impl Into<Option<&'a str>>) -> NoteResult<bool> {
        self.lock().write_details(details)
    }

    pub fn get_death_cause(&self, name: &str) -> NoteResult<String> {
        self.lock().get_death_cause(name).map(str::to_string)
    }

    pub fn get_death_details(&self, name: &str) -> NoteResult<String> {
        self.lock().get_death_details(name).map(str::to_string)
    }

    pub fn current_name(&self) -> Option<String> {
        self.lock().current_name().map(str::to_string)
    }

    pub fn snapshots(&self) -> Vec<EntrySnapshot> {
        self.lock().snapshots()
    }

    fn lock(&self) -> MutexGuard<'_, DeathNote<C>> {
        // A panic while holding the lock cannot leave an entry half-written.
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
