//! Death Note — a registry of names whose cause and details of death may only be
//! written within short windows after the name itself.

pub mod clock;
pub mod config;
pub mod note;
pub mod rules;
pub mod shared;
pub mod types;

pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{NoteConfig, DEFAULT_CAUSE_WINDOW_MS, DEFAULT_DETAILS_WINDOW_MS};
pub use note::DeathNote;
pub use rules::{get_rule, rule_count, RULES};
pub use shared::SharedDeathNote;
pub use types::*;
