//! Death Note CLI — an interactive front end over the note's operations.

pub mod command;
pub mod config;
pub mod repl;

pub use command::{Command, CommandError};
pub use config::resolve_note_config;
