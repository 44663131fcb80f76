//! Parsing and execution of interactive commands against a note.

use death_note::{Clock, DeathNote, FieldState, NoteError, RULES};

/// Available REPL commands.
pub const COMMANDS: &[(&str, &str)] = &[
    ("/name", "Write a name; it becomes the current entry"),
    ("/cause", "Write the cause of death for the current entry"),
    ("/details", "Write the details of death for the current entry"),
    ("/show", "Show the entry written under a name"),
    ("/list", "List every written name"),
    ("/rule", "Print rule number N"),
    ("/rules", "Print every rule"),
    ("/clear", "Clear the screen"),
    ("/help", "Show available commands"),
    ("/exit", "Quit the REPL"),
];

/// A parsed REPL command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Name(String),
    Cause(String),
    Details(String),
    Show(String),
    List,
    Rule(i64),
    Rules,
    Clear,
    Help,
    Exit,
}

/// Errors produced while parsing or running a command.
#[derive(thiserror::Error, Debug)]
pub enum CommandError {
    #[error("Unknown command '/{0}'. Type /help for commands.")]
    Unknown(String),

    #[error("Usage: {0}")]
    Usage(&'static str),

    #[error(transparent)]
    Note(#[from] NoteError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Command {
    /// Parse one input line. The leading `/` is optional.
    pub fn parse(line: &str) -> Result<Self, CommandError> {
        let line = line.trim();
        let input = line.strip_prefix('/').unwrap_or(line);
        if input.is_empty() {
            return Ok(Command::Help);
        }

        let mut parts = input.splitn(2, ' ');
        let cmd = parts.next().unwrap_or("");
        // Names keep inner spacing; only the separator after the command is dropped.
        let args = parts.next().unwrap_or("");

        match cmd {
            "name" | "n" => Ok(Command::Name(args.to_string())),
            "cause" | "c" => Ok(Command::Cause(args.to_string())),
            "details" | "d" => Ok(Command::Details(args.to_string())),
            "show" | "s" => {
                if args.trim().is_empty() {
                    return Err(CommandError::Usage("/show <NAME>"));
                }
                Ok(Command::Show(args.to_string()))
            }
            "list" | "ls" => Ok(Command::List),
            "rule" => args
                .trim()
                .parse()
                .map(Command::Rule)
                .map_err(|_| CommandError::Usage("/rule <N>")),
            "rules" => Ok(Command::Rules),
            "clear" | "cls" => Ok(Command::Clear),
            "help" | "h" | "?" => Ok(Command::Help),
            "exit" | "quit" => Ok(Command::Exit),
            other => Err(CommandError::Unknown(other.to_string())),
        }
    }

    /// Run the command against `note` and return the text to print.
    ///
    /// `Clear`, `Help` and `Exit` only affect the terminal and produce no text.
    pub fn execute<C: Clock>(&self, note: &mut DeathNote<C>) -> Result<String, CommandError> {
        match self {
            Command::Name(name) => {
                note.write_name(name.as_str())?;
                if note.is_name_written(name.as_str()) {
                    Ok(format!("Wrote '{name}'."))
                } else {
                    Ok("Blank names are not written.".to_string())
                }
            }
            Command::Cause(cause) => {
                let written = note.write_death_cause(cause.as_str())?;
                Ok(write_outcome("cause", written, note.current_name()))
            }
            Command::Details(details) => {
                let written = note.write_details(details.as_str())?;
                Ok(write_outcome("details", written, note.current_name()))
            }
            Command::Show(name) => {
                let snapshot = note.snapshot(name)?;
                Ok(serde_json::to_string_pretty(&snapshot)?)
            }
            Command::List => {
                if note.is_empty() {
                    return Ok("The note is empty.".to_string());
                }
                let current = note.current_name().map(str::to_string);
                let lines: Vec<String> = note
                    .snapshots()
                    .iter()
                    .map(|s| {
                        let marker = if current.as_deref() == Some(s.name.as_str()) {
                            "*"
                        } else {
                            " "
                        };
                        format!(
                            "{marker} {:<20} {:<24} [cause {}, details {}]",
                            s.name,
                            s.cause,
                            state_label(s.cause_state),
                            state_label(s.details_state)
                        )
                    })
                    .collect();
                Ok(lines.join("\n"))
            }
            Command::Rule(n) => Ok(note.get_rule(*n)?.to_string()),
            Command::Rules => Ok(render_rules()),
            Command::Clear | Command::Help | Command::Exit => Ok(String::new()),
        }
    }
}

/// Every rule, numbered from 1.
pub fn render_rules() -> String {
    RULES
        .iter()
        .enumerate()
        .map(|(i, rule)| format!("{:>2}. {rule}", i + 1))
        .collect::<Vec<_>>()
        .join("\n")
}

fn write_outcome(field: &str, written: bool, current: Option<&str>) -> String {
    let name = current.unwrap_or_default();
    if written {
        format!("Wrote {field} for '{name}'.")
    } else {
        format!("Too late: the {field} of '{name}' is frozen.")
    }
}

fn state_label(state: FieldState) -> &'static str {
    match state {
        FieldState::Writable => "writable",
        FieldState::Frozen => "frozen",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_commands() {
        assert_eq!(
            Command::parse("/name Mario").unwrap(),
            Command::Name("Mario".into())
        );
        assert_eq!(
            Command::parse("cause karting accident").unwrap(),
            Command::Cause("karting accident".into())
        );
        assert_eq!(Command::parse("/rule 3").unwrap(), Command::Rule(3));
        assert_eq!(Command::parse("/rule -5").unwrap(), Command::Rule(-5));
        assert_eq!(Command::parse("/").unwrap(), Command::Help);
        assert_eq!(Command::parse("/quit").unwrap(), Command::Exit);
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(
            Command::parse("/kill Light"),
            Err(CommandError::Unknown(c)) if c == "kill"
        ));
        assert!(matches!(
            Command::parse("/rule three"),
            Err(CommandError::Usage(_))
        ));
        assert!(matches!(Command::parse("/show"), Err(CommandError::Usage(_))));
    }

    #[test]
    fn test_render_rules_numbers_every_rule() {
        let rendered = render_rules();
        assert_eq!(rendered.lines().count(), RULES.len());
        assert!(rendered.starts_with(" 1. "));
    }
}
