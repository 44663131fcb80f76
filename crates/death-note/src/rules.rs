//! The fixed catalog of rules printed inside the note.

use crate::types::{NoteError, NoteResult};

/// Rules of the note, in order. Rule `n` lives at index `n - 1`.
pub const RULES: &[&str] = &[
    "The human whose name is written in this note shall die.",
    "This note will not take effect unless the writer has the person's face in their mind when writing his or her name. Therefore, people sharing the same name will not be affected.",
    "If the cause of death is written within the next 40 milliseconds of writing the person's name, it will happen.",
    "If the cause of death is not specified, the person will simply die of a heart attack.",
    "After writing the cause of death, details of the death should be written in the next 6 seconds and 40 milliseconds.",
    "This note shall become the property of the human world, once it touches the ground of the human world.",
    "The owner of the note can recognize the image and voice of its original owner, a god of death.",
    "The human who uses this note can neither go to Heaven nor Hell.",
    "If the note is used against a person who is already dead, it has no effect.",
    "The cause of death and its details cannot be changed once the time allowed to write them has passed.",
    "A name written in the note cannot be erased.",
    "The note becomes useless if the name is misspelled four times.",
    "Whoever touches the note can see and hear the god of death who owns it.",
];

/// Number of rules in the catalog.
pub fn rule_count() -> usize {
    RULES.len()
}

/// Look up a rule by its 1-based number.
pub fn get_rule(number: i64) -> NoteResult<&'static str> {
    if number < 1 || number > RULES.len() as i64 {
        return Err(NoteError::OutOfRange(number));
    }
    Ok(RULES[(number - 1) as usize])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rules_are_not_blank() {
        for rule in RULES {
            assert!(!rule.is_empty());
            assert!(!rule.trim().is_empty());
        }
    }

    #[test]
    fn test_first_and_last_rule() {
        assert_eq!(get_rule(1).unwrap(), RULES[0]);
        assert_eq!(get_rule(rule_count() as i64).unwrap(), RULES[RULES.len() - 1]);
    }

    #[test]
    fn test_out_of_range_numbers() {
        for n in [0, -5, 14, i64::MIN, i64::MAX] {
            let err = get_rule(n).unwrap_err();
            assert_eq!(err, NoteError::OutOfRange(n));
            let message = err.to_string();
            assert!(!message.trim().is_empty());
            assert!(message.contains(&n.to_string()));
        }
    }
}
