//! Host wire format
//!
//! Each option is exposed to the host as a `(key, value)` pair where the
//! value is a description string of the form:
//!
//! ```text
//! <display name>; <label0>|<label1>|...|<labelN>
//! ```
//!
//! A single space (not a pipe) precedes the first label. The published list
//! is terminated by a [`Variable::sentinel`] entry.

use serde::{Deserialize, Serialize};

/// Separator between the display name and the label list
const NAME_SEPARATOR: char = ';';

/// Prefix of the first label
const FIRST_LABEL_PREFIX: char = ' ';

/// Prefix of every label after the first
const LABEL_SEPARATOR: char = '|';

/// One entry of the list handed to the host
///
/// An entry with an empty key is the sentinel terminating the list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Variable {
    /// Option id (host-facing key)
    pub key: String,

    /// Wire description string
    pub value: String,
}

impl Variable {
    /// Create a new entry
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    /// The empty entry terminating a published list
    pub fn sentinel() -> Self {
        Self {
            key: String::new(),
            value: String::new(),
        }
    }

    /// Whether this entry is the list terminator
    pub fn is_sentinel(&self) -> bool {
        self.key.is_empty()
    }
}

/// Build the wire description string for an option
///
/// Labels are joined positionally: the first gets a leading space, every
/// later one a leading pipe, even when it repeats the first label.
pub fn format_wire_string<'a, I>(display_name: &str, labels: I) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    let mut wire = String::from(display_name);
    wire.push(NAME_SEPARATOR);

    for (position, label) in labels.into_iter().enumerate() {
        wire.push(if position == 0 {
            FIRST_LABEL_PREFIX
        } else {
            LABEL_SEPARATOR
        });
        wire.push_str(label);
    }

    wire
}

/// Split a wire description string back into display name and labels
///
/// Returns `None` when the string has no `;` separator. Used by hosts that
/// render the published schema.
pub fn parse_wire_string(wire: &str) -> Option<(&str, Vec<&str>)> {
    let (name, rest) = wire.split_once(NAME_SEPARATOR)?;
    let rest = rest.strip_prefix(FIRST_LABEL_PREFIX).unwrap_or(rest);

    if rest.is_empty() {
        return Some((name, Vec::new()));
    }

    Some((name, rest.split(LABEL_SEPARATOR).collect()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_string_format() {
        let wire = format_wire_string("Renderer", ["Hardware", "Software", "Null"]);
        assert_eq!(wire, "Renderer; Hardware|Software|Null");
    }

    #[test]
    fn test_wire_string_single_label() {
        assert_eq!(format_wire_string("Only", ["one"]), "Only; one");
    }

    #[test]
    fn test_wire_string_duplicate_first_label_uses_pipe() {
        let wire = format_wire_string("Dup", ["a", "b", "a"]);
        assert_eq!(wire, "Dup; a|b|a");
    }

    #[test]
    fn test_parse_wire_string() {
        let (name, labels) = parse_wire_string("Fast memory; enabled|disabled").unwrap();
        assert_eq!(name, "Fast memory");
        assert_eq!(labels, vec!["enabled", "disabled"]);

        assert!(parse_wire_string("no separator").is_none());
    }

    #[test]
    fn test_sentinel() {
        assert!(Variable::sentinel().is_sentinel());
        assert!(!Variable::new("id", "Name; a").is_sentinel());
    }
}
