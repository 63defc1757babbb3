//! Outbound commands

use std::fmt;

/// A single user edit bound for the server
///
/// Rendered on the wire as `"<id>: <value>"`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    pub id: String,
    pub value: String,
}

impl Command {
    pub fn new(id: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            value: value.into(),
        }
    }

    /// The text frame sent over the socket
    pub fn to_wire(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.id, self.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_format() {
        let cmd = Command::new("funcFreq", "1.500");
        assert_eq!(cmd.to_wire(), "funcFreq: 1.500");
    }

    #[test]
    fn test_value_kept_verbatim() {
        // No trimming or un-scaling on the way out
        let cmd = Command::new("ch1Offs", " -0.40 ");
        assert_eq!(cmd.to_wire(), "ch1Offs:  -0.40 ");
    }
}
