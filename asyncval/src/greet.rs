//! Greeting logic behind the `greet` binary.

/// Name greeted when no names are given.
pub const DEFAULT_NAME: &str = "World";

/// Result of greeting a list of names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Greeting {
    /// One `Hello {name}!` line per name, in input order.
    pub lines: Vec<String>,

    /// Number of names greeted.
    pub count: usize,

    /// Sum of the names' lengths, in characters.
    pub total_chars: usize,
}

impl Greeting {
    /// The closing summary line.
    pub fn summary(&self) -> String {
        format!(
            "Total number of names: {} ({} characters)",
            self.count, self.total_chars
        )
    }
}

/// Greets every name, or [`DEFAULT_NAME`] if `names` is empty.
pub fn greet<S: AsRef<str>>(names: &[S]) -> Greeting {
    let names: Vec<&str> = if names.is_empty() {
        vec![DEFAULT_NAME]
    } else {
        names.iter().map(|name| name.as_ref()).collect()
    };

    Greeting {
        lines: names.iter().map(|name| format!("Hello {name}!")).collect(),
        count: names.len(),
        total_chars: names.iter().map(|name| name.chars().count()).sum(),
    }
}
