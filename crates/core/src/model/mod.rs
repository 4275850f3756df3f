//! Core data model: records, groups and the pairs drawn between them.

use std::fmt;

use serde::{Deserialize, Serialize};

/// One row of the input table.
///
/// `name` and `address` belong to the same person and always travel together.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Record {
    /// Group key (the `class` column).
    pub group: String,
    /// Display name.
    pub name: String,
    /// Contact address (the `email` column).
    pub address: String,
}

impl Record {
    pub fn new(
        group: impl Into<String>,
        name: impl Into<String>,
        address: impl Into<String>,
    ) -> Self {
        Self { group: group.into(), name: name.into(), address: address.into() }
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} <{}>", self.name, self.address)
    }
}

/// A giver and the receiver they were assigned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pair {
    pub giver: Record,
    pub receiver: Record,
}

impl Pair {
    /// `giver.name -> receiver.name`
    pub fn name_line(&self) -> String {
        format_pair_line(&self.giver.name, &self.receiver.name)
    }

    /// `giver.address -> receiver.address`
    pub fn address_line(&self) -> String {
        format_pair_line(&self.giver.address, &self.receiver.address)
    }
}

/// Separator between giver and receiver in rendered lines.
pub const PAIR_SEPARATOR: &str = " -> ";

/// Render one `"<giver> -> <receiver>"` line (without the trailing newline).
pub fn format_pair_line(giver: &str, receiver: &str) -> String {
    format!("{giver}{PAIR_SEPARATOR}{receiver}")
}

/// Split a rendered line back into `(giver, receiver)`.
///
/// Returns `None` when the separator is missing or repeated, or either side is
/// blank. Loaded names and addresses never contain the separator.
pub fn parse_pair_line(line: &str) -> Option<(&str, &str)> {
    let (giver, receiver) = line.split_once(PAIR_SEPARATOR)?;
    let giver = giver.trim();
    let receiver = receiver.trim();
    if giver.is_empty() || receiver.is_empty() || receiver.contains(PAIR_SEPARATOR) {
        return None;
    }
    Some((giver, receiver))
}

/// The full cycle drawn for one group, in walk order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignment {
    pub group: String,
    pub pairs: Vec<Pair>,
}

impl Assignment {
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Receiver assigned to the member at `giver`, if that member is in the group.
    pub fn target_of(&self, giver: &Record) -> Option<&Record> {
        self.pairs.iter().find(|p| &p.giver == giver).map(|p| &p.receiver)
    }

    pub fn name_lines(&self) -> Vec<String> {
        self.pairs.iter().map(Pair::name_line).collect()
    }

    pub fn address_lines(&self) -> Vec<String> {
        self.pairs.iter().map(Pair::address_line).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pair_lines_keep_name_and_address_aligned() {
        let pair = Pair {
            giver: Record::new("A", "Alice", "alice@example.com"),
            receiver: Record::new("A", "Bob", "bob@example.com"),
        };
        assert_eq!(pair.name_line(), "Alice -> Bob");
        assert_eq!(pair.address_line(), "alice@example.com -> bob@example.com");
    }

    #[test]
    fn parse_pair_line_rejects_malformed_input() {
        assert_eq!(parse_pair_line("Alice -> Bob"), Some(("Alice", "Bob")));
        assert_eq!(parse_pair_line("Alice Bob"), None);
        assert_eq!(parse_pair_line(" -> Bob"), None);
        assert_eq!(parse_pair_line("Alice -> Bob -> Carol"), None);
    }
}
