//! Recipient chip list: ordered, deduplicated, capped at the server's limit.

use crate::email::MAX_RECIPIENTS;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddOutcome {
    Added,
    Duplicate,
    Blank,
    Full,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecipientList {
    chips: Vec<String>,
}

impl RecipientList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.chips
    }

    pub fn len(&self) -> usize {
        self.chips.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chips.is_empty()
    }

    pub fn add(&mut self, address: &str) -> AddOutcome {
        let address = address.trim();
        if address.is_empty() {
            return AddOutcome::Blank;
        }
        if self.chips.iter().any(|a| a == address) {
            return AddOutcome::Duplicate;
        }
        if self.chips.len() >= MAX_RECIPIENTS {
            return AddOutcome::Full;
        }
        self.chips.push(address.to_string());
        AddOutcome::Added
    }

    /// Commits typed input the way Enter or a comma does: every
    /// comma-separated piece becomes a chip.
    pub fn add_from_input(&mut self, input: &str) -> Vec<(String, AddOutcome)> {
        input
            .split(',')
            .map(str::trim)
            .filter(|piece| !piece.is_empty())
            .map(|piece| (piece.to_string(), self.add(piece)))
            .collect()
    }

    /// Removes exactly `address`; returns whether it was present.
    pub fn remove(&mut self, address: &str) -> bool {
        let before = self.chips.len();
        self.chips.retain(|a| a != address);
        self.chips.len() != before
    }

    pub fn clear(&mut self) {
        self.chips.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_yields_one_chip() {
        let mut list = RecipientList::new();
        assert_eq!(list.add("ana@example.com"), AddOutcome::Added);
        assert_eq!(list.add("ana@example.com"), AddOutcome::Duplicate);
        assert_eq!(list.add(" ana@example.com "), AddOutcome::Duplicate);
        assert_eq!(list.as_slice(), ["ana@example.com"]);
    }

    #[test]
    fn test_remove_exactly_one() {
        let mut list = RecipientList::new();
        for a in ["a@example.com", "b@example.com", "c@example.com"] {
            list.add(a);
        }
        assert!(list.remove("b@example.com"));
        assert_eq!(list.as_slice(), ["a@example.com", "c@example.com"]);
        assert!(!list.remove("b@example.com"));
        assert_eq!(list.len(), 2);
    }

    #[test]
    fn test_comma_input_commits_each_piece() {
        let mut list = RecipientList::new();
        let outcomes = list.add_from_input("a@example.com, b@example.com,,a@example.com");
        assert_eq!(
            outcomes,
            vec![
                ("a@example.com".to_string(), AddOutcome::Added),
                ("b@example.com".to_string(), AddOutcome::Added),
                ("a@example.com".to_string(), AddOutcome::Duplicate),
            ]
        );
        assert_eq!(list.len(), 2);
    }

    #[test]
    fn test_cap() {
        let mut list = RecipientList::new();
        for i in 0..MAX_RECIPIENTS {
            assert_eq!(list.add(&format!("p{i}@example.com")), AddOutcome::Added);
        }
        assert_eq!(list.add("late@example.com"), AddOutcome::Full);
        assert_eq!(list.len(), MAX_RECIPIENTS);
    }

    #[test]
    fn test_blank_ignored() {
        let mut list = RecipientList::new();
        assert_eq!(list.add("   "), AddOutcome::Blank);
        assert!(list.is_empty());
    }
}
