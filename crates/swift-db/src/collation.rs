use std::borrow::Cow;
use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

/// String comparison policy for equality, ordering and grouping.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Collation {
    /// Byte-wise comparison.
    #[default]
    Simple,
    /// Letters compare equal regardless of case; accents still differ.
    CaseInsensitive,
}

impl Collation {
    /// The form of `s` under which two strings are equal iff this collation
    /// considers them equal.
    pub fn key<'a>(&self, s: &'a str) -> Cow<'a, str> {
        match self {
            Collation::Simple => Cow::Borrowed(s),
            Collation::CaseInsensitive => Cow::Owned(s.to_lowercase()),
        }
    }

    pub fn compare(&self, a: &str, b: &str) -> Ordering {
        match self {
            Collation::Simple => a.cmp(b),
            Collation::CaseInsensitive => self.key(a).cmp(&self.key(b)),
        }
    }

    pub fn equals(&self, a: &str, b: &str) -> bool {
        self.compare(a, b) == Ordering::Equal
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn case_insensitive_ignores_case_only() {
        let c = Collation::CaseInsensitive;
        assert!(c.equals("Fearless", "fEARLESS"));
        assert!(!c.equals("resume", "résumé"));
        assert_eq!(c.compare("apple", "Banana"), Ordering::Less);
    }

    #[test]
    fn simple_is_bytewise() {
        let c = Collation::Simple;
        assert!(!c.equals("Red", "red"));
        assert_eq!(c.compare("Banana", "apple"), Ordering::Less);
    }
}
