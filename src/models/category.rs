//! Transaction categories
//!
//! Categories form a fixed, closed set. Anything outside the set is not a
//! category; the schema normalizer degrades such values to missing.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A spending/income category
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Category {
    Food,
    Transport,
    Bills,
    Entertainment,
    Other,
}

impl Category {
    /// All categories in display order
    pub const ALL: [Category; 5] = [
        Self::Food,
        Self::Transport,
        Self::Bills,
        Self::Entertainment,
        Self::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Food => "Food",
            Self::Transport => "Transport",
            Self::Bills => "Bills",
            Self::Entertainment => "Entertainment",
            Self::Other => "Other",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = String;

    /// Case-insensitive match against the category names
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| {
                format!(
                    "Unknown category '{}'. Use one of: Food, Transport, Bills, Entertainment, Other",
                    s
                )
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse() {
        assert_eq!("Food".parse::<Category>().unwrap(), Category::Food);
        assert_eq!(" bills ".parse::<Category>().unwrap(), Category::Bills);
        assert!("Groceries".parse::<Category>().is_err());
    }

    #[test]
    fn test_display_round_trip() {
        for category in Category::ALL {
            assert_eq!(category.to_string().parse::<Category>().unwrap(), category);
        }
    }
}
