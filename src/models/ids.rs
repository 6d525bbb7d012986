//! Strongly-typed ID wrappers
//!
//! Ledger entries are addressed by position, but every transaction and
//! recurring template also carries a stable generated identifier so that
//! callers can recognise an entry after positions have shifted.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Macro to generate ID newtype wrappers
macro_rules! define_id {
    ($name:ident, $display_prefix:literal) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Create a new random ID
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}{}", $display_prefix, &self.0.simple().to_string()[..8])
            }
        }
    };
}

define_id!(TransactionId, "txn-");
define_id!(TemplateId, "rec-");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_unique() {
        assert_ne!(TransactionId::new(), TransactionId::new());
        assert_ne!(TemplateId::new(), TemplateId::new());
    }

    #[test]
    fn test_display_prefix() {
        let id = TransactionId::new();
        let shown = id.to_string();
        assert!(shown.starts_with("txn-"));
        assert_eq!(shown.len(), 12);
    }
}
