//! Strongly-typed ID wrappers for all entity types
//!
//! Using newtype wrappers prevents accidentally mixing up IDs from different
//! entity types at compile time.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Macro to generate ID newtype wrappers
macro_rules! define_id {
    ($name:ident, $display_prefix:literal) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Create a new random ID
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            /// Get the underlying UUID
            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }

            /// Parse an ID from a string
            pub fn parse(s: &str) -> Result<Self, uuid::Error> {
                s.parse()
            }

            /// Whether `identifier` names this ID, either as a full UUID or as a
            /// (possibly prefixed) leading fragment like the one `Display` prints
            pub fn matches(&self, identifier: &str) -> bool {
                let identifier = identifier.trim();
                let fragment = identifier.strip_prefix($display_prefix).unwrap_or(identifier);
                !fragment.is_empty() && self.0.to_string().starts_with(&fragment.to_lowercase())
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}{}", $display_prefix, &self.0.to_string()[..8])
            }
        }

        impl From<Uuid> for $name {
            fn from(uuid: Uuid) -> Self {
                Self(uuid)
            }
        }

        impl FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let s = s.trim();
                let s = s.strip_prefix($display_prefix).unwrap_or(s);
                Ok(Self(Uuid::parse_str(s)?))
            }
        }
    };
}

define_id!(MovementId, "mov-");
define_id!(MemberId, "mem-");
define_id!(FixedExpenseId, "fix-");
define_id!(ReminderId, "rem-");

impl MemberId {
    /// The reserved member standing for "everyone / unassigned"
    pub const ALL: MemberId = MemberId(Uuid::nil());

    /// Check if this is the reserved "everyone" member
    pub fn is_all(&self) -> bool {
        self.0.is_nil()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_display() {
        let id = MovementId::new();
        let display = format!("{}", id);
        assert!(display.starts_with("mov-"));
        assert_eq!(display.len(), 12); // "mov-" + 8 chars
    }

    #[test]
    fn test_id_parse_with_and_without_prefix() {
        let uuid_str = "550e8400-e29b-41d4-a716-446655440000";
        let plain = MemberId::parse(uuid_str).unwrap();
        let prefixed: MemberId = format!("mem-{}", uuid_str).parse().unwrap();
        assert_eq!(plain, prefixed);
        assert_eq!(plain.as_uuid().to_string(), uuid_str);
    }

    #[test]
    fn test_matches_short_display_form() {
        let id = MovementId::parse("550e8400-e29b-41d4-a716-446655440000").unwrap();
        assert!(id.matches("mov-550e8400"));
        assert!(id.matches("550e84"));
        assert!(id.matches("550e8400-e29b-41d4-a716-446655440000"));
        assert!(!id.matches("mov-"));
        assert!(!id.matches("deadbeef"));
    }

    #[test]
    fn test_reserved_member() {
        assert!(MemberId::ALL.is_all());
        assert!(!MemberId::new().is_all());
        assert_eq!(MemberId::ALL.to_string(), "mem-00000000");
    }

    #[test]
    fn test_id_serialization() {
        let id = ReminderId::new();
        let json = serde_json::to_string(&id).unwrap();
        let deserialized: ReminderId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, deserialized);
    }
}
