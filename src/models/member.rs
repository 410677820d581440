//! Household member model

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::MemberId;

/// A person whose movements and income are tracked
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    pub id: MemberId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl Member {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: MemberId::new(),
            name: name.into(),
            details: None,
        }
    }

    pub fn with_details(name: impl Into<String>, details: impl Into<String>) -> Self {
        let mut member = Self::new(name);
        let details = details.into();
        if !details.trim().is_empty() {
            member.details = Some(details);
        }
        member
    }

    /// The reserved member used for shared or unassigned movements
    pub fn everyone() -> Self {
        Self {
            id: MemberId::ALL,
            name: "Everyone".to_string(),
            details: Some("Shared household spending".to_string()),
        }
    }

    pub fn is_reserved(&self) -> bool {
        self.id.is_all()
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("Member name cannot be empty".into());
        }
        Ok(())
    }
}

impl fmt::Display for Member {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Which movements a report should include
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MemberFilter {
    /// Every movement regardless of member
    #[default]
    All,
    /// Only movements tagged with this member
    Member(MemberId),
}

impl MemberFilter {
    pub fn includes(&self, member_id: MemberId) -> bool {
        match self {
            Self::All => true,
            Self::Member(id) => *id == member_id,
        }
    }
}

impl From<MemberId> for MemberFilter {
    /// Selecting the reserved member means "everyone"
    fn from(id: MemberId) -> Self {
        if id.is_all() {
            Self::All
        } else {
            Self::Member(id)
        }
    }
}

impl From<Option<MemberId>> for MemberFilter {
    fn from(id: Option<MemberId>) -> Self {
        id.map(Self::from).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_everyone_is_reserved() {
        let everyone = Member::everyone();
        assert!(everyone.is_reserved());
        assert!(!Member::new("Ana").is_reserved());
    }

    #[test]
    fn test_with_details_skips_blank() {
        assert_eq!(Member::with_details("Ana", "  ").details, None);
        assert_eq!(
            Member::with_details("Ana", "mother").details.as_deref(),
            Some("mother")
        );
    }

    #[test]
    fn test_validation() {
        assert!(Member::new("").validate().is_err());
        assert!(Member::new("Bruno").validate().is_ok());
    }

    #[test]
    fn test_filter_from_reserved_id_is_all() {
        assert_eq!(MemberFilter::from(MemberId::ALL), MemberFilter::All);
        assert_eq!(MemberFilter::from(None), MemberFilter::All);

        let id = MemberId::new();
        assert_eq!(MemberFilter::from(id), MemberFilter::Member(id));
    }

    #[test]
    fn test_filter_includes() {
        let a = MemberId::new();
        let b = MemberId::new();
        assert!(MemberFilter::All.includes(a));
        assert!(MemberFilter::Member(a).includes(a));
        assert!(!MemberFilter::Member(a).includes(b));
        assert!(!MemberFilter::Member(a).includes(MemberId::ALL));
    }
}
