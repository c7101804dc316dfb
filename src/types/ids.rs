//! Newtype wrappers for domain identifiers.
//!
//! These keep pull request numbers, issue numbers and comment IDs from being
//! mixed up, even though GitHub numbers issues and pull requests from the same
//! sequence.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// A pull request number within a repository.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PrNumber(pub u64);

impl fmt::Display for PrNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// An issue number within a repository.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IssueNumber(pub u64);

impl fmt::Display for IssueNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A GitHub comment ID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CommentId(pub u64);

impl fmt::Display for CommentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Returned by [`Sha::parse`] for strings that are not 40 hex characters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid SHA {0:?}: expected 40 hex characters")]
pub struct InvalidSha(pub String);

/// A git commit SHA (40 hex characters).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Sha(String);

impl Sha {
    /// Parses a full-length hex SHA, normalising it to lowercase.
    pub fn parse(s: impl AsRef<str>) -> Result<Self, InvalidSha> {
        let s = s.as_ref();
        if s.len() == 40 && s.chars().all(|c| c.is_ascii_hexdigit()) {
            Ok(Sha(s.to_ascii_lowercase()))
        } else {
            Err(InvalidSha(s.to_string()))
        }
    }

    /// Returns the SHA as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns a short (7-character) version of the SHA for display.
    pub fn short(&self) -> &str {
        self.0.get(..7).unwrap_or(&self.0)
    }
}

impl fmt::Display for Sha {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A repository identifier (owner/repo format).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RepoId {
    pub owner: String,
    pub repo: String,
}

impl RepoId {
    pub fn new(owner: impl Into<String>, repo: impl Into<String>) -> Self {
        RepoId {
            owner: owner.into(),
            repo: repo.into(),
        }
    }
}

impl fmt::Display for RepoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.repo)
    }
}

/// A GitHub webhook delivery ID, used only to correlate log lines.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DeliveryId(pub String);

impl DeliveryId {
    pub fn new(s: impl Into<String>) -> Self {
        DeliveryId(s.into())
    }
}

impl fmt::Display for DeliveryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod sha {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn parse_accepts_hex(s in "[0-9a-fA-F]{40}") {
                let sha = Sha::parse(&s).unwrap();
                prop_assert_eq!(sha.as_str(), s.to_ascii_lowercase());
            }

            #[test]
            fn parse_rejects_wrong_length(s in "[0-9a-f]{0,39}") {
                prop_assert!(Sha::parse(&s).is_err());
            }

            #[test]
            fn short_is_prefix(s in "[0-9a-f]{40}") {
                let sha = Sha::parse(&s).unwrap();
                prop_assert_eq!(sha.short(), &s[..7]);
            }

            #[test]
            fn serializes_as_plain_string(sha in crate::test_utils::arb_sha()) {
                let json = serde_json::to_value(&sha).unwrap();
                prop_assert_eq!(json, serde_json::Value::String(sha.as_str().to_string()));
            }
        }

        #[test]
        fn parse_rejects_non_hex() {
            assert!(Sha::parse("g".repeat(40)).is_err());
        }
    }

    #[test]
    fn numbers_display_with_hash() {
        assert_eq!(PrNumber(42).to_string(), "#42");
        assert_eq!(IssueNumber(7).to_string(), "#7");
    }

    #[test]
    fn repo_id_display() {
        assert_eq!(RepoId::new("octocat", "hello").to_string(), "octocat/hello");
    }
}
