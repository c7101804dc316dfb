//! Pull request and commit records consumed by the disposition engine.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::{PrNumber, RepoId, Sha};

/// Identifies the pull request under evaluation.
///
/// Built once from the triggering webhook and never modified.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PullRequestRef {
    /// The repository the pull request belongs to.
    pub repo: RepoId,
    /// The pull request number.
    pub number: PrNumber,
    /// Login of the pull request author.
    pub author: String,
    /// Head commit of the pull request when the event was sent.
    pub head_sha: Sha,
}

impl PullRequestRef {
    /// Returns the debounce key for this pull request.
    pub fn key(&self) -> PrKey {
        PrKey {
            repo: self.repo.clone(),
            number: self.number,
        }
    }
}

/// `owner/repo#number`, the identity used by the debounce cache.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PrKey {
    pub repo: RepoId,
    pub number: PrNumber,
}

impl fmt::Display for PrKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.repo, self.number)
    }
}

/// Author identity recorded in a commit.
///
/// GitHub may omit either field, so both are optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitAuthor {
    pub name: Option<String>,
    pub email: Option<String>,
}

impl CommitAuthor {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        CommitAuthor {
            name: Some(name.into()),
            email: Some(email.into()),
        }
    }
}

/// One fully fetched commit of a pull request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitRecord {
    pub sha: Sha,
    /// Full commit message, including the body.
    pub message: String,
    pub author: CommitAuthor,
    /// Lines added plus lines deleted.
    pub total_changes: u64,
}
