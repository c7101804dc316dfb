//! GitHub API effect types.
//!
//! These describe the GitHub operations the disposition engine needs, as data.
//! An interpreter scoped to one repository executes them; the engine never
//! touches an HTTP client directly.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::types::{CommentId, CommitRecord, IssueNumber, PrNumber, Sha};

/// State of a commit status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusState {
    Success,
    Failure,
}

impl StatusState {
    /// Returns the string GitHub's status API expects.
    pub fn as_api_str(&self) -> &'static str {
        match self {
            StatusState::Success => "success",
            StatusState::Failure => "failure",
        }
    }
}

/// Issue state filter for issue listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueState {
    Open,
}

impl IssueState {
    pub fn as_api_str(&self) -> &'static str {
        match self {
            IssueState::Open => "open",
        }
    }
}

/// A GitHub API effect.
///
/// Effects are repo-scoped: the interpreter is constructed with a `RepoId`, so
/// effects don't include it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GitHubEffect {
    // ─── Commits ──────────────────────────────────────────────────────────────
    /// List one page of a pull request's commits (1-based page number).
    ///
    /// Listing entries are abbreviated; only their SHAs are used.
    ListPrCommits {
        pr: PrNumber,
        page: u32,
        per_page: u8,
    },

    /// Fetch a single commit with its message, author and diff stats.
    GetCommit { sha: Sha },

    // ─── Issues ───────────────────────────────────────────────────────────────
    /// List every issue matching the filters (all pages).
    ListIssues {
        assignee: String,
        label: String,
        state: IssueState,
    },

    /// Create an issue.
    CreateIssue {
        title: String,
        body: String,
        assignee: String,
        labels: Vec<String>,
    },

    // ─── Comments ─────────────────────────────────────────────────────────────
    /// List every comment on a pull request's conversation (all pages).
    ListComments { pr: PrNumber },

    /// Post a new comment on a pull request.
    PostComment { pr: PrNumber, body: String },

    // ─── Statuses ─────────────────────────────────────────────────────────────
    /// Set a commit status on a SHA.
    CreateStatus {
        sha: Sha,
        context: String,
        state: StatusState,
        description: Option<String>,
    },
}

impl GitHubEffect {
    /// Short operation name for logs and errors.
    pub fn name(&self) -> &'static str {
        match self {
            GitHubEffect::ListPrCommits { .. } => "list_pr_commits",
            GitHubEffect::GetCommit { .. } => "get_commit",
            GitHubEffect::ListIssues { .. } => "list_issues",
            GitHubEffect::CreateIssue { .. } => "create_issue",
            GitHubEffect::ListComments { .. } => "list_comments",
            GitHubEffect::PostComment { .. } => "post_comment",
            GitHubEffect::CreateStatus { .. } => "create_status",
        }
    }
}

impl fmt::Display for GitHubEffect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ─── Response Types ───────────────────────────────────────────────────────────

/// Issue data returned from the GitHub API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueData {
    pub number: IssueNumber,
    pub title: String,
}

/// Comment data returned from the GitHub API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentData {
    pub id: CommentId,
    pub body: String,
}

/// Response from a GitHub effect.
///
/// Each variant corresponds to the response from a particular effect type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum GitHubResponse {
    /// Response to `ListPrCommits`.
    CommitPage {
        shas: Vec<Sha>,
        /// False when this page was the last one.
        has_more: bool,
    },

    /// Response to `GetCommit`.
    Commit(CommitRecord),

    /// Response to `ListIssues`.
    Issues(Vec<IssueData>),

    /// Response to `CreateIssue`.
    IssueCreated { number: IssueNumber },

    /// Response to `ListComments`.
    Comments(Vec<CommentData>),

    /// Response to `PostComment`.
    CommentPosted { id: CommentId },

    /// Response to `CreateStatus`.
    StatusCreated,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_state_api_strings() {
        assert_eq!(StatusState::Success.as_api_str(), "success");
        assert_eq!(StatusState::Failure.as_api_str(), "failure");
    }

    #[test]
    fn effect_serializes_with_type_tag() {
        let effect = GitHubEffect::PostComment {
            pr: PrNumber(3),
            body: "hi".to_string(),
        };
        let json = serde_json::to_value(&effect).unwrap();
        assert_eq!(json["type"], "post_comment");
        assert_eq!(json["pr"], 3);
    }
}
