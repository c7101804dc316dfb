//! Placeholder ("stub") issues for pull requests that opted out with
//! `skip-issuebot`.
//!
//! A stub is found again by its deterministic title among the author's open
//! labelled issues, or failing that by the comment issuebot leaves on the pull
//! request. Looking before creating keeps repeated evaluations from filing
//! duplicates.

use std::sync::LazyLock;

use regex::Regex;

use crate::effects::{GitHubEffect, GitHubInterpreter, GitHubResponse, IssueState};
use crate::types::{IssueNumber, PullRequestRef};

use super::error::CheckError;

/// Default label applied to stub issues.
pub const DEFAULT_STUB_LABEL: &str = "issuebot-stub";

static STUB_COMMENT_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)IssueBot here\..*I have filed issue #(\d+) for you").unwrap()
});

pub fn stub_title(pr: &PullRequestRef) -> String {
    format!("Placeholder issue for PR {}", pr.number)
}

pub fn stub_body(pr: &PullRequestRef) -> String {
    format!("TODO(@{}): Add details about PR {}", pr.author, pr.number)
}

pub fn stub_comment(issue: IssueNumber) -> String {
    format!(
        ":robot: IssueBot here. I noticed none of the commits on this PR has an issue attached. \
         I have filed issue {issue} for you. Please update it at your convenience."
    )
}

/// Extracts the issue number from a comment issuebot posted earlier.
pub fn parse_stub_comment(body: &str) -> Option<IssueNumber> {
    let captures = STUB_COMMENT_PATTERN.captures(body)?;
    captures.get(1)?.as_str().parse().ok().map(IssueNumber)
}

/// How [`find_or_create`] obtained the stub issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StubIssue {
    Existing(IssueNumber),
    Created(IssueNumber),
}

impl StubIssue {
    pub fn number(&self) -> IssueNumber {
        match self {
            StubIssue::Existing(n) | StubIssue::Created(n) => *n,
        }
    }
}

/// Looks for a stub issue already filed for `pr`.
pub async fn find_existing<G: GitHubInterpreter>(
    client: &G,
    pr: &PullRequestRef,
    label: &str,
) -> Result<Option<IssueNumber>, CheckError<G::Error>> {
    let effect = GitHubEffect::ListIssues {
        assignee: pr.author.clone(),
        label: label.to_string(),
        state: IssueState::Open,
    };
    let issues = match call(client, effect).await? {
        (_, GitHubResponse::Issues(issues)) => issues,
        (op, other) => return Err(CheckError::unexpected(op, &other)),
    };

    let title = stub_title(pr);
    if let Some(issue) = issues.iter().find(|issue| issue.title == title) {
        return Ok(Some(issue.number));
    }

    let comments = match call(client, GitHubEffect::ListComments { pr: pr.number }).await? {
        (_, GitHubResponse::Comments(comments)) => comments,
        (op, other) => return Err(CheckError::unexpected(op, &other)),
    };

    Ok(comments
        .iter()
        .find_map(|comment| parse_stub_comment(&comment.body)))
}

/// Files a stub issue for `pr` and points the pull request at it.
///
/// The issue is the durable result: if the comment cannot be posted the
/// failure is logged and the new issue number is still returned.
pub async fn create<G: GitHubInterpreter>(
    client: &G,
    pr: &PullRequestRef,
    label: &str,
) -> Result<IssueNumber, CheckError<G::Error>> {
    let effect = GitHubEffect::CreateIssue {
        title: stub_title(pr),
        body: stub_body(pr),
        assignee: pr.author.clone(),
        labels: vec![label.to_string()],
    };
    let number = match call(client, effect).await? {
        (_, GitHubResponse::IssueCreated { number }) => number,
        (op, other) => return Err(CheckError::unexpected(op, &other)),
    };

    let comment = GitHubEffect::PostComment {
        pr: pr.number,
        body: stub_comment(number),
    };
    match call(client, comment).await {
        Ok((_, GitHubResponse::CommentPosted { .. })) => {}
        Ok((op, other)) => {
            tracing::warn!(repo = %pr.repo, pr = %pr.number, issue = %number, operation = op, response = ?other, "unexpected response to stub comment");
        }
        Err(e) => {
            tracing::warn!(repo = %pr.repo, pr = %pr.number, issue = %number, error = %e, "failed to comment about stub issue");
        }
    }

    Ok(number)
}

/// Returns the existing stub issue for `pr`, creating one if none is found.
///
/// A failed lookup is logged and creation goes ahead.
pub async fn find_or_create<G: GitHubInterpreter>(
    client: &G,
    pr: &PullRequestRef,
    label: &str,
) -> Result<StubIssue, CheckError<G::Error>> {
    match find_existing(client, pr, label).await {
        Ok(Some(number)) => return Ok(StubIssue::Existing(number)),
        Ok(None) => {}
        Err(e) => {
            tracing::warn!(repo = %pr.repo, pr = %pr.number, error = %e, "stub issue lookup failed, creating anyway");
        }
    }

    create(client, pr, label).await.map(StubIssue::Created)
}

async fn call<G: GitHubInterpreter>(
    client: &G,
    effect: GitHubEffect,
) -> Result<(&'static str, GitHubResponse), CheckError<G::Error>> {
    let operation = effect.name();
    client
        .interpret(effect.clone())
        .await
        .map(|response| (operation, response))
        .map_err(|e| CheckError::api(&effect, e))
}
