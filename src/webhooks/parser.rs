//! GitHub webhook payload parser.
//!
//! Only `pull_request` deliveries matter to issuebot. Other event types, and
//! pull request actions that cannot change the commit list, parse to
//! `Ok(None)` and are ignored. Malformed payloads are errors.

use serde::Deserialize;
use thiserror::Error;

use crate::types::{PrNumber, PullRequestRef, RepoId, Sha};

/// Pull request actions that trigger an evaluation.
pub const HANDLED_ACTIONS: &[&str] = &["opened", "reopened", "synchronize", "edited"];

/// Error type for webhook parsing failures.
#[derive(Debug, Error)]
pub enum ParseError {
    /// JSON deserialization failed (includes missing required fields).
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// Field has an invalid value, such as a malformed SHA.
    #[error("invalid field value for {field}: {value}")]
    InvalidField { field: &'static str, value: String },
}

/// Parses a webhook delivery into the pull request it asks us to evaluate.
///
/// `event_type` is the value of the `X-GitHub-Event` header.
///
/// # Examples
///
/// ```
/// use issuebot::webhooks::parse_webhook;
///
/// let payload = br#"{
///     "action": "synchronize",
///     "pull_request": {
///         "number": 42,
///         "user": { "login": "octocat" },
///         "head": { "sha": "0123456789abcdef0123456789abcdef01234567" }
///     },
///     "repository": { "owner": { "login": "acme" }, "name": "widgets" }
/// }"#;
///
/// let pr = parse_webhook("pull_request", payload).unwrap().unwrap();
/// assert_eq!(pr.number.0, 42);
/// assert_eq!(pr.author, "octocat");
///
/// assert!(parse_webhook("push", b"{}").unwrap().is_none());
/// ```
pub fn parse_webhook(event_type: &str, payload: &[u8]) -> Result<Option<PullRequestRef>, ParseError> {
    match event_type {
        "pull_request" => parse_pull_request(payload),
        _ => Ok(None),
    }
}

#[derive(Debug, Deserialize)]
struct RawPullRequestPayload {
    action: String,
    pull_request: RawPullRequest,
    repository: RawRepository,
}

#[derive(Debug, Deserialize)]
struct RawPullRequest {
    number: u64,
    user: RawUser,
    head: RawHead,
}

#[derive(Debug, Deserialize)]
struct RawHead {
    sha: String,
}

#[derive(Debug, Deserialize)]
struct RawUser {
    login: String,
}

#[derive(Debug, Deserialize)]
struct RawRepository {
    owner: RawUser,
    name: String,
}

fn parse_pull_request(payload: &[u8]) -> Result<Option<PullRequestRef>, ParseError> {
    let raw: RawPullRequestPayload = serde_json::from_slice(payload)?;

    if !HANDLED_ACTIONS.contains(&raw.action.as_str()) {
        tracing::debug!(action = %raw.action, "ignoring pull_request action");
        return Ok(None);
    }

    let head_sha =
        Sha::parse(&raw.pull_request.head.sha).map_err(|_| ParseError::InvalidField {
            field: "pull_request.head.sha",
            value: raw.pull_request.head.sha.clone(),
        })?;

    Ok(Some(PullRequestRef {
        repo: RepoId::new(raw.repository.owner.login, raw.repository.name),
        number: PrNumber(raw.pull_request.number),
        author: raw.pull_request.user.login,
        head_sha,
    }))
}
