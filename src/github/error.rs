//! GitHub API error types.
//!
//! issuebot never retries a failed call, but operators still need to tell a
//! flaky network or an exhausted rate limit apart from a bad token or a
//! missing repository. Errors are therefore tagged with a [`GitHubErrorKind`]
//! that is carried into the logs.

use std::fmt;
use thiserror::Error;

/// The kind of GitHub API error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GitHubErrorKind {
    /// Likely to succeed if the webhook is redelivered.
    ///
    /// HTTP 5xx, HTTP 429, HTTP 403 with a rate limit message, network errors.
    Transient,

    /// Needs an operator: bad credentials, missing permissions, unknown
    /// repository, or a response we could not understand.
    Permanent,
}

impl GitHubErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            GitHubErrorKind::Transient => "transient",
            GitHubErrorKind::Permanent => "permanent",
        }
    }
}

impl fmt::Display for GitHubErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A categorised GitHub API error.
#[derive(Debug, Error)]
pub struct GitHubApiError {
    pub kind: GitHubErrorKind,

    /// The HTTP status code, if available.
    pub status_code: Option<u16>,

    /// A human-readable description of the error.
    pub message: String,

    /// The underlying octocrab error, if available.
    #[source]
    pub source: Option<octocrab::Error>,
}

impl fmt::Display for GitHubApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.status_code {
            Some(code) => write!(
                f,
                "GitHub API error (HTTP {}, {}): {}",
                code, self.kind, self.message
            ),
            None => write!(f, "GitHub API error ({}): {}", self.kind, self.message),
        }
    }
}

impl GitHubApiError {
    /// Creates a permanent error without an octocrab source.
    pub fn permanent_without_source(message: impl Into<String>) -> Self {
        Self {
            kind: GitHubErrorKind::Permanent,
            status_code: None,
            message: message.into(),
            source: None,
        }
    }

    /// Categorizes an octocrab error.
    pub fn from_octocrab(err: octocrab::Error) -> Self {
        let message = err.to_string();
        let status_code = extract_status_code(&message);
        let kind = categorize(status_code, &message);

        Self {
            kind,
            status_code,
            message,
            source: Some(err),
        }
    }
}

fn categorize(status_code: Option<u16>, message: &str) -> GitHubErrorKind {
    match status_code {
        Some(429) => GitHubErrorKind::Transient,
        Some(403) if is_rate_limit_error(message) => GitHubErrorKind::Transient,
        Some(code) if (500..600).contains(&code) => GitHubErrorKind::Transient,
        Some(_) => GitHubErrorKind::Permanent,
        None if is_rate_limit_error(message) || is_network_error(message) => {
            GitHubErrorKind::Transient
        }
        None => GitHubErrorKind::Permanent,
    }
}

/// Extracts an HTTP status code from an octocrab error message.
///
/// octocrab does not expose the status uniformly across its error variants,
/// so this looks for `status: NNN` first and then for the reason phrases of
/// well-known codes. Bare digits are ignored since routes and SHAs carry them.
/// Returning `None` only makes categorisation more conservative.
fn extract_status_code(message: &str) -> Option<u16> {
    if let Some(idx) = message.find("status: ") {
        let digits: String = message[idx + 8..]
            .chars()
            .take_while(|c| c.is_ascii_digit())
            .collect();
        if let Ok(code) = digits.parse() {
            return Some(code);
        }
    }

    let lower = message.to_lowercase();
    const KNOWN: &[(u16, &str)] = &[
        (404, "not found"),
        (401, "bad credentials"),
        (403, "forbidden"),
        (422, "unprocessable"),
        (429, "too many requests"),
        (500, "internal server error"),
        (502, "bad gateway"),
        (503, "service unavailable"),
    ];
    KNOWN
        .iter()
        .find(|(_, phrase)| lower.contains(phrase))
        .map(|(code, _)| *code)
}

/// Checks if an error message indicates a rate limit.
fn is_rate_limit_error(message: &str) -> bool {
    let lower = message.to_lowercase();
    lower.contains("rate limit") || lower.contains("abuse detection")
}

/// Checks if an error message indicates a network-level error.
fn is_network_error(message: &str) -> bool {
    let lower = message.to_lowercase();
    ["timeout", "timed out", "connection", "network", "dns"]
        .iter()
        .any(|needle| lower.contains(needle))
}
