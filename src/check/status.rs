//! The commit status written for a verdict.

use crate::effects::{GitHubEffect, StatusState};
use crate::types::Sha;

/// Status context shown on the pull request.
pub const STATUS_CONTEXT: &str = "issuebot";

/// Description attached to a failing status. GitHub caps descriptions at 140
/// characters.
pub const FAILURE_DESCRIPTION: &str = "Any non-trivial git commit must link to a GitHub issue tracking the work. Edit each commit with a tag like \"Updates #nn\", and update the PR.";

/// The failing status for `sha`.
pub fn failure_status(sha: Sha) -> GitHubEffect {
    GitHubEffect::CreateStatus {
        sha,
        context: STATUS_CONTEXT.to_string(),
        state: StatusState::Failure,
        description: Some(FAILURE_DESCRIPTION.to_string()),
    }
}

/// The passing status for `sha`, written only when success reporting is on.
pub fn success_status(sha: Sha) -> GitHubEffect {
    GitHubEffect::CreateStatus {
        sha,
        context: STATUS_CONTEXT.to_string(),
        state: StatusState::Success,
        description: None,
    }
}
