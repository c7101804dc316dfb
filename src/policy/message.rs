//! Commit message classification.

use super::Disposition;

/// Line prefixes that introduce an issue reference, compared lowercase.
const LINKING_VERBS: &[&str] = &[
    "close", "closes", "closed", "fix", "fixes", "fixed", "resolve", "resolves", "resolved",
    "updates", "for",
];

/// Tag that opts a pull request out of the check and requests a stub issue.
pub const SKIP_TAG: &str = "skip-issuebot";

/// Tag that marks a commit as cleanup needing no issue.
pub const CLEANUP_TAG: &str = "#cleanup";

/// Classifies a single commit message.
///
/// A first line starting with `Revert` wins outright, so reverting a commit
/// that lacked a link never forces one to be added. Otherwise any line
/// starting with a linking verb and mentioning `#` or `github.com` counts as
/// an issue link. The check is a prefix heuristic and accepts things like
/// `Fixes #nothing`.
pub fn classify_message(message: &str) -> Disposition {
    for (idx, line) in message.split('\n').enumerate() {
        if idx == 0 && line.starts_with("Revert") {
            return Disposition::Revert;
        }
        if is_linking_line(line) {
            return Disposition::IssueLinked;
        }
    }

    if message.contains(SKIP_TAG) {
        Disposition::Skipped
    } else if message.contains(CLEANUP_TAG) {
        Disposition::Cleanup
    } else {
        Disposition::Failed
    }
}

fn is_linking_line(line: &str) -> bool {
    let lower = line.to_lowercase();
    LINKING_VERBS.iter().any(|verb| lower.starts_with(verb))
        && (lower.contains('#') || lower.contains("github.com"))
}
