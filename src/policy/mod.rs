//! The issue-link policy: dispositions and the two per-commit classifiers.
//!
//! Everything here is pure. The classifiers are total functions, so a commit
//! always yields a disposition and never an error.

pub mod bot;
pub mod disposition;
pub mod message;

pub use bot::{BotAuthorPattern, InvalidBotPattern, is_bot_author};
pub use disposition::Disposition;
pub use message::{CLEANUP_TAG, SKIP_TAG, classify_message};

use crate::types::CommitRecord;

/// Classifies one commit by both its message and its author.
pub fn classify_commit(commit: &CommitRecord, bot_pattern: Option<&BotAuthorPattern>) -> Disposition {
    let by_message = classify_message(&commit.message);
    if is_bot_author(&commit.author, bot_pattern) {
        by_message.max(Disposition::BotAuthored)
    } else {
        by_message
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{CommitAuthor, Sha};

    fn commit(message: &str, name: &str) -> CommitRecord {
        CommitRecord {
            sha: Sha::parse("c".repeat(40)).unwrap(),
            message: message.to_string(),
            author: CommitAuthor::new(name, "someone@example.com"),
            total_changes: 10,
        }
    }

    #[test]
    fn bot_author_outranks_revert() {
        let c = commit("Revert \"bump\"", "renovate[bot]");
        assert_eq!(classify_commit(&c, None), Disposition::BotAuthored);
    }

    #[test]
    fn link_outranks_bot_author() {
        let c = commit("Fixes #9", "renovate[bot]");
        assert_eq!(classify_commit(&c, None), Disposition::IssueLinked);
    }

    #[test]
    fn human_author_uses_message_only() {
        let c = commit("#cleanup", "Jane Doe");
        assert_eq!(classify_commit(&c, None), Disposition::Cleanup);
    }
}
