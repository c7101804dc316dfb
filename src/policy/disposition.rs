//! The ranked reasons a pull request passes or fails the issue-link check.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Why a pull request is, or is not, acceptable.
///
/// Variants are declared weakest first, so the derived `Ord` is the
/// precedence order: when several commits disagree, the greatest wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Disposition {
    /// No acceptable reason found.
    Failed,
    /// A commit asked to skip the check (`skip-issuebot`).
    Skipped,
    /// A commit declared itself cleanup (`#cleanup`).
    Cleanup,
    /// The whole pull request changes fewer lines than the threshold.
    SmallDiff,
    /// A commit reverts an earlier commit.
    Revert,
    /// A commit was written by an automation bot.
    BotAuthored,
    /// A commit links to an issue.
    IssueLinked,
}

impl Disposition {
    /// Returns true for every disposition except [`Disposition::Failed`].
    pub fn passes(self) -> bool {
        self != Disposition::Failed
    }

    /// Returns true once no later commit could change the outcome enough to
    /// be worth fetching.
    ///
    /// `Skipped` is not final: a later commit may still carry a
    /// real issue link, which is preferred over filing a stub.
    pub fn is_conclusive(self) -> bool {
        self > Disposition::Skipped
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Disposition::Failed => "failed",
            Disposition::Skipped => "skipped",
            Disposition::Cleanup => "cleanup",
            Disposition::SmallDiff => "small_diff",
            Disposition::Revert => "revert",
            Disposition::BotAuthored => "bot_authored",
            Disposition::IssueLinked => "issue_linked",
        }
    }
}

impl fmt::Display for Disposition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn precedence_order() {
        use Disposition::*;
        let ordered = [
            Failed,
            Skipped,
            Cleanup,
            SmallDiff,
            Revert,
            BotAuthored,
            IssueLinked,
        ];
        for pair in ordered.windows(2) {
            assert!(pair[0] < pair[1], "{} should rank below {}", pair[0], pair[1]);
        }
    }

    #[test]
    fn only_failed_fails() {
        assert!(!Disposition::Failed.passes());
        assert!(Disposition::Skipped.passes());
        assert!(Disposition::IssueLinked.passes());
    }

    #[test]
    fn skipped_is_not_conclusive() {
        assert!(!Disposition::Failed.is_conclusive());
        assert!(!Disposition::Skipped.is_conclusive());
        assert!(Disposition::Cleanup.is_conclusive());
        assert!(Disposition::IssueLinked.is_conclusive());
    }
}
