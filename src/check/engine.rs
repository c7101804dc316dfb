//! The pull request disposition engine.
//!
//! An evaluation claims the pull request in the debounce cache, scans commits
//! until one proves the pull request acceptable, applies the small-diff
//! exemption, files a stub issue for opted-out pull requests and finally
//! annotates the head commit.

use std::time::Duration;

use chrono::{DateTime, Utc};

use crate::debounce::{DEFAULT_DEBOUNCE_INTERVAL, DebounceCache};
use crate::effects::{GitHubEffect, GitHubInterpreter, GitHubResponse};
use crate::policy::{BotAuthorPattern, Disposition, classify_commit};
use crate::types::{IssueNumber, PullRequestRef};

use super::commits::{CommitPages, fetch_commit};
use super::error::CheckError;
use super::status::{failure_status, success_status};
use super::stub::{DEFAULT_STUB_LABEL, StubIssue, find_or_create};

/// Diffs smaller than this many changed lines are exempt.
pub const DEFAULT_SMALL_DIFF_THRESHOLD: u64 = 5;

/// Policy knobs for an evaluation.
#[derive(Debug, Clone)]
pub struct PolicyConfig {
    /// File a placeholder issue for pull requests that opted out.
    pub enable_stub_issues: bool,
    /// Extra e-mail pattern identifying automation authors.
    pub bot_pattern: Option<BotAuthorPattern>,
    pub debounce_interval: Duration,
    pub small_diff_threshold: u64,
    pub stub_label: String,
    /// Also write a `success` status for passing verdicts.
    pub report_success: bool,
}

impl Default for PolicyConfig {
    fn default() -> Self {
        PolicyConfig {
            enable_stub_issues: true,
            bot_pattern: None,
            debounce_interval: DEFAULT_DEBOUNCE_INTERVAL,
            small_diff_threshold: DEFAULT_SMALL_DIFF_THRESHOLD,
            stub_label: DEFAULT_STUB_LABEL.to_string(),
            report_success: false,
        }
    }
}

/// What the commit scan found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommitScan {
    /// Best disposition among the examined commits.
    pub disposition: Disposition,
    /// Changed lines summed over the examined commits.
    pub total_changes: u64,
    pub commits_examined: usize,
}

/// The result of a call to [`PullRequestChecker::check`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckOutcome {
    /// The pull request was evaluated moments ago; nothing was done.
    Debounced,
    Checked {
        disposition: Disposition,
        stub_issue: Option<IssueNumber>,
    },
}

impl CheckOutcome {
    pub fn disposition(&self) -> Option<Disposition> {
        match self {
            CheckOutcome::Debounced => None,
            CheckOutcome::Checked { disposition, .. } => Some(*disposition),
        }
    }
}

/// Folds commits into a disposition, stopping at the first conclusive one.
///
/// Pages are fetched lazily; once a commit lifts the disposition above
/// `Skipped` neither further commits nor further pages are requested.
pub async fn scan_commits<G: GitHubInterpreter>(
    client: &G,
    pr: &PullRequestRef,
    bot_pattern: Option<&BotAuthorPattern>,
) -> Result<CommitScan, CheckError<G::Error>> {
    let mut scan = CommitScan {
        disposition: Disposition::Failed,
        total_changes: 0,
        commits_examined: 0,
    };
    let mut pages = CommitPages::new(client, pr.number);

    'pages: while let Some(shas) = pages.next_page().await? {
        for sha in shas {
            let commit = fetch_commit(client, sha).await?;
            let disposition = classify_commit(&commit, bot_pattern);

            scan.total_changes = scan.total_changes.saturating_add(commit.total_changes);
            scan.commits_examined += 1;
            scan.disposition = scan.disposition.max(disposition);

            tracing::debug!(
                repo = %pr.repo,
                pr = %pr.number,
                sha = %commit.sha.short(),
                disposition = %disposition,
                changes = commit.total_changes,
                "classified commit"
            );

            if scan.disposition.is_conclusive() {
                break 'pages;
            }
        }
    }

    Ok(scan)
}

/// Applies the small-diff exemption to a finished scan.
pub fn final_disposition(scan: &CommitScan, small_diff_threshold: u64) -> Disposition {
    if scan.disposition <= Disposition::Skipped && scan.total_changes < small_diff_threshold {
        Disposition::SmallDiff
    } else {
        scan.disposition
    }
}

/// Evaluates pull requests against the issue-link policy.
///
/// Shared by all webhook tasks; the debounce cache inside is the only mutable
/// state.
#[derive(Debug)]
pub struct PullRequestChecker {
    policy: PolicyConfig,
    debounce: DebounceCache,
}

impl PullRequestChecker {
    pub fn new(policy: PolicyConfig) -> Self {
        let debounce = DebounceCache::new(policy.debounce_interval);
        PullRequestChecker { policy, debounce }
    }

    pub fn policy(&self) -> &PolicyConfig {
        &self.policy
    }

    /// Evaluates `pr` now.
    pub async fn check<G: GitHubInterpreter>(
        &self,
        client: &G,
        pr: &PullRequestRef,
    ) -> Result<CheckOutcome, CheckError<G::Error>> {
        self.check_at(client, pr, Utc::now()).await
    }

    /// Evaluates `pr` as of `now`, which only affects debouncing.
    pub async fn check_at<G: GitHubInterpreter>(
        &self,
        client: &G,
        pr: &PullRequestRef,
        now: DateTime<Utc>,
    ) -> Result<CheckOutcome, CheckError<G::Error>> {
        tracing::info!(repo = %pr.repo, pr = %pr.number, head = %pr.head_sha.short(), "begin check");

        if self.debounce.should_skip(&pr.key(), now) {
            tracing::info!(repo = %pr.repo, pr = %pr.number, "skipping, recently checked");
            return Ok(CheckOutcome::Debounced);
        }

        let scan = scan_commits(client, pr, self.policy.bot_pattern.as_ref()).await?;
        let disposition = final_disposition(&scan, self.policy.small_diff_threshold);

        tracing::info!(
            repo = %pr.repo,
            pr = %pr.number,
            disposition = %disposition,
            commits = scan.commits_examined,
            total_changes = scan.total_changes,
            "disposition decided"
        );

        let stub_issue = if disposition == Disposition::Skipped && self.policy.enable_stub_issues {
            self.attach_stub_issue(client, pr).await
        } else {
            None
        };

        self.annotate(client, pr, disposition).await?;

        Ok(CheckOutcome::Checked {
            disposition,
            stub_issue,
        })
    }

    async fn attach_stub_issue<G: GitHubInterpreter>(
        &self,
        client: &G,
        pr: &PullRequestRef,
    ) -> Option<IssueNumber> {
        match find_or_create(client, pr, &self.policy.stub_label).await {
            Ok(StubIssue::Existing(number)) => {
                tracing::info!(repo = %pr.repo, pr = %pr.number, issue = %number, "stub issue found");
                Some(number)
            }
            Ok(StubIssue::Created(number)) => {
                tracing::info!(repo = %pr.repo, pr = %pr.number, issue = %number, "stub issue created");
                Some(number)
            }
            Err(e) => {
                tracing::warn!(repo = %pr.repo, pr = %pr.number, error = %e, "error adding stub issue, accepting anyway");
                None
            }
        }
    }

    async fn annotate<G: GitHubInterpreter>(
        &self,
        client: &G,
        pr: &PullRequestRef,
        disposition: Disposition,
    ) -> Result<(), CheckError<G::Error>> {
        let effect = if !disposition.passes() {
            tracing::info!(repo = %pr.repo, pr = %pr.number, "reject");
            failure_status(pr.head_sha.clone())
        } else if self.policy.report_success {
            success_status(pr.head_sha.clone())
        } else {
            return Ok(());
        };

        write_status(client, effect).await
    }
}

async fn write_status<G: GitHubInterpreter>(
    client: &G,
    effect: GitHubEffect,
) -> Result<(), CheckError<G::Error>> {
    let response = client
        .interpret(effect.clone())
        .await
        .map_err(|e| CheckError::api(&effect, e))?;

    match response {
        GitHubResponse::StatusCreated => Ok(()),
        other => Err(CheckError::unexpected(effect.name(), &other)),
    }
}
