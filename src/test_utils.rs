//! Shared test utilities: a scripted GitHub interpreter, fixtures, and
//! arbitrary generators for property-based testing.

use std::collections::VecDeque;
use std::future::Future;
use std::sync::{Arc, Mutex};

use proptest::prelude::*;
use thiserror::Error;

use crate::effects::{GitHubEffect, GitHubInterpreter, GitHubResponse, InterpreterFactory};
use crate::policy::Disposition;
use crate::types::{CommitAuthor, CommitRecord, PrNumber, PullRequestRef, RepoId, Sha};

#[derive(Debug, Clone, Error)]
#[error("mock GitHub error: {0}")]
pub struct MockError(pub String);

#[derive(Debug, Default)]
struct MockState {
    responses: VecDeque<Result<GitHubResponse, MockError>>,
    effects: Vec<GitHubEffect>,
    repos: Vec<RepoId>,
}

/// An interpreter that answers effects from a queue and records every effect
/// it receives.
///
/// Clones share state, so the same mock can act as its own
/// [`InterpreterFactory`]. An effect arriving with the queue empty fails.
#[derive(Debug, Clone, Default)]
pub struct MockGitHub {
    state: Arc<Mutex<MockState>>,
}

impl MockGitHub {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_ok(&self, response: GitHubResponse) {
        self.lock().responses.push_back(Ok(response));
    }

    pub fn push_err(&self, message: &str) {
        self.lock()
            .responses
            .push_back(Err(MockError(message.to_string())));
    }

    /// Queues one commit page followed by the fetch of each of its commits.
    pub fn push_page(&self, commits: &[CommitRecord], has_more: bool) {
        self.push_ok(GitHubResponse::CommitPage {
            shas: commits.iter().map(|c| c.sha.clone()).collect(),
            has_more,
        });
        for commit in commits {
            self.push_ok(GitHubResponse::Commit(commit.clone()));
        }
    }

    /// Every effect received so far, in order.
    pub fn effects(&self) -> Vec<GitHubEffect> {
        self.lock().effects.clone()
    }

    /// Number of received effects with the given operation name.
    pub fn count(&self, operation: &str) -> usize {
        self.lock()
            .effects
            .iter()
            .filter(|e| e.name() == operation)
            .count()
    }

    /// Repositories interpreters were requested for.
    pub fn repos(&self) -> Vec<RepoId> {
        self.lock().repos.clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, MockState> {
        self.state
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

impl GitHubInterpreter for MockGitHub {
    type Error = MockError;

    fn interpret(
        &self,
        effect: GitHubEffect,
    ) -> impl Future<Output = Result<GitHubResponse, Self::Error>> + Send {
        let result = {
            let mut state = self.lock();
            let result = state
                .responses
                .pop_front()
                .unwrap_or_else(|| Err(MockError(format!("unscripted effect {effect}"))));
            state.effects.push(effect);
            result
        };
        async move { result }
    }
}

impl InterpreterFactory for MockGitHub {
    type Interpreter = MockGitHub;

    fn for_repo(&self, repo: &RepoId) -> MockGitHub {
        self.lock().repos.push(repo.clone());
        self.clone()
    }
}

// ─── Fixtures ─────────────────────────────────────────────────────────────────

/// A distinct, valid SHA for each `n`.
pub fn sha(n: u32) -> Sha {
    Sha::parse(format!("{n:040x}")).unwrap()
}

pub fn pull_request(number: u64, author: &str) -> PullRequestRef {
    PullRequestRef {
        repo: RepoId::new("acme", "widgets"),
        number: PrNumber(number),
        author: author.to_string(),
        head_sha: sha(0xffff),
    }
}

pub fn commit(n: u32, message: &str, author: &str, total_changes: u64) -> CommitRecord {
    CommitRecord {
        sha: sha(n),
        message: message.to_string(),
        author: CommitAuthor::new(author, format!("{}@example.com", author.to_lowercase())),
        total_changes,
    }
}

// ─── Strategies ───────────────────────────────────────────────────────────────

pub fn arb_pr_number() -> impl Strategy<Value = PrNumber> {
    (1u64..100_000).prop_map(PrNumber)
}

pub fn arb_sha() -> impl Strategy<Value = Sha> {
    "[0-9a-f]{40}".prop_map(|s| Sha::parse(s).unwrap())
}

pub fn arb_disposition() -> impl Strategy<Value = Disposition> {
    prop_oneof![
        Just(Disposition::Failed),
        Just(Disposition::Skipped),
        Just(Disposition::Cleanup),
        Just(Disposition::SmallDiff),
        Just(Disposition::Revert),
        Just(Disposition::BotAuthored),
        Just(Disposition::IssueLinked),
    ]
}

/// A commit message that classifies as exactly `disposition`, except
/// `SmallDiff` and `BotAuthored`, which no message produces and map to a
/// failing message.
pub fn message_for(disposition: Disposition) -> &'static str {
    match disposition {
        Disposition::IssueLinked => "Do the thing\n\nUpdates #42",
        Disposition::Revert => "Revert \"Do the thing\"",
        Disposition::Cleanup => "Tidy imports #cleanup",
        Disposition::Skipped => "skip-issuebot: will file later",
        Disposition::Failed | Disposition::SmallDiff | Disposition::BotAuthored => {
            "Fixed the typo"
        }
    }
}
