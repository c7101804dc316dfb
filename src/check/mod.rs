//! Evaluation of a single pull request against the issue-link policy.
//!
//! [`PullRequestChecker::check`] drives one evaluation end to end through a
//! [`GitHubInterpreter`](crate::effects::GitHubInterpreter): debounce, commit
//! scan, small-diff exemption, stub issue, status annotation.

pub mod commits;
pub mod engine;
pub mod error;
pub mod status;
pub mod stub;

pub use commits::{COMMITS_PER_PAGE, CommitPages, fetch_commit};
pub use engine::{
    CheckOutcome, CommitScan, DEFAULT_SMALL_DIFF_THRESHOLD, PolicyConfig, PullRequestChecker,
    final_disposition, scan_commits,
};
pub use error::CheckError;
pub use status::{FAILURE_DESCRIPTION, STATUS_CONTEXT};
pub use stub::{DEFAULT_STUB_LABEL, StubIssue};
