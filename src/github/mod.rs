//! GitHub API client and effect interpreter.
//!
//! Implements the `GitHubInterpreter` trait from the effects module on top of
//! octocrab. Failed calls are categorised as transient or permanent for the
//! logs but never retried.

mod client;
mod error;
mod interpreter;

pub use client::{OctocrabClient, OctocrabFactory};
pub use error::{GitHubApiError, GitHubErrorKind};
pub use interpreter::{PAGE_SIZE, interpret_github_effect};
