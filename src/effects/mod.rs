//! Effects-as-data for GitHub operations.
//!
//! The disposition engine describes each remote call as a [`GitHubEffect`] and
//! hands it to a [`GitHubInterpreter`]. This keeps the engine testable with a
//! scripted interpreter and makes every remote call easy to log.

pub mod github;
pub mod interpreter;

pub use github::{CommentData, GitHubEffect, GitHubResponse, IssueData, IssueState, StatusState};
pub use interpreter::{GitHubInterpreter, InterpreterFactory};
