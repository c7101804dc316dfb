//! Effect interpreter trait.
//!
//! The production interpreter lives in [`crate::github`]; tests drive the
//! disposition engine with a scripted interpreter instead.

use std::future::Future;

use super::github::{GitHubEffect, GitHubResponse};
use crate::types::RepoId;

/// Interprets GitHub effects against the GitHub API.
///
/// Implementations are constructed for one repository, so all effects executed
/// through a single interpreter instance are scoped to that repository.
///
/// # Example (mock for testing)
///
/// ```ignore
/// struct MockGitHubInterpreter {
///     responses: HashMap<GitHubEffect, GitHubResponse>,
/// }
///
/// impl GitHubInterpreter for MockGitHubInterpreter {
///     type Error = MockError;
///
///     async fn interpret(&self, effect: GitHubEffect) -> Result<GitHubResponse, Self::Error> {
///         self.responses.get(&effect).cloned().ok_or(MockError::Unscripted(effect))
///     }
/// }
/// ```
pub trait GitHubInterpreter {
    /// The error type returned by this interpreter.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Execute a GitHub effect and return its response.
    fn interpret(
        &self,
        effect: GitHubEffect,
    ) -> impl Future<Output = Result<GitHubResponse, Self::Error>> + Send;
}

/// Builds a repo-scoped interpreter for each incoming pull request.
///
/// The webhook server holds one factory and asks it for an interpreter per
/// delivery, since deliveries can come from any repository the bot is
/// installed on.
pub trait InterpreterFactory: Clone + Send + Sync + 'static {
    type Interpreter: GitHubInterpreter + Send + Sync + 'static;

    /// Returns an interpreter scoped to `repo`.
    fn for_repo(&self, repo: &RepoId) -> Self::Interpreter;
}
