//! Octocrab client wrapper scoped to a specific repository.

use octocrab::Octocrab;

use crate::effects::InterpreterFactory;
use crate::types::RepoId;

/// A GitHub API client scoped to a specific repository.
///
/// `GitHubEffect` variants carry no repository, so every effect executed
/// through this client targets `repo`.
#[derive(Clone)]
pub struct OctocrabClient {
    client: Octocrab,
    repo: RepoId,
}

impl OctocrabClient {
    pub fn new(client: Octocrab, repo: RepoId) -> Self {
        Self { client, repo }
    }

    /// Returns a reference to the underlying octocrab client.
    pub fn inner(&self) -> &Octocrab {
        &self.client
    }

    pub fn repo(&self) -> &RepoId {
        &self.repo
    }

    pub fn owner(&self) -> &str {
        &self.repo.owner
    }

    pub fn repo_name(&self) -> &str {
        &self.repo.repo
    }

    /// Builds an API route under `/repos/{owner}/{repo}`.
    pub(crate) fn route(&self, suffix: &str) -> String {
        format!("/repos/{}/{}/{}", self.owner(), self.repo_name(), suffix)
    }
}

impl std::fmt::Debug for OctocrabClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OctocrabClient")
            .field("repo", &self.repo)
            .finish_non_exhaustive()
    }
}

/// Hands out repo-scoped clients sharing one authenticated octocrab instance.
#[derive(Clone)]
pub struct OctocrabFactory {
    client: Octocrab,
}

impl OctocrabFactory {
    pub fn new(client: Octocrab) -> Self {
        Self { client }
    }

    pub fn from_token(token: impl Into<String>) -> Result<Self, octocrab::Error> {
        let client = Octocrab::builder().personal_token(token.into()).build()?;
        Ok(Self::new(client))
    }
}

impl InterpreterFactory for OctocrabFactory {
    type Interpreter = OctocrabClient;

    fn for_repo(&self, repo: &RepoId) -> OctocrabClient {
        OctocrabClient::new(self.client.clone(), repo.clone())
    }
}

impl std::fmt::Debug for OctocrabFactory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OctocrabFactory").finish_non_exhaustive()
    }
}
