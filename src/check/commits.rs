//! Lazy paging over a pull request's commits.

use crate::effects::{GitHubEffect, GitHubInterpreter, GitHubResponse};
use crate::types::{CommitRecord, PrNumber, Sha};

use super::error::CheckError;

/// Commits requested per page.
pub const COMMITS_PER_PAGE: u8 = 100;

/// Walks the commit listing of one pull request a page at a time.
///
/// Nothing is fetched until [`next_page`](Self::next_page) is called, and
/// dropping the pager abandons the remaining pages.
pub struct CommitPages<'a, G> {
    client: &'a G,
    pr: PrNumber,
    per_page: u8,
    next: Option<u32>,
}

impl<'a, G: GitHubInterpreter> CommitPages<'a, G> {
    pub fn new(client: &'a G, pr: PrNumber) -> Self {
        Self::with_page_size(client, pr, COMMITS_PER_PAGE)
    }

    pub fn with_page_size(client: &'a G, pr: PrNumber, per_page: u8) -> Self {
        CommitPages {
            client,
            pr,
            per_page,
            next: Some(1),
        }
    }

    /// Fetches the next page of commit SHAs, or `None` once the listing is
    /// exhausted.
    pub async fn next_page(&mut self) -> Result<Option<Vec<Sha>>, CheckError<G::Error>> {
        let Some(page) = self.next else {
            return Ok(None);
        };

        let effect = GitHubEffect::ListPrCommits {
            pr: self.pr,
            page,
            per_page: self.per_page,
        };
        let response = self
            .client
            .interpret(effect.clone())
            .await
            .map_err(|e| CheckError::api(&effect, e))?;

        match response {
            GitHubResponse::CommitPage { shas, has_more } => {
                self.next = if has_more && !shas.is_empty() {
                    Some(page + 1)
                } else {
                    None
                };
                tracing::debug!(pr = %self.pr, page, commits = shas.len(), has_more, "fetched commit page");
                Ok(Some(shas))
            }
            other => Err(CheckError::unexpected(effect.name(), &other)),
        }
    }
}

/// Fetches the full record (message, author, stats) of one commit.
pub async fn fetch_commit<G: GitHubInterpreter>(
    client: &G,
    sha: Sha,
) -> Result<CommitRecord, CheckError<G::Error>> {
    let effect = GitHubEffect::GetCommit { sha };
    let response = client
        .interpret(effect.clone())
        .await
        .map_err(|e| CheckError::api(&effect, e))?;

    match response {
        GitHubResponse::Commit(record) => Ok(record),
        other => Err(CheckError::unexpected(effect.name(), &other)),
    }
}
