//! GitHub effect interpreter using octocrab.
//!
//! Every effect maps to a single REST route, or to one route walked page by
//! page for the listing effects. Calls go through octocrab's raw `get` and
//! `post` with small serde request and response structs, so only the fields
//! issuebot reads are deserialized. Nothing is retried here.

use serde::{Deserialize, Serialize};

use crate::effects::{
    CommentData, GitHubEffect, GitHubInterpreter, GitHubResponse, IssueData, IssueState,
    StatusState,
};
use crate::types::{CommentId, CommitAuthor, CommitRecord, IssueNumber, PrNumber, Sha};

use super::client::OctocrabClient;
use super::error::GitHubApiError;

/// Page size used for every listing.
pub const PAGE_SIZE: u8 = 100;

impl GitHubInterpreter for OctocrabClient {
    type Error = GitHubApiError;

    async fn interpret(&self, effect: GitHubEffect) -> Result<GitHubResponse, Self::Error> {
        interpret_github_effect(self, effect).await
    }
}

/// Executes a single effect against the GitHub API.
pub async fn interpret_github_effect(
    client: &OctocrabClient,
    effect: GitHubEffect,
) -> Result<GitHubResponse, GitHubApiError> {
    tracing::debug!(repo = %client.repo(), effect = %effect, "executing GitHub effect");

    match effect {
        GitHubEffect::ListPrCommits { pr, page, per_page } => {
            list_pr_commits(client, pr, page, per_page).await
        }
        GitHubEffect::GetCommit { sha } => get_commit(client, sha).await,
        GitHubEffect::ListIssues {
            assignee,
            label,
            state,
        } => list_issues(client, assignee, label, state).await,
        GitHubEffect::CreateIssue {
            title,
            body,
            assignee,
            labels,
        } => create_issue(client, title, body, assignee, labels).await,
        GitHubEffect::ListComments { pr } => list_comments(client, pr).await,
        GitHubEffect::PostComment { pr, body } => post_comment(client, pr, body).await,
        GitHubEffect::CreateStatus {
            sha,
            context,
            state,
            description,
        } => create_status(client, sha, context, state, description).await,
    }
}

// ─── Commits ──────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct PageParams {
    per_page: u8,
    page: u32,
}

#[derive(Debug, Deserialize)]
struct CommitListEntry {
    sha: String,
}

async fn list_pr_commits(
    client: &OctocrabClient,
    pr: PrNumber,
    page: u32,
    per_page: u8,
) -> Result<GitHubResponse, GitHubApiError> {
    let url = client.route(&format!("pulls/{}/commits", pr.0));
    let params = PageParams { per_page, page };

    let entries: Vec<CommitListEntry> = client
        .inner()
        .get(&url, Some(&params))
        .await
        .map_err(GitHubApiError::from_octocrab)?;

    let has_more = entries.len() >= usize::from(per_page);
    let shas = entries
        .into_iter()
        .map(|entry| Sha::parse(&entry.sha))
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| GitHubApiError::permanent_without_source(e.to_string()))?;

    Ok(GitHubResponse::CommitPage { shas, has_more })
}

#[derive(Debug, Deserialize)]
struct CommitResponse {
    sha: String,
    commit: CommitDetail,
    #[serde(default)]
    stats: Option<CommitStats>,
}

#[derive(Debug, Deserialize)]
struct CommitDetail {
    #[serde(default)]
    message: String,
    #[serde(default)]
    author: Option<GitIdentity>,
}

#[derive(Debug, Deserialize)]
struct GitIdentity {
    name: Option<String>,
    email: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CommitStats {
    #[serde(default)]
    total: u64,
}

async fn get_commit(client: &OctocrabClient, sha: Sha) -> Result<GitHubResponse, GitHubApiError> {
    let url = client.route(&format!("commits/{}", sha));

    let response: CommitResponse = client
        .inner()
        .get(&url, None::<&()>)
        .await
        .map_err(GitHubApiError::from_octocrab)?;

    Ok(GitHubResponse::Commit(commit_record(response)?))
}

fn commit_record(response: CommitResponse) -> Result<CommitRecord, GitHubApiError> {
    let sha = Sha::parse(&response.sha)
        .map_err(|e| GitHubApiError::permanent_without_source(e.to_string()))?;
    let author = response
        .commit
        .author
        .map(|a| CommitAuthor {
            name: a.name,
            email: a.email,
        })
        .unwrap_or_default();

    Ok(CommitRecord {
        sha,
        message: response.commit.message,
        author,
        total_changes: response.stats.map(|s| s.total).unwrap_or(0),
    })
}

// ─── Issues ───────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct IssueListParams<'a> {
    assignee: &'a str,
    labels: &'a str,
    state: &'static str,
    per_page: u8,
    page: u32,
}

#[derive(Debug, Deserialize)]
struct IssueResponse {
    number: u64,
    #[serde(default)]
    title: String,
    /// Present when the "issue" is really a pull request.
    #[serde(default)]
    pull_request: Option<serde_json::Value>,
}

async fn list_issues(
    client: &OctocrabClient,
    assignee: String,
    label: String,
    state: IssueState,
) -> Result<GitHubResponse, GitHubApiError> {
    let url = client.route("issues");
    let mut issues = Vec::new();

    for page in 1.. {
        let params = IssueListParams {
            assignee: &assignee,
            labels: &label,
            state: state.as_api_str(),
            per_page: PAGE_SIZE,
            page,
        };
        let batch: Vec<IssueResponse> = client
            .inner()
            .get(&url, Some(&params))
            .await
            .map_err(GitHubApiError::from_octocrab)?;

        let len = batch.len();
        issues.extend(
            batch
                .into_iter()
                .filter(|issue| issue.pull_request.is_none())
                .map(|issue| IssueData {
                    number: IssueNumber(issue.number),
                    title: issue.title,
                }),
        );

        if len < usize::from(PAGE_SIZE) {
            break;
        }
    }

    Ok(GitHubResponse::Issues(issues))
}

#[derive(Debug, Serialize)]
struct CreateIssueRequest {
    title: String,
    body: String,
    assignees: Vec<String>,
    labels: Vec<String>,
}

async fn create_issue(
    client: &OctocrabClient,
    title: String,
    body: String,
    assignee: String,
    labels: Vec<String>,
) -> Result<GitHubResponse, GitHubApiError> {
    let url = client.route("issues");
    let request = CreateIssueRequest {
        title,
        body,
        assignees: vec![assignee],
        labels,
    };

    let created: IssueResponse = client
        .inner()
        .post(&url, Some(&request))
        .await
        .map_err(GitHubApiError::from_octocrab)?;

    Ok(GitHubResponse::IssueCreated {
        number: IssueNumber(created.number),
    })
}

// ─── Comments ─────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct CommentResponse {
    id: u64,
    #[serde(default)]
    body: Option<String>,
}

async fn list_comments(
    client: &OctocrabClient,
    pr: PrNumber,
) -> Result<GitHubResponse, GitHubApiError> {
    let url = client.route(&format!("issues/{}/comments", pr.0));
    let mut comments = Vec::new();

    for page in 1.. {
        let params = PageParams {
            per_page: PAGE_SIZE,
            page,
        };
        let batch: Vec<CommentResponse> = client
            .inner()
            .get(&url, Some(&params))
            .await
            .map_err(GitHubApiError::from_octocrab)?;

        let len = batch.len();
        comments.extend(batch.into_iter().map(|c| CommentData {
            id: CommentId(c.id),
            body: c.body.unwrap_or_default(),
        }));

        if len < usize::from(PAGE_SIZE) {
            break;
        }
    }

    Ok(GitHubResponse::Comments(comments))
}

#[derive(Debug, Serialize)]
struct CommentRequest {
    body: String,
}

async fn post_comment(
    client: &OctocrabClient,
    pr: PrNumber,
    body: String,
) -> Result<GitHubResponse, GitHubApiError> {
    let url = client.route(&format!("issues/{}/comments", pr.0));

    let posted: CommentResponse = client
        .inner()
        .post(&url, Some(&CommentRequest { body }))
        .await
        .map_err(GitHubApiError::from_octocrab)?;

    Ok(GitHubResponse::CommentPosted {
        id: CommentId(posted.id),
    })
}

// ─── Statuses ─────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct StatusRequest {
    state: &'static str,
    context: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<String>,
}

async fn create_status(
    client: &OctocrabClient,
    sha: Sha,
    context: String,
    state: StatusState,
    description: Option<String>,
) -> Result<GitHubResponse, GitHubApiError> {
    let url = client.route(&format!("statuses/{}", sha));
    let request = StatusRequest {
        state: state.as_api_str(),
        context,
        description,
    };

    let _: serde_json::Value = client
        .inner()
        .post(&url, Some(&request))
        .await
        .map_err(GitHubApiError::from_octocrab)?;

    Ok(GitHubResponse::StatusCreated)
}
