//! Core domain types for issuebot.

pub mod ids;
pub mod pr;

pub use ids::{CommentId, DeliveryId, InvalidSha, IssueNumber, PrNumber, RepoId, Sha};
pub use pr::{CommitAuthor, CommitRecord, PrKey, PullRequestRef};
