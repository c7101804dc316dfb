//! issuebot - a GitHub bot that requires pull requests to reference an issue.
//!
//! Every pull request needs at least one commit linking a tracking issue,
//! unless it is a revert, authored by a bot, tagged as cleanup, tiny, or
//! explicitly deferred with `skip-issuebot` (which files a placeholder issue).
//! Failing pull requests get a `failure` commit status.

pub mod check;
pub mod config;
pub mod debounce;
pub mod effects;
pub mod github;
pub mod policy;
pub mod server;
pub mod types;
pub mod webhooks;

#[cfg(test)]
pub(crate) mod test_utils;
