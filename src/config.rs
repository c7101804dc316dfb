//! Command-line and environment configuration.

use std::net::SocketAddr;
use std::time::Duration;

use clap::{ArgAction, Parser};
use thiserror::Error;

use crate::check::{DEFAULT_SMALL_DIFF_THRESHOLD, DEFAULT_STUB_LABEL, PolicyConfig};
use crate::policy::{BotAuthorPattern, InvalidBotPattern};
use crate::server::DEFAULT_EVALUATION_TIMEOUT;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid --bot-author-regexp: {0}")]
    BotPattern(#[from] InvalidBotPattern),

    #[error("--stub-label must not be empty")]
    EmptyStubLabel,
}

/// issuebot: require pull requests to reference an issue.
#[derive(Clone, Parser)]
#[command(name = "issuebot", version, about)]
pub struct Config {
    /// Address to serve webhooks on.
    #[arg(long, env = "ISSUEBOT_LISTEN", default_value = "0.0.0.0:8080")]
    pub listen: SocketAddr,

    /// GitHub token used for API calls.
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    pub github_token: String,

    /// Shared secret configured on the GitHub webhook.
    #[arg(long, env = "WEBHOOK_SECRET", hide_env_values = true)]
    pub webhook_secret: String,

    /// File a placeholder issue for pull requests tagged skip-issuebot.
    #[arg(long, env = "ISSUEBOT_ENABLE_STUB_ISSUES", default_value_t = true, action = ArgAction::Set)]
    pub enable_stub_issues: bool,

    /// E-mail pattern identifying automation authors. An optional capture
    /// group must match the author name with spaces replaced by hyphens.
    #[arg(long, env = "ISSUEBOT_BOT_AUTHOR_REGEXP")]
    pub bot_author_regexp: Option<String>,

    /// Seconds during which repeated deliveries for a pull request are ignored.
    #[arg(long, env = "ISSUEBOT_DEBOUNCE_SECS", default_value_t = 5)]
    pub debounce_secs: u64,

    /// Pull requests changing fewer lines than this pass without an issue.
    #[arg(long, env = "ISSUEBOT_SMALL_DIFF_THRESHOLD", default_value_t = DEFAULT_SMALL_DIFF_THRESHOLD)]
    pub small_diff_threshold: u64,

    /// Label applied to placeholder issues.
    #[arg(long, env = "ISSUEBOT_STUB_LABEL", default_value = DEFAULT_STUB_LABEL)]
    pub stub_label: String,

    /// Also mark passing pull requests with a success status.
    #[arg(long, env = "ISSUEBOT_REPORT_SUCCESS", action = ArgAction::SetTrue)]
    pub report_success: bool,

    /// Upper bound in seconds on one pull request evaluation.
    #[arg(long, env = "ISSUEBOT_EVALUATION_TIMEOUT_SECS", default_value_t = DEFAULT_EVALUATION_TIMEOUT.as_secs())]
    pub evaluation_timeout_secs: u64,
}

impl Config {
    /// Validates the policy options and builds the checker configuration.
    pub fn policy(&self) -> Result<PolicyConfig, ConfigError> {
        let bot_pattern = self
            .bot_author_regexp
            .as_deref()
            .filter(|p| !p.is_empty())
            .map(BotAuthorPattern::new)
            .transpose()?;

        if self.stub_label.trim().is_empty() {
            return Err(ConfigError::EmptyStubLabel);
        }

        Ok(PolicyConfig {
            enable_stub_issues: self.enable_stub_issues,
            bot_pattern,
            debounce_interval: Duration::from_secs(self.debounce_secs),
            small_diff_threshold: self.small_diff_threshold,
            stub_label: self.stub_label.clone(),
            report_success: self.report_success,
        })
    }

    pub fn evaluation_timeout(&self) -> Duration {
        Duration::from_secs(self.evaluation_timeout_secs)
    }
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("listen", &self.listen)
            .field("enable_stub_issues", &self.enable_stub_issues)
            .field("bot_author_regexp", &self.bot_author_regexp)
            .field("debounce_secs", &self.debounce_secs)
            .field("small_diff_threshold", &self.small_diff_threshold)
            .field("stub_label", &self.stub_label)
            .field("report_success", &self.report_success)
            .field("evaluation_timeout_secs", &self.evaluation_timeout_secs)
            .finish_non_exhaustive()
    }
}
