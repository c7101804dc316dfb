use anyhow::Context;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use issuebot::check::PullRequestChecker;
use issuebot::config::Config;
use issuebot::github::OctocrabFactory;
use issuebot::server::{AppState, build_router};
use issuebot::webhooks::WebhookSecret;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "issuebot=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // octocrab's TLS stack needs a process-wide provider; a second install is harmless.
    let _ = rustls::crypto::ring::default_provider().install_default();

    let config = Config::parse();
    let policy = config.policy().context("invalid configuration")?;
    if let Some(pattern) = &policy.bot_pattern {
        tracing::info!(pattern = %pattern.as_str(), "bot author matching enabled");
    }

    let factory =
        OctocrabFactory::from_token(config.github_token.clone()).context("building GitHub client")?;
    let state = AppState::new(
        WebhookSecret::new(config.webhook_secret.clone()),
        factory,
        PullRequestChecker::new(policy),
        config.evaluation_timeout(),
    );
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(config.listen)
        .await
        .with_context(|| format!("binding {}", config.listen))?;
    tracing::info!(addr = %config.listen, "issuebot is listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("serving HTTP")?;

    tracing::info!("issuebot stopped");
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => tracing::info!("shutting down"),
        Err(e) => {
            tracing::error!(error = %e, "failed to listen for shutdown signal");
            std::future::pending::<()>().await;
        }
    }
}
