//! HTTP server for issuebot.
//!
//! # Endpoints
//!
//! - `POST`/`PUT /webhook` - Accepts GitHub webhook deliveries
//! - `GET /health` - Returns 200 if the server is running
//! - `GET /debug/vars` - Returns process counters as JSON

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::routing::{get, post};

use crate::check::PullRequestChecker;
use crate::effects::InterpreterFactory;
use crate::webhooks::WebhookSecret;

pub mod introspection;
pub mod webhook;

pub use introspection::{CounterSnapshot, Counters, health_handler, vars_handler};
pub use webhook::{WebhookError, spawn_evaluation, webhook_handler};

/// Default bound on a single pull request evaluation.
pub const DEFAULT_EVALUATION_TIMEOUT: Duration = Duration::from_secs(60);

/// Shared application state, passed to handlers via axum's `State` extractor.
///
/// `F` builds the GitHub interpreter for each evaluation, which lets the tests
/// run the whole router against a scripted GitHub.
pub struct AppState<F> {
    inner: Arc<AppStateInner<F>>,
}

struct AppStateInner<F> {
    webhook_secret: WebhookSecret,
    factory: F,
    checker: Arc<PullRequestChecker>,
    counters: Counters,
    evaluation_timeout: Duration,
}

impl<F> Clone for AppState<F> {
    fn clone(&self) -> Self {
        AppState {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<F: InterpreterFactory> AppState<F> {
    pub fn new(
        webhook_secret: WebhookSecret,
        factory: F,
        checker: PullRequestChecker,
        evaluation_timeout: Duration,
    ) -> Self {
        AppState {
            inner: Arc::new(AppStateInner {
                webhook_secret,
                factory,
                checker: Arc::new(checker),
                counters: Counters::default(),
                evaluation_timeout,
            }),
        }
    }

    pub fn webhook_secret(&self) -> &WebhookSecret {
        &self.inner.webhook_secret
    }

    pub fn factory(&self) -> &F {
        &self.inner.factory
    }

    pub fn checker(&self) -> &Arc<PullRequestChecker> {
        &self.inner.checker
    }

    pub fn counters(&self) -> &Counters {
        &self.inner.counters
    }

    pub fn evaluation_timeout(&self) -> Duration {
        self.inner.evaluation_timeout
    }
}

/// Builds the axum Router with all endpoints.
pub fn build_router<F: InterpreterFactory>(app_state: AppState<F>) -> Router {
    Router::new()
        .route(
            "/webhook",
            post(webhook_handler::<F>).put(webhook_handler::<F>),
        )
        .route("/health", get(health_handler))
        .route("/debug/vars", get(vars_handler::<F>))
        .with_state(app_state)
}
