//! Liveness and counter endpoints.

use std::sync::atomic::{AtomicU64, Ordering};

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use serde::Serialize;

use super::AppState;
use crate::effects::InterpreterFactory;

/// Process-lifetime counters, reset on restart.
#[derive(Debug, Default)]
pub struct Counters {
    webhook_wakeups: AtomicU64,
    pulls_checked: AtomicU64,
}

/// A point-in-time copy of [`Counters`], as served on `/debug/vars`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CounterSnapshot {
    #[serde(rename = "issuebot_webhook_wakeups")]
    pub webhook_wakeups: u64,
    #[serde(rename = "issuebot_pull_requests_checked")]
    pub pulls_checked: u64,
}

impl Counters {
    /// Counts a request to the webhook endpoint, valid or not.
    pub fn record_wakeup(&self) {
        self.webhook_wakeups.fetch_add(1, Ordering::Relaxed);
    }

    /// Counts a pull request handed to the checker.
    pub fn record_pull_checked(&self) {
        self.pulls_checked.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> CounterSnapshot {
        CounterSnapshot {
            webhook_wakeups: self.webhook_wakeups.load(Ordering::Relaxed),
            pulls_checked: self.pulls_checked.load(Ordering::Relaxed),
        }
    }
}

/// `GET /health`: 200 while the process is serving.
pub async fn health_handler() -> (StatusCode, &'static str) {
    (StatusCode::OK, "OK")
}

/// `GET /debug/vars`: counters as JSON.
pub async fn vars_handler<F: InterpreterFactory>(
    State(app_state): State<AppState<F>>,
) -> Json<CounterSnapshot> {
    Json(app_state.counters().snapshot())
}
