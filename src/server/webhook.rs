//! Webhook endpoint handler.
//!
//! Verifies the delivery signature, parses the event and, for pull requests
//! worth evaluating, starts the evaluation on its own task before answering
//! 202 Accepted. GitHub does not wait for the verdict.

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use thiserror::Error;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

use super::AppState;
use crate::check::CheckOutcome;
use crate::effects::InterpreterFactory;
use crate::types::{DeliveryId, PullRequestRef};
use crate::webhooks::{ParseError, SignatureError, parse_webhook};

/// Header name for GitHub event type.
const HEADER_EVENT: &str = "x-github-event";
/// Header name for GitHub delivery ID.
const HEADER_DELIVERY: &str = "x-github-delivery";
/// Header name for GitHub signature.
const HEADER_SIGNATURE: &str = "x-hub-signature-256";

/// Errors that reject a webhook delivery.
#[derive(Debug, Error)]
pub enum WebhookError {
    #[error("missing required header: {0}")]
    MissingHeader(&'static str),

    #[error("webhook signature bad: {0}")]
    InvalidSignature(#[from] SignatureError),

    #[error("could not parse payload: {0}")]
    InvalidPayload(#[from] ParseError),
}

impl IntoResponse for WebhookError {
    fn into_response(self) -> Response {
        let status = match &self {
            WebhookError::MissingHeader(_) => StatusCode::BAD_REQUEST,
            WebhookError::InvalidSignature(_) => StatusCode::UNAUTHORIZED,
            WebhookError::InvalidPayload(_) => StatusCode::BAD_REQUEST,
        };

        (status, self.to_string()).into_response()
    }
}

/// `POST`/`PUT /webhook`.
///
/// - 202 Accepted: a pull request evaluation was started
/// - 200 OK: verified, but not an event issuebot acts on
/// - 400 Bad Request: missing event header or malformed payload
/// - 401 Unauthorized: signature missing or not matching
pub async fn webhook_handler<F: InterpreterFactory>(
    State(app_state): State<AppState<F>>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<(StatusCode, &'static str), WebhookError> {
    app_state.counters().record_wakeup();

    let delivery_id = headers
        .get(HEADER_DELIVERY)
        .and_then(|v| v.to_str().ok())
        .map(DeliveryId::new)
        .unwrap_or_else(|| DeliveryId::new("unknown"));

    let verified = headers
        .get(HEADER_SIGNATURE)
        .and_then(|v| v.to_str().ok())
        .ok_or(SignatureError::Missing)
        .and_then(|signature| app_state.webhook_secret().verify(&body, signature));
    if let Err(e) = verified {
        warn!(delivery_id = %delivery_id, error = %e, "rejecting webhook");
        return Err(e.into());
    }

    let event_type = get_header(&headers, HEADER_EVENT)?;
    debug!(delivery_id = %delivery_id, event_type = %event_type, "received webhook");

    let pr = match parse_webhook(event_type, &body) {
        Ok(Some(pr)) => pr,
        Ok(None) => {
            debug!(delivery_id = %delivery_id, event_type = %event_type, "ignoring webhook event");
            return Ok((StatusCode::OK, "Ignored"));
        }
        Err(e) => {
            warn!(delivery_id = %delivery_id, error = %e, "could not parse webhook");
            return Err(e.into());
        }
    };

    info!(
        delivery_id = %delivery_id,
        repo = %pr.repo,
        pr = %pr.number,
        "accepted pull request event"
    );
    app_state.counters().record_pull_checked();
    spawn_evaluation(&app_state, pr);

    Ok((StatusCode::ACCEPTED, "Accepted"))
}

/// Evaluates `pr` on a new task, bounded by the configured timeout.
///
/// Failures are logged; nothing is reported back to the caller.
pub fn spawn_evaluation<F: InterpreterFactory>(
    app_state: &AppState<F>,
    pr: PullRequestRef,
) -> JoinHandle<()> {
    let client = app_state.factory().for_repo(&pr.repo);
    let checker = app_state.checker().clone();
    let timeout = app_state.evaluation_timeout();

    tokio::spawn(async move {
        match tokio::time::timeout(timeout, checker.check(&client, &pr)).await {
            Ok(Ok(CheckOutcome::Debounced)) => {}
            Ok(Ok(CheckOutcome::Checked {
                disposition,
                stub_issue,
            })) => {
                debug!(
                    repo = %pr.repo,
                    pr = %pr.number,
                    disposition = %disposition,
                    stub_issue = ?stub_issue,
                    "check finished"
                );
            }
            Ok(Err(e)) => {
                error!(repo = %pr.repo, pr = %pr.number, operation = e.operation(), error = %e, "check failed");
            }
            Err(_) => {
                error!(repo = %pr.repo, pr = %pr.number, timeout_secs = timeout.as_secs(), "check timed out");
            }
        }
    })
}

fn get_header<'a>(headers: &'a HeaderMap, name: &'static str) -> Result<&'a str, WebhookError> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .ok_or(WebhookError::MissingHeader(name))
}
