//! Webhook handling for GitHub events.
//!
//! Signature verification for delivery bodies (HMAC-SHA256) and parsing of
//! `pull_request` events into the pull request to evaluate.

pub mod parser;
pub mod signature;

pub use parser::{HANDLED_ACTIONS, ParseError, parse_webhook};
pub use signature::{SignatureError, WebhookSecret, parse_signature_header};
