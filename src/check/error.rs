//! Errors that abort a pull request evaluation.

use thiserror::Error;

use crate::effects::{GitHubEffect, GitHubResponse};

/// An evaluation failure, generic over the interpreter's error type.
#[derive(Debug, Error)]
pub enum CheckError<E>
where
    E: std::error::Error + 'static,
{
    /// The interpreter failed to execute an effect.
    #[error("GitHub {operation} failed: {source}")]
    Api {
        operation: &'static str,
        #[source]
        source: E,
    },

    /// The interpreter answered an effect with a response of the wrong kind.
    #[error("unexpected response to {operation}: {response}")]
    UnexpectedResponse {
        operation: &'static str,
        response: String,
    },
}

impl<E> CheckError<E>
where
    E: std::error::Error + 'static,
{
    pub(crate) fn api(effect: &GitHubEffect, source: E) -> Self {
        CheckError::Api {
            operation: effect.name(),
            source,
        }
    }

    pub(crate) fn unexpected(operation: &'static str, response: &GitHubResponse) -> Self {
        CheckError::UnexpectedResponse {
            operation,
            response: format!("{response:?}"),
        }
    }

    /// Name of the GitHub operation that failed.
    pub fn operation(&self) -> &'static str {
        match self {
            CheckError::Api { operation, .. } | CheckError::UnexpectedResponse { operation, .. } => {
                operation
            }
        }
    }
}
