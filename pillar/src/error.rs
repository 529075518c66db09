//! Strategy generation error types.
//!
//! Every failure is terminal for the current request; callers show the message and let the
//! user resubmit.

use thiserror::Error;

use crate::backend::BackendError;

/// No usable structured payload could be read from the backend text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseFailure {
    /// No fenced block and no `{ ... }` span in the text.
    #[error("no structured payload located in the AI response")]
    NoPayload,
    /// A candidate payload was found but is not valid JSON. Holds the parser's diagnostic.
    #[error("malformed payload: {0}")]
    Malformed(String),
}

/// Error returned by [`Orchestrator::generate`](crate::Orchestrator::generate) and
/// [`normalize`](crate::normalize).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StrategyError {
    /// The backend call itself failed (network, HTTP status, undecodable body).
    #[error("generation failed: {0}")]
    Backend(#[from] BackendError),

    /// The response text did not contain a parseable payload.
    #[error("could not parse structured data from the AI response: {0}")]
    Parse(#[from] ParseFailure),

    /// The payload parsed but violates the pillar/sub-pillar shape.
    #[error("invalid strategy payload: `{field}` {reason}")]
    Validation { field: String, reason: String },
}

impl StrategyError {
    pub(crate) fn validation(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Short classification used in logs and JSON output.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Backend(_) => "backend_failure",
            Self::Parse(_) => "parse_failure",
            Self::Validation { .. } => "validation_failure",
        }
    }
}
