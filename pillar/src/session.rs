//! Generation session state: `Idle → Loading → Ready | Failed`, and back to `Loading` on
//! resubmission.
//!
//! Holds the four pieces of UI state (topic, loading flag, result, error) as one enum: at most
//! one of result and error is present, and neither while loading. Submissions are refused while
//! a request is in flight.

use thiserror::Error;

use crate::error::StrategyError;
use crate::orchestrator::Orchestrator;
use crate::strategy::Strategy;

/// Why a submission was refused.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("topic must not be empty")]
    EmptyTopic,
    #[error("a generation is already in progress")]
    Busy,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum SessionState {
    #[default]
    Idle,
    Loading {
        topic: String,
    },
    Ready {
        topic: String,
        strategy: Strategy,
    },
    Failed {
        topic: String,
        message: String,
    },
}

/// Explicit state container for one user's generation flow.
#[derive(Clone, Debug, Default)]
pub struct Session {
    state: SessionState,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Topic of the current or last submission.
    pub fn topic(&self) -> Option<&str> {
        match &self.state {
            SessionState::Idle => None,
            SessionState::Loading { topic }
            | SessionState::Ready { topic, .. }
            | SessionState::Failed { topic, .. } => Some(topic),
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, SessionState::Loading { .. })
    }

    pub fn strategy(&self) -> Option<&Strategy> {
        match &self.state {
            SessionState::Ready { strategy, .. } => Some(strategy),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match &self.state {
            SessionState::Failed { message, .. } => Some(message),
            _ => None,
        }
    }

    /// Starts a generation for `topic` (trimmed). Clears any previous result or error.
    /// Returns the trimmed topic to pass to the orchestrator.
    pub fn submit(&mut self, topic: &str) -> Result<String, SessionError> {
        if self.is_loading() {
            return Err(SessionError::Busy);
        }
        let topic = topic.trim();
        if topic.is_empty() {
            return Err(SessionError::EmptyTopic);
        }
        self.state = SessionState::Loading {
            topic: topic.to_string(),
        };
        Ok(topic.to_string())
    }

    /// Records the outcome of the in-flight generation. Ignored unless loading.
    pub fn complete(&mut self, outcome: Result<Strategy, StrategyError>) {
        if !self.is_loading() {
            tracing::warn!("completion received while not loading; ignored");
            return;
        }
        let SessionState::Loading { topic } = std::mem::take(&mut self.state) else {
            return;
        };
        self.state = match outcome {
            Ok(strategy) => SessionState::Ready { topic, strategy },
            Err(e) => SessionState::Failed {
                topic,
                message: e.to_string(),
            },
        };
    }

    /// Submit, generate, complete. Returns the new state.
    pub async fn run(
        &mut self,
        orchestrator: &Orchestrator,
        topic: &str,
    ) -> Result<&SessionState, SessionError> {
        let topic = self.submit(topic)?;
        let outcome = orchestrator.generate(&topic).await;
        self.complete(outcome);
        Ok(&self.state)
    }
}
