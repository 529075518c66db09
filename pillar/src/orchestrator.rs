//! Request orchestrator: topic → one grounded backend call → normalized [`Strategy`].

use std::sync::Arc;

use tracing::Instrument;

use crate::backend::{BackendRequest, GenerativeBackend};
use crate::error::StrategyError;
use crate::normalize::normalize;
use crate::prompt::strategy_instruction;
use crate::strategy::Strategy;

/// Issues exactly one backend request per [`generate`](Orchestrator::generate) call.
///
/// No retry, no timeout of its own, no caching; backend errors are returned unchanged as
/// [`StrategyError::Backend`].
#[derive(Clone)]
pub struct Orchestrator {
    backend: Arc<dyn GenerativeBackend>,
}

impl Orchestrator {
    pub fn new(backend: Arc<dyn GenerativeBackend>) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &Arc<dyn GenerativeBackend> {
        &self.backend
    }

    /// Generates a strategy for `topic`. The caller is expected to pass a trimmed, non-empty
    /// topic (see [`Session::submit`](crate::Session::submit)).
    pub async fn generate(&self, topic: &str) -> Result<Strategy, StrategyError> {
        let span = tracing::info_span!("generate_strategy", topic = %topic, backend = %self.backend.name());
        async {
            let request = BackendRequest::grounded(strategy_instruction(topic));
            let response = self.backend.generate(&request).await.map_err(|e| {
                tracing::error!(error = %e, "backend call failed");
                StrategyError::from(e)
            })?;

            match normalize(&response.text, &response.grounding_chunks) {
                Ok(strategy) => {
                    tracing::info!(
                        sub_pillars = strategy.sub_pillars.len(),
                        sources = strategy.sources.len(),
                        "strategy generated"
                    );
                    Ok(strategy)
                }
                Err(e) => {
                    tracing::warn!(kind = e.kind(), error = %e, "response rejected");
                    Err(e)
                }
            }
        }
        .instrument(span)
        .await
    }
}
