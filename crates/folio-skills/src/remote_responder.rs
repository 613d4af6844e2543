//! Remote-backed responder and strategy selection.

use crate::model_router::{LlmMode, ModelRouter, RemoteError};
use crate::prompt::{prepare_prompt, system_instruction};
use async_trait::async_trait;
use folio_core::{Answer, AnswerSource, KnowledgeBase, LlmConfig, PatternResponder, Responder};
use std::sync::Arc;

#[derive(Debug, thiserror::Error)]
pub enum StrategyError {
    #[error("pattern rules failed to compile: {0}")]
    Rules(#[from] regex::Error),
    #[error(transparent)]
    Remote(#[from] RemoteError),
}

/// Asks the completion API first and answers locally whenever that fails.
pub struct RemoteResponder {
    router: ModelRouter,
    local: PatternResponder,
    system: String,
}

impl RemoteResponder {
    pub fn new(router: ModelRouter, local: PatternResponder) -> Self {
        let system = system_instruction(local.knowledge());
        Self {
            router,
            local,
            system,
        }
    }
}

#[async_trait]
impl Responder for RemoteResponder {
    fn name(&self) -> &str {
        "remote"
    }

    async fn respond(&self, utterance: &str) -> Answer {
        // Blank input has a fixed answer; no point paying for a completion.
        if utterance.trim().is_empty() {
            return self.local.answer(utterance);
        }
        let prompt = prepare_prompt(self.local.knowledge(), utterance);
        match self.router.generate(&self.system, &prompt).await {
            Ok(text) => {
                tracing::debug!(target: "folio::remote", model = self.router.model(), chars = text.chars().count(), "Remote completion");
                Answer {
                    text,
                    source: AnswerSource::Remote,
                }
            }
            Err(e) => {
                tracing::warn!(target: "folio::remote", error = %e, "Remote completion failed; answering locally");
                self.local.answer(utterance)
            }
        }
    }
}

/// Picks the strategy once, at construction: remote-backed when a credential is configured,
/// pattern matching otherwise.
pub fn select_responder(
    config: &LlmConfig,
    kb: Arc<KnowledgeBase>,
) -> Result<Arc<dyn Responder>, StrategyError> {
    let local = PatternResponder::new(kb)?;
    match LlmMode::from_config(config) {
        LlmMode::Live => {
            let router = ModelRouter::from_config(config.clone())?;
            tracing::info!(target: "folio::remote", model = router.model(), "Using remote completions with local fallback");
            Ok(Arc::new(RemoteResponder::new(router, local)))
        }
        LlmMode::Local => {
            tracing::info!(target: "folio::chat", "No API credential; using local pattern responder");
            Ok(Arc::new(local))
        }
    }
}
