//! Chat handler: one utterance in, one answer out, after the configured "typing" pause.
//!
//! The pause and the (optional) remote completion both run inside the request future, so a
//! client that disconnects mid-request simply drops them.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Json, State};
use folio_core::TypingDelay;
use rand::Rng;
use std::time::Duration;

use crate::AppState;

/// Chat request from the portfolio SPA. Any `message` that is not a string reads as blank.
#[derive(serde::Deserialize)]
pub(crate) struct ChatRequest {
    #[serde(default, alias = "prompt")]
    message: Option<serde_json::Value>,
}

impl ChatRequest {
    fn into_utterance(self) -> String {
        match self.message {
            Some(serde_json::Value::String(text)) => text,
            _ => String::new(),
        }
    }
}

/// Pause length for one reply: `min_ms` plus a uniform draw from `0..=jitter_ms`.
pub(crate) fn typing_pause(delay: TypingDelay) -> Duration {
    if delay.is_disabled() {
        return Duration::ZERO;
    }
    let jitter = if delay.jitter_ms == 0 {
        0
    } else {
        rand::rng().random_range(0..=delay.jitter_ms)
    };
    Duration::from_millis(delay.min_ms.saturating_add(jitter))
}

/// POST /api/v1/chat – answers with the selected responder strategy.
pub(crate) async fn chat(
    State(state): State<AppState>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> axum::Json<serde_json::Value> {
    let correlation_id = uuid::Uuid::new_v4().to_string();
    let utterance = match payload {
        Ok(Json(req)) => req.into_utterance(),
        Err(rejection) => {
            tracing::warn!(
                target: "folio::chat",
                correlation_id = %correlation_id,
                error = %rejection,
                "Unreadable chat body, answering as blank"
            );
            String::new()
        }
    };
    tracing::info!(
        target: "folio::chat",
        correlation_id = %correlation_id,
        chars = utterance.chars().count(),
        "Chat request received"
    );

    let pause = typing_pause(state.config.typing_delay);
    if !pause.is_zero() {
        tokio::time::sleep(pause).await;
    }

    let answer = state.responder.respond(&utterance).await;
    tracing::info!(
        target: "folio::chat",
        correlation_id = %correlation_id,
        source = answer.source.label(),
        "Chat response ready"
    );

    axum::Json(serde_json::json!({
        "status": "ok",
        "response": answer.text,
        "source": answer.source.label(),
        "topic": answer.source.topic().map(|t| t.label()),
        "correlation_id": correlation_id,
    }))
}
