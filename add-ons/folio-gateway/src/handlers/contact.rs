use axum::extract::{Json, State};
use axum::http::StatusCode;
use folio_skills::{ContactEmail, ContactMessage, RelayError};

use crate::AppState;

fn reply(status: StatusCode, message: &str) -> (StatusCode, axum::Json<serde_json::Value>) {
    (status, axum::Json(serde_json::json!({ "message": message })))
}

/// POST /api/contact – validates the form and relays it by email.
pub(crate) async fn contact(
    State(state): State<AppState>,
    Json(msg): Json<ContactMessage>,
) -> (StatusCode, axum::Json<serde_json::Value>) {
    if !msg.is_complete() {
        return reply(StatusCode::BAD_REQUEST, "All fields are required");
    }

    let result = match state.mailer.as_ref() {
        Some(mailer) => match ContactEmail::compose(&msg, &state.config.contact) {
            Ok(email) => mailer.deliver(&email).await,
            Err(e) => Err(e),
        },
        None => Err(RelayError::NotConfigured),
    };

    match result {
        Ok(()) => {
            tracing::info!(target: "folio::contact", "Contact form submitted");
            reply(StatusCode::OK, "Message sent successfully")
        }
        Err(e) => {
            tracing::error!(target: "folio::contact", error = %e, "Error in contact form submission");
            reply(StatusCode::INTERNAL_SERVER_ERROR, "Failed to send message")
        }
    }
}
