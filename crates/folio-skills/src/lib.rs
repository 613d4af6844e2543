//! Outbound capabilities around the local responder: the remote completion router, the
//! remote-backed responder with local fallback, and the contact-form SMTP relay.

mod contact_relay;
mod model_router;
mod prompt;
mod remote_responder;

pub use contact_relay::{
    ContactEmail, ContactMessage, MailTransport, RelayError, SmtpRelay, CONTACT_FROM_NAME,
    SUBJECT_PREFIX,
};
pub use model_router::{LlmMode, ModelRouter, RemoteError};
pub use prompt::{prepare_prompt, system_instruction};
pub use remote_responder::{select_responder, RemoteResponder, StrategyError};
