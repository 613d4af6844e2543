//! Contact relay: validates a contact-form submission and forwards it to the owner's inbox
//! over SMTP.

use async_trait::async_trait;
use folio_core::ContactConfig;
use lettre::message::{Mailbox, MultiPart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use serde::{Deserialize, Serialize};

pub const SUBJECT_PREFIX: &str = "[Portfolio]";
pub const CONTACT_FROM_NAME: &str = "Portfolio Contact";

#[derive(Debug, thiserror::Error)]
pub enum RelayError {
    #[error("contact relay is not configured (SMTP host and user required)")]
    NotConfigured,
    #[error("all fields are required")]
    Incomplete,
    #[error("invalid {field} address: {source}")]
    InvalidAddress {
        field: &'static str,
        #[source]
        source: lettre::address::AddressError,
    },
    #[error("failed to build message: {0}")]
    Build(#[from] lettre::error::Error),
    #[error("smtp: {0}")]
    Transport(#[from] lettre::transport::smtp::Error),
}

/// Contact-form payload as posted by the browser.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContactMessage {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub message: String,
}

impl ContactMessage {
    /// Every field is non-blank after trimming.
    pub fn is_complete(&self) -> bool {
        [&self.name, &self.email, &self.subject, &self.message]
            .iter()
            .all(|f| !f.trim().is_empty())
    }
}

/// The outbound email for one submission, before transport-specific encoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactEmail {
    pub from_name: String,
    pub from_address: String,
    pub to: String,
    pub reply_to: String,
    pub subject: String,
    pub text: String,
    pub html: String,
}

impl ContactEmail {
    /// Addresses the submission from the relay account to `contact_to` (or the relay account
    /// itself), replying to the visitor.
    pub fn compose(msg: &ContactMessage, config: &ContactConfig) -> Result<Self, RelayError> {
        if !msg.is_complete() {
            return Err(RelayError::Incomplete);
        }
        let user = config
            .smtp_user
            .as_deref()
            .map(str::trim)
            .filter(|u| !u.is_empty())
            .ok_or(RelayError::NotConfigured)?;
        let to = config
            .contact_to
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .unwrap_or(user);

        let name = msg.name.trim();
        let email = msg.email.trim();
        let subject = msg.subject.trim();
        let body = msg.message.trim().replace("\r\n", "\n");

        let html = format!(
            "<p><strong>Name:</strong> {}</p>\n<p><strong>Email:</strong> {}</p>\n<p><strong>Subject:</strong> {}</p>\n<p><strong>Message:</strong></p>\n<p>{}</p>",
            escape_html(name),
            escape_html(email),
            escape_html(subject),
            escape_html(&body).replace('\n', "<br/>")
        );

        Ok(Self {
            from_name: CONTACT_FROM_NAME.to_string(),
            from_address: user.to_string(),
            to: to.to_string(),
            reply_to: email.to_string(),
            subject: format!("{} {}", SUBJECT_PREFIX, subject),
            text: format!("New message from {} <{}>:\n\n{}", name, email, body),
            html,
        })
    }

    /// Multipart (plain + HTML) message ready for any lettre transport.
    pub fn to_message(&self) -> Result<Message, RelayError> {
        let parse = |field: &'static str, raw: &str| {
            raw.parse::<lettre::Address>()
                .map_err(|source| RelayError::InvalidAddress { field, source })
        };
        let from = Mailbox::new(Some(self.from_name.clone()), parse("from", &self.from_address)?);
        let to = Mailbox::new(None, parse("to", &self.to)?);
        let reply_to = Mailbox::new(None, parse("reply-to", &self.reply_to)?);

        let message = Message::builder()
            .from(from)
            .reply_to(reply_to)
            .to(to)
            .subject(self.subject.clone())
            .multipart(MultiPart::alternative_plain_html(
                self.text.clone(),
                self.html.clone(),
            ))?;
        Ok(message)
    }
}

fn escape_html(raw: &str) -> String {
    html_escape::encode_quoted_attribute(raw).into_owned()
}

/// Delivery seam; the gateway holds one behind an `Arc`.
#[async_trait]
pub trait MailTransport: Send + Sync {
    async fn deliver(&self, email: &ContactEmail) -> Result<(), RelayError>;
}

/// lettre async SMTP transport. Port 465 uses implicit TLS, any other port STARTTLS.
pub struct SmtpRelay {
    transport: AsyncSmtpTransport<Tokio1Executor>,
}

impl SmtpRelay {
    pub fn from_config(config: &ContactConfig) -> Result<Self, RelayError> {
        if !config.is_configured() {
            return Err(RelayError::NotConfigured);
        }
        let host = config
            .smtp_host
            .as_deref()
            .map(str::trim)
            .ok_or(RelayError::NotConfigured)?;
        let builder = if config.implicit_tls() {
            AsyncSmtpTransport::<Tokio1Executor>::relay(host)?
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(host)?
        };
        let mut builder = builder.port(config.smtp_port);
        if let (Some(user), Some(pass)) = (config.smtp_user.as_deref(), config.smtp_pass.as_deref()) {
            builder = builder.credentials(Credentials::new(user.trim().to_string(), pass.to_string()));
        }
        Ok(Self {
            transport: builder.build(),
        })
    }
}

#[async_trait]
impl MailTransport for SmtpRelay {
    async fn deliver(&self, email: &ContactEmail) -> Result<(), RelayError> {
        let message = email.to_message()?;
        let response = self.transport.send(message).await?;
        tracing::info!(
            target: "folio::contact",
            code = %response.code(),
            to = %email.to,
            "Contact message relayed"
        );
        Ok(())
    }
}
