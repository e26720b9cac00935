use std::io;
use std::sync::Arc;

use serde::Serialize;
use thiserror::Error;
use tracing::{info, warn};

mod form;
mod launcher;
mod mailto;
mod transport;

pub use form::{
    ContactForm, Field, FieldError, MIN_MESSAGE_CHARS, ValidationErrors, is_valid_email,
};
pub use launcher::{MailLauncher, SystemMailLauncher};
pub use mailto::{encode_component, mailto_uri};
pub use transport::{ContactTransport, HttpContactTransport};

#[derive(Debug, Error)]
pub enum ContactError {
    #[error("invalid contact form: {0}")]
    Invalid(ValidationErrors),
    #[error("contact endpoint responded with status {0}")]
    Status(u16),
    #[error("contact request failed")]
    Transport(#[from] reqwest::Error),
    #[error("failed to open mail client")]
    Launch(#[source] io::Error),
}

/// JSON body posted to the form endpoint.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ContactPayload {
    pub name: String,
    pub email: String,
    pub message: String,
    #[serde(rename = "_subject")]
    pub subject: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The endpoint accepted the message.
    Sent,
    /// No endpoint is configured; the mail client was asked to compose it.
    MailClientOpened { uri: String },
}

pub struct ContactSubmitter {
    owner_name: String,
    recipient: String,
    transport: Option<Arc<dyn ContactTransport>>,
    launcher: Arc<dyn MailLauncher>,
}

impl ContactSubmitter {
    pub fn new(
        owner_name: impl Into<String>,
        recipient: impl Into<String>,
        launcher: Arc<dyn MailLauncher>,
    ) -> Self {
        Self {
            owner_name: owner_name.into(),
            recipient: recipient.into(),
            transport: None,
            launcher,
        }
    }

    pub fn with_transport(mut self, transport: Arc<dyn ContactTransport>) -> Self {
        self.transport = Some(transport);
        self
    }

    pub fn has_endpoint(&self) -> bool {
        self.transport.is_some()
    }

    pub fn recipient(&self) -> &str {
        &self.recipient
    }

    pub fn subject(&self) -> String {
        format!("Contact from Resume Website - {}", self.owner_name)
    }

    pub fn payload(&self, form: &ContactForm) -> ContactPayload {
        ContactPayload {
            name: form.name.clone(),
            email: form.email.clone(),
            message: form.message.clone(),
            subject: self.subject(),
        }
    }

    /// The "prefer email" link: subject only, independent of any endpoint.
    pub fn mailto_link(&self) -> String {
        mailto_uri(&self.recipient, &self.subject(), None)
    }

    pub fn compose_uri(&self, form: &ContactForm) -> String {
        mailto_uri(&self.recipient, &self.subject(), Some(&form.mail_body()))
    }

    pub async fn submit(&self, form: &ContactForm) -> Result<SubmitOutcome, ContactError> {
        form.validate().map_err(ContactError::Invalid)?;

        match &self.transport {
            Some(transport) => {
                transport.send(&self.payload(form)).await?;
                info!("contact message delivered to endpoint");
                Ok(SubmitOutcome::Sent)
            }
            None => {
                let uri = self.compose_uri(form);
                self.launcher.open(&uri).map_err(|err| {
                    warn!(error = %err, "failed to launch mail client");
                    ContactError::Launch(err)
                })?;
                Ok(SubmitOutcome::MailClientOpened { uri })
            }
        }
    }
}
