use async_trait::async_trait;
use tracing::{debug, warn};

use crate::{ContactError, ContactPayload};

/// Delivers a contact message to an external collaborator.
#[async_trait]
pub trait ContactTransport: Send + Sync {
    async fn send(&self, payload: &ContactPayload) -> Result<(), ContactError>;
}

/// Posts the payload as JSON to a form endpoint. Any 2xx status is success.
pub struct HttpContactTransport {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpContactTransport {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: endpoint.into(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl ContactTransport for HttpContactTransport {
    async fn send(&self, payload: &ContactPayload) -> Result<(), ContactError> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(payload)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            warn!(status = status.as_u16(), "contact endpoint rejected submission");
            return Err(ContactError::Status(status.as_u16()));
        }
        debug!(status = status.as_u16(), "contact submission accepted");
        Ok(())
    }
}
