// File: src/submit.rs
// Purpose: Sending the Field Store to the remote endpoint

use async_trait::async_trait;
use onboard_validation::FormFields;
use reqwest::Client;
use serde_json::Value as JsonValue;
use std::sync::Arc;
use thiserror::Error;
use tracing::warn;

/// Endpoint the form posts to unless configured otherwise
pub const DEFAULT_ENDPOINT: &str = "https://reqres.in/api/users";

/// Acknowledged submission
#[derive(Debug, Clone, PartialEq)]
pub struct SubmitReceipt {
    pub status: u16,
    /// Response body as returned, `Null` when empty, unreadable or not JSON
    pub body: JsonValue,
}

#[derive(Debug, Error)]
pub enum SubmissionError {
    #[error("submission request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("endpoint rejected submission with status {status}")]
    Rejected { status: u16 },
}

/// Something that accepts a completed form
#[async_trait]
pub trait Submitter: Send + Sync {
    async fn submit(&self, fields: &FormFields) -> Result<SubmitReceipt, SubmissionError>;
}

#[async_trait]
impl<T: Submitter + ?Sized> Submitter for Arc<T> {
    async fn submit(&self, fields: &FormFields) -> Result<SubmitReceipt, SubmissionError> {
        (**self).submit(fields).await
    }
}

/// POSTs the fields as JSON. No auth, no retry, no timeout; any 2xx is success.
#[derive(Debug, Clone)]
pub struct HttpSubmitter {
    http: Client,
    endpoint: String,
}

impl HttpSubmitter {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            endpoint: endpoint.into(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl Default for HttpSubmitter {
    fn default() -> Self {
        Self::new(DEFAULT_ENDPOINT)
    }
}

#[async_trait]
impl Submitter for HttpSubmitter {
    async fn submit(&self, fields: &FormFields) -> Result<SubmitReceipt, SubmissionError> {
        let response = self.http.post(&self.endpoint).json(fields).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(SubmissionError::Rejected {
                status: status.as_u16(),
            });
        }

        // The status alone decides success; an unreadable body is just `Null`
        let body = match response.text().await {
            Ok(text) => serde_json::from_str(&text).unwrap_or(JsonValue::Null),
            Err(e) => {
                warn!(error = %e, "submission response body unreadable");
                JsonValue::Null
            }
        };

        Ok(SubmitReceipt {
            status: status.as_u16(),
            body,
        })
    }
}
