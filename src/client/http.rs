//! HTTP order submitter

use crate::config::FormConfig;
use crate::core::draft::OrderPayload;
use crate::core::error::SubmissionError;
use crate::core::service::OrderSubmitter;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;

/// Body the order endpoint answers with, on success and on failure
#[derive(Debug, Deserialize)]
struct OrderResponse {
    message: String,
}

/// Sends orders to the order endpoint with a single JSON POST
///
/// No retry and no timeout: a failure is whatever the transport or the
/// endpoint reports.
#[derive(Debug, Clone)]
pub struct HttpOrderSubmitter {
    client: Client,
    endpoint: String,
}

impl HttpOrderSubmitter {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self::with_client(Client::new(), endpoint)
    }

    /// Use a preconfigured client (proxies, TLS roots, ...)
    pub fn with_client(client: Client, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
        }
    }

    pub fn from_config(config: &FormConfig) -> Self {
        Self::new(config.endpoint.clone())
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Message for a success answer: the body's `message`, else empty
    ///
    /// The status alone decides that the order was accepted.
    fn accepted_message(body: &str) -> String {
        serde_json::from_str::<OrderResponse>(body)
            .map(|response| response.message)
            .unwrap_or_default()
    }

    /// Message for a non-success answer: the body's `message`, else the raw
    /// body, else the status reason
    fn rejection_message(status: StatusCode, body: &str) -> String {
        if let Ok(response) = serde_json::from_str::<OrderResponse>(body) {
            if !response.message.is_empty() {
                return response.message;
            }
        }

        let body = body.trim();
        if !body.is_empty() {
            return body.to_string();
        }

        status
            .canonical_reason()
            .unwrap_or("Order request failed")
            .to_string()
    }
}

#[async_trait]
impl OrderSubmitter for HttpOrderSubmitter {
    async fn submit(&self, order: &OrderPayload) -> Result<String, SubmissionError> {
        tracing::debug!(endpoint = %self.endpoint, size = %order.size, toppings = order.toppings.len(), "Sending order");

        let response = self.client.post(&self.endpoint).json(order).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(SubmissionError::Rejected {
                status: status.as_u16(),
                message: Self::rejection_message(status, &body),
            });
        }

        Ok(Self::accepted_message(&body))
    }
}
