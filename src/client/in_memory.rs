//! In-memory order submitter for testing and development

use crate::core::draft::OrderPayload;
use crate::core::error::SubmissionError;
use crate::core::service::OrderSubmitter;
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, RwLock};
use std::time::Duration;

/// Reply the in-memory submitter gives to one order
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptedReply {
    /// Accept the order with this message
    Accept(String),
    /// Reject the order as the endpoint would with a non-success status
    Reject { status: u16, message: String },
}

/// Records every submitted order and answers from a script
///
/// Once the script runs out every order is accepted with the default message.
/// Uses RwLock for thread-safe access.
#[derive(Debug, Clone)]
pub struct InMemoryOrderSubmitter {
    orders: Arc<RwLock<Vec<OrderPayload>>>,
    script: Arc<RwLock<VecDeque<ScriptedReply>>>,
    default_message: String,
    delay: Option<Duration>,
}

impl InMemoryOrderSubmitter {
    pub fn new() -> Self {
        Self {
            orders: Arc::new(RwLock::new(Vec::new())),
            script: Arc::new(RwLock::new(VecDeque::new())),
            default_message: "Order placed".to_string(),
            delay: None,
        }
    }

    /// Hold every reply for `delay` before answering
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Message used once the script is exhausted
    pub fn with_default_message(mut self, message: impl Into<String>) -> Self {
        self.default_message = message.into();
        self
    }

    /// Queue the reply for a future order
    pub fn push_reply(&self, reply: ScriptedReply) {
        self.script
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .push_back(reply);
    }

    /// Orders received so far, oldest first
    pub fn orders(&self) -> Vec<OrderPayload> {
        self.orders
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    pub fn order_count(&self) -> usize {
        self.orders.read().unwrap_or_else(|e| e.into_inner()).len()
    }
}

impl Default for InMemoryOrderSubmitter {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl OrderSubmitter for InMemoryOrderSubmitter {
    async fn submit(&self, order: &OrderPayload) -> Result<String, SubmissionError> {
        self.orders
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .push(order.clone());

        let reply = self
            .script
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .pop_front();

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        match reply {
            None => Ok(self.default_message.clone()),
            Some(ScriptedReply::Accept(message)) => Ok(message),
            Some(ScriptedReply::Reject { status, message }) => {
                Err(SubmissionError::Rejected { status, message })
            }
        }
    }
}
