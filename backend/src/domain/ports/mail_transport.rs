//! Driven port for mail delivery.
//!
//! Composition lives in [`crate::domain::mailers`]; this port only hands a
//! finished message to whatever transport is wired in. No retry or queueing
//! at this layer.

use async_trait::async_trait;

use crate::domain::mailers::Message;

/// Failures handing a message to the transport.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MailTransportError {
    #[error("mail transport unavailable: {message}")]
    Unavailable { message: String },
}

/// Deliver composed messages.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MailTransport: Send + Sync {
    /// Hand one message to the transport.
    async fn deliver(&self, message: &Message) -> Result<(), MailTransportError>;
}
