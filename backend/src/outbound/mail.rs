//! Mail transport adapters.
//!
//! Real delivery belongs to an external transport; these adapters either log
//! the hand-off (development default) or record messages for assertions.

use std::sync::Mutex;

use async_trait::async_trait;
use tracing::info;

use crate::domain::mailers::Message;
use crate::domain::ports::{MailTransport, MailTransportError};

/// Transport that logs each delivery instead of sending it.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingMailTransport;

#[async_trait]
impl MailTransport for TracingMailTransport {
    async fn deliver(&self, message: &Message) -> Result<(), MailTransportError> {
        info!(
            subject = message.subject(),
            recipients = message.recipients().len(),
            "mail handed to transport"
        );
        Ok(())
    }
}

/// Transport that collects delivered messages for test assertions.
#[derive(Debug, Default)]
pub struct RecordingMailTransport {
    delivered: Mutex<Vec<Message>>,
}

impl RecordingMailTransport {
    /// Create an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Messages delivered so far, in order.
    pub fn delivered(&self) -> Vec<Message> {
        self.delivered
            .lock()
            .map(|messages| messages.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl MailTransport for RecordingMailTransport {
    async fn deliver(&self, message: &Message) -> Result<(), MailTransportError> {
        let mut delivered =
            self.delivered
                .lock()
                .map_err(|_| MailTransportError::Unavailable {
                    message: "recorder lock poisoned".to_owned(),
                })?;
        delivered.push(message.clone());
        Ok(())
    }
}
