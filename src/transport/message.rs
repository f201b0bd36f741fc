// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use serde_json::{Map, Value};
use std::fmt;

use crate::data::{Context, Payload, TypedData};

pub type Metadata = Map<String, Value>;

/// Acknowledgment callback attached by the transport at delivery time.
pub type AckFn = Box<dyn FnOnce() + Send>;

/// The unit exchanged over a transport.
pub struct Message {
    pub channel: String,
    pub data: TypedData,
    pub context: Context,
    pub metadata: Metadata,
    ack: Option<AckFn>,
}

impl Message {
    pub fn new(channel: impl Into<String>, data: TypedData, context: Context, metadata: Metadata) -> Self {
        Self {
            channel: channel.into(),
            data,
            context,
            metadata,
            ack: None,
        }
    }

    pub fn with_ack(mut self, ack: AckFn) -> Self {
        self.ack = Some(ack);
        self
    }

    /// Acknowledges delivery. Advisory and best-effort: calling it again, or on
    /// a message without a callback, does nothing.
    pub fn ack(&mut self) {
        if let Some(ack) = self.ack.take() {
            ack();
        }
    }

    pub fn is_acked(&self) -> bool {
        self.ack.is_none()
    }

    pub fn metadata_str(&self, key: &str) -> Option<&str> {
        self.metadata.get(key).and_then(Value::as_str)
    }

    pub fn payload(&self) -> Payload {
        Payload::new(self.data.clone(), self.context.clone())
    }
}

impl fmt::Debug for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Message")
            .field("channel", &self.channel)
            .field("data", &self.data)
            .field("context", &self.context)
            .field("metadata", &self.metadata)
            .field("acked", &self.is_acked())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[test]
    fn test_ack_runs_callback_once() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        let mut msg = Message::new("a.b", TypedData::empty(), Context::new(), Metadata::new())
            .with_ack(Box::new(move || {
                counter.fetch_add(1, Ordering::SeqCst);
            }));

        assert!(!msg.is_acked());
        msg.ack();
        msg.ack();
        assert!(msg.is_acked());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
