// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for transport events.

use crate::observability::messages::StructuredLog;
use std::fmt::{Display, Formatter};
use tracing::Span;

/// A component connected to the transport.
///
/// # Log Level
/// `debug!` - Connections are counted per component
pub struct TransportConnected {
    pub transport: &'static str,
    pub connections: usize,
}

impl Display for TransportConnected {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Connected to {} transport ({} active connections)",
            self.transport, self.connections
        )
    }
}

impl StructuredLog for TransportConnected {
    fn log(&self) {
        tracing::debug!(
            transport = self.transport,
            connections = self.connections,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!(
            "transport_connected",
            span_name = name,
            transport = self.transport,
            connections = self.connections,
        )
    }
}

/// A component released its connection.
///
/// # Log Level
/// `debug!`
pub struct TransportClosed {
    pub transport: &'static str,
    pub connections: usize,
}

impl Display for TransportClosed {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Closed {} transport connection ({} remaining)",
            self.transport, self.connections
        )
    }
}

impl StructuredLog for TransportClosed {
    fn log(&self) {
        tracing::debug!(
            transport = self.transport,
            connections = self.connections,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!(
            "transport_closed",
            span_name = name,
            transport = self.transport,
            connections = self.connections,
        )
    }
}

/// # Log Level
/// `trace!` - One per message
pub struct MessagePublished<'a> {
    pub channel: &'a str,
    pub sequence: u64,
}

impl Display for MessagePublished<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Published message #{} on '{}'", self.sequence, self.channel)
    }
}

impl StructuredLog for MessagePublished<'_> {
    fn log(&self) {
        tracing::trace!(channel = self.channel, sequence = self.sequence, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::trace_span!(
            "message_published",
            span_name = name,
            channel = self.channel,
            sequence = self.sequence,
        )
    }
}

/// # Log Level
/// `trace!` - One per message
pub struct MessageDelivered<'a> {
    pub channel: &'a str,
    pub pattern: &'a str,
}

impl Display for MessageDelivered<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Delivered message from '{}' to subscription '{}'",
            self.channel, self.pattern
        )
    }
}

impl StructuredLog for MessageDelivered<'_> {
    fn log(&self) {
        tracing::trace!(channel = self.channel, pattern = self.pattern, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::trace_span!(
            "message_delivered",
            span_name = name,
            channel = self.channel,
            pattern = self.pattern,
        )
    }
}
