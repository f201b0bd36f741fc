// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use thiserror::Error;

/// Errors that can occur during transport operations
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TransportError {
    /// The transport has no open connection
    #[error("transport is not connected: {0}")]
    NotConnected(String),

    /// A channel name or subscription pattern is not well formed
    #[error("invalid channel pattern '{pattern}': {reason}")]
    InvalidPattern { pattern: String, reason: String },

    /// Backend-specific error
    #[error("transport backend error: {0}")]
    Backend(String),
}

/// Result type for transport operations
pub type TransportResult<T> = Result<T, TransportError>;
