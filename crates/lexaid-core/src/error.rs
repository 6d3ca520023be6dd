// SPDX-FileCopyrightText: 2026 Lexaid Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Lexaid intake workflow.

use thiserror::Error;

use crate::types::{Operation, View};

/// The primary error type used by the service trait, the HTTP client and the workflow controller.
#[derive(Debug, Error)]
pub enum LexaidError {
    /// Configuration errors (invalid base URL, bad header values).
    #[error("configuration error: {0}")]
    Config(String),

    /// Local validation failure. No request was sent.
    #[error("{0}")]
    Validation(String),

    /// A stage operation was invoked before the case has an issue id.
    #[error("no active case: {operation} requires a successful analysis first")]
    NoActiveCase { operation: Operation },

    /// Rejected by the loading gate: another operation is still in flight.
    #[error("{operation} rejected: another request is in flight")]
    Busy { operation: Operation },

    /// The response arrived after the case was reset and was discarded.
    #[error("{operation} response discarded: case was reset while the request was in flight")]
    Superseded { operation: Operation },

    /// Remote or transport failure talking to the legal service.
    #[error("service error: {message}")]
    Service {
        message: String,
        /// HTTP status when a response was received.
        status: Option<u16>,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Navigation to a view that is not enabled for the current case.
    #[error("view `{view}` is not available yet")]
    InvalidView { view: View },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl LexaidError {
    /// Builds a [`LexaidError::Service`] for a non-success HTTP status.
    pub fn status(status: u16, message: impl Into<String>) -> Self {
        LexaidError::Service {
            message: message.into(),
            status: Some(status),
            source: None,
        }
    }

    /// Builds a [`LexaidError::Service`] for a transport failure.
    pub fn transport(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        LexaidError::Service {
            message: message.into(),
            status: None,
            source: Some(Box::new(source)),
        }
    }

    /// True for failures detected before any request was issued.
    pub fn is_local(&self) -> bool {
        matches!(
            self,
            LexaidError::Validation(_)
                | LexaidError::NoActiveCase { .. }
                | LexaidError::Busy { .. }
                | LexaidError::InvalidView { .. }
        )
    }

    /// True for failures reported by the remote service or the transport.
    pub fn is_remote(&self) -> bool {
        matches!(self, LexaidError::Service { .. })
    }

    /// HTTP status of a remote failure, if one was received.
    pub fn http_status(&self) -> Option<u16> {
        match self {
            LexaidError::Service { status, .. } => *status,
            _ => None,
        }
    }
}
