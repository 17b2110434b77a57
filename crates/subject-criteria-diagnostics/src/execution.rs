//! Query executor boundary errors

use crate::{ErrorCode, SCQ0300, SCQ0301, SCQ0302, SCQ0303};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Broad classification of an executor failure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExecutionErrorKind {
    /// The call-level timeout expired, or the store stayed busy past its limit
    Timeout,
    /// The store could not be reached or opened
    Connectivity,
    /// The store rejected the statement
    Statement,
    /// Anything the executor could not classify
    Other,
}

impl ExecutionErrorKind {
    /// Error code reported for this kind
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::Timeout => SCQ0301,
            Self::Connectivity => SCQ0302,
            Self::Statement => SCQ0303,
            Self::Other => SCQ0300,
        }
    }
}

impl fmt::Display for ExecutionErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Timeout => write!(f, "timeout"),
            Self::Connectivity => write!(f, "connectivity"),
            Self::Statement => write!(f, "statement"),
            Self::Other => write!(f, "other"),
        }
    }
}

/// Error raised by a query executor
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind} error: {message}")]
pub struct ExecutionError {
    /// Classification
    pub kind: ExecutionErrorKind,
    /// Message from the underlying store
    pub message: String,
}

impl ExecutionError {
    /// Create a new execution error
    pub fn new(kind: ExecutionErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// Create a timeout error
    pub fn timeout(message: impl Into<String>) -> Self {
        Self::new(ExecutionErrorKind::Timeout, message)
    }

    /// Create a connectivity error
    pub fn connectivity(message: impl Into<String>) -> Self {
        Self::new(ExecutionErrorKind::Connectivity, message)
    }

    /// Create a statement error
    pub fn statement(message: impl Into<String>) -> Self {
        Self::new(ExecutionErrorKind::Statement, message)
    }

    /// Check whether this is a timeout
    pub fn is_timeout(&self) -> bool {
        self.kind == ExecutionErrorKind::Timeout
    }
}
