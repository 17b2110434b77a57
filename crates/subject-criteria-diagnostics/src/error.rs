//! Criteria error types

use crate::{
    ErrorCode, ExecutionError, SCQ0001, SCQ0002, SCQ0003, SCQ0004, SCQ0005, SCQ0006, SCQ0100,
    SCQ0200, SCQ0400, SCQ0401,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Diagnostic severity level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Severity {
    /// Error - the assertion cannot proceed
    Error,
    /// Warning - the assertion proceeded but something looks off
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

/// A diagnostic message with optional help
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Diagnostic {
    /// Severity level
    pub severity: Severity,
    /// Error code
    pub code: ErrorCode,
    /// Human-readable message
    pub message: String,
    /// Additional context or help
    pub help: Option<String>,
}

impl Diagnostic {
    /// Create a new error diagnostic
    pub fn error(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            code,
            message: message.into(),
            help: None,
        }
    }

    /// Create a new warning diagnostic
    pub fn warning(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            code,
            message: message.into(),
            help: None,
        }
    }

    /// Set help text
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }

    /// Render with terminal colors
    #[cfg(feature = "colored")]
    pub fn to_colored_string(&self) -> String {
        use colored::Colorize;

        let severity = match self.severity {
            Severity::Error => "error".red().bold(),
            Severity::Warning => "warning".yellow().bold(),
        };
        let mut out = format!("{}[{}]: {}", severity, self.code.to_string().bold(), self.message);
        if let Some(help) = &self.help {
            out.push_str(&format!("\n  {} {}", "help:".cyan(), help));
        }
        out
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} - {}", self.severity, self.code, self.message)?;
        if let Some(help) = &self.help {
            write!(f, " ({})", help)?;
        }
        Ok(())
    }
}

/// Main criteria error type
#[derive(Debug, Clone, Error)]
pub enum CriteriaError {
    /// Criterion key does not match any catalog alias
    #[error("unknown field '{field}'")]
    UnknownField {
        field: String,
        suggestion: Option<String>,
    },

    /// Two criterion keys normalize to the same canonical field
    #[error("fields '{first}' and '{second}' both resolve to {field}")]
    DuplicateField {
        field: String,
        first: String,
        second: String,
    },

    /// Parsed expression kind is not accepted by the field
    #[error("{field} does not accept {kind} expression '{token}'")]
    UnsupportedExpression {
        field: String,
        token: String,
        kind: String,
    },

    /// Literal cannot be bound for the field's value type
    #[error("invalid value '{token}' for {field}: {reason}")]
    InvalidLiteral {
        field: String,
        token: String,
        reason: String,
    },

    /// Anchor text or status literal is not a known event status
    #[error("unknown event status '{status}' in {field}")]
    UnknownEventStatus { field: String, status: String },

    /// Criteria name an NHS number other than the one being verified
    #[error("criteria NHS number '{found}' conflicts with verified subject '{expected}'")]
    ConflictingNhsNumber { expected: String, found: String },

    /// Isolated compilation requested for a field without a predicate
    #[error("{field} has no predicate to isolate")]
    NothingToIsolate { field: String },

    /// NHS number does not resolve to any subject row
    #[error("no screening subject with NHS number '{nhs_number}'")]
    SubjectNotFound { nhs_number: String },

    /// Propagated unchanged from the query executor
    #[error("query execution failed: {0}")]
    QueryExecution(#[from] ExecutionError),

    /// Field catalog failed its load-time self-check
    #[error("field catalog integrity: {message}")]
    Catalog { message: String },

    /// Invalid configuration
    #[error("configuration: {message}")]
    Config { message: String },
}

impl CriteriaError {
    /// Create an unknown field error
    pub fn unknown_field(field: impl Into<String>, suggestion: Option<String>) -> Self {
        Self::UnknownField {
            field: field.into(),
            suggestion,
        }
    }

    /// Create a duplicate field error
    pub fn duplicate_field(
        field: impl Into<String>,
        first: impl Into<String>,
        second: impl Into<String>,
    ) -> Self {
        Self::DuplicateField {
            field: field.into(),
            first: first.into(),
            second: second.into(),
        }
    }

    /// Create an unsupported expression error
    pub fn unsupported_expression(
        field: impl Into<String>,
        token: impl Into<String>,
        kind: impl Into<String>,
    ) -> Self {
        Self::UnsupportedExpression {
            field: field.into(),
            token: token.into(),
            kind: kind.into(),
        }
    }

    /// Create an invalid literal error
    pub fn invalid_literal(
        field: impl Into<String>,
        token: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidLiteral {
            field: field.into(),
            token: token.into(),
            reason: reason.into(),
        }
    }

    /// Create an unknown event status error
    pub fn unknown_event_status(field: impl Into<String>, status: impl Into<String>) -> Self {
        Self::UnknownEventStatus {
            field: field.into(),
            status: status.into(),
        }
    }

    /// Create a conflicting NHS number error
    pub fn conflicting_nhs_number(expected: impl Into<String>, found: impl Into<String>) -> Self {
        Self::ConflictingNhsNumber {
            expected: expected.into(),
            found: found.into(),
        }
    }

    /// Create a nothing-to-isolate error
    pub fn nothing_to_isolate(field: impl Into<String>) -> Self {
        Self::NothingToIsolate {
            field: field.into(),
        }
    }

    /// Create a subject not found error
    pub fn subject_not_found(nhs_number: impl Into<String>) -> Self {
        Self::SubjectNotFound {
            nhs_number: nhs_number.into(),
        }
    }

    /// Create a catalog integrity error
    pub fn catalog(message: impl Into<String>) -> Self {
        Self::Catalog {
            message: message.into(),
        }
    }

    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Get the error code
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::UnknownField { .. } => SCQ0001,
            Self::DuplicateField { .. } => SCQ0002,
            Self::UnsupportedExpression { .. } => SCQ0003,
            Self::InvalidLiteral { .. } => SCQ0004,
            Self::UnknownEventStatus { .. } => SCQ0005,
            Self::ConflictingNhsNumber { .. } => SCQ0006,
            Self::NothingToIsolate { .. } => SCQ0100,
            Self::SubjectNotFound { .. } => SCQ0200,
            Self::QueryExecution(err) => err.kind.code(),
            Self::Catalog { .. } => SCQ0400,
            Self::Config { .. } => SCQ0401,
        }
    }

    /// Check whether the executor reported a timeout
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::QueryExecution(err) if err.is_timeout())
    }

    /// Convert to a diagnostic
    pub fn to_diagnostic(&self) -> Diagnostic {
        let code = self.code();
        let diag = Diagnostic::error(code, self.to_string());
        match self {
            Self::UnknownField {
                suggestion: Some(suggestion),
                ..
            } => diag.with_help(format!("did you mean '{}'?", suggestion)),
            _ => match code.info().help {
                Some(help) => diag.with_help(help),
                None => diag,
            },
        }
    }
}
