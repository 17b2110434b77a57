//! Criteria error codes following a structured numbering system
//!
//! Error code ranges:
//! - SCQ0001-SCQ0099: Criteria errors (field names, expected-value expressions)
//! - SCQ0100-SCQ0199: Compilation errors (SQL generation)
//! - SCQ0200-SCQ0299: Assertion errors (subject resolution)
//! - SCQ0300-SCQ0399: Execution errors (query executor boundary)
//! - SCQ0400-SCQ0499: System errors (catalog integrity, configuration)

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::sync::LazyLock;

/// Error code identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ErrorCode(u16);

impl ErrorCode {
    /// Create a new error code
    pub const fn new(code: u16) -> Self {
        Self(code)
    }

    /// Get the numeric code
    pub const fn code(&self) -> u16 {
        self.0
    }

    /// Get error information for this code
    pub fn info(&self) -> &'static ErrorInfo {
        ERROR_INFO.get(&self.0).unwrap_or(&UNKNOWN_ERROR)
    }

    /// Check if this is a criteria error (0001-0099)
    pub const fn is_criteria_error(&self) -> bool {
        self.0 >= 1 && self.0 < 100
    }

    /// Check if this is a compilation error (0100-0199)
    pub const fn is_compile_error(&self) -> bool {
        self.0 >= 100 && self.0 < 200
    }

    /// Check if this is an assertion error (0200-0299)
    pub const fn is_assertion_error(&self) -> bool {
        self.0 >= 200 && self.0 < 300
    }

    /// Check if this is an execution error (0300-0399)
    pub const fn is_execution_error(&self) -> bool {
        self.0 >= 300 && self.0 < 400
    }

    /// Check if this is a system error (0400-0499)
    pub const fn is_system_error(&self) -> bool {
        self.0 >= 400 && self.0 < 500
    }

    /// Errors in the criteria and compilation ranges are raised before any
    /// query reaches the store.
    pub const fn is_pre_query(&self) -> bool {
        self.is_criteria_error() || self.is_compile_error()
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SCQ{:04}", self.0)
    }
}

/// Information about an error code
#[derive(Debug, Clone)]
pub struct ErrorInfo {
    /// Short description of the error
    pub description: &'static str,
    /// Detailed help text
    pub help: Option<&'static str>,
}

impl ErrorInfo {
    const fn new(description: &'static str) -> Self {
        Self {
            description,
            help: None,
        }
    }

    const fn with_help(mut self, help: &'static str) -> Self {
        self.help = Some(help);
        self
    }
}

static UNKNOWN_ERROR: ErrorInfo = ErrorInfo::new("Unknown error");

static ERROR_INFO: LazyLock<HashMap<u16, ErrorInfo>> = LazyLock::new(|| {
    let mut map = HashMap::new();

    // Criteria errors (0001-0099)
    map.insert(1, ErrorInfo::new("Unknown field")
        .with_help("Field names are matched case-insensitively against the field catalog"));
    map.insert(2, ErrorInfo::new("Duplicate field"));
    map.insert(3, ErrorInfo::new("Unsupported expression for field"));
    map.insert(4, ErrorInfo::new("Invalid literal value"));
    map.insert(5, ErrorInfo::new("Unknown event status"));
    map.insert(6, ErrorInfo::new("Conflicting NHS number"));

    // Compilation errors (0100-0199)
    map.insert(100, ErrorInfo::new("Nothing to isolate"));

    // Assertion errors (0200-0299)
    map.insert(200, ErrorInfo::new("Subject not found")
        .with_help("The NHS number does not resolve to any screening subject"));

    // Execution errors (0300-0399)
    map.insert(300, ErrorInfo::new("Query execution failed"));
    map.insert(301, ErrorInfo::new("Query timed out"));
    map.insert(302, ErrorInfo::new("Store unreachable"));
    map.insert(303, ErrorInfo::new("Statement rejected by store"));

    // System errors (0400-0499)
    map.insert(400, ErrorInfo::new("Catalog integrity violation"));
    map.insert(401, ErrorInfo::new("Configuration error"));

    map
});

// Criteria errors
pub const SCQ0001: ErrorCode = ErrorCode::new(1);
pub const SCQ0002: ErrorCode = ErrorCode::new(2);
pub const SCQ0003: ErrorCode = ErrorCode::new(3);
pub const SCQ0004: ErrorCode = ErrorCode::new(4);
pub const SCQ0005: ErrorCode = ErrorCode::new(5);
pub const SCQ0006: ErrorCode = ErrorCode::new(6);

// Compilation errors
pub const SCQ0100: ErrorCode = ErrorCode::new(100);

// Assertion errors
pub const SCQ0200: ErrorCode = ErrorCode::new(200);

// Execution errors
pub const SCQ0300: ErrorCode = ErrorCode::new(300);
pub const SCQ0301: ErrorCode = ErrorCode::new(301);
pub const SCQ0302: ErrorCode = ErrorCode::new(302);
pub const SCQ0303: ErrorCode = ErrorCode::new(303);

// System errors
pub const SCQ0400: ErrorCode = ErrorCode::new(400);
pub const SCQ0401: ErrorCode = ErrorCode::new(401);
