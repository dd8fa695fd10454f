//! # API Error Type
//!
//! Unified error type at the session boundary.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                  Error Flow in OrderDesk                                │
//! │                                                                         │
//! │  Presentation layer            Session layer                            │
//! │  ──────────────────            ─────────────                            │
//! │                                                                         │
//! │  submit_for_review()                                                    │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  SubmitError::MissingCustomerInfo ──► ApiError ──► targeted message     │
//! │  SubmitError::IncompleteLineItems ──► ApiError ──► targeted message     │
//! │  ExportError::EmptyLedger ──────────► ApiError ──► targeted message     │
//! │  edit while Reviewing ──────────────► ApiError (INVALID_PHASE)          │
//! │                                                                         │
//! │  Every one of these is a refused transition, never a crash; the         │
//! │  operator's state is exactly as it was before the call.                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;

use orderdesk_core::{ExportError, SubmitError};

/// Error returned from session operations.
///
/// ## Serialization
/// This is what the presentation layer receives when an operation fails:
/// ```json
/// {
///   "code": "MISSING_CUSTOMER_INFO",
///   "message": "customer name and phone number are required"
/// }
/// ```
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes for session responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Customer name or phone missing; review refused
    MissingCustomerInfo,

    /// A line item has no resolved product; review refused
    IncompleteLineItems,

    /// Export requested on an empty ledger
    EmptyLedger,

    /// Operation not allowed in the current phase (e.g. editing the cart
    /// while a review snapshot is frozen)
    InvalidPhase,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    /// The operation is not valid in the session's current phase.
    pub fn invalid_phase(operation: &str, phase: &str) -> Self {
        ApiError::new(
            ErrorCode::InvalidPhase,
            format!("{operation} is not allowed while {phase}"),
        )
    }
}

impl From<SubmitError> for ApiError {
    fn from(err: SubmitError) -> Self {
        let code = match err {
            SubmitError::MissingCustomerInfo => ErrorCode::MissingCustomerInfo,
            SubmitError::IncompleteLineItems => ErrorCode::IncompleteLineItems,
        };
        ApiError::new(code, err.to_string())
    }
}

impl From<ExportError> for ApiError {
    fn from(err: ExportError) -> Self {
        match err {
            ExportError::EmptyLedger => ApiError::new(ErrorCode::EmptyLedger, err.to_string()),
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}
