//! # Error Types
//!
//! Domain-specific error types for orderdesk-core.
//!
//! ## Error Taxonomy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  SubmitError   - blocks the Editing → Reviewing transition              │
//! │  ExportError   - blocks a CSV export                                    │
//! │                                                                         │
//! │  Every error in this core is a validation gate: it refuses a            │
//! │  transition and leaves all prior state untouched. There are no          │
//! │  fatal or unrecoverable errors here.                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Errors are enum variants, never String
//! 3. Each variant maps to one targeted user-facing message

use thiserror::Error;

/// Reasons the review transition can be refused.
///
/// Each variant is surfaced as a specific, non-fatal message; the operator
/// stays in the editing state with nothing lost.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SubmitError {
    /// Customer name or phone is missing.
    #[error("customer name and phone number are required")]
    MissingCustomerInfo,

    /// At least one row has no resolved product.
    #[error("every line item must have a product selected")]
    IncompleteLineItems,
}

/// Reasons a CSV export can be refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ExportError {
    /// Nothing has been committed yet; exporting would produce a file
    /// with only a header row, which is signaled instead of silently
    /// offered for download.
    #[error("no orders have been saved yet")]
    EmptyLedger,
}
