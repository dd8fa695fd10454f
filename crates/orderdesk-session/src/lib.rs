//! # orderdesk-session: The Stateful Session Layer
//!
//! Wraps the pure core in the one mutable object the system has: a
//! [`Session`] holding the editable cart, the attachment slot, the
//! Editing/Reviewing phase and the ledger of committed orders.
//!
//! The presentation layer never shares mutable fields with the core; it
//! calls transition operations and renders the read-only projections
//! ([`SessionView`], [`CommitReceipt`], [`CsvExport`]) it gets back.

// =============================================================================
// Module Declarations
// =============================================================================

pub mod attachment;
pub mod error;
pub mod session;
pub mod state;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use attachment::{AttachmentSlot, AttachmentView, Generation};
pub use error::{ApiError, ErrorCode};
pub use session::{CommitReceipt, CsvExport, ReviewSnapshot, Session, SessionView};
pub use state::SessionState;
