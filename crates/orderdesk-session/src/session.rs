//! # Session
//!
//! The session object: one operator, one form, one ledger.
//!
//! ## The Review/Commit State Machine
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Session State Machine                                │
//! │                                                                         │
//! │             submit_for_review()                                         │
//! │   ┌─────────┐ ──(validation ok)──► ┌───────────┐                        │
//! │   │ Editing │                      │ Reviewing │                        │
//! │   │         │ ◄──(validation err)─ │ (frozen   │                        │
//! │   └─────────┘                      │ snapshot) │                        │
//! │     ▲    ▲                         └─────┬─────┘                        │
//! │     │    │                               │                              │
//! │     │    └── cancel_review() ────────────┤                              │
//! │     │        (snapshot discarded,        │                              │
//! │     │         cart + slip reset)         │                              │
//! │     │                                    │                              │
//! │     └────── commit_order() ──────────────┘                              │
//! │             (order appended, cart + slip reset)                         │
//! │                                                                         │
//! │  FREEZING: the snapshot is captured AT the transition into Reviewing    │
//! │  and is the only thing commit_order() reads. Cart edits are refused     │
//! │  while reviewing; there is no cart-preserving return from review -      │
//! │  cancel and reset both clear the form along with the snapshot.          │
//! │                                                                         │
//! │  CONCURRENCY: transitions are synchronous and atomic - no suspension    │
//! │  point exists between validation, freeze, commit and reset.             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::Utc;
use serde::Serialize;
use tracing::{debug, info};

use orderdesk_core::export::{export_csv, export_file_name, CSV_MIME};
use orderdesk_core::pricing::Totals;
use orderdesk_core::validation::validate_for_review;
use orderdesk_core::{
    Cart, Catalog, CustomerField, CustomerInfo, LineItem, LineItemId, Money, Order, OrderLedger,
    OrderNumbers, ProductId,
};

use crate::attachment::{AttachmentSlot, AttachmentView, Generation};
use crate::error::ApiError;

// =============================================================================
// Phase
// =============================================================================

/// Where the session is in the order lifecycle.
#[derive(Debug)]
enum Phase {
    /// Cart and customer info are mutable.
    Editing,
    /// A frozen snapshot awaits commit or cancellation.
    Reviewing(ReviewSnapshot),
}

impl Phase {
    fn name(&self) -> &'static str {
        match self {
            Phase::Editing => "editing",
            Phase::Reviewing(_) => "reviewing an order",
        }
    }
}

/// Read-only copy of the cart captured at the moment of the
/// Editing → Reviewing transition. Everything commit reads comes from
/// here, never from live cart state.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewSnapshot {
    pub customer: CustomerInfo,
    pub items: Vec<LineItem>,
    pub totals: Totals,
}

// =============================================================================
// Responses
// =============================================================================

/// What the presentation layer gets back from a successful commit.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommitReceipt {
    pub order_number: String,
    pub total: Money,
    pub item_count: usize,
    pub order_count: usize,
}

/// A rendered CSV document plus the metadata needed to offer it as a
/// download. The session builds the text; writing it anywhere is the
/// collaborator's job.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CsvExport {
    pub file_name: String,
    pub mime: String,
    pub content: String,
}

/// Full read-only projection of the session for rendering.
///
/// While reviewing, `totals` comes from the frozen snapshot, not from a
/// live re-derivation over the cart.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionView {
    pub phase: String,
    pub customer: CustomerInfo,
    pub items: Vec<LineItem>,
    pub totals: Totals,
    pub review: Option<ReviewSnapshot>,
    pub attachment: AttachmentView,
    pub order_count: usize,
}

// =============================================================================
// Session
// =============================================================================

/// One sales session: the editable cart, the attachment slot, the phase,
/// and the ledger of everything committed so far.
///
/// Created at session start, discarded at session end; nothing here
/// survives a process restart.
#[derive(Debug)]
pub struct Session {
    catalog: Catalog,
    cart: Cart,
    attachment: AttachmentSlot,
    order_numbers: OrderNumbers,
    ledger: OrderLedger,
    phase: Phase,
}

impl Session {
    /// Starts a fresh session over the given catalog.
    pub fn new(catalog: Catalog) -> Self {
        Session {
            catalog,
            cart: Cart::new(),
            attachment: AttachmentSlot::new(),
            order_numbers: OrderNumbers::new(),
            ledger: OrderLedger::new(),
            phase: Phase::Editing,
        }
    }

    /// The catalog the form's product dropdown is populated from.
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    fn require_editing(&self, operation: &str) -> Result<(), ApiError> {
        match self.phase {
            Phase::Editing => Ok(()),
            Phase::Reviewing(_) => Err(ApiError::invalid_phase(operation, self.phase.name())),
        }
    }

    // -------------------------------------------------------------------------
    // Editing operations (refused while reviewing)
    // -------------------------------------------------------------------------

    /// Appends a new empty row.
    pub fn add_line_item(&mut self) -> Result<LineItemId, ApiError> {
        self.require_editing("add_line_item")?;
        let id = self.cart.add_line_item();
        debug!(rows = self.cart.len(), "line item added");
        Ok(id)
    }

    /// Removes a row; the last remaining row and unknown ids are no-ops.
    pub fn remove_line_item(&mut self, id: LineItemId) -> Result<bool, ApiError> {
        self.require_editing("remove_line_item")?;
        let removed = self.cart.remove_line_item(id);
        debug!(removed, rows = self.cart.len(), "remove_line_item");
        Ok(removed)
    }

    /// Resolves (or clears) a product selection on a row.
    pub fn set_line_item_product(
        &mut self,
        id: LineItemId,
        product: Option<ProductId>,
    ) -> Result<bool, ApiError> {
        self.require_editing("set_line_item_product")?;
        let touched = self.cart.set_line_item_product(id, product, &self.catalog);
        debug!(touched, ?product, "set_line_item_product");
        Ok(touched)
    }

    /// Sets a row quantity (clamped to >= 1 by the cart).
    pub fn set_line_item_quantity(
        &mut self,
        id: LineItemId,
        quantity: i64,
    ) -> Result<bool, ApiError> {
        self.require_editing("set_line_item_quantity")?;
        let touched = self.cart.set_line_item_quantity(id, quantity);
        debug!(touched, quantity, "set_line_item_quantity");
        Ok(touched)
    }

    /// Writes one customer field.
    pub fn set_customer_field(
        &mut self,
        field: CustomerField,
        value: impl Into<String>,
    ) -> Result<(), ApiError> {
        self.require_editing("set_customer_field")?;
        self.cart.set_customer_field(field, value);
        debug!(?field, "set_customer_field");
        Ok(())
    }

    /// Records an attached payment slip; returns the generation tag any
    /// preview read must carry.
    pub fn attach_slip(&mut self, name: impl Into<String>) -> Result<Generation, ApiError> {
        self.require_editing("attach_slip")?;
        let generation = self.attachment.attach(name);
        debug!("slip attached");
        Ok(generation)
    }

    /// Removes the attached slip, invalidating in-flight preview reads.
    pub fn clear_slip(&mut self) -> Result<(), ApiError> {
        self.require_editing("clear_slip")?;
        self.attachment.clear();
        debug!("slip cleared");
        Ok(())
    }

    /// Applies a completed preview read. Not phase-guarded: a stale
    /// delivery is decided by generation, and dropping it is normal.
    pub fn deliver_slip_preview(&mut self, generation: Generation, bytes: Vec<u8>) -> bool {
        let applied = self.attachment.deliver_preview(generation, bytes);
        debug!(applied, "slip preview delivered");
        applied
    }

    // -------------------------------------------------------------------------
    // Transitions
    // -------------------------------------------------------------------------

    /// Editing → Reviewing, gated by validation.
    ///
    /// On success the current customer info, rows and totals are frozen
    /// into a snapshot; on failure the session stays in Editing with the
    /// specific refusal surfaced.
    pub fn submit_for_review(&mut self) -> Result<&ReviewSnapshot, ApiError> {
        self.require_editing("submit_for_review")?;
        validate_for_review(&self.cart)?;

        let snapshot = ReviewSnapshot {
            customer: self.cart.customer().clone(),
            items: self.cart.items().to_vec(),
            totals: Totals::for_items(self.cart.items()),
        };
        debug!(total = %snapshot.totals.total, "entering review");
        self.phase = Phase::Reviewing(snapshot);
        match &self.phase {
            Phase::Reviewing(snapshot) => Ok(snapshot),
            Phase::Editing => unreachable!("phase was just set to Reviewing"),
        }
    }

    /// Reviewing → (Committed) → Editing.
    ///
    /// Builds an order from the frozen snapshot plus the attachment
    /// metadata, appends it to the ledger, then resets the form. Cannot
    /// fail once Reviewing was reached: validation already passed.
    pub fn commit_order(&mut self) -> Result<CommitReceipt, ApiError> {
        let snapshot = match std::mem::replace(&mut self.phase, Phase::Editing) {
            Phase::Reviewing(snapshot) => snapshot,
            Phase::Editing => {
                return Err(ApiError::invalid_phase("commit_order", "editing"));
            }
        };

        let order = Order::from_review(
            self.order_numbers.issue(),
            Utc::now(),
            snapshot.customer,
            &snapshot.items,
            self.attachment.file_name().map(str::to_string),
        );
        let receipt = CommitReceipt {
            order_number: order.order_number.clone(),
            total: order.totals.total,
            item_count: order.items.len(),
            order_count: self.ledger.count() + 1,
        };
        self.ledger.append(order);

        self.cart.reset();
        self.attachment.clear();

        info!(
            order_number = %receipt.order_number,
            total = %receipt.total,
            orders = receipt.order_count,
            "order committed"
        );
        Ok(receipt)
    }

    /// Discards the review snapshot without committing.
    ///
    /// There is no cart-preserving return from review: cancelling is a
    /// full reset, back to Editing with a cleared cart and slip. The
    /// ledger is untouched.
    pub fn cancel_review(&mut self) {
        if matches!(self.phase, Phase::Reviewing(_)) {
            debug!("review cancelled, snapshot discarded");
        }
        self.reset_form();
    }

    /// Full form reset: cleared cart, cleared slip, back to Editing.
    /// The ledger is untouched; it only grows within a session.
    pub fn reset_form(&mut self) {
        self.cart.reset();
        self.attachment.clear();
        self.phase = Phase::Editing;
        debug!("form reset");
    }

    // -------------------------------------------------------------------------
    // Export & projections
    // -------------------------------------------------------------------------

    /// Renders the ledger as a CSV download. Allowed in any phase.
    pub fn export_ledger(&self) -> Result<CsvExport, ApiError> {
        let content = export_csv(&self.ledger)?;
        let export = CsvExport {
            file_name: export_file_name(Utc::now()),
            mime: CSV_MIME.to_string(),
            content,
        };
        info!(orders = self.ledger.count(), file = %export.file_name, "ledger exported");
        Ok(export)
    }

    /// All committed orders, oldest first.
    pub fn orders(&self) -> &[Order] {
        self.ledger.all()
    }

    /// Read-only projection for rendering.
    pub fn view(&self) -> SessionView {
        let (phase, totals, review) = match &self.phase {
            Phase::Editing => (
                "editing".to_string(),
                Totals::for_items(self.cart.items()),
                None,
            ),
            Phase::Reviewing(snapshot) => (
                "reviewing".to_string(),
                snapshot.totals,
                Some(snapshot.clone()),
            ),
        };
        SessionView {
            phase,
            customer: self.cart.customer().clone(),
            items: self.cart.items().to_vec(),
            totals,
            review,
            attachment: self.attachment.view(),
            order_count: self.ledger.count(),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
