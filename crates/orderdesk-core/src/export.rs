//! # Export Module
//!
//! Serializes the order ledger into a CSV document.
//!
//! ## Wire Format (exact)
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  <BOM>OrderNumber,Date,CustomerName,Phone,Address,ItemsList,            │
//! │       Subtotal,Shipping,Total,SlipAttached,SlipFileName                 │
//! │  ORD-000001,05/01/2026 14:30:00,"Somchai",0812345678,"Bangkok",         │
//! │       "BALANC 600 ml x4",1200,0,1200,No,-                               │
//! │                                                                         │
//! │  • Leading UTF-8 byte-order mark: spreadsheet tools otherwise misread   │
//! │    non-ASCII customer names                                             │
//! │  • CustomerName, Address and ItemsList are double-quoted because they   │
//! │    may contain commas or the " | " item separator; numeric columns      │
//! │    are bare integers                                                    │
//! │  • ItemsList joins rows as "<name> x<qty>" separated by " | "           │
//! │  • SlipAttached is the literal Yes/No                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};

use crate::error::ExportError;
use crate::ledger::{Order, OrderLedger};

/// MIME type the collaborator should offer the download with.
pub const CSV_MIME: &str = "text/csv;charset=utf-8";

/// UTF-8 byte-order mark, prepended for spreadsheet compatibility.
const BOM: char = '\u{feff}';

const HEADER: &str = "OrderNumber,Date,CustomerName,Phone,Address,ItemsList,Subtotal,Shipping,Total,SlipAttached,SlipFileName";

/// Serializes the whole ledger.
///
/// ## Errors
/// `ExportError::EmptyLedger` when nothing has been committed yet; an
/// export with only a header row is refused, not silently produced.
pub fn export_csv(ledger: &OrderLedger) -> Result<String, ExportError> {
    if ledger.is_empty() {
        return Err(ExportError::EmptyLedger);
    }

    let mut csv = String::new();
    csv.push(BOM);
    csv.push_str(HEADER);
    csv.push('\n');
    for order in ledger.all() {
        csv.push_str(&order_row(order));
        csv.push('\n');
    }
    Ok(csv)
}

/// Download file name derived from the export timestamp.
pub fn export_file_name(at: DateTime<Utc>) -> String {
    format!("orders_{}.csv", at.timestamp_millis())
}

fn order_row(order: &Order) -> String {
    let items_list = order
        .items
        .iter()
        .map(|item| format!("{} x{}", item.name, item.quantity))
        .collect::<Vec<_>>()
        .join(" | ");

    format!(
        "{},{},{},{},{},{},{},{},{},{},{}",
        order.order_number,
        order.created_at.format("%d/%m/%Y %H:%M:%S"),
        quoted(&order.customer.name),
        order.customer.phone,
        quoted(&order.customer.address),
        quoted(&items_list),
        order.totals.subtotal.units(),
        order.totals.shipping.units(),
        order.totals.total.units(),
        if order.slip_attached { "Yes" } else { "No" },
        order.slip_file_name,
    )
}

/// Double-quotes a field, doubling any embedded quote characters.
fn quoted(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}

// =============================================================================
// Unit Tests
// =============================================================================
