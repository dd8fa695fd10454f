//! # OrderDesk CLI Entry Point
//!
//! A line-oriented stand-in for the visual order form.
//!
//! ## Application Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        OrderDesk CLI                                    │
//! │                                                                         │
//! │  stdin line ──► parse ──► SessionState operation ──► render result      │
//! │                                                                         │
//! │  main.rs ────► sets up logging, catalog, session state                  │
//! │  run_command ► one typed line = one session operation                   │
//! │  slip <path> ► spawns an async preview read; a late completion is       │
//! │                discarded by the generation check, never applied         │
//! │  export ─────► session renders the CSV text, the CLI writes the file    │
//! │                                                                         │
//! │  The session refuses invalid transitions with targeted errors; the      │
//! │  CLI just prints them and prompts again.                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Startup Sequence
//! 1. Initialize tracing (RUST_LOG controls verbosity)
//! 2. Build the stock catalog and a fresh session
//! 3. Read command lines until `quit`

use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use orderdesk_core::{Catalog, CustomerField, LineItemId, ProductId};
use orderdesk_session::attachment::read_preview;
use orderdesk_session::{ApiError, SessionState};

const HELP: &str = "\
commands:
  name <text>          set customer name
  phone <text>         set customer phone
  address <text>       set customer address
  add                  add an empty line item row
  rm <row>             remove a row (the last row stays)
  product <row> <id>   pick a catalog product for a row ('-' clears)
  qty <row> <n>        set a row quantity
  slip <path>          attach a payment slip file
  noslip               remove the attached slip
  catalog              list catalog products
  show                 dump the session projection as JSON
  review               submit for review
  commit               save the reviewed order and reset the form
  cancel               discard the review snapshot
  reset                full form reset (ledger kept)
  export [path]        export the ledger as CSV
  quit                 exit";

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let state = SessionState::new(Catalog::balanc_water());
    println!("OrderDesk - type 'help' for commands");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(err) => {
                eprintln!("input error: {err}");
                break;
            }
        };
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if line == "quit" || line == "exit" {
            break;
        }
        run_command(&state, line).await;
    }
}

/// Executes one typed line against the session.
async fn run_command(state: &SessionState, line: &str) {
    let (command, rest) = match line.split_once(' ') {
        Some((command, rest)) => (command, rest.trim()),
        None => (line, ""),
    };
    debug!(command, "operator input");

    let result = match command {
        "help" => {
            println!("{HELP}");
            Ok(())
        }
        "name" => state.with_session_mut(|s| s.set_customer_field(CustomerField::Name, rest)),
        "phone" => state.with_session_mut(|s| s.set_customer_field(CustomerField::Phone, rest)),
        "address" => state.with_session_mut(|s| s.set_customer_field(CustomerField::Address, rest)),
        "add" => state.with_session_mut(|s| s.add_line_item()).map(|_| {
            println!("row added");
        }),
        "rm" => remove_row(state, rest),
        "product" => set_product(state, rest),
        "qty" => set_quantity(state, rest),
        "slip" => attach_slip(state, rest).await,
        "noslip" => state.with_session_mut(|s| s.clear_slip()),
        "catalog" => {
            state.with_session(|s| {
                for product in s.catalog().all() {
                    println!("{}  {}  {}", product.id, product.name, product.unit_price);
                }
            });
            Ok(())
        }
        "show" => {
            let view = state.with_session(|s| s.view());
            match serde_json::to_string_pretty(&view) {
                Ok(json) => println!("{json}"),
                Err(err) => eprintln!("render error: {err}"),
            }
            Ok(())
        }
        "review" => state.with_session_mut(|s| {
            let totals = s.submit_for_review()?.totals;
            println!(
                "review: subtotal {}  shipping {}  total {}",
                totals.subtotal, totals.shipping, totals.total
            );
            Ok(())
        }),
        "commit" => state.with_session_mut(|s| {
            let receipt = s.commit_order()?;
            println!(
                "saved {} ({} items, {}) - {} order(s) in ledger",
                receipt.order_number, receipt.item_count, receipt.total, receipt.order_count
            );
            Ok(())
        }),
        "cancel" => {
            state.with_session_mut(|s| s.cancel_review());
            Ok(())
        }
        "reset" => {
            state.with_session_mut(|s| s.reset_form());
            Ok(())
        }
        "export" => export_ledger(state, rest).await,
        _ => {
            println!("unknown command '{command}' - type 'help'");
            Ok(())
        }
    };

    if let Err(err) = result {
        println!("error: {}", err.message);
    }
}

/// Resolves a 1-based row number from `show` output to a row id.
fn row_id(state: &SessionState, arg: &str) -> Option<LineItemId> {
    let row: usize = arg.parse().ok()?;
    let items = state.with_session(|s| s.view().items);
    items.get(row.checked_sub(1)?).map(|item| item.id)
}

fn remove_row(state: &SessionState, rest: &str) -> Result<(), ApiError> {
    match row_id(state, rest) {
        Some(id) => {
            let removed = state.with_session_mut(|s| s.remove_line_item(id))?;
            if !removed {
                println!("the last row always stays");
            }
            Ok(())
        }
        None => {
            println!("usage: rm <row>");
            Ok(())
        }
    }
}

fn set_product(state: &SessionState, rest: &str) -> Result<(), ApiError> {
    let mut args = rest.split_whitespace();
    let (Some(row), Some(product)) = (args.next(), args.next()) else {
        println!("usage: product <row> <id>");
        return Ok(());
    };
    let Some(id) = row_id(state, row) else {
        println!("no such row");
        return Ok(());
    };
    // '-' or anything unparseable counts as a cleared selection; an unknown
    // catalog id clears the row's fields inside the cart
    let product = product.parse::<u32>().ok().map(ProductId);
    state.with_session_mut(|s| s.set_line_item_product(id, product))?;
    Ok(())
}

fn set_quantity(state: &SessionState, rest: &str) -> Result<(), ApiError> {
    let mut args = rest.split_whitespace();
    let (Some(row), Some(quantity)) = (args.next(), args.next()) else {
        println!("usage: qty <row> <n>");
        return Ok(());
    };
    let Some(id) = row_id(state, row) else {
        println!("no such row");
        return Ok(());
    };
    // Unparseable input maps to 0; the cart clamps it up to 1
    let quantity = quantity.parse::<i64>().unwrap_or(0);
    state.with_session_mut(|s| s.set_line_item_quantity(id, quantity))?;
    Ok(())
}

/// Attaches a slip and kicks off the preview read in the background.
///
/// The generation tag makes the read safely ignorable: if the operator
/// clears or replaces the slip before the read finishes, the delivery is
/// discarded instead of overwriting newer state.
async fn attach_slip(state: &SessionState, rest: &str) -> Result<(), ApiError> {
    if rest.is_empty() {
        println!("usage: slip <path>");
        return Ok(());
    }
    let path = std::path::PathBuf::from(rest);
    let display_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| rest.to_string());

    let generation = state.with_session_mut(|s| s.attach_slip(display_name))?;

    let state = state.clone();
    tokio::spawn(async move {
        match read_preview(&path).await {
            Ok(bytes) => {
                let applied =
                    state.with_session_mut(|s| s.deliver_slip_preview(generation, bytes));
                if !applied {
                    debug!("stale slip preview discarded");
                }
            }
            Err(err) => eprintln!("could not read slip: {err}"),
        }
    });
    Ok(())
}

async fn export_ledger(state: &SessionState, rest: &str) -> Result<(), ApiError> {
    let export = state.with_session(|s| s.export_ledger())?;
    let path = if rest.is_empty() {
        export.file_name.clone()
    } else {
        rest.to_string()
    };
    match tokio::fs::write(&path, export.content.as_bytes()).await {
        Ok(()) => println!("exported to {path} ({})", export.mime),
        Err(err) => eprintln!("could not write {path}: {err}"),
    }
    Ok(())
}
