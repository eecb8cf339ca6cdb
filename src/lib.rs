#![doc(test(attr(deny(warnings))))]

//! Bookly ties the booking reconciliation services to an interactive shell:
//! snapshots are loaded from disk, and statuses, balances, ledgers, and
//! profit-and-loss reports are derived on every command.

pub mod cli;
pub mod errors;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Bookly tracing initialized.");
    });
}
