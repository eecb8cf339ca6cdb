//! bookly-core
//!
//! Booking reconciliation and period reporting services.
//! Depends on bookly-domain. No CLI, no terminal I/O, no direct storage interactions.

pub mod dashboard_service;
pub mod error;
pub mod format;
pub mod ledger_service;
pub mod pagination;
pub mod period_service;
pub mod reconciliation_service;
pub mod status_service;
pub mod storage;
pub mod time;

pub use dashboard_service::*;
pub use error::CoreError;
pub use format::*;
pub use ledger_service::*;
pub use pagination::*;
pub use period_service::*;
pub use reconciliation_service::*;
pub use status_service::*;
pub use time::Clock;

#[cfg(test)]
mod tests;
