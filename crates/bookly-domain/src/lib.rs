//! bookly-domain
//!
//! Pure domain models (Booking, Payment, Expense, vendor snapshots) and the
//! derived report types produced by the core services.
//! No I/O, no CLI, no storage. Only data types, windows, and boundary parsing.

pub mod booking;
pub mod common;
pub mod expense;
pub mod lenient;
pub mod payment;
pub mod report;
pub mod snapshot;
pub mod window;

pub use booking::*;
pub use common::*;
pub use expense::*;
pub use payment::*;
pub use report::*;
pub use snapshot::*;
pub use window::*;
