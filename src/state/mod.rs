//! In-memory application state
//!
//! Nothing here is persisted. The ledger and everything else in a session
//! lives for the lifetime of the process.

pub mod ledger;
pub mod session;

pub use ledger::{resolve_position, Ledger};
pub use session::{ImportMode, Session};
