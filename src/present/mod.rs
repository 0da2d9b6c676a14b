//! # Presentation
//!
//! Read-only views over a ledger, shared by every front-end:
//!
//! - [`tables`]: holdings, values and company tables as boxed text
//! - [`status`]: the one-line status bar
//! - [`display`]: JSON push of both to an external dashboard
//!
//! Nothing here mutates game state.

pub mod display;
pub mod status;
pub mod tables;
