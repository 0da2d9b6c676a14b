//! # Core Application Logic
//!
//! This module contains sharebook's game logic.
//! It knows nothing about any specific UI technology.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • parse() (line→Action)│
//!                    │  • Ledger (game money)  │
//!                    │  • Session (event log)  │
//!                    │  • Game (controller)    │
//!                    │                         │
//!                    │  Only the store does I/O│
//!                    └───────────┬─────────────┘
//!                                │
//!            ┌───────────────────┼───────────────────┐
//!            ▼                   ▼                   ▼
//!     ┌────────────┐      ┌────────────┐      ┌────────────┐
//!     │    TUI     │      │   Plain    │      │  Display   │
//!     │  Adapter   │      │   REPL     │      │   mirror   │
//!     │ (ratatui)  │      │  (stdin)   │      │ (reqwest)  │
//!     └────────────┘      └────────────┘      └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`action`]: `Action`, `Verb` and `CommandError`
//! - [`parser`]: free text → `Action`
//! - [`ledger`]: all money and share arithmetic, party classification
//! - [`round`]: stock / operating round counter
//! - [`event_log`]: `Session`, replay and undo
//! - [`store`]: persisted game logs
//! - [`game`]: routes a line of input, returns feedback and an `Effect`
//! - [`config`]: settings hierarchy

pub mod action;
pub mod config;
pub mod event_log;
pub mod game;
pub mod ledger;
pub mod names;
pub mod parser;
pub mod round;
pub mod store;
pub mod usage;

pub use action::{Action, CommandError, Verb};
pub use event_log::Session;
pub use game::{Effect, Game, Reply};
pub use ledger::{Ledger, Roster, classify};
pub use store::{JsonFileStore, MemoryStore, SessionStore, StoreError};
