//! # TUI Components
//!
//! ```text
//! ┌──────────────────────────────────────────┐
//! │ StatusBarView   game, round, bank, money │  props only
//! ├──────────────────────────────────────────┤
//! │ Output          commands and replies     │  scroll state
//! │                                          │
//! ├──────────────────────────────────────────┤
//! │ InputLine       > prompt with history    │  edit state, emits InputEvent
//! └──────────────────────────────────────────┘
//! ```
//!
//! Each file holds the component's state, rendering, event handling and
//! tests. Components get game data as props and never touch `Game` directly.

mod input_line;
mod output;
mod status_bar;

pub use input_line::{InputEvent, InputLine};
pub use output::Output;
pub use status_bar::StatusBarView;
