//! Sharebook library exports for testing

pub mod core;
pub mod plain;
pub mod present;
pub mod tui;

#[cfg(test)]
pub mod test_support;
