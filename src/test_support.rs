//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use crate::core::{Game, Ledger, MemoryStore, Session, SessionStore};

fn owned(events: &[&str]) -> Vec<String> {
    events.iter().map(|e| e.to_string()).collect()
}

/// The ledger left after replaying `events` in a fresh game.
pub fn ledger_from(events: &[&str]) -> Ledger {
    Session::replay("test", owned(events), "$").ledger().clone()
}

/// A game named `test` backed by a [`MemoryStore`], already open with `events` replayed.
pub fn game(events: &[&str]) -> Game<MemoryStore> {
    let mut store = MemoryStore::default();
    store.set("test", &owned(events)).unwrap();
    store.set_current_game(Some("test")).unwrap();

    let mut game = Game::new(store, "$");
    game.create_or_load().unwrap();
    game
}
