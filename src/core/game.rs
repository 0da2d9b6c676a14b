//! # Game Controller
//!
//! Routes one raw input line to the right place and tells the front-end what
//! to do next:
//!
//! ```text
//! line ──▶ quit / undo / help           handled here
//!      ──▶ parse() ──▶ directory verb   store (open, delete, start, listGames)
//!                  ──▶ query            present::tables over the active ledger
//!                  ──▶ ledger verb      Session::perform, then store.set
//! ```
//!
//! Command mistakes come back as feedback text. Only store failures are
//! errors, and those end the session.

use log::info;

use super::action::{Action, CommandError, Verb};
use super::event_log::Session;
use super::names::generate_name;
use super::parser::parse;
use super::store::{SessionStore, StoreError};
use super::usage::USAGE;
use crate::present::tables;

/// What the front-end should do after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    None,
    /// The ledger or the active game changed: redraw the status bar and push the display.
    Refresh,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub feedback: String,
    pub effect: Effect,
}

impl Reply {
    fn new(feedback: impl Into<String>, effect: Effect) -> Self {
        Self {
            feedback: feedback.into(),
            effect,
        }
    }

    fn text(feedback: impl Into<String>) -> Self {
        Self::new(feedback, Effect::None)
    }

    fn error(error: CommandError) -> Self {
        Self::text(format!("{error}\n"))
    }
}

/// True when `token` is a non-empty prefix of `word`.
fn abbreviates(token: &str, word: &str) -> bool {
    !token.is_empty() && word.starts_with(token)
}

pub struct Game<S: SessionStore> {
    store: S,
    session: Option<Session>,
    currency: String,
}

impl<S: SessionStore> Game<S> {
    /// `currency` is shown until a game sets its own with `banksize`.
    pub fn new(store: S, currency: &str) -> Self {
        Self {
            store,
            session: None,
            currency: currency.to_string(),
        }
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Continue the current game, or start one with a generated name.
    pub fn create_or_load(&mut self) -> Result<String, StoreError> {
        if let Some(name) = self.store.current_game()
            && let Some(events) = self.store.get(&name)
        {
            self.session = Some(Session::replay(&name, events, &self.currency));
            return Ok(format!("Continuing game '{name}'.\n"));
        }

        let mut name = generate_name();
        while self.store.has(&name) {
            name = generate_name();
        }
        self.begin(&name)?;
        Ok(format!("Your game name is '{name}'.\n"))
    }

    /// Handle one line of input.
    pub fn execute(&mut self, line: &str) -> Result<Reply, StoreError> {
        let trimmed = line.trim();
        let lowered = trimmed.to_lowercase();

        if abbreviates(&lowered, "quit") || abbreviates(&lowered, "exit") {
            return Ok(Reply::new("Bye!\n", Effect::Quit));
        }
        match lowered.as_str() {
            "undo" => return self.undo(),
            "help" | "?" => return Ok(Reply::text(USAGE)),
            _ => {}
        }

        let action = parse(trimmed);
        let Some(verb) = action.verb else {
            return Ok(Reply::error(CommandError::Unrecognized));
        };

        match verb {
            Verb::ListGames => Ok(Reply::text(self.list_games())),
            Verb::Open => self.open(&game_name(&action)),
            Verb::Delete => self.delete(&game_name(&action)),
            Verb::Start => self.start(&game_name(&action)),
            Verb::Holdings | Verb::Values | Verb::Companies | Verb::Bank => Ok(self.query(verb)),
            _ => self.perform(&action),
        }
    }

    fn perform(&mut self, action: &Action) -> Result<Reply, StoreError> {
        let Some(session) = self.session.as_mut() else {
            return Ok(Reply::error(CommandError::NoActiveGame));
        };
        match session.perform(action) {
            Ok(feedback) => {
                self.store.set(session.name(), session.events())?;
                Ok(Reply::new(feedback, Effect::Refresh))
            }
            Err(e) => Ok(Reply::error(e)),
        }
    }

    fn undo(&mut self) -> Result<Reply, StoreError> {
        let Some(session) = self.session.as_mut() else {
            return Ok(Reply::error(CommandError::NoActiveGame));
        };
        match session.undo() {
            Ok(entry) => {
                self.store.set(session.name(), session.events())?;
                Ok(Reply::new(format!("Undid \"{entry}\"\n"), Effect::Refresh))
            }
            Err(e) => Ok(Reply::error(e)),
        }
    }

    fn query(&self, verb: Verb) -> Reply {
        let Some(session) = &self.session else {
            return Reply::error(CommandError::NoActiveGame);
        };
        let ledger = session.ledger();
        let text = match verb {
            Verb::Holdings => tables::holdings(ledger).render(),
            Verb::Values => tables::values(ledger).render(),
            Verb::Companies => tables::companies(ledger).render(),
            _ => ledger.bank_report(),
        };
        Reply::text(text)
    }

    fn list_games(&self) -> String {
        let games = self.store.all();
        if games.is_empty() {
            return "No games yet.\n".to_string();
        }
        let current = self.store.current_game();
        games
            .iter()
            .map(|(name, events)| {
                let marker = if current.as_deref() == Some(name.as_str()) { "*" } else { " " };
                format!("{marker} {name} ({} entries)\n", events.len())
            })
            .collect()
    }

    fn open(&mut self, name: &str) -> Result<Reply, StoreError> {
        let Some(events) = self.store.get(name) else {
            return Ok(Reply::error(CommandError::GameNotFound(name.to_string())));
        };
        self.session = Some(Session::replay(name, events, &self.currency));
        self.store.set_current_game(Some(name))?;
        info!("Opened game {}", name);
        Ok(Reply::new(format!("Opened game '{name}'.\n"), Effect::Refresh))
    }

    fn delete(&mut self, name: &str) -> Result<Reply, StoreError> {
        if !self.store.has(name) {
            return Ok(Reply::error(CommandError::GameNotFound(name.to_string())));
        }
        self.store.delete(name)?;
        info!("Deleted game {}", name);

        let mut feedback = format!("Deleted '{name}'.\n");
        if self.session.as_ref().is_some_and(|s| s.name() == name) {
            self.session = None;
            self.store.set_current_game(None)?;
            feedback.push_str("Deleted the active game, no game active at the moment.\n");
        }
        Ok(Reply::new(feedback, Effect::Refresh))
    }

    fn start(&mut self, name: &str) -> Result<Reply, StoreError> {
        if self.store.has(name) {
            return Ok(Reply::error(CommandError::DuplicateGame(name.to_string())));
        }
        self.begin(name)?;
        Ok(Reply::new(
            format!("Game '{name}' generated and active.\n"),
            Effect::Refresh,
        ))
    }

    fn begin(&mut self, name: &str) -> Result<(), StoreError> {
        let session = Session::new(name, &self.currency);
        self.store.set(name, session.events())?;
        self.store.set_current_game(Some(name))?;
        info!("Started game {}", name);
        self.session = Some(session);
        Ok(())
    }
}

/// Game names are case-insensitive and stored lowercase.
fn game_name(action: &Action) -> String {
    action.object.as_deref().unwrap_or_default().to_lowercase()
}
