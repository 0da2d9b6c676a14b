//! # Actions
//!
//! Every line typed at the prompt becomes an `Action`.
//! `MIKKO buy 2 CR @80`? That's `Action { verb: Some(Verb::Buy), .. }`.
//! Something we can't read? That's `Action { verb: None, .. }`.
//!
//! The parser produces actions, the ledger consumes them, and the event log
//! stores their normalized text form. No side effects here.
//!
//! ```text
//! "mikko b 2 cr @80"  →  parse()  →  Action  →  normalized()  →  "MIKKO buy 2 CR @80"
//! ```

use std::fmt;

/// Amount literal that refers back to the last dividend a company paid.
pub const PREVIOUS: &str = "PREV";

/// Canonical commands. `as_str()` is the word written to the event log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Verb {
    // Queries
    Holdings,
    Values,
    Companies,
    Bank,
    ListGames,
    // Game directory
    Open,
    Delete,
    Start,
    // Ledger changes
    CompanyCredits,
    BankSize,
    Close,
    Next,
    Rounding,
    Buy,
    Sell,
    Dividend,
    HalfDividend,
    Value,
    Float,
    Cash,
    Income,
    Give,
    Comment,
}

impl Verb {
    pub fn as_str(self) -> &'static str {
        match self {
            Verb::Holdings => "holdings",
            Verb::Values => "values",
            Verb::Companies => "companies",
            Verb::Bank => "bank",
            Verb::ListGames => "listGames",
            Verb::Open => "open",
            Verb::Delete => "delete",
            Verb::Start => "start",
            Verb::CompanyCredits => "companycredits",
            Verb::BankSize => "banksize",
            Verb::Close => "close",
            Verb::Next => "next",
            Verb::Rounding => "rounding",
            Verb::Buy => "buy",
            Verb::Sell => "sell",
            Verb::Dividend => "dividend",
            Verb::HalfDividend => "halfdividend",
            Verb::Value => "value",
            Verb::Float => "float",
            Verb::Cash => "cash",
            Verb::Income => "income",
            Verb::Give => "give",
            Verb::Comment => "#",
        }
    }

    /// True for verbs that change the ledger and therefore go to the event log.
    pub fn is_mutating(self) -> bool {
        !matches!(
            self,
            Verb::Holdings
                | Verb::Values
                | Verb::Companies
                | Verb::Bank
                | Verb::ListGames
                | Verb::Open
                | Verb::Delete
                | Verb::Start
        )
    }
}

impl fmt::Display for Verb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One parsed command line.
///
/// Every field is always present regardless of which grammar produced it,
/// so consumers never need to know the arity of the original line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Action {
    pub verb: Option<Verb>,
    pub subject: Option<String>,
    pub object: Option<String>,
    /// `None` when the argument was present but not a number.
    pub quantity: Option<i64>,
    pub price: i64,
    pub source: Option<String>,
    pub comment: Option<String>,
}

impl Action {
    pub fn new(verb: Verb) -> Self {
        Self {
            verb: Some(verb),
            ..Self::unrecognized(None)
        }
    }

    pub fn unrecognized(comment: Option<String>) -> Self {
        Self {
            verb: None,
            subject: None,
            object: None,
            quantity: Some(0),
            price: 0,
            source: None,
            comment,
        }
    }

    /// True when the object slot holds the `PREV` back-reference.
    pub fn refers_to_previous(&self) -> bool {
        self.object.as_deref().is_some_and(is_previous)
    }

    /// Amount token as written to the log for dividend commands.
    /// A non-numeric amount pays nothing and is recorded as 0.
    fn amount_token(&self) -> String {
        if self.refers_to_previous() {
            return PREVIOUS.to_string();
        }
        match (&self.object, self.quantity) {
            (None, Some(quantity)) => quantity.to_string(),
            _ => "0".to_string(),
        }
    }

    /// Canonical text of this action as stored in the event log.
    ///
    /// Returns `None` for verbs that are never logged and for actions that
    /// lack the parts their log form needs.
    pub fn normalized(&self) -> Option<String> {
        let verb = self.verb?;
        if !verb.is_mutating() {
            return None;
        }
        let subject = self.subject.as_deref().unwrap_or_default();
        let object = self.object.as_deref().unwrap_or_default();
        let quantity = self.quantity.unwrap_or_default();

        let mut entry = match verb {
            Verb::Buy | Verb::Sell => {
                let mut entry = format!("{subject} {verb} {quantity} {object}");
                if self.price != 0 {
                    entry.push_str(&format!(" @{}", self.price));
                }
                if verb == Verb::Buy
                    && let Some(source) = &self.source
                {
                    entry.push_str(&format!(" from {source}"));
                }
                entry
            }
            Verb::Dividend | Verb::HalfDividend => {
                format!("{subject} {verb} {}", self.amount_token())
            }
            Verb::Value | Verb::Cash | Verb::Float | Verb::Income => {
                format!("{subject} {verb} {quantity}")
            }
            Verb::Give => format!("{subject} {verb} {quantity} to {object}"),
            Verb::Close | Verb::Next | Verb::Rounding => format!("{verb} {object}"),
            Verb::BankSize => format!("{verb} {object}{quantity}"),
            Verb::CompanyCredits => verb.to_string(),
            Verb::Comment => String::new(),
            _ => return None,
        };

        if let Some(comment) = &self.comment {
            entry.push_str(&format!(" # {comment}"));
        }
        Some(entry.trim().to_string())
    }
}

/// Matches `PREV` and its abbreviations down to `PR`.
pub fn is_previous(token: &str) -> bool {
    token.len() >= 2 && PREVIOUS.starts_with(token)
}

/// Why a command was not applied. Always reported as feedback, never fatal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    /// The parser did not recognise the line.
    Unrecognized,
    /// A numeric argument was not a number. Carries the argument's name.
    NotANumber(&'static str),
    /// A required argument was missing. Carries the argument's name.
    MissingArgument(&'static str),
    /// A ledger command arrived while no game is open.
    NoActiveGame,
    GameNotFound(String),
    DuplicateGame(String),
    /// `next` with something other than SR or OR.
    UnknownRound(String),
    NothingToUndo,
}

impl fmt::Display for CommandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommandError::Unrecognized => write!(f, "Unrecognized command!"),
            CommandError::NotANumber(what) => {
                let mut what = what.to_string();
                if let Some(first) = what.get_mut(..1) {
                    first.make_ascii_uppercase();
                }
                write!(f, "{what} is not a number!")
            }
            CommandError::MissingArgument(what) => write!(f, "Missing {what}."),
            CommandError::NoActiveGame => write!(f, "No active game!"),
            CommandError::GameNotFound(name) => write!(f, "Game '{name}' doesn't exist."),
            CommandError::DuplicateGame(name) => write!(f, "Game '{name}' already exists!"),
            CommandError::UnknownRound(kind) => {
                write!(f, "Unknown round '{kind}', use SR or OR.")
            }
            CommandError::NothingToUndo => write!(f, "Nothing to undo."),
        }
    }
}

impl std::error::Error for CommandError {}
