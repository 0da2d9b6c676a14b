//! # Game Rounds
//!
//! 18xx games alternate stock rounds and operating rounds:
//!
//! ```text
//! (none) ──next SR──▶ SR 1 ──next OR──▶ OR 1.1 ──next OR──▶ OR 1.2 ──next SR──▶ SR 2 …
//! ```
//!
//! The counters only ever go up. Entering an operating round is what pays
//! out per-round income; that part lives in the ledger.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundKind {
    Stock,
    Operating,
}

impl RoundKind {
    /// Accepts `SR`/`OR` and anything starting with `S` or `O`.
    pub fn parse(token: &str) -> Option<Self> {
        match token.chars().next()?.to_ascii_uppercase() {
            'S' => Some(RoundKind::Stock),
            'O' => Some(RoundKind::Operating),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            RoundKind::Stock => "SR",
            RoundKind::Operating => "OR",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Round {
    pub kind: RoundKind,
    pub season: u32,
    pub operating: u32,
}

impl Round {
    /// The round that follows `current` when a `kind` round starts.
    pub fn advance(current: Option<Round>, kind: RoundKind) -> Round {
        let (season, operating) = current.map_or((0, 0), |r| (r.season, r.operating));
        match kind {
            RoundKind::Stock => Round {
                kind,
                season: season.saturating_add(1),
                operating: 0,
            },
            RoundKind::Operating => Round {
                kind,
                season,
                operating: operating.saturating_add(1),
            },
        }
    }

    pub fn describe(&self) -> String {
        match self.kind {
            RoundKind::Stock => format!("Stock round {} begins.", self.season),
            RoundKind::Operating => {
                format!("Operating round {}.{} begins.", self.season, self.operating)
            }
        }
    }
}

impl fmt::Display for Round {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            RoundKind::Stock => write!(f, "SR {}", self.season),
            RoundKind::Operating => write!(f, "OR {}.{}", self.season, self.operating),
        }
    }
}
