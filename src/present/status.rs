//! # Status Bar Content
//!
//! One line of game state shown above the scrollback:
//!
//! ```text
//! OR 2.1    BANK $2330    MIKKO $40 ($440)    NOOA $0 ($160)    CR $120
//! ```
//!
//! While no bank size is set the bank item reads `TOTAL $n`, the sum of all
//! cash outside treasuries.

use serde::Serialize;

use crate::core::ledger::{Ledger, classify};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusBar {
    pub round: Option<String>,
    pub bank: String,
    pub players: Vec<String>,
    pub companies: Vec<String>,
}

impl StatusBar {
    pub fn from_ledger(ledger: &Ledger) -> Self {
        let roster = classify(ledger);
        let bank = match ledger.bank_remains() {
            Some(remains) => format!("BANK {}", ledger.money(remains)),
            None => format!("TOTAL {}", ledger.money(ledger.total_cash())),
        };
        let players = roster
            .players
            .iter()
            .map(|player| {
                format!(
                    "{player} {} ({})",
                    ledger.money(ledger.cash(player)),
                    ledger.money(ledger.worth(player))
                )
            })
            .collect();
        let companies = roster
            .companies
            .iter()
            .filter_map(|company| {
                ledger
                    .treasury(company)
                    .map(|treasury| format!("{company} {}", ledger.money(treasury)))
            })
            .collect();

        Self {
            round: ledger.round().map(|round| round.to_string()),
            bank,
            players,
            companies,
        }
    }

    /// Items in display order.
    pub fn items(&self) -> Vec<&str> {
        self.round
            .iter()
            .chain(std::iter::once(&self.bank))
            .chain(&self.players)
            .chain(&self.companies)
            .map(String::as_str)
            .collect()
    }

    /// Pack items into lines no wider than `width` cells, four spaces apart.
    pub fn lines(&self, width: usize) -> Vec<String> {
        use unicode_width::UnicodeWidthStr;

        let mut lines = Vec::new();
        let mut current = String::new();
        for item in self.items() {
            if current.is_empty() {
                current.push_str(item);
            } else if current.width() + 4 + item.width() > width {
                lines.push(std::mem::take(&mut current));
                current.push_str(item);
            } else {
                current.push_str("    ");
                current.push_str(item);
            }
        }
        if !current.is_empty() {
            lines.push(current);
        }
        lines
    }
}
