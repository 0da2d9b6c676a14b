//! # Tables
//!
//! Read-only projections of a ledger, drawn as boxed text:
//!
//! ```text
//! ┌────────┬──────┬────┬────┐
//! │ Player │ Cash │ CR │ GT │
//! ├────────┼──────┼────┼────┤
//! │ MIKKO  │ $40  │ 4  │ 0  │
//! └────────┴──────┴────┴────┘
//! ```
//!
//! Column widths are measured in terminal cells, so `£` and other wide or
//! multi-byte symbols line up.

use serde::Serialize;
use unicode_width::UnicodeWidthStr;

use crate::core::ledger::{Ledger, classify};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Table {
    pub header: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    fn widths(&self) -> Vec<usize> {
        let mut widths: Vec<usize> = self.header.iter().map(|cell| cell.width()).collect();
        for row in &self.rows {
            for (i, cell) in row.iter().enumerate() {
                match widths.get_mut(i) {
                    Some(width) => *width = (*width).max(cell.width()),
                    None => widths.push(cell.width()),
                }
            }
        }
        widths
    }

    /// Boxed text with a trailing newline.
    pub fn render(&self) -> String {
        let widths = self.widths();
        let rule = |left: &str, mid: &str, right: &str| {
            let segments: Vec<String> = widths.iter().map(|w| "─".repeat(w + 2)).collect();
            format!("{left}{}{right}\n", segments.join(mid))
        };
        let line = |cells: &[String]| {
            let padded: Vec<String> = widths
                .iter()
                .enumerate()
                .map(|(i, width)| {
                    let cell = cells.get(i).map(String::as_str).unwrap_or_default();
                    format!(" {cell}{} ", " ".repeat(width - cell.width()))
                })
                .collect();
            format!("│{}│\n", padded.join("│"))
        };

        let mut out = rule("┌", "┬", "┐");
        out.push_str(&line(&self.header));
        out.push_str(&rule("├", "┼", "┤"));
        for row in &self.rows {
            out.push_str(&line(row));
        }
        out.push_str(&rule("└", "┴", "┘"));
        out
    }
}

/// `Player | Cash | <company>...` with share counts.
pub fn holdings(ledger: &Ledger) -> Table {
    let roster = classify(ledger);
    let mut header = vec!["Player".to_string(), "Cash".to_string()];
    header.extend(roster.companies.iter().cloned());

    let rows = roster
        .players
        .iter()
        .map(|player| {
            let mut row = vec![player.clone(), ledger.money(ledger.cash(player))];
            row.extend(
                roster
                    .companies
                    .iter()
                    .map(|company| ledger.holding(player, company).to_string()),
            );
            row
        })
        .collect();

    Table { header, rows }
}

/// `Player | Cash | <company>... | Total` with share values.
pub fn values(ledger: &Ledger) -> Table {
    let roster = classify(ledger);
    let mut header = vec!["Player".to_string(), "Cash".to_string()];
    header.extend(roster.companies.iter().cloned());
    header.push("Total".to_string());

    let rows = roster
        .players
        .iter()
        .map(|player| {
            let mut row = vec![player.clone(), ledger.money(ledger.cash(player))];
            row.extend(roster.companies.iter().map(|company| {
                let worth = ledger
                    .holding(player, company)
                    .saturating_mul(ledger.value(company));
                ledger.money(worth)
            }));
            row.push(ledger.money(ledger.worth(player)));
            row
        })
        .collect();

    Table { header, rows }
}

/// `Company | Treasury | Value | <player>...` with share counts.
pub fn companies(ledger: &Ledger) -> Table {
    let roster = classify(ledger);
    let mut header = vec![
        "Company".to_string(),
        "Treasury".to_string(),
        "Value".to_string(),
    ];
    header.extend(roster.players.iter().cloned());

    let rows = roster
        .companies
        .iter()
        .map(|company| {
            let treasury = match ledger.treasury(company) {
                Some(treasury) => ledger.money(treasury),
                None => "-".to_string(),
            };
            let mut row = vec![company.clone(), treasury, ledger.value(company).to_string()];
            row.extend(
                roster
                    .players
                    .iter()
                    .map(|player| ledger.holding(player, company).to_string()),
            );
            row
        })
        .collect();

    Table { header, rows }
}
