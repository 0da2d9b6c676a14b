//! # StatusBar Component
//!
//! Top bar showing the active game, round, bank and every party's money.
//!
//! Purely presentational: it receives a [`StatusBar`] snapshot as a prop and
//! wraps it to the terminal width, so its height depends on the width it is
//! given:
//!
//! ```text
//! rusty-trains    OR 2.1    BANK $2330    MIKKO $40 ($440)
//! NOOA $0 ($160)    CR $120
//! ```

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::widgets::Paragraph;

use crate::present::status::StatusBar;
use crate::tui::component::Component;

pub struct StatusBarView {
    /// Active game name, `None` when no game is open.
    pub game_name: Option<String>,
    /// Ledger summary of the active game.
    pub status: Option<StatusBar>,
}

impl StatusBarView {
    pub fn new(game_name: Option<String>, status: Option<StatusBar>) -> Self {
        Self { game_name, status }
    }

    fn lines(&self, width: u16) -> Vec<String> {
        let title = self
            .game_name
            .clone()
            .unwrap_or_else(|| "sharebook (no game)".to_string());

        let mut bar = self.status.clone().unwrap_or(StatusBar {
            round: None,
            bank: String::new(),
            players: Vec::new(),
            companies: Vec::new(),
        });
        // The title rides in the round slot so it wraps with everything else.
        bar.round = Some(match bar.round {
            Some(round) => format!("{title}    {round}"),
            None => title,
        });
        if bar.bank.is_empty() {
            return vec![bar.round.unwrap_or_default()];
        }
        bar.lines(width as usize)
    }

    /// Rows needed at `width`.
    pub fn height(&self, width: u16) -> u16 {
        self.lines(width).len().max(1) as u16
    }
}

impl Component for StatusBarView {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let text = self.lines(area.width).join("\n");
        let bar = Paragraph::new(text).style(Style::default().bg(Color::Yellow).fg(Color::Black));
        frame.render_widget(bar, area);
    }
}
