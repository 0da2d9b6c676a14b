//! # Output Component
//!
//! Scrollback of everything typed and every reply, newest at the bottom.
//!
//! Lines are wrapped to the pane width with `textwrap` on each render. The
//! scroll position is kept as "rows up from the bottom", so new output keeps
//! the view pinned to the end unless the operator has scrolled back.
//!
//! Tables are never wrapped: a box-drawn row that doesn't fit is clipped
//! instead of being broken across lines.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

/// Lines kept before the oldest are dropped.
const MAX_LINES: usize = 2000;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Entry {
    Command(String),
    Feedback(String),
}

pub struct Output {
    entries: Vec<Entry>,
    /// Rows scrolled up from the bottom.
    scroll_back: u16,
    /// Visible height from the last render, used for page scrolling.
    page: u16,
    /// Highest valid `scroll_back` from the last render.
    max_scroll: u16,
}

impl Output {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            scroll_back: 0,
            page: 10,
            max_scroll: 0,
        }
    }

    /// Echo a submitted command.
    pub fn push_command(&mut self, command: &str) {
        self.push(Entry::Command(format!("> {command}")));
    }

    /// Add multi-line feedback. Trailing blank lines are dropped.
    pub fn push_feedback(&mut self, feedback: &str) {
        for line in feedback.trim_end().lines() {
            self.push(Entry::Feedback(line.to_string()));
        }
    }

    fn push(&mut self, entry: Entry) {
        self.entries.push(entry);
        if self.entries.len() > MAX_LINES {
            let excess = self.entries.len() - MAX_LINES;
            self.entries.drain(..excess);
        }
        self.scroll_back = 0;
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn wrapped(&self, width: u16) -> Vec<Line<'static>> {
        let width = width.max(1) as usize;
        let mut lines = Vec::new();
        for entry in &self.entries {
            match entry {
                Entry::Command(text) => {
                    for part in textwrap::wrap(text, width) {
                        lines.push(Line::from(Span::styled(
                            part.into_owned(),
                            Style::default().fg(Color::Cyan),
                        )));
                    }
                }
                Entry::Feedback(text) if is_table_row(text) => {
                    lines.push(Line::raw(text.clone()));
                }
                Entry::Feedback(text) => {
                    for part in textwrap::wrap(text, width) {
                        lines.push(Line::raw(part.into_owned()));
                    }
                }
            }
        }
        lines
    }
}

impl Default for Output {
    fn default() -> Self {
        Self::new()
    }
}

fn is_table_row(text: &str) -> bool {
    text.starts_with(['┌', '│', '├', '└'])
}

impl Component for Output {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let lines = self.wrapped(area.width);
        let total = lines.len() as u16;

        self.page = area.height.max(1);
        self.max_scroll = total.saturating_sub(area.height);
        self.scroll_back = self.scroll_back.min(self.max_scroll);

        let top = self.max_scroll - self.scroll_back;
        frame.render_widget(Paragraph::new(lines).scroll((top, 0)), area);
    }
}

impl EventHandler for Output {
    type Event = ();

    fn handle_event(&mut self, event: &TuiEvent) -> Option<()> {
        let step = match event {
            TuiEvent::ScrollUp => 1,
            TuiEvent::ScrollDown => -1,
            TuiEvent::ScrollPageUp => self.page as i32,
            TuiEvent::ScrollPageDown => -(self.page as i32),
            _ => return None,
        };
        let next = (self.scroll_back as i32 + step).clamp(0, self.max_scroll as i32);
        self.scroll_back = next as u16;
        Some(())
    }
}
