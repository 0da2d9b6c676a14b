//! # InputLine Component
//!
//! Single-line command prompt with readline-style editing and history.
//!
//! ## State
//!
//! - `buffer`: text being typed
//! - `cursor`: byte offset into `buffer`, always on a char boundary
//! - `history`: submitted lines, oldest first; Up/Down walk it
//!
//! While browsing history the line being typed is parked in `draft` and
//! comes back when Down walks past the newest entry.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::widgets::{Block, BorderType, Paragraph};
use unicode_width::UnicodeWidthStr;

use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

const PROMPT: &str = "> ";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    Submit(String),
    ContentChanged,
}

pub struct InputLine {
    pub buffer: String,
    cursor: usize,
    history: Vec<String>,
    /// Index into `history` while browsing, `None` when editing a fresh line.
    browsing: Option<usize>,
    draft: String,
}

fn prev_char_boundary(text: &str, pos: usize) -> usize {
    text[..pos]
        .char_indices()
        .next_back()
        .map(|(i, _)| i)
        .unwrap_or(0)
}

fn next_char_boundary(text: &str, pos: usize) -> usize {
    text[pos..]
        .char_indices()
        .nth(1)
        .map(|(i, _)| pos + i)
        .unwrap_or(text.len())
}

impl InputLine {
    pub fn new() -> Self {
        Self::with_history(Vec::new())
    }

    /// Seed history, e.g. with the active game's event log.
    pub fn with_history(history: Vec<String>) -> Self {
        Self {
            buffer: String::new(),
            cursor: 0,
            history,
            browsing: None,
            draft: String::new(),
        }
    }

    pub fn history(&self) -> &[String] {
        &self.history
    }

    fn set_buffer(&mut self, text: String) {
        self.buffer = text;
        self.cursor = self.buffer.len();
    }

    fn history_prev(&mut self) -> bool {
        let index = match self.browsing {
            Some(0) => return false,
            Some(i) => i - 1,
            None if self.history.is_empty() => return false,
            None => {
                self.draft = self.buffer.clone();
                self.history.len() - 1
            }
        };
        self.browsing = Some(index);
        self.set_buffer(self.history[index].clone());
        true
    }

    fn history_next(&mut self) -> bool {
        let Some(index) = self.browsing else {
            return false;
        };
        if index + 1 < self.history.len() {
            self.browsing = Some(index + 1);
            self.set_buffer(self.history[index + 1].clone());
        } else {
            self.browsing = None;
            let draft = std::mem::take(&mut self.draft);
            self.set_buffer(draft);
        }
        true
    }
}

impl Default for InputLine {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for InputLine {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let inner_width = area.width.saturating_sub(2) as usize;
        let before_cursor = format!("{PROMPT}{}", &self.buffer[..self.cursor]);

        // Keep the cursor visible by dropping text off the left edge.
        let mut visible = format!("{PROMPT}{}", self.buffer);
        let mut cursor_col = before_cursor.width();
        while cursor_col >= inner_width.max(1) && !visible.is_empty() {
            let first = visible.chars().next().map_or(0, char::len_utf8);
            cursor_col -= visible[..first].width();
            visible.drain(..first);
        }

        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .title("Command (help for usage)");
        let input = Paragraph::new(visible)
            .block(block)
            .style(Style::default().fg(Color::Green));
        frame.render_widget(input, area);
        frame.set_cursor_position((area.x + 1 + cursor_col as u16, area.y + 1));
    }
}

impl EventHandler for InputLine {
    type Event = InputEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::InputChar(c) => {
                self.buffer.insert(self.cursor, *c);
                self.cursor += c.len_utf8();
                Some(InputEvent::ContentChanged)
            }
            TuiEvent::Paste(text) => {
                self.buffer.insert_str(self.cursor, text);
                self.cursor += text.len();
                Some(InputEvent::ContentChanged)
            }
            TuiEvent::Backspace => (self.cursor > 0).then(|| {
                let prev = prev_char_boundary(&self.buffer, self.cursor);
                self.buffer.drain(prev..self.cursor);
                self.cursor = prev;
                InputEvent::ContentChanged
            }),
            TuiEvent::Delete => (self.cursor < self.buffer.len()).then(|| {
                let next = next_char_boundary(&self.buffer, self.cursor);
                self.buffer.drain(self.cursor..next);
                InputEvent::ContentChanged
            }),
            TuiEvent::CursorLeft => (self.cursor > 0).then(|| {
                self.cursor = prev_char_boundary(&self.buffer, self.cursor);
                InputEvent::ContentChanged
            }),
            TuiEvent::CursorRight => (self.cursor < self.buffer.len()).then(|| {
                self.cursor = next_char_boundary(&self.buffer, self.cursor);
                InputEvent::ContentChanged
            }),
            TuiEvent::CursorHome => (self.cursor != 0).then(|| {
                self.cursor = 0;
                InputEvent::ContentChanged
            }),
            TuiEvent::CursorEnd => (self.cursor != self.buffer.len()).then(|| {
                self.cursor = self.buffer.len();
                InputEvent::ContentChanged
            }),
            TuiEvent::ClearLine => (!self.buffer.is_empty()).then(|| {
                self.set_buffer(String::new());
                InputEvent::ContentChanged
            }),
            TuiEvent::HistoryPrev => self.history_prev().then_some(InputEvent::ContentChanged),
            TuiEvent::HistoryNext => self.history_next().then_some(InputEvent::ContentChanged),
            TuiEvent::Submit => {
                let text = std::mem::take(&mut self.buffer).trim().to_string();
                self.cursor = 0;
                self.browsing = None;
                self.draft.clear();
                if text.is_empty() {
                    return None;
                }
                if self.history.last() != Some(&text) {
                    self.history.push(text.clone());
                }
                Some(InputEvent::Submit(text))
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn type_text(input: &mut InputLine, text: &str) {
        for c in text.chars() {
            input.handle_event(&TuiEvent::InputChar(c));
        }
    }

    #[test]
    fn test_editing() {
        let mut input = InputLine::new();
        type_text(&mut input, "mikko buy cr");
        input.handle_event(&TuiEvent::CursorLeft);
        input.handle_event(&TuiEvent::CursorLeft);
        type_text(&mut input, "2 ");
        assert_eq!(input.buffer, "mikko buy 2 cr");

        input.handle_event(&TuiEvent::CursorHome);
        input.handle_event(&TuiEvent::Delete);
        assert_eq!(input.buffer, "ikko buy 2 cr");
        assert_eq!(input.handle_event(&TuiEvent::Backspace), None);
    }

    #[test]
    fn test_multibyte_backspace() {
        let mut input = InputLine::new();
        type_text(&mut input, "banksize £");
        input.handle_event(&TuiEvent::Backspace);
        assert_eq!(input.buffer, "banksize ");
    }

    #[test]
    fn test_submit_clears_and_records_history() {
        let mut input = InputLine::new();
        type_text(&mut input, "  holdings ");
        assert_eq!(
            input.handle_event(&TuiEvent::Submit),
            Some(InputEvent::Submit("holdings".to_string()))
        );
        assert!(input.buffer.is_empty());
        assert_eq!(input.history(), ["holdings"]);

        assert_eq!(input.handle_event(&TuiEvent::Submit), None);
        type_text(&mut input, "holdings");
        input.handle_event(&TuiEvent::Submit);
        assert_eq!(input.history().len(), 1);
    }

    #[test]
    fn test_history_browsing_restores_draft() {
        let mut input = InputLine::with_history(vec!["first".to_string(), "second".to_string()]);
        type_text(&mut input, "dra");

        input.handle_event(&TuiEvent::HistoryPrev);
        assert_eq!(input.buffer, "second");
        input.handle_event(&TuiEvent::HistoryPrev);
        assert_eq!(input.buffer, "first");
        assert_eq!(input.handle_event(&TuiEvent::HistoryPrev), None);

        input.handle_event(&TuiEvent::HistoryNext);
        assert_eq!(input.buffer, "second");
        input.handle_event(&TuiEvent::HistoryNext);
        assert_eq!(input.buffer, "dra");
        assert_eq!(input.handle_event(&TuiEvent::HistoryNext), None);
    }

    #[test]
    fn test_render_shows_prompt_and_text() {
        let backend = TestBackend::new(40, 3);
        let mut terminal = Terminal::new(backend).unwrap();
        let mut input = InputLine::new();
        type_text(&mut input, "cr dividend 10");

        terminal.draw(|f| input.render(f, f.area())).unwrap();
        let text = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect::<String>();
        assert!(text.contains("> cr dividend 10"));
        assert!(text.contains("Command"));
    }
}
