//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the UI and
//! feeds submitted lines to [`Game::execute`].
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Redraw Strategy
//!
//! Nothing animates, so the loop sleeps up to 500ms waiting for input and
//! only redraws after events or a terminal resize. All pending events are
//! drained before the next frame so a paste doesn't draw once per key.
//!
//! A `SteadyBlock` cursor style is used instead of a blinking cursor because
//! ratatui's `set_cursor_position` resets the terminal's blink timer on every
//! `draw()` call.

mod component;
mod components;
mod event;
mod ui;

use std::io::{self, stdout};
use std::time::Duration;

use crossterm::cursor::{Hide, SetCursorStyle, Show};
use crossterm::event::{
    DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
};
use crossterm::execute;
use log::{info, warn};

use crate::core::{Effect, Game, SessionStore};
use crate::present::display::{DisplayQueue, mirror_session};
use crate::present::status::StatusBar;
use crate::tui::component::EventHandler;
use crate::tui::components::{InputEvent, InputLine, Output, StatusBarView};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};

/// TUI-specific presentation state (not part of core game logic)
pub struct TuiState {
    pub status_bar: StatusBarView,
    pub output: Output,
    pub input: InputLine,
}

impl TuiState {
    /// Input history starts out as the open game's log, so earlier moves
    /// can be recalled with Up after a restart.
    pub fn new<S: SessionStore>(game: &Game<S>) -> Self {
        let history = game
            .session()
            .map(|s| s.events().to_vec())
            .unwrap_or_default();
        let mut state = Self {
            status_bar: StatusBarView::new(None, None),
            output: Output::new(),
            input: InputLine::with_history(history),
        };
        state.sync_status(game);
        state
    }

    /// Refresh the status bar props from the active game.
    pub fn sync_status<S: SessionStore>(&mut self, game: &Game<S>) {
        let session = game.session();
        self.status_bar.game_name = session.map(|s| s.name().to_string());
        self.status_bar.status = session.map(|s| StatusBar::from_ledger(s.ledger()));
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> io::Result<Self> {
        execute!(
            stdout(),
            EnableMouseCapture,
            EnableBracketedPaste,
            Show,
            SetCursorStyle::SteadyBlock
        )?;
        info!("Terminal modes enabled (mouse, bracketed paste, steady block cursor)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(stdout(), DisableMouseCapture, DisableBracketedPaste, Hide);
    }
}

/// Run one submitted line. Returns false when the session should end.
fn submit<S: SessionStore>(
    game: &mut Game<S>,
    tui: &mut TuiState,
    display: Option<&DisplayQueue>,
    line: &str,
) -> io::Result<bool> {
    tui.output.push_command(line);
    let reply = game.execute(line).map_err(io::Error::other)?;
    tui.output.push_feedback(&reply.feedback);

    match reply.effect {
        Effect::Quit => return Ok(false),
        Effect::Refresh => {
            tui.sync_status(game);
            mirror_session(display, game.session());
        }
        Effect::None => {}
    }
    Ok(true)
}

pub fn run<S: SessionStore>(
    mut game: Game<S>,
    display: Option<&DisplayQueue>,
    greeting: &str,
) -> io::Result<()> {
    let mut tui = TuiState::new(&game);
    tui.output.push_feedback(greeting);
    mirror_session(display, game.session());

    let mut terminal = ratatui::init();
    let _terminal_mode_guard = TerminalModeGuard::new();

    let mut needs_redraw = true;
    let result = loop {
        if needs_redraw {
            if let Err(e) = terminal.draw(|f| ui::draw_ui(f, &mut tui)) {
                break Err(e);
            }
            needs_redraw = false;
        }

        let first_event = poll_event_timeout(Duration::from_millis(500));
        if first_event.is_some() {
            needs_redraw = true;
        }

        let mut outcome = Ok(true);
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            match event {
                TuiEvent::Resize => {}
                TuiEvent::ForceQuit => {
                    outcome = Ok(false);
                    break;
                }
                TuiEvent::ScrollUp
                | TuiEvent::ScrollDown
                | TuiEvent::ScrollPageUp
                | TuiEvent::ScrollPageDown => {
                    tui.output.handle_event(&event);
                }
                _ => {
                    if let Some(InputEvent::Submit(line)) = tui.input.handle_event(&event) {
                        outcome = submit(&mut game, &mut tui, display, &line);
                        if !matches!(outcome, Ok(true)) {
                            break;
                        }
                    }
                }
            }
        }

        match outcome {
            Ok(true) => {}
            Ok(false) => break Ok(()),
            Err(e) => {
                warn!("Game store failed: {}", e);
                break Err(e);
            }
        }
    };

    ratatui::restore();
    info!("TUI closed");
    result
}
