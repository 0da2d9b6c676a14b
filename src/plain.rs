//! # Plain REPL
//!
//! Line-in, feedback-out front-end for pipes and dumb terminals:
//!
//! ```text
//! $ printf 'mikko cash 100\nholdings\n' | sharebook --plain
//! ```
//!
//! Reads until EOF or a quit command. The prompt is only printed when
//! stdin is a terminal, so piped transcripts stay clean.

use std::io::{self, BufRead, IsTerminal, Write};

use log::info;

use crate::core::{Effect, Game, SessionStore};
use crate::present::display::{DisplayQueue, mirror_session};

pub fn run<S: SessionStore>(
    game: Game<S>,
    display: Option<&DisplayQueue>,
    greeting: &str,
) -> io::Result<()> {
    let stdin = io::stdin();
    let prompt = stdin.is_terminal().then_some("> ");
    run_with(game, display, greeting, stdin.lock(), io::stdout().lock(), prompt)
}

/// Drive `game` from `input`, writing feedback to `output`.
pub fn run_with<S: SessionStore, R: BufRead, W: Write>(
    mut game: Game<S>,
    display: Option<&DisplayQueue>,
    greeting: &str,
    input: R,
    mut output: W,
    prompt: Option<&str>,
) -> io::Result<()> {
    output.write_all(greeting.as_bytes())?;
    mirror_session(display, game.session());

    let mut lines = input.lines();
    loop {
        if let Some(prompt) = prompt {
            write!(output, "{prompt}")?;
            output.flush()?;
        }
        let Some(line) = lines.next().transpose()? else {
            break;
        };
        if line.trim().is_empty() {
            continue;
        }

        let reply = game.execute(&line).map_err(io::Error::other)?;
        output.write_all(reply.feedback.as_bytes())?;
        match reply.effect {
            Effect::Quit => break,
            Effect::Refresh => mirror_session(display, game.session()),
            Effect::None => {}
        }
    }
    output.flush()?;
    info!("Plain session ended");
    Ok(())
}
