//! Host loop
//!
//! Each line read from the terminal is typed into the input buffer one
//! character at a time, then committed to the session as a command. When
//! both colors are engines the loop plays the game out on its own.

use anyhow::{Context, Result};
use std::io::{BufRead, Write};
use tracing::{info, warn};
use uchess_core::session::engine_status;
use uchess_core::{InputBuffer, Session};

use crate::render::render;

/// Upper bound on plies in an engine-only game
pub const AUTOPLAY_PLY_LIMIT: usize = 600;

const BACKSPACE: char = '\u{8}';
const DELETE: char = '\u{7f}';

fn draw<W: Write>(out: &mut W, session: &Session, input: &InputBuffer, status: &str) -> Result<()> {
    write!(out, "\n{}", render(session, input, status)).context("writing to terminal")?;
    out.flush().context("writing to terminal")
}

fn rescore(session: &mut Session) {
    if session.game().is_in_progress() {
        session.refresh_score();
    }
}

/// Run until `quit`, end of input, or the end of an engine-only game
pub fn run<R: BufRead, W: Write>(session: &mut Session, input: R, out: &mut W) -> Result<()> {
    let mut buffer = InputBuffer::new();
    let mut status = String::new();

    // An engine playing white moves before anything is read
    if session.config().is_interactive() && session.is_cpu_turn() {
        if let Err(e) = session.play_engine_turn() {
            status = engine_status(&e).to_string();
        }
    }
    rescore(session);
    draw(out, session, &buffer, &status)?;

    if !session.config().is_interactive() {
        return autoplay(session, out);
    }

    for line in input.lines() {
        let line = line.context("reading input")?;
        for c in line.chars() {
            match c {
                BACKSPACE | DELETE => buffer.backspace(),
                c => buffer.append(c),
            }
        }
        let outcome = session.process_command(&buffer.current());
        buffer.clear();
        if outcome.quit {
            info!("quit requested");
            break;
        }
        if outcome.rescore {
            rescore(session);
        }
        draw(out, session, &buffer, &outcome.status)?;
    }
    Ok(())
}

fn autoplay<W: Write>(session: &mut Session, out: &mut W) -> Result<()> {
    let idle = InputBuffer::new();
    for _ in 0..AUTOPLAY_PLY_LIMIT {
        match session.play_engine_turn() {
            Ok(true) => {
                rescore(session);
                draw(out, session, &idle, "")?;
            }
            Ok(false) => return Ok(()),
            Err(e) => {
                warn!(error = %e, "engine-only game stopped");
                return draw(out, session, &idle, engine_status(&e));
            }
        }
    }
    info!(plies = AUTOPLAY_PLY_LIMIT, "engine-only game reached the ply limit");
    Ok(())
}

#[cfg(test)]
#[path = "app_tests.rs"]
mod app_tests;
