//! Game session controller
//!
//! Owns the authoritative game, the engines for each role, and the hint.
//! The host loop hands it one committed command at a time and renders
//! whatever comes back.

use shakmaty::san::SanPlus;
use shakmaty::Color;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::config::{Config, Role, Roster};
use crate::engine::{Engines, SearchRequest};
use crate::error::{ConfigError, EngineError, ExportError, SessionError};
use crate::eval;
use crate::export::{self, Exporter, FileExporter};
use crate::game::{GameSession, OutcomeTag};
use crate::material;

pub const ILLEGAL_MOVE: &str = "⚠ Illegal. Try again.";
pub const ENGINE_COMMAND_FAILED: &str = "⚠ Error. Engine command.";
pub const ENGINE_MOVE_FAILED: &str = "⚠ Error. Engine move.";
pub const GAME_OVER: &str = "Game over.";

/// What the host loop should do after a command
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutcome {
    /// Message for the status line (empty clears it)
    pub status: String,
    /// Stop the host loop
    pub quit: bool,
    /// The position changed, so the score is stale
    pub rescore: bool,
}

impl CommandOutcome {
    fn status(status: impl Into<String>) -> Self {
        Self {
            status: status.into(),
            ..Self::default()
        }
    }

    fn changed(status: impl Into<String>) -> Self {
        Self {
            status: status.into(),
            rescore: true,
            ..Self::default()
        }
    }
}

/// Status line text for a failed engine turn
pub fn engine_status(err: &EngineError) -> &'static str {
    match err {
        EngineError::NoMove(_) | EngineError::BadMove { .. } => ENGINE_MOVE_FAILED,
        _ => ENGINE_COMMAND_FAILED,
    }
}

pub struct Session {
    config: Config,
    roster: Roster,
    game: GameSession,
    engines: Engines,
    exporter: Box<dyn Exporter>,
    hint: Option<String>,
    /// Centipawns from white's perspective
    score: i32,
}

impl Session {
    /// Validate the config, start one engine per role, and set up the
    /// starting position. Save files go to the working directory.
    pub fn start(mut config: Config) -> Result<Self, SessionError> {
        config.validate()?;
        config.fill_player_names();
        let roster = config.roster()?;
        let timeout = Duration::from_millis(config.handshake_timeout_ms);
        let engines = Engines::start(&roster, timeout)?;
        Ok(Self::new(config, engines, Box::new(FileExporter::cwd()))?)
    }

    /// Build a session around engines and an exporter created by the caller
    pub fn new(
        config: Config,
        engines: Engines,
        exporter: Box<dyn Exporter>,
    ) -> Result<Self, ConfigError> {
        let roster = config.roster()?;
        let game = GameSession::from_fen(&config.fen).map_err(|reason| ConfigError::InvalidFen {
            fen: config.fen.clone(),
            reason,
        })?;
        info!(
            white = %config.white_piece,
            black = %config.black_piece,
            fen = %config.fen,
            "session created"
        );
        Ok(Self {
            config,
            roster,
            game,
            engines,
            exporter,
            hint: None,
            score: 0,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn game(&self) -> &GameSession {
        &self.game
    }

    pub fn outcome(&self) -> OutcomeTag {
        self.game.outcome()
    }

    /// Last evaluation in centipawns from white's perspective
    pub fn score(&self) -> i32 {
        self.score
    }

    /// Suggested move in SAN from the last `hint` command
    pub fn hint_move(&self) -> Option<&str> {
        self.hint.as_deref()
    }

    /// True when the side to move is played by an engine and the game is on
    pub fn is_cpu_turn(&self) -> bool {
        self.game.is_in_progress() && self.config.is_cpu(self.game.turn())
    }

    /// Dispatch one committed line of input
    pub fn process_command(&mut self, text: &str) -> CommandOutcome {
        let cmd = text.trim();
        self.hint = None;
        debug!(command = cmd, "processing command");

        match cmd {
            "back" => {
                self.game = self.game.undo_round();
                self.after_change()
            }
            "reset" => {
                self.game = GameSession::new();
                self.after_change()
            }
            "resign" => {
                self.game.resign();
                CommandOutcome::status("")
            }
            "save" => {
                let white = self.config.player_name(Color::White);
                let black = self.config.player_name(Color::Black);
                CommandOutcome::status(saved(self.exporter.save_game(&self.game, white, black)))
            }
            "image" => CommandOutcome::status(saved(self.exporter.save_board(&self.game))),
            "fen" => CommandOutcome::status(self.game.fen()),
            "hint" => match self.hint() {
                Ok(Some(san)) => CommandOutcome::status(format!("Hint: {}", san)),
                Ok(None) => CommandOutcome::status(GAME_OVER),
                Err(e) => {
                    warn!(error = %e, "hint failed");
                    CommandOutcome::status(ENGINE_COMMAND_FAILED)
                }
            },
            "quit" => CommandOutcome {
                quit: true,
                ..CommandOutcome::default()
            },
            _ => match self.game.apply_move_text(cmd) {
                Ok(_) => self.after_change(),
                Err(e) => {
                    debug!(command = cmd, error = %e, "move rejected");
                    CommandOutcome::status(ILLEGAL_MOVE)
                }
            },
        }
    }

    /// Let the engine reply when it is now its turn
    fn after_change(&mut self) -> CommandOutcome {
        if !self.is_cpu_turn() {
            return CommandOutcome::changed("");
        }
        match self.play_engine_turn() {
            Ok(_) => CommandOutcome::changed(""),
            Err(e) => CommandOutcome::changed(engine_status(&e)),
        }
    }

    /// Search with the side to move's engine and play its move.
    ///
    /// Returns `Ok(false)` without touching any engine when the game is over
    /// or a human is to move. On error the game is left as it was.
    pub fn play_engine_turn(&mut self) -> Result<bool, EngineError> {
        if !self.is_cpu_turn() {
            return Ok(false);
        }
        let role = Role::for_color(self.game.turn());
        let request = SearchRequest::from_config(self.roster.get(role));
        let engine = self.engines.get_mut(role);
        let best = match engine.search(self.game.position(), &request) {
            Ok(best) => best,
            Err(e) => {
                warn!(%role, error = %e, "engine search failed");
                return Err(e);
            }
        };
        if self.game.apply_move(&best.mv).is_err() {
            warn!(%role, token = %best.uci, "engine move rejected");
            return Err(EngineError::BadMove {
                name: engine.name().to_string(),
                token: best.uci,
            });
        }
        debug!(%role, best = %best.uci, outcome = %self.game.outcome(), "engine moved");
        Ok(true)
    }

    /// Ask the hint engine for a move. The game is never changed.
    pub fn hint(&mut self) -> Result<Option<String>, EngineError> {
        if !self.game.is_in_progress() {
            return Ok(None);
        }
        let request = SearchRequest::from_config(&self.roster.hint);
        let best = self
            .engines
            .get_mut(Role::Hint)
            .search(self.game.position(), &request)?;
        let mut pos = self.game.position().clone();
        let san = SanPlus::from_move_and_play_unchecked(&mut pos, &best.mv).to_string();
        self.hint = Some(san.clone());
        Ok(Some(san))
    }

    /// Re-evaluate the position with the hint engine. Finished games keep
    /// their last score.
    pub fn refresh_score(&mut self) -> i32 {
        if self.game.is_in_progress() {
            let depth = self.config.eval_depth;
            let cp = self
                .engines
                .get_mut(Role::Hint)
                .evaluate(self.game.position(), depth);
            self.score = match self.game.turn() {
                Color::White => cp,
                Color::Black => -cp,
            };
        }
        self.score
    }

    /// Chance that white wins at the current score
    pub fn win_probability(&self) -> f64 {
        eval::win_probability(self.score)
    }

    /// Captured-material advantage glyphs for (white, black)
    pub fn advantages(&self) -> (String, String) {
        material::advantages(&self.game.placement())
    }

    /// Point differentials for (white, black)
    pub fn score_strings(&self) -> (String, String) {
        material::score_strings(&self.game.placement())
    }

    /// Check flags for (white, black)
    pub fn in_check(&self) -> (bool, bool) {
        self.game.in_check()
    }

    /// Shut down every engine
    pub fn stop(&mut self) {
        self.engines.stop_all();
    }
}

fn saved(result: Result<PathBuf, ExportError>) -> String {
    match result {
        Ok(path) => format!("Saved {}", export::display_name(&path)),
        Err(e) => {
            warn!(error = %e, "export failed");
            e.to_string()
        }
    }
}

#[cfg(test)]
#[path = "session_tests.rs"]
mod session_tests;
