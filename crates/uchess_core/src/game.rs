//! Authoritative game state on top of the shakmaty rules
//!
//! `GameSession` keeps the starting position and the list of applied moves
//! so that undo can rebuild the game from scratch instead of unmaking
//! moves one at a time.

use shakmaty::fen::Fen;
use shakmaty::san::SanPlus;
use shakmaty::uci::UciMove;
use shakmaty::{CastlingMode, Chess, Color, EnPassantMode, Move, Outcome, Position};
use std::fmt;

use crate::error::MoveError;

/// Where the game stands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutcomeTag {
    InProgress,
    Checkmate,
    Draw,
    ResignedWhite,
    ResignedBlack,
}

impl OutcomeTag {
    pub fn is_terminal(self) -> bool {
        self != OutcomeTag::InProgress
    }
}

impl fmt::Display for OutcomeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            OutcomeTag::InProgress => "in-progress",
            OutcomeTag::Checkmate => "checkmate",
            OutcomeTag::Draw => "draw",
            OutcomeTag::ResignedWhite => "resigned-white",
            OutcomeTag::ResignedBlack => "resigned-black",
        };
        f.write_str(s)
    }
}

/// Parse a FEN into a playable position
pub fn position_from_fen(fen: &str) -> Result<Chess, String> {
    let fen: Fen = fen.trim().parse().map_err(|e| format!("{}", e))?;
    fen.into_position(CastlingMode::Standard)
        .map_err(|e| format!("{}", e))
}

/// Render a position as FEN
pub fn fen_of(pos: &Chess) -> String {
    Fen::from_position(pos.clone(), EnPassantMode::Legal).to_string()
}

/// One chess game: starting position, applied moves, and outcome
#[derive(Debug, Clone)]
pub struct GameSession {
    start: Chess,
    position: Chess,
    moves: Vec<Move>,
    outcome: OutcomeTag,
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new()
    }
}

impl PartialEq for GameSession {
    fn eq(&self, other: &Self) -> bool {
        self.moves == other.moves
            && self.outcome == other.outcome
            && fen_of(&self.start) == fen_of(&other.start)
            && fen_of(&self.position) == fen_of(&other.position)
    }
}

impl GameSession {
    /// A game at the standard starting position
    pub fn new() -> Self {
        Self::from_position(Chess::default())
    }

    pub fn from_position(start: Chess) -> Self {
        let mut game = Self {
            position: start.clone(),
            start,
            moves: Vec::new(),
            outcome: OutcomeTag::InProgress,
        };
        game.update_outcome();
        game
    }

    pub fn from_fen(fen: &str) -> Result<Self, String> {
        Ok(Self::from_position(position_from_fen(fen)?))
    }

    pub fn position(&self) -> &Chess {
        &self.position
    }

    pub fn start_position(&self) -> &Chess {
        &self.start
    }

    pub fn moves(&self) -> &[Move] {
        &self.moves
    }

    pub fn turn(&self) -> Color {
        self.position.turn()
    }

    pub fn outcome(&self) -> OutcomeTag {
        self.outcome
    }

    pub fn is_in_progress(&self) -> bool {
        !self.outcome.is_terminal()
    }

    pub fn fen(&self) -> String {
        fen_of(&self.position)
    }

    /// Piece placement field of the current FEN
    pub fn placement(&self) -> String {
        let fen = self.fen();
        fen.split_whitespace().next().unwrap_or_default().to_string()
    }

    /// Check flags for (white, black)
    pub fn in_check(&self) -> (bool, bool) {
        if !self.position.is_check() {
            return (false, false);
        }
        match self.turn() {
            Color::White => (true, false),
            Color::Black => (false, true),
        }
    }

    /// Decode move text in SAN (`Nf3`, `O-O`) or UCI (`g1f3`) notation
    pub fn parse_move(&self, text: &str) -> Option<Move> {
        if let Ok(san) = text.parse::<SanPlus>() {
            if let Ok(m) = san.san.to_move(&self.position) {
                return Some(m);
            }
        }
        let uci: UciMove = text.parse().ok()?;
        uci.to_move(&self.position).ok()
    }

    /// Apply a move typed by a player
    pub fn apply_move_text(&mut self, text: &str) -> Result<Move, MoveError> {
        if self.outcome.is_terminal() {
            return Err(MoveError::GameOver);
        }
        let m = self
            .parse_move(text)
            .ok_or_else(|| MoveError::Illegal(text.to_string()))?;
        self.apply_move(&m)?;
        Ok(m)
    }

    pub fn apply_move(&mut self, m: &Move) -> Result<(), MoveError> {
        if self.outcome.is_terminal() {
            return Err(MoveError::GameOver);
        }
        if !self.position.is_legal(m) {
            return Err(MoveError::Illegal(
                m.to_uci(CastlingMode::Standard).to_string(),
            ));
        }
        self.position.play_unchecked(m);
        self.moves.push(m.clone());
        self.update_outcome();
        Ok(())
    }

    fn update_outcome(&mut self) {
        self.outcome = match self.position.outcome() {
            Some(Outcome::Decisive { .. }) => OutcomeTag::Checkmate,
            Some(Outcome::Draw) => OutcomeTag::Draw,
            None => OutcomeTag::InProgress,
        };
    }

    /// The side to move gives up. Has no effect on a finished game.
    pub fn resign(&mut self) {
        if self.outcome.is_terminal() {
            return;
        }
        self.outcome = match self.turn() {
            Color::White => OutcomeTag::ResignedWhite,
            Color::Black => OutcomeTag::ResignedBlack,
        };
    }

    /// A fresh game from the same start, replaying all but the last two
    /// plies. With fewer than two moves this is the starting position.
    pub fn undo_round(&self) -> GameSession {
        let keep = self.moves.len().saturating_sub(2);
        let mut game = GameSession::from_position(self.start.clone());
        for m in &self.moves[..keep] {
            // Replaying moves that were legal before cannot fail
            if game.apply_move(m).is_err() {
                break;
            }
        }
        game
    }

    /// Moves in SAN with check and mate suffixes
    pub fn san_moves(&self) -> Vec<String> {
        let mut pos = self.start.clone();
        self.moves
            .iter()
            .map(|m| SanPlus::from_move_and_play_unchecked(&mut pos, m).to_string())
            .collect()
    }

    /// PGN result token
    pub fn result_token(&self) -> &'static str {
        match self.outcome {
            OutcomeTag::InProgress => "*",
            OutcomeTag::Draw => "1/2-1/2",
            OutcomeTag::ResignedWhite => "0-1",
            OutcomeTag::ResignedBlack => "1-0",
            // The side to move is the one that got mated
            OutcomeTag::Checkmate => match self.turn() {
                Color::White => "0-1",
                Color::Black => "1-0",
            },
        }
    }
}

/// Decode an engine's UCI move token against a position
pub fn decode_uci(pos: &Chess, token: &str) -> Option<Move> {
    let uci: UciMove = token.parse().ok()?;
    uci.to_move(pos).ok()
}

#[cfg(test)]
#[path = "game_tests.rs"]
mod game_tests;
