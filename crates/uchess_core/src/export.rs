//! Writing games and boards to disk for the `save` and `image` commands

use chrono::Local;
use shakmaty::{Color, File, Piece, Position, Rank, Role, Square};
use std::path::{Path, PathBuf};
use tracing::info;

use crate::error::ExportError;
use crate::game::GameSession;

/// Destination for saved games and board snapshots
pub trait Exporter: Send {
    /// Write the game as PGN and return the file written
    fn save_game(
        &mut self,
        game: &GameSession,
        white: &str,
        black: &str,
    ) -> Result<PathBuf, ExportError>;

    /// Write a snapshot of the current board and return the file written
    fn save_board(&mut self, game: &GameSession) -> Result<PathBuf, ExportError>;
}

/// Local timestamp used in save file names
pub fn timestamp() -> String {
    Local::now().format("%Y%m%d%H%M%S").to_string()
}

/// Writes `uchess_<timestamp>.txt` files into a directory
#[derive(Debug, Clone)]
pub struct FileExporter {
    dir: PathBuf,
}

impl FileExporter {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Save files in the current working directory
    pub fn cwd() -> Self {
        Self::new(".")
    }

    fn write(&self, name: String, contents: &str) -> Result<PathBuf, ExportError> {
        let path = self.dir.join(name);
        std::fs::write(&path, contents).map_err(|source| ExportError::Write {
            path: path.clone(),
            source,
        })?;
        info!(path = %path.display(), "saved");
        Ok(path)
    }
}

impl Exporter for FileExporter {
    fn save_game(
        &mut self,
        game: &GameSession,
        white: &str,
        black: &str,
    ) -> Result<PathBuf, ExportError> {
        let name = format!("uchess_{}.txt", timestamp());
        self.write(name, &pgn(game, white, black))
    }

    fn save_board(&mut self, game: &GameSession) -> Result<PathBuf, ExportError> {
        let name = format!("uchess_{}_board.txt", timestamp());
        self.write(name, &board_diagram(game))
    }
}

/// File name shown in the `Saved <file>` status message
pub fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|f| f.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Render the game as PGN
pub fn pgn(game: &GameSession, white: &str, black: &str) -> String {
    let start_fen = crate::game::fen_of(game.start_position());
    let custom_start = start_fen != crate::config::DEFAULT_FEN;
    let result = game.result_token();

    let mut out = String::new();
    out.push_str("[Event \"uchess\"]\n");
    out.push_str(&format!("[Date \"{}\"]\n", Local::now().format("%Y.%m.%d")));
    out.push_str(&format!("[White \"{}\"]\n", white));
    out.push_str(&format!("[Black \"{}\"]\n", black));
    out.push_str(&format!("[Result \"{}\"]\n", result));
    if custom_start {
        out.push_str("[SetUp \"1\"]\n");
        out.push_str(&format!("[FEN \"{}\"]\n", start_fen));
    }
    out.push('\n');

    let start = game.start_position();
    let mut number = start.fullmoves().get();
    let mut turn = start.turn();
    let mut tokens = Vec::new();
    for (i, san) in game.san_moves().into_iter().enumerate() {
        match turn {
            Color::White => tokens.push(format!("{}.", number)),
            // A game starting with black to move opens with "N..."
            Color::Black if i == 0 => tokens.push(format!("{}...", number)),
            Color::Black => {}
        }
        tokens.push(san);
        if turn == Color::Black {
            number += 1;
        }
        turn = turn.other();
    }
    tokens.push(result.to_string());
    out.push_str(&tokens.join(" "));
    out.push('\n');
    out
}

fn glyph(piece: Piece) -> char {
    match (piece.color, piece.role) {
        (Color::White, Role::Pawn) => '♙',
        (Color::White, Role::Knight) => '♘',
        (Color::White, Role::Bishop) => '♗',
        (Color::White, Role::Rook) => '♖',
        (Color::White, Role::Queen) => '♕',
        (Color::White, Role::King) => '♔',
        (Color::Black, Role::Pawn) => '♟',
        (Color::Black, Role::Knight) => '♞',
        (Color::Black, Role::Bishop) => '♝',
        (Color::Black, Role::Rook) => '♜',
        (Color::Black, Role::Queen) => '♛',
        (Color::Black, Role::King) => '♚',
    }
}

/// Plain text board, rank 8 at the top, followed by the FEN
pub fn board_diagram(game: &GameSession) -> String {
    let board = game.position().board();
    let mut out = String::new();
    for rank in Rank::ALL.iter().rev() {
        out.push_str(&format!("{} ", rank.char()));
        for file in File::ALL {
            let square = Square::from_coords(file, *rank);
            let cell = board.piece_at(square).map(glyph).unwrap_or('·');
            out.push(' ');
            out.push(cell);
        }
        out.push('\n');
    }
    out.push_str("  ");
    for file in File::ALL {
        out.push(' ');
        out.push(file.char());
    }
    out.push_str("\n\n");
    out.push_str(&game.fen());
    out.push('\n');
    out
}

#[cfg(test)]
#[path = "export_tests.rs"]
mod export_tests;
