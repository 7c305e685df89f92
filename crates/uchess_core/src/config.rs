//! Client configuration: engine roster, player types, starting position
//!
//! The configuration is an explicit value threaded into session
//! construction. The zero-configuration defaults are produced by
//! [`Config::default_with_engine`] rather than kept in shared tables, so
//! every caller (and every test) owns its own roster.

use serde::{Deserialize, Serialize};
use shakmaty::Color;
use std::collections::HashSet;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use crate::error::ConfigError;
use crate::game;

/// Standard starting position in Forsyth-Edwards Notation
pub const DEFAULT_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// Depth used for the advisory evaluation after each ply
pub const DEFAULT_EVAL_DEPTH: u8 = 10;

/// How long an engine may take to answer `uci` / `isready` at startup
pub const DEFAULT_HANDSHAKE_TIMEOUT_MS: u64 = 10_000;

/// A free-form `setoption` sent to the engine after the standard options
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UciOption {
    pub name: String,
    pub value: String,
}

impl UciOption {
    pub fn new(name: &str, value: &str) -> Self {
        Self {
            name: name.to_string(),
            value: value.to_string(),
        }
    }
}

/// Identity and tuning for one engine
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EngineConfig {
    /// Unique key referenced by the white/black/hint roles
    pub name: String,
    /// Path to the engine executable
    #[serde(rename = "engine")]
    pub path: PathBuf,
    /// Hash table size in MB
    #[serde(default = "default_hash")]
    pub hash: u32,
    #[serde(default)]
    pub ponder: bool,
    #[serde(default)]
    pub own_book: bool,
    #[serde(rename = "multiPV", default = "default_multi_pv")]
    pub multi_pv: u32,
    /// Fixed search depth in plies
    #[serde(default = "default_depth")]
    pub depth: u8,
    /// Space separated UCI moves to restrict the search to (empty = all)
    #[serde(default)]
    pub search_moves: String,
    /// Move time budget in milliseconds (0 = depth-bounded only)
    #[serde(default)]
    pub move_time: u64,
    #[serde(default)]
    pub options: Vec<UciOption>,
}

fn default_hash() -> u32 {
    128
}

fn default_multi_pv() -> u32 {
    1
}

fn default_depth() -> u8 {
    1
}

impl EngineConfig {
    /// The zero-configuration stockfish entry
    pub fn stockfish(path: impl Into<PathBuf>) -> Self {
        Self {
            name: "stockfish".to_string(),
            path: path.into(),
            hash: default_hash(),
            ponder: false,
            own_book: false,
            multi_pv: default_multi_pv(),
            depth: default_depth(),
            search_moves: String::new(),
            move_time: 100,
            options: default_options(),
        }
    }

    /// Moves the search is restricted to, if any
    pub fn search_moves(&self) -> Vec<String> {
        self.search_moves
            .split_whitespace()
            .map(str::to_string)
            .collect()
    }

    /// Move time budget, `None` when the engine searches by depth only
    pub fn move_time(&self) -> Option<Duration> {
        (self.move_time > 0).then(|| Duration::from_millis(self.move_time))
    }
}

/// Options every default engine receives
pub fn default_options() -> Vec<UciOption> {
    // stockfish skill level
    vec![UciOption::new("skill level", "3")]
}

/// Who moves a given color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlayerKind {
    Human,
    Cpu,
}

impl PlayerKind {
    pub fn emoji(self) -> &'static str {
        match self {
            PlayerKind::Human => "👤",
            PlayerKind::Cpu => "🤖",
        }
    }
}

impl FromStr for PlayerKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "human" => Ok(PlayerKind::Human),
            "cpu" => Ok(PlayerKind::Cpu),
            other => Err(ConfigError::InvalidPlayer(other.to_string())),
        }
    }
}

impl fmt::Display for PlayerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlayerKind::Human => write!(f, "human"),
            PlayerKind::Cpu => write!(f, "cpu"),
        }
    }
}

/// The three engine roles a session is built from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    White,
    Black,
    Hint,
}

impl Role {
    pub const ALL: [Role; 3] = [Role::White, Role::Black, Role::Hint];

    pub fn for_color(color: Color) -> Self {
        match color {
            Color::White => Role::White,
            Color::Black => Role::Black,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::White => write!(f, "white"),
            Role::Black => write!(f, "black"),
            Role::Hint => write!(f, "hint"),
        }
    }
}

/// Engine configs resolved for each role
#[derive(Debug, Clone)]
pub struct Roster {
    pub white: EngineConfig,
    pub black: EngineConfig,
    pub hint: EngineConfig,
}

impl Roster {
    pub fn get(&self, role: Role) -> &EngineConfig {
        match role {
            Role::White => &self.white,
            Role::Black => &self.black,
            Role::Hint => &self.hint,
        }
    }
}

/// Complete client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    pub uci_white: String,
    pub uci_black: String,
    pub uci_hint: String,
    pub uci_engines: Vec<EngineConfig>,
    #[serde(default = "default_fen")]
    pub fen: String,
    pub white_piece: PlayerKind,
    pub black_piece: PlayerKind,
    #[serde(default)]
    pub white_name: String,
    #[serde(default)]
    pub black_name: String,
    #[serde(default = "default_eval_depth")]
    pub eval_depth: u8,
    #[serde(default = "default_handshake_timeout_ms")]
    pub handshake_timeout_ms: u64,
}

fn default_fen() -> String {
    DEFAULT_FEN.to_string()
}

fn default_eval_depth() -> u8 {
    DEFAULT_EVAL_DEPTH
}

fn default_handshake_timeout_ms() -> u64 {
    DEFAULT_HANDSHAKE_TIMEOUT_MS
}

impl Config {
    /// Zero-configuration setup: one stockfish engine driving black and hints
    pub fn default_with_engine(path: impl Into<PathBuf>) -> Self {
        Self {
            uci_white: "stockfish".to_string(),
            uci_black: "stockfish".to_string(),
            uci_hint: "stockfish".to_string(),
            uci_engines: vec![EngineConfig::stockfish(path)],
            fen: default_fen(),
            white_piece: PlayerKind::Human,
            black_piece: PlayerKind::Cpu,
            white_name: String::new(),
            black_name: String::new(),
            eval_depth: DEFAULT_EVAL_DEPTH,
            handshake_timeout_ms: DEFAULT_HANDSHAKE_TIMEOUT_MS,
        }
    }

    /// Load a config file, picking the format from the extension
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Self::from_json_str(&contents),
            Some("toml") => Self::from_toml_str(&contents),
            _ => Err(ConfigError::UnsupportedFormat(path.to_path_buf())),
        }
    }

    pub fn from_json_str(contents: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(contents)?)
    }

    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(contents)?)
    }

    /// Pretty JSON, used for the `--tmpl` template output
    pub fn to_json_pretty(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    fn role_name(&self, role: Role) -> &str {
        match role {
            Role::White => &self.uci_white,
            Role::Black => &self.uci_black,
            Role::Hint => &self.uci_hint,
        }
    }

    /// Look up the engine config a role refers to
    pub fn engine_for(&self, role: Role) -> Result<&EngineConfig, ConfigError> {
        let name = self.role_name(role);
        self.uci_engines
            .iter()
            .find(|e| e.name == name)
            .ok_or_else(|| ConfigError::MissingEngine {
                role,
                name: name.to_string(),
            })
    }

    /// Resolve all three roles, failing on the first missing mapping
    pub fn roster(&self) -> Result<Roster, ConfigError> {
        Ok(Roster {
            white: self.engine_for(Role::White)?.clone(),
            black: self.engine_for(Role::Black)?.clone(),
            hint: self.engine_for(Role::Hint)?.clone(),
        })
    }

    pub fn player(&self, color: Color) -> PlayerKind {
        match color {
            Color::White => self.white_piece,
            Color::Black => self.black_piece,
        }
    }

    pub fn is_cpu(&self, color: Color) -> bool {
        self.player(color) == PlayerKind::Cpu
    }

    /// False when the engines play each other with no human involved
    pub fn is_interactive(&self) -> bool {
        !(self.white_piece == PlayerKind::Cpu && self.black_piece == PlayerKind::Cpu)
    }

    pub fn player_name(&self, color: Color) -> &str {
        match color {
            Color::White => &self.white_name,
            Color::Black => &self.black_name,
        }
    }

    /// Fill in blank player names: the engine name for cpu players, the
    /// login name for humans
    pub fn fill_player_names(&mut self) {
        if self.white_name.is_empty() {
            self.white_name = self.default_name(Color::White);
        }
        if self.black_name.is_empty() {
            self.black_name = self.default_name(Color::Black);
        }
    }

    fn default_name(&self, color: Color) -> String {
        match self.player(color) {
            PlayerKind::Cpu => {
                let name = self.role_name(Role::for_color(color));
                Path::new(name)
                    .file_name()
                    .and_then(|f| f.to_str())
                    .unwrap_or(name)
                    .to_string()
            }
            PlayerKind::Human => std::env::var("USER")
                .or_else(|_| std::env::var("USERNAME"))
                .unwrap_or_else(|_| "player".to_string()),
        }
    }

    /// Check the roster and starting position before any engine is spawned
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut seen = HashSet::new();
        for engine in &self.uci_engines {
            if !seen.insert(engine.name.as_str()) {
                return Err(ConfigError::DuplicateEngine(engine.name.clone()));
            }
        }
        self.roster()?;
        game::position_from_fen(&self.fen).map_err(|reason| ConfigError::InvalidFen {
            fen: self.fen.clone(),
            reason,
        })?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod config_tests;
