//! Error types for configuration, engine sessions, and exports

use std::path::PathBuf;
use thiserror::Error;

use crate::config::Role;

/// Problems detected while loading or validating the configuration.
///
/// All of these are fatal at startup: the client never runs with an
/// incomplete engine roster.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse JSON config: {0}")]
    Json(#[from] serde_json::Error),
    #[error("failed to parse TOML config: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("unsupported config format: {0} (expected .json or .toml)")]
    UnsupportedFormat(PathBuf),
    #[error("no engine named {name:?} configured for the {role} role")]
    MissingEngine { role: Role, name: String },
    #[error("engine name {0:?} is configured more than once")]
    DuplicateEngine(String),
    #[error("invalid player type {0:?} (expected \"human\" or \"cpu\")")]
    InvalidPlayer(String),
    #[error("invalid starting position {fen:?}: {reason}")]
    InvalidFen { fen: String, reason: String },
}

/// Failures talking to an engine subprocess.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The executable could not be started or never completed the handshake.
    #[error("engine {name} unreachable: {reason}")]
    Unreachable { name: String, reason: String },
    /// The engine closed its output stream.
    #[error("engine {0} exited")]
    Exited(String),
    /// Writing a command to the engine failed.
    #[error("engine {name} I/O error: {source}")]
    Io {
        name: String,
        #[source]
        source: std::io::Error,
    },
    /// The engine produced no usable best move.
    #[error("engine {0} returned no move")]
    NoMove(String),
    /// The best move token could not be parsed or is not legal here.
    #[error("engine {name} returned an unusable move {token:?}")]
    BadMove { name: String, token: String },
    /// The session was stopped and can no longer be used.
    #[error("engine {0} is stopped")]
    Stopped(String),
}

/// A move the rules rejected. The session is left untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoveError {
    #[error("the game is over")]
    GameOver,
    #[error("illegal move {0:?}")]
    Illegal(String),
}

/// Failures writing save files.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("{path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Reasons a game session could not be started.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Engine(#[from] EngineError),
}
