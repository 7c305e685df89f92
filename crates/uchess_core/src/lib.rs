//! Engine session core for uchess
//!
//! This crate provides:
//! - UCI engine processes, one per role (white, black, hint)
//! - The game session controller that applies moves and commands
//! - Material advantage strings and the text input buffer
//!
//! # Usage
//!
//! ```no_run
//! use uchess_core::{Config, Session};
//!
//! let config = Config::default_with_engine("stockfish");
//! let mut session = Session::start(config)?;
//! let outcome = session.process_command("e4");
//! println!("{}", outcome.status);
//! # Ok::<(), uchess_core::SessionError>(())
//! ```

pub mod config;
pub mod engine;
pub mod error;
pub mod eval;
pub mod export;
pub mod game;
pub mod input;
pub mod material;
pub mod session;

pub use config::{Config, EngineConfig, PlayerKind, Role, Roster, UciOption};
pub use engine::{BestMove, Engine, Engines, SearchRequest, SearchResult, UciEngine};
pub use error::{ConfigError, EngineError, ExportError, MoveError, SessionError};
pub use export::{Exporter, FileExporter};
pub use game::{GameSession, OutcomeTag};
pub use input::InputBuffer;
pub use material::{advantages, score_strings, MaterialBalance};
pub use session::{CommandOutcome, Session};
