//! One engine per role
//!
//! White, black, and hint each get their own process, even when two roles
//! name the same config, so a search for one side never disturbs another.

use std::time::Duration;
use tracing::info;

use super::{Engine, UciEngine};
use crate::config::{Role, Roster};
use crate::error::EngineError;

/// The running engines for a session
pub struct Engines {
    white: Box<dyn Engine>,
    black: Box<dyn Engine>,
    hint: Box<dyn Engine>,
}

impl Engines {
    /// Start a UCI process for every role.
    ///
    /// Engines that already started are stopped again if a later one fails.
    pub fn start(roster: &Roster, handshake_timeout: Duration) -> Result<Self, EngineError> {
        let white = UciEngine::start(roster.get(Role::White), handshake_timeout)?;
        let black = UciEngine::start(roster.get(Role::Black), handshake_timeout)?;
        let hint = UciEngine::start(roster.get(Role::Hint), handshake_timeout)?;
        info!(
            white = %roster.white.name,
            black = %roster.black.name,
            hint = %roster.hint.name,
            "engines started"
        );
        Ok(Self::new(Box::new(white), Box::new(black), Box::new(hint)))
    }

    /// Use engines that were created elsewhere
    pub fn new(white: Box<dyn Engine>, black: Box<dyn Engine>, hint: Box<dyn Engine>) -> Self {
        Self { white, black, hint }
    }

    pub fn get_mut(&mut self, role: Role) -> &mut dyn Engine {
        match role {
            Role::White => self.white.as_mut(),
            Role::Black => self.black.as_mut(),
            Role::Hint => self.hint.as_mut(),
        }
    }

    pub fn stop_all(&mut self) {
        for role in Role::ALL {
            self.get_mut(role).stop();
        }
    }
}

impl Drop for Engines {
    fn drop(&mut self) {
        self.stop_all();
    }
}
