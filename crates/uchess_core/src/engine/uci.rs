//! UCI engine running as a child process
//!
//! Commands are written straight to the child's stdin. A background thread
//! forwards stdout line by line over a channel, so waiting for a reply is a
//! blocking `recv` on the control thread and nothing else is concurrent.

use shakmaty::Chess;
use std::io::{BufRead, BufReader, Write};
use std::process::{Child, ChildStdin, Command, Stdio};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};
use tracing::{debug, info, trace, warn};

use super::protocol::{self, EngineMessage};
use super::{BestMove, Engine, SearchRequest, SearchResult};
use crate::config::EngineConfig;
use crate::error::EngineError;
use crate::game;

/// A running UCI engine subprocess
pub struct UciEngine {
    name: String,
    child: Option<Child>,
    stdin: Option<ChildStdin>,
    lines: Receiver<String>,
    reader: Option<JoinHandle<()>>,
    last: Option<SearchResult>,
    notes: Vec<String>,
}

impl UciEngine {
    /// Spawn the engine, run the handshake, and apply the config's options.
    ///
    /// Any failure here means the role cannot be played; the caller treats
    /// it as a configuration error.
    pub fn start(config: &EngineConfig, handshake_timeout: Duration) -> Result<Self, EngineError> {
        let unreachable = |reason: String| EngineError::Unreachable {
            name: config.name.clone(),
            reason,
        };

        let mut child = Command::new(&config.path)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| unreachable(format!("{}: {}", config.path.display(), e)))?;

        let stdin = child.stdin.take();
        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| unreachable("no stdout pipe".to_string()))?;

        let (tx, rx) = mpsc::channel();
        let reader = thread::Builder::new()
            .name(format!("uci-{}", config.name))
            .spawn(move || {
                for line in BufReader::new(stdout).lines() {
                    let Ok(line) = line else { break };
                    if tx.send(line).is_err() {
                        break;
                    }
                }
            })
            .map_err(|e| unreachable(format!("reader thread: {}", e)))?;

        let mut engine = Self {
            name: config.name.clone(),
            child: Some(child),
            stdin,
            lines: rx,
            reader: Some(reader),
            last: None,
            notes: Vec::new(),
        };

        debug!(engine = %engine.name, path = %config.path.display(), "engine spawned");
        engine
            .handshake(config, handshake_timeout)
            .map_err(|e| unreachable(e.to_string()))?;
        info!(engine = %engine.name, "engine ready");
        Ok(engine)
    }

    fn handshake(&mut self, config: &EngineConfig, timeout: Duration) -> Result<(), EngineError> {
        let deadline = Instant::now() + timeout;

        self.send(protocol::uci())?;
        self.wait_until(deadline, |msg| matches!(msg, EngineMessage::UciOk))?;

        self.send(&protocol::set_option("Hash", &config.hash.to_string()))?;
        self.send(&protocol::set_option("Ponder", &config.ponder.to_string()))?;
        self.send(&protocol::set_option("OwnBook", &config.own_book.to_string()))?;
        self.send(&protocol::set_option("MultiPV", &config.multi_pv.to_string()))?;
        for option in &config.options {
            self.send(&protocol::set_option(&option.name, &option.value))?;
        }
        self.send(protocol::new_game())?;

        self.send(protocol::is_ready())?;
        self.wait_until(deadline, |msg| matches!(msg, EngineMessage::ReadyOk))?;
        Ok(())
    }

    /// `info string` lines the engine printed during the handshake
    pub fn handshake_notes(&self) -> &[String] {
        &self.notes
    }

    fn send(&mut self, cmd: &str) -> Result<(), EngineError> {
        let stdin = self
            .stdin
            .as_mut()
            .ok_or_else(|| EngineError::Stopped(self.name.clone()))?;
        trace!(engine = %self.name, "> {}", cmd);
        writeln!(stdin, "{}", cmd)
            .and_then(|_| stdin.flush())
            .map_err(|source| EngineError::Io {
                name: self.name.clone(),
                source,
            })
    }

    /// Block until the next line arrives or the engine exits
    fn recv(&mut self) -> Result<EngineMessage, EngineError> {
        let line = self
            .lines
            .recv()
            .map_err(|_| EngineError::Exited(self.name.clone()))?;
        trace!(engine = %self.name, "< {}", line);
        Ok(protocol::parse_line(&line))
    }

    fn wait_until<F>(&mut self, deadline: Instant, done: F) -> Result<(), EngineError>
    where
        F: Fn(&EngineMessage) -> bool,
    {
        loop {
            let remaining = deadline.saturating_duration_since(Instant::now());
            let line = match self.lines.recv_timeout(remaining) {
                Ok(line) => line,
                Err(RecvTimeoutError::Timeout) => {
                    return Err(EngineError::Unreachable {
                        name: self.name.clone(),
                        reason: "handshake timed out".to_string(),
                    })
                }
                Err(RecvTimeoutError::Disconnected) => {
                    return Err(EngineError::Exited(self.name.clone()))
                }
            };
            trace!(engine = %self.name, "< {}", line);
            let msg = protocol::parse_line(&line);
            if done(&msg) {
                return Ok(());
            }
            if let EngineMessage::Info(info) = msg {
                if let Some(note) = info.string {
                    debug!(engine = %self.name, "{}", note);
                    self.notes.push(note);
                }
            }
        }
    }

    /// Send the position and a `go` command, then collect output until
    /// `bestmove`
    fn run(&mut self, pos: &Chess, go: &str) -> Result<SearchResult, EngineError> {
        if self.stdin.is_none() {
            return Err(EngineError::Stopped(self.name.clone()));
        }
        // Drop anything left over from an earlier exchange
        while self.lines.try_recv().is_ok() {}

        self.send(&protocol::position(&game::fen_of(pos)))?;
        self.send(go)?;

        let mut result = SearchResult::default();
        loop {
            match self.recv()? {
                EngineMessage::Info(info) => {
                    // Only the principal line counts when MultiPV > 1
                    if info.multipv.unwrap_or(1) != 1 {
                        continue;
                    }
                    if let Some(depth) = info.depth {
                        result.depth = result.depth.max(depth);
                    }
                    if let Some(score) = info.score {
                        result.score = Some(score.centipawns());
                    }
                }
                EngineMessage::BestMove { best, ponder } => {
                    result.best_move = best;
                    result.ponder = ponder;
                    break;
                }
                _ => {}
            }
        }
        self.last = Some(result.clone());
        Ok(result)
    }
}

impl Engine for UciEngine {
    fn name(&self) -> &str {
        &self.name
    }

    fn evaluate(&mut self, pos: &Chess, depth: u8) -> i32 {
        match self.run(pos, &protocol::go_depth(depth)) {
            Ok(result) => result.score.unwrap_or(0),
            Err(e) => {
                warn!(engine = %self.name, error = %e, "evaluation failed");
                0
            }
        }
    }

    fn search(&mut self, pos: &Chess, request: &SearchRequest) -> Result<BestMove, EngineError> {
        let result = self.run(pos, &protocol::go(request))?;
        let token = result
            .best_move
            .ok_or_else(|| EngineError::NoMove(self.name.clone()))?;
        let mv = game::decode_uci(pos, &token).ok_or_else(|| EngineError::BadMove {
            name: self.name.clone(),
            token: token.clone(),
        })?;
        debug!(engine = %self.name, best = %token, "search complete");
        Ok(BestMove { uci: token, mv })
    }

    fn stop(&mut self) {
        if self.stdin.is_some() {
            // Best effort; the process is killed regardless
            let _ = self.send(protocol::quit());
        }
        self.stdin = None;
        if let Some(mut child) = self.child.take() {
            let _ = child.kill();
            let _ = child.wait();
            debug!(engine = %self.name, "engine stopped");
        }
        if let Some(reader) = self.reader.take() {
            let _ = reader.join();
        }
    }

    fn last_result(&self) -> Option<&SearchResult> {
        self.last.as_ref()
    }
}

impl Drop for UciEngine {
    fn drop(&mut self) {
        self.stop();
    }
}
