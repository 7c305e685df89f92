//! UCI command formatting and response parsing

use super::SearchRequest;

/// Centipawn value reported for a mate in zero
pub const MATE_SCORE: i32 = 30_000;

/// Mate distances beyond this are treated as this far away
pub const MAX_MATE_DISTANCE: i32 = 1_000;

/// Score from an `info` line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Score {
    /// Centipawns
    Cp(i32),
    /// Mate in N moves (negative when the engine is getting mated)
    Mate(i32),
}

impl Score {
    /// Collapse to centipawns; mates map to just inside +/- `MATE_SCORE`
    pub fn centipawns(self) -> i32 {
        match self {
            Score::Cp(cp) => cp,
            Score::Mate(n) => {
                let n = n.clamp(-MAX_MATE_DISTANCE, MAX_MATE_DISTANCE);
                if n >= 0 {
                    MATE_SCORE - n
                } else {
                    -MATE_SCORE - n
                }
            }
        }
    }
}

/// The parts of an `info` line the client uses
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Info {
    pub depth: Option<u8>,
    pub multipv: Option<u32>,
    pub score: Option<Score>,
    pub pv: Vec<String>,
    /// Free text after `info string`
    pub string: Option<String>,
}

/// One line of engine output
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineMessage {
    UciOk,
    ReadyOk,
    Id { key: String, value: String },
    Info(Info),
    /// `bestmove <move> [ponder <move>]`; `None` for `(none)` / `0000`
    BestMove {
        best: Option<String>,
        ponder: Option<String>,
    },
    /// Anything else (option listings, copyright banners, ...)
    Other(String),
}

pub fn uci() -> &'static str {
    "uci"
}

pub fn is_ready() -> &'static str {
    "isready"
}

pub fn new_game() -> &'static str {
    "ucinewgame"
}

pub fn quit() -> &'static str {
    "quit"
}

pub fn set_option(name: &str, value: &str) -> String {
    format!("setoption name {} value {}", name, value)
}

/// Full position, never incremental: undo and reset jump around
pub fn position(fen: &str) -> String {
    format!("position fen {}", fen)
}

/// Fixed-depth analysis with no time limit
pub fn go_depth(depth: u8) -> String {
    format!("go depth {}", depth)
}

/// Search bounded by whatever the request specifies
pub fn go(request: &SearchRequest) -> String {
    let mut cmd = String::from("go");
    if request.depth > 0 {
        cmd.push_str(&format!(" depth {}", request.depth));
    }
    if let Some(time) = request.move_time {
        cmd.push_str(&format!(" movetime {}", time.as_millis()));
    }
    if request.depth == 0 && request.move_time.is_none() {
        // Unbounded searches never return on their own
        cmd.push_str(" depth 1");
    }
    if !request.search_moves.is_empty() {
        cmd.push_str(" searchmoves ");
        cmd.push_str(&request.search_moves.join(" "));
    }
    cmd
}

fn null_move(token: &str) -> bool {
    matches!(token, "(none)" | "0000" | "none")
}

fn parse_info(tokens: &[&str]) -> Info {
    let mut info = Info::default();
    let mut i = 0;
    while i < tokens.len() {
        match tokens[i] {
            "depth" => {
                info.depth = tokens.get(i + 1).and_then(|t| t.parse().ok());
                i += 2;
            }
            "multipv" => {
                info.multipv = tokens.get(i + 1).and_then(|t| t.parse().ok());
                i += 2;
            }
            "score" => {
                let value = tokens.get(i + 2).and_then(|t| t.parse::<i32>().ok());
                info.score = match (tokens.get(i + 1).copied(), value) {
                    (Some("cp"), Some(v)) => Some(Score::Cp(v)),
                    (Some("mate"), Some(v)) => Some(Score::Mate(v)),
                    _ => info.score,
                };
                i += 3;
            }
            "pv" => {
                // pv runs to the end of the line
                info.pv = tokens[i + 1..].iter().map(|t| t.to_string()).collect();
                break;
            }
            "string" => {
                info.string = Some(tokens[i + 1..].join(" "));
                break;
            }
            _ => i += 1,
        }
    }
    info
}

/// Classify one line of engine output
pub fn parse_line(line: &str) -> EngineMessage {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    match tokens.first().copied() {
        Some("uciok") => EngineMessage::UciOk,
        Some("readyok") => EngineMessage::ReadyOk,
        Some("id") if tokens.len() >= 2 => EngineMessage::Id {
            key: tokens[1].to_string(),
            value: tokens[2..].join(" "),
        },
        Some("info") => EngineMessage::Info(parse_info(&tokens[1..])),
        Some("bestmove") => {
            let best = tokens
                .get(1)
                .filter(|t| !null_move(t))
                .map(|t| t.to_string());
            let ponder = match (tokens.get(2), tokens.get(3)) {
                (Some(&"ponder"), Some(p)) if !null_move(p) => Some(p.to_string()),
                _ => None,
            };
            EngineMessage::BestMove { best, ponder }
        }
        _ => EngineMessage::Other(line.trim().to_string()),
    }
}

#[cfg(test)]
#[path = "protocol_tests.rs"]
mod protocol_tests;
