//! Minimal UCI engine for exercising the client end to end
//!
//! Plays a random legal move and scores positions by material. The `Mode`
//! option switches it into failure modes:
//!
//! - `random` (default): random legal move
//! - `nomove`: `bestmove (none)`
//! - `badmove`: a move token that is never legal
//! - `exit`: quit without answering `go`
//! - `hang`: never answer `isready`
//!
//! Before `readyok` it reports the option names it was sent, in order, as
//! `info string options <name>,<name>,...`.

use rand::seq::SliceRandom;
use rand::thread_rng;
use shakmaty::fen::Fen;
use shakmaty::uci::UciMove;
use shakmaty::{CastlingMode, Chess, Position, Role};
use std::io::{self, BufRead, Write};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Random,
    NoMove,
    BadMove,
    Exit,
    Hang,
}

impl Mode {
    fn parse(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "random" => Some(Mode::Random),
            "nomove" => Some(Mode::NoMove),
            "badmove" => Some(Mode::BadMove),
            "exit" => Some(Mode::Exit),
            "hang" => Some(Mode::Hang),
            _ => None,
        }
    }
}

fn piece_value(role: Role) -> i32 {
    match role {
        Role::Pawn => 100,
        Role::Knight | Role::Bishop => 300,
        Role::Rook => 500,
        Role::Queen => 900,
        Role::King => 0,
    }
}

/// Material balance in centipawns for the side to move
fn material_score(pos: &Chess) -> i32 {
    let board = pos.board();
    let us = pos.turn();
    Role::ALL
        .iter()
        .map(|&role| {
            let ours = (board.by_color(us) & board.by_role(role)).count() as i32;
            let theirs = (board.by_color(us.other()) & board.by_role(role)).count() as i32;
            (ours - theirs) * piece_value(role)
        })
        .sum()
}

/// `position startpos [moves ...]` or `position fen <fen> [moves ...]`
fn set_position(args: &[&str]) -> Option<Chess> {
    let moves_at = args.iter().position(|&t| t == "moves").unwrap_or(args.len());
    let mut pos = match args.first() {
        Some(&"startpos") => Chess::default(),
        Some(&"fen") => {
            let fen: Fen = args[1..moves_at].join(" ").parse().ok()?;
            fen.into_position(CastlingMode::Standard).ok()?
        }
        _ => return None,
    };
    for token in args.iter().skip(moves_at + 1) {
        let uci: UciMove = token.parse().ok()?;
        let m = uci.to_move(&pos).ok()?;
        pos.play_unchecked(&m);
    }
    Some(pos)
}

/// Name of a `setoption name <name> [value <value>]` command
fn option_name(parts: &[&str]) -> Option<String> {
    let idx_name = parts.iter().position(|&x| x == "name")?;
    let end = parts.iter().position(|&x| x == "value").unwrap_or(parts.len());
    let name = parts.get(idx_name + 1..end)?.join(" ");
    (!name.is_empty()).then_some(name)
}

/// Value of `setoption name <name> value <value>` when the name matches
fn option_value<'a>(parts: &[&'a str], name: &str) -> Option<&'a str> {
    let idx_name = parts.iter().position(|&x| x == "name")?;
    let idx_val = parts.iter().position(|&x| x == "value")?;
    let option = parts.get(idx_name + 1..idx_val)?.join(" ");
    if !option.eq_ignore_ascii_case(name) {
        return None;
    }
    parts.get(idx_val + 1).copied()
}

fn main() {
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    let mut pos = Chess::default();
    let mut mode = Mode::Random;
    let mut received: Vec<String> = Vec::new();

    for line in stdin.lock().lines() {
        let line = match line {
            Ok(l) => l,
            Err(_) => break,
        };
        let parts: Vec<&str> = line.split_whitespace().collect();
        if parts.is_empty() {
            continue;
        }

        match parts[0] {
            "uci" => {
                writeln!(stdout, "id name mock_uci").ok();
                writeln!(stdout, "id author uchess").ok();
                writeln!(stdout, "option name Mode type combo default random var random var nomove var badmove var exit var hang").ok();
                writeln!(stdout, "uciok").ok();
            }
            "isready" => {
                if mode != Mode::Hang {
                    writeln!(stdout, "info string options {}", received.join(",")).ok();
                    writeln!(stdout, "readyok").ok();
                }
            }
            "setoption" => {
                if let Some(name) = option_name(&parts) {
                    received.push(name);
                }
                if let Some(m) = option_value(&parts, "Mode").and_then(Mode::parse) {
                    mode = m;
                }
            }
            "ucinewgame" => {
                pos = Chess::default();
            }
            "position" => {
                if let Some(p) = set_position(&parts[1..]) {
                    pos = p;
                }
            }
            "go" => {
                if mode == Mode::Exit {
                    break;
                }
                let moves = pos.legal_moves();
                let best = match mode {
                    Mode::NoMove => None,
                    Mode::BadMove => Some("a1a1".to_string()),
                    _ => moves
                        .choose(&mut thread_rng())
                        .map(|m| m.to_uci(CastlingMode::Standard).to_string()),
                };
                match best {
                    Some(best) => {
                        writeln!(stdout, "info depth 1 score cp {} nodes {} pv {}", material_score(&pos), moves.len(), best).ok();
                        writeln!(stdout, "bestmove {}", best).ok();
                    }
                    None => {
                        writeln!(stdout, "info depth 0 score cp {}", material_score(&pos)).ok();
                        writeln!(stdout, "bestmove (none)").ok();
                    }
                }
            }
            "quit" => break,
            _ => {
                // ignore unknown commands
            }
        }
        stdout.flush().ok();
    }
}
