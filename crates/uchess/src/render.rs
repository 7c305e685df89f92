//! Plain-text view of the session

use uchess_core::config::PlayerKind;
use uchess_core::eval::{at_scale, round_nearest};
use uchess_core::game::{GameSession, OutcomeTag};
use uchess_core::{InputBuffer, Session};

/// Cells in the evaluation bar
pub const BAR_CELLS: usize = 20;

fn glyph(letter: char) -> char {
    match letter {
        'P' => '♙',
        'N' => '♘',
        'B' => '♗',
        'R' => '♖',
        'Q' => '♕',
        'K' => '♔',
        'p' => '♟',
        'n' => '♞',
        'b' => '♝',
        'r' => '♜',
        'q' => '♛',
        'k' => '♚',
        _ => '·',
    }
}

/// Board rows from rank 8 down, with file letters underneath
pub fn board_lines(game: &GameSession) -> Vec<String> {
    let placement = game.placement();
    let mut lines = Vec::with_capacity(9);
    for (i, row) in placement.split('/').enumerate() {
        let mut line = format!("{} ", 8 - i);
        for c in row.chars() {
            match c.to_digit(10) {
                Some(empty) => {
                    for _ in 0..empty {
                        line.push_str(" ·");
                    }
                }
                None => {
                    line.push(' ');
                    line.push(glyph(c));
                }
            }
        }
        lines.push(line);
    }
    lines.push("   a b c d e f g h".to_string());
    lines
}

/// Name line for one player: emoji, name, check flag, material lead
pub fn player_line(kind: PlayerKind, name: &str, in_check: bool, advantage: &str, lead: &str) -> String {
    let mut line = format!("{} {}", kind.emoji(), name);
    if in_check {
        line.push_str(" (check)");
    }
    if !advantage.is_empty() {
        line.push_str("  ");
        line.push_str(advantage);
    }
    if !lead.is_empty() {
        line.push(' ');
        line.push_str(lead);
    }
    line
}

/// Evaluation line: pawns from white's side, a bar, and white's win chance
pub fn eval_line(score: i32, win_probability: f64) -> String {
    let pct = win_probability * 100.0;
    let bar: String = (1..=BAR_CELLS)
        .map(|i| if at_scale(i, BAR_CELLS, pct) { '█' } else { '░' })
        .collect();
    format!(
        "{:+.2}  {}  {}%",
        f64::from(score) / 100.0,
        bar,
        round_nearest(pct, 1.0)
    )
}

/// Turn or result line
pub fn state_line(game: &GameSession) -> String {
    match game.outcome() {
        OutcomeTag::InProgress => format!("{:?} to move", game.turn()).to_lowercase(),
        outcome => format!("{} ({})", game.result_token(), outcome),
    }
}

/// The whole screen
pub fn render(session: &Session, input: &InputBuffer, status: &str) -> String {
    let config = session.config();
    let game = session.game();
    let (adv_white, adv_black) = session.advantages();
    let (lead_white, lead_black) = session.score_strings();
    let (check_white, check_black) = session.in_check();

    let mut lines = Vec::new();
    lines.push(player_line(
        config.black_piece,
        &config.black_name,
        check_black,
        &adv_black,
        &lead_black,
    ));
    lines.extend(board_lines(game));
    lines.push(player_line(
        config.white_piece,
        &config.white_name,
        check_white,
        &adv_white,
        &lead_white,
    ));
    lines.push(String::new());
    lines.push(eval_line(session.score(), session.win_probability()));
    lines.push(state_line(game));
    if let Some(hint) = session.hint_move() {
        lines.push(format!("hint: {}", hint));
    }
    if config.is_interactive() {
        lines.push(format!("> {}", input.current()));
    }
    if !status.is_empty() {
        lines.push(status.to_string());
    }
    let mut out = lines.join("\n");
    out.push('\n');
    out
}

#[cfg(test)]
#[path = "render_tests.rs"]
mod render_tests;
