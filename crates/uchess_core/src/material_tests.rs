use super::*;

const START: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR";

#[test]
fn test_starting_position_is_balanced() {
    let (white, black) = advantages(START);
    assert_eq!(white, "");
    assert_eq!(black, "");

    let (white_diff, black_diff) = score_strings(START);
    assert_eq!(white_diff, "");
    assert_eq!(black_diff, "");
}

#[test]
fn test_missing_black_queen() {
    let placement = "rnb1kbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR";
    let (white, black) = advantages(placement);
    assert_eq!(white, "♕");
    assert_eq!(black, "");

    let (white_diff, black_diff) = score_strings(placement);
    assert_eq!(white_diff, "+9");
    assert_eq!(black_diff, "");
}

#[test]
fn test_like_for_like_captures_cancel() {
    // Each side lost one knight
    let placement = "r1bqkbnr/pppppppp/8/8/8/8/PPPPPPPP/R1BQKBNR";
    let balance = MaterialBalance::from_placement(placement);
    assert_eq!(balance.glyphs(Color::White), "");
    assert_eq!(balance.glyphs(Color::Black), "");
    assert_eq!(balance.differential(Color::White), "");
}

#[test]
fn test_knight_does_not_cancel_bishop() {
    // White lost a knight, black lost a bishop: equal points, both keep their glyph
    let placement = "rn1qkbnr/pppppppp/8/8/8/8/PPPPPPPP/R1BQKBNR";
    let balance = MaterialBalance::from_placement(placement);
    assert_eq!(balance.glyphs(Color::White), "♗");
    assert_eq!(balance.glyphs(Color::Black), "♘");
    assert_eq!(balance.differential(Color::White), "");
    assert_eq!(balance.differential(Color::Black), "");
}

#[test]
fn test_black_ahead_by_exchange() {
    // White lost a rook, black lost a knight and a pawn
    let placement = "r1bqkbnr/ppppppp1/8/8/8/8/PPPPPPPP/1NBQKBNR";
    let balance = MaterialBalance::from_placement(placement);
    assert_eq!(balance.points(Color::Black), 5);
    assert_eq!(balance.points(Color::White), 4);
    assert_eq!(balance.differential(Color::Black), "+1");
    assert_eq!(balance.differential(Color::White), "");
    assert_eq!(balance.glyphs(Color::White), "♙♘");
    assert_eq!(balance.glyphs(Color::Black), "♖");
}

#[test]
fn test_promotion_does_not_underflow() {
    // White promoted to a second queen after losing a pawn
    let placement = "rnb1kbnr/pppppppp/8/8/8/8/PPPPPPP1/RNBQKBNQ";
    let balance = MaterialBalance::from_placement(placement);
    assert_eq!(balance.captured(Color::White), [1, 0, 0, 1, 0, 0]);
    assert_eq!(balance.captured(Color::Black), [0, 0, 0, 0, 1, 0]);
}

#[test]
fn test_unordered_multiset_input() {
    // Any multiset of letters works, not only FEN board fields
    let pieces = "KQRRBBNNPPPPPPPPkqrrbbnnppppppp";
    let (white, _) = advantages(pieces);
    assert_eq!(white, "♙");
    let (white_diff, _) = score_strings(pieces);
    assert_eq!(white_diff, "+1");
}
