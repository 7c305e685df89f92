use super::*;
use std::time::Duration;

#[test]
fn test_go_with_depth_and_movetime() {
    let request = SearchRequest {
        depth: 4,
        move_time: Some(Duration::from_millis(100)),
        search_moves: Vec::new(),
    };
    assert_eq!(go(&request), "go depth 4 movetime 100");
}

#[test]
fn test_go_with_searchmoves() {
    let request = SearchRequest {
        depth: 2,
        move_time: None,
        search_moves: vec!["e2e4".to_string(), "d2d4".to_string()],
    };
    assert_eq!(go(&request), "go depth 2 searchmoves e2e4 d2d4");
}

#[test]
fn test_go_never_unbounded() {
    let request = SearchRequest::depth(0);
    assert_eq!(go(&request), "go depth 1");
}

#[test]
fn test_setoption_and_position() {
    assert_eq!(set_option("Hash", "128"), "setoption name Hash value 128");
    assert_eq!(
        set_option("skill level", "3"),
        "setoption name skill level value 3"
    );
    assert_eq!(
        position("8/8/8/8/8/8/8/K6k w - - 0 1"),
        "position fen 8/8/8/8/8/8/8/K6k w - - 0 1"
    );
    assert_eq!(go_depth(10), "go depth 10");
}

#[test]
fn test_parse_handshake_lines() {
    assert_eq!(parse_line("uciok"), EngineMessage::UciOk);
    assert_eq!(parse_line("readyok\n"), EngineMessage::ReadyOk);
    assert_eq!(
        parse_line("id name Stockfish 16"),
        EngineMessage::Id {
            key: "name".to_string(),
            value: "Stockfish 16".to_string()
        }
    );
    assert!(matches!(
        parse_line("option name Hash type spin default 16 min 1 max 33554432"),
        EngineMessage::Other(_)
    ));
}

#[test]
fn test_parse_info_cp() {
    let line = "info depth 12 seldepth 18 multipv 1 score cp -35 nodes 123456 nps 1000 pv e7e5 g1f3";
    match parse_line(line) {
        EngineMessage::Info(info) => {
            assert_eq!(info.depth, Some(12));
            assert_eq!(info.multipv, Some(1));
            assert_eq!(info.score, Some(Score::Cp(-35)));
            assert_eq!(info.pv, vec!["e7e5", "g1f3"]);
        }
        other => panic!("expected info, got {:?}", other),
    }
}

#[test]
fn test_parse_info_mate_and_bounds() {
    match parse_line("info depth 5 score mate 3 lowerbound pv d1h5") {
        EngineMessage::Info(info) => {
            assert_eq!(info.score, Some(Score::Mate(3)));
            assert_eq!(info.score.map(Score::centipawns), Some(MATE_SCORE - 3));
        }
        other => panic!("expected info, got {:?}", other),
    }
    assert_eq!(Score::Mate(-2).centipawns(), -MATE_SCORE + 2);
}

#[test]
fn test_parse_info_without_score() {
    match parse_line("info string NNUE evaluation using nn-abc.nnue enabled") {
        EngineMessage::Info(info) => {
            assert!(info.score.is_none());
            assert_eq!(
                info.string.as_deref(),
                Some("NNUE evaluation using nn-abc.nnue enabled")
            );
        }
        other => panic!("expected info, got {:?}", other),
    }
}

#[test]
fn test_parse_bestmove() {
    assert_eq!(
        parse_line("bestmove e2e4 ponder e7e5"),
        EngineMessage::BestMove {
            best: Some("e2e4".to_string()),
            ponder: Some("e7e5".to_string())
        }
    );
    assert_eq!(
        parse_line("bestmove (none)"),
        EngineMessage::BestMove {
            best: None,
            ponder: None
        }
    );
    assert_eq!(
        parse_line("bestmove 0000"),
        EngineMessage::BestMove {
            best: None,
            ponder: None
        }
    );
}

#[test]
fn test_extreme_mate_distances_stay_in_range() {
    let line = format!("info depth 1 score mate {}", i32::MIN);
    match parse_line(&line) {
        EngineMessage::Info(info) => {
            let cp = info.score.map(Score::centipawns).unwrap();
            assert_eq!(cp, -MATE_SCORE + MAX_MATE_DISTANCE);
        }
        other => panic!("expected info, got {:?}", other),
    }
    assert_eq!(Score::Mate(i32::MAX).centipawns(), MATE_SCORE - MAX_MATE_DISTANCE);
    assert!(Score::Mate(5_000).centipawns() > 0);
    assert!(Score::Mate(-5_000).centipawns() < 0);
}
