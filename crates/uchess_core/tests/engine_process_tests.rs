//! End-to-end tests against a real UCI subprocess
//!
//! The `mock_uci` binary from this crate stands in for stockfish:
//! - Handshake and option plumbing
//! - Search and evaluation round trips
//! - Failure modes surfacing as engine errors without touching the game

use shakmaty::Chess;
use std::time::{Duration, Instant};
use uchess_core::engine::protocol::MATE_SCORE;
use uchess_core::session::{ENGINE_COMMAND_FAILED, ENGINE_MOVE_FAILED};
use uchess_core::{
    Config, Engine, EngineConfig, EngineError, GameSession, OutcomeTag, PlayerKind,
    SearchRequest, Session, UciEngine, UciOption,
};

const TIMEOUT: Duration = Duration::from_secs(10);

fn mock_config(name: &str) -> EngineConfig {
    let mut config = EngineConfig::stockfish(env!("CARGO_BIN_EXE_mock_uci"));
    config.name = name.to_string();
    config
}

fn mock_with_mode(mode: &str) -> EngineConfig {
    let mut config = mock_config("mock");
    config.options.push(UciOption::new("Mode", mode));
    config
}

fn session_config(black: EngineConfig) -> Config {
    let mut config = Config::default_with_engine(env!("CARGO_BIN_EXE_mock_uci"));
    config.uci_black = black.name.clone();
    config.uci_engines.push(black);
    config.eval_depth = 1;
    config
}

// =============================================================================
// Engine process
// =============================================================================

#[test]
fn test_start_search_and_stop() {
    let mut engine = UciEngine::start(&mock_config("mock"), TIMEOUT).unwrap();
    assert_eq!(engine.name(), "mock");

    let pos = Chess::default();
    let best = engine.search(&pos, &SearchRequest::depth(1)).unwrap();
    let mut game = GameSession::new();
    assert!(game.apply_move(&best.mv).is_ok());

    let last = engine.last_result().unwrap();
    assert_eq!(last.best_move.as_deref(), Some(best.uci.as_str()));
    assert_eq!(last.depth, 1);

    engine.stop();
    engine.stop();
    assert!(matches!(
        engine.search(&pos, &SearchRequest::depth(1)),
        Err(EngineError::Stopped(_))
    ));
}

#[test]
fn test_evaluate_reports_material() {
    let mut engine = UciEngine::start(&mock_config("mock"), TIMEOUT).unwrap();
    assert_eq!(engine.evaluate(&Chess::default(), 10), 0);

    // White to move without its queen
    let game = GameSession::from_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNB1KBNR w KQkq - 0 1")
        .unwrap();
    let cp = engine.evaluate(game.position(), 10);
    assert_eq!(cp, -900);
    assert!(cp.abs() < MATE_SCORE);
}

#[test]
fn test_missing_executable_is_unreachable() {
    let config = EngineConfig::stockfish("/nonexistent/uchess/engine");
    let err = UciEngine::start(&config, TIMEOUT).err().unwrap();
    assert!(matches!(err, EngineError::Unreachable { .. }));
}

#[test]
fn test_handshake_sends_options_in_order() {
    let engine = UciEngine::start(&mock_with_mode("random"), TIMEOUT).unwrap();
    assert_eq!(
        engine.handshake_notes(),
        ["options Hash,Ponder,OwnBook,MultiPV,skill level,Mode"]
    );
}

#[test]
fn test_handshake_timeout_is_unreachable() {
    let started = Instant::now();
    let err = UciEngine::start(&mock_with_mode("hang"), Duration::from_millis(200))
        .err()
        .unwrap();
    assert!(matches!(err, EngineError::Unreachable { .. }));
    assert!(started.elapsed() < Duration::from_secs(5));
}

#[test]
fn test_no_move_and_bad_move() {
    let pos = Chess::default();

    let mut engine = UciEngine::start(&mock_with_mode("nomove"), TIMEOUT).unwrap();
    assert!(matches!(
        engine.search(&pos, &SearchRequest::depth(1)),
        Err(EngineError::NoMove(_))
    ));

    let mut engine = UciEngine::start(&mock_with_mode("badmove"), TIMEOUT).unwrap();
    assert!(matches!(
        engine.search(&pos, &SearchRequest::depth(1)),
        Err(EngineError::BadMove { .. })
    ));
}

#[test]
fn test_engine_exit_mid_search() {
    let mut engine = UciEngine::start(&mock_with_mode("exit"), TIMEOUT).unwrap();
    let pos = Chess::default();
    assert!(matches!(
        engine.search(&pos, &SearchRequest::depth(1)),
        Err(EngineError::Exited(_))
    ));
    // Evaluation never fails the caller
    assert_eq!(engine.evaluate(&pos, 1), 0);
}

// =============================================================================
// Full session
// =============================================================================

#[test]
fn test_e4_against_engine_yields_two_plies() {
    let config = session_config(mock_config("mock"));
    let mut session = Session::start(config).unwrap();

    let outcome = session.process_command("e4");
    assert_eq!(outcome.status, "");
    assert!(outcome.rescore);
    assert_eq!(session.game().moves().len(), 2);
    assert_eq!(session.outcome(), OutcomeTag::InProgress);

    session.refresh_score();
    assert!(session.win_probability() > 0.0 && session.win_probability() < 1.0);
    session.stop();
}

#[test]
fn test_failed_engine_leaves_human_move() {
    let mut session = Session::start(session_config(mock_with_mode("nomove"))).unwrap();
    assert_eq!(session.process_command("e4").status, ENGINE_MOVE_FAILED);
    assert_eq!(session.game().san_moves(), vec!["e4"]);

    let mut session = Session::start(session_config(mock_with_mode("exit"))).unwrap();
    assert_eq!(session.process_command("d4").status, ENGINE_COMMAND_FAILED);
    assert_eq!(session.game().san_moves(), vec!["d4"]);
}

#[test]
fn test_cpu_vs_cpu_plays_to_a_finish_or_limit() {
    let mut config = session_config(mock_config("mock"));
    config.white_piece = PlayerKind::Cpu;
    config.black_piece = PlayerKind::Cpu;
    assert!(!config.is_interactive());

    let mut session = Session::start(config).unwrap();
    for _ in 0..40 {
        match session.play_engine_turn() {
            Ok(true) => {}
            Ok(false) => break,
            Err(e) => panic!("engine turn failed: {}", e),
        }
    }
    assert!(!session.game().moves().is_empty());
}

#[test]
fn test_missing_engine_mapping_fails_startup() {
    let mut config = session_config(mock_config("mock"));
    config.uci_white = "nothing".to_string();
    assert!(Session::start(config).is_err());
}
