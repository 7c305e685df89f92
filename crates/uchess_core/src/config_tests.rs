use super::*;

const JSON_CONFIG: &str = r#"{
    "uciWhite": "fast",
    "uciBlack": "strong",
    "uciHint": "strong",
    "uciEngines": [
        {
            "name": "fast",
            "engine": "/usr/bin/fast",
            "hash": 16,
            "ponder": false,
            "ownBook": true,
            "multiPV": 2,
            "depth": 3,
            "searchMoves": "e2e4 d2d4",
            "moveTime": 50,
            "options": [{"name": "Threads", "value": "2"}]
        },
        {
            "name": "strong",
            "engine": "/usr/bin/strong"
        }
    ],
    "activeTheme": "basic",
    "whitePiece": "cpu",
    "blackPiece": "human"
}"#;

#[test]
fn test_parse_json_config() {
    let config = Config::from_json_str(JSON_CONFIG).unwrap();
    assert_eq!(config.white_piece, PlayerKind::Cpu);
    assert_eq!(config.black_piece, PlayerKind::Human);
    assert_eq!(config.fen, DEFAULT_FEN);
    assert_eq!(config.eval_depth, DEFAULT_EVAL_DEPTH);

    let fast = config.engine_for(Role::White).unwrap();
    assert_eq!(fast.multi_pv, 2);
    assert!(fast.own_book);
    assert_eq!(fast.search_moves(), vec!["e2e4", "d2d4"]);
    assert_eq!(fast.move_time(), Some(Duration::from_millis(50)));
    assert_eq!(fast.options, vec![UciOption::new("Threads", "2")]);

    // Omitted fields take the defaults
    let strong = config.engine_for(Role::Hint).unwrap();
    assert_eq!(strong.hash, 128);
    assert_eq!(strong.depth, 1);
    assert!(strong.move_time().is_none());
    assert!(strong.search_moves().is_empty());
}

#[test]
fn test_parse_toml_config() {
    let toml = r#"
uciWhite = "sf"
uciBlack = "sf"
uciHint = "sf"
whitePiece = "human"
blackPiece = "cpu"

[[uciEngines]]
name = "sf"
engine = "stockfish"
moveTime = 250
"#;
    let config = Config::from_toml_str(toml).unwrap();
    let roster = config.roster().unwrap();
    assert_eq!(roster.get(Role::Black).move_time, 250);
    assert!(config.is_cpu(Color::Black));
    assert!(!config.is_cpu(Color::White));
}

#[test]
fn test_missing_role_is_typed_error() {
    let mut config = Config::default_with_engine("stockfish");
    config.uci_hint = "nonexistent".to_string();

    match config.roster() {
        Err(ConfigError::MissingEngine { role, name }) => {
            assert_eq!(role, Role::Hint);
            assert_eq!(name, "nonexistent");
        }
        other => panic!("expected missing engine error, got {:?}", other),
    }
}

#[test]
fn test_default_config_round_trips_through_template() {
    let config = Config::default_with_engine("/opt/stockfish");
    let json = config.to_json_pretty().unwrap();
    let parsed = Config::from_json_str(&json).unwrap();

    assert_eq!(parsed.uci_engines, config.uci_engines);
    assert_eq!(parsed.uci_engines[0].options, default_options());
    assert!(parsed.validate().is_ok());
}

#[test]
fn test_validate_rejects_bad_fen() {
    let mut config = Config::default_with_engine("stockfish");
    config.fen = "not a fen".to_string();
    assert!(matches!(
        config.validate(),
        Err(ConfigError::InvalidFen { .. })
    ));
}

#[test]
fn test_duplicate_engine_names_rejected() {
    let mut config = Config::default_with_engine("stockfish");
    let mut twin = EngineConfig::stockfish("/opt/other/stockfish");
    twin.depth = 20;
    config.uci_engines.push(twin);
    match config.validate() {
        Err(ConfigError::DuplicateEngine(name)) => assert_eq!(name, "stockfish"),
        other => panic!("expected duplicate engine error, got {:?}", other),
    }
}

#[test]
fn test_interactive_and_player_kinds() {
    let mut config = Config::default_with_engine("stockfish");
    assert!(config.is_interactive());

    config.white_piece = "cpu".parse().unwrap();
    assert!(!config.is_interactive());
    assert!("robot".parse::<PlayerKind>().is_err());
}

#[test]
fn test_cpu_player_named_after_engine() {
    let mut config = Config::default_with_engine("stockfish");
    config.uci_black = "/usr/games/stockfish".to_string();
    config.fill_player_names();
    assert_eq!(config.player_name(Color::Black), "stockfish");
    assert!(!config.player_name(Color::White).is_empty());
}
