use super::*;

fn c(s: &str) -> Coordinates {
    s.parse().unwrap()
}

fn mv(from: &str, to: &str) -> Option<Command> {
    Some(Command::Move {
        from: c(from),
        to: c(to),
    })
}

#[test]
fn test_blank_lines() {
    assert_eq!(parse(""), Ok(None));
    assert_eq!(parse("   \t"), Ok(None));
}

#[test]
fn test_move_spellings() {
    assert_eq!(parse("move e2e4"), Ok(mv("e2", "e4")));
    assert_eq!(parse("move e2 e4"), Ok(mv("e2", "e4")));
    assert_eq!(parse("m e2-e4"), Ok(mv("e2", "e4")));
    assert_eq!(parse("g1f3"), Ok(mv("g1", "f3")));
    assert_eq!(parse("  E7E5 "), Ok(mv("e7", "e5")));
}

#[test]
fn test_bad_moves() {
    assert!(matches!(parse("move e2e9"), Err(ParseError::Square(_))));
    assert!(matches!(parse("move e2"), Err(ParseError::Square(_))));
    assert_eq!(parse("move"), Err(ParseError::MissingArgument("move")));
    assert_eq!(parse("z9z9"), Err(ParseError::Unknown("z9z9".to_string())));
}

#[test]
fn test_promote() {
    assert_eq!(parse("promote q"), Ok(Some(Command::Promote(PieceKind::Queen))));
    assert_eq!(parse("promote N"), Ok(Some(Command::Promote(PieceKind::Knight))));
    assert_eq!(parse("p rook"), Ok(Some(Command::Promote(PieceKind::Rook))));
    assert_eq!(parse("promote k"), Err(ParseError::Piece("k".to_string())));
    assert_eq!(parse("promote"), Err(ParseError::MissingArgument("promote")));
}

#[test]
fn test_new_and_files() {
    assert_eq!(
        parse("new 5:00 0:03"),
        Ok(Some(Command::New {
            game_time: Some("5:00".to_string()),
            increment: Some("0:03".to_string()),
        }))
    );
    assert_eq!(
        parse("new"),
        Ok(Some(Command::New {
            game_time: None,
            increment: None,
        }))
    );
    assert_eq!(parse("save game.json"), Ok(Some(Command::Save(PathBuf::from("game.json")))));
    assert_eq!(parse("load"), Err(ParseError::MissingArgument("load")));
    assert_eq!(parse("savelog"), Ok(Some(Command::SaveLog(None))));
}

#[test]
fn test_fen_keeps_all_fields() {
    assert_eq!(
        parse("fen 4k3/8/8/8/8/8/8/4K2R w K - 0 1"),
        Ok(Some(Command::Fen("4k3/8/8/8/8/8/8/4K2R w K - 0 1".to_string())))
    );
}

#[test]
fn test_simple_words() {
    for (line, command) in [
        ("start", Command::Start),
        ("pause", Command::Pause),
        ("resume", Command::Resume),
        ("undo", Command::Undo),
        ("board", Command::Board),
        ("time", Command::Time),
        ("log", Command::Log),
        ("end", Command::End),
        ("help", Command::Help),
        ("quit", Command::Quit),
    ] {
        assert_eq!(parse(line), Ok(Some(command)));
    }
    assert_eq!(parse("castle"), Err(ParseError::Unknown("castle".to_string())));
}
