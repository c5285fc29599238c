//! End-to-end behaviour of a session: the reference scenarios plus
//! persistence through real files.

use chess_core::{king_in_check, Color, Coordinates, GameState, PieceKind, Time};
use chess_session::{GameSession, MoveOutcome, SessionError, SessionPhase};

fn c(s: &str) -> Coordinates {
    s.parse().unwrap()
}

fn session_at(fen: &str) -> GameSession {
    let session = GameSession::new().unwrap();
    let mut state = GameState::from_fen(fen).unwrap();
    state.set_time_for_players(Time::from_minutes_seconds(5, 0));
    session.load_position(&state, Time::ZERO);
    session
}

#[test]
fn king_may_step_but_not_into_check() {
    let session = session_at("r3k3/8/8/8/8/8/8/4K3 w - - 0 1");
    assert_eq!(session.try_move(c("e1"), c("e2")).unwrap(), MoveOutcome::Accepted);

    let session = session_at("4kr2/8/8/8/8/8/8/4K3 w - - 0 1");
    assert_eq!(session.try_move(c("e1"), c("f1")).unwrap(), MoveOutcome::Rejected);
    assert_eq!(session.piece_at(c("e1")).map(|p| p.kind), Some(PieceKind::King));
}

#[test]
fn kingside_castling() {
    let session = session_at("4k3/8/8/8/8/8/8/4K2R w K - 0 1");
    assert_eq!(session.try_move(c("e1"), c("g1")).unwrap(), MoveOutcome::Castling);

    let state = session.snapshot();
    let king = state.piece_at(c("g1")).unwrap();
    let rook = state.piece_at(c("f1")).unwrap();
    assert_eq!((king.kind, rook.kind), (PieceKind::King, PieceKind::Rook));
    assert!(king.has_moved && rook.has_moved);
    assert_eq!(state.piece_at(c("e1")), None);
    assert_eq!(state.piece_at(c("h1")), None);
    assert_eq!(session.move_log(), vec!["e1-g1 ".to_string()]);
}

#[test]
fn en_passant_only_on_the_next_ply() {
    let fen = "4k3/8/8/8/3p4/8/4P3/4K3 w - - 0 1";

    let session = session_at(fen);
    assert_eq!(session.try_move(c("e2"), c("e4")).unwrap(), MoveOutcome::Accepted);
    assert_eq!(session.snapshot().en_passant_column, Some(5));
    assert_eq!(session.try_move(c("d4"), c("e3")).unwrap(), MoveOutcome::EnPassant);
    assert_eq!(session.piece_at(c("e4")), None);
    assert_eq!(session.piece_at(c("e3")).map(|p| p.color), Some(Color::Black));

    let session = session_at("4k3/8/8/8/5p2/8/4P3/4K3 w - - 0 1");
    assert_eq!(session.try_move(c("e2"), c("e4")).unwrap(), MoveOutcome::Accepted);
    assert_eq!(session.try_move(c("f4"), c("e3")).unwrap(), MoveOutcome::EnPassant);
    assert_eq!(session.piece_at(c("e4")), None);
    assert_eq!(session.move_log(), vec!["e2-e4 ".to_string(), "f4-e3 ".to_string()]);

    let session = session_at(fen);
    session.try_move(c("e2"), c("e4")).unwrap();
    session.try_move(c("e8"), c("d8")).unwrap();
    session.try_move(c("e1"), c("d1")).unwrap();
    assert_eq!(session.try_move(c("d4"), c("e3")).unwrap(), MoveOutcome::Rejected);

    let session = session_at("4k3/8/8/8/5p2/8/4P3/4K3 w - - 0 1");
    session.try_move(c("e2"), c("e4")).unwrap();
    session.try_move(c("e8"), c("f8")).unwrap();
    session.try_move(c("e1"), c("f1")).unwrap();
    assert_eq!(session.try_move(c("f4"), c("e3")).unwrap(), MoveOutcome::Rejected);
}

#[test]
fn promotion_waits_for_choice() {
    let session = session_at("8/4P3/8/8/8/8/8/k3K3 w - - 0 1");
    let before = session.snapshot();

    assert_eq!(session.try_move(c("e7"), c("e8")).unwrap(), MoveOutcome::Promotion);
    assert_eq!(session.snapshot(), before);

    session.promote(PieceKind::Queen).unwrap();
    let queen = session.piece_at(c("e8")).unwrap();
    assert_eq!((queen.kind, queen.color), (PieceKind::Queen, Color::White));
    assert_eq!(session.piece_at(c("e7")), None);
    assert_eq!(session.move_log(), vec!["e7-e8 QUEEN".to_string()]);
}

#[test]
fn revert_walks_back_exactly_n_plies() {
    let session = GameSession::new().unwrap();
    session.new_game(Time::from_minutes_seconds(5, 0), Time::from_millis(500)).unwrap();
    let initial = session.snapshot();

    let plies = [("e2", "e4"), ("e7", "e5"), ("g1", "f3"), ("b8", "c6"), ("f1", "c4")];
    for (from, to) in plies {
        assert_eq!(session.try_move(c(from), c(to)).unwrap(), MoveOutcome::Accepted);
    }
    for _ in 0..plies.len() {
        session.revert_move().unwrap();
    }
    assert_eq!(session.snapshot(), initial);
    assert!(matches!(session.revert_move(), Err(SessionError::HistoryExhausted)));
}

#[test]
fn moves_from_empty_or_enemy_squares_are_rejected() {
    let session = GameSession::new().unwrap();
    session.new_game(Time::from_minutes_seconds(1, 0), Time::ZERO).unwrap();
    let before = session.snapshot();

    for from in Coordinates::all() {
        if before.piece_at(from).is_some_and(|p| p.color == Color::White) {
            continue;
        }
        for to in Coordinates::all() {
            assert_eq!(session.try_move(from, to).unwrap(), MoveOutcome::Rejected, "{from}-{to}");
        }
    }
    assert_eq!(session.snapshot(), before);
}

#[test]
fn check_detection_is_stable() {
    let session = GameSession::new().unwrap();
    session.new_game(Time::from_minutes_seconds(1, 0), Time::ZERO).unwrap();
    for (from, to) in [("f2", "f3"), ("e7", "e5"), ("g2", "g4"), ("d8", "h4")] {
        session.try_move(c(from), c(to)).unwrap();
    }
    let state = session.snapshot();
    let first = king_in_check(&state, Color::White);
    assert!(first);
    assert_eq!(king_in_check(&state, Color::White), first);
    assert_eq!(session.snapshot(), state);
}

#[test]
fn save_and_load_through_file() {
    let dir = std::env::temp_dir();
    let game_file = dir.join(format!("chess_scenarios_{}.json", std::process::id()));
    let log_file = dir.join(format!("chess_scenarios_{}.txt", std::process::id()));

    let session = GameSession::new().unwrap();
    session.new_game(Time::from_minutes_seconds(3, 0), Time::from_minutes_seconds(0, 2)).unwrap();
    for (from, to) in [("d2", "d4"), ("d7", "d5"), ("c2", "c4")] {
        session.try_move(c(from), c(to)).unwrap();
    }
    session.save_to(&game_file).unwrap();
    session.export_log(&log_file).unwrap();

    let restored = GameSession::new().unwrap();
    restored.load_from(&game_file).unwrap();
    assert_eq!(restored.phase(), SessionPhase::Active);
    assert_eq!(restored.snapshot(), session.snapshot());
    assert_eq!(restored.move_log(), session.move_log());
    assert_eq!(restored.increment(), session.increment());
    assert_eq!(
        std::fs::read_to_string(&log_file).unwrap(),
        "d2-d4 \nd7-d5 \nc2-c4 \n"
    );

    // The restored game keeps its undo history.
    restored.revert_move().unwrap();
    assert_eq!(restored.whose_move(), Color::White);

    let _ = std::fs::remove_file(&game_file);
    let _ = std::fs::remove_file(&log_file);
}

#[test]
fn saving_an_idle_session_fails() {
    let session = GameSession::new().unwrap();
    let path = std::env::temp_dir().join("chess_scenarios_idle.json");
    assert!(matches!(
        session.save_to(&path),
        Err(SessionError::InvalidState { phase: SessionPhase::Idle, .. })
    ));
    assert!(matches!(
        session.load_from(std::env::temp_dir().join("chess_scenarios_missing.json")),
        Err(SessionError::Persistence(_))
    ));
}
