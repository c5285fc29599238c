//! Castling, en passant and promotion played out through the public API.

use chess_core::{apply_move, evaluate_move, king_in_check, Color, Coordinates, GameState, MoveHistory, MoveVerdict, PieceKind, Time};

fn c(s: &str) -> Coordinates {
    s.parse().unwrap()
}

/// Evaluates and applies a move, returning the verdict.
fn play(state: &mut GameState, history: &mut MoveHistory, from: &str, to: &str, promo: Option<PieceKind>) -> MoveVerdict {
    let verdict = evaluate_move(state, c(from), c(to));
    if apply_move(state, c(from), c(to), verdict, promo) {
        history.push(state, c(from), c(to), promo);
    }
    verdict
}

#[test]
fn test_en_passant_window_lasts_one_ply() {
    let mut state = GameState::start_position(Time::ZERO);
    let mut history = MoveHistory::new(&state);
    for (from, to) in [("e2", "e4"), ("a7", "a6"), ("e4", "e5"), ("d7", "d5")] {
        assert_eq!(play(&mut state, &mut history, from, to, None), MoveVerdict::Legal);
    }
    assert_eq!(state.en_passant_column, Some(4));

    // Declining the capture for one ply closes the window.
    let mut declined = state.clone();
    let mut declined_history = history.clone();
    play(&mut declined, &mut declined_history, "h2", "h3", None);
    play(&mut declined, &mut declined_history, "h7", "h6", None);
    assert_eq!(evaluate_move(&mut declined, c("e5"), c("d6")), MoveVerdict::Illegal);

    assert_eq!(play(&mut state, &mut history, "e5", "d6", None), MoveVerdict::EnPassant);
    assert_eq!(state.piece_at(c("d5")), None);
    assert_eq!(history.move_log().last().map(String::as_str), Some("e5-d6 "));
}

#[test]
fn test_check_must_be_answered() {
    let mut state = GameState::start_position(Time::ZERO);
    let mut history = MoveHistory::new(&state);
    for (from, to) in [("e2", "e4"), ("f7", "f6"), ("d1", "h5")] {
        play(&mut state, &mut history, from, to, None);
    }
    assert!(king_in_check(&state, Color::Black));
    assert_eq!(evaluate_move(&mut state, c("a7"), c("a6")), MoveVerdict::Illegal);
    assert_eq!(evaluate_move(&mut state, c("g7"), c("g6")), MoveVerdict::Legal);
}

#[test]
fn test_promotion_then_undo() {
    let mut state = GameState::from_fen("4k3/P7/8/8/8/8/8/4K3 w - - 0 1").unwrap();
    let mut history = MoveHistory::new(&state);

    assert_eq!(play(&mut state, &mut history, "a7", "a8", Some(PieceKind::Rook)), MoveVerdict::Promotion);
    assert_eq!(state.piece_at(c("a8")).map(|p| p.kind), Some(PieceKind::Rook));
    assert!(king_in_check(&state, Color::Black));
    assert_eq!(history.move_log(), ["a7-a8 ROOK"]);

    let previous = history.pop().cloned().unwrap();
    assert_eq!(previous.piece_at(c("a7")).map(|p| p.kind), Some(PieceKind::Pawn));
    assert_eq!(previous.whose_move, Color::White);
}

#[test]
fn test_castling_rights_lost_after_king_moves() {
    let mut state = GameState::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").unwrap();
    let mut history = MoveHistory::new(&state);
    play(&mut state, &mut history, "e1", "f1", None);
    play(&mut state, &mut history, "e8", "d8", None);
    play(&mut state, &mut history, "f1", "e1", None);
    play(&mut state, &mut history, "d8", "e8", None);

    assert_eq!(evaluate_move(&mut state, c("e1"), c("g1")), MoveVerdict::Illegal);
    assert_eq!(evaluate_move(&mut state, c("e1"), c("c1")), MoveVerdict::Illegal);
    assert_eq!(history.plies(), 4);
}
