use super::*;
use crate::types::Color;

fn c(s: &str) -> Coordinates {
    s.parse().unwrap()
}

fn white(kind: PieceKind) -> Piece {
    Piece::new(kind, Color::White)
}

fn black(kind: PieceKind) -> Piece {
    Piece::new(kind, Color::Black)
}

const R: ShapeResult = ShapeResult::Reachable;
const U: ShapeResult = ShapeResult::Unreachable;

#[test]
fn test_rook_bishop_queen() {
    let rook = white(PieceKind::Rook);
    assert_eq!(shape_ok(&rook, c("a1"), c("a8"), false), R);
    assert_eq!(shape_ok(&rook, c("a1"), c("h1"), true), R);
    assert_eq!(shape_ok(&rook, c("a1"), c("b2"), false), U);

    let bishop = white(PieceKind::Bishop);
    assert_eq!(shape_ok(&bishop, c("c1"), c("h6"), false), R);
    assert_eq!(shape_ok(&bishop, c("c1"), c("c2"), false), U);

    let queen = white(PieceKind::Queen);
    assert_eq!(shape_ok(&queen, c("d1"), c("d8"), false), R);
    assert_eq!(shape_ok(&queen, c("d1"), c("h5"), false), R);
    assert_eq!(shape_ok(&queen, c("d1"), c("e3"), false), U);
}

#[test]
fn test_same_square_is_unreachable() {
    for kind in [PieceKind::Queen, PieceKind::King, PieceKind::Pawn] {
        assert_eq!(shape_ok(&white(kind), c("e4"), c("e4"), false), U);
    }
}

#[test]
fn test_knight() {
    let knight = black(PieceKind::Knight);
    assert_eq!(shape_ok(&knight, c("g8"), c("f6"), false), R);
    assert_eq!(shape_ok(&knight, c("g8"), c("e7"), true), R);
    assert_eq!(shape_ok(&knight, c("g8"), c("g6"), false), U);
    assert!(path(&knight, c("g8"), c("f6")).is_empty());
}

#[test]
fn test_king_and_castling_signal() {
    let king = white(PieceKind::King);
    assert_eq!(shape_ok(&king, c("e1"), c("f2"), false), R);
    assert_eq!(
        shape_ok(&king, c("e1"), c("g1"), false),
        ShapeResult::Special(SpecialMove::Castling)
    );
    assert_eq!(
        shape_ok(&king, c("e1"), c("c1"), false),
        ShapeResult::Special(SpecialMove::Castling)
    );

    let moved = Piece::moved(PieceKind::King, Color::White);
    assert_eq!(shape_ok(&moved, c("e1"), c("g1"), false), U);
    assert_eq!(shape_ok(&king, c("e1"), c("e3"), false), U);
}

#[test]
fn test_pawn_pushes() {
    let pawn = white(PieceKind::Pawn);
    assert_eq!(shape_ok(&pawn, c("e2"), c("e3"), false), R);
    assert_eq!(shape_ok(&pawn, c("e2"), c("e4"), false), R);
    assert_eq!(shape_ok(&pawn, c("e2"), c("e5"), false), U);
    assert_eq!(shape_ok(&pawn, c("e2"), c("e1"), false), U);
    // Straight moves never capture
    assert_eq!(shape_ok(&pawn, c("e2"), c("e3"), true), U);

    let moved = Piece::moved(PieceKind::Pawn, Color::White);
    assert_eq!(shape_ok(&moved, c("e3"), c("e5"), false), U);

    let bpawn = black(PieceKind::Pawn);
    assert_eq!(shape_ok(&bpawn, c("d7"), c("d5"), false), R);
    assert_eq!(shape_ok(&bpawn, c("d7"), c("d8"), false), U);
}

#[test]
fn test_pawn_captures_and_en_passant_signal() {
    let pawn = Piece::moved(PieceKind::Pawn, Color::White);
    assert_eq!(shape_ok(&pawn, c("e4"), c("d5"), true), R);
    assert_eq!(shape_ok(&pawn, c("e4"), c("d5"), false), U);
    assert_eq!(shape_ok(&pawn, c("e4"), c("d3"), true), U);
    assert_eq!(
        shape_ok(&pawn, c("e5"), c("d6"), false),
        ShapeResult::Special(SpecialMove::EnPassant)
    );

    let bpawn = Piece::moved(PieceKind::Pawn, Color::Black);
    assert_eq!(
        shape_ok(&bpawn, c("d4"), c("e3"), false),
        ShapeResult::Special(SpecialMove::EnPassant)
    );
    assert_eq!(shape_ok(&bpawn, c("d5"), c("e4"), false), U);
}

#[test]
fn test_paths() {
    let rook = white(PieceKind::Rook);
    assert_eq!(path(&rook, c("a1"), c("a4")), vec![c("a2"), c("a3")]);
    assert!(path(&rook, c("a1"), c("a2")).is_empty());

    let bishop = white(PieceKind::Bishop);
    assert_eq!(path(&bishop, c("f8"), c("c5")), vec![c("e7"), c("d6")]);

    let pawn = white(PieceKind::Pawn);
    assert_eq!(path(&pawn, c("e2"), c("e4")), vec![c("e3")]);

    let king = white(PieceKind::King);
    assert_eq!(path(&king, c("e1"), c("g1")), vec![c("f1")]);
}
