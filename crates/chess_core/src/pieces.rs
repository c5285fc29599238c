//! Movement geometry of each piece kind on an otherwise empty board.
//!
//! [`shape_ok`] answers whether a piece could reach a square by its own
//! movement pattern; [`path`] lists the squares it passes over on the way.
//! Neither looks at other pieces. Blocking and check safety are the
//! business of [`crate::rules`].

use crate::types::{deltas, Coordinates, Direction, Piece, PieceKind};

/// Special moves the rules engine has to arbitrate separately.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SpecialMove {
    Castling,
    EnPassant,
    Promotion,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ShapeResult {
    Reachable,
    Unreachable,
    Special(SpecialMove),
}

impl ShapeResult {
    fn from_bool(ok: bool) -> Self {
        if ok {
            ShapeResult::Reachable
        } else {
            ShapeResult::Unreachable
        }
    }
}

/// Can `piece` reach `to` from `from` by shape alone?
///
/// `is_capturing` tells whether `to` is occupied by an enemy piece; pawns
/// move differently when capturing.
pub fn shape_ok(piece: &Piece, from: Coordinates, to: Coordinates, is_capturing: bool) -> ShapeResult {
    if from == to {
        return ShapeResult::Unreachable;
    }
    let (dx, dy) = deltas(from, to);
    match piece.kind {
        PieceKind::Rook => ShapeResult::from_bool(is_straight(dx, dy)),
        PieceKind::Bishop => ShapeResult::from_bool(is_diagonal(dx, dy)),
        PieceKind::Queen => ShapeResult::from_bool(is_straight(dx, dy) || is_diagonal(dx, dy)),
        PieceKind::Knight => {
            let (ax, ay) = (dx.abs(), dy.abs());
            ShapeResult::from_bool((ax == 1 && ay == 2) || (ax == 2 && ay == 1))
        }
        PieceKind::King => king_shape(piece, dx, dy),
        PieceKind::Pawn => pawn_shape(piece, from, dx, dy, is_capturing),
    }
}

fn is_straight(dx: i8, dy: i8) -> bool {
    dx == 0 || dy == 0
}

fn is_diagonal(dx: i8, dy: i8) -> bool {
    dx.abs() == dy.abs()
}

fn king_shape(king: &Piece, dx: i8, dy: i8) -> ShapeResult {
    if dx.abs() <= 1 && dy.abs() <= 1 {
        return ShapeResult::Reachable;
    }
    // Two squares sideways is never a plain king move.
    if dy == 0 && dx.abs() == 2 && !king.has_moved {
        return ShapeResult::Special(SpecialMove::Castling);
    }
    ShapeResult::Unreachable
}

fn pawn_shape(pawn: &Piece, from: Coordinates, dx: i8, dy: i8, is_capturing: bool) -> ShapeResult {
    let forward = pawn.color.forward();

    if dx == 0 {
        if is_capturing {
            return ShapeResult::Unreachable;
        }
        if dy == forward {
            return ShapeResult::Reachable;
        }
        return ShapeResult::from_bool(dy == 2 * forward && !pawn.has_moved);
    }

    if dx.abs() == 1 && dy == forward {
        if is_capturing {
            return ShapeResult::Reachable;
        }
        if from.rank() == pawn.color.en_passant_rank() {
            return ShapeResult::Special(SpecialMove::EnPassant);
        }
    }

    ShapeResult::Unreachable
}

/// Squares strictly between `from` and `to`. Knights jump, so their path
/// is always empty.
pub fn path(piece: &Piece, from: Coordinates, to: Coordinates) -> Vec<Coordinates> {
    if piece.kind == PieceKind::Knight {
        return Vec::new();
    }
    let dir = Direction::between(from, to);
    let mut squares = Vec::new();
    let mut cur = from.step(dir);
    while let Some(sq) = cur {
        if sq == to {
            break;
        }
        squares.push(sq);
        cur = sq.step(dir);
    }
    squares
}

#[cfg(test)]
#[path = "pieces_tests.rs"]
mod pieces_tests;
