//! Move arbitration.
//!
//! [`evaluate_move`] runs the legality pipeline for a proposed move:
//! ownership, piece shape, path clearance and check safety. Castling and
//! en passant branch into their own authorisation checks. A move is tried
//! out by relocating pieces on the live board and restoring the touched
//! squares before returning, so the state is unchanged once evaluation ends.
//! [`apply_move`] performs an accepted move for real.

use crate::board::{en_passant_victim, GameState};
use crate::pieces::{path, shape_ok, ShapeResult, SpecialMove};
use crate::types::*;

/// Outcome of evaluating a proposed move.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MoveVerdict {
    Illegal,
    Legal,
    Castling,
    EnPassant,
    /// Legal pawn move onto the last rank; needs a piece choice to finish.
    Promotion,
}

impl MoveVerdict {
    pub fn is_legal(self) -> bool {
        self != MoveVerdict::Illegal
    }
}

pub fn evaluate_move(state: &mut GameState, from: Coordinates, to: Coordinates) -> MoveVerdict {
    let piece = match state.piece_at(from) {
        Some(p) if p.color == state.whose_move => p,
        _ => return MoveVerdict::Illegal,
    };
    let target = state.piece_at(to);
    if let Some(t) = target
        && t.color == piece.color
    {
        return MoveVerdict::Illegal;
    }

    match shape_ok(&piece, from, to, target.is_some()) {
        ShapeResult::Unreachable => MoveVerdict::Illegal,
        ShapeResult::Special(SpecialMove::Castling) => {
            if authorize_castling(state, from, to) {
                MoveVerdict::Castling
            } else {
                MoveVerdict::Illegal
            }
        }
        ShapeResult::Special(SpecialMove::EnPassant) => {
            if authorize_en_passant(state, from, to) {
                MoveVerdict::EnPassant
            } else {
                MoveVerdict::Illegal
            }
        }
        ShapeResult::Reachable | ShapeResult::Special(SpecialMove::Promotion) => {
            if !path_clear(state, &piece, from, to) || exposes_king(state, from, to) {
                MoveVerdict::Illegal
            } else if piece.kind == PieceKind::Pawn && to.rank() == piece.color.promotion_rank() {
                MoveVerdict::Promotion
            } else {
                MoveVerdict::Legal
            }
        }
    }
}

/// Is the king of `color` attacked by any opposing piece?
///
/// Returns `false` when `color` has no king on the board.
pub fn king_in_check(state: &GameState, color: Color) -> bool {
    match state.find_king(color) {
        Some(king_sq) => is_attacked(state, king_sq, color.other()),
        None => false,
    }
}

/// Could any piece of color `by` capture on `target`?
///
/// Turn order and the attacker's own king safety are ignored.
pub fn is_attacked(state: &GameState, target: Coordinates, by: Color) -> bool {
    state
        .board
        .pieces()
        .filter(|(_, p)| p.color == by)
        .any(|(from, p)| attacks(state, &p, from, target))
}

fn attacks(state: &GameState, attacker: &Piece, from: Coordinates, target: Coordinates) -> bool {
    match shape_ok(attacker, from, target, true) {
        ShapeResult::Reachable | ShapeResult::Special(SpecialMove::Promotion) => {
            path_clear(state, attacker, from, target)
        }
        // Castling and en passant are non-capturing; they threaten nothing.
        ShapeResult::Special(SpecialMove::Castling | SpecialMove::EnPassant) => false,
        ShapeResult::Unreachable => false,
    }
}

fn path_clear(state: &GameState, piece: &Piece, from: Coordinates, to: Coordinates) -> bool {
    path(piece, from, to).into_iter().all(|sq| state.piece_at(sq).is_none())
}

/// Would moving `from -> to` leave the mover's king in check?
fn exposes_king(state: &mut GameState, from: Coordinates, to: Coordinates) -> bool {
    let moving = state.piece_at(from);
    let captured = state.piece_at(to);
    let color = state.whose_move;

    state.set_piece_at(to, moving);
    state.set_piece_at(from, None);
    let in_check = king_in_check(state, color);
    state.set_piece_at(from, moving);
    state.set_piece_at(to, captured);

    in_check
}

fn authorize_castling(state: &mut GameState, from: Coordinates, to: Coordinates) -> bool {
    let king = match state.piece_at(from) {
        Some(k) => k,
        None => return false,
    };
    let dir = Direction::between(from, to);
    let rook_sq = square(if dir.dx > 0 { 8 } else { 1 }, from.rank());
    match state.piece_at(rook_sq) {
        Some(rook) if rook.kind == PieceKind::Rook && rook.color == king.color && !rook.has_moved => {}
        _ => return false,
    }

    // The king has to land strictly between its square and the rook, and
    // everything in between must be empty.
    let between = path(&king, from, rook_sq);
    if !between.contains(&to) || between.iter().any(|&sq| state.piece_at(sq).is_some()) {
        return false;
    }

    if king_in_check(state, king.color) {
        return false;
    }

    // Walk the king square by square up to its destination.
    let mut cur = from;
    while cur != to {
        cur = match cur.step(dir) {
            Some(next) => next,
            None => return false,
        };
        state.set_piece_at(cur, Some(king));
        state.set_piece_at(from, None);
        let in_check = king_in_check(state, king.color);
        state.set_piece_at(from, Some(king));
        state.set_piece_at(cur, None);
        if in_check {
            return false;
        }
    }
    true
}

fn authorize_en_passant(state: &mut GameState, from: Coordinates, to: Coordinates) -> bool {
    if state.en_passant_column != Some(to.file()) {
        return false;
    }
    let pawn = match state.piece_at(from) {
        Some(p) => p,
        None => return false,
    };
    let victim_sq = en_passant_victim(from, to);
    let victim = match state.piece_at(victim_sq) {
        Some(v) if v.kind == PieceKind::Pawn && v.color != pawn.color => v,
        _ => return false,
    };

    state.set_piece_at(to, Some(pawn));
    state.set_piece_at(from, None);
    state.set_piece_at(victim_sq, None);
    let in_check = king_in_check(state, pawn.color);
    state.set_piece_at(to, None);
    state.set_piece_at(from, Some(pawn));
    state.set_piece_at(victim_sq, Some(victim));

    !in_check
}

/// Performs a move that [`evaluate_move`] accepted.
///
/// A `Promotion` verdict needs the chosen piece in `promotion`; without
/// it, or for an `Illegal` verdict, nothing happens and `false` is
/// returned.
pub fn apply_move(
    state: &mut GameState,
    from: Coordinates,
    to: Coordinates,
    verdict: MoveVerdict,
    promotion: Option<PieceKind>,
) -> bool {
    match (verdict, promotion) {
        (MoveVerdict::Legal, _) => state.move_piece(from, to),
        (MoveVerdict::Castling, _) => state.castle(from, to),
        (MoveVerdict::EnPassant, _) => state.en_passant(from, to),
        (MoveVerdict::Promotion, Some(kind)) => state.promote(from, to, kind),
        (MoveVerdict::Promotion, None) | (MoveVerdict::Illegal, _) => return false,
    }
    true
}

/// Every square the piece on `from` may move to, with its verdict.
pub fn legal_destinations(state: &GameState, from: Coordinates) -> Vec<(Coordinates, MoveVerdict)> {
    let mut scratch = state.clone();
    let mut out = Vec::new();
    legal_destinations_into(&mut scratch, from, &mut out);
    out
}

/// Like [`legal_destinations`], reusing a scratch state and output buffer.
pub fn legal_destinations_into(
    state: &mut GameState,
    from: Coordinates,
    out: &mut Vec<(Coordinates, MoveVerdict)>,
) {
    out.clear();
    match state.piece_at(from) {
        Some(p) if p.color == state.whose_move => {}
        _ => return,
    }
    for to in Coordinates::all() {
        let verdict = evaluate_move(state, from, to);
        if verdict.is_legal() {
            out.push((to, verdict));
        }
    }
}

#[cfg(test)]
#[path = "rules_tests.rs"]
mod rules_tests;
