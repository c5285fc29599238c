use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ChessError;
use crate::time::Time;
use crate::types::*;

/// 8x8 grid indexed `[file - 1][rank - 1]`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    squares: [[Option<Piece>; 8]; 8],
}

impl Board {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn get(&self, at: Coordinates) -> Option<Piece> {
        self.squares[at.file_index()][at.rank_index()]
    }

    pub fn get_mut(&mut self, at: Coordinates) -> Option<&mut Piece> {
        self.squares[at.file_index()][at.rank_index()].as_mut()
    }

    pub fn set(&mut self, at: Coordinates, piece: Option<Piece>) {
        self.squares[at.file_index()][at.rank_index()] = piece;
    }

    pub fn take(&mut self, at: Coordinates) -> Option<Piece> {
        self.squares[at.file_index()][at.rank_index()].take()
    }

    pub fn clear(&mut self) {
        self.squares = Default::default();
    }

    /// Every occupied square with its piece.
    pub fn pieces(&self) -> impl Iterator<Item = (Coordinates, Piece)> + '_ {
        Coordinates::all().filter_map(|c| self.get(c).map(|p| (c, p)))
    }
}

/// Renders rank 8 at the top, upper case for White, `.` for empty squares.
impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in (1..=8u8).rev() {
            write!(f, "{rank} ")?;
            for file in 1..=8u8 {
                let ch = Coordinates::new(file, rank)
                    .and_then(|c| self.get(c))
                    .map(|p| p.fen_char())
                    .unwrap_or('.');
                write!(f, " {ch}")?;
            }
            writeln!(f)?;
        }
        write!(f, "   a b c d e f g h")
    }
}

/// Authoritative state of one game: board, side to move, both clocks, the
/// pause flag and the en-passant marker.
///
/// Cloning produces a fully independent copy; history snapshots rely on it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    pub board: Board,
    pub whose_move: Color,
    pub white_time: Time,
    pub black_time: Time,
    pub paused: bool,
    /// File (1..=8) of a pawn that advanced two squares on the previous ply.
    pub en_passant_column: Option<u8>,
}

const BACK_RANK: [PieceKind; 8] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

impl GameState {
    pub fn empty(time_per_player: Time) -> Self {
        GameState {
            board: Board::empty(),
            whose_move: Color::White,
            white_time: time_per_player,
            black_time: time_per_player,
            paused: true,
            en_passant_column: None,
        }
    }

    pub fn start_position(time_per_player: Time) -> Self {
        let mut state = Self::empty(time_per_player);
        for file in 1..=8u8 {
            let kind = BACK_RANK[(file - 1) as usize];
            for (color, back, pawns) in [(Color::White, 1, 2), (Color::Black, 8, 7)] {
                state.set_piece_at(square(file, back), Some(Piece::new(kind, color)));
                state.set_piece_at(square(file, pawns), Some(Piece::new(PieceKind::Pawn, color)));
            }
        }
        state
    }

    /// Reads the placement, side-to-move, castling and en-passant fields of
    /// a FEN string. Clocks start at zero.
    ///
    /// `has_moved` is reconstructed from the position. Pawns, knights,
    /// bishops and queens are unmoved on their setup squares. Kings and
    /// corner rooks are unmoved only when a matching castling right is
    /// listed. Everything else counts as moved, so the standard FEN gives
    /// exactly [`GameState::start_position`].
    pub fn from_fen(fen: &str) -> Result<Self, ChessError> {
        let invalid = |what: &str| ChessError::InvalidFen(format!("{what}: {fen}"));

        let parts: Vec<&str> = fen.split_whitespace().collect();
        if parts.len() < 4 {
            return Err(invalid("expected at least 4 fields"));
        }
        let (board_part, stm_part, castle_part, ep_part) = (parts[0], parts[1], parts[2], parts[3]);

        let mut state = Self::empty(Time::ZERO);

        let ranks: Vec<&str> = board_part.split('/').collect();
        if ranks.len() != 8 {
            return Err(invalid("board section needs 8 ranks"));
        }
        for (rank_idx, rank_str) in ranks.iter().enumerate() {
            let rank = 8 - rank_idx as u8; // FEN lists rank 8 .. 1
            let mut file: u8 = 1;
            for ch in rank_str.chars() {
                if let Some(d) = ch.to_digit(10) {
                    file += d as u8;
                } else {
                    let kind = PieceKind::from_letter(ch).ok_or_else(|| invalid("bad piece letter"))?;
                    let color = if ch.is_ascii_uppercase() {
                        Color::White
                    } else {
                        Color::Black
                    };
                    let at = Coordinates::new(file, rank).ok_or_else(|| invalid("too many files in rank"))?;
                    state.set_piece_at(at, Some(Piece::moved(kind, color)));
                    file += 1;
                }
                if file > 9 {
                    return Err(invalid("too many files in rank"));
                }
            }
            if file != 9 {
                return Err(invalid("not enough files in rank"));
            }
        }

        state.whose_move = match stm_part {
            "w" => Color::White,
            "b" => Color::Black,
            _ => return Err(invalid("bad side to move")),
        };

        // Pawns, knights, bishops and queens on their setup squares count as
        // unmoved; kings and rooks wait for the castling field.
        let at_home: Vec<Coordinates> = state
            .board
            .pieces()
            .filter(|&(c, p)| match p.kind {
                PieceKind::Pawn => c.rank() == p.color.pawn_rank(),
                PieceKind::King | PieceKind::Rook => false,
                kind => c.rank() == p.color.back_rank() && BACK_RANK[c.file_index()] == kind,
            })
            .map(|(c, _)| c)
            .collect();
        for at in at_home {
            state.mark_unmoved(at);
        }

        if castle_part != "-" {
            for ch in castle_part.chars() {
                let (color, rook_file) = match ch {
                    'K' => (Color::White, 8),
                    'Q' => (Color::White, 1),
                    'k' => (Color::Black, 8),
                    'q' => (Color::Black, 1),
                    _ => return Err(invalid("bad castling field")),
                };
                let rank = color.back_rank();
                let king_sq = square(5, rank);
                let rook_sq = square(rook_file, rank);
                if state.piece_at(king_sq) == Some(Piece::new(PieceKind::King, color)) {
                    state.mark_unmoved(king_sq);
                }
                if state.piece_at(rook_sq) == Some(Piece::new(PieceKind::Rook, color)) {
                    state.mark_unmoved(rook_sq);
                }
            }
        }

        if ep_part != "-" {
            let ep: Coordinates = ep_part.parse().map_err(|_| invalid("bad en-passant square"))?;
            state.en_passant_column = Some(ep.file());
        }

        Ok(state)
    }

    pub fn piece_at(&self, at: Coordinates) -> Option<Piece> {
        self.board.get(at)
    }

    pub fn set_piece_at(&mut self, at: Coordinates, piece: Option<Piece>) {
        self.board.set(at, piece);
    }

    pub fn find_king(&self, color: Color) -> Option<Coordinates> {
        self.board
            .pieces()
            .find(|(_, p)| p.is_king() && p.color == color)
            .map(|(c, _)| c)
    }

    pub fn toggle_whose_move(&mut self) {
        self.whose_move = self.whose_move.other();
    }

    pub fn player_time(&self, color: Color) -> Time {
        match color {
            Color::White => self.white_time,
            Color::Black => self.black_time,
        }
    }

    pub fn player_time_mut(&mut self, color: Color) -> &mut Time {
        match color {
            Color::White => &mut self.white_time,
            Color::Black => &mut self.black_time,
        }
    }

    pub fn add_player_time(&mut self, color: Color, added: Time) {
        *self.player_time_mut(color) += added;
    }

    /// One clock tick off the side to move.
    pub fn decrement_current_player_time(&mut self) {
        let color = self.whose_move;
        self.player_time_mut(color).decrement();
    }

    pub fn set_time_for_players(&mut self, time_per_player: Time) {
        self.white_time = time_per_player;
        self.black_time = time_per_player;
    }

    /// Plain relocation: marks the piece as moved, records a pawn double
    /// step in the en-passant marker and passes the turn.
    pub fn move_piece(&mut self, from: Coordinates, to: Coordinates) {
        self.en_passant_column = None;
        if let Some(mut piece) = self.board.take(from) {
            if piece.kind == PieceKind::Pawn && (to.rank() as i8 - from.rank() as i8).abs() == 2 {
                self.en_passant_column = Some(to.file());
            }
            piece.has_moved = true;
            self.board.set(to, Some(piece));
        }
        self.toggle_whose_move();
    }

    /// King from `from` to `to`, the corner rook to the square the king
    /// crossed.
    pub fn castle(&mut self, from: Coordinates, to: Coordinates) {
        let dir = Direction::between(from, to);
        let rook_file = if dir.dx > 0 { 8 } else { 1 };
        let rook_from = square(rook_file, from.rank());
        if let Some(rook_to) = from.step(dir) {
            if let Some(mut king) = self.board.take(from) {
                king.has_moved = true;
                self.board.set(to, Some(king));
            }
            if let Some(mut rook) = self.board.take(rook_from) {
                rook.has_moved = true;
                self.board.set(rook_to, Some(rook));
            }
        }
        self.en_passant_column = None;
        self.toggle_whose_move();
    }

    /// Pawn diagonal to an empty square, capturing the pawn beside it.
    pub fn en_passant(&mut self, from: Coordinates, to: Coordinates) {
        if let Some(mut pawn) = self.board.take(from) {
            pawn.has_moved = true;
            self.board.set(to, Some(pawn));
        }
        self.board.set(en_passant_victim(from, to), None);
        self.en_passant_column = None;
        self.toggle_whose_move();
    }

    /// Replaces the pawn on `from` with a new `kind` piece on `to`.
    pub fn promote(&mut self, from: Coordinates, to: Coordinates, kind: PieceKind) {
        if let Some(pawn) = self.board.take(from) {
            self.board.set(to, Some(Piece::moved(kind, pawn.color)));
        }
        self.en_passant_column = None;
        self.toggle_whose_move();
    }

    /// Empties the board; used when a game is ended.
    pub fn clear_board(&mut self) {
        self.board.clear();
        self.en_passant_column = None;
    }

    fn mark_unmoved(&mut self, at: Coordinates) {
        if let Some(p) = self.board.get_mut(at) {
            p.has_moved = false;
        }
    }
}

/// Square of the pawn removed by an en-passant capture `from -> to`.
pub fn en_passant_victim(from: Coordinates, to: Coordinates) -> Coordinates {
    square(to.file(), from.rank())
}

#[cfg(test)]
#[path = "board_tests.rs"]
mod board_tests;
