//! Pieces on the board.

use std::fmt;
use std::hash::{Hash, Hasher};

use chess_core::{Alliance, PieceKind, Square};

use crate::{movegen, Board, Move};

/// An immutable piece: its type, square, side, and whether it has moved.
///
/// Kings also remember whether they reached their square by castling.
/// That flag is informational and does not take part in equality.
#[derive(Debug, Clone, Copy)]
pub struct Piece {
    kind: PieceKind,
    square: Square,
    alliance: Alliance,
    first_move: bool,
    castled: bool,
}

impl Piece {
    /// Creates a piece that has not castled.
    pub const fn new(kind: PieceKind, square: Square, alliance: Alliance, first_move: bool) -> Self {
        Piece {
            kind,
            square,
            alliance,
            first_move,
            castled: false,
        }
    }

    #[inline]
    pub const fn kind(&self) -> PieceKind {
        self.kind
    }

    #[inline]
    pub const fn square(&self) -> Square {
        self.square
    }

    #[inline]
    pub const fn alliance(&self) -> Alliance {
        self.alliance
    }

    /// Returns true until the piece has moved once.
    #[inline]
    pub const fn is_first_move(&self) -> bool {
        self.first_move
    }

    /// Returns true for a king that has castled.
    #[inline]
    pub const fn is_castled(&self) -> bool {
        self.castled
    }

    #[inline]
    pub const fn value(&self) -> u32 {
        self.kind.value()
    }

    /// Returns this piece's pseudo-legal moves on `board`.
    ///
    /// The moves obey movement and occupancy rules only; whether they
    /// expose the mover's king is decided when a move is attempted.
    pub fn calculate_legal_moves(&self, board: &Board) -> Vec<Move> {
        movegen::candidate_moves(self, board.grid())
    }

    /// Returns the copy of this piece standing on the move's destination.
    pub fn move_piece(&self, mv: &Move) -> Piece {
        Piece {
            kind: self.kind,
            square: mv.destination(),
            alliance: self.alliance,
            first_move: false,
            castled: self.kind == PieceKind::King && (self.castled || mv.is_castle()),
        }
    }

    /// Returns the piece a pawn turns into on the last rank.
    pub const fn promotion_piece(&self) -> Piece {
        Piece::new(PieceKind::Queen, self.square, self.alliance, false)
    }
}

impl PartialEq for Piece {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind
            && self.square == other.square
            && self.alliance == other.alliance
            && self.first_move == other.first_move
    }
}

impl Eq for Piece {}

impl Hash for Piece {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.kind.hash(state);
        self.square.hash(state);
        self.alliance.hash(state);
        self.first_move.hash(state);
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind.to_char(self.alliance))
    }
}
