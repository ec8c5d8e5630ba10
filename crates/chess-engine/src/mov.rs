//! Move descriptors and their application to a board.

use std::fmt;

use chess_core::{PieceKind, Square};

use crate::{Board, BoardError, Builder, Piece};

/// King and rook placement for a castle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Castling {
    pub king: Piece,
    pub destination: Square,
    pub rook: Piece,
    pub rook_destination: Square,
}

/// A candidate transition from one board to the next.
///
/// A move only describes the transition; nothing changes until it is
/// [executed](Move::execute) against a board, which yields a new board.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Move {
    /// A non-pawn piece moving to an empty square.
    Major { piece: Piece, destination: Square },
    /// A non-pawn piece capturing on its destination.
    Attack {
        piece: Piece,
        destination: Square,
        captured: Piece,
    },
    /// A single pawn push.
    PawnMove { piece: Piece, destination: Square },
    /// A double pawn push; the pawn becomes capturable en passant.
    PawnJump { piece: Piece, destination: Square },
    /// A diagonal pawn capture.
    PawnAttack {
        piece: Piece,
        destination: Square,
        captured: Piece,
    },
    /// A pawn capturing the pawn that just double-stepped past it.
    PawnEnPassantAttack {
        piece: Piece,
        destination: Square,
        captured: Piece,
    },
    /// A pawn move or capture reaching the last rank; always promotes to a queen.
    PawnPromotion(Box<Move>),
    KingSideCastle(Castling),
    QueenSideCastle(Castling),
}

impl Move {
    /// Returns the piece being moved.
    pub fn piece(&self) -> &Piece {
        match self {
            Move::Major { piece, .. }
            | Move::Attack { piece, .. }
            | Move::PawnMove { piece, .. }
            | Move::PawnJump { piece, .. }
            | Move::PawnAttack { piece, .. }
            | Move::PawnEnPassantAttack { piece, .. } => piece,
            Move::PawnPromotion(inner) => inner.piece(),
            Move::KingSideCastle(castling) | Move::QueenSideCastle(castling) => &castling.king,
        }
    }

    #[inline]
    pub fn source(&self) -> Square {
        self.piece().square()
    }

    pub fn destination(&self) -> Square {
        match self {
            Move::Major { destination, .. }
            | Move::Attack { destination, .. }
            | Move::PawnMove { destination, .. }
            | Move::PawnJump { destination, .. }
            | Move::PawnAttack { destination, .. }
            | Move::PawnEnPassantAttack { destination, .. } => *destination,
            Move::PawnPromotion(inner) => inner.destination(),
            Move::KingSideCastle(castling) | Move::QueenSideCastle(castling) => {
                castling.destination
            }
        }
    }

    /// Returns the captured piece, if this move captures.
    pub fn captured(&self) -> Option<&Piece> {
        match self {
            Move::Attack { captured, .. }
            | Move::PawnAttack { captured, .. }
            | Move::PawnEnPassantAttack { captured, .. } => Some(captured),
            Move::PawnPromotion(inner) => inner.captured(),
            _ => None,
        }
    }

    #[inline]
    pub fn is_attack(&self) -> bool {
        self.captured().is_some()
    }

    #[inline]
    pub fn is_castle(&self) -> bool {
        matches!(self, Move::KingSideCastle(_) | Move::QueenSideCastle(_))
    }

    #[inline]
    pub fn is_promotion(&self) -> bool {
        matches!(self, Move::PawnPromotion(_))
    }

    /// Returns the rook taking part in a castle.
    pub fn castle_rook(&self) -> Option<&Piece> {
        match self {
            Move::KingSideCastle(castling) | Move::QueenSideCastle(castling) => {
                Some(&castling.rook)
            }
            _ => None,
        }
    }

    /// Applies this move to `board`, producing the next board.
    ///
    /// The side to move on the result is the mover's opponent. Only a
    /// double pawn push leaves an en-passant pawn behind.
    ///
    /// # Errors
    ///
    /// Fails if the resulting position lacks a king, which only happens
    /// when a move captures one.
    pub fn execute(&self, board: &Board) -> Result<Board, BoardError> {
        match self {
            Move::PawnPromotion(inner) => promote(inner, board),
            Move::KingSideCastle(castling) | Move::QueenSideCastle(castling) => {
                castle(self, castling, board)
            }
            _ => self.execute_standard(board),
        }
    }

    fn execute_standard(&self, board: &Board) -> Result<Board, BoardError> {
        let mover = self.piece();
        let alliance = mover.alliance();
        let captured = self.captured();
        let mut builder = Builder::new();

        for piece in board.pieces(alliance) {
            if piece != mover {
                builder.set_piece(*piece);
            }
        }
        for piece in board.pieces(alliance.opposite()) {
            if Some(piece) != captured {
                builder.set_piece(*piece);
            }
        }

        let moved = mover.move_piece(self);
        builder.set_piece(moved);
        if let Move::PawnJump { .. } = self {
            builder.set_en_passant_pawn(moved);
        }
        builder.set_next_move_maker(alliance.opposite());
        builder.build()
    }
}

/// Runs the wrapped pawn move, then swaps the pawn for a queen.
fn promote(inner: &Move, board: &Board) -> Result<Board, BoardError> {
    let moved_board = inner.execute(board)?;
    let pawn = inner.piece().move_piece(inner);
    let mut builder = Builder::new();

    for piece in moved_board.all_pieces() {
        if *piece != pawn {
            builder.set_piece(*piece);
        }
    }
    builder.set_piece(pawn.promotion_piece());
    builder.set_next_move_maker(moved_board.next_move_maker());
    builder.build()
}

fn castle(mv: &Move, castling: &Castling, board: &Board) -> Result<Board, BoardError> {
    let alliance = castling.king.alliance();
    let mut builder = Builder::new();

    for piece in board.pieces(alliance) {
        if *piece != castling.king && *piece != castling.rook {
            builder.set_piece(*piece);
        }
    }
    for piece in board.pieces(alliance.opposite()) {
        builder.set_piece(*piece);
    }

    builder.set_piece(castling.king.move_piece(mv));
    builder.set_piece(Piece::new(
        PieceKind::Rook,
        castling.rook_destination,
        alliance,
        false,
    ));
    builder.set_next_move_maker(alliance.opposite());
    builder.build()
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Move::KingSideCastle(_) => write!(f, "0-0"),
            Move::QueenSideCastle(_) => write!(f, "0-0-0"),
            Move::PawnPromotion(inner) => write!(f, "{}={}", inner, PieceKind::Queen.letter()),
            _ => {
                let separator = if self.is_attack() { 'x' } else { '-' };
                write!(
                    f,
                    "{}{}{}{}",
                    self.piece().kind().letter(),
                    self.source(),
                    separator,
                    self.destination()
                )
            }
        }
    }
}

/// Resolves coordinates into one of a board's legal moves.
///
/// This is how callers outside the engine obtain a [`Move`] to play.
pub struct MoveFactory;

impl MoveFactory {
    /// Finds the legal move from `from` to `to`, searching White's moves
    /// before Black's.
    pub fn create_move(board: &Board, from: Square, to: Square) -> Option<&Move> {
        board
            .all_legal_moves()
            .find(|mv| mv.source() == from && mv.destination() == to)
    }

    /// Like [`MoveFactory::create_move`], taking raw `(x, y)` coordinates.
    ///
    /// Off-board coordinates resolve to `None`.
    pub fn from_coordinates(
        board: &Board,
        from_x: u8,
        from_y: u8,
        to_x: u8,
        to_y: u8,
    ) -> Option<&Move> {
        let from = Square::new(from_x, from_y)?;
        let to = Square::new(to_x, to_y)?;
        Self::create_move(board, from, to)
    }
}
