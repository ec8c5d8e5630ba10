//! Per-side legality, check, and castling.

use std::borrow::Cow;
use std::fmt;

use chess_core::{Alliance, PieceKind, Square};

use crate::board::Grid;
use crate::{Board, BoardError, Castling, Move, Piece};

/// What a board derives for one side when it is built.
#[derive(Debug, Clone)]
pub(crate) struct PlayerState {
    alliance: Alliance,
    king: Piece,
    legal_moves: Vec<Move>,
    in_check: bool,
}

/// Files involved in one castle on a side's back rank.
struct CastlePath {
    rook_x: u8,
    king_to_x: u8,
    rook_to_x: u8,
    /// Must be empty.
    between: &'static [u8],
    /// Must not be reachable by any opponent move.
    guarded: &'static [u8],
    wrap: fn(Castling) -> Move,
}

const KING_START_X: u8 = 4;

const CASTLE_PATHS: [CastlePath; 2] = [
    CastlePath {
        rook_x: 7,
        king_to_x: 6,
        rook_to_x: 5,
        between: &[5, 6],
        guarded: &[5, 6],
        wrap: Move::KingSideCastle,
    },
    CastlePath {
        rook_x: 0,
        king_to_x: 2,
        rook_to_x: 3,
        between: &[1, 2, 3],
        guarded: &[2, 3],
        wrap: Move::QueenSideCastle,
    },
];

impl PlayerState {
    /// Derives one side's state from both sides' pseudo-legal moves.
    pub(crate) fn new(
        alliance: Alliance,
        pieces: &[Piece],
        grid: &Grid,
        own_moves: &[Move],
        opponent_moves: &[Move],
    ) -> Result<Self, BoardError> {
        let king = pieces
            .iter()
            .find(|piece| piece.kind() == PieceKind::King)
            .copied()
            .ok_or(BoardError::MissingKing(alliance))?;
        let in_check = is_attacked(king.square(), opponent_moves);

        let mut legal_moves = own_moves.to_vec();
        if king.is_first_move() && !in_check {
            legal_moves.extend(castles(&king, grid, opponent_moves));
        }

        Ok(PlayerState {
            alliance,
            king,
            legal_moves,
            in_check,
        })
    }

    pub(crate) fn legal_moves(&self) -> &[Move] {
        &self.legal_moves
    }
}

fn is_attacked(square: Square, opponent_moves: &[Move]) -> bool {
    opponent_moves.iter().any(|mv| mv.destination() == square)
}

fn castles(king: &Piece, grid: &Grid, opponent_moves: &[Move]) -> Vec<Move> {
    let rank = king.alliance().back_rank();
    if king.square() != back_rank_square(KING_START_X, rank) {
        return Vec::new();
    }

    let mut moves = Vec::new();
    for path in &CASTLE_PATHS {
        let Some(rook) = grid.piece_at(back_rank_square(path.rook_x, rank)) else {
            continue;
        };
        if rook.kind() != PieceKind::Rook
            || rook.alliance() != king.alliance()
            || !rook.is_first_move()
        {
            continue;
        }
        let blocked = path
            .between
            .iter()
            .any(|&x| grid.is_occupied(back_rank_square(x, rank)));
        let attacked = path
            .guarded
            .iter()
            .any(|&x| is_attacked(back_rank_square(x, rank), opponent_moves));
        if blocked || attacked {
            continue;
        }
        moves.push((path.wrap)(Castling {
            king: *king,
            destination: back_rank_square(path.king_to_x, rank),
            rook: *rook,
            rook_destination: back_rank_square(path.rook_to_x, rank),
        }));
    }
    moves
}

fn back_rank_square(x: u8, rank: u8) -> Square {
    match Square::new(x, rank) {
        Some(square) => square,
        None => unreachable!("castling files and back ranks lie on the board"),
    }
}

/// A side of a board, viewed through that board.
///
/// Obtained from [`Board::white_player`], [`Board::black_player`], or
/// [`Board::current_player`]; it borrows the board it came from.
#[derive(Debug, Clone, Copy)]
pub struct Player<'a> {
    board: &'a Board,
    state: &'a PlayerState,
}

impl<'a> Player<'a> {
    pub(crate) fn new(board: &'a Board, state: &'a PlayerState) -> Self {
        Player { board, state }
    }

    #[inline]
    pub fn alliance(&self) -> Alliance {
        self.state.alliance
    }

    pub fn king(&self) -> &'a Piece {
        &self.state.king
    }

    pub fn active_pieces(&self) -> &'a [Piece] {
        self.board.pieces(self.state.alliance)
    }

    /// Returns the pseudo-legal moves plus any castles.
    ///
    /// Moves that would expose the king are still listed; attempting one
    /// yields [`MoveStatus::LeavesPlayerInCheck`].
    pub fn legal_moves(&self) -> &'a [Move] {
        &self.state.legal_moves
    }

    pub fn opponent(&self) -> Player<'a> {
        self.board.player(self.state.alliance.opposite())
    }

    #[inline]
    pub fn is_in_check(&self) -> bool {
        self.state.in_check
    }

    pub fn is_castled(&self) -> bool {
        self.state.king.is_castled()
    }

    pub fn is_move_legal(&self, mv: &Move) -> bool {
        self.state.legal_moves.contains(mv)
    }

    /// Attempts `mv`, returning the resulting board and status.
    ///
    /// On any status other than [`MoveStatus::Done`] the transition holds
    /// the original board.
    ///
    /// # Errors
    ///
    /// Propagates [`BoardError`] if the move produces a board without a
    /// king, which can only happen on a corrupted position.
    pub fn make_move(&self, mv: &Move) -> Result<MoveTransition<'a>, BoardError> {
        if !self.is_move_legal(mv) {
            tracing::debug!(side = %self.alliance(), mv = %mv, "rejected move not in legal set");
            return Ok(MoveTransition::unchanged(self.board, MoveStatus::IllegalMove));
        }

        let next = mv.execute(self.board)?;
        if next.player(self.alliance()).is_in_check() {
            tracing::debug!(side = %self.alliance(), mv = %mv, "rejected move leaving king in check");
            return Ok(MoveTransition::unchanged(
                self.board,
                MoveStatus::LeavesPlayerInCheck,
            ));
        }

        Ok(MoveTransition {
            board: Cow::Owned(next),
            status: MoveStatus::Done,
        })
    }

    /// Returns true if at least one legal move can be completed.
    ///
    /// Every candidate is executed, so this costs one board build per move.
    pub fn has_escape_moves(&self) -> bool {
        self.state.legal_moves.iter().any(|mv| {
            self.make_move(mv)
                .map(|transition| transition.status().is_done())
                .unwrap_or(false)
        })
    }

    pub fn is_in_checkmate(&self) -> bool {
        self.state.in_check && !self.has_escape_moves()
    }

    pub fn is_in_stalemate(&self) -> bool {
        !self.state.in_check && !self.has_escape_moves()
    }
}

/// Outcome of attempting a move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoveStatus {
    Done,
    IllegalMove,
    LeavesPlayerInCheck,
}

impl MoveStatus {
    #[inline]
    pub fn is_done(self) -> bool {
        self == MoveStatus::Done
    }
}

impl fmt::Display for MoveStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoveStatus::Done => write!(f, "done"),
            MoveStatus::IllegalMove => write!(f, "illegal move"),
            MoveStatus::LeavesPlayerInCheck => write!(f, "leaves player in check"),
        }
    }
}

/// The board after a move attempt, together with its status.
#[derive(Debug, Clone)]
pub struct MoveTransition<'a> {
    board: Cow<'a, Board>,
    status: MoveStatus,
}

impl<'a> MoveTransition<'a> {
    fn unchanged(board: &'a Board, status: MoveStatus) -> Self {
        MoveTransition {
            board: Cow::Borrowed(board),
            status,
        }
    }

    /// Returns the new board, or the original one if the move failed.
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[inline]
    pub fn status(&self) -> MoveStatus {
        self.status
    }

    pub fn into_board(self) -> Board {
        self.board.into_owned()
    }
}
