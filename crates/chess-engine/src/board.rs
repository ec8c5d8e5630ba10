//! Immutable board snapshots and the builder that produces them.

use std::fmt;

use chess_core::{Alliance, PieceKind, Square};

use crate::player::{Player, PlayerState};
use crate::{movegen, BoardError, GameResult, Move, Piece};

/// The contents of one square.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tile {
    Empty(Square),
    Occupied(Piece),
}

/// Every possible empty tile, shared by all boards.
static EMPTY_TILES: [Tile; 64] = empty_tiles();

const fn empty_tiles() -> [Tile; 64] {
    let mut tiles = [Tile::Empty(Square::A8); 64];
    let mut index = 0;
    while index < 64 {
        tiles[index] = match Square::from_index(index as u8) {
            Some(square) => Tile::Empty(square),
            None => unreachable!(),
        };
        index += 1;
    }
    tiles
}

impl Tile {
    /// Returns the tile for `square`, reusing the shared empty tile when vacant.
    pub fn create(square: Square, piece: Option<Piece>) -> Self {
        match piece {
            Some(piece) => Tile::Occupied(piece),
            None => EMPTY_TILES[square.index() as usize],
        }
    }

    /// Returns the square this tile sits on.
    pub fn square(&self) -> Square {
        match self {
            Tile::Empty(square) => *square,
            Tile::Occupied(piece) => piece.square(),
        }
    }

    #[inline]
    pub fn is_occupied(&self) -> bool {
        matches!(self, Tile::Occupied(_))
    }

    /// Returns the occupant, if any.
    #[inline]
    pub fn piece(&self) -> Option<&Piece> {
        match self {
            Tile::Empty(_) => None,
            Tile::Occupied(piece) => Some(piece),
        }
    }
}

impl fmt::Display for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tile::Empty(_) => f.pad("-"),
            Tile::Occupied(piece) => f.pad(&piece.to_string()),
        }
    }
}

/// The square layout that move generation reads from.
#[derive(Debug, Clone)]
pub(crate) struct Grid {
    tiles: [Tile; 64],
    en_passant_pawn: Option<Piece>,
}

impl Grid {
    #[inline]
    pub(crate) fn tile(&self, square: Square) -> &Tile {
        &self.tiles[square.index() as usize]
    }

    #[inline]
    pub(crate) fn piece_at(&self, square: Square) -> Option<&Piece> {
        self.tile(square).piece()
    }

    #[inline]
    pub(crate) fn is_occupied(&self, square: Square) -> bool {
        self.tile(square).is_occupied()
    }

    #[inline]
    pub(crate) fn en_passant_pawn(&self) -> Option<&Piece> {
        self.en_passant_pawn.as_ref()
    }

    /// Collects the pieces of one side in square-index order.
    fn active_pieces(&self, alliance: Alliance) -> Vec<Piece> {
        self.tiles
            .iter()
            .filter_map(Tile::piece)
            .filter(|piece| piece.alliance() == alliance)
            .copied()
            .collect()
    }
}

/// Single-use accumulator that materializes one [`Board`].
///
/// # Example
///
/// ```
/// use chess_core::{Alliance, PieceKind, Square};
/// use chess_engine::{Builder, Piece};
///
/// let mut builder = Builder::new();
/// builder
///     .set_piece(Piece::new(PieceKind::King, Square::E1, Alliance::White, true))
///     .set_piece(Piece::new(PieceKind::King, Square::E8, Alliance::Black, true))
///     .set_next_move_maker(Alliance::White);
/// let board = builder.build().unwrap();
/// assert_eq!(board.white_player().legal_moves().len(), 5);
/// ```
#[derive(Debug, Clone)]
pub struct Builder {
    config: [Option<Piece>; 64],
    next_move_maker: Option<Alliance>,
    en_passant_pawn: Option<Piece>,
}

impl Default for Builder {
    fn default() -> Self {
        Self::new()
    }
}

impl Builder {
    /// Creates an empty builder with no side to move and no en-passant pawn.
    pub fn new() -> Self {
        Builder {
            config: [None; 64],
            next_move_maker: None,
            en_passant_pawn: None,
        }
    }

    /// Places `piece` on its own square, replacing any earlier occupant.
    pub fn set_piece(&mut self, piece: Piece) -> &mut Self {
        self.config[piece.square().index() as usize] = Some(piece);
        self
    }

    /// Records whose turn the resulting board represents.
    pub fn set_next_move_maker(&mut self, alliance: Alliance) -> &mut Self {
        self.next_move_maker = Some(alliance);
        self
    }

    /// Records the pawn that may be captured en passant on the next ply.
    pub fn set_en_passant_pawn(&mut self, pawn: Piece) -> &mut Self {
        debug_assert_eq!(pawn.kind(), PieceKind::Pawn);
        self.en_passant_pawn = Some(pawn);
        self
    }

    /// Materializes the board, deriving both players from scratch.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::MissingMoveMaker`] if no side to move was set,
    /// or [`BoardError::MissingKing`] if either side has no king.
    pub fn build(self) -> Result<Board, BoardError> {
        let next_move_maker = self.next_move_maker.ok_or(BoardError::MissingMoveMaker)?;

        let tiles = std::array::from_fn(|index| match self.config[index] {
            Some(piece) => Tile::Occupied(piece),
            None => EMPTY_TILES[index],
        });
        let grid = Grid {
            tiles,
            en_passant_pawn: self.en_passant_pawn,
        };

        let white_pieces = grid.active_pieces(Alliance::White);
        let black_pieces = grid.active_pieces(Alliance::Black);
        let white_moves = calculate_moves(&white_pieces, &grid);
        let black_moves = calculate_moves(&black_pieces, &grid);

        let white_player = PlayerState::new(
            Alliance::White,
            &white_pieces,
            &grid,
            &white_moves,
            &black_moves,
        )?;
        let black_player = PlayerState::new(
            Alliance::Black,
            &black_pieces,
            &grid,
            &black_moves,
            &white_moves,
        )?;

        tracing::trace!(
            next = %next_move_maker,
            white = white_pieces.len(),
            black = black_pieces.len(),
            "built board"
        );

        Ok(Board {
            grid,
            white_pieces,
            black_pieces,
            white_player,
            black_player,
            next_move_maker,
        })
    }
}

fn calculate_moves(pieces: &[Piece], grid: &Grid) -> Vec<Move> {
    pieces
        .iter()
        .flat_map(|piece| movegen::candidate_moves(piece, grid))
        .collect()
}

/// An immutable board snapshot.
///
/// A board is produced once by a [`Builder`] and never changes. Both
/// [`Player`]s are derived at construction; applying a [`Move`] yields a
/// new board and leaves this one intact.
#[derive(Debug, Clone)]
pub struct Board {
    grid: Grid,
    white_pieces: Vec<Piece>,
    black_pieces: Vec<Piece>,
    white_player: PlayerState,
    black_player: PlayerState,
    next_move_maker: Alliance,
}

impl Board {
    /// Creates the standard starting position with White to move.
    pub fn standard() -> Self {
        let mut builder = Builder::new();
        for alliance in Alliance::ALL {
            let back = alliance.back_rank();
            let pawns = alliance.pawn_start_rank();
            for (x, kind) in BACK_RANK.into_iter().enumerate() {
                builder.set_piece(standard_piece(kind, x as u8, back, alliance));
                builder.set_piece(standard_piece(PieceKind::Pawn, x as u8, pawns, alliance));
            }
        }
        builder.set_next_move_maker(Alliance::White);
        builder.build().expect("standard position has both kings")
    }

    /// Returns the tile on `square`.
    #[inline]
    pub fn tile(&self, square: Square) -> &Tile {
        self.grid.tile(square)
    }

    /// Returns the tile at `(x, y)`, or `None` off the board.
    pub fn tile_at(&self, x: u8, y: u8) -> Option<&Tile> {
        Square::new(x, y).map(|square| self.tile(square))
    }

    /// Returns the piece on `square`, if any.
    #[inline]
    pub fn piece_at(&self, square: Square) -> Option<&Piece> {
        self.grid.piece_at(square)
    }

    /// Returns the active pieces of one side in square-index order.
    pub fn pieces(&self, alliance: Alliance) -> &[Piece] {
        match alliance {
            Alliance::White => &self.white_pieces,
            Alliance::Black => &self.black_pieces,
        }
    }

    pub fn white_pieces(&self) -> &[Piece] {
        &self.white_pieces
    }

    pub fn black_pieces(&self) -> &[Piece] {
        &self.black_pieces
    }

    /// Iterates over every active piece, White first.
    pub fn all_pieces(&self) -> impl Iterator<Item = &Piece> {
        self.white_pieces.iter().chain(self.black_pieces.iter())
    }

    /// Returns the side to move.
    #[inline]
    pub fn next_move_maker(&self) -> Alliance {
        self.next_move_maker
    }

    /// Returns the pawn that double-stepped on the previous ply, if any.
    #[inline]
    pub fn en_passant_pawn(&self) -> Option<&Piece> {
        self.grid.en_passant_pawn()
    }

    pub fn white_player(&self) -> Player<'_> {
        Player::new(self, &self.white_player)
    }

    pub fn black_player(&self) -> Player<'_> {
        Player::new(self, &self.black_player)
    }

    /// Returns the player for `alliance`.
    pub fn player(&self, alliance: Alliance) -> Player<'_> {
        match alliance {
            Alliance::White => self.white_player(),
            Alliance::Black => self.black_player(),
        }
    }

    /// Returns the player whose turn it is.
    pub fn current_player(&self) -> Player<'_> {
        self.player(self.next_move_maker)
    }

    /// Iterates over both players' legal moves, White first.
    pub fn all_legal_moves(&self) -> impl Iterator<Item = &Move> {
        self.white_player
            .legal_moves()
            .iter()
            .chain(self.black_player.legal_moves().iter())
    }

    /// Returns the result if the side to move has no move that succeeds.
    ///
    /// Every legal move is attempted, so this rebuilds one board per move.
    pub fn game_result(&self) -> Option<GameResult> {
        let player = self.current_player();
        if player.has_escape_moves() {
            return None;
        }
        if player.is_in_check() {
            Some(match player.alliance() {
                Alliance::White => GameResult::BlackWins,
                Alliance::Black => GameResult::WhiteWins,
            })
        } else {
            Some(GameResult::Stalemate)
        }
    }

    pub(crate) fn grid(&self) -> &Grid {
        &self.grid
    }
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

fn standard_piece(kind: PieceKind, x: u8, y: u8, alliance: Alliance) -> Piece {
    let square = Square::new(x, y).expect("standard squares are on the board");
    Piece::new(kind, square, alliance, true)
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, tile) in self.grid.tiles.iter().enumerate() {
            write!(f, "{:>3}", tile)?;
            if index % 8 == 7 {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}
