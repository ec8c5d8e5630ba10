//! Game management with history tracking.
//!
//! The [`Game`] struct layers a move history on top of immutable boards:
//! - every board played through is retained, so undo is a pop
//! - moves can be given as engine moves, square pairs, or text like `e2e4`
//! - captured pieces are recovered from the history

use std::fmt;

use chess_core::{Alliance, Square, SquareError};
use thiserror::Error;

use crate::{Board, BoardError, Move, MoveFactory, MoveStatus, Piece};

/// How a finished game ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameResult {
    WhiteWins,
    BlackWins,
    Stalemate,
}

impl GameResult {
    /// Returns the winning side, or `None` for a stalemate.
    pub fn winner(self) -> Option<Alliance> {
        match self {
            GameResult::WhiteWins => Some(Alliance::White),
            GameResult::BlackWins => Some(Alliance::Black),
            GameResult::Stalemate => None,
        }
    }
}

impl fmt::Display for GameResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameResult::WhiteWins => write!(f, "1-0"),
            GameResult::BlackWins => write!(f, "0-1"),
            GameResult::Stalemate => write!(f, "1/2-1/2"),
        }
    }
}

/// A recorded move in game history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameMove {
    /// The move as played.
    pub mov: Move,
    /// Canonical text of the move, e.g. `Pe2-e4`.
    pub notation: String,
}

/// Error type for game operations.
///
/// A move that is illegal or leaves the king in check is not an error; it
/// is reported through [`MoveStatus`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GameError {
    #[error("no legal move from {from} to {to}")]
    NoSuchMove { from: Square, to: Square },

    #[error("invalid move text '{0}': expected a source and destination square like e2e4")]
    InvalidMoveText(String),

    #[error(transparent)]
    InvalidSquare(#[from] SquareError),

    #[error("game has already ended")]
    GameAlreadyOver,

    #[error(transparent)]
    Board(#[from] BoardError),
}

/// A chess game with history.
#[derive(Debug, Clone)]
pub struct Game {
    /// Current board.
    board: Board,
    /// Boards before each played move, oldest first.
    history: Vec<Board>,
    moves: Vec<GameMove>,
    result: Option<GameResult>,
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

impl Game {
    /// Creates a new game with the standard starting position.
    pub fn new() -> Self {
        Game {
            board: Board::standard(),
            history: Vec::new(),
            moves: Vec::new(),
            result: None,
        }
    }

    /// Creates a game from a custom board, which may already be finished.
    pub fn from_board(board: Board) -> Self {
        let result = board.game_result();
        Game {
            board,
            history: Vec::new(),
            moves: Vec::new(),
            result,
        }
    }

    /// Returns the current board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the board the game started from.
    pub fn start_board(&self) -> &Board {
        self.history.first().unwrap_or(&self.board)
    }

    /// Returns the legal moves of the side to move.
    pub fn legal_moves(&self) -> &[Move] {
        self.board.current_player().legal_moves()
    }

    /// Returns true if the side to move is in check.
    pub fn is_check(&self) -> bool {
        self.board.current_player().is_in_check()
    }

    pub fn result(&self) -> Option<GameResult> {
        self.result
    }

    pub fn is_game_over(&self) -> bool {
        self.result.is_some()
    }

    pub fn move_history(&self) -> &[GameMove] {
        &self.moves
    }

    /// Returns the number of half-moves (plies) played.
    pub fn ply_count(&self) -> usize {
        self.moves.len()
    }

    /// Attempts a move for the side to move.
    ///
    /// The game only advances on [`MoveStatus::Done`]; any other status is
    /// returned as-is with the game unchanged.
    pub fn make_move(&mut self, mv: &Move) -> Result<MoveStatus, GameError> {
        if self.result.is_some() {
            return Err(GameError::GameAlreadyOver);
        }

        let transition = self.board.current_player().make_move(mv)?;
        let status = transition.status();
        if !status.is_done() {
            return Ok(status);
        }
        let next = transition.into_board();

        let previous = std::mem::replace(&mut self.board, next);
        self.history.push(previous);
        self.moves.push(GameMove {
            mov: mv.clone(),
            notation: mv.to_string(),
        });
        self.result = self.board.game_result();

        tracing::debug!(ply = self.moves.len(), mv = %mv, "move played");
        if let Some(result) = self.result {
            tracing::debug!(%result, "game over");
        }
        Ok(status)
    }

    /// Plays the legal move from `from` to `to`.
    pub fn make_move_coords(&mut self, from: Square, to: Square) -> Result<MoveStatus, GameError> {
        if self.result.is_some() {
            return Err(GameError::GameAlreadyOver);
        }
        let mv = MoveFactory::create_move(&self.board, from, to)
            .cloned()
            .ok_or(GameError::NoSuchMove { from, to })?;
        self.make_move(&mv)
    }

    /// Plays a move written as two squares, e.g. `e2e4`.
    pub fn make_move_text(&mut self, text: &str) -> Result<MoveStatus, GameError> {
        let text = text.trim();
        let (from, to) = match (text.len(), text.get(0..2), text.get(2..4)) {
            (4, Some(from), Some(to)) => (from.parse::<Square>()?, to.parse::<Square>()?),
            _ => return Err(GameError::InvalidMoveText(text.to_string())),
        };
        self.make_move_coords(from, to)
    }

    /// Takes back the latest move, returning it.
    pub fn undo(&mut self) -> Option<Move> {
        let previous = self.history.pop()?;
        self.board = previous;
        self.result = None;
        let undone = self.moves.pop().map(|game_move| game_move.mov);
        if let Some(mv) = &undone {
            tracing::debug!(ply = self.moves.len(), mv = %mv, "move undone");
        }
        undone
    }

    /// Returns the pieces of `alliance` captured so far, in capture order.
    pub fn taken_pieces(&self, alliance: Alliance) -> Vec<Piece> {
        self.moves
            .iter()
            .filter_map(|game_move| game_move.mov.captured())
            .filter(|piece| piece.alliance() == alliance)
            .copied()
            .collect()
    }

    /// Returns the total value of the pieces `alliance` has lost.
    pub fn material_lost(&self, alliance: Alliance) -> u32 {
        self.taken_pieces(alliance).iter().map(Piece::value).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chess_core::PieceKind;

    fn play(game: &mut Game, moves: &[&str]) {
        for text in moves {
            assert_eq!(game.make_move_text(text).unwrap(), MoveStatus::Done, "{text}");
        }
    }

    #[test]
    fn new_game() {
        let game = Game::new();
        assert_eq!(game.ply_count(), 0);
        assert!(!game.is_game_over());
        assert!(!game.is_check());
        assert_eq!(game.legal_moves().len(), 20);
        assert!(std::ptr::eq(game.start_board(), game.board()));
    }

    #[test]
    fn make_move_text() {
        let mut game = Game::new();
        play(&mut game, &["e2e4"]);
        assert_eq!(game.ply_count(), 1);
        assert_eq!(game.move_history()[0].notation, "Pe2-e4");
        assert_eq!(game.board().next_move_maker(), Alliance::Black);
        assert_eq!(game.start_board().next_move_maker(), Alliance::White);
    }

    #[test]
    fn unknown_move_is_an_error() {
        let mut game = Game::new();
        assert_eq!(
            game.make_move_text("e2e5"),
            Err(GameError::NoSuchMove {
                from: Square::from_algebraic("e2").unwrap(),
                to: Square::from_algebraic("e5").unwrap(),
            })
        );
        assert_eq!(game.ply_count(), 0);
    }

    #[test]
    fn malformed_text_is_an_error() {
        let mut game = Game::new();
        assert_eq!(
            game.make_move_text("e2"),
            Err(GameError::InvalidMoveText("e2".to_string()))
        );
        assert!(matches!(
            game.make_move_text("z2e4"),
            Err(GameError::InvalidSquare(_))
        ));
        assert!(matches!(
            game.make_move_text("é2e4"),
            Err(GameError::InvalidMoveText(_))
        ));
    }

    #[test]
    fn wrong_side_move_is_illegal_status() {
        let mut game = Game::new();
        assert_eq!(game.make_move_text("e7e5").unwrap(), MoveStatus::IllegalMove);
        assert_eq!(game.ply_count(), 0);
        assert_eq!(game.board().next_move_maker(), Alliance::White);
    }

    #[test]
    fn checkmate_fools_mate() {
        let mut game = Game::new();
        play(&mut game, &["f2f3", "e7e5", "g2g4", "d8h4"]);
        assert!(game.is_check());
        assert!(game.is_game_over());
        assert_eq!(game.result(), Some(GameResult::BlackWins));
        assert_eq!(game.result().unwrap().winner(), Some(Alliance::Black));
        assert_eq!(game.make_move_text("a2a3"), Err(GameError::GameAlreadyOver));
    }

    #[test]
    fn undo_restores_previous_board() {
        let mut game = Game::new();
        play(&mut game, &["e2e4", "d7d5"]);
        let undone = game.undo().unwrap();
        assert_eq!(undone.to_string(), "Pd7-d5");
        assert_eq!(game.ply_count(), 1);
        assert_eq!(game.board().next_move_maker(), Alliance::Black);
        assert!(game.board().piece_at(Square::from_algebraic("d7").unwrap()).is_some());

        game.undo().unwrap();
        assert!(game.undo().is_none());
        assert_eq!(game.legal_moves().len(), 20);
    }

    #[test]
    fn taken_pieces_and_material() {
        let mut game = Game::new();
        play(&mut game, &["e2e4", "d7d5", "e4d5", "d8d5", "b1c3"]);
        let taken = game.taken_pieces(Alliance::Black);
        assert_eq!(taken.len(), 1);
        assert_eq!(taken[0].kind(), PieceKind::Pawn);
        assert_eq!(game.material_lost(Alliance::White), 1);
        assert_eq!(game.material_lost(Alliance::Black), 1);
    }

    #[test]
    fn result_display() {
        assert_eq!(GameResult::WhiteWins.to_string(), "1-0");
        assert_eq!(GameResult::BlackWins.to_string(), "0-1");
        assert_eq!(GameResult::Stalemate.to_string(), "1/2-1/2");
        assert_eq!(GameResult::Stalemate.winner(), None);
    }
}
