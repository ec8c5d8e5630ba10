//! Chess rules engine over immutable board snapshots.
//!
//! This crate provides:
//! - [`Board`] - an immutable position, built once by a [`Builder`]
//! - [`Piece`] and [`Move`] - value types for pieces and move descriptors
//! - [`Player`] - per-side legality, check, castling, and terminal states
//! - [`MoveFactory`] - resolves coordinates into a legal [`Move`]
//! - [`Game`] - history tracking with undo on top of boards
//! - [`perft`] - move generator validation
//!
//! # Architecture
//!
//! Every board derives both players from scratch when it is built. A
//! player's move list is pseudo-legal; each attempted move is executed
//! into a fresh board and rejected if it leaves the mover's king attacked.
//!
//! # Example
//!
//! ```
//! use chess_core::Square;
//! use chess_engine::{Board, MoveFactory, MoveStatus};
//!
//! let board = Board::standard();
//! println!("Legal moves from starting position: {}", board.current_player().legal_moves().len());
//!
//! let e2 = Square::from_algebraic("e2").unwrap();
//! let e4 = Square::from_algebraic("e4").unwrap();
//! let mv = MoveFactory::create_move(&board, e2, e4).unwrap();
//! let transition = board.current_player().make_move(mv).unwrap();
//! assert_eq!(transition.status(), MoveStatus::Done);
//! println!("{}", transition.board());
//! ```

mod board;
mod error;
mod game;
mod mov;
mod movegen;
pub mod perft;
mod piece;
mod player;

pub use board::{Board, Builder, Tile};
pub use error::BoardError;
pub use game::{Game, GameError, GameMove, GameResult};
pub use mov::{Castling, Move, MoveFactory};
pub use piece::Piece;
pub use player::{MoveStatus, MoveTransition, Player};
