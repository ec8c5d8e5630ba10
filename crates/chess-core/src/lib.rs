//! Core types for chess.
//!
//! This crate provides the vocabulary shared by the rules engine and its
//! front ends:
//! - [`Alliance`] for the two sides and their direction of advance
//! - [`PieceKind`] for the six piece types
//! - [`Square`] for board coordinates, with algebraic text conversion

mod alliance;
mod piece_kind;
mod square;

pub use alliance::Alliance;
pub use piece_kind::PieceKind;
pub use square::{Square, SquareError};
