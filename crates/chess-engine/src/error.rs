//! Board construction errors.

use chess_core::Alliance;
use thiserror::Error;

/// Invariant violations detected while materializing a board.
///
/// These describe a corrupted position, not a rejected move: an illegal
/// move attempt is reported through [`MoveStatus`](crate::MoveStatus).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BoardError {
    #[error("invalid board: {0} has no king")]
    MissingKing(Alliance),

    #[error("invalid board: no side to move was set")]
    MissingMoveMaker,
}
