//! Serializable summary of the moves available on a board.

use chess_engine::{Board, BoardError};
use serde::Serialize;

/// The side to move and every move in its legal set.
#[derive(Debug, Serialize)]
pub struct MoveListing {
    pub side_to_move: String,
    pub in_check: bool,
    pub moves: Vec<MoveEntry>,
}

/// One candidate move and what happens when it is attempted.
#[derive(Debug, Serialize)]
pub struct MoveEntry {
    /// Canonical move text, e.g. "Pe2-e4" or "0-0".
    pub notation: String,
    pub from: String,
    pub to: String,
    pub capture: bool,
    /// "done", "illegal move", or "leaves player in check".
    pub status: String,
}

impl MoveListing {
    /// Attempts every legal move of the side to move on `board`.
    pub fn from_board(board: &Board) -> Result<Self, BoardError> {
        let player = board.current_player();
        let mut moves = Vec::with_capacity(player.legal_moves().len());
        for mv in player.legal_moves() {
            let status = player.make_move(mv)?.status();
            moves.push(MoveEntry {
                notation: mv.to_string(),
                from: mv.source().to_algebraic(),
                to: mv.destination().to_algebraic(),
                capture: mv.is_attack(),
                status: status.to_string(),
            });
        }
        Ok(MoveListing {
            side_to_move: player.alliance().to_string(),
            in_check: player.is_in_check(),
            moves,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chess_engine::Game;

    #[test]
    fn listing_for_start_position() {
        let listing = MoveListing::from_board(&Board::standard()).unwrap();
        assert_eq!(listing.side_to_move, "White");
        assert!(!listing.in_check);
        assert_eq!(listing.moves.len(), 20);
        assert!(listing.moves.iter().all(|entry| entry.status == "done"));
        assert!(listing.moves.iter().any(|entry| entry.from == "g1" && entry.to == "f3"));
    }

    #[test]
    fn listing_marks_moves_that_leave_check() {
        let mut game = Game::new();
        for text in ["e2e4", "f7f6", "d1h5"] {
            game.make_move_text(text).unwrap();
        }
        let listing = MoveListing::from_board(game.board()).unwrap();
        assert!(listing.in_check);
        let blocking = listing
            .moves
            .iter()
            .filter(|entry| entry.status == "done")
            .count();
        // Only g7-g6 blocks the diagonal.
        assert_eq!(blocking, 1);
        assert!(listing
            .moves
            .iter()
            .any(|entry| entry.status == "leaves player in check"));
    }

    #[test]
    fn json_shape() {
        let listing = MoveListing::from_board(&Board::standard()).unwrap();
        let value = serde_json::to_value(&listing).unwrap();
        assert_eq!(value["side_to_move"], "White");
        assert_eq!(value["in_check"], false);
        assert_eq!(value["moves"].as_array().unwrap().len(), 20);
        assert_eq!(value["moves"][0]["capture"], false);
    }
}
