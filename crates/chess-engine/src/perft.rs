//! Perft (performance test) for move generator validation.
//!
//! Perft counts the leaf nodes reachable at a given depth, which can be
//! compared against known-correct values. A node is any move attempt whose
//! status is [`MoveStatus::Done`](crate::MoveStatus::Done).

use crate::{Board, BoardError};

/// Counts the leaf nodes at the given depth.
///
/// Every candidate move is executed and checked, so this is slow past
/// depth 4.
pub fn perft(board: &Board, depth: u32) -> Result<u64, BoardError> {
    if depth == 0 {
        return Ok(1);
    }

    let player = board.current_player();
    let mut nodes = 0u64;
    for mv in player.legal_moves() {
        let transition = player.make_move(mv)?;
        if !transition.status().is_done() {
            continue;
        }
        nodes += if depth == 1 {
            1
        } else {
            perft(transition.board(), depth - 1)?
        };
    }
    Ok(nodes)
}

/// Perft with divide - shows node count for each move at depth-1.
/// Useful for debugging to identify which moves have incorrect counts.
pub fn perft_divide(board: &Board, depth: u32) -> Result<Vec<(String, u64)>, BoardError> {
    let mut results = Vec::new();
    if depth == 0 {
        return Ok(results);
    }

    let player = board.current_player();
    for mv in player.legal_moves() {
        let transition = player.make_move(mv)?;
        if transition.status().is_done() {
            let nodes = perft(transition.board(), depth - 1)?;
            results.push((mv.to_string(), nodes));
        }
    }

    results.sort_by(|a, b| a.0.cmp(&b.0));
    Ok(results)
}
