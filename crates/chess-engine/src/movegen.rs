//! Pseudo-legal move generation.
//!
//! Each piece type produces its candidate moves from the board layout
//! alone. Nothing here checks whether the mover's king is left exposed;
//! [`Player::make_move`](crate::Player::make_move) rebuilds the board and
//! rejects such moves.

use chess_core::{Alliance, PieceKind, Square};

use crate::board::Grid;
use crate::{Move, Piece};

const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (1, 2),
    (1, -2),
    (-1, 2),
    (-1, -2),
    (2, 1),
    (2, -1),
    (-2, 1),
    (-2, -1),
];

/// The eight adjacent steps; also the queen's ray directions.
const ALL_DIRECTIONS: [(i8, i8); 8] = [
    (1, 0),
    (-1, 0),
    (0, 1),
    (0, -1),
    (1, 1),
    (1, -1),
    (-1, 1),
    (-1, -1),
];

const ROOK_DIRECTIONS: [(i8, i8); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

const BISHOP_DIRECTIONS: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];

/// Generates the pseudo-legal moves of one piece.
pub(crate) fn candidate_moves(piece: &Piece, grid: &Grid) -> Vec<Move> {
    match piece.kind() {
        PieceKind::Pawn => pawn_moves(piece, grid),
        PieceKind::Knight => step_moves(piece, grid, &KNIGHT_OFFSETS),
        PieceKind::Bishop => ray_moves(piece, grid, &BISHOP_DIRECTIONS),
        PieceKind::Rook => ray_moves(piece, grid, &ROOK_DIRECTIONS),
        PieceKind::Queen => ray_moves(piece, grid, &ALL_DIRECTIONS),
        PieceKind::King => step_moves(piece, grid, &ALL_DIRECTIONS),
    }
}

/// Knight and king moves: each offset is tried once.
fn step_moves(piece: &Piece, grid: &Grid, offsets: &[(i8, i8)]) -> Vec<Move> {
    let mut moves = Vec::new();
    for &(dx, dy) in offsets {
        let Some(destination) = piece.square().offset(dx, dy) else {
            continue;
        };
        match grid.piece_at(destination) {
            None => moves.push(Move::Major {
                piece: *piece,
                destination,
            }),
            Some(occupant) if occupant.alliance() != piece.alliance() => {
                moves.push(Move::Attack {
                    piece: *piece,
                    destination,
                    captured: *occupant,
                })
            }
            Some(_) => {}
        }
    }
    moves
}

/// Bishop, rook and queen moves: walk each direction until blocked.
fn ray_moves(piece: &Piece, grid: &Grid, directions: &[(i8, i8)]) -> Vec<Move> {
    let mut moves = Vec::new();
    for &(dx, dy) in directions {
        let mut current = piece.square();
        while let Some(destination) = current.offset(dx, dy) {
            match grid.piece_at(destination) {
                None => moves.push(Move::Major {
                    piece: *piece,
                    destination,
                }),
                Some(occupant) => {
                    if occupant.alliance() != piece.alliance() {
                        moves.push(Move::Attack {
                            piece: *piece,
                            destination,
                            captured: *occupant,
                        });
                    }
                    break;
                }
            }
            current = destination;
        }
    }
    moves
}

fn pawn_moves(pawn: &Piece, grid: &Grid) -> Vec<Move> {
    let mut moves = Vec::new();
    let alliance = pawn.alliance();
    let from = pawn.square();
    let dir = alliance.direction();

    // Single push
    if let Some(destination) = from.offset(0, dir) {
        if !grid.is_occupied(destination) {
            let push = Move::PawnMove {
                piece: *pawn,
                destination,
            };
            moves.push(promote_on_last_rank(push, alliance, destination));
        }
    }

    // Double push from the starting rank
    if pawn.is_first_move() && from.y() == alliance.pawn_start_rank() {
        if let (Some(behind), Some(destination)) = (from.offset(0, dir), from.offset(0, 2 * dir)) {
            if !grid.is_occupied(behind) && !grid.is_occupied(destination) {
                moves.push(Move::PawnJump {
                    piece: *pawn,
                    destination,
                });
            }
        }
    }

    // Diagonal captures, including en passant
    for dx in [1, -1] {
        let Some(destination) = from.offset(dx, dir) else {
            continue;
        };
        match grid.piece_at(destination) {
            Some(occupant) => {
                if occupant.alliance() != alliance {
                    let capture = Move::PawnAttack {
                        piece: *pawn,
                        destination,
                        captured: *occupant,
                    };
                    moves.push(promote_on_last_rank(capture, alliance, destination));
                }
            }
            None => {
                if let Some(passed) = grid.en_passant_pawn() {
                    if is_en_passant_target(pawn, passed, dx) {
                        moves.push(Move::PawnEnPassantAttack {
                            piece: *pawn,
                            destination,
                            captured: *passed,
                        });
                    }
                }
            }
        }
    }

    moves
}

/// The passed pawn must be an opponent standing beside `pawn`, on the `dx` side.
fn is_en_passant_target(pawn: &Piece, passed: &Piece, dx: i8) -> bool {
    passed.alliance() != pawn.alliance()
        && passed.square().y() == pawn.square().y()
        && passed.square().x() as i8 == pawn.square().x() as i8 + dx
}

fn promote_on_last_rank(mv: Move, alliance: Alliance, destination: Square) -> Move {
    if alliance.is_promotion_rank(destination.y()) {
        Move::PawnPromotion(Box::new(mv))
    } else {
        mv
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Board, Builder};

    fn square(s: &str) -> Square {
        Square::from_algebraic(s).unwrap()
    }

    fn piece(kind: PieceKind, at: &str, alliance: Alliance, first_move: bool) -> Piece {
        Piece::new(kind, square(at), alliance, first_move)
    }

    /// Builds a board with both kings tucked in the corners plus `extra`.
    fn board_with(extra: &[Piece], next: Alliance) -> Board {
        let mut builder = Builder::new();
        builder
            .set_piece(piece(PieceKind::King, "h1", Alliance::White, false))
            .set_piece(piece(PieceKind::King, "h8", Alliance::Black, false));
        for p in extra {
            builder.set_piece(*p);
        }
        builder.set_next_move_maker(next);
        builder.build().unwrap()
    }

    fn destinations(moves: &[Move]) -> Vec<String> {
        let mut names: Vec<String> = moves.iter().map(|m| m.destination().to_algebraic()).collect();
        names.sort();
        names
    }

    #[test]
    fn knight_in_corner() {
        let knight = piece(PieceKind::Knight, "a1", Alliance::White, true);
        let board = board_with(&[knight], Alliance::White);
        let moves = knight.calculate_legal_moves(&board);
        assert_eq!(destinations(&moves), vec!["b3", "c2"]);
    }

    #[test]
    fn knight_skips_own_and_captures_enemy() {
        let knight = piece(PieceKind::Knight, "d4", Alliance::White, false);
        let own = piece(PieceKind::Pawn, "e6", Alliance::White, false);
        let enemy = piece(PieceKind::Pawn, "c6", Alliance::Black, false);
        let board = board_with(&[knight, own, enemy], Alliance::White);
        let moves = knight.calculate_legal_moves(&board);
        assert_eq!(moves.len(), 7);
        assert!(!moves.iter().any(|m| m.destination() == square("e6")));
        let capture = moves.iter().find(|m| m.destination() == square("c6")).unwrap();
        assert_eq!(capture.captured(), Some(&enemy));
    }

    #[test]
    fn rook_ray_stops_at_blockers() {
        let rook = piece(PieceKind::Rook, "d4", Alliance::White, false);
        let own = piece(PieceKind::Pawn, "d6", Alliance::White, false);
        let enemy = piece(PieceKind::Knight, "f4", Alliance::Black, false);
        let board = board_with(&[rook, own, enemy], Alliance::White);
        let moves = rook.calculate_legal_moves(&board);
        assert_eq!(
            destinations(&moves),
            vec!["a4", "b4", "c4", "d1", "d2", "d3", "d5", "e4", "f4"]
        );
        let attacks: Vec<&Move> = moves.iter().filter(|m| m.is_attack()).collect();
        assert_eq!(attacks.len(), 1);
        assert_eq!(attacks[0].destination(), square("f4"));
    }

    #[test]
    fn bishop_and_queen_rays() {
        let bishop = piece(PieceKind::Bishop, "a8", Alliance::Black, false);
        let board = board_with(&[bishop], Alliance::Black);
        // a8-h1 diagonal ends on the white king
        let moves = bishop.calculate_legal_moves(&board);
        assert_eq!(moves.len(), 7);
        assert_eq!(moves.last().unwrap().captured().unwrap().kind(), PieceKind::King);

        let queen = piece(PieceKind::Queen, "d4", Alliance::White, false);
        let board = board_with(&[queen], Alliance::White);
        assert_eq!(queen.calculate_legal_moves(&board).len(), 27);
    }

    #[test]
    fn king_steps() {
        let board = board_with(&[], Alliance::White);
        let king = *board.piece_at(square("h1")).unwrap();
        assert_eq!(destinations(&king.calculate_legal_moves(&board)), vec!["g1", "g2", "h2"]);
    }

    #[test]
    fn pawn_pushes_from_start() {
        let board = Board::standard();
        let pawn = *board.piece_at(square("e2")).unwrap();
        let moves = pawn.calculate_legal_moves(&board);
        assert_eq!(moves.len(), 2);
        assert!(matches!(moves[0], Move::PawnMove { .. }));
        assert!(matches!(moves[1], Move::PawnJump { .. }));
        assert_eq!(moves[1].destination(), square("e4"));
    }

    #[test]
    fn pawn_double_push_needs_both_squares_empty() {
        let pawn = piece(PieceKind::Pawn, "c7", Alliance::Black, true);
        let blocker = piece(PieceKind::Knight, "c6", Alliance::White, false);
        let board = board_with(&[pawn, blocker], Alliance::Black);
        assert!(pawn.calculate_legal_moves(&board).is_empty());

        let far_blocker = piece(PieceKind::Knight, "c5", Alliance::White, false);
        let board = board_with(&[pawn, far_blocker], Alliance::Black);
        let moves = pawn.calculate_legal_moves(&board);
        assert_eq!(destinations(&moves), vec!["c6"]);
    }

    #[test]
    fn moved_pawn_has_no_double_push() {
        let pawn = piece(PieceKind::Pawn, "c2", Alliance::White, false);
        let board = board_with(&[pawn], Alliance::White);
        assert_eq!(destinations(&pawn.calculate_legal_moves(&board)), vec!["c3"]);
    }

    #[test]
    fn pawn_promotes_on_push_and_capture() {
        let pawn = piece(PieceKind::Pawn, "b7", Alliance::White, false);
        let rook = piece(PieceKind::Rook, "a8", Alliance::Black, false);
        let board = board_with(&[pawn, rook], Alliance::White);
        let moves = pawn.calculate_legal_moves(&board);
        assert_eq!(moves.len(), 2);
        assert!(moves.iter().all(Move::is_promotion));
        let capture = moves.iter().find(|m| m.is_attack()).unwrap();
        assert_eq!(capture.destination(), square("a8"));
        assert_eq!(capture.captured(), Some(&rook));
    }

    #[test]
    fn pawn_en_passant_needs_adjacent_passed_pawn() {
        let pawn = piece(PieceKind::Pawn, "e5", Alliance::White, false);
        let passed = piece(PieceKind::Pawn, "d5", Alliance::Black, false);
        let mut builder = Builder::new();
        builder
            .set_piece(piece(PieceKind::King, "h1", Alliance::White, false))
            .set_piece(piece(PieceKind::King, "h8", Alliance::Black, false))
            .set_piece(pawn)
            .set_piece(passed)
            .set_en_passant_pawn(passed)
            .set_next_move_maker(Alliance::White);
        let board = builder.build().unwrap();

        let moves = pawn.calculate_legal_moves(&board);
        let en_passant: Vec<&Move> = moves
            .iter()
            .filter(|m| matches!(m, Move::PawnEnPassantAttack { .. }))
            .collect();
        assert_eq!(en_passant.len(), 1);
        assert_eq!(en_passant[0].destination(), square("d6"));
        assert_eq!(en_passant[0].captured(), Some(&passed));

        // Same layout without the recorded pawn: no en passant.
        let board = board_with(&[pawn, passed], Alliance::White);
        assert!(!pawn
            .calculate_legal_moves(&board)
            .iter()
            .any(|m| matches!(m, Move::PawnEnPassantAttack { .. })));
    }
}
