//! King-safety oracle.
//!
//! Answers "is this square attacked by that color" with bounded ray and
//! offset scans. A scan for a piece kind is skipped entirely when the
//! attacker's live count for the kind is zero, which the board maintains
//! incrementally.

use crate::game_state::board::Board;
use crate::game_state::chess_types::{offset_square, Color, Piece, PieceKind, Square};
use crate::move_generation::legal_move_shared::{
    DIAGONAL_DIRECTIONS, KING_OFFSETS, KNIGHT_OFFSETS, STRAIGHT_DIRECTIONS,
};

/// Whether `by` currently attacks `square`.
pub fn is_square_attacked(board: &Board, square: Square, by: Color) -> bool {
    // Enemy pawns attack diagonally forward from their own point of view,
    // so relative to `square` they sit one rank back along `by`'s push
    // direction on the adjacent files.
    if board.piece_count(by, PieceKind::Pawn) > 0 {
        let toward_attacker = -by.pawn_direction();
        for file_delta in [-1i8, 1] {
            if let Some(origin) = offset_square(square, toward_attacker, file_delta) {
                if board.piece_at(origin) == Some(Piece::new(PieceKind::Pawn, by)) {
                    return true;
                }
            }
        }
    }

    if board.piece_count(by, PieceKind::Knight) > 0 {
        for (rank_delta, file_delta) in KNIGHT_OFFSETS {
            if let Some(origin) = offset_square(square, rank_delta, file_delta) {
                if let Some(piece) = board.piece_at(origin) {
                    if piece.color == by && piece.kind == PieceKind::Knight {
                        return true;
                    }
                }
            }
        }
    }

    if board.piece_count(by, PieceKind::Bishop) > 0 || board.piece_count(by, PieceKind::Queen) > 0 {
        if ray_hits(board, square, by, &DIAGONAL_DIRECTIONS, PieceKind::Bishop) {
            return true;
        }
    }

    if board.piece_count(by, PieceKind::Rook) > 0 || board.piece_count(by, PieceKind::Queen) > 0 {
        if ray_hits(board, square, by, &STRAIGHT_DIRECTIONS, PieceKind::Rook) {
            return true;
        }
    }

    // Adjacent enemy king, needed to reject moves that would place the two
    // kings next to each other.
    for (rank_delta, file_delta) in KING_OFFSETS {
        if let Some(origin) = offset_square(square, rank_delta, file_delta) {
            if let Some(piece) = board.piece_at(origin) {
                if piece.color == by && piece.kind == PieceKind::King {
                    return true;
                }
            }
        }
    }

    false
}

/// Whether `side`'s own king is currently attacked.
#[inline]
pub fn is_king_in_check(board: &Board, side: Color) -> bool {
    is_square_attacked(board, board.king_square(side), side.opposite())
}

fn ray_hits(
    board: &Board,
    square: Square,
    by: Color,
    directions: &[(i8, i8); 4],
    slider: PieceKind,
) -> bool {
    for &(rank_delta, file_delta) in directions {
        let mut current = square;
        while let Some(next) = offset_square(current, rank_delta, file_delta) {
            if let Some(piece) = board.piece_at(next) {
                if piece.color == by && (piece.kind == slider || piece.kind == PieceKind::Queen) {
                    return true;
                }
                break;
            }
            current = next;
        }
    }
    false
}
