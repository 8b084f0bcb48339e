//! Offset tables and the uniform speculative legality filter.
//!
//! Every candidate move, whatever its variant, goes through `try_push_move`:
//! apply it, ask the king-safety oracle about the mover's own king, revert,
//! and keep the move only if the king was safe. This is the single legality
//! mechanism in the generator.

use crate::game_state::board::Board;
use crate::game_state::chess_types::{offset_square, Color, PieceKind, Square};
use crate::move_generation::legal_move_checks::is_king_in_check;
use crate::move_generation::move_codec::Move;

pub const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (2, 1),
    (2, -1),
    (-2, 1),
    (-2, -1),
    (1, 2),
    (1, -2),
    (-1, 2),
    (-1, -2),
];

pub const KING_OFFSETS: [(i8, i8); 8] = [
    (1, 1),
    (-1, 1),
    (-1, -1),
    (1, -1),
    (1, 0),
    (-1, 0),
    (0, 1),
    (0, -1),
];

pub const DIAGONAL_DIRECTIONS: [(i8, i8); 4] = [(1, 1), (-1, 1), (-1, -1), (1, -1)];
pub const STRAIGHT_DIRECTIONS: [(i8, i8); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

/// Apply `mv`, keep it when the mover's king survives, revert regardless.
/// Returns whether the move was kept so callers can observe legality.
pub fn try_push_move(board: &mut Board, side: Color, mv: Move, out: &mut Vec<Move>) -> bool {
    let token = board.apply_move(&mv);
    let legal = !is_king_in_check(board, side);
    board.revert_move(&mv, token);

    if legal {
        out.push(mv);
    }
    legal
}

/// Walk one slider ray from `from`, emitting candidate normal moves until a
/// blocker or the board edge; an enemy blocker is included as a capture.
pub fn push_ray_moves(
    board: &mut Board,
    side: Color,
    from: Square,
    direction: (i8, i8),
    revokes: u8,
    out: &mut Vec<Move>,
) {
    let mut current = from;
    while let Some(next) = offset_square(current, direction.0, direction.1) {
        match board.piece_at(next) {
            None => {
                let mv = Move::Normal {
                    from,
                    to: next,
                    captured: None,
                    revokes,
                };
                try_push_move(board, side, mv, out);
            }
            Some(piece) if piece.color != side => {
                let mv = Move::Normal {
                    from,
                    to: next,
                    captured: Some(piece.kind),
                    revokes: revokes | capture_revokes(board, next, side),
                };
                try_push_move(board, side, mv, out);
                return;
            }
            Some(_) => return,
        }
        current = next;
    }
}

/// Rights bits revoked because this move captures an enemy rook that is
/// still sitting on its home square with the corresponding right intact.
pub fn capture_revokes(board: &Board, destination: Square, side: Color) -> u8 {
    use crate::game_state::chess_rules::{
        BLACK_KINGSIDE_ROOK_HOME, BLACK_QUEENSIDE_ROOK_HOME, WHITE_KINGSIDE_ROOK_HOME,
        WHITE_QUEENSIDE_ROOK_HOME,
    };
    use crate::game_state::chess_types::{
        CASTLE_BLACK_KINGSIDE, CASTLE_BLACK_QUEENSIDE, CASTLE_WHITE_KINGSIDE,
        CASTLE_WHITE_QUEENSIDE,
    };

    let enemy = side.opposite();
    let is_enemy_rook = matches!(
        board.piece_at(destination),
        Some(piece) if piece.color == enemy && piece.kind == PieceKind::Rook
    );
    if !is_enemy_rook {
        return 0;
    }

    let bit = match (enemy, destination) {
        (Color::White, WHITE_KINGSIDE_ROOK_HOME) => CASTLE_WHITE_KINGSIDE,
        (Color::White, WHITE_QUEENSIDE_ROOK_HOME) => CASTLE_WHITE_QUEENSIDE,
        (Color::Black, BLACK_KINGSIDE_ROOK_HOME) => CASTLE_BLACK_KINGSIDE,
        (Color::Black, BLACK_QUEENSIDE_ROOK_HOME) => CASTLE_BLACK_QUEENSIDE,
        _ => return 0,
    };

    board.castling_rights & bit
}
