//! King move generation, including castling.
//!
//! Castling reuses the uniform speculative legality filter: the one-step
//! king move toward the rook must itself have survived the filter (that
//! square is the king's transit), and the castle candidate is then applied
//! and checked like any other move, which covers the destination square.

use crate::game_state::board::Board;
use crate::game_state::chess_types::{
    castle_rights_of, offset_square, CastlingRights, Color, PieceKind, Square,
    CASTLE_BLACK_KINGSIDE, CASTLE_BLACK_QUEENSIDE, CASTLE_WHITE_KINGSIDE, CASTLE_WHITE_QUEENSIDE,
};
use crate::move_generation::legal_move_checks::is_king_in_check;
use crate::move_generation::legal_move_shared::{capture_revokes, try_push_move, KING_OFFSETS};
use crate::move_generation::move_codec::Move;

pub fn generate_king_moves(board: &mut Board, side: Color, from: Square, out: &mut Vec<Move>) {
    // Any king move revokes whatever rights the side still holds.
    let revokes = board.castling_rights & castle_rights_of(side);

    let mut east_step_was_legal = false;
    let mut west_step_was_legal = false;

    for (rank_delta, file_delta) in KING_OFFSETS {
        let Some(to) = offset_square(from, rank_delta, file_delta) else {
            continue;
        };

        match board.piece_at(to) {
            Some(piece) if piece.color == side => {}
            occupant => {
                let mv = Move::Normal {
                    from,
                    to,
                    captured: occupant.map(|piece| piece.kind),
                    revokes: revokes | capture_revokes(board, to, side),
                };
                let legal = try_push_move(board, side, mv, out);
                if rank_delta == 0 && file_delta == 1 {
                    east_step_was_legal = legal;
                }
                if rank_delta == 0 && file_delta == -1 {
                    west_step_was_legal = legal;
                }
            }
        }
    }

    generate_castles(
        board,
        side,
        from,
        revokes,
        east_step_was_legal,
        west_step_was_legal,
        out,
    );
}

#[allow(clippy::too_many_arguments)]
fn generate_castles(
    board: &mut Board,
    side: Color,
    from: Square,
    revokes: CastlingRights,
    east_step_was_legal: bool,
    west_step_was_legal: bool,
    out: &mut Vec<Move>,
) {
    if board.has_castled[side.index()] || revokes == 0 {
        return;
    }

    // Castling geometry is anchored on the king's home square.
    if from != crate::game_state::chess_rules::king_home(side) {
        return;
    }

    // Cannot castle out of check.
    if is_king_in_check(board, side) {
        return;
    }

    let (kingside_bit, queenside_bit) = match side {
        Color::White => (CASTLE_WHITE_KINGSIDE, CASTLE_WHITE_QUEENSIDE),
        Color::Black => (CASTLE_BLACK_KINGSIDE, CASTLE_BLACK_QUEENSIDE),
    };

    if board.castling_rights & kingside_bit != 0 && east_step_was_legal {
        let rook_from = from + 3;
        if rook_is_home(board, side, rook_from)
            && board.piece_at(from + 1).is_none()
            && board.piece_at(from + 2).is_none()
        {
            let mv = Move::Castle {
                king_from: from,
                king_to: from + 2,
                rook_from,
                rook_to: from + 1,
                revokes,
            };
            try_push_move(board, side, mv, out);
        }
    }

    if board.castling_rights & queenside_bit != 0 && west_step_was_legal {
        let rook_from = from - 4;
        if rook_is_home(board, side, rook_from)
            && board.piece_at(from - 1).is_none()
            && board.piece_at(from - 2).is_none()
            && board.piece_at(from - 3).is_none()
        {
            let mv = Move::Castle {
                king_from: from,
                king_to: from - 2,
                rook_from,
                rook_to: from - 1,
                revokes,
            };
            try_push_move(board, side, mv, out);
        }
    }
}

#[inline]
fn rook_is_home(board: &Board, side: Color, square: Square) -> bool {
    matches!(
        board.piece_at(square),
        Some(piece) if piece.color == side && piece.kind == PieceKind::Rook
    )
}
