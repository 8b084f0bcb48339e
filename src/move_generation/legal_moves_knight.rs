//! Knight move generation from the fixed offset table.

use crate::game_state::board::Board;
use crate::game_state::chess_types::{offset_square, Color, Square};
use crate::move_generation::legal_move_shared::{capture_revokes, try_push_move, KNIGHT_OFFSETS};
use crate::move_generation::move_codec::Move;

pub fn generate_knight_moves(board: &mut Board, side: Color, from: Square, out: &mut Vec<Move>) {
    for (rank_delta, file_delta) in KNIGHT_OFFSETS {
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
                    revokes: capture_revokes(board, to, side),
                };
                try_push_move(board, side, mv, out);
            }
        }
    }
}
