//! Rook move generation along ranks and files.
//!
//! A rook leaving its home square carries the revocation bit for the
//! castling right it guards, so apply/revert keep the rights exact.

use crate::game_state::board::Board;
use crate::game_state::chess_rules::{
    BLACK_KINGSIDE_ROOK_HOME, BLACK_QUEENSIDE_ROOK_HOME, WHITE_KINGSIDE_ROOK_HOME,
    WHITE_QUEENSIDE_ROOK_HOME,
};
use crate::game_state::chess_types::{
    CastlingRights, Color, Square, CASTLE_BLACK_KINGSIDE, CASTLE_BLACK_QUEENSIDE,
    CASTLE_WHITE_KINGSIDE, CASTLE_WHITE_QUEENSIDE,
};
use crate::move_generation::legal_move_shared::{push_ray_moves, STRAIGHT_DIRECTIONS};
use crate::move_generation::move_codec::Move;

pub fn generate_rook_moves(board: &mut Board, side: Color, from: Square, out: &mut Vec<Move>) {
    let revokes = rook_departure_revokes(board, side, from);
    for direction in STRAIGHT_DIRECTIONS {
        push_ray_moves(board, side, from, direction, revokes, out);
    }
}

fn rook_departure_revokes(board: &Board, side: Color, from: Square) -> CastlingRights {
    let bit = match (side, from) {
        (Color::White, WHITE_KINGSIDE_ROOK_HOME) => CASTLE_WHITE_KINGSIDE,
        (Color::White, WHITE_QUEENSIDE_ROOK_HOME) => CASTLE_WHITE_QUEENSIDE,
        (Color::Black, BLACK_KINGSIDE_ROOK_HOME) => CASTLE_BLACK_KINGSIDE,
        (Color::Black, BLACK_QUEENSIDE_ROOK_HOME) => CASTLE_BLACK_QUEENSIDE,
        _ => return 0,
    };
    board.castling_rights & bit
}
