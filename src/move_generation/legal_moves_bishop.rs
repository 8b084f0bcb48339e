//! Bishop move generation along the four diagonals.

use crate::game_state::board::Board;
use crate::game_state::chess_types::{Color, Square};
use crate::move_generation::legal_move_shared::{push_ray_moves, DIAGONAL_DIRECTIONS};
use crate::move_generation::move_codec::Move;

pub fn generate_bishop_moves(board: &mut Board, side: Color, from: Square, out: &mut Vec<Move>) {
    for direction in DIAGONAL_DIRECTIONS {
        push_ray_moves(board, side, from, direction, 0, out);
    }
}
