//! Undo token consumed by `Board::revert_move`.

use crate::game_state::chess_types::Square;

/// Board state a move record alone cannot reconstruct: the en-passant window
/// and halfmove clock that were in force before the move was applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UndoToken {
    pub prev_en_passant: Option<Square>,
    pub prev_halfmove_clock: u16,
}
