//! Engine abstraction layer.
//!
//! Defines common input parameters and output payloads so different move
//! selection strategies sit behind a single trait interface; front ends and
//! alternate evaluators plug in here without touching the core.

use crate::game_state::board::Board;
use crate::game_state::chess_types::Color;
use crate::move_generation::move_codec::Move;

#[derive(Debug, Clone, Copy, Default)]
pub struct GoParams {
    pub depth: Option<u8>,
    pub movetime_ms: Option<u64>,
}

#[derive(Debug, Clone, Default)]
pub struct EngineOutput {
    pub best_move: Option<Move>,
    pub info_lines: Vec<String>,
}

pub trait Engine: Send {
    fn name(&self) -> &str;

    fn new_game(&mut self) {}

    /// Pick a move for `side`, or `None` when the position is terminal.
    /// The board is borrowed mutably for speculative probing and is handed
    /// back unchanged.
    fn choose_move(
        &mut self,
        board: &mut Board,
        side: Color,
        params: &GoParams,
    ) -> Result<EngineOutput, String>;
}
