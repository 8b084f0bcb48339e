//! Random-move engine.
//!
//! Selects uniformly from legal moves and is primarily used for diagnostics,
//! harness baselines, and low-strength gameplay.

use rand::prelude::IndexedRandom;

use crate::engines::engine_trait::{Engine, EngineOutput, GoParams};
use crate::game_state::board::Board;
use crate::game_state::chess_types::Color;
use crate::move_generation::legal_move_generator::generate_legal_moves;

#[derive(Debug, Default)]
pub struct RandomEngine;

impl RandomEngine {
    pub fn new() -> Self {
        Self
    }
}

impl Engine for RandomEngine {
    fn name(&self) -> &str {
        "DamsonChess Random"
    }

    fn choose_move(
        &mut self,
        board: &mut Board,
        side: Color,
        _params: &GoParams,
    ) -> Result<EngineOutput, String> {
        let legal_moves = generate_legal_moves(board, side);

        let mut out = EngineOutput::default();
        out.info_lines.push(format!(
            "info string random_engine legal_moves {}",
            legal_moves.len()
        ));

        if legal_moves.is_empty() {
            return Ok(out);
        }

        let mut rng = rand::rng();
        let picked = legal_moves
            .as_slice()
            .choose(&mut rng)
            .ok_or("failed to choose a random move")?;

        out.best_move = Some(*picked);
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::RandomEngine;
    use crate::engines::engine_trait::{Engine, GoParams};
    use crate::game_state::board::Board;
    use crate::move_generation::legal_move_generator::generate_legal_moves;

    #[test]
    fn picks_a_legal_move_from_the_start_position() {
        let (mut board, side) = Board::new_game();
        let mut engine = RandomEngine::new();

        let out = engine
            .choose_move(&mut board, side, &GoParams::default())
            .expect("engine should run");
        let picked = out.best_move.expect("start position has moves");

        let legal = generate_legal_moves(&mut board, side);
        assert!(legal.contains(&picked));
    }

    #[test]
    fn reports_no_move_in_a_terminal_position() {
        let (mut board, side) =
            Board::from_fen("6k1/5Q2/6K1/8/8/8/8/8 b - - 0 1").expect("FEN should parse");
        let mut engine = RandomEngine::new();

        let out = engine
            .choose_move(&mut board, side, &GoParams::default())
            .expect("engine should run");
        assert_eq!(out.best_move, None);
    }
}
