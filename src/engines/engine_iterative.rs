//! Iterative-deepening engine wrapping the alpha-beta search.

use std::time::Duration;

use crate::engines::engine_trait::{Engine, EngineOutput, GoParams};
use crate::game_state::board::Board;
use crate::game_state::chess_types::Color;
use crate::move_generation::legal_move_generator::generate_legal_moves;
use crate::search::board_scoring::StandardScorer;
use crate::search::iterative_deepening::{find_best_move, SearchConfig, SearchOutcome};

pub struct IterativeEngine {
    config: SearchConfig,
}

impl IterativeEngine {
    pub fn new() -> Self {
        Self {
            config: SearchConfig::default(),
        }
    }

    pub fn with_config(config: SearchConfig) -> Self {
        Self { config }
    }

    fn resolved_config(&self, params: &GoParams) -> SearchConfig {
        let mut config = self.config;
        if let Some(depth) = params.depth {
            config.start_depth = config.start_depth.min(depth.max(1));
            config.max_depth = depth.max(1);
        }
        if let Some(movetime_ms) = params.movetime_ms {
            config.movetime = Some(Duration::from_millis(movetime_ms));
        }
        config
    }
}

impl Default for IterativeEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine for IterativeEngine {
    fn name(&self) -> &str {
        "DamsonChess Iterative"
    }

    fn choose_move(
        &mut self,
        board: &mut Board,
        side: Color,
        params: &GoParams,
    ) -> Result<EngineOutput, String> {
        let config = self.resolved_config(params);
        let outcome =
            find_best_move(board, side, &StandardScorer, &config).map_err(|e| e.to_string())?;

        let mut out = EngineOutput::default();
        match outcome {
            SearchOutcome::BestMove(report) => {
                out.info_lines.push(format!(
                    "info depth {} score cp {} nodes {}",
                    report.depth, report.score, report.nodes
                ));
                let moves = generate_legal_moves(board, side);
                out.best_move = Some(moves[report.index]);
            }
            SearchOutcome::Checkmate => {
                out.info_lines
                    .push("info string terminal checkmate".to_owned());
            }
            SearchOutcome::Stalemate => {
                out.info_lines
                    .push("info string terminal stalemate".to_owned());
            }
        }
        Ok(out)
    }
}
