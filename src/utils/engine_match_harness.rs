//! Head-to-head engine match harness for local testing.
//!
//! Runs two `Engine` implementations against each other without any I/O
//! protocol, with a seeded random opening prefix so series are reproducible.
//! Games are adjudicated on checkmate, stalemate, the fifty-move rule, and a
//! maximum-ply cap.

use rand::prelude::IndexedRandom;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::engines::engine_trait::{Engine, GoParams};
use crate::game_state::board::Board;
use crate::game_state::chess_types::Color;
use crate::move_generation::legal_move_generator::{classify_terminal, generate_legal_moves, TerminalKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchOutcome {
    WhiteWinCheckmate,
    BlackWinCheckmate,
    DrawStalemate,
    DrawFiftyMoveRule,
    DrawMaxPlies,
}

#[derive(Debug, Clone)]
pub struct MatchConfig {
    pub max_plies: u16,
    pub opening_plies: u8,
    pub go_params: GoParams,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            max_plies: 200,
            opening_plies: 4,
            go_params: GoParams {
                depth: Some(2),
                movetime_ms: Some(250),
            },
        }
    }
}

#[derive(Debug, Clone)]
pub struct MatchResult {
    pub outcome: MatchOutcome,
    pub plies_played: u16,
    pub final_fen: String,
}

/// Play one game. `white` and `black` see the same board through the
/// engine seam; the opening prefix is driven by the seeded RNG.
pub fn play_match(
    white: &mut dyn Engine,
    black: &mut dyn Engine,
    seed: u64,
    config: &MatchConfig,
) -> Result<MatchResult, String> {
    let (mut board, mut side) = Board::new_game();
    let mut rng = StdRng::seed_from_u64(seed);
    let mut plies_played = 0u16;

    white.new_game();
    black.new_game();

    for _ in 0..config.opening_plies {
        let moves = generate_legal_moves(&mut board, side);
        let Some(opening_move) = moves.as_slice().choose(&mut rng) else {
            break;
        };
        board.apply_move(opening_move);
        side = side.opposite();
        plies_played += 1;
    }

    loop {
        if let Some(outcome) = adjudicate(&mut board, side, plies_played, config.max_plies) {
            return Ok(MatchResult {
                outcome,
                plies_played,
                final_fen: board.get_fen(side),
            });
        }

        let engine: &mut dyn Engine = match side {
            Color::White => &mut *white,
            Color::Black => &mut *black,
        };
        let output = engine.choose_move(&mut board, side, &config.go_params)?;
        let Some(mv) = output.best_move else {
            return Err(format!(
                "{} returned no move in a non-terminal position",
                engine.name()
            ));
        };

        board.apply_move(&mv);
        side = side.opposite();
        plies_played += 1;
    }
}

fn adjudicate(
    board: &mut Board,
    side: Color,
    plies_played: u16,
    max_plies: u16,
) -> Option<MatchOutcome> {
    match classify_terminal(board, side) {
        Some(TerminalKind::Checkmate) => Some(match side {
            Color::White => MatchOutcome::BlackWinCheckmate,
            Color::Black => MatchOutcome::WhiteWinCheckmate,
        }),
        Some(TerminalKind::Stalemate) => Some(MatchOutcome::DrawStalemate),
        None if board.halfmove_clock >= 100 => Some(MatchOutcome::DrawFiftyMoveRule),
        None if plies_played >= max_plies => Some(MatchOutcome::DrawMaxPlies),
        None => None,
    }
}

#[derive(Debug, Clone, Default)]
pub struct MatchSeriesStats {
    pub games: u16,
    pub white_wins: u16,
    pub black_wins: u16,
    pub draws: u16,
    pub outcomes: Vec<MatchOutcome>,
}

impl MatchSeriesStats {
    pub fn report(&self) -> String {
        format!(
            "completed_at={} games={} white_wins={} black_wins={} draws={}",
            chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
            self.games,
            self.white_wins,
            self.black_wins,
            self.draws
        )
    }
}

/// Play `games` matches with distinct seeds derived from `base_seed`.
pub fn run_series(
    white: &mut dyn Engine,
    black: &mut dyn Engine,
    games: u16,
    base_seed: u64,
    config: &MatchConfig,
) -> Result<MatchSeriesStats, String> {
    let mut stats = MatchSeriesStats::default();

    for game in 0..games {
        let result = play_match(white, black, base_seed + u64::from(game), config)?;
        stats.games += 1;
        match result.outcome {
            MatchOutcome::WhiteWinCheckmate => stats.white_wins += 1,
            MatchOutcome::BlackWinCheckmate => stats.black_wins += 1,
            _ => stats.draws += 1,
        }
        stats.outcomes.push(result.outcome);
    }

    Ok(stats)
}
