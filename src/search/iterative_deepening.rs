//! Iterative-deepening negamax alpha-beta search.
//!
//! Deepens in steps of two plies, re-sorting the root moves best-first
//! between iterations. Each node applies its move, probes the transposition
//! cache, recurses or evaluates, reverts, and stores its bound; deadline and
//! forced-mate aborts unwind the stack with every revert intact.

use std::error::Error;
use std::fmt;
use std::time::{Duration, Instant};

use crate::game_state::board::{Board, BoardError};
use crate::game_state::chess_types::Color;
use crate::move_generation::legal_move_checks::is_king_in_check;
use crate::move_generation::legal_move_generator::generate_legal_moves;
use crate::move_generation::move_codec::Move;
use crate::search::board_scoring::BoardScorer;
use crate::search::transposition_table::{Bound, PositionKey, TranspositionTable};

pub const MATE_SCORE: i32 = 30_000;
pub const DEPTH_STEP: u8 = 2;

#[derive(Debug, Clone, Copy)]
pub struct SearchConfig {
    pub start_depth: u8,
    pub max_depth: u8,
    /// Wall-clock budget; `None` searches to `max_depth` unconditionally.
    pub movetime: Option<Duration>,
    pub use_table: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            start_depth: 2,
            max_depth: 6,
            movetime: Some(Duration::from_secs(3)),
            use_table: true,
        }
    }
}

impl SearchConfig {
    /// Fixed-depth, untimed configuration; used where determinism matters.
    pub fn fixed_depth(depth: u8) -> Self {
        Self {
            start_depth: depth,
            max_depth: depth,
            movetime: None,
            use_table: true,
        }
    }
}

/// Search result: an index into the exact move sequence the root generation
/// produced, or the terminal verdict when there are no legal moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchOutcome {
    BestMove(BestMoveReport),
    Checkmate,
    Stalemate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BestMoveReport {
    pub index: usize,
    pub score: i32,
    pub depth: u8,
    pub nodes: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
    InvalidPosition(BoardError),
}

impl fmt::Display for SearchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchError::InvalidPosition(err) => write!(f, "refusing to search: {err}"),
        }
    }
}

impl Error for SearchError {}

/// Pick the best move for `side`, searching with `scorer` under `config`.
pub fn find_best_move<S: BoardScorer>(
    board: &mut Board,
    side: Color,
    scorer: &S,
    config: &SearchConfig,
) -> Result<SearchOutcome, SearchError> {
    board.validate().map_err(SearchError::InvalidPosition)?;

    let unsorted = generate_legal_moves(board, side);
    if unsorted.is_empty() {
        return Ok(if is_king_in_check(board, side) {
            SearchOutcome::Checkmate
        } else {
            SearchOutcome::Stalemate
        });
    }

    let mut context = SearchContext {
        scorer,
        table: TranspositionTable::new(config.max_depth),
        use_table: config.use_table,
        deadline: config.movetime.map(|budget| Instant::now() + budget),
        root_side: side,
        nodes: 0,
    };

    let mut sorted = unsorted.clone();
    let mut values = vec![0i32; sorted.len()];
    let mut evaluated = sorted.len();
    let mut reached_depth = 0;

    let mut depth = config.start_depth.clamp(1, config.max_depth.max(1));
    loop {
        let mut alpha = -MATE_SCORE;
        let beta = MATE_SCORE;
        let mut aborted = false;

        for (i, mv) in sorted.iter().enumerate() {
            values[i] = -context.alpha_beta(board, mv, side.opposite(), depth, -beta, -alpha);
            if values[i] > alpha {
                alpha = values[i];
            }

            // Forced mate or an exhausted clock ends the whole search; only
            // the moves re-examined this iteration count toward the pick.
            if alpha == MATE_SCORE || context.deadline_exceeded() {
                evaluated = i + 1;
                aborted = true;
                break;
            }
        }

        reached_depth = depth;
        if aborted {
            break;
        }

        evaluated = sorted.len();
        if alpha == -MATE_SCORE {
            // Every move runs into a forced loss; deeper search cannot help.
            break;
        }
        if depth >= config.max_depth {
            break;
        }

        value_sort(&mut sorted, &mut values);
        depth = (depth + DEPTH_STEP).min(config.max_depth);
    }

    let mut best_index = 0;
    for i in 1..evaluated {
        if values[i] > values[best_index] {
            best_index = i;
        }
    }

    // Report the winner's position in the original generation order; ties
    // were already resolved by first encounter above.
    let chosen = sorted[best_index];
    let index = unsorted
        .iter()
        .position(|mv| *mv == chosen)
        .expect("sorted moves are a permutation of the generated ones");

    Ok(SearchOutcome::BestMove(BestMoveReport {
        index,
        score: values[best_index],
        depth: reached_depth,
        nodes: context.nodes,
    }))
}

/// The explicit search state the recursion threads along: scorer, cache,
/// deadline, root side, and node counter.
struct SearchContext<'a, S: BoardScorer> {
    scorer: &'a S,
    table: TranspositionTable,
    use_table: bool,
    deadline: Option<Instant>,
    root_side: Color,
    nodes: u64,
}

impl<S: BoardScorer> SearchContext<'_, S> {
    #[inline]
    fn deadline_exceeded(&self) -> bool {
        self.deadline.is_some_and(|deadline| Instant::now() > deadline)
    }

    /// Apply `mv`, search the position it creates to `depth` remaining
    /// plies with `turn` to move, revert, and return the value from
    /// `turn`'s perspective.
    fn alpha_beta(
        &mut self,
        board: &mut Board,
        mv: &Move,
        turn: Color,
        depth: u8,
        mut alpha: i32,
        mut beta: i32,
    ) -> i32 {
        // Checked before applying, so an abort unwinds with the board
        // already consistent: worst value for the root side.
        if self.deadline_exceeded() {
            return if turn == self.root_side {
                -MATE_SCORE
            } else {
                MATE_SCORE
            };
        }

        let token = board.apply_move(mv);
        self.nodes += 1;

        let key = self
            .use_table
            .then(|| PositionKey::from_board(board, turn));

        if let Some(key) = &key {
            if let Some(entry) = self.table.probe(depth, key) {
                match entry.bound {
                    Bound::Exact => {
                        board.revert_move(mv, token);
                        return entry.value;
                    }
                    // Lower: the true value is at most the cached one.
                    Bound::Lower => {
                        if entry.value < beta {
                            beta = entry.value;
                        }
                    }
                    // Upper: the true value is at least the cached one.
                    Bound::Upper => {
                        if entry.value > alpha {
                            alpha = entry.value;
                        }
                    }
                }
                if alpha >= beta {
                    board.revert_move(mv, token);
                    return entry.value;
                }
            }
        }

        if depth == 0 {
            let value = self.scorer.score(board, turn);
            if let Some(key) = key {
                self.table
                    .insert(0, key, value, Bound::classify(value, alpha, beta));
            }
            board.revert_move(mv, token);
            return value;
        }

        // Bounds are classified against the window the subtree was actually
        // searched under, not the alpha raised while iterating children.
        let entry_alpha = alpha;

        let mut moves = generate_legal_moves(board, turn);
        let best = if moves.is_empty() {
            if is_king_in_check(board, turn) {
                -MATE_SCORE
            } else {
                0
            }
        } else {
            potential_sort(&mut moves);

            let mut best = -MATE_SCORE - 1;
            for child in &moves {
                let value =
                    -self.alpha_beta(board, child, turn.opposite(), depth - 1, -beta, -alpha);
                if value > best {
                    best = value;
                }
                if best > alpha {
                    alpha = best;
                }
                if alpha >= beta {
                    break;
                }
            }
            best
        };

        if let Some(key) = key {
            self.table
                .insert(depth, key, best, Bound::classify(best, entry_alpha, beta));
        }

        board.revert_move(mv, token);
        best
    }
}

/// Cheap move-potential ordering: captures as a group ahead of quiet moves,
/// original order preserved inside each group.
fn potential_sort(moves: &mut [Move]) {
    moves.sort_by_key(|mv| !mv.is_capture());
}

/// Stable best-first re-sort of the root moves by their latest values.
fn value_sort(moves: &mut [Move], values: &mut [i32]) {
    let mut order: Vec<usize> = (0..moves.len()).collect();
    order.sort_by_key(|&i| -values[i]);

    let reordered_moves: Vec<Move> = order.iter().map(|&i| moves[i]).collect();
    let reordered_values: Vec<i32> = order.iter().map(|&i| values[i]).collect();
    moves.copy_from_slice(&reordered_moves);
    values.copy_from_slice(&reordered_values);
}

#[cfg(test)]
mod tests {
    use super::{find_best_move, SearchConfig, SearchError, SearchOutcome, MATE_SCORE};
    use crate::game_state::board::Board;
    use crate::game_state::chess_types::{Color, PieceKind};
    use crate::move_generation::legal_move_generator::generate_legal_moves;
    use crate::move_generation::move_codec::Move;
    use crate::search::board_scoring::{MaterialScorer, StandardScorer};

    fn best_move_of(outcome: SearchOutcome) -> super::BestMoveReport {
        match outcome {
            SearchOutcome::BestMove(report) => report,
            other => panic!("expected a best move, got {other:?}"),
        }
    }

    #[test]
    fn rejects_malformed_positions_before_searching() {
        let mut board = Board::new_empty();
        let result = find_best_move(
            &mut board,
            Color::White,
            &MaterialScorer,
            &SearchConfig::fixed_depth(2),
        );
        assert!(matches!(result, Err(SearchError::InvalidPosition(_))));
    }

    #[test]
    fn classifies_checkmate_and_stalemate_at_the_root() {
        let (mut mated, side) =
            Board::from_fen("6k1/5Q2/6K1/8/8/8/8/8 b - - 0 1").expect("FEN should parse");
        let outcome = find_best_move(&mut mated, side, &MaterialScorer, &SearchConfig::default())
            .expect("search should run");
        assert_eq!(outcome, SearchOutcome::Checkmate);

        let (mut stale, side) =
            Board::from_fen("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1").expect("FEN should parse");
        let outcome = find_best_move(&mut stale, side, &MaterialScorer, &SearchConfig::default())
            .expect("search should run");
        assert_eq!(outcome, SearchOutcome::Stalemate);
    }

    #[test]
    fn finds_a_back_rank_mate_in_one() {
        let (mut board, side) =
            Board::from_fen("6k1/5ppp/8/8/8/8/8/R3K3 w - - 0 1").expect("FEN should parse");
        let moves = generate_legal_moves(&mut board, side);

        let report = best_move_of(
            find_best_move(&mut board, side, &MaterialScorer, &SearchConfig::fixed_depth(2))
                .expect("search should run"),
        );
        assert_eq!(report.score, MATE_SCORE);
        assert!(
            matches!(moves[report.index], Move::Normal { from: 0, to: 56, .. }),
            "expected Ra8 mate, got {:?}",
            moves[report.index]
        );
    }

    #[test]
    fn takes_the_hanging_queen() {
        let (mut board, side) =
            Board::from_fen("4k3/8/8/3q4/4P3/8/8/4K3 w - - 0 1").expect("FEN should parse");
        let moves = generate_legal_moves(&mut board, side);

        let report = best_move_of(
            find_best_move(&mut board, side, &MaterialScorer, &SearchConfig::fixed_depth(2))
                .expect("search should run"),
        );
        assert!(
            matches!(
                moves[report.index],
                Move::Normal {
                    from: 28,
                    to: 35,
                    captured: Some(PieceKind::Queen),
                    ..
                }
            ),
            "expected exd5, got {:?}",
            moves[report.index]
        );
    }

    #[test]
    fn repeated_searches_return_the_same_index() {
        let (mut board, side) =
            Board::from_fen("r1bqkbnr/pppp1ppp/2n5/4p3/4P3/5N2/PPPP1PPP/RNBQKB1R w KQkq - 2 3")
                .expect("FEN should parse");
        let config = SearchConfig::fixed_depth(3);

        let first = best_move_of(
            find_best_move(&mut board, side, &MaterialScorer, &config)
                .expect("search should run"),
        );
        let second = best_move_of(
            find_best_move(&mut board, side, &MaterialScorer, &config)
                .expect("search should run"),
        );
        assert_eq!(first.index, second.index);
        assert_eq!(first.score, second.score);
    }

    #[test]
    fn disabling_the_cache_does_not_change_the_selection() {
        let (mut board, side) =
            Board::from_fen("4k3/8/8/3q4/4P3/8/8/4K3 w - - 0 1").expect("FEN should parse");

        let cached = best_move_of(
            find_best_move(&mut board, side, &MaterialScorer, &SearchConfig::fixed_depth(3))
                .expect("search should run"),
        );

        let mut uncached_config = SearchConfig::fixed_depth(3);
        uncached_config.use_table = false;
        let uncached = best_move_of(
            find_best_move(&mut board, side, &MaterialScorer, &uncached_config)
                .expect("search should run"),
        );

        assert_eq!(cached.index, uncached.index);
        assert_eq!(cached.score, uncached.score);
    }

    #[test]
    fn exhausted_clock_still_returns_a_move_and_a_clean_board() {
        let (mut board, side) = Board::new_game();
        let before = board.clone();

        let config = SearchConfig {
            start_depth: 2,
            max_depth: 8,
            movetime: Some(std::time::Duration::ZERO),
            use_table: true,
        };
        let report = best_move_of(
            find_best_move(&mut board, side, &MaterialScorer, &config)
                .expect("search should run"),
        );
        assert!(report.index < 20);
        assert_eq!(board, before, "aborted search must revert every move");
    }

    #[test]
    fn search_leaves_the_board_untouched() {
        let (mut board, side) = Board::new_game();
        let before = board.clone();
        let _ = find_best_move(&mut board, side, &StandardScorer, &SearchConfig::fixed_depth(2))
            .expect("search should run");
        assert_eq!(board, before);
    }
}
