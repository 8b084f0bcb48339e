//! Pluggable board evaluation interfaces and baseline implementations.
//!
//! Search consults scoring only through the `BoardScorer` trait, so a more
//! sophisticated evaluator can be swapped in without touching search or
//! move-generation logic. Scores are always relative to `side`.

use crate::game_state::board::Board;
use crate::game_state::chess_types::{
    castle_rights_of, file_of, rank_of, Color, PieceKind, ALL_PIECE_KINDS,
};
use crate::move_generation::legal_move_generator::generate_legal_moves;
use crate::move_generation::move_codec::Move;

/// Static position score from the perspective of `side`.
///
/// Implementations may probe the board with speculative apply/revert pairs
/// (the mobility term does), but must hand it back bit-identical.
pub trait BoardScorer: Send + Sync {
    fn score(&self, board: &mut Board, side: Color) -> i32;
}

pub const MATERIAL_VALUES: [i32; 6] = [100, 300, 300, 500, 1000, 10_000];

#[inline]
pub const fn piece_value(kind: PieceKind) -> i32 {
    MATERIAL_VALUES[kind.index()]
}

/// Material balance only; the cheapest useful scorer.
#[derive(Debug, Clone, Copy, Default)]
pub struct MaterialScorer;

pub fn material_balance(board: &Board, side: Color) -> i32 {
    let mut value = 0;
    for kind in ALL_PIECE_KINDS {
        let own = i32::from(board.piece_count(side, kind));
        let enemy = i32::from(board.piece_count(side.opposite(), kind));
        value += (own - enemy) * piece_value(kind);
    }
    value
}

impl BoardScorer for MaterialScorer {
    fn score(&self, board: &mut Board, side: Color) -> i32 {
        material_balance(board, side)
    }
}

/// Material plus positional heuristics plus a mobility term.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardScorer;

impl StandardScorer {
    const KNIGHT_RANGE_BONUS: i32 = 2;
    const BISHOP_RANGE_BONUS: i32 = 2;
    const CENTER_BONUS: i32 = 8;
    const CENTRAL_KNIGHT_BONUS: i32 = 15;
    const PAWN_ADVANCE_BONUS: i32 = 4;
    const CASTLED_BONUS: i32 = 100;
    const ABLE_TO_CASTLE_BONUS: i32 = 25;
    const TRADE_RATIO_WEIGHT: f32 = 10.0;

    fn positional_term(board: &Board, side: Color) -> i32 {
        let mut value = 0;

        for square in 0..64u8 {
            let Some(piece) = board.piece_at(square) else {
                continue;
            };
            let sign = if piece.color == side { 1 } else { -1 };

            if in_center(square) {
                value += sign * Self::CENTER_BONUS;
                if piece.kind == PieceKind::Knight {
                    value += sign * Self::CENTRAL_KNIGHT_BONUS;
                }
            }

            if piece.kind == PieceKind::Pawn {
                value += sign * pawn_advancement(piece.color, square) * Self::PAWN_ADVANCE_BONUS;
            }
        }

        for color in [side, side.opposite()] {
            let sign = if color == side { 1 } else { -1 };
            if board.has_castled[color.index()] {
                value += sign * Self::CASTLED_BONUS;
            }
            if board.castling_rights & castle_rights_of(color) != 0 {
                value += sign * Self::ABLE_TO_CASTLE_BONUS;
            }
        }

        value
    }

    /// Legal-move count weighted by piece activity and capture-trade ratios.
    fn mobility_term(board: &mut Board, color: Color) -> i32 {
        let moves = generate_legal_moves(board, color);
        let mut value = moves.len() as i32;
        let mut trade_ratio = 0.0f32;

        for mv in &moves {
            let mover = board
                .piece_at(mv.origin())
                .expect("generated move has a mover");

            match mover.kind {
                PieceKind::Knight => value += Self::KNIGHT_RANGE_BONUS,
                PieceKind::Bishop => value += Self::BISHOP_RANGE_BONUS,
                _ => {}
            }

            if in_center(mv.destination()) {
                value += Self::CENTER_BONUS;
            }

            if let Move::Normal {
                captured: Some(victim),
                ..
            } = mv
            {
                trade_ratio += piece_value(*victim) as f32 / piece_value(mover.kind) as f32;
            }
        }

        value + (Self::TRADE_RATIO_WEIGHT * trade_ratio) as i32
    }
}

impl BoardScorer for StandardScorer {
    fn score(&self, board: &mut Board, side: Color) -> i32 {
        material_balance(board, side)
            + Self::positional_term(board, side)
            + Self::mobility_term(board, side)
            - Self::mobility_term(board, side.opposite())
    }
}

/// The four central squares (d4, e4, d5, e5).
#[inline]
fn in_center(square: u8) -> bool {
    let rank = rank_of(square);
    let file = file_of(square);
    (3..5).contains(&rank) && (3..5).contains(&file)
}

/// Ranks advanced from the pawn's starting rank.
#[inline]
fn pawn_advancement(color: Color, square: u8) -> i32 {
    match color {
        Color::White => i32::from(rank_of(square)) - 1,
        Color::Black => 6 - i32::from(rank_of(square)),
    }
}
