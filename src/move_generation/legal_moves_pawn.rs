//! Pawn move generation: pushes, captures, en-passant, and promotions.

use crate::game_state::board::Board;
use crate::game_state::chess_rules::{pawn_start_rank, promotion_rank};
use crate::game_state::chess_types::{
    offset_square, rank_of, Color, Piece, PieceKind, Square, PROMOTION_KINDS,
};
use crate::move_generation::legal_move_shared::{capture_revokes, try_push_move};
use crate::move_generation::move_codec::Move;

pub fn generate_pawn_moves(board: &mut Board, side: Color, from: Square, out: &mut Vec<Move>) {
    let dir = side.pawn_direction();

    // Forward one / two. A pawn reaching the last rank always promotes.
    if let Some(one_step) = offset_square(from, dir, 0) {
        if board.piece_at(one_step).is_none() {
            if rank_of(one_step) == promotion_rank(side) {
                for promoted in PROMOTION_KINDS {
                    let mv = Move::Promotion {
                        from,
                        to: one_step,
                        captured: None,
                        promoted,
                        revokes: 0,
                    };
                    try_push_move(board, side, mv, out);
                }
            } else {
                let mv = Move::Normal {
                    from,
                    to: one_step,
                    captured: None,
                    revokes: 0,
                };
                try_push_move(board, side, mv, out);

                if rank_of(from) == pawn_start_rank(side) {
                    if let Some(two_step) = offset_square(from, 2 * dir, 0) {
                        if board.piece_at(two_step).is_none() {
                            let mv = Move::Normal {
                                from,
                                to: two_step,
                                captured: None,
                                revokes: 0,
                            };
                            try_push_move(board, side, mv, out);
                        }
                    }
                }
            }
        }
    }

    // Diagonal captures and the one-ply en-passant window.
    for file_delta in [-1i8, 1] {
        let Some(target) = offset_square(from, dir, file_delta) else {
            continue;
        };

        match board.piece_at(target) {
            Some(piece) if piece.color != side => {
                let revokes = capture_revokes(board, target, side);
                if rank_of(target) == promotion_rank(side) {
                    for promoted in PROMOTION_KINDS {
                        let mv = Move::Promotion {
                            from,
                            to: target,
                            captured: Some(piece.kind),
                            promoted,
                            revokes,
                        };
                        try_push_move(board, side, mv, out);
                    }
                } else {
                    let mv = Move::Normal {
                        from,
                        to: target,
                        captured: Some(piece.kind),
                        revokes,
                    };
                    try_push_move(board, side, mv, out);
                }
            }
            None if board.en_passant_square == Some(target) => {
                let Some(captured_square) = offset_square(target, -dir, 0) else {
                    continue;
                };
                if board.piece_at(captured_square)
                    == Some(Piece::new(PieceKind::Pawn, side.opposite()))
                {
                    let mv = Move::EnPassant {
                        from,
                        to: target,
                        captured_square,
                    };
                    try_push_move(board, side, mv, out);
                }
            }
            _ => {}
        }
    }
}
