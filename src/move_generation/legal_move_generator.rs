//! Full legal move generation pipeline.
//!
//! Walks the mailbox once, dispatches by piece kind over the closed
//! enumeration, and relies on the shared speculative apply/check/revert
//! filter for legality. Also classifies terminal positions.

use crate::game_state::board::Board;
use crate::game_state::chess_types::{Color, PieceKind, Square};
use crate::move_generation::legal_move_checks::is_king_in_check;
use crate::move_generation::legal_moves_bishop::generate_bishop_moves;
use crate::move_generation::legal_moves_king::generate_king_moves;
use crate::move_generation::legal_moves_knight::generate_knight_moves;
use crate::move_generation::legal_moves_pawn::generate_pawn_moves;
use crate::move_generation::legal_moves_queen::generate_queen_moves;
use crate::move_generation::legal_moves_rook::generate_rook_moves;
use crate::move_generation::move_codec::Move;

/// Why a side to move has no legal moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminalKind {
    Checkmate,
    Stalemate,
}

/// All legal moves for `side`. The board is mutated speculatively during
/// generation and handed back exactly as it came in.
pub fn generate_legal_moves(board: &mut Board, side: Color) -> Vec<Move> {
    let mut moves = Vec::with_capacity(64);

    for square in 0..64u8 {
        let Some(piece) = board.piece_at(square) else {
            continue;
        };
        if piece.color != side {
            continue;
        }
        generate_moves_for_piece(board, side, piece.kind, square, &mut moves);
    }

    moves
}

/// Per-kind dispatch, the closed-enumeration replacement for the original
/// function-pointer table.
pub fn generate_moves_for_piece(
    board: &mut Board,
    side: Color,
    kind: PieceKind,
    from: Square,
    out: &mut Vec<Move>,
) {
    match kind {
        PieceKind::Pawn => generate_pawn_moves(board, side, from, out),
        PieceKind::Knight => generate_knight_moves(board, side, from, out),
        PieceKind::Bishop => generate_bishop_moves(board, side, from, out),
        PieceKind::Rook => generate_rook_moves(board, side, from, out),
        PieceKind::Queen => generate_queen_moves(board, side, from, out),
        PieceKind::King => generate_king_moves(board, side, from, out),
    }
}

/// `Some` when `side` has no legal moves, distinguishing mate from stalemate
/// by re-querying the king-safety oracle.
pub fn classify_terminal(board: &mut Board, side: Color) -> Option<TerminalKind> {
    if !generate_legal_moves(board, side).is_empty() {
        return None;
    }
    if is_king_in_check(board, side) {
        Some(TerminalKind::Checkmate)
    } else {
        Some(TerminalKind::Stalemate)
    }
}

#[cfg(test)]
mod tests {
    use super::{classify_terminal, generate_legal_moves, TerminalKind};
    use crate::game_state::board::Board;
    use crate::game_state::chess_types::PieceKind;
    use crate::move_generation::legal_move_checks::is_king_in_check;
    use crate::move_generation::move_codec::Move;

    #[test]
    fn starting_position_has_twenty_moves() {
        let (mut board, side) = Board::new_game();
        let moves = generate_legal_moves(&mut board, side);
        assert_eq!(moves.len(), 20);

        let pawn_moves = moves
            .iter()
            .filter(|mv| {
                board.piece_at(mv.origin()).map(|p| p.kind) == Some(PieceKind::Pawn)
            })
            .count();
        let knight_moves = moves
            .iter()
            .filter(|mv| {
                board.piece_at(mv.origin()).map(|p| p.kind) == Some(PieceKind::Knight)
            })
            .count();
        assert_eq!(pawn_moves, 16);
        assert_eq!(knight_moves, 4);
    }

    #[test]
    fn generation_leaves_the_board_untouched() {
        let (mut board, side) =
            Board::from_fen("r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1")
                .expect("FEN should parse");
        let before = board.clone();
        let _ = generate_legal_moves(&mut board, side);
        assert_eq!(board, before);
    }

    #[test]
    fn every_generated_move_leaves_own_king_safe() {
        // White is in check from the b4 bishop; only evasions are legal.
        let (mut board, side) =
            Board::from_fen("rnbqk1nr/pppp1ppp/8/4p3/1b6/3P4/PPP1PPPP/RNBQKBNR w KQkq - 1 3")
                .expect("FEN should parse");
        let before = board.clone();

        let moves = generate_legal_moves(&mut board, side);
        assert!(!moves.is_empty(), "check evasions must exist here");
        for mv in moves {
            let token = board.apply_move(&mv);
            assert!(
                !is_king_in_check(&board, side),
                "generated move {mv:?} leaves the king attacked"
            );
            board.revert_move(&mv, token);
        }
        assert_eq!(board, before);
    }

    #[test]
    fn pinned_piece_moves_are_filtered_out() {
        // The e4 knight is pinned to the white king by the e8 rook.
        let (mut board, side) =
            Board::from_fen("4r1k1/8/8/8/4N3/8/8/4K3 w - - 0 1").expect("FEN should parse");
        let knight_moves = generate_legal_moves(&mut board, side)
            .into_iter()
            .filter(|mv| mv.origin() == 28)
            .count();
        assert_eq!(knight_moves, 0);
    }

    #[test]
    fn quiet_promotion_expands_to_four_kinds_queen_first() {
        let (mut board, side) =
            Board::from_fen("8/4P3/8/8/8/k7/8/4K3 w - - 0 1").expect("FEN should parse");
        let promotions: Vec<Move> = generate_legal_moves(&mut board, side)
            .into_iter()
            .filter(|mv| matches!(mv, Move::Promotion { .. }))
            .collect();

        let kinds: Vec<PieceKind> = promotions
            .iter()
            .map(|mv| match mv {
                Move::Promotion { promoted, .. } => *promoted,
                _ => unreachable!(),
            })
            .collect();
        assert_eq!(
            kinds,
            vec![
                PieceKind::Queen,
                PieceKind::Rook,
                PieceKind::Bishop,
                PieceKind::Knight
            ]
        );
    }

    #[test]
    fn capture_promotions_are_offered_per_available_diagonal() {
        // Pawn on e7 can push to e8 and capture on d8: eight promotions.
        let (mut board, side) =
            Board::from_fen("3r2k1/4P3/8/8/8/8/8/4K3 w - - 0 1").expect("FEN should parse");
        let promotions = generate_legal_moves(&mut board, side)
            .into_iter()
            .filter(|mv| matches!(mv, Move::Promotion { .. }))
            .count();
        assert_eq!(promotions, 8);
    }

    #[test]
    fn castle_blocked_by_one_intervening_piece_is_not_offered() {
        let (mut board, side) =
            Board::from_fen("4k3/8/8/8/8/8/8/4KB1R w K - 0 1").expect("FEN should parse");
        let castles = generate_legal_moves(&mut board, side)
            .into_iter()
            .filter(|mv| matches!(mv, Move::Castle { .. }))
            .count();
        assert_eq!(castles, 0);
    }

    #[test]
    fn clearing_the_path_yields_exactly_one_castle() {
        let (mut board, side) =
            Board::from_fen("4k3/8/8/8/8/8/8/4K2R w K - 0 1").expect("FEN should parse");
        let castles: Vec<Move> = generate_legal_moves(&mut board, side)
            .into_iter()
            .filter(|mv| matches!(mv, Move::Castle { .. }))
            .collect();
        assert_eq!(castles.len(), 1);
        assert!(matches!(
            castles[0],
            Move::Castle {
                king_from: 4,
                king_to: 6,
                rook_from: 7,
                rook_to: 5,
                ..
            }
        ));
    }

    #[test]
    fn cannot_castle_out_of_or_through_check() {
        let in_check =
            Board::from_fen("4r1k1/8/8/8/8/8/8/R3K2R w KQ - 0 1").expect("FEN should parse");
        let (mut board, side) = in_check;
        assert!(generate_legal_moves(&mut board, side)
            .into_iter()
            .all(|mv| !matches!(mv, Move::Castle { .. })));

        // The f1 transit square is covered by the f8 rook.
        let through_check =
            Board::from_fen("5r1k/8/8/8/8/8/8/R3K2R w KQ - 0 1").expect("FEN should parse");
        let (mut board, side) = through_check;
        let castles: Vec<Move> = generate_legal_moves(&mut board, side)
            .into_iter()
            .filter(|mv| matches!(mv, Move::Castle { .. }))
            .collect();
        assert_eq!(castles.len(), 1, "only the queenside castle survives");
        assert!(matches!(castles[0], Move::Castle { king_to: 2, .. }));
    }

    #[test]
    fn en_passant_window_closes_after_one_ply() {
        let (mut board, side) =
            Board::from_fen("4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 1").expect("FEN should parse");
        let immediate = generate_legal_moves(&mut board, side)
            .into_iter()
            .filter(|mv| matches!(mv, Move::EnPassant { .. }))
            .count();
        assert_eq!(immediate, 1);

        // One ply later the geometric pattern still matches but the window
        // is gone.
        let waiting_move = Move::Normal {
            from: 4,
            to: 5,
            captured: None,
            revokes: 0,
        };
        board.apply_move(&waiting_move);
        let stale = generate_legal_moves(&mut board, side)
            .into_iter()
            .filter(|mv| matches!(mv, Move::EnPassant { .. }))
            .count();
        assert_eq!(stale, 0);
    }

    #[test]
    fn checkmate_and_stalemate_are_distinguished() {
        let (mut mated, side) =
            Board::from_fen("6k1/5Q2/6K1/8/8/8/8/8 b - - 0 1").expect("FEN should parse");
        assert_eq!(classify_terminal(&mut mated, side), Some(TerminalKind::Checkmate));

        let (mut stale, side) =
            Board::from_fen("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1").expect("FEN should parse");
        assert_eq!(classify_terminal(&mut stale, side), Some(TerminalKind::Stalemate));

        let (mut open, side) = Board::new_game();
        assert_eq!(classify_terminal(&mut open, side), None);
    }
}
