//! Board-to-FEN generator, the inverse of the parser.
//!
//! The fullmove field is game-history bookkeeping the core board does not
//! track; it is emitted as `1`.

use crate::game_state::board::Board;
use crate::game_state::chess_types::*;
use crate::utils::algebraic::square_to_algebraic;

pub fn generate_fen(board: &Board, side_to_move: Color) -> String {
    let mut fen = String::with_capacity(90);

    for fen_rank in (0..8u8).rev() {
        let mut empty_run = 0;
        for file in 0..8u8 {
            match board.piece_at(square_from(fen_rank, file)) {
                None => empty_run += 1,
                Some(piece) => {
                    if empty_run > 0 {
                        fen.push(char::from(b'0' + empty_run));
                        empty_run = 0;
                    }
                    fen.push(piece_to_fen_char(piece));
                }
            }
        }
        if empty_run > 0 {
            fen.push(char::from(b'0' + empty_run));
        }
        if fen_rank > 0 {
            fen.push('/');
        }
    }

    fen.push(' ');
    fen.push(match side_to_move {
        Color::White => 'w',
        Color::Black => 'b',
    });

    fen.push(' ');
    if board.castling_rights == 0 {
        fen.push('-');
    } else {
        for (bit, ch) in [
            (CASTLE_WHITE_KINGSIDE, 'K'),
            (CASTLE_WHITE_QUEENSIDE, 'Q'),
            (CASTLE_BLACK_KINGSIDE, 'k'),
            (CASTLE_BLACK_QUEENSIDE, 'q'),
        ] {
            if board.castling_rights & bit != 0 {
                fen.push(ch);
            }
        }
    }

    fen.push(' ');
    match board.en_passant_square {
        None => fen.push('-'),
        Some(square) => {
            fen.push_str(&square_to_algebraic(square).expect("board squares are in range"))
        }
    }

    fen.push_str(&format!(" {} 1", board.halfmove_clock));
    fen
}

fn piece_to_fen_char(piece: Piece) -> char {
    let lower = match piece.kind {
        PieceKind::Pawn => 'p',
        PieceKind::Knight => 'n',
        PieceKind::Bishop => 'b',
        PieceKind::Rook => 'r',
        PieceKind::Queen => 'q',
        PieceKind::King => 'k',
    };
    match piece.color {
        Color::White => lower.to_ascii_uppercase(),
        Color::Black => lower,
    }
}
