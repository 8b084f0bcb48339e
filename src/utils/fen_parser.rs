//! FEN-to-Board parser, the position-ingestion seam.
//!
//! Builds the fully-populated mailbox state from a Forsyth-Edwards Notation
//! string: cells, king squares, piece counts, castling rights, en-passant
//! target, and halfmove clock. Rights are sanitized against the actual king
//! and rook home squares, and the result is census-validated before it is
//! handed to callers.

use crate::game_state::board::Board;
use crate::game_state::chess_rules::{
    king_home, BLACK_KINGSIDE_ROOK_HOME, BLACK_QUEENSIDE_ROOK_HOME, WHITE_KINGSIDE_ROOK_HOME,
    WHITE_QUEENSIDE_ROOK_HOME,
};
use crate::game_state::chess_types::*;
use crate::utils::algebraic::algebraic_to_square;

pub fn parse_fen(fen: &str) -> Result<(Board, Color), String> {
    let mut parts = fen.split_whitespace();

    let board_part = parts.next().ok_or("Missing board layout in FEN")?;
    let side_part = parts.next().ok_or("Missing side-to-move in FEN")?;
    let castling_part = parts.next().ok_or("Missing castling rights in FEN")?;
    let en_passant_part = parts.next().ok_or("Missing en-passant square in FEN")?;
    let halfmove_part = parts.next().unwrap_or("0");
    let fullmove_part = parts.next().unwrap_or("1");

    if parts.next().is_some() {
        return Err("FEN has extra trailing fields".to_owned());
    }

    let mut board = Board::new_empty();

    parse_board(board_part, &mut board)?;
    let side_to_move = parse_side_to_move(side_part)?;
    board.castling_rights = sanitize_rights(&board, parse_castling_rights(castling_part)?);
    board.en_passant_square = parse_en_passant_square(en_passant_part, side_to_move, &board)?;
    board.halfmove_clock = halfmove_part
        .parse::<u16>()
        .map_err(|_| format!("Invalid halfmove clock: {halfmove_part}"))?;
    fullmove_part
        .parse::<u16>()
        .map_err(|_| format!("Invalid fullmove number: {fullmove_part}"))?;

    board
        .validate()
        .map_err(|err| format!("FEN decodes to a malformed position: {err}"))?;

    Ok((board, side_to_move))
}

fn parse_board(board_part: &str, board: &mut Board) -> Result<(), String> {
    let ranks: Vec<&str> = board_part.split('/').collect();
    if ranks.len() != 8 {
        return Err("Board layout must contain 8 ranks".to_owned());
    }

    for (fen_rank_idx, rank_str) in ranks.iter().enumerate() {
        let board_rank = 7 - fen_rank_idx as u8;
        let mut file = 0u8;

        for ch in rank_str.chars() {
            if let Some(empty_count) = ch.to_digit(10) {
                if !(1..=8).contains(&empty_count) {
                    return Err(format!("Invalid empty-square count '{ch}'"));
                }
                file += empty_count as u8;
                continue;
            }

            let piece = piece_from_fen_char(ch)
                .ok_or_else(|| format!("Invalid piece character '{ch}' in board layout"))?;

            if file >= 8 {
                return Err("Board rank has too many files".to_owned());
            }

            let square = square_from(board_rank, file);
            board.cells[square as usize] = Some(piece);
            board.piece_counts[piece.color.index()][piece.kind.index()] += 1;
            if piece.kind == PieceKind::King {
                board.king_squares[piece.color.index()] = square;
            }
            file += 1;
        }

        if file != 8 {
            return Err("Board rank does not sum to 8 files".to_owned());
        }
    }

    Ok(())
}

fn parse_side_to_move(side_part: &str) -> Result<Color, String> {
    match side_part {
        "w" => Ok(Color::White),
        "b" => Ok(Color::Black),
        _ => Err(format!("Invalid side-to-move field: {side_part}")),
    }
}

fn parse_castling_rights(castling_part: &str) -> Result<CastlingRights, String> {
    if castling_part == "-" {
        return Ok(0);
    }

    let mut rights: CastlingRights = 0;
    for ch in castling_part.chars() {
        match ch {
            'K' => rights |= CASTLE_WHITE_KINGSIDE,
            'Q' => rights |= CASTLE_WHITE_QUEENSIDE,
            'k' => rights |= CASTLE_BLACK_KINGSIDE,
            'q' => rights |= CASTLE_BLACK_QUEENSIDE,
            _ => return Err(format!("Invalid castling rights character: {ch}")),
        }
    }
    Ok(rights)
}

/// Drop any claimed right whose king or rook is not actually standing on
/// its home square.
fn sanitize_rights(board: &Board, rights: CastlingRights) -> CastlingRights {
    let mut sanitized = rights;

    for color in [Color::White, Color::Black] {
        let king_is_home = matches!(
            board.piece_at(king_home(color)),
            Some(piece) if piece.kind == PieceKind::King && piece.color == color
        );

        let (kingside_bit, kingside_rook) = match color {
            Color::White => (CASTLE_WHITE_KINGSIDE, WHITE_KINGSIDE_ROOK_HOME),
            Color::Black => (CASTLE_BLACK_KINGSIDE, BLACK_KINGSIDE_ROOK_HOME),
        };
        let (queenside_bit, queenside_rook) = match color {
            Color::White => (CASTLE_WHITE_QUEENSIDE, WHITE_QUEENSIDE_ROOK_HOME),
            Color::Black => (CASTLE_BLACK_QUEENSIDE, BLACK_QUEENSIDE_ROOK_HOME),
        };

        for (bit, rook_square) in [(kingside_bit, kingside_rook), (queenside_bit, queenside_rook)] {
            let rook_is_home = matches!(
                board.piece_at(rook_square),
                Some(piece) if piece.kind == PieceKind::Rook && piece.color == color
            );
            if !king_is_home || !rook_is_home {
                sanitized &= !bit;
            }
        }
    }

    sanitized
}

/// The en-passant field is kept only when it names a real capture window:
/// the square just behind an enemy pawn that could have double-pushed.
fn parse_en_passant_square(
    en_passant_part: &str,
    side_to_move: Color,
    board: &Board,
) -> Result<Option<Square>, String> {
    if en_passant_part == "-" {
        return Ok(None);
    }

    let target = algebraic_to_square(en_passant_part)?;
    let enemy = side_to_move.opposite();
    // The double-pushed enemy pawn stands one rank short of the target
    // along the capturing side's forward direction.
    let pawn_square = offset_square(target, -side_to_move.pawn_direction(), 0)
        .ok_or_else(|| format!("Impossible en-passant square: {en_passant_part}"))?;

    let window_is_real = board.piece_at(target).is_none()
        && board.piece_at(pawn_square) == Some(Piece::new(PieceKind::Pawn, enemy));

    Ok(window_is_real.then_some(target))
}

fn piece_from_fen_char(ch: char) -> Option<Piece> {
    let color = if ch.is_ascii_uppercase() {
        Color::White
    } else if ch.is_ascii_lowercase() {
        Color::Black
    } else {
        return None;
    };

    let kind = match ch.to_ascii_lowercase() {
        'p' => PieceKind::Pawn,
        'n' => PieceKind::Knight,
        'b' => PieceKind::Bishop,
        'r' => PieceKind::Rook,
        'q' => PieceKind::Queen,
        'k' => PieceKind::King,
        _ => return None,
    };

    Some(Piece::new(kind, color))
}

#[cfg(test)]
mod tests {
    use super::parse_fen;
    use crate::game_state::chess_rules::STARTING_POSITION_FEN;
    use crate::game_state::chess_types::{Color, PieceKind};

    #[test]
    fn parses_the_starting_position() {
        let (board, side) = parse_fen(STARTING_POSITION_FEN).expect("starting FEN should parse");

        assert_eq!(side, Color::White);
        assert_eq!(board.castling_rights, 0b1111);
        assert_eq!(board.piece_count(Color::White, PieceKind::Pawn), 8);
        assert_eq!(board.king_square(Color::White), 4);
        assert_eq!(board.king_square(Color::Black), 60);
        assert_eq!(board.halfmove_clock, 0);
        assert_eq!(board.en_passant_square, None);
    }

    #[test]
    fn rejects_structurally_broken_strings() {
        assert!(parse_fen("").is_err());
        assert!(parse_fen("8/8/8/8/8/8/8 w - - 0 1").is_err());
        assert!(parse_fen("9/8/8/8/8/8/8/8 w - - 0 1").is_err());
        assert!(parse_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR x KQkq - 0 1").is_err());
    }

    #[test]
    fn rejects_positions_without_both_kings() {
        assert!(parse_fen("8/8/8/8/8/8/8/4K3 w - - 0 1").is_err());
        assert!(parse_fen("4k2k/8/8/8/8/8/8/4K3 w - - 0 1").is_err());
    }

    #[test]
    fn sanitizes_rights_that_do_not_match_the_pieces() {
        // Kingside rook is missing, queenside is intact.
        let (board, _) =
            parse_fen("4k3/8/8/8/8/8/8/R3K3 w KQ - 0 1").expect("FEN should parse");
        assert_eq!(
            board.castling_rights,
            crate::game_state::chess_types::CASTLE_WHITE_QUEENSIDE
        );
    }

    #[test]
    fn drops_a_fictional_en_passant_window() {
        let (board, _) =
            parse_fen("4k3/8/8/8/8/8/8/4K3 w - e6 0 1").expect("FEN should parse");
        assert_eq!(board.en_passant_square, None);

        let (board, _) =
            parse_fen("4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 1").expect("FEN should parse");
        assert_eq!(board.en_passant_square, Some(43));
    }
}
