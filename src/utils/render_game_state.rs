//! ASCII board diagram for tests and diagnostics.

use crate::game_state::board::Board;
use crate::game_state::chess_types::{square_from, Color, Piece, PieceKind};

/// Render the board as an 8x8 diagram, rank 8 on top, files a-h labeled.
pub fn render_game_state(board: &Board) -> String {
    let mut out = String::with_capacity(200);

    for rank in (0..8u8).rev() {
        out.push(char::from(b'1' + rank));
        out.push(' ');
        for file in 0..8u8 {
            out.push(match board.piece_at(square_from(rank, file)) {
                None => '.',
                Some(piece) => piece_char(piece),
            });
            out.push(' ');
        }
        out.push('\n');
    }
    out.push_str("  a b c d e f g h");
    out
}

fn piece_char(piece: Piece) -> char {
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

#[cfg(test)]
mod tests {
    use super::render_game_state;
    use crate::game_state::board::Board;

    #[test]
    fn renders_the_starting_position() {
        let (board, _) = Board::new_game();
        let diagram = render_game_state(&board);

        let first_line = diagram.lines().next().expect("diagram has lines");
        assert_eq!(first_line, "8 r n b q k b n r ");
        assert!(diagram.ends_with("  a b c d e f g h"));
    }
}
