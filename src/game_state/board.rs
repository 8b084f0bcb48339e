//! Mutable mailbox position with incremental make/unmake.
//!
//! `Board` is the one piece of shared state the whole engine mutates. Every
//! apply touches only the squares its move record names and returns an
//! `UndoToken`; the matching revert restores bit-identical state, so search
//! recursion never copies the board.

use std::error::Error;
use std::fmt;

use crate::game_state::chess_rules::STARTING_POSITION_FEN;
use crate::game_state::chess_types::*;
use crate::game_state::undo_state::UndoToken;
use crate::move_generation::move_codec::Move;
use crate::utils::fen_generator::generate_fen;
use crate::utils::fen_parser::parse_fen;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardError {
    MissingKing(Color),
    DuplicateKing(Color),
    CensusMismatch {
        color: Color,
        kind: PieceKind,
        counted: u8,
        cached: u8,
    },
    MisplacedKingCache(Color),
}

impl fmt::Display for BoardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoardError::MissingKing(color) => write!(f, "no {color:?} king on the board"),
            BoardError::DuplicateKing(color) => write!(f, "more than one {color:?} king"),
            BoardError::CensusMismatch {
                color,
                kind,
                counted,
                cached,
            } => write!(
                f,
                "piece count desync for {color:?} {kind:?}: board has {counted}, cache says {cached}"
            ),
            BoardError::MisplacedKingCache(color) => {
                write!(f, "king-square cache does not point at the {color:?} king")
            }
        }
    }
}

impl Error for BoardError {}

/// Incremental game position optimized for fast move making/unmaking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    /// Rank-major mailbox, `a1 = 0`.
    pub cells: [Option<Piece>; 64],

    // --- Cached lookups maintained by apply/revert ---
    pub king_squares: [Square; 2],
    pub piece_counts: [[u8; 6]; 2],

    // --- Castling bookkeeping ---
    pub castling_rights: CastlingRights,
    pub has_castled: [bool; 2],

    // --- One-ply en-passant window and fifty-move clock ---
    pub en_passant_square: Option<Square>,
    pub halfmove_clock: u16,
}

impl Default for Board {
    fn default() -> Self {
        Self {
            cells: [None; 64],
            king_squares: [0; 2],
            piece_counts: [[0; 6]; 2],
            castling_rights: 0,
            has_castled: [false; 2],
            en_passant_square: None,
            halfmove_clock: 0,
        }
    }
}

impl Board {
    #[inline]
    pub fn new_empty() -> Self {
        Self::default()
    }

    /// Standard starting position plus the side to move (White).
    #[inline]
    pub fn new_game() -> (Self, Color) {
        parse_fen(STARTING_POSITION_FEN).expect("starting FEN should always parse")
    }

    #[inline]
    pub fn from_fen(fen: &str) -> Result<(Self, Color), String> {
        parse_fen(fen)
    }

    #[inline]
    pub fn get_fen(&self, side_to_move: Color) -> String {
        generate_fen(self, side_to_move)
    }

    #[inline]
    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        self.cells[square as usize]
    }

    #[inline]
    pub fn king_square(&self, color: Color) -> Square {
        self.king_squares[color.index()]
    }

    #[inline]
    pub fn piece_count(&self, color: Color, kind: PieceKind) -> u8 {
        self.piece_counts[color.index()][kind.index()]
    }

    /// Mutate the position for `mv` and return the token its revert needs.
    pub fn apply_move(&mut self, mv: &Move) -> UndoToken {
        let token = UndoToken {
            prev_en_passant: self.en_passant_square,
            prev_halfmove_clock: self.halfmove_clock,
        };

        match *mv {
            Move::Normal {
                from,
                to,
                captured,
                revokes,
            } => {
                let mover = self.cells[from as usize].expect("normal move needs a mover");

                if let Some(kind) = captured {
                    self.piece_counts[mover.color.opposite().index()][kind.index()] -= 1;
                }

                self.cells[to as usize] = Some(mover);
                self.cells[from as usize] = None;

                if mover.kind == PieceKind::King {
                    self.king_squares[mover.color.index()] = to;
                }

                self.castling_rights &= !revokes;

                let double_push = mover.kind == PieceKind::Pawn
                    && rank_of(from).abs_diff(rank_of(to)) == 2;
                self.en_passant_square = if double_push {
                    Some((from + to) / 2)
                } else {
                    None
                };

                if mover.kind == PieceKind::Pawn || captured.is_some() {
                    self.halfmove_clock = 0;
                } else {
                    self.halfmove_clock += 1;
                }
            }

            Move::Castle {
                king_from,
                king_to,
                rook_from,
                rook_to,
                revokes,
            } => {
                let king = self.cells[king_from as usize].expect("castle needs a king");
                let rook = self.cells[rook_from as usize].expect("castle needs a rook");

                self.cells[king_to as usize] = Some(king);
                self.cells[king_from as usize] = None;
                self.cells[rook_to as usize] = Some(rook);
                self.cells[rook_from as usize] = None;

                self.king_squares[king.color.index()] = king_to;
                self.has_castled[king.color.index()] = true;
                self.castling_rights &= !revokes;
                self.en_passant_square = None;
                self.halfmove_clock += 1;
            }

            Move::Promotion {
                from,
                to,
                captured,
                promoted,
                revokes,
            } => {
                let pawn = self.cells[from as usize].expect("promotion needs a pawn");

                if let Some(kind) = captured {
                    self.piece_counts[pawn.color.opposite().index()][kind.index()] -= 1;
                }
                self.piece_counts[pawn.color.index()][PieceKind::Pawn.index()] -= 1;
                self.piece_counts[pawn.color.index()][promoted.index()] += 1;

                self.cells[to as usize] = Some(Piece::new(promoted, pawn.color));
                self.cells[from as usize] = None;

                self.castling_rights &= !revokes;
                self.en_passant_square = None;
                self.halfmove_clock = 0;
            }

            Move::EnPassant {
                from,
                to,
                captured_square,
            } => {
                let pawn = self.cells[from as usize].expect("en-passant needs a pawn");

                self.piece_counts[pawn.color.opposite().index()][PieceKind::Pawn.index()] -= 1;

                self.cells[to as usize] = Some(pawn);
                self.cells[from as usize] = None;
                self.cells[captured_square as usize] = None;

                self.en_passant_square = None;
                self.halfmove_clock = 0;
            }
        }

        token
    }

    /// Exact inverse of `apply_move` for the same move record and token.
    pub fn revert_move(&mut self, mv: &Move, token: UndoToken) {
        match *mv {
            Move::Normal {
                from,
                to,
                captured,
                revokes,
            } => {
                let mover = self.cells[to as usize].expect("revert needs the moved piece");

                self.cells[from as usize] = Some(mover);
                self.cells[to as usize] =
                    captured.map(|kind| Piece::new(kind, mover.color.opposite()));

                if let Some(kind) = captured {
                    self.piece_counts[mover.color.opposite().index()][kind.index()] += 1;
                }

                if mover.kind == PieceKind::King {
                    self.king_squares[mover.color.index()] = from;
                }

                self.castling_rights |= revokes;
            }

            Move::Castle {
                king_from,
                king_to,
                rook_from,
                rook_to,
                revokes,
            } => {
                let king = self.cells[king_to as usize].expect("revert needs the king");
                let rook = self.cells[rook_to as usize].expect("revert needs the rook");

                self.cells[king_from as usize] = Some(king);
                self.cells[king_to as usize] = None;
                self.cells[rook_from as usize] = Some(rook);
                self.cells[rook_to as usize] = None;

                self.king_squares[king.color.index()] = king_from;
                self.has_castled[king.color.index()] = false;
                self.castling_rights |= revokes;
            }

            Move::Promotion {
                from,
                to,
                captured,
                promoted,
                revokes,
            } => {
                let piece = self.cells[to as usize].expect("revert needs the promoted piece");

                self.piece_counts[piece.color.index()][promoted.index()] -= 1;
                self.piece_counts[piece.color.index()][PieceKind::Pawn.index()] += 1;
                if let Some(kind) = captured {
                    self.piece_counts[piece.color.opposite().index()][kind.index()] += 1;
                }

                self.cells[from as usize] = Some(Piece::new(PieceKind::Pawn, piece.color));
                self.cells[to as usize] =
                    captured.map(|kind| Piece::new(kind, piece.color.opposite()));

                self.castling_rights |= revokes;
            }

            Move::EnPassant {
                from,
                to,
                captured_square,
            } => {
                let pawn = self.cells[to as usize].expect("revert needs the capturing pawn");

                self.piece_counts[pawn.color.opposite().index()][PieceKind::Pawn.index()] += 1;

                self.cells[from as usize] = Some(pawn);
                self.cells[to as usize] = None;
                self.cells[captured_square as usize] =
                    Some(Piece::new(PieceKind::Pawn, pawn.color.opposite()));
            }
        }

        self.en_passant_square = token.prev_en_passant;
        self.halfmove_clock = token.prev_halfmove_clock;
    }

    /// Cross-check the cached king squares and piece counts against the
    /// cells. Search refuses to start on a board that fails this.
    pub fn validate(&self) -> Result<(), BoardError> {
        let mut census = [[0u8; 6]; 2];
        for cell in self.cells.iter().flatten() {
            census[cell.color.index()][cell.kind.index()] += 1;
        }

        for color in [Color::White, Color::Black] {
            let kings = census[color.index()][PieceKind::King.index()];
            if kings == 0 {
                return Err(BoardError::MissingKing(color));
            }
            if kings > 1 {
                return Err(BoardError::DuplicateKing(color));
            }

            for kind in ALL_PIECE_KINDS {
                let counted = census[color.index()][kind.index()];
                let cached = self.piece_counts[color.index()][kind.index()];
                if counted != cached {
                    return Err(BoardError::CensusMismatch {
                        color,
                        kind,
                        counted,
                        cached,
                    });
                }
            }

            let cached_square = self.king_squares[color.index()];
            match self.cells[cached_square as usize] {
                Some(piece) if piece.kind == PieceKind::King && piece.color == color => {}
                _ => return Err(BoardError::MisplacedKingCache(color)),
            }
        }

        Ok(())
    }
}
