//! Tagged move representation carrying its own undo data.
//!
//! Every variant records the pre-move occupant of its destination and the
//! castling-rights bits it revokes, so reverting a move is a pure function of
//! the move record plus the small undo token the board hands back on apply.

use crate::game_state::chess_types::{CastlingRights, PieceKind, Square};

/// A single move, one of the four shapes chess mutations take.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Move {
    /// Plain displacement, including double pawn pushes and ordinary captures.
    Normal {
        from: Square,
        to: Square,
        captured: Option<PieceKind>,
        /// Rights this move strips: set only for bits that were still
        /// available before the move, so revert can restore them blindly.
        revokes: CastlingRights,
    },
    /// King and rook move together; both squares pairs derive from the side.
    Castle {
        king_from: Square,
        king_to: Square,
        rook_from: Square,
        rook_to: Square,
        revokes: CastlingRights,
    },
    /// Pawn reaching the last rank, possibly capturing on arrival.
    Promotion {
        from: Square,
        to: Square,
        captured: Option<PieceKind>,
        promoted: PieceKind,
        revokes: CastlingRights,
    },
    /// Pawn takes the pawn that just double-pushed past it.
    EnPassant {
        from: Square,
        to: Square,
        captured_square: Square,
    },
}

impl Move {
    #[inline]
    pub const fn origin(&self) -> Square {
        match *self {
            Move::Normal { from, .. }
            | Move::Promotion { from, .. }
            | Move::EnPassant { from, .. } => from,
            Move::Castle { king_from, .. } => king_from,
        }
    }

    #[inline]
    pub const fn destination(&self) -> Square {
        match *self {
            Move::Normal { to, .. }
            | Move::Promotion { to, .. }
            | Move::EnPassant { to, .. } => to,
            Move::Castle { king_to, .. } => king_to,
        }
    }

    /// Kind removed from the board by this move, if any.
    #[inline]
    pub const fn captured_kind(&self) -> Option<PieceKind> {
        match *self {
            Move::Normal { captured, .. } | Move::Promotion { captured, .. } => captured,
            Move::EnPassant { .. } => Some(PieceKind::Pawn),
            Move::Castle { .. } => None,
        }
    }

    #[inline]
    pub const fn is_capture(&self) -> bool {
        self.captured_kind().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::Move;
    use crate::game_state::chess_types::PieceKind;

    #[test]
    fn accessors_cover_every_variant() {
        let normal = Move::Normal {
            from: 12,
            to: 28,
            captured: None,
            revokes: 0,
        };
        assert_eq!(normal.origin(), 12);
        assert_eq!(normal.destination(), 28);
        assert!(!normal.is_capture());

        let castle = Move::Castle {
            king_from: 4,
            king_to: 6,
            rook_from: 7,
            rook_to: 5,
            revokes: 0b0011,
        };
        assert_eq!(castle.origin(), 4);
        assert_eq!(castle.destination(), 6);
        assert_eq!(castle.captured_kind(), None);

        let promotion = Move::Promotion {
            from: 52,
            to: 61,
            captured: Some(PieceKind::Rook),
            promoted: PieceKind::Queen,
            revokes: 0,
        };
        assert!(promotion.is_capture());

        let en_passant = Move::EnPassant {
            from: 36,
            to: 43,
            captured_square: 35,
        };
        assert_eq!(en_passant.captured_kind(), Some(PieceKind::Pawn));
    }
}
