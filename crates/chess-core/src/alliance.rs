//! Side (alliance) representation.

/// The two sides in chess.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Alliance {
    White = 0,
    Black = 1,
}

impl Alliance {
    /// Both sides, White first.
    pub const ALL: [Alliance; 2] = [Alliance::White, Alliance::Black];

    /// Returns the other side.
    #[inline]
    pub const fn opposite(self) -> Self {
        match self {
            Alliance::White => Alliance::Black,
            Alliance::Black => Alliance::White,
        }
    }

    /// Returns the index (0 for White, 1 for Black).
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Returns the y step a pawn of this side advances by.
    ///
    /// White starts on y=6..7 and advances toward y=0, Black the other way.
    #[inline]
    pub const fn direction(self) -> i8 {
        match self {
            Alliance::White => -1,
            Alliance::Black => 1,
        }
    }

    /// Returns true if a pawn of this side promotes on row `y`.
    #[inline]
    pub const fn is_promotion_rank(self, y: u8) -> bool {
        match self {
            Alliance::White => y == 0,
            Alliance::Black => y == 7,
        }
    }

    /// Returns the row holding this side's king and rooks at the start.
    #[inline]
    pub const fn back_rank(self) -> u8 {
        match self {
            Alliance::White => 7,
            Alliance::Black => 0,
        }
    }

    /// Returns the row this side's pawns start on.
    #[inline]
    pub const fn pawn_start_rank(self) -> u8 {
        match self {
            Alliance::White => 6,
            Alliance::Black => 1,
        }
    }

    #[inline]
    pub const fn is_white(self) -> bool {
        matches!(self, Alliance::White)
    }

    #[inline]
    pub const fn is_black(self) -> bool {
        matches!(self, Alliance::Black)
    }
}

impl std::fmt::Display for Alliance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Alliance::White => write!(f, "White"),
            Alliance::Black => write!(f, "Black"),
        }
    }
}
