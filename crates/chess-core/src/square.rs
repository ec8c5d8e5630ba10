//! Board square representation.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Errors that can occur when parsing square text.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SquareError {
    #[error("invalid square '{0}': expected a file a-h followed by a rank 1-8")]
    InvalidSquare(String),

    #[error("coordinate ({0}, {1}) is off the board")]
    OffBoard(i16, i16),
}

/// A square on the chess board, indexed 0-63.
///
/// Squares are addressed by an `(x, y)` pair where `x` is the file
/// (0 = a, 7 = h) and `y` is the row counted from Black's back rank
/// (0 = rank 8, 7 = rank 1). The canonical index is `x + 8 * y`:
/// - a8 = 0, b8 = 1, ..., h8 = 7
/// - a7 = 8, ..., h1 = 63
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Square(u8);

impl Square {
    /// Creates a square from x and y, or `None` if either is outside 0-7.
    #[inline]
    pub const fn new(x: u8, y: u8) -> Option<Self> {
        if x < 8 && y < 8 {
            Some(Square(x + 8 * y))
        } else {
            None
        }
    }

    /// Creates a square from index (0-63).
    #[inline]
    pub const fn from_index(index: u8) -> Option<Self> {
        if index < 64 {
            Some(Square(index))
        } else {
            None
        }
    }

    /// Returns the square `(dx, dy)` away, or `None` if that leaves the board.
    #[inline]
    pub const fn offset(self, dx: i8, dy: i8) -> Option<Self> {
        let x = self.x() as i8 + dx;
        let y = self.y() as i8 + dy;
        if x >= 0 && x < 8 && y >= 0 && y < 8 {
            Some(Square(x as u8 + 8 * y as u8))
        } else {
            None
        }
    }

    /// Parses a square from algebraic notation (e.g., "e4").
    pub const fn from_algebraic(s: &str) -> Option<Self> {
        let bytes = s.as_bytes();
        if bytes.len() != 2 {
            return None;
        }
        let file = bytes[0].to_ascii_lowercase();
        let rank = bytes[1];
        if file < b'a' || file > b'h' || rank < b'1' || rank > b'8' {
            return None;
        }
        Square::new(file - b'a', b'8' - rank)
    }

    /// Returns the index (0-63).
    #[inline]
    pub const fn index(self) -> u8 {
        self.0
    }

    /// Returns the file, 0 (a) to 7 (h).
    #[inline]
    pub const fn x(self) -> u8 {
        self.0 % 8
    }

    /// Returns the row, 0 (rank 8) to 7 (rank 1).
    #[inline]
    pub const fn y(self) -> u8 {
        self.0 / 8
    }

    /// Returns the file letter ('a'-'h').
    #[inline]
    pub const fn file_char(self) -> char {
        (b'a' + self.x()) as char
    }

    /// Returns the rank digit ('8' for y=0 down to '1' for y=7).
    #[inline]
    pub const fn rank_char(self) -> char {
        (b'8' - self.y()) as char
    }

    /// Returns the algebraic notation for this square.
    pub fn to_algebraic(self) -> String {
        format!("{}{}", self.file_char(), self.rank_char())
    }

    /// Iterates over all 64 squares in index order.
    pub fn all() -> impl Iterator<Item = Square> {
        (0..64).map(Square)
    }

    // Back-rank squares used by castling
    pub const A8: Square = Square(0);
    pub const B8: Square = Square(1);
    pub const C8: Square = Square(2);
    pub const D8: Square = Square(3);
    pub const E8: Square = Square(4);
    pub const F8: Square = Square(5);
    pub const G8: Square = Square(6);
    pub const H8: Square = Square(7);
    pub const A1: Square = Square(56);
    pub const B1: Square = Square(57);
    pub const C1: Square = Square(58);
    pub const D1: Square = Square(59);
    pub const E1: Square = Square(60);
    pub const F1: Square = Square(61);
    pub const G1: Square = Square(62);
    pub const H1: Square = Square(63);
}

impl FromStr for Square {
    type Err = SquareError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Square::from_algebraic(s).ok_or_else(|| SquareError::InvalidSquare(s.to_string()))
    }
}

impl TryFrom<(i16, i16)> for Square {
    type Error = SquareError;

    fn try_from((x, y): (i16, i16)) -> Result<Self, Self::Error> {
        if (0..8).contains(&x) && (0..8).contains(&y) {
            Ok(Square(x as u8 + 8 * y as u8))
        } else {
            Err(SquareError::OffBoard(x, y))
        }
    }
}

impl fmt::Debug for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Square({})", self.to_algebraic())
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.file_char(), self.rank_char())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn square_new() {
        let e2 = Square::new(4, 6).unwrap();
        assert_eq!(e2.x(), 4);
        assert_eq!(e2.y(), 6);
        assert_eq!(e2.index(), 52);
        assert_eq!(Square::new(8, 0), None);
        assert_eq!(Square::new(0, 8), None);
    }

    #[test]
    fn index_is_x_plus_eight_y() {
        for y in 0..8 {
            for x in 0..8 {
                assert_eq!(Square::new(x, y).unwrap().index(), x + 8 * y);
            }
        }
    }

    #[test]
    fn square_from_algebraic() {
        assert_eq!(Square::from_algebraic("a8"), Some(Square::A8));
        assert_eq!(Square::from_algebraic("h1"), Some(Square::H1));
        assert_eq!(Square::from_algebraic("e4"), Square::new(4, 4));
        assert_eq!(Square::from_algebraic("E2"), Square::new(4, 6));
        assert_eq!(Square::from_algebraic("i1"), None);
        assert_eq!(Square::from_algebraic("a9"), None);
        assert_eq!(Square::from_algebraic("a0"), None);
        assert_eq!(Square::from_algebraic(""), None);
    }

    #[test]
    fn square_to_algebraic() {
        assert_eq!(Square::A8.to_algebraic(), "a8");
        assert_eq!(Square::H1.to_algebraic(), "h1");
        assert_eq!(Square::new(0, 0).unwrap().to_algebraic(), "a8");
        assert_eq!(Square::new(7, 7).unwrap().to_algebraic(), "h1");
        assert_eq!(Square::new(4, 4).unwrap().to_string(), "e4");
    }

    #[test]
    fn square_offset() {
        let e2 = Square::E1.offset(0, -1).unwrap();
        assert_eq!(e2.to_algebraic(), "e2");
        assert_eq!(Square::A8.offset(-1, 0), None);
        assert_eq!(Square::H1.offset(0, 1), None);
        assert_eq!(Square::A8.offset(7, 7), Some(Square::H1));
    }

    #[test]
    fn square_from_str() {
        assert_eq!("g1".parse::<Square>(), Ok(Square::G1));
        assert_eq!(
            "z9".parse::<Square>(),
            Err(SquareError::InvalidSquare("z9".to_string()))
        );
    }

    #[test]
    fn square_try_from_coordinates() {
        assert_eq!(Square::try_from((2, 7)), Ok(Square::C1));
        assert_eq!(Square::try_from((-1, 3)), Err(SquareError::OffBoard(-1, 3)));
        assert_eq!(Square::try_from((3, 8)), Err(SquareError::OffBoard(3, 8)));
    }

    #[test]
    fn all_squares_in_index_order() {
        let squares: Vec<Square> = Square::all().collect();
        assert_eq!(squares.len(), 64);
        assert_eq!(squares[0], Square::A8);
        assert_eq!(squares[63], Square::H1);
    }

    proptest::proptest! {
        #[test]
        fn offset_agrees_with_new(x in 0u8..8, y in 0u8..8, dx in -8i8..8, dy in -8i8..8) {
            let from = Square::new(x, y).unwrap();
            let tx = x as i16 + dx as i16;
            let ty = y as i16 + dy as i16;
            let expected = Square::try_from((tx, ty)).ok();
            proptest::prop_assert_eq!(from.offset(dx, dy), expected);
        }
    }
}
