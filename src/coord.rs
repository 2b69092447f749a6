use std::{
    fmt::{self, Display, Formatter},
    ops::Mul,
    str::FromStr,
};

use thiserror::Error;

use crate::color::Color;

/// Builds a [`Coord`] from an algebraic square name, checked at compile time
/// when used in a const context.
#[macro_export]
macro_rules! coord {
    ($square:literal) => {
        $crate::coord::Coord::from_literal($square)
    };
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum ParseCoordError {
    #[error("found `{0}`, characters from `a` to `h` were expected instead")]
    InvalidX(char),
    #[error("found `{0}`, characters from `1` to `8` were expected instead")]
    InvalidY(char),
    #[error("provided string have length of {0} characters, 2 were expected")]
    NotEnoughCharacter(u8),
    #[error("unexpected `{0}`")]
    Unexpected(char),
}

/// A square. `x` is the column (a-file is 0), `y` is the row counted from
/// black's back rank, so rank 8 is row 0 and rank 1 is row 7.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Coord {
    y: u8,
    x: u8,
}

impl Coord {
    pub const fn new(x: u8, y: u8) -> Self {
        debug_assert!(x < 8);
        debug_assert!(y < 8);
        Coord { y, x }
    }
    /// # Panics
    ///
    /// Panics when `s` is not a square name like `e4`, at compile time in a
    /// const context.
    pub const fn from_literal(s: &str) -> Self {
        let bytes = s.as_bytes();
        assert!(bytes.len() == 2, "square literal must be two characters");
        assert!(bytes[0] >= b'a' && bytes[0] <= b'h', "file must be a..h");
        assert!(bytes[1] >= b'1' && bytes[1] <= b'8', "rank must be 1..8");
        Coord::new(bytes[0] - b'a', 7 - (bytes[1] - b'1'))
    }
    pub fn from_chars(x: char, y: char) -> Result<Self, ParseCoordError> {
        let x = match x {
            'a'..='h' => x as u8 - b'a',
            _ => return Err(ParseCoordError::InvalidX(x)),
        };
        let y = match y {
            '1'..='8' => 7 - (y as u8 - b'1'),
            _ => return Err(ParseCoordError::InvalidY(y)),
        };
        Ok(Coord::new(x, y))
    }
    pub fn new_checked(x: u8, y: u8) -> Option<Self> {
        if x >= 8 || y >= 8 {
            None
        } else {
            Some(Self::new(x, y))
        }
    }
    /// Every square, row by row starting at a8.
    pub fn all() -> impl Iterator<Item = Self> {
        (0..8).flat_map(|y| (0..8).map(move |x| Coord::new(x, y)))
    }
    pub fn x(self) -> u8 {
        self.x
    }
    pub fn y(self) -> u8 {
        self.y
    }
    pub fn move_by(self, movement: Vector) -> Option<Self> {
        Self::new_checked(
            self.x.checked_add_signed(movement.x)?,
            self.y.checked_add_signed(movement.y)?,
        )
    }
    /// Squares along `direction`, nearest first, excluding `self`, ending at
    /// the edge of the board.
    pub fn line_exclusive(self, direction: Vector) -> impl Iterator<Item = Self> {
        debug_assert_ne!(direction, Vector::ZERO);
        (1..).map_while(move |distance| self.move_by(direction * distance))
    }
    /// Shade of the square; a8 is light.
    pub fn color(self) -> Color {
        if (self.x + self.y) % 2 == 0 {
            Color::White
        } else {
            Color::Black
        }
    }
}
pub fn home_rank(color: Color) -> u8 {
    match color {
        Color::White => 7,
        Color::Black => 0,
    }
}
pub fn pawn_home_rank(color: Color) -> u8 {
    match color {
        Color::White => 6,
        Color::Black => 1,
    }
}
pub fn pawn_promotion_rank(color: Color) -> u8 {
    home_rank(!color)
}
pub fn pawn_direction(color: Color) -> i8 {
    match color {
        Color::White => -1,
        Color::Black => 1,
    }
}
impl Display for Coord {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let x = (self.x + b'a') as char;
        let y = 8 - self.y;
        write!(f, "{x}{y}")?;
        Ok(())
    }
}
impl FromStr for Coord {
    type Err = ParseCoordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        let Some(x) = chars.next() else {
            return Err(ParseCoordError::NotEnoughCharacter(0));
        };
        let Some(y) = chars.next() else {
            return Err(ParseCoordError::NotEnoughCharacter(1));
        };
        if let Some(c) = chars.next() {
            return Err(ParseCoordError::Unexpected(c));
        }
        Coord::from_chars(x, y)
    }
}
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Vector {
    pub x: i8,
    pub y: i8,
}
impl Vector {
    pub const ZERO: Self = Vector { x: 0, y: 0 };

    pub const KNIGHT_MOVES: [Self; 8] = [
        Vector { x: -1, y: -2 },
        Vector { x: 1, y: -2 },
        Vector { x: -2, y: -1 },
        Vector { x: 2, y: -1 },
        Vector { x: -2, y: 1 },
        Vector { x: 2, y: 1 },
        Vector { x: -1, y: 2 },
        Vector { x: 1, y: 2 },
    ];
    pub const KING_MOVES: [Self; 8] = [
        Vector { x: -1, y: -1 },
        Vector { x: 0, y: -1 },
        Vector { x: 1, y: -1 },
        Vector { x: -1, y: 0 },
        Vector { x: 1, y: 0 },
        Vector { x: -1, y: 1 },
        Vector { x: 0, y: 1 },
        Vector { x: 1, y: 1 },
    ];
    pub const ROOK_DIRECTIONS: [Self; 4] = [
        Vector { x: 0, y: -1 },
        Vector { x: 0, y: 1 },
        Vector { x: -1, y: 0 },
        Vector { x: 1, y: 0 },
    ];
    pub const BISHOP_DIRECTIONS: [Self; 4] = [
        Vector { x: -1, y: -1 },
        Vector { x: 1, y: -1 },
        Vector { x: -1, y: 1 },
        Vector { x: 1, y: 1 },
    ];
    pub const QUEEN_DIRECTIONS: [Self; 8] = Vector::KING_MOVES;

    pub fn pawn_single_move(color: Color) -> Self {
        Vector {
            x: 0,
            y: pawn_direction(color),
        }
    }
    pub fn pawn_attacks(color: Color) -> [Self; 2] {
        [-1, 1].map(|x| Vector {
            x,
            y: pawn_direction(color),
        })
    }
}
impl Mul<i8> for Vector {
    type Output = Vector;

    fn mul(self, rhs: i8) -> Self::Output {
        Vector {
            x: self.x * rhs,
            y: self.y * rhs,
        }
    }
}
