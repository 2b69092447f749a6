//! The piece placement and side to move of Forsyth–Edwards Notation.
//!
//! Castling and en passant do not exist in this engine, so their fields are
//! ignored when reading and written as `-`.

use std::{
    fmt::{self, Display, Formatter},
    str::FromStr,
};

use thiserror::Error;

use crate::{
    board::Board,
    check::is_in_check,
    color::{Color, ParseColorError},
    coord::{Coord, home_rank},
    piece::{ParsePieceError, Piece, PieceKind},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum InvalidPosition {
    #[error("{0} must have exactly one king, found {1}")]
    KingCount(Color, usize),
    #[error("found a {0} pawn on a back rank")]
    PawnOnBackRank(Color),
    #[error("{0} is in check but it is not their turn")]
    NonPlayerInCheck(Color),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum ParseFenError {
    #[error("a row has fewer than 8 squares")]
    NotEnoughSquaresOnRow,
    #[error("a row has more than 8 squares")]
    ExceedingSquaresOnRow,
    #[error("expected 8 rows, found {0}")]
    RowCount(usize),
    #[error(transparent)]
    Piece(#[from] ParsePieceError),
    #[error(transparent)]
    Color(#[from] ParseColorError),
    #[error("missing piece placement")]
    Empty,
    #[error(transparent)]
    InvalidPosition(#[from] InvalidPosition),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Fen {
    pub board: Board,
    pub turn: Color,
}
impl Fen {
    pub fn starting_position() -> Self {
        Fen {
            board: Board::starting_position(),
            turn: Color::White,
        }
    }
    /// Rejects positions the engine cannot play from: a missing or extra
    /// king, pawns that should already have promoted, or a side left in check
    /// while the opponent is to move.
    pub fn validate(&self) -> Result<(), InvalidPosition> {
        for color in Color::ALL {
            let kings = self.board.count(Piece::new(color, PieceKind::King));
            if kings != 1 {
                return Err(InvalidPosition::KingCount(color, kings));
            }
        }
        for (position, piece) in self.board.pieces() {
            if piece.kind == PieceKind::Pawn
                && Color::ALL
                    .into_iter()
                    .any(|color| position.y() == home_rank(color))
            {
                return Err(InvalidPosition::PawnOnBackRank(piece.color));
            }
        }
        if is_in_check(&self.board, !self.turn) {
            return Err(InvalidPosition::NonPlayerInCheck(!self.turn));
        }
        Ok(())
    }
}
fn parse_row(row: &str) -> Result<[Option<Piece>; 8], ParseFenError> {
    let mut cells = [None; 8];
    let mut x = 0;
    for c in row.chars() {
        if let Some(skip) = c.to_digit(10).filter(|skip| (1..=8).contains(skip)) {
            x += skip as usize;
        } else {
            let piece = Piece::from_fen(c)?;
            *cells
                .get_mut(x)
                .ok_or(ParseFenError::ExceedingSquaresOnRow)? = Some(piece);
            x += 1;
        }
        if x > 8 {
            return Err(ParseFenError::ExceedingSquaresOnRow);
        }
    }
    if x < 8 {
        return Err(ParseFenError::NotEnoughSquaresOnRow);
    }
    Ok(cells)
}
impl FromStr for Fen {
    type Err = ParseFenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut fields = s.split_whitespace();
        let placement = fields.next().ok_or(ParseFenError::Empty)?;
        let rows: Vec<_> = placement.split('/').collect();
        if rows.len() != 8 {
            return Err(ParseFenError::RowCount(rows.len()));
        }
        let mut board = Board::empty();
        for (cells, row) in board.0.iter_mut().zip(rows) {
            *cells = parse_row(row)?;
        }
        let turn = fields
            .next()
            .map(str::parse::<Color>)
            .transpose()?
            .unwrap_or(Color::White);
        let fen = Fen { board, turn };
        fen.validate()?;
        Ok(fen)
    }
}
impl Display for Fen {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for y in 0..8 {
            if y != 0 {
                write!(f, "/")?;
            }
            let mut empty = 0;
            for x in 0..8 {
                match self.board[Coord::new(x, y)] {
                    Some(piece) => {
                        if empty > 0 {
                            write!(f, "{empty}")?;
                            empty = 0;
                        }
                        write!(f, "{}", piece.fen())?;
                    }
                    None => empty += 1,
                }
            }
            if empty > 0 {
                write!(f, "{empty}")?;
            }
        }
        write!(f, " {} - - 0 1", self.turn.lowercase())?;
        Ok(())
    }
}
#[cfg(test)]
mod test {
    use crate::{
        board::Board,
        color::Color,
        fen::{Fen, InvalidPosition, ParseFenError},
    };

    const STARTING_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w - - 0 1";

    #[test]
    fn starting_position_round_trips() {
        let fen: Fen = STARTING_FEN.parse().unwrap();
        assert_eq!(fen.board, Board::starting_position());
        assert_eq!(fen.turn, Color::White);
        assert_eq!(Fen::starting_position().to_string(), STARTING_FEN);
    }
    #[test]
    fn side_to_move_defaults_to_white() {
        let fen: Fen = "4k3/8/8/8/8/8/8/4K3".parse().unwrap();
        assert_eq!(fen.turn, Color::White);
        let fen: Fen = "4k3/8/8/8/8/8/8/4K3 b KQkq e3 0 1".parse().unwrap();
        assert_eq!(fen.turn, Color::Black);
    }
    #[test]
    fn malformed_rows_are_rejected() {
        assert_eq!(
            "4k3/8/8/8/8/8/8/4K2".parse::<Fen>(),
            Err(ParseFenError::NotEnoughSquaresOnRow)
        );
        assert_eq!(
            "4k4/8/8/8/8/8/8/4K3".parse::<Fen>(),
            Err(ParseFenError::ExceedingSquaresOnRow)
        );
        assert_eq!(
            "4k3/8/8/8/8/8/4K3".parse::<Fen>(),
            Err(ParseFenError::RowCount(7))
        );
        assert!("4k3/8/8/8/8/8/8/4X3".parse::<Fen>().is_err());
    }
    #[test]
    fn impossible_positions_are_rejected() {
        assert_eq!(
            "8/8/8/8/8/8/8/4K3".parse::<Fen>(),
            Err(InvalidPosition::KingCount(Color::Black, 0).into())
        );
        assert_eq!(
            "P3k3/8/8/8/8/8/8/4K3".parse::<Fen>(),
            Err(InvalidPosition::PawnOnBackRank(Color::White).into())
        );
        assert_eq!(
            "4k3/8/8/8/8/8/8/4R1K1 w".parse::<Fen>(),
            Err(InvalidPosition::NonPlayerInCheck(Color::Black).into())
        );
    }
}
