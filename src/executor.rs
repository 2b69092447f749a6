use std::{
    fmt::{self, Display, Formatter},
    str::FromStr,
};

use thiserror::Error;

use crate::{
    board::Board,
    coord::{Coord, ParseCoordError, pawn_promotion_rank},
    piece::{Piece, PieceKind},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum ParseMoveError {
    #[error("a move is written as two squares, like `e2e4`")]
    InvalidLength,
    #[error(transparent)]
    Coord(#[from] ParseCoordError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    pub origin: Coord,
    pub destination: Coord,
}
impl Move {
    pub fn new(origin: Coord, destination: Coord) -> Self {
        Move {
            origin,
            destination,
        }
    }
}
impl Display for Move {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.origin, self.destination)?;
        Ok(())
    }
}
impl FromStr for Move {
    type Err = ParseMoveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() < 4 {
            return Err(ParseMoveError::InvalidLength);
        }
        let origin = s.get(0..2).ok_or(ParseMoveError::InvalidLength)?.parse()?;
        let destination = s.get(2..).ok_or(ParseMoveError::InvalidLength)?.parse()?;
        Ok(Move {
            origin,
            destination,
        })
    }
}

/// A move after it was played, with what it did to the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ExecutedMove {
    pub movement: Move,
    /// The piece as it stood on the origin, before any promotion.
    pub piece: Piece,
    pub captured: Option<Piece>,
    pub promotion: bool,
}
impl ExecutedMove {
    pub fn origin(self) -> Coord {
        self.movement.origin
    }
    pub fn destination(self) -> Coord {
        self.movement.destination
    }
}
impl Display for ExecutedMove {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} → {}",
            self.piece, self.movement.origin, self.movement.destination
        )?;
        Ok(())
    }
}

/// Plays `movement` without checking that it is legal.
///
/// # Panics
///
/// Panics when the origin is empty.
pub fn execute(board: &mut Board, movement: Move) -> ExecutedMove {
    let Move {
        origin,
        destination,
    } = movement;
    let piece = board[origin]
        .take()
        .unwrap_or_else(|| panic!("no piece to move on {origin}"));
    let captured = board[destination].take();
    let promotion =
        piece.kind == PieceKind::Pawn && destination.y() == pawn_promotion_rank(piece.color);
    board[destination] = Some(if promotion {
        Piece::new(piece.color, PieceKind::PROMOTION)
    } else {
        piece
    });
    ExecutedMove {
        movement,
        piece,
        captured,
        promotion,
    }
}
#[cfg(test)]
mod test {
    use crate::{
        board::Board,
        color::Color,
        coord,
        executor::{Move, ParseMoveError, execute},
        fen::Fen,
        piece::{Piece, PieceKind},
    };

    #[test]
    fn quiet_move_relocates_piece() {
        let mut board = Board::starting_position();
        let executed = execute(&mut board, "g1f3".parse().unwrap());
        assert_eq!(board[coord!("g1")], None);
        assert_eq!(
            board[coord!("f3")],
            Some(Piece::new(Color::White, PieceKind::Knight))
        );
        assert_eq!(executed.captured, None);
        assert!(!executed.promotion);
        assert_eq!(executed.to_string(), "white knight g1 → f3");
    }
    #[test]
    fn capture_reports_the_captured_piece() {
        let mut board = "4k3/8/8/3p4/4P3/8/8/4K3 w"
            .parse::<Fen>()
            .unwrap()
            .board;
        let executed = execute(&mut board, Move::new(coord!("e4"), coord!("d5")));
        assert_eq!(
            executed.captured,
            Some(Piece::new(Color::Black, PieceKind::Pawn))
        );
        assert_eq!(board[coord!("e4")], None);
        assert_eq!(board.pieces().count(), 3);
    }
    #[test]
    fn pawn_on_last_rank_becomes_queen() {
        let mut board = "1r2k3/P7/8/8/8/8/8/4K3 w".parse::<Fen>().unwrap().board;
        let executed = execute(&mut board, Move::new(coord!("a7"), coord!("b8")));
        assert!(executed.promotion);
        assert_eq!(executed.piece.kind, PieceKind::Pawn);
        assert_eq!(
            board[coord!("b8")],
            Some(Piece::new(Color::White, PieceKind::Queen))
        );
        assert_eq!(board[coord!("a7")], None);

        let mut board = "4k3/8/8/8/8/8/5p2/K7 b".parse::<Fen>().unwrap().board;
        execute(&mut board, Move::new(coord!("f2"), coord!("f1")));
        assert_eq!(
            board[coord!("f1")],
            Some(Piece::new(Color::Black, PieceKind::Queen))
        );
    }
    #[test]
    fn move_notation_parses_two_squares() {
        assert_eq!(
            "e2e4".parse::<Move>(),
            Ok(Move::new(coord!("e2"), coord!("e4")))
        );
        assert_eq!("e2".parse::<Move>(), Err(ParseMoveError::InvalidLength));
        assert!("e2e9".parse::<Move>().is_err());
        assert!("e2e4q".parse::<Move>().is_err());
    }
}
