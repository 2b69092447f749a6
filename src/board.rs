use std::ops::{Index, IndexMut};

use crate::{
    color::Color,
    coord::Coord,
    piece::{Piece, PieceKind},
};

/// The 8×8 grid of occupants, indexed by `[row][column]`.
///
/// Cells are replaced wholesale; a `Piece` is never edited in place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Board(pub [[Option<Piece>; 8]; 8]);

impl Board {
    pub fn empty() -> Self {
        Board([[None; 8]; 8])
    }
    pub fn starting_position() -> Self {
        let back_rank =
            |color| PieceKind::STARTING_CONFIGURATION.map(|kind| Some(Piece::new(color, kind)));
        let pawns = |color| [Some(Piece::new(color, PieceKind::Pawn)); 8];
        Board([
            back_rank(Color::Black),
            pawns(Color::Black),
            [None; 8],
            [None; 8],
            [None; 8],
            [None; 8],
            pawns(Color::White),
            back_rank(Color::White),
        ])
    }
    /// Occupied squares, row by row starting at a8.
    pub fn pieces(&self) -> impl Iterator<Item = (Coord, Piece)> + '_ {
        Coord::all().filter_map(|position| self[position].map(|piece| (position, piece)))
    }
    pub fn pieces_of(&self, color: Color) -> impl Iterator<Item = (Coord, Piece)> + '_ {
        self.pieces().filter(move |(_, piece)| piece.color == color)
    }
    pub fn king_of(&self, color: Color) -> Option<Coord> {
        self.pieces_of(color)
            .find(|(_, piece)| piece.kind == PieceKind::King)
            .map(|(position, _)| position)
    }
    pub fn count(&self, piece: Piece) -> usize {
        self.pieces().filter(|(_, other)| *other == piece).count()
    }
    pub fn is_enemy_of(&self, position: Coord, color: Color) -> bool {
        self[position].is_some_and(|piece| piece.color != color)
    }
    pub fn is_empty_at(&self, position: Coord) -> bool {
        self[position].is_none()
    }
}
impl Index<Coord> for Board {
    type Output = Option<Piece>;

    fn index(&self, index: Coord) -> &Self::Output {
        &self.0[index.y() as usize][index.x() as usize]
    }
}
impl IndexMut<Coord> for Board {
    fn index_mut(&mut self, index: Coord) -> &mut Self::Output {
        &mut self.0[index.y() as usize][index.x() as usize]
    }
}
#[cfg(test)]
mod test {
    use crate::{
        board::Board,
        color::Color,
        coord,
        piece::{Piece, PieceKind},
    };

    #[test]
    fn starting_position_layout() {
        let board = Board::starting_position();
        assert_eq!(board.pieces().count(), 32);
        assert_eq!(
            board[coord!("e1")],
            Some(Piece::new(Color::White, PieceKind::King))
        );
        assert_eq!(
            board[coord!("d8")],
            Some(Piece::new(Color::Black, PieceKind::Queen))
        );
        assert_eq!(
            board[coord!("a7")],
            Some(Piece::new(Color::Black, PieceKind::Pawn))
        );
        assert_eq!(board[coord!("e4")], None);
        assert_eq!(board.count(Piece::new(Color::White, PieceKind::Pawn)), 8);
    }
    #[test]
    fn finds_each_king() {
        let board = Board::starting_position();
        assert_eq!(board.king_of(Color::White), Some(coord!("e1")));
        assert_eq!(board.king_of(Color::Black), Some(coord!("e8")));
        assert_eq!(Board::empty().king_of(Color::White), None);
    }
}
