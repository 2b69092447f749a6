//! King-safety filtering on top of [`crate::movegen`].

use std::ops::Deref;

use tracing::trace;

use crate::{
    board::Board,
    check::is_in_check,
    coord::Coord,
    movegen::{Destinations, pseudo_destinations},
    piece::Piece,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KingSafety {
    Enforce,
    /// Raw geometry only. The check oracle relies on this to avoid asking
    /// about check while computing check.
    Skip,
}

/// A hypothetical move played on a board. The two touched squares are put
/// back when this is dropped.
struct Simulation<'a> {
    board: &'a mut Board,
    origin: Coord,
    destination: Coord,
    moved: Option<Piece>,
    displaced: Option<Piece>,
}
impl<'a> Simulation<'a> {
    fn apply(board: &'a mut Board, origin: Coord, destination: Coord) -> Self {
        let moved = board[origin].take();
        let displaced = board[destination];
        board[destination] = moved;
        Simulation {
            board,
            origin,
            destination,
            moved,
            displaced,
        }
    }
}
impl Deref for Simulation<'_> {
    type Target = Board;

    fn deref(&self) -> &Self::Target {
        self.board
    }
}
impl Drop for Simulation<'_> {
    fn drop(&mut self) {
        self.board[self.destination] = self.displaced;
        self.board[self.origin] = self.moved;
    }
}

pub fn generate(board: &Board, piece: Piece, origin: Coord, safety: KingSafety) -> Destinations {
    match safety {
        KingSafety::Enforce => legal_destinations(board, piece, origin),
        KingSafety::Skip => pseudo_destinations(board, piece, origin),
    }
}
/// Destinations of `piece` on `origin` that do not leave its own king in
/// check. Always a subset of [`pseudo_destinations`].
pub fn legal_destinations(board: &Board, piece: Piece, origin: Coord) -> Destinations {
    let mut destinations = pseudo_destinations(board, piece, origin);
    let mut scratch = *board;
    destinations.retain(|destination| {
        let simulation = Simulation::apply(&mut scratch, origin, *destination);
        let exposed = is_in_check(&simulation, piece.color);
        if exposed {
            trace!(%piece, %origin, %destination, "discarded, king would be in check");
        }
        !exposed
    });
    debug_assert_eq!(scratch, *board, "simulation leaked into the board");
    destinations
}
/// Legal destinations of whatever stands on `origin`; empty when the square
/// is empty.
pub fn legal_destinations_from(board: &Board, origin: Coord) -> Destinations {
    board[origin]
        .map(|piece| legal_destinations(board, piece, origin))
        .unwrap_or_default()
}
