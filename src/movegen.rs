//! Geometric move generation. Nothing here looks at king safety; see
//! [`crate::legality`] for that.

use rustc_hash::FxHashSet;

use crate::{
    board::Board,
    color::Color,
    coord::{Coord, Vector, pawn_home_rank},
    piece::{Piece, PieceKind},
};

pub type Destinations = FxHashSet<Coord>;

/// Destinations reachable by `piece` standing on `origin`, ignoring whether
/// the move exposes its own king.
pub fn pseudo_destinations(board: &Board, piece: Piece, origin: Coord) -> Destinations {
    let mut destinations = Destinations::default();
    match piece.kind {
        PieceKind::Pawn => destinations.extend(pawn_moves(board, piece.color, origin)),
        PieceKind::Knight => {
            destinations.extend(step_moves(board, piece.color, origin, &Vector::KNIGHT_MOVES));
        }
        PieceKind::Bishop => destinations.extend(all_directional_moves(
            board,
            piece.color,
            origin,
            &Vector::BISHOP_DIRECTIONS,
        )),
        PieceKind::Rook => destinations.extend(all_directional_moves(
            board,
            piece.color,
            origin,
            &Vector::ROOK_DIRECTIONS,
        )),
        PieceKind::Queen => destinations.extend(all_directional_moves(
            board,
            piece.color,
            origin,
            &Vector::QUEEN_DIRECTIONS,
        )),
        PieceKind::King => {
            destinations.extend(step_moves(board, piece.color, origin, &Vector::KING_MOVES));
        }
    }
    destinations
}
fn step_moves<'a>(
    board: &'a Board,
    color: Color,
    origin: Coord,
    moves: &'a [Vector],
) -> impl Iterator<Item = Coord> + 'a {
    moves
        .iter()
        .copied()
        .filter_map(move |movement| origin.move_by(movement))
        .filter(move |destination| board[*destination].is_none_or(|piece| piece.color != color))
}
fn directional_moves(
    board: &Board,
    color: Color,
    origin: Coord,
    direction: Vector,
) -> impl Iterator<Item = Coord> + '_ {
    let mut resume = true;
    origin.line_exclusive(direction).map_while(move |destination| {
        if !resume {
            return None;
        }
        match board[destination] {
            None => Some(Some(destination)),
            Some(piece) => {
                resume = false;
                Some((piece.color != color).then_some(destination))
            }
        }
    })
    .flatten()
}
fn all_directional_moves<'a>(
    board: &'a Board,
    color: Color,
    origin: Coord,
    directions: &'a [Vector],
) -> impl Iterator<Item = Coord> + 'a {
    directions
        .iter()
        .copied()
        .flat_map(move |direction| directional_moves(board, color, origin, direction))
}
fn pawn_moves(board: &Board, color: Color, origin: Coord) -> impl Iterator<Item = Coord> + '_ {
    let forward_jumps = if origin.y() == pawn_home_rank(color) {
        2
    } else {
        1
    };
    origin
        .line_exclusive(Vector::pawn_single_move(color))
        .take(forward_jumps)
        .take_while(move |position| board.is_empty_at(*position))
        .chain(
            Vector::pawn_attacks(color)
                .into_iter()
                .filter_map(move |movement| origin.move_by(movement))
                .filter(move |destination| board.is_enemy_of(*destination, color)),
        )
}
