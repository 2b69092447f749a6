use crate::{board::Board, color::Color, coord::Coord, movegen::pseudo_destinations};

/// Square of `color`'s king.
///
/// # Panics
///
/// Panics when `color` has no king. Positions built through the public API
/// always have one, so reaching this is a bug in move application.
pub fn king_position(board: &Board, color: Color) -> Coord {
    board
        .king_of(color)
        .unwrap_or_else(|| panic!("no {color} king on the board"))
}
/// Whether any piece of `attacker` could move onto `target`, king safety
/// aside.
pub fn is_attacked_by(board: &Board, target: Coord, attacker: Color) -> bool {
    board
        .pieces_of(attacker)
        .any(|(position, piece)| pseudo_destinations(board, piece, position).contains(&target))
}
pub fn is_in_check(board: &Board, color: Color) -> bool {
    is_attacked_by(board, king_position(board, color), !color)
}
