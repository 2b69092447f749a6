//! Chess move legality and game termination on a plain 8×8 board.
//!
//! Castling, en passant, under-promotion and draw rules other than stalemate
//! are not part of the game played here.

#![forbid(unsafe_code)]
#![warn(clippy::pedantic)]
#![allow(
    clippy::must_use_candidate,
    clippy::missing_errors_doc,
    reason = "internal crate"
)]

pub mod board;
pub mod board_display;
pub mod check;
pub mod color;
pub mod config;
pub mod coord;
pub mod end_state;
pub mod executor;
pub mod fen;
pub mod fuzz;
pub mod game;
pub mod legality;
pub mod movegen;
pub mod piece;
pub mod repl;

pub use crate::{
    board::Board,
    color::Color,
    coord::Coord,
    end_state::{EndState, Status},
    executor::{ExecutedMove, Move},
    fen::Fen,
    game::{Click, GameState, MoveError, MoveOutcome},
    piece::{Piece, PieceKind},
};
