//! Random playouts cross-checked against the `chess` crate's move generator.

use rand::{Rng, SeedableRng, rngs::StdRng};
use rustc_hash::FxHashSet;
use thiserror::Error;
use tracing::{debug, info};

use crate::{
    board::Board,
    board_display::BoardDisplay,
    coord::Coord,
    executor::Move,
    fen::Fen,
    game::{GameState, MoveOutcome},
    legality::legal_destinations,
    movegen::pseudo_destinations,
};

/// Games longer than this are abandoned so more openings get explored.
const MAX_GAME_LENGTH: usize = 300;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FuzzError {
    #[error("found {movement} but it's not a legal move\n{board}{fen}")]
    Extra {
        movement: Move,
        board: String,
        fen: String,
    },
    #[error("{movement} not found\n{board}{fen}")]
    Missing {
        movement: Move,
        board: String,
        fen: String,
    },
    #[error("{movement} lands on a piece of the same color\n{fen}")]
    OwnPiece { movement: Move, fen: String },
    #[error("the reference generator rejected {fen}")]
    Unreadable { fen: String },
    #[error("{movement} was generated but rejected: {outcome}")]
    Inconsistent {
        movement: Move,
        outcome: MoveOutcome,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FuzzReport {
    pub plies: u64,
    pub games: u64,
    pub checkmates: u64,
    pub stalemates: u64,
}

fn coord_of(square: chess::Square) -> Coord {
    Coord::new(
        square.get_file().to_index().try_into().unwrap(),
        (7 - square.get_rank().to_index()).try_into().unwrap(),
    )
}
/// Under-promotions collapse into a single move since pawns always become
/// queens here.
fn move_of(movement: chess::ChessMove) -> Move {
    Move::new(
        coord_of(movement.get_source()),
        coord_of(movement.get_dest()),
    )
}
fn legal_moves(game: &GameState) -> FxHashSet<Move> {
    game.board()
        .pieces_of(game.turn())
        .flat_map(|(origin, piece)| {
            legal_destinations(game.board(), piece, origin)
                .into_iter()
                .map(move |destination| Move::new(origin, destination))
        })
        .collect()
}
/// A generated move of either side that lands on its own piece.
fn own_piece_landing(board: &Board) -> Option<Move> {
    board.pieces().find_map(|(origin, piece)| {
        pseudo_destinations(board, piece, origin)
            .into_iter()
            .find(|destination| board[*destination].is_some_and(|other| other.color == piece.color))
            .map(|destination| Move::new(origin, destination))
    })
}
fn reference_moves(fen: &Fen) -> Result<FxHashSet<Move>, FuzzError> {
    let board: chess::Board = fen
        .to_string()
        .parse()
        .map_err(|_| FuzzError::Unreadable {
            fen: fen.to_string(),
        })?;
    Ok(chess::MoveGen::new_legal(&board).map(move_of).collect())
}

/// Plays `plies` random moves, comparing every position's legal moves with
/// the reference generator. Every position is also checked for generated
/// moves landing on a piece of the mover's own color. A finished game starts over from the initial
/// position.
pub fn fuzz(plies: u64, seed: u64) -> Result<FuzzReport, FuzzError> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut game = GameState::new();
    let mut report = FuzzReport {
        games: 1,
        ..FuzzReport::default()
    };
    while report.plies < plies {
        if game.end_state().is_some() || game.history().len() >= MAX_GAME_LENGTH {
            debug!(length = game.history().len(), "starting a new game");
            game.reset();
            report.games += 1;
        }
        let fen = game.fen();
        if let Some(movement) = own_piece_landing(game.board()) {
            return Err(FuzzError::OwnPiece {
                movement,
                fen: fen.to_string(),
            });
        }
        let moves = legal_moves(&game);
        let expected = reference_moves(&fen)?;
        let display = || {
            BoardDisplay {
                plain: true,
                ..BoardDisplay::new(game.board())
            }
            .to_string()
        };
        if let Some(movement) = moves.difference(&expected).next() {
            return Err(FuzzError::Extra {
                movement: *movement,
                board: display(),
                fen: fen.to_string(),
            });
        }
        if let Some(movement) = expected.difference(&moves).next() {
            return Err(FuzzError::Missing {
                movement: *movement,
                board: display(),
                fen: fen.to_string(),
            });
        }
        let mut moves: Vec<_> = moves.into_iter().collect();
        moves.sort_unstable_by_key(|movement| (movement.origin, movement.destination));
        let movement = moves[rng.random_range(0..moves.len())];
        match game.attempt_move(movement.origin, movement.destination) {
            outcome @ MoveOutcome::Rejected(_) => {
                return Err(FuzzError::Inconsistent { movement, outcome });
            }
            MoveOutcome::Checkmate { .. } => report.checkmates += 1,
            MoveOutcome::Stalemate => report.stalemates += 1,
            MoveOutcome::Applied { .. } => (),
        }
        report.plies += 1;
    }
    info!(?report, "fuzzing finished");
    Ok(report)
}
