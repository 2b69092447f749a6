//! The single mutable game: board, side to move, history and captures.

use std::fmt::{self, Display, Formatter};

use thiserror::Error;
use tracing::{debug, info};

use crate::{
    board::Board,
    color::Color,
    coord::Coord,
    end_state::{EndState, Status},
    executor::{ExecutedMove, Move, execute},
    fen::Fen,
    legality::legal_destinations_from,
    movegen::Destinations,
    piece::Piece,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum MoveError {
    #[error("no piece found on {0}")]
    NoPiece(Coord),
    #[error("the piece on {position} is not {turn}'s")]
    WrongColor { position: Coord, turn: Color },
    #[error("{origin}{destination} is an invalid move")]
    IllegalDestination { origin: Coord, destination: Coord },
    #[error("the game is over")]
    GameOver,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoveOutcome {
    /// The position and turn are unchanged.
    Rejected(MoveError),
    Applied { next_turn: Color, check: bool },
    Checkmate { winner: Color },
    Stalemate,
}
impl Display for MoveOutcome {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            MoveOutcome::Rejected(err) => write!(f, "{err}")?,
            MoveOutcome::Applied {
                next_turn,
                check: false,
            } => write!(f, "{next_turn} plays")?,
            MoveOutcome::Applied {
                next_turn,
                check: true,
            } => write!(f, "{next_turn} is in check")?,
            MoveOutcome::Checkmate { winner } => {
                write!(f, "{}", EndState::Checkmate { winner: *winner })?;
            }
            MoveOutcome::Stalemate => write!(f, "{}", EndState::Stalemate)?,
        }
        Ok(())
    }
}

/// What a click on a square did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Click {
    Selected {
        origin: Coord,
        destinations: Destinations,
    },
    Ignored,
    Moved(MoveOutcome),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    board: Board,
    turn: Color,
    history: Vec<ExecutedMove>,
    captured: Vec<Piece>,
    end_state: Option<EndState>,
    selected: Option<Coord>,
    initial: Fen,
}
impl Default for GameState {
    fn default() -> Self {
        GameState::new()
    }
}
impl GameState {
    pub fn new() -> Self {
        GameState::from_fen(Fen::starting_position())
    }
    /// Starts from an already validated position.
    pub fn from_fen(fen: Fen) -> Self {
        let mut game = GameState {
            board: fen.board,
            turn: fen.turn,
            history: Vec::new(),
            captured: Vec::new(),
            end_state: None,
            selected: None,
            initial: fen,
        };
        game.end_state = match Status::of(&game.board, game.turn) {
            Status::Over(end_state) => Some(end_state),
            Status::Ongoing | Status::Check => None,
        };
        game
    }
    /// Back to the standard initial position with white to move.
    pub fn reset(&mut self) {
        *self = GameState::new();
        info!("game reset");
    }
    pub fn board(&self) -> &Board {
        &self.board
    }
    pub fn turn(&self) -> Color {
        self.turn
    }
    pub fn history(&self) -> &[ExecutedMove] {
        &self.history
    }
    pub fn captured(&self) -> &[Piece] {
        &self.captured
    }
    /// Pieces `color` has taken from the opponent, in capture order.
    pub fn captured_by(&self, color: Color) -> impl Iterator<Item = Piece> + '_ {
        self.captured
            .iter()
            .copied()
            .filter(move |piece| piece.color != color)
    }
    pub fn end_state(&self) -> Option<EndState> {
        self.end_state
    }
    pub fn selected(&self) -> Option<Coord> {
        self.selected
    }
    pub fn initial_position(&self) -> Fen {
        self.initial
    }
    pub fn fen(&self) -> Fen {
        Fen {
            board: self.board,
            turn: self.turn,
        }
    }
    pub fn status(&self) -> Status {
        match self.end_state {
            Some(end_state) => Status::Over(end_state),
            None => Status::of(&self.board, self.turn),
        }
    }
    /// Legal destinations of the piece on `position`, or nothing when it is
    /// not a piece of the side to move.
    pub fn select_piece(&self, position: Coord) -> Destinations {
        match self.board[position] {
            Some(piece) if piece.color == self.turn && self.end_state.is_none() => {
                legal_destinations_from(&self.board, position)
            }
            _ => Destinations::default(),
        }
    }
    /// Drops any pending click selection, whatever the outcome.
    pub fn attempt_move(&mut self, origin: Coord, destination: Coord) -> MoveOutcome {
        self.selected = None;
        match self.try_move(Move::new(origin, destination)) {
            Ok(outcome) => outcome,
            Err(err) => {
                debug!(%origin, %destination, %err, "move rejected");
                MoveOutcome::Rejected(err)
            }
        }
    }
    fn try_move(&mut self, movement: Move) -> Result<MoveOutcome, MoveError> {
        if self.end_state.is_some() {
            return Err(MoveError::GameOver);
        }
        let piece = self.board[movement.origin].ok_or(MoveError::NoPiece(movement.origin))?;
        if piece.color != self.turn {
            return Err(MoveError::WrongColor {
                position: movement.origin,
                turn: self.turn,
            });
        }
        if !legal_destinations_from(&self.board, movement.origin).contains(&movement.destination)
        {
            return Err(MoveError::IllegalDestination {
                origin: movement.origin,
                destination: movement.destination,
            });
        }
        let executed = execute(&mut self.board, movement);
        debug!(
            piece = %executed.piece,
            origin = %movement.origin,
            destination = %movement.destination,
            captured = ?executed.captured,
            promotion = executed.promotion,
            "move applied"
        );
        if let Some(captured) = executed.captured {
            self.captured.push(captured);
        }
        self.history.push(executed);

        let opponent = !self.turn;
        let outcome = match Status::of(&self.board, opponent) {
            Status::Over(end_state) => {
                info!(%end_state, "game over");
                self.end_state = Some(end_state);
                match end_state {
                    EndState::Checkmate { winner } => MoveOutcome::Checkmate { winner },
                    EndState::Stalemate => MoveOutcome::Stalemate,
                }
            }
            Status::Check => {
                info!(color = %opponent, "king is in check");
                self.turn = opponent;
                MoveOutcome::Applied {
                    next_turn: opponent,
                    check: true,
                }
            }
            Status::Ongoing => {
                self.turn = opponent;
                MoveOutcome::Applied {
                    next_turn: opponent,
                    check: false,
                }
            }
        };
        Ok(outcome)
    }
    /// Square-click handling: the first click picks a piece of the side to
    /// move, the next one tries to move it there. The selection is dropped
    /// after every attempt.
    pub fn click(&mut self, position: Coord) -> Click {
        if let Some(origin) = self.selected.take() {
            return Click::Moved(self.attempt_move(origin, position));
        }
        match self.board[position] {
            Some(piece) if piece.color == self.turn && self.end_state.is_none() => {
                self.selected = Some(position);
                Click::Selected {
                    origin: position,
                    destinations: self.select_piece(position),
                }
            }
            _ => Click::Ignored,
        }
    }
}

/// Rebuilds a board by playing `history` from `initial`.
pub fn replay(initial: Board, history: &[ExecutedMove]) -> Board {
    let mut board = initial;
    for executed in history {
        execute(&mut board, executed.movement);
    }
    board
}
