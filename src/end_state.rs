use std::fmt::{self, Display, Formatter};

use crate::{board::Board, check::is_in_check, color::Color, legality::legal_destinations};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EndState {
    Checkmate { winner: Color },
    Stalemate,
}
impl Display for EndState {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            EndState::Checkmate { winner } => write!(f, "{winner} wins by checkmate")?,
            EndState::Stalemate => write!(f, "stalemate, the game is a draw")?,
        }
        Ok(())
    }
}

/// Situation of the side about to move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Status {
    Ongoing,
    Check,
    Over(EndState),
}
impl Status {
    pub fn of(board: &Board, color: Color) -> Self {
        let check = is_in_check(board, color);
        match (check, has_any_legal_move(board, color)) {
            (false, true) => Status::Ongoing,
            (true, true) => Status::Check,
            (true, false) => Status::Over(EndState::Checkmate { winner: !color }),
            (false, false) => Status::Over(EndState::Stalemate),
        }
    }
}

pub fn has_any_legal_move(board: &Board, color: Color) -> bool {
    board
        .pieces_of(color)
        .any(|(position, piece)| !legal_destinations(board, piece, position).is_empty())
}
pub fn is_checkmate(board: &Board, color: Color) -> bool {
    is_in_check(board, color) && !has_any_legal_move(board, color)
}
pub fn is_stalemate(board: &Board, color: Color) -> bool {
    !is_in_check(board, color) && !has_any_legal_move(board, color)
}
#[cfg(test)]
mod test {
    use crate::{
        board::Board,
        color::Color,
        end_state::{EndState, Status, has_any_legal_move, is_checkmate, is_stalemate},
        fen::Fen,
    };

    fn board(fen: &str) -> Board {
        fen.parse::<Fen>().unwrap().board
    }

    #[test]
    fn back_rank_mate() {
        let quiet = board("6k1/5ppp/8/8/8/8/8/R5K1 b");
        assert!(!is_checkmate(&quiet, Color::Black));
        let board = board("R5k1/5ppp/8/8/8/8/8/6K1 b");
        assert!(is_checkmate(&board, Color::Black));
        assert!(!is_stalemate(&board, Color::Black));
        assert_eq!(
            Status::of(&board, Color::Black),
            Status::Over(EndState::Checkmate {
                winner: Color::White
            })
        );
    }
    #[test]
    fn king_in_corner_stalemate() {
        let board = board("k7/2K5/1Q6/8/8/8/8/8 b");
        assert!(is_stalemate(&board, Color::Black));
        assert!(!is_checkmate(&board, Color::Black));
        assert_eq!(
            Status::of(&board, Color::Black),
            Status::Over(EndState::Stalemate)
        );
    }
    #[test]
    fn king_and_pawn_stalemate() {
        let board = board("6k1/6P1/6K1/8/8/8/8/8 b");
        assert!(!has_any_legal_move(&board, Color::Black));
        assert!(is_stalemate(&board, Color::Black));
    }
    #[test]
    fn check_with_escape_is_not_mate() {
        let board = board("4k3/8/8/8/8/8/8/4R1K1 b");
        assert_eq!(Status::of(&board, Color::Black), Status::Check);
    }
    #[test]
    fn starting_position_is_ongoing() {
        let board = Board::starting_position();
        for color in Color::ALL {
            assert_eq!(Status::of(&board, color), Status::Ongoing);
        }
    }
    #[test]
    fn mate_and_stalemate_are_exclusive() {
        for fen in [
            "R5k1/5ppp/8/8/8/8/8/6K1 b",
            "k7/2K5/1Q6/8/8/8/8/8 b",
            "4k3/8/8/8/8/8/8/4R1K1 b",
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w",
        ] {
            let board = board(fen);
            for color in Color::ALL {
                assert!(!(is_checkmate(&board, color) && is_stalemate(&board, color)));
            }
        }
    }
}
