use std::{
    fmt::{self, Display, Formatter},
    io::{self, BufRead, Write},
    str::FromStr,
};

use thiserror::Error;
use tracing::debug;

use crate::{
    board_display::BoardDisplay,
    color::Color,
    coord::Coord,
    executor::{Move, ParseMoveError},
    fen::{Fen, ParseFenError},
    game::{Click, GameState, MoveError, MoveOutcome},
    piece::Piece,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Input {
    Help,
    Flip,
    Restart,
    Quit,
    Import(Fen),
    ExportFen,
    History,
    Captured,
    Coord(Coord),
    Move(Move),
}
impl Display for Input {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Input::Help => write!(f, "help")?,
            Input::Flip => write!(f, "flip")?,
            Input::Restart => write!(f, "restart")?,
            Input::Quit => write!(f, "quit")?,
            Input::Import(fen) => write!(f, "import {fen}")?,
            Input::ExportFen => write!(f, "fen")?,
            Input::History => write!(f, "history")?,
            Input::Captured => write!(f, "captured")?,
            Input::Coord(position) => write!(f, "{position}")?,
            Input::Move(movement) => write!(f, "{movement}")?,
        }
        Ok(())
    }
}
impl FromStr for Input {
    type Err = ParseInputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "help" => Ok(Input::Help),
            "flip" => Ok(Input::Flip),
            "restart" | "reset" => Ok(Input::Restart),
            "quit" | "exit" => Ok(Input::Quit),
            "fen" => Ok(Input::ExportFen),
            "history" => Ok(Input::History),
            "captured" => Ok(Input::Captured),
            s => {
                if let Some(s) = strip_prefix_token(s, "import") {
                    Ok(Input::Import(s.parse()?))
                } else if let Ok(position) = s.parse() {
                    Ok(Input::Coord(position))
                } else {
                    Ok(Input::Move(s.parse()?))
                }
            }
        }
    }
}
fn strip_prefix_token<'a>(src: &'a str, search: &str) -> Option<&'a str> {
    src.strip_prefix(search)
        .filter(|src| src.chars().next().is_none_or(char::is_whitespace))
        .map(str::trim_start)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
enum ParseInputError {
    #[error(transparent)]
    Fen(#[from] ParseFenError),
    #[error(transparent)]
    Move(#[from] ParseMoveError),
}

const HELP: &str = "\
flip           - flip the board
restart        - reset to starting position
quit           - quit the game
import <fen>   - import a position
fen            - export the position as fen
history        - list the moves played
captured       - list the captured pieces
e2             - view valid moves, then a square to move there
e2e4           - play the move";

/// Options for an interactive session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Options {
    pub view: Color,
    pub plain: bool,
    pub fen: Fen,
}
impl Default for Options {
    fn default() -> Self {
        Options {
            view: Color::White,
            plain: false,
            fen: Fen::starting_position(),
        }
    }
}

fn describe(pieces: impl Iterator<Item = Piece>) -> String {
    let pieces: Vec<_> = pieces.map(|piece| piece.figurine().to_string()).collect();
    if pieces.is_empty() {
        "none".to_owned()
    } else {
        pieces.join(" ")
    }
}

/// Runs the command loop until `quit` or the end of `input`.
#[allow(
    clippy::too_many_lines,
    reason = "further decomposition could potentially hurt readability"
)]
pub fn repl(
    input: impl BufRead,
    mut output: impl Write,
    mut error: impl Write,
    options: Options,
) -> io::Result<()> {
    let mut lines = input.lines();

    let mut game = GameState::from_fen(options.fen);
    let mut info = String::new();
    let mut highlighted = Vec::new();
    let mut update = true;
    let mut view = options.view;
    let mut first_time = true;
    loop {
        if update {
            info = match game.end_state() {
                Some(end_state) => format!("{end_state}\n"),
                None => format!("{} plays\n", game.turn()),
            };
        }
        if first_time {
            info.push_str("type `help` for instructions\n");
            first_time = false;
        }
        update = false;
        writeln!(
            output,
            "{}",
            BoardDisplay {
                board: game.board(),
                view,
                highlighted: &highlighted,
                info: &info,
                plain: options.plain,
            },
        )?;
        loop {
            write!(output, "> ")?;
            output.flush()?;
            let Some(text) = lines.next().transpose()? else {
                return Ok(());
            };
            let text = text.trim();
            if text.is_empty() {
                continue;
            }
            let input = match text.parse() {
                Ok(input) => input,
                Err(err) => {
                    writeln!(error, "Error: {err}")?;
                    writeln!(error, "for available command, enter `help`")?;
                    continue;
                }
            };
            debug!(%input, "command");
            let outcome = match input {
                Input::Help => {
                    writeln!(output, "{HELP}")?;
                    continue;
                }
                Input::Flip => {
                    view = !view;
                    None
                }
                Input::Restart => {
                    game.reset();
                    update = true;
                    highlighted.clear();
                    None
                }
                Input::Quit => return Ok(()),
                Input::Import(fen) => {
                    game = GameState::from_fen(fen);
                    update = true;
                    highlighted.clear();
                    None
                }
                Input::ExportFen => {
                    writeln!(output, "{}", game.fen())?;
                    continue;
                }
                Input::History => {
                    for (i, executed) in game.history().iter().enumerate() {
                        writeln!(output, "{}. {executed}", i + 1)?;
                    }
                    continue;
                }
                Input::Captured => {
                    for color in Color::ALL {
                        writeln!(output, "{color}: {}", describe(game.captured_by(color)))?;
                    }
                    continue;
                }
                Input::Coord(position) => match game.click(position) {
                    Click::Selected { destinations, .. } => {
                        highlighted.clear();
                        highlighted.extend(destinations);
                        None
                    }
                    Click::Ignored => {
                        let err = match game.board()[position] {
                            _ if game.end_state().is_some() => MoveError::GameOver,
                            Some(_) => MoveError::WrongColor {
                                position,
                                turn: game.turn(),
                            },
                            None => MoveError::NoPiece(position),
                        };
                        writeln!(error, "Error: {err}")?;
                        continue;
                    }
                    Click::Moved(outcome) => Some(outcome),
                },
                Input::Move(movement) => {
                    Some(game.attempt_move(movement.origin, movement.destination))
                }
            };
            match outcome {
                Some(MoveOutcome::Rejected(err)) => {
                    highlighted.clear();
                    writeln!(error, "Error: {err}")?;
                    continue;
                }
                Some(_) => {
                    highlighted.clear();
                    if let Some(executed) = game.history().last() {
                        highlighted.push(executed.origin());
                        highlighted.push(executed.destination());
                    }
                    update = true;
                }
                None => (),
            }
            break;
        }
    }
}
#[cfg(test)]
mod test {
    use std::io::Cursor;

    use crate::repl::{Input, Options, repl};

    fn run(commands: &str) -> (String, String) {
        let mut output = Vec::new();
        let mut error = Vec::new();
        let options = Options {
            plain: true,
            ..Options::default()
        };
        repl(Cursor::new(commands), &mut output, &mut error, options).unwrap();
        (
            String::from_utf8(output).unwrap(),
            String::from_utf8(error).unwrap(),
        )
    }

    #[test]
    fn parses_commands() {
        assert_eq!("reset".parse(), Ok(Input::Restart));
        assert_eq!("exit".parse(), Ok(Input::Quit));
        assert!(matches!("e2".parse(), Ok(Input::Coord(_))));
        assert!(matches!("e2e4".parse(), Ok(Input::Move(_))));
        assert!(matches!(
            "import 4k3/8/8/8/8/8/8/4K3 b".parse(),
            Ok(Input::Import(_))
        ));
        assert!("importe2e4".parse::<Input>().is_err());
        assert!("castle".parse::<Input>().is_err());
    }
    #[test]
    fn plays_moves_and_exports_fen() {
        let (output, error) = run("e2e4\ne7e5\nfen\nhistory\nquit\n");
        assert_eq!(error, "");
        assert!(output.contains("rnbqkbnr/pppp1ppp/8/4p3/4P3/8/PPPP1PPP/RNBQKBNR w - - 0 1"));
        assert!(output.contains("1. white pawn e2 → e4"));
        assert!(output.contains("2. black pawn e7 → e5"));
    }
    #[test]
    fn reports_rejected_moves() {
        let (_, error) = run("e2e5\ne7e5\ne4\nzz\n");
        let lines: Vec<_> = error.lines().collect();
        assert_eq!(lines[0], "Error: e2e5 is an invalid move");
        assert_eq!(lines[1], "Error: the piece on e7 is not white's");
        assert_eq!(lines[2], "Error: no piece found on e4");
        assert!(lines[3].starts_with("Error: "));
    }
    #[test]
    fn select_then_move_by_squares() {
        let (output, error) = run("g1\nf3\nfen\n");
        assert_eq!(error, "");
        assert!(output.contains(". . . . . * . * 3"));
        assert!(output.contains("rnbqkbnr/pppppppp/8/8/8/5N2/PPPPPPPP/RNBQKB1R b - - 0 1"));
    }
    #[test]
    fn typed_move_clears_a_pending_selection() {
        let (output, error) = run("e2\ne7e5\nd2\nd4\nfen\n");
        assert_eq!(error, "Error: the piece on e7 is not white's\n");
        assert!(output.contains("rnbqkbnr/pppppppp/8/8/3P4/8/PPP1PPPP/RNBQKBNR b - - 0 1"));
    }
    #[test]
    fn announces_checkmate() {
        let (output, error) = run("f2f3\ne7e5\ng2g4\nd8h4\na2a3\ncaptured\n");
        assert!(output.contains("black wins by checkmate"));
        assert_eq!(error, "Error: the game is over\n");
        assert!(output.contains("white: none"));
    }
    #[test]
    fn import_and_restart() {
        let (output, error) = run("import 4k3/8/8/8/8/8/8/4K3 b\nfen\nrestart\nfen\n");
        assert_eq!(error, "");
        assert!(output.contains("4k3/8/8/8/8/8/8/4K3 b - - 0 1"));
        assert!(output.contains("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w - - 0 1"));
    }
}
