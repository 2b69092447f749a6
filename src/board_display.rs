use std::fmt::{self, Display, Formatter};

use crate::{board::Board, color::Color, coord::Coord, piece::Piece};

const WHITE: &str = "\x1b[30;107m";
const BLACK: &str = "\x1b[30;47m";
const HIGHLIGHTED: &str = "\x1b[30;103m";
const RESET: &str = "\x1b[0m";

/// Renders a board as text, optionally with info lines printed to the right
/// of the ranks.
#[derive(Debug, Clone, Copy)]
pub struct BoardDisplay<'a> {
    pub board: &'a Board,
    pub view: Color,
    pub highlighted: &'a [Coord],
    pub info: &'a str,
    /// Without ANSI colors, empty squares are `.` and highlighted empty
    /// squares are `*`.
    pub plain: bool,
}
impl<'a> BoardDisplay<'a> {
    pub fn new(board: &'a Board) -> Self {
        BoardDisplay {
            board,
            view: Color::White,
            highlighted: &[],
            info: "",
            plain: false,
        }
    }
    fn write_square(&self, f: &mut Formatter<'_>, position: Coord) -> fmt::Result {
        let highlighted = self.highlighted.contains(&position);
        let piece = self.board[position];
        if self.plain {
            let c = match piece {
                Some(piece) => piece.fen(),
                None if highlighted => '*',
                None => '.',
            };
            write!(f, "{c} ")?;
        } else {
            let color = if highlighted {
                HIGHLIGHTED
            } else {
                match position.color() {
                    Color::White => WHITE,
                    Color::Black => BLACK,
                }
            };
            let figurine = piece.map_or(' ', Piece::figurine);
            write!(f, "{color}{figurine} {RESET}")?;
        }
        Ok(())
    }
}
impl Display for BoardDisplay<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let mut lines = self.info.lines().fuse();
        for y in 0..8 {
            let y = match self.view {
                Color::White => y,
                Color::Black => 7 - y,
            };
            for x in 0..8 {
                let x = match self.view {
                    Color::White => x,
                    Color::Black => 7 - x,
                };
                self.write_square(f, Coord::new(x, y))?;
            }
            write!(f, "{}", 8 - y)?;
            if let Some(line) = lines.next() {
                write!(f, " {line}")?;
            }
            writeln!(f)?;
        }
        match self.view {
            Color::White => write!(f, "a b c d e f g h")?,
            Color::Black => write!(f, "h g f e d c b a")?,
        }
        if let Some(line) = lines.next() {
            write!(f, "   {line}")?;
        }
        writeln!(f)?;
        for line in lines {
            writeln!(f, "                  {line}")?;
        }
        Ok(())
    }
}
#[cfg(test)]
mod test {
    use crate::{board::Board, board_display::BoardDisplay, color::Color, coord};

    #[test]
    fn plain_starting_position() {
        let board = Board::starting_position();
        let display = BoardDisplay {
            plain: true,
            ..BoardDisplay::new(&board)
        };
        let text = display.to_string();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines.len(), 9);
        assert_eq!(lines[0], "r n b q k b n r 8");
        assert_eq!(lines[4], ". . . . . . . . 4");
        assert_eq!(lines[7], "R N B Q K B N R 1");
        assert_eq!(lines[8], "a b c d e f g h");
    }
    #[test]
    fn flipped_view_with_highlights_and_info() {
        let board = Board::starting_position();
        let highlighted = [coord!("e3"), coord!("e4")];
        let display = BoardDisplay {
            board: &board,
            view: Color::Black,
            highlighted: &highlighted,
            info: "white plays\nsecond\nthird",
            plain: true,
        };
        let text = display.to_string();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines[0], "R N B K Q B N R 1 white plays");
        assert_eq!(lines[2], ". . . * . . . . 3");
        assert_eq!(lines[3], ". . . * . . . . 4");
        assert_eq!(lines[1], "P P P P P P P P 2 second");
        assert_eq!(lines[8], "h g f e d c b a   third");
    }
    #[test]
    fn colored_output_uses_figurines() {
        let board = Board::starting_position();
        let text = BoardDisplay::new(&board).to_string();
        assert!(text.contains('♔'));
        assert!(text.contains('♟'));
        assert!(text.contains("\x1b[0m"));
    }
}
