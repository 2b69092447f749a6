use clap::{Parser, Subcommand};

use crate::{color::Color, fen::Fen};

#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(
    name = "gambit",
    about = "Play chess in the terminal with full move legality"
)]
pub struct Args {
    /// Side shown at the bottom of the board
    #[arg(long, default_value_t = Color::White)]
    pub view: Color,

    /// Log filter directives, overridden by RUST_LOG
    #[arg(long, default_value = "warn")]
    pub log: String,

    /// Start from this position instead of the initial one
    #[arg(long)]
    pub fen: Option<Fen>,

    /// Draw the board without ANSI colors
    #[arg(long)]
    pub plain: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Cross-check move generation against the `chess` crate with random games
    Fuzz {
        /// Number of moves to play
        #[arg(long, default_value_t = 10_000)]
        plies: u64,

        /// Random seed
        #[arg(long, default_value_t = 1)]
        seed: u64,
    },
}
#[cfg(test)]
mod test {
    use clap::Parser;

    use crate::{
        color::Color,
        config::{Args, Command},
    };

    #[test]
    fn defaults() {
        let args = Args::try_parse_from(["gambit"]).unwrap();
        assert_eq!(args.view, Color::White);
        assert_eq!(args.log, "warn");
        assert_eq!(args.fen, None);
        assert!(!args.plain);
        assert_eq!(args.command, None);
    }
    #[test]
    fn interactive_options() {
        let args = Args::try_parse_from([
            "gambit",
            "--view",
            "black",
            "--fen",
            "4k3/8/8/8/8/8/8/4K3 b",
            "--plain",
        ])
        .unwrap();
        assert_eq!(args.view, Color::Black);
        assert_eq!(args.fen.map(|fen| fen.turn), Some(Color::Black));
        assert!(args.plain);
    }
    #[test]
    fn fuzz_subcommand() {
        let args = Args::try_parse_from(["gambit", "fuzz", "--plies", "50", "--seed", "9"]).unwrap();
        assert_eq!(
            args.command,
            Some(Command::Fuzz { plies: 50, seed: 9 })
        );
    }
    #[test]
    fn invalid_values_are_rejected() {
        assert!(Args::try_parse_from(["gambit", "--view", "red"]).is_err());
        assert!(Args::try_parse_from(["gambit", "--fen", "8/8/8/8/8/8/8/8"]).is_err());
    }
}
