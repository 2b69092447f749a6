#![forbid(unsafe_code)]
#![warn(clippy::pedantic)]

use std::{
    io::{self, stderr, stdin, stdout},
    process::ExitCode,
};

use clap::Parser;
use gambit::{
    config::{Args, Command},
    fen::Fen,
    fuzz::fuzz,
    repl::{Options, repl},
};
use tracing::error;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    let args = Args::parse();
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    match args.command {
        Some(Command::Fuzz { plies, seed }) => match fuzz(plies, seed) {
            Ok(report) => {
                println!(
                    "{} plies over {} games, {} checkmates, {} stalemates, no mismatch",
                    report.plies, report.games, report.checkmates, report.stalemates
                );
                ExitCode::SUCCESS
            }
            Err(err) => {
                error!(seed, "fuzzing found a mismatch");
                eprintln!("{err}");
                ExitCode::FAILURE
            }
        },
        None => {
            let options = Options {
                view: args.view,
                plain: args.plain,
                fen: args.fen.unwrap_or_else(Fen::starting_position),
            };
            match repl(stdin().lock(), stdout().lock(), stderr().lock(), options) {
                Ok(()) => ExitCode::SUCCESS,
                Err(err) => {
                    error!(%err, "terminal i/o failed");
                    ExitCode::FAILURE
                }
            }
        }
    }
}
