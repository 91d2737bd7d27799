mod board;
mod cli;
mod errors;
mod evaluation;
mod move_generation;
mod perft;
mod search;

use board::Board;
use clap::Parser;
use cli::{Cli, Mode};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(about = "Hasami Shogi engine with a console interface")]
struct Args {
    /// Board dimension (4 to 26)
    #[arg(long, default_value_t = 9)]
    size: usize,
    /// Search depth in plies
    #[arg(long, default_value_t = 4, value_parser = clap::value_parser!(u32).range(1..))]
    depth: u32,
    /// Who plays White and Black: hh, hc, ch or cc
    #[arg(long, value_enum, default_value = "hc")]
    mode: Mode,
    /// Seed for the evaluation jitter, for reproducible games
    #[arg(long)]
    seed: Option<u64>,
    /// Use the cheaper material-and-advancement evaluation
    #[arg(long)]
    fast_eval: bool,
    /// Count move-tree leaves from the start position to this depth and exit
    #[arg(long, value_name = "DEPTH")]
    perft: Option<u32>,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();
    let args = Args::parse();

    if let Some(depth) = args.perft {
        match Board::new(args.size) {
            Ok(mut board) => print!("{}", perft::perft(&mut board, depth)),
            Err(error) => eprintln!("{error}"),
        }
        return;
    }

    match Cli::new(args.size, args.depth, args.mode, args.seed, args.fast_eval) {
        Ok(mut cli) => cli.run(),
        Err(error) => eprintln!("{error}"),
    }
}
