use crate::board::piece_move::Move;
use crate::board::{Board, Side};
use crate::errors::EngineError;
use crate::move_generation::generate_moves;
use crate::search::Search;
use clap::ValueEnum;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::io::{self, BufRead, Write};
use std::thread;
use std::time::Duration;

const COMPUTER_PAIRING_DELAY: Duration = Duration::from_millis(500);

/// Who plays White and who plays Black.
#[derive(Clone, Copy, PartialEq, Eq, Debug, ValueEnum)]
pub enum Mode {
    #[value(name = "hh")]
    HumanHuman,
    #[value(name = "hc")]
    HumanComputer,
    #[value(name = "ch")]
    ComputerHuman,
    #[value(name = "cc")]
    ComputerComputer,
}

impl Mode {
    fn is_human(&self, side: Side) -> bool {
        match side {
            Side::White => matches!(self, Mode::HumanHuman | Mode::HumanComputer),
            Side::Black => matches!(self, Mode::HumanHuman | Mode::ComputerHuman),
        }
    }
}

/// Interactive game loop: renders the board, reads and validates human moves,
/// asks the engine for computer moves. The engine trusts the board; this
/// layer is where externally supplied moves get validated.
pub struct Cli {
    board: Board,
    engine: Search<ChaCha8Rng>,
    mode: Mode,
    move_number: u32,
}

impl Cli {
    pub fn new(size: usize, depth: u32, mode: Mode, seed: Option<u64>, fast_eval: bool) -> Result<Self, EngineError> {
        let rng = match seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };
        Ok(Self {
            board: Board::new(size)?,
            engine: Search::new(depth, rng).with_fast_eval(fast_eval),
            mode,
            move_number: 2,
        })
    }

    pub fn run(&mut self) {
        let stdin = io::stdin();
        let mut input = stdin.lock();
        println!("********   Hasami Shogi   ********");
        println!("{}", self.board);
        while !self.board.is_terminal() {
            // A mover with no legal slide has lost, the same as dropping
            // below two pieces. Checked here so the rule applies to human
            // and computer sides alike.
            if generate_moves(&self.board).is_empty() {
                break;
            }
            let mover = self.board.side;
            let mov = if self.mode.is_human(mover) {
                match self.read_human_move(&mut input) {
                    Some(mov) => mov,
                    // Input closed mid-game: nothing to announce.
                    None => return,
                }
            } else {
                println!("Computer thinking...");
                let result = self.engine.best_move(&mut self.board);
                match result.best_move {
                    Some(mov) => {
                        println!("Computer move: {} (eval {:+.2})", mov, result.eval);
                        mov
                    }
                    None => break,
                }
            };
            match self.board.try_make_move(mov) {
                Ok(()) => {
                    println!("{}", self.board);
                    self.move_number += 1;
                }
                Err(error) => {
                    println!("{error}");
                    println!("{}", self.board);
                }
            }
            if self.mode == Mode::ComputerComputer {
                thread::sleep(COMPUTER_PAIRING_DELAY);
            }
        }
        // The side left to move is the loser, whether below two pieces or
        // fully blocked.
        match self.board.side {
            Side::Black => println!("\\> WHITE WON!"),
            Side::White => println!("\\> BLACK WON!"),
        }
    }

    /// Prompts until a well-formed move arrives. `None` means the input
    /// stream is closed, not a malformed line; those are re-prompted.
    fn read_human_move(&mut self, input: &mut impl BufRead) -> Option<Move> {
        loop {
            println!("{} to move:", self.board.side);
            if self.move_number % 2 == 0 {
                print!("{}. ", self.move_number / 2);
            } else {
                print!("{}... ", self.move_number / 2);
            }
            io::stdout().flush().ok();
            let mut line = String::new();
            match input.read_line(&mut line) {
                Ok(0) | Err(_) => return None,
                Ok(_) => {}
            }
            match Move::from_notation(&line, self.board.size) {
                Ok(mov) => return Some(mov),
                Err(error) => println!("{error}"),
            }
        }
    }
}
