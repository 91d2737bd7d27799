use crate::board::piece_move::Move;
use crate::board::Board;
use crate::evaluation::{evaluate, evaluate_fast};
use crate::move_generation::generate_moves;
use rand::Rng;
use std::time::{Duration, Instant};
use tracing::debug;

/// Score bound no real evaluation can reach.
pub const MAX_EVAL: f64 = 1000.0;

/// Fixed-depth negamax with alpha-beta pruning over the board's
/// make/unmake API. Depth is the only termination condition. The RNG is the
/// injected source for the evaluation's tie-breaking jitter.
pub struct Search<R: Rng> {
    pub max_depth: u32,
    /// Trade heuristic quality for speed at the leaves.
    pub use_fast_eval: bool,
    pub result: SearchResult,
    rng: R,
}

#[derive(Default, Clone)]
pub struct SearchResult {
    pub best_move: Option<Move>,
    pub eval: f64,
    pub nodes: u64,
    pub time: Duration,
}

impl<R: Rng> Search<R> {
    pub fn new(max_depth: u32, rng: R) -> Self {
        Self {
            max_depth,
            use_fast_eval: false,
            result: SearchResult::default(),
            rng,
        }
    }

    pub fn with_fast_eval(mut self, enabled: bool) -> Self {
        self.use_fast_eval = enabled;
        self
    }

    /// Picks the best move for the side to move. A `None` best move means
    /// the side to move is blocked (or the position is already terminal),
    /// which this engine treats as a loss for that side.
    pub fn best_move(&mut self, board: &mut Board) -> SearchResult {
        self.result = SearchResult::default();
        let start = Instant::now();
        let (best, eval) = self.negamax(board, 0, -MAX_EVAL, MAX_EVAL);
        self.result.best_move = best.map(|mov| mov.with_score(eval));
        self.result.eval = eval;
        self.result.time = start.elapsed();
        debug!(
            depth = self.max_depth,
            eval,
            nodes = self.result.nodes,
            time_ms = self.result.time.as_millis() as u64,
            "search finished"
        );
        self.result.clone()
    }

    /// Each call returns a score from its own mover's perspective; the parent
    /// negates it. The board is restored before every return path, including
    /// the beta cutoff.
    fn negamax(&mut self, board: &mut Board, depth: u32, alpha: f64, beta: f64) -> (Option<Move>, f64) {
        if board.is_terminal() || depth == self.max_depth {
            self.result.nodes += 1;
            let eval = if self.use_fast_eval {
                evaluate_fast(board, depth, &mut self.rng)
            } else {
                evaluate(board, depth, &mut self.rng)
            };
            return (None, eval);
        }

        let mut best_move = None;
        let mut best_score = -MAX_EVAL;

        for mov in generate_moves(board) {
            board.make_move(mov);
            let (_, reply) = self.negamax(board, depth + 1, -beta, -alpha.max(best_score));
            let score = -reply;
            board.unmake_move(mov);

            if score > best_score {
                best_score = score;
                best_move = Some(mov);
                if best_score >= beta {
                    return (best_move, best_score);
                }
            }
        }

        // An empty move list falls through with -MAX_EVAL: a blocked side
        // counts as lost.
        (best_move, best_score)
    }
}
