// =============================================================================
// Opponent strategies
//
// Automated movers over the game's public surface. Each strategy only sees
// what a human player sees: the board through `piece_at` and the legal
// options through `valid_moves`. The minimax opponent explores speculative
// lines on snapshots, so the live game is never mutated by a search.
// =============================================================================

use thiserror::Error;

use crate::game::Game;
use crate::moves::{Coord, MoveOption};
use crate::piece::Player;
use crate::score::{self, ScoreWeights};

/// Platform-appropriate random number in [0, 1).
/// Uses js_sys::Math::random() in WASM builds, rand crate natively.
fn random_f64() -> f64 {
    #[cfg(target_arch = "wasm32")]
    {
        js_sys::Math::random()
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        use rand::Rng;
        rand::thread_rng().gen::<f64>()
    }
}

fn pick_random<T>(pool: &[T]) -> Option<&T> {
    if pool.is_empty() {
        return None;
    }
    let index = (random_f64() * pool.len() as f64) as usize;
    pool.get(index.min(pool.len() - 1))
}

/// An automated move chooser bound to one side of a game.
pub trait Opponent: std::fmt::Debug {
    fn name(&self) -> &'static str;

    /// Pick a move for the side to move, or `None` when it has none.
    fn make_move(&self, game: &Game) -> Option<(Coord, Coord)>;
}

/// Every legal option of the side to move, paired with its origin.
fn all_moves(game: &Game) -> Vec<(Coord, MoveOption)> {
    let mut moves = Vec::new();
    for row in 0..game.size() {
        for col in 0..game.size() {
            let from = Coord::new(row, col);
            let piece = match game.piece_at(from) {
                Some(piece) => piece,
                None => continue,
            };
            if piece.owner != game.player() {
                continue;
            }
            for option in game.valid_moves(from) {
                moves.push((from, option));
            }
        }
    }
    moves
}

// =============================================================================
// Random
// =============================================================================

/// Uniformly samples among every legal move on the board.
#[derive(Clone, Copy, Debug, Default)]
pub struct RandomOpponent;

impl Opponent for RandomOpponent {
    fn name(&self) -> &'static str {
        "Random Moves"
    }

    fn make_move(&self, game: &Game) -> Option<(Coord, Coord)> {
        let moves = all_moves(game);
        pick_random(&moves).map(|(from, option)| (*from, option.to))
    }
}

// =============================================================================
// Greedy
// =============================================================================

/// Takes a capture whenever one exists, otherwise plays like Random.
#[derive(Clone, Copy, Debug, Default)]
pub struct GreedyOpponent;

impl Opponent for GreedyOpponent {
    fn name(&self) -> &'static str {
        "Greedy"
    }

    fn make_move(&self, game: &Game) -> Option<(Coord, Coord)> {
        let moves = all_moves(game);
        let captures: Vec<&(Coord, MoveOption)> =
            moves.iter().filter(|(_, option)| option.is_capture()).collect();

        if captures.is_empty() {
            pick_random(&moves).map(|(from, option)| (*from, option.to))
        } else {
            pick_random(&captures).map(|(from, option)| (*from, option.to))
        }
    }
}

// =============================================================================
// Minimax with alpha-beta pruning
// =============================================================================

/// Depth-bounded minimax over game snapshots. The maximizing player is the
/// side to move at the root; roles flip every ply and branches are pruned
/// once the beta bound falls to the alpha bound.
#[derive(Clone, Copy, Debug)]
pub struct MinimaxOpponent {
    max_depth: u32,
    weights: ScoreWeights,
}

impl Default for MinimaxOpponent {
    fn default() -> Self {
        Self::new(5)
    }
}

impl MinimaxOpponent {
    pub fn new(max_depth: u32) -> MinimaxOpponent {
        MinimaxOpponent {
            max_depth,
            weights: ScoreWeights::default(),
        }
    }

    pub fn with_weights(max_depth: u32, weights: ScoreWeights) -> MinimaxOpponent {
        MinimaxOpponent { max_depth, weights }
    }

    fn minimax(
        &self,
        game: &Game,
        depth: u32,
        mut alpha: f64,
        mut beta: f64,
        maximizing: bool,
        root: Player,
    ) -> f64 {
        if depth == 0 || game.has_ended() {
            return score::evaluate(game, root, &self.weights);
        }

        let moves = all_moves(game);
        if moves.is_empty() {
            return score::evaluate(game, root, &self.weights);
        }

        if maximizing {
            let mut best = f64::NEG_INFINITY;
            for (from, option) in &moves {
                let mut copy = game.snapshot();
                copy.move_piece(*from, option.to);
                let value = self.minimax(&copy, depth - 1, alpha, beta, false, root);
                best = best.max(value);
                alpha = alpha.max(value);
                if beta <= alpha {
                    break;
                }
            }
            best
        } else {
            let mut best = f64::INFINITY;
            for (from, option) in &moves {
                let mut copy = game.snapshot();
                copy.move_piece(*from, option.to);
                let value = self.minimax(&copy, depth - 1, alpha, beta, true, root);
                best = best.min(value);
                beta = beta.min(value);
                if beta <= alpha {
                    break;
                }
            }
            best
        }
    }
}

impl Opponent for MinimaxOpponent {
    fn name(&self) -> &'static str {
        "Minimax"
    }

    fn make_move(&self, game: &Game) -> Option<(Coord, Coord)> {
        let moves = all_moves(game);
        if moves.is_empty() {
            return None;
        }

        let root = game.player();
        let mut best_move = (moves[0].0, moves[0].1.to);
        let mut best_value = f64::NEG_INFINITY;

        for (from, option) in &moves {
            let mut copy = game.snapshot();
            copy.move_piece(*from, option.to);
            let value = self.minimax(
                &copy,
                self.max_depth - 1,
                f64::NEG_INFINITY,
                f64::INFINITY,
                false,
                root,
            );
            if value > best_value {
                best_value = value;
                best_move = (*from, option.to);
            }
        }

        Some(best_move)
    }
}

// =============================================================================
// Strategy lookup
// =============================================================================

/// The only error this crate raises: asking for a strategy that does not
/// exist is a caller bug, not a rules outcome.
#[derive(Debug, Error)]
#[error("unknown opponent id: {0}")]
pub struct UnknownOpponent(pub String);

/// `(id, display name)` pairs for building a selection menu.
pub fn available_opponents() -> Vec<(&'static str, &'static str)> {
    vec![
        ("random", RandomOpponent.name()),
        ("greedy", GreedyOpponent.name()),
        ("minimax", MinimaxOpponent::default().name()),
    ]
}

/// Look a strategy up by its id, case-insensitively.
pub fn opponent_by_id(id: &str) -> Result<Box<dyn Opponent>, UnknownOpponent> {
    match id.to_ascii_lowercase().as_str() {
        "random" => Ok(Box::new(RandomOpponent)),
        "greedy" => Ok(Box::new(GreedyOpponent)),
        "minimax" => Ok(Box::new(MinimaxOpponent::default())),
        _ => Err(UnknownOpponent(id.to_string())),
    }
}
