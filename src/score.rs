// =============================================================================
// Position scoring
//
// Material plus a small advancement bonus for pawns marching toward their
// promotion row. Scores are signed from one player's perspective; terminal
// positions collapse to +/- infinity. The weights are a pluggable value so
// the minimax opponent can be tuned without touching the search.
// =============================================================================

use crate::game::Game;
use crate::moves::Coord;
use crate::piece::{Player, Rank};

#[derive(Clone, Copy, Debug)]
pub struct ScoreWeights {
    pub pawn_value: f64,
    pub king_value: f64,
    /// Linear bonus per row a pawn has advanced toward promotion.
    pub advance_weight: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        ScoreWeights {
            pawn_value: 1.0,
            king_value: 3.0,
            advance_weight: 0.1,
        }
    }
}

/// Absolute per-side totals, for display (eval side bars).
#[derive(Clone, Copy, Debug)]
pub struct ScoreBreakdown {
    pub light: f64,
    pub dark: f64,
}

impl ScoreBreakdown {
    pub fn delta_for(&self, perspective: Player) -> f64 {
        match perspective {
            Player::Light => self.light - self.dark,
            Player::Dark => self.dark - self.light,
        }
    }
}

/// Score the game from `player`'s perspective: positive favors `player`.
/// An ended game is worth +infinity when the opponent has been wiped off
/// the board and -infinity otherwise.
pub fn evaluate(game: &Game, player: Player, weights: &ScoreWeights) -> f64 {
    if game.has_ended() {
        return evaluate_terminal(game, player);
    }
    breakdown(game, weights).delta_for(player)
}

pub fn breakdown(game: &Game, weights: &ScoreWeights) -> ScoreBreakdown {
    let mut totals = ScoreBreakdown {
        light: 0.0,
        dark: 0.0,
    };

    for row in 0..game.size() {
        for col in 0..game.size() {
            let piece = match game.piece_at(Coord::new(row, col)) {
                Some(piece) => piece,
                None => continue,
            };

            let base = match piece.rank {
                Rank::King => weights.king_value,
                Rank::Pawn => weights.pawn_value,
            };
            let value = base + advance_bonus(game, piece.owner, piece.rank, row, weights);

            match piece.owner {
                Player::Light => totals.light += value,
                Player::Dark => totals.dark += value,
            }
        }
    }

    totals
}

fn evaluate_terminal(game: &Game, player: Player) -> f64 {
    let opponent = player.opposite();
    for row in 0..game.size() {
        for col in 0..game.size() {
            if let Some(piece) = game.piece_at(Coord::new(row, col)) {
                if piece.owner == opponent {
                    return f64::NEG_INFINITY;
                }
            }
        }
    }
    f64::INFINITY
}

fn advance_bonus(game: &Game, owner: Player, rank: Rank, row: i32, weights: &ScoreWeights) -> f64 {
    if rank != Rank::Pawn {
        return 0.0;
    }
    let advanced = match owner {
        Player::Light => (game.size() - 1 - row) as f64,
        Player::Dark => row as f64,
    };
    advanced * weights.advance_weight
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::piece::Piece;

    fn at(row: i32, col: i32) -> Coord {
        Coord::new(row, col)
    }

    #[test]
    fn initial_position_is_balanced() {
        let game = Game::default();
        let weights = ScoreWeights::default();
        let totals = breakdown(&game, &weights);
        assert!((totals.light - totals.dark).abs() < 1e-9);
        assert_eq!(evaluate(&game, Player::Light, &weights), -evaluate(&game, Player::Dark, &weights));
    }

    #[test]
    fn kings_outweigh_pawns() {
        let mut game = Game::default();
        game.clear_board();
        game.set_piece(at(4, 3), Some(Piece::king(Player::Light)));
        game.set_piece(at(3, 4), Some(Piece::pawn(Player::Dark)));

        let weights = ScoreWeights::default();
        assert!(evaluate(&game, Player::Light, &weights) > 0.0);
        assert!(evaluate(&game, Player::Dark, &weights) < 0.0);
    }

    #[test]
    fn advanced_pawn_scores_higher_than_home_pawn() {
        let weights = ScoreWeights::default();

        let mut home = Game::default();
        home.clear_board();
        home.set_piece(at(6, 1), Some(Piece::pawn(Player::Light)));

        let mut advanced = Game::default();
        advanced.clear_board();
        advanced.set_piece(at(2, 1), Some(Piece::pawn(Player::Light)));

        assert!(
            evaluate(&advanced, Player::Light, &weights) > evaluate(&home, Player::Light, &weights)
        );
    }

    #[test]
    fn advance_bonus_is_a_tenth_per_row() {
        let weights = ScoreWeights::default();
        let mut game = Game::default();
        game.clear_board();
        game.set_piece(at(5, 0), Some(Piece::pawn(Player::Light)));

        // Two rows advanced from the light home row: 1.0 + 2 * 0.1.
        let totals = breakdown(&game, &weights);
        assert!((totals.light - 1.2).abs() < 1e-9);
    }
}
