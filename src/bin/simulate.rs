use std::io::Write;

use dama::game::{Game, GameConfig};
use dama::opponent::{GreedyOpponent, MinimaxOpponent, Opponent, RandomOpponent};
use dama::piece::Player;

const MAX_MOVES: u32 = 200;
const GAMES_PER_MATCHUP: usize = 10;

/// One game between two strategies. `None` means a draw, either declared or
/// by hitting the move cap.
fn play_game(light: &dyn Opponent, dark: &dyn Opponent) -> Option<Player> {
    let mut game = Game::new(GameConfig::default());

    for _ in 0..MAX_MOVES {
        if game.has_ended() {
            break;
        }
        let mover = match game.player() {
            Player::Light => light,
            Player::Dark => dark,
        };
        match mover.make_move(&game) {
            Some((from, to)) => {
                if !game.move_piece(from, to) {
                    break;
                }
            }
            None => break,
        }
    }

    if game.is_draw() {
        None
    } else {
        game.winner()
    }
}

struct MatchResult {
    a_wins: u32,
    b_wins: u32,
    draws: u32,
}

/// Color-balanced matchup: half the games with A as light, half with B.
fn run_matchup(
    label_a: &str,
    a: &dyn Opponent,
    label_b: &str,
    b: &dyn Opponent,
) -> MatchResult {
    let mut result = MatchResult {
        a_wins: 0,
        b_wins: 0,
        draws: 0,
    };
    let half = GAMES_PER_MATCHUP / 2;

    for _ in 0..half {
        match play_game(a, b) {
            Some(Player::Light) => result.a_wins += 1,
            Some(Player::Dark) => result.b_wins += 1,
            None => result.draws += 1,
        }
    }
    for _ in 0..half {
        match play_game(b, a) {
            Some(Player::Light) => result.b_wins += 1,
            Some(Player::Dark) => result.a_wins += 1,
            None => result.draws += 1,
        }
    }

    println!(
        "  {label_a} vs {label_b}: {label_a} wins {}, {label_b} wins {}, draws {} (out of {GAMES_PER_MATCHUP})",
        result.a_wins, result.b_wins, result.draws
    );
    std::io::stdout().flush().ok();

    result
}

fn main() {
    println!("=== Dama strategy tournament ===");
    println!("Games per matchup: {GAMES_PER_MATCHUP}, max moves per game: {MAX_MOVES}\n");

    let entrants: Vec<(&str, Box<dyn Opponent>)> = vec![
        ("random", Box::new(RandomOpponent)),
        ("greedy", Box::new(GreedyOpponent)),
        ("minimax-d2", Box::new(MinimaxOpponent::new(2))),
        ("minimax-d3", Box::new(MinimaxOpponent::new(3))),
    ];

    let mut totals: Vec<(&str, u32)> = entrants.iter().map(|(label, _)| (*label, 0)).collect();

    for i in 0..entrants.len() {
        for j in (i + 1)..entrants.len() {
            let (label_a, a) = &entrants[i];
            let (label_b, b) = &entrants[j];
            let result = run_matchup(label_a, a.as_ref(), label_b, b.as_ref());
            totals[i].1 += result.a_wins;
            totals[j].1 += result.b_wins;
        }
    }

    totals.sort_by(|a, b| b.1.cmp(&a.1));

    println!("\n--- Rankings (total wins) ---\n");
    for (label, wins) in &totals {
        println!("  {wins:>3}  {label}");
    }
}
