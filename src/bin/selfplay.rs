use dama::game::{Game, GameConfig};
use dama::moves::Coord;
use dama::opponent::{MinimaxOpponent, Opponent};
use dama::piece::{Piece, Player};
use serde::Serialize;

const MAX_MOVES: u32 = 150;

#[derive(Serialize)]
struct Summary {
    moves: u32,
    winner: Option<Player>,
    draw: bool,
    board: Vec<Vec<Option<Piece>>>,
}

fn main() {
    let light = MinimaxOpponent::new(3);
    let dark = MinimaxOpponent::new(3);

    let mut game = Game::new(GameConfig::default());
    let mut move_count = 0;

    while !game.has_ended() && move_count < MAX_MOVES {
        let mover: &dyn Opponent = match game.player() {
            Player::Light => &light,
            Player::Dark => &dark,
        };
        match mover.make_move(&game) {
            Some((from, to)) => {
                if !game.move_piece(from, to) {
                    break;
                }
                move_count += 1;
            }
            None => break,
        }
    }

    let board = (0..game.size())
        .map(|row| {
            (0..game.size())
                .map(|col| game.piece_at(Coord::new(row, col)))
                .collect()
        })
        .collect();

    let summary = Summary {
        moves: move_count,
        winner: game.winner(),
        draw: game.is_draw(),
        board,
    };

    let outcome = match (game.winner(), game.is_draw()) {
        (Some(winner), _) => format!("{winner:?} wins"),
        (None, true) => "draw".to_string(),
        (None, false) => "ongoing".to_string(),
    };
    eprintln!("Game over after {move_count} moves: {outcome}");
    println!("{}", serde_json::to_string_pretty(&summary).unwrap());
}
