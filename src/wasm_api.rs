use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::game::{Game, GameConfig};
use crate::moves::Coord;
use crate::opponent::opponent_by_id;
use crate::piece::{Piece, Player, Rank};

#[derive(Serialize)]
struct SquarePiece {
    owner: String,
    rank: String,
}

#[derive(Serialize)]
struct MoveOptionJson {
    to: [i32; 2],
    captured: Vec<[i32; 2]>,
}

#[derive(Serialize)]
struct BoardState {
    squares: Vec<Vec<Option<SquarePiece>>>,
    player: String,
    has_ended: bool,
    winner: Option<String>,
    is_draw: bool,
    debug_mode: bool,
    current_player_is_ai: bool,
}

#[derive(Serialize)]
struct MoveReply {
    #[serde(flatten)]
    board_state: Option<BoardState>,
    error: Option<String>,
}

fn player_to_string(player: Player) -> String {
    match player {
        Player::Light => "Light".to_string(),
        Player::Dark => "Dark".to_string(),
    }
}

fn string_to_player(s: &str) -> Option<Player> {
    match s.to_ascii_lowercase().as_str() {
        "light" => Some(Player::Light),
        "dark" => Some(Player::Dark),
        _ => None,
    }
}

fn piece_to_json(piece: Piece) -> SquarePiece {
    SquarePiece {
        owner: player_to_string(piece.owner),
        rank: match piece.rank {
            Rank::Pawn => "Pawn".to_string(),
            Rank::King => "King".to_string(),
        },
    }
}

fn build_board_state(game: &Game) -> BoardState {
    let squares: Vec<Vec<Option<SquarePiece>>> = (0..game.size())
        .map(|row| {
            (0..game.size())
                .map(|col| game.piece_at(Coord::new(row, col)).map(piece_to_json))
                .collect()
        })
        .collect();

    BoardState {
        squares,
        player: player_to_string(game.player()),
        has_ended: game.has_ended(),
        winner: game.winner().map(player_to_string),
        is_draw: game.is_draw(),
        debug_mode: game.is_debug_mode_enabled(),
        current_player_is_ai: game.is_current_player_ai(),
    }
}

#[wasm_bindgen]
pub struct DamaGame {
    game: Game,
}

impl Default for DamaGame {
    fn default() -> Self {
        Self::new()
    }
}

#[wasm_bindgen]
impl DamaGame {
    #[wasm_bindgen(constructor)]
    pub fn new() -> DamaGame {
        DamaGame {
            game: Game::new(GameConfig::default()),
        }
    }

    pub fn get_board_state(&self) -> JsValue {
        let state = build_board_state(&self.game);
        serde_wasm_bindgen::to_value(&state).unwrap_or(JsValue::NULL)
    }

    pub fn get_valid_moves(&self, row: i32, col: i32) -> JsValue {
        let options: Vec<MoveOptionJson> = self
            .game
            .valid_moves(Coord::new(row, col))
            .iter()
            .map(|option| MoveOptionJson {
                to: [option.to.row, option.to.col],
                captured: option.captured.iter().map(|c| [c.row, c.col]).collect(),
            })
            .collect();

        serde_wasm_bindgen::to_value(&options).unwrap_or(JsValue::NULL)
    }

    pub fn move_piece(&mut self, from_row: i32, from_col: i32, to_row: i32, to_col: i32) -> JsValue {
        let from = Coord::new(from_row, from_col);
        let to = Coord::new(to_row, to_col);

        if self.game.move_piece(from, to) {
            let state = build_board_state(&self.game);
            serde_wasm_bindgen::to_value(&state).unwrap_or(JsValue::NULL)
        } else {
            let err = MoveReply {
                board_state: None,
                error: Some("Illegal move".to_string()),
            };
            serde_wasm_bindgen::to_value(&err).unwrap_or(JsValue::NULL)
        }
    }

    /// Let the bound opponent of the side to move play one move. Returns the
    /// resulting state either way; a missing binding or a finished game is
    /// simply a no-op.
    pub fn make_ai_move(&mut self) -> JsValue {
        if !self.game.has_ended() {
            if let Some(opponent) = self.game.ai_opponent(self.game.player()) {
                if let Some((from, to)) = opponent.make_move(&self.game) {
                    self.game.move_piece(from, to);
                }
            }
        }
        let state = build_board_state(&self.game);
        serde_wasm_bindgen::to_value(&state).unwrap_or(JsValue::NULL)
    }

    /// Bind a strategy to a side. Returns false for an unknown player or
    /// strategy id.
    pub fn set_opponent(&mut self, player: &str, id: &str) -> bool {
        let player = match string_to_player(player) {
            Some(player) => player,
            None => return false,
        };
        match opponent_by_id(id) {
            Ok(opponent) => {
                self.game.set_ai_opponent(player, Some(opponent));
                true
            }
            Err(_) => false,
        }
    }

    pub fn clear_opponent(&mut self, player: &str) {
        if let Some(player) = string_to_player(player) {
            self.game.set_ai_opponent(player, None);
        }
    }

    pub fn is_current_player_ai(&self) -> bool {
        self.game.is_current_player_ai()
    }

    pub fn toggle_debug_mode(&mut self) -> bool {
        self.game.toggle_debug_mode()
    }

    pub fn reset(&mut self) {
        self.game.reset();
    }
}
