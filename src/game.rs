use std::collections::HashMap;

use crate::board::Board;
use crate::moves::{Coord, MoveOption, MoveRecord};
use crate::opponent::Opponent;
use crate::piece::{Piece, Player};
use crate::policy::{CaptureRule, TurnPolicy};
use crate::service;

/// Everything configurable about a game. `Default` gives standard play:
/// alternating turns, captures optional, light to start.
#[derive(Clone, Copy, Debug, Default)]
pub struct GameConfig {
    pub turn_policy: TurnPolicy,
    pub capture_rule: CaptureRule,
    pub starting_player: Player,
}

/// The orchestrator: owns the board, gates moves through the turn policy,
/// executes them through the move service, and tracks whose turn it is and
/// whether the game has ended.
///
/// Illegal actions never panic; they come back as `false` or an empty list
/// and leave the state untouched.
pub struct Game {
    board: Board,
    config: GameConfig,
    current_player: Player,
    ended: bool,
    winner: Option<Player>,
    draw: bool,
    debug_mode: bool,
    last_record: Option<MoveRecord>,
    opponents: HashMap<Player, Box<dyn Opponent>>,
}

impl Default for Game {
    fn default() -> Self {
        Self::new(GameConfig::default())
    }
}

impl Game {
    pub fn new(config: GameConfig) -> Game {
        Game {
            board: Board::new(),
            config,
            current_player: config.starting_player,
            ended: false,
            winner: None,
            draw: false,
            debug_mode: false,
            last_record: None,
            opponents: HashMap::new(),
        }
    }

    // -------------------------------------------------------------------------
    // Queries
    // -------------------------------------------------------------------------

    pub fn size(&self) -> i32 {
        self.board.size()
    }

    pub fn player(&self) -> Player {
        self.current_player
    }

    pub fn piece_at(&self, at: Coord) -> Option<Piece> {
        self.board.piece_at(at)
    }

    pub fn has_ended(&self) -> bool {
        self.ended
    }

    pub fn winner(&self) -> Option<Player> {
        self.winner
    }

    pub fn is_draw(&self) -> bool {
        self.draw
    }

    pub fn is_debug_mode_enabled(&self) -> bool {
        self.debug_mode
    }

    /// The record of the last successful move, for consumers that react to
    /// captures or promotions (sound, highlighting).
    pub fn last_move_record(&self) -> Option<&MoveRecord> {
        self.last_record.as_ref()
    }

    /// Legal destinations for the piece at `from`: empty when the square is
    /// vacant or the turn policy forbids moving it. Under the forced-capture
    /// rule, quiet options disappear whenever the piece's owner holds a
    /// capture anywhere on the board.
    pub fn valid_moves(&self, from: Coord) -> Vec<MoveOption> {
        let piece = match self.board.piece_at(from) {
            Some(piece) => piece,
            None => return Vec::new(),
        };
        if !self.config.turn_policy.can_move(piece, self.current_player) {
            return Vec::new();
        }

        let mut moves = service::valid_moves(&self.board, from);
        if self.config.capture_rule == CaptureRule::Forced && self.player_has_capture(piece.owner) {
            moves.retain(MoveOption::is_capture);
        }
        moves
    }

    fn player_has_capture(&self, player: Player) -> bool {
        self.board.pieces_of(player).iter().any(|&from| {
            service::valid_moves(&self.board, from)
                .iter()
                .any(MoveOption::is_capture)
        })
    }

    // -------------------------------------------------------------------------
    // Mutation
    // -------------------------------------------------------------------------

    pub fn set_piece(&mut self, at: Coord, piece: Option<Piece>) {
        self.board.set_piece(at, piece);
    }

    pub fn clear_board(&mut self) {
        self.board.clear();
    }

    pub fn reset_board(&mut self) {
        self.board.clear();
        self.board.setup_pieces();
    }

    /// Attempt a move. `false` when the square is empty, the turn policy
    /// forbids it, or the destination is not legal; the state is untouched
    /// in every rejection case. On success the turn passes and the
    /// end-of-game conditions are evaluated.
    pub fn move_piece(&mut self, from: Coord, to: Coord) -> bool {
        let allowed = self.valid_moves(from);
        if !allowed.iter().any(|option| option.to == to) {
            return false;
        }

        let record = match service::perform_move(&mut self.board, from, to) {
            Some(record) => record,
            None => return false,
        };
        self.last_record = Some(record);

        self.current_player = self.config.turn_policy.next(self.current_player);
        self.check_game_end();
        true
    }

    /// Back to the starting position: fresh board, configured starting
    /// player, all end-state flags cleared. Debug mode and AI bindings
    /// survive a reset.
    pub fn reset(&mut self) {
        self.reset_board();
        self.current_player = self.config.starting_player;
        self.ended = false;
        self.winner = None;
        self.draw = false;
        self.last_record = None;
    }

    /// Display-only flag; has no effect on the rules.
    pub fn toggle_debug_mode(&mut self) -> bool {
        self.debug_mode = !self.debug_mode;
        self.debug_mode
    }

    // -------------------------------------------------------------------------
    // End of game
    // -------------------------------------------------------------------------

    fn check_game_end(&mut self) {
        if self.ended {
            return;
        }
        if !self.current_player_has_moves() {
            self.ended = true;
            self.winner = Some(self.current_player.opposite());
            return;
        }
        if self.is_drawn_position() {
            self.ended = true;
            self.draw = true;
        }
    }

    fn current_player_has_moves(&self) -> bool {
        self.board
            .pieces_of(self.current_player)
            .iter()
            .any(|&from| !self.valid_moves(from).is_empty())
    }

    /// The draw rule: both sides reduced to a single piece and neither side
    /// holding any capture. Lone piece against lone piece out of contact
    /// cannot be forced to a win.
    pub fn is_drawn_position(&self) -> bool {
        if self.board.count_pieces(Player::Light) != 1 {
            return false;
        }
        if self.board.count_pieces(Player::Dark) != 1 {
            return false;
        }
        !self.player_has_capture(Player::Light) && !self.player_has_capture(Player::Dark)
    }

    // -------------------------------------------------------------------------
    // AI opponents
    // -------------------------------------------------------------------------

    /// Bind (or with `None`, unbind) an automated mover to a side. The core
    /// never invokes it; the embedding layer asks `is_current_player_ai`
    /// and drives the opponent itself.
    pub fn set_ai_opponent(&mut self, player: Player, opponent: Option<Box<dyn Opponent>>) {
        match opponent {
            Some(opponent) => {
                self.opponents.insert(player, opponent);
            }
            None => {
                self.opponents.remove(&player);
            }
        }
    }

    pub fn ai_opponent(&self, player: Player) -> Option<&dyn Opponent> {
        self.opponents.get(&player).map(|opponent| &**opponent)
    }

    pub fn is_current_player_ai(&self) -> bool {
        self.opponents.contains_key(&self.current_player)
    }

    // -------------------------------------------------------------------------
    // Snapshots
    // -------------------------------------------------------------------------

    /// A detached copy for speculative search: piece placement, current
    /// player, configuration, and end-state flags, nothing else. Mutating
    /// the snapshot never touches the live game. AI bindings are not game
    /// state and are not carried over.
    pub fn snapshot(&self) -> Game {
        Game {
            board: self.board.clone(),
            config: self.config,
            current_player: self.current_player,
            ended: self.ended,
            winner: self.winner,
            draw: self.draw,
            debug_mode: false,
            last_record: None,
            opponents: HashMap::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::piece::Rank;

    fn at(row: i32, col: i32) -> Coord {
        Coord::new(row, col)
    }

    fn free_play() -> Game {
        Game::new(GameConfig {
            turn_policy: TurnPolicy::Free,
            ..GameConfig::default()
        })
    }

    #[test]
    fn new_game_starts_in_progress_with_light_to_move() {
        let game = Game::default();
        assert_eq!(game.player(), Player::Light);
        assert!(!game.has_ended());
        assert!(game.winner().is_none());
        assert!(!game.is_draw());
    }

    #[test]
    fn opening_move_flips_the_turn() {
        let mut game = Game::default();
        assert!(game.move_piece(at(5, 0), at(4, 1)));
        assert_eq!(game.player(), Player::Dark);
        assert_eq!(game.piece_at(at(4, 1)), Some(Piece::pawn(Player::Light)));
        assert!(game.piece_at(at(5, 0)).is_none());
    }

    #[test]
    fn moving_out_of_turn_is_rejected() {
        let mut game = Game::default();
        // Dark piece while light is to move.
        assert!(game.valid_moves(at(2, 1)).is_empty());
        assert!(!game.move_piece(at(2, 1), at(3, 0)));
        assert_eq!(game.player(), Player::Light);
        assert_eq!(game.piece_at(at(2, 1)), Some(Piece::pawn(Player::Dark)));
    }

    #[test]
    fn illegal_destination_is_rejected_without_state_change() {
        let mut game = Game::default();
        assert!(!game.move_piece(at(5, 0), at(3, 0)));
        assert_eq!(game.player(), Player::Light);
    }

    #[test]
    fn free_policy_keeps_the_turn() {
        let mut game = free_play();
        assert!(game.move_piece(at(2, 1), at(3, 0)));
        assert_eq!(game.player(), Player::Light);
    }

    #[test]
    fn capture_is_recorded_on_the_game() {
        let mut game = Game::default();
        game.clear_board();
        game.set_piece(at(5, 2), Some(Piece::pawn(Player::Light)));
        game.set_piece(at(4, 3), Some(Piece::pawn(Player::Dark)));

        assert!(game.move_piece(at(5, 2), at(3, 4)));
        let record = game.last_move_record().expect("record missing");
        assert_eq!(record.captured, vec![at(4, 3)]);
    }

    #[test]
    fn capturing_the_last_piece_wins() {
        let mut game = Game::default();
        game.clear_board();
        game.set_piece(at(5, 2), Some(Piece::pawn(Player::Light)));
        game.set_piece(at(4, 3), Some(Piece::pawn(Player::Dark)));

        assert!(game.move_piece(at(5, 2), at(3, 4)));
        assert!(game.has_ended());
        assert_eq!(game.winner(), Some(Player::Light));
        assert!(!game.is_draw());
    }

    #[test]
    fn opponent_with_no_moves_loses() {
        let mut game = Game::default();
        game.clear_board();
        game.set_piece(at(5, 0), Some(Piece::pawn(Player::Light)));
        // Two dark pawns stuck on the last row with nowhere to go.
        game.set_piece(at(7, 0), Some(Piece::pawn(Player::Dark)));
        game.set_piece(at(7, 2), Some(Piece::pawn(Player::Dark)));

        assert!(game.move_piece(at(5, 0), at(4, 1)));
        assert!(game.has_ended());
        assert_eq!(game.winner(), Some(Player::Light));
    }

    #[test]
    fn bare_kings_out_of_contact_draw() {
        let mut game = Game::default();
        game.clear_board();
        game.set_piece(at(6, 1), Some(Piece::king(Player::Light)));
        game.set_piece(at(0, 7), Some(Piece::king(Player::Dark)));

        assert!(game.move_piece(at(6, 1), at(7, 2)));
        assert!(game.has_ended());
        assert!(game.is_draw());
        assert!(game.winner().is_none());
    }

    #[test]
    fn draw_not_declared_while_a_capture_exists() {
        let game = {
            let mut game = free_play();
            game.clear_board();
            game.set_piece(at(5, 2), Some(Piece::pawn(Player::Light)));
            game.set_piece(at(4, 3), Some(Piece::pawn(Player::Dark)));
            game
        };
        assert!(!game.is_drawn_position());
    }

    #[test]
    fn forced_capture_hides_quiet_moves() {
        let mut game = Game::new(GameConfig {
            capture_rule: CaptureRule::Forced,
            ..GameConfig::default()
        });
        game.clear_board();
        game.set_piece(at(5, 2), Some(Piece::pawn(Player::Light)));
        game.set_piece(at(4, 3), Some(Piece::pawn(Player::Dark)));
        game.set_piece(at(5, 6), Some(Piece::pawn(Player::Light)));
        game.set_piece(at(0, 1), Some(Piece::pawn(Player::Dark)));

        // The piece with the capture offers only the capture.
        let moves = game.valid_moves(at(5, 2));
        assert!(moves.iter().all(MoveOption::is_capture));
        // Another piece of the same side has nothing while the capture stands.
        assert!(game.valid_moves(at(5, 6)).is_empty());
        assert!(!game.move_piece(at(5, 6), at(4, 5)));
        // Taking the capture is accepted.
        assert!(game.move_piece(at(5, 2), at(3, 4)));
    }

    #[test]
    fn relaxed_rule_offers_quiet_and_capturing_moves() {
        let mut game = Game::default();
        game.clear_board();
        game.set_piece(at(5, 2), Some(Piece::pawn(Player::Light)));
        game.set_piece(at(4, 3), Some(Piece::pawn(Player::Dark)));

        let moves = game.valid_moves(at(5, 2));
        assert!(moves.iter().any(|m| m.is_capture()));
        assert!(moves.iter().any(|m| !m.is_capture()));
    }

    #[test]
    fn reset_restores_the_initial_position() {
        let mut game = Game::default();
        assert!(game.move_piece(at(5, 0), at(4, 1)));
        assert!(game.move_piece(at(2, 1), at(3, 0)));
        game.reset();

        assert_eq!(game.player(), Player::Light);
        assert!(!game.has_ended());
        assert!(game.winner().is_none());
        assert!(!game.is_draw());

        let fresh = Game::default();
        for row in 0..game.size() {
            for col in 0..game.size() {
                assert_eq!(game.piece_at(at(row, col)), fresh.piece_at(at(row, col)));
            }
        }
    }

    #[test]
    fn toggle_debug_mode_flips_and_reports() {
        let mut game = Game::default();
        assert!(!game.is_debug_mode_enabled());
        assert!(game.toggle_debug_mode());
        assert!(game.is_debug_mode_enabled());
        assert!(!game.toggle_debug_mode());
    }

    #[test]
    fn snapshot_mutation_leaves_the_live_game_alone() {
        let game = Game::default();
        let mut copy = game.snapshot();

        assert!(copy.move_piece(at(5, 0), at(4, 1)));
        assert_eq!(copy.player(), Player::Dark);

        assert_eq!(game.player(), Player::Light);
        assert_eq!(game.piece_at(at(5, 0)), Some(Piece::pawn(Player::Light)));
        assert!(game.piece_at(at(4, 1)).is_none());
    }

    #[test]
    fn promotion_through_game_produces_a_king() {
        let mut game = free_play();
        game.clear_board();
        game.set_piece(at(1, 2), Some(Piece::pawn(Player::Light)));
        game.set_piece(at(7, 0), Some(Piece::pawn(Player::Dark)));

        assert!(game.move_piece(at(1, 2), at(0, 1)));
        assert_eq!(game.piece_at(at(0, 1)).unwrap().rank, Rank::King);
        assert!(game.last_move_record().unwrap().promoted);
    }
}
