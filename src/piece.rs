use serde::{Deserialize, Serialize};

/// The two sides. Light sits on the high rows and moves toward row 0,
/// dark sits on the low rows and moves toward row 7.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Debug)]
pub enum Player {
    Light,
    Dark,
}

impl Default for Player {
    fn default() -> Self {
        Player::Light
    }
}

impl Player {
    pub fn opposite(self) -> Player {
        match self {
            Player::Light => Player::Dark,
            Player::Dark => Player::Light,
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Debug)]
pub enum Rank {
    Pawn,
    King,
}

/// A piece is its owner plus its rank. The owner never changes; the rank
/// goes from pawn to king on promotion and never back.
#[derive(Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Debug)]
pub struct Piece {
    pub owner: Player,
    pub rank: Rank,
}

impl Piece {
    pub fn pawn(owner: Player) -> Piece {
        Piece {
            owner,
            rank: Rank::Pawn,
        }
    }

    pub fn king(owner: Player) -> Piece {
        Piece {
            owner,
            rank: Rank::King,
        }
    }

    pub fn is_king(self) -> bool {
        self.rank == Rank::King
    }

    /// Idempotent: promoting a king leaves it a king.
    pub fn promote(&mut self) {
        self.rank = Rank::King;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opposite_flips_sides() {
        assert_eq!(Player::Light.opposite(), Player::Dark);
        assert_eq!(Player::Dark.opposite(), Player::Light);
    }

    #[test]
    fn promotion_changes_rank_not_owner() {
        let mut piece = Piece::pawn(Player::Dark);
        piece.promote();
        assert_eq!(piece.rank, Rank::King);
        assert_eq!(piece.owner, Player::Dark);
    }

    #[test]
    fn promotion_is_idempotent() {
        let mut piece = Piece::king(Player::Light);
        piece.promote();
        assert_eq!(piece.rank, Rank::King);
    }
}
