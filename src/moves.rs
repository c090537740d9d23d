use serde::{Deserialize, Serialize};

/// A board coordinate. Signed so that direction arithmetic can step off the
/// board freely; the board bounds-checks every access.
#[derive(Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Debug)]
pub struct Coord {
    pub row: i32,
    pub col: i32,
}

impl Coord {
    pub fn new(row: i32, col: i32) -> Coord {
        Coord { row, col }
    }

    pub fn offset(self, dr: i32, dc: i32) -> Coord {
        Coord {
            row: self.row + dr,
            col: self.col + dc,
        }
    }
}

/// One legal destination for a piece, with the pieces the move would take.
/// An empty `captured` list is a quiet move; two or more entries form a
/// multi-capture chain, listed in jump order.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize, Debug)]
pub struct MoveOption {
    pub to: Coord,
    pub captured: Vec<Coord>,
}

impl MoveOption {
    pub fn quiet(to: Coord) -> MoveOption {
        MoveOption {
            to,
            captured: Vec::new(),
        }
    }

    pub fn capture(to: Coord, captured: Vec<Coord>) -> MoveOption {
        MoveOption { to, captured }
    }

    pub fn is_capture(&self) -> bool {
        !self.captured.is_empty()
    }
}

/// What an executed move did: which squares were emptied and whether the
/// moved piece was promoted on arrival. Consumers (sound, highlighting)
/// read this off the game after a successful move.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize, Debug)]
pub struct MoveRecord {
    pub captured: Vec<Coord>,
    pub promoted: bool,
}
