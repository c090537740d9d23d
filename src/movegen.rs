// =============================================================================
// Move generation
//
// A fixed, ordered list of handler functions, each contributing candidate
// moves for the piece on the queried square. Generation is additive: no
// handler suppresses another's output, and the pipeline returns the plain
// concatenation. Multi-capture sequences come first so that when several
// options share a destination, executing that destination takes the chain.
//
// Coordinate system: row 0 is the dark back rank; light pawns advance toward
// row 0, dark pawns toward row 7. Only dark squares are playable.
// =============================================================================

use crate::board::Board;
use crate::moves::{Coord, MoveOption};
use crate::piece::{Piece, Player, Rank};

/// A handler contributes candidate moves for one piece without looking at
/// what the other handlers produce.
pub type MoveHandler = fn(Coord, Piece, &Board) -> Vec<MoveOption>;

const HANDLERS: [MoveHandler; 5] = [
    multi_capture_moves,
    pawn_moves,
    king_moves,
    pawn_edge_moves,
    king_edge_moves,
];

const ALL_DIAGONALS: [(i32, i32); 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];

/// The two diagonals a pawn may advance along.
fn forward_dirs(player: Player) -> [(i32, i32); 2] {
    match player {
        Player::Light => [(-1, -1), (-1, 1)],
        Player::Dark => [(1, -1), (1, 1)],
    }
}

/// In bounds and dark-colored; the only squares a piece may stand on.
fn is_playable(board: &Board, at: Coord) -> bool {
    board.in_bounds(at) && board.is_dark_square(at)
}

/// Every legal destination for the piece at `from`, or empty if the square
/// is vacant. Union of all handlers' output.
pub fn valid_moves(board: &Board, from: Coord) -> Vec<MoveOption> {
    let piece = match board.piece_at(from) {
        Some(piece) => piece,
        None => return Vec::new(),
    };

    HANDLERS
        .iter()
        .flat_map(|handler| handler(from, piece, board))
        .collect()
}

// =============================================================================
// Plain moves
// =============================================================================

/// Pawn step and single jump along the two forward diagonals.
fn pawn_moves(from: Coord, piece: Piece, board: &Board) -> Vec<MoveOption> {
    if piece.rank == Rank::King {
        return Vec::new();
    }

    let mut moves = Vec::new();
    for (dr, dc) in forward_dirs(piece.owner) {
        let step = from.offset(dr, dc);
        if !is_playable(board, step) {
            continue;
        }

        match board.piece_at(step) {
            None => moves.push(MoveOption::quiet(step)),
            Some(occupant) if occupant.owner != piece.owner => {
                let landing = step.offset(dr, dc);
                if is_playable(board, landing) && board.piece_at(landing).is_none() {
                    moves.push(MoveOption::capture(landing, vec![step]));
                }
            }
            Some(_) => {}
        }
    }

    moves
}

/// Flying king: slide any distance along each diagonal. The walk may pass
/// over at most one opposing piece per ray; every empty square beyond it is
/// a capturing landing. A second occupant of either color ends the ray.
fn king_moves(from: Coord, piece: Piece, board: &Board) -> Vec<MoveOption> {
    if piece.rank != Rank::King {
        return Vec::new();
    }

    let mut moves = Vec::new();
    for (dr, dc) in ALL_DIAGONALS {
        let mut at = from.offset(dr, dc);
        let mut pending: Option<Coord> = None;

        while is_playable(board, at) {
            match board.piece_at(at) {
                None => moves.push(MoveOption {
                    to: at,
                    captured: pending.into_iter().collect(),
                }),
                Some(occupant) => {
                    if occupant.owner == piece.owner || pending.is_some() {
                        break;
                    }
                    pending = Some(at);
                }
            }
            at = at.offset(dr, dc);
        }
    }

    moves
}

// =============================================================================
// Edge-bounce captures
//
// An opposing piece sitting on the outer column can be taken even though the
// normal diagonal continuation would leave the board: the capturer "bounces"
// off the edge and lands off the capture line.
// =============================================================================

/// Pawn variant: the landing is two rows ahead in the pawn's own column.
fn pawn_edge_moves(from: Coord, piece: Piece, board: &Board) -> Vec<MoveOption> {
    if piece.rank == Rank::King {
        return Vec::new();
    }

    let edge = board.size() - 1;
    let mut moves = Vec::new();
    for (dr, dc) in forward_dirs(piece.owner) {
        let step = from.offset(dr, dc);
        if !is_playable(board, step) {
            continue;
        }

        match board.piece_at(step) {
            Some(occupant) if occupant.owner != piece.owner => {}
            _ => continue,
        }

        if step.col != 0 && step.col != edge {
            continue;
        }

        let landing = Coord::new(from.row + 2 * dr, from.col);
        if is_playable(board, landing) && board.piece_at(landing).is_none() {
            moves.push(MoveOption::capture(landing, vec![step]));
        }
    }

    moves
}

/// King variant: walking a ray, the first opposing piece found on the outer
/// column may be taken by landing one step along the perpendicular diagonal.
/// Only that single landing is offered; the ray ends there either way.
fn king_edge_moves(from: Coord, piece: Piece, board: &Board) -> Vec<MoveOption> {
    if piece.rank != Rank::King {
        return Vec::new();
    }

    let edge = board.size() - 1;
    let mut moves = Vec::new();
    for (dr, dc) in ALL_DIAGONALS {
        let mut at = from.offset(dr, dc);

        while is_playable(board, at) {
            let occupant = match board.piece_at(at) {
                None => {
                    at = at.offset(dr, dc);
                    continue;
                }
                Some(occupant) => occupant,
            };

            if occupant.owner == piece.owner {
                break;
            }

            if at.col == 0 || at.col == edge {
                let landing = Coord::new(at.row + dr, at.col - dc);
                if is_playable(board, landing) && board.piece_at(landing).is_none() {
                    moves.push(MoveOption::capture(landing, vec![at]));
                }
            }
            break;
        }
    }

    moves
}

// =============================================================================
// Multi-capture search
// =============================================================================

/// Chained captures: recursively explore jump sequences from the piece's
/// current logical position. Every reachable landing is reported, not just
/// maximal chains, but only sequences taking two or more pieces are emitted;
/// single captures already belong to the handlers above.
///
/// The board is never mutated during the search. Jumped pieces stay on their
/// squares, so re-capturing is prevented purely by the per-branch captured
/// list, and the origin square (still occupied by the moving piece) can
/// never be a landing.
fn multi_capture_moves(from: Coord, piece: Piece, board: &Board) -> Vec<MoveOption> {
    let mut found = Vec::new();
    search_captures(piece, board, from, &[], &mut found);
    found
}

fn search_captures(
    piece: Piece,
    board: &Board,
    position: Coord,
    captured_so_far: &[Coord],
    found: &mut Vec<MoveOption>,
) {
    let pawn_dirs = forward_dirs(piece.owner);
    let directions: &[(i32, i32)] = match piece.rank {
        Rank::Pawn => &pawn_dirs,
        Rank::King => &ALL_DIAGONALS,
    };

    for &(dr, dc) in directions {
        let target = position.offset(dr, dc);
        if !is_playable(board, target) {
            continue;
        }

        match board.piece_at(target) {
            Some(occupant) if occupant.owner != piece.owner => {}
            _ => continue,
        }

        let landing = target.offset(dr, dc);
        if !is_playable(board, landing) || board.piece_at(landing).is_some() {
            continue;
        }
        if captured_so_far.contains(&target) {
            continue;
        }

        extend_chain(piece, board, landing, target, captured_so_far, found);
    }

    // Edge-bounce jumps available from the current position extend the
    // chain the same way as regular jumps.
    let edge_moves = match piece.rank {
        Rank::Pawn => pawn_edge_moves(position, piece, board),
        Rank::King => king_edge_moves(position, piece, board),
    };
    for edge_move in edge_moves {
        let target = edge_move.captured[0];
        if captured_so_far.contains(&target) {
            continue;
        }
        extend_chain(piece, board, edge_move.to, target, captured_so_far, found);
    }
}

/// Add `target` to the chain, recurse from the landing square, then record
/// the landing itself. The chain is copied per branch, so sibling branches
/// never see each other's captures.
fn extend_chain(
    piece: Piece,
    board: &Board,
    landing: Coord,
    target: Coord,
    captured_so_far: &[Coord],
    found: &mut Vec<MoveOption>,
) {
    let mut chain = captured_so_far.to_vec();
    chain.push(target);

    search_captures(piece, board, landing, &chain, found);

    if chain.len() > 1 {
        found.push(MoveOption::capture(landing, chain));
    }
}
