use crate::board::Board;
use crate::movegen;
use crate::moves::{Coord, MoveOption, MoveRecord};
use crate::policy;

/// Legal destinations for the piece at `from`. Thin front over the
/// generation pipeline so callers never reach into it directly.
pub fn valid_moves(board: &Board, from: Coord) -> Vec<MoveOption> {
    movegen::valid_moves(board, from)
}

/// Validate and execute a move. `None` when there is no piece at `from` or
/// `to` is not among the generated destinations; nothing is touched in that
/// case. On success the piece is relocated, every captured square emptied,
/// and the piece promoted when it arrives on its promotion row.
///
/// When several options share a destination the first one in pipeline order
/// wins, which prefers the multi-capture chain over a plain move to the
/// same square.
pub fn perform_move(board: &mut Board, from: Coord, to: Coord) -> Option<MoveRecord> {
    let mut piece = board.piece_at(from)?;

    let chosen = movegen::valid_moves(board, from)
        .into_iter()
        .find(|option| option.to == to)?;

    board.set_piece(from, None);
    for capture in &chosen.captured {
        board.set_piece(*capture, None);
    }

    let promoted = policy::should_promote(piece, to.row, board.size());
    if promoted {
        piece.promote();
    }
    board.set_piece(to, Some(piece));

    Some(MoveRecord {
        captured: chosen.captured,
        promoted,
    })
}
