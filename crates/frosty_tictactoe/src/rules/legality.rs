//! Move legality.

use crate::{Board, Move, Position};
use derive_more::{Display, Error};
use tracing::{debug, instrument};

/// Why a proposed move was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
pub enum IllegalMove {
    /// The provider's reply carried no move.
    #[display("no move was proposed")]
    Missing,
    /// A coordinate is outside 0-2.
    #[display("({row}, {col}) is off the board")]
    OutOfRange {
        /// Proposed row.
        row: i64,
        /// Proposed column.
        col: i64,
    },
    /// The cell is frozen for this turn.
    #[display("{_0} is frozen this turn")]
    Frozen(#[error(not(source))] Position),
    /// The cell already holds a mark.
    #[display("{_0} is already occupied")]
    Occupied(#[error(not(source))] Position),
}

/// Validates a proposed move against the board and the current frozen cell.
///
/// A move is legal iff both coordinates are in 0-2, the target is not the
/// frozen cell, and the target is empty. The frozen check comes first so a
/// frozen target is rejected as frozen whatever it holds.
#[instrument(skip(board))]
pub fn validate(
    board: &Board,
    frozen: Option<Position>,
    candidate: Option<Move>,
) -> Result<Position, IllegalMove> {
    let mv = candidate.ok_or(IllegalMove::Missing)?;
    let pos = mv.position().ok_or(IllegalMove::OutOfRange {
        row: mv.row,
        col: mv.col,
    })?;

    if frozen == Some(pos) {
        debug!(%pos, "Move targets the frozen cell");
        return Err(IllegalMove::Frozen(pos));
    }

    if !board.is_empty(pos) {
        debug!(%pos, "Move targets an occupied cell");
        return Err(IllegalMove::Occupied(pos));
    }

    Ok(pos)
}
