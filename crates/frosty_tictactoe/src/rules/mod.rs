//! Game rules for tic-tac-toe.
//!
//! Pure functions over a [`Board`](crate::Board): line detection, the
//! full-board check and move legality. The match loop composes them; none of
//! them mutate state.

pub mod draw;
pub mod legality;
pub mod win;

pub use draw::is_full;
pub use legality::{IllegalMove, validate};
pub use win::check_winner;

use crate::{Board, MatchStatus};
use tracing::instrument;

/// Evaluates the board after a turn.
///
/// A completed line wins even when the same move fills the board.
#[instrument(skip(board))]
pub fn evaluate(board: &Board) -> MatchStatus {
    if let Some(mark) = check_winner(board) {
        MatchStatus::Won(mark)
    } else if is_full(board) {
        MatchStatus::Draw
    } else {
        MatchStatus::Ongoing
    }
}
