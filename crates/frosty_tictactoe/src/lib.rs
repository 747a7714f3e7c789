//! Pure tic-tac-toe rules for AI-vs-AI matches.
//!
//! Everything here is synchronous and free of I/O: board storage, the
//! eight-line win check, move legality and the frozen-cell draw. The match
//! loop that sequences move-providers lives in `frosty_arena`.
//!
//! # Example
//!
//! ```
//! use frosty_tictactoe::{rules, Board, Mark, MatchStatus, Move};
//!
//! let mut board = Board::new();
//! for col in 0..3 {
//!     let pos = rules::validate(&board, None, Some(Move::new(0, col))).unwrap();
//!     board.place(pos, Mark::X);
//! }
//! assert_eq!(rules::evaluate(&board), MatchStatus::Won(Mark::X));
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod frost;
mod position;
pub mod rules;
mod types;

pub use frost::{FreezeDice, NeverFreeze, RngDice, draw_frozen_cell};
pub use position::{Move, OFF_BOARD, Position};
pub use rules::IllegalMove;
pub use types::{Board, Mark, MatchStatus, Square};
