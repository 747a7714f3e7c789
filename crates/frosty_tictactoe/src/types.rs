//! Core domain types for tic-tac-toe.

use crate::position::Position;
use serde::{Deserialize, Serialize, Serializer};
use strum::IntoEnumIterator;
use tracing::instrument;

/// Mark placed by a player. X always moves first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display)]
pub enum Mark {
    /// First player.
    X,
    /// Second player.
    O,
}

impl Mark {
    /// Returns the opposing mark.
    pub fn opponent(self) -> Self {
        match self {
            Mark::X => Mark::O,
            Mark::O => Mark::X,
        }
    }
}

/// A square on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Square {
    /// Empty square.
    Empty,
    /// Square holding a mark.
    Occupied(Mark),
}

/// 3x3 tic-tac-toe board.
///
/// Squares only ever go from [`Square::Empty`] to [`Square::Occupied`].
/// The frozen cell is not stored here; it is an overlay owned by the match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    squares: [Square; 9],
}

impl Board {
    /// Creates an empty board.
    pub fn new() -> Self {
        Self {
            squares: [Square::Empty; 9],
        }
    }

    /// Returns the square at `pos`.
    pub fn get(&self, pos: Position) -> Square {
        self.squares[pos.to_index()]
    }

    /// Checks whether `pos` is empty.
    pub fn is_empty(&self, pos: Position) -> bool {
        self.get(pos) == Square::Empty
    }

    /// Writes `mark` at `pos`.
    ///
    /// Callers validate first (see [`crate::rules::validate`]); this does
    /// not re-check occupancy.
    #[instrument(skip(self))]
    pub fn place(&mut self, pos: Position, mark: Mark) {
        self.squares[pos.to_index()] = Square::Occupied(mark);
    }

    /// Returns all squares in row-major order.
    pub fn squares(&self) -> &[Square; 9] {
        &self.squares
    }

    /// Returns every empty position in reading order.
    pub fn empty_positions(&self) -> Vec<Position> {
        Position::iter().filter(|pos| self.is_empty(*pos)).collect()
    }

    /// Returns `true` once no square is empty.
    pub fn is_full(&self) -> bool {
        self.squares.iter().all(|s| *s != Square::Empty)
    }

    /// Serializes the board as three `|`-separated rows joined by newlines.
    ///
    /// Empty squares are written as `.`:
    ///
    /// ```text
    /// X|.|.
    /// .|O|.
    /// .|.|.
    /// ```
    pub fn to_grid_string(&self) -> String {
        self.squares
            .chunks(3)
            .map(|row| {
                row.iter()
                    .map(|sq| match sq {
                        Square::Empty => ".",
                        Square::Occupied(Mark::X) => "X",
                        Square::Occupied(Mark::O) => "O",
                    })
                    .collect::<Vec<_>>()
                    .join("|")
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

/// Status of a match.
///
/// `Won` and `Draw` are terminal: once reached the status never changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MatchStatus {
    /// Match is still being played.
    #[default]
    Ongoing,
    /// A mark completed a line.
    Won(Mark),
    /// Board filled without a line, or the match was abandoned.
    Draw,
}

impl MatchStatus {
    /// Returns the provider-facing status label.
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchStatus::Ongoing => "ongoing",
            MatchStatus::Won(Mark::X) => "X_wins",
            MatchStatus::Won(Mark::O) => "O_wins",
            MatchStatus::Draw => "draw",
        }
    }

    /// Returns `true` for `Won` and `Draw`.
    pub fn is_terminal(&self) -> bool {
        *self != MatchStatus::Ongoing
    }

    /// Returns the winning mark, if any.
    pub fn winner(&self) -> Option<Mark> {
        match self {
            MatchStatus::Won(mark) => Some(*mark),
            _ => None,
        }
    }
}

impl std::fmt::Display for MatchStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for MatchStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}
