//! Board coordinates: validated [`Position`]s and raw provider [`Move`]s.

use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// A cell on the board, addressed in reading order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::EnumIter)]
pub enum Position {
    /// Row 0, column 0.
    TopLeft,
    /// Row 0, column 1.
    TopCenter,
    /// Row 0, column 2.
    TopRight,
    /// Row 1, column 0.
    MiddleLeft,
    /// Row 1, column 1.
    Center,
    /// Row 1, column 2.
    MiddleRight,
    /// Row 2, column 0.
    BottomLeft,
    /// Row 2, column 1.
    BottomCenter,
    /// Row 2, column 2.
    BottomRight,
}

impl Position {
    /// All 9 positions in reading order.
    pub const ALL: [Position; 9] = [
        Position::TopLeft,
        Position::TopCenter,
        Position::TopRight,
        Position::MiddleLeft,
        Position::Center,
        Position::MiddleRight,
        Position::BottomLeft,
        Position::BottomCenter,
        Position::BottomRight,
    ];

    /// Get label for this position (for display).
    pub fn label(&self) -> &'static str {
        match self {
            Position::TopLeft => "Top-left",
            Position::TopCenter => "Top-center",
            Position::TopRight => "Top-right",
            Position::MiddleLeft => "Middle-left",
            Position::Center => "Center",
            Position::MiddleRight => "Middle-right",
            Position::BottomLeft => "Bottom-left",
            Position::BottomCenter => "Bottom-center",
            Position::BottomRight => "Bottom-right",
        }
    }

    /// Converts position to board index (0-8).
    pub fn to_index(self) -> usize {
        self as usize
    }

    /// Creates position from board index.
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Row of this position (0-2).
    pub fn row(self) -> u8 {
        (self.to_index() / 3) as u8
    }

    /// Column of this position (0-2).
    pub fn col(self) -> u8 {
        (self.to_index() % 3) as u8
    }

    /// Creates a position from signed coordinates, `None` when off the board.
    #[instrument]
    pub fn from_row_col(row: i64, col: i64) -> Option<Self> {
        if !(0..3).contains(&row) || !(0..3).contains(&col) {
            return None;
        }
        Self::from_index((row * 3 + col) as usize)
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// A move as proposed by a provider.
///
/// Coordinates are signed and unchecked: out-of-range values must survive
/// parsing so the match can reject them as illegal instead of failing.
/// Any number deserializes; whole floats like `1.0` become the integer and
/// every other number becomes [`OFF_BOARD`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display)]
#[display("({row}, {col})")]
pub struct Move {
    /// Row index, legal range 0-2.
    #[serde(deserialize_with = "coordinate")]
    pub row: i64,
    /// Column index, legal range 0-2.
    #[serde(deserialize_with = "coordinate")]
    pub col: i64,
}

/// Coordinate given to numbers that have no integer value.
pub const OFF_BOARD: i64 = i64::MAX;

fn coordinate<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
    struct CoordinateVisitor;

    impl Visitor<'_> for CoordinateVisitor {
        type Value = i64;

        fn expecting(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            f.write_str("a number")
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<i64, E> {
            Ok(v)
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<i64, E> {
            Ok(i64::try_from(v).unwrap_or(OFF_BOARD))
        }

        fn visit_f64<E: de::Error>(self, v: f64) -> Result<i64, E> {
            // i64::MAX as f64 rounds up to 2^63, so the upper bound is exclusive.
            if v.is_finite() && v.fract() == 0.0 && v >= i64::MIN as f64 && v < i64::MAX as f64 {
                Ok(v as i64)
            } else {
                Ok(OFF_BOARD)
            }
        }
    }

    deserializer.deserialize_any(CoordinateVisitor)
}

impl Move {
    /// Creates a move.
    pub fn new(row: i64, col: i64) -> Self {
        Self { row, col }
    }

    /// Returns the board position, `None` when off the board.
    pub fn position(&self) -> Option<Position> {
        Position::from_row_col(self.row, self.col)
    }
}

impl From<Position> for Move {
    fn from(pos: Position) -> Self {
        Self::new(i64::from(pos.row()), i64::from(pos.col()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_col_round_trip() {
        for pos in Position::ALL {
            let mv = Move::from(pos);
            assert_eq!(mv.position(), Some(pos));
        }
    }

    #[test]
    fn test_corners() {
        assert_eq!(Position::from_row_col(0, 0), Some(Position::TopLeft));
        assert_eq!(Position::from_row_col(0, 2), Some(Position::TopRight));
        assert_eq!(Position::from_row_col(2, 0), Some(Position::BottomLeft));
        assert_eq!(Position::from_row_col(2, 2), Some(Position::BottomRight));
    }

    #[test]
    fn test_off_board() {
        assert_eq!(Position::from_row_col(5, 0), None);
        assert_eq!(Position::from_row_col(0, 3), None);
        assert_eq!(Position::from_row_col(-1, 1), None);
        assert_eq!(Move::new(1, -2).position(), None);
    }

    #[test]
    fn test_index_order() {
        assert_eq!(Position::TopLeft.to_index(), 0);
        assert_eq!(Position::Center.to_index(), 4);
        assert_eq!(Position::BottomRight.to_index(), 8);
        assert_eq!(Position::from_index(9), None);
        assert_eq!(Position::MiddleRight.row(), 1);
        assert_eq!(Position::MiddleRight.col(), 2);
    }

    #[test]
    fn test_move_deserializes_negative() {
        let mv: Move = serde_json::from_str(r#"{"row": -1, "col": 7}"#).unwrap();
        assert_eq!(mv, Move::new(-1, 7));
        assert_eq!(mv.to_string(), "(-1, 7)");
    }

    #[test]
    fn test_move_accepts_whole_floats() {
        let mv: Move = serde_json::from_str(r#"{"row": 1.0, "col": 2}"#).unwrap();
        assert_eq!(mv, Move::new(1, 2));
        assert_eq!(mv.position(), Some(Position::MiddleRight));
    }

    #[test]
    fn test_move_fractional_is_off_board() {
        let mv: Move = serde_json::from_str(r#"{"row": 1.5, "col": 0}"#).unwrap();
        assert_eq!(mv.row, OFF_BOARD);
        assert_eq!(mv.position(), None);

        let mv: Move = serde_json::from_str(r#"{"row": 0, "col": 18446744073709551615}"#).unwrap();
        assert_eq!(mv.col, OFF_BOARD);
        assert_eq!(mv.position(), None);
    }

    #[test]
    fn test_move_rejects_non_numbers() {
        assert!(serde_json::from_str::<Move>(r#"{"row": "one", "col": 1}"#).is_err());
        assert!(serde_json::from_str::<Move>(r#"{"row": null, "col": 1}"#).is_err());
    }
}
