//! Immutable per-turn view of the match handed to a move-provider.

use derive_getters::Getters;
use frosty_tictactoe::{Board, Mark, MatchStatus, Move, Position};
use serde::Serialize;
use tracing::instrument;

/// Rules text sent with every snapshot.
pub const GAME_RULES: &str = "3x3 Tic-Tac-Toe. Win with 3 in a row (any direction). X goes first. \
On turns 1-7, there's a 33% chance a random empty cell gets frozen for the turn. \
You can't play on a frozen cell. No freezing on turns 8-9.";

/// Move priorities sent with every snapshot.
pub const TASK_INSTRUCTIONS: &str = "Analyze the `gameState.board`. The board is a multi-line string \
where '.' represents an empty cell. You MUST follow this priority: \
1. Find a move that wins the game. \
2. If no winning move, find a move that BLOCKS your opponent's winning move. \
3. If neither, find the best strategic move. \
4. You cannot play in the `frozenCell`.";

/// Reply shape requested from providers.
pub const RESPONSE_FORMAT: &str = "You must respond with a valid JSON object. The JSON must contain \
these exact keys: 'move' (an object with 'row' and 'col' keys), and 'trashTalk' (a short, biting taunt).";

/// Static context of a snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Getters)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotContext {
    /// Rules of the variant being played.
    game_rules: &'static str,
    /// Mark the receiving provider plays.
    your_mark: Mark,
}

/// Dynamic state of a snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Getters)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotState {
    /// Current turn, starting at 1.
    turn_number: u32,
    /// Board as `|`-separated rows, `.` for empty.
    board: String,
    /// Cell that may not be played this turn.
    frozen_cell: Option<Move>,
    /// Match status label.
    game_status: MatchStatus,
}

/// Instructions of a snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Getters)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotInstructions {
    /// What to decide.
    task: &'static str,
    /// How to answer.
    response_format: &'static str,
}

/// Everything a provider gets to decide one move.
///
/// Serializes to the provider-facing JSON payload:
///
/// ```json
/// {
///   "context": { "gameRules": "...", "yourMark": "X" },
///   "gameState": { "turnNumber": 1, "board": ".|.|.\n.|.|.\n.|.|.", "frozenCell": null, "gameStatus": "ongoing" },
///   "instructions": { "task": "...", "responseFormat": "..." }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    context: SnapshotContext,
    game_state: SnapshotState,
    instructions: SnapshotInstructions,
    #[serde(skip)]
    board: Board,
    #[serde(skip)]
    frozen: Option<Position>,
}

impl Snapshot {
    /// Assembles the snapshot for the provider playing `mark`.
    #[instrument(skip(board))]
    pub fn new(
        board: &Board,
        frozen: Option<Position>,
        turn: u32,
        status: MatchStatus,
        mark: Mark,
    ) -> Self {
        Self {
            context: SnapshotContext {
                game_rules: GAME_RULES,
                your_mark: mark,
            },
            game_state: SnapshotState {
                turn_number: turn,
                board: board.to_grid_string(),
                frozen_cell: frozen.map(Move::from),
                game_status: status,
            },
            instructions: SnapshotInstructions {
                task: TASK_INSTRUCTIONS,
                response_format: RESPONSE_FORMAT,
            },
            board: board.clone(),
            frozen,
        }
    }

    /// Static context.
    pub fn context(&self) -> &SnapshotContext {
        &self.context
    }

    /// Serialized game state.
    pub fn game_state(&self) -> &SnapshotState {
        &self.game_state
    }

    /// Instructions.
    pub fn instructions(&self) -> &SnapshotInstructions {
        &self.instructions
    }

    /// Board as typed squares, for in-process providers.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Frozen cell as a typed position, for in-process providers.
    pub fn frozen(&self) -> Option<Position> {
        self.frozen
    }

    /// Current turn number.
    pub fn turn(&self) -> u32 {
        self.game_state.turn_number
    }

    /// Pretty-printed JSON payload.
    pub fn to_json_pretty(&self) -> String {
        // Plain strings, integers and options; serialization cannot fail.
        serde_json::to_string_pretty(self).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_payload_shape() {
        let mut board = Board::new();
        board.place(Position::TopLeft, Mark::X);
        board.place(Position::Center, Mark::O);
        let snapshot = Snapshot::new(
            &board,
            Some(Position::BottomCenter),
            3,
            MatchStatus::Ongoing,
            Mark::X,
        );

        let value = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(value["context"]["gameRules"], json!(GAME_RULES));
        assert_eq!(value["context"]["yourMark"], json!("X"));
        assert_eq!(value["gameState"]["turnNumber"], json!(3));
        assert_eq!(value["gameState"]["board"], json!("X|.|.\n.|O|.\n.|.|."));
        assert_eq!(value["gameState"]["frozenCell"], json!({"row": 2, "col": 1}));
        assert_eq!(value["gameState"]["gameStatus"], json!("ongoing"));
        assert_eq!(value["instructions"]["task"], json!(TASK_INSTRUCTIONS));
        assert_eq!(value["instructions"]["responseFormat"], json!(RESPONSE_FORMAT));
        assert_eq!(value.as_object().unwrap().len(), 3);
    }

    #[test]
    fn test_no_frozen_cell_is_null() {
        let snapshot = Snapshot::new(&Board::new(), None, 1, MatchStatus::Ongoing, Mark::O);
        let value = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(value["gameState"]["frozenCell"], serde_json::Value::Null);
        assert_eq!(snapshot.frozen(), None);
        assert_eq!(snapshot.turn(), 1);
    }

    #[test]
    fn test_pretty_json_round_trips() {
        let snapshot = Snapshot::new(&Board::new(), None, 1, MatchStatus::Ongoing, Mark::X);
        let text = snapshot.to_json_pretty();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["gameState"]["turnNumber"], json!(1));
    }
}
