//! Plain-text sink for running a match in a terminal without the TUI.

use super::PresentationSink;
use crate::providers::ProviderError;
use frosty_tictactoe::{Board, IllegalMove, MatchStatus, Move, Position, Square};
use std::io::Write;
use tracing::warn;

/// Renders the board as three ` | `-joined rows, `❄` on the frozen cell.
pub fn render_board(board: &Board, frozen: Option<Position>) -> String {
    Position::ALL
        .chunks(3)
        .map(|row| {
            let cells: Vec<String> = row
                .iter()
                .map(|&pos| {
                    if Some(pos) == frozen {
                        "❄".to_string()
                    } else {
                        match board.get(pos) {
                            Square::Empty => " ".to_string(),
                            Square::Occupied(mark) => mark.to_string(),
                        }
                    }
                })
                .collect();
            format!("  {}", cells.join(" | "))
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Writes human-readable match progress to any writer.
#[derive(Debug)]
pub struct ConsoleSink<W> {
    out: W,
}

impl ConsoleSink<std::io::Stdout> {
    /// Sink printing to standard output.
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl<W: Write> ConsoleSink<W> {
    /// Sink writing to `out`.
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Consumes the sink, returning the writer.
    pub fn into_inner(self) -> W {
        self.out
    }

    fn line(&mut self, text: &str) {
        if let Err(e) = writeln!(self.out, "{}", text) {
            warn!(error = %e, "Failed to write match output");
        }
    }
}

impl<W: Write + Send> PresentationSink for ConsoleSink<W> {
    fn on_match_start(&mut self, x: &str, o: &str) {
        self.line(&format!("--- 🚀 GAME START: {} (X) vs. {} (O) ---", x, o));
    }

    fn on_board_update(&mut self, board: &Board, frozen: Option<Position>) {
        self.line("\nCurrent Board:");
        let rendered = render_board(board, frozen);
        self.line(&rendered);
    }

    fn on_move_requested(&mut self, player: &str, frozen: Option<Position>) {
        self.line(&format!(
            "\n ----------🤔 Asking {} for a move ----------",
            player
        ));
        if let Some(pos) = frozen {
            self.line(&format!("❄ {} is frozen this turn.", pos));
        }
    }

    fn on_move_accepted(&mut self, player: &str, mv: Move, commentary: &str) {
        self.line(&format!("{} plays {}", player, mv));
        if !commentary.is_empty() {
            self.line(&format!("{} 🎤 {}", player, commentary));
        }
    }

    fn on_invalid_move(&mut self, player: &str, turn: u32, reason: &IllegalMove) {
        self.line(&format!(
            "[Turn {}] ⚠️ {} made an invalid move! Skipping turn. ({})",
            turn, player, reason
        ));
    }

    fn on_provider_error(&mut self, player: &str, error: &ProviderError) {
        self.line(&format!(
            "❌ Game cannot continue due to an API error from {}.",
            player
        ));
        self.line(&format!("   {}", error.message));
    }

    fn on_match_over(&mut self, status: MatchStatus, winner: Option<&str>) {
        self.line("\n--- 🏁 GAME OVER ---");
        match (status.winner(), winner) {
            (Some(mark), Some(name)) => {
                self.line(&format!("🏆 Winner is: {} ({})!", name, mark));
            }
            _ => self.line("It's a draw! Well played by both sides."),
        }
        if let Err(e) = self.out.flush() {
            warn!(error = %e, "Failed to flush match output");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use frosty_tictactoe::Mark;

    fn output(sink: ConsoleSink<Vec<u8>>) -> String {
        String::from_utf8(sink.into_inner()).unwrap()
    }

    #[test]
    fn test_render_board_marks_frozen_cell() {
        let mut board = Board::new();
        board.place(Position::TopLeft, Mark::X);
        board.place(Position::Center, Mark::O);

        let rendered = render_board(&board, Some(Position::BottomRight));
        assert_eq!(rendered, "  X |   |  \n    | O |  \n    |   | ❄");
    }

    #[test]
    fn test_banners() {
        let mut sink = ConsoleSink::new(Vec::new());
        sink.on_match_start("ChatGPT", "Gemini");
        sink.on_match_over(MatchStatus::Won(Mark::O), Some("Gemini"));

        let text = output(sink);
        assert!(text.contains("--- 🚀 GAME START: ChatGPT (X) vs. Gemini (O) ---"));
        assert!(text.contains("🏆 Winner is: Gemini (O)!"));
    }

    #[test]
    fn test_invalid_move_and_draw() {
        let mut sink = ConsoleSink::new(Vec::new());
        sink.on_invalid_move("Deepseek", 3, &IllegalMove::Missing);
        sink.on_match_over(MatchStatus::Draw, None);

        let text = output(sink);
        assert!(text.contains("[Turn 3] ⚠️ Deepseek made an invalid move! Skipping turn."));
        assert!(text.contains("It's a draw! Well played by both sides."));
    }

    #[test]
    fn test_move_request_announces_frozen_cell() {
        let mut sink = ConsoleSink::new(Vec::new());
        sink.on_move_requested("Gemini", Some(Position::TopRight));
        sink.on_move_requested("ChatGPT", None);

        let text = output(sink);
        assert!(text.contains("🤔 Asking Gemini for a move"));
        assert_eq!(text.matches("is frozen this turn").count(), 1);
        assert!(text.contains(&format!("❄ {} is frozen this turn.", Position::TopRight)));
    }

    #[test]
    fn test_provider_error_message() {
        let mut sink = ConsoleSink::new(Vec::new());
        sink.on_provider_error("Claude", &ProviderError::new("timed out"));

        let text = output(sink);
        assert!(text.contains("❌ Game cannot continue due to an API error from Claude."));
        assert!(text.contains("timed out"));
    }
}
