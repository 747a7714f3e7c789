//! Application state and logic.

use crate::sink::MatchEvent;
use frosty_tictactoe::{Board, MatchStatus, Position};
use std::collections::VecDeque;
use tracing::debug;

/// Log lines kept for the commentary panel.
const LOG_CAPACITY: usize = 200;

/// Main application state, rebuilt purely from [`MatchEvent`]s.
#[derive(Debug, Clone)]
pub struct App {
    board: Board,
    frozen: Option<Position>,
    player_x: String,
    player_o: String,
    thinking: Option<String>,
    status: MatchStatus,
    status_message: String,
    log: VecDeque<String>,
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

impl App {
    /// Creates a new application.
    pub fn new() -> Self {
        Self {
            board: Board::new(),
            frozen: None,
            player_x: "X".to_string(),
            player_o: "O".to_string(),
            thinking: None,
            status: MatchStatus::Ongoing,
            status_message: "Waiting for match to start...".to_string(),
            log: VecDeque::new(),
        }
    }

    /// Current board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Cell frozen on the current turn.
    pub fn frozen(&self) -> Option<Position> {
        self.frozen
    }

    /// Title line naming both players.
    pub fn matchup(&self) -> String {
        format!("{} (X) vs. {} (O)", self.player_x, self.player_o)
    }

    /// Gets the current status message.
    pub fn status_message(&self) -> &str {
        &self.status_message
    }

    /// Commentary log, oldest first.
    pub fn log(&self) -> impl Iterator<Item = &str> {
        self.log.iter().map(String::as_str)
    }

    /// Returns `true` once the match has a terminal status.
    pub fn is_over(&self) -> bool {
        self.status.is_terminal()
    }

    fn push_log(&mut self, line: String) {
        if self.log.len() == LOG_CAPACITY {
            self.log.pop_front();
        }
        self.log.push_back(line);
    }

    /// Handles a match event from the orchestrator.
    pub fn handle_event(&mut self, event: MatchEvent) {
        debug!(?event, "Handling match event");

        match event {
            MatchEvent::MatchStarted { x, o } => {
                self.push_log(format!("🚀 {} (X) vs. {} (O)", x, o));
                self.player_x = x;
                self.player_o = o;
                self.status_message = "Match started".to_string();
            }
            MatchEvent::BoardUpdated { board, frozen } => {
                self.board = board;
                self.frozen = frozen;
            }
            MatchEvent::MoveRequested { player, frozen } => {
                self.status_message = format!("{} is thinking...", player);
                self.thinking = Some(player);
                self.frozen = frozen;
            }
            MatchEvent::MoveAccepted {
                player,
                mv,
                commentary,
            } => {
                let label = mv.position().map(|p| p.label()).unwrap_or("?");
                self.status_message = format!("{} played {}", player, label);
                if commentary.is_empty() {
                    self.push_log(format!("{} played {}", player, label));
                } else {
                    self.push_log(format!("{} 🎤 {}", player, commentary));
                }
                self.thinking = None;
            }
            MatchEvent::InvalidMove {
                player,
                turn,
                reason,
            } => {
                self.push_log(format!(
                    "[Turn {}] ⚠️ {} made an invalid move ({}). Skipping turn.",
                    turn, player, reason
                ));
                self.thinking = None;
            }
            MatchEvent::ProviderFailed { player, error } => {
                self.push_log(format!("❌ API error from {}: {}", player, error));
                self.thinking = None;
            }
            MatchEvent::MatchOver { status, winner } => {
                self.status = status;
                self.frozen = None;
                self.status_message = match winner {
                    Some(name) => format!("🏆 {} wins! Press 'q' to quit.", name),
                    None => "It's a draw! Press 'q' to quit.".to_string(),
                };
                self.push_log("🏁 Game over".to_string());
            }
        }
    }
}
