//! Presentation sinks: where match lifecycle notifications go.
//!
//! The orchestrator calls these hooks synchronously at fixed points and never
//! looks at what they do. Every hook defaults to a no-op so a sink only
//! implements what it renders.

mod channel;
mod console;

pub use channel::{ChannelSink, MatchEvent};
pub use console::{ConsoleSink, render_board};

use crate::providers::ProviderError;
use frosty_tictactoe::{Board, IllegalMove, MatchStatus, Move, Position};

/// Receiver of match lifecycle notifications.
pub trait PresentationSink: Send {
    /// Match is about to start between `x` and `o`.
    fn on_match_start(&mut self, _x: &str, _o: &str) {}

    /// Full board plus this turn's frozen cell. Called once before the first
    /// turn and once after every turn.
    fn on_board_update(&mut self, _board: &Board, _frozen: Option<Position>) {}

    /// `player` is being asked for a move while `frozen` is unplayable.
    fn on_move_requested(&mut self, _player: &str, _frozen: Option<Position>) {}

    /// `player`'s move was applied.
    fn on_move_accepted(&mut self, _player: &str, _mv: Move, _commentary: &str) {}

    /// `player` forfeited `turn` with an illegal or missing move.
    fn on_invalid_move(&mut self, _player: &str, _turn: u32, _reason: &IllegalMove) {}

    /// The move request to `player` failed; the match ends as a draw.
    fn on_provider_error(&mut self, _player: &str, _error: &ProviderError) {}

    /// Terminal status, with the winner's name for a win.
    fn on_match_over(&mut self, _status: MatchStatus, _winner: Option<&str>) {}
}

/// Sink that drops every notification.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl PresentationSink for NullSink {}
