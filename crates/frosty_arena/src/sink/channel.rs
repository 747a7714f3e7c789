//! Sink that forwards notifications over a channel (used by the TUI).

use super::PresentationSink;
use crate::providers::ProviderError;
use frosty_tictactoe::{Board, IllegalMove, MatchStatus, Move, Position};
use tokio::sync::mpsc;
use tracing::warn;

/// Messages sent from orchestrator to UI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchEvent {
    /// Match started.
    MatchStarted {
        /// Name of the X player.
        x: String,
        /// Name of the O player.
        o: String,
    },
    /// Board (and frozen cell) changed.
    BoardUpdated {
        /// Current board.
        board: Board,
        /// Cell frozen this turn.
        frozen: Option<Position>,
    },
    /// Provider is thinking.
    MoveRequested {
        /// Provider being asked.
        player: String,
        /// Cell frozen for this request.
        frozen: Option<Position>,
    },
    /// Move was made.
    MoveAccepted {
        /// Provider that moved.
        player: String,
        /// Applied move.
        mv: Move,
        /// Provider's commentary.
        commentary: String,
    },
    /// Turn forfeited.
    InvalidMove {
        /// Provider that forfeited.
        player: String,
        /// Forfeited turn number.
        turn: u32,
        /// Why the move was rejected.
        reason: IllegalMove,
    },
    /// Move request failed.
    ProviderFailed {
        /// Failing provider.
        player: String,
        /// Failure description.
        error: String,
    },
    /// Match ended.
    MatchOver {
        /// Terminal status.
        status: MatchStatus,
        /// Winner's name for a win.
        winner: Option<String>,
    },
}

/// Forwards each hook as a [`MatchEvent`].
#[derive(Debug, Clone)]
pub struct ChannelSink {
    tx: mpsc::UnboundedSender<MatchEvent>,
}

impl ChannelSink {
    /// Creates a sink sending into `tx`.
    pub fn new(tx: mpsc::UnboundedSender<MatchEvent>) -> Self {
        Self { tx }
    }

    /// Creates a sink together with its receiving end.
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<MatchEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self::new(tx), rx)
    }

    fn send(&self, event: MatchEvent) {
        if let Err(e) = self.tx.send(event) {
            warn!(event = ?e.0, "Match event receiver closed");
        }
    }
}

impl PresentationSink for ChannelSink {
    fn on_match_start(&mut self, x: &str, o: &str) {
        self.send(MatchEvent::MatchStarted {
            x: x.to_string(),
            o: o.to_string(),
        });
    }

    fn on_board_update(&mut self, board: &Board, frozen: Option<Position>) {
        self.send(MatchEvent::BoardUpdated {
            board: board.clone(),
            frozen,
        });
    }

    fn on_move_requested(&mut self, player: &str, frozen: Option<Position>) {
        self.send(MatchEvent::MoveRequested {
            player: player.to_string(),
            frozen,
        });
    }

    fn on_move_accepted(&mut self, player: &str, mv: Move, commentary: &str) {
        self.send(MatchEvent::MoveAccepted {
            player: player.to_string(),
            mv,
            commentary: commentary.to_string(),
        });
    }

    fn on_invalid_move(&mut self, player: &str, turn: u32, reason: &IllegalMove) {
        self.send(MatchEvent::InvalidMove {
            player: player.to_string(),
            turn,
            reason: *reason,
        });
    }

    fn on_provider_error(&mut self, player: &str, error: &ProviderError) {
        self.send(MatchEvent::ProviderFailed {
            player: player.to_string(),
            error: error.message.clone(),
        });
    }

    fn on_match_over(&mut self, status: MatchStatus, winner: Option<&str>) {
        self.send(MatchEvent::MatchOver {
            status,
            winner: winner.map(str::to_string),
        });
    }
}
