//! Offline player for demos and smoke tests (no API calls).

use super::{MoveProvider, MoveReply, ProviderError};
use crate::snapshot::Snapshot;
use frosty_tictactoe::Move;
use std::time::Duration;
use tracing::{debug, instrument};

/// Player that takes the first playable cell in reading order.
#[derive(Debug, Clone)]
pub struct FirstEmptyPlayer {
    name: String,
    delay: Duration,
}

impl FirstEmptyPlayer {
    /// Creates a new first-empty player that answers immediately.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            delay: Duration::ZERO,
        }
    }

    /// Adds a pause before every answer to simulate thinking.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

#[async_trait::async_trait]
impl MoveProvider for FirstEmptyPlayer {
    fn name(&self) -> &str {
        &self.name
    }

    #[instrument(skip(self, snapshot), fields(player = %self.name, turn = snapshot.turn()))]
    async fn request_move(&mut self, snapshot: &Snapshot) -> Result<MoveReply, ProviderError> {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        let choice = snapshot
            .board()
            .empty_positions()
            .into_iter()
            .find(|pos| Some(*pos) != snapshot.frozen());

        match choice {
            Some(pos) => {
                debug!(position = %pos, "Chose first playable cell");
                Ok(MoveReply::new(Move::from(pos), format!("{} looked lonely.", pos.label())))
            }
            None => Ok(MoveReply::without_move("Nothing left to play.")),
        }
    }
}
