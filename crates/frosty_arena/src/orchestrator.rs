//! Match orchestration between two move-providers.
//!
//! The orchestrator owns the board, the turn counter, the active mark and the
//! frozen cell. Each turn it draws the freeze, hands a [`Snapshot`] to the
//! active provider, validates and applies the reply, then re-evaluates the
//! board. Provider misbehavior never escapes [`Orchestrator::run`]: an illegal
//! move forfeits the turn and a failed request ends the match as a draw.

use crate::providers::MoveProvider;
use crate::sink::PresentationSink;
use crate::snapshot::Snapshot;
use derive_getters::Getters;
use derive_new::new;
use frosty_tictactoe::{
    Board, FreezeDice, Mark, MatchStatus, Move, Position, draw_frozen_cell, rules,
};
use tracing::{debug, error, info, instrument, warn};

/// Turns played before a match stuck on forfeits is called a draw.
pub const DEFAULT_TURN_LIMIT: u32 = 64;

/// Final result of a match.
#[derive(Debug, Clone, PartialEq, Eq, Getters, new)]
pub struct MatchOutcome {
    /// Terminal status; never [`MatchStatus::Ongoing`].
    status: MatchStatus,
    /// Name of the winning provider for a win.
    winner: Option<String>,
    /// Board at the end of the match.
    board: Board,
    /// Number of the last turn played.
    turns: u32,
}

/// Runs one match between two providers.
pub struct Orchestrator {
    board: Board,
    turn: u32,
    active: Mark,
    frozen: Option<Position>,
    status: MatchStatus,
    player_x: Box<dyn MoveProvider>,
    player_o: Box<dyn MoveProvider>,
    dice: Box<dyn FreezeDice>,
    turn_limit: u32,
}

impl std::fmt::Debug for Orchestrator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Orchestrator")
            .field("board", &self.board)
            .field("turn", &self.turn)
            .field("active", &self.active)
            .field("frozen", &self.frozen)
            .field("status", &self.status)
            .field("player_x", &self.player_x.name())
            .field("player_o", &self.player_o.name())
            .field("turn_limit", &self.turn_limit)
            .finish()
    }
}

impl Orchestrator {
    /// Creates a match with an empty board at turn 1, X to move.
    #[instrument(skip_all, fields(x = %player_x.name(), o = %player_o.name()))]
    pub fn new(
        player_x: Box<dyn MoveProvider>,
        player_o: Box<dyn MoveProvider>,
        dice: Box<dyn FreezeDice>,
    ) -> Self {
        debug!("Creating orchestrator");
        Self {
            board: Board::new(),
            turn: 1,
            active: Mark::X,
            frozen: None,
            status: MatchStatus::Ongoing,
            player_x,
            player_o,
            dice,
            turn_limit: DEFAULT_TURN_LIMIT,
        }
    }

    /// Caps the number of turns; reaching it without a result is a draw.
    pub fn with_turn_limit(mut self, limit: u32) -> Self {
        self.turn_limit = limit.max(1);
        self
    }

    fn player(&self, mark: Mark) -> &dyn MoveProvider {
        match mark {
            Mark::X => self.player_x.as_ref(),
            Mark::O => self.player_o.as_ref(),
        }
    }

    fn player_mut(&mut self, mark: Mark) -> &mut dyn MoveProvider {
        match mark {
            Mark::X => self.player_x.as_mut(),
            Mark::O => self.player_o.as_mut(),
        }
    }

    /// Runs the match to a terminal status.
    ///
    /// Every lifecycle notification goes to `sink`. Provider failures end the
    /// match as a draw instead of being returned.
    #[instrument(skip_all, fields(x = %self.player_x.name(), o = %self.player_o.name()))]
    pub async fn run(mut self, sink: &mut dyn PresentationSink) -> MatchOutcome {
        info!("Starting match");
        let x_name = self.player_x.name().to_string();
        let o_name = self.player_o.name().to_string();
        sink.on_match_start(&x_name, &o_name);
        sink.on_board_update(&self.board, None);

        while !self.status.is_terminal() {
            self.play_turn(sink).await;
        }

        let winner = self
            .status
            .winner()
            .map(|mark| self.player(mark).name().to_string());
        info!(status = %self.status, winner = ?winner, turns = self.turn, "Match over");
        sink.on_match_over(self.status, winner.as_deref());

        MatchOutcome::new(self.status, winner, self.board, self.turn)
    }

    /// Plays one turn: freeze, request, validate, apply, evaluate.
    #[instrument(skip_all, fields(turn = self.turn, mark = %self.active))]
    async fn play_turn(&mut self, sink: &mut dyn PresentationSink) {
        self.frozen = None;
        self.frozen = draw_frozen_cell(&self.board, self.turn, self.dice.as_mut());
        if let Some(pos) = self.frozen {
            info!(row = pos.row(), col = pos.col(), "Cell frozen this turn");
        }

        let snapshot = Snapshot::new(
            &self.board,
            self.frozen,
            self.turn,
            self.status,
            self.active,
        );
        let name = self.player(self.active).name().to_string();
        sink.on_move_requested(&name, self.frozen);

        debug!(player = %name, "Waiting for move");
        let active = self.active;
        let reply = match self.player_mut(active).request_move(&snapshot).await {
            Ok(reply) => reply,
            Err(e) => {
                error!(player = %name, error = %e, "Move request failed, ending match as a draw");
                sink.on_provider_error(&name, &e);
                self.status = MatchStatus::Draw;
                return;
            }
        };

        match rules::validate(&self.board, self.frozen, reply.mv) {
            Ok(pos) => {
                self.board.place(pos, self.active);
                info!(player = %name, row = pos.row(), col = pos.col(), "Move applied");
                sink.on_move_accepted(&name, Move::from(pos), reply.commentary());
            }
            Err(reason) => {
                warn!(player = %name, %reason, "Invalid move, turn forfeited");
                sink.on_invalid_move(&name, self.turn, &reason);
            }
        }

        sink.on_board_update(&self.board, self.frozen);
        self.status = rules::evaluate(&self.board);

        if self.status.is_terminal() {
            return;
        }

        if self.turn >= self.turn_limit {
            warn!(limit = self.turn_limit, "Turn limit reached, ending match as a draw");
            self.status = MatchStatus::Draw;
            return;
        }

        self.turn += 1;
        self.active = self.active.opponent();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::{MoveReply, ProviderError};
    use crate::sink::NullSink;
    use frosty_tictactoe::NeverFreeze;

    /// Provider that never proposes a move.
    struct Silent;

    #[async_trait::async_trait]
    impl MoveProvider for Silent {
        fn name(&self) -> &str {
            "Silent"
        }

        async fn request_move(&mut self, _snapshot: &Snapshot) -> Result<MoveReply, ProviderError> {
            Ok(MoveReply::without_move("..."))
        }
    }

    #[tokio::test]
    async fn test_forfeit_loop_hits_turn_limit() {
        let orchestrator =
            Orchestrator::new(Box::new(Silent), Box::new(Silent), Box::new(NeverFreeze))
                .with_turn_limit(12);

        let outcome = orchestrator.run(&mut NullSink).await;
        assert_eq!(*outcome.status(), MatchStatus::Draw);
        assert_eq!(*outcome.turns(), 12);
        assert_eq!(*outcome.winner(), None);
        assert_eq!(*outcome.board(), Board::new());
    }
}
