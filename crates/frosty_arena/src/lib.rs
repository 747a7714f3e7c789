//! Frosty Arena: AI-vs-AI tic-tac-toe with a frozen-cell twist.
//!
//! # Architecture
//!
//! - **Orchestrator**: owns the match state and drives the turn loop
//! - **Providers**: move sources behind [`MoveProvider`] (LLM backends, local bot)
//! - **Snapshot**: the per-turn JSON view handed to providers
//! - **Sinks**: presentation of match events (console, channel, TUI)
//! - **Config**: player presets and TOML player files
//!
//! # Example
//!
//! ```
//! use frosty_arena::{ChannelSink, FirstEmptyPlayer, Orchestrator};
//! use frosty_tictactoe::{MatchStatus, Mark, NeverFreeze};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let orchestrator = Orchestrator::new(
//!     Box::new(FirstEmptyPlayer::new("Lefty")),
//!     Box::new(FirstEmptyPlayer::new("Righty")),
//!     Box::new(NeverFreeze),
//! );
//! let (mut sink, _events) = ChannelSink::channel();
//! let outcome = orchestrator.run(&mut sink).await;
//! assert_eq!(*outcome.status(), MatchStatus::Won(Mark::X));
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod config;
mod llm_client;
mod orchestrator;
mod providers;
mod sink;
mod snapshot;

pub mod tui;

// Crate-level exports - Configuration
pub use config::{Backend, ConfigError, PRESETS, PlayerConfig, Preset};

// Crate-level exports - LLM client
pub use llm_client::{LlmClient, LlmConfig, LlmError, LlmProvider};

// Crate-level exports - Orchestration
pub use orchestrator::{DEFAULT_TURN_LIMIT, MatchOutcome, Orchestrator};

// Crate-level exports - Move providers
pub use providers::{
    FirstEmptyPlayer, LlmPlayer, MoveProvider, MoveReply, ProviderError, clean_response,
    from_config, parse_reply,
};

// Crate-level exports - Presentation
pub use sink::{ChannelSink, ConsoleSink, MatchEvent, NullSink, PresentationSink, render_board};

// Crate-level exports - Snapshot
pub use snapshot::{
    GAME_RULES, RESPONSE_FORMAT, Snapshot, SnapshotContext, SnapshotInstructions, SnapshotState,
    TASK_INSTRUCTIONS,
};
