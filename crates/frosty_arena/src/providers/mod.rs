//! Move-provider trait and implementations.
//!
//! The orchestrator only sees [`MoveProvider`]. Each adapter turns a
//! [`Snapshot`] into its own wire request and its own response back into a
//! [`MoveReply`].

mod first_empty;
mod llm;
mod reply;

pub use first_empty::FirstEmptyPlayer;
pub use llm::LlmPlayer;
pub use reply::{MoveReply, clean_response, parse_reply};

use crate::config::{Backend, ConfigError, PlayerConfig};
use crate::llm_client::{LlmClient, LlmError};
use crate::snapshot::Snapshot;
use derive_more::{Display, Error};
use tracing::{info, instrument};

/// A source of moves, usually a remote model.
#[async_trait::async_trait]
pub trait MoveProvider: Send {
    /// Returns the provider's display name.
    fn name(&self) -> &str;

    /// Requests a move for the given snapshot.
    ///
    /// An `Ok` reply may still carry an illegal or missing move; that is for
    /// the match to judge. `Err` means the exchange itself failed.
    async fn request_move(&mut self, snapshot: &Snapshot) -> Result<MoveReply, ProviderError>;
}

/// Builds the provider described by `config`.
///
/// # Errors
///
/// Returns [`ConfigError`] if the backend's API key is not set.
#[instrument(skip(config), fields(name = %config.name(), backend = ?config.backend()))]
pub fn from_config(config: &PlayerConfig) -> Result<Box<dyn MoveProvider>, ConfigError> {
    let provider: Box<dyn MoveProvider> = match config.backend() {
        Backend::Local => Box::new(FirstEmptyPlayer::new(config.name().clone())),
        _ => {
            let llm_config = config.create_llm_config()?;
            Box::new(LlmPlayer::new(config.name().clone(), LlmClient::new(llm_config)))
        }
    };
    info!("Move-provider ready");
    Ok(provider)
}

/// Failure of a move request: transport, timeout or unparsable reply.
#[derive(Debug, Clone, Display, Error)]
#[display("Provider error: {} at {}:{}", message, file, line)]
pub struct ProviderError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ProviderError {
    /// Creates a new provider error.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}

impl From<LlmError> for ProviderError {
    #[track_caller]
    fn from(err: LlmError) -> Self {
        Self::new(err.message)
    }
}
