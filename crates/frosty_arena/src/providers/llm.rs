//! Move-provider backed by a remote language model.

use super::{MoveProvider, MoveReply, ProviderError, parse_reply};
use crate::llm_client::LlmClient;
use crate::snapshot::Snapshot;
use tracing::{debug, info, instrument};

/// Player that asks an LLM for each move.
#[derive(Debug, Clone)]
pub struct LlmPlayer {
    name: String,
    client: LlmClient,
}

impl LlmPlayer {
    /// Creates a new LLM player.
    #[instrument(skip(name, client), fields(provider = %client.config().provider(), model = %client.config().model()))]
    pub fn new(name: impl Into<String>, client: LlmClient) -> Self {
        let name = name.into();
        info!(player = %name, "Creating LLM player");
        Self { name, client }
    }

    /// System prompt casting the model as this player.
    pub fn persona(&self) -> String {
        format!(
            "You are a pro gamer named {}. Your response MUST be a single, valid JSON object \
             and nothing else. Analyze the following game data and provide your move.",
            self.name
        )
    }
}

#[async_trait::async_trait]
impl MoveProvider for LlmPlayer {
    fn name(&self) -> &str {
        &self.name
    }

    #[instrument(skip(self, snapshot), fields(player = %self.name, turn = snapshot.turn()))]
    async fn request_move(&mut self, snapshot: &Snapshot) -> Result<MoveReply, ProviderError> {
        debug!("Asking model for a move");
        let content = self
            .client
            .generate(&self.persona(), &snapshot.to_json_pretty())
            .await?;
        parse_reply(&content)
    }
}
