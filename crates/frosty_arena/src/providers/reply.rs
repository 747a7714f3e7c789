//! Parsing model output into a [`MoveReply`].

use super::ProviderError;
use frosty_tictactoe::Move;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use tracing::{debug, instrument, warn};

/// A provider's answer for one turn.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveReply {
    /// Proposed move; `None` when the model left it out.
    #[serde(default, rename = "move")]
    pub mv: Option<Move>,
    /// Taunt aimed at the opponent.
    #[serde(default, deserialize_with = "lenient_text")]
    pub trash_talk: Option<String>,
    /// Model's explanation, if it gave one.
    #[serde(default, deserialize_with = "lenient_text")]
    pub reasoning: Option<String>,
}

/// Reads a commentary field, dropping anything that is not a string.
fn lenient_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    match Value::deserialize(deserializer)? {
        Value::String(text) => Ok(Some(text)),
        Value::Null => Ok(None),
        other => {
            debug!(value = %other, "Ignoring non-string commentary");
            Ok(None)
        }
    }
}

impl MoveReply {
    /// A reply proposing `mv` with the given commentary.
    pub fn new(mv: Move, trash_talk: impl Into<String>) -> Self {
        Self {
            mv: Some(mv),
            trash_talk: Some(trash_talk.into()),
            reasoning: None,
        }
    }

    /// A well-formed reply that proposes nothing.
    pub fn without_move(trash_talk: impl Into<String>) -> Self {
        Self {
            mv: None,
            trash_talk: Some(trash_talk.into()),
            reasoning: None,
        }
    }

    /// Commentary to show alongside the move.
    pub fn commentary(&self) -> &str {
        self.trash_talk.as_deref().unwrap_or_default()
    }
}

/// Cuts model output down to the outermost JSON object.
///
/// Takes everything from the first `{` to the last `}`, dropping markdown
/// fences and surrounding chatter. Text without both braces is returned as is.
pub fn clean_response(raw: &str) -> &str {
    match (raw.find('{'), raw.rfind('}')) {
        (Some(start), Some(end)) if start < end => &raw[start..=end],
        _ => raw,
    }
}

/// Parses raw model output into a reply.
///
/// # Errors
///
/// Returns [`ProviderError`] if the cleaned text is not JSON or its `move`
/// is not a `{row, col}` object of numbers. Commentary fields of the wrong
/// type are dropped rather than failing the reply.
#[instrument(skip(raw), fields(raw_len = raw.len()))]
pub fn parse_reply(raw: &str) -> Result<MoveReply, ProviderError> {
    let cleaned = clean_response(raw);
    let reply: MoveReply = serde_json::from_str(cleaned).map_err(|e| {
        warn!(error = %e, response = %raw, "Unparsable provider reply");
        ProviderError::new(format!("Unparsable reply: {}", e))
    })?;
    debug!(mv = ?reply.mv, "Parsed provider reply");
    Ok(reply)
}
