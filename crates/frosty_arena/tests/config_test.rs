//! Player configuration files and provider construction.

use frosty_arena::{Backend, MoveProvider, PlayerConfig, Snapshot, from_config};
use frosty_tictactoe::{Board, Mark, MatchStatus, Move};
use std::io::Write;
use tempfile::NamedTempFile;

fn write_config(contents: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(".toml")
        .tempfile()
        .expect("failed to create temp file");
    file.write_all(contents.as_bytes()).expect("failed to write config");
    file
}

#[test]
fn test_load_player_file() {
    let file = write_config(
        r#"
name = "Claude"
provider = "anthropic"
model = "claude-3-5-sonnet-latest"
max_tokens = 300
timeout_secs = 10
base_url = "http://localhost:9999"
"#,
    );

    let config = PlayerConfig::from_file(file.path()).unwrap();
    assert_eq!(config.name(), "Claude");
    assert_eq!(*config.backend(), Backend::Anthropic);
    assert_eq!(config.model_or_default(), "claude-3-5-sonnet-latest");
    assert_eq!(*config.max_tokens(), 300);
    assert_eq!(*config.timeout_secs(), 10);
    assert_eq!(config.base_url().as_deref(), Some("http://localhost:9999"));
}

#[test]
fn test_resolve_prefers_existing_file() {
    let file = write_config(
        r#"
name = "Bot"
provider = "local"
"#,
    );

    let config = PlayerConfig::resolve(file.path().to_str().unwrap()).unwrap();
    assert_eq!(config.name(), "Bot");
    assert_eq!(*config.backend(), Backend::Local);
}

#[test]
fn test_resolve_falls_back_to_preset() {
    let config = PlayerConfig::resolve("deepseek").unwrap();
    assert_eq!(config.name(), "Deepseek");
    assert_eq!(*config.backend(), Backend::DeepSeek);
    assert_eq!(config.model_or_default(), "deepseek-chat");
}

#[test]
fn test_missing_file_is_config_error() {
    let err = PlayerConfig::resolve("no/such/player.toml").unwrap_err();
    assert!(err.message.contains("Failed to read config file"));
}

#[test]
fn test_malformed_file_is_config_error() {
    let file = write_config("name = \"Bot\"\n");
    let err = PlayerConfig::from_file(file.path()).unwrap_err();
    assert!(err.message.contains("Failed to parse config"));
}

#[tokio::test]
async fn test_local_preset_builds_offline_provider() {
    let config = PlayerConfig::preset("local").unwrap();
    let mut provider: Box<dyn MoveProvider> = from_config(&config).unwrap();
    assert_eq!(provider.name(), "FirstEmpty");

    let snapshot = Snapshot::new(&Board::new(), None, 1, MatchStatus::Ongoing, Mark::X);
    let reply = provider.request_move(&snapshot).await.unwrap();
    assert_eq!(reply.mv, Some(Move::new(0, 0)));
}
