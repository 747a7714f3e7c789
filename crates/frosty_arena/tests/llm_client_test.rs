//! LLM client and LLM player against mocked vendor APIs.
//!
//! Uses wiremock for HTTP mocking. Live connectivity tests are gated behind
//! the `api` feature.

use frosty_arena::{LlmClient, LlmConfig, LlmPlayer, LlmProvider, MoveProvider, Snapshot};
use frosty_tictactoe::{Board, Mark, MatchStatus, Move, Position};
use serde_json::json;
use std::time::Duration;
use tracing::instrument;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn mock_config(provider: LlmProvider, model: &str, server: &MockServer) -> LlmConfig {
    LlmConfig::new(provider, "test-key".to_string(), model.to_string(), 150)
        .with_base_url(server.uri())
        .with_timeout(Duration::from_secs(5))
}

fn anthropic_body(text: &str) -> serde_json::Value {
    json!({
        "id": "msg_01",
        "type": "message",
        "role": "assistant",
        "model": "claude-3-5-haiku-latest",
        "content": [{ "type": "text", "text": text }],
        "stop_reason": "end_turn"
    })
}

#[tokio::test]
async fn test_gemini_generate() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1beta/models/gemini-pro:generateContent"))
        .and(header("x-goog-api-key", "test-key"))
        .and(body_partial_json(json!({
            "generationConfig": { "responseMimeType": "application/json", "maxOutputTokens": 150 }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [{
                "content": { "parts": [{ "text": "{\"move\": {\"row\": 0, \"col\": 0}}" }], "role": "model" }
            }]
        })))
        .mount(&server)
        .await;

    let client = LlmClient::new(mock_config(LlmProvider::Gemini, "gemini-pro", &server));
    let text = client.generate("persona", "payload").await.unwrap();
    assert_eq!(text, "{\"move\": {\"row\": 0, \"col\": 0}}");
}

#[tokio::test]
async fn test_gemini_missing_candidates_is_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1beta/models/gemini-pro:generateContent"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "candidates": [] })))
        .mount(&server)
        .await;

    let client = LlmClient::new(mock_config(LlmProvider::Gemini, "gemini-pro", &server));
    let err = client.generate("persona", "payload").await.unwrap_err();
    assert!(err.message.contains("No text content in Gemini response"));
}

#[tokio::test]
async fn test_anthropic_generate() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/messages"))
        .and(header("x-api-key", "test-key"))
        .and(header("anthropic-version", "2023-06-01"))
        .and(body_partial_json(json!({
            "model": "claude-3-5-haiku-latest",
            "system": "persona",
            "max_tokens": 150
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(anthropic_body("hello")))
        .mount(&server)
        .await;

    let client = LlmClient::new(mock_config(
        LlmProvider::Anthropic,
        "claude-3-5-haiku-latest",
        &server,
    ));
    assert_eq!(client.generate("persona", "payload").await.unwrap(), "hello");
}

#[tokio::test]
async fn test_max_tokens_override_reaches_request() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/messages"))
        .and(body_partial_json(json!({ "max_tokens": 40 })))
        .respond_with(ResponseTemplate::new(200).set_body_json(anthropic_body("short")))
        .mount(&server)
        .await;

    let config = mock_config(LlmProvider::Anthropic, "claude-3-5-haiku-latest", &server)
        .with_max_tokens(40);
    let client = LlmClient::new(config);
    assert_eq!(client.generate("persona", "payload").await.unwrap(), "short");
}

#[tokio::test]
async fn test_anthropic_server_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/messages"))
        .respond_with(ResponseTemplate::new(529).set_body_string("overloaded"))
        .mount(&server)
        .await;

    let client = LlmClient::new(mock_config(
        LlmProvider::Anthropic,
        "claude-3-5-haiku-latest",
        &server,
    ));
    let err = client.generate("persona", "payload").await.unwrap_err();
    assert!(err.message.contains("Anthropic API error"));
    assert!(err.message.contains("overloaded"));
}

#[tokio::test]
async fn test_request_timeout() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/messages"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(anthropic_body("too late"))
                .set_delay(Duration::from_secs(2)),
        )
        .mount(&server)
        .await;

    let config = mock_config(LlmProvider::Anthropic, "claude-3-5-haiku-latest", &server)
        .with_timeout(Duration::from_millis(100));
    let client = LlmClient::new(config);
    let err = client.generate("persona", "payload").await.unwrap_err();
    assert!(err.message.contains("timed out"));
}

#[tokio::test]
async fn test_deepseek_uses_chat_completions() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(header("authorization", "Bearer test-key"))
        .and(body_partial_json(json!({ "model": "deepseek-chat" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "chatcmpl-1",
            "object": "chat.completion",
            "created": 1700000000,
            "model": "deepseek-chat",
            "choices": [{
                "index": 0,
                "message": { "role": "assistant", "content": "{\"move\": {\"row\": 2, \"col\": 2}}" },
                "finish_reason": "stop"
            }]
        })))
        .mount(&server)
        .await;

    let client = LlmClient::new(mock_config(LlmProvider::DeepSeek, "deepseek-chat", &server));
    let text = client.generate("persona", "payload").await.unwrap();
    assert_eq!(text, "{\"move\": {\"row\": 2, \"col\": 2}}");
}

#[tokio::test]
async fn test_llm_player_parses_fenced_reply() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/messages"))
        .and(body_partial_json(json!({
            "system": "You are a pro gamer named Claude. Your response MUST be a single, valid JSON object and nothing else. Analyze the following game data and provide your move."
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(anthropic_body(
            "```json\n{\"move\": {\"row\": 1, \"col\": 1}, \"trashTalk\": \"Center stage.\"}\n```",
        )))
        .mount(&server)
        .await;

    let client = LlmClient::new(mock_config(
        LlmProvider::Anthropic,
        "claude-3-5-haiku-latest",
        &server,
    ));
    let mut player = LlmPlayer::new("Claude", client);

    let mut board = Board::new();
    board.place(Position::TopLeft, Mark::X);
    let snapshot = Snapshot::new(&board, None, 2, MatchStatus::Ongoing, Mark::O);

    let reply = player.request_move(&snapshot).await.unwrap();
    assert_eq!(reply.mv, Some(Move::new(1, 1)));
    assert_eq!(reply.commentary(), "Center stage.");

    // The user message is the pretty-printed snapshot.
    let requests = server.received_requests().await.unwrap();
    let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
    let sent: serde_json::Value =
        serde_json::from_str(body["messages"][0]["content"].as_str().unwrap()).unwrap();
    assert_eq!(sent["gameState"]["turnNumber"], json!(2));
    assert_eq!(sent["context"]["yourMark"], json!("O"));
}

#[tokio::test]
async fn test_llm_player_prose_reply_is_provider_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/messages"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(anthropic_body("I'd go center, personally.")),
        )
        .mount(&server)
        .await;

    let client = LlmClient::new(mock_config(
        LlmProvider::Anthropic,
        "claude-3-5-haiku-latest",
        &server,
    ));
    let mut player = LlmPlayer::new("Claude", client);
    let snapshot = Snapshot::new(&Board::new(), None, 1, MatchStatus::Ongoing, Mark::X);

    let err = player.request_move(&snapshot).await.unwrap_err();
    assert!(err.message.contains("Unparsable reply"));
}

#[tokio::test]
#[cfg_attr(not(feature = "api"), ignore)]
#[instrument]
async fn test_anthropic_connectivity() {
    dotenvy::dotenv().ok();

    let api_key = std::env::var("ANTHROPIC_API_KEY").expect("ANTHROPIC_API_KEY not set");

    let config = LlmConfig::new(
        LlmProvider::Anthropic,
        api_key,
        "claude-3-5-haiku-latest".to_string(),
        50,
    );

    let client = LlmClient::new(config);

    let response = client
        .generate("You are a helpful assistant.", "Say 'Hello, world!' and nothing else.")
        .await
        .expect("Failed to generate");

    assert!(!response.is_empty(), "Response should not be empty");
    eprintln!("Response: {}", response);
}

#[tokio::test]
#[cfg_attr(not(feature = "api"), ignore)]
#[instrument]
async fn test_openai_plays_a_move() {
    dotenvy::dotenv().ok();

    let api_key = std::env::var("OPENAI_API_KEY").expect("OPENAI_API_KEY not set");

    let config = LlmConfig::new(LlmProvider::OpenAI, api_key, "gpt-4o-mini".to_string(), 150);
    let mut player = LlmPlayer::new("ChatGPT", LlmClient::new(config));
    let snapshot = Snapshot::new(&Board::new(), None, 1, MatchStatus::Ongoing, Mark::X);

    let reply = player.request_move(&snapshot).await.expect("Failed to get move");
    eprintln!("Reply: {:?}", reply);
}
