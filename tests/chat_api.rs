use async_trait::async_trait;
use axum::body::{ to_bytes, Body };
use axum::http::{ Request, StatusCode };
use philippine_travel_agent::agent::TravelAgent;
use philippine_travel_agent::config::prompt::PromptConfig;
use philippine_travel_agent::llm::chat::{ ChatClient, CompletionRequest, CompletionResponse };
use philippine_travel_agent::locations::LocationCatalog;
use philippine_travel_agent::models::chat::Role;
use philippine_travel_agent::server::api::{ router, AppState };
use serde_json::{ json, Value };
use std::error::Error;
use std::sync::{ Arc, Mutex };
use tower::ServiceExt;

const BORACAY_REPLY: &str = "Boracay is a great pick!

LOCATION: Boracay
COORDINATES: 11.9674, 121.9246
DESCRIPTION: White Beach and island hopping
TYPE: beach";

/// Returns a fixed reply (or failure) and records what it was asked.
struct ScriptedChatClient {
    reply: Result<String, String>,
    seen: Mutex<Vec<CompletionRequest>>,
}

impl ScriptedChatClient {
    fn replying(text: &str) -> Arc<Self> {
        Arc::new(Self { reply: Ok(text.to_string()), seen: Mutex::new(Vec::new()) })
    }

    fn failing(message: &str) -> Arc<Self> {
        Arc::new(Self { reply: Err(message.to_string()), seen: Mutex::new(Vec::new()) })
    }

    fn calls(&self) -> Vec<CompletionRequest> {
        self.seen.lock().unwrap().clone()
    }
}

#[async_trait]
impl ChatClient for ScriptedChatClient {
    async fn complete(
        &self,
        request: &CompletionRequest
    ) -> Result<CompletionResponse, Box<dyn Error + Send + Sync>> {
        self.seen.lock().unwrap().push(request.clone());
        match &self.reply {
            Ok(text) => Ok(CompletionResponse { response: text.clone() }),
            Err(message) => Err(message.clone().into()),
        }
    }

    fn get_model(&self) -> String {
        "scripted".to_string()
    }
}

fn app(client: Arc<ScriptedChatClient>) -> axum::Router {
    let agent = TravelAgent::new(
        client,
        LocationCatalog::builtin(),
        Arc::new(PromptConfig::default())
    );
    router(AppState { agent: Arc::new(agent), maps_api_key: "test-key".to_string() })
}

async fn post_chat(app: axum::Router, body: String) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri("/api/chat")
        .header("content-type", "application/json")
        .body(Body::from(body))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn boracay_question_returns_boracay_marker() {
    let client = ScriptedChatClient::replying(BORACAY_REPLY);
    let body = json!({ "messages": [{ "role": "user", "content": "Tell me about Boracay" }] });

    let (status, json) = post_chat(app(client.clone()), body.to_string()).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["message"]["role"], "assistant");
    assert_eq!(json["message"]["content"], BORACAY_REPLY);
    let locations = json["locations"].as_array().unwrap();
    assert_eq!(locations.len(), 1);
    assert!(locations[0]["title"].as_str().unwrap().starts_with("Boracay"));
    assert_eq!(locations[0]["title"], "Boracay - White Beach and island hopping");
    assert_eq!(locations[0]["lat"], 11.9674);
    assert_eq!(client.calls().len(), 1);
}

#[tokio::test]
async fn catalog_matches_reach_the_map_even_without_blocks() {
    let client = ScriptedChatClient::replying("Palawan is wonderful.");
    let body = json!({ "messages": [{ "role": "user", "content": "underground river tours" }] });

    let (status, json) = post_chat(app(client), body.to_string()).await;

    assert_eq!(status, StatusCode::OK);
    let titles: Vec<&str> = json["locations"]
        .as_array()
        .unwrap()
        .iter()
        .map(|m| m["title"].as_str().unwrap())
        .collect();
    assert_eq!(
        titles,
        vec!["Palawan Underground River - UNESCO World Heritage site, underground river system"]
    );
}

#[tokio::test]
async fn model_sees_only_user_turns_and_augmented_prompt() {
    let client = ScriptedChatClient::replying("ok");
    let body =
        json!({
        "messages": [
            { "role": "assistant", "content": "Hi! How can I help?" },
            { "role": "user", "content": "I want beaches" }
        ]
    });

    let (status, _) = post_chat(app(client.clone()), body.to_string()).await;

    assert_eq!(status, StatusCode::OK);
    let calls = client.calls();
    assert_eq!(calls.len(), 1);
    assert!(calls[0].history.iter().all(|m| m.role == Role::User));
    assert_eq!(calls[0].history.len(), 1);
    assert!(calls[0].prompt.contains("User message: I want beaches"));
    assert!(calls[0].prompt.contains("LOCATION: Boracay"));
}

#[tokio::test]
async fn empty_messages_is_bad_request() {
    let client = ScriptedChatClient::replying("unused");
    let (status, json) = post_chat(app(client.clone()), json!({ "messages": [] }).to_string()).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["error"].is_string());
    assert!(client.calls().is_empty());
}

#[tokio::test]
async fn assistant_only_history_is_bad_request() {
    let client = ScriptedChatClient::replying("unused");
    let body = json!({ "messages": [{ "role": "assistant", "content": "hi" }] });

    let (status, json) = post_chat(app(client.clone()), body.to_string()).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "No user messages found");
    assert!(client.calls().is_empty());
}

#[tokio::test]
async fn malformed_bodies_are_bad_request() {
    for body in ["{}", "{\"messages\": \"nope\"}", "not json", "{\"messages\": [{\"role\": \"system\", \"content\": \"x\"}]}"] {
        let (status, json) = post_chat(app(ScriptedChatClient::replying("unused")), body.to_string()).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "body: {}", body);
        assert_eq!(json["error"], "Invalid messages array");
    }
}

#[tokio::test]
async fn upstream_failure_is_internal_error() {
    let client = ScriptedChatClient::failing("quota exceeded");
    let body = json!({ "messages": [{ "role": "user", "content": "Tell me about Boracay" }] });

    let (status, json) = post_chat(app(client), body.to_string()).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["error"], "Failed to process request");
}

#[tokio::test]
async fn unparseable_blocks_are_dropped_not_fatal() {
    let reply = "LOCATION: Somewhere\nCOORDINATES: abc, 123\nDESCRIPTION: ?\nTYPE: ?";
    let client = ScriptedChatClient::replying(reply);
    let body = json!({ "messages": [{ "role": "user", "content": "xyzzy" }] });

    let (status, json) = post_chat(app(client), body.to_string()).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["locations"], json!([]));
}

#[tokio::test]
async fn index_page_and_health_are_served() {
    let page = app(ScriptedChatClient::replying("unused"))
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap()).await
        .unwrap();
    assert_eq!(page.status(), StatusCode::OK);
    let html = to_bytes(page.into_body(), usize::MAX).await.unwrap();
    let html = String::from_utf8(html.to_vec()).unwrap();
    assert!(html.contains("\"test-key\""));
    assert!(html.contains("/api/chat"));

    let health = app(ScriptedChatClient::replying("unused"))
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap()).await
        .unwrap();
    assert_eq!(health.status(), StatusCode::OK);
}
