// tests/generate_tests.rs

use std::sync::Arc;

use async_trait::async_trait;
use lang_portal::{
    routes,
    services::model::{ModelError, TextModel},
    state::AppState,
};
use serde_json::{Value, json};

/// Model stub that replies with a fixed text, or fails like an unreachable endpoint.
struct StubModel(Option<&'static str>);

#[async_trait]
impl TextModel for StubModel {
    async fn complete(&self, prompt: &str) -> Result<String, ModelError> {
        assert!(prompt.contains("Spanish and Arabic"));
        self.0.map(str::to_string).ok_or(ModelError::EmptyReply)
    }
}

/// Helper function to spawn the app on a random port for testing.
/// Returns the base URL (e.g., "http://127.0.0.1:12345").
async fn spawn_app(reply: Option<&'static str>) -> String {
    let state = AppState {
        model: Arc::new(StubModel(reply)),
    };

    let app = routes::create_router(state);

    // Bind to port 0 to get a random available port
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind random port");

    let port = listener.local_addr().unwrap().port();
    let address = format!("http://127.0.0.1:{}", port);

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    address
}

#[tokio::test]
async fn unknown_path_is_404() {
    let address = spawn_app(Some("{}")).await;
    let client = reqwest::Client::new();

    let response = client
        .get(format!("{}/random_path_that_does_not_exist", address))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status().as_u16(), 404);
}

#[tokio::test]
async fn health_reports_only_status() {
    let address = spawn_app(Some("{}")).await;
    let client = reqwest::Client::new();

    let response = client
        .get(format!("{}/api/health", address))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status().as_u16(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body, json!({ "status": "ok" }));
}

#[tokio::test]
async fn generate_returns_object_from_reply_verbatim() {
    let reply = "Here is your list:\n{\"group\": {\"name\": \"Fruits\"}, \"words\": [{\"spanish\": \"manzana\", \"transliteration\": \"manzana\", \"arabic\": \"تفاحة\"}]}\nEnjoy!";
    let address = spawn_app(Some(reply)).await;
    let client = reqwest::Client::new();

    let response = client
        .post(format!("{}/api/generate", address))
        .json(&json!({ "category": "Fruits" }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status().as_u16(), 200);
    let text = response.text().await.unwrap();
    assert_eq!(
        text,
        "{\"group\": {\"name\": \"Fruits\"}, \"words\": [{\"spanish\": \"manzana\", \"transliteration\": \"manzana\", \"arabic\": \"تفاحة\"}]}"
    );
}

#[tokio::test]
async fn reply_without_json_is_500_with_details() {
    let address = spawn_app(Some("Sorry, I cannot help with that.")).await;
    let client = reqwest::Client::new();

    let response = client
        .post(format!("{}/api/generate", address))
        .json(&json!({ "category": "Fruits" }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status().as_u16(), 500);
    let body: Value = response.json().await.unwrap();
    assert!(body["error"].as_str().unwrap().starts_with("No JSON found in response"));
    assert_eq!(body["details"]["stage"], "extract");
}

#[tokio::test]
async fn model_failure_is_500_with_details() {
    let address = spawn_app(None).await;
    let client = reqwest::Client::new();

    let response = client
        .post(format!("{}/api/generate", address))
        .json(&json!({ "category": "Fruits" }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status().as_u16(), 500);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["details"]["stage"], "model");
    assert_eq!(body["details"]["kind"], "empty_reply");
}

#[tokio::test]
async fn blank_or_missing_category_is_400() {
    let address = spawn_app(Some("{}")).await;
    let client = reqwest::Client::new();

    for body in [json!({ "category": "   " }), json!({})] {
        let response = client
            .post(format!("{}/api/generate", address))
            .json(&body)
            .send()
            .await
            .expect("Failed to execute request");

        assert_eq!(response.status().as_u16(), 400, "body: {}", body);
        let body: Value = response.json().await.unwrap();
        assert!(body["error"].is_string());
    }
}
