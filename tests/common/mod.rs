// tests/common/mod.rs

use quiz_server::{config::Config, routes, state::AppState};
use serde_json::{Value, json};

/// Spawns the app on a random port backed by a fresh in-memory store.
/// Returns the base URL (e.g., "http://127.0.0.1:12345").
pub async fn spawn_app() -> String {
    let config = Config::in_memory();
    let state = AppState::in_memory(config.clone());
    let app = routes::create_router(state);

    // Bind to port 0 to get a random available port
    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .expect("Failed to bind random port");

    let port = listener.local_addr().unwrap().port();
    let address = format!("http://127.0.0.1:{}", port);

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    address
}

/// Creates a question and returns its JSON representation.
#[allow(dead_code)]
pub async fn create_question(client: &reqwest::Client, address: &str, title: &str, correct: i32, marks: i32) -> Value {
    let response = client
        .post(format!("{}/questions", address))
        .json(&json!({
            "title": title,
            "options": ["A", "B", "C", "D"],
            "correct_option_index": correct,
            "difficulty": "easy",
            "topics": ["rust"],
            "marks": marks
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status().as_u16(), 201);
    response.json().await.expect("Failed to parse question json")
}
