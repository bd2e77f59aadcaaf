// tests/api_tests.rs

mod common;

use common::spawn_app;

#[tokio::test]
async fn health_check_works() {
    // Arrange
    let address = spawn_app().await;
    let client = reqwest::Client::new();

    // Act
    let response = client
        .get(format!("{}/health", address))
        .send()
        .await
        .expect("Failed to execute request");

    // Assert
    assert_eq!(response.status().as_u16(), 200);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn unknown_path_is_404() {
    let address = spawn_app().await;
    let client = reqwest::Client::new();

    let response = client
        .get(format!("{}/random_path_that_does_not_exist", address))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status().as_u16(), 404);
}

#[tokio::test]
async fn openapi_document_is_served() {
    let address = spawn_app().await;
    let client = reqwest::Client::new();

    let response = client
        .get(format!("{}/api-docs/openapi.json", address))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status().as_u16(), 200);
    let doc: serde_json::Value = response.json().await.unwrap();
    assert!(doc["paths"]["/quizzes"].is_object());
}

#[tokio::test]
async fn register_works() {
    // Arrange
    let address = spawn_app().await;
    let client = reqwest::Client::new();
    let unique_name = format!("u_{}", &uuid::Uuid::new_v4().to_string()[..8]);

    // Act
    let response = client
        .post(format!("{}/users/register", address))
        .json(&serde_json::json!({
            "username": unique_name,
            "password": "password123"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    // Assert
    assert_eq!(response.status().as_u16(), 201);
    let user: serde_json::Value = response.json().await.unwrap();
    assert_eq!(user["username"], unique_name.as_str());
    assert_eq!(user["role"], "USER");
    assert!(user.get("password").is_none(), "Password must not be serialized");
}

#[tokio::test]
async fn register_fails_validation() {
    let address = spawn_app().await;
    let client = reqwest::Client::new();

    let response = client
        .post(format!("{}/users/register", address))
        .json(&serde_json::json!({
            "username": "   ",
            "password": "password123"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status().as_u16(), 400);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["error"], "Username cannot be empty");
}

#[tokio::test]
async fn create_user_rejects_unknown_role() {
    let address = spawn_app().await;
    let client = reqwest::Client::new();

    let response = client
        .post(format!("{}/users", address))
        .json(&serde_json::json!({
            "username": "carol",
            "password": "pw",
            "role": "admin"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status().as_u16(), 400);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["error"], "Invalid role. Must be either ADMIN or USER");
}

#[tokio::test]
async fn duplicate_username_is_conflict() {
    let address = spawn_app().await;
    let client = reqwest::Client::new();
    let payload = serde_json::json!({ "username": "alice", "password": "pw", "role": "ADMIN" });

    let first = client
        .post(format!("{}/users", address))
        .json(&payload)
        .send()
        .await
        .unwrap();
    assert_eq!(first.status().as_u16(), 201);

    let second = client
        .post(format!("{}/users", address))
        .json(&payload)
        .send()
        .await
        .unwrap();
    assert_eq!(second.status().as_u16(), 409);
    let body: serde_json::Value = second.json().await.unwrap();
    assert_eq!(body["error"], "Username already exists");
}

#[tokio::test]
async fn login_flow() {
    let address = spawn_app().await;
    let client = reqwest::Client::new();

    client
        .post(format!("{}/users/register", address))
        .json(&serde_json::json!({ "username": "bob", "password": "secret" }))
        .send()
        .await
        .expect("Register failed");

    // Correct credentials
    let ok = client
        .post(format!("{}/users/login", address))
        .json(&serde_json::json!({ "username": "bob", "password": "secret" }))
        .send()
        .await
        .unwrap();
    assert_eq!(ok.status().as_u16(), 200);
    let user: serde_json::Value = ok.json().await.unwrap();
    assert_eq!(user["username"], "bob");

    // Wrong password and unknown user fail the same way
    for (username, password) in [("bob", "wrong"), ("nobody", "secret")] {
        let response = client
            .post(format!("{}/users/login", address))
            .json(&serde_json::json!({ "username": username, "password": password }))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status().as_u16(), 401);
        let body: serde_json::Value = response.json().await.unwrap();
        assert_eq!(body["error"], "Invalid username or password");
    }
}

#[tokio::test]
async fn user_crud_flow() {
    let address = spawn_app().await;
    let client = reqwest::Client::new();

    let created: serde_json::Value = client
        .post(format!("{}/users", address))
        .json(&serde_json::json!({ "username": "dave", "password": "pw", "role": "USER" }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let id = created["id"].as_str().expect("id missing").to_string();

    // Read
    let fetched = client
        .get(format!("{}/users/{}", address, id))
        .send()
        .await
        .unwrap();
    assert_eq!(fetched.status().as_u16(), 200);

    // Partial update keeps the username
    let updated: serde_json::Value = client
        .put(format!("{}/users/{}", address, id))
        .json(&serde_json::json!({ "role": "ADMIN" }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(updated["username"], "dave");
    assert_eq!(updated["role"], "ADMIN");

    // List
    let all: Vec<serde_json::Value> = client
        .get(format!("{}/users", address))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(all.len(), 1);

    // Delete, then the user is gone
    let deleted = client
        .delete(format!("{}/users/{}", address, id))
        .send()
        .await
        .unwrap();
    assert_eq!(deleted.status().as_u16(), 204);

    let missing = client
        .get(format!("{}/users/{}", address, id))
        .send()
        .await
        .unwrap();
    assert_eq!(missing.status().as_u16(), 404);

    let deleted_again = client
        .delete(format!("{}/users/{}", address, id))
        .send()
        .await
        .unwrap();
    assert_eq!(deleted_again.status().as_u16(), 404);
}

#[tokio::test]
async fn update_missing_user_is_404() {
    let address = spawn_app().await;
    let client = reqwest::Client::new();

    let response = client
        .put(format!("{}/users/{}", address, "no-such-id"))
        .json(&serde_json::json!({ "username": "ghost" }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status().as_u16(), 404);
}
