// tests/quiz_tests.rs

mod common;

use common::{create_question, spawn_app};
use serde_json::{Value, json};

/// Creates two questions (correct 0 worth 2, correct 1 worth 1) and a quiz over them.
async fn seed_quiz(client: &reqwest::Client, address: &str) -> Value {
    let q1 = create_question(client, address, "First", 0, 2).await;
    let q2 = create_question(client, address, "Second", 1, 1).await;

    let response = client
        .post(format!("{}/quizzes", address))
        .json(&json!({
            "title": "Basics",
            "questionIds": [q1["id"], q2["id"]]
        }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status().as_u16(), 201);
    response.json().await.unwrap()
}

async fn take(client: &reqwest::Client, address: &str, code: &str, answers: Value) -> reqwest::Response {
    client
        .post(format!("{}/quizzes/{}/take", address, code))
        .json(&answers)
        .send()
        .await
        .expect("Failed to execute request")
}

#[tokio::test]
async fn create_quiz_sets_totals_and_access_code() {
    let address = spawn_app().await;
    let client = reqwest::Client::new();

    let quiz = seed_quiz(&client, &address).await;

    assert_eq!(quiz["title"], "Basics");
    assert_eq!(quiz["total_marks"], 3);
    assert_eq!(quiz["modifiable"], true);

    let code = quiz["access_code"].as_str().unwrap();
    assert_eq!(code.len(), 6);
    assert!(code.chars().all(|c| c.is_ascii_digit() || c.is_ascii_uppercase()));
}

#[tokio::test]
async fn create_quiz_rejections() {
    let address = spawn_app().await;
    let client = reqwest::Client::new();
    let q = create_question(&client, &address, "Only", 0, 1).await;

    // Unknown question id
    let response = client
        .post(format!("{}/quizzes", address))
        .json(&json!({ "title": "Bad", "question_ids": [q["id"], "does-not-exist"] }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 404);

    // Empty question list
    let response = client
        .post(format!("{}/quizzes", address))
        .json(&json!({ "title": "Empty", "question_ids": [] }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 400);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["error"], "Quiz must contain at least one question");

    // Blank title
    let response = client
        .post(format!("{}/quizzes", address))
        .json(&json!({ "title": " ", "question_ids": [q["id"]] }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 400);

    // Nothing was stored
    let all: Vec<Value> = client
        .get(format!("{}/quizzes", address))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(all.is_empty());
}

#[tokio::test]
async fn get_quiz_by_id_resolves_questions() {
    let address = spawn_app().await;
    let client = reqwest::Client::new();
    let quiz = seed_quiz(&client, &address).await;

    let detail: Value = client
        .get(format!("{}/quizzes/{}", address, quiz["id"].as_str().unwrap()))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    let questions = detail["questions"].as_array().unwrap();
    assert_eq!(questions.len(), 2);
    assert_eq!(questions[0]["title"], "First");
    assert_eq!(questions[1]["correct_option_index"], 1);
}

#[tokio::test]
async fn access_code_view_hides_answers() {
    let address = spawn_app().await;
    let client = reqwest::Client::new();
    let quiz = seed_quiz(&client, &address).await;
    let code = quiz["access_code"].as_str().unwrap();

    let response = client
        .get(format!("{}/quizzes/access/{}", address, code))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 200);

    let public: Value = response.json().await.unwrap();
    assert_eq!(public["title"], "Basics");
    for question in public["questions"].as_array().unwrap() {
        assert!(question.get("correct_option_index").is_none());
        assert!(question["options"].is_array());
    }

    let response = client
        .get(format!("{}/quizzes/access/{}", address, "ZZZZZZ"))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 404);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["error"], "Quiz not found Check the access code");
}

#[tokio::test]
async fn take_quiz_scores_by_position() {
    let address = spawn_app().await;
    let client = reqwest::Client::new();
    let quiz = seed_quiz(&client, &address).await;
    let code = quiz["access_code"].as_str().unwrap();

    let cases = [
        (json!([0, 1]), 3),
        (json!([0, 0]), 2),
        (json!([1, 1]), 1),
        (json!([3, 0]), 0),
    ];

    for (answers, expected) in cases {
        let response = take(&client, &address, code, answers.clone()).await;
        assert_eq!(response.status().as_u16(), 200, "answers {}", answers);
        let score: i32 = response.json().await.unwrap();
        assert_eq!(score, expected, "answers {}", answers);
    }
}

#[tokio::test]
async fn take_quiz_rejects_wrong_answer_count() {
    let address = spawn_app().await;
    let client = reqwest::Client::new();
    let quiz = seed_quiz(&client, &address).await;
    let code = quiz["access_code"].as_str().unwrap();

    let response = take(&client, &address, code, json!([0])).await;
    assert_eq!(response.status().as_u16(), 400);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["error"], "Expected 2 answers but received 1");

    let response = take(&client, &address, "NOPE00", json!([0, 1])).await;
    assert_eq!(response.status().as_u16(), 404);
}

#[tokio::test]
async fn take_uses_live_question_data() {
    let address = spawn_app().await;
    let client = reqwest::Client::new();
    let quiz = seed_quiz(&client, &address).await;
    let code = quiz["access_code"].as_str().unwrap();
    let first_id = quiz["question_ids"][0].as_str().unwrap();

    // Move the correct answer of the first question
    let response = client
        .put(format!("{}/questions/{}", address, first_id))
        .json(&json!({ "correct_option_index": 3 }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 200);

    let score: i32 = take(&client, &address, code, json!([3, 1])).await.json().await.unwrap();
    assert_eq!(score, 3);

    // A deleted question makes the quiz unreadable
    client
        .delete(format!("{}/questions/{}", address, first_id))
        .send()
        .await
        .unwrap();

    let response = take(&client, &address, code, json!([3, 1])).await;
    assert_eq!(response.status().as_u16(), 404);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["error"], "Question not found");
}

#[tokio::test]
async fn lock_blocks_updates() {
    let address = spawn_app().await;
    let client = reqwest::Client::new();
    let quiz = seed_quiz(&client, &address).await;
    let id = quiz["id"].as_str().unwrap();
    let code = quiz["access_code"].as_str().unwrap();

    // Update before locking drops the second question and recomputes marks
    let first_id = quiz["question_ids"][0].clone();
    let updated: Value = client
        .put(format!("{}/quizzes/{}", address, id))
        .json(&json!({ "title": "Renamed", "question_ids": [first_id] }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(updated["title"], "Renamed");
    assert_eq!(updated["total_marks"], 2);
    assert_eq!(updated["access_code"], code);

    let response = client
        .post(format!("{}/quizzes/{}/lock", address, id))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 200);
    let locked: Value = response.json().await.unwrap();
    assert_eq!(locked["modifiable"], false);

    // No update succeeds once locked, not even one trying to unlock
    let response = client
        .put(format!("{}/quizzes/{}", address, id))
        .json(&json!({ "title": "Again", "modifiable": true }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 423);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["error"], "This quiz is no longer modifiable.");

    // A locked quiz can still be taken
    let score: i32 = take(&client, &address, code, json!([0])).await.json().await.unwrap();
    assert_eq!(score, 2);

    let current: Value = client
        .get(format!("{}/quizzes/{}", address, id))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(current["title"], "Renamed");
    assert_eq!(current["modifiable"], false);
}

#[tokio::test]
async fn lock_and_delete_missing_quiz_are_404() {
    let address = spawn_app().await;
    let client = reqwest::Client::new();

    let response = client
        .post(format!("{}/quizzes/{}/lock", address, "missing"))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 404);

    let response = client
        .delete(format!("{}/quizzes/{}", address, "missing"))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 404);
}

#[tokio::test]
async fn delete_quiz_frees_access_code() {
    let address = spawn_app().await;
    let client = reqwest::Client::new();
    let quiz = seed_quiz(&client, &address).await;
    let code = quiz["access_code"].as_str().unwrap();

    let response = client
        .delete(format!("{}/quizzes/{}", address, quiz["id"].as_str().unwrap()))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 204);

    let response = take(&client, &address, code, json!([0, 1])).await;
    assert_eq!(response.status().as_u16(), 404);
}
