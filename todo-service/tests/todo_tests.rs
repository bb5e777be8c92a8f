mod common;

use common::TestApp;
use reqwest::StatusCode;
use serde_json::json;

#[tokio::test]
async fn test_create_todo_defaults() {
    let app = TestApp::spawn().await;
    let token = app.token_for("alice@example.com", "s3cret").await;

    let response = app
        .post("/api/todos")
        .bearer_auth(&token)
        .json(&json!({ "title": "Buy milk" }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::CREATED);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["msg"], "Todo created");
    let id = body["_id"].as_str().expect("Missing id");

    let todos: serde_json::Value = app
        .get("/api/todos")
        .bearer_auth(&token)
        .send()
        .await
        .expect("Failed to execute request")
        .json()
        .await
        .expect("Failed to parse response");

    assert_eq!(todos.as_array().unwrap().len(), 1);
    let todo = &todos[0];
    assert_eq!(todo["_id"], id);
    assert_eq!(todo["title"], "Buy milk");
    assert_eq!(todo["description"], "");
    assert_eq!(todo["priority"], "normal");
    assert_eq!(todo["status"], false);
    assert!(todo["deadline"].is_null());
    assert!(todo["createdAt"].is_string());
}

#[tokio::test]
async fn test_create_todo_with_all_fields() {
    let app = TestApp::spawn().await;
    let token = app.token_for("alice@example.com", "s3cret").await;

    app.create_todo(
        &token,
        json!({
            "title": "File taxes",
            "description": "Before the deadline",
            "deadline": "2030-04-15",
            "priority": "high"
        }),
    )
    .await;

    let todos: serde_json::Value = app
        .get("/api/todos")
        .bearer_auth(&token)
        .send()
        .await
        .expect("Failed to execute request")
        .json()
        .await
        .expect("Failed to parse response");

    assert_eq!(todos[0]["description"], "Before the deadline");
    assert_eq!(todos[0]["priority"], "high");
    assert!(todos[0]["deadline"]
        .as_str()
        .unwrap()
        .starts_with("2030-04-15T00:00:00"));
}

#[tokio::test]
async fn test_create_todo_requires_title() {
    let app = TestApp::spawn().await;
    let token = app.token_for("alice@example.com", "s3cret").await;

    for payload in [json!({}), json!({ "title": "" })] {
        let response = app
            .post("/api/todos")
            .bearer_auth(&token)
            .json(&payload)
            .send()
            .await
            .expect("Failed to execute request");

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body: serde_json::Value = response.json().await.expect("Failed to parse response");
        assert_eq!(body["msg"], "Title is required");
    }
}

#[tokio::test]
async fn test_create_todo_rejects_unknown_priority() {
    let app = TestApp::spawn().await;
    let token = app.token_for("alice@example.com", "s3cret").await;

    let response = app
        .post("/api/todos")
        .bearer_auth(&token)
        .json(&json!({ "title": "Buy milk", "priority": "urgent" }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_update_status() {
    let app = TestApp::spawn().await;
    let token = app.token_for("alice@example.com", "s3cret").await;
    let id = app.create_todo(&token, json!({ "title": "Buy milk" })).await;

    let response = app
        .put(&format!("/api/todos/{}/status", id))
        .bearer_auth(&token)
        .json(&json!({ "status": true }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["msg"], "Todo status updated");

    let statuses: serde_json::Value = app
        .get("/api/tasks/status")
        .bearer_auth(&token)
        .send()
        .await
        .expect("Failed to execute request")
        .json()
        .await
        .expect("Failed to parse response");

    assert_eq!(statuses, json!([{ "title": "Buy milk", "status": true }]));
}

#[tokio::test]
async fn test_update_status_requires_boolean() {
    let app = TestApp::spawn().await;
    let token = app.token_for("alice@example.com", "s3cret").await;
    let id = app.create_todo(&token, json!({ "title": "Buy milk" })).await;

    for payload in [json!({ "status": "true" }), json!({})] {
        let response = app
            .put(&format!("/api/todos/{}/status", id))
            .bearer_auth(&token)
            .json(&payload)
            .send()
            .await
            .expect("Failed to execute request");

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body: serde_json::Value = response.json().await.expect("Failed to parse response");
        assert_eq!(body["msg"], "Invalid status");
    }
}

#[tokio::test]
async fn test_update_status_without_body() {
    let app = TestApp::spawn().await;
    let token = app.token_for("alice@example.com", "s3cret").await;
    let id = app.create_todo(&token, json!({ "title": "Buy milk" })).await;

    let response = app
        .put(&format!("/api/todos/{}/status", id))
        .bearer_auth(&token)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body, json!({ "msg": "Invalid status" }));
}

#[tokio::test]
async fn test_unreadable_todo_bodies_use_message_body() {
    let app = TestApp::spawn().await;
    let token = app.token_for("alice@example.com", "s3cret").await;
    let id = app.create_todo(&token, json!({ "title": "Buy milk" })).await;

    let mistyped_create = app
        .post("/api/todos")
        .bearer_auth(&token)
        .json(&json!({ "title": 42 }))
        .send()
        .await
        .expect("Failed to execute request");
    let create_without_body = app
        .post("/api/todos")
        .bearer_auth(&token)
        .send()
        .await
        .expect("Failed to execute request");
    let mistyped_edit = app
        .patch(&format!("/api/todos/{}", id))
        .bearer_auth(&token)
        .json(&json!({ "priority": ["high"] }))
        .send()
        .await
        .expect("Failed to execute request");

    for response in [mistyped_create, create_without_body, mistyped_edit] {
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body: serde_json::Value = response.json().await.expect("Failed to parse response");
        assert_eq!(body, json!({ "msg": "Invalid request body" }));
    }
}

#[tokio::test]
async fn test_edit_todo_keeps_status() {
    let app = TestApp::spawn().await;
    let token = app.token_for("alice@example.com", "s3cret").await;
    let id = app.create_todo(&token, json!({ "title": "Buy milk" })).await;

    app.put(&format!("/api/todos/{}/status", id))
        .bearer_auth(&token)
        .json(&json!({ "status": true }))
        .send()
        .await
        .expect("Failed to execute request");

    let response = app
        .patch(&format!("/api/todos/{}", id))
        .bearer_auth(&token)
        .json(&json!({ "description": "d" }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::OK);

    let todos: serde_json::Value = app
        .get("/api/todos")
        .bearer_auth(&token)
        .send()
        .await
        .expect("Failed to execute request")
        .json()
        .await
        .expect("Failed to parse response");

    assert_eq!(todos[0]["description"], "d");
    assert_eq!(todos[0]["status"], true);
}

#[tokio::test]
async fn test_invalid_todo_id() {
    let app = TestApp::spawn().await;
    let token = app.token_for("alice@example.com", "s3cret").await;

    let response = app
        .delete("/api/todos/not-a-uuid")
        .bearer_auth(&token)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["msg"], "Invalid todo id");
}

#[tokio::test]
async fn test_edit_todo_changes_only_provided_fields() {
    let app = TestApp::spawn().await;
    let token = app.token_for("alice@example.com", "s3cret").await;
    let id = app
        .create_todo(
            &token,
            json!({ "title": "Buy milk", "description": "Semi-skimmed" }),
        )
        .await;

    let response = app
        .patch(&format!("/api/todos/{}", id))
        .bearer_auth(&token)
        .json(&json!({ "title": "Buy oat milk", "description": "", "priority": "low" }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["msg"], "Todo updated");

    let todos: serde_json::Value = app
        .get("/api/todos")
        .bearer_auth(&token)
        .send()
        .await
        .expect("Failed to execute request")
        .json()
        .await
        .expect("Failed to parse response");

    assert_eq!(todos[0]["title"], "Buy oat milk");
    assert_eq!(todos[0]["description"], "Semi-skimmed");
    assert_eq!(todos[0]["priority"], "low");
}

#[tokio::test]
async fn test_delete_todo() {
    let app = TestApp::spawn().await;
    let token = app.token_for("alice@example.com", "s3cret").await;
    let id = app.create_todo(&token, json!({ "title": "Buy milk" })).await;

    let response = app
        .delete(&format!("/api/todos/{}", id))
        .bearer_auth(&token)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["msg"], "Todo deleted");

    let response = app
        .delete(&format!("/api/todos/{}", id))
        .bearer_auth(&token)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_todos_are_isolated_between_subjects() {
    let app = TestApp::spawn().await;
    let alice = app.token_for("alice@example.com", "s3cret").await;
    let bob = app.token_for("bob@example.com", "hunter2").await;

    let id = app.create_todo(&alice, json!({ "title": "Alice's todo" })).await;

    let bob_todos: serde_json::Value = app
        .get("/api/todos")
        .bearer_auth(&bob)
        .send()
        .await
        .expect("Failed to execute request")
        .json()
        .await
        .expect("Failed to parse response");
    assert_eq!(bob_todos, json!([]));

    let response = app
        .put(&format!("/api/todos/{}/status", id))
        .bearer_auth(&bob)
        .json(&json!({ "status": true }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = app
        .patch(&format!("/api/todos/{}", id))
        .bearer_auth(&bob)
        .json(&json!({ "title": "Hijacked" }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = app
        .delete(&format!("/api/todos/{}", id))
        .bearer_auth(&bob)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let alice_todos: serde_json::Value = app
        .get("/api/todos")
        .bearer_auth(&alice)
        .send()
        .await
        .expect("Failed to execute request")
        .json()
        .await
        .expect("Failed to parse response");
    assert_eq!(alice_todos[0]["title"], "Alice's todo");
    assert_eq!(alice_todos[0]["status"], false);
}
