use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use http_body_util::BodyExt;
use notepad::{AppState, MemoryStore, NoteService, ServiceOptions, build_router};
use serde_json::{Value, json};
use tower::ServiceExt;

fn app(strict_not_found: bool) -> Router {
    let service = NoteService::new(
        Arc::new(MemoryStore::new()),
        ServiceOptions {
            strict_not_found,
            ..Default::default()
        },
    );
    build_router(AppState::new(service))
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            builder = builder.header("content-type", "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };

    let response = app
        .clone()
        .oneshot(builder.body(body).expect("request"))
        .await
        .expect("router response");
    let status = response.status();
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("response body")
        .to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("json body")
    };
    (status, value)
}

fn groceries() -> Value {
    json!({
        "id": "abc123",
        "title": "Groceries",
        "body": "Milk, eggs",
        "color": "yellow",
        "timeCreated": 1700000000,
        "timeLastModified": 1700000000
    })
}

#[tokio::test]
async fn create_get_delete_round_trip() {
    let app = app(false);

    let (status, created) = send(&app, Method::POST, "/notes", Some(groceries())).await;
    assert_eq!(status, StatusCode::OK);
    for (field, expected) in groceries().as_object().expect("object") {
        assert_eq!(&created[field], expected, "field {field}");
    }
    assert!(created["_id"].is_string());

    let (status, found) = send(&app, Method::GET, "/notes/abc123", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(found.as_array().expect("array").len(), 1);
    assert_eq!(found[0]["title"], "Groceries");
    assert_eq!(found[0]["body"], "Milk, eggs");

    let (status, deleted) = send(&app, Method::DELETE, "/notes/abc123", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(deleted, json!({"acknowledged": true, "deletedCount": 1}));

    let (status, found) = send(&app, Method::GET, "/notes/abc123", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(found, json!([]));
}

#[tokio::test]
async fn create_without_title_is_server_error() {
    let app = app(false);

    let (status, body) = send(
        &app,
        Method::POST,
        "/notes",
        Some(json!({"id": "x", "body": "no title here"})),
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({"message": "Title required"}));

    let (_, all) = send(&app, Method::GET, "/notes", None).await;
    assert_eq!(all, json!([]));
}

#[tokio::test]
async fn malformed_body_is_reported_as_message() {
    let app = app(false);

    let (status, body) = send(&app, Method::POST, "/notes", Some(json!({"title": 5}))).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["message"].is_string());
}

#[tokio::test]
async fn list_returns_notes_in_creation_order() {
    let app = app(false);
    for (id, title) in [("n1", "first"), ("n2", "second"), ("n3", "third")] {
        let (status, _) = send(
            &app,
            Method::POST,
            "/notes",
            Some(json!({"id": id, "title": title, "body": ""})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
    }

    let (status, all) = send(&app, Method::GET, "/notes", None).await;
    assert_eq!(status, StatusCode::OK);
    let titles: Vec<&str> = all
        .as_array()
        .expect("array")
        .iter()
        .map(|n| n["title"].as_str().expect("title"))
        .collect();
    assert_eq!(titles, vec!["first", "second", "third"]);
}

#[tokio::test]
async fn update_changes_fields_and_reports_match() {
    let app = app(false);
    send(&app, Method::POST, "/notes", Some(groceries())).await;

    let (status, result) = send(
        &app,
        Method::PUT,
        "/notes/abc123",
        Some(json!({"body": "Milk, eggs, bread", "timeLastModified": 1700000500})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(result["matchedCount"], 1);
    assert_eq!(result["modifiedCount"], 1);
    assert_eq!(result["upsertedCount"], 0);
    assert_eq!(result["upsertedId"], Value::Null);

    let (_, found) = send(&app, Method::GET, "/notes/abc123", None).await;
    assert_eq!(found[0]["title"], "Groceries");
    assert_eq!(found[0]["body"], "Milk, eggs, bread");
    assert_eq!(found[0]["timeCreated"], 1700000000);
    assert_eq!(found[0]["timeLastModified"], 1700000500);
}

#[tokio::test]
async fn update_of_unknown_id_upserts() {
    let app = app(false);

    let (status, result) = send(
        &app,
        Method::PUT,
        "/notes/fresh",
        Some(json!({"title": "Made by PUT", "body": "b", "timeLastModified": 1700000000})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(result["upsertedCount"], 1);
    assert!(result["upsertedId"].is_string());

    let (_, found) = send(&app, Method::GET, "/notes/fresh", None).await;
    assert_eq!(found[0]["id"], "fresh");
    assert_eq!(found[0]["title"], "Made by PUT");
}

#[tokio::test]
async fn blanking_the_title_of_a_note_is_refused() {
    let app = app(false);
    send(&app, Method::POST, "/notes", Some(groceries())).await;

    let (status, body) = send(&app, Method::PUT, "/notes/abc123", Some(json!({"title": ""}))).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({"message": "Title required"}));

    let (_, found) = send(&app, Method::GET, "/notes/abc123", None).await;
    assert_eq!(found[0]["title"], "Groceries");
}

#[tokio::test]
async fn untitled_update_of_unknown_id_creates_nothing() {
    let app = app(false);

    let (status, body) = send(
        &app,
        Method::PUT,
        "/notes/fresh",
        Some(json!({"body": "no title here"})),
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({"message": "Title required"}));

    let (_, found) = send(&app, Method::GET, "/notes/fresh", None).await;
    assert_eq!(found, json!([]));
    let (_, all) = send(&app, Method::GET, "/notes", None).await;
    assert_eq!(all, json!([]));
}

#[tokio::test]
async fn deleting_unknown_id_twice_is_a_no_op() {
    let app = app(false);

    for _ in 0..2 {
        let (status, body) = send(&app, Method::DELETE, "/notes/nothing", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"acknowledged": true, "deletedCount": 0}));
    }
}

#[tokio::test]
async fn strict_mode_answers_not_found() {
    let app = app(true);
    let not_found = json!({"message": "Note not found!"});

    let (status, body) = send(&app, Method::GET, "/notes/missing", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, not_found);

    let (status, body) = send(
        &app,
        Method::PUT,
        "/notes/missing",
        Some(json!({"title": "T"})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, not_found);

    let (status, _) = send(&app, Method::DELETE, "/notes/missing", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, all) = send(&app, Method::GET, "/notes", None).await;
    assert_eq!(all, json!([]));
}
