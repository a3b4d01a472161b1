//! Post endpoint tests.
//!
//! Integration tests for listing, showing, creating, editing and deleting
//! posts over HTTP.

mod common;

use axum::http::{header::SET_COOKIE, StatusCode};
use common::{create_post, create_test_server, location, register_user, RequestExt};
use serde_json::{json, Value};

#[tokio::test]
async fn test_list_posts_empty() {
    let (server, _db) = create_test_server().await;

    let response = server.get("/posts").await;
    response.assert_status_ok();

    let body = response.json::<Value>();
    assert_eq!(body["data"].as_array().unwrap().len(), 0);
    assert_eq!(body["meta"]["total"], 0);
    assert_eq!(body["meta"]["page"], 1);
    assert_eq!(body["meta"]["per_page"], 10);
    assert_eq!(body["meta"]["last_page"], 1);
    assert_eq!(body["meta"]["has_more"], false);
}

#[tokio::test]
async fn test_create_and_show_post() {
    let (server, _db) = create_test_server().await;
    let alice = register_user(&server, "Alice", "alice@example.com").await;

    let response = server
        .post("/posts")
        .auth(&alice)
        .csrf()
        .json(&json!({ "title": "Hello", "body": "World" }))
        .await;
    response.assert_status(StatusCode::SEE_OTHER);
    let path = location(&response);
    assert!(path.starts_with("/posts/"));

    let response = server.get(&path).await;
    response.assert_status_ok();
    let body = response.json::<Value>();
    let post = &body["data"]["post"];
    assert_eq!(post["title"], "Hello");
    assert_eq!(post["body"], "World");
    assert_eq!(post["rendered_body"], "<p>World</p>");
    assert_eq!(post["author"]["id"], alice.id);
    assert_eq!(post["author"]["name"], "Alice");
    assert_eq!(body["data"]["comments"]["meta"]["total"], 0);

    // Anonymous viewers cannot change anything
    assert_eq!(body["data"]["can_update"], false);
    assert_eq!(body["data"]["can_delete"], false);
    assert!(body["data"].get("comment_form").is_none());
}

#[tokio::test]
async fn test_show_post_for_author() {
    let (server, _db) = create_test_server().await;
    let alice = register_user(&server, "Alice", "alice@example.com").await;
    let id = create_post(&server, &alice, "Mine", "Body").await;

    let response = server.get(&format!("/posts/{}", id)).auth(&alice).await;
    response.assert_status_ok();

    let set_cookie = response
        .headers()
        .get(SET_COOKIE)
        .expect("csrf cookie issued")
        .to_str()
        .unwrap()
        .to_string();
    assert!(set_cookie.starts_with("csrf_token="));

    let body = response.json::<Value>();
    assert_eq!(body["data"]["can_update"], true);
    assert_eq!(body["data"]["can_delete"], true);
    assert_eq!(
        body["data"]["comment_form"]["action"],
        format!("/posts/{}/comments", id)
    );
    let token = body["data"]["csrf_token"].as_str().unwrap();
    assert!(set_cookie.contains(token));
}

#[tokio::test]
async fn test_show_missing_post() {
    let (server, _db) = create_test_server().await;

    let response = server.get("/posts/999").await;
    response.assert_status(StatusCode::NOT_FOUND);
    let body = response.json::<Value>();
    assert_eq!(body["error"]["code"], "NOT_FOUND");
}

#[tokio::test]
async fn test_create_requires_auth() {
    let (server, _db) = create_test_server().await;

    let response = server
        .post("/posts")
        .csrf()
        .json(&json!({ "title": "Hello", "body": "World" }))
        .await;
    response.assert_status(StatusCode::UNAUTHORIZED);

    let response = server.get("/posts/new").await;
    response.assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_create_requires_csrf_token() {
    let (server, _db) = create_test_server().await;
    let alice = register_user(&server, "Alice", "alice@example.com").await;

    let response = server
        .post("/posts")
        .auth(&alice)
        .json(&json!({ "title": "Hello", "body": "World" }))
        .await;
    response.assert_status(StatusCode::FORBIDDEN);
    let body = response.json::<Value>();
    assert_eq!(body["error"]["code"], "CSRF_TOKEN_MISMATCH");

    let response = server.get("/posts").await;
    assert_eq!(response.json::<Value>()["meta"]["total"], 0);
}

#[tokio::test]
async fn test_new_post_form() {
    let (server, _db) = create_test_server().await;
    let alice = register_user(&server, "Alice", "alice@example.com").await;

    let response = server.get("/posts/new").auth(&alice).await;
    response.assert_status_ok();

    let body = response.json::<Value>();
    let form = &body["data"];
    assert_eq!(form["action"], "/posts");
    assert_eq!(form["method"], "POST");
    assert_eq!(form["values"]["title"], "");
    assert!(form["csrf_token"].as_str().is_some_and(|t| !t.is_empty()));
}

#[tokio::test]
async fn test_create_validation_error_returns_form() {
    let (server, _db) = create_test_server().await;
    let alice = register_user(&server, "Alice", "alice@example.com").await;
    let long_title = "x".repeat(256);

    let response = server
        .post("/posts")
        .auth(&alice)
        .csrf()
        .json(&json!({ "title": long_title, "body": "" }))
        .await;
    response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);

    let body = response.json::<Value>();
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    assert_eq!(
        body["error"]["details"]["title"][0],
        "The title field must not be greater than 255 characters."
    );
    assert_eq!(
        body["error"]["details"]["body"][0],
        "The body field is required."
    );

    let form = &body["form"];
    assert_eq!(form["action"], "/posts");
    assert_eq!(form["method"], "POST");
    assert_eq!(form["values"]["title"], long_title);
    assert_eq!(form["csrf_token"], common::CSRF_TOKEN);
    assert!(form["errors"]["title"].is_array());

    // Nothing was stored
    let response = server.get("/posts").await;
    assert_eq!(response.json::<Value>()["meta"]["total"], 0);
}

#[tokio::test]
async fn test_list_posts_newest_first_with_pages() {
    let (server, _db) = create_test_server().await;
    let alice = register_user(&server, "Alice", "alice@example.com").await;

    let mut ids = Vec::new();
    for i in 1..=12 {
        ids.push(create_post(&server, &alice, &format!("Post {}", i), "Body").await);
    }

    let first = server.get("/posts").await.json::<Value>();
    assert_eq!(first["meta"]["total"], 12);
    assert_eq!(first["meta"]["last_page"], 2);
    assert_eq!(first["meta"]["has_more"], true);
    let first_ids: Vec<i64> = first["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["id"].as_i64().unwrap())
        .collect();
    assert_eq!(first_ids.len(), 10);
    assert_eq!(first_ids[0], ids[11]);

    let second = server
        .get("/posts")
        .add_query_param("page", 2)
        .await
        .json::<Value>();
    let second_ids: Vec<i64> = second["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["id"].as_i64().unwrap())
        .collect();
    assert_eq!(second_ids, vec![ids[1], ids[0]]);
    assert_eq!(second["meta"]["has_more"], false);
    assert_eq!(second["data"][0]["author"]["name"], "Alice");

    let custom = server
        .get("/posts")
        .add_query_param("per_page", 5)
        .await
        .json::<Value>();
    assert_eq!(custom["data"].as_array().unwrap().len(), 5);
    assert_eq!(custom["meta"]["per_page"], 5);
}

#[tokio::test]
async fn test_edit_form_owner_only() {
    let (server, _db) = create_test_server().await;
    let alice = register_user(&server, "Alice", "alice@example.com").await;
    let bob = register_user(&server, "Bob", "bob@example.com").await;
    let id = create_post(&server, &alice, "Title", "Body").await;

    let response = server.get(&format!("/posts/{}/edit", id)).auth(&alice).await;
    response.assert_status_ok();
    let body = response.json::<Value>();
    assert_eq!(body["data"]["action"], format!("/posts/{}", id));
    assert_eq!(body["data"]["method"], "PUT");
    assert_eq!(body["data"]["values"]["title"], "Title");
    assert_eq!(body["data"]["values"]["body"], "Body");

    let response = server.get(&format!("/posts/{}/edit", id)).auth(&bob).await;
    response.assert_status(StatusCode::FORBIDDEN);

    let response = server.get("/posts/999/edit").auth(&alice).await;
    response.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_update_post() {
    let (server, _db) = create_test_server().await;
    let alice = register_user(&server, "Alice", "alice@example.com").await;
    let id = create_post(&server, &alice, "Old", "Old body").await;

    let response = server
        .put(&format!("/posts/{}", id))
        .auth(&alice)
        .csrf()
        .json(&json!({ "title": "New", "body": "New *body*" }))
        .await;
    response.assert_status(StatusCode::SEE_OTHER);
    assert_eq!(location(&response), format!("/posts/{}", id));

    let body = server
        .get(&format!("/posts/{}", id))
        .await
        .json::<Value>();
    assert_eq!(body["data"]["post"]["title"], "New");
    assert_eq!(body["data"]["post"]["rendered_body"], "<p>New <em>body</em></p>");
    assert_eq!(body["data"]["post"]["author"]["id"], alice.id);
}

#[tokio::test]
async fn test_update_by_non_owner_forbidden() {
    let (server, _db) = create_test_server().await;
    let alice = register_user(&server, "Alice", "alice@example.com").await;
    let bob = register_user(&server, "Bob", "bob@example.com").await;
    let id = create_post(&server, &alice, "Hello", "World").await;

    let response = server
        .put(&format!("/posts/{}", id))
        .auth(&bob)
        .csrf()
        .json(&json!({ "title": "Hacked", "body": "Hacked" }))
        .await;
    response.assert_status(StatusCode::FORBIDDEN);

    let body = server
        .get(&format!("/posts/{}", id))
        .await
        .json::<Value>();
    assert_eq!(body["data"]["post"]["title"], "Hello");
}

#[tokio::test]
async fn test_update_validation_error_returns_edit_form() {
    let (server, _db) = create_test_server().await;
    let alice = register_user(&server, "Alice", "alice@example.com").await;
    let id = create_post(&server, &alice, "Hello", "World").await;

    let response = server
        .put(&format!("/posts/{}", id))
        .auth(&alice)
        .csrf()
        .json(&json!({ "title": "   ", "body": "Changed" }))
        .await;
    response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);

    let body = response.json::<Value>();
    assert_eq!(body["form"]["action"], format!("/posts/{}", id));
    assert_eq!(body["form"]["method"], "PUT");
    assert_eq!(body["form"]["values"]["body"], "Changed");
    assert_eq!(
        body["form"]["errors"]["title"][0],
        "The title field is required."
    );

    let body = server
        .get(&format!("/posts/{}", id))
        .await
        .json::<Value>();
    assert_eq!(body["data"]["post"]["body"], "World");
}

#[tokio::test]
async fn test_delete_post_scenario() {
    let (server, _db) = create_test_server().await;
    let alice = register_user(&server, "Alice", "alice@example.com").await;
    let bob = register_user(&server, "Bob", "bob@example.com").await;
    let id = create_post(&server, &alice, "Hello", "World").await;

    let response = server
        .delete(&format!("/posts/{}", id))
        .auth(&bob)
        .csrf()
        .await;
    response.assert_status(StatusCode::FORBIDDEN);

    let response = server
        .delete(&format!("/posts/{}", id))
        .auth(&alice)
        .csrf()
        .await;
    response.assert_status(StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/posts");

    let response = server.get(&format!("/posts/{}", id)).await;
    response.assert_status(StatusCode::NOT_FOUND);

    let response = server
        .delete(&format!("/posts/{}", id))
        .auth(&alice)
        .csrf()
        .await;
    response.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_rendered_body_is_escaped() {
    let (server, _db) = create_test_server().await;
    let alice = register_user(&server, "Alice", "alice@example.com").await;
    let id = create_post(&server, &alice, "XSS", "<script>alert(1)</script>").await;

    let body = server
        .get(&format!("/posts/{}", id))
        .await
        .json::<Value>();
    assert_eq!(
        body["data"]["post"]["rendered_body"],
        "<p>&lt;script&gt;alert(1)&lt;/script&gt;</p>"
    );
}

#[tokio::test]
async fn test_invalid_page_query_is_json_error() {
    let (server, _db) = create_test_server().await;

    for page in ["abc", "-1"] {
        let response = server.get("/posts").add_query_param("page", page).await;
        response.assert_status(StatusCode::BAD_REQUEST);
        let body = response.json::<Value>();
        assert_eq!(body["error"]["code"], "BAD_REQUEST");
        assert!(body["error"]["message"]
            .as_str()
            .unwrap()
            .starts_with("Invalid query string"));
    }
}

#[tokio::test]
async fn test_submitted_text_is_trimmed() {
    let (server, _db) = create_test_server().await;
    let alice = register_user(&server, "Alice", "alice@example.com").await;

    // Whitespace around a maximum-length title does not count
    let title = format!("  {}  ", "t".repeat(255));
    let id = create_post(&server, &alice, &title, "  Hello  \n").await;

    let body = server
        .get(&format!("/posts/{}", id))
        .await
        .json::<Value>();
    assert_eq!(body["data"]["post"]["title"], "t".repeat(255));
    assert_eq!(body["data"]["post"]["body"], "Hello");

    let response = server
        .put(&format!("/posts/{}", id))
        .auth(&alice)
        .csrf()
        .json(&json!({ "title": "  Edited  ", "body": "   " }))
        .await;
    response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(response.json::<Value>()["form"]["values"]["title"], "Edited");
}

#[tokio::test]
async fn test_health_check() {
    let (server, _db) = create_test_server().await;

    let response = server.get("/health").await;
    response.assert_status_ok();
    response.assert_text("OK");
}
