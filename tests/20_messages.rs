mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::{json, Value};

use message_board_api::database::MessageStore;

#[tokio::test]
async fn list_returns_all_messages() -> Result<()> {
    let app = common::spawn_app().await?;
    let token = app.token_for_aeryn().await?;

    let res = app.client.get(app.url("/api/messages")).bearer_auth(&token).send().await?;
    assert_eq!(res.status(), StatusCode::OK);

    let body = res.json::<Value>().await?;
    let messages = body["data"].as_array().expect("data should be an array");
    assert_eq!(messages.len(), 2);
    Ok(())
}

#[tokio::test]
async fn get_message_by_id() -> Result<()> {
    let app = common::spawn_app().await?;
    let token = app.token_for_john().await?;

    let res = app.client.get(app.url("/api/messages/2")).bearer_auth(&token).send().await?;
    assert_eq!(res.status(), StatusCode::OK);

    let body = res.json::<Value>().await?;
    let message = &body["data"];
    assert_eq!(message["id"], 2);
    assert_eq!(message["user_id"], 2);
    assert_eq!(message["title"], "Test message title #2");
    assert_eq!(message["text"], "Test message text #2");
    assert_eq!(message["created_at"], "2020-01-01T12:00:00Z");
    Ok(())
}

#[tokio::test]
async fn get_missing_message_is_not_found() -> Result<()> {
    let app = common::spawn_app().await?;
    let token = app.token_for_john().await?;

    let res = app.client.get(app.url("/api/messages/7")).bearer_auth(&token).send().await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn non_numeric_id_gets_json_bad_request() -> Result<()> {
    let app = common::spawn_app().await?;
    let token = app.token_for_john().await?;

    for res in [
        app.client.get(app.url("/api/messages/abc")).bearer_auth(&token).send().await?,
        app.client.delete(app.url("/api/messages/abc")).bearer_auth(&token).send().await?,
        app.client
            .put(app.url("/api/messages/abc"))
            .bearer_auth(&token)
            .json(&json!({ "id": 1, "title": "Valid title", "text": "text" }))
            .send()
            .await?,
    ] {
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let body = res.json::<Value>().await?;
        assert_eq!(body["success"], false);
        assert_eq!(body["code"], "BAD_REQUEST");
    }

    assert_eq!(app.store.find(1).await?.map(|m| m.title), Some("Test message title #1".to_string()));
    Ok(())
}

#[tokio::test]
async fn create_assigns_owner_and_points_at_canonical_read() -> Result<()> {
    let app = common::spawn_app().await?;
    let token = app.token_for_aeryn().await?;

    let res = app
        .client
        .post(app.url("/api/messages"))
        .bearer_auth(&token)
        .json(&json!({
            "id": 3,
            "user_id": 1,
            "title": "Added message title",
            "text": "Added message text"
        }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::CREATED);
    assert_eq!(
        res.headers().get("location").and_then(|v| v.to_str().ok()),
        Some("/api/messages/3")
    );

    let body = res.json::<Value>().await?;
    assert_eq!(body["data"]["user_id"], 2, "owner comes from the token, not the body");
    assert!(body["data"]["created_at"].is_string());

    let res = app.client.get(app.url("/api/messages/3")).bearer_auth(&token).send().await?;
    let fetched = res.json::<Value>().await?;
    assert_eq!(fetched["data"], body["data"]);
    Ok(())
}

#[tokio::test]
async fn create_sanitizes_angle_brackets() -> Result<()> {
    let app = common::spawn_app().await?;
    let token = app.token_for_john().await?;

    let res = app
        .client
        .post(app.url("/api/messages"))
        .bearer_auth(&token)
        .json(&json!({ "id": 4, "title": "a<b>c", "text": "<script>x</script>" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::CREATED);

    let stored = app.store.find(4).await?.expect("message 4 stored");
    assert_eq!(stored.title, "a.b.c");
    assert_eq!(stored.text, ".script.x./script.");
    Ok(())
}

#[tokio::test]
async fn create_with_existing_id_conflicts() -> Result<()> {
    let app = common::spawn_app().await?;
    let token = app.token_for_aeryn().await?;

    let res = app
        .client
        .post(app.url("/api/messages"))
        .bearer_auth(&token)
        .json(&json!({ "id": 1, "title": "Duplicate title", "text": "dup" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::CONFLICT);

    let original = app.store.find(1).await?.expect("message 1 still there");
    assert_eq!(original.user_id, 1);
    assert_eq!(original.title, "Test message title #1");
    Ok(())
}

#[tokio::test]
async fn create_rejects_invalid_fields() -> Result<()> {
    let app = common::spawn_app().await?;
    let token = app.token_for_john().await?;

    for payload in [
        json!({ "id": 5, "title": "x".repeat(51), "text": "text" }),
        json!({ "id": 5, "title": "Valid title", "text": "y".repeat(501) }),
        json!({ "id": 5, "title": "Tiny", "text": "text" }),
        json!({ "id": 5, "title": "Valid title" }),
    ] {
        let res = app
            .client
            .post(app.url("/api/messages"))
            .bearer_auth(&token)
            .json(&payload)
            .send()
            .await?;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST, "payload: {}", payload);
        let body = res.json::<Value>().await?;
        assert_eq!(body["code"], "VALIDATION_ERROR");
    }

    assert!(app.store.find(5).await?.is_none());
    Ok(())
}

#[tokio::test]
async fn malformed_json_is_bad_request() -> Result<()> {
    let app = common::spawn_app().await?;
    let token = app.token_for_john().await?;

    let res = app
        .client
        .post(app.url("/api/messages"))
        .bearer_auth(&token)
        .header("content-type", "application/json")
        .body("{\"id\": 5, \"title\": ")
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body = res.json::<Value>().await?;
    assert_eq!(body["code"], "INVALID_JSON");
    Ok(())
}

#[tokio::test]
async fn owner_can_update_and_gets_no_content() -> Result<()> {
    let app = common::spawn_app().await?;
    let token = app.token_for_john().await?;
    let before = app.store.find(1).await?.expect("seeded");

    let res = app
        .client
        .put(app.url("/api/messages/1"))
        .bearer_auth(&token)
        .json(&json!({ "id": 1, "title": "Updated title", "text": "Updated <em>text</em>" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::NO_CONTENT);
    assert!(res.bytes().await?.is_empty());

    let after = app.store.find(1).await?.expect("still there");
    assert_eq!(after.title, "Updated title");
    assert_eq!(after.text, "Updated .em.text./em.");
    assert_eq!(after.user_id, before.user_id);
    assert_eq!(after.created_at, before.created_at);
    Ok(())
}

#[tokio::test]
async fn non_owner_update_is_unauthorized_and_message_unchanged() -> Result<()> {
    let app = common::spawn_app().await?;
    let token = app.token_for_aeryn().await?;

    let res = app
        .client
        .put(app.url("/api/messages/1"))
        .bearer_auth(&token)
        .json(&json!({ "id": 1, "title": "Not my message", "text": "overwrite" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    let message = app.store.find(1).await?.expect("still there");
    assert_eq!(message.title, "Test message title #1");
    Ok(())
}

#[tokio::test]
async fn update_reports_shape_errors_before_existence_and_ownership() -> Result<()> {
    let app = common::spawn_app().await?;
    let token = app.token_for_aeryn().await?;

    // id mismatch on someone else's message
    let res = app
        .client
        .put(app.url("/api/messages/1"))
        .bearer_auth(&token)
        .json(&json!({ "id": 2, "title": "Valid title", "text": "text" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    // oversized title on someone else's message
    let res = app
        .client
        .put(app.url("/api/messages/1"))
        .bearer_auth(&token)
        .json(&json!({ "id": 1, "title": "t".repeat(51), "text": "text" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    // valid input for a message that does not exist
    let res = app
        .client
        .put(app.url("/api/messages/7"))
        .bearer_auth(&token)
        .json(&json!({ "id": 7, "title": "Valid title", "text": "text" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn delete_by_owner_returns_removed_message() -> Result<()> {
    let app = common::spawn_app().await?;
    let token = app.token_for_john().await?;

    let res = app.client.delete(app.url("/api/messages/1")).bearer_auth(&token).send().await?;
    assert_eq!(res.status(), StatusCode::OK);
    let body = res.json::<Value>().await?;
    assert_eq!(body["data"]["id"], 1);

    let res = app.client.get(app.url("/api/messages/1")).bearer_auth(&token).send().await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn delete_checks_existence_then_ownership() -> Result<()> {
    let app = common::spawn_app().await?;
    let token = app.token_for_aeryn().await?;

    let res = app.client.delete(app.url("/api/messages/7")).bearer_auth(&token).send().await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    let res = app.client.delete(app.url("/api/messages/1")).bearer_auth(&token).send().await?;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    assert!(app.store.find(1).await?.is_some());
    Ok(())
}
