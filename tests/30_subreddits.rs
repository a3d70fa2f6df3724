mod common;

use anyhow::Result;
use axum::http::Method;
use serde_json::json;

use common::{assert_fail, assert_success, TestApp, PASSWORD};

#[tokio::test]
async fn submission_lifecycle_end_to_end() -> Result<()> {
    let app = TestApp::new().await?;

    let body = app
        .post(
            "/users",
            &[
                ("username", "alice"),
                ("subreddit", "python"),
                ("type", "post"),
                ("content", "hi"),
                ("password", PASSWORD),
            ],
        )
        .await?;
    assert_success(&body);
    assert!(body["data"]["date"].as_str().is_some_and(|d| !d.is_empty()));

    let body = app.get("/subreddits/python").await?;
    assert_eq!(
        body,
        json!({
            "status": "success",
            "data": {"name": "python", "count": 1, "users": ["alice"]}
        })
    );

    let body = app.delete("/users/alice", &[("password", PASSWORD)]).await?;
    assert_success(&body);

    let body = app.get("/users/alice").await?;
    assert_fail(&body, "User does not exist");
    Ok(())
}

#[tokio::test]
async fn index_groups_usernames_by_subreddit() -> Result<()> {
    let app = TestApp::new().await?;
    app.create_user("alice", "python", "a").await?;
    app.create_user("bob", "rust", "b").await?;
    app.create_user("carol", "python", "c").await?;

    let body = app.get("/subreddits").await?;
    assert_success(&body);
    assert_eq!(body["data"]["python"], json!(["alice", "carol"]));
    assert_eq!(body["data"]["rust"], json!(["bob"]));
    Ok(())
}

#[tokio::test]
async fn single_subreddit_match_ignores_case() -> Result<()> {
    let app = TestApp::new().await?;
    app.create_user("alice", "Python", "a").await?;
    app.create_user("bob", "python", "b").await?;

    let body = app.get("/subreddits/PYTHON").await?;
    assert_eq!(body["data"]["name"], "PYTHON");
    assert_eq!(body["data"]["count"], 2);
    assert_eq!(body["data"]["users"], json!(["alice", "bob"]));
    Ok(())
}

#[tokio::test]
async fn unknown_subreddit_is_empty_not_failure() -> Result<()> {
    let app = TestApp::new().await?;

    let body = app.get("/subreddits/golang").await?;
    assert_success(&body);
    assert_eq!(body["data"]["count"], 0);
    assert_eq!(body["data"]["users"], json!([]));

    let body = app.get("/subreddits").await?;
    assert_eq!(body["data"], json!({}));
    Ok(())
}

#[tokio::test]
async fn subreddits_are_read_only() -> Result<()> {
    let app = TestApp::new().await?;

    let body = app
        .send(Method::POST, "/subreddits", &[("password", PASSWORD)])
        .await?;
    assert_fail(&body, "Invalid request method");

    let body = app.send(Method::DELETE, "/subreddits/python", &[]).await?;
    assert_fail(&body, "Invalid request method");
    Ok(())
}
