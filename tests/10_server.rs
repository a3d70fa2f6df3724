mod common;

use anyhow::Result;
use reqwest::StatusCode;

use common::{TestServer, PASSWORD};

#[tokio::test]
async fn health_endpoint_responds() -> Result<()> {
    let server = TestServer::start().await?;
    let client = reqwest::Client::new();

    let res = client
        .get(format!("{}/health", server.base_url))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);

    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["status"], "success", "{}", body);
    assert_eq!(body["data"]["database"], "ok", "{}", body);
    Ok(())
}

#[tokio::test]
async fn root_describes_the_service() -> Result<()> {
    let server = TestServer::start().await?;

    let body = reqwest::get(format!("{}/", server.base_url))
        .await?
        .json::<serde_json::Value>()
        .await?;
    assert_eq!(body["data"]["name"], "Found API");
    assert!(body["data"]["endpoints"].get("users").is_some(), "{}", body);
    Ok(())
}

#[tokio::test]
async fn form_post_over_http() -> Result<()> {
    let server = TestServer::start().await?;
    let client = reqwest::Client::new();

    let res = client
        .post(format!("{}/users/", server.base_url))
        .form(&[
            ("username", "alice"),
            ("subreddit", "python"),
            ("type", "post"),
            ("content", "hi"),
            ("password", PASSWORD),
        ])
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["status"], "success", "{}", body);
    assert_eq!(body["action"], "INSERT");

    let res = client
        .get(format!("{}/users/alice", server.base_url))
        .send()
        .await?;
    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["data"]["subreddit"], "python", "{}", body);
    Ok(())
}

#[tokio::test]
async fn failures_still_answer_200() -> Result<()> {
    let server = TestServer::start().await?;

    let res = reqwest::get(format!("{}/users/nobody", server.base_url)).await?;
    assert_eq!(res.status(), StatusCode::OK);
    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["status"], "fail");
    assert_eq!(body["message"], "User does not exist");
    Ok(())
}
