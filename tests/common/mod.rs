#![allow(dead_code)]

use std::process::{Child, Command, Stdio};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::Value;
use tower::ServiceExt;
use tower_http::normalize_path::NormalizePath;

use found_api::config::AppConfig;
use found_api::AppState;

pub const PASSWORD: &str = "test-password";

/// In-process app over a private in-memory SQLite database
pub struct TestApp {
    service: NormalizePath<Router>,
}

impl TestApp {
    pub async fn new() -> Result<Self> {
        let mut config = AppConfig::for_database("sqlite::memory:", PASSWORD);
        config.api.enable_request_logging = false;
        let state = AppState::connect(config).await.context("failed to build app state")?;
        Ok(Self {
            service: found_api::service(state),
        })
    }

    pub async fn get(&self, path: &str) -> Result<Value> {
        self.send(Method::GET, path, &[]).await
    }

    pub async fn post(&self, path: &str, form: &[(&str, &str)]) -> Result<Value> {
        self.send(Method::POST, path, form).await
    }

    pub async fn put(&self, path: &str, form: &[(&str, &str)]) -> Result<Value> {
        self.send(Method::PUT, path, form).await
    }

    pub async fn delete(&self, path: &str, form: &[(&str, &str)]) -> Result<Value> {
        self.send(Method::DELETE, path, form).await
    }

    /// Sends a form-encoded request; every route answers 200 with a JSON envelope.
    pub async fn send(&self, method: Method, path: &str, form: &[(&str, &str)]) -> Result<Value> {
        let request = if form.is_empty() {
            Request::builder().method(method).uri(path).body(Body::empty())?
        } else {
            let encoded = url::form_urlencoded::Serializer::new(String::new())
                .extend_pairs(form)
                .finish();
            Request::builder()
                .method(method)
                .uri(path)
                .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(Body::from(encoded))?
        };

        self.dispatch(path, request).await
    }

    /// Sends the fields as a multipart/form-data body
    pub async fn send_multipart(&self, method: Method, path: &str, form: &[(&str, &str)]) -> Result<Value> {
        let boundary = "found-api-test-boundary";
        let mut body = String::new();
        for (name, value) in form {
            body.push_str(&format!(
                "--{}\r\nContent-Disposition: form-data; name=\"{}\"\r\n\r\n{}\r\n",
                boundary, name, value
            ));
        }
        body.push_str(&format!("--{}--\r\n", boundary));

        let request = Request::builder()
            .method(method)
            .uri(path)
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={}", boundary),
            )
            .body(Body::from(body))?;
        self.dispatch(path, request).await
    }

    /// Sends a prebuilt request
    pub async fn dispatch_raw(&self, request: Request<Body>) -> Result<Value> {
        let path = request.uri().path().to_string();
        self.dispatch(&path, request).await
    }

    async fn dispatch(&self, path: &str, request: Request<Body>) -> Result<Value> {
        let response = self.service.clone().oneshot(request).await?;
        anyhow::ensure!(
            response.status() == StatusCode::OK,
            "expected 200 OK for {}, got {}",
            path,
            response.status()
        );

        let bytes = to_bytes(response.into_body(), usize::MAX).await?;
        serde_json::from_slice(&bytes).with_context(|| format!("non-JSON body from {}", path))
    }

    /// POST /users with the shared password
    pub async fn create_user(&self, username: &str, subreddit: &str, content: &str) -> Result<Value> {
        self.post(
            "/users",
            &[
                ("username", username),
                ("subreddit", subreddit),
                ("type", "post"),
                ("content", content),
                ("password", PASSWORD),
            ],
        )
        .await
    }
}

pub fn assert_fail(body: &Value, message: &str) {
    assert_eq!(body["status"], "fail", "expected fail envelope: {}", body);
    assert_eq!(body["message"], message, "unexpected message: {}", body);
}

pub fn assert_success(body: &Value) {
    assert_eq!(body["status"], "success", "expected success envelope: {}", body);
}

/// The release binary, running against its own in-memory database
pub struct TestServer {
    pub port: u16,
    pub base_url: String,
    child: Child,
}

impl TestServer {
    pub async fn start() -> Result<Self> {
        let server = Self::spawn()?;
        server.wait_ready(Duration::from_secs(10)).await?;
        Ok(server)
    }

    fn spawn() -> Result<Self> {
        // Pick an unused port for isolation
        let port = portpicker::pick_unused_port().context("failed to pick free port")?;
        let base_url = format!("http://127.0.0.1:{}", port);

        let child = Command::new(env!("CARGO_BIN_EXE_found-api"))
            .env("HOST", "127.0.0.1")
            .env("PORT", port.to_string())
            .env("APP_ENV", "development")
            .env("DATABASE_URL", "sqlite::memory:")
            .env("EDIT_PASSWORD", PASSWORD)
            .stdin(Stdio::null())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .spawn()
            .context("failed to spawn server binary")?;

        Ok(Self { port, base_url, child })
    }

    async fn wait_ready(&self, timeout: Duration) -> Result<()> {
        let client = reqwest::Client::new();
        let deadline = Instant::now() + timeout;
        loop {
            if Instant::now() > deadline {
                break;
            }
            let url = format!("{}/health", self.base_url);
            if let Ok(resp) = client.get(&url).send().await {
                if resp.status() == reqwest::StatusCode::OK {
                    return Ok(());
                }
            }
            tokio::time::sleep(Duration::from_millis(150)).await;
        }
        anyhow::bail!("server did not become ready on {} within {:?}", self.base_url, timeout)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}
