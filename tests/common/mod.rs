#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::{TimeZone, Utc};
use reqwest::StatusCode;
use serde_json::Value;

use message_board_api::auth::UserRegistry;
use message_board_api::config::AppConfig;
use message_board_api::database::MemoryStore;
use message_board_api::models::Message;
use message_board_api::state::AppState;

pub const JWT_SECRET: &str = "integration-test-secret-integration-test";

pub struct TestApp {
    pub base_url: String,
    pub store: MemoryStore,
    pub client: reqwest::Client,
}

/// The two-message fixture: id 1 owned by user 1, id 2 owned by user 2
pub fn seed_messages() -> Vec<Message> {
    let created_at = Utc.with_ymd_and_hms(2020, 1, 1, 12, 0, 0).unwrap();
    vec![
        Message {
            id: 1,
            user_id: 1,
            created_at,
            title: "Test message title #1".to_string(),
            text: "Test message text #1".to_string(),
        },
        Message {
            id: 2,
            user_id: 2,
            created_at,
            title: "Test message title #2".to_string(),
            text: "Test message text #2".to_string(),
        },
    ]
}

/// Serve the router in-process on a free port with a freshly seeded store
pub async fn spawn_app() -> Result<TestApp> {
    let store = MemoryStore::with_messages(seed_messages());
    let state = AppState::new(
        AppConfig::for_testing(JWT_SECRET),
        UserRegistry::default(),
        Arc::new(store.clone()),
    )?;
    let app = message_board_api::app(state);

    // Pick an unused port for isolation
    let port = portpicker::pick_unused_port().context("failed to pick free port")?;
    let addr = SocketAddr::from(([127, 0, 0, 1], port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;

    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await {
            eprintln!("test server error: {}", e);
        }
    });

    Ok(TestApp {
        base_url: format!("http://{}", addr),
        store,
        client: reqwest::Client::new(),
    })
}

impl TestApp {
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Log in through the API and return the bearer token
    pub async fn login(&self, username: &str, password: &str) -> Result<String> {
        let res = self
            .client
            .post(self.url("/api/login"))
            .json(&serde_json::json!({ "username": username, "password": password }))
            .send()
            .await?;
        anyhow::ensure!(res.status() == StatusCode::OK, "login failed: {}", res.status());

        let body = res.json::<Value>().await?;
        body["data"]["token"]
            .as_str()
            .map(str::to_string)
            .context("login response missing token")
    }

    pub async fn token_for_john(&self) -> Result<String> {
        self.login("john", "secret").await
    }

    pub async fn token_for_aeryn(&self) -> Result<String> {
        self.login("aeryn", "secret").await
    }
}
