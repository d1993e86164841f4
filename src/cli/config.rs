use std::fs;
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use url::Url;

pub const DEFAULT_SERVER: &str = "http://localhost:3000";

/// Saved login state for the CLI
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    pub server: String,
    pub username: Option<String>,
    pub token: Option<String>,
    pub logged_in_at: Option<DateTime<Utc>>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            server: DEFAULT_SERVER.to_string(),
            username: None,
            token: None,
            logged_in_at: None,
        }
    }
}

impl SessionConfig {
    pub fn login(&mut self, username: String, token: String) {
        self.username = Some(username);
        self.token = Some(token);
        self.logged_in_at = Some(Utc::now());
    }

    pub fn logout(&mut self) {
        self.username = None;
        self.token = None;
        self.logged_in_at = None;
    }

    pub fn require_token(&self) -> anyhow::Result<&str> {
        self.token
            .as_deref()
            .ok_or_else(|| anyhow::anyhow!("Not logged in; run `board auth login <username>` first"))
    }
}

/// Normalize and validate a server base URL
pub fn parse_server_url(raw: &str) -> anyhow::Result<String> {
    let url = Url::parse(raw).map_err(|e| anyhow::anyhow!("Invalid server URL '{}': {}", raw, e))?;
    match url.scheme() {
        "http" | "https" => {}
        other => anyhow::bail!("Unsupported URL scheme '{}'; use http or https", other),
    }
    Ok(url.as_str().trim_end_matches('/').to_string())
}

pub fn get_config_dir() -> anyhow::Result<PathBuf> {
    let config_dir = if let Ok(custom_dir) = std::env::var("BOARD_CLI_CONFIG_DIR") {
        PathBuf::from(custom_dir)
    } else {
        let home = std::env::var("HOME").map_err(|_| anyhow::anyhow!("HOME environment variable not set"))?;
        PathBuf::from(home).join(".config").join("message-board").join("cli")
    };

    if !config_dir.exists() {
        fs::create_dir_all(&config_dir)?;
    }

    Ok(config_dir)
}

pub fn load_session_config() -> anyhow::Result<SessionConfig> {
    let session_file = get_config_dir()?.join("session.json");

    if !session_file.exists() {
        return Ok(SessionConfig::default());
    }

    let content = fs::read_to_string(session_file)?;
    let config: SessionConfig = serde_json::from_str(&content)?;
    Ok(config)
}

pub fn save_session_config(config: &SessionConfig) -> anyhow::Result<()> {
    let session_file = get_config_dir()?.join("session.json");

    let content = serde_json::to_string_pretty(config)?;
    fs::write(session_file, content)?;
    Ok(())
}
