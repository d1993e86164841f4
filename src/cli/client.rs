use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde_json::{json, Value};

/// Thin HTTP client for the Message Board API
pub struct ApiClient {
    base_url: String,
    token: Option<String>,
    http: reqwest::Client,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>, token: Option<String>) -> Self {
        Self {
            base_url: base_url.into(),
            token,
            http: reqwest::Client::new(),
        }
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let builder = self.http.request(method, format!("{}{}", self.base_url, path));
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// POST /api/login, returning the `data` payload (token + user)
    pub async fn login(&self, username: &str, password: &str) -> anyhow::Result<Value> {
        let res = self
            .request(Method::POST, "/api/login")
            .json(&json!({ "username": username, "password": password }))
            .send()
            .await?;
        unwrap_envelope(res).await
    }

    pub async fn list_messages(&self) -> anyhow::Result<Value> {
        let res = self.request(Method::GET, "/api/messages").send().await?;
        unwrap_envelope(res).await
    }

    pub async fn get_message(&self, id: i64) -> anyhow::Result<Value> {
        let res = self
            .request(Method::GET, &format!("/api/messages/{}", id))
            .send()
            .await?;
        unwrap_envelope(res).await
    }

    pub async fn create_message(&self, id: i64, title: &str, text: &str) -> anyhow::Result<Value> {
        let res = self
            .request(Method::POST, "/api/messages")
            .json(&json!({ "id": id, "title": title, "text": text }))
            .send()
            .await?;
        unwrap_envelope(res).await
    }

    pub async fn update_message(&self, id: i64, title: &str, text: &str) -> anyhow::Result<()> {
        let res = self
            .request(Method::PUT, &format!("/api/messages/{}", id))
            .json(&json!({ "id": id, "title": title, "text": text }))
            .send()
            .await?;
        if res.status() == StatusCode::NO_CONTENT {
            return Ok(());
        }
        unwrap_envelope(res).await.map(|_| ())
    }

    pub async fn delete_message(&self, id: i64) -> anyhow::Result<Value> {
        let res = self
            .request(Method::DELETE, &format!("/api/messages/{}", id))
            .send()
            .await?;
        unwrap_envelope(res).await
    }
}

/// Return `data` from a success envelope, or turn an error body into an error
async fn unwrap_envelope(res: Response) -> anyhow::Result<Value> {
    let status = res.status();
    let body: Value = res.json().await.unwrap_or(Value::Null);

    if status.is_success() {
        return Ok(body.get("data").cloned().unwrap_or(Value::Null));
    }

    let message = body
        .get("message")
        .and_then(Value::as_str)
        .unwrap_or_else(|| status.canonical_reason().unwrap_or("request failed"));
    anyhow::bail!("{} ({})", message, status.as_u16())
}
