use anyhow::{Context, Result};
use serde_json::Value;

use crate::config::{ApiConfig, REQUEST_TIMEOUT};
use crate::model::{Post, Recipe, Restaurant, Role};

mod types;
pub use self::types::{ChatReply, PostDraft};
use self::types::{ChatRequest, HistoryEntry, RawPost, RawRestaurant};

/// Tagged outcome of a remote call. Load failures degrade at the view layer
/// (fallback data or an empty list); nothing here aborts the process.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Non-2xx response; `message` is the body's `error`/`message` field when
    /// the backend sent a structured payload, else the status line.
    #[error("{message}")]
    Status { status: u16, message: String },

    #[error("malformed response: {0}")]
    Malformed(String),

    #[error(transparent)]
    Transport(#[from] reqwest::Error),
}

impl ApiError {
    /// Human-readable cause for logging and status lines.
    pub fn cause(&self) -> String {
        self.to_string()
    }
}

#[derive(Clone)]
pub struct RemoteClient {
    client: reqwest::Client,
    base_url: String,
}

impl RemoteClient {
    pub fn new(cfg: &ApiConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent("bites")
            .timeout(REQUEST_TIMEOUT)
            .build()
            .context("build reqwest client")?;
        Ok(Self {
            client,
            base_url: cfg.base_url.clone(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// `GET /restaurants` — bare array payload; a non-array body is a
    /// success with zero items, not a failure.
    pub async fn restaurants(&self) -> Result<Vec<Restaurant>, ApiError> {
        let value = self.get_json("/restaurants").await?;
        Ok(collect_items(value.as_array(), RawRestaurant::into_record))
    }

    /// `GET /community` — `{posts: [...]}` envelope; a missing or non-array
    /// `posts` field normalizes to an empty list.
    pub async fn community_posts(&self) -> Result<Vec<Post>, ApiError> {
        let value = self.get_json("/community").await?;
        Ok(collect_items(
            value.get("posts").and_then(Value::as_array),
            RawPost::into_record,
        ))
    }

    /// `POST /community` — the server assigns the canonical id and creation
    /// timestamp; the returned record replaces the local draft.
    pub async fn create_post(&self, draft: &PostDraft) -> Result<Post, ApiError> {
        let resp = self
            .client
            .post(self.url("/community"))
            .json(draft)
            .send()
            .await?;
        let resp = ensure_ok(resp).await?;
        let raw: RawPost = resp
            .json()
            .await
            .map_err(|err| ApiError::Malformed(err.to_string()))?;
        Ok(raw.into_record())
    }

    /// `GET /recipes` — `{recipes: [...]}` envelope.
    pub async fn recipes(&self) -> Result<Vec<Recipe>, ApiError> {
        let value = self.get_json("/recipes").await?;
        Ok(collect_items(
            value.get("recipes").and_then(Value::as_array),
            |recipe: Recipe| recipe,
        ))
    }

    /// `POST /chat/recipes` — sends the message plus the full ordered
    /// transcript as `{role, content}` pairs.
    pub async fn chat(
        &self,
        message: &str,
        history: &[(Role, String)],
    ) -> Result<ChatReply, ApiError> {
        let req = ChatRequest {
            message: message.to_string(),
            history: history
                .iter()
                .map(|(role, text)| HistoryEntry {
                    role: *role,
                    content: text.clone(),
                })
                .collect(),
        };
        let resp = self
            .client
            .post(self.url("/chat/recipes"))
            .json(&req)
            .send()
            .await?;
        let resp = ensure_ok(resp).await?;
        resp.json()
            .await
            .map_err(|err| ApiError::Malformed(err.to_string()))
    }

    async fn get_json(&self, path: &str) -> Result<Value, ApiError> {
        let resp = self.client.get(self.url(path)).send().await?;
        let resp = ensure_ok(resp).await?;
        let body = resp.text().await?;
        serde_json::from_str(&body).map_err(|err| ApiError::Malformed(err.to_string()))
    }
}

async fn ensure_ok(resp: reqwest::Response) -> Result<reqwest::Response, ApiError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let body = resp.text().await.unwrap_or_default();
    let message = extract_error_message(&body)
        .unwrap_or_else(|| format!("http {}", status.as_u16()));
    Err(ApiError::Status {
        status: status.as_u16(),
        message,
    })
}

/// Pull a human-readable cause out of a structured error body, preferring
/// `error` over `message`.
pub fn extract_error_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    for key in ["error", "message"] {
        if let Some(msg) = value.get(key).and_then(Value::as_str)
            && !msg.is_empty()
        {
            return Some(msg.to_string());
        }
    }
    None
}

fn collect_items<R, T>(items: Option<&Vec<Value>>, convert: impl Fn(R) -> T) -> Vec<T>
where
    R: serde::de::DeserializeOwned,
{
    let Some(items) = items else {
        return Vec::new();
    };
    items
        .iter()
        .filter_map(|item| serde_json::from_value::<R>(item.clone()).ok())
        .map(convert)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_message_prefers_error_over_message() {
        assert_eq!(
            extract_error_message(r#"{"error":"rate limited","message":"later"}"#).as_deref(),
            Some("rate limited")
        );
        assert_eq!(
            extract_error_message(r#"{"message":"try later"}"#).as_deref(),
            Some("try later")
        );
        assert_eq!(extract_error_message("not json"), None);
        assert_eq!(extract_error_message(r#"{"error":""}"#), None);
    }

    #[test]
    fn non_array_payload_normalizes_to_empty() {
        let value: Value = serde_json::from_str(r#"{"unexpected": true}"#).unwrap();
        let items = collect_items(value.as_array(), RawRestaurant::into_record);
        assert!(items.is_empty());
    }

    #[test]
    fn unparseable_items_are_dropped_not_fatal() {
        let value: Value = serde_json::from_str(r#"[{"name":"Ramen Bar"}, 42]"#).unwrap();
        let items = collect_items(value.as_array(), RawRestaurant::into_record);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].name, "Ramen Bar");
        assert_eq!(items[0].id, "Ramen Bar");
    }
}
