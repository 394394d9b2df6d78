// Transport-level request and response model.
// Requests are immutable once built; responses carry raw bytes plus the
// decoded JSON form attached by the decode stage.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize, de::DeserializeOwned};

use crate::error::{ReportsError, Result};

/// HTTP method. Only the verbs the GitHub endpoints need.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Method {
    Get,
    Post,
}

/// Header map with case-insensitive lookup. Keys are stored lowercased.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Headers(HashMap<String, String>);

impl Headers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: &str, value: impl Into<String>) {
        self.0.insert(name.to_ascii_lowercase(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(&name.to_ascii_lowercase()).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// An outgoing HTTP request. A fresh one is built per attempt.
#[derive(Debug, Clone)]
pub struct Request {
    pub method: Method,
    pub url: String,
    pub headers: Headers,
    pub body: Option<Vec<u8>>,
}

impl Request {
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            method: Method::Get,
            url: url.into(),
            headers: Headers::new(),
            body: None,
        }
    }

    pub fn post(url: impl Into<String>, body: Vec<u8>) -> Self {
        Self {
            method: Method::Post,
            url: url.into(),
            headers: Headers::new(),
            body: Some(body),
        }
    }

    pub fn with_header(mut self, name: &str, value: impl Into<String>) -> Self {
        self.headers.insert(name, value);
        self
    }
}

/// A received HTTP response. Serializable so the cache stage can snapshot it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Response {
    pub status: u16,
    pub headers: Headers,
    /// Raw body bytes, kept even after decoding for cache serialization.
    pub body: Vec<u8>,
    /// Decoded body, attached by the JSON decode stage.
    pub json: Option<serde_json::Value>,
    /// Receipt time.
    pub received_at: DateTime<Utc>,
}

impl Response {
    pub fn new(status: u16, headers: Headers, body: Vec<u8>) -> Self {
        Self {
            status,
            headers,
            body,
            json: None,
            received_at: Utc::now(),
        }
    }

    pub fn content_type(&self) -> Option<&str> {
        self.headers.get("content-type")
    }

    pub fn cache_control(&self) -> Option<&str> {
        self.headers.get("cache-control")
    }

    /// The server-provided `message` field, when the body decoded as JSON.
    pub fn message(&self) -> Option<String> {
        self.json
            .as_ref()?
            .get("message")?
            .as_str()
            .map(str::to_string)
    }

    /// Project the decoded body into a typed value.
    pub fn decode<T: DeserializeOwned>(&self) -> Result<T> {
        let value = self.json.clone().ok_or_else(|| {
            ReportsError::RequestFailure("response body was not JSON".to_string())
        })?;
        Ok(serde_json::from_value(value)?)
    }
}
