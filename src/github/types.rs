// GitHub domain values and wire payloads.
// Wire structs mirror the REST API shapes; domain values are the
// projections handed back to callers.

use std::collections::HashMap;

use serde::Deserialize;

/// Profile projection of a user payload.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct User {
    pub name: Option<String>,
    pub location: Option<String>,
    pub public_repos: u64,
}

/// A public repository with its language breakdown attached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Repository {
    pub full_name: String,
    pub svn_url: String,
    /// Language name to byte count, from the languages endpoint.
    pub languages: HashMap<String, u64>,
}

/// One item of a user's public activity feed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    pub event_type: String,
    pub repo_name: String,
}

/// Repository list item as returned by `/users/{username}/repos`.
#[derive(Debug, Clone, Deserialize)]
pub struct RepoSummary {
    pub full_name: String,
    pub svn_url: String,
    #[serde(default)]
    pub fork: bool,
}

/// Event list item as returned by `/users/{username}/events/public`.
#[derive(Debug, Clone, Deserialize)]
pub struct EventPayload {
    #[serde(rename = "type")]
    pub event_type: String,
    pub repo: EventRepoRef,
}

/// Repository reference embedded in an event payload.
#[derive(Debug, Clone, Deserialize)]
pub struct EventRepoRef {
    pub name: String,
}

impl From<EventPayload> for Event {
    fn from(payload: EventPayload) -> Self {
        Self {
            event_type: payload.event_type,
            repo_name: payload.repo.name,
        }
    }
}

/// Created-gist payload; only the URL is surfaced.
#[derive(Debug, Clone, Deserialize)]
pub struct CreatedGist {
    pub html_url: String,
}
