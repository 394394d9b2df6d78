// GitHub API client.
// Exposes the typed report operations over the middleware chain, mapping
// HTTP outcomes into domain values and failures.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use log::debug;

use crate::error::{ReportsError, Result};
use crate::http::chain::{Chain, Middleware};
use crate::http::message::Request;
use crate::http::middleware::{Authentication, Cache, JsonDecode, StatusCheck};
use crate::http::transport::{HttpTransport, Transport};
use crate::storage::Store;

use super::pager::Pager;
use super::types::{CreatedGist, Event, EventPayload, RepoSummary, Repository, User};

const GITHUB_API_BASE: &str = "https://api.github.com";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

pub struct GitHubApiClient {
    chain: Chain,
}

impl GitHubApiClient {
    /// Build a client over the production transport. `timeout` is the
    /// per-request deadline; `None` uses the default.
    pub fn new(token: &str, store: Arc<dyn Store>, timeout: Option<Duration>) -> Result<Self> {
        let transport = Arc::new(HttpTransport::new(timeout.unwrap_or(DEFAULT_TIMEOUT))?);
        Ok(Self::with_transport(transport, token, store))
    }

    /// Build the client over an arbitrary transport. The stage order is
    /// fixed: authentication, cache, status validation, JSON decoding.
    pub fn with_transport(
        transport: Arc<dyn Transport>,
        token: &str,
        store: Arc<dyn Store>,
    ) -> Self {
        let stages: Vec<Box<dyn Middleware>> = vec![
            Box::new(Authentication::new(token)),
            Box::new(Cache::new(store)),
            Box::new(StatusCheck),
            Box::new(JsonDecode),
        ];
        Self {
            chain: Chain::new(transport, stages),
        }
    }

    /// Create a client from the GITHUB_TOKEN environment variable.
    /// Fails fast, before any network call.
    pub fn from_env(store: Arc<dyn Store>, timeout: Option<Duration>) -> Result<Self> {
        let token = std::env::var("GITHUB_TOKEN").map_err(|_| {
            ReportsError::Configuration(
                "the GITHUB_TOKEN environment variable is not set".to_string(),
            )
        })?;
        Self::new(&token, store, timeout)
    }

    /// Fetch a user's profile.
    pub async fn get_user(&self, username: &str) -> Result<User> {
        let url = format!("{GITHUB_API_BASE}/users/{username}");
        let response = self.chain.execute(Request::get(&url)).await?;

        match response.status {
            200 => response.decode(),
            404 => Err(ReportsError::NonexistentUser(username.to_string())),
            status => Err(ReportsError::RequestFailure(
                response
                    .message()
                    .unwrap_or_else(|| format!("HTTP {status}")),
            )),
        }
    }

    /// List a user's public repositories with their language breakdowns.
    /// One extra languages lookup is issued per repository that survives
    /// the fork filter, sequentially; any failed lookup fails the call.
    pub async fn public_repos_for_user(
        &self,
        username: &str,
        include_forks: bool,
    ) -> Result<Vec<Repository>> {
        let url = format!("{GITHUB_API_BASE}/users/{username}/repos");
        let summaries: Vec<RepoSummary> = Pager::new(&self.chain)
            .fetch_all(&url)
            .await
            .map_err(|err| user_scoped(err, username))?;

        let mut repos = Vec::with_capacity(summaries.len());
        for summary in summaries {
            if summary.fork && !include_forks {
                debug!("skipping fork {}", summary.full_name);
                continue;
            }
            let languages = self.languages(&summary.full_name).await?;
            repos.push(Repository {
                full_name: summary.full_name,
                svn_url: summary.svn_url,
                languages,
            });
        }
        Ok(repos)
    }

    /// List a user's recent public activity.
    pub async fn public_events_for_user(&self, username: &str) -> Result<Vec<Event>> {
        let url = format!("{GITHUB_API_BASE}/users/{username}/events/public");
        let events: Vec<EventPayload> = Pager::new(&self.chain)
            .fetch_all(&url)
            .await
            .map_err(|err| user_scoped(err, username))?;

        Ok(events.into_iter().map(Event::from).collect())
    }

    /// Create a private gist holding one file; returns its URL.
    pub async fn create_private_gist(
        &self,
        description: &str,
        filename: &str,
        contents: &str,
    ) -> Result<String> {
        let url = format!("{GITHUB_API_BASE}/gists");
        let payload = serde_json::json!({
            "description": description,
            "public": false,
            "files": { filename: { "content": contents } },
        });
        let request = Request::post(&url, serde_json::to_vec(&payload)?)
            .with_header("Content-Type", "application/json");

        let response = self.chain.execute(request).await?;
        if response.status != 201 {
            return Err(ReportsError::ContentCreation(
                response
                    .message()
                    .unwrap_or_else(|| format!("HTTP {}", response.status)),
            ));
        }

        let gist: CreatedGist = response.decode()?;
        Ok(gist.html_url)
    }

    async fn languages(&self, full_name: &str) -> Result<HashMap<String, u64>> {
        let url = format!("{GITHUB_API_BASE}/repos/{full_name}/languages");
        let response = self.chain.execute(Request::get(&url)).await?;

        if response.status != 200 {
            return Err(ReportsError::RequestFailure(
                response
                    .message()
                    .unwrap_or_else(|| format!("HTTP {}", response.status)),
            ));
        }
        response.decode()
    }
}

/// A 404 while paging a user-keyed endpoint means the user does not exist;
/// other pagination failures are endpoint-scoped and pass through.
fn user_scoped(err: ReportsError, username: &str) -> ReportsError {
    match err {
        ReportsError::PaginationFailed { status: 404, .. } => {
            ReportsError::NonexistentUser(username.to_string())
        }
        other => other,
    }
}
