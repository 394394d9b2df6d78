// Response cache stage.
// Serves fresh GET responses straight from the store, skipping the inner
// chain entirely. Sits outside status validation and JSON decoding so
// every stored entry is a fully decoded, validated response.

use std::sync::Arc;

use async_trait::async_trait;
use log::{debug, warn};

use crate::error::Result;
use crate::http::chain::{Middleware, Next};
use crate::http::message::{Method, Request, Response};
use crate::storage::{CacheEntry, Store};

pub struct Cache {
    store: Arc<dyn Store>,
}

impl Cache {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    fn lookup(&self, key: &str) -> Option<CacheEntry> {
        match self.store.get(key) {
            Ok(entry) => entry,
            Err(err) => {
                // A corrupt or unreadable entry degrades to a miss.
                warn!("cache read failed for {key}: {err}");
                None
            }
        }
    }

    /// Only responses that carry cache-control metadata without `no-store`
    /// may be stored.
    fn cacheable(response: &Response) -> bool {
        match response.cache_control() {
            Some(cache_control) => !cache_control.contains("no-store"),
            None => false,
        }
    }

    fn needs_revalidation(entry: &CacheEntry) -> bool {
        if Self::is_stale(entry) {
            return true;
        }
        let cache_control = entry.response.cache_control().unwrap_or("");
        cache_control.contains("no-cache") || cache_control.contains("must-revalidate")
    }

    /// Stale iff age exceeds the declared max-age. An entry with no
    /// declared max-age is stale: fail open to a real fetch.
    fn is_stale(entry: &CacheEntry) -> bool {
        match Self::max_age(&entry.response) {
            Some(max_age) => entry.age_seconds() > max_age,
            None => true,
        }
    }

    fn max_age(response: &Response) -> Option<i64> {
        let cache_control = response.cache_control()?;
        cache_control
            .split(',')
            .map(str::trim)
            .find_map(|directive| directive.strip_prefix("max-age="))?
            .parse()
            .ok()
    }
}

#[async_trait]
impl Middleware for Cache {
    async fn handle(&self, request: Request, next: Next<'_>) -> Result<Response> {
        let key = request.url.clone();
        let is_get = request.method == Method::Get;

        if is_get {
            if let Some(entry) = self.lookup(&key) {
                if !Self::needs_revalidation(&entry) {
                    debug!("cache hit: {key}");
                    return Ok(entry.response);
                }
                debug!("cache entry needs revalidation: {key}");
            }
        }

        let response = next.run(request).await?;

        if is_get && Self::cacheable(&response) {
            if let Err(err) = self.store.set(&key, CacheEntry::new(response.clone())) {
                warn!("cache write failed for {key}: {err}");
            }
        }

        Ok(response)
    }
}
