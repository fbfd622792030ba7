//! Directory API client
//!
//! Fetches the company directory from the configured JSON endpoint, caching
//! the decoded result for a bounded freshness window. Concurrent fetches for
//! the same endpoint are coalesced into one network request whose result is
//! fanned out to every waiter.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use chrono::{Duration, Utc};
use reqwest::{Client, Url};
use thiserror::Error;
use tokio::sync::broadcast;

use super::Company;
use crate::cache::CacheStore;

/// Default directory endpoint
pub const DIRECTORY_URL: &str = "https://run.mocky.io/v3/1d1cb4ec-73db-4762-8c4b-0b8aa3cecd4c";

/// Default freshness window for cached directories in seconds
pub const FRESHNESS_SECS: u64 = 3600;

/// Errors that can occur when fetching the directory
///
/// Causes are carried as rendered strings rather than source errors so the
/// type stays `Clone`, which the in-flight fan-out channel requires.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DirectoryError {
    /// The configured endpoint is not a valid URL
    #[error("invalid endpoint URL")]
    InvalidEndpoint,

    /// Network or connection failure
    #[error("connection failed: {0}")]
    Transport(String),

    /// Server replied with a non-success status or an empty body
    #[error("server returned HTTP {0}")]
    BadResponse(u16),

    /// Response body is not a valid directory document
    #[error("failed to decode response: {0}")]
    Decode(String),
}

type FetchOutcome = Result<Company, DirectoryError>;

type InflightMap = HashMap<String, broadcast::Sender<FetchOutcome>>;

/// Removes the in-flight entry for a key when the leading fetch ends,
/// whether it completed or was dropped mid-flight
///
/// Dropping the entry drops its sender, so any subscribed waiters wake
/// with a closed-channel error instead of pending forever, and later
/// callers register a fresh leader instead of joining a dead one.
struct InflightGuard<'a> {
    inflight: &'a Mutex<InflightMap>,
    key: &'a str,
    armed: bool,
}

impl InflightGuard<'_> {
    /// Deregisters and fans the outcome out to every waiter
    fn complete(mut self, outcome: &FetchOutcome) {
        self.armed = false;
        if let Some(tx) = lock_inflight(self.inflight).remove(self.key) {
            // No waiters is fine; send only fails when none subscribed.
            let _ = tx.send(outcome.clone());
        }
    }
}

impl Drop for InflightGuard<'_> {
    fn drop(&mut self) {
        if self.armed {
            lock_inflight(self.inflight).remove(self.key);
        }
    }
}

fn lock_inflight(inflight: &Mutex<InflightMap>) -> MutexGuard<'_, InflightMap> {
    inflight.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Freshness window from whole seconds, saturating at the representable
/// maximum so oversized values never wrap negative or panic
fn window_from_secs(secs: u64) -> Duration {
    i64::try_from(secs)
        .ok()
        .and_then(Duration::try_seconds)
        .unwrap_or(Duration::MAX)
}

/// Client for fetching the company directory
///
/// Owns the HTTP client, the response cache, and the last successfully
/// decoded directory. A fresh cached record is served without touching the
/// network; a stale record is invalidated and refetched. Failed fetches
/// never modify the cache.
#[derive(Debug)]
pub struct DirectoryClient {
    /// HTTP client for making requests
    http_client: Client,
    /// Cache of decoded directories, keyed by endpoint URL
    cache: CacheStore<Company>,
    /// Endpoint to fetch the directory from
    endpoint: String,
    /// Maximum age at which a cached record is still served
    freshness_window: Duration,
    /// Most recently fetched directory, for consumers that poll
    last_known: Mutex<Option<Company>>,
    /// In-flight fetches by cache key, for request coalescing.
    /// Guarded by a std mutex; never held across an await.
    inflight: Mutex<InflightMap>,
}

impl Default for DirectoryClient {
    fn default() -> Self {
        Self::new(DIRECTORY_URL)
    }
}

impl DirectoryClient {
    /// Creates a client for the given endpoint with the default freshness window
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            http_client: Client::new(),
            cache: CacheStore::new(),
            endpoint: endpoint.into(),
            freshness_window: window_from_secs(FRESHNESS_SECS),
            last_known: Mutex::new(None),
            inflight: Mutex::new(HashMap::new()),
        }
    }

    /// Overrides the freshness window
    pub fn with_freshness_secs(mut self, secs: u64) -> Self {
        self.freshness_window = window_from_secs(secs);
        self
    }

    /// Overrides the HTTP client
    #[allow(dead_code)]
    pub fn with_http_client(mut self, client: Client) -> Self {
        self.http_client = client;
        self
    }

    /// The response cache, exposed for inspection and test seeding
    pub fn cache(&self) -> &CacheStore<Company> {
        &self.cache
    }

    /// The most recently fetched directory, if any fetch has succeeded
    pub fn last_known(&self) -> Option<Company> {
        self.lock_last_known().clone()
    }

    /// Fetches the current directory, preferring the cache when fresh
    ///
    /// # Returns
    /// * `Ok(Company)` - The cached or freshly fetched directory
    /// * `Err(DirectoryError)` - Classified failure; the cache is untouched
    ///
    /// # Behavior
    /// - An unparseable endpoint fails immediately, before any cache or
    ///   network access
    /// - A cached record younger than the freshness window is returned as-is
    /// - A stale record is invalidated and refetched
    /// - If a fetch for the same endpoint is already in flight, this call
    ///   waits for it and shares its result instead of issuing a second
    ///   request
    pub async fn fetch(&self) -> FetchOutcome {
        let url = Url::parse(&self.endpoint).map_err(|_| DirectoryError::InvalidEndpoint)?;
        let key = url.to_string();

        if let Some(record) = self.cache.get(&key) {
            let age = Utc::now() - record.cached_at;
            if age < self.freshness_window {
                return Ok(record.value);
            }
            self.cache.invalidate(&key);
        }

        // Join an in-flight fetch for this key, or register as its leader.
        let waiter = {
            let mut inflight = lock_inflight(&self.inflight);
            match inflight.get(&key) {
                Some(tx) => Some(tx.subscribe()),
                None => {
                    let (tx, _) = broadcast::channel(1);
                    inflight.insert(key.clone(), tx);
                    None
                }
            }
        };

        if let Some(mut rx) = waiter {
            return match rx.recv().await {
                Ok(outcome) => outcome,
                // The leading fetch was dropped before completing.
                Err(_) => Err(DirectoryError::Transport(
                    "request abandoned before completion".to_string(),
                )),
            };
        }

        // Armed before the await so a dropped leader still deregisters
        // and later callers do not join a fetch that will never finish.
        let guard = InflightGuard {
            inflight: &self.inflight,
            key: &key,
            armed: true,
        };

        let outcome = self.fetch_from_network(url).await;

        if let Ok(company) = &outcome {
            self.cache.put(&key, company.clone(), Utc::now());
            *self.lock_last_known() = Some(company.clone());
        }

        guard.complete(&outcome);

        outcome
    }

    /// Issues the GET request and decodes the body
    async fn fetch_from_network(&self, url: Url) -> FetchOutcome {
        let response = self
            .http_client
            .get(url)
            .send()
            .await
            .map_err(|e| DirectoryError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(DirectoryError::BadResponse(status.as_u16()));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| DirectoryError::Transport(e.to_string()))?;
        if body.is_empty() {
            return Err(DirectoryError::BadResponse(status.as_u16()));
        }

        serde_json::from_slice(&body).map_err(|e| DirectoryError::Decode(e.to_string()))
    }

    fn lock_last_known(&self) -> MutexGuard<'_, Option<Company>> {
        self.last_known
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}
