//! Session tokens for files-manager.
//!
//! `TokenStore` is an in-process key-value store with per-key expiry.
//! `SessionManager` layers the session protocol on top of it: a session
//! token `t` maps to the owning user id under the key `auth_<t>`.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::RwLock;
use tracing::{debug, info};
use uuid::Uuid;

/// Key prefix for session entries.
pub const AUTH_KEY_PREFIX: &str = "auth_";

/// Default session lifetime (24 hours).
pub const DEFAULT_SESSION_DURATION_SECS: u64 = 24 * 60 * 60;

/// Build the store key for a session token.
pub fn auth_key(token: &str) -> String {
    format!("{AUTH_KEY_PREFIX}{token}")
}

#[derive(Debug, Clone)]
struct Entry {
    value: String,
    /// `None` when the TTL overflowed the clock.
    expires_at: Option<Instant>,
}

impl Entry {
    fn is_expired(&self, now: Instant) -> bool {
        self.expires_at.is_some_and(|at| now >= at)
    }
}

/// Key-value store with expiry.
///
/// Expired entries are invisible to `get` and are physically removed by
/// `purge_expired`.
#[derive(Debug, Default)]
pub struct TokenStore {
    entries: RwLock<HashMap<String, Entry>>,
}

impl TokenStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the store can serve requests.
    ///
    /// Always true for the in-process store; kept for status reporting.
    pub fn is_alive(&self) -> bool {
        true
    }

    /// Get the value stored under `key` unless it has expired.
    pub async fn get(&self, key: &str) -> Option<String> {
        let entries = self.entries.read().await;
        entries
            .get(key)
            .filter(|e| !e.is_expired(Instant::now()))
            .map(|e| e.value.clone())
    }

    /// Store `value` under `key` for `ttl`, replacing any previous value.
    pub async fn set(&self, key: impl Into<String>, value: impl Into<String>, ttl: Duration) {
        let entry = Entry {
            value: value.into(),
            expires_at: Instant::now().checked_add(ttl),
        };
        self.entries.write().await.insert(key.into(), entry);
    }

    /// Delete `key`. Returns true if a live entry was removed.
    pub async fn del(&self, key: &str) -> bool {
        let removed = self.entries.write().await.remove(key);
        removed.is_some_and(|e| !e.is_expired(Instant::now()))
    }

    /// Remove every expired entry, returning how many were dropped.
    pub async fn purge_expired(&self) -> usize {
        let now = Instant::now();
        let mut entries = self.entries.write().await;
        let before = entries.len();
        entries.retain(|_, e| !e.is_expired(now));
        before - entries.len()
    }

    /// Number of stored entries, expired ones included.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    /// Whether the store holds no entries.
    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

/// Session manager issuing and resolving session tokens.
#[derive(Debug, Clone)]
pub struct SessionManager {
    store: Arc<TokenStore>,
    ttl: Duration,
}

impl SessionManager {
    /// Create a session manager over `store` with the given token lifetime.
    pub fn new(store: Arc<TokenStore>, ttl: Duration) -> Self {
        Self { store, ttl }
    }

    /// Create a session manager with the default 24 hour lifetime.
    pub fn with_default_ttl(store: Arc<TokenStore>) -> Self {
        Self::new(store, Duration::from_secs(DEFAULT_SESSION_DURATION_SECS))
    }

    /// The underlying token store.
    pub fn store(&self) -> &Arc<TokenStore> {
        &self.store
    }

    /// Token lifetime.
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Open a session for `user_id` and return its token.
    pub async fn open(&self, user_id: i64) -> String {
        let token = Uuid::new_v4().to_string();
        self.store
            .set(auth_key(&token), user_id.to_string(), self.ttl)
            .await;
        info!(user_id, "Session opened");
        token
    }

    /// Resolve a token to its user id.
    pub async fn resolve(&self, token: &str) -> Option<i64> {
        let value = self.store.get(&auth_key(token)).await?;
        match value.parse() {
            Ok(user_id) => Some(user_id),
            Err(_) => {
                debug!("Session entry holds a non-numeric user id");
                None
            }
        }
    }

    /// Close the session for `token`. Returns true if it was live.
    pub async fn close(&self, token: &str) -> bool {
        let closed = self.store.del(&auth_key(token)).await;
        if closed {
            info!("Session closed");
        }
        closed
    }
}
