use std::future::Future;
use std::time::{Duration, Instant};

use tokio::sync::Mutex;

use crate::core::Result;

/// Tokens are refreshed this long before the gateway says they expire
pub const DEFAULT_REFRESH_MARGIN: Duration = Duration::from_secs(60);

struct CachedToken {
    token: String,
    refresh_at: Instant,
}

/// Single-slot access token cache shared by all requests.
///
/// The lock is held while fetching, so concurrent callers wait for one
/// fetch instead of each hitting the token endpoint. A failed fetch leaves
/// the slot empty.
pub struct TokenCache {
    slot: Mutex<Option<CachedToken>>,
    margin: Duration,
}

impl TokenCache {
    pub fn new() -> Self {
        Self::with_margin(DEFAULT_REFRESH_MARGIN)
    }

    pub fn with_margin(margin: Duration) -> Self {
        Self {
            slot: Mutex::new(None),
            margin,
        }
    }

    /// Return the cached token, or run `fetch` and cache what it returns.
    /// `fetch` yields the token and its lifetime.
    pub async fn get_or_fetch<F, Fut>(&self, fetch: F) -> Result<String>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<(String, Duration)>>,
    {
        let mut slot = self.slot.lock().await;

        if let Some(cached) = slot.as_ref() {
            if Instant::now() < cached.refresh_at {
                tracing::debug!("Reusing cached access token");
                return Ok(cached.token.clone());
            }
        }

        *slot = None;
        let (token, lifetime) = fetch().await?;
        let usable = lifetime.saturating_sub(self.margin);
        let now = Instant::now();
        match now.checked_add(usable) {
            Some(refresh_at) => {
                *slot = Some(CachedToken {
                    token: token.clone(),
                    refresh_at,
                });
            }
            None => tracing::warn!(
                lifetime_secs = lifetime.as_secs(),
                "Token lifetime out of range, not caching"
            ),
        }

        Ok(token)
    }

    /// Drop the cached token so the next call fetches a new one
    pub async fn invalidate(&self) {
        *self.slot.lock().await = None;
    }
}

impl Default for TokenCache {
    fn default() -> Self {
        Self::new()
    }
}
