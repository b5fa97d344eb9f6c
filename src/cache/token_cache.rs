//! Process-wide token slot.
//!
//! At most one token is current at a time. The whole
//! check-then-fetch-then-store sequence runs under a single mutex, so two
//! concurrent callers hitting an expired slot serialize: the first fetches,
//! the second reads the stored token as a cache hit. Token fetches are
//! idempotent upstream, so this is stricter than required, but it keeps the
//! common expiry stampede down to one round trip.

use crate::cache::token::Token;
use crate::error::UpstreamError;
use crate::upstream::client::SoapClient;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::{debug, info};

#[derive(Debug, Clone)]
pub struct TokenCache {
    lifetime: Duration,
    slot: Arc<Mutex<Option<Token>>>,
}

impl TokenCache {
    pub fn new(lifetime: Duration) -> Self {
        Self { lifetime, slot: Arc::new(Mutex::new(None)) }
    }

    /// Return a valid token and whether it came from cache.
    ///
    /// On a miss (empty or expired slot) the fetch happens while the lock
    /// is held and the slot is only written on success; a failed fetch
    /// leaves the previous contents untouched and surfaces as
    /// [`UpstreamError::Auth`].
    pub async fn get(&self, client: &SoapClient) -> Result<(String, bool), UpstreamError> {
        let mut slot = self.slot.lock().await;

        if let Some(token) = slot.as_ref() {
            if token.is_fresh(self.lifetime) {
                debug!("using cached upstream token");
                return Ok((token.value.clone(), true));
            }
            debug!("cached token expired, refetching");
        }

        let value = client.fetch_token().await?;
        *slot = Some(Token::new(value.clone()));
        Ok((value, false))
    }

    /// Drop whatever is cached. The next `get` forces a fresh fetch.
    pub async fn invalidate(&self) {
        let mut slot = self.slot.lock().await;
        if slot.take().is_some() {
            info!("cached upstream token invalidated");
        }
    }

    /// Whether the slot currently holds a fresh token. Used by `/token` to
    /// report cache state without forcing a fetch.
    pub async fn has_fresh(&self) -> bool {
        self.slot
            .lock()
            .await
            .as_ref()
            .is_some_and(|token| token.is_fresh(self.lifetime))
    }
}
