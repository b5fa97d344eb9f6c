//! Resilient search pipeline: token acquisition, the single
//! retry-after-invalidate, and the year+title upstream-bug workaround.

use crate::cache::token_cache::TokenCache;
use crate::error::{body_snippet, UpstreamError};
use crate::model::lege::Lege;
use crate::model::query::SearchQuery;
use crate::soap::envelope::search_envelope;
use crate::soap::extract::lege_fragments;
use crate::upstream::client::{SearchAttempt, SoapClient};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Successful search: normalized records plus the query they answered.
#[derive(Debug)]
pub struct SearchOutcome {
    pub query: SearchQuery,
    pub results: Vec<Lege>,
}

#[derive(Debug, Clone)]
pub struct SearchExecutor {
    client: Arc<SoapClient>,
    tokens: TokenCache,
}

impl SearchExecutor {
    pub fn new(client: Arc<SoapClient>, tokens: TokenCache) -> Self {
        Self { client, tokens }
    }

    /// Run one search against the upstream service.
    ///
    /// Retry policy: if the first attempt is rejected (any non-2xx status;
    /// the exact code for an expired token has varied across upstream
    /// revisions) and the token came from cache, the token is invalidated,
    /// refetched, and the request retried exactly once. A rejection with a
    /// fresh token, or on the retry, is terminal. This transparently
    /// recovers a token that expired between calls without producing retry
    /// storms when the upstream is genuinely down.
    pub async fn search(&self, query: &SearchQuery) -> Result<SearchOutcome, UpstreamError> {
        let (mut token, mut was_cached) = self.tokens.get(&self.client).await?;

        // Upstream silently ignores the year filter whenever a title filter
        // is also present. Issue the call without the year and post-filter
        // on effective_date below.
        let year_filter = match (&query.title, &query.year) {
            (Some(_), Some(year)) => Some(year.clone()),
            _ => None,
        };
        let upstream_query = if year_filter.is_some() {
            query.without_year()
        } else {
            query.clone()
        };

        let mut attempt = 0u8;
        let body = loop {
            attempt += 1;
            let envelope = search_envelope(&upstream_query, &token);
            debug!(attempt, page = query.page, "posting Search envelope");
            match self.client.post_search(&envelope).await? {
                SearchAttempt::Accepted(body) => break body,
                SearchAttempt::Rejected { status, body } => {
                    if attempt == 1 && was_cached {
                        warn!(status, "search rejected with cached token, refreshing and retrying once");
                        self.tokens.invalidate().await;
                        (token, was_cached) = self.tokens.get(&self.client).await?;
                        continue;
                    }
                    return Err(UpstreamError::Search {
                        status,
                        snippet: body_snippet(&body),
                    });
                }
            }
        };

        let mut results: Vec<Lege> = lege_fragments(&body)
            .filter_map(Lege::from_fragment)
            .collect();

        if let Some(year) = &year_filter {
            let before = results.len();
            results.retain(|lege| lege.effective_date.starts_with(year.as_str()));
            debug!(before, after = results.len(), year = %year, "applied client-side year filter");
        }

        info!(total = results.len(), "search completed");
        Ok(SearchOutcome { query: query.clone(), results })
    }
}
