//! HTTP transport for the upstream SOAP endpoint.

use crate::error::{body_snippet, UpstreamError};
use crate::soap::envelope::get_token_envelope;
use crate::soap::extract::token_result;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, info};

pub const ACTION_GET_TOKEN: &str = "http://tempuri.org/IFreeWebService/GetToken";
pub const ACTION_SEARCH: &str = "http://tempuri.org/IFreeWebService/Search";

const CONTENT_TYPE_XML: &str = "text/xml; charset=utf-8";

/// Outcome of a single Search POST. Rejections are data, not errors:
/// the executor decides whether a rejection is retryable.
#[derive(Debug)]
pub enum SearchAttempt {
    Accepted(String),
    Rejected { status: u16, body: String },
}

/// Client for the two SOAPAction-dispatched upstream operations.
///
/// Search calls get a generous timeout because the upstream is slow for
/// large full-text queries; token fetches use a tighter one so a dead
/// upstream fails the request quickly.
#[derive(Debug, Clone)]
pub struct SoapClient {
    endpoint: String,
    search_client: Client,
    token_client: Client,
}

impl SoapClient {
    pub fn new(endpoint: &str, search_timeout: Duration, token_timeout: Duration) -> Self {
        let search_client = Client::builder()
            .timeout(search_timeout)
            .build()
            .expect("Failed to build HTTP client");
        let token_client = Client::builder()
            .timeout(token_timeout)
            .build()
            .expect("Failed to build HTTP client");

        Self {
            endpoint: endpoint.to_owned(),
            search_client,
            token_client,
        }
    }

    /// Call GetToken and extract the opaque credential.
    ///
    /// Every failure mode here (transport, status, missing tag) is an auth
    /// failure from the caller's point of view.
    pub async fn fetch_token(&self) -> Result<String, UpstreamError> {
        debug!("fetching fresh upstream token");
        let response = self
            .token_client
            .post(&self.endpoint)
            .header("Content-Type", CONTENT_TYPE_XML)
            .header("SOAPAction", ACTION_GET_TOKEN)
            .body(get_token_envelope())
            .send()
            .await
            .map_err(|e| UpstreamError::Auth(format!("GetToken request failed: {e}")))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| UpstreamError::Auth(format!("GetToken body read failed: {e}")))?;

        if !status.is_success() {
            return Err(UpstreamError::Auth(format!(
                "GetToken returned status {status}: {}",
                body_snippet(&body)
            )));
        }

        let token = token_result(&body).ok_or_else(|| {
            UpstreamError::Auth("GetToken response missing GetTokenResult tag".to_owned())
        })?;
        info!("new upstream token issued");
        Ok(token)
    }

    /// POST a prepared Search envelope. Transport failures are
    /// `Unreachable`; any received status becomes a typed attempt.
    pub async fn post_search(&self, envelope: &str) -> Result<SearchAttempt, UpstreamError> {
        let response = self
            .search_client
            .post(&self.endpoint)
            .header("Content-Type", CONTENT_TYPE_XML)
            .header("SOAPAction", ACTION_SEARCH)
            .body(envelope.to_owned())
            .send()
            .await
            .map_err(|e| UpstreamError::Unreachable(e.to_string()))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| UpstreamError::Unreachable(e.to_string()))?;

        if (200..300).contains(&status) {
            Ok(SearchAttempt::Accepted(body))
        } else {
            Ok(SearchAttempt::Rejected { status, body })
        }
    }

    /// Cheap reachability check for /health: hit the WSDL document.
    pub async fn probe(&self) -> Result<(), UpstreamError> {
        let response = self
            .token_client
            .get(format!("{}?wsdl", self.endpoint))
            .send()
            .await
            .map_err(|e| UpstreamError::Unreachable(e.to_string()))?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(UpstreamError::Unreachable(format!(
                "WSDL probe returned status {}",
                response.status()
            )))
        }
    }
}
