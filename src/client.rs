//! HTTP transport to the matching service.

use anyhow::{bail, Context, Result};
use reqwest::Client;
use tracing::info;

use crate::api::{MatchResponse, PatientQuery};

const APP_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"),);

pub(crate) struct ApiClient {
    client: Client,
}

impl ApiClient {
    pub(crate) fn new() -> Result<Self> {
        let client = Client::builder()
            .user_agent(APP_USER_AGENT)
            .build()
            .context("Failed to build HTTP client")?;
        Ok(ApiClient { client })
    }

    /// Sends one match request: a single POST of the JSON-encoded query.
    /// No retry and no timeout; any non-2xx status is an error carrying the
    /// code and status text.
    pub(crate) async fn match_trials(
        &self,
        url: &str,
        query: &PatientQuery,
    ) -> Result<MatchResponse> {
        info!("posting match request to {url}");
        let response = self
            .client
            .post(url)
            .json(query)
            .send()
            .await
            .with_context(|| format!("failed to reach {url}"))?;

        let status = response.status();
        if !status.is_success() {
            bail!(
                "HTTP {}: {}",
                status.as_u16(),
                status.canonical_reason().unwrap_or("unknown status")
            );
        }

        let parsed = response
            .json::<MatchResponse>()
            .await
            .context("failed to parse the response body as JSON")?;
        info!("match response received from {url}");
        Ok(parsed)
    }
}
