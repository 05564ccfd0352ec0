use crate::messages::SyncRequest;
use crate::response::{decode_json, extract_query_status, snippet};
use async_trait::async_trait;
use metrics::counter;
use simtap_core::error::SimtapError;
use simtap_core::service::QueryService;
use simtap_core::types::TabularResult;
use std::time::Duration;
use tracing::debug;

pub const SIMBAD_TAP_URL: &str = "http://simbad.u-strasbg.fr/simbad/sim-tap";

#[derive(Debug, Clone)]
pub struct TapOptions {
    pub base_url: String,
    pub timeout: Duration,
    pub user_agent: String,
    pub max_records: Option<u64>,
}

impl Default for TapOptions {
    fn default() -> Self {
        Self {
            base_url: SIMBAD_TAP_URL.to_string(),
            timeout: Duration::from_secs(60),
            user_agent: concat!("simtap/", env!("CARGO_PKG_VERSION")).to_string(),
            max_records: None,
        }
    }
}

/// Synchronous-query endpoint of a TAP service.
#[derive(Debug, Clone)]
pub struct TapClient {
    http: reqwest::Client,
    sync_url: String,
    max_records: Option<u64>,
}

impl TapClient {
    pub fn new(options: TapOptions) -> Result<Self, SimtapError> {
        let http = reqwest::Client::builder()
            .timeout(options.timeout)
            .user_agent(options.user_agent)
            .build()
            .map_err(|e| SimtapError::Config(e.to_string()))?;
        Ok(Self {
            http,
            sync_url: format!("{}/sync", options.base_url.trim_end_matches('/')),
            max_records: options.max_records,
        })
    }

    pub fn sync_url(&self) -> &str {
        &self.sync_url
    }
}

#[async_trait]
impl QueryService for TapClient {
    async fn execute_query(&self, query: &str) -> Result<TabularResult, SimtapError> {
        counter!("tap_request_total").increment(1);
        let request = SyncRequest {
            query,
            max_records: self.max_records,
        };
        debug!(url = %self.sync_url, "posting TAP sync query");
        let response = self
            .http
            .post(&self.sync_url)
            .form(&request.form_fields())
            .send()
            .await
            .map_err(|e| SimtapError::QueryService(e.to_string()))?;
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| SimtapError::QueryService(e.to_string()))?;
        if !status.is_success() {
            let detail = extract_query_status(&body).unwrap_or_else(|| snippet(&body));
            return Err(SimtapError::QueryService(format!("HTTP {status}: {detail}")));
        }
        decode_json(&body)
    }
}
