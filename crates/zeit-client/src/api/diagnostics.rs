//! Endpoint diagnostics.
//!
//! Probes generic `/api/v1/*` resources and reports reachability, status,
//! timing and response size. A probe never fails the caller; every outcome
//! becomes a report row.

use std::time::Instant;

use crate::client::ZeitClient;
use crate::request::RequestDescriptor;
use crate::types::EndpointReport;

/// Endpoints probed when the caller does not name any.
pub const DEFAULT_ENDPOINTS: &[&str] = &["/users/", "/roles/"];

/// Endpoint diagnostics client.
pub struct DiagnosticsApi {
    client: ZeitClient,
}

impl DiagnosticsApi {
    pub(crate) fn new(client: ZeitClient) -> Self {
        Self { client }
    }

    /// Probe one endpoint under `/api/v1`.
    pub async fn probe(&self, endpoint: &str) -> EndpointReport {
        let path = format!("v1/{}", endpoint.trim_start_matches('/'));
        let url = self
            .client
            .url(&path)
            .map(|u| u.to_string())
            .unwrap_or_else(|_| path.clone());
        tracing::debug!(url = %url, "probing endpoint");

        let started = Instant::now();
        let outcome = self.client.execute(&RequestDescriptor::get(path)).await;
        let response_time_ms = started.elapsed().as_millis() as u64;

        match outcome {
            Ok(data) => EndpointReport {
                endpoint: endpoint.to_string(),
                url,
                success: true,
                status: Some(200),
                response_time_ms,
                response_size: serde_json::to_string(&data).ok().map(|s| s.len()),
                error_details: None,
            },
            Err(err) => EndpointReport {
                endpoint: endpoint.to_string(),
                url,
                success: false,
                status: err.status(),
                response_time_ms,
                response_size: None,
                error_details: Some(err.to_string()),
            },
        }
    }

    /// Probe several endpoints in sequence.
    pub async fn run(&self, endpoints: &[String]) -> Vec<EndpointReport> {
        let mut reports = Vec::with_capacity(endpoints.len());
        for endpoint in endpoints {
            reports.push(self.probe(endpoint).await);
        }
        reports
    }
}
