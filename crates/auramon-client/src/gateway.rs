//! HTTP gateway to the Aura backend.
//!
//! All endpoints return complete JSON payloads; the gateway only transports
//! and decodes, it never merges or caches. The [`Gateway`] trait is the seam
//! that lets the engine run against a fake backend in tests.

use auramon_core::prelude::*;
use auramon_core::types::{
    AlertsResponse, MachineDetail, MaintenanceRequest, ServiceHealth, StatusResponse,
};
use serde::de::DeserializeOwned;
use std::time::Duration;

/// Read/write access to the Aura API.
///
/// `fetch_*` methods return the full payload for their endpoint;
/// `submit_maintenance` is the only write. Implementations must be cheap to
/// share behind an `Arc` because every refresh cycle runs on a spawned task.
#[trait_variant::make(Gateway: Send)]
pub trait LocalGateway {
    /// `GET /status` - the entire fleet plus system-level aggregates.
    async fn fetch_status(&self) -> Result<StatusResponse>;

    /// `GET /alerts?limit=N` - recent alerts, newest first.
    async fn fetch_alerts(&self, limit: usize) -> Result<AlertsResponse>;

    /// `GET /machine/{id}` - detail payload for one machine.
    async fn fetch_machine(&self, machine_id: &str) -> Result<MachineDetail>;

    /// `POST /maintenance` - record a maintenance activity.
    async fn submit_maintenance(&self, request: &MaintenanceRequest) -> Result<()>;

    /// `GET /health` - service liveness probe.
    async fn check_health(&self) -> Result<ServiceHealth>;
}

/// reqwest-backed [`Gateway`] implementation.
#[derive(Debug, Clone)]
pub struct HttpGateway {
    client: reqwest::Client,
    base_url: String,
}

impl HttpGateway {
    /// Build a gateway for `base_url` (trailing slash tolerated).
    pub fn new(base_url: &str, request_timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(request_timeout)
            .build()
            .map_err(|e| Error::transport(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// GET `path` and decode the JSON body as `T`.
    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = format!("{}{}", self.base_url, path);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| Error::transport(format!("GET {path}: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::http_status(status.as_u16(), path));
        }

        response
            .json::<T>()
            .await
            .map_err(|e| Error::transport(format!("GET {path}: invalid body: {e}")))
    }
}

impl Gateway for HttpGateway {
    async fn fetch_status(&self) -> Result<StatusResponse> {
        self.get_json("/status").await
    }

    async fn fetch_alerts(&self, limit: usize) -> Result<AlertsResponse> {
        self.get_json(&format!("/alerts?limit={limit}")).await
    }

    async fn fetch_machine(&self, machine_id: &str) -> Result<MachineDetail> {
        self.get_json(&format!("/machine/{machine_id}")).await
    }

    async fn submit_maintenance(&self, request: &MaintenanceRequest) -> Result<()> {
        let path = "/maintenance";
        let url = format!("{}{}", self.base_url, path);
        let response = self
            .client
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(|e| Error::transport(format!("POST {path}: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::http_status(status.as_u16(), path));
        }
        Ok(())
    }

    async fn check_health(&self) -> Result<ServiceHealth> {
        self.get_json("/health").await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let gateway =
            HttpGateway::new("http://localhost:5000/api/", Duration::from_secs(10)).unwrap();
        assert_eq!(gateway.base_url, "http://localhost:5000/api");
    }

    #[test]
    fn test_base_url_kept_without_slash() {
        let gateway =
            HttpGateway::new("http://localhost:5000/api", Duration::from_secs(10)).unwrap();
        assert_eq!(gateway.base_url, "http://localhost:5000/api");
    }
}
