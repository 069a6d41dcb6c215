use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;

use crate::features::incidents::models::{IncidentKey, IncidentReport, SearchFilter};

/// Raw answer from the incidencias backend
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendReply {
    pub status: u16,
    pub body: String,
}

/// Backend error body, only `message` is of interest
#[derive(Debug, Deserialize)]
struct BackendErrorResponse {
    #[serde(default)]
    message: Option<String>,
}

impl BackendReply {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// `message` of a JSON error body, if there is a non-empty one
    pub fn message(&self) -> Option<String> {
        serde_json::from_str::<BackendErrorResponse>(&self.body)
            .ok()
            .and_then(|e| e.message)
            .filter(|m| !m.is_empty())
    }
}

/// The request never produced an HTTP response
#[derive(Debug, Clone, Error)]
#[error("{0}")]
pub struct TransportError(pub String);

/// Network seam between the submitter and the incidencias backend
#[async_trait]
pub trait IncidentBackend: Send + Sync {
    /// POST a report as JSON to `endpoint`
    async fn post_report(
        &self,
        endpoint: &str,
        report: &IncidentReport,
    ) -> Result<BackendReply, TransportError>;

    /// POST a search filter as JSON to `endpoint`
    async fn search(
        &self,
        endpoint: &str,
        filter: &SearchFilter,
    ) -> Result<BackendReply, TransportError>;

    /// DELETE the incident identified by `key`, sent as the JSON body
    async fn delete(
        &self,
        endpoint: &str,
        key: &IncidentKey,
    ) -> Result<BackendReply, TransportError>;
}

/// reqwest implementation talking to a real backend
pub struct HttpIncidentBackend {
    http_client: reqwest::Client,
}

impl HttpIncidentBackend {
    pub fn new(timeout: Duration) -> Result<Self, reqwest::Error> {
        let http_client = reqwest::Client::builder()
            .user_agent("ReaktorIncidencias/0.1 (incident-form-gateway)")
            .timeout(timeout)
            .build()?;

        Ok(Self { http_client })
    }

    async fn send_json<T: serde::Serialize + Sync>(
        &self,
        method: reqwest::Method,
        endpoint: &str,
        body: &T,
    ) -> Result<BackendReply, TransportError> {
        let response = self
            .http_client
            .request(method, endpoint)
            .json(body)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Request to incidencias backend failed: {:?}", e);
                TransportError(e.to_string())
            })?;

        let status = response.status().as_u16();
        // A body that cannot be read is treated as empty; status still decides
        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => {
                tracing::warn!(
                    "Failed to read body of HTTP {} from {}: {}",
                    status,
                    endpoint,
                    e
                );
                String::new()
            }
        };

        tracing::debug!("Backend {} answered HTTP {}", endpoint, status);

        Ok(BackendReply { status, body })
    }
}

#[async_trait]
impl IncidentBackend for HttpIncidentBackend {
    async fn post_report(
        &self,
        endpoint: &str,
        report: &IncidentReport,
    ) -> Result<BackendReply, TransportError> {
        tracing::debug!(
            "Posting incident for room {} by {}",
            report.room_number,
            report.teacher_email
        );
        self.send_json(reqwest::Method::POST, endpoint, report).await
    }

    async fn search(
        &self,
        endpoint: &str,
        filter: &SearchFilter,
    ) -> Result<BackendReply, TransportError> {
        tracing::debug!("Searching incidents: {:?}", filter);
        self.send_json(reqwest::Method::POST, endpoint, filter).await
    }

    async fn delete(
        &self,
        endpoint: &str,
        key: &IncidentKey,
    ) -> Result<BackendReply, TransportError> {
        tracing::debug!(
            "Deleting incident of room {} by {} on {}",
            key.room_number,
            key.teacher_email,
            key.incident_date
        );
        self.send_json(reqwest::Method::DELETE, endpoint, key).await
    }
}
