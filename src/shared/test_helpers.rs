#[cfg(test)]
use crate::features::incidents::clients::incident_backend::TransportError;
#[cfg(test)]
use crate::features::incidents::clients::{BackendReply, IncidentBackend};
#[cfg(test)]
use crate::features::incidents::models::{IncidentKey, IncidentReport, SearchFilter};
#[cfg(test)]
use std::sync::Mutex;

/// Backend double answering every call with the same reply
#[cfg(test)]
pub struct RecordingBackend {
    reply: Result<BackendReply, TransportError>,
    pub reports: Mutex<Vec<IncidentReport>>,
    pub filters: Mutex<Vec<SearchFilter>>,
    pub deletions: Mutex<Vec<IncidentKey>>,
}

#[cfg(test)]
impl RecordingBackend {
    pub fn replying(status: u16, body: &str) -> Self {
        Self::with(Ok(BackendReply {
            status,
            body: body.to_string(),
        }))
    }

    pub fn unreachable() -> Self {
        Self::with(Err(TransportError(
            "error sending request: connection refused".to_string(),
        )))
    }

    fn with(reply: Result<BackendReply, TransportError>) -> Self {
        Self {
            reply,
            reports: Mutex::new(Vec::new()),
            filters: Mutex::new(Vec::new()),
            deletions: Mutex::new(Vec::new()),
        }
    }

    pub fn report_count(&self) -> usize {
        self.reports.lock().unwrap().len()
    }
}

#[cfg(test)]
#[async_trait::async_trait]
impl IncidentBackend for RecordingBackend {
    async fn post_report(
        &self,
        _endpoint: &str,
        report: &IncidentReport,
    ) -> Result<BackendReply, TransportError> {
        self.reports.lock().unwrap().push(report.clone());
        self.reply.clone()
    }

    async fn search(
        &self,
        _endpoint: &str,
        filter: &SearchFilter,
    ) -> Result<BackendReply, TransportError> {
        self.filters.lock().unwrap().push(filter.clone());
        self.reply.clone()
    }

    async fn delete(
        &self,
        _endpoint: &str,
        key: &IncidentKey,
    ) -> Result<BackendReply, TransportError> {
        self.deletions.lock().unwrap().push(key.clone());
        self.reply.clone()
    }
}
