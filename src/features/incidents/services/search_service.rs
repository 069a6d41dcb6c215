use std::sync::Arc;

use crate::core::error::{AppError, Result};
use crate::features::incidents::clients::IncidentBackend;
use crate::features::incidents::dtos::{IncidentRecordDto, SearchFilterDto};

/// Forwards search filters to the incidencias backend
pub struct SearchService {
    backend: Arc<dyn IncidentBackend>,
    search_url: String,
}

impl SearchService {
    pub fn new(backend: Arc<dyn IncidentBackend>, search_url: String) -> Self {
        Self {
            backend,
            search_url,
        }
    }

    /// Search incidents. The backend answers 404 when nothing matches,
    /// which is reported here as an empty list.
    pub async fn search(&self, dto: SearchFilterDto) -> Result<Vec<IncidentRecordDto>> {
        let filter = dto.normalize().map_err(AppError::BadRequest)?;

        let reply = self
            .backend
            .search(&self.search_url, &filter)
            .await
            .map_err(|e| {
                AppError::ExternalServiceError(format!("Failed to reach incidencias backend: {}", e))
            })?;

        match reply.status {
            200 => serde_json::from_str::<Vec<IncidentRecordDto>>(&reply.body).map_err(|e| {
                tracing::error!("Failed to parse search response: {}", e);
                AppError::ExternalServiceError(format!("Failed to parse search response: {}", e))
            }),
            404 => {
                tracing::debug!("Search matched no incidents");
                Ok(Vec::new())
            }
            400 => Err(AppError::BadRequest(
                reply
                    .message()
                    .unwrap_or_else(|| "Invalid search filter".to_string()),
            )),
            status => {
                tracing::error!("Incidencias search error: HTTP {} - {}", status, reply.body);
                Err(AppError::ExternalServiceError(format!(
                    "Incidencias backend error: HTTP {}",
                    status
                )))
            }
        }
    }
}
