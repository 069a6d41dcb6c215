use std::sync::Arc;

use crate::core::error::{AppError, Result};
use crate::features::incidents::clients::IncidentBackend;
use crate::features::incidents::models::IncidentKey;

const NOT_FOUND_MESSAGE: &str = "Incidencia no encontrada.";

/// Forwards incident deletions to the incidencias backend
pub struct DeleteService {
    backend: Arc<dyn IncidentBackend>,
    delete_url: String,
}

impl DeleteService {
    pub fn new(backend: Arc<dyn IncidentBackend>, delete_url: String) -> Self {
        Self {
            backend,
            delete_url,
        }
    }

    pub async fn delete(&self, key: IncidentKey) -> Result<()> {
        let reply = self
            .backend
            .delete(&self.delete_url, &key)
            .await
            .map_err(|e| {
                AppError::ExternalServiceError(format!("Failed to reach incidencias backend: {}", e))
            })?;

        match reply.status {
            status if (200..300).contains(&status) => {
                tracing::info!(
                    "Incident of room {} by {} deleted",
                    key.room_number,
                    key.teacher_email
                );
                Ok(())
            }
            404 => Err(AppError::NotFound(
                reply
                    .message()
                    .unwrap_or_else(|| NOT_FOUND_MESSAGE.to_string()),
            )),
            400 => Err(AppError::BadRequest(
                reply
                    .message()
                    .unwrap_or_else(|| "Invalid incident key".to_string()),
            )),
            status => {
                tracing::error!("Incidencias delete error: HTTP {} - {}", status, reply.body);
                Err(AppError::ExternalServiceError(format!(
                    "Incidencias backend error: HTTP {}",
                    status
                )))
            }
        }
    }
}
