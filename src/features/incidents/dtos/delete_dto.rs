use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::features::incidents::models::IncidentKey;

/// Identifies the incident to delete
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct DeleteIncidentDto {
    #[serde(rename = "numeroAula")]
    #[validate(length(min = 1, message = "numeroAula is required"))]
    pub room_number: String,

    #[serde(rename = "correoDocente")]
    #[validate(regex(
        path = "*crate::shared::validation::EMAIL_REGEX",
        message = "correoDocente must look like local@domain.tld"
    ))]
    pub teacher_email: String,

    /// Sent to the backend exactly as given
    #[serde(rename = "fechaIncidencia")]
    #[validate(length(min = 1, message = "fechaIncidencia is required"))]
    pub incident_date: String,
}

impl From<DeleteIncidentDto> for IncidentKey {
    fn from(dto: DeleteIncidentDto) -> Self {
        Self {
            room_number: dto.room_number,
            teacher_email: dto.teacher_email,
            incident_date: dto.incident_date,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dto(room: &str, email: &str, date: &str) -> DeleteIncidentDto {
        DeleteIncidentDto {
            room_number: room.to_string(),
            teacher_email: email.to_string(),
            incident_date: date.to_string(),
        }
    }

    #[test]
    fn test_valid_key_passes() {
        assert!(dto("101", "a@b.com", "2024-01-01").validate().is_ok());
    }

    #[test]
    fn test_blank_or_malformed_key_fails() {
        assert!(dto("", "a@b.com", "2024-01-01").validate().is_err());
        assert!(dto("101", "bad-email", "2024-01-01").validate().is_err());
        assert!(dto("101", "a@b.com", "").validate().is_err());
    }
}
