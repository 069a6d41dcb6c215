use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;

use crate::features::incidents::models::SearchFilter;
use crate::shared::constants::SEARCH_DATE_FORMAT;

/// Search criteria; every field is optional and blank means "any"
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct SearchFilterDto {
    #[serde(rename = "numeroAula", default)]
    pub room_number: Option<String>,
    #[serde(rename = "correoDocente", default)]
    pub teacher_email: Option<String>,
    /// `yyyy-mm-dd` or `dd-mm-yyyy`
    #[serde(rename = "fechaInicio", default)]
    pub start_date: Option<String>,
    /// `yyyy-mm-dd` or `dd-mm-yyyy`
    #[serde(rename = "fechaFin", default)]
    pub end_date: Option<String>,
    #[serde(rename = "descripcionIncidencia", default)]
    pub description: Option<String>,
    #[serde(rename = "estadoIncidencia", default)]
    pub status: Option<String>,
    #[serde(rename = "comentario", default)]
    pub comment: Option<String>,
}

/// One incident as returned by the backend search
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct IncidentRecordDto {
    #[serde(rename = "numeroAula", default)]
    pub room_number: Option<String>,
    #[serde(rename = "correoDocente", default)]
    pub teacher_email: Option<String>,
    /// Backend representation, either a date string or epoch milliseconds
    #[serde(
        rename = "fechaIncidencia",
        default,
        deserialize_with = "string_or_number"
    )]
    pub incident_date: Option<String>,
    #[serde(rename = "descripcionIncidencia", default)]
    pub description: Option<String>,
    #[serde(rename = "estadoIncidencia", default)]
    pub status: Option<String>,
    #[serde(rename = "comentario", default)]
    pub comment: Option<String>,
}

fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::String(s)) => Some(s),
        Some(serde_json::Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Accept the HTML date input format as well as the backend one
fn normalize_date(field: &str, value: Option<String>) -> Result<Option<String>, String> {
    let Some(raw) = non_blank(value) else {
        return Ok(None);
    };
    let raw = raw.trim();

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(raw, SEARCH_DATE_FORMAT))
        .map(|date| Some(date.format(SEARCH_DATE_FORMAT).to_string()))
        .map_err(|_| format!("{} must be a date as yyyy-mm-dd or dd-mm-yyyy, got '{}'", field, raw))
}

impl SearchFilterDto {
    pub fn normalize(self) -> Result<SearchFilter, String> {
        Ok(SearchFilter {
            room_number: non_blank(self.room_number),
            teacher_email: non_blank(self.teacher_email),
            start_date: normalize_date("fechaInicio", self.start_date)?,
            end_date: normalize_date("fechaFin", self.end_date)?,
            description: non_blank(self.description),
            status: non_blank(self.status),
            comment: non_blank(self.comment),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_normalize_dates_and_blanks() {
        let dto = SearchFilterDto {
            room_number: Some("  ".to_string()),
            start_date: Some("2024-01-05".to_string()),
            end_date: Some("31-12-2024".to_string()),
            status: Some("PENDIENTE".to_string()),
            ..Default::default()
        };

        let filter = dto.normalize().unwrap();
        assert_eq!(filter.room_number, None);
        assert_eq!(filter.start_date.as_deref(), Some("05-01-2024"));
        assert_eq!(filter.end_date.as_deref(), Some("31-12-2024"));
        assert_eq!(filter.status.as_deref(), Some("PENDIENTE"));
    }

    #[test]
    fn test_normalize_rejects_garbage_dates() {
        let dto = SearchFilterDto {
            start_date: Some("ayer".to_string()),
            ..Default::default()
        };

        let err = dto.normalize().unwrap_err();
        assert!(err.contains("fechaInicio"));
    }

    #[test]
    fn test_record_accepts_epoch_dates() {
        let record: IncidentRecordDto = serde_json::from_value(json!({
            "numeroAula": "101",
            "correoDocente": "a@b.com",
            "fechaIncidencia": 1704067200000u64,
            "descripcionIncidencia": "broken desk",
            "estadoIncidencia": "PENDIENTE",
            "comentario": ""
        }))
        .unwrap();

        assert_eq!(record.incident_date.as_deref(), Some("1704067200000"));
        assert_eq!(record.room_number.as_deref(), Some("101"));
    }
}
