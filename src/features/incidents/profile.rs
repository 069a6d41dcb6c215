use std::str::FromStr;

use crate::shared::constants::{
    FIELD_COMMENT, FIELD_DESCRIPTION, FIELD_END_DATE, FIELD_INCIDENT_DATE, FIELD_ROOM_NUMBER,
    FIELD_START_DATE, FIELD_STATUS, FIELD_TEACHER_EMAIL,
};

/// The two flavours of the incidencias form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileKind {
    /// One incident date, any 2xx is success, redirect afterwards
    Registro,
    /// Start/end dates, 201 created vs 200 updated
    Rango,
}

impl FromStr for ProfileKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "registro" => Ok(Self::Registro),
            "rango" => Ok(Self::Rango),
            other => Err(format!(
                "INCIDENCIAS_PROFILE must be 'registro' or 'rango', got '{}'",
                other
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateMode {
    Single,
    Range,
}

/// Form element identifiers the submitter reads from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldMapping {
    pub teacher_email: String,
    pub room_number: String,
    pub incident_date: String,
    pub start_date: String,
    pub end_date: String,
    pub description: String,
    pub status: String,
    pub comment: String,
}

impl Default for FieldMapping {
    fn default() -> Self {
        Self {
            teacher_email: FIELD_TEACHER_EMAIL.to_string(),
            room_number: FIELD_ROOM_NUMBER.to_string(),
            incident_date: FIELD_INCIDENT_DATE.to_string(),
            start_date: FIELD_START_DATE.to_string(),
            end_date: FIELD_END_DATE.to_string(),
            description: FIELD_DESCRIPTION.to_string(),
            status: FIELD_STATUS.to_string(),
            comment: FIELD_COMMENT.to_string(),
        }
    }
}

impl FieldMapping {
    /// Required field identifiers in form order for the given date mode
    pub fn required_fields(&self, mode: DateMode) -> Vec<&str> {
        let mut fields = vec![self.teacher_email.as_str(), self.room_number.as_str()];
        match mode {
            DateMode::Single => fields.push(self.incident_date.as_str()),
            DateMode::Range => {
                fields.push(self.start_date.as_str());
                fields.push(self.end_date.as_str());
            }
        }
        fields.push(self.description.as_str());
        fields
    }
}

/// User facing texts of a profile
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileMessages {
    pub missing_fields: &'static str,
    pub invalid_email: &'static str,
    pub created: &'static str,
    pub updated: &'static str,
    pub error_prefix: &'static str,
    pub bad_request_fallback: &'static str,
    pub not_found: &'static str,
    pub unexpected: &'static str,
    pub network: &'static str,
    pub in_flight: &'static str,
}

const NETWORK_MESSAGE: &str =
    "Hubo un error al conectarse al servidor. Intenta nuevamente más tarde.";
const NOT_FOUND_MESSAGE: &str = "No se encontró la incidencia.";
const INVALID_EMAIL_MESSAGE: &str = "Por favor, ingresa un correo válido.";
const IN_FLIGHT_MESSAGE: &str = "Ya hay un envío en curso. Espera a que termine.";

/// Everything that differs between the two form flavours
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionProfile {
    pub kind: ProfileKind,
    pub endpoint: String,
    pub fields: FieldMapping,
    pub date_mode: DateMode,
    /// Where the browser goes after a success. Relative values resolve
    /// against the form page URL; override with `SUCCESS_REDIRECT`.
    pub success_redirect: Option<String>,
    pub messages: ProfileMessages,
}

impl SubmissionProfile {
    pub fn for_kind(kind: ProfileKind) -> Self {
        match kind {
            ProfileKind::Registro => Self::registro(),
            ProfileKind::Rango => Self::rango(),
        }
    }

    pub fn registro() -> Self {
        Self {
            kind: ProfileKind::Registro,
            endpoint: "http://localhost:888/incidencias".to_string(),
            fields: FieldMapping::default(),
            date_mode: DateMode::Single,
            success_redirect: Some("pagina_incidencia.html".to_string()),
            messages: ProfileMessages {
                missing_fields: "Por favor, completa todos los campos obligatorios.",
                invalid_email: INVALID_EMAIL_MESSAGE,
                created: "Registro exitoso. Redirigiendo...",
                updated: "Registro exitoso. Redirigiendo...",
                error_prefix: "Error al registrar: ",
                bad_request_fallback: "Error desconocido.",
                not_found: NOT_FOUND_MESSAGE,
                unexpected: "Error al registrar: Error desconocido.",
                network: NETWORK_MESSAGE,
                in_flight: IN_FLIGHT_MESSAGE,
            },
        }
    }

    pub fn rango() -> Self {
        Self {
            kind: ProfileKind::Rango,
            endpoint: "http://localhost:8888/incidencias/post".to_string(),
            fields: FieldMapping::default(),
            date_mode: DateMode::Range,
            success_redirect: None,
            messages: ProfileMessages {
                missing_fields: "Por favor, complete todos los campos requeridos.",
                invalid_email: INVALID_EMAIL_MESSAGE,
                created: "Incidencia creada con éxito.",
                updated: "Incidencia actualizada con éxito.",
                error_prefix: "Error: ",
                bad_request_fallback: "Datos inválidos.",
                not_found: NOT_FOUND_MESSAGE,
                unexpected: "Ocurrió un error inesperado. Intente nuevamente.",
                network: NETWORK_MESSAGE,
                in_flight: IN_FLIGHT_MESSAGE,
            },
        }
    }

    /// Whether a 200 should be reported as an update rather than a creation
    pub fn distinguishes_updates(&self) -> bool {
        self.kind == ProfileKind::Rango
    }
}
