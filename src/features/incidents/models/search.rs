use serde::Serialize;

/// Normalized search filter as the backend expects it.
///
/// Unset criteria are sent as `null` so the backend ignores them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SearchFilter {
    #[serde(rename = "numeroAula")]
    pub room_number: Option<String>,
    #[serde(rename = "correoDocente")]
    pub teacher_email: Option<String>,
    /// `dd-mm-yyyy`
    #[serde(rename = "fechaInicio")]
    pub start_date: Option<String>,
    /// `dd-mm-yyyy`
    #[serde(rename = "fechaFin")]
    pub end_date: Option<String>,
    #[serde(rename = "descripcionIncidencia")]
    pub description: Option<String>,
    #[serde(rename = "estadoIncidencia")]
    pub status: Option<String>,
    #[serde(rename = "comentario")]
    pub comment: Option<String>,
}
