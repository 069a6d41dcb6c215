use serde::Serialize;

/// Body posted to the incidencias backend
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IncidentReport {
    #[serde(rename = "correoDocente")]
    pub teacher_email: String,
    #[serde(rename = "numeroAula")]
    pub room_number: String,
    #[serde(flatten)]
    pub dates: IncidentDates,
    #[serde(rename = "descripcionIncidencia")]
    pub description: String,
    #[serde(rename = "estadoIncidencia")]
    pub status: String,
    #[serde(rename = "comentario")]
    pub comment: String,
}

/// Date keys, sent verbatim as entered in the form
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum IncidentDates {
    Single {
        #[serde(rename = "fechaIncidencia")]
        incident_date: String,
    },
    Range {
        #[serde(rename = "fechaInicio")]
        start_date: String,
        #[serde(rename = "fechaFin")]
        end_date: String,
    },
}

/// Composite key identifying one stored incident
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IncidentKey {
    #[serde(rename = "numeroAula")]
    pub room_number: String,
    #[serde(rename = "correoDocente")]
    pub teacher_email: String,
    #[serde(rename = "fechaIncidencia")]
    pub incident_date: String,
}
