// =============================================================================
// FORM FIELD IDENTIFIERS
// =============================================================================

pub const FIELD_TEACHER_EMAIL: &str = "correoDocente";
pub const FIELD_ROOM_NUMBER: &str = "numeroAula";
pub const FIELD_INCIDENT_DATE: &str = "fechaIncidencia";
pub const FIELD_START_DATE: &str = "fechaInicio";
pub const FIELD_END_DATE: &str = "fechaFin";
pub const FIELD_DESCRIPTION: &str = "descripcionIncidencia";
pub const FIELD_STATUS: &str = "estadoIncidencia";
pub const FIELD_COMMENT: &str = "comentario";

// =============================================================================
// INCIDENT STATES
// =============================================================================

/// States the incidencias backend assigns; offered as suggestions only
pub const STATUS_PENDING: &str = "PENDIENTE";
pub const STATUS_IN_PROGRESS: &str = "EN PROGRESO";
pub const STATUS_RESOLVED: &str = "RESUELTA";
pub const STATUS_CANCELLED: &str = "CANCELADA";

pub const KNOWN_STATUSES: [&str; 4] = [
    STATUS_PENDING,
    STATUS_IN_PROGRESS,
    STATUS_RESOLVED,
    STATUS_CANCELLED,
];

/// Date format the backend search filter expects
pub const SEARCH_DATE_FORMAT: &str = "%d-%m-%Y";
