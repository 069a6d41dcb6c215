pub mod incident_backend;

pub use incident_backend::{BackendReply, HttpIncidentBackend, IncidentBackend};
