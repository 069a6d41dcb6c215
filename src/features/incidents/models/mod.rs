mod incident;
mod search;

pub use incident::{IncidentDates, IncidentKey, IncidentReport};
pub use search::SearchFilter;
