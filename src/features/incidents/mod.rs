pub mod clients;
pub mod dtos;
pub mod error;
pub mod form;
pub mod guard;
pub mod handlers;
pub mod models;
pub mod notifier;
pub mod page;
pub mod profile;
pub mod routes;
pub mod services;

pub use clients::{HttpIncidentBackend, IncidentBackend};
pub use services::{DeleteService, FormSubmitter, SearchService};
