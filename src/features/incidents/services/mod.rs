mod delete_service;
mod form_submitter;
mod search_service;

pub use delete_service::DeleteService;
pub use form_submitter::{FormSubmitter, SubmissionOutcome};
pub use search_service::SearchService;
