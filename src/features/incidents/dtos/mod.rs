mod delete_dto;
mod feedback_dto;
mod incident_form_dto;
mod search_dto;

pub use delete_dto::DeleteIncidentDto;
pub use feedback_dto::{FeedbackKind, SubmissionFeedbackDto};
pub use incident_form_dto::IncidentFormDto;
pub use search_dto::{IncidentRecordDto, SearchFilterDto};
