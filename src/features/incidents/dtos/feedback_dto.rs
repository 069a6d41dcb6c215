use serde::Serialize;
use utoipa::ToSchema;

use crate::features::incidents::error::{ServerError, SubmissionError, ValidationError};
use crate::features::incidents::notifier::NotificationLevel;
use crate::features::incidents::services::SubmissionOutcome;

/// Which branch a submission ended in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum FeedbackKind {
    Created,
    Updated,
    MissingField,
    InvalidEmail,
    BadRequest,
    NotFound,
    Unexpected,
    Network,
    InFlight,
}

/// Inline feedback shown to the user after submitting the form
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionFeedbackDto {
    pub kind: FeedbackKind,
    pub level: NotificationLevel,
    pub message: String,
    /// Page the user should be sent to next
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redirect: Option<String>,
    /// Form identifiers left empty
    #[serde(skip_serializing_if = "Option::is_none")]
    pub missing_fields: Option<Vec<String>>,
    /// Status the incidencias backend answered with
    #[serde(skip_serializing_if = "Option::is_none")]
    pub backend_status: Option<u16>,
}

impl From<&SubmissionOutcome> for SubmissionFeedbackDto {
    fn from(outcome: &SubmissionOutcome) -> Self {
        let mut missing_fields = None;
        let mut backend_status = None;

        let kind = match &outcome.result {
            Ok(submitted) => {
                backend_status = Some(submitted.backend_status);
                if submitted.updated {
                    FeedbackKind::Updated
                } else {
                    FeedbackKind::Created
                }
            }
            Err(SubmissionError::Validation(ValidationError::MissingField(fields))) => {
                missing_fields = Some(fields.clone());
                FeedbackKind::MissingField
            }
            Err(SubmissionError::Validation(ValidationError::InvalidEmail(_))) => {
                FeedbackKind::InvalidEmail
            }
            Err(SubmissionError::Server(ServerError::BadRequest(_))) => {
                backend_status = Some(400);
                FeedbackKind::BadRequest
            }
            Err(SubmissionError::Server(ServerError::NotFound)) => {
                backend_status = Some(404);
                FeedbackKind::NotFound
            }
            Err(SubmissionError::Server(ServerError::Unexpected { status, .. })) => {
                backend_status = Some(*status);
                FeedbackKind::Unexpected
            }
            Err(SubmissionError::Network(_)) => FeedbackKind::Network,
            Err(SubmissionError::AlreadyInFlight) => FeedbackKind::InFlight,
        };

        Self {
            kind,
            level: outcome.notification.level,
            message: outcome.notification.message.clone(),
            redirect: outcome.notification.redirect.clone(),
            missing_fields,
            backend_status,
        }
    }
}
