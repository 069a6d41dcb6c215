use utoipa::{Modify, OpenApi};

use crate::features::incidents::{dtos as incidents_dtos, handlers as incidents_handlers};
use crate::features::incidents::notifier::NotificationLevel;
use crate::shared::types::{ApiResponse, Meta};

#[derive(OpenApi)]
#[openapi(
    paths(
        // Incidencias
        incidents_handlers::show_form,
        incidents_handlers::submit_form,
        incidents_handlers::search_incidents,
        incidents_handlers::delete_incident,
    ),
    components(
        schemas(
            // Shared
            Meta,
            // Incidencias
            NotificationLevel,
            incidents_dtos::FeedbackKind,
            incidents_dtos::SubmissionFeedbackDto,
            incidents_dtos::SearchFilterDto,
            incidents_dtos::IncidentRecordDto,
            incidents_dtos::DeleteIncidentDto,
            ApiResponse<incidents_dtos::SubmissionFeedbackDto>,
            ApiResponse<Vec<incidents_dtos::IncidentRecordDto>>,
        )
    ),
    tags(
        (name = "incidencias", description = "Classroom incident form and search"),
    ),
    info(
        title = "Reaktor Incidencias API",
        version = "0.1.0",
        description = "Form gateway for classroom incident reports",
    )
)]
pub struct ApiDoc;

/// Overrides OpenAPI info from configuration
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}
