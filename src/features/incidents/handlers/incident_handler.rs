use axum::{
    extract::State,
    http::{header, HeaderMap, StatusCode},
    response::{Html, IntoResponse, Response},
    Json,
};
use std::collections::HashMap;
use std::sync::Arc;
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::core::extractor::{AppJson, FormFields};
use crate::features::incidents::dtos::{
    DeleteIncidentDto, IncidentRecordDto, SearchFilterDto, SubmissionFeedbackDto,
};
use crate::features::incidents::error::{ServerError, SubmissionError};
use crate::features::incidents::notifier::TracingNotifier;
use crate::features::incidents::page::render_form_page;
use crate::features::incidents::services::{
    DeleteService, FormSubmitter, SearchService, SubmissionOutcome,
};
use crate::shared::types::{ApiResponse, Meta};

fn wants_html(headers: &HeaderMap) -> bool {
    headers
        .get(header::ACCEPT)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|accept| accept.contains("text/html"))
}

fn status_for(outcome: &SubmissionOutcome) -> StatusCode {
    match &outcome.result {
        Ok(submitted) if submitted.backend_status == 201 => StatusCode::CREATED,
        Ok(_) => StatusCode::OK,
        Err(SubmissionError::Validation(_)) => StatusCode::UNPROCESSABLE_ENTITY,
        Err(SubmissionError::AlreadyInFlight) => StatusCode::CONFLICT,
        Err(SubmissionError::Server(ServerError::BadRequest(_))) => StatusCode::BAD_REQUEST,
        Err(SubmissionError::Server(ServerError::NotFound)) => StatusCode::NOT_FOUND,
        Err(SubmissionError::Server(ServerError::Unexpected { .. }))
        | Err(SubmissionError::Network(_)) => StatusCode::BAD_GATEWAY,
    }
}

/// Render the incident form
#[utoipa::path(
    get,
    path = "/incidencias/formulario",
    responses(
        (status = 200, description = "HTML incident form", content_type = "text/html", body = String)
    ),
    tag = "incidencias"
)]
pub async fn show_form(State(submitter): State<Arc<FormSubmitter>>) -> Result<Html<String>> {
    let page = render_form_page(submitter.profile(), &HashMap::<String, String>::new(), None)
        .map_err(|e| AppError::Internal(e.to_string()))?;
    Ok(Html(page))
}

/// Submit the incident form
///
/// Browsers (`Accept: text/html`) get the form back with an inline message;
/// on success the page also forwards to the results page. Other clients get
/// JSON feedback.
#[utoipa::path(
    post,
    path = "/incidencias/formulario",
    request_body(
        content = HashMap<String, String>,
        content_type = "application/x-www-form-urlencoded",
        description = "Form inputs by identifier"
    ),
    responses(
        (status = 200, description = "Incident accepted (updated)", body = ApiResponse<SubmissionFeedbackDto>),
        (status = 201, description = "Incident accepted (created)", body = ApiResponse<SubmissionFeedbackDto>),
        (status = 400, description = "Backend rejected the report", body = ApiResponse<SubmissionFeedbackDto>),
        (status = 404, description = "Backend could not find the incident", body = ApiResponse<SubmissionFeedbackDto>),
        (status = 409, description = "Submission already in flight", body = ApiResponse<SubmissionFeedbackDto>),
        (status = 422, description = "Missing fields or invalid email", body = ApiResponse<SubmissionFeedbackDto>),
        (status = 502, description = "Backend unreachable or failed", body = ApiResponse<SubmissionFeedbackDto>)
    ),
    tag = "incidencias"
)]
pub async fn submit_form(
    State(submitter): State<Arc<FormSubmitter>>,
    headers: HeaderMap,
    FormFields(fields): FormFields,
) -> Result<Response> {
    let outcome = submitter.submit(&fields, &TracingNotifier).await;
    let status = status_for(&outcome);

    if wants_html(&headers) {
        // Keep what the user typed unless it was accepted
        let empty = HashMap::new();
        let values = if outcome.result.is_ok() { &empty } else { &fields };
        let page = render_form_page(submitter.profile(), values, Some(&outcome.notification))
            .map_err(|e| AppError::Internal(e.to_string()))?;
        return Ok((status, Html(page)).into_response());
    }

    let message = Some(outcome.notification.message.clone());
    let feedback = SubmissionFeedbackDto::from(&outcome);
    let body = match &outcome.result {
        Ok(_) => ApiResponse::success(Some(feedback), message, None),
        Err(e) => ApiResponse::failure(Some(feedback), message, Some(vec![e.to_string()])),
    };

    Ok((status, Json(body)).into_response())
}

/// Search incidents on the backend
#[utoipa::path(
    post,
    path = "/incidencias/busqueda",
    request_body = SearchFilterDto,
    responses(
        (status = 200, description = "Matching incidents (possibly none)", body = ApiResponse<Vec<IncidentRecordDto>>),
        (status = 400, description = "Invalid filter"),
        (status = 502, description = "Backend unreachable or failed")
    ),
    tag = "incidencias"
)]
pub async fn search_incidents(
    State(service): State<Arc<SearchService>>,
    AppJson(dto): AppJson<SearchFilterDto>,
) -> Result<Json<ApiResponse<Vec<IncidentRecordDto>>>> {
    let records = service.search(dto).await?;
    let total = records.len() as i64;

    Ok(Json(ApiResponse::success(
        Some(records),
        None,
        Some(Meta { total }),
    )))
}

/// Delete an incident on the backend
#[utoipa::path(
    delete,
    path = "/incidencias",
    request_body = DeleteIncidentDto,
    responses(
        (status = 200, description = "Incident deleted"),
        (status = 404, description = "Incident not found"),
        (status = 422, description = "Invalid incident key"),
        (status = 502, description = "Backend unreachable or failed")
    ),
    tag = "incidencias"
)]
pub async fn delete_incident(
    State(service): State<Arc<DeleteService>>,
    AppJson(dto): AppJson<DeleteIncidentDto>,
) -> Result<Json<ApiResponse<()>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    service.delete(dto.into()).await?;
    Ok(Json(ApiResponse::success(
        None,
        Some("Incidencia eliminada con éxito.".to_string()),
        None,
    )))
}
