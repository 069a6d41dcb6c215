use axum::{
    routing::{delete, get, post},
    Router,
};
use std::sync::Arc;

use crate::features::incidents::handlers;
use crate::features::incidents::page::FORM_PATH;
use crate::features::incidents::services::{DeleteService, FormSubmitter, SearchService};

pub fn form_routes(submitter: Arc<FormSubmitter>) -> Router {
    Router::new()
        .route(
            FORM_PATH,
            get(handlers::show_form).post(handlers::submit_form),
        )
        .with_state(submitter)
}

pub fn search_routes(service: Arc<SearchService>) -> Router {
    Router::new()
        .route("/incidencias/busqueda", post(handlers::search_incidents))
        .with_state(service)
}

pub fn delete_routes(service: Arc<DeleteService>) -> Router {
    Router::new()
        .route("/incidencias", delete(handlers::delete_incident))
        .with_state(service)
}
