mod core;
mod features;
mod shared;

use crate::core::config::Config;
use crate::core::middleware;
use crate::core::openapi::{ApiDoc, SwaggerInfoModifier};
use crate::features::incidents::{routes as incidents_routes, HttpIncidentBackend};
use crate::features::incidents::{DeleteService, FormSubmitter, IncidentBackend, SearchService};
use axum::Router;
use std::sync::Arc;
use tower_http::request_id::{PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::{DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tracing::Level;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::Modify;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file BEFORE initializing logger so RUST_LOG is available
    let _ = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env().map_err(|e| anyhow::anyhow!(e))?;
    tracing::info!("Configuration loaded successfully");

    let profile = config.backend.profile.clone();
    tracing::info!(
        "Submission profile {:?}: endpoint={}, redirect={}",
        profile.kind,
        profile.endpoint,
        profile.success_redirect.as_deref().unwrap_or("-")
    );

    // Shared HTTP client for the incidencias backend
    let backend: Arc<dyn IncidentBackend> = Arc::new(
        HttpIncidentBackend::new(config.backend.timeout)
            .map_err(|e| anyhow::anyhow!("Failed to build HTTP client: {}", e))?,
    );

    let submitter = Arc::new(FormSubmitter::new(Arc::clone(&backend), profile));
    let search_service = Arc::new(SearchService::new(
        Arc::clone(&backend),
        config.backend.search_url.clone(),
    ));
    let delete_service = Arc::new(DeleteService::new(
        Arc::clone(&backend),
        config.backend.delete_url.clone(),
    ));
    tracing::info!(
        "Incident services initialized (search: {}, delete: {})",
        config.backend.search_url,
        config.backend.delete_url
    );

    // Build swagger router with dynamic info
    let swagger_modifier = SwaggerInfoModifier {
        title: config.swagger.title.clone(),
        version: config.swagger.version.clone(),
        description: config.swagger.description.clone(),
    };
    let mut openapi = ApiDoc::openapi();
    swagger_modifier.modify(&mut openapi);
    let swagger =
        Router::new().merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", openapi));

    // Simple health check endpoint
    async fn health_check() -> axum::http::StatusCode {
        axum::http::StatusCode::OK
    }
    let health_route = Router::new().route("/health", axum::routing::get(health_check));

    let app = Router::new()
        .merge(swagger)
        .merge(incidents_routes::form_routes(submitter))
        .merge(incidents_routes::search_routes(search_service))
        .merge(incidents_routes::delete_routes(delete_service))
        .merge(health_route)
        .layer(middleware::cors_layer(
            config.app.cors_allowed_origins.clone(),
        ))
        // Propagate X-Request-Id to response headers
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(middleware::MakeSpanWithRequestId)
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        // Generate X-Request-Id using UUID v7 (or use client-provided one)
        .layer(SetRequestIdLayer::x_request_id(middleware::MakeRequestUuid));

    // Start server
    let addr = config.app.server_address();
    let socket_addr: std::net::SocketAddr = addr
        .parse()
        .map_err(|e| anyhow::anyhow!("Invalid address: {}", e))?;

    // Use socket2 for TCP listener configuration
    let socket = socket2::Socket::new(
        socket2::Domain::for_address(socket_addr),
        socket2::Type::STREAM,
        Some(socket2::Protocol::TCP),
    )?;

    socket.set_reuse_address(true)?;
    socket.set_nodelay(true)?;
    socket.set_nonblocking(true)?;
    socket.bind(&socket_addr.into())?;
    socket.listen(1024)?;

    let listener = tokio::net::TcpListener::from_std(socket.into())?;
    tracing::info!("Server listening on {}", format!("http://{}", addr));
    tracing::info!(
        "Incident form available at {}",
        format!("http://{}{}", addr, features::incidents::page::FORM_PATH)
    );

    axum::serve(listener, app).await?;

    Ok(())
}
