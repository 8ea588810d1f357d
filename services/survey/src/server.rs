//! HTTP API for the survey UI

use anyhow::{Context, Result};
use axum::{
    Router,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::Json,
    routing::{get, post},
};
use demand_core::ValidationError;
use std::{net::SocketAddr, sync::Arc, time::Duration, time::Instant};
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};
use tracing::{error, info};

use crate::{
    config::SurveyConfig,
    errors::SubmitError,
    models::{ApiResponse, ErrorResponse, HealthCheckResponse, SubmitRequest, SubmitResponse},
    service::{DemandReport, SurveyForm, SurveyService},
    store::build_store,
};

/// Shared handler state
#[derive(Clone)]
pub struct AppState {
    /// Survey orchestration
    pub service: Arc<SurveyService>,
    /// Router creation time, for uptime
    pub start_time: Instant,
}

/// Routes with tracing and a request timeout
pub fn create_router(service: Arc<SurveyService>, timeout: Duration) -> Router {
    let state = AppState {
        service,
        start_time: Instant::now(),
    };

    Router::new()
        .route("/health", get(health_check))
        .route("/api/v1/survey", get(survey_form))
        .route("/api/v1/submissions", post(submit))
        .route("/api/v1/report", get(report))
        .with_state(state)
        .layer(TimeoutLayer::new(timeout))
        .layer(TraceLayer::new_for_http())
}

/// Build the configured store and serve until Ctrl-C
pub async fn serve(config: SurveyConfig) -> Result<()> {
    let addr: SocketAddr = config
        .server_address()
        .parse()
        .with_context(|| format!("Invalid server address '{}'", config.server_address()))?;

    let store = build_store(&config.store).context("Failed to open submission store")?;
    let service = Arc::new(SurveyService::new(&config, store)?);
    let app = create_router(service, Duration::from_secs(config.server.timeout_seconds));

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to address {addr}"))?;
    info!("Survey API listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Survey API stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", e);
    }
}

async fn health_check(State(state): State<AppState>) -> Json<ApiResponse<HealthCheckResponse>> {
    let store = state.service.store();
    let store_healthy = store.is_healthy().await;

    Json(ApiResponse::success(HealthCheckResponse {
        status: if store_healthy { "healthy" } else { "degraded" }.to_string(),
        store: store.backend_name().to_string(),
        store_healthy,
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: state.start_time.elapsed().as_secs(),
    }))
}

async fn survey_form(State(state): State<AppState>) -> Json<ApiResponse<SurveyForm>> {
    Json(ApiResponse::success(state.service.form().clone()))
}

async fn report(State(state): State<AppState>) -> Json<ApiResponse<DemandReport>> {
    Json(ApiResponse::success(state.service.report(false).await))
}

async fn submit(
    State(state): State<AppState>,
    payload: Result<Json<SubmitRequest>, JsonRejection>,
) -> (StatusCode, Json<ApiResponse<SubmitResponse>>) {
    // malformed bodies get the same envelope as rejected prices
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => {
            let body = ErrorResponse::new("validation_failed", rejection.body_text());
            return (rejection.status(), Json(ApiResponse::error(body)));
        }
    };

    match state.service.submit(request.price).await {
        Ok(submission) => {
            let report = state.service.report(true).await;
            (
                StatusCode::CREATED,
                Json(ApiResponse::success(SubmitResponse { submission, report })),
            )
        }
        Err(e) => {
            let (status, body) = submit_error_response(&e, state.service.form());
            (status, Json(ApiResponse::error(body)))
        }
    }
}

fn submit_error_response(err: &SubmitError, form: &SurveyForm) -> (StatusCode, ErrorResponse) {
    match err {
        SubmitError::Invalid(invalid) => {
            let mut body = ErrorResponse::new("validation_failed", invalid.to_string());
            if matches!(
                invalid,
                ValidationError::BelowMinimum { .. }
                    | ValidationError::AboveMaximum { .. }
                    | ValidationError::OffStep { .. }
            ) {
                body = body
                    .with_detail("min_price", form.min_price.as_i64().to_string())
                    .with_detail("max_price", form.max_price.as_i64().to_string())
                    .with_detail("step", form.step.to_string());
            }
            (StatusCode::UNPROCESSABLE_ENTITY, body)
        }
        SubmitError::Store(store) => (
            StatusCode::BAD_GATEWAY,
            ErrorResponse::new(
                "store_error",
                format!("Failed to record your response: {store}"),
            ),
        ),
    }
}
