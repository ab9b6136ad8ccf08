//! HTTP Endpoints
//!
//! REST API for the grammar checker.

use axum::{
    extract::{rejection::JsonRejection, Json, State},
    http::{HeaderValue, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use std::time::Duration;
use tower_http::cors::{Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use tagasuri_core::RelayOutcome;
use tagasuri_text_processing::{parse_verdict, CheckOutcome};

use crate::metrics::{
    metrics_handler, record_error, record_llm_latency, record_rejection, record_request,
};
use crate::state::AppState;
use crate::ServerError;

/// Create the application router
pub fn create_router(state: AppState) -> Router {
    let server = &state.config.server;
    let cors_layer = build_cors_layer(&server.cors_origins, server.cors_enabled);
    let timeout = Duration::from_secs(server.timeout_seconds);

    Router::new()
        // Grammar check
        .route("/suriin-gramar", post(check_grammar))
        .route("/check-grammar", post(check_grammar))
        .route("/suriin-gramar/json", post(check_grammar_json))
        // Health check
        .route("/health", get(health_check))
        .route("/ready", get(readiness_check))
        // Prometheus metrics
        .route("/metrics", get(metrics_handler))
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(timeout))
        .layer(cors_layer)
        .with_state(state)
}

/// Build CORS layer from configured origins
///
/// - If cors_enabled is false, returns permissive layer
/// - If cors_origins is empty or all invalid, allows localhost:3000 only
fn build_cors_layer(origins: &[String], enabled: bool) -> CorsLayer {
    if !enabled {
        tracing::warn!("CORS is disabled - allowing all origins");
        return CorsLayer::permissive();
    }

    let parsed_origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| {
            origin.parse::<HeaderValue>().ok().or_else(|| {
                tracing::warn!("Invalid CORS origin: {}", origin);
                None
            })
        })
        .collect();

    if parsed_origins.is_empty() {
        tracing::info!("No usable CORS origins configured, defaulting to localhost:3000");
        return CorsLayer::new()
            .allow_origin(HeaderValue::from_static("http://localhost:3000"))
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers(Any);
    }

    tracing::info!("CORS configured with {} origins", parsed_origins.len());
    CorsLayer::new()
        .allow_origin(parsed_origins)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any)
}

/// Grammar check request
///
/// Accepts `{"pangungusap": "..."}` or `{"sentence": "..."}`.
#[derive(Debug, Deserialize)]
struct CheckRequest {
    #[serde(default, alias = "sentence")]
    pangungusap: Option<String>,
}

/// Sentence from the body; a body without JSON content type counts as missing
fn sentence_from(payload: Result<Json<CheckRequest>, JsonRejection>) -> Result<String, ServerError> {
    match payload {
        Ok(Json(request)) => Ok(request.pangungusap.unwrap_or_default()),
        Err(JsonRejection::MissingJsonContentType(_)) => Ok(String::new()),
        Err(rejection) => {
            record_error("invalid_request");
            Err(ServerError::InvalidRequest(rejection.body_text()))
        }
    }
}

/// Run the pipeline and record metrics for the outcome
async fn run_check(state: &AppState, text: &str) -> Result<CheckOutcome, ServerError> {
    match state.pipeline.check(text).await {
        Ok(outcome) => {
            match &outcome {
                CheckOutcome::Rejected(rejection) => {
                    record_rejection(rejection.kind);
                    record_request("rejected");
                }
                CheckOutcome::Relayed {
                    outcome, elapsed, ..
                } => {
                    record_llm_latency(*elapsed);
                    record_request(if outcome.is_correction() {
                        "correction"
                    } else {
                        "no_correction"
                    });
                }
            }
            Ok(outcome)
        }
        Err(e) => {
            let err = ServerError::from(e);
            tracing::error!(error = %err, "Grammar check failed");
            record_error(err.kind());
            record_request("error");
            Err(err)
        }
    }
}

/// POST /suriin-gramar, /check-grammar
///
/// - `400` text: empty input
/// - `200` text: rejection message or the model's correction
/// - `204`: nothing to correct
async fn check_grammar(
    State(state): State<AppState>,
    payload: Result<Json<CheckRequest>, JsonRejection>,
) -> Result<Response, ServerError> {
    let text = sentence_from(payload)?;

    let response = match run_check(&state, &text).await? {
        CheckOutcome::Rejected(rejection) if rejection.kind.is_validation_failure() => {
            (StatusCode::BAD_REQUEST, rejection.message).into_response()
        }
        CheckOutcome::Rejected(rejection) => (StatusCode::OK, rejection.message).into_response(),
        CheckOutcome::Relayed { outcome, .. } => match outcome {
            RelayOutcome::Correction(correction) => (StatusCode::OK, correction).into_response(),
            RelayOutcome::NoCorrection => StatusCode::NO_CONTENT.into_response(),
        },
    };
    Ok(response)
}

/// POST /suriin-gramar/json
///
/// Same pipeline as `/suriin-gramar`, with the model's answer parsed into
/// `{"mali": [...], "tamang_sagot": "..."}`.
async fn check_grammar_json(
    State(state): State<AppState>,
    payload: Result<Json<CheckRequest>, JsonRejection>,
) -> Result<Response, ServerError> {
    let text = sentence_from(payload)?;

    let response = match run_check(&state, &text).await? {
        CheckOutcome::Rejected(rejection) => {
            let status = if rejection.kind.is_validation_failure() {
                StatusCode::BAD_REQUEST
            } else {
                StatusCode::OK
            };
            let body = serde_json::json!({
                "tinanggihan": rejection.kind,
                "mensahe": rejection.message,
            });
            (status, Json(body)).into_response()
        }
        CheckOutcome::Relayed { outcome, .. } => match outcome {
            RelayOutcome::Correction(correction) => {
                let verdict = parse_verdict(&correction).map_err(|e| {
                    let err = ServerError::from(tagasuri_core::Error::from(e));
                    tracing::warn!(error = %err, "Could not parse model answer");
                    record_error(err.kind());
                    err
                })?;
                Json(verdict).into_response()
            }
            RelayOutcome::NoCorrection => {
                Json(serde_json::json!({ "walang_mali": true })).into_response()
            }
        },
    };
    Ok(response)
}

/// GET /health
async fn health_check(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION"),
        "checks": {
            "lexicon": state.lexicon,
            "llm": { "model": state.llm.model_name() },
        }
    }))
}

/// GET /ready
///
/// Probes the LLM backend with a 2 second limit.
async fn readiness_check(State(state): State<AppState>) -> (StatusCode, Json<serde_json::Value>) {
    let llm_status =
        match tokio::time::timeout(Duration::from_secs(2), state.llm.is_available()).await {
            Ok(true) => "ok",
            Ok(false) => "unreachable",
            Err(_) => "timeout",
        };
    let ready = llm_status == "ok";

    let status_code = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (
        status_code,
        Json(serde_json::json!({
            "status": if ready { "ready" } else { "not_ready" },
            "checks": {
                "llm_backend": {
                    "status": llm_status,
                    "model": state.llm.model_name(),
                }
            }
        })),
    )
}
