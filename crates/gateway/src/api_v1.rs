//! HTTP API v1: report generation and rendering.
//!
//! Endpoints:
//!
//! - `GET  /v1/depths`: The depth levels and their instruction fragments
//! - `POST /v1/reports`: Research a topic, return the text and the PDF
//! - `POST /v1/render`: Re-render existing report text as a PDF download

use axum::{
    Router,
    extract::State,
    http::{StatusCode, header},
    response::{IntoResponse, Json, Response},
    routing::{get, post},
};
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, warn};

use reportsmith_core::depth::DepthLevel;
use reportsmith_core::error::ValidationError;
use reportsmith_core::invoker::AgentInvoker;
use reportsmith_core::report::{ReportText, validate_topic};
use reportsmith_pipeline::{PipelineError, ReportPipeline};
use reportsmith_render::render_report;

// ── State ─────────────────────────────────────────────────────────────────

/// Shared state for the v1 API.
pub struct ApiV1State {
    pub pipeline: ReportPipeline<Arc<dyn AgentInvoker>>,
    /// Provider name, reported by `/v1/depths` for the UI footer
    pub provider: String,
    pub model: String,
}

pub type SharedApiState = Arc<ApiV1State>;

// ── Router ────────────────────────────────────────────────────────────────

/// Build the v1 API router. Nest this under "/v1" in the main router.
pub fn v1_router(state: SharedApiState) -> Router {
    Router::new()
        .route("/depths", get(list_depths_handler))
        .route("/reports", post(generate_report_handler))
        .route("/render", post(render_handler))
        .with_state(state)
}

// ── DTOs ──────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct GenerateRequest {
    pub topic: String,
    #[serde(default)]
    pub depth: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct GenerateResponse {
    pub topic: String,
    pub depth: DepthLevel,
    pub report: String,
    pub filename: String,
    pub pages: usize,
    pub pdf_base64: String,
}

#[derive(Debug, Deserialize)]
pub struct RenderRequest {
    pub topic: String,
    pub report: String,
}

#[derive(Serialize)]
struct DepthDto {
    name: DepthLevel,
    fragment: &'static str,
    default: bool,
}

#[derive(Serialize)]
struct DepthsResponse {
    depths: Vec<DepthDto>,
    provider: String,
    model: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub kind: String,
}

type ApiError = (StatusCode, Json<ErrorResponse>);

fn validation_error(e: ValidationError) -> ApiError {
    pipeline_error(PipelineError::from(e))
}

/// 422 for bad input, 502 when the provider or a tool failed.
fn pipeline_error(e: PipelineError) -> ApiError {
    let status = match e {
        PipelineError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
        PipelineError::Invoke(_) => StatusCode::BAD_GATEWAY,
    };
    (
        status,
        Json(ErrorResponse {
            error: e.user_message(),
            kind: e.kind().to_string(),
        }),
    )
}

// ── Handlers ──────────────────────────────────────────────────────────────

async fn list_depths_handler(State(state): State<SharedApiState>) -> Json<DepthsResponse> {
    let default = DepthLevel::default();
    Json(DepthsResponse {
        depths: DepthLevel::ALL
            .iter()
            .map(|&level| DepthDto {
                name: level,
                fragment: level.fragment(),
                default: level == default,
            })
            .collect(),
        provider: state.provider.clone(),
        model: state.model.clone(),
    })
}

async fn generate_report_handler(
    State(state): State<SharedApiState>,
    Json(payload): Json<GenerateRequest>,
) -> Result<Json<GenerateResponse>, ApiError> {
    let depth = match payload.depth.as_deref() {
        Some(raw) if !raw.trim().is_empty() => raw.parse::<DepthLevel>().map_err(validation_error)?,
        _ => DepthLevel::default(),
    };

    info!(depth = %depth, topic_len = payload.topic.len(), "v1/reports request");

    let generated = state
        .pipeline
        .run(&payload.topic, depth)
        .await
        .map_err(|e| {
            warn!(kind = e.kind(), error = %e, "Report request failed");
            pipeline_error(e)
        })?;

    Ok(Json(GenerateResponse {
        topic: generated.request.topic().to_string(),
        depth: generated.request.depth(),
        pdf_base64: BASE64.encode(&generated.document.bytes),
        filename: generated.document.filename,
        pages: generated.document.pages,
        report: generated.text.into_string(),
    }))
}

async fn render_handler(Json(payload): Json<RenderRequest>) -> Result<Response, ApiError> {
    let topic = validate_topic(&payload.topic).map_err(validation_error)?;
    let document = render_report(topic, &ReportText::from(payload.report));

    info!(pages = document.pages, "v1/render request");

    let disposition = format!("attachment; filename=\"{}\"", document.filename);
    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        document.bytes,
    )
        .into_response())
}
