use axum::{
    Router,
    extract::State,
    http::StatusCode,
    response::Json,
    routing::{get, post},
};
use base64::{Engine as _, engine::general_purpose::STANDARD};
use report_flow::{
    FlowError, HttpCollaborators, PredictionFlow, PredictionInputs, PredictionReview,
    ReportPipeline, UploadedFile,
};
use serde_json::{Value, json};
use std::sync::Arc;
use tokio::sync::Mutex;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use uuid::Uuid;

use crate::models::{
    AnalyzeImageRequest, AnalyzeImageResponse, GenerateReportRequest, PdfResponse,
    ProgressResponse, ReportResponse, SectionsResponse, UploadRequest, UploadResponse,
};

type ApiResult<T> = Result<Json<T>, (StatusCode, Json<Value>)>;
type ApiError = (StatusCode, Json<Value>);

fn bad_request_error(message: &str) -> ApiError {
    (StatusCode::BAD_REQUEST, Json(json!({ "error": message })))
}

fn flow_error(err: &FlowError) -> ApiError {
    let status = match err {
        FlowError::Validation(_) | FlowError::State(_) => StatusCode::BAD_REQUEST,
        FlowError::Service(_) | FlowError::Transport(_) => StatusCode::BAD_GATEWAY,
    };
    (status, Json(json!({ "error": err.to_string() })))
}

/// The single in-flight report session. A new upload replaces its
/// contents; an explicit reset also rotates the id.
pub struct ReportSession {
    pub id: String,
    pub pipeline: ReportPipeline,
}

impl ReportSession {
    fn new(pipeline: ReportPipeline) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            pipeline,
        }
    }
}

#[derive(Clone)]
pub struct AppState {
    pub session: Arc<Mutex<ReportSession>>,
    pub prediction: Arc<PredictionFlow>,
}

pub async fn create_app() -> Router {
    let base_url = std::env::var("ANALYSIS_SERVICES_URL")
        .expect("ANALYSIS_SERVICES_URL environment variable must be set");
    let collaborators = Arc::new(HttpCollaborators::new(base_url));
    build_router(create_app_state(collaborators))
}

fn create_app_state(collaborators: Arc<HttpCollaborators>) -> AppState {
    AppState {
        session: Arc::new(Mutex::new(ReportSession::new(ReportPipeline::new(
            collaborators.clone(),
        )))),
        prediction: Arc::new(PredictionFlow::new(collaborators)),
    }
}

pub fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health_check))
        .route("/session/upload", post(stage_upload))
        .route("/session/analyze-image", post(analyze_image))
        .route("/session/report", post(generate_report))
        .route("/session/progress", get(get_progress))
        .route("/session/sections", get(get_sections))
        .route("/session/pdf", post(export_pdf))
        .route("/session/reset", post(reset_session))
        .route("/predict", post(predict_disease))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}

async fn root() -> Json<Value> {
    Json(json!({
        "service": "Clinical Report Service",
        "version": "1.0.0",
        "description": "Coordinates imaging, lab, report, diet and disease-risk collaborators",
        "endpoints": {
            "POST /session/upload": "Stage a diagnostic image",
            "POST /session/analyze-image": "Run image analysis for the staged upload",
            "POST /session/report": "Run the lab/report/diet pipeline",
            "GET /session/progress": "Workflow progress snapshot",
            "GET /session/sections": "Assembled report sections",
            "POST /session/pdf": "Export the finished report as PDF",
            "POST /session/reset": "Discard the current session",
            "POST /predict": "Independent disease-risk prediction",
            "GET /health": "Health check"
        }
    }))
}

async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

async fn stage_upload(
    State(state): State<AppState>,
    Json(request): Json<UploadRequest>,
) -> ApiResult<UploadResponse> {
    let bytes = match STANDARD.decode(request.data.as_bytes()) {
        Ok(bytes) => bytes,
        Err(_) => return Err(bad_request_error("Upload data must be base64-encoded")),
    };

    let file = UploadedFile {
        name: request.file_name,
        content_type: request.content_type,
        bytes,
    };

    let mut session = state.session.lock().await;
    let staged = match session.pipeline.stage_upload(&file) {
        Ok(staged) => staged,
        Err(err) => return Err(flow_error(&err)),
    };
    info!(session_id = %session.id, file = %staged.file_name, "image staged");

    Ok(Json(UploadResponse {
        session_id: session.id.clone(),
        file_name: staged.file_name,
        size_label: staged.size_label,
        progress: session.pipeline.progress().snapshot(),
    }))
}

async fn analyze_image(
    State(state): State<AppState>,
    Json(request): Json<AnalyzeImageRequest>,
) -> ApiResult<AnalyzeImageResponse> {
    let mut session = state.session.lock().await;
    let result = session.pipeline.analyze_image(request.patient_info).await;
    let findings = match result {
        Ok(findings) => findings,
        Err(err) => {
            warn!(session_id = %session.id, "image analysis failed: {err}");
            return Err(flow_error(&err));
        }
    };

    Ok(Json(AnalyzeImageResponse {
        session_id: session.id.clone(),
        findings,
        progress: session.pipeline.progress().snapshot(),
    }))
}

async fn generate_report(
    State(state): State<AppState>,
    Json(request): Json<GenerateReportRequest>,
) -> ApiResult<ReportResponse> {
    let mut session = state.session.lock().await;
    let result = session.pipeline.generate_report(&request.lab_results).await;
    let outcome = match result {
        Ok(outcome) => outcome,
        Err(err) => {
            warn!(session_id = %session.id, "report generation failed: {err}");
            return Err(flow_error(&err));
        }
    };
    let sections = match session.pipeline.sections() {
        Ok(sections) => sections,
        Err(err) => return Err(flow_error(&err)),
    };

    Ok(Json(ReportResponse {
        session_id: session.id.clone(),
        report: outcome.report,
        diet_recommendation: outcome.diet,
        diet_source: outcome.diet_source,
        sections,
        progress: session.pipeline.progress().snapshot(),
    }))
}

async fn get_progress(State(state): State<AppState>) -> Json<ProgressResponse> {
    let session = state.session.lock().await;
    Json(ProgressResponse {
        session_id: session.id.clone(),
        progress: session.pipeline.progress().snapshot(),
    })
}

async fn get_sections(State(state): State<AppState>) -> ApiResult<SectionsResponse> {
    let session = state.session.lock().await;
    let sections = match session.pipeline.sections() {
        Ok(sections) => sections,
        Err(err) => return Err(flow_error(&err)),
    };
    Ok(Json(SectionsResponse {
        session_id: session.id.clone(),
        sections,
    }))
}

async fn export_pdf(State(state): State<AppState>) -> ApiResult<PdfResponse> {
    let session = state.session.lock().await;
    let artifact = match session.pipeline.export_pdf().await {
        Ok(artifact) => artifact,
        Err(err) => {
            warn!(session_id = %session.id, "PDF export failed: {err}");
            return Err(flow_error(&err));
        }
    };
    info!(session_id = %session.id, filename = %artifact.filename, "PDF exported");

    Ok(Json(PdfResponse {
        session_id: session.id.clone(),
        filename: artifact.filename,
        pdf: STANDARD.encode(&artifact.content),
    }))
}

async fn reset_session(State(state): State<AppState>) -> Json<ProgressResponse> {
    let mut session = state.session.lock().await;
    session.pipeline.reset();
    session.id = Uuid::new_v4().to_string();
    info!(session_id = %session.id, "session reset");

    Json(ProgressResponse {
        session_id: session.id.clone(),
        progress: session.pipeline.progress().snapshot(),
    })
}

async fn predict_disease(
    State(state): State<AppState>,
    Json(inputs): Json<PredictionInputs>,
) -> ApiResult<PredictionReview> {
    let review = match state.prediction.predict(inputs).await {
        Ok(review) => review,
        Err(err) => {
            warn!("disease prediction failed: {err}");
            return Err(flow_error(&err));
        }
    };
    Ok(Json(review))
}
