//! bookpress-server - HTTP API around the text structuring and rendering
//! pipeline.
//!
//! Endpoints mirror what a frontend needs: one generation route per output
//! format, a document upload route that extracts text and returns a
//! structure survey, and the template catalog.

use axum::extract::{DefaultBodyLimit, Multipart};
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::{Value, json};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use bookpress::render::{download_filename, render_text};
use bookpress::{DEFAULT_TITLE, Error, OutputFormat, Template, extract_text, survey_text};

/// Matches the original upload cap: 16 MiB.
const MAX_UPLOAD_BYTES: usize = 16 * 1024 * 1024;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "bookpress_server=info,tower_http=info".into()),
        )
        .init();

    let app = create_router();

    let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port = std::env::var("PORT").unwrap_or_else(|_| "5000".to_string());
    let addr = format!("{host}:{port}");

    tracing::info!("Listening on {addr}");
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("failed to bind address");
    axum::serve(listener, app).await.expect("server error");
}

fn create_router() -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(home))
        .route("/api/generate-epub", post(generate_epub))
        .route("/api/generate-pdf", post(generate_pdf))
        .route("/api/generate-docx", post(generate_docx))
        .route("/api/upload-document", post(upload_document))
        .route("/api/templates", get(templates))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

#[derive(Debug, thiserror::Error)]
enum ApiError {
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Internal(_) => {
                tracing::error!(error = %self, "request failed");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let body = Json(json!({ "error": self.to_string() }));
        (status, body).into_response()
    }
}

async fn home() -> Json<Value> {
    Json(json!({
        "message": "bookpress API",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": [
            "/api/generate-epub",
            "/api/generate-pdf",
            "/api/generate-docx",
            "/api/upload-document",
            "/api/templates",
        ],
    }))
}

#[derive(Debug, Deserialize)]
struct GenerateRequest {
    #[serde(default)]
    text: String,
    template_name: Option<String>,
    title: Option<String>,
    author: Option<String>,
}

async fn generate_epub(Json(req): Json<GenerateRequest>) -> Result<Response, ApiError> {
    generate(req, OutputFormat::Epub)
}

async fn generate_pdf(Json(req): Json<GenerateRequest>) -> Result<Response, ApiError> {
    generate(req, OutputFormat::Pdf)
}

async fn generate_docx(Json(req): Json<GenerateRequest>) -> Result<Response, ApiError> {
    generate(req, OutputFormat::Docx)
}

fn generate(req: GenerateRequest, format: OutputFormat) -> Result<Response, ApiError> {
    if req.text.is_empty() {
        return Err(ApiError::BadRequest("No text provided".to_string()));
    }

    let template = Template::parse(req.template_name.as_deref().unwrap_or_default());
    let bytes = render_text(
        &req.text,
        template,
        req.title.as_deref(),
        req.author.as_deref(),
        format,
    )
    .map_err(|e| ApiError::Internal(e.to_string()))?;

    let filename = download_filename(req.title.as_deref().unwrap_or(DEFAULT_TITLE), format);

    Ok((
        [
            (header::CONTENT_TYPE, format.mime_type().to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{filename}\""),
            ),
        ],
        bytes,
    )
        .into_response())
}

async fn upload_document(mut multipart: Multipart) -> Result<Json<Value>, ApiError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(e.to_string()))?
    {
        if field.name() != Some("file") {
            continue;
        }

        let filename = field
            .file_name()
            .map(str::to_string)
            .filter(|name| !name.is_empty())
            .ok_or_else(|| ApiError::BadRequest("No file selected".to_string()))?;

        let data = field
            .bytes()
            .await
            .map_err(|e| ApiError::BadRequest(e.to_string()))?;

        let (text, file_type) = extract_text(&data, &filename).map_err(|e| match e {
            Error::UnsupportedFormat(_) => ApiError::BadRequest(
                "File type not supported. Please upload .txt, .docx, or .pdf files".to_string(),
            ),
            other => ApiError::Internal(format!("Error processing file: {other}")),
        })?;

        let structure = survey_text(&text);

        return Ok(Json(json!({
            "text": text,
            "file_type": file_type.as_str(),
            "filename": filename,
            "structure": structure,
        })));
    }

    Err(ApiError::BadRequest("No file provided".to_string()))
}

async fn templates() -> Json<Value> {
    let mut catalog = serde_json::Map::new();
    for template in Template::ALL {
        let info = template.info();
        catalog.insert(
            info.key.to_string(),
            json!({ "name": info.name, "description": info.description }),
        );
    }
    Json(Value::Object(catalog))
}
