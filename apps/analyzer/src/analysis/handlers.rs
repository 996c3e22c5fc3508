//! Axum route handler for the Analysis API.

use axum::{
    extract::{
        multipart::{MultipartError, MultipartRejection},
        Multipart, State,
    },
    http::StatusCode,
    Json,
};
use serde::Serialize;
use tracing::info;

use crate::analysis::extract::extract_text;
use crate::analysis::prompts::build_analysis_prompt;
use crate::analysis::retry::generate_with_retry;
use crate::analysis::upload::{validate_upload, FileKind, Upload};
use crate::errors::AppError;
use crate::state::AppState;

/// Name of the multipart field carrying the document.
pub const FILE_FIELD: &str = "file";

/// Success envelope. `data` is the model output exactly as returned.
#[derive(Debug, Serialize)]
pub struct AnalyzeResponse {
    pub data: String,
}

/// POST /api/analyze
///
/// Validates the uploaded document, extracts its text and asks the model
/// for a JSON evaluation, which is passed through unparsed.
pub async fn handle_analyze(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<AnalyzeResponse>, AppError> {
    let mut multipart = multipart.map_err(|e| AppError::MalformedUpload(e.body_text()))?;
    let upload = read_upload(&mut multipart).await?;
    info!("Received file: {}", upload.filename);

    let kind = validate_upload(&upload)?;
    let text = extract_text(kind, upload.bytes).await?;
    info!(
        "Extracted {} characters from {}",
        text.chars().count(),
        upload.filename
    );

    let prompt = build_analysis_prompt(&text);
    let data = generate_with_retry(state.llm.as_ref(), &prompt, state.retry).await?;

    info!("Analysis completed successfully.");
    Ok(Json(AnalyzeResponse { data }))
}

/// Pulls the `file` field out of the form. The extension is checked before
/// the body is buffered so a bad type is reported ahead of any size problem.
async fn read_upload(multipart: &mut Multipart) -> Result<Upload, AppError> {
    while let Some(field) = multipart.next_field().await.map_err(from_multipart)? {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        let filename = field.file_name().unwrap_or_default().to_string();
        if FileKind::from_filename(&filename).is_none() {
            return Err(AppError::InvalidFileType);
        }

        let bytes = field.bytes().await.map_err(from_multipart)?;
        return Ok(Upload { filename, bytes });
    }

    Err(AppError::MalformedUpload(format!(
        "Missing '{FILE_FIELD}' field in multipart form"
    )))
}

fn from_multipart(err: MultipartError) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::FileTooLarge
    } else {
        AppError::MalformedUpload(err.body_text())
    }
}
