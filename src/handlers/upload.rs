use axum::{
    extract::{multipart::MultipartError, Multipart, State},
    http::{HeaderMap, StatusCode},
    response::Json,
};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{info, debug};

use crate::error::{AppError, AppResult};
use crate::handlers::AppState;
use crate::middleware::request_id;
use crate::models::{UploadedFile, UploadResponse};
use crate::services::{storage_name, DocumentKind, Storage};

const FILE_FIELD: &str = "file";
const OUTPUT_EXTENSION: &str = "txt";

pub async fn upload_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    mut multipart: Multipart,
) -> AppResult<Json<UploadResponse>> {
    let start = Instant::now();
    let request_id = request_id(&headers);

    info!(request_id = %request_id, "Starting upload conversion request");

    let file = extract_file_from_multipart(&mut multipart, state.max_file_size_mb).await?;
    let kind = validate_upload(&file)?;

    info!(
        request_id = %request_id,
        file_name = %file.name,
        file_size = file.size,
        kind = ?kind,
        "Upload accepted"
    );

    let output = convert_upload(&state.storage, &file, kind).await?;

    let filename = output
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .ok_or_else(|| AppError::internal("Output path has no file name"))?;

    info!(
        request_id = %request_id,
        output = %filename,
        total_time_ms = start.elapsed().as_millis() as u64,
        "Request completed successfully"
    );

    Ok(Json(UploadResponse::new(filename)))
}

/// Checks the name of an upload and picks the extractor for it.
pub fn validate_upload(file: &UploadedFile) -> AppResult<DocumentKind> {
    if file.name.is_empty() {
        return Err(AppError::EmptyFilename);
    }

    let extension = file.extension();
    DocumentKind::from_extension(&extension)
        .ok_or(AppError::UnsupportedExtension { extension })
}

/// Stores the upload, extracts its text into a `.txt` sibling and removes
/// the upload again. Returns the path of the converted file.
pub async fn convert_upload(
    storage: &Storage,
    file: &UploadedFile,
    kind: DocumentKind,
) -> AppResult<PathBuf> {
    let upload_path = storage
        .write_unique(&storage_name(&file.name, kind), &file.content)
        .await?;
    debug!(path = %upload_path.display(), "Upload saved");

    match extract_to_text_file(storage, &upload_path, kind).await {
        Ok(output) => {
            storage.remove_quietly(&upload_path).await?;
            Ok(output)
        }
        Err(e) => {
            storage.remove_quietly(&upload_path).await.ok();
            Err(e)
        }
    }
}

async fn extract_to_text_file(
    storage: &Storage,
    upload_path: &Path,
    kind: DocumentKind,
) -> AppResult<PathBuf> {
    let text = kind.extract(upload_path.to_path_buf()).await?;

    let stem = upload_path
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default();
    let output_name = format!("{}.{}", stem, OUTPUT_EXTENSION);

    storage.write_unique(&output_name, text.as_bytes()).await
}

async fn extract_file_from_multipart(
    multipart: &mut Multipart,
    max_file_size_mb: usize,
) -> AppResult<UploadedFile> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| multipart_error(e, max_file_size_mb))?
    {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        // A `file` part without a filename is a plain form value, not an upload.
        let Some(file_name) = field.file_name().map(str::to_string) else {
            continue;
        };

        let content_type = field.content_type().map(|ct| ct.to_string());

        let data = field
            .bytes()
            .await
            .map_err(|e| multipart_error(e, max_file_size_mb))?;

        let mut file = UploadedFile::new(file_name, data);
        if let Some(mime_type) = content_type {
            file = file.with_mime_type(mime_type);
        }

        debug!(
            "Extracted file: {} ({} bytes, type: {:?})",
            file.name,
            file.size,
            file.mime_type
        );

        return Ok(file);
    }

    Err(AppError::MissingFile)
}

fn multipart_error(err: MultipartError, max_file_size_mb: usize) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::FileTooLarge { limit: max_file_size_mb }
    } else {
        AppError::invalid_upload(err.body_text())
    }
}
