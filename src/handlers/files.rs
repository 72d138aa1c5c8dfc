use axum::{
    extract::{Path, State},
    http::header,
    response::{IntoResponse, Response},
};
use std::io::ErrorKind;
use tokio::fs;
use tracing::info;

use crate::error::{AppError, AppResult};
use crate::handlers::AppState;

/// Serves a stored file as an attachment so clients save it instead of
/// rendering it.
pub async fn download_handler(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> AppResult<Response> {
    let path = state
        .storage
        .resolve(&name)
        .ok_or_else(|| AppError::not_found(name.as_str()))?;

    let contents = match fs::read(&path).await {
        Ok(contents) => contents,
        Err(e) if e.kind() == ErrorKind::NotFound => return Err(AppError::not_found(name)),
        Err(e) => return Err(e.into()),
    };

    let mime = mime_guess::from_path(&path).first_or_octet_stream();
    let disposition = format!("attachment; filename=\"{}\"", name.replace('"', ""));

    info!(file = %name, bytes = contents.len(), "Serving converted file");

    Ok((
        [
            (header::CONTENT_TYPE, mime.to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        contents,
    )
        .into_response())
}
