use serde::{Deserialize, Serialize};

pub const CONVERTED_MESSAGE: &str = "Converted to .txt and original removed";

#[derive(Debug, Serialize, Deserialize)]
pub struct UploadResponse {
    pub ok: bool,
    pub filename: String,
    pub download_url: String,
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PingResponse {
    pub ok: bool,
    pub msg: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub ok: bool,
    pub message: String,
}

impl UploadResponse {
    pub fn new(filename: String) -> Self {
        let download_url = download_url(&filename);
        Self {
            ok: true,
            filename,
            download_url,
            message: CONVERTED_MESSAGE.to_string(),
        }
    }
}

impl PingResponse {
    pub fn pong() -> Self {
        Self {
            ok: true,
            msg: "pong".to_string(),
        }
    }
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            message: message.into(),
        }
    }
}

/// Relative URL the converted file can be fetched from.
pub fn download_url(filename: &str) -> String {
    format!("/api/files/{}", filename)
}
