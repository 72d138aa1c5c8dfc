//! Unit tests for individual components

mod common;

use std::env;
use std::io::Cursor;

use axum::http::StatusCode;
use bytes::Bytes;
use txtify::{
    config::Config,
    error::AppError,
    handlers::{convert_upload, validate_upload},
    models::{download_url, ErrorResponse, UploadResponse, UploadedFile, CONVERTED_MESSAGE},
    services::{
        join_units, unique_name, DocumentKind, DocxExtractor, PdfExtractor, Storage, TextExtractor,
    },
};

fn upload(name: &str, content: Vec<u8>) -> UploadedFile {
    UploadedFile::new(name.to_string(), Bytes::from(content))
}

#[test]
fn test_config_from_env() {
    env::set_var("SERVER_HOST", "0.0.0.0");
    env::set_var("SERVER_PORT", "8081");
    env::set_var("UPLOAD_DIR", "converted");
    env::set_var("MAX_FILE_SIZE_MB", "not-a-number");

    let config = Config::from_env().unwrap();
    assert_eq!(config.server_host, "0.0.0.0");
    assert_eq!(config.server_port, 8081);
    assert_eq!(config.upload_dir, std::path::PathBuf::from("converted"));
    // Unparsable values fall back to the default
    assert_eq!(config.max_file_size_mb, 16);
    assert_eq!(config.bind_address(), "0.0.0.0:8081");

    env::remove_var("SERVER_HOST");
    env::remove_var("SERVER_PORT");
    env::remove_var("UPLOAD_DIR");
    env::remove_var("MAX_FILE_SIZE_MB");
}

#[test]
fn test_config_defaults_and_validation() {
    let config = Config::default();
    assert_eq!(config.bind_address(), "127.0.0.1:5000");
    assert_eq!(config.max_file_size_bytes(), 16 * 1024 * 1024);
    assert!(config.validate().is_ok());

    let mut invalid = Config::default();
    invalid.max_file_size_mb = 0;
    assert!(invalid.validate().is_err());

    let mut invalid = Config::default();
    invalid.upload_dir = std::path::PathBuf::new();
    assert!(invalid.validate().is_err());
}

#[test]
fn test_config_rejects_size_limit_overflow() {
    let mut config = Config::default();
    config.max_file_size_mb = usize::MAX;
    assert!(config.validate().is_err());
    assert_eq!(config.max_file_size_bytes(), usize::MAX);

    config.max_file_size_mb = usize::MAX / (1024 * 1024);
    assert!(config.validate().is_ok());
}

#[test]
fn test_error_status_codes() {
    assert_eq!(AppError::MissingFile.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(AppError::EmptyFilename.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(
        AppError::UnsupportedExtension { extension: "exe".to_string() }.status_code(),
        StatusCode::BAD_REQUEST
    );
    assert_eq!(AppError::not_found("x.txt").status_code(), StatusCode::NOT_FOUND);
    assert_eq!(AppError::extraction("bad zip").status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(AppError::FileTooLarge { limit: 16 }.status_code(), StatusCode::PAYLOAD_TOO_LARGE);

    assert!(AppError::MissingFile.is_validation());
    assert!(AppError::FileTooLarge { limit: 16 }.is_validation());
    assert!(AppError::not_found("x.txt").is_validation());
    assert!(!AppError::extraction("bad zip").is_validation());
    assert!(!AppError::internal("join failed").is_validation());
    let io_error = std::io::Error::new(std::io::ErrorKind::Other, "disk full");
    assert!(!AppError::from(io_error).is_validation());
}

#[test]
fn test_error_messages() {
    assert_eq!(AppError::MissingFile.to_string(), "No file provided");
    assert_eq!(AppError::EmptyFilename.to_string(), "No file provided");
    assert_eq!(
        AppError::UnsupportedExtension { extension: "exe".to_string() }.to_string(),
        "Only .docx and .pdf allowed"
    );
    // Internal failures surface the raw error text
    assert_eq!(AppError::extraction("invalid Zip archive").to_string(), "invalid Zip archive");
    assert_eq!(AppError::MissingFile.error_code(), "MISSING_FILE");
    assert_eq!(AppError::extraction("x").error_code(), "EXTRACTION_ERROR");
}

#[test]
fn test_error_conversions() {
    let io_error = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "Permission denied");
    let app_error: AppError = io_error.into();
    assert_eq!(app_error.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(app_error.to_string(), "Permission denied");

    let anyhow_error = anyhow::anyhow!("Test error");
    let app_error: AppError = anyhow_error.into();
    match app_error {
        AppError::Internal { message } => assert_eq!(message, "Test error"),
        _ => panic!("Expected Internal error"),
    }
}

#[test]
fn test_response_bodies() {
    let response = serde_json::to_value(UploadResponse::new("report.txt".to_string())).unwrap();
    assert_eq!(response["ok"], true);
    assert_eq!(response["filename"], "report.txt");
    assert_eq!(response["download_url"], "/api/files/report.txt");
    assert_eq!(response["message"], CONVERTED_MESSAGE);

    let error = serde_json::to_value(ErrorResponse::new("No file provided")).unwrap();
    assert_eq!(error, serde_json::json!({"ok": false, "message": "No file provided"}));

    assert_eq!(download_url("report (1).txt"), "/api/files/report (1).txt");
}

#[test]
fn test_extension_parsing() {
    assert_eq!(upload("report.DOCX", vec![]).extension(), "docx");
    assert_eq!(upload("archive.tar.PDF", vec![]).extension(), "pdf");
    assert_eq!(upload("README", vec![]).extension(), "");
    assert_eq!(upload("trailing.", vec![]).extension(), "");
}

#[test]
fn test_validate_upload() {
    assert_eq!(validate_upload(&upload("report.docx", vec![])).unwrap(), DocumentKind::Docx);
    assert_eq!(validate_upload(&upload("Scan.Pdf", vec![])).unwrap(), DocumentKind::Pdf);

    assert!(matches!(validate_upload(&upload("", vec![])), Err(AppError::EmptyFilename)));
    assert!(matches!(
        validate_upload(&upload("notes.exe", vec![])),
        Err(AppError::UnsupportedExtension { .. })
    ));
    assert!(matches!(
        validate_upload(&upload("docx", vec![])),
        Err(AppError::UnsupportedExtension { .. })
    ));
}

#[test]
fn test_unique_name() {
    assert_eq!(unique_name("report", Some("txt"), 0), "report.txt");
    assert_eq!(unique_name("report", Some("txt"), 3), "report (3).txt");
}

#[test]
fn test_join_units() {
    let joined = join_units(vec!["Hello".to_string(), String::new(), "World".to_string()]);
    assert_eq!(joined, "Hello\n\n\n\nWorld");
    assert_eq!(join_units(Vec::<String>::new()), "");
}

#[test]
fn test_docx_paragraphs() {
    let bytes = common::docx_bytes(&["Hello", "", "World"]);
    let paragraphs = DocxExtractor::paragraphs(Cursor::new(bytes)).unwrap();
    assert_eq!(paragraphs, vec!["Hello", "", "World"]);
}

#[test]
fn test_docx_extractor_rejects_garbage() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.docx");
    std::fs::write(&path, b"definitely not a zip archive").unwrap();

    let err = DocxExtractor.extract(&path).unwrap_err();
    assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[test]
fn test_pdf_extractor_pages() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("pages.pdf");
    std::fs::write(&path, common::pdf_bytes(&["First page", "", "Third page"])).unwrap();

    let text = PdfExtractor.extract(&path).unwrap();
    let pages: Vec<&str> = text.split("\n\n").collect();
    assert_eq!(pages.len(), 3);
    assert!(pages[0].contains("First page"));
    assert_eq!(pages[1], "");
    assert!(pages[2].contains("Third page"));
}

#[test]
fn test_pdf_extractor_rejects_garbage() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.pdf");
    std::fs::write(&path, b"%PDF-1.5 truncated").unwrap();

    assert!(PdfExtractor.extract(&path).is_err());
}

#[tokio::test]
async fn test_convert_upload_removes_original() {
    let dir = tempfile::tempdir().unwrap();
    let storage = Storage::open(dir.path()).await.unwrap();

    let file = upload("report.docx", common::docx_bytes(&["Hello", "World"]));
    let output = convert_upload(&storage, &file, DocumentKind::Docx).await.unwrap();

    assert_eq!(output.file_name().unwrap(), "report.txt");
    assert_eq!(std::fs::read_to_string(&output).unwrap(), "Hello\n\nWorld");
    assert!(!dir.path().join("report.docx").exists());
}

#[tokio::test]
async fn test_failed_conversion_leaves_no_files() {
    let dir = tempfile::tempdir().unwrap();
    let storage = Storage::open(dir.path()).await.unwrap();

    let file = upload("broken.pdf", b"not a pdf".to_vec());
    let err = convert_upload(&storage, &file, DocumentKind::Pdf).await.unwrap_err();

    assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
}
