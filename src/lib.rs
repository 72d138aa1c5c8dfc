//! txtify document conversion service
//!
//! Accepts .docx and .pdf uploads, extracts their plain text into a flat
//! storage directory and serves the resulting .txt files for download.

pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod services;

pub use config::Config;
pub use error::{AppError, AppResult};
