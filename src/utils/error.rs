// src/utils/error.rs
use std::path::PathBuf;
use thiserror::Error;

// Define specific error types for different parts of the application
#[derive(Error, Debug)]
pub enum AcquireError {
    #[error("Network request failed: {0}")]
    Network(#[from] reqwest::Error), // Automatically convert reqwest errors

    #[error("HTTP error {status} for {url}")]
    Http { status: reqwest::StatusCode, url: String },

    #[error("Invalid element locator '{0}'")]
    InvalidSelector(String),

    #[error("No element matching '{0}' on the reports page")]
    LinkNotFound(String),

    #[error("Element matching '{0}' has no href attribute")]
    MissingHref(String),

    #[error("Could not resolve download URL: {0}")]
    InvalidUrl(String),

    #[error("I/O error while saving report: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("Document unreadable at {path}: {reason}")]
    DocumentUnreadable { path: PathBuf, reason: String },
}

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("Chart '{0}' has nothing to draw (all values are zero)")]
    EmptyChart(String),

    #[error("Invalid canvas size {0}x{1}")]
    Canvas(u32, u32),

    #[error("PNG encoding failed: {0}")]
    Encode(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error), // Automatically convert IO errors

    #[error("Extraction failed: {0}")]
    Extraction(#[from] ExtractError),

    #[error("Serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}
