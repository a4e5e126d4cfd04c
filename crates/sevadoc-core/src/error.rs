//! Error types for the sevadoc-core library.

use thiserror::Error;

/// Main error type for the sevadoc library.
#[derive(Error, Debug)]
pub enum SevadocError {
    /// OCR processing error.
    #[error("OCR error: {0}")]
    Ocr(#[from] OcrError),

    /// Image processing error.
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors related to OCR processing.
#[derive(Error, Debug)]
pub enum OcrError {
    /// Failed to load OCR models.
    #[error("failed to load model: {0}")]
    ModelLoad(String),

    /// Text recognition failed.
    #[error("text recognition failed: {0}")]
    Recognition(String),

    /// Image bytes could not be decoded or have unusable dimensions.
    #[error("invalid image: {0}")]
    InvalidImage(String),

    /// No recognition script was configured.
    #[error("no recognition scripts configured")]
    NoScripts,
}

/// Errors related to document field extraction.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractionError {
    /// The document type tag is not one of the known types.
    #[error("unknown document type: {0}")]
    UnknownDocumentType(String),
}

/// Result type for the sevadoc library.
pub type Result<T> = std::result::Result<T, SevadocError>;
