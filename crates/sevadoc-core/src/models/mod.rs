//! Data models and configuration.

pub mod config;
pub mod document;

pub use config::{ExtractionConfig, ModelConfig, OcrConfig, RecognitionModel, SevadocConfig};
pub use document::{DocumentType, ExtractedFields};
