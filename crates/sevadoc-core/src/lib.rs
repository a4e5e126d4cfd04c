//! Core library for citizen-document OCR processing.
//!
//! This crate provides:
//! - A recognizer boundary for Latin + Devanagari OCR (pure Rust ONNX engine)
//! - Rule tables extracting fields from Aadhaar, PAN, utility bill and
//!   property documents
//! - The fail-open document processor tying the two together

pub mod error;
pub mod extract;
pub mod models;
pub mod ocr;

pub use error::{ExtractionError, OcrError, Result, SevadocError};
pub use extract::{DocumentParser, DocumentProcessor, ProcessOutcome, UNREADABLE_MESSAGE};
pub use models::config::SevadocConfig;
pub use models::document::{DocumentType, ExtractedFields};
pub use ocr::{OcrResult, Script, TextBox, TextRecognizer};
#[cfg(feature = "native")]
pub use ocr::{create_recognizer, PureOcrEngine};
