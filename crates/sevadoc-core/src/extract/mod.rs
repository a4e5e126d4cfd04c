//! Document field extraction module.

mod parser;
mod processor;
pub mod rules;

pub use parser::DocumentParser;
pub use processor::DocumentProcessor;

use std::collections::BTreeMap;

use serde::Serialize;

use crate::models::document::ExtractedFields;
use crate::ocr::OcrResult;

/// Message reported when no text could be recovered from an image.
pub const UNREADABLE_MESSAGE: &str = "Could not extract text from image";

/// What processing one document hands to the storage layer.
///
/// Every variant serializes to a flat JSON object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ProcessOutcome {
    /// Fields extracted by the document type's rule set.
    Fields(ExtractedFields),
    /// Unrecognized document type: the recognized text verbatim.
    RawText { raw_text: String },
    /// OCR produced no text.
    Unreadable { error: String },
}

impl ProcessOutcome {
    pub fn unreadable() -> Self {
        ProcessOutcome::Unreadable {
            error: UNREADABLE_MESSAGE.to_string(),
        }
    }

    pub fn is_unreadable(&self) -> bool {
        matches!(self, ProcessOutcome::Unreadable { .. })
    }

    /// Extracted fields, when a rule set ran.
    pub fn fields(&self) -> Option<&ExtractedFields> {
        match self {
            ProcessOutcome::Fields(fields) => Some(fields),
            _ => None,
        }
    }

    /// The outcome as the flat key/value map it serializes to.
    pub fn to_map(&self) -> BTreeMap<String, String> {
        match self {
            ProcessOutcome::Fields(fields) => fields.clone().into_inner(),
            ProcessOutcome::RawText { raw_text } => {
                BTreeMap::from([("raw_text".to_string(), raw_text.clone())])
            }
            ProcessOutcome::Unreadable { error } => {
                BTreeMap::from([("error".to_string(), error.clone())])
            }
        }
    }
}

/// Trait for document field extractors.
pub trait DocumentExtractor {
    /// Extract fields from an OCR result.
    fn extract(&self, ocr_result: &OcrResult, doc_type: &str) -> ProcessOutcome;

    /// Extract fields from plain text.
    fn extract_from_text(&self, text: &str, doc_type: &str) -> ProcessOutcome;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_serialization() {
        let mut fields = ExtractedFields::new();
        fields.insert("pan_number", "ABCDE1234F");

        assert_eq!(
            serde_json::to_string(&ProcessOutcome::Fields(fields)).unwrap(),
            r#"{"pan_number":"ABCDE1234F"}"#
        );
        assert_eq!(
            serde_json::to_string(&ProcessOutcome::RawText {
                raw_text: "hello".to_string()
            })
            .unwrap(),
            r#"{"raw_text":"hello"}"#
        );
        assert_eq!(
            serde_json::to_string(&ProcessOutcome::unreadable()).unwrap(),
            r#"{"error":"Could not extract text from image"}"#
        );
    }
}
