//! Dispatch of recognized text to the rule set of its document type.

use std::collections::HashMap;

use tracing::debug;

use crate::models::config::ExtractionConfig;
use crate::models::document::DocumentType;
use crate::ocr::OcrResult;

use super::rules::RuleSet;
use super::{DocumentExtractor, ProcessOutcome};

/// Rule-based field parser holding one rule set per document type.
#[derive(Debug, Clone)]
pub struct DocumentParser {
    rule_sets: HashMap<DocumentType, RuleSet>,
}

impl DocumentParser {
    /// Create a parser with default extraction settings.
    pub fn new() -> Self {
        Self::with_config(&ExtractionConfig::default())
    }

    /// Create a parser from extraction settings.
    pub fn with_config(config: &ExtractionConfig) -> Self {
        let rule_sets = DocumentType::ALL
            .iter()
            .map(|&doc_type| (doc_type, RuleSet::for_document(doc_type, config)))
            .collect();

        Self { rule_sets }
    }

    /// Parse recognized text. `None` selects the raw-text fallback.
    pub fn parse(&self, text: &str, doc_type: Option<DocumentType>) -> ProcessOutcome {
        if text.is_empty() {
            return ProcessOutcome::unreadable();
        }

        let Some(doc_type) = doc_type else {
            debug!("No rule set for document, returning raw text");
            return ProcessOutcome::RawText {
                raw_text: text.to_string(),
            };
        };

        match self.rule_sets.get(&doc_type) {
            Some(rules) => {
                let fields = rules.extract(text);
                debug!(
                    "Extracted {} of {} {} fields",
                    fields.len(),
                    rules.fields.len(),
                    doc_type
                );
                ProcessOutcome::Fields(fields)
            }
            None => ProcessOutcome::RawText {
                raw_text: text.to_string(),
            },
        }
    }

    /// Parse recognized text for a document type tag; unknown tags fall back
    /// to raw text.
    pub fn parse_tag(&self, text: &str, doc_type: &str) -> ProcessOutcome {
        self.parse(text, doc_type.parse().ok())
    }
}

impl Default for DocumentParser {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentExtractor for DocumentParser {
    fn extract(&self, ocr_result: &OcrResult, doc_type: &str) -> ProcessOutcome {
        self.parse_tag(&ocr_result.text, doc_type)
    }

    fn extract_from_text(&self, text: &str, doc_type: &str) -> ProcessOutcome {
        self.parse_tag(text, doc_type)
    }
}
