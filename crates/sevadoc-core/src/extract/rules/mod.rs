//! Rule tables for document field extraction.
//!
//! Every field is an ordered list of (pattern, normalizer) pairs. The first
//! pair whose pattern matches and whose normalizer accepts the capture wins;
//! a rejected capture falls through to the next pair.

pub mod identity;
pub mod patterns;
pub mod property;
pub mod tax;
pub mod utility;

pub use identity::aadhaar_rules;
pub use property::property_rules;
pub use tax::pan_rules;
pub use utility::{electricity_rules, gas_rules};

use regex::Regex;

use crate::models::config::ExtractionConfig;
use crate::models::document::{DocumentType, ExtractedFields};

use patterns::WHITESPACE_RUN;

/// Trait for field extractors.
pub trait FieldExtractor {
    /// The type of value this extractor produces.
    type Output;

    /// Extract the field from text.
    fn extract(&self, text: &str) -> Option<Self::Output>;
}

/// How a captured value is cleaned up and accepted.
///
/// Length bounds count characters and are exclusive.
#[derive(Debug, Clone, PartialEq)]
pub enum Normalize {
    /// Use the capture as is.
    Verbatim,
    /// Remove space characters (grouped identity numbers).
    StripSpaces,
    /// Trim surrounding whitespace and check the length.
    Trim {
        min_chars: usize,
        max_chars: Option<usize>,
    },
    /// Map English/Devanagari gender words to `Male` / `Female`.
    Gender,
    /// Collapse whitespace runs, check the length, then truncate.
    Collapse { min_chars: usize, truncate: usize },
}

impl Normalize {
    /// Trimmed value strictly longer than `min_chars`.
    pub fn longer_than(min_chars: usize) -> Self {
        Normalize::Trim {
            min_chars,
            max_chars: None,
        }
    }

    /// Trimmed value strictly between `min_chars` and `max_chars`.
    pub fn between(min_chars: usize, max_chars: usize) -> Self {
        Normalize::Trim {
            min_chars,
            max_chars: Some(max_chars),
        }
    }

    /// Apply to a captured value; `None` rejects it.
    pub fn apply(&self, raw: &str) -> Option<String> {
        match self {
            Normalize::Verbatim => Some(raw.to_string()),
            Normalize::StripSpaces => Some(raw.replace(' ', "")),
            Normalize::Trim {
                min_chars,
                max_chars,
            } => {
                let value = raw.trim();
                let len = value.chars().count();
                let within_max = max_chars.is_none_or(|max| len < max);
                (len > *min_chars && within_max).then(|| value.to_string())
            }
            Normalize::Gender => match raw.trim().to_lowercase().as_str() {
                "male" | "पुरुष" => Some("Male".to_string()),
                "female" | "महिला" => Some("Female".to_string()),
                _ => None,
            },
            Normalize::Collapse {
                min_chars,
                truncate,
            } => {
                let value = WHITESPACE_RUN.replace_all(raw.trim(), " ");
                if value.chars().count() > *min_chars {
                    Some(value.chars().take(*truncate).collect())
                } else {
                    None
                }
            }
        }
    }
}

/// One (pattern, normalizer) pair.
#[derive(Debug, Clone)]
pub struct Rule {
    pub pattern: &'static Regex,
    pub normalize: Normalize,
}

impl Rule {
    pub fn new(pattern: &'static Regex, normalize: Normalize) -> Self {
        Self { pattern, normalize }
    }

    /// Rule that takes the capture verbatim.
    pub fn verbatim(pattern: &'static Regex) -> Self {
        Self::new(pattern, Normalize::Verbatim)
    }

    /// Apply to the first match of the pattern in the text.
    ///
    /// Capture group 1 is used when the pattern has one, the whole match
    /// otherwise.
    pub fn apply(&self, text: &str) -> Option<String> {
        let caps = self.pattern.captures(text)?;
        let matched = caps.get(1).or_else(|| caps.get(0))?;
        self.normalize.apply(matched.as_str())
    }
}

/// Selection strategy for one field.
#[derive(Debug, Clone)]
pub enum Strategy {
    /// Ordered rules, first accepted value wins.
    FirstMatch(Vec<Rule>),
    /// All matches of the pattern; the first starting with one of the
    /// prefixes wins, otherwise the last match.
    PreferPrefix {
        pattern: &'static Regex,
        prefixes: Vec<String>,
    },
}

/// Extraction rule for a single named field.
#[derive(Debug, Clone)]
pub struct FieldRule {
    pub field: &'static str,
    pub strategy: Strategy,
}

impl FieldRule {
    pub fn first_match(field: &'static str, rules: Vec<Rule>) -> Self {
        Self {
            field,
            strategy: Strategy::FirstMatch(rules),
        }
    }

    pub fn prefer_prefix(field: &'static str, pattern: &'static Regex, prefixes: Vec<String>) -> Self {
        Self {
            field,
            strategy: Strategy::PreferPrefix { pattern, prefixes },
        }
    }
}

fn capture_all(pattern: &Regex, text: &str) -> Vec<String> {
    pattern
        .captures_iter(text)
        .filter_map(|caps| caps.get(1).or_else(|| caps.get(0)))
        .map(|m| m.as_str().to_string())
        .collect()
}

impl FieldExtractor for FieldRule {
    type Output = String;

    fn extract(&self, text: &str) -> Option<String> {
        match &self.strategy {
            Strategy::FirstMatch(rules) => rules.iter().find_map(|rule| rule.apply(text)),
            Strategy::PreferPrefix { pattern, prefixes } => {
                let matches = capture_all(pattern, text);
                matches
                    .iter()
                    .find(|m| prefixes.iter().any(|p| m.starts_with(p.as_str())))
                    .or_else(|| matches.last())
                    .cloned()
            }
        }
    }
}

/// All field rules for one document type.
#[derive(Debug, Clone)]
pub struct RuleSet {
    pub document_type: DocumentType,
    pub fields: Vec<FieldRule>,
}

impl RuleSet {
    /// Build the rule set for a document type.
    pub fn for_document(document_type: DocumentType, config: &ExtractionConfig) -> Self {
        let fields = match document_type {
            DocumentType::Aadhaar => aadhaar_rules(config),
            DocumentType::Pan => pan_rules(),
            DocumentType::ElectricityBill => electricity_rules(),
            DocumentType::GasBill => gas_rules(),
            DocumentType::PropertyDoc => property_rules(),
        };

        Self {
            document_type,
            fields,
        }
    }

    /// Run every field rule; fields that do not match are simply absent.
    pub fn extract(&self, text: &str) -> ExtractedFields {
        let mut fields = ExtractedFields::new();
        for rule in &self.fields {
            if let Some(value) = rule.extract(text) {
                fields.insert(rule.field, value);
            }
        }
        fields
    }
}
