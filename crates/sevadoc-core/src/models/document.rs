//! Document types and the flat field map produced by extraction.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ExtractionError;

/// Kind of scanned document, selecting the extraction rule set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentType {
    /// Aadhaar identity card.
    Aadhaar,
    /// PAN tax-id card.
    Pan,
    /// Electricity bill.
    ElectricityBill,
    /// Piped gas bill.
    GasBill,
    /// Property / land record.
    PropertyDoc,
}

impl DocumentType {
    /// Every known document type.
    pub const ALL: [DocumentType; 5] = [
        DocumentType::Aadhaar,
        DocumentType::Pan,
        DocumentType::ElectricityBill,
        DocumentType::GasBill,
        DocumentType::PropertyDoc,
    ];

    /// Wire tag used in CLI arguments, configuration and JSON.
    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentType::Aadhaar => "aadhaar",
            DocumentType::Pan => "pan",
            DocumentType::ElectricityBill => "electricity_bill",
            DocumentType::GasBill => "gas_bill",
            DocumentType::PropertyDoc => "property_doc",
        }
    }

    /// Field names this document type can produce.
    pub fn fields(&self) -> &'static [&'static str] {
        match self {
            DocumentType::Aadhaar => &[
                "aadhaar_number",
                "full_name",
                "date_of_birth",
                "gender",
                "address",
                "pincode",
                "father_name",
            ],
            DocumentType::Pan => &["pan_number", "full_name", "father_name", "date_of_birth"],
            DocumentType::ElectricityBill => &["service_number", "t_no", "meter_number"],
            DocumentType::GasBill => &["consumer_number", "bp_number"],
            DocumentType::PropertyDoc => &["survey_number", "property_id", "khata_number"],
        }
    }
}

impl fmt::Display for DocumentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DocumentType {
    type Err = ExtractionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "aadhaar" => Ok(DocumentType::Aadhaar),
            "pan" => Ok(DocumentType::Pan),
            "electricity_bill" => Ok(DocumentType::ElectricityBill),
            "gas_bill" => Ok(DocumentType::GasBill),
            "property_doc" => Ok(DocumentType::PropertyDoc),
            _ => Err(ExtractionError::UnknownDocumentType(s.to_string())),
        }
    }
}

/// Field name to value mapping extracted from one document.
///
/// Keys are present only when a rule matched. Iteration order is sorted by
/// key, which keeps output stable without callers depending on it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExtractedFields(BTreeMap<String, String>);

impl ExtractedFields {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a field value, replacing any previous one.
    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<String>) {
        self.0.insert(field.into(), value.into());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_inner(self) -> BTreeMap<String, String> {
        self.0
    }
}

impl FromIterator<(String, String)> for ExtractedFields {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_type_parsing() {
        assert_eq!("aadhaar".parse::<DocumentType>(), Ok(DocumentType::Aadhaar));
        assert_eq!("pan".parse::<DocumentType>(), Ok(DocumentType::Pan));
        assert_eq!(
            "passport".parse::<DocumentType>(),
            Err(ExtractionError::UnknownDocumentType("passport".to_string()))
        );
    }

    #[test]
    fn test_document_type_tags_are_exact() {
        for tag in ["PAN", "Aadhaar", " pan", "electricity-bill", "identity_card", "property_document"] {
            assert_eq!(
                tag.parse::<DocumentType>(),
                Err(ExtractionError::UnknownDocumentType(tag.to_string())),
                "{tag:?} should not resolve"
            );
        }
    }

    #[test]
    fn test_document_type_tags_round_trip() {
        for doc_type in DocumentType::ALL {
            assert_eq!(doc_type.as_str().parse::<DocumentType>(), Ok(doc_type));
            let json = serde_json::to_string(&doc_type).unwrap();
            assert_eq!(json, format!("\"{}\"", doc_type.as_str()));
        }
    }

    #[test]
    fn test_extracted_fields_serialize_flat() {
        let mut fields = ExtractedFields::new();
        fields.insert("pincode", "380001");
        fields.insert("gender", "Female");

        let json = serde_json::to_string(&fields).unwrap();
        assert_eq!(json, r#"{"gender":"Female","pincode":"380001"}"#);
    }
}
