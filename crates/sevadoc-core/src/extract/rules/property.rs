//! Property document field rules.

use super::patterns::*;
use super::{FieldRule, Rule};

/// Field rules for property and land records.
pub fn property_rules() -> Vec<FieldRule> {
    vec![
        FieldRule::first_match(
            "survey_number",
            vec![
                Rule::verbatim(&SURVEY_NO),
                Rule::verbatim(&SURVEY_NO_DEVANAGARI),
            ],
        ),
        FieldRule::first_match("property_id", vec![Rule::verbatim(&PROPERTY_ID)]),
        FieldRule::first_match("khata_number", vec![Rule::verbatim(&KHATA_NO)]),
    ]
}

#[cfg(test)]
mod tests {
    use crate::extract::rules::RuleSet;
    use crate::models::config::ExtractionConfig;
    use crate::models::document::{DocumentType, ExtractedFields};
    use pretty_assertions::assert_eq;

    fn extract(text: &str) -> ExtractedFields {
        RuleSet::for_document(DocumentType::PropertyDoc, &ExtractionConfig::default())
            .extract(text)
    }

    #[test]
    fn test_property_record() {
        let text = "VILLAGE FORM 7/12\nSurvey No: 145/2-A\nProperty ID: AMC-99812\nKhata No. 2231/B\n";
        let fields = extract(text);

        assert_eq!(fields.get("survey_number"), Some("145/2-A"));
        assert_eq!(fields.get("property_id"), Some("AMC-99812"));
        assert_eq!(fields.get("khata_number"), Some("2231/B"));
    }

    #[test]
    fn test_devanagari_survey_label() {
        let fields = extract("सर्वे नं. 88/4\n");
        assert_eq!(fields.get("survey_number"), Some("88/4"));
        assert_eq!(fields.len(), 1);
    }
}
