//! Electricity and gas bill field rules.

use super::patterns::*;
use super::{FieldRule, Rule};

/// Field rules for electricity bills.
pub fn electricity_rules() -> Vec<FieldRule> {
    vec![
        FieldRule::first_match(
            "service_number",
            vec![
                Rule::verbatim(&SERVICE_NO),
                Rule::verbatim(&CONSUMER_NO),
                Rule::verbatim(&ACCOUNT_NO),
                Rule::verbatim(&CONTRACT_ACCOUNT),
            ],
        ),
        FieldRule::first_match("t_no", vec![Rule::verbatim(&T_NO), Rule::verbatim(&TARIFF_NO)]),
        FieldRule::first_match("meter_number", vec![Rule::verbatim(&METER_NO)]),
    ]
}

/// Field rules for gas bills.
pub fn gas_rules() -> Vec<FieldRule> {
    vec![
        FieldRule::first_match(
            "consumer_number",
            vec![
                Rule::verbatim(&CONSUMER_NO),
                Rule::verbatim(&CA_NO),
                Rule::verbatim(&CUSTOMER_ID),
            ],
        ),
        FieldRule::first_match("bp_number", vec![Rule::verbatim(&BP_NO)]),
    ]
}

#[cfg(test)]
mod tests {
    use crate::extract::rules::RuleSet;
    use crate::models::config::ExtractionConfig;
    use crate::models::document::{DocumentType, ExtractedFields};
    use pretty_assertions::assert_eq;

    fn extract(doc_type: DocumentType, text: &str) -> ExtractedFields {
        RuleSet::for_document(doc_type, &ExtractionConfig::default()).extract(text)
    }

    #[test]
    fn test_electricity_bill() {
        let text = "TORRENT POWER LIMITED\n\
                    Service No: 1200456789\n\
                    T No: LT-12A\n\
                    Meter No. GJ04521\n\
                    Amount Payable 1,240.00";

        let fields = extract(DocumentType::ElectricityBill, text);

        assert_eq!(fields.get("service_number"), Some("1200456789"));
        assert_eq!(fields.get("t_no"), Some("LT-12A"));
        assert_eq!(fields.get("meter_number"), Some("GJ04521"));
    }

    #[test]
    fn test_service_number_label_order() {
        // Consumer No is only consulted when Service No is absent
        let text = "Consumer No: 555\nService No: 777";
        assert_eq!(
            extract(DocumentType::ElectricityBill, text).get("service_number"),
            Some("777")
        );

        let text = "Contract Account: 9001";
        assert_eq!(
            extract(DocumentType::ElectricityBill, text).get("service_number"),
            Some("9001")
        );
    }

    #[test]
    fn test_tariff_number() {
        let fields = extract(DocumentType::ElectricityBill, "Tariff No: RGP-1");
        assert_eq!(fields.get("t_no"), Some("RGP-1"));
    }

    #[test]
    fn test_gas_bill() {
        let text = "Adani Total Gas Ltd\nCA No. 600123456\nBP No: 1100223344\n";
        let fields = extract(DocumentType::GasBill, text);

        assert_eq!(fields.get("consumer_number"), Some("600123456"));
        assert_eq!(fields.get("bp_number"), Some("1100223344"));
    }

    #[test]
    fn test_gas_customer_id() {
        let fields = extract(DocumentType::GasBill, "customer id 778899");
        assert_eq!(fields.get("consumer_number"), Some("778899"));
        assert!(!fields.contains("bp_number"));
    }
}
