//! Aadhaar (identity card) field rules.

use super::patterns::*;
use super::{FieldRule, Normalize, Rule};
use crate::models::config::ExtractionConfig;

/// Names must be longer than 3 and shorter than 50 characters.
const NAME_MIN_CHARS: usize = 3;
const NAME_MAX_CHARS: usize = 50;
const FATHER_NAME_MIN_CHARS: usize = 3;
const ADDRESS_MIN_CHARS: usize = 10;

/// Field rules for Aadhaar cards.
pub fn aadhaar_rules(config: &ExtractionConfig) -> Vec<FieldRule> {
    let name = Normalize::between(NAME_MIN_CHARS, NAME_MAX_CHARS);
    let address = Normalize::Collapse {
        min_chars: ADDRESS_MIN_CHARS,
        truncate: config.address_max_chars,
    };
    let father = Normalize::longer_than(FATHER_NAME_MIN_CHARS);

    vec![
        FieldRule::first_match(
            "aadhaar_number",
            vec![Rule::new(&AADHAAR_NUMBER, Normalize::StripSpaces)],
        ),
        FieldRule::first_match(
            "full_name",
            vec![
                Rule::new(&NAME_LABELED, name.clone()),
                Rule::new(&NAME_CAPITALIZED_LINE, name),
            ],
        ),
        FieldRule::first_match(
            "date_of_birth",
            vec![Rule::verbatim(&DOB_LABELED), Rule::verbatim(&DATE_BARE)],
        ),
        FieldRule::first_match(
            "gender",
            vec![
                Rule::new(&GENDER_LABELED, Normalize::Gender),
                Rule::new(&GENDER_BARE, Normalize::Gender),
            ],
        ),
        FieldRule::first_match(
            "address",
            vec![
                Rule::new(&ADDRESS_LABELED, address.clone()),
                Rule::new(&ADDRESS_RELATION, address),
            ],
        ),
        FieldRule::prefer_prefix(
            "pincode",
            &PINCODE,
            config.preferred_pincode_prefixes.clone(),
        ),
        FieldRule::first_match(
            "father_name",
            vec![
                Rule::new(&FATHER_SON_OF, father.clone()),
                Rule::new(&FATHER_LABELED, father),
            ],
        ),
    ]
}
