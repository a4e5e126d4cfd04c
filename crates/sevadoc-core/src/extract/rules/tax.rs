//! PAN (tax-id card) field rules.

use super::patterns::*;
use super::{FieldRule, Normalize, Rule};

/// Field rules for PAN cards.
///
/// PAN names carry no length bound beyond being non-empty.
pub fn pan_rules() -> Vec<FieldRule> {
    vec![
        FieldRule::first_match("pan_number", vec![Rule::verbatim(&PAN_NUMBER)]),
        FieldRule::first_match(
            "full_name",
            vec![Rule::new(&NAME_LABELED, Normalize::longer_than(0))],
        ),
        FieldRule::first_match(
            "father_name",
            vec![Rule::new(&FATHER_NAME_LABELED, Normalize::longer_than(0))],
        ),
        FieldRule::first_match("date_of_birth", vec![Rule::verbatim(&DATE_BARE)]),
    ]
}
