//! Regex patterns for citizen-document field extraction.
//!
//! Labels accept English and Devanagari spellings. Labeled patterns are
//! case-insensitive; bare token shapes (identity and tax-id numbers) are not.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Aadhaar number: 12 digits, optionally grouped 4-4-4
    pub static ref AADHAAR_NUMBER: Regex = Regex::new(
        r"\b(\d{4}\s?\d{4}\s?\d{4})\b"
    ).unwrap();

    // Names
    pub static ref NAME_LABELED: Regex = Regex::new(
        r"(?im)(?:Name|नाम)[:\s]*([A-Za-z\s]+)"
    ).unwrap();

    pub static ref NAME_CAPITALIZED_LINE: Regex = Regex::new(
        r"(?m)^([A-Z][a-z]+[ \t]+[A-Z][a-z]+(?:[ \t]+[A-Z][a-z]+)?)"
    ).unwrap();

    pub static ref FATHER_SON_OF: Regex = Regex::new(
        r"(?i)(?:S/O|Son of|पुत्र)[:\s]*([A-Za-z\s]+)"
    ).unwrap();

    pub static ref FATHER_LABELED: Regex = Regex::new(
        r"(?i)(?:Father|पिता)[:\s]*([A-Za-z\s]+)"
    ).unwrap();

    // "Father's Name", "Father Name", "पिता"
    pub static ref FATHER_NAME_LABELED: Regex = Regex::new(
        r"(?i)(?:Father|पिता)['\s]*(?:s)?[:\s]*(?:Name)?[:\s]*([A-Za-z\s]+)"
    ).unwrap();

    // Dates (DD/MM/YYYY or DD-MM-YYYY)
    pub static ref DOB_LABELED: Regex = Regex::new(
        r"(?i)(?:DOB|Date of Birth|जन्म तिथि)[:\s]*(\d{2}[/-]\d{2}[/-]\d{4})"
    ).unwrap();

    pub static ref DATE_BARE: Regex = Regex::new(
        r"(\d{2}[/-]\d{2}[/-]\d{4})"
    ).unwrap();

    // Gender
    pub static ref GENDER_LABELED: Regex = Regex::new(
        r"(?i)(?:Gender|लिंग)[:\s]*(Male|Female|पुरुष|महिला)"
    ).unwrap();

    pub static ref GENDER_BARE: Regex = Regex::new(
        r"(?i)\b(Male|Female)\b"
    ).unwrap();

    // Address runs until a pincode, a blank line or the end of text
    pub static ref ADDRESS_LABELED: Regex = Regex::new(
        r"(?is)(?:Address|पता)[:\s]*(.+?)(?:\d{6}|\n\n|$)"
    ).unwrap();

    pub static ref ADDRESS_RELATION: Regex = Regex::new(
        r"(?is)(?:S/O|D/O|W/O|C/O)[:\s]*(.+?)(?:\d{6}|\n\n|$)"
    ).unwrap();

    // Pincode (6 digits)
    pub static ref PINCODE: Regex = Regex::new(
        r"\b(\d{6})\b"
    ).unwrap();

    // PAN: AAAAA9999A
    pub static ref PAN_NUMBER: Regex = Regex::new(
        r"\b([A-Z]{5}\d{4}[A-Z])\b"
    ).unwrap();

    // Electricity bill
    pub static ref SERVICE_NO: Regex = Regex::new(
        r"(?i)Service\s*No[.:\s]*(\d+)"
    ).unwrap();

    pub static ref CONSUMER_NO: Regex = Regex::new(
        r"(?i)Consumer\s*No[.:\s]*(\d+)"
    ).unwrap();

    pub static ref ACCOUNT_NO: Regex = Regex::new(
        r"(?i)Account\s*No[.:\s]*(\d+)"
    ).unwrap();

    pub static ref CONTRACT_ACCOUNT: Regex = Regex::new(
        r"(?i)Contract\s*Account[.:\s]*(\d+)"
    ).unwrap();

    pub static ref T_NO: Regex = Regex::new(
        r"(?i)T[-\s]*No[.:\s]*([A-Z0-9-]+)"
    ).unwrap();

    pub static ref TARIFF_NO: Regex = Regex::new(
        r"(?i)Tariff\s*No[.:\s]*([A-Z0-9-]+)"
    ).unwrap();

    pub static ref METER_NO: Regex = Regex::new(
        r"(?i)Meter\s*No[.:\s]*([A-Z0-9]+)"
    ).unwrap();

    // Gas bill
    pub static ref CA_NO: Regex = Regex::new(
        r"(?i)CA\s*No[.:\s]*(\d+)"
    ).unwrap();

    pub static ref CUSTOMER_ID: Regex = Regex::new(
        r"(?i)Customer\s*ID[.:\s]*(\d+)"
    ).unwrap();

    pub static ref BP_NO: Regex = Regex::new(
        r"(?i)BP\s*No[.:\s]*(\d+)"
    ).unwrap();

    // Property documents
    pub static ref SURVEY_NO: Regex = Regex::new(
        r"(?i)Survey\s*No[.:\s]*([A-Z0-9/-]+)"
    ).unwrap();

    pub static ref SURVEY_NO_DEVANAGARI: Regex = Regex::new(
        r"(?i)सर्वे\s*नं[.:\s]*([A-Z0-9/-]+)"
    ).unwrap();

    pub static ref PROPERTY_ID: Regex = Regex::new(
        r"(?i)Property\s*ID[.:\s]*([A-Z0-9-]+)"
    ).unwrap();

    pub static ref KHATA_NO: Regex = Regex::new(
        r"(?i)Khata\s*No[.:\s]*([A-Z0-9/-]+)"
    ).unwrap();

    pub static ref WHITESPACE_RUN: Regex = Regex::new(r"\s+").unwrap();
}
