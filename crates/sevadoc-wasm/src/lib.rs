//! WASM bindings for citizen-document field extraction.
//!
//! Recognition runs on the JavaScript side; these bindings take the
//! recognized text (or text boxes) and apply the extraction rules.

use serde::Serialize;
use wasm_bindgen::prelude::*;

use sevadoc_core::models::config::ExtractionConfig;
use sevadoc_core::{DocumentParser, DocumentType, OcrResult, ProcessOutcome, Script, TextBox};

/// Initialize panic hook for better error messages in console.
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Version information.
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// Serialize an outcome as a plain JS object (not a `Map`).
fn to_js(outcome: &ProcessOutcome) -> Result<JsValue, JsValue> {
    outcome
        .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Extract fields from recognized text.
///
/// Unknown document types return `{ raw_text }`; empty text returns
/// `{ error }`.
#[wasm_bindgen]
pub fn extract_fields(text: &str, doc_type: &str) -> Result<JsValue, JsValue> {
    to_js(&DocumentParser::new().parse_tag(text, doc_type))
}

/// Known document type tags.
#[wasm_bindgen]
pub fn document_types() -> js_sys::Array {
    DocumentType::ALL
        .iter()
        .map(|t| JsValue::from_str(t.as_str()))
        .collect()
}

/// Field names a document type can produce.
#[wasm_bindgen]
pub fn fields_for(doc_type: &str) -> Result<js_sys::Array, JsValue> {
    let doc_type: DocumentType = doc_type
        .parse()
        .map_err(|e: sevadoc_core::ExtractionError| JsValue::from_str(&e.to_string()))?;

    Ok(doc_type
        .fields()
        .iter()
        .map(|f| JsValue::from_str(f))
        .collect())
}

/// Field extractor class for browser use.
#[wasm_bindgen]
pub struct FieldExtractor {
    config: ExtractionConfig,
    parser: DocumentParser,
}

#[wasm_bindgen]
impl FieldExtractor {
    /// Create a new field extractor.
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        let config = ExtractionConfig::default();
        Self {
            parser: DocumentParser::with_config(&config),
            config,
        }
    }

    /// Replace the preferred pincode prefixes (two-digit strings).
    #[wasm_bindgen]
    pub fn set_pincode_prefixes(&mut self, prefixes: Vec<String>) {
        self.config.preferred_pincode_prefixes = prefixes;
        self.parser = DocumentParser::with_config(&self.config);
    }

    /// Set the address truncation length.
    #[wasm_bindgen]
    pub fn set_address_max_chars(&mut self, max_chars: usize) {
        self.config.address_max_chars = max_chars;
        self.parser = DocumentParser::with_config(&self.config);
    }

    /// Extract fields from text.
    #[wasm_bindgen]
    pub fn extract(&self, text: &str, doc_type: &str) -> Result<JsValue, JsValue> {
        to_js(&self.parser.parse_tag(text, doc_type))
    }
}

impl Default for FieldExtractor {
    fn default() -> Self {
        Self::new()
    }
}

/// OCR result from browser-side processing.
#[wasm_bindgen]
pub struct OcrResultJs {
    boxes: Vec<TextBox>,
}

#[wasm_bindgen]
impl OcrResultJs {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self { boxes: Vec::new() }
    }

    /// Add a text box to the result. `script` is `"latin"` or `"devanagari"`.
    #[wasm_bindgen]
    #[allow(clippy::too_many_arguments)]
    pub fn add_box(
        &mut self,
        text: &str,
        script: &str,
        x1: f32, y1: f32,
        x2: f32, y2: f32,
        x3: f32, y3: f32,
        x4: f32, y4: f32,
        confidence: f32,
    ) {
        let script = if script.eq_ignore_ascii_case("devanagari") {
            Script::Devanagari
        } else {
            Script::Latin
        };

        self.boxes.push(TextBox {
            bbox: [x1, y1, x2, y2, x3, y3, x4, y4],
            text: text.to_string(),
            confidence,
            script,
        });
    }

    /// Full text with boxes in reading order.
    #[wasm_bindgen]
    pub fn get_text(&self) -> String {
        OcrResult::from_boxes(self.boxes.clone(), (0, 0), 0).text
    }

    /// Extract fields from this OCR result.
    #[wasm_bindgen]
    pub fn extract_fields(&self, doc_type: &str) -> Result<JsValue, JsValue> {
        extract_fields(&self.get_text(), doc_type)
    }
}

impl Default for OcrResultJs {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_document_types() {
        let types = document_types();
        assert_eq!(types.length(), 5);
        assert_eq!(types.get(0).as_string().as_deref(), Some("aadhaar"));
    }

    #[wasm_bindgen_test]
    fn test_fields_for() {
        let fields = fields_for("gas_bill").unwrap();
        assert_eq!(fields.length(), 2);
        assert!(fields_for("passport").is_err());
    }

    #[wasm_bindgen_test]
    fn test_extract_fields_object() {
        let value = extract_fields("PAN ABCDE1234F", "pan").unwrap();
        let pan = js_sys::Reflect::get(&value, &JsValue::from_str("pan_number")).unwrap();
        assert_eq!(pan.as_string().as_deref(), Some("ABCDE1234F"));
    }

    #[wasm_bindgen_test]
    fn test_custom_pincode_prefixes() {
        let mut extractor = FieldExtractor::new();
        extractor.set_pincode_prefixes(vec!["41".to_string()]);

        let value = extractor.extract("380015 411001", "aadhaar").unwrap();
        let pincode = js_sys::Reflect::get(&value, &JsValue::from_str("pincode")).unwrap();
        assert_eq!(pincode.as_string().as_deref(), Some("411001"));
    }

    #[wasm_bindgen_test]
    fn test_boxes_in_reading_order() {
        let mut result = OcrResultJs::new();
        result.add_box("Meter No. GJ04521", "latin", 0.0, 50.0, 90.0, 50.0, 90.0, 70.0, 0.0, 70.0, 0.9);
        result.add_box("Service No: 1200", "latin", 0.0, 0.0, 90.0, 0.0, 90.0, 20.0, 0.0, 20.0, 0.9);

        assert_eq!(result.get_text(), "Service No: 1200\nMeter No. GJ04521");
    }
}
