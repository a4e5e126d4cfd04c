//! Image to fields pipeline: decode, recognize, extract.

use tracing::{debug, info, warn};

use crate::models::config::SevadocConfig;
use crate::models::document::DocumentType;
use crate::ocr::{ImagePreprocessor, OcrResult, TextRecognizer};

use super::{DocumentExtractor, DocumentParser, ProcessOutcome};

/// Runs a recognizer over document images and extracts their fields.
///
/// Decode and recognition failures never escape `process`; they degrade to
/// the unreadable outcome.
pub struct DocumentProcessor<R> {
    recognizer: R,
    preprocessor: ImagePreprocessor,
    parser: DocumentParser,
}

impl<R: TextRecognizer> DocumentProcessor<R> {
    /// Create a processor around a recognizer.
    pub fn new(recognizer: R, config: &SevadocConfig) -> Self {
        Self {
            recognizer,
            preprocessor: ImagePreprocessor::new().with_max_size(config.ocr.max_image_size),
            parser: DocumentParser::with_config(&config.extraction),
        }
    }

    /// Run OCR on image bytes.
    ///
    /// Undecodable images and recognizer errors are logged and reported as
    /// an empty result.
    pub fn recognize(&self, image_bytes: &[u8]) -> OcrResult {
        let image = match self.preprocessor.decode(image_bytes) {
            Ok(image) => image,
            Err(e) => {
                warn!("Could not decode image ({} bytes): {}", image_bytes.len(), e);
                return OcrResult::empty(0, 0);
            }
        };

        match self.recognizer.recognize(&image) {
            Ok(result) => result,
            Err(e) => {
                warn!("OCR failed: {}", e);
                OcrResult::empty(image.width(), image.height())
            }
        }
    }

    /// Recover all text from image bytes; empty on any failure.
    pub fn recover_text(&self, image_bytes: &[u8]) -> String {
        let text = self.recognize(image_bytes).text;
        debug!("Recovered {} characters of text", text.chars().count());
        text
    }

    /// Process one document image for the given document type tag.
    pub fn process(&self, image_bytes: &[u8], doc_type: &str) -> ProcessOutcome {
        info!("Processing {} document ({} bytes)", doc_type, image_bytes.len());

        let ocr_result = self.recognize(image_bytes);
        let outcome = self.parser.extract(&ocr_result, doc_type);

        if outcome.is_unreadable() {
            warn!("No text recovered from {} document", doc_type);
        }

        outcome
    }

    /// Process one document image for a known document type.
    pub fn process_as(&self, image_bytes: &[u8], doc_type: DocumentType) -> ProcessOutcome {
        self.process(image_bytes, doc_type.as_str())
    }

    /// Extract fields from already recognized text.
    pub fn process_text(&self, text: &str, doc_type: &str) -> ProcessOutcome {
        self.parser.extract_from_text(text, doc_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::OcrError;
    use crate::extract::UNREADABLE_MESSAGE;
    use crate::ocr::{Script, TextBox};
    use image::{DynamicImage, ImageFormat, RgbImage};
    use pretty_assertions::assert_eq;
    use std::io::Cursor;

    /// Recognizer returning fixed lines, one box per line.
    struct StubRecognizer {
        lines: Vec<&'static str>,
    }

    impl TextRecognizer for StubRecognizer {
        fn recognize(&self, image: &DynamicImage) -> Result<OcrResult, OcrError> {
            let boxes = self
                .lines
                .iter()
                .enumerate()
                .map(|(i, line)| {
                    let y = i as f32 * 40.0;
                    TextBox {
                        bbox: [0.0, y, 100.0, y, 100.0, y + 30.0, 0.0, y + 30.0],
                        text: line.to_string(),
                        confidence: 0.9,
                        script: Script::Latin,
                    }
                })
                .collect();
            Ok(OcrResult::from_boxes(
                boxes,
                (image.width(), image.height()),
                1,
            ))
        }
    }

    struct FailingRecognizer;

    impl TextRecognizer for FailingRecognizer {
        fn recognize(&self, _image: &DynamicImage) -> Result<OcrResult, OcrError> {
            Err(OcrError::Recognition("engine crashed".to_string()))
        }
    }

    fn png_bytes() -> Vec<u8> {
        let image = DynamicImage::ImageRgb8(RgbImage::new(64, 32));
        let mut bytes = Vec::new();
        image
            .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
            .unwrap();
        bytes
    }

    fn processor<R: TextRecognizer>(recognizer: R) -> DocumentProcessor<R> {
        DocumentProcessor::new(recognizer, &SevadocConfig::default())
    }

    #[test]
    fn test_process_pan_image() {
        let processor = processor(StubRecognizer {
            lines: vec!["INCOME TAX DEPARTMENT", "ABCDE1234F", "Name: RAHUL VERMA"],
        });

        let outcome = processor.process(&png_bytes(), "pan");
        let fields = outcome.fields().unwrap();

        assert_eq!(fields.get("pan_number"), Some("ABCDE1234F"));
        assert_eq!(fields.get("full_name"), Some("RAHUL VERMA"));
    }

    #[test]
    fn test_unknown_type_returns_raw_text() {
        let processor = processor(StubRecognizer {
            lines: vec!["Ration Card", "No 4455"],
        });

        assert_eq!(
            processor.process(&png_bytes(), "ration_card"),
            ProcessOutcome::RawText {
                raw_text: "Ration Card\nNo 4455".to_string()
            }
        );
    }

    #[test]
    fn test_blank_image_is_unreadable_for_every_type() {
        let processor = processor(StubRecognizer { lines: vec![] });

        for doc_type in DocumentType::ALL {
            assert_eq!(
                processor.process_as(&png_bytes(), doc_type),
                ProcessOutcome::Unreadable {
                    error: UNREADABLE_MESSAGE.to_string()
                }
            );
        }
        assert!(processor.process(&png_bytes(), "unknown").is_unreadable());
    }

    #[test]
    fn test_recognizer_failure_is_unreadable() {
        let processor = processor(FailingRecognizer);

        assert_eq!(processor.recover_text(&png_bytes()), "");
        assert!(processor.process(&png_bytes(), "aadhaar").is_unreadable());
    }

    #[test]
    fn test_undecodable_bytes_are_unreadable() {
        let processor = processor(StubRecognizer {
            lines: vec!["ABCDE1234F"],
        });

        assert!(processor.process(b"not an image", "pan").is_unreadable());
        assert!(processor.process(&[], "pan").is_unreadable());
    }

    #[test]
    fn test_process_is_idempotent() {
        let processor = processor(StubRecognizer {
            lines: vec!["Service No: 1200456789", "Meter No. GJ04521"],
        });
        let bytes = png_bytes();

        assert_eq!(
            processor.process(&bytes, "electricity_bill"),
            processor.process(&bytes, "electricity_bill")
        );
    }

    #[test]
    fn test_process_text() {
        let processor = processor(FailingRecognizer);
        let outcome = processor.process_text("BP No: 1100223344", "gas_bill");

        assert_eq!(
            outcome.fields().and_then(|f| f.get("bp_number")),
            Some("1100223344")
        );
    }
}
