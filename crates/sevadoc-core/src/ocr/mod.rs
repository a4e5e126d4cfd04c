//! OCR boundary: recognizer trait, recognized text boxes and script merging.

mod preprocessing;
#[cfg(feature = "native")]
mod pure_engine;

pub use preprocessing::ImagePreprocessor;
#[cfg(feature = "native")]
pub use pure_engine::{create_recognizer, PureOcrEngine};

use std::cmp::Ordering;
use std::fmt;

use image::DynamicImage;
use serde::{Deserialize, Serialize};

use crate::error::OcrError;

/// Writing system handled by a dedicated recognition model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Script {
    /// Latin (English) script.
    Latin,
    /// Devanagari (Hindi) script.
    Devanagari,
}

impl fmt::Display for Script {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Script::Latin => write!(f, "latin"),
            Script::Devanagari => write!(f, "devanagari"),
        }
    }
}

/// Anything that turns an image into recognized text.
///
/// Implementations may be slow and fallible; callers decide how to treat
/// failures. A processor built on a `Send + Sync` recognizer can be shared
/// across threads.
pub trait TextRecognizer {
    /// Recognize all text in the image.
    fn recognize(&self, image: &DynamicImage) -> Result<OcrResult, OcrError>;
}

impl<T: TextRecognizer + ?Sized> TextRecognizer for Box<T> {
    fn recognize(&self, image: &DynamicImage) -> Result<OcrResult, OcrError> {
        (**self).recognize(image)
    }
}

/// A detected text box with its coordinates and content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextBox {
    /// Bounding box coordinates (x1, y1, x2, y2, x3, y3, x4, y4) for quadrilateral.
    pub bbox: [f32; 8],

    /// Recognized text content.
    pub text: String,

    /// Recognition confidence score (0.0 - 1.0).
    pub confidence: f32,

    /// Script whose recognizer produced the text.
    pub script: Script,
}

impl TextBox {
    /// Get the axis-aligned bounding rectangle.
    pub fn rect(&self) -> (f32, f32, f32, f32) {
        let xs = [self.bbox[0], self.bbox[2], self.bbox[4], self.bbox[6]];
        let ys = [self.bbox[1], self.bbox[3], self.bbox[5], self.bbox[7]];

        let min_x = xs.iter().cloned().fold(f32::INFINITY, f32::min);
        let max_x = xs.iter().cloned().fold(f32::NEG_INFINITY, f32::max);
        let min_y = ys.iter().cloned().fold(f32::INFINITY, f32::min);
        let max_y = ys.iter().cloned().fold(f32::NEG_INFINITY, f32::max);

        (min_x, min_y, max_x, max_y)
    }

    /// Intersection over union of the two bounding rectangles.
    pub fn iou(&self, other: &TextBox) -> f32 {
        let (ax1, ay1, ax2, ay2) = self.rect();
        let (bx1, by1, bx2, by2) = other.rect();

        let inter_w = (ax2.min(bx2) - ax1.max(bx1)).max(0.0);
        let inter_h = (ay2.min(by2) - ay1.max(by1)).max(0.0);
        let intersection = inter_w * inter_h;

        let area_a = (ax2 - ax1) * (ay2 - ay1);
        let area_b = (bx2 - bx1) * (by2 - by1);
        let union = area_a + area_b - intersection;

        if union <= 0.0 {
            0.0
        } else {
            intersection / union
        }
    }
}

/// Result of OCR processing on an image.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OcrResult {
    /// Recognized text boxes in reading order.
    pub boxes: Vec<TextBox>,

    /// Full text (boxes joined with newlines).
    pub text: String,

    /// Processing time in milliseconds.
    pub processing_time_ms: u64,

    /// Image dimensions (width, height).
    pub image_size: (u32, u32),
}

impl OcrResult {
    /// Create an empty result.
    pub fn empty(width: u32, height: u32) -> Self {
        Self {
            boxes: Vec::new(),
            text: String::new(),
            processing_time_ms: 0,
            image_size: (width, height),
        }
    }

    /// Build a result from boxes, ordering them and joining their text.
    pub fn from_boxes(boxes: Vec<TextBox>, image_size: (u32, u32), processing_time_ms: u64) -> Self {
        let mut result = Self {
            boxes,
            text: String::new(),
            processing_time_ms,
            image_size,
        };
        result.sort_by_reading_order();
        result
    }

    /// Sort boxes by reading order (top-to-bottom, left-to-right).
    pub fn sort_by_reading_order(&mut self) {
        self.boxes.sort_by(|a, b| {
            let (ax, ay, _, _) = a.rect();
            let (bx, by, _, _) = b.rect();

            // Group by approximate vertical position (within 20 pixels)
            let row_a = (ay / 20.0) as i32;
            let row_b = (by / 20.0) as i32;

            if row_a != row_b {
                row_a.cmp(&row_b)
            } else {
                ax.partial_cmp(&bx).unwrap_or(Ordering::Equal)
            }
        });

        self.text = self
            .boxes
            .iter()
            .map(|b| b.text.as_str())
            .collect::<Vec<_>>()
            .join("\n");
    }
}

/// Merge boxes read by several script recognizers over the same image.
///
/// Boxes overlapping at or above `iou_threshold` are one region read twice;
/// the higher-confidence reading is kept. Boxes without text are dropped.
pub fn merge_script_boxes(boxes: Vec<TextBox>, iou_threshold: f32) -> Vec<TextBox> {
    let mut candidates: Vec<TextBox> = boxes
        .into_iter()
        .filter(|b| !b.text.trim().is_empty())
        .collect();
    candidates.sort_by(|a, b| b.confidence.partial_cmp(&a.confidence).unwrap_or(Ordering::Equal));

    let mut kept: Vec<TextBox> = Vec::with_capacity(candidates.len());
    for candidate in candidates {
        if kept.iter().all(|k| k.iou(&candidate) < iou_threshold) {
            kept.push(candidate);
        }
    }
    kept
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text_box(x: f32, y: f32, w: f32, h: f32, text: &str, confidence: f32, script: Script) -> TextBox {
        TextBox {
            bbox: [x, y, x + w, y, x + w, y + h, x, y + h],
            text: text.to_string(),
            confidence,
            script,
        }
    }

    #[test]
    fn test_iou() {
        let a = text_box(0.0, 0.0, 10.0, 10.0, "a", 0.9, Script::Latin);
        let b = text_box(5.0, 0.0, 10.0, 10.0, "b", 0.9, Script::Latin);
        let c = text_box(50.0, 50.0, 10.0, 10.0, "c", 0.9, Script::Latin);

        assert!((a.iou(&a) - 1.0).abs() < 1e-6);
        assert!((a.iou(&b) - 50.0 / 150.0).abs() < 1e-6);
        assert_eq!(a.iou(&c), 0.0);
    }

    #[test]
    fn test_merge_keeps_higher_confidence_reading() {
        let boxes = vec![
            text_box(0.0, 0.0, 100.0, 20.0, "abc", 0.41, Script::Latin),
            text_box(1.0, 0.0, 100.0, 20.0, "नाम", 0.93, Script::Devanagari),
            text_box(0.0, 40.0, 100.0, 20.0, "Name: Asha Patel", 0.88, Script::Latin),
            text_box(0.0, 40.0, 100.0, 20.0, "नमः", 0.30, Script::Devanagari),
        ];

        let merged = merge_script_boxes(boxes, 0.5);
        let result = OcrResult::from_boxes(merged, (200, 100), 5);

        assert_eq!(result.boxes.len(), 2);
        assert_eq!(result.text, "नाम\nName: Asha Patel");
        assert_eq!(result.boxes[0].script, Script::Devanagari);
    }

    #[test]
    fn test_merge_drops_blank_boxes() {
        let boxes = vec![
            text_box(0.0, 0.0, 10.0, 10.0, "  ", 0.99, Script::Latin),
            text_box(0.0, 0.0, 10.0, 10.0, "DOB", 0.50, Script::Latin),
        ];

        let merged = merge_script_boxes(boxes, 0.5);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].text, "DOB");
    }

    #[test]
    fn test_reading_order() {
        let boxes = vec![
            text_box(120.0, 2.0, 50.0, 10.0, "second", 0.9, Script::Latin),
            text_box(0.0, 45.0, 50.0, 10.0, "third", 0.9, Script::Latin),
            text_box(0.0, 0.0, 50.0, 10.0, "first", 0.9, Script::Latin),
        ];

        let result = OcrResult::from_boxes(boxes, (200, 100), 0);
        assert_eq!(result.text, "first\nsecond\nthird");
    }
}
