//! Pure Rust OCR engine wrapper using `pure-onnx-ocr`.
//!
//! One detection model is shared by every script; each script gets its own
//! recognition model and dictionary. The per-script readings of the same
//! image are merged box by box.

use std::time::Instant;

use image::{DynamicImage, GenericImageView};
use tracing::{debug, info, warn};

use crate::error::OcrError;
use crate::models::config::{OcrConfig, SevadocConfig};

use super::{merge_script_boxes, OcrResult, Script, TextBox, TextRecognizer};

/// OCR engine backed by `pure-onnx-ocr` (pure Rust, no external ONNX Runtime).
pub struct PureOcrEngine {
    engines: Vec<(Script, pure_onnx_ocr::engine::OcrEngine)>,
    config: OcrConfig,
}

impl PureOcrEngine {
    /// Create an engine from the model files named in the configuration.
    pub fn from_config(config: &SevadocConfig) -> Result<Self, OcrError> {
        if config.ocr.scripts.is_empty() {
            return Err(OcrError::NoScripts);
        }

        let det_path = config.model_path(&config.models.detection_model);
        if !det_path.exists() {
            return Err(OcrError::ModelLoad(format!(
                "detection model not found: {}",
                det_path.display()
            )));
        }

        let mut engines = Vec::with_capacity(config.ocr.scripts.len());
        for &script in &config.ocr.scripts {
            let (rec_path, dict_path) = config.recognition_paths(script);
            for path in [&rec_path, &dict_path] {
                if !path.exists() {
                    return Err(OcrError::ModelLoad(format!(
                        "{} model file not found: {}",
                        script,
                        path.display()
                    )));
                }
            }

            let engine = pure_onnx_ocr::engine::OcrEngineBuilder::new()
                .det_model_path(&det_path)
                .rec_model_path(&rec_path)
                .dictionary_path(&dict_path)
                .build()
                .map_err(|e| OcrError::ModelLoad(format!("pure-onnx-ocr ({}): {}", script, e)))?;

            debug!("Loaded {} recognizer from {}", script, rec_path.display());
            engines.push((script, engine));
        }

        info!(
            "Loaded pure-onnx-ocr engine with {} script(s) from {}",
            engines.len(),
            config.models.model_dir.display()
        );

        Ok(Self {
            engines,
            config: config.ocr.clone(),
        })
    }

    fn run_script(
        &self,
        script: Script,
        engine: &pure_onnx_ocr::engine::OcrEngine,
        image: &DynamicImage,
    ) -> Result<Vec<TextBox>, OcrError> {
        let results = engine
            .run_from_image(image)
            .map_err(|e| OcrError::Recognition(format!("pure-onnx-ocr ({}): {}", script, e)))?;

        debug!("{} recognizer returned {} text regions", script, results.len());

        Ok(results
            .iter()
            .map(|r| {
                let text = if self.config.keep_unk {
                    r.text.clone()
                } else {
                    r.text.replace("[UNK]", " ")
                };
                TextBox {
                    bbox: polygon_to_bbox(&r.bounding_box),
                    text,
                    confidence: r.confidence,
                    script,
                }
            })
            .collect())
    }
}

impl TextRecognizer for PureOcrEngine {
    fn recognize(&self, image: &DynamicImage) -> Result<OcrResult, OcrError> {
        let start = Instant::now();
        let (width, height) = image.dimensions();

        info!("Processing image: {}x{}", width, height);

        let readings = self
            .engines
            .iter()
            .map(|(script, engine)| (*script, self.run_script(*script, engine, image)));
        let boxes = collect_script_boxes(readings)?;

        let merged = merge_script_boxes(boxes, self.config.merge_iou_threshold);
        let processing_time_ms = start.elapsed().as_millis() as u64;
        let result = OcrResult::from_boxes(merged, (width, height), processing_time_ms);

        info!(
            "OCR complete: {} text boxes in {}ms",
            result.boxes.len(),
            processing_time_ms
        );

        Ok(result)
    }
}

/// Gather the boxes of every script that recognized successfully.
///
/// A failing script is logged and skipped; the error surfaces only when no
/// script succeeded.
fn collect_script_boxes(
    readings: impl IntoIterator<Item = (Script, Result<Vec<TextBox>, OcrError>)>,
) -> Result<Vec<TextBox>, OcrError> {
    let mut boxes = Vec::new();
    let mut succeeded = false;
    let mut last_error = None;

    for (script, reading) in readings {
        match reading {
            Ok(script_boxes) => {
                succeeded = true;
                boxes.extend(script_boxes);
            }
            Err(e) => {
                warn!("{} recognizer failed, skipping: {}", script, e);
                last_error = Some(e);
            }
        }
    }

    match last_error {
        Some(e) if !succeeded => Err(e),
        _ => Ok(boxes),
    }
}

/// Load the native recognizer described by the configuration.
pub fn create_recognizer(config: &SevadocConfig) -> Result<PureOcrEngine, OcrError> {
    PureOcrEngine::from_config(config)
}

/// Convert a `Polygon<f64>` to our `[f32; 8]` bbox format.
///
/// Extracts the first 4 exterior points (quadrilateral) as
/// `[x1, y1, x2, y2, x3, y3, x4, y4]`.
fn polygon_to_bbox(polygon: &pure_onnx_ocr::Polygon<f64>) -> [f32; 8] {
    let mut bbox = [0.0f32; 8];
    for (i, coord) in polygon.exterior().coords().take(4).enumerate() {
        bbox[i * 2] = coord.x as f32;
        bbox[i * 2 + 1] = coord.y as f32;
    }
    bbox
}
