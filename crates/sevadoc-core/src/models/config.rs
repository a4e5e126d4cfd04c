//! Configuration structures for the OCR and extraction pipeline.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Result, SevadocError};
use crate::ocr::Script;

/// Main configuration for the sevadoc pipeline.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SevadocConfig {
    /// OCR configuration.
    pub ocr: OcrConfig,

    /// Field extraction configuration.
    pub extraction: ExtractionConfig,

    /// Model configuration.
    pub models: ModelConfig,
}

/// OCR engine configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OcrConfig {
    /// Scripts to recognize; each one runs its own recognition model.
    pub scripts: Vec<Script>,

    /// Maximum image dimension (longer side) for processing.
    pub max_image_size: u32,

    /// Keep `[UNK]` tokens emitted by the recognizer instead of blanking them.
    pub keep_unk: bool,

    /// Overlap above which boxes read by different scripts are the same region.
    pub merge_iou_threshold: f32,
}

impl Default for OcrConfig {
    fn default() -> Self {
        Self {
            scripts: vec![Script::Latin, Script::Devanagari],
            max_image_size: 2048,
            keep_unk: false,
            merge_iou_threshold: 0.5,
        }
    }
}

/// Field extraction configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Two-digit pincode prefixes of the target region, preferred over
    /// other 6-digit numbers.
    pub preferred_pincode_prefixes: Vec<String>,

    /// Addresses are truncated to this many characters.
    pub address_max_chars: usize,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            preferred_pincode_prefixes: ["36", "37", "38", "39"]
                .iter()
                .map(|p| p.to_string())
                .collect(),
            address_max_chars: 200,
        }
    }
}

/// Recognition model and character dictionary for one script.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecognitionModel {
    /// Recognition model file name.
    pub recognition_model: String,

    /// Character dictionary file name.
    pub dictionary: String,
}

impl RecognitionModel {
    fn new(recognition_model: &str, dictionary: &str) -> Self {
        Self {
            recognition_model: recognition_model.to_string(),
            dictionary: dictionary.to_string(),
        }
    }
}

/// Model file locations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    /// Directory containing model files.
    pub model_dir: PathBuf,

    /// Text detection model file name, shared by all scripts.
    pub detection_model: String,

    /// Latin script recognizer.
    pub latin: RecognitionModel,

    /// Devanagari script recognizer.
    pub devanagari: RecognitionModel,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            model_dir: PathBuf::from("models"),
            detection_model: "det.onnx".to_string(),
            latin: RecognitionModel::new("latin_rec.onnx", "latin_dict.txt"),
            devanagari: RecognitionModel::new("devanagari_rec.onnx", "devanagari_dict.txt"),
        }
    }
}

impl ModelConfig {
    /// Recognizer files configured for a script.
    pub fn recognition(&self, script: Script) -> &RecognitionModel {
        match script {
            Script::Latin => &self.latin,
            Script::Devanagari => &self.devanagari,
        }
    }
}

impl SevadocConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| SevadocError::Config(format!("{}: {}", path.display(), e)))
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Get full path to a model file.
    pub fn model_path(&self, model_name: &str) -> PathBuf {
        self.models.model_dir.join(model_name)
    }

    /// Full paths of the recognition model and dictionary for a script.
    pub fn recognition_paths(&self, script: Script) -> (PathBuf, PathBuf) {
        let model = self.models.recognition(script);
        (
            self.model_path(&model.recognition_model),
            self.model_path(&model.dictionary),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_defaults() {
        let config = SevadocConfig::default();
        assert_eq!(config.ocr.scripts, vec![Script::Latin, Script::Devanagari]);
        assert_eq!(
            config.extraction.preferred_pincode_prefixes,
            vec!["36", "37", "38", "39"]
        );
        assert_eq!(config.extraction.address_max_chars, 200);
        assert_eq!(
            config.recognition_paths(Script::Devanagari),
            (
                PathBuf::from("models/devanagari_rec.onnx"),
                PathBuf::from("models/devanagari_dict.txt")
            )
        );
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let json = r#"{ "extraction": { "preferred_pincode_prefixes": ["11"] } }"#;
        let config: SevadocConfig = serde_json::from_str(json).unwrap();

        assert_eq!(config.extraction.preferred_pincode_prefixes, vec!["11"]);
        assert_eq!(config.extraction.address_max_chars, 200);
        assert_eq!(config.ocr, OcrConfig::default());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        let mut config = SevadocConfig::default();
        config.ocr.scripts = vec![Script::Devanagari];
        config.models.model_dir = PathBuf::from("/opt/sevadoc/models");
        config.save(&path).unwrap();

        let loaded = SevadocConfig::from_file(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_invalid_file_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{ not json").unwrap();

        let err = SevadocConfig::from_file(&path).unwrap_err();
        assert!(matches!(err, SevadocError::Config(_)));
    }
}
