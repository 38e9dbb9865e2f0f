//! OCR Types
//!
//! Words returned by a text detector and the ways detection can fail.

use serde::{Deserialize, Serialize};

use crate::geometry::NormalizedBox;

/// Text detector backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OcrProvider {
    /// AWS Textract `DetectDocumentText`
    Textract,
    /// In-process detector (tests, fixtures)
    Static,
}

/// Single detected word
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectedWord {
    /// Word text
    pub text: String,
    /// Bounding box (normalized to the raster image)
    pub bounds: NormalizedBox,
    /// Confidence (0-100), when the detector reports one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f32>,
}

impl DetectedWord {
    pub fn new(text: impl Into<String>, bounds: NormalizedBox) -> Self {
        Self {
            text: text.into(),
            bounds,
            confidence: None,
        }
    }

    pub fn with_confidence(mut self, confidence: f32) -> Self {
        self.confidence = Some(confidence);
        self
    }
}

/// Detection failure
///
/// The variant alone decides what the pipeline does: a transient failure
/// skips the page, an authentication failure stops the whole run.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DetectError {
    /// Network, throttling, or service-side failure for this request
    #[error("detection failed: {cause}")]
    Transient { cause: String },

    /// Credentials missing, invalid, expired, or not authorized
    #[error("authentication failed: {cause}")]
    Authentication { cause: String },
}

impl DetectError {
    pub fn transient(cause: impl Into<String>) -> Self {
        Self::Transient {
            cause: cause.into(),
        }
    }

    pub fn authentication(cause: impl Into<String>) -> Self {
        Self::Authentication {
            cause: cause.into(),
        }
    }

    /// Whether the failure must abort the whole document
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::Authentication { .. })
    }

    pub fn cause(&self) -> &str {
        match self {
            Self::Transient { cause } | Self::Authentication { cause } => cause,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_authentication_is_fatal() {
        assert!(!DetectError::transient("timeout").is_fatal());
        assert!(DetectError::authentication("expired token").is_fatal());
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            DetectError::transient("throttled").to_string(),
            "detection failed: throttled"
        );
        assert_eq!(DetectError::authentication("no creds").cause(), "no creds");
    }

    #[test]
    fn test_word_serialization_skips_missing_confidence() {
        let word = DetectedWord::new("hi", NormalizedBox::full());
        let json = serde_json::to_value(&word).unwrap();
        assert!(json.get("confidence").is_none());

        let json = serde_json::to_value(word.with_confidence(99.5)).unwrap();
        assert_eq!(json["confidence"], 99.5);
    }
}
