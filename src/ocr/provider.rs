//! OCR Providers
//!
//! Defines the detector trait and a fixed-response detector.

use async_trait::async_trait;

use super::types::{DetectError, DetectedWord, OcrProvider};
use crate::raster::RasterImage;

/// Word detector trait
///
/// One call per page image; no batching. Implementations must classify
/// failures into [`DetectError::Transient`] or [`DetectError::Authentication`].
#[async_trait]
pub trait TextDetector: Send + Sync {
    /// Get the provider type
    fn provider_type(&self) -> OcrProvider;

    /// Detect words on a page image
    async fn detect(&self, image: &RasterImage) -> Result<Vec<DetectedWord>, DetectError>;
}

/// Detector that replays canned results, one per call.
///
/// Useful for fixtures and dry runs: call `n` receives `responses[n]`, and
/// calls past the end of the script detect nothing.
pub struct StaticDetector {
    responses: parking_lot::Mutex<std::vec::IntoIter<Result<Vec<DetectedWord>, DetectError>>>,
}

impl StaticDetector {
    pub fn new(responses: Vec<Result<Vec<DetectedWord>, DetectError>>) -> Self {
        Self {
            responses: parking_lot::Mutex::new(responses.into_iter()),
        }
    }
}

#[async_trait]
impl TextDetector for StaticDetector {
    fn provider_type(&self) -> OcrProvider {
        OcrProvider::Static
    }

    async fn detect(&self, _image: &RasterImage) -> Result<Vec<DetectedWord>, DetectError> {
        self.responses.lock().next().unwrap_or_else(|| Ok(Vec::new()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::NormalizedBox;

    fn image() -> RasterImage {
        RasterImage {
            data: Vec::new(),
            width: 10,
            height: 10,
        }
    }

    #[tokio::test]
    async fn test_static_detector_replays_in_order() {
        let detector = StaticDetector::new(vec![
            Ok(vec![DetectedWord::new("one", NormalizedBox::full())]),
            Err(DetectError::transient("boom")),
        ]);

        assert_eq!(detector.detect(&image()).await.unwrap()[0].text, "one");
        assert!(detector.detect(&image()).await.is_err());
        assert!(detector.detect(&image()).await.unwrap().is_empty());
        assert_eq!(detector.provider_type(), OcrProvider::Static);
    }
}
