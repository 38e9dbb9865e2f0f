//! AWS Textract detector
//!
//! Sends each page image to `DetectDocumentText` and keeps the `WORD`
//! blocks. Textract already reports geometry as ratios of the image size,
//! which is exactly the normalized box the overlay expects.

use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_sdk_textract::{
    config::Region,
    error::{DisplayErrorContext, ProvideErrorMetadata, SdkError},
    operation::detect_document_text::DetectDocumentTextError,
    primitives::Blob,
    types::{Block, BlockType, Document},
    Client,
};

use super::provider::TextDetector;
use super::types::{DetectError, DetectedWord, OcrProvider};
use crate::config::AwsConfig;
use crate::geometry::NormalizedBox;
use crate::raster::RasterImage;

/// Synchronous Textract operations accept at most 10 MB of inline bytes
pub const MAX_DOCUMENT_BYTES: usize = 10 * 1024 * 1024;

/// Service error codes that mean the caller's identity is the problem
const AUTH_ERROR_CODES: &[&str] = &[
    "AccessDeniedException",
    "ExpiredToken",
    "ExpiredTokenException",
    "IncompleteSignature",
    "InvalidClientTokenId",
    "InvalidSignatureException",
    "MissingAuthenticationToken",
    "UnauthorizedOperation",
    "UnrecognizedClientException",
];

/// Textract-backed detector
#[derive(Clone)]
pub struct TextractDetector {
    client: Client,
    /// Credentials profile, named in authentication errors
    profile: Option<String>,
}

impl TextractDetector {
    /// Build a client for the configured profile and region
    pub async fn new(config: &AwsConfig) -> Self {
        let sdk_config = aws_config::defaults(BehaviorVersion::latest())
            .profile_name(&config.profile)
            .region(Region::new(config.region.clone()))
            .load()
            .await;

        tracing::info!(
            "Using Textract in {} with profile {}",
            config.region,
            config.profile
        );

        Self {
            client: Client::new(&sdk_config),
            profile: Some(config.profile.clone()),
        }
    }

    /// Wrap an existing client
    pub fn from_client(client: Client) -> Self {
        Self {
            client,
            profile: None,
        }
    }

    fn with_profile(&self, err: DetectError) -> DetectError {
        match (&err, &self.profile) {
            (DetectError::Authentication { cause }, Some(profile)) => {
                DetectError::authentication(format!("profile '{}': {}", profile, cause))
            }
            _ => err,
        }
    }
}

#[async_trait]
impl TextDetector for TextractDetector {
    fn provider_type(&self) -> OcrProvider {
        OcrProvider::Textract
    }

    async fn detect(&self, image: &RasterImage) -> Result<Vec<DetectedWord>, DetectError> {
        if image.data.len() > MAX_DOCUMENT_BYTES {
            return Err(DetectError::transient(format!(
                "page image is {} bytes, Textract accepts at most {}",
                image.data.len(),
                MAX_DOCUMENT_BYTES
            )));
        }

        let document = Document::builder()
            .bytes(Blob::new(image.data.clone()))
            .build();

        let output = self
            .client
            .detect_document_text()
            .document(document)
            .send()
            .await
            .map_err(|e| self.with_profile(classify_sdk_error(e)))?;

        let words: Vec<DetectedWord> = output.blocks().iter().filter_map(word_from_block).collect();
        tracing::debug!(
            "Textract returned {} blocks, {} words",
            output.blocks().len(),
            words.len()
        );

        Ok(words)
    }
}

fn word_from_block(block: &Block) -> Option<DetectedWord> {
    if block.block_type() != Some(&BlockType::Word) {
        return None;
    }

    let text = block.text()?.trim();
    if text.is_empty() {
        return None;
    }

    let bbox = block.geometry()?.bounding_box()?;
    let word = DetectedWord::new(
        text,
        NormalizedBox::new(bbox.left(), bbox.top(), bbox.width(), bbox.height()),
    );

    Some(match block.confidence() {
        Some(confidence) => word.with_confidence(confidence),
        None => word,
    })
}

fn classify_sdk_error(err: SdkError<DetectDocumentTextError>) -> DetectError {
    let code = match &err {
        SdkError::ServiceError(service) => service.err().code().map(str::to_string),
        _ => None,
    };
    classify(code.as_deref(), &DisplayErrorContext(&err).to_string())
}

/// Decide whether a failed call is worth skipping past or must stop the run.
///
/// Credential problems surface either as a service error code or, when the
/// SDK cannot resolve an identity at all, only in the error message.
pub fn classify(code: Option<&str>, message: &str) -> DetectError {
    if let Some(code) = code {
        if AUTH_ERROR_CODES.contains(&code) {
            return DetectError::authentication(format!("{}: {}", code, message));
        }
    }

    let lower = message.to_lowercase();
    if lower.contains("credential") || lower.contains("security token") {
        return DetectError::authentication(message.to_string());
    }

    DetectError::transient(message.to_string())
}
