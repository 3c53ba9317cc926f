//! Classification-service client.
//!
//! Reads and base64-encodes a source image, POSTs a two-feature annotate
//! request (object localization + label detection), and hands the raw
//! annotation arrays back for aggregation. All network and filesystem
//! concerns live here; the core never performs I/O.

use crate::config::ScanConfig;
use crate::schema::{LabelAnnotation, ObjectAnnotation};
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// Upstream limit on the source image, enforced before encoding.
pub const MAX_IMAGE_BYTES: usize = 5_000_000;

#[derive(Debug, Error)]
pub enum VisionError {
    /// Configuration failure, detected before any network activity.
    #[error("classification API key is not configured (set VISION_API_KEY or api_key in config.toml)")]
    MissingApiKey,

    /// The source image could not be read.
    #[error("failed to read image {path}")]
    ImageRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("image is {size} bytes, over the {MAX_IMAGE_BYTES}-byte limit")]
    ImageTooLarge { size: usize },

    /// Network-level failure, including a timed-out request.
    #[error("classification request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Non-success response from the classification service. No retry.
    #[error("classification service returned {status}: {body}")]
    Api { status: StatusCode, body: String },

    /// Well-formed HTTP response with an unusable payload.
    #[error("malformed classification response: {0}")]
    MalformedResponse(String),
}

#[derive(Debug, Serialize)]
struct AnnotateRequest {
    requests: Vec<AnnotateImageRequest>,
}

#[derive(Debug, Serialize)]
struct AnnotateImageRequest {
    image: ImageContent,
    features: Vec<Feature>,
}

#[derive(Debug, Serialize)]
struct ImageContent {
    content: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Feature {
    #[serde(rename = "type")]
    feature_type: FeatureType,
    max_results: u32,
}

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
enum FeatureType {
    ObjectLocalization,
    LabelDetection,
}

#[derive(Debug, Deserialize)]
struct AnnotateResponse {
    #[serde(default)]
    responses: Vec<ImageAnnotations>,
}

/// The two annotation streams of one classification response. Missing
/// arrays deserialize as empty rather than failing.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ImageAnnotations {
    pub label_annotations: Vec<LabelAnnotation>,
    pub localized_object_annotations: Vec<ObjectAnnotation>,
}

/// HTTP client for the image-classification service.
#[derive(Debug)]
pub struct VisionClient {
    http: reqwest::Client,
    api_key: String,
    endpoint: String,
    max_results: u32,
}

impl VisionClient {
    /// Build a client from configuration. Fails with
    /// [`VisionError::MissingApiKey`] before any network activity when no
    /// credential is available.
    pub fn new(config: &ScanConfig) -> Result<Self, VisionError> {
        let api_key = config.api_key().ok_or(VisionError::MissingApiKey)?;
        let http = reqwest::Client::builder().timeout(config.timeout()).build()?;
        Ok(Self {
            http,
            api_key,
            endpoint: config.endpoint.clone(),
            max_results: config.max_results,
        })
    }

    /// Read an image from disk and classify it.
    pub async fn annotate_file(&self, path: &Path) -> Result<ImageAnnotations, VisionError> {
        let bytes = tokio::fs::read(path)
            .await
            .map_err(|source| VisionError::ImageRead {
                path: path.to_path_buf(),
                source,
            })?;
        self.annotate_bytes(&bytes).await
    }

    /// Classify raw image bytes.
    pub async fn annotate_bytes(&self, bytes: &[u8]) -> Result<ImageAnnotations, VisionError> {
        if bytes.len() > MAX_IMAGE_BYTES {
            return Err(VisionError::ImageTooLarge { size: bytes.len() });
        }

        let request = AnnotateRequest {
            requests: vec![AnnotateImageRequest {
                image: ImageContent {
                    content: BASE64.encode(bytes),
                },
                features: vec![
                    Feature {
                        feature_type: FeatureType::ObjectLocalization,
                        max_results: self.max_results,
                    },
                    Feature {
                        feature_type: FeatureType::LabelDetection,
                        max_results: self.max_results,
                    },
                ],
            }],
        };

        debug!(image_bytes = bytes.len(), "sending classification request");

        let response = self
            .http
            .post(&self.endpoint)
            .query(&[("key", self.api_key.as_str())])
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(VisionError::Api { status, body });
        }

        let body = response.text().await?;
        let mut parsed: AnnotateResponse = serde_json::from_str(&body)
            .map_err(|e| VisionError::MalformedResponse(e.to_string()))?;

        if parsed.responses.is_empty() {
            return Err(VisionError::MalformedResponse(
                "no entries in responses".to_string(),
            ));
        }

        let annotations = parsed.responses.swap_remove(0);
        debug!(
            labels = annotations.label_annotations.len(),
            objects = annotations.localized_object_annotations.len(),
            "classification response received"
        );
        Ok(annotations)
    }
}
