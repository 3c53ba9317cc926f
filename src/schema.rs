use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

// Schema version constants
pub const SCHEMA_VERSION: &str = "0.1.0"; // Current report schema version

/// Where a raw annotation came from: whole-image label detection or
/// localized object detection.
#[derive(Debug, Serialize, Deserialize, JsonSchema, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DetectionSource {
    Label,
    Object,
}

/// One whole-image label annotation as returned by the classification
/// service.
#[derive(Debug, Serialize, Deserialize, JsonSchema, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LabelAnnotation {
    pub description: String,
    #[serde(default)]
    pub score: f32,
}

/// One localized-object annotation as returned by the classification
/// service.
#[derive(Debug, Serialize, Deserialize, JsonSchema, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ObjectAnnotation {
    pub name: String,
    #[serde(default)]
    pub score: f32,
}

/// Result of aggregating one classification response.
///
/// `ingredients` is the authoritative canonical set handed to the recipe
/// pipeline. `diagnostics` retains every raw annotation (accepted or not)
/// as `"name (xx.x%)"` strings in arrival order, for display only.
#[derive(Debug, Serialize, Deserialize, JsonSchema, Clone, PartialEq)]
pub struct ScanReport {
    pub ingredients: BTreeSet<String>,
    #[serde(default)]
    pub diagnostics: Vec<String>,
    pub version: String,
}

impl Default for ScanReport {
    fn default() -> Self {
        Self {
            ingredients: BTreeSet::new(),
            diagnostics: Vec::new(),
            version: SCHEMA_VERSION.to_string(),
        }
    }
}
