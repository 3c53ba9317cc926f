use crate::lexicon::{IngredientLexicon, LexiconFile};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use tracing::warn;

/// Environment variable carrying the classification-service API key.
/// Overrides the config file when set and non-empty.
pub const API_KEY_ENV: &str = "VISION_API_KEY";

const DEFAULT_ENDPOINT: &str = "https://vision.googleapis.com/v1/images:annotate";
const DEFAULT_TIMEOUT_SECS: u64 = 30;
const DEFAULT_MAX_RESULTS: u32 = 50;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// Classification-service API key. `VISION_API_KEY` wins over this.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    pub endpoint: String,
    /// Bounded wait for the classification call; expiry surfaces as a
    /// request error, never a hang.
    pub timeout_secs: u64,
    pub max_results: u32,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            max_results: DEFAULT_MAX_RESULTS,
        }
    }
}

impl ScanConfig {
    pub fn load() -> Self {
        // Try to load from config file, fallback to default
        if let Some(config_path) = Self::config_file_path()
            && let Ok(content) = std::fs::read_to_string(config_path)
            && let Ok(config) = toml::from_str(&content)
        {
            return config;
        }
        Self::default()
    }

    fn config_file_path() -> Option<PathBuf> {
        Self::config_dir().map(|mut path| {
            path.push("config.toml");
            path
        })
    }

    fn lexicon_file_path() -> Option<PathBuf> {
        Self::config_dir().map(|mut path| {
            path.push("lexicon.toml");
            path
        })
    }

    pub fn config_dir() -> Option<PathBuf> {
        dirs::config_dir().map(|mut path| {
            path.push("pantrysense");
            path
        })
    }

    /// The effective API key: environment first, then the config file.
    pub fn api_key(&self) -> Option<String> {
        std::env::var(API_KEY_ENV)
            .ok()
            .filter(|key| !key.is_empty())
            .or_else(|| self.api_key.clone())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// The vocabulary to run with: `lexicon.toml` beside the config file
    /// when present and valid, the built-in tables otherwise. An invalid
    /// file is reported and skipped rather than aborting startup.
    pub fn load_lexicon() -> IngredientLexicon {
        if let Some(path) = Self::lexicon_file_path()
            && let Ok(content) = std::fs::read_to_string(&path)
        {
            match toml::from_str::<LexiconFile>(&content) {
                Ok(file) => match file.build() {
                    Ok(lexicon) => return lexicon,
                    Err(e) => warn!(path = %path.display(), error = %e, "invalid lexicon file, using built-in vocabulary"),
                },
                Err(e) => warn!(path = %path.display(), error = %e, "unparseable lexicon file, using built-in vocabulary"),
            }
        }
        IngredientLexicon::builtin()
    }
}
