//! Application settings structs, defaults and TOML persistence.
//!
//! All structs implement `Serialize`, `Deserialize`, `Default` and `Clone`
//! so they can be round-tripped through TOML files and shared across threads.

use anyhow::Result;
use serde::{Deserialize, Serialize};

use super::AppPaths;

// ---------------------------------------------------------------------------
// ProviderConfig
// ---------------------------------------------------------------------------

/// Settings for the Gemini generative API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// Base URL of the REST endpoint (no trailing slash).
    pub base_url: String,
    /// API key — `None` falls back to the `GEMINI_API_KEY` environment
    /// variable. An empty string is treated the same as `None`.
    pub api_key: Option<String>,
    /// Default model for text / multimodal requests.
    pub text_model: String,
    /// Higher-capability model used for meal planning.
    pub planner_model: String,
    /// Audio-output model used for speech synthesis.
    pub tts_model: String,
    /// Prebuilt voice name for speech synthesis.
    pub voice: String,
    /// Maximum seconds to wait for a provider response before timing out.
    pub timeout_secs: u64,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            base_url: "https://generativelanguage.googleapis.com/v1beta".into(),
            api_key: None,
            text_model: "gemini-2.5-flash".into(),
            planner_model: "gemini-2.5-pro".into(),
            tts_model: "gemini-2.5-flash-preview-tts".into(),
            voice: "Kore".into(),
            timeout_secs: 120,
        }
    }
}

impl ProviderConfig {
    /// Environment variable consulted when `api_key` is not set in the file.
    pub const API_KEY_ENV: &'static str = "GEMINI_API_KEY";

    /// Resolve the API credential: the config value wins, then the
    /// environment. Empty strings count as absent in both places.
    pub fn resolve_api_key(&self) -> Option<String> {
        self.api_key
            .as_deref()
            .filter(|k| !k.is_empty())
            .map(str::to_string)
            .or_else(|| {
                std::env::var(Self::API_KEY_ENV)
                    .ok()
                    .filter(|k| !k.is_empty())
            })
    }
}

// ---------------------------------------------------------------------------
// AudioConfig
// ---------------------------------------------------------------------------

/// Settings for microphone capture.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AudioConfig {
    /// Minimum recording length in seconds before transcription is attempted.
    pub min_recording_secs: f32,
    /// Maximum recording length in seconds; longer captures are still sent
    /// but the CLI warns about upload size.
    pub max_recording_secs: f32,
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            min_recording_secs: 0.5,
            max_recording_secs: 60.0,
        }
    }
}

// ---------------------------------------------------------------------------
// AppConfig  (top-level)
// ---------------------------------------------------------------------------

/// Top-level application configuration, serialised as `settings.toml`.
///
/// # Persistence
///
/// ```rust,no_run
/// use wastenot::config::AppConfig;
///
/// // Load (returns Default when file is missing)
/// let config = AppConfig::load().unwrap();
///
/// // Modify and save
/// // config.save().unwrap();
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Gemini API settings.
    pub provider: ProviderConfig,
    /// Microphone capture settings.
    pub audio: AudioConfig,
}

impl AppConfig {
    /// Load configuration from the platform-appropriate `settings.toml`.
    ///
    /// Returns `Ok(AppConfig::default())` when the file does not exist yet
    /// (first-run scenario) so callers never need to special-case a missing
    /// file.
    pub fn load() -> Result<Self> {
        Self::load_from(&AppPaths::new().settings_file)
    }

    /// Load from an explicit path (useful for tests).
    pub fn load_from(path: &std::path::Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to the platform-appropriate `settings.toml`,
    /// creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        self.save_to(&AppPaths::new().settings_file)
    }

    /// Save to an explicit path (useful for tests).
    pub fn save_to(&self, path: &std::path::Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
