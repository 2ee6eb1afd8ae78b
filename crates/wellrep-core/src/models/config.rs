//! Configuration structures for the extraction pipeline.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{Result, WellrepError};

/// Main configuration for the wellrep pipeline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct WellrepConfig {
    /// PDF processing configuration.
    pub pdf: PdfConfig,

    /// Extraction provider configuration.
    pub provider: ProviderConfig,

    /// Output configuration.
    pub output: OutputConfig,
}

/// PDF processing configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PdfConfig {
    /// Maximum pages to read (0 = unlimited).
    pub max_pages: usize,

    /// Below this many characters of primary-strategy text the secondary
    /// strategy is tried.
    pub min_text_length: usize,
}

impl Default for PdfConfig {
    fn default() -> Self {
        Self {
            max_pages: 2,
            min_text_length: 30,
        }
    }
}

/// Extraction provider configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderConfig {
    /// Provider used when none is given on the command line.
    pub default: String,

    /// OpenAI-compatible chat completion endpoint.
    pub openai: OpenAiConfig,

    /// Local Ollama endpoint.
    pub ollama: OllamaConfig,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            default: "rules".to_string(),
            openai: OpenAiConfig::default(),
            ollama: OllamaConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OpenAiConfig {
    pub base_url: String,
    pub model: String,
    /// API key. Usually left empty and taken from `OPENAI_API_KEY`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    pub timeout_secs: u64,
    pub temperature: f32,
}

impl Default for OpenAiConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.openai.com/v1".to_string(),
            model: "gpt-4o-mini".to_string(),
            api_key: None,
            timeout_secs: 60,
            temperature: 0.1,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OllamaConfig {
    pub base_url: String,
    pub model: String,
    pub timeout_secs: u64,
}

impl Default for OllamaConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:11434".to_string(),
            model: "mistral".to_string(),
            timeout_secs: 120,
        }
    }
}

/// Output configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Include the extraction trace in output.
    pub include_trace: bool,

    /// Placeholder written for absent fields in text output.
    pub missing_placeholder: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            include_trace: false,
            missing_placeholder: "Não presente no PDF".to_string(),
        }
    }
}

impl WellrepConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| WellrepError::Config(format!("{}: {}", path.display(), e)))
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| WellrepError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Apply environment overrides from the process environment.
    pub fn apply_env(&mut self) {
        self.apply_env_from(|key| std::env::var(key).ok());
    }

    /// Apply environment overrides using a custom lookup.
    ///
    /// Recognized: `AI_PROVIDER`, `OPENAI_API_KEY`, `OPENAI_BASE_URL`,
    /// `OPENAI_MODEL`, `OLLAMA_BASE_URL`, `OLLAMA_MODEL`. Empty values are
    /// ignored.
    pub fn apply_env_from<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(v) = get("AI_PROVIDER") {
            self.provider.default = v.to_lowercase();
        }
        if let Some(v) = get("OPENAI_API_KEY") {
            self.provider.openai.api_key = Some(v);
        }
        if let Some(v) = get("OPENAI_BASE_URL") {
            self.provider.openai.base_url = v;
        }
        if let Some(v) = get("OPENAI_MODEL") {
            self.provider.openai.model = v;
        }
        if let Some(v) = get("OLLAMA_BASE_URL") {
            self.provider.ollama.base_url = v;
        }
        if let Some(v) = get("OLLAMA_MODEL") {
            self.provider.ollama.model = v;
        }
    }
}
