//! Extraction providers.
//!
//! Every provider maps report text to a [`FieldMap`] over a caller-supplied
//! field list. The rule engine is the only provider implemented here;
//! text-completion backends reuse [`build_prompt`] and [`conform_response`].

mod prompt;

pub use prompt::{build_prompt, conform_response, SYSTEM_MESSAGE};

use std::fmt;
use std::str::FromStr;

use crate::error::ProviderError;
use crate::models::report::{Field, FieldMap};
use crate::report::{ReportParser, RuleEngine};

/// Known provider backends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderKind {
    Rules,
    OpenAi,
    Ollama,
}

impl ProviderKind {
    pub const ALL: [ProviderKind; 3] = [ProviderKind::Rules, ProviderKind::OpenAi, ProviderKind::Ollama];

    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderKind::Rules => "rules",
            ProviderKind::OpenAi => "openai",
            ProviderKind::Ollama => "ollama",
        }
    }

    /// Whether the provider calls a remote endpoint.
    pub fn is_remote(&self) -> bool {
        !matches!(self, ProviderKind::Rules)
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProviderKind {
    type Err = ProviderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().to_lowercase();
        ProviderKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == name)
            .ok_or_else(|| ProviderError::Unsupported(s.trim().to_string()))
    }
}

/// A backend that fills a field map from report text.
pub trait ExtractionProvider {
    /// Provider name used in logs and output metadata.
    fn name(&self) -> &str;

    /// Extract `fields` from `text`. Absent fields map to empty strings.
    fn extract(&self, text: &str, fields: &[Field]) -> Result<FieldMap, ProviderError>;
}

/// Provider backed by the deterministic rule engine. Never fails.
#[derive(Debug, Clone, Default)]
pub struct RuleProvider {
    engine: RuleEngine,
}

impl RuleProvider {
    pub fn new(engine: RuleEngine) -> Self {
        Self { engine }
    }

    pub fn engine(&self) -> &RuleEngine {
        &self.engine
    }
}

impl ExtractionProvider for RuleProvider {
    fn name(&self) -> &str {
        ProviderKind::Rules.as_str()
    }

    fn extract(&self, text: &str, fields: &[Field]) -> Result<FieldMap, ProviderError> {
        Ok(self.engine.parse(text).to_schema_map(fields))
    }
}
