//! HTTP clients for model-backed extraction.
//!
//! Both backends send the same Portuguese prompt and conform the reply to the
//! requested fields, so their output is interchangeable with the rule engine.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;

use wellrep_core::models::config::{OllamaConfig, OpenAiConfig, ProviderConfig};
use wellrep_core::provider::{build_prompt, conform_response, SYSTEM_MESSAGE};
use wellrep_core::{Field, FieldMap, ProviderError, ProviderKind};

/// A configured remote backend.
pub enum RemoteProvider {
    OpenAi(OpenAiClient),
    Ollama(OllamaClient),
}

impl RemoteProvider {
    /// Build the client for `kind`. The rule engine has no remote client.
    pub fn from_config(kind: ProviderKind, config: &ProviderConfig) -> Result<Self, ProviderError> {
        match kind {
            ProviderKind::OpenAi => OpenAiClient::new(&config.openai).map(RemoteProvider::OpenAi),
            ProviderKind::Ollama => OllamaClient::new(&config.ollama).map(RemoteProvider::Ollama),
            ProviderKind::Rules => Err(ProviderError::Unsupported(format!(
                "{} is not a remote provider",
                kind
            ))),
        }
    }

    pub async fn extract(&self, text: &str, fields: &[Field]) -> Result<FieldMap, ProviderError> {
        let raw = match self {
            RemoteProvider::OpenAi(client) => client.complete(&build_prompt(text, fields)).await?,
            RemoteProvider::Ollama(client) => client.complete(&build_prompt(text, fields)).await?,
        };
        debug!("Model reply: {} characters", raw.len());
        conform_response(&raw, fields)
    }
}

fn http_client(timeout_secs: u64, provider: &str) -> Result<reqwest::Client, ProviderError> {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .build()
        .map_err(|e| http_error(provider, e))
}

fn http_error(provider: &str, reason: impl ToString) -> ProviderError {
    ProviderError::Http {
        provider: provider.to_string(),
        reason: reason.to_string(),
    }
}

/// Turn a non-success response into an error carrying its body.
async fn check_status(provider: &str, response: reqwest::Response) -> Result<reqwest::Response, ProviderError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(http_error(provider, format!("HTTP {}: {}", status.as_u16(), body)))
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatReply,
}

#[derive(Deserialize)]
struct ChatReply {
    #[serde(default)]
    content: Option<String>,
}

/// OpenAI-compatible chat completion client.
pub struct OpenAiClient {
    client: reqwest::Client,
    url: String,
    api_key: String,
    model: String,
    temperature: f32,
}

impl OpenAiClient {
    pub fn new(config: &OpenAiConfig) -> Result<Self, ProviderError> {
        let api_key = config
            .api_key
            .clone()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| ProviderError::MissingApiKey("OPENAI_API_KEY".to_string()))?;

        Ok(Self {
            client: http_client(config.timeout_secs, "openai")?,
            url: format!("{}/chat/completions", config.base_url.trim_end_matches('/')),
            api_key,
            model: config.model.clone(),
            temperature: config.temperature,
        })
    }

    async fn complete(&self, prompt: &str) -> Result<String, ProviderError> {
        let request = ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage { role: "system", content: SYSTEM_MESSAGE },
                ChatMessage { role: "user", content: prompt },
            ],
            temperature: self.temperature,
        };

        debug!("POST {} (model {})", self.url, self.model);
        let response = self
            .client
            .post(&self.url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| http_error("openai", e))?;

        let reply: ChatResponse = check_status("openai", response)
            .await?
            .json()
            .await
            .map_err(|e| ProviderError::InvalidResponse(e.to_string()))?;

        reply
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| ProviderError::InvalidResponse("reply has no message content".to_string()))
    }
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    response: String,
}

/// Local Ollama `/api/generate` client.
pub struct OllamaClient {
    client: reqwest::Client,
    url: String,
    model: String,
}

impl OllamaClient {
    pub fn new(config: &OllamaConfig) -> Result<Self, ProviderError> {
        Ok(Self {
            client: http_client(config.timeout_secs, "ollama")?,
            url: format!("{}/api/generate", config.base_url.trim_end_matches('/')),
            model: config.model.clone(),
        })
    }

    async fn complete(&self, prompt: &str) -> Result<String, ProviderError> {
        let request = GenerateRequest {
            model: &self.model,
            prompt,
            stream: false,
        };

        debug!("POST {} (model {})", self.url, self.model);
        let response = self
            .client
            .post(&self.url)
            .json(&request)
            .send()
            .await
            .map_err(|e| http_error("ollama", e))?;

        let reply: GenerateResponse = check_status("ollama", response)
            .await?
            .json()
            .await
            .map_err(|e| ProviderError::InvalidResponse(e.to_string()))?;

        Ok(reply.response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openai_requires_api_key() {
        let config = OpenAiConfig::default();
        let err = OpenAiClient::new(&config).err().unwrap();
        assert!(matches!(err, ProviderError::MissingApiKey(_)));
    }

    #[test]
    fn test_urls_ignore_trailing_slash() {
        let config = OpenAiConfig {
            api_key: Some("sk-test".to_string()),
            base_url: "http://localhost:8080/v1/".to_string(),
            ..OpenAiConfig::default()
        };
        let client = OpenAiClient::new(&config).unwrap();
        assert_eq!(client.url, "http://localhost:8080/v1/chat/completions");

        let client = OllamaClient::new(&OllamaConfig::default()).unwrap();
        assert_eq!(client.url, "http://127.0.0.1:11434/api/generate");
    }

    #[test]
    fn test_rules_is_not_remote() {
        let result = RemoteProvider::from_config(ProviderKind::Rules, &ProviderConfig::default());
        assert!(matches!(result, Err(ProviderError::Unsupported(_))));
    }
}
