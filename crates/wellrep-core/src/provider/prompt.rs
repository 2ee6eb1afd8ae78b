//! Prompt construction and reply conformance for text-completion providers.

use serde_json::Value;

use crate::error::ProviderError;
use crate::models::report::{Field, FieldMap};
use crate::report::rules::patterns::JSON_OBJECT;

/// System message sent alongside the prompt by chat-style endpoints.
pub const SYSTEM_MESSAGE: &str = "Você extrai campos de relatórios e devolve JSON puro.";

const LOCALE_HINT: &str = "pt-BR";

/// Build the extraction prompt for `text`, asking for exactly `fields`.
pub fn build_prompt(text: &str, fields: &[Field]) -> String {
    let keys = fields
        .iter()
        .map(|f| format!("\"{}\"", f.as_str()))
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        "Você é um assistente que extrai dados de relatórios de poços de petróleo.\n\
         Analise o TEXTO DO PDF abaixo e preencha APENAS o JSON com as chaves a seguir.\n\
         \n\
         CHAVES OBRIGATÓRIAS (use string vazia \"\" quando não existir):\n\
         [{keys}]\n\
         \n\
         Regras:\n\
         - Retorne SOMENTE um objeto JSON válido (sem explicações).\n\
         - Preserve frações e unidades como aparecem (ex.: \"2 7/8\", \"6.50 kg/m\", \"1350.31 m\").\n\
         - Use ponto como separador decimal quando houver (ex.: 6.50).\n\
         - {LOCALE_HINT}\n\
         \n\
         TEXTO DO PDF:\n\
         ----------------\n\
         {text}\n\
         ----------------\n\
         JSON:"
    )
}

/// Conform a model reply to the requested fields.
///
/// The first `{...}` span is parsed as JSON, falling back to the whole
/// reply. Keys outside `fields` are dropped and missing ones become empty
/// strings. `null` maps to `""`; numbers and booleans keep their JSON text.
pub fn conform_response(raw: &str, fields: &[Field]) -> Result<FieldMap, ProviderError> {
    let parsed = JSON_OBJECT
        .find(raw)
        .and_then(|m| serde_json::from_str::<Value>(m.as_str()).ok())
        .map(Ok)
        .unwrap_or_else(|| serde_json::from_str::<Value>(raw.trim()))
        .map_err(|e| ProviderError::InvalidResponse(e.to_string()))?;

    let Value::Object(object) = parsed else {
        return Err(ProviderError::InvalidResponse(
            "reply is not a JSON object".to_string(),
        ));
    };

    Ok(FieldMap::from_lookup(fields, |field| {
        object.get(field.as_str()).map(|value| match value {
            Value::Null => String::new(),
            Value::String(s) => s.clone(),
            other => other.to_string(),
        })
    }))
}
