//! Natural-language payload interpretation boundary.
//!
//! An interpreter turns free-form text ("wifi for Home, password 1234") into
//! a structured QR payload (`WIFI:T:WPA;S:Home;P:1234;;`). Interpreters may
//! fail; [`resolve_payload`] then falls back to the literal text.

use std::future::Future;

use serde::{Deserialize, Serialize};

/// Structured result of interpreting free-form text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Interpretation {
    /// Detected payload type (WiFi, vCard, URL, ...).
    #[serde(rename = "type")]
    pub kind: String,
    /// Payload ready for the QR generator.
    pub content: String,
    pub explanation: String,
}

impl Interpretation {
    /// Parse an interpreter's JSON response.
    pub fn from_json(raw: &str) -> Result<Self, InterpretError> {
        serde_json::from_str(raw).map_err(|e| InterpretError::Malformed(e.to_string()))
    }

    fn literal_fallback(text: &str) -> Self {
        Self {
            kind: "Error".into(),
            content: text.to_string(),
            explanation: "Could not interpret the request, using raw text.".into(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum InterpretError {
    #[error("interpreter unavailable: {0}")]
    Unavailable(String),

    #[error("malformed interpreter response: {0}")]
    Malformed(String),
}

/// Text-to-payload oracle. Implementations own their retry and timeout policy.
pub trait PayloadInterpreter {
    fn interpret(
        &self,
        text: &str,
    ) -> impl Future<Output = Result<Interpretation, InterpretError>> + Send;
}

/// Uses the text as the payload unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct LiteralInterpreter;

impl PayloadInterpreter for LiteralInterpreter {
    async fn interpret(&self, text: &str) -> Result<Interpretation, InterpretError> {
        Ok(Interpretation {
            kind: "Text".into(),
            content: text.to_string(),
            explanation: "Used the text as is.".into(),
        })
    }
}

/// Interpret `text`, falling back to the literal text on any failure.
pub async fn resolve_payload<I: PayloadInterpreter>(interpreter: &I, text: &str) -> Interpretation {
    match interpreter.interpret(text).await {
        Ok(result) if !result.content.is_empty() => result,
        Ok(_) => {
            tracing::warn!("Interpreter returned empty content, using raw text");
            Interpretation::literal_fallback(text)
        }
        Err(e) => {
            tracing::warn!("Interpretation failed, using raw text: {e}");
            Interpretation::literal_fallback(text)
        }
    }
}
