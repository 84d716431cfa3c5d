pub mod error;
pub mod gemini;
pub mod json;

/// A schema-constrained generation request: the provider must answer with a
/// single JSON text payload conforming to `response_schema`.
#[derive(Debug, Clone)]
pub struct StructuredRequest {
    pub system_instruction: String,
    pub prompt: String,
    pub response_schema: serde_json::Value,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provider {
    Gemini,
}

impl Provider {
    pub fn as_str(&self) -> &'static str {
        match self {
            Provider::Gemini => "gemini",
        }
    }
}

#[async_trait::async_trait]
pub trait LlmClient: Send + Sync {
    fn provider(&self) -> Provider;

    /// Returns the raw text payload. Implementations report a missing payload
    /// as `FailureKind::EmptyResponse`.
    async fn generate_structured(&self, request: StructuredRequest) -> anyhow::Result<String>;
}
