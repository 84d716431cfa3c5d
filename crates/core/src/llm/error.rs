use crate::llm::Provider;
use serde_json::Value;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// The call could not complete (network, service, auth).
    Transport,
    /// The call completed without a payload.
    EmptyResponse,
    /// The payload did not parse into a valid horoscope.
    SchemaViolation,
}

impl FailureKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FailureKind::Transport => "transport",
            FailureKind::EmptyResponse => "empty_response",
            FailureKind::SchemaViolation => "schema_violation",
        }
    }

    /// Classify any error raised while requesting a horoscope. Errors that
    /// carry no diagnostics count as transport failures.
    pub fn of(err: &anyhow::Error) -> Self {
        err.downcast_ref::<LlmDiagnosticsError>()
            .map(|diag| diag.kind)
            .unwrap_or(FailureKind::Transport)
    }
}

#[derive(Debug, Clone)]
pub struct LlmDiagnosticsError {
    pub provider: Provider,
    pub kind: FailureKind,
    pub detail: String,
    pub raw_output: Option<String>,
    pub raw_response_json: Option<Value>,
}

impl LlmDiagnosticsError {
    pub fn new(provider: Provider, kind: FailureKind, detail: impl Into<String>) -> Self {
        Self {
            provider,
            kind,
            detail: detail.into(),
            raw_output: None,
            raw_response_json: None,
        }
    }
}

impl fmt::Display for LlmDiagnosticsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "LLM error (provider={}, kind={}): {}",
            self.provider.as_str(),
            self.kind.as_str(),
            self.detail
        )
    }
}

impl std::error::Error for LlmDiagnosticsError {}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context;

    #[test]
    fn classifies_wrapped_diagnostics() {
        let diag = LlmDiagnosticsError::new(Provider::Gemini, FailureKind::EmptyResponse, "no text");
        let err: anyhow::Result<()> = Err(diag.into());
        let err = err.context("request failed").unwrap_err();
        assert_eq!(FailureKind::of(&err), FailureKind::EmptyResponse);
    }

    #[test]
    fn plain_errors_are_transport_failures() {
        let err = anyhow::anyhow!("connection reset");
        assert_eq!(FailureKind::of(&err), FailureKind::Transport);
    }

    #[test]
    fn display_names_provider_and_kind() {
        let diag = LlmDiagnosticsError::new(Provider::Gemini, FailureKind::Transport, "status=401");
        assert_eq!(
            diag.to_string(),
            "LLM error (provider=gemini, kind=transport): status=401"
        );
    }
}
