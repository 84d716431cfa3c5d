use crate::config::Settings;
use crate::llm::error::{FailureKind, LlmDiagnosticsError};
use crate::llm::{LlmClient, Provider, StructuredRequest};
use anyhow::Context;
use reqwest::header::{HeaderMap, HeaderValue};
use serde::{Deserialize, Serialize};
use std::time::Duration;

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
const DEFAULT_MODEL: &str = "gemini-3-flash-preview";
const RESPONSE_MIME_TYPE: &str = "application/json";

#[derive(Debug, Clone)]
pub struct GeminiClient {
    http: reqwest::Client,
    base_url: String,
    model: String,
}

impl GeminiClient {
    /// The API key is not captured here; it is read from the environment on
    /// every call.
    pub fn from_env() -> anyhow::Result<Self> {
        let base_url =
            std::env::var("GEMINI_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        let model = std::env::var("GEMINI_MODEL")
            .ok()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_MODEL.to_string());

        // No client-side timeout unless explicitly configured.
        let timeout_secs = std::env::var("GEMINI_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse::<u64>().ok());

        let mut builder = reqwest::Client::builder();
        if let Some(secs) = timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let http = builder.build().context("failed to build reqwest client")?;

        Ok(Self {
            http,
            base_url,
            model,
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn url(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            self.model
        )
    }

    fn build_request(request: StructuredRequest) -> GenerateContentRequest {
        GenerateContentRequest {
            system_instruction: Content::text(None, request.system_instruction),
            contents: vec![Content::text(Some("user"), request.prompt)],
            generation_config: GenerationConfig {
                response_mime_type: RESPONSE_MIME_TYPE,
                response_schema: request.response_schema,
            },
        }
    }

    async fn generate_content(
        &self,
        api_key: &str,
        req: &GenerateContentRequest,
    ) -> anyhow::Result<(serde_json::Value, GenerateContentResponse)> {
        let mut headers = HeaderMap::new();
        headers.insert("x-goog-api-key", HeaderValue::from_str(api_key)?);

        let res = self
            .http
            .post(self.url())
            .headers(headers)
            .json(req)
            .send()
            .await
            .context("Gemini request failed")?;

        let status = res.status();
        let text = res
            .text()
            .await
            .context("failed to read Gemini response body")?;
        if !status.is_success() {
            let raw_response_json = serde_json::from_str::<serde_json::Value>(&text).ok();
            return Err(LlmDiagnosticsError {
                provider: Provider::Gemini,
                kind: FailureKind::Transport,
                detail: format!("status={status}"),
                raw_output: Some(text),
                raw_response_json,
            }
            .into());
        }

        let raw_json = serde_json::from_str::<serde_json::Value>(&text)
            .with_context(|| format!("failed to parse Gemini response JSON: {text}"))?;
        let parsed = serde_json::from_value::<GenerateContentResponse>(raw_json.clone())
            .context("failed to decode Gemini response into GenerateContentResponse")?;
        Ok((raw_json, parsed))
    }

    /// Concatenated text of the first candidate, skipping thought parts.
    fn response_text(res: &GenerateContentResponse) -> Option<String> {
        let content = res.candidates.first()?.content.as_ref()?;
        let text: String = content
            .parts
            .iter()
            .filter(|part| !part.thought.unwrap_or(false))
            .filter_map(|part| part.text.as_deref())
            .collect();
        if text.trim().is_empty() {
            None
        } else {
            Some(text)
        }
    }
}

#[async_trait::async_trait]
impl LlmClient for GeminiClient {
    fn provider(&self) -> Provider {
        Provider::Gemini
    }

    async fn generate_structured(&self, request: StructuredRequest) -> anyhow::Result<String> {
        let settings = Settings::from_env()?;
        let api_key = settings.require_gemini_api_key().map_err(|e| {
            LlmDiagnosticsError::new(Provider::Gemini, FailureKind::Transport, format!("{e:#}"))
        })?;

        let req = Self::build_request(request);
        let (raw_json, res) = self.generate_content(api_key, &req).await?;

        let finish_reason = res
            .candidates
            .first()
            .and_then(|c| c.finish_reason.as_deref());
        if let Some(reason) = finish_reason.filter(|r| *r != "STOP") {
            tracing::warn!(model = %self.model, finish_reason = reason, "Gemini candidate did not finish normally");
        }

        Self::response_text(&res).ok_or_else(|| {
            LlmDiagnosticsError {
                provider: Provider::Gemini,
                kind: FailureKind::EmptyResponse,
                detail: format!("no text in response (finish_reason={finish_reason:?})"),
                raw_output: None,
                raw_response_json: Some(raw_json),
            }
            .into()
        })
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    system_instruction: Content,
    contents: Vec<Content>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_mime_type: &'static str,
    response_schema: serde_json::Value,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<Part>,
}

impl Content {
    fn text(role: Option<&str>, text: String) -> Self {
        Self {
            role: role.map(str::to_string),
            parts: vec![Part {
                text: Some(text),
                thought: None,
            }],
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    thought: Option<bool>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    #[serde(default)]
    content: Option<Content>,

    #[serde(default)]
    finish_reason: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn request_body_carries_schema_and_mime_type() {
        let req = GeminiClient::build_request(StructuredRequest {
            system_instruction: "persona".to_string(),
            prompt: "prompt".to_string(),
            response_schema: json!({"type": "OBJECT"}),
        });
        let body = serde_json::to_value(&req).unwrap();
        assert_eq!(
            body,
            json!({
                "systemInstruction": {"parts": [{"text": "persona"}]},
                "contents": [{"role": "user", "parts": [{"text": "prompt"}]}],
                "generationConfig": {
                    "responseMimeType": "application/json",
                    "responseSchema": {"type": "OBJECT"},
                },
            })
        );
    }

    #[test]
    fn response_text_joins_parts_and_skips_thoughts() {
        let res: GenerateContentResponse = serde_json::from_value(json!({
            "candidates": [{
                "content": {
                    "role": "model",
                    "parts": [
                        {"text": "thinking...", "thought": true},
                        {"text": "{\"day\":"},
                        {"text": "\"x\"}"},
                    ],
                },
                "finishReason": "STOP",
            }],
            "usageMetadata": {"totalTokenCount": 10},
        }))
        .unwrap();

        assert_eq!(
            GeminiClient::response_text(&res),
            Some("{\"day\":\"x\"}".to_string())
        );
    }

    #[test]
    fn response_text_is_none_without_candidates() {
        let res: GenerateContentResponse =
            serde_json::from_value(json!({"promptFeedback": {"blockReason": "SAFETY"}})).unwrap();
        assert_eq!(GeminiClient::response_text(&res), None);

        let res: GenerateContentResponse =
            serde_json::from_value(json!({"candidates": [{"finishReason": "SAFETY"}]})).unwrap();
        assert_eq!(GeminiClient::response_text(&res), None);
    }

    /// Serve `body` with `status` for every request on an ephemeral port.
    async fn serve_canned(status: axum::http::StatusCode, body: &'static str) -> String {
        let app = axum::Router::new().fallback(move || async move { (status, body) });
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{addr}")
    }

    fn client_at(base_url: String) -> GeminiClient {
        std::env::set_var("GEMINI_API_KEY", "test-key");
        GeminiClient {
            http: reqwest::Client::new(),
            base_url,
            model: "gemini-test".to_string(),
        }
    }

    fn sample_request() -> StructuredRequest {
        StructuredRequest {
            system_instruction: "persona".to_string(),
            prompt: "prompt".to_string(),
            response_schema: json!({"type": "OBJECT"}),
        }
    }

    #[tokio::test]
    async fn non_success_status_is_a_transport_failure() {
        let body = r#"{"error":{"code":401,"message":"API key not valid"}}"#;
        let base_url = serve_canned(axum::http::StatusCode::UNAUTHORIZED, body).await;

        let err = client_at(base_url)
            .generate_structured(sample_request())
            .await
            .unwrap_err();

        assert_eq!(FailureKind::of(&err), FailureKind::Transport);
        let diag = err.downcast_ref::<LlmDiagnosticsError>().unwrap();
        assert_eq!(diag.detail, "status=401 Unauthorized");
        assert_eq!(diag.raw_output.as_deref(), Some(body));
        assert_eq!(diag.raw_response_json.as_ref().unwrap()["error"]["code"], 401);
    }

    #[tokio::test]
    async fn candidates_without_text_are_an_empty_response() {
        let body = r#"{"candidates":[{"finishReason":"SAFETY"}]}"#;
        let base_url = serve_canned(axum::http::StatusCode::OK, body).await;

        let err = client_at(base_url)
            .generate_structured(sample_request())
            .await
            .unwrap_err();

        assert_eq!(FailureKind::of(&err), FailureKind::EmptyResponse);
    }

    #[tokio::test]
    async fn text_part_is_returned_verbatim() {
        let body = r#"{"candidates":[{"content":{"parts":[{"text":"{\"day\":\"x\"}"}]},"finishReason":"STOP"}]}"#;
        let base_url = serve_canned(axum::http::StatusCode::OK, body).await;

        let text = client_at(base_url)
            .generate_structured(sample_request())
            .await
            .unwrap();

        assert_eq!(text, "{\"day\":\"x\"}");
    }

    #[test]
    fn url_targets_generate_content_for_model() {
        let client = GeminiClient {
            http: reqwest::Client::new(),
            base_url: "http://localhost:8080/".to_string(),
            model: "gemini-test".to_string(),
        };
        assert_eq!(
            client.url(),
            "http://localhost:8080/v1beta/models/gemini-test:generateContent"
        );
    }
}
