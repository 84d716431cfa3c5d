use crate::domain::day::DayCategory;
use crate::domain::horoscope::HoroscopeResult;
use crate::horoscope::prompt;
use crate::llm::error::{FailureKind, LlmDiagnosticsError};
use crate::llm::{json, LlmClient};
use crate::time::mm_calendar;
use chrono::NaiveDate;
use std::sync::Arc;

/// Turns a day category into a validated horoscope through any
/// structured-generation provider.
#[derive(Clone)]
pub struct HoroscopeService {
    llm: Arc<dyn LlmClient>,
}

impl HoroscopeService {
    pub fn new(llm: Arc<dyn LlmClient>) -> Self {
        Self { llm }
    }

    /// Request today's horoscope; the date is resolved on every call.
    pub async fn request_horoscope(&self, day: DayCategory) -> anyhow::Result<HoroscopeResult> {
        let date = mm_calendar::today(chrono::Utc::now())?;
        self.request_horoscope_on(day, date).await
    }

    pub async fn request_horoscope_on(
        &self,
        day: DayCategory,
        date: NaiveDate,
    ) -> anyhow::Result<HoroscopeResult> {
        let provider = self.llm.provider();
        let request = prompt::build_request(day, date);

        tracing::info!(%day, %date, provider = provider.as_str(), "requesting horoscope");
        let text = self.llm.generate_structured(request).await?;

        if text.trim().is_empty() {
            return Err(LlmDiagnosticsError::new(
                provider,
                FailureKind::EmptyResponse,
                "provider returned an empty payload",
            )
            .into());
        }

        let result = json::parse_horoscope(&text).map_err(|err| LlmDiagnosticsError {
            provider,
            kind: FailureKind::SchemaViolation,
            detail: format!("{err:#}"),
            raw_output: Some(text.clone()),
            raw_response_json: None,
        })?;

        if result.day != day.label() {
            tracing::debug!(%day, echoed = %result.day, "model echoed a different day label");
        }

        Ok(result)
    }
}
