use crate::domain::contract::LlmHoroscope;
use crate::domain::horoscope::HoroscopeResult;
use anyhow::Context;

pub fn extract_json(text: &str) -> Option<String> {
    let trimmed = text.trim();
    if trimmed.starts_with("```") {
        // Some models wrap the horoscope object in a ```json fence despite the MIME type.
        let mut inner = trimmed;
        if let Some(after_first) = inner.split_once('\n').map(|(_, rest)| rest) {
            inner = after_first;
        }
        if let Some(end) = inner.rfind("```") {
            inner = &inner[..end];
        }
        return Some(inner.trim().to_string());
    }

    // Prose around the object: keep the outermost braces.
    let start = trimmed.find('{')?;
    let end = trimmed.rfind('}')?;
    if end <= start {
        return None;
    }
    Some(trimmed[start..=end].trim().to_string())
}

pub fn parse_horoscope(text: &str) -> anyhow::Result<HoroscopeResult> {
    let json_str = extract_json(text).unwrap_or_else(|| text.trim().to_string());
    let parsed = serde_json::from_str::<LlmHoroscope>(&json_str)
        .with_context(|| format!("LLM output is not valid JSON for horoscope schema: {json_str}"))?;
    parsed.validate_and_into_result()
}
