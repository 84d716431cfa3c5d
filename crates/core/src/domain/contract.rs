use crate::domain::horoscope::HoroscopeResult;
use anyhow::ensure;
use serde::{Deserialize, Serialize};

/// Field names the model must emit, in schema order.
pub const REQUIRED_FIELDS: [&str; 10] = [
    "day",
    "overall_luck_percentage",
    "general_prediction",
    "business_and_finance",
    "love_and_relationship",
    "health",
    "lucky_colors",
    "lucky_numbers",
    "avoid_directions",
    "yadayar_remedy",
];

/// Raw shape of the model output. Every field is required: serde rejects a
/// payload with any of them missing or null.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmHoroscope {
    pub day: String,
    pub overall_luck_percentage: f64,
    pub general_prediction: String,
    pub business_and_finance: String,
    pub love_and_relationship: String,
    pub health: String,
    pub lucky_colors: Vec<String>,
    pub lucky_numbers: Vec<f64>,
    pub avoid_directions: Vec<String>,
    pub yadayar_remedy: String,
}

impl LlmHoroscope {
    pub fn validate_and_into_result(self) -> anyhow::Result<HoroscopeResult> {
        let luck = self.overall_luck_percentage;
        ensure!(
            luck.is_finite() && (0.0..=100.0).contains(&luck),
            "overall_luck_percentage must be between 0 and 100 (got {luck})"
        );

        ensure!(
            self.lucky_numbers.iter().all(|n| n.is_finite()),
            "lucky_numbers must be finite"
        );

        Ok(HoroscopeResult {
            day: non_empty("day", self.day)?,
            overall_luck_percentage: luck,
            general_prediction: non_empty("general_prediction", self.general_prediction)?,
            business_and_finance: non_empty("business_and_finance", self.business_and_finance)?,
            love_and_relationship: non_empty("love_and_relationship", self.love_and_relationship)?,
            health: non_empty("health", self.health)?,
            lucky_colors: trim_all(self.lucky_colors),
            lucky_numbers: self.lucky_numbers,
            avoid_directions: trim_all(self.avoid_directions),
            yadayar_remedy: non_empty("yadayar_remedy", self.yadayar_remedy)?,
        })
    }
}

fn non_empty(field: &str, value: String) -> anyhow::Result<String> {
    let trimmed = value.trim().to_string();
    ensure!(!trimmed.is_empty(), "{field} must be non-empty");
    Ok(trimmed)
}

fn trim_all(values: Vec<String>) -> Vec<String> {
    values
        .into_iter()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
