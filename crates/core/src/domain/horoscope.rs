use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HoroscopeResult {
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

/// Format a model-provided number without a trailing `.0` for whole values.
pub fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{value}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whole_numbers_drop_the_fraction() {
        assert_eq!(format_number(21.0), "21");
        assert_eq!(format_number(72.5), "72.5");
        assert_eq!(format_number(0.0), "0");
    }
}
