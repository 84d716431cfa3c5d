use crate::domain::contract::REQUIRED_FIELDS;
use crate::domain::day::DayCategory;
use crate::llm::StructuredRequest;
use crate::time::mm_calendar;
use chrono::NaiveDate;
use serde_json::json;

pub fn build_request(day: DayCategory, date: NaiveDate) -> StructuredRequest {
    StructuredRequest {
        system_instruction: system_instruction(date),
        prompt: user_prompt(day),
        response_schema: response_schema(),
    }
}

pub fn system_instruction(date: NaiveDate) -> String {
    [
        "You are an elite Myanmar astrologer (နာမည်ကြီး မြန်မာ့ဗေဒင်ပညာရှင်).".to_string(),
        "Provide a detailed, highly accurate daily horoscope for a person born on the requested day of the week.".to_string(),
        format!(
            "The prediction should be for TODAY (Current Date: {}).",
            mm_calendar::display_date(date)
        ),
        "Use traditional Myanmar astrological concepts (Mahabote, Natkhat) combined with practical advice.".to_string(),
        "Tone: Professional, mysterious, encouraging, and culturally authentic Burmese.".to_string(),
        "overall_luck_percentage must be a number between 0 and 100.".to_string(),
        "Output MUST be in Burmese language.".to_string(),
    ]
    .join("\n")
}

pub fn user_prompt(day: DayCategory) -> String {
    format!(
        "ယနေ့အတွက် {} သားသမီးများ၏ တစ်နေ့စာ ဟောစာတမ်းကို အသေးစိတ် ဟောကြားပေးပါ။",
        day.label()
    )
}

/// Response schema in the Gemini OpenAPI subset. Every field is required.
pub fn response_schema() -> serde_json::Value {
    let string = json!({"type": "STRING"});
    let number = json!({"type": "NUMBER"});
    let strings = json!({"type": "ARRAY", "items": {"type": "STRING"}});
    let numbers = json!({"type": "ARRAY", "items": {"type": "NUMBER"}});

    json!({
        "type": "OBJECT",
        "properties": {
            "day": string,
            "overall_luck_percentage": number,
            "general_prediction": string,
            "business_and_finance": string,
            "love_and_relationship": string,
            "health": string,
            "lucky_colors": strings,
            "lucky_numbers": numbers,
            "avoid_directions": strings,
            "yadayar_remedy": string,
        },
        "required": REQUIRED_FIELDS,
    })
}
