use bedin_core::domain::day::DayCategory;
use bedin_core::domain::horoscope::{format_number, HoroscopeResult};
use std::fmt::Write;

pub fn days_table() -> String {
    let mut out = String::new();
    for day in DayCategory::ALL {
        let _ = writeln!(out, "{:<10} {} {}", day.id(), day.icon(), day.label());
    }
    out
}

fn join<T>(items: &[T], show: impl Fn(&T) -> String) -> String {
    items.iter().map(show).collect::<Vec<_>>().join(", ")
}

pub fn horoscope(result: &HoroscopeResult) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "ယနေ့ {} သားသမီးများအတွက်", result.day);
    let _ = writeln!(out, "ကံအင်အား: {}%", format_number(result.overall_luck_percentage));
    let _ = writeln!(out);
    let _ = writeln!(out, "{}", result.general_prediction);
    let _ = writeln!(out);
    let _ = writeln!(out, "🎨 {}", join(&result.lucky_colors, |c| c.clone()));
    let _ = writeln!(out, "🔢 {}", join(&result.lucky_numbers, |n| format_number(*n)));
    let _ = writeln!(out, "⛔ {}", join(&result.avoid_directions, |d| d.clone()));
    let _ = writeln!(out);
    let _ = writeln!(out, "[စီးပွားရေး နှင့် ငွေကြေး]\n{}\n", result.business_and_finance);
    let _ = writeln!(out, "[အချစ်ရေး နှင့် လူမှုရေး]\n{}\n", result.love_and_relationship);
    let _ = writeln!(out, "[ကျန်းမာရေး]\n{}\n", result.health);
    let _ = writeln!(out, "[ယနေ့အတွက် ယတြာနှင့် ကုသိုလ်]\n\"{}\"", result.yadayar_remedy);
    out
}
