use bedin_core::domain::day::DayCategory;
use bedin_core::domain::horoscope::{format_number, HoroscopeResult};
use bedin_core::horoscope::state::RequestState;
use std::fmt::Write;

const TITLE: &str = "၇ ရက်သား/သမီး ဟောစာတမ်း";
const SUBTITLE: &str = "ရိုးရာနက္ခတ်ဗေဒင်နှင့် ယတြာလမ်းညွှန် တစ်နေ့စာဟောစာတမ်း";
const PICK_DAY: &str = "မိမိမွေးဖွားရာ နေ့နံကို ရွေးချယ်ပါ";
const LOADING: &str = "ဟောစာတမ်း တွက်ချက်နေပါသည်...";
const FOOTER: &str = "ဤဟောစာတမ်းသည် နေ့စဉ် နက္ခတ်ခွင်နှင့် ဂြိုဟ်သွားဂြိုဟ်လာများအပေါ် မူတည်၍ ယေဘုယျ တွက်ချက်ထားခြင်းဖြစ်ပါသည်။";

pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

pub fn render(state: &RequestState) -> String {
    let mut body = String::new();

    let _ = write!(
        body,
        "<header><h1>{TITLE}</h1><p>{SUBTITLE}</p></header>\n<main>\n<section class=\"days\"><h2>{PICK_DAY}</h2>\n"
    );
    for day in DayCategory::ALL {
        body.push_str(&day_button(day, day == state.selected));
    }
    body.push_str("</section>\n");

    let submit_label = if state.loading {
        LOADING.to_string()
    } else {
        format!("{}အတွက် ဟောစာတမ်းဖတ်မည်", state.selected.label())
    };
    let disabled = if state.loading { " disabled" } else { "" };
    let _ = writeln!(
        body,
        "<form method=\"post\" action=\"/horoscope\"><button type=\"submit\"{disabled}>{submit_label}</button></form>"
    );

    if let Some(error) = &state.error {
        let _ = writeln!(body, "<p class=\"error\" role=\"alert\">{}</p>", escape_html(error));
    }

    if let Some(result) = &state.result {
        body.push_str(&render_result(result));
    }

    let _ = write!(body, "</main>\n<footer><p>{FOOTER}</p></footer>");

    format!(
        "<!doctype html>\n<html lang=\"my\">\n<head><meta charset=\"utf-8\"><title>{TITLE}</title></head>\n<body>\n{body}\n</body>\n</html>\n"
    )
}

fn day_button(day: DayCategory, selected: bool) -> String {
    let class = if selected { " selected" } else { "" };
    format!(
        "<form method=\"post\" action=\"/select/{id}\"><button type=\"submit\" class=\"day accent-{accent}{class}\" aria-pressed=\"{selected}\"><span>{icon}</span> <span>{label}</span></button></form>\n",
        id = day.id(),
        accent = day.accent(),
        icon = day.icon(),
        label = day.label(),
    )
}

fn chips<T>(items: &[T], show: impl Fn(&T) -> String) -> String {
    items
        .iter()
        .map(|item| format!("<li>{}</li>", escape_html(&show(item))))
        .collect()
}

fn render_result(result: &HoroscopeResult) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "<article class=\"result\">\n<section><strong>{}%</strong> <span>ကံအင်အား</span>\n<h3>ယနေ့ {} သားသမီးများအတွက်</h3>\n<p>{}</p></section>",
        format_number(result.overall_luck_percentage),
        escape_html(&result.day),
        escape_html(&result.general_prediction),
    );
    let _ = writeln!(
        out,
        "<section><h4>🎨 ကံကောင်းစေသော အရောင်များ</h4><ul>{}</ul></section>",
        chips(&result.lucky_colors, |c| c.clone())
    );
    let _ = writeln!(
        out,
        "<section><h4>🔢 ကံကောင်းစေသော ဂဏန်းများ</h4><ul>{}</ul></section>",
        chips(&result.lucky_numbers, |n| format_number(*n))
    );
    let _ = writeln!(
        out,
        "<section><h4>⛔ ရှောင်ကြဉ်ရမည့် အရပ်မျက်နှာ</h4><ul>{}</ul></section>",
        chips(&result.avoid_directions, |d| d.clone())
    );
    for (heading, text) in [
        ("စီးပွားရေး နှင့် ငွေကြေး", &result.business_and_finance),
        ("အချစ်ရေး နှင့် လူမှုရေး", &result.love_and_relationship),
        ("ကျန်းမာရေး", &result.health),
        ("ယနေ့အတွက် ယတြာနှင့် ကုသိုလ်", &result.yadayar_remedy),
    ] {
        let _ = writeln!(
            out,
            "<section><h4>{heading}</h4><p>{}</p></section>",
            escape_html(text)
        );
    }
    out.push_str("</article>\n");
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_result() -> HoroscopeResult {
        HoroscopeResult {
            day: "အင်္ဂါ".to_string(),
            overall_luck_percentage: 80.0,
            general_prediction: "<script>alert(1)</script>".to_string(),
            business_and_finance: "ငွေကြေး".to_string(),
            love_and_relationship: "အချစ်".to_string(),
            health: "ကျန်းမာ".to_string(),
            lucky_colors: vec!["အနီ".to_string()],
            lucky_numbers: vec![3.0, 7.0, 21.0],
            avoid_directions: vec!["မြောက်".to_string()],
            yadayar_remedy: "ပန်းကပ်ပါ".to_string(),
        }
    }

    #[test]
    fn escapes_markup() {
        assert_eq!(
            escape_html("<a href=\"x\">'&'</a>"),
            "&lt;a href=&quot;x&quot;&gt;&#39;&amp;&#39;&lt;/a&gt;"
        );
    }

    #[test]
    fn renders_every_day_and_marks_selection() {
        let state = RequestState {
            selected: DayCategory::Rahu,
            ..Default::default()
        };
        let html = render(&state);
        for day in DayCategory::ALL {
            assert!(html.contains(&format!("action=\"/select/{}\"", day.id())));
        }
        assert!(html.contains("accent-gray selected"));
        assert!(html.contains("ရာဟု (ဗုဒ္ဓဟူး ည)အတွက် ဟောစာတမ်းဖတ်မည်"));
        assert!(!html.contains("class=\"result\""));
    }

    #[test]
    fn renders_result_escaped() {
        let state = RequestState {
            selected: DayCategory::Tuesday,
            result: Some(sample_result()),
            ..Default::default()
        };
        let html = render(&state);
        assert!(html.contains("<strong>80%</strong>"));
        assert!(html.contains("<li>21</li>"));
        assert!(html.contains("&lt;script&gt;"));
        assert!(!html.contains("<script>"));
    }

    #[test]
    fn renders_error_and_loading() {
        let state = RequestState {
            loading: true,
            error: Some("failed".to_string()),
            ..Default::default()
        };
        let html = render(&state);
        assert!(html.contains("role=\"alert\">failed</p>"));
        assert!(html.contains(LOADING));
        assert!(html.contains(" disabled>"));
    }
}
