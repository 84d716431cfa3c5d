use anyhow::Context;
use chrono::{DateTime, FixedOffset, NaiveDate, Utc};

// Myanmar Standard Time is UTC+06:30 with no daylight saving.
const MMT_OFFSET_SECS: i32 = 6 * 3600 + 30 * 60;

pub fn mmt() -> anyhow::Result<FixedOffset> {
    FixedOffset::east_opt(MMT_OFFSET_SECS).context("invalid MMT offset")
}

/// Calendar date in Myanmar at `now_utc`.
pub fn today(now_utc: DateTime<Utc>) -> anyhow::Result<NaiveDate> {
    Ok(now_utc.with_timezone(&mmt()?).date_naive())
}

/// Date as shown to the model, e.g. `18/10/2026 (Sunday)`.
pub fn display_date(date: NaiveDate) -> String {
    date.format("%-d/%-m/%Y (%A)").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn rolls_over_at_mmt_midnight() {
        // 2026-10-17 17:29 UTC = 23:59 MMT.
        let before = Utc.with_ymd_and_hms(2026, 10, 17, 17, 29, 0).unwrap();
        assert_eq!(today(before).unwrap(), NaiveDate::from_ymd_opt(2026, 10, 17).unwrap());

        // 2026-10-17 17:30 UTC = 00:00 MMT next day.
        let after = Utc.with_ymd_and_hms(2026, 10, 17, 17, 30, 0).unwrap();
        assert_eq!(today(after).unwrap(), NaiveDate::from_ymd_opt(2026, 10, 18).unwrap());
    }

    #[test]
    fn display_date_is_day_month_year() {
        let d = NaiveDate::from_ymd_opt(2026, 10, 18).unwrap();
        assert_eq!(display_date(d), "18/10/2026 (Sunday)");
    }
}
