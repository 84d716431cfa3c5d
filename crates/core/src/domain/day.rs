use chrono::{Datelike, NaiveDateTime, Timelike, Weekday};
use serde::{Deserialize, Serialize};
use std::fmt;

// Wednesday births from noon onward belong to Rahu.
const RAHU_START_HOUR: u32 = 12;

/// The 8 day groupings of Myanmar astrology: the 7 weekdays with Wednesday
/// split at noon into Wednesday and Rahu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DayCategory {
    Sunday,
    Monday,
    Tuesday,
    Wednesday,
    Rahu,
    Thursday,
    Friday,
    Saturday,
}

impl DayCategory {
    pub const ALL: [DayCategory; 8] = [
        DayCategory::Sunday,
        DayCategory::Monday,
        DayCategory::Tuesday,
        DayCategory::Wednesday,
        DayCategory::Rahu,
        DayCategory::Thursday,
        DayCategory::Friday,
        DayCategory::Saturday,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            DayCategory::Sunday => "sunday",
            DayCategory::Monday => "monday",
            DayCategory::Tuesday => "tuesday",
            DayCategory::Wednesday => "wednesday",
            DayCategory::Rahu => "rahu",
            DayCategory::Thursday => "thursday",
            DayCategory::Friday => "friday",
            DayCategory::Saturday => "saturday",
        }
    }

    /// Burmese display label. This is also what the prompt embeds.
    pub fn label(&self) -> &'static str {
        match self {
            DayCategory::Sunday => "တနင်္ဂနွေ",
            DayCategory::Monday => "တနင်္လာ",
            DayCategory::Tuesday => "အင်္ဂါ",
            DayCategory::Wednesday => "ဗုဒ္ဓဟူး (နေ့)",
            DayCategory::Rahu => "ရာဟု (ဗုဒ္ဓဟူး ည)",
            DayCategory::Thursday => "ကြာသပတေး",
            DayCategory::Friday => "သောကြာ",
            DayCategory::Saturday => "စနေ",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            DayCategory::Sunday => "☀️",
            DayCategory::Monday => "🌙",
            DayCategory::Tuesday => "🦁",
            DayCategory::Wednesday => "🐘",
            DayCategory::Rahu => "🐗",
            DayCategory::Thursday => "🐀",
            DayCategory::Friday => "🐹",
            DayCategory::Saturday => "🐉",
        }
    }

    /// Accent colour name used by front ends.
    pub fn accent(&self) -> &'static str {
        match self {
            DayCategory::Sunday => "red",
            DayCategory::Monday => "yellow",
            DayCategory::Tuesday => "pink",
            DayCategory::Wednesday => "green",
            DayCategory::Rahu => "gray",
            DayCategory::Thursday => "amber",
            DayCategory::Friday => "blue",
            DayCategory::Saturday => "purple",
        }
    }

    /// Resolve the category someone born at `born` belongs to.
    pub fn from_birth(born: NaiveDateTime) -> Self {
        match born.date().weekday() {
            Weekday::Sun => DayCategory::Sunday,
            Weekday::Mon => DayCategory::Monday,
            Weekday::Tue => DayCategory::Tuesday,
            Weekday::Wed if born.hour() >= RAHU_START_HOUR => DayCategory::Rahu,
            Weekday::Wed => DayCategory::Wednesday,
            Weekday::Thu => DayCategory::Thursday,
            Weekday::Fri => DayCategory::Friday,
            Weekday::Sat => DayCategory::Saturday,
        }
    }
}

impl Default for DayCategory {
    fn default() -> Self {
        Self::ALL[0]
    }
}

impl fmt::Display for DayCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl std::str::FromStr for DayCategory {
    type Err = anyhow::Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let lower = value.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|day| day.id() == lower)
            .ok_or_else(|| {
                let supported: Vec<&str> = Self::ALL.iter().map(|d| d.id()).collect();
                anyhow::anyhow!(
                    "Unknown day '{value}'. Supported days: {}.",
                    supported.join(", ")
                )
            })
    }
}

/// Serializable view of one table row, for front ends.
#[derive(Debug, Clone, Serialize)]
pub struct DayInfo {
    pub id: &'static str,
    pub label: &'static str,
    pub icon: &'static str,
    pub accent: &'static str,
}

impl From<DayCategory> for DayInfo {
    fn from(day: DayCategory) -> Self {
        Self {
            id: day.id(),
            label: day.label(),
            icon: day.icon(),
            accent: day.accent(),
        }
    }
}
