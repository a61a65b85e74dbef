//! Day/night classification for the time glyph

use serde::Serialize;

use crate::parser::TimeOfDay;

/// Display mode of the time glyph
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DayNight {
    Day,
    Night,
}

impl DayNight {
    /// Glyph rendered next to the current time
    #[must_use]
    pub const fn glyph(self) -> &'static str {
        match self {
            DayNight::Day => "☀",
            DayNight::Night => "☾",
        }
    }
}

/// `Day` iff `sunrise <= now <= sunset`, both bounds inclusive
#[must_use]
pub fn classify(now: TimeOfDay, sunrise: TimeOfDay, sunset: TimeOfDay) -> DayNight {
    if sunrise <= now && now <= sunset {
        DayNight::Day
    } else {
        DayNight::Night
    }
}
