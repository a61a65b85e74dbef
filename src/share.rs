//! Social share payload built from the displayed uptime

use serde::Serialize;

use crate::config::ShareConfig;
use crate::parser::UptimeRecord;

/// Composed share payload, handed to an external share window
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShareIntent {
    pub url: String,
    pub text: String,
    pub hashtags: Vec<String>,
}

/// A field counts as zero when it reads as the number zero, or is blank
fn is_zero(value: &str) -> bool {
    let value = value.trim();
    value.is_empty() || value.parse::<f64>().is_ok_and(|n| n == 0.0)
}

/// `"2 hours 15 minutes"`: non-zero fields in order, zero fields omitted
#[must_use]
pub fn uptime_phrase(uptime: &UptimeRecord) -> String {
    [
        (&uptime.days, "days"),
        (&uptime.hours, "hours"),
        (&uptime.minutes, "minutes"),
    ]
    .into_iter()
    .filter(|(value, _)| !is_zero(value))
    .map(|(value, unit)| format!("{value} {unit}"))
    .collect::<Vec<_>>()
    .join(" ")
}

/// Build the share intent for the given uptime
#[must_use]
pub fn compose(uptime: &UptimeRecord, config: &ShareConfig) -> ShareIntent {
    ShareIntent {
        url: config.url.clone(),
        text: format!(
            "My server has been online for {}. Can you beat this uptime? via",
            uptime_phrase(uptime)
        ),
        hashtags: config.hashtags.clone(),
    }
}

impl ShareIntent {
    /// Render the share window URL on top of `target`
    #[must_use]
    pub fn to_url(&self, target: &str) -> String {
        format!(
            "{target}?url={}&text={}&hashtags={}",
            urlencoding::encode(&self.url),
            urlencoding::encode(&self.text),
            urlencoding::encode(&self.hashtags.join(",")),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use test_case::test_case;

    fn uptime(days: &str, hours: &str, minutes: &str) -> UptimeRecord {
        UptimeRecord {
            days: days.to_string(),
            hours: hours.to_string(),
            minutes: minutes.to_string(),
        }
    }

    #[test_case("3", "2", "15" => "3 days 2 hours 15 minutes" ; "all fields")]
    #[test_case("0", "2", "15" => "2 hours 15 minutes" ; "zero days omitted")]
    #[test_case("4", "0", "0" => "4 days" ; "only days")]
    #[test_case("1", "0", "5" => "1 days 5 minutes" ; "gap in the middle")]
    #[test_case("00", "", "7" => "7 minutes" ; "padded zero and blank")]
    #[test_case("0", "0", "0" => "" ; "all zero")]
    fn phrase(days: &str, hours: &str, minutes: &str) -> String {
        uptime_phrase(&uptime(days, hours, minutes))
    }

    #[test]
    fn compose_embeds_phrase_without_zero_days() {
        let config = Config::default().share;
        let intent = compose(&uptime("0", "2", "15"), &config);
        assert!(intent.text.contains("2 hours 15 minutes"));
        assert!(!intent.text.contains("0 days"));
        assert_eq!(intent.url, "https://github.com/stefanbc/uptimey");
        assert_eq!(intent.hashtags, vec!["uptimey", "devbranch"]);
    }

    #[test]
    fn compose_all_zero_has_no_units() {
        let intent = compose(&uptime("0", "0", "0"), &Config::default().share);
        assert_eq!(
            intent.text,
            "My server has been online for . Can you beat this uptime? via"
        );
        for unit in ["days", "hours", "minutes"] {
            assert!(!intent.text.contains(unit));
        }
    }

    #[test]
    fn share_url_is_encoded() {
        let config = Config::default().share;
        let intent = compose(&uptime("1", "0", "0"), &config);
        let url = intent.to_url(&config.target);
        assert!(url.starts_with("http://twitter.com/share?url=https%3A%2F%2Fgithub.com"));
        assert!(url.contains("text=My%20server%20has%20been%20online%20for%201%20days."));
        assert!(url.ends_with("&hashtags=uptimey%2Cdevbranch"));
    }
}
