//! Payload decoding
//!
//! The data endpoint answers with `;`-delimited text, the geolocation and
//! weather services with JSON. Field contents are passed through as display
//! strings; only the arity is checked, except for times of day which feed the
//! day/night classifier.

use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::ParseError;

/// Field separator used by every delimited payload
pub const FIELD_DELIMITER: char = ';';

/// Background image and its attribution text
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImageRecord {
    pub url: String,
    pub attribution: String,
}

/// Uptime split into days, hours and minutes (decimal numerals, not validated)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UptimeRecord {
    pub days: String,
    pub hours: String,
    pub minutes: String,
}

/// Server clock: current date, current time and the date the server came up
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimeRecord {
    pub current_date: String,
    pub current_time: String,
    pub since_date: String,
}

/// Coarse geolocation resolved from the client IP
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
    pub city: String,
    pub region: String,
    pub country_code: String,
    /// IANA zone name (`"Europe/Bucharest"`), empty when the service omits it
    pub time_zone: String,
}

impl GeoPoint {
    /// Human-readable location line: `"<city>, <region>, <country>"`
    #[must_use]
    pub fn display_name(&self) -> String {
        format!("{}, {}, {}", self.city, self.region, self.country_code)
    }

    /// `"<lat>,<lon>"` as handed to the weather service
    #[must_use]
    pub fn coordinates(&self) -> String {
        format!("{},{}", self.latitude, self.longitude)
    }
}

/// Sunrise and sunset for the resolved location
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SunTimes {
    pub sunrise: TimeOfDay,
    pub sunset: TimeOfDay,
}

/// A wall-clock time on a fixed reference date, ordered by seconds since midnight
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeOfDay(NaiveTime);

/// Accepted layouts, 12-hour first ("3:04 pm", "7:27:02 AM"), then 24-hour
const TIME_FORMATS: &[&str] = &["%I:%M %p", "%I:%M:%S %p", "%H:%M", "%H:%M:%S"];

impl TimeOfDay {
    /// Parse an `h:m am/pm` style time of day
    ///
    /// # Errors
    /// Returns `ParseError::InvalidTimeOfDay` if no accepted layout matches.
    pub fn parse(raw: &str) -> Result<Self, ParseError> {
        let trimmed = raw.trim();
        TIME_FORMATS
            .iter()
            .find_map(|fmt| NaiveTime::parse_from_str(trimmed, fmt).ok())
            .map(Self)
            .ok_or_else(|| ParseError::InvalidTimeOfDay(raw.to_string()))
    }

    /// Build from 24-hour components
    #[must_use]
    pub fn from_hm(hour: u32, minute: u32) -> Option<Self> {
        NaiveTime::from_hms_opt(hour, minute, 0).map(Self)
    }

    /// Seconds since midnight, the comparable ordinal used for classification
    #[must_use]
    pub fn ordinal(self) -> u32 {
        self.0.num_seconds_from_midnight()
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%-I:%M %P"))
    }
}

/// Split `raw` on `;` and require exactly `N` fields
fn split_fields<'a, const N: usize>(
    raw: &'a str,
    kind: &'static str,
) -> Result<[&'a str; N], ParseError> {
    let fields: Vec<&str> = raw.split(FIELD_DELIMITER).collect();
    let found = fields.len();
    fields
        .try_into()
        .map_err(|_| ParseError::FieldCountMismatch {
            kind,
            expected: N,
            found,
        })
}

/// Decode `"<url>;<attribution>"`
///
/// # Errors
/// Returns `ParseError::FieldCountMismatch` unless there are exactly two fields.
pub fn parse_image(raw: &str) -> Result<ImageRecord, ParseError> {
    let [url, attribution] = split_fields::<2>(raw, "image")?;
    Ok(ImageRecord {
        url: url.to_string(),
        attribution: attribution.to_string(),
    })
}

/// Decode `"<days>;<hours>;<minutes>"`
///
/// # Errors
/// Returns `ParseError::FieldCountMismatch` unless there are exactly three fields.
pub fn parse_uptime(raw: &str) -> Result<UptimeRecord, ParseError> {
    let [days, hours, minutes] = split_fields::<3>(raw, "uptime")?;
    Ok(UptimeRecord {
        days: days.to_string(),
        hours: hours.to_string(),
        minutes: minutes.to_string(),
    })
}

/// Decode `"<current-date>;<current-time>;<since-date>"`
///
/// # Errors
/// Returns `ParseError::FieldCountMismatch` unless there are exactly three fields.
pub fn parse_time(raw: &str) -> Result<TimeRecord, ParseError> {
    let [current_date, current_time, since_date] = split_fields::<3>(raw, "time")?;
    Ok(TimeRecord {
        current_date: current_date.to_string(),
        current_time: current_time.to_string(),
        since_date: since_date.to_string(),
    })
}

/// The location action answers with the bare client IP, possibly newline-terminated
#[must_use]
pub fn parse_client_ip(raw: &str) -> Option<&str> {
    let ip = raw.trim();
    (!ip.is_empty()).then_some(ip)
}

#[derive(Deserialize)]
struct GeoResponse {
    #[serde(default)]
    city: String,
    #[serde(default, alias = "region")]
    region_name: String,
    #[serde(default)]
    country_code: String,
    #[serde(default, alias = "timezone")]
    time_zone: String,
    latitude: f64,
    longitude: f64,
}

/// Decode the IP-geolocation service answer
///
/// # Errors
/// Returns `ParseError::InvalidJson` if coordinates are missing or the body is not JSON.
pub fn parse_geo(body: &str) -> Result<GeoPoint, ParseError> {
    let resp: GeoResponse =
        serde_json::from_str(body).map_err(|e| ParseError::InvalidJson(e.to_string()))?;
    Ok(GeoPoint {
        latitude: resp.latitude,
        longitude: resp.longitude,
        city: resp.city,
        region: resp.region_name,
        country_code: resp.country_code,
        time_zone: resp.time_zone,
    })
}

#[derive(Deserialize)]
struct SunFields {
    sunrise: String,
    sunset: String,
}

// Weather services either expose the fields at the top level or under `results`
#[derive(Deserialize)]
#[serde(untagged)]
enum SunResponse {
    Flat(SunFields),
    Nested { results: SunFields },
}

/// Decode the weather service answer into sunrise/sunset
///
/// # Errors
/// Returns `ParseError::InvalidJson` for an unexpected shape and
/// `ParseError::InvalidTimeOfDay` if either time cannot be read.
pub fn parse_sun_times(body: &str) -> Result<SunTimes, ParseError> {
    let resp: SunResponse =
        serde_json::from_str(body).map_err(|e| ParseError::InvalidJson(e.to_string()))?;
    let fields = match resp {
        SunResponse::Flat(fields) | SunResponse::Nested { results: fields } => fields,
    };
    Ok(SunTimes {
        sunrise: TimeOfDay::parse(&fields.sunrise)?,
        sunset: TimeOfDay::parse(&fields.sunset)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[test]
    fn uptime_three_fields() {
        let rec = parse_uptime("12;5;42").unwrap();
        assert_eq!(
            rec,
            UptimeRecord {
                days: "12".to_string(),
                hours: "5".to_string(),
                minutes: "42".to_string(),
            }
        );
    }

    #[test]
    fn uptime_values_pass_through_unvalidated() {
        let rec = parse_uptime("99999999999999999999;0;007").unwrap();
        assert_eq!(rec.days, "99999999999999999999");
        assert_eq!(rec.minutes, "007");
    }

    #[rstest]
    #[case("", 1)]
    #[case("1;2", 2)]
    #[case("1;2;3;4", 4)]
    #[case("1;2;3;", 4)]
    fn uptime_wrong_arity(#[case] raw: &str, #[case] found: usize) {
        assert_eq!(
            parse_uptime(raw),
            Err(ParseError::FieldCountMismatch {
                kind: "uptime",
                expected: 3,
                found,
            })
        );
    }

    #[test]
    fn time_three_fields() {
        let rec = parse_time("October 18, 2026;3:04 pm;October 1, 2026").unwrap();
        assert_eq!(rec.current_date, "October 18, 2026");
        assert_eq!(rec.current_time, "3:04 pm");
        assert_eq!(rec.since_date, "October 1, 2026");
    }

    #[test]
    fn time_wrong_arity() {
        assert!(matches!(
            parse_time("October 18, 2026;3:04 pm"),
            Err(ParseError::FieldCountMismatch { expected: 3, found: 2, .. })
        ));
    }

    #[test]
    fn image_two_fields() {
        let rec = parse_image("https://www.bing.com/a.jpg;Lake (© Someone)").unwrap();
        assert_eq!(rec.url, "https://www.bing.com/a.jpg");
        assert_eq!(rec.attribution, "Lake (© Someone)");
    }

    #[test]
    fn image_attribution_with_delimiter_is_rejected() {
        assert!(matches!(
            parse_image("u;a;b"),
            Err(ParseError::FieldCountMismatch { kind: "image", expected: 2, found: 3 })
        ));
    }

    #[rstest]
    #[case("3:04 pm", 15, 4)]
    #[case("3:04 PM", 15, 4)]
    #[case("12:00 am", 0, 0)]
    #[case("12:30 pm", 12, 30)]
    #[case("7:27:02 AM", 7, 27)]
    #[case("  6:05 am ", 6, 5)]
    #[case("18:45", 18, 45)]
    fn time_of_day_layouts(#[case] raw: &str, #[case] hour: u32, #[case] minute: u32) {
        let parsed = TimeOfDay::parse(raw).unwrap();
        assert_eq!(parsed.ordinal() / 60, hour * 60 + minute);
    }

    #[rstest]
    #[case("")]
    #[case("noon")]
    #[case("25:00")]
    fn time_of_day_rejects(#[case] raw: &str) {
        assert!(matches!(
            TimeOfDay::parse(raw),
            Err(ParseError::InvalidTimeOfDay(_))
        ));
    }

    #[test]
    fn time_of_day_display() {
        let t = TimeOfDay::from_hm(15, 4).unwrap();
        assert_eq!(t.to_string(), "3:04 pm");
    }

    #[test]
    fn client_ip_trims_newline() {
        assert_eq!(parse_client_ip("203.0.113.7\n"), Some("203.0.113.7"));
        assert_eq!(parse_client_ip(" \n"), None);
    }

    #[test]
    fn geo_freegeoip_shape() {
        let body = r#"{"ip":"203.0.113.7","country_code":"RO","region_name":"Bucuresti",
            "city":"Bucharest","latitude":44.43,"longitude":26.1}"#;
        let geo = parse_geo(body).unwrap();
        assert_eq!(geo.display_name(), "Bucharest, Bucuresti, RO");
        assert_eq!(geo.coordinates(), "44.43,26.1");
        assert_eq!(geo.time_zone, "");
    }

    #[test]
    fn geo_reads_time_zone() {
        let body = r#"{"city":"Bucharest","region_name":"Bucuresti","country_code":"RO",
            "time_zone":"Europe/Bucharest","latitude":44.43,"longitude":26.1}"#;
        assert_eq!(parse_geo(body).unwrap().time_zone, "Europe/Bucharest");

        let aliased = r#"{"city":"Oslo","timezone":"Europe/Oslo","latitude":59.9,"longitude":10.7}"#;
        assert_eq!(parse_geo(aliased).unwrap().time_zone, "Europe/Oslo");
    }

    #[test]
    fn geo_region_alias() {
        let body = r#"{"city":"Oslo","region":"Oslo","country_code":"NO","latitude":59.9,"longitude":10.7}"#;
        assert_eq!(parse_geo(body).unwrap().region, "Oslo");
    }

    #[test]
    fn geo_missing_coordinates() {
        assert!(matches!(
            parse_geo(r#"{"city":"Nowhere"}"#),
            Err(ParseError::InvalidJson(_))
        ));
    }

    #[test]
    fn sun_times_flat_and_nested() {
        let flat = parse_sun_times(r#"{"sunrise":"6:12 am","sunset":"7:48 pm"}"#).unwrap();
        let nested = parse_sun_times(
            r#"{"results":{"sunrise":"6:12:00 AM","sunset":"7:48:00 PM"},"status":"OK"}"#,
        )
        .unwrap();
        assert_eq!(flat, nested);
        assert_eq!(flat.sunrise, TimeOfDay::from_hm(6, 12).unwrap());
        assert_eq!(flat.sunset, TimeOfDay::from_hm(19, 48).unwrap());
    }

    // Zone-local answer (tzid set) for Bucharest in late autumn
    #[test]
    fn sun_times_in_server_zone_classify_late_afternoon_as_day() {
        let sun = parse_sun_times(
            r#"{"results":{"sunrise":"7:32:10 AM","sunset":"6:31:40 PM"},"status":"OK","tzid":"Europe/Bucharest"}"#,
        )
        .unwrap();
        let now = TimeOfDay::parse("5:00 pm").unwrap();
        assert_eq!(
            crate::daynight::classify(now, sun.sunrise, sun.sunset),
            crate::daynight::DayNight::Day
        );
    }

    #[test]
    fn sun_times_bad_time() {
        assert!(matches!(
            parse_sun_times(r#"{"sunrise":"dawn","sunset":"7:48 pm"}"#),
            Err(ParseError::InvalidTimeOfDay(_))
        ));
    }
}
