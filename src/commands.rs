//! One-shot command implementations
//!
//! Each command drives the same engine the dashboard uses, waits until its
//! requests have answered, then prints the result.

use color_eyre::eyre::{Result, bail};
use crossterm::style::Stylize;
use serde::Serialize;
use std::time::Duration;

use crate::config::Config;
use crate::daynight::DayNight;
use crate::engine::Engine;
use crate::style::UptimeyStyle;
use crate::view::{SlotId, ViewModel};

/// Everything the dashboard shows, as printed by `snapshot`
#[derive(Debug, Default, Serialize, PartialEq)]
pub struct Snapshot {
    pub days: Option<String>,
    pub hours: Option<String>,
    pub minutes: Option<String>,
    pub current_date: Option<String>,
    pub current_time: Option<String>,
    pub since_date: Option<String>,
    pub time_of_day: Option<DayNight>,
    pub location: Option<String>,
    pub coordinates: Option<String>,
    pub image: Option<String>,
    pub attribution: Option<String>,
}

impl Snapshot {
    #[must_use]
    pub fn from_engine(engine: &Engine) -> Self {
        let view = engine.view();
        let text = |slot| view.text(slot).map(str::to_string);
        Self {
            days: text(SlotId::Days),
            hours: text(SlotId::Hours),
            minutes: text(SlotId::Minutes),
            current_date: text(SlotId::CurrentDate),
            current_time: text(SlotId::CurrentTime),
            since_date: text(SlotId::SinceDate),
            time_of_day: view.time_icon(),
            location: text(SlotId::Location),
            coordinates: engine.session().location().map(|p| p.coordinates()),
            image: text(SlotId::Background),
            attribution: text(SlotId::Attribution),
        }
    }
}

/// How long a command waits for every request, chained lookups included
fn wait_limit(config: &Config) -> Duration {
    config.settings.request_timeout * 3
}

/// Fetch image, location, uptime and time once and print them
///
/// # Errors
/// Returns an error if the HTTP client cannot be built or JSON output fails.
pub async fn snapshot(config: &Config, json_output: bool) -> Result<()> {
    let (mut engine, mut rx) = Engine::from_config(config)?;
    engine.start();
    engine.run_until_idle(&mut rx, wait_limit(config)).await;

    let snapshot = Snapshot::from_engine(&engine);
    if json_output {
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
    } else {
        print_snapshot(&snapshot);
    }
    Ok(())
}

fn print_snapshot(snapshot: &Snapshot) {
    let value = |v: &Option<String>| match v {
        Some(v) => v.as_str().bold().to_string(),
        None => "unavailable".warning().to_string(),
    };

    println!("{}", "Uptime".header());
    println!("{}", "-".repeat(6));
    println!("{} {}", "Days:".dim(), value(&snapshot.days));
    println!("{} {}", "Hours:".dim(), value(&snapshot.hours));
    println!("{} {}", "Minutes:".dim(), value(&snapshot.minutes));
    println!("{} {}", "Online since:".dim(), value(&snapshot.since_date));
    println!();

    println!("{}", "Server Time".header());
    println!("{}", "-".repeat(11));
    println!("{} {}", "Date:".dim(), value(&snapshot.current_date));
    let glyph = snapshot.time_of_day.map_or("", DayNight::glyph);
    println!("{} {} {glyph}", "Time:".dim(), value(&snapshot.current_time));
    println!();

    println!("{}", "Location".header());
    println!("{}", "-".repeat(8));
    println!("{} {}", "Place:".dim(), value(&snapshot.location));
    if let Some(coordinates) = &snapshot.coordinates {
        println!("{} {}", "Coordinates:".dim(), coordinates.as_str().technical());
    }
    println!();

    if let Some(image) = &snapshot.image {
        println!("{} {}", "Background:".dim(), image.as_str().technical());
    }
    if let Some(attribution) = &snapshot.attribution {
        println!("{}", attribution.as_str().dim());
    }
}

/// Fetch the uptime and print the share window URL
///
/// # Errors
/// Returns an error if the HTTP client cannot be built or no uptime arrived.
pub async fn share(config: &Config) -> Result<()> {
    let (mut engine, mut rx) = Engine::from_config(config)?;
    engine.poll();
    engine.run_until_idle(&mut rx, wait_limit(config)).await;

    if uptime_missing(engine.view()) {
        bail!("Could not fetch uptime from {}", config.settings.endpoint);
    }

    let intent = engine.share();
    println!("{}", intent.text);
    println!();
    println!("{}", intent.to_url(&config.share.target).technical());
    Ok(())
}

fn uptime_missing(view: &ViewModel) -> bool {
    [SlotId::Days, SlotId::Hours, SlotId::Minutes]
        .into_iter()
        .any(|slot| view.text(slot).is_none())
}

/// Send the session-clear signal
///
/// # Errors
/// Returns an error if the HTTP client cannot be built.
pub async fn clear(config: &Config) -> Result<()> {
    let (mut engine, mut rx) = Engine::from_config(config)?;
    engine.clear_session();
    engine.run_until_idle(&mut rx, wait_limit(config)).await;
    println!("{}", "Session clear sent".success());
    Ok(())
}
