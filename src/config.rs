//! Configuration management
//!
//! Handles loading, parsing, and validating the TOML configuration file.
//! Covers the data endpoint, the chained lookup services, timings and the
//! share target.

use color_eyre::eyre::{ContextCompat, Result, WrapErr, bail};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::info;

// ============================================================================
// Public Configuration Types
// ============================================================================

/// Main configuration structure
#[derive(Debug, Clone)]
pub struct Config {
    pub settings: Settings,
    pub share: ShareConfig,
}

/// Endpoint, lookup services and timings
#[derive(Debug, Clone)]
pub struct Settings {
    /// Data endpoint queried with `?action=<kind>[&flag=<flag>]`
    pub endpoint: String,
    /// IP-geolocation URL template, `{ip}` is substituted
    pub geo_url: String,
    /// Weather URL template, `{location}`, `{lat}`, `{lon}` and `{tz}` are substituted
    pub sun_url: String,
    /// Periodic uptime/time refresh, `None` when disabled
    pub refresh_interval: Option<Duration>,
    /// Length of an entering/pulse transition
    pub animation: Duration,
    /// Fixed busy indicator duration after a manual refresh
    pub busy: Duration,
    pub request_timeout: Duration,
    pub log_level: String,
}

/// Share intent target
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShareConfig {
    /// URL embedded in the share text
    pub url: String,
    /// Share window base URL
    pub target: String,
    pub hashtags: Vec<String>,
}

// ============================================================================
// Config File Deserialization (TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    settings: SettingsFile,
    #[serde(default)]
    share: ShareFile,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
struct SettingsFile {
    endpoint: String,
    geo_url: String,
    sun_url: String,
    refresh_interval_secs: u64,
    animation_ms: u64,
    busy_ms: u64,
    request_timeout_secs: u64,
    log_level: String,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
struct ShareFile {
    url: String,
    target: String,
    hashtags: Vec<String>,
}

impl Default for SettingsFile {
    fn default() -> Self {
        Self {
            endpoint: "http://localhost:8000/script/ajax.php".to_string(),
            geo_url: "https://freegeoip.app/json/{ip}".to_string(),
            sun_url: "https://api.sunrise-sunset.org/json?lat={lat}&lng={lon}&tzid={tz}".to_string(),
            refresh_interval_secs: 60,
            animation_ms: 600,
            busy_ms: 1000,
            request_timeout_secs: 10,
            log_level: "info".to_string(),
        }
    }
}

impl Default for ShareFile {
    fn default() -> Self {
        Self {
            url: "https://github.com/stefanbc/uptimey".to_string(),
            target: "http://twitter.com/share".to_string(),
            hashtags: vec!["uptimey".to_string(), "devbranch".to_string()],
        }
    }
}

const DEFAULT_CONFIG: &str = r#"# Uptimey Configuration
#
# Terminal dashboard for server uptime, time, location and day/night state.

[settings]
endpoint = "http://localhost:8000/script/ajax.php"  # Data endpoint (action=image|location|uptime|time|advanced|clear)
geo_url = "https://freegeoip.app/json/{ip}"          # IP geolocation, {ip} is replaced by the client IP
sun_url = "https://api.sunrise-sunset.org/json?lat={lat}&lng={lon}&tzid={tz}"  # Sunrise/sunset in the server zone, {location} {lat} {lon} {tz}
refresh_interval_secs = 60   # Periodic uptime/time refresh, 0 disables
animation_ms = 600           # Highlight duration for updated values
busy_ms = 1000               # Refresh indicator duration
request_timeout_secs = 10
log_level = "info"           # error, warn, info, debug, trace

[share]
url = "https://github.com/stefanbc/uptimey"
target = "http://twitter.com/share"
hashtags = ["uptimey", "devbranch"]
"#;

// ============================================================================
// Config Implementation
// ============================================================================

impl Default for Config {
    fn default() -> Self {
        Self::from_parts(SettingsFile::default(), ShareFile::default())
    }
}

impl Config {
    /// Load configuration from the default XDG config path
    ///
    /// # Errors
    /// Returns an error if the file cannot be created, read, parsed or validated.
    pub fn load() -> Result<Self> {
        let config_path = Self::get_config_path()?;

        if !config_path.exists() {
            info!("Creating default config at {:?}", config_path);
            Self::create_default_config(&config_path)?;
        }

        Self::load_from_path(&config_path)
    }

    /// Load configuration from an explicit path
    ///
    /// # Errors
    /// Returns an error if the file cannot be read, parsed or validated.
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .wrap_err_with(|| format!("Failed to read config: {path:?}"))?;
        Self::from_toml(&contents).wrap_err_with(|| format!("Invalid config: {path:?}"))
    }

    /// Parse and validate configuration text
    ///
    /// # Errors
    /// Returns an error if the TOML is malformed or a value is out of range.
    pub fn from_toml(contents: &str) -> Result<Self> {
        let file: ConfigFile = toml::from_str(contents).wrap_err("Failed to parse TOML")?;
        let config = Self::from_parts(file.settings, file.share);
        config.validate()?;
        Ok(config)
    }

    fn from_parts(settings: SettingsFile, share: ShareFile) -> Self {
        let settings = Settings {
            endpoint: settings.endpoint,
            geo_url: settings.geo_url,
            sun_url: settings.sun_url,
            refresh_interval: (settings.refresh_interval_secs > 0)
                .then(|| Duration::from_secs(settings.refresh_interval_secs)),
            animation: Duration::from_millis(settings.animation_ms),
            busy: Duration::from_millis(settings.busy_ms),
            request_timeout: Duration::from_secs(settings.request_timeout_secs),
            log_level: settings.log_level,
        };
        let share = ShareConfig {
            url: share.url,
            target: share.target,
            hashtags: share.hashtags,
        };
        Self { settings, share }
    }

    fn validate(&self) -> Result<()> {
        let s = &self.settings;

        match s.log_level.as_str() {
            "error" | "warn" | "info" | "debug" | "trace" => {}
            level => bail!(
                "Invalid log_level '{level}'. Must be: error, warn, info, debug, or trace"
            ),
        }

        if !(s.endpoint.starts_with("http://") || s.endpoint.starts_with("https://")) {
            bail!("endpoint must be an http(s) URL, got '{}'", s.endpoint);
        }

        if !s.geo_url.contains("{ip}") {
            bail!("geo_url must contain the {{ip}} placeholder");
        }

        if !["{location}", "{lat}", "{lon}"]
            .iter()
            .any(|p| s.sun_url.contains(p))
        {
            bail!("sun_url must contain {{location}} or {{lat}}/{{lon}} placeholders");
        }

        if s.animation.is_zero() {
            bail!("animation_ms must be greater than 0");
        }

        if s.busy.is_zero() {
            bail!("busy_ms must be greater than 0");
        }

        if s.request_timeout.is_zero() {
            bail!("request_timeout_secs must be greater than 0");
        }

        if self.share.target.is_empty() {
            bail!("share.target must not be empty");
        }

        Ok(())
    }

    /// Get the XDG config path for Uptimey
    ///
    /// # Errors
    /// Returns an error if the config directory cannot be determined or created.
    pub fn get_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Could not determine config directory")?
            .join("uptimey");
        fs::create_dir_all(&config_dir)
            .wrap_err_with(|| format!("Failed to create config dir: {config_dir:?}"))?;
        Ok(config_dir.join("config.toml"))
    }

    fn create_default_config(path: &Path) -> Result<()> {
        fs::write(path, DEFAULT_CONFIG)
            .wrap_err_with(|| format!("Failed to write config: {path:?}"))?;

        eprintln!("Created default config at: {path:?}");
        eprintln!();
        eprintln!("Next steps:");
        eprintln!("  1. Point 'endpoint' at your Uptimey server");
        eprintln!("  2. Run 'uptimey validate' to check your config");
        eprintln!("  3. Run 'uptimey' to open the dashboard");
        eprintln!();

        Ok(())
    }

    /// Print a human-readable summary of the configuration
    pub fn print_summary(&self) {
        let s = &self.settings;
        println!("✓ Configuration valid\n");

        println!("Settings:");
        println!("  endpoint: {}", s.endpoint);
        println!("  geo_url: {}", s.geo_url);
        println!("  sun_url: {}", s.sun_url);
        match s.refresh_interval {
            Some(interval) => println!("  refresh_interval: {}s", interval.as_secs()),
            None => println!("  refresh_interval: disabled"),
        }
        println!("  animation: {}ms", s.animation.as_millis());
        println!("  busy: {}ms", s.busy.as_millis());
        println!("  request_timeout: {}s", s.request_timeout.as_secs());
        println!("  log_level: {}", s.log_level);

        println!("\nShare:");
        println!("  url: {}", self.share.url);
        println!("  target: {}", self.share.target);
        println!("  hashtags: {}", self.share.hashtags.join(", "));
    }
}
