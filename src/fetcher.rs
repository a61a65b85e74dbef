//! Data fetching
//!
//! `DataSource` is the single backend endpoint (`?action=<kind>`), `GeoLookup`
//! the two chained external lookups (IP geolocation, then sunrise/sunset).
//! Both are traits so the engine can be driven by in-memory sources in tests.

use async_trait::async_trait;
use color_eyre::eyre::{Result, WrapErr};
use reqwest::{Client, RequestBuilder};
use std::fmt;
use tracing::{debug, warn};

use crate::config::Settings;
use crate::error::FetchError;
use crate::parser::{self, GeoPoint, SunTimes};

/// Kinds of data served by the endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DataKind {
    Image,
    Location,
    Uptime,
    Time,
    Advanced,
    Clear,
}

impl DataKind {
    /// Value of the `action` query parameter
    #[must_use]
    pub const fn action(self) -> &'static str {
        match self {
            DataKind::Image => "image",
            DataKind::Location => "location",
            DataKind::Uptime => "uptime",
            DataKind::Time => "time",
            DataKind::Advanced => "advanced",
            DataKind::Clear => "clear",
        }
    }
}

impl fmt::Display for DataKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.action())
    }
}

/// Flag sent with manual refreshes; opaque to the client
pub const REFRESH_FLAG: &str = "refresh";

/// The backend data endpoint
#[async_trait]
pub trait DataSource: Send + Sync {
    /// Issue one request for `kind` and return the raw body
    async fn fetch(&self, kind: DataKind, flag: Option<&str>) -> Result<String, FetchError>;
}

/// External services chained after a location fetch
#[async_trait]
pub trait GeoLookup: Send + Sync {
    /// Resolve coarse geolocation for a client IP
    async fn locate(&self, ip: &str) -> Result<GeoPoint, FetchError>;

    /// Resolve sunrise/sunset for a location
    async fn sun_times(&self, at: &GeoPoint) -> Result<SunTimes, FetchError>;
}

/// Build the shared HTTP client with the configured timeout
///
/// # Errors
/// Returns an error if the TLS backend cannot be initialized.
pub fn build_client(settings: &Settings) -> Result<Client> {
    Client::builder()
        .timeout(settings.request_timeout)
        .user_agent(concat!("uptimey/", env!("CARGO_PKG_VERSION")))
        .build()
        .wrap_err("Failed to build HTTP client")
}

/// Send a request and return the body of a 2xx response
async fn get_text(request: RequestBuilder, label: &str) -> Result<String, FetchError> {
    let response = request.send().await.map_err(|e| {
        warn!("[{label}] request failed: {e}");
        FetchError::Network(e.to_string())
    })?;

    let status = response.status();
    debug!("[{label}] Response Status: {}", status.as_u16());

    if !status.is_success() {
        return Err(FetchError::Status {
            status: status.as_u16(),
            url: response.url().to_string(),
        });
    }

    response
        .text()
        .await
        .map_err(|e| FetchError::Decode(e.to_string()))
}

/// `DataSource` over HTTP GET
pub struct HttpDataSource {
    client: Client,
    endpoint: String,
}

impl HttpDataSource {
    #[must_use]
    pub fn new(client: Client, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
        }
    }
}

#[async_trait]
impl DataSource for HttpDataSource {
    async fn fetch(&self, kind: DataKind, flag: Option<&str>) -> Result<String, FetchError> {
        debug!("[endpoint] GET action={kind} flag={flag:?}");
        let mut request = self
            .client
            .get(&self.endpoint)
            .query(&[("action", kind.action())]);
        if let Some(flag) = flag {
            request = request.query(&[("flag", flag)]);
        }
        get_text(request, kind.action()).await
    }
}

/// `GeoLookup` backed by URL templates from the config
pub struct HttpGeoLookup {
    client: Client,
    geo_url: String,
    sun_url: String,
}

impl HttpGeoLookup {
    #[must_use]
    pub fn new(client: Client, geo_url: impl Into<String>, sun_url: impl Into<String>) -> Self {
        Self {
            client,
            geo_url: geo_url.into(),
            sun_url: sun_url.into(),
        }
    }

    fn geo_request_url(&self, ip: &str) -> String {
        self.geo_url.replace("{ip}", &urlencoding::encode(ip))
    }

    fn sun_request_url(&self, at: &GeoPoint) -> String {
        self.sun_url
            .replace("{location}", &urlencoding::encode(&at.coordinates()))
            .replace("{lat}", &at.latitude.to_string())
            .replace("{lon}", &at.longitude.to_string())
            .replace("{tz}", &urlencoding::encode(&at.time_zone))
    }
}

#[async_trait]
impl GeoLookup for HttpGeoLookup {
    async fn locate(&self, ip: &str) -> Result<GeoPoint, FetchError> {
        let url = self.geo_request_url(ip);
        let body = get_text(self.client.get(&url), "geo").await?;
        Ok(parser::parse_geo(&body)?)
    }

    async fn sun_times(&self, at: &GeoPoint) -> Result<SunTimes, FetchError> {
        let url = self.sun_request_url(at);
        let body = get_text(self.client.get(&url), "sun").await?;
        Ok(parser::parse_sun_times(&body)?)
    }
}
