#![allow(dead_code)]

//! In-memory data sources for engine tests

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use crate::config::Config;
use crate::error::FetchError;
use crate::fetcher::{DataKind, DataSource, GeoLookup};
use crate::parser::{GeoPoint, SunTimes, TimeOfDay};

/// Default config with short transitions so tests settle quickly
pub(crate) fn test_config() -> Config {
    let mut config = Config::default();
    config.settings.animation = Duration::from_millis(5);
    config.settings.busy = Duration::from_millis(20);
    config
}

/// Canned endpoint answers plus a log of every request
#[derive(Default)]
pub(crate) struct MockSource {
    responses: Mutex<HashMap<DataKind, Result<String, FetchError>>>,
    calls: Mutex<Vec<(DataKind, Option<String>)>>,
    stall: bool,
}

impl MockSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer `kind` with `body`
    #[must_use]
    pub fn with(self, kind: DataKind, body: &str) -> Self {
        self.set(kind, Ok(body.to_string()));
        self
    }

    /// Never answer any request
    #[must_use]
    pub fn stalling(mut self) -> Self {
        self.stall = true;
        self
    }

    pub fn set(&self, kind: DataKind, result: Result<String, FetchError>) {
        self.responses.lock().unwrap().insert(kind, result);
    }

    pub fn calls(&self) -> Vec<(DataKind, Option<String>)> {
        self.calls.lock().unwrap().clone()
    }

    pub fn count(&self, kind: DataKind) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|(k, _)| *k == kind)
            .count()
    }
}

#[async_trait]
impl DataSource for MockSource {
    async fn fetch(&self, kind: DataKind, flag: Option<&str>) -> Result<String, FetchError> {
        self.calls
            .lock()
            .unwrap()
            .push((kind, flag.map(str::to_string)));
        if self.stall {
            std::future::pending::<()>().await;
        }
        self.responses
            .lock()
            .unwrap()
            .get(&kind)
            .cloned()
            .unwrap_or_else(|| {
                Err(FetchError::Status {
                    status: 404,
                    url: format!("mock://endpoint?action={kind}"),
                })
            })
    }
}

/// Chained lookups with fixed answers and an optional latency
pub(crate) struct MockGeo {
    point: Result<GeoPoint, FetchError>,
    sun: Result<SunTimes, FetchError>,
    delay: Duration,
    located: Mutex<Vec<String>>,
}

impl MockGeo {
    /// Bucharest, sun from 6:00 am to 8:00 pm
    pub fn resolving() -> Self {
        Self {
            point: Ok(GeoPoint {
                latitude: 44.43,
                longitude: 26.1,
                city: "Bucharest".to_string(),
                region: "Bucuresti".to_string(),
                country_code: "RO".to_string(),
                time_zone: "Europe/Bucharest".to_string(),
            }),
            sun: Ok(SunTimes {
                sunrise: TimeOfDay::from_hm(6, 0).unwrap(),
                sunset: TimeOfDay::from_hm(20, 0).unwrap(),
            }),
            delay: Duration::ZERO,
            located: Mutex::new(Vec::new()),
        }
    }

    /// Geolocation service unreachable
    pub fn failing() -> Self {
        Self {
            point: Err(FetchError::Network("connection refused".to_string())),
            ..Self::resolving()
        }
    }

    #[must_use]
    pub fn delayed(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn located_ips(&self) -> Vec<String> {
        self.located.lock().unwrap().clone()
    }
}

#[async_trait]
impl GeoLookup for MockGeo {
    async fn locate(&self, ip: &str) -> Result<GeoPoint, FetchError> {
        self.located.lock().unwrap().push(ip.to_string());
        tokio::time::sleep(self.delay).await;
        self.point.clone()
    }

    async fn sun_times(&self, _at: &GeoPoint) -> Result<SunTimes, FetchError> {
        tokio::time::sleep(self.delay).await;
        self.sun.clone()
    }
}
