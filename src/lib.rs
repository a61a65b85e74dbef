//! Uptimey - server uptime dashboard
//!
//! Polls a small data endpoint for the server's uptime, clock and background
//! image, geolocates the server from its client IP and decides whether it is
//! day or night there.
//!
//! # Layout
//! - [`parser`], [`daynight`], [`share`]: pure decoding and formatting
//! - [`view`], [`toggle`], [`session`]: display and interaction state
//! - [`fetcher`]: the endpoint and the chained geolocation/weather lookups
//! - [`engine`]: single owner applying responses and timers in arrival order

pub mod cli;
pub mod commands;
pub mod config;
pub mod daynight;
pub mod engine;
pub mod error;
pub mod fetcher;
pub mod logging;
pub mod parser;
pub mod session;
pub mod share;
pub mod style;
pub mod toggle;
pub mod view;

#[cfg(feature = "tui")]
pub mod tui;

#[cfg(test)]
pub(crate) mod test_utils;

pub use cli::Args;
pub use config::Config;
pub use engine::{Engine, Update};
