//! Dashboard engine
//!
//! Owns the view model, the session context and both toggles. Every request
//! runs as a spawned task that posts an [`Update`] back on one channel; the
//! owner applies updates in arrival order, so the response that completes last
//! is the one displayed. Nothing is cancelled and there is no retry.

use color_eyre::eyre::Result;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::{debug, info, trace, warn};

use crate::config::{Config, ShareConfig};
use crate::error::{ClassificationDeferred, FetchError};
use crate::fetcher::{
    self, DataKind, DataSource, GeoLookup, HttpDataSource, HttpGeoLookup, REFRESH_FLAG,
};
use crate::parser::{self, GeoPoint, SunTimes, TimeOfDay, UptimeRecord};
use crate::session::SessionState;
use crate::share::{self, ShareIntent};
use crate::toggle::{Effect, ToggleController};
use crate::view::{Control, SlotId, Transition, ViewModel};

/// Messages posted back to the engine by spawned requests and timers
#[derive(Debug, Clone)]
pub enum Update {
    /// Endpoint response for one request
    Fetched {
        kind: DataKind,
        result: Result<String, FetchError>,
    },
    /// First chained lookup finished
    Located(Result<GeoPoint, FetchError>),
    /// Second chained lookup finished
    SunResolved(Result<SunTimes, FetchError>),
    /// A transient state's duration elapsed
    AnimationEnded(Transition),
}

/// Durations of transient states
#[derive(Debug, Clone, Copy)]
pub struct Timings {
    pub animation: Duration,
    pub busy: Duration,
}

pub struct Engine {
    view: ViewModel,
    session: SessionState,
    toggles: ToggleController,
    source: Arc<dyn DataSource>,
    geo: Arc<dyn GeoLookup>,
    tx: UnboundedSender<Update>,
    timings: Timings,
    share: ShareConfig,
    /// Current time from the latest time update, if it was readable
    latest_time: Option<TimeOfDay>,
    /// Requests whose answer has not been applied yet
    in_flight: usize,
}

impl Engine {
    /// Create an engine over the given sources
    ///
    /// The receiver must be drained into [`Engine::handle`].
    #[must_use]
    pub fn new(
        config: &Config,
        source: Arc<dyn DataSource>,
        geo: Arc<dyn GeoLookup>,
    ) -> (Self, UnboundedReceiver<Update>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let engine = Self {
            view: ViewModel::new(),
            session: SessionState::new(),
            toggles: ToggleController::new(),
            source,
            geo,
            tx,
            timings: Timings {
                animation: config.settings.animation,
                busy: config.settings.busy,
            },
            share: config.share.clone(),
            latest_time: None,
            in_flight: 0,
        };
        (engine, rx)
    }

    /// Create an engine talking HTTP to the configured services
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be built.
    pub fn from_config(config: &Config) -> Result<(Self, UnboundedReceiver<Update>)> {
        let client = fetcher::build_client(&config.settings)?;
        let source = Arc::new(HttpDataSource::new(
            client.clone(),
            config.settings.endpoint.clone(),
        ));
        let geo = Arc::new(HttpGeoLookup::new(
            client,
            config.settings.geo_url.clone(),
            config.settings.sun_url.clone(),
        ));
        Ok(Self::new(config, source, geo))
    }

    #[must_use]
    pub fn view(&self) -> &ViewModel {
        &self.view
    }

    #[must_use]
    pub fn session(&self) -> &SessionState {
        &self.session
    }

    #[must_use]
    pub fn toggles(&self) -> &ToggleController {
        &self.toggles
    }

    /// Initial population, in page-load order
    pub fn start(&mut self) {
        info!("Loading dashboard");
        for kind in [
            DataKind::Image,
            DataKind::Location,
            DataKind::Uptime,
            DataKind::Time,
        ] {
            self.dispatch(kind, None);
        }
    }

    /// Periodic uptime/time update, untagged
    pub fn poll(&mut self) {
        self.dispatch(DataKind::Uptime, None);
        self.dispatch(DataKind::Time, None);
    }

    /// Manual refresh: busy indicator for a fixed duration, two independent fetches
    pub fn refresh(&mut self) {
        debug!("Manual refresh");
        let busy = self.view.start_control(Control::Refresh);
        self.dispatch(DataKind::Uptime, Some(REFRESH_FLAG));
        self.dispatch(DataKind::Time, Some(REFRESH_FLAG));
        self.arm(busy, self.timings.busy);
    }

    pub fn toggle_panel(&mut self) {
        let effects = self.toggles.toggle_panel();
        debug!("Panel toggled: {:?}", self.toggles.panel());
        self.apply_effects(effects);
    }

    pub fn toggle_advanced(&mut self) {
        let effects = self.toggles.toggle_info();
        debug!("Info panel toggled: {:?}", self.toggles.info());
        self.apply_effects(effects);
    }

    /// Compose a share intent from the uptime currently on display
    pub fn share(&mut self) -> ShareIntent {
        let pulse = self.view.start_control(Control::Share);
        self.arm(pulse, self.timings.animation);

        let field = |slot| self.view.text(slot).unwrap_or_default().to_string();
        let uptime = UptimeRecord {
            days: field(SlotId::Days),
            hours: field(SlotId::Hours),
            minutes: field(SlotId::Minutes),
        };
        let intent = share::compose(&uptime, &self.share);
        let url = intent.to_url(&self.share.target);
        info!("Share: {url}");
        self.view.set_status(format!("Share: {url}"));
        intent
    }

    /// Ask the endpoint to drop its session; the answer is ignored
    pub fn clear_session(&mut self) {
        self.dispatch(DataKind::Clear, None);
        self.view.set_status("Session cleared");
    }

    /// No request is waiting for an answer; timers may still be running
    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.in_flight == 0
    }

    /// Apply updates from `rx` until every request has answered or `limit`
    /// elapses
    ///
    /// Returns `false` on timeout.
    pub async fn run_until_idle(
        &mut self,
        rx: &mut UnboundedReceiver<Update>,
        limit: Duration,
    ) -> bool {
        let deadline = tokio::time::Instant::now() + limit;
        while !self.is_idle() {
            match tokio::time::timeout_at(deadline, rx.recv()).await {
                Ok(Some(update)) => self.handle(update),
                Ok(None) => break,
                Err(_) => {
                    warn!("Gave up waiting for {} request(s)", self.in_flight);
                    return false;
                }
            }
        }
        self.is_idle()
    }

    /// Apply one update
    pub fn handle(&mut self, update: Update) {
        match update {
            Update::Fetched { kind, result } => {
                self.settle_request();
                match result {
                    Ok(body) => self.apply_payload(kind, body),
                    Err(e) => warn!("{kind} fetch failed: {e}"),
                }
            }
            Update::Located(Ok(point)) => {
                self.apply_slot(SlotId::Location, point.display_name());
                self.session.set_location(point);
            }
            Update::Located(Err(e)) => {
                self.settle_request();
                warn!("Geolocation lookup failed: {e}");
            }
            Update::SunResolved(result) => {
                self.settle_request();
                match result {
                    Ok(sun) => {
                        self.session.set_sun_times(sun);
                        self.reclassify();
                    }
                    Err(e) => warn!("Sunrise/sunset lookup failed: {e}"),
                }
            }
            Update::AnimationEnded(transition) => {
                if !self.view.complete(transition) {
                    trace!("Ignored stale completion for {:?}", transition.target);
                }
            }
        }
    }

    fn settle_request(&mut self) {
        self.in_flight = self.in_flight.saturating_sub(1);
    }

    fn apply_payload(&mut self, kind: DataKind, body: String) {
        match kind {
            DataKind::Image => match parser::parse_image(&body) {
                Ok(image) => {
                    self.apply_slot(SlotId::Background, image.url);
                    self.apply_slot(
                        SlotId::Attribution,
                        format!(
                            "Powered by Uptimey. Fork on Github | Image - {}",
                            image.attribution
                        ),
                    );
                }
                Err(e) => warn!("Ignoring image payload: {e}"),
            },
            DataKind::Location => match parser::parse_client_ip(&body) {
                Some(ip) => self.resolve_location(ip.to_string()),
                None => warn!("Location payload carried no client IP"),
            },
            DataKind::Uptime => match parser::parse_uptime(&body) {
                Ok(uptime) => {
                    self.apply_slot(SlotId::Days, uptime.days);
                    self.apply_slot(SlotId::Hours, uptime.hours);
                    self.apply_slot(SlotId::Minutes, uptime.minutes);
                }
                Err(e) => warn!("Ignoring uptime payload: {e}"),
            },
            DataKind::Time => match parser::parse_time(&body) {
                Ok(time) => {
                    self.latest_time = TimeOfDay::parse(&time.current_time)
                        .inspect_err(|e| debug!("Current time not classifiable: {e}"))
                        .ok();
                    self.apply_slot(SlotId::CurrentDate, time.current_date);
                    self.apply_slot(SlotId::CurrentTime, time.current_time);
                    self.apply_slot(SlotId::SinceDate, time.since_date);
                    self.reclassify();
                }
                Err(e) => warn!("Ignoring time payload: {e}"),
            },
            DataKind::Advanced => self.view.set_advanced_content(body),
            DataKind::Clear => debug!("Session clear acknowledged"),
        }
    }

    /// Set a slot, arm its completion and enter its section on first population
    fn apply_slot(&mut self, slot: SlotId, text: String) {
        let entering = self.view.apply(slot, text);
        self.arm(entering, self.timings.animation);
        if let Some(section) = slot.section()
            && let Some(entrance) = self.view.enter_section(section)
        {
            debug!("Section {section:?} entered");
            self.arm(entrance, self.timings.animation);
        }
    }

    /// Runs after every time update and sun resolution; needs both
    fn reclassify(&mut self) {
        match self.session.classify(self.latest_time) {
            Ok(mode) => {
                debug!("Time glyph: {mode:?}");
                self.view.set_time_icon(mode);
            }
            Err(ClassificationDeferred) => trace!("Classification deferred"),
        }
    }

    fn apply_effects(&mut self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::SlideTo(position) => self.view.chrome.panel_position = position,
                Effect::SetGlyph(glyph) => self.view.chrome.toggle_glyph = glyph,
                Effect::Show(panel) => self.view.chrome.set_panel_visible(panel, true),
                Effect::Hide(panel) => self.view.chrome.set_panel_visible(panel, false),
                Effect::SetActive(active) => self.view.chrome.advanced_active = active,
                Effect::Pulse(control) => {
                    let pulse = self.view.start_control(control);
                    self.arm(pulse, self.timings.animation);
                }
                Effect::FetchAdvanced => self.dispatch(DataKind::Advanced, None),
            }
        }
    }

    /// Fire-and-forget request; the result comes back as `Update::Fetched`
    fn dispatch(&mut self, kind: DataKind, flag: Option<&'static str>) {
        self.in_flight += 1;
        let source = Arc::clone(&self.source);
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let result = source.fetch(kind, flag).await;
            // Receiver gone means the dashboard is shutting down
            let _ = tx.send(Update::Fetched { kind, result });
        });
    }

    /// Geolocation then sunrise/sunset, not awaited by anyone
    fn resolve_location(&mut self, ip: String) {
        self.in_flight += 1;
        let geo = Arc::clone(&self.geo);
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let located = geo.locate(&ip).await;
            let point = located.as_ref().ok().cloned();
            let _ = tx.send(Update::Located(located));
            if let Some(point) = point {
                let sun = geo.sun_times(&point).await;
                let _ = tx.send(Update::SunResolved(sun));
            }
        });
    }

    /// Deliver the completion of `transition` after `after`
    fn arm(&self, transition: Transition, after: Duration) {
        let tx = self.tx.clone();
        tokio::spawn(async move {
            tokio::time::sleep(after).await;
            let _ = tx.send(Update::AnimationEnded(transition));
        });
    }
}
