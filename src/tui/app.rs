//! Dashboard application state

use throbber_widgets_tui::ThrobberState;
use tracing::debug;

use super::input::Action;
use crate::engine::{Engine, Update};
use crate::view::Control;

pub(crate) struct App {
    pub engine: Engine,
    pub throbber: ThrobberState,
    /// Something changed since the last frame
    pub dirty: bool,
    pub should_quit: bool,
}

impl App {
    pub(crate) fn new(engine: Engine) -> Self {
        Self {
            engine,
            throbber: ThrobberState::default(),
            dirty: true,
            should_quit: false,
        }
    }

    pub(crate) fn quit(&mut self) {
        self.should_quit = true;
    }

    /// Manual refresh indicator is spinning
    pub(crate) fn is_busy(&self) -> bool {
        self.engine.view().is_animating(Control::Refresh)
    }

    pub(crate) fn apply(&mut self, action: Action) {
        debug!("Action: {action:?}");
        match action {
            Action::TogglePanel => self.engine.toggle_panel(),
            Action::ToggleAdvanced => self.engine.toggle_advanced(),
            Action::Refresh => self.engine.refresh(),
            Action::Share => {
                self.engine.share();
            }
            Action::ClearSession => self.engine.clear_session(),
            Action::Quit => self.quit(),
        }
        self.dirty = true;
    }

    pub(crate) fn handle_update(&mut self, update: Update) {
        self.engine.handle(update);
        self.dirty = true;
    }
}
