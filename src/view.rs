//! View model: slot texts, section entrances and transient animation states
//!
//! Every transient state (a slot "entering", a control pulsing, the refresh
//! control spinning) is a numbered run. Completion notifications carry the run
//! they belong to, so duplicated or late notifications clear nothing.

use std::collections::{HashMap, HashSet};

use crate::daynight::DayNight;
use crate::toggle::{InfoPanel, PanelPosition, ToggleGlyph};

/// Named display regions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SlotId {
    Days,
    Hours,
    Minutes,
    CurrentDate,
    CurrentTime,
    SinceDate,
    Location,
    Background,
    Attribution,
}

impl SlotId {
    /// Group sharing a single entrance animation, if any
    #[must_use]
    pub const fn section(self) -> Option<Section> {
        match self {
            SlotId::Days | SlotId::Hours | SlotId::Minutes => Some(Section::Bottom),
            SlotId::CurrentDate | SlotId::CurrentTime | SlotId::SinceDate => Some(Section::Top),
            SlotId::Location => Some(Section::Location),
            SlotId::Background | SlotId::Attribution => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    Top,
    Bottom,
    Location,
}

/// Interactive controls that carry transient visual states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Control {
    Advanced,
    Refresh,
    Share,
}

/// Element an animation runs on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnimTarget {
    Slot(SlotId),
    Section(Section),
    Control(Control),
}

/// Handle for one animation run; its completion clears the state at most once
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub target: AnimTarget,
    generation: u64,
}

/// Transient states keyed by element
#[derive(Debug, Default)]
pub struct Animations {
    /// Generation of the currently running animation per element
    running: HashMap<AnimTarget, u64>,
    next_generation: u64,
}

impl Animations {
    /// Start a new run on `target`, superseding any unfinished one
    pub fn start(&mut self, target: AnimTarget) -> Transition {
        self.next_generation += 1;
        let generation = self.next_generation;
        self.running.insert(target, generation);
        Transition { target, generation }
    }

    /// Deliver a completion notification
    ///
    /// Returns `true` only for the first notification of the run currently
    /// active on the element.
    pub fn complete(&mut self, transition: Transition) -> bool {
        match self.running.get(&transition.target) {
            Some(&generation) if generation == transition.generation => {
                self.running.remove(&transition.target);
                true
            }
            _ => false,
        }
    }

    #[must_use]
    pub fn is_active(&self, target: AnimTarget) -> bool {
        self.running.contains_key(&target)
    }
}

/// Rendered state of the toggles, written only through toggle effects
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Chrome {
    pub panel_position: PanelPosition,
    pub toggle_glyph: ToggleGlyph,
    pub default_panel_visible: bool,
    pub advanced_panel_visible: bool,
    pub advanced_active: bool,
}

impl Default for Chrome {
    fn default() -> Self {
        Self {
            panel_position: PanelPosition::Hidden,
            toggle_glyph: ToggleGlyph::Down,
            default_panel_visible: true,
            advanced_panel_visible: false,
            advanced_active: false,
        }
    }
}

impl Chrome {
    /// Show or hide one of the info panels
    pub fn set_panel_visible(&mut self, panel: InfoPanel, visible: bool) {
        match panel {
            InfoPanel::Default => self.default_panel_visible = visible,
            InfoPanel::Advanced => self.advanced_panel_visible = visible,
        }
    }
}

/// Everything the host renders
#[derive(Debug, Default)]
pub struct ViewModel {
    pub chrome: Chrome,
    slots: HashMap<SlotId, String>,
    entered_sections: HashSet<Section>,
    animations: Animations,
    time_icon: Option<DayNight>,
    advanced_content: Option<String>,
    status: Option<String>,
}

impl ViewModel {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a slot's text and mark it entering
    ///
    /// The caller arms the completion for the returned transition.
    pub fn apply(&mut self, slot: SlotId, text: impl Into<String>) -> Transition {
        self.slots.insert(slot, text.into());
        self.animations.start(AnimTarget::Slot(slot))
    }

    /// Start the section's entrance on its first population only
    pub fn enter_section(&mut self, section: Section) -> Option<Transition> {
        self.entered_sections
            .insert(section)
            .then(|| self.animations.start(AnimTarget::Section(section)))
    }

    #[must_use]
    pub fn is_section_entering(&self, section: Section) -> bool {
        self.animations.is_active(AnimTarget::Section(section))
    }

    #[must_use]
    pub fn section_entered(&self, section: Section) -> bool {
        self.entered_sections.contains(&section)
    }

    #[must_use]
    pub fn text(&self, slot: SlotId) -> Option<&str> {
        self.slots.get(&slot).map(String::as_str)
    }

    #[must_use]
    pub fn is_entering(&self, slot: SlotId) -> bool {
        self.animations.is_active(AnimTarget::Slot(slot))
    }

    #[must_use]
    pub fn is_animating(&self, control: Control) -> bool {
        self.animations.is_active(AnimTarget::Control(control))
    }

    /// Start a transient state on a control (pulse, busy spin)
    pub fn start_control(&mut self, control: Control) -> Transition {
        self.animations.start(AnimTarget::Control(control))
    }

    /// Deliver a completion notification; see [`Animations::complete`]
    pub fn complete(&mut self, transition: Transition) -> bool {
        self.animations.complete(transition)
    }

    pub fn set_time_icon(&mut self, mode: DayNight) {
        self.time_icon = Some(mode);
    }

    /// `None` until the first classification
    #[must_use]
    pub fn time_icon(&self) -> Option<DayNight> {
        self.time_icon
    }

    /// Replace the advanced panel content verbatim
    pub fn set_advanced_content(&mut self, content: String) {
        self.advanced_content = Some(content);
    }

    #[must_use]
    pub fn advanced_content(&self) -> Option<&str> {
        self.advanced_content.as_deref()
    }

    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status = Some(message.into());
    }

    #[must_use]
    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }
}
