//! Two independent binary toggles: the slide-down button bar and the
//! default/advanced info panel
//!
//! State lives in the enums; transitions return the new state together with
//! the effects the host applies. Nothing is read back from rendered output.

use crate::view::Control;

/// Slide-down button bar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PanelSlide {
    #[default]
    Closed,
    Open,
}

/// Which info panel is shown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InfoPanel {
    #[default]
    Default,
    Advanced,
}

/// Resting position of the button bar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelPosition {
    Hidden,
    Visible,
}

/// Glyph on the panel toggle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleGlyph {
    Down,
    Up,
}

impl ToggleGlyph {
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            ToggleGlyph::Down => "⇊",
            ToggleGlyph::Up => "⇈",
        }
    }
}

/// Side effect of a toggle transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    SlideTo(PanelPosition),
    SetGlyph(ToggleGlyph),
    Show(InfoPanel),
    Hide(InfoPanel),
    SetActive(bool),
    Pulse(Control),
    FetchAdvanced,
}

impl PanelSlide {
    /// Glyph matching this state
    #[must_use]
    pub const fn glyph(self) -> ToggleGlyph {
        match self {
            PanelSlide::Closed => ToggleGlyph::Down,
            PanelSlide::Open => ToggleGlyph::Up,
        }
    }

    #[must_use]
    pub fn toggle(self) -> (Self, Vec<Effect>) {
        let next = match self {
            PanelSlide::Closed => PanelSlide::Open,
            PanelSlide::Open => PanelSlide::Closed,
        };
        let position = match next {
            PanelSlide::Open => PanelPosition::Visible,
            PanelSlide::Closed => PanelPosition::Hidden,
        };
        (next, vec![Effect::SlideTo(position), Effect::SetGlyph(next.glyph())])
    }
}

impl InfoPanel {
    #[must_use]
    pub fn toggle(self) -> (Self, Vec<Effect>) {
        match self {
            InfoPanel::Default => (
                InfoPanel::Advanced,
                vec![
                    Effect::Pulse(Control::Advanced),
                    Effect::SetActive(true),
                    Effect::Hide(InfoPanel::Default),
                    Effect::Show(InfoPanel::Advanced),
                    Effect::FetchAdvanced,
                ],
            ),
            InfoPanel::Advanced => (
                InfoPanel::Default,
                vec![
                    Effect::Pulse(Control::Advanced),
                    Effect::SetActive(false),
                    Effect::Hide(InfoPanel::Advanced),
                    Effect::Show(InfoPanel::Default),
                ],
            ),
        }
    }
}

/// Holds both toggles
#[derive(Debug, Default, Clone)]
pub struct ToggleController {
    panel: PanelSlide,
    info: InfoPanel,
}

impl ToggleController {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn panel(&self) -> PanelSlide {
        self.panel
    }

    #[must_use]
    pub fn info(&self) -> InfoPanel {
        self.info
    }

    pub fn toggle_panel(&mut self) -> Vec<Effect> {
        let (next, effects) = self.panel.toggle();
        self.panel = next;
        effects
    }

    pub fn toggle_info(&mut self) -> Vec<Effect> {
        let (next, effects) = self.info.toggle();
        self.info = next;
        effects
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn glyph_of(effects: &[Effect]) -> Option<ToggleGlyph> {
        effects.iter().find_map(|e| match e {
            Effect::SetGlyph(g) => Some(*g),
            _ => None,
        })
    }

    #[test]
    fn initial_states() {
        let c = ToggleController::new();
        assert_eq!(c.panel(), PanelSlide::Closed);
        assert_eq!(c.info(), InfoPanel::Default);
    }

    #[test]
    fn panel_open_effects() {
        let mut c = ToggleController::new();
        let effects = c.toggle_panel();
        assert_eq!(c.panel(), PanelSlide::Open);
        assert_eq!(
            effects,
            vec![
                Effect::SlideTo(PanelPosition::Visible),
                Effect::SetGlyph(ToggleGlyph::Up)
            ]
        );
    }

    #[test]
    fn panel_double_toggle_returns_to_start() {
        let mut c = ToggleController::new();
        c.toggle_panel();
        let effects = c.toggle_panel();
        assert_eq!(c.panel(), PanelSlide::Closed);
        assert_eq!(
            effects,
            vec![
                Effect::SlideTo(PanelPosition::Hidden),
                Effect::SetGlyph(ToggleGlyph::Down)
            ]
        );
    }

    #[test]
    fn glyph_never_lags_state() {
        let mut c = ToggleController::new();
        for _ in 0..7 {
            let effects = c.toggle_panel();
            assert_eq!(glyph_of(&effects), Some(c.panel().glyph()));
        }
    }

    #[test]
    fn advanced_fetch_only_on_entering_advanced() {
        let mut c = ToggleController::new();
        let mut fetches = Vec::new();
        for _ in 0..6 {
            let before = c.info();
            let effects = c.toggle_info();
            let n = effects.iter().filter(|e| **e == Effect::FetchAdvanced).count();
            fetches.push((before, n));
        }
        for (before, n) in fetches {
            match before {
                InfoPanel::Default => assert_eq!(n, 1),
                InfoPanel::Advanced => assert_eq!(n, 0),
            }
        }
    }

    #[test]
    fn both_info_transitions_pulse() {
        let mut c = ToggleController::new();
        assert!(c.toggle_info().contains(&Effect::Pulse(Control::Advanced)));
        assert!(c.toggle_info().contains(&Effect::Pulse(Control::Advanced)));
    }

    #[test]
    fn toggles_are_independent() {
        let mut c = ToggleController::new();
        c.toggle_info();
        assert_eq!(c.panel(), PanelSlide::Closed);
        c.toggle_panel();
        assert_eq!(c.info(), InfoPanel::Advanced);
    }
}
