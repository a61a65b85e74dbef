//! Shared TUI widget helpers

use ratatui::{
    style::{Modifier, Style},
    text::Span,
};

use crate::style::colors;
use crate::view::{Control, SlotId, ViewModel};

/// Shown for slots that have never been populated
pub(crate) const PLACEHOLDER: &str = "--";

/// Slot text, highlighted while it is entering
pub(crate) fn slot_span(view: &ViewModel, slot: SlotId, base: Style) -> Span<'_> {
    let text = view.text(slot).unwrap_or(PLACEHOLDER);
    let style = if view.is_entering(slot) {
        base.fg(colors::ENTERING).add_modifier(Modifier::BOLD)
    } else {
        base
    };
    Span::styled(text, style)
}

/// Border of a section, lit while its entrance runs
pub(crate) const fn section_border_style(entering: bool) -> Style {
    if entering {
        Style::new().fg(colors::ENTERING)
    } else {
        Style::new().fg(colors::BORDER)
    }
}

/// Button label style: pulsing beats active beats idle
pub(crate) fn control_style(view: &ViewModel, control: Control, active: bool) -> Style {
    if view.is_animating(control) {
        Style::new()
            .fg(colors::ENTERING)
            .add_modifier(Modifier::BOLD | Modifier::REVERSED)
    } else if active {
        Style::new().fg(colors::ACTIVE).add_modifier(Modifier::BOLD)
    } else {
        Style::new().fg(colors::TEXT)
    }
}
