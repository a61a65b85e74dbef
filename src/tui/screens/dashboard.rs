//! Dashboard screen: clock, uptime counters, location and the info panels

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};
use throbber_widgets_tui::{Throbber, ThrobberState};

use crate::daynight::DayNight;
use crate::style::colors;
use crate::toggle::PanelPosition;
use crate::tui::widgets::{control_style, section_border_style, slot_span};
use crate::view::{Control, Section, SlotId, ViewModel};

/// Time glyph before the first classification
const UNKNOWN_GLYPH: &str = "·";

const LOADING: &str = "Loading…";

/// Render the whole dashboard into `area`
pub(crate) fn render_dashboard(
    frame: &mut Frame,
    area: Rect,
    view: &ViewModel,
    busy: bool,
    throbber: &mut ThrobberState,
) {
    let bar_height = match view.chrome.panel_position {
        PanelPosition::Visible => 3,
        PanelPosition::Hidden => 0,
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(bar_height),
            Constraint::Length(4),
            Constraint::Length(5),
            Constraint::Length(3),
            Constraint::Min(3),
            Constraint::Length(1),
        ])
        .split(area);

    if bar_height > 0 {
        render_button_bar(frame, chunks[0], view);
    }
    render_clock(frame, chunks[1], view);
    render_uptime(frame, chunks[2], view);
    render_location(frame, chunks[3], view);
    render_info_panel(frame, chunks[4], view);
    render_footer(frame, chunks[5], view, busy, throbber);
}

fn render_button_bar(frame: &mut Frame, area: Rect, view: &ViewModel) {
    let chrome = view.chrome;
    let buttons = Line::from(vec![
        Span::styled(
            " [a] Advanced ",
            control_style(view, Control::Advanced, chrome.advanced_active),
        ),
        Span::raw(" "),
        Span::styled(" [r] Refresh ", control_style(view, Control::Refresh, false)),
        Span::raw(" "),
        Span::styled(" [s] Share ", control_style(view, Control::Share, false)),
        Span::raw(" "),
        Span::styled(" [c] Clear session ", Style::new().fg(colors::TEXT)),
    ]);
    let bar = Paragraph::new(buttons).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::new().fg(colors::BORDER)),
    );
    frame.render_widget(bar, area);
}

fn glyph_span(mode: Option<DayNight>) -> Span<'static> {
    match mode {
        Some(DayNight::Day) => Span::styled(DayNight::Day.glyph(), Style::new().fg(colors::ACTIVE)),
        Some(DayNight::Night) => {
            Span::styled(DayNight::Night.glyph(), Style::new().fg(colors::NIGHT))
        }
        None => Span::styled(UNKNOWN_GLYPH, Style::new().fg(colors::SECONDARY)),
    }
}

/// Section block whose border lights up during the entrance
fn section_block(view: &ViewModel, section: Section, title: String) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(section_border_style(view.is_section_entering(section)))
        .title(title)
}

fn loading_line() -> Line<'static> {
    Line::from(Span::styled(LOADING, Style::new().fg(colors::SECONDARY)))
}

fn render_clock(frame: &mut Frame, area: Rect, view: &ViewModel) {
    let title = format!(" Uptimey  [t] {} ", view.chrome.toggle_glyph.symbol());
    let block = section_block(view, Section::Top, title);

    let lines = if view.section_entered(Section::Top) {
        let secondary = Style::new().fg(colors::SECONDARY);
        vec![
            Line::from(vec![
                slot_span(view, SlotId::CurrentDate, Style::new().fg(colors::TEXT)),
                Span::raw("  "),
                slot_span(
                    view,
                    SlotId::CurrentTime,
                    Style::new().fg(colors::TEXT).add_modifier(Modifier::BOLD),
                ),
                Span::raw(" "),
                glyph_span(view.time_icon()),
            ]),
            Line::from(vec![
                Span::styled("online since ", secondary),
                slot_span(view, SlotId::SinceDate, secondary),
            ]),
        ]
    } else {
        vec![loading_line()]
    };

    frame.render_widget(
        Paragraph::new(lines).alignment(Alignment::Center).block(block),
        area,
    );
}

fn render_uptime(frame: &mut Frame, area: Rect, view: &ViewModel) {
    let block = section_block(view, Section::Bottom, " Uptime ".to_string());
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if !view.section_entered(Section::Bottom) {
        frame.render_widget(
            Paragraph::new(loading_line()).alignment(Alignment::Center),
            inner,
        );
        return;
    }

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 3); 3])
        .split(inner);

    let counters = [
        (SlotId::Days, "days"),
        (SlotId::Hours, "hours"),
        (SlotId::Minutes, "minutes"),
    ];
    for ((slot, label), column) in counters.into_iter().zip(columns.iter()) {
        let counter = Paragraph::new(vec![
            Line::from(slot_span(
                view,
                slot,
                Style::new().fg(colors::STAT).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(label, Style::new().fg(colors::SECONDARY))),
        ])
        .alignment(Alignment::Center);
        frame.render_widget(counter, *column);
    }
}

fn render_location(frame: &mut Frame, area: Rect, view: &ViewModel) {
    let block = section_block(view, Section::Location, " Location ".to_string());
    let line = if view.section_entered(Section::Location) {
        Line::from(slot_span(view, SlotId::Location, Style::new().fg(colors::TEXT)))
    } else {
        Line::from(Span::styled("Locating…", Style::new().fg(colors::SECONDARY)))
    };
    frame.render_widget(
        Paragraph::new(line).alignment(Alignment::Center).block(block),
        area,
    );
}

fn render_info_panel(frame: &mut Frame, area: Rect, view: &ViewModel) {
    let chrome = view.chrome;
    let border = Style::new().fg(colors::BORDER);

    if chrome.advanced_panel_visible {
        let content = match view.advanced_content() {
            Some(body) => Line::from(Span::styled(body, Style::new().fg(colors::TEXT))),
            None => loading_line(),
        };
        let panel = Paragraph::new(content).wrap(Wrap { trim: false }).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border)
                .title(" Advanced "),
        );
        frame.render_widget(panel, area);
    } else if chrome.default_panel_visible {
        let lines = vec![
            Line::from(vec![
                Span::styled("Background: ", Style::new().fg(colors::SECONDARY)),
                slot_span(view, SlotId::Background, Style::new().fg(colors::STAT)),
            ]),
            Line::from(slot_span(
                view,
                SlotId::Attribution,
                Style::new().fg(colors::SECONDARY),
            )),
        ];
        let panel = Paragraph::new(lines).wrap(Wrap { trim: true }).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border)
                .title(" Info "),
        );
        frame.render_widget(panel, area);
    }
}

fn render_footer(
    frame: &mut Frame,
    area: Rect,
    view: &ViewModel,
    busy: bool,
    throbber: &mut ThrobberState,
) {
    let text = match view.status() {
        Some(message) => Line::from(vec![
            Span::styled("● ", Style::new().fg(colors::ENTERING)),
            Span::styled(message, Style::new().fg(colors::TEXT)),
        ]),
        None => Line::from(vec![
            Span::raw("[q] Quit  "),
            Span::styled("[t]", Style::new().fg(colors::STAT)),
            Span::raw(" Buttons  "),
            Span::styled("[r]", Style::new().fg(colors::STAT)),
            Span::raw(" Refresh"),
        ]),
    };

    if busy {
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(3), Constraint::Min(0)])
            .split(area);
        let spinner = Throbber::default().style(Style::new().fg(colors::ENTERING));
        frame.render_stateful_widget(spinner, chunks[0], throbber);
        frame.render_widget(Paragraph::new(text), chunks[1]);
    } else {
        frame.render_widget(Paragraph::new(text), area);
    }
}
