//! Shared color scheme for CLI output and the dashboard

use crossterm::style::Stylize;

/// Semantic styling on top of crossterm's [`Stylize`]
///
/// ```
/// use uptimey::style::UptimeyStyle;
///
/// println!("{}", "Uptime".header());
/// println!("{}", "Session cleared".success());
/// ```
pub trait UptimeyStyle: Stylize {
    /// Section titles (cyan bold)
    fn header(self) -> <<Self as Stylize>::Styled as Stylize>::Styled
    where
        Self: Sized,
        <Self as Stylize>::Styled: Stylize,
    {
        self.cyan().bold()
    }

    fn success(self) -> <Self as Stylize>::Styled
    where
        Self: Sized,
    {
        self.green()
    }

    /// Values that are not available yet
    fn warning(self) -> <Self as Stylize>::Styled
    where
        Self: Sized,
    {
        self.yellow()
    }

    /// URLs, coordinates and other machine-ish values
    fn technical(self) -> <Self as Stylize>::Styled
    where
        Self: Sized,
    {
        self.cyan()
    }
}

impl<T: Stylize> UptimeyStyle for T {}

/// The same palette as ratatui colors
#[cfg(feature = "tui")]
pub mod colors {
    use ratatui::style::Color;

    /// Slot in its "entering" state
    pub const ENTERING: Color = Color::Yellow;

    /// Uptime counters
    pub const STAT: Color = Color::Cyan;

    /// Active control, day glyph
    pub const ACTIVE: Color = Color::Green;

    /// Night glyph
    pub const NIGHT: Color = Color::LightBlue;

    pub const BORDER: Color = Color::Gray;

    pub const SECONDARY: Color = Color::DarkGray;

    pub const TEXT: Color = Color::White;
}
