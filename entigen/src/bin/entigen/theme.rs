use clap::builder::{Styles, styling::AnsiColor};
use colored::{Color, Colorize};

pub const BULLET: &str = "•";
pub const ARROW: &str = "→";

/// Role of a piece of terminal text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Success,
    Error,
    Warning,
    Info,
    Progress,
    Heading,
    Muted,
    Key,
    Value,
    Example,
}

impl Tone {
    pub fn color(self) -> Color {
        match self {
            Tone::Success => Color::Green,
            Tone::Error => Color::Red,
            Tone::Warning => Color::Yellow,
            Tone::Info => Color::Blue,
            Tone::Progress => Color::Cyan,
            Tone::Heading => Color::BrightBlue,
            Tone::Muted => Color::BrightBlack,
            Tone::Key => Color::BrightCyan,
            Tone::Value => Color::White,
            Tone::Example => Color::Magenta,
        }
    }

    /// Status icon printed before a message of this tone
    pub fn icon(self) -> &'static str {
        match self {
            Tone::Success => "✓",
            Tone::Error => "✗",
            Tone::Warning => "⚠",
            Tone::Info => "ℹ",
            Tone::Progress => "⟳",
            _ => ARROW,
        }
    }

    pub fn paint(self, text: &str, use_color: bool) -> String {
        if !use_color {
            return text.to_string();
        }
        let colored = text.color(self.color());
        match self {
            Tone::Heading | Tone::Key | Tone::Progress => colored.bold().to_string(),
            _ => colored.to_string(),
        }
    }
}

/// clap help colors matching the tones above
pub fn help_styles() -> Styles {
    Styles::styled()
        .usage(AnsiColor::BrightBlue.on_default().bold())
        .header(AnsiColor::Cyan.on_default().bold())
        .literal(AnsiColor::Magenta.on_default())
        .placeholder(AnsiColor::BrightBlack.on_default())
        .valid(AnsiColor::Green.on_default())
        .invalid(AnsiColor::Yellow.on_default())
        .error(AnsiColor::Red.on_default().bold())
}
