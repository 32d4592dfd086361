use std::io::IsTerminal;

use crossterm::style::{Attribute, Color, Stylize, style};

/// Process rows above this share of total memory are flagged as alerts.
pub const ALERT_PERCENT: f64 = 5.0;
pub const WARNING_PERCENT: f64 = 2.0;
/// Usage bar fill ratios.
pub const ALERT_RATIO: f64 = 0.8;
pub const WARNING_RATIO: f64 = 0.6;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Alert,
    Warning,
    Normal,
}

impl Severity {
    pub fn for_memory_percent(percent: f64) -> Self {
        if percent > ALERT_PERCENT {
            Severity::Alert
        } else if percent > WARNING_PERCENT {
            Severity::Warning
        } else {
            Severity::Normal
        }
    }

    pub fn for_usage_ratio(ratio: f64) -> Self {
        if ratio > ALERT_RATIO {
            Severity::Alert
        } else if ratio > WARNING_RATIO {
            Severity::Warning
        } else {
            Severity::Normal
        }
    }

    /// Table rows stay neutral when nothing stands out.
    pub fn row_tone(self) -> Tone {
        match self {
            Severity::Alert => Tone::Danger,
            Severity::Warning => Tone::Caution,
            Severity::Normal => Tone::Neutral,
        }
    }

    /// Bars read as healthy when nothing stands out.
    pub fn fill_tone(self) -> Tone {
        match self {
            Severity::Alert => Tone::Danger,
            Severity::Warning => Tone::Caution,
            Severity::Normal => Tone::Good,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Title,
    Accent,
    Good,
    Caution,
    Danger,
    Neutral,
}

impl Tone {
    fn color(self) -> Option<Color> {
        match self {
            Tone::Title => None,
            Tone::Accent => Some(Color::DarkCyan),
            Tone::Good => Some(Color::DarkGreen),
            Tone::Caution => Some(Color::DarkYellow),
            Tone::Danger => Some(Color::DarkRed),
            Tone::Neutral => Some(Color::Grey),
        }
    }
}

/// Decorates already formatted text. A disabled palette returns its input
/// untouched, so every renderer has a byte-stable plain form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    enabled: bool,
}

impl Palette {
    pub const PLAIN: Palette = Palette { enabled: false };
    pub const ANSI: Palette = Palette { enabled: true };

    pub fn new(enabled: bool) -> Self {
        Palette { enabled }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn paint(&self, text: &str, tone: Tone) -> String {
        if !self.enabled || text.is_empty() {
            return text.to_string();
        }
        match tone.color() {
            Some(color) => style(text).with(color).to_string(),
            None => style(text).attribute(Attribute::Bold).to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorChoice {
    Auto,
    Always,
    Never,
}

impl ColorChoice {
    pub fn from_config_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "always" | "on" | "yes" => ColorChoice::Always,
            "never" | "off" | "no" | "mono" => ColorChoice::Never,
            _ => ColorChoice::Auto,
        }
    }
}

pub fn detect_color_support() -> bool {
    std::io::stdout().is_terminal() && std::env::var_os("NO_COLOR").is_none()
}

pub fn resolve_palette(config: &str) -> Palette {
    match ColorChoice::from_config_str(config) {
        ColorChoice::Always => Palette::ANSI,
        ColorChoice::Never => Palette::PLAIN,
        ColorChoice::Auto => Palette::new(detect_color_support()),
    }
}
