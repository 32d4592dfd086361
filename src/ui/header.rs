use std::fmt::Write;

use super::theme::{Palette, Tone};

pub const SEPARATOR_WIDTH: usize = 100;

/// Title framed by `=` separators, followed by a blank line.
pub fn render(title: &str, palette: &Palette) -> String {
    let separator = palette.paint(&"=".repeat(SEPARATOR_WIDTH), Tone::Accent);
    let mut out = String::new();
    let _ = writeln!(out, "{separator}");
    let _ = writeln!(out, "{}", palette.paint(title, Tone::Title));
    let _ = writeln!(out, "{separator}");
    let _ = writeln!(out);
    out
}
