use super::theme::{Palette, Severity};

pub const FILLED: &str = "\u{2588}";
pub const EMPTY: &str = "\u{2591}";
pub const DEFAULT_WIDTH: usize = 50;

pub fn usage_ratio(used: u64, total: u64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    (used as f64 / total as f64).clamp(0.0, 1.0)
}

/// Whole cells covered by `ratio` of `width`; partial cells are dropped.
pub fn filled_cells(ratio: f64, width: usize) -> usize {
    ((ratio * width as f64) as usize).min(width)
}

/// `label: [████░░░░] 42.0%` with the fill colored by how full it is.
pub fn render(label: &str, used: u64, total: u64, width: usize, palette: &Palette) -> String {
    let ratio = usage_ratio(used, total);
    let filled = filled_cells(ratio, width);
    let bar = format!("{}{}", FILLED.repeat(filled), EMPTY.repeat(width - filled));
    let tone = Severity::for_usage_ratio(ratio).fill_tone();
    format!("{label}: [{}] {:.1}%\n", palette.paint(&bar, tone), ratio * 100.0)
}
