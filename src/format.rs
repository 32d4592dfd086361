use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const UNITS: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];

/// Scales `bytes` by 1024 until it drops below 1024 or runs out of units.
/// Values past the terabyte range stay in TB.
pub fn format_bytes(bytes: u64) -> String {
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    format!("{value:.2} {}", UNITS[unit])
}

/// Keeps at most `max_chars` characters of `s`.
pub fn truncate_chars(s: &str, max_chars: usize) -> &str {
    match s.char_indices().nth(max_chars) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

/// Left-aligns `s` in a column of `width` terminal cells.
///
/// `format!("{:<N}")` pads by character count, which misaligns columns once
/// a name contains wide glyphs.
pub fn pad_display(s: &str, width: usize) -> String {
    let used = s.width();
    let mut out = String::with_capacity(s.len() + width.saturating_sub(used));
    out.push_str(s);
    for _ in used..width {
        out.push(' ');
    }
    out
}

/// Truncates to `max_chars` characters, then pads to the same number of cells.
pub fn fit_column(s: &str, max_chars: usize) -> String {
    let truncated = truncate_chars(s, max_chars);
    let cells: usize = truncated.chars().map(|c| c.width().unwrap_or(0)).sum();
    if cells >= max_chars {
        truncated.to_string()
    } else {
        pad_display(truncated, max_chars)
    }
}
