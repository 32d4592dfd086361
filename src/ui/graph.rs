use std::fmt::Write;

use super::header;
use super::theme::{Palette, Severity};
use crate::format::{fit_column, format_bytes, pad_display};
use crate::system::process::ProcessSample;

pub const NAME_WIDTH: usize = 25;
pub const MEMORY_WIDTH: usize = 12;
pub const DEFAULT_WIDTH: usize = 60;
const FILLED: &str = "\u{2588}";

/// Bar cells for `memory` relative to the largest entry shown.
pub fn bar_length(memory: u64, max_memory: u64, width: usize) -> usize {
    if max_memory == 0 {
        return 0;
    }
    ((memory as f64 / max_memory as f64 * width as f64) as usize).min(width)
}

/// Horizontal bars for the first `limit` processes, scaled to the largest
/// of them. Only the header is emitted when there is nothing to scale by.
pub fn render(
    processes: &[ProcessSample],
    limit: usize,
    width: usize,
    palette: &Palette,
) -> String {
    let mut out = header::render(&format!("TOP {limit} PROCESSES - MEMORY USAGE"), palette);

    let shown = &processes[..limit.min(processes.len())];
    let Some(max_memory) = shown
        .iter()
        .map(|p| p.memory_bytes)
        .max()
        .filter(|&max| max > 0)
    else {
        return out;
    };

    for process in shown {
        let cells = bar_length(process.memory_bytes, max_memory, width);
        let tone = Severity::for_memory_percent(process.memory_percent).fill_tone();
        let _ = writeln!(
            out,
            "{} {} [{}]",
            fit_column(&process.name, NAME_WIDTH),
            pad_display(&format_bytes(process.memory_bytes), MEMORY_WIDTH),
            palette.paint(&FILLED.repeat(cells), tone)
        );
    }

    let _ = writeln!(out);
    out
}
