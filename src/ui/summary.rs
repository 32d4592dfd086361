use std::fmt::Write;

use super::header;
use super::theme::{Palette, Tone};
use crate::format::format_bytes;
use crate::system::memory::SystemMemorySnapshot;

const LABEL_WIDTH: usize = 19;

pub fn render(info: &SystemMemorySnapshot, palette: &Palette) -> String {
    let mut out = header::render("SYSTEM SUMMARY", palette);
    let good = |bytes: u64| palette.paint(&format_bytes(bytes), Tone::Good);

    line(&mut out, "Total Memory:", &good(info.total_memory));
    line(
        &mut out,
        "Used Memory:",
        &format!(
            "{} ({:.1}%)",
            palette.paint(&format_bytes(info.used_memory), Tone::Caution),
            info.percent_used()
        ),
    );
    line(&mut out, "Available Memory:", &good(info.available_memory));
    line(&mut out, "Free Memory:", &good(info.free_memory));
    line(&mut out, "Wired Memory:", &good(info.wired_memory));

    if info.swap_total > 0 {
        let _ = writeln!(out);
        line(&mut out, "Total Swap:", &good(info.swap_total));
        line(
            &mut out,
            "Used Swap:",
            &format!(
                "{} ({:.1}%)",
                palette.paint(&format_bytes(info.swap_used), Tone::Caution),
                info.swap_percent_used()
            ),
        );
        line(&mut out, "Free Swap:", &good(info.swap_free()));
    }

    let _ = writeln!(out);
    out
}

fn line(out: &mut String, label: &str, value: &str) {
    let _ = writeln!(out, "{label:<LABEL_WIDTH$}{value}");
}
