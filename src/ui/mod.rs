pub mod bar;
pub mod graph;
pub mod header;
pub mod summary;
pub mod table;
pub mod theme;

use std::fmt::Write;

use crate::config::DisplayConfig;
use crate::system::snapshot::Snapshot;
use crate::ui::theme::{Palette, Tone};

pub const LIST_TITLE: &str = "MemInspector - Memory Inspector";
pub const DASHBOARD_TITLE: &str = "MemInspector - Colored Terminal UI";
pub const GRAPH_TITLE: &str = "MemInspector - ASCII Graph Mode";

#[derive(Debug, Clone, PartialEq)]
pub struct FrameOptions {
    pub top: usize,
    pub display: DisplayConfig,
}

/// Plain table report: summary, top-N table and the process count.
pub fn list_frame(snapshot: &Snapshot, options: &FrameOptions, palette: &Palette) -> String {
    let mut out = header::render(LIST_TITLE, palette);
    if let Some(system) = &snapshot.system {
        out.push_str(&summary::render(system, palette));
    }
    let _ = writeln!(out, "Collecting process information...");
    let _ = writeln!(out);
    out.push_str(&table::render(snapshot.top(Some(options.top)), palette));
    let count = snapshot.processes.len().to_string();
    let _ = writeln!(out, "Total processes: {}", palette.paint(&count, Tone::Good));
    let _ = writeln!(out);
    out
}

/// Summary, usage bar, table and a short graph of the heaviest processes.
pub fn dashboard_frame(snapshot: &Snapshot, options: &FrameOptions, palette: &Palette) -> String {
    let mut out = header::render(DASHBOARD_TITLE, palette);
    if let Some(system) = &snapshot.system {
        out.push_str(&summary::render(system, palette));
        out.push_str(&bar::render(
            "Memory Usage",
            system.used_memory,
            system.total_memory,
            options.display.usage_bar_width,
            palette,
        ));
        let _ = writeln!(out);
    }
    out.push_str(&table::render(snapshot.top(Some(options.top)), palette));
    out.push_str(&graph::render(
        &snapshot.processes,
        options.top.min(options.display.dashboard_graph_limit),
        options.display.graph_bar_width,
        palette,
    ));
    out
}

/// Graph-first report with a wider usage bar, followed by the table.
pub fn graph_frame(snapshot: &Snapshot, options: &FrameOptions, palette: &Palette) -> String {
    let mut out = header::render(GRAPH_TITLE, palette);
    if let Some(system) = &snapshot.system {
        out.push_str(&summary::render(system, palette));
        out.push_str(&bar::render(
            "Total Memory",
            system.used_memory,
            system.total_memory,
            options.display.graph_mode_bar_width,
            palette,
        ));
        let _ = writeln!(out);
    }
    out.push_str(&graph::render(
        &snapshot.processes,
        options.top,
        options.display.graph_bar_width,
        palette,
    ));
    out.push_str(&table::render(snapshot.top(Some(options.top)), palette));
    out
}
