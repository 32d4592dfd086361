use std::fmt::Write;

use super::header;
use super::theme::{Palette, Severity, Tone};
use crate::format::{fit_column, format_bytes};
use crate::system::process::ProcessSample;

pub const NAME_WIDTH: usize = 35;
pub const RULE_WIDTH: usize = 100;

pub fn column_header() -> String {
    format!(
        "{:<5} {:<8} {:<35} {:<15} {:<10} {:<8} {:<12}",
        "#", "PID", "Name", "Memory", "% Mem", "Threads", "Status"
    )
}

/// One fixed-width table row; `rank` is 1-based.
pub fn format_row(rank: usize, process: &ProcessSample) -> String {
    format!(
        "{:<5} {:<8} {} {:<15} {:<10} {:<8} {:<12}",
        rank,
        process.pid,
        fit_column(&process.name, NAME_WIDTH),
        format_bytes(process.memory_bytes),
        format!("{:.2}%", process.memory_percent),
        process.thread_count,
        process.status
    )
}

/// Renders every process given; callers pick the top-N slice.
pub fn render(processes: &[ProcessSample], palette: &Palette) -> String {
    let title = format!("PROCESSES BY MEMORY USAGE ({} processes)", processes.len());
    let mut out = header::render(&title, palette);

    let _ = writeln!(out, "{}", palette.paint(&column_header(), Tone::Title));
    let _ = writeln!(out, "{}", "-".repeat(RULE_WIDTH));

    for (index, process) in processes.iter().enumerate() {
        let tone = Severity::for_memory_percent(process.memory_percent).row_tone();
        let _ = writeln!(out, "{}", palette.paint(&format_row(index + 1, process), tone));
    }

    let _ = writeln!(out);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::system::process::STATUS_RUNNING;

    fn process(pid: u32, name: &str, memory_bytes: u64, memory_percent: f64) -> ProcessSample {
        ProcessSample {
            pid,
            name: name.to_string(),
            memory_bytes,
            memory_percent,
            thread_count: 12,
            status: STATUS_RUNNING,
        }
    }

    #[test]
    fn header_row_columns() {
        assert_eq!(
            column_header().trim_end(),
            "#     PID      Name                                Memory          % Mem      Threads  Status"
        );
    }

    #[test]
    fn row_is_fixed_width() {
        let row = format_row(1, &process(4242, "postgres", 512 * 1024 * 1024, 6.25));
        assert_eq!(
            row,
            "1     4242     postgres                            512.00 MB       6.25%      12       running     "
        );
        assert_eq!(row.len(), column_header().len());
    }

    #[test]
    fn long_names_are_cut_at_35_characters() {
        let name = "com.apple.WebKit.WebContent.Service.Helper";
        let row = format_row(3, &process(9, name, 1, 0.0));
        assert!(row.contains("com.apple.WebKit.WebContent.Service "));
        assert!(!row.contains(".Helper"));
        assert_eq!(row.len(), column_header().len());
    }

    #[test]
    fn title_counts_rows_shown() {
        let rows = vec![process(1, "a", 3, 0.1), process(2, "b", 2, 0.1)];
        let out = render(&rows, &Palette::PLAIN);
        assert!(out.contains("PROCESSES BY MEMORY USAGE (2 processes)"));
        assert!(out.contains(&"-".repeat(RULE_WIDTH)));
        assert!(out.ends_with("\n\n"));
    }

    #[test]
    fn ranks_are_one_based() {
        let rows = vec![process(10, "a", 3, 0.1), process(20, "b", 2, 0.1)];
        let out = render(&rows, &Palette::PLAIN);
        assert!(out.contains("\n1     10 "));
        assert!(out.contains("\n2     20 "));
    }
}
