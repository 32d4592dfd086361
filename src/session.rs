use std::io::{self, Write};
use std::time::Duration;

use crossterm::cursor::MoveTo;
use crossterm::queue;
use crossterm::terminal::{Clear, ClearType};
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::config::{Config, GeneralConfig};
use crate::system::collector::{Collector, ProcessStatsProvider};
use crate::system::memory::SystemStatsProvider;
use crate::system::snapshot::Snapshot;
use crate::ui::theme::{Palette, Tone};
use crate::ui::{self, FrameOptions};

pub const REFRESH_NOTICE: &str = "Starting continuous refresh mode (Ctrl+C to exit)...\n\n";
pub const EXIT_HINT: &str = "Press Ctrl+C to exit";
pub const FAREWELL: &str = "\n\nExiting...\n";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    List,
    Tui,
    Refresh,
    Graph,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SessionOptions {
    pub mode: Mode,
    pub frame: FrameOptions,
    pub interval: Duration,
    pub palette: Palette,
}

impl SessionOptions {
    pub fn from_config(mode: Mode, config: &Config, palette: Palette) -> Self {
        SessionOptions {
            mode,
            frame: FrameOptions {
                top: config.general.top,
                display: config.display.clone(),
            },
            interval: interval_from_secs(config.general.interval_secs),
            palette,
        }
    }
}

/// Out-of-range intervals fall back to the default instead of panicking.
pub fn interval_from_secs(secs: f64) -> Duration {
    Duration::try_from_secs_f64(secs)
        .ok()
        .filter(|d| !d.is_zero())
        .unwrap_or_else(|| Duration::from_secs_f64(GeneralConfig::default().interval_secs))
}

/// Composes the full text of one frame for `mode` from `snapshot`.
pub fn compose(
    mode: Mode,
    snapshot: &Snapshot,
    options: &FrameOptions,
    palette: &Palette,
) -> String {
    match mode {
        Mode::List => ui::list_frame(snapshot, options, palette),
        Mode::Graph => ui::graph_frame(snapshot, options, palette),
        Mode::Tui | Mode::Refresh => {
            let mut frame = ui::dashboard_frame(snapshot, options, palette);
            frame.push_str(&palette.paint(EXIT_HINT, Tone::Caution));
            frame.push('\n');
            frame
        }
    }
}

/// Drives one invocation: samples, renders and writes frames to `out`
/// until the mode is done or the token is cancelled.
pub struct Session<W, S, P> {
    out: W,
    collector: Collector<S, P>,
    options: SessionOptions,
    passes: usize,
}

impl<W, S, P> Session<W, S, P>
where
    W: Write,
    S: SystemStatsProvider,
    P: ProcessStatsProvider,
{
    pub fn new(out: W, collector: Collector<S, P>, options: SessionOptions) -> Self {
        Session {
            out,
            collector,
            options,
            passes: 0,
        }
    }

    pub fn collector(&self) -> &Collector<S, P> {
        &self.collector
    }

    pub fn options(&self) -> &SessionOptions {
        &self.options
    }

    /// Sampling passes completed so far.
    pub fn passes(&self) -> usize {
        self.passes
    }

    pub fn into_output(self) -> W {
        self.out
    }

    /// Takes a fresh snapshot and renders it. Nothing is reused from
    /// earlier passes.
    pub fn render_pass(&mut self) -> String {
        let snapshot = self.collector.refresh();
        self.passes += 1;
        debug!(
            pass = self.passes,
            processes = snapshot.processes.len(),
            "rendering frame"
        );
        compose(
            self.options.mode,
            &snapshot,
            &self.options.frame,
            &self.options.palette,
        )
    }

    pub async fn run(&mut self, cancel: &CancellationToken) -> io::Result<()> {
        match self.options.mode {
            Mode::List | Mode::Graph => {
                let frame = self.render_pass();
                self.out.write_all(frame.as_bytes())?;
                self.out.flush()
            }
            Mode::Tui => {
                let frame = self.render_pass();
                self.write_cleared(&frame)
            }
            Mode::Refresh => self.refresh_loop(cancel).await,
        }
    }

    async fn refresh_loop(&mut self, cancel: &CancellationToken) -> io::Result<()> {
        self.out.write_all(REFRESH_NOTICE.as_bytes())?;
        self.out.flush()?;

        while !cancel.is_cancelled() {
            let frame = self.render_pass();
            self.write_cleared(&frame)?;

            tokio::select! {
                _ = tokio::time::sleep(self.options.interval) => {}
                _ = cancel.cancelled() => break,
            }
        }

        debug!(passes = self.passes, "refresh loop cancelled");
        self.out.write_all(FAREWELL.as_bytes())?;
        self.out.flush()
    }

    /// Clear sequence and the whole frame go out in a single flush.
    fn write_cleared(&mut self, frame: &str) -> io::Result<()> {
        queue!(self.out, Clear(ClearType::All), MoveTo(0, 0))?;
        self.out.write_all(frame.as_bytes())?;
        self.out.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DisplayConfig;
    use crate::system::memory::SystemMemorySnapshot;
    use crate::system::process::{ProbeError, RawProcess};

    const GIB: u64 = 1024 * 1024 * 1024;

    struct FakeSystem;

    impl SystemStatsProvider for FakeSystem {
        fn sample(&mut self) -> Option<SystemMemorySnapshot> {
            Some(SystemMemorySnapshot {
                total_memory: 8 * GIB,
                used_memory: 4 * GIB,
                free_memory: 2 * GIB,
                available_memory: 4 * GIB,
                wired_memory: GIB,
                swap_total: 0,
                swap_used: 0,
            })
        }
    }

    struct FakeProcesses;

    impl ProcessStatsProvider for FakeProcesses {
        fn list(&mut self) -> Vec<u32> {
            vec![1, 2]
        }

        fn info(&mut self, pid: u32) -> Result<RawProcess, ProbeError> {
            Ok(RawProcess {
                pid,
                name: Some(format!("proc{pid}")),
                memory_bytes: u64::from(pid) * GIB,
                thread_count: Some(pid),
            })
        }
    }

    fn session(mode: Mode, interval: Duration) -> Session<Vec<u8>, FakeSystem, FakeProcesses> {
        let options = SessionOptions {
            mode,
            frame: FrameOptions {
                top: 20,
                display: DisplayConfig::default(),
            },
            interval,
            palette: Palette::PLAIN,
        };
        Session::new(Vec::new(), Collector::new(FakeSystem, FakeProcesses), options)
    }

    fn output(session: Session<Vec<u8>, FakeSystem, FakeProcesses>) -> String {
        String::from_utf8(session.into_output()).unwrap()
    }

    #[tokio::test]
    async fn list_mode_writes_one_uncleared_frame() {
        let mut session = session(Mode::List, Duration::from_secs(1));
        session.run(&CancellationToken::new()).await.unwrap();
        assert_eq!(session.passes(), 1);

        let out = output(session);
        assert!(out.starts_with(&"=".repeat(100)));
        assert!(out.contains(ui::LIST_TITLE));
        assert!(out.contains("Total processes: 2"));
        assert!(!out.contains('\u{1b}'));
    }

    #[tokio::test]
    async fn tui_mode_clears_first_and_shows_exit_hint() {
        let mut session = session(Mode::Tui, Duration::from_secs(1));
        session.run(&CancellationToken::new()).await.unwrap();

        let out = output(session);
        assert!(out.starts_with('\u{1b}'));
        assert!(out.contains(ui::DASHBOARD_TITLE));
        assert!(out.ends_with(&format!("{EXIT_HINT}\n")));
    }

    #[tokio::test]
    async fn graph_mode_uses_graph_title() {
        let mut session = session(Mode::Graph, Duration::from_secs(1));
        session.run(&CancellationToken::new()).await.unwrap();
        assert!(output(session).contains(ui::GRAPH_TITLE));
    }

    #[tokio::test]
    async fn cancelled_before_start_runs_no_pass() {
        let cancel = CancellationToken::new();
        cancel.cancel();

        let mut session = session(Mode::Refresh, Duration::from_secs(3600));
        session.run(&cancel).await.unwrap();
        assert_eq!(session.passes(), 0);

        let out = output(session);
        assert_eq!(out, format!("{REFRESH_NOTICE}{FAREWELL}"));
    }

    #[tokio::test]
    async fn cancel_during_sleep_stops_without_another_pass() {
        let cancel = CancellationToken::new();
        let canceller = cancel.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(50)).await;
            canceller.cancel();
        });

        let mut session = session(Mode::Refresh, Duration::from_secs(3600));
        tokio::time::timeout(Duration::from_secs(10), session.run(&cancel))
            .await
            .expect("cancellation should interrupt the sleep")
            .unwrap();
        assert_eq!(session.passes(), 1);

        let out = output(session);
        assert!(out.starts_with(REFRESH_NOTICE));
        assert_eq!(out.matches(ui::DASHBOARD_TITLE).count(), 1);
        assert!(out.ends_with(FAREWELL));
    }

    #[tokio::test]
    async fn refresh_repeats_until_cancelled() {
        let cancel = CancellationToken::new();
        let canceller = cancel.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(200)).await;
            canceller.cancel();
        });

        let mut session = session(Mode::Refresh, Duration::from_millis(10));
        tokio::time::timeout(Duration::from_secs(10), session.run(&cancel))
            .await
            .expect("refresh loop should stop")
            .unwrap();
        assert!(session.passes() >= 2);
        assert!(output(session).ends_with(FAREWELL));
    }

    #[test]
    fn dashboard_exit_hint_is_painted_as_caution() {
        let mut collector = Collector::new(FakeSystem, FakeProcesses);
        let snapshot = collector.refresh();
        let options = FrameOptions {
            top: 5,
            display: DisplayConfig::default(),
        };

        let colored = compose(Mode::Refresh, &snapshot, &options, &Palette::ANSI);
        let hint = Palette::ANSI.paint(EXIT_HINT, Tone::Caution);
        assert!(colored.ends_with(&format!("{hint}\n")));

        let plain = compose(Mode::Tui, &snapshot, &options, &Palette::PLAIN);
        assert!(plain.ends_with(&format!("{EXIT_HINT}\n")));
        assert!(!compose(Mode::List, &snapshot, &options, &Palette::PLAIN).contains(EXIT_HINT));
    }

    #[test]
    fn invalid_intervals_fall_back_to_default() {
        assert_eq!(interval_from_secs(0.5), Duration::from_millis(500));
        assert_eq!(interval_from_secs(-1.0), Duration::from_secs(2));
        assert_eq!(interval_from_secs(f64::NAN), Duration::from_secs(2));
        assert_eq!(interval_from_secs(0.0), Duration::from_secs(2));
    }

    #[test]
    fn options_follow_config() {
        let mut config = Config::default();
        config.general.top = 7;
        config.general.interval_secs = 0.25;
        let options = SessionOptions::from_config(Mode::Graph, &config, Palette::PLAIN);
        assert_eq!(options.mode, Mode::Graph);
        assert_eq!(options.frame.top, 7);
        assert_eq!(options.interval, Duration::from_millis(250));
    }
}
