use std::io::{self, stdout};
use std::path::PathBuf;

use clap::Parser;
use color_eyre::Result;
use meminspector::config::{Config, is_valid_interval, load_config, load_config_from_path};
use meminspector::session::{Mode, Session, SessionOptions};
use meminspector::system::collector::Collector;
use meminspector::ui::theme::resolve_palette;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

const LOG_ENV: &str = "MEMINSPECTOR_LOG";

const EXAMPLES: &str = "\
EXAMPLES:
    meminspector                    # List all processes (default)
    meminspector --tui              # Colored dashboard
    meminspector --tui -t 30        # Dashboard with top 30 processes
    meminspector -r -t 20 -i 3      # Refresh top 20 every 3 seconds
    meminspector --graph -t 15      # ASCII graphs of the top 15 processes";

#[derive(Parser, Debug)]
#[command(
    name = "meminspector",
    version,
    about = "Per-process and system-wide memory inspector",
    after_help = EXAMPLES,
    args_override_self = true
)]
struct Cli {
    /// List processes by memory usage (default mode)
    #[arg(short, long, overrides_with_all = ["tui", "refresh", "graph"])]
    list: bool,

    /// Colored dashboard with summary, usage bar, table and graph
    #[arg(long, overrides_with_all = ["list", "refresh", "graph"])]
    tui: bool,

    /// Redraw the dashboard every interval until interrupted
    #[arg(short, long, overrides_with_all = ["list", "tui", "graph"])]
    refresh: bool,

    /// ASCII graphs followed by the process table
    #[arg(short, long, overrides_with_all = ["list", "tui", "refresh"])]
    graph: bool,

    /// Number of top processes to show [default: 20]
    #[arg(
        short,
        long,
        value_name = "N",
        num_args = 0..=1,
        default_missing_value = "",
        allow_negative_numbers = true
    )]
    top: Option<String>,

    /// Refresh interval in seconds [default: 2.0]
    #[arg(
        short,
        long,
        value_name = "SECS",
        num_args = 0..=1,
        default_missing_value = "",
        allow_negative_numbers = true
    )]
    interval: Option<String>,

    /// Path to config file
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Color output: auto, always, never
    #[arg(long, value_name = "WHEN")]
    color: Option<String>,
}

impl Cli {
    fn mode(&self) -> Mode {
        if self.graph {
            Mode::Graph
        } else if self.refresh {
            Mode::Refresh
        } else if self.tui {
            Mode::Tui
        } else {
            Mode::List
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    color_eyre::install()?;
    init_logging();

    let cli = Cli::parse();
    let config = load_config_for_cli(&cli);
    let mode = cli.mode();
    let palette = resolve_palette(&config.general.color);
    let options = SessionOptions::from_config(mode, &config, palette);
    debug!(?mode, top = options.frame.top, interval = ?options.interval, "starting");

    let cancel = CancellationToken::new();
    if mode == Mode::Refresh {
        let token = cancel.clone();
        tokio::spawn(async move {
            match tokio::signal::ctrl_c().await {
                Ok(()) => token.cancel(),
                Err(err) => warn!(%err, "unable to listen for Ctrl+C"),
            }
        });
        // let the listener install its handler before the first blocking pass
        tokio::task::yield_now().await;
    }

    let mut session = Session::new(stdout().lock(), Collector::host(), options);
    match session.run(&cancel).await {
        Err(err) if err.kind() == io::ErrorKind::BrokenPipe => Ok(()),
        result => Ok(result?),
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_ansi(io::IsTerminal::is_terminal(&io::stderr()))
        .try_init();
}

fn load_config_for_cli(cli: &Cli) -> Config {
    let mut config = match &cli.config {
        Some(path) => load_config_from_path(path),
        None => load_config(),
    };

    if let Some(top) = cli.top.as_deref() {
        match parse_top(top) {
            Some(top) => config.general.top = top,
            None => debug!(value = top, "ignoring invalid --top"),
        }
    }
    if let Some(interval) = cli.interval.as_deref() {
        match parse_interval(interval) {
            Some(secs) => config.general.interval_secs = secs,
            None => debug!(value = interval, "ignoring invalid --interval"),
        }
    }
    if let Some(ref color) = cli.color {
        config.general.color = color.clone();
    }

    config
}

fn parse_top(value: &str) -> Option<usize> {
    value.trim().parse().ok()
}

fn parse_interval(value: &str) -> Option<f64> {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|&secs| is_valid_interval(secs))
}
