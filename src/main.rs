//! clanboard - International Clan Leaderboard
//!
//! A TUI that fetches the clan leaderboard once and shows it as a table.
//!
//! Features:
//! - Clans sorted by total score, ten member columns per clan
//! - Per-member scores with hover details (cursor)
//! - Light/dark theme, remembered between runs
//! - Compact layout on narrow terminals
//!
//! Usage: clanboard [--dark | --light] [--json] [--endpoint URL]

mod app;
mod config;
mod data;
mod logging;
mod types;
mod ui;

use anyhow::{bail, Context, Result};
use app::App;
use clap::Parser;
use config::Config;
use data::{
    CrosstermProbe, EventReader, Fetcher, FilePreferenceStore, HttpSource, LoadState,
    MemoryPreferenceStore, PreferenceStore, ViewportSize, ViewportTracker,
};
use ratatui::prelude::*;
use std::io::IsTerminal;
use std::time::Duration;
use tracing::{info, warn};
use types::AssetUrls;
use ui::table::TableBuilder;
use ui::terminal::TerminalSession;

/// How often the UI wakes up without input
const TICK_RATE: Duration = Duration::from_millis(100);

const AFTER_HELP: &str = "\
KEYBINDINGS:
    j/k, Up/Down     Move between clans
    h/l, Left/Right  Move between columns
    g/G              First/last clan
    d                Toggle dark/light theme
    q, Esc           Quit

CONFIG:
    ~/.config/clanboard/config.toml";

#[derive(Debug, Parser)]
#[command(
    name = "clanboard",
    version,
    about = "International clan leaderboard",
    after_help = AFTER_HELP
)]
struct Cli {
    /// Leaderboard endpoint (overrides the config file)
    #[arg(long, value_name = "URL")]
    endpoint: Option<String>,

    /// Use the dark theme for this run without storing it
    #[arg(long, conflicts_with = "light")]
    dark: bool,

    /// Use the light theme for this run without storing it
    #[arg(long)]
    light: bool,

    /// Print the derived table as JSON instead of starting the UI
    #[arg(long)]
    json: bool,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    /// Forced theme wins over the stored preference and is never persisted
    fn preferences(&self) -> Box<dyn PreferenceStore> {
        if self.dark || self.light {
            Box::new(MemoryPreferenceStore::with_dark(self.dark))
        } else {
            Box::new(FilePreferenceStore::default_location())
        }
    }
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    // An unusable config location is not fatal: run with the defaults
    let (mut config, config_error) = Config::load_or_default();
    if let Some(endpoint) = &cli.endpoint {
        config.endpoint = endpoint.clone();
    }

    let level = logging::resolve_level(&config.log_level, cli.verbose);
    if let Some(path) = logging::init_logging(&level) {
        info!(
            version = env!("CARGO_PKG_VERSION"),
            log = %path.display(),
            "clanboard starting"
        );
    }
    if let Some(e) = config_error {
        warn!("using default configuration: {:#}", e);
    }

    let timeout = Duration::from_secs(config.request_timeout_secs);
    let source = HttpSource::new(&config.endpoint, timeout)
        .context("Failed to create HTTP client")?;

    // The one request of this run starts before the terminal is taken over
    let fetcher = Fetcher::spawn(source);
    let viewport = ViewportTracker::attach(Box::new(CrosstermProbe), config.viewport);

    if cli.json {
        return run_json(config, cli.preferences(), fetcher, viewport, timeout);
    }

    let mut app = App::new(config, cli.preferences(), fetcher, viewport);
    run_app(&mut app)
}

/// Non-interactive mode: wait for the fetch, print the table model
fn run_json(
    config: Config,
    preferences: Box<dyn PreferenceStore>,
    mut fetcher: Fetcher,
    viewport: ViewportTracker,
    timeout: Duration,
) -> Result<()> {
    if !fetcher.wait(timeout + Duration::from_secs(5)) {
        bail!("Timed out waiting for {}", config.endpoint);
    }
    if let LoadState::Failed(e) = fetcher.state() {
        bail!("Failed to fetch leaderboard from {}: {}", config.endpoint, e);
    }

    let viewport = json_viewport(&viewport, std::io::stdout().is_terminal());
    let builder = TableBuilder::new(&config.title, AssetUrls::new(&config.asset_host));
    let model = builder.build(fetcher.state(), preferences.read(), viewport);

    let json = serde_json::to_string_pretty(&model).context("Failed to serialize table")?;
    println!("{}", json);
    Ok(())
}

/// Redirected output has no display surface, whatever terminal the process runs in
fn json_viewport(viewport: &ViewportTracker, stdout_is_terminal: bool) -> ViewportSize {
    if stdout_is_terminal {
        viewport.size()
    } else {
        ViewportSize::UNKNOWN
    }
}

fn run_app(app: &mut App) -> Result<()> {
    let mut session = TerminalSession::start()?;
    let events = EventReader::spawn(TICK_RATE).context("Failed to start event reader")?;

    // Resize subscription is released before the terminal is restored
    let result = main_loop(&mut session.terminal, app, &events);
    drop(events);
    drop(session);

    result
}

fn main_loop<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    events: &EventReader,
) -> Result<()> {
    loop {
        // Render UI
        terminal.draw(|frame| {
            ui::render(frame, app);
        })?;

        let event = events.next().context("Event reader stopped")?;
        app.handle_event(event);

        // Check if should quit
        if app.should_quit {
            break;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_flags() {
        let cli = Cli::parse_from(["clanboard", "--dark", "--json", "-vv"]);
        assert!(cli.dark);
        assert!(cli.json);
        assert_eq!(cli.verbose, 2);
        assert!(cli.preferences().read());
    }

    #[test]
    fn test_cli_rejects_both_themes() {
        assert!(Cli::try_parse_from(["clanboard", "--dark", "--light"]).is_err());
    }

    #[test]
    fn test_redirected_json_uses_sentinel_viewport() {
        use crate::config::ViewportOptions;
        use crate::data::viewport::{TerminalMetrics, ViewportProbe};

        struct Wide;

        impl ViewportProbe for Wide {
            fn measure(&self) -> Option<TerminalMetrics> {
                Some(TerminalMetrics {
                    columns: 200,
                    rows: 50,
                    ..Default::default()
                })
            }
        }

        let viewport = ViewportTracker::attach(Box::new(Wide), ViewportOptions::default());
        assert_eq!(json_viewport(&viewport, true), ViewportSize::new(1600, 800));
        assert_eq!(json_viewport(&viewport, false), ViewportSize::UNKNOWN);
    }

    #[test]
    fn test_forced_light_ignores_store() {
        let cli = Cli::parse_from(["clanboard", "--light"]);
        assert!(!cli.preferences().read());
    }
}
