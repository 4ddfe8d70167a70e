use std::io;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::{self, Event};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tracing::info;

use showcase::app::{App, Request};
use showcase::config::{self, Config, Overrides};
use showcase::core::NotifyLevel;
use showcase::domain::{DashboardSource, ImageEvent};
use showcase::infrastructure::{
    ImageFetcher, ImageLoader, MockDashboardSource, RuntimeBridge, RuntimeCommand, RuntimeEvent,
    TimerToken,
};
use showcase::{logging, ui};

#[derive(Debug, Parser)]
#[command(
    name = "showcase",
    version,
    about = "Showcase: stateful UI patterns in the terminal"
)]
struct Args {
    /// Display name of the signed-in user
    #[arg(long)]
    user: Option<String>,

    /// Simulated dashboard fetch latency in milliseconds
    #[arg(long)]
    latency_ms: Option<u64>,

    /// Directory bundled image paths are resolved against
    #[arg(long)]
    asset_dir: Option<String>,

    /// Log file (defaults to the data directory)
    #[arg(long)]
    log_file: Option<String>,

    /// Make every dashboard fetch fail
    #[arg(long)]
    fail_fetches: bool,
}

impl Args {
    fn overrides(&self) -> Overrides {
        Overrides {
            username: self.user.clone(),
            fetch_latency_ms: self.latency_ms,
            asset_dir: self.asset_dir.clone(),
            log_file: self.log_file.clone(),
            fail_fetches: self.fail_fetches,
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    let overrides = args.overrides();

    let (mut config, config_error) = match config::load() {
        Ok(config) => (config, None),
        Err(err) => (Config::default(), Some(err)),
    };
    overrides.apply(&mut config);

    let log_status = match config.log_path() {
        Some(path) => logging::init(&path, &config.log_level).err(),
        None => None,
    };
    info!(user = %config.username, "starting");

    let source: Arc<dyn DashboardSource> = if config.fail_fetches {
        Arc::new(MockDashboardSource::failing(config.fetch_latency()))
    } else {
        Arc::new(MockDashboardSource::new(config.fetch_latency()))
    };
    let images: Arc<dyn ImageLoader> =
        Arc::new(ImageFetcher::new(config.asset_root(), config.image_timeout())?);
    let runtime = RuntimeBridge::new(source, images)?;

    let mut problems = Vec::new();
    if let Some(err) = config_error {
        problems.push(format!("Config ignored: {err:#}"));
    }
    if let Some(err) = log_status {
        problems.push(format!("Logging disabled: {err:#}"));
    }

    let mut app = App::with_overrides(config, overrides);
    app.report_startup(&problems);
    app.boot();

    let mut stdout = io::stdout();
    enable_raw_mode().context("enable raw mode")?;
    execute!(stdout, EnterAlternateScreen).context("enter alternate screen")?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, app, runtime);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("{err:?}");
    }
    info!("exiting");

    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    mut app: App,
    runtime: RuntimeBridge,
) -> Result<()> {
    let tick_rate = Duration::from_millis(200);
    let mut last_tick = Instant::now();

    loop {
        pump_background(&mut app, &runtime);
        let size = terminal.size()?;
        app.set_viewport(size.width, size.height);
        terminal.draw(|f| ui::draw(f, &app))?;
        if app.should_quit {
            let _ = runtime.send(RuntimeCommand::Shutdown);
            return Ok(());
        }

        let timeout = tick_rate
            .checked_sub(last_tick.elapsed())
            .unwrap_or_else(|| Duration::from_secs(0));

        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) => app.handle_key(key),
                Event::Resize(width, height) => app.set_viewport(width, height),
                _ => {}
            }
        }

        if last_tick.elapsed() >= tick_rate {
            app.on_tick();
            last_tick = Instant::now();
        }

        pump_background(&mut app, &runtime);
    }
}

/// Apply worker events, then hand the app's new requests to the worker
fn pump_background(app: &mut App, runtime: &RuntimeBridge) {
    for evt in runtime.poll_events() {
        match evt {
            RuntimeEvent::DashboardSettled {
                mount,
                ticket,
                outcome,
            } => {
                app.apply_dashboard_settled(mount, ticket, outcome);
            }
            RuntimeEvent::Image {
                slot,
                attempt,
                event,
            } => {
                app.apply_image_signal(slot, attempt, event);
            }
            RuntimeEvent::TimerElapsed {
                token: TimerToken::LoadingDemo,
            } => app.apply_loading_elapsed(),
            RuntimeEvent::Error { message } => app.set_status(message, NotifyLevel::Error),
        }
    }

    for request in app.take_requests() {
        match request {
            Request::FetchDashboard { mount, ticket } => {
                if runtime
                    .send(RuntimeCommand::FetchDashboard { mount, ticket })
                    .is_err()
                {
                    app.abandon_fetch(mount, ticket);
                }
            }
            Request::LoadImage(req) => {
                let (slot, attempt) = (req.slot, req.attempt);
                let cmd = RuntimeCommand::LoadImage {
                    slot,
                    attempt,
                    source: req.source,
                };
                if runtime.send(cmd).is_err() {
                    app.apply_image_signal(
                        slot,
                        attempt,
                        ImageEvent::LoadFailed("background worker unavailable".to_string()),
                    );
                }
            }
            Request::LoadingTimer(after) => {
                let cmd = RuntimeCommand::StartTimer {
                    token: TimerToken::LoadingDemo,
                    after,
                };
                if runtime.send(cmd).is_err() {
                    app.apply_loading_elapsed();
                }
            }
        }
    }
    app.drain_actions();
}
