use clap::{error::ErrorKind, CommandFactory, Parser, Subcommand};
use crossterm::{
    event::{DisableBracketedPaste, EnableBracketedPaste},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use fitquiz::{
    api::{HttpSubmitter, ResultSubmitter},
    app::{App, Effect},
    config::{Config, ConfigStore, FileConfigStore},
    logging,
    runtime::{spawn_submission, AppEvent, CrosstermEventSource, FixedTicker, Runner},
    TICK_RATE_MS,
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::{
    error::Error,
    io::{self, stdin},
    path::PathBuf,
    sync::mpsc::Sender,
    thread::JoinHandle,
    time::{Duration, Instant},
};
use tracing::{error, info, warn};
use webbrowser::Browser;

/// candidate screening tests in the terminal: typing speed and behavioral profile
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "Runs the typing test or the behavioral profile survey and posts the results to the recruitment backend."
)]
pub struct Cli {
    /// backend base url, e.g. http://localhost:8000
    #[clap(long = "server")]
    server_url: Option<String>,

    /// value for the X-CSRFToken header
    #[clap(long)]
    csrf_token: Option<String>,

    /// session cookie of the logged-in candidate
    #[clap(long)]
    session_id: Option<String>,

    /// config file to use instead of the default location
    #[clap(long)]
    config: Option<PathBuf>,

    /// persist the effective settings to the config file
    #[clap(long)]
    save_config: bool,

    #[clap(subcommand)]
    widget: Widget,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
pub enum Widget {
    /// three-phase typing speed and accuracy test
    Typing,
    /// 25-question behavioral profile survey
    Profile,
}

impl Cli {
    fn config_store(&self) -> FileConfigStore {
        match &self.config {
            Some(path) => FileConfigStore::with_path(path),
            None => FileConfigStore::new(),
        }
    }

    /// Stored config with command line values on top.
    fn resolve_config(&self, store: &impl ConfigStore) -> Config {
        store.load().with_overrides(
            self.server_url.clone(),
            self.csrf_token.clone(),
            self.session_id.clone(),
        )
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    let store = cli.config_store();
    let config = cli.resolve_config(&store);
    let log_path = logging::init(&config.log_level)?;
    info!(widget = %cli.widget, server = %config.server_url, log = %log_path.display(), "starting");

    if cli.save_config {
        store.save(&config)?;
        info!(path = %store.path().display(), "config saved");
    }

    let submitter = HttpSubmitter::new(&config)?;
    let mut app = match cli.widget {
        Widget::Typing => App::typing(config.dashboard_url()),
        Widget::Profile => App::profile(config.dashboard_url()),
    };

    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableBracketedPaste)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = start_tui(&mut terminal, &mut app, submitter);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        DisableBracketedPaste,
        LeaveAlternateScreen
    )?;
    terminal.show_cursor()?;

    if let Err(err) = &res {
        error!(%err, "terminal session failed");
    }
    res
}

fn start_tui<B: Backend, S: ResultSubmitter + Clone>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    submitter: S,
) -> Result<(), Box<dyn Error>> {
    let events = CrosstermEventSource::new();
    let tx = events.sender();
    let runner = Runner::new(events, FixedTicker::new(Duration::from_millis(TICK_RATE_MS)));

    let mut in_flight = Vec::new();

    terminal.draw(|f| f.render_widget(&*app, f.area()))?;

    loop {
        let redraw = match runner.step() {
            AppEvent::Tick => app.on_tick(Instant::now()),
            AppEvent::Resize => true,
            AppEvent::Submitted(outcome) => {
                app.on_submitted(outcome, Instant::now());
                true
            }
            AppEvent::Paste(text) => {
                app.on_paste(&text);
                false
            }
            AppEvent::Key(key) => {
                let effect = app.on_key(key);
                if !apply_effect(effect, app, &submitter, &tx, &mut in_flight) {
                    break;
                }
                true
            }
        };

        if redraw {
            terminal.draw(|f| f.render_widget(&*app, f.area()))?;
        }
    }

    finish_submissions(in_flight);
    Ok(())
}

/// Block until every started POST has completed, so quitting never cuts a
/// save short.
fn finish_submissions(in_flight: Vec<JoinHandle<()>>) {
    let pending = in_flight.iter().filter(|h| !h.is_finished()).count();
    if pending > 0 {
        info!(pending, "waiting for results to be saved before exit");
    }
    for handle in in_flight {
        if handle.join().is_err() {
            error!("submission thread panicked");
        }
    }
}

/// Carry out what a key press asked for. Returns false when the app should exit.
fn apply_effect<S: ResultSubmitter + Clone>(
    effect: Effect,
    app: &App,
    submitter: &S,
    tx: &Sender<AppEvent>,
    in_flight: &mut Vec<JoinHandle<()>>,
) -> bool {
    match effect {
        Effect::None => {}
        Effect::Submit(job) => {
            in_flight.push(spawn_submission(submitter.clone(), job, tx.clone()));
        }
        Effect::OpenDashboard => {
            if Browser::is_available() {
                if let Err(err) = webbrowser::open(&app.dashboard_url) {
                    warn!(%err, url = %app.dashboard_url, "could not open dashboard");
                }
            } else {
                warn!(url = %app.dashboard_url, "no browser available");
            }
        }
        Effect::Quit => return false,
    }
    true
}
