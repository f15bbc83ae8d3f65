use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crossterm::event::{self, Event as CtEvent, KeyEvent, KeyEventKind};
use tracing::{debug, warn};

use crate::api::{ResultSubmitter, SubmitResult};
use crate::survey::ProfileSubmission;
use crate::typing::TypingResult;

/// What the event loop reacts to.
#[derive(Debug)]
pub enum AppEvent {
    Key(KeyEvent),
    /// Bracketed paste. Never inserted into the typing input.
    Paste(String),
    Resize,
    Tick,
    Submitted(SubmitResult),
}

/// Where `Runner` pulls its next event from.
pub trait AppEventSource: Send + 'static {
    /// Waits at most `timeout`. `Err(Timeout)` means nothing arrived.
    fn recv_timeout(&self, timeout: Duration) -> Result<AppEvent, RecvTimeoutError>;
}

/// Reads the real terminal on a background thread. Only key presses, pastes and
/// resizes are forwarded.
pub struct CrosstermEventSource {
    tx: Sender<AppEvent>,
    rx: Receiver<AppEvent>,
}

impl CrosstermEventSource {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();
        let reader_tx = tx.clone();

        thread::spawn(move || loop {
            let evt = match event::read() {
                // key release/repeat reports would double every keystroke on some platforms
                Ok(CtEvent::Key(key)) if key.kind == KeyEventKind::Press => AppEvent::Key(key),
                Ok(CtEvent::Paste(text)) => AppEvent::Paste(text),
                Ok(CtEvent::Resize(_, _)) => AppEvent::Resize,
                Ok(_) => continue,
                Err(err) => {
                    warn!(%err, "terminal event reader stopped");
                    break;
                }
            };
            if reader_tx.send(evt).is_err() {
                break;
            }
        });

        Self { tx, rx }
    }

    /// Handle for background work that reports back into the event loop.
    pub fn sender(&self) -> Sender<AppEvent> {
        self.tx.clone()
    }
}

impl Default for CrosstermEventSource {
    fn default() -> Self {
        Self::new()
    }
}

impl AppEventSource for CrosstermEventSource {
    fn recv_timeout(&self, timeout: Duration) -> Result<AppEvent, RecvTimeoutError> {
        self.rx.recv_timeout(timeout)
    }
}

/// How long `Runner::step` waits for input before yielding a tick.
pub trait Ticker: Send + Sync + 'static {
    fn interval(&self) -> Duration;
}

#[derive(Clone, Copy, Debug)]
pub struct FixedTicker {
    interval: Duration,
}

impl FixedTicker {
    pub fn new(interval: Duration) -> Self {
        Self { interval }
    }
}

impl Ticker for FixedTicker {
    fn interval(&self) -> Duration {
        self.interval
    }
}

/// Events fed from a channel the caller owns; drives the app without a terminal.
pub struct TestEventSource {
    rx: Receiver<AppEvent>,
}

impl TestEventSource {
    pub fn new(rx: Receiver<AppEvent>) -> Self {
        Self { rx }
    }
}

impl AppEventSource for TestEventSource {
    fn recv_timeout(&self, timeout: Duration) -> Result<AppEvent, RecvTimeoutError> {
        self.rx.recv_timeout(timeout)
    }
}

/// One turn of the event loop per `step`.
pub struct Runner<E: AppEventSource, T: Ticker> {
    event_source: E,
    ticker: T,
}

impl<E: AppEventSource, T: Ticker> Runner<E, T> {
    pub fn new(event_source: E, ticker: T) -> Self {
        Self {
            event_source,
            ticker,
        }
    }

    /// Next queued event, or `AppEvent::Tick` once the interval passes quietly.
    /// A closed channel also reads as a tick.
    pub fn step(&self) -> AppEvent {
        match self.event_source.recv_timeout(self.ticker.interval()) {
            Ok(ev) => ev,
            Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => AppEvent::Tick,
        }
    }
}

/// A finished test waiting to be posted.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmissionJob {
    Typing(Vec<TypingResult>),
    Profile(ProfileSubmission),
}

/// Post `job` on a background thread and deliver the outcome as
/// `AppEvent::Submitted`. There is no retry. The caller joins the handle
/// before exiting so a save is never cut short.
pub fn spawn_submission<S: ResultSubmitter>(
    submitter: S,
    job: SubmissionJob,
    tx: Sender<AppEvent>,
) -> JoinHandle<()> {
    thread::spawn(move || {
        let outcome = match &job {
            SubmissionJob::Typing(results) => submitter.submit_typing(results),
            SubmissionJob::Profile(submission) => submitter.submit_profile(submission),
        };
        if tx.send(AppEvent::Submitted(outcome)).is_err() {
            debug!("event loop gone before submission finished");
        }
    })
}
