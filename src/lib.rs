// Library surface for the binary and the headless integration tests.
pub mod api;
pub mod app;
pub mod app_dirs;
pub mod config;
pub mod logging;
pub mod runtime;
pub mod session;
pub mod survey;
pub mod typing;
pub mod ui;
pub mod util;

/// Interval between `AppEvent::Tick`s when no input arrives.
pub const TICK_RATE_MS: u64 = 100;
