#![deny(missing_docs)]
//! Shared logging utilities for the vacancy workspace.
//!
//! Library crates log through the `vacancy_*` macros; the binary calls
//! [`initialize`] once and tests call [`initialize_for_tests`].

use log::LevelFilter;
use simplelog::{ColorChoice, Config, ConfigBuilder, LevelPadding, TermLogger, TerminalMode};

/// Logs a debug-level message using the global logging facade.
#[macro_export]
macro_rules! vacancy_debug {
    ($($arg:tt)*) => {{
        log::debug!($($arg)*);
    }};
}

/// Logs an info-level message using the global logging facade.
#[macro_export]
macro_rules! vacancy_info {
    ($($arg:tt)*) => {{
        log::info!($($arg)*);
    }};
}

/// Logs a warn-level message using the global logging facade.
#[macro_export]
macro_rules! vacancy_warn {
    ($($arg:tt)*) => {{
        log::warn!($($arg)*);
    }};
}

/// Logs an error-level message using the global logging facade.
#[macro_export]
macro_rules! vacancy_error {
    ($($arg:tt)*) => {{
        log::error!($($arg)*);
    }};
}

/// Initializes the terminal logger used by the command line run.
///
/// Lines carry only the level tag and the message, no timestamps or targets.
/// Calling this twice is harmless; the second call is ignored.
pub fn initialize(level: LevelFilter) {
    let _ = TermLogger::init(level, plain_config(), TerminalMode::Mixed, ColorChoice::Auto);
}

fn plain_config() -> Config {
    ConfigBuilder::new()
        .set_time_level(LevelFilter::Off)
        .set_target_level(LevelFilter::Off)
        .set_thread_level(LevelFilter::Off)
        .set_location_level(LevelFilter::Off)
        .set_level_padding(LevelPadding::Off)
        .build()
}

/// Initializes a simple terminal logger for use in tests.
///
/// This safely no-ops if another logger has already been initialized.
pub fn initialize_for_tests() {
    // Use debug level in debug builds, info in release builds.
    let level = if cfg!(debug_assertions) {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    // Ignore the error if a logger was already set by another test.
    let _ = TermLogger::init(level, Config::default(), TerminalMode::Mixed, ColorChoice::Auto);
}
