#![deny(missing_docs)]
//! Shared logging utilities for the gateway workspace.
//!
//! This crate provides the `gateway_*` logging macros used across the codebase
//! and a minimal test initializer for the global logger. Every record emitted
//! through the macros is prefixed with the current connection number so that a
//! log file spanning several dial-ins stays readable.

use std::cell::Cell;

thread_local! {
    /// Thread-local storage for the current connection number.
    static CONNECTION_ID: Cell<u64> = const { Cell::new(0) };
}

/// Sets the connection number for the current thread.
/// The polling loop calls this once per completed handshake.
pub fn set_connection_id(id: u64) {
    CONNECTION_ID.with(|v| v.set(id));
}

/// Retrieves the connection number for the current thread.
/// Returns 0 before the first handshake and on threads that never set it.
pub fn connection_id() -> u64 {
    CONNECTION_ID.with(|v| v.get())
}

/// Logs a trace-level message using the global logging facade.
#[macro_export]
macro_rules! gateway_trace {
    ($($arg:tt)*) => {{
        log::trace!("[conn {}] {}", $crate::connection_id(), format_args!($($arg)*));
    }};
}

/// Logs an info-level message using the global logging facade.
#[macro_export]
macro_rules! gateway_info {
    ($($arg:tt)*) => {{
        log::info!("[conn {}] {}", $crate::connection_id(), format_args!($($arg)*));
    }};
}

/// Logs a debug-level message using the global logging facade.
#[macro_export]
macro_rules! gateway_debug {
    ($($arg:tt)*) => {{
        log::debug!("[conn {}] {}", $crate::connection_id(), format_args!($($arg)*));
    }};
}

/// Logs a warn-level message using the global logging facade.
#[macro_export]
macro_rules! gateway_warn {
    ($($arg:tt)*) => {{
        log::warn!("[conn {}] {}", $crate::connection_id(), format_args!($($arg)*));
    }};
}

/// Logs an error-level message using the global logging facade.
#[macro_export]
macro_rules! gateway_error {
    ($($arg:tt)*) => {{
        log::error!("[conn {}] {}", $crate::connection_id(), format_args!($($arg)*));
    }};
}

/// Initializes a simple terminal logger for use in unit tests.
///
/// This safely no-ops if another logger has already been initialized.
pub fn initialize_for_tests() {
    use simplelog::{ColorChoice, CombinedLogger, Config, TermLogger, TerminalMode};

    // Use debug level in debug builds, info in release builds.
    let level = if cfg!(debug_assertions) {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    // Ignore the error if a logger was already set by another test.
    let _ = CombinedLogger::init(vec![TermLogger::new(
        level,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )]);
}
