//! Conditional logging macros gated by a module-level `ENABLE_LOGS` flag.
//!
//! Per-frame code logs a lot when it logs at all; each hot module declares
//! `const ENABLE_LOGS: bool` and the macros compile down to nothing when it
//! is false.
//!
//! ```rust
//! const ENABLE_LOGS: bool = true;
//!
//! use repsense::log_info;
//!
//! log_info!("only emitted while ENABLE_LOGS is true");
//! ```

/// Info-level logging, gated by the calling module's `ENABLE_LOGS` const.
#[macro_export]
macro_rules! log_info {
    ($($arg:tt)*) => {
        if ENABLE_LOGS {
            log::info!($($arg)*);
        }
    };
}

/// Warn-level logging, gated by the calling module's `ENABLE_LOGS` const.
#[macro_export]
macro_rules! log_warn {
    ($($arg:tt)*) => {
        if ENABLE_LOGS {
            log::warn!($($arg)*);
        }
    };
}

/// Error-level logging, gated by the calling module's `ENABLE_LOGS` const.
#[macro_export]
macro_rules! log_error {
    ($($arg:tt)*) => {
        if ENABLE_LOGS {
            log::error!($($arg)*);
        }
    };
}
