#![deny(missing_docs)]
//! Logging macros and level selection for the feed poster.
//!
//! Every `poster_*` macro forwards to [`poster_log!`], which goes through the
//! `log` facade re-exported here, so callers need no direct `log` dependency.
//! Whichever logger the binary installs decides where records end up.

#[doc(hidden)]
pub use log as __log;

/// Logs at an explicit [`log::Level`].
#[macro_export]
macro_rules! poster_log {
    ($level:expr, $($arg:tt)+) => {
        $crate::__log::log!($level, $($arg)+)
    };
}

/// Trace-level record.
#[macro_export]
macro_rules! poster_trace {
    ($($arg:tt)+) => { $crate::poster_log!($crate::__log::Level::Trace, $($arg)+) };
}

/// Debug-level record. Visible when the runner has step debugging on.
#[macro_export]
macro_rules! poster_debug {
    ($($arg:tt)+) => { $crate::poster_log!($crate::__log::Level::Debug, $($arg)+) };
}

/// Info-level record, the default run narration.
#[macro_export]
macro_rules! poster_info {
    ($($arg:tt)+) => { $crate::poster_log!($crate::__log::Level::Info, $($arg)+) };
}

/// Warn-level record.
#[macro_export]
macro_rules! poster_warn {
    ($($arg:tt)+) => { $crate::poster_log!($crate::__log::Level::Warn, $($arg)+) };
}

/// Error-level record.
#[macro_export]
macro_rules! poster_error {
    ($($arg:tt)+) => { $crate::poster_log!($crate::__log::Level::Error, $($arg)+) };
}

/// Returns the level a run should log at.
///
/// GitHub Actions sets `RUNNER_DEBUG=1` when step debug logging is enabled;
/// that switches the poster to debug output.
pub fn level_from_env() -> log::LevelFilter {
    level_for(std::env::var("RUNNER_DEBUG").ok().as_deref())
}

/// Maps a `RUNNER_DEBUG` value to a level filter.
pub fn level_for(runner_debug: Option<&str>) -> log::LevelFilter {
    match runner_debug.map(str::trim) {
        Some("1") | Some("true") => log::LevelFilter::Debug,
        _ => log::LevelFilter::Info,
    }
}

/// Installs a capture-friendly logger for integration tests.
///
/// Records go through the test harness's output capture, so they only show
/// for failing tests. Tests always log at debug. Calling it again is a no-op.
pub fn initialize_for_tests() {
    let _ = simplelog::TestLogger::init(log::LevelFilter::Debug, simplelog::Config::default());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn runner_debug_enables_debug_level() {
        assert_eq!(level_for(Some("1")), log::LevelFilter::Debug);
        assert_eq!(level_for(Some("true")), log::LevelFilter::Debug);
        assert_eq!(level_for(Some(" 1 ")), log::LevelFilter::Debug);
        assert_eq!(level_for(Some("0")), log::LevelFilter::Info);
        assert_eq!(level_for(None), log::LevelFilter::Info);
    }

    #[test]
    fn test_logger_can_be_installed_repeatedly() {
        initialize_for_tests();
        initialize_for_tests();
        poster_debug!("debug {}", 1);
        poster_log!(log::Level::Info, "explicit level");
        assert_eq!(log::max_level(), log::LevelFilter::Debug);
    }
}
