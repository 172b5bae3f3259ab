//! Command-line arguments for the native build

use clap::Parser;
use log::LevelFilter;
use std::path::PathBuf;

use crate::consts::DEFAULT_DATA_DIR;
use crate::settings::LogLevel;

/// Level used until the saved settings have been read
pub const STARTUP_LEVEL: LevelFilter = LevelFilter::Info;

/// Semester GPA calculator (terminal front-end)
#[derive(Debug, Parser)]
#[command(name = "gpa-calculator", version, about)]
pub struct Cli {
    /// Directory holding the saved semesters and settings
    #[arg(value_name = "DATA_DIR", default_value = DEFAULT_DATA_DIR)]
    pub data_dir: PathBuf,
}

/// Install `env_logger` before anything else runs, so that settings and
/// storage messages are not lost.
///
/// The logger itself accepts everything (or whatever `RUST_LOG` asks for);
/// the global max level does the filtering and is lowered or raised later by
/// [`apply_log_level`].
pub fn init_logging() {
    env_logger::Builder::new()
        .filter_level(LevelFilter::Trace)
        .parse_default_env()
        .init();
    log::set_max_level(startup_filter(std::env::var("RUST_LOG").ok().as_deref()));
}

/// Switch to the level from the saved settings. `RUST_LOG` wins when set.
pub fn apply_log_level(level: LogLevel) {
    log::set_max_level(configured_filter(
        level,
        std::env::var("RUST_LOG").ok().as_deref(),
    ));
}

fn rust_log_set(rust_log: Option<&str>) -> bool {
    rust_log.is_some_and(|s| !s.trim().is_empty())
}

fn startup_filter(rust_log: Option<&str>) -> LevelFilter {
    if rust_log_set(rust_log) {
        LevelFilter::Trace
    } else {
        STARTUP_LEVEL
    }
}

fn configured_filter(level: LogLevel, rust_log: Option<&str>) -> LevelFilter {
    if rust_log_set(rust_log) {
        LevelFilter::Trace
    } else {
        level.to_filter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::error::ErrorKind;

    #[test]
    fn test_default_data_dir() {
        let cli = Cli::try_parse_from(["gpa-calculator"]).unwrap();
        assert_eq!(cli.data_dir, PathBuf::from("gpa-data"));
    }

    #[test]
    fn test_explicit_data_dir() {
        let cli = Cli::try_parse_from(["gpa-calculator", "/tmp/grades"]).unwrap();
        assert_eq!(cli.data_dir, PathBuf::from("/tmp/grades"));
    }

    #[test]
    fn test_help_is_not_a_directory() {
        let err = Cli::try_parse_from(["gpa-calculator", "--help"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DisplayHelp);
        let err = Cli::try_parse_from(["gpa-calculator", "-h"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DisplayHelp);
    }

    #[test]
    fn test_version_flag() {
        let err = Cli::try_parse_from(["gpa-calculator", "--version"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DisplayVersion);
    }

    #[test]
    fn test_startup_level_lets_settings_messages_through() {
        // Settings::load reports at info
        assert!(log::Level::Info <= startup_filter(None));
        assert!(log::Level::Warn <= startup_filter(Some("")));
        assert_eq!(startup_filter(Some("debug")), LevelFilter::Trace);
    }

    #[test]
    fn test_configured_level_follows_settings() {
        assert_eq!(configured_filter(LogLevel::Warn, None), LevelFilter::Warn);
        assert_eq!(configured_filter(LogLevel::Debug, None), LevelFilter::Debug);
        // env_logger does the filtering when RUST_LOG is set
        assert_eq!(
            configured_filter(LogLevel::Error, Some("gpa_calculator=debug")),
            LevelFilter::Trace
        );
    }

    #[test]
    fn test_unknown_flag_rejected() {
        let err = Cli::try_parse_from(["gpa-calculator", "--dta-dir", "x"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnknownArgument);
    }
}
