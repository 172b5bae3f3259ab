//! Calculator settings
//!
//! Persisted next to the grade data in the same storage backend.

use serde::{Deserialize, Serialize};

use crate::persistence::{self, Storage, StorageError};

/// Logger verbosity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "error" => Some(LogLevel::Error),
            "warn" | "warning" => Some(LogLevel::Warn),
            "info" => Some(LogLevel::Info),
            "debug" => Some(LogLevel::Debug),
            "trace" => Some(LogLevel::Trace),
            _ => None,
        }
    }

    pub fn to_level(self) -> log::Level {
        match self {
            LogLevel::Error => log::Level::Error,
            LogLevel::Warn => log::Level::Warn,
            LogLevel::Info => log::Level::Info,
            LogLevel::Debug => log::Level::Debug,
            LogLevel::Trace => log::Level::Trace,
        }
    }

    pub fn to_filter(self) -> log::LevelFilter {
        self.to_level().to_level_filter()
    }
}

/// User-tunable settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Key the semester list is stored under
    pub storage_key: String,
    /// Name given to the semester created on first run
    pub initial_semester_name: String,
    /// Logger verbosity
    pub log_level: LogLevel,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            storage_key: crate::consts::SEMESTERS_KEY.to_string(),
            initial_semester_name: String::new(),
            log_level: LogLevel::Info,
        }
    }
}

impl Settings {
    /// Storage key for the settings themselves
    pub const STORAGE_KEY: &'static str = "gpa_calculator_settings";

    /// Load settings, falling back to defaults.
    ///
    /// When nothing usable is stored the defaults are written back so the
    /// slot shows what can be changed.
    pub fn load<S: Storage + ?Sized>(storage: &mut S) -> Self {
        if let Some(settings) = persistence::load_json::<Self, _>(storage, Self::STORAGE_KEY) {
            log::info!("Loaded settings");
            return settings.sanitized();
        }

        log::info!("Using default settings");
        let settings = Self::default();
        if let Err(e) = settings.save(storage) {
            log::warn!("Could not write default settings: {}", e);
        }
        settings
    }

    /// Save settings
    pub fn save<S: Storage + ?Sized>(&self, storage: &mut S) -> Result<(), StorageError> {
        persistence::save_json(storage, Self::STORAGE_KEY, self)?;
        log::info!("Settings saved");
        Ok(())
    }

    /// Storage key with blank values replaced by the default
    fn sanitized(mut self) -> Self {
        if self.storage_key.trim().is_empty() {
            self.storage_key = crate::consts::SEMESTERS_KEY.to_string();
        }
        self
    }
}
