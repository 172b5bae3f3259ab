//! GPA Calculator - per-semester and overall grade-point averages
//!
//! Core modules:
//! - `gradebook`: Semester records, edit operations, weighted averages
//! - `persistence`: Key-value storage (LocalStorage on web, files on native)
//! - `calculator`: Grade book mirrored to storage after every edit
//! - `settings`: Persisted preferences
//! - `ui`: View model plus browser and terminal front-ends
//! - `cli`: Native command-line arguments

pub mod calculator;
#[cfg(not(target_arch = "wasm32"))]
pub mod cli;
pub mod gradebook;
pub mod persistence;
pub mod settings;
pub mod ui;

pub use calculator::Calculator;
pub use gradebook::{GradeBook, Semester, Subject, SubjectField};
pub use settings::{LogLevel, Settings};

/// Fixed names and defaults
pub mod consts {
    /// Storage key for the semester list
    pub const SEMESTERS_KEY: &str = "semesters";
    /// Data directory used by the native build when none is given
    pub const DEFAULT_DATA_DIR: &str = "gpa-data";
}
