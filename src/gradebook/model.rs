//! Semester and subject records
//!
//! These are the exact shapes written to storage, so field names must stay
//! stable across releases.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// One course entry. Credit and score stay as the raw text the user typed
/// and are only parsed when a total or an average is computed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subject {
    pub name: String,
    pub credit: String,
    pub score: String,
}

impl Subject {
    /// An empty row, as appended by "add subject"
    pub fn blank() -> Self {
        Self::default()
    }

    /// Read one field by selector
    pub fn get(&self, field: SubjectField) -> &str {
        match field {
            SubjectField::Name => &self.name,
            SubjectField::Credit => &self.credit,
            SubjectField::Score => &self.score,
        }
    }

    /// Copy of this subject with a single field replaced
    pub fn with_field(&self, field: SubjectField, value: impl Into<String>) -> Self {
        let value = value.into();
        match field {
            SubjectField::Name => Self {
                name: value,
                ..self.clone()
            },
            SubjectField::Credit => Self {
                credit: value,
                ..self.clone()
            },
            SubjectField::Score => Self {
                score: value,
                ..self.clone()
            },
        }
    }
}

/// A named group of subjects
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Semester {
    pub id: u32,
    pub name: String,
    pub subjects: Vec<Subject>,
}

impl Semester {
    /// New semester holding a single blank subject
    pub fn new(id: u32, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            subjects: vec![Subject::blank()],
        }
    }
}

/// Editable text field of a [`Subject`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubjectField {
    Name,
    Credit,
    Score,
}

impl SubjectField {
    pub const ALL: [SubjectField; 3] = [SubjectField::Name, SubjectField::Credit, SubjectField::Score];

    pub fn as_str(&self) -> &'static str {
        match self {
            SubjectField::Name => "name",
            SubjectField::Credit => "credit",
            SubjectField::Score => "score",
        }
    }
}

impl fmt::Display for SubjectField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a field selector is not `name`, `credit` or `score`
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown subject field '{0}' (expected name, credit or score)")]
pub struct UnknownField(pub String);

impl FromStr for SubjectField {
    type Err = UnknownField;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "name" => Ok(SubjectField::Name),
            "credit" => Ok(SubjectField::Credit),
            "score" => Ok(SubjectField::Score),
            _ => Err(UnknownField(s.to_string())),
        }
    }
}
