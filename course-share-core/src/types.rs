use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Name of a catalog partition (an academic term or program).
pub type CalendarName = String;

/// Opaque course identifier within one calendar.
pub type CourseId = String;

/// Selection key of the form `<calendar>/<course>`.
///
/// The calendar prefix keeps two courses with the same [`CourseId`] in
/// different calendars distinct. Serializes transparently as its string
/// form, which is also what the share token carries.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QualifiedCourseId(String);

impl QualifiedCourseId {
    /// Qualify a course id with its calendar.
    pub fn new(calendar: &str, course: &str) -> Self {
        Self(format!("{}/{}", calendar, course))
    }

    /// The raw `<calendar>/<course>` form.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Calendar part, if the id carries one.
    pub fn calendar(&self) -> Option<&str> {
        self.0.split_once('/').map(|(calendar, _)| calendar)
    }

    /// Course part (everything after the first `/`).
    pub fn course(&self) -> Option<&str> {
        self.0.split_once('/').map(|(_, course)| course)
    }
}

impl fmt::Display for QualifiedCourseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for QualifiedCourseId {
    fn from(raw: String) -> Self {
        Self(raw)
    }
}

impl From<&str> for QualifiedCourseId {
    fn from(raw: &str) -> Self {
        Self(raw.to_string())
    }
}

/// Last catalog sync window as reported by the backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateInfo {
    /// When the last sync started, if the syncer has run.
    #[serde(rename = "updateStart")]
    pub update_start: Option<DateTime<Utc>>,
    /// When the last sync finished, if it completed.
    #[serde(rename = "updateEnd")]
    pub update_end: Option<DateTime<Utc>>,
}
