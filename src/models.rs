// Core data structures for the homework bot

use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// Review status of a homework submission
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HomeworkStatus {
    Approved,
    Reviewing,
    Rejected,
}

impl HomeworkStatus {
    /// All known statuses
    pub const ALL: [Self; 3] = [Self::Approved, Self::Reviewing, Self::Rejected];

    /// Get API string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Approved => "approved",
            Self::Reviewing => "reviewing",
            Self::Rejected => "rejected",
        }
    }

    /// Human-readable verdict sent to the chat
    pub fn verdict(&self) -> &'static str {
        match self {
            Self::Approved => "Работа проверена: ревьюеру всё понравилось. Ура!",
            Self::Reviewing => "Работа взята на проверку ревьюером.",
            Self::Rejected => "Работа проверена: у ревьюера есть замечания.",
        }
    }
}

impl FromStr for HomeworkStatus {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL.into_iter().find(|status| status.as_str() == s).ok_or(())
    }
}

impl fmt::Display for HomeworkStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A homework entry as returned by the API
///
/// Entries are kept as raw JSON: item shape is checked per field when the
/// status is translated, not when the response is validated.
pub type Homework = Value;

/// Status API response that passed shape validation
#[derive(Debug, Clone, PartialEq)]
pub struct StatusResponse {
    /// Homework entries, newest first
    pub homeworks: Vec<Homework>,

    /// Server time of the response
    pub current_date: Value,
}

impl StatusResponse {
    /// Most recent homework entry, if any
    pub fn latest(&self) -> Option<&Homework> {
        self.homeworks.first()
    }
}
