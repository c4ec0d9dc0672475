use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Stage of a project on the board.
///
/// The set is closed. Every site that maps a stage to something else
/// (column, label, filter) matches exhaustively, so adding a stage is a
/// compile error everywhere it matters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectStatus {
    #[default]
    NewTicket,
    InProgress,
    Finished,
}

impl ProjectStatus {
    /// All stages in board order. The first entry is the initial stage.
    pub const ALL: [ProjectStatus; 3] = [Self::NewTicket, Self::InProgress, Self::Finished];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NewTicket => "new_ticket",
            Self::InProgress => "in_progress",
            Self::Finished => "finished",
        }
    }

    /// Kebab-case form used for column element ids.
    pub fn slug(&self) -> &'static str {
        match self {
            Self::NewTicket => "new-ticket",
            Self::InProgress => "in-progress",
            Self::Finished => "finished",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::NewTicket => "New Ticket",
            Self::InProgress => "In Progress",
            Self::Finished => "Finished",
        }
    }

    /// Position of this stage in [`ProjectStatus::ALL`].
    pub fn index(&self) -> usize {
        match self {
            Self::NewTicket => 0,
            Self::InProgress => 1,
            Self::Finished => 2,
        }
    }
}

impl fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProjectStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| !matches!(c, '_' | '-' | ' '))
            .flat_map(char::to_lowercase)
            .collect();
        match normalized.as_str() {
            "newticket" | "new" => Ok(Self::NewTicket),
            "inprogress" => Ok(Self::InProgress),
            "finished" | "done" => Ok(Self::Finished),
            _ => Err(format!("Invalid status: {}", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_roundtrip() {
        for status in ProjectStatus::ALL {
            assert_eq!(status.as_str().parse::<ProjectStatus>().unwrap(), status);
            assert_eq!(status.slug().parse::<ProjectStatus>().unwrap(), status);
            assert_eq!(status.label().parse::<ProjectStatus>().unwrap(), status);
        }
        assert!("archived".parse::<ProjectStatus>().is_err());
    }

    #[test]
    fn test_status_parse_is_case_insensitive() {
        assert_eq!(
            "NewTicket".parse::<ProjectStatus>().unwrap(),
            ProjectStatus::NewTicket
        );
        assert_eq!(
            "IN-PROGRESS".parse::<ProjectStatus>().unwrap(),
            ProjectStatus::InProgress
        );
    }

    #[test]
    fn test_default_is_first_stage() {
        assert_eq!(ProjectStatus::default(), ProjectStatus::ALL[0]);
        assert_eq!(ProjectStatus::default(), ProjectStatus::NewTicket);
    }

    #[test]
    fn test_index_matches_board_order() {
        for (i, status) in ProjectStatus::ALL.iter().enumerate() {
            assert_eq!(status.index(), i);
        }
    }

    #[test]
    fn test_status_serializes_snake_case() {
        let json = serde_json::to_string(&ProjectStatus::InProgress).unwrap();
        assert_eq!(json, "\"in_progress\"");
    }
}
