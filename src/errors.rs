//! Typed error hierarchy for the task board.
//!
//! - `Violation` - a single input rule that a submitted field broke
//! - `InputError` - a rejected form submission
//! - `BoardError` - board session failures (unknown stage, bad reference, bad command)

use thiserror::Error;

/// One broken input rule. Lengths are counted in characters of the trimmed value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Violation {
    #[error("{field} is required")]
    Required { field: &'static str },

    #[error("{field} must be at least {min} characters (got {actual})")]
    TooShort {
        field: &'static str,
        min: usize,
        actual: usize,
    },

    #[error("{field} must be at most {max} characters (got {actual})")]
    TooLong {
        field: &'static str,
        max: usize,
        actual: usize,
    },

    #[error("{field} must be at least {min} (got {actual})")]
    BelowMin {
        field: &'static str,
        min: i64,
        actual: i64,
    },

    #[error("{field} must be at most {max} (got {actual})")]
    AboveMax {
        field: &'static str,
        max: i64,
        actual: i64,
    },

    #[error("{field} must be a whole number (got '{raw}')")]
    NotANumber { field: &'static str, raw: String },
}

impl Violation {
    pub fn field(&self) -> &'static str {
        match self {
            Self::Required { field }
            | Self::TooShort { field, .. }
            | Self::TooLong { field, .. }
            | Self::BelowMin { field, .. }
            | Self::AboveMax { field, .. }
            | Self::NotANumber { field, .. } => field,
        }
    }
}

fn join_violations(violations: &[Violation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// A form submission that was discarded before reaching the store.
#[derive(Debug, Error)]
pub enum InputError {
    #[error("Invalid input: {}", join_violations(.violations))]
    Rejected { violations: Vec<Violation> },
}

impl InputError {
    pub fn violations(&self) -> &[Violation] {
        match self {
            Self::Rejected { violations } => violations,
        }
    }
}

/// Errors from a board session.
#[derive(Debug, Error)]
pub enum BoardError {
    #[error("Unknown stage '{0}'. Valid stages: new_ticket, in_progress, finished")]
    UnknownStage(String),

    #[error("No project matches '{reference}'")]
    ProjectNotFound { reference: String },

    #[error("Project reference '{reference}' is ambiguous ({matches} projects match)")]
    AmbiguousReference { reference: String, matches: usize },

    #[error("Invalid command: {0}")]
    BadCommand(String),

    #[error(transparent)]
    Input(#[from] InputError),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
