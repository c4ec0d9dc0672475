use std::sync::Arc;

use taskboard_common::ProjectId;
use tracing::{debug, info};

use super::{FormFields, RawInput};
use crate::config::ValidationSection;
use crate::errors::{BoardError, InputError, Violation};
use crate::state::ProjectState;
use crate::validation::{Validatable, parse_number, validate_inputs};

/// Fields that passed validation, trimmed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectDraft {
    pub title: String,
    pub description: String,
    pub people: u32,
}

/// Check a raw submission against `rules`. Every broken rule is reported.
pub fn gather_user_input(
    raw: &RawInput,
    rules: &ValidationSection,
) -> Result<ProjectDraft, InputError> {
    let people = parse_number("people", &raw.people);

    let mut inputs = vec![
        Validatable::text("title", &raw.title, &rules.title),
        Validatable::text("description", &raw.description, &rules.description),
    ];
    if let Ok(value) = people {
        inputs.push(Validatable::number("people", value, &rules.people));
    }

    let mut violations = match validate_inputs(&inputs) {
        Ok(()) => Vec::new(),
        Err(InputError::Rejected { violations }) => violations,
    };
    let people = match people {
        Ok(value) => value,
        Err(violation) => {
            violations.push(violation);
            None
        }
    };

    // The store only takes positive counts; anything the rules let through
    // below 1 is rejected here rather than clamped.
    let people = match people {
        Some(actual) => match u32::try_from(actual) {
            Ok(count) if count > 0 => Some(count),
            _ => {
                if violations.iter().all(|v| v.field() != "people") {
                    violations.push(if actual < 1 {
                        Violation::BelowMin {
                            field: "people",
                            min: 1,
                            actual,
                        }
                    } else {
                        Violation::AboveMax {
                            field: "people",
                            max: i64::from(u32::MAX),
                            actual,
                        }
                    });
                }
                None
            }
        },
        None => None,
    };

    if !violations.is_empty() {
        return Err(InputError::Rejected { violations });
    }

    // A blank optional count means a single assignee.
    Ok(ProjectDraft {
        title: raw.title.trim().to_string(),
        description: raw.description.trim().to_string(),
        people: people.unwrap_or(1),
    })
}

/// The "new project" form.
pub struct ProjectInput<F> {
    store: Arc<ProjectState>,
    fields: F,
    rules: ValidationSection,
}

impl<F: FormFields> ProjectInput<F> {
    pub fn new(store: Arc<ProjectState>, fields: F, rules: ValidationSection) -> Self {
        Self {
            store,
            fields,
            rules,
        }
    }

    pub fn fields(&self) -> &F {
        &self.fields
    }

    pub fn fields_mut(&mut self) -> &mut F {
        &mut self.fields
    }

    /// Read the form and, if every field is valid, add the project.
    ///
    /// An invalid submission is discarded as a whole: the user gets one
    /// alert, the fields are left as typed and the store is not touched.
    pub fn submit(&mut self) -> Result<ProjectId, BoardError> {
        let raw = self.fields.read()?;
        let draft = match gather_user_input(&raw, &self.rules) {
            Ok(draft) => draft,
            Err(err) => {
                debug!(violations = err.violations().len(), "Submission rejected");
                self.fields.alert(&err.to_string());
                return Err(err.into());
            }
        };

        self.fields.clear();
        let id = self
            .store
            .add_project(draft.title, draft.description, draft.people);
        info!(%id, "Project created from form");
        Ok(id)
    }
}
