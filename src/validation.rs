//! Form input rules.
//!
//! Validation happens in the form component before `add_project` is called;
//! the store itself accepts whatever it is given.

use crate::config::{NumberRule, TextRule};
use crate::errors::{InputError, Violation};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldValue<'a> {
    Text(&'a str),
    Number(i64),
}

/// A single field value together with the rules it must satisfy.
///
/// Length rules only apply to text values and range rules only to numbers.
#[derive(Debug, Clone, Default)]
pub struct Validatable<'a> {
    pub field: &'static str,
    pub value: Option<FieldValue<'a>>,
    pub required: bool,
    pub min_length: Option<usize>,
    pub max_length: Option<usize>,
    pub min: Option<i64>,
    pub max: Option<i64>,
}

impl<'a> Validatable<'a> {
    pub fn text(field: &'static str, value: &'a str, rule: &TextRule) -> Self {
        Self {
            field,
            value: Some(FieldValue::Text(value)),
            required: rule.required,
            min_length: rule.min_length,
            max_length: rule.max_length,
            ..Default::default()
        }
    }

    pub fn number(field: &'static str, value: Option<i64>, rule: &NumberRule) -> Self {
        Self {
            field,
            value: value.map(FieldValue::Number),
            required: rule.required,
            min: rule.min,
            max: rule.max,
            ..Default::default()
        }
    }

    /// Every rule this value breaks. A missing required value reports only
    /// `Required`.
    pub fn violations(&self) -> Vec<Violation> {
        let field = self.field;
        let value = match self.value {
            Some(FieldValue::Text(text)) if text.trim().is_empty() => None,
            other => other,
        };

        let Some(value) = value else {
            return if self.required {
                vec![Violation::Required { field }]
            } else {
                Vec::new()
            };
        };

        let mut violations = Vec::new();
        match value {
            FieldValue::Text(text) => {
                let actual = text.trim().chars().count();
                if let Some(min) = self.min_length.filter(|min| actual < *min) {
                    violations.push(Violation::TooShort { field, min, actual });
                }
                if let Some(max) = self.max_length.filter(|max| actual > *max) {
                    violations.push(Violation::TooLong { field, max, actual });
                }
            }
            FieldValue::Number(actual) => {
                if let Some(min) = self.min.filter(|min| actual < *min) {
                    violations.push(Violation::BelowMin { field, min, actual });
                }
                if let Some(max) = self.max.filter(|max| actual > *max) {
                    violations.push(Violation::AboveMax { field, max, actual });
                }
            }
        }
        violations
    }

    pub fn is_valid(&self) -> bool {
        self.violations().is_empty()
    }
}

/// Check all fields of a submission at once.
pub fn validate_inputs(inputs: &[Validatable<'_>]) -> Result<(), InputError> {
    let violations: Vec<Violation> = inputs.iter().flat_map(Validatable::violations).collect();
    if violations.is_empty() {
        Ok(())
    } else {
        Err(InputError::Rejected { violations })
    }
}

/// Parse a raw whole-number field. Blank input is `Ok(None)`.
pub fn parse_number(field: &'static str, raw: &str) -> Result<Option<i64>, Violation> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    trimmed.parse::<i64>().map(Some).map_err(|_| Violation::NotANumber {
        field,
        raw: raw.to_string(),
    })
}
