//! Terminal implementation of the project form.

use anyhow::Context;
use console::style;
use dialoguer::Input;
use tracing::debug;

use crate::component::{FormFields, RawInput};
use crate::ui::icons::WARN;

/// Project form for a terminal session.
///
/// Values can be preset (script lines like `add title | description | 2`)
/// or, in an attended session, prompted for. After a rejected submission
/// the prompts start from what was typed last time.
#[derive(Debug, Default)]
pub struct TerminalForm {
    preset: Option<RawInput>,
    pending: RawInput,
    interactive: bool,
}

impl TerminalForm {
    pub fn new(interactive: bool) -> Self {
        Self {
            interactive,
            ..Default::default()
        }
    }

    /// Use these values for the next `read` instead of prompting.
    pub fn preset(&mut self, values: RawInput) {
        self.preset = Some(values);
    }

    /// Values kept from the last rejected submission.
    pub fn pending(&self) -> &RawInput {
        &self.pending
    }

    fn prompt(label: &str, initial: &str) -> anyhow::Result<String> {
        Input::<String>::new()
            .with_prompt(label)
            .with_initial_text(initial)
            .allow_empty(true)
            .interact_text()
            .with_context(|| format!("Failed to read {}", label.to_lowercase()))
    }
}

/// Whether the alert was acknowledged. A prompt that could not be shown
/// (closed stdin, lost terminal) is logged and the session goes on.
fn acknowledged(answer: Result<String, dialoguer::Error>) -> bool {
    match answer {
        Ok(_) => true,
        Err(e) => {
            debug!("Alert acknowledgment prompt failed: {}", e);
            false
        }
    }
}

impl FormFields for TerminalForm {
    fn read(&mut self) -> anyhow::Result<RawInput> {
        if let Some(values) = self.preset.take() {
            self.pending = values.clone();
            return Ok(values);
        }
        if !self.interactive {
            anyhow::bail!("'add' needs values when not attached to a terminal: add TITLE | DESCRIPTION | PEOPLE");
        }

        let title = Self::prompt("Title", &self.pending.title)?;
        let description = Self::prompt("Description", &self.pending.description)?;
        let people = Self::prompt("People", &self.pending.people)?;
        self.pending = RawInput::new(title, description, people);
        Ok(self.pending.clone())
    }

    fn alert(&mut self, message: &str) {
        eprintln!("{}{}", WARN, style(message).red().bold());
        if self.interactive {
            // Blocks until the user acknowledges.
            let answer = Input::<String>::new()
                .with_prompt("Press Enter to continue")
                .allow_empty(true)
                .report(false)
                .interact_text();
            acknowledged(answer);
        }
    }

    fn clear(&mut self) {
        self.pending = RawInput::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preset_values_are_returned_once() {
        let mut form = TerminalForm::new(false);
        form.preset(RawInput::new("Fix bug", "Null pointer in parser", "2"));

        let read = form.read().unwrap();
        assert_eq!(read.title, "Fix bug");
        assert_eq!(form.pending().people, "2");

        // nothing preset and no terminal to prompt on
        assert!(form.read().is_err());
    }

    #[test]
    fn test_clear_forgets_pending_values() {
        let mut form = TerminalForm::new(false);
        form.preset(RawInput::new("Fix bug", "Null pointer in parser", "2"));
        form.read().unwrap();
        form.clear();
        assert_eq!(form.pending(), &RawInput::default());
    }

    #[test]
    fn test_failed_acknowledgment_does_not_abort() {
        assert!(acknowledged(Ok(String::new())));
        let closed = std::io::Error::new(std::io::ErrorKind::UnexpectedEof, "stdin closed");
        assert!(!acknowledged(Err(dialoguer::Error::from(closed))));
    }
}
