//! Board views.
//!
//! | Component       | Role                                                    |
//! |-----------------|---------------------------------------------------------|
//! | `ProjectInput`  | Reads and validates the form, calls `add_project`       |
//! | `ProjectList`   | One column per stage; subscribes, filters, drop target  |
//! | `ProjectItem`   | One card; drag source                                   |
//!
//! Views never draw anything themselves. They talk to a front end through
//! the two collaborator traits below.

pub mod input;
pub mod item;
pub mod list;

pub use input::ProjectInput;
pub use item::ProjectItem;
pub use list::ProjectList;

use taskboard_common::ProjectStatus;

/// Draws one column.
pub trait ListRenderer: Send {
    /// Replace everything shown in the column with `items`.
    fn render(&mut self, status: ProjectStatus, heading: &str, items: &[ProjectItem]);

    /// Toggle the "droppable" indicator while a card hovers over the column.
    fn set_droppable(&mut self, _status: ProjectStatus, _droppable: bool) {}
}

/// Raw, unvalidated form values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawInput {
    pub title: String,
    pub description: String,
    pub people: String,
}

impl RawInput {
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        people: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            people: people.into(),
        }
    }
}

/// The project form as seen by `ProjectInput`.
pub trait FormFields {
    fn read(&mut self) -> anyhow::Result<RawInput>;

    /// Tell the user the submission was discarded. Blocks until acknowledged
    /// where the front end supports it.
    fn alert(&mut self, message: &str);

    fn clear(&mut self);
}
