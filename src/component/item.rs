use taskboard_common::Project;
use tracing::trace;

use crate::dnd::{DataTransfer, DragState, Draggable, DropEffect, TEXT_PLAIN};

/// A single card. Rebuilt from the snapshot every time its column renders.
#[derive(Debug, Clone)]
pub struct ProjectItem {
    project: Project,
    drag_state: DragState,
}

impl ProjectItem {
    pub fn new(project: Project) -> Self {
        Self {
            project,
            drag_state: DragState::Idle,
        }
    }

    pub fn project(&self) -> &Project {
        &self.project
    }

    pub fn drag_state(&self) -> DragState {
        self.drag_state
    }

    /// Priority line shown under the title.
    pub fn people_message(&self) -> &'static str {
        self.project.priority().message()
    }

    pub fn element_id(&self) -> String {
        self.project.id.to_string()
    }
}

impl Draggable for ProjectItem {
    fn on_drag_start(&mut self, transfer: &mut DataTransfer) {
        transfer.set_data(TEXT_PLAIN, self.project.id.to_string());
        transfer.effect_allowed = DropEffect::Move;
        self.drag_state = DragState::Dragging;
        trace!(id = %self.project.id, "Drag started");
    }

    fn on_drag_end(&mut self) {
        self.drag_state = DragState::Idle;
    }
}
