use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use taskboard_common::{Project, ProjectId, ProjectStatus};
use tracing::{debug, warn};

use super::{ListRenderer, ProjectItem};
use crate::dnd::{DataTransfer, DragTarget, DropOutcome, DropState, TEXT_PLAIN};
use crate::state::{ProjectState, StatusChange};

struct ListView {
    assigned: Vec<Project>,
    /// Version of the snapshot `assigned` was taken from.
    version: u64,
    drop_state: DropState,
    renderer: Box<dyn ListRenderer>,
}

impl ListView {
    fn render(&mut self, status: ProjectStatus, heading: &str) {
        let items: Vec<ProjectItem> = self.assigned.iter().cloned().map(ProjectItem::new).collect();
        self.renderer.render(status, heading, &items);
    }

    fn set_drop_state(&mut self, status: ProjectStatus, state: DropState) {
        if self.drop_state != state {
            self.drop_state = state;
            self.renderer
                .set_droppable(status, matches!(state, DropState::Hover));
        }
    }
}

fn lock(view: &Mutex<ListView>) -> MutexGuard<'_, ListView> {
    view.lock().unwrap_or_else(PoisonError::into_inner)
}

/// A status column.
///
/// Bound to one stage for its whole life. It subscribes to the store on
/// construction, keeps only the projects in its stage, and moves dropped
/// cards into its stage.
pub struct ProjectList {
    status: ProjectStatus,
    heading: String,
    store: Arc<ProjectState>,
    view: Arc<Mutex<ListView>>,
}

impl ProjectList {
    pub fn new(
        store: Arc<ProjectState>,
        status: ProjectStatus,
        heading_suffix: &str,
        renderer: Box<dyn ListRenderer>,
    ) -> Self {
        let heading = format!("{} {}", status.label().to_uppercase(), heading_suffix)
            .trim_end()
            .to_string();
        let list = Self {
            status,
            heading,
            store,
            view: Arc::new(Mutex::new(ListView {
                assigned: Vec::new(),
                version: 0,
                drop_state: DropState::Idle,
                renderer,
            })),
        };
        list.configure();
        list.render_content();
        list
    }

    fn configure(&self) {
        let view = Arc::clone(&self.view);
        let status = self.status;
        let heading = self.heading.clone();
        self.store.add_listener(move |projects| {
            let mut view = lock(&view);
            if projects.version() <= view.version {
                debug!(
                    column = %status,
                    shown = view.version,
                    stale = projects.version(),
                    "Skipping out-of-order snapshot"
                );
                return;
            }
            view.version = projects.version();
            view.assigned = projects
                .iter()
                .filter(|p| p.status == status)
                .cloned()
                .collect();
            view.render(status, &heading);
        });
    }

    fn render_content(&self) {
        lock(&self.view).render(self.status, &self.heading);
    }

    pub fn status(&self) -> ProjectStatus {
        self.status
    }

    pub fn heading(&self) -> &str {
        &self.heading
    }

    pub fn element_id(&self) -> String {
        format!("{}-projects-list", self.status.slug())
    }

    /// Projects shown in this column as of the last notification.
    pub fn assigned(&self) -> Vec<Project> {
        lock(&self.view).assigned.clone()
    }

    pub fn drop_state(&self) -> DropState {
        lock(&self.view).drop_state
    }

    fn clear_hover(&self) {
        lock(&self.view).set_drop_state(self.status, DropState::Idle);
    }
}

impl DragTarget for ProjectList {
    fn on_drag_over(&self, transfer: &DataTransfer) -> bool {
        let accepted = transfer.carries(TEXT_PLAIN);
        if accepted {
            lock(&self.view).set_drop_state(self.status, DropState::Hover);
        }
        accepted
    }

    fn on_drop(&self, transfer: &DataTransfer) -> DropOutcome {
        // The view lock must be released before the store notifies us.
        self.clear_hover();

        let Some(raw_id) = transfer.get_data(TEXT_PLAIN) else {
            debug!(
                column = %self.status,
                media_type = ?transfer.media_type(),
                "Drop rejected"
            );
            return DropOutcome::Rejected;
        };

        let change = match raw_id.parse::<ProjectId>() {
            Ok(id) => self.store.switch_status(&id, self.status),
            Err(e) => {
                warn!(column = %self.status, "Dropped payload is not a project id: {}", e);
                StatusChange::NotFound
            }
        };
        DropOutcome::Applied(change)
    }

    fn on_drag_leave(&self) {
        self.clear_hover();
    }
}

impl fmt::Debug for ProjectList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProjectList")
            .field("status", &self.status)
            .field("heading", &self.heading)
            .finish()
    }
}
