//! Project state store.
//!
//! ## Overview
//!
//! `ProjectState` is the single source of truth for the board: it owns the
//! canonical, creation-ordered list of projects and the list of subscribers.
//! One instance is built per board and handed (`Arc<ProjectState>`) to every
//! view that needs it.
//!
//! ```text
//! view action ──> add_project / switch_status
//!                        │  (under lock) mutate, bump version,
//!                        │  copy list, copy listeners
//!                        v
//!                 notify(listeners, snapshot)   (lock released)
//!                        │  registration order, synchronous
//!                        v
//!                 column views drop stale versions, filter, re-render
//! ```
//!
//! Every accepted mutation produces exactly one snapshot; rejected ones
//! (unknown id, same status) produce none. Subscribers only see future
//! mutations, never a replay.

pub mod listeners;

use std::collections::HashSet;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use taskboard_common::{Project, ProjectId, ProjectStatus};
use tracing::{debug, warn};

pub use listeners::{Listener, ListenerList, Snapshot, notify};

pub type ProjectSnapshot = Snapshot<Project>;

/// What `switch_status` did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusChange {
    /// The project moved and subscribers were notified.
    Switched {
        from: ProjectStatus,
        to: ProjectStatus,
    },
    /// The project was already in the requested stage.
    Unchanged,
    /// No project has this id.
    NotFound,
}

impl StatusChange {
    pub fn is_switched(&self) -> bool {
        matches!(self, Self::Switched { .. })
    }
}

struct Inner {
    projects: Vec<Project>,
    listeners: ListenerList<Project>,
    version: u64,
}

impl Inner {
    fn snapshot(&self) -> ProjectSnapshot {
        Snapshot::new(self.version, self.projects.as_slice())
    }

    /// Record an accepted mutation and copy what subscribers need.
    fn publish(&mut self) -> (ProjectSnapshot, Vec<Listener<Project>>) {
        self.version += 1;
        (self.snapshot(), self.listeners.handles())
    }

    /// A v4 id that no project in this session carries yet.
    fn fresh_id(&self) -> ProjectId {
        let taken: HashSet<ProjectId> = self.projects.iter().map(|p| p.id).collect();
        loop {
            let id = ProjectId::new_v4();
            if !taken.contains(&id) {
                return id;
            }
            warn!(%id, "Generated project id already in use, retrying");
        }
    }
}

/// Shared, thread-safe project store.
///
/// All mutations and listener registration are serialized behind one mutex.
/// Listeners run after the lock is released, so a listener may call back
/// into the store.
pub struct ProjectState {
    inner: Mutex<Inner>,
}

impl ProjectState {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Inner {
                projects: Vec::new(),
                listeners: ListenerList::new(),
                version: 0,
            }),
        }
    }

    // The list is only changed by whole pushes or single-field writes, so a
    // panic elsewhere cannot leave it half-mutated.
    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Register a subscriber. It receives every snapshot produced after
    /// this call and nothing before it.
    pub fn add_listener<F>(&self, listener: F)
    where
        F: Fn(&ProjectSnapshot) + Send + Sync + 'static,
    {
        let mut inner = self.lock();
        inner.listeners.push(Arc::new(listener));
        debug!(listeners = inner.listeners.len(), "Listener registered");
    }

    /// Create a project in the initial stage and notify subscribers.
    ///
    /// Input is expected to be validated already; this never fails.
    pub fn add_project(
        &self,
        title: impl Into<String>,
        description: impl Into<String>,
        people: u32,
    ) -> ProjectId {
        let (id, snapshot, listeners) = {
            let mut inner = self.lock();
            let id = inner.fresh_id();
            let project = Project::new(id, title, description, people);
            debug!(%id, title = %project.title, people, "Project added");
            inner.projects.push(project);
            let (snapshot, listeners) = inner.publish();
            (id, snapshot, listeners)
        };
        notify(&listeners, &snapshot);
        id
    }

    /// Move a project to `new_status`.
    ///
    /// Unknown ids and moves to the current stage are silent no-ops: the
    /// list is untouched and no subscriber is called.
    pub fn switch_status(&self, id: &ProjectId, new_status: ProjectStatus) -> StatusChange {
        let (change, snapshot, listeners) = {
            let mut inner = self.lock();
            let Some(project) = inner.projects.iter_mut().find(|p| p.id == *id) else {
                warn!(%id, to = %new_status, "Status switch for unknown project ignored");
                return StatusChange::NotFound;
            };
            if project.status == new_status {
                debug!(%id, status = %new_status, "Project already in requested stage");
                return StatusChange::Unchanged;
            }
            let from = std::mem::replace(&mut project.status, new_status);
            debug!(%id, %from, to = %new_status, "Project status switched");
            let (snapshot, listeners) = inner.publish();
            (
                StatusChange::Switched {
                    from,
                    to: new_status,
                },
                snapshot,
                listeners,
            )
        };
        notify(&listeners, &snapshot);
        change
    }

    /// Current list, as an independent snapshot tagged with the version of
    /// the last accepted mutation.
    pub fn projects(&self) -> ProjectSnapshot {
        self.lock().snapshot()
    }

    pub fn get(&self, id: &ProjectId) -> Option<Project> {
        self.lock().projects.iter().find(|p| p.id == *id).cloned()
    }

    pub fn len(&self) -> usize {
        self.lock().projects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().projects.is_empty()
    }

    pub fn listener_count(&self) -> usize {
        self.lock().listeners.len()
    }
}

impl Default for ProjectState {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ProjectState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.lock();
        f.debug_struct("ProjectState")
            .field("projects", &inner.projects.len())
            .field("listeners", &inner.listeners.len())
            .finish()
    }
}
