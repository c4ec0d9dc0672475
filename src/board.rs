//! One store, one column per stage.

use std::sync::Arc;

use taskboard_common::{ProjectId, ProjectStatus};
use tracing::debug;

use crate::component::{ListRenderer, ProjectItem, ProjectList};
use crate::dnd::{DataTransfer, DragTarget, Draggable, DropOutcome};
use crate::errors::BoardError;
use crate::state::{ProjectState, StatusChange};

/// The board's columns, built around an injected store.
///
/// Columns are created from [`ProjectStatus::ALL`], so every stage has
/// exactly one column and every column has its own stage.
pub struct Board {
    store: Arc<ProjectState>,
    columns: Vec<ProjectList>,
}

impl Board {
    pub fn new<R>(store: Arc<ProjectState>, heading_suffix: &str, mut make_renderer: R) -> Self
    where
        R: FnMut(ProjectStatus) -> Box<dyn ListRenderer>,
    {
        let columns = ProjectStatus::ALL
            .iter()
            .map(|&status| {
                ProjectList::new(
                    Arc::clone(&store),
                    status,
                    heading_suffix,
                    make_renderer(status),
                )
            })
            .collect();
        Self { store, columns }
    }

    pub fn store(&self) -> &Arc<ProjectState> {
        &self.store
    }

    pub fn columns(&self) -> &[ProjectList] {
        &self.columns
    }

    pub fn column(&self, status: ProjectStatus) -> &ProjectList {
        &self.columns[status.index()]
    }

    /// Drag a card onto the column for `to`, going through the full
    /// drag source / drop target exchange.
    pub fn drag_to(&self, id: &ProjectId, to: ProjectStatus) -> DropOutcome {
        let Some(project) = self.store.get(id) else {
            return DropOutcome::Applied(StatusChange::NotFound);
        };
        let target = self.column(to);

        let mut item = ProjectItem::new(project);
        let mut transfer = DataTransfer::new();
        item.on_drag_start(&mut transfer);

        let outcome = if target.on_drag_over(&transfer) {
            target.on_drop(&transfer)
        } else {
            target.on_drag_leave();
            DropOutcome::Rejected
        };

        item.on_drag_end();
        debug!(%id, to = %to, ?outcome, "Drag finished");
        outcome
    }

    /// Resolve a user-typed card reference.
    ///
    /// Accepts `#N` (1-based creation order), a full id, or an unambiguous
    /// id prefix of at least four characters.
    pub fn resolve(&self, reference: &str) -> Result<ProjectId, BoardError> {
        let reference = reference.trim();
        let projects = self.store.projects();
        let not_found = || BoardError::ProjectNotFound {
            reference: reference.to_string(),
        };

        if let Some(position) = reference.strip_prefix('#') {
            let n: usize = position.parse().map_err(|_| not_found())?;
            return n
                .checked_sub(1)
                .and_then(|i| projects.get(i))
                .map(|p| p.id)
                .ok_or_else(not_found);
        }

        if let Ok(id) = reference.parse::<ProjectId>() {
            return projects
                .iter()
                .find(|p| p.id == id)
                .map(|p| p.id)
                .ok_or_else(not_found);
        }

        if reference.len() < 4 {
            return Err(not_found());
        }
        let needle = reference.to_lowercase();
        let matches: Vec<ProjectId> = projects
            .iter()
            .map(|p| p.id)
            .filter(|id| id.to_string().starts_with(&needle))
            .collect();
        match matches.as_slice() {
            [id] => Ok(*id),
            [] => Err(not_found()),
            _ => Err(BoardError::AmbiguousReference {
                reference: reference.to_string(),
                matches: matches.len(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::list::tests::{Recorded, RecordingRenderer};
    use std::collections::HashSet;
    use std::sync::Mutex;

    fn board() -> (Board, Vec<Arc<Mutex<Recorded>>>) {
        let store = Arc::new(ProjectState::new());
        let mut recorders = Vec::new();
        let board = Board::new(store, "PROJECTS", |_| {
            let recorded = Arc::new(Mutex::new(Recorded::default()));
            recorders.push(Arc::clone(&recorded));
            Box::new(RecordingRenderer(recorded)) as Box<dyn ListRenderer>
        });
        (board, recorders)
    }

    #[test]
    fn test_one_column_per_stage() {
        let (board, _) = board();
        let stages: HashSet<_> = board.columns().iter().map(|c| c.status()).collect();
        assert_eq!(board.columns().len(), ProjectStatus::ALL.len());
        assert_eq!(stages.len(), ProjectStatus::ALL.len());
        for status in ProjectStatus::ALL {
            assert_eq!(board.column(status).status(), status);
        }
        assert_eq!(board.store().listener_count(), 3);
    }

    #[test]
    fn test_fix_bug_scenario() {
        let (board, recorders) = board();
        let id = board
            .store()
            .add_project("Fix bug", "Null pointer in parser", 2);

        assert_eq!(board.store().len(), 1);
        let new_col = board.column(ProjectStatus::NewTicket).assigned();
        assert_eq!(new_col.len(), 1);
        assert_eq!(new_col[0].status, ProjectStatus::NewTicket);
        assert_eq!(new_col[0].people, 2);
        assert!(board.column(ProjectStatus::Finished).assigned().is_empty());

        let outcome = board.drag_to(&id, ProjectStatus::Finished);

        assert_eq!(
            outcome,
            DropOutcome::Applied(StatusChange::Switched {
                from: ProjectStatus::NewTicket,
                to: ProjectStatus::Finished
            })
        );
        assert!(board.column(ProjectStatus::NewTicket).assigned().is_empty());
        let finished = board.column(ProjectStatus::Finished).assigned();
        assert_eq!(finished.len(), 1);
        assert_eq!(finished[0].status, ProjectStatus::Finished);
        assert_eq!(finished[0].title, "Fix bug");
        assert_eq!(finished[0].description, "Null pointer in parser");

        // hover indicator was raised and cleared on the target only
        let finished_rec = recorders[ProjectStatus::Finished.index()].lock().unwrap();
        assert_eq!(
            finished_rec.droppable,
            vec![
                (ProjectStatus::Finished, true),
                (ProjectStatus::Finished, false)
            ]
        );
        let new_rec = recorders[ProjectStatus::NewTicket.index()].lock().unwrap();
        assert!(new_rec.droppable.is_empty());
    }

    #[test]
    fn test_columns_match_store_after_concurrent_writers() {
        for _ in 0..50 {
            let (board, _) = board();

            std::thread::scope(|scope| {
                for worker in 0..4 {
                    let store = Arc::clone(board.store());
                    scope.spawn(move || {
                        for i in 0..20 {
                            let id = store.add_project(
                                format!("w{}-{}", worker, i),
                                "Concurrent add",
                                1,
                            );
                            if i % 3 == 0 {
                                store.switch_status(&id, ProjectStatus::ALL[(i / 3) % 3]);
                            }
                        }
                    });
                }
            });

            let projects = board.store().projects();
            assert_eq!(projects.len(), 80);
            for status in ProjectStatus::ALL {
                let expected: Vec<ProjectId> = projects
                    .iter()
                    .filter(|p| p.status == status)
                    .map(|p| p.id)
                    .collect();
                let shown: Vec<ProjectId> =
                    board.column(status).assigned().iter().map(|p| p.id).collect();
                assert_eq!(shown, expected, "column {} is stale", status);
            }
        }
    }

    #[test]
    fn test_drag_unknown_project_is_not_found() {
        let (board, _) = board();
        assert_eq!(
            board.drag_to(&ProjectId::new_v4(), ProjectStatus::Finished),
            DropOutcome::Applied(StatusChange::NotFound)
        );
    }

    #[test]
    fn test_resolve_by_position_id_and_prefix() {
        let (board, _) = board();
        let first = board.store().add_project("One", "First project", 1);
        let second = board.store().add_project("Two", "Second project", 1);

        assert_eq!(board.resolve("#1").unwrap(), first);
        assert_eq!(board.resolve("#2").unwrap(), second);
        assert_eq!(board.resolve(&first.to_string()).unwrap(), first);
        assert_eq!(board.resolve(&second.to_string()[..8]).unwrap(), second);
    }

    #[test]
    fn test_resolve_rejects_bad_references() {
        let (board, _) = board();
        board.store().add_project("One", "First project", 1);

        for reference in ["#0", "#2", "#x", "abc", "zzzzzzzz"] {
            assert!(
                matches!(
                    board.resolve(reference),
                    Err(BoardError::ProjectNotFound { .. })
                ),
                "{} should not resolve",
                reference
            );
        }
        let unknown = ProjectId::new_v4().to_string();
        assert!(board.resolve(&unknown).is_err());
    }
}
