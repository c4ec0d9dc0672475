//! Terminal rendering of the board.
//!
//! Each column gets a [`TerminalRenderer`] that records the latest frame it
//! was asked to render into a shared [`BoardScreen`]. The session then draws
//! the screen whenever it wants to show the board.

use std::fmt::Write as _;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use console::style;
use taskboard_common::{Priority, ProjectStatus};

use crate::component::{ListRenderer, ProjectItem};
use crate::ui::icons::{DROP, priority_icon, stage_icon};

const DEFAULT_WIDTH: usize = 80;
const MIN_WIDTH: usize = 24;
const SHORT_ID_LEN: usize = 8;

/// Width of the attached terminal, or 80 columns when there is none.
pub fn terminal_width() -> usize {
    terminal_size::terminal_size()
        .map(|(terminal_size::Width(w), _)| usize::from(w))
        .unwrap_or(DEFAULT_WIDTH)
        .max(MIN_WIDTH)
}

/// First characters of a project id, enough to refer to it by prefix.
pub fn short_id(id: &str) -> &str {
    id.get(..SHORT_ID_LEN).unwrap_or(id)
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct CardFrame {
    id: String,
    title: String,
    priority: Priority,
    people_message: &'static str,
    description: String,
}

#[derive(Debug, Clone, Default)]
struct ColumnFrame {
    heading: String,
    cards: Vec<CardFrame>,
    droppable: bool,
}

/// Latest rendered state of every column.
#[derive(Debug, Clone, Default)]
pub struct BoardScreen {
    frames: Arc<Mutex<[ColumnFrame; 3]>>,
}

impl BoardScreen {
    pub fn new() -> Self {
        Self::default()
    }

    fn frames(&self) -> MutexGuard<'_, [ColumnFrame; 3]> {
        self.frames.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Renderer that draws the column for `status` into this screen.
    pub fn renderer(&self, status: ProjectStatus) -> Box<dyn ListRenderer> {
        Box::new(TerminalRenderer {
            frames: Arc::clone(&self.frames),
            status,
        })
    }

    pub fn card_count(&self, status: ProjectStatus) -> usize {
        self.frames()[status.index()].cards.len()
    }

    /// Draw every column, top to bottom.
    pub fn draw(&self, width: usize) -> String {
        ProjectStatus::ALL
            .iter()
            .map(|&status| self.draw_column(status, width))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Draw a single column.
    pub fn draw_column(&self, status: ProjectStatus, width: usize) -> String {
        let frames = self.frames();
        let frame = &frames[status.index()];
        let mut out = String::new();

        let heading = format!("{} ({})", frame.heading, frame.cards.len());
        let marker = if frame.droppable {
            DROP.to_string()
        } else {
            String::new()
        };
        let _ = writeln!(
            out,
            "{}{}{}",
            stage_icon(status),
            style(heading).bold(),
            marker
        );

        if frame.cards.is_empty() {
            let _ = writeln!(out, "    {}", style("(empty)").dim());
            return out;
        }

        let wrap_width = width.saturating_sub(6).max(MIN_WIDTH - 6);
        for card in &frame.cards {
            let _ = writeln!(
                out,
                "  {}{} {}",
                priority_icon(card.priority),
                style(&card.title).bold(),
                style(format!("[{}]", short_id(&card.id))).dim()
            );
            let people = match card.priority {
                Priority::High => style(card.people_message).red(),
                Priority::Medium => style(card.people_message).yellow(),
                Priority::Low => style(card.people_message).green(),
            };
            let _ = writeln!(out, "      {}", people);
            for line in textwrap::wrap(&card.description, wrap_width) {
                let _ = writeln!(out, "      {}", line);
            }
        }
        out
    }
}

/// `ListRenderer` writing into a [`BoardScreen`].
pub struct TerminalRenderer {
    frames: Arc<Mutex<[ColumnFrame; 3]>>,
    status: ProjectStatus,
}

impl ListRenderer for TerminalRenderer {
    fn render(&mut self, status: ProjectStatus, heading: &str, items: &[ProjectItem]) {
        debug_assert_eq!(status, self.status);
        let mut frames = self.frames.lock().unwrap_or_else(PoisonError::into_inner);
        let frame = &mut frames[status.index()];
        frame.heading = heading.to_string();
        frame.cards = items
            .iter()
            .map(|item| {
                let project = item.project();
                CardFrame {
                    id: item.element_id(),
                    title: project.title.clone(),
                    priority: project.priority(),
                    people_message: item.people_message(),
                    description: project.description.clone(),
                }
            })
            .collect();
    }

    fn set_droppable(&mut self, status: ProjectStatus, droppable: bool) {
        let mut frames = self.frames.lock().unwrap_or_else(PoisonError::into_inner);
        frames[status.index()].droppable = droppable;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Board;
    use crate::state::ProjectState;

    fn board_with_screen() -> (Board, BoardScreen) {
        console::set_colors_enabled(false);
        let screen = BoardScreen::new();
        let board = Board::new(Arc::new(ProjectState::new()), "PROJECTS", |status| {
            screen.renderer(status)
        });
        (board, screen)
    }

    #[test]
    fn test_empty_board_draws_every_heading() {
        let (_board, screen) = board_with_screen();
        let drawn = screen.draw(80);
        assert!(drawn.contains("NEW TICKET PROJECTS (0)"));
        assert!(drawn.contains("IN PROGRESS PROJECTS (0)"));
        assert!(drawn.contains("FINISHED PROJECTS (0)"));
        assert!(drawn.contains("(empty)"));
    }

    #[test]
    fn test_cards_follow_store_updates() {
        let (board, screen) = board_with_screen();
        let id = board
            .store()
            .add_project("Fix bug", "Null pointer in parser", 2);

        let column = screen.draw_column(ProjectStatus::NewTicket, 80);
        assert!(column.contains("NEW TICKET PROJECTS (1)"));
        assert!(column.contains("Fix bug"));
        assert!(column.contains("Medium Priority"));
        assert!(column.contains(short_id(&id.to_string())));

        board.drag_to(&id, ProjectStatus::Finished);
        assert_eq!(screen.card_count(ProjectStatus::NewTicket), 0);
        assert_eq!(screen.card_count(ProjectStatus::Finished), 1);
    }

    #[test]
    fn test_long_descriptions_are_wrapped() {
        let (board, screen) = board_with_screen();
        board.store().add_project(
            "Wrap",
            "alpha beta gamma delta epsilon zeta eta theta iota kappa",
            1,
        );
        let column = screen.draw_column(ProjectStatus::NewTicket, 30);
        let description_lines = column
            .lines()
            .filter(|l| l.starts_with("      ") && !l.contains("Priority"))
            .count();
        assert!(description_lines > 1);
    }

    #[test]
    fn test_short_id_handles_short_input() {
        assert_eq!(short_id("abc"), "abc");
        assert_eq!(short_id("0123456789"), "01234567");
    }
}
