//! Task board: projects moved between stage columns by drag and drop.
//!
//! | Module       | Purpose                                              |
//! |--------------|------------------------------------------------------|
//! | `state`      | `ProjectState` store and listener fan-out            |
//! | `dnd`        | drag source / drop target protocol                   |
//! | `validation` | field rules for form input                           |
//! | `component`  | project form, column list, card item                 |
//! | `board`      | one column per stage around a shared store           |
//! | `config`     | `taskboard.toml` loading                             |
//! | `logging`    | tracing subscriber setup                             |
//! | `ui`         | terminal rendering and prompts                       |

pub mod board;
pub mod component;
pub mod config;
pub mod dnd;
pub mod errors;
pub mod logging;
pub mod state;
pub mod ui;
pub mod validation;

pub use taskboard_common::{Priority, Project, ProjectId, ProjectStatus};
