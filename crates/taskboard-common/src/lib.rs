//! Shared domain types for the taskboard workspace.
//!
//! | Module    | Types                                   |
//! |-----------|-----------------------------------------|
//! | `status`  | `ProjectStatus`                         |
//! | `project` | `Project`, `ProjectId`, `Priority`      |

pub mod project;
pub mod status;

pub use project::{Priority, Project, ProjectId};
pub use status::ProjectStatus;
