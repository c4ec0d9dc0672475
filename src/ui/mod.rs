//! Terminal front end: board rendering, the project form, icons.

pub mod board_view;
pub mod form;
pub mod icons;

pub use board_view::{BoardScreen, TerminalRenderer, short_id, terminal_width};
pub use form::TerminalForm;
