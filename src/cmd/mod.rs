//! CLI command implementations.
//!
//! | Module   | Commands handled |
//! |----------|------------------|
//! | `board`  | `Board`          |
//! | `config` | `Config`         |

pub mod board;
pub mod config;

pub use board::cmd_board;
pub use config::cmd_config;
