//! External command execution and execution-path management.

pub mod command;
pub mod path;

pub use command::{
    execute, execute_check, spawn_attached, spawn_detached, CommandOptions, CommandResult,
};
pub use path::{is_executable, PathConfig};
