//! Operator tooling: CLI commands and the template file watch bridge.

pub mod cli;
pub mod watch;

pub use cli::{execute, Cli, Commands};
pub use watch::{run_watch, WatchConfig};
