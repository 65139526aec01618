pub mod args;
pub mod commands;

pub use args::{CheckArgs, Cli, Commands, CompletionsArgs, Verbosity};
