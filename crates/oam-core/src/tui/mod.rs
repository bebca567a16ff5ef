//! CLI prompts using cliclack (Charm-style inline prompts)
//!
//! This module is optional and only available when the `tui` feature is enabled.

#[cfg(feature = "tui")]
mod commands;
#[cfg(feature = "tui")]
mod prompts;

#[cfg(feature = "tui")]
pub use commands::{list, run_component, run_create, run_generate, CreateArgs, GenerateArgs};
#[cfg(feature = "tui")]
pub use prompts::ask;
