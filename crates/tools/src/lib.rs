//! External tool integration.
//!
//! Runs package managers (npm, pnpm, yarn) as child processes and returns
//! structured results instead of throwing on non-zero exit.

#![warn(missing_docs)]

pub mod builtin;
pub mod r#trait;

pub use builtin::{find_tool, installer_for, NpmTool, PnpmTool, YarnTool};
pub use r#trait::{Tool, ToolInput, ToolOutput};
