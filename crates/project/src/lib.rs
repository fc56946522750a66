//! Project scaffolding for mcpforge.
//!
//! Renders the boilerplate files for a new MCP server project, writes them
//! under a freshly created directory, and orchestrates the whole run
//! (including dependency installation) as a staged workflow with a
//! structured per-stage report.

#![warn(missing_docs)]

pub mod templates;
pub mod workflow;
pub mod writer;

pub use workflow::{scaffold, ScaffoldOptions, ScaffoldReport, Stage, StageResult};
pub use writer::{ProjectWriter, ScaffoldError};
