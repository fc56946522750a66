//! Tool abstraction.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// A tool that can be executed.
#[async_trait]
pub trait Tool: Send + Sync {
    /// Get tool name.
    fn name(&self) -> &str;

    /// Get tool description.
    fn description(&self) -> &str;

    /// Execute the tool.
    ///
    /// A non-zero exit code is a normal [`ToolOutput`], not an `Err`;
    /// `Err` means the process could not be run at all.
    async fn execute(&self, input: &ToolInput) -> Result<ToolOutput, anyhow::Error>;
}

/// Input to a tool.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ToolInput {
    /// Command arguments
    pub args: Vec<String>,

    /// Environment variables
    pub env: Vec<(String, String)>,

    /// Working directory for the child process
    pub cwd: Option<PathBuf>,

    /// Timeout
    pub timeout: Option<std::time::Duration>,
}

impl ToolInput {
    /// Input with just arguments.
    pub fn with_args(args: Vec<String>) -> Self {
        Self {
            args,
            ..Default::default()
        }
    }

    /// Set the working directory.
    pub fn cwd(mut self, cwd: impl Into<PathBuf>) -> Self {
        self.cwd = Some(cwd.into());
        self
    }
}

/// Output from a tool.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolOutput {
    /// Exit code
    pub exit_code: i32,

    /// Standard output
    pub stdout: String,

    /// Standard error
    pub stderr: String,

    /// Execution duration
    pub duration: std::time::Duration,
}

impl ToolOutput {
    /// Whether the process exited with code zero.
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }
}
