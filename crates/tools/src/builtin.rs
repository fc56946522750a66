//! Built-in package manager tools (npm, pnpm, yarn).

use super::r#trait::*;
use anyhow::Context;
use async_trait::async_trait;
use std::path::PathBuf;
use tokio::process::Command;

/// Locate a tool binary on `PATH`.
///
/// Lets callers fail with a clear "npm not installed" message instead of a
/// raw spawn error.
pub fn find_tool(name: &str) -> Option<PathBuf> {
    which::which(name).ok()
}

/// Look up a builtin installer by name.
pub fn installer_for(name: &str) -> Option<Box<dyn Tool>> {
    match name {
        "npm" => Some(Box::new(NpmTool)),
        "pnpm" => Some(Box::new(PnpmTool)),
        "yarn" => Some(Box::new(YarnTool)),
        _ => None,
    }
}

async fn run(bin: &str, input: &ToolInput) -> Result<ToolOutput, anyhow::Error> {
    let start = std::time::Instant::now();

    let mut cmd = Command::new(bin);
    cmd.args(&input.args);
    // If the timeout drops the output future, the child must die with it.
    cmd.kill_on_drop(true);

    if let Some(cwd) = &input.cwd {
        cmd.current_dir(cwd);
    }

    for (k, v) in &input.env {
        cmd.env(k, v);
    }

    tracing::debug!(tool = bin, args = ?input.args, cwd = ?input.cwd, "running tool");

    let output = match input.timeout {
        Some(limit) => tokio::time::timeout(limit, cmd.output())
            .await
            .with_context(|| format!("{bin} timed out after {limit:?}"))??,
        None => cmd.output().await?,
    };

    Ok(ToolOutput {
        exit_code: output.status.code().unwrap_or(-1),
        stdout: String::from_utf8_lossy(&output.stdout).to_string(),
        stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        duration: start.elapsed(),
    })
}

/// npm package manager.
#[derive(Debug)]
pub struct NpmTool;

#[async_trait]
impl Tool for NpmTool {
    fn name(&self) -> &str {
        "npm"
    }

    fn description(&self) -> &str {
        "Node.js package manager"
    }

    async fn execute(&self, input: &ToolInput) -> Result<ToolOutput, anyhow::Error> {
        run("npm", input).await
    }
}

/// pnpm package manager.
#[derive(Debug)]
pub struct PnpmTool;

#[async_trait]
impl Tool for PnpmTool {
    fn name(&self) -> &str {
        "pnpm"
    }

    fn description(&self) -> &str {
        "Fast, disk-efficient Node.js package manager"
    }

    async fn execute(&self, input: &ToolInput) -> Result<ToolOutput, anyhow::Error> {
        run("pnpm", input).await
    }
}

/// yarn package manager.
#[derive(Debug)]
pub struct YarnTool;

#[async_trait]
impl Tool for YarnTool {
    fn name(&self) -> &str {
        "yarn"
    }

    fn description(&self) -> &str {
        "Yarn package manager"
    }

    async fn execute(&self, input: &ToolInput) -> Result<ToolOutput, anyhow::Error> {
        run("yarn", input).await
    }
}
