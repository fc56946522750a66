//! Staged scaffold workflow.
//!
//! Runs the scaffold as a fixed sequence of stages and reports a
//! structured result per stage, so callers can tell "files written,
//! install failed" apart from an earlier failure.

use std::path::Path;

use mcpforge_core::ServerSpec;
use mcpforge_tools::{find_tool, Tool, ToolInput, ToolOutput};
use serde::{Deserialize, Serialize};

use crate::writer::{ProjectWriter, ScaffoldError};

/// A stage of the scaffold workflow, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Stage {
    /// Create the project directory layout
    Layout,
    /// Write the TypeScript source stub
    SourceStub,
    /// Write `package.json`
    Manifest,
    /// Write the MCP client configuration snippet
    ServerConfig,
    /// Write `tsconfig.json`
    CompilerConfig,
    /// Write `.gitignore`
    IgnoreFile,
    /// Install dependencies with the package manager
    Install,
}

impl Stage {
    /// Human-readable stage name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Layout => "layout",
            Stage::SourceStub => "source stub",
            Stage::Manifest => "manifest",
            Stage::ServerConfig => "server config",
            Stage::CompilerConfig => "compiler config",
            Stage::IgnoreFile => "ignore file",
            Stage::Install => "install",
        }
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of a single stage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StageResult {
    /// Which stage this is
    pub stage: Stage,

    /// Whether the stage succeeded
    pub success: bool,

    /// Whether the stage was skipped (not requested, or an earlier stage failed)
    pub skipped: bool,

    /// Error message (if failed)
    pub error: Option<String>,

    /// Captured process output (install stage only)
    pub output: Option<ToolOutput>,
}

impl StageResult {
    fn ok(stage: Stage) -> Self {
        Self {
            stage,
            success: true,
            skipped: false,
            error: None,
            output: None,
        }
    }

    fn failed(stage: Stage, error: impl std::fmt::Display) -> Self {
        Self {
            stage,
            success: false,
            skipped: false,
            error: Some(error.to_string()),
            output: None,
        }
    }

    fn skipped(stage: Stage) -> Self {
        Self {
            stage,
            success: false,
            skipped: true,
            error: None,
            output: None,
        }
    }
}

/// Report for one scaffold run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScaffoldReport {
    /// Absolute or caller-relative project directory
    pub project_dir: std::path::PathBuf,

    /// Per-stage results, in execution order
    pub stages: Vec<StageResult>,
}

impl ScaffoldReport {
    /// Result of a specific stage, if it was reached.
    pub fn stage(&self, stage: Stage) -> Option<&StageResult> {
        self.stages.iter().find(|r| r.stage == stage)
    }

    /// Whether every required project file landed on disk.
    ///
    /// `.gitignore` is deliberately excluded (non-critical, matching the
    /// original tool's behavior).
    pub fn files_written(&self) -> bool {
        [
            Stage::Layout,
            Stage::SourceStub,
            Stage::Manifest,
            Stage::ServerConfig,
            Stage::CompilerConfig,
        ]
        .iter()
        .all(|s| self.stage(*s).is_some_and(|r| r.success && !r.skipped))
    }

    /// Whether the run as a whole succeeded.
    ///
    /// True when all required files were written and the install stage,
    /// if it ran, exited cleanly.
    pub fn success(&self) -> bool {
        self.files_written()
            && self
                .stage(Stage::Install)
                .is_none_or(|r| r.success || r.skipped)
    }
}

/// Options for a scaffold run.
#[derive(Default)]
pub struct ScaffoldOptions<'a> {
    /// Package manager to run after the files are written; `None` skips
    /// the install stage.
    pub installer: Option<&'a dyn Tool>,

    /// Timeout for the install stage.
    pub install_timeout: Option<std::time::Duration>,
}

/// Run the scaffold workflow for `spec` under `base`.
///
/// Never returns an error: every failure is captured in the report.
pub async fn scaffold(
    base: &Path,
    spec: &ServerSpec,
    options: ScaffoldOptions<'_>,
) -> ScaffoldReport {
    let project_dir = base.join(spec.dir_name());
    let mut stages = Vec::new();

    let writer = match ProjectWriter::new(base, &spec.dir_name()).await {
        Ok(writer) => {
            stages.push(StageResult::ok(Stage::Layout));
            writer
        }
        Err(e) => {
            tracing::error!(error = %e, "failed to create project layout");
            stages.push(StageResult::failed(Stage::Layout, e));
            skip_remaining(&mut stages, Stage::Layout);
            return ScaffoldReport {
                project_dir,
                stages,
            };
        }
    };

    let file_stages = [
        Stage::SourceStub,
        Stage::Manifest,
        Stage::ServerConfig,
        Stage::CompilerConfig,
    ];
    for stage in file_stages {
        let result = match stage {
            Stage::SourceStub => writer.write_source_stub(spec).await,
            Stage::Manifest => writer.write_manifest(spec).await,
            Stage::ServerConfig => writer.write_server_config(spec).await,
            Stage::CompilerConfig => writer.write_compiler_config().await,
            _ => unreachable!(),
        };
        if !record(&mut stages, stage, result) {
            skip_remaining(&mut stages, stage);
            return ScaffoldReport {
                project_dir,
                stages,
            };
        }
    }

    // Non-fatal: the original tool treated a missing .gitignore as a
    // warning, not a failed scaffold.
    record(&mut stages, Stage::IgnoreFile, writer.write_ignore_file().await);

    match options.installer {
        Some(installer) => {
            stages.push(run_install(installer, &writer, spec, &options).await);
        }
        None => stages.push(StageResult::skipped(Stage::Install)),
    }

    ScaffoldReport {
        project_dir,
        stages,
    }
}

/// Record a file-stage result; returns whether it succeeded.
fn record(
    stages: &mut Vec<StageResult>,
    stage: Stage,
    result: Result<(), ScaffoldError>,
) -> bool {
    match result {
        Ok(()) => {
            tracing::info!(stage = %stage, "stage completed");
            stages.push(StageResult::ok(stage));
            true
        }
        Err(e) => {
            tracing::error!(stage = %stage, error = %e, "stage failed");
            stages.push(StageResult::failed(stage, e));
            false
        }
    }
}

/// Mark every stage after `failed` as skipped.
fn skip_remaining(stages: &mut Vec<StageResult>, failed: Stage) {
    let all = [
        Stage::Layout,
        Stage::SourceStub,
        Stage::Manifest,
        Stage::ServerConfig,
        Stage::CompilerConfig,
        Stage::IgnoreFile,
        Stage::Install,
    ];
    let position = all.iter().position(|s| *s == failed).unwrap_or(0);
    for stage in &all[position + 1..] {
        stages.push(StageResult::skipped(*stage));
    }
}

async fn run_install(
    installer: &dyn Tool,
    writer: &ProjectWriter,
    spec: &ServerSpec,
    options: &ScaffoldOptions<'_>,
) -> StageResult {
    if find_tool(installer.name()).is_none() {
        return StageResult::failed(
            Stage::Install,
            format!("{} not found on PATH", installer.name()),
        );
    }

    let input = ToolInput {
        args: vec!["install".to_string()],
        env: Vec::new(),
        cwd: Some(writer.root().to_path_buf()),
        timeout: options.install_timeout,
    };

    tracing::info!(
        installer = installer.name(),
        dir = %writer.root().display(),
        package = %spec.package_name(),
        "installing dependencies"
    );

    match installer.execute(&input).await {
        Ok(output) if output.success() => StageResult {
            stage: Stage::Install,
            success: true,
            skipped: false,
            error: None,
            output: Some(output),
        },
        Ok(output) => StageResult {
            stage: Stage::Install,
            success: false,
            skipped: false,
            error: Some(format!(
                "{} install exited with code {}",
                installer.name(),
                output.exit_code
            )),
            output: Some(output),
        },
        Err(e) => StageResult::failed(Stage::Install, e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    fn spec() -> ServerSpec {
        ServerSpec::new("google-docs-mcp", "node", vec![], vec![]).unwrap()
    }

    struct FakeInstaller {
        exit_code: i32,
    }

    #[async_trait]
    impl Tool for FakeInstaller {
        fn name(&self) -> &str {
            // Resolvable on any test machine, so the PATH probe passes.
            "sh"
        }

        fn description(&self) -> &str {
            "fake installer"
        }

        async fn execute(&self, _input: &ToolInput) -> Result<ToolOutput, anyhow::Error> {
            Ok(ToolOutput {
                exit_code: self.exit_code,
                stdout: String::new(),
                stderr: String::new(),
                duration: std::time::Duration::ZERO,
            })
        }
    }

    #[tokio::test]
    async fn test_scaffold_without_install() {
        let base = tempfile::tempdir().unwrap();
        let report = scaffold(base.path(), &spec(), ScaffoldOptions::default()).await;

        assert!(report.files_written());
        assert!(report.success());
        assert!(report.stage(Stage::Install).unwrap().skipped);
        assert!(report.project_dir.join("src/index.ts").is_file());
        assert!(report.project_dir.join("package.json").is_file());
        assert!(report.project_dir.join("mcp.json").is_file());
        assert!(report.project_dir.join("tsconfig.json").is_file());
        assert!(report.project_dir.join(".gitignore").is_file());
    }

    #[tokio::test]
    async fn test_scaffold_reports_install_failure_separately() {
        let base = tempfile::tempdir().unwrap();
        let installer = FakeInstaller { exit_code: 1 };
        let options = ScaffoldOptions {
            installer: Some(&installer),
            install_timeout: None,
        };

        let report = scaffold(base.path(), &spec(), options).await;

        // Files landed, install failed: the two must be distinguishable.
        assert!(report.files_written());
        assert!(!report.success());
        let install = report.stage(Stage::Install).unwrap();
        assert!(!install.success);
        assert!(install.error.as_deref().unwrap().contains("exited with code 1"));
    }

    #[tokio::test]
    async fn test_scaffold_install_success() {
        let base = tempfile::tempdir().unwrap();
        let installer = FakeInstaller { exit_code: 0 };
        let options = ScaffoldOptions {
            installer: Some(&installer),
            install_timeout: None,
        };

        let report = scaffold(base.path(), &spec(), options).await;
        assert!(report.success());
        assert!(report.stage(Stage::Install).unwrap().success);
    }

    #[tokio::test]
    async fn test_scaffold_ignore_file_failure_is_non_fatal() {
        let base = tempfile::tempdir().unwrap();
        // A directory at the .gitignore path makes write_ignore_file fail
        // without disturbing the other stages.
        let ignore_path = base.path().join("google-docs-mcp").join(".gitignore");
        std::fs::create_dir_all(&ignore_path).unwrap();

        let installer = FakeInstaller { exit_code: 0 };
        let options = ScaffoldOptions {
            installer: Some(&installer),
            install_timeout: None,
        };

        let report = scaffold(base.path(), &spec(), options).await;

        let ignore = report.stage(Stage::IgnoreFile).unwrap();
        assert!(!ignore.success);
        assert!(!ignore.skipped);
        assert!(ignore.error.is_some());

        // The workflow keeps going past the failed ignore file.
        let install = report.stage(Stage::Install).unwrap();
        assert!(install.success);
        assert!(!install.skipped);
        assert!(report.files_written());
        assert!(report.success());
    }

    #[tokio::test]
    async fn test_scaffold_layout_failure_skips_rest() {
        let base = tempfile::tempdir().unwrap();
        // Occupy the base path with a file so create_dir_all fails.
        let blocked = base.path().join("blocked");
        std::fs::write(&blocked, "not a directory").unwrap();

        let report = scaffold(&blocked, &spec(), ScaffoldOptions::default()).await;

        assert!(!report.files_written());
        assert!(!report.success());
        assert!(!report.stage(Stage::Layout).unwrap().success);
        assert!(report.stage(Stage::SourceStub).unwrap().skipped);
        assert!(report.stage(Stage::Install).unwrap().skipped);
    }
}
