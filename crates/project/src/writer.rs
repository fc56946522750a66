//! Project directory writer.
//!
//! Owns the target directory layout and writes the rendered boilerplate
//! into it with `tokio::fs`. Rendering itself lives in [`templates`];
//! this module is the only place that touches the filesystem.
//!
//! [`templates`]: crate::templates

use std::path::{Path, PathBuf};

use mcpforge_core::ServerSpec;
use tokio::fs;

use crate::templates;

/// Error type for scaffold file operations.
pub type Result<T> = std::result::Result<T, ScaffoldError>;

/// Errors that can occur while writing scaffold files.
#[derive(Debug, thiserror::Error)]
pub enum ScaffoldError {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Writer for one scaffolded project directory.
pub struct ProjectWriter {
    root: PathBuf,
}

impl ProjectWriter {
    /// Create the project layout (`<base>/<dir_name>/src/`) and return a
    /// writer rooted at it.
    pub async fn new(base: impl AsRef<Path>, dir_name: &str) -> Result<Self> {
        let root = base.as_ref().join(dir_name);
        fs::create_dir_all(root.join("src")).await?;

        tracing::debug!(root = %root.display(), "created project layout");
        Ok(Self { root })
    }

    /// Project root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn source_path(&self) -> PathBuf {
        self.root.join("src").join("index.ts")
    }
    fn manifest_path(&self) -> PathBuf {
        self.root.join("package.json")
    }
    fn server_config_path(&self) -> PathBuf {
        self.root.join("mcp.json")
    }
    fn compiler_config_path(&self) -> PathBuf {
        self.root.join("tsconfig.json")
    }
    fn ignore_path(&self) -> PathBuf {
        self.root.join(".gitignore")
    }

    /// Write `src/index.ts`.
    pub async fn write_source_stub(&self, spec: &ServerSpec) -> Result<()> {
        fs::write(self.source_path(), templates::render_source_stub(spec)).await?;
        Ok(())
    }

    /// Write `package.json`.
    pub async fn write_manifest(&self, spec: &ServerSpec) -> Result<()> {
        let manifest = serde_json::to_string_pretty(&templates::render_manifest(spec))?;
        fs::write(self.manifest_path(), manifest).await?;
        Ok(())
    }

    /// Write `mcp.json` (client configuration snippet).
    pub async fn write_server_config(&self, spec: &ServerSpec) -> Result<()> {
        let config = serde_json::to_string_pretty(&templates::render_server_config(spec))?;
        fs::write(self.server_config_path(), config).await?;
        Ok(())
    }

    /// Write `tsconfig.json`.
    pub async fn write_compiler_config(&self) -> Result<()> {
        let config = serde_json::to_string_pretty(&templates::render_compiler_config())?;
        fs::write(self.compiler_config_path(), config).await?;
        Ok(())
    }

    /// Write `.gitignore`.
    pub async fn write_ignore_file(&self) -> Result<()> {
        fs::write(self.ignore_path(), templates::render_ignore_file()).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec() -> ServerSpec {
        ServerSpec::new("my_server_name", "node", vec![], vec![]).unwrap()
    }

    #[tokio::test]
    async fn test_writer_creates_layout_and_files() {
        let base = tempfile::tempdir().unwrap();
        let spec = spec();

        let writer = ProjectWriter::new(base.path(), &spec.dir_name())
            .await
            .unwrap();
        assert_eq!(writer.root(), base.path().join("my-server-name"));
        assert!(writer.root().join("src").is_dir());

        writer.write_source_stub(&spec).await.unwrap();
        writer.write_manifest(&spec).await.unwrap();
        writer.write_server_config(&spec).await.unwrap();
        writer.write_compiler_config().await.unwrap();
        writer.write_ignore_file().await.unwrap();

        let stub = std::fs::read_to_string(writer.root().join("src/index.ts")).unwrap();
        assert!(stub.contains("class MyServerName {"));

        let manifest: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(writer.root().join("package.json")).unwrap())
                .unwrap();
        assert_eq!(manifest["name"], "my-server-name");

        assert!(writer.root().join("mcp.json").is_file());
        assert!(writer.root().join("tsconfig.json").is_file());
        assert!(writer.root().join(".gitignore").is_file());
    }

    #[tokio::test]
    async fn test_writer_is_idempotent_over_existing_dirs() {
        let base = tempfile::tempdir().unwrap();
        let spec = spec();

        ProjectWriter::new(base.path(), &spec.dir_name()).await.unwrap();
        // A second writer over the same directory must not fail.
        ProjectWriter::new(base.path(), &spec.dir_name()).await.unwrap();
    }
}
