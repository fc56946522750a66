//! Server specification collected from the user.

use serde::{Deserialize, Serialize};

use crate::ident::{normalize_identifier, sanitize_package_name};

/// Errors produced while validating a server specification.
#[derive(Debug, thiserror::Error)]
pub enum SpecError {
    /// No server name was given
    #[error("server name must not be empty")]
    EmptyName,

    /// The name contained no usable characters
    #[error("server name {0:?} sanitizes to an empty package name")]
    UnusableName(String),

    /// No launch command was given
    #[error("launch command must not be empty")]
    EmptyCommand,
}

/// Everything needed to scaffold one MCP server project.
///
/// `name` is kept verbatim; derived forms are computed on demand so the
/// raw input stays available for the generated source.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerSpec {
    /// Raw server name as entered by the user
    pub name: String,

    /// Command used to launch the server (e.g. `node`)
    pub command: String,

    /// Arguments passed to the launch command
    pub args: Vec<String>,

    /// Environment variables, in the order they were entered
    pub env: Vec<(String, String)>,
}

impl ServerSpec {
    /// Create a validated spec.
    pub fn new(
        name: impl Into<String>,
        command: impl Into<String>,
        args: Vec<String>,
        env: Vec<(String, String)>,
    ) -> Result<Self, SpecError> {
        let name = name.into();
        let command = command.into();

        if name.trim().is_empty() {
            return Err(SpecError::EmptyName);
        }
        if sanitize_package_name(&name).is_empty() {
            return Err(SpecError::UnusableName(name));
        }
        if command.trim().is_empty() {
            return Err(SpecError::EmptyCommand);
        }

        Ok(Self {
            name,
            command,
            args,
            env,
        })
    }

    /// PascalCase type name for the generated server class.
    pub fn type_name(&self) -> String {
        normalize_identifier(Some(&self.name))
    }

    /// Canonical package name (also the project directory name).
    pub fn package_name(&self) -> String {
        sanitize_package_name(&self.name)
    }

    /// Directory name for the scaffolded project.
    ///
    /// Always identical to [`package_name`](Self::package_name), so the
    /// manifest can never disagree with the directory on disk.
    pub fn dir_name(&self) -> String {
        self.package_name()
    }
}

/// Parse a comma-separated argument answer (`"--version, -y"`).
///
/// Entries are trimmed; empty entries are dropped.
pub fn parse_args(answer: &str) -> Vec<String> {
    answer
        .split(',')
        .map(str::trim)
        .filter(|arg| !arg.is_empty())
        .map(str::to_string)
        .collect()
}

/// Parse a comma-separated `key=value` answer (`"API_KEY=abc, DATA=x"`).
///
/// Pairs with a missing key or value are dropped. Only the first two
/// `=`-separated fields of a pair are used. Order is preserved.
pub fn parse_env_pairs(answer: &str) -> Vec<(String, String)> {
    answer
        .split(',')
        .filter_map(|pair| {
            let mut fields = pair.split('=').map(str::trim);
            match (fields.next(), fields.next()) {
                (Some(key), Some(value)) if !key.is_empty() && !value.is_empty() => {
                    Some((key.to_string(), value.to_string()))
                }
                _ => None,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spec_derived_names() {
        let spec = ServerSpec::new("google-docs-mcp", "node", vec![], vec![]).unwrap();
        assert_eq!(spec.type_name(), "GoogleDocsMcp");
        assert_eq!(spec.package_name(), "google-docs-mcp");
        assert_eq!(spec.dir_name(), spec.package_name());
    }

    #[test]
    fn test_spec_rejects_empty_name() {
        assert!(matches!(
            ServerSpec::new("", "node", vec![], vec![]),
            Err(SpecError::EmptyName)
        ));
        assert!(matches!(
            ServerSpec::new("   ", "node", vec![], vec![]),
            Err(SpecError::EmptyName)
        ));
    }

    #[test]
    fn test_spec_rejects_unusable_name() {
        assert!(matches!(
            ServerSpec::new("!!!", "node", vec![], vec![]),
            Err(SpecError::UnusableName(_))
        ));
    }

    #[test]
    fn test_spec_rejects_empty_command() {
        assert!(matches!(
            ServerSpec::new("server", "", vec![], vec![]),
            Err(SpecError::EmptyCommand)
        ));
    }

    #[test]
    fn test_parse_args() {
        assert_eq!(parse_args("--version, -y"), vec!["--version", "-y"]);
        assert_eq!(parse_args("  a ,, b  "), vec!["a", "b"]);
        assert!(parse_args("").is_empty());
    }

    #[test]
    fn test_parse_env_pairs() {
        assert_eq!(
            parse_env_pairs("API_KEY=abc, DATA=x"),
            vec![
                ("API_KEY".to_string(), "abc".to_string()),
                ("DATA".to_string(), "x".to_string()),
            ]
        );
        // Missing key or value drops the pair
        assert!(parse_env_pairs("=x, KEY=, ,").is_empty());
        // Only the first two fields of a pair are used
        assert_eq!(
            parse_env_pairs("A=b=c"),
            vec![("A".to_string(), "b".to_string())]
        );
    }

    #[test]
    fn test_env_order_preserved() {
        let env = parse_env_pairs("Z=1, A=2, M=3");
        let keys: Vec<_> = env.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, vec!["Z", "A", "M"]);
    }
}
