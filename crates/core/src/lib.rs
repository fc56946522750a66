//! mcpforge core data models.
//!
//! This crate defines the pure domain of the scaffolder: identifier
//! normalization and the server specification collected from the user.
//! It does no I/O.

#![warn(missing_docs)]

// Name transforms
mod ident;

// Server specification
mod spec;

// Re-exports
pub use ident::{normalize_identifier, sanitize_package_name};
pub use spec::{parse_args, parse_env_pairs, ServerSpec, SpecError};
