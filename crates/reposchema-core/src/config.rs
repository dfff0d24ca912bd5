//! Snapshot configuration types.

use std::path::PathBuf;

use derive_builder::Builder;
use serde::{Deserialize, Serialize};

use crate::error::SchemaError;

/// Default number of spaces per nesting level in written output.
pub const DEFAULT_INDENT: usize = 4;

/// Largest indent width accepted by the builder.
pub const MAX_INDENT: usize = 16;

/// Configuration for taking and writing a snapshot.
#[derive(Debug, Clone, Builder, Serialize, Deserialize)]
#[builder(setter(into), build_fn(validate = "Self::validate"))]
pub struct SchemaConfig {
    /// Root directory to walk.
    pub root: PathBuf,

    /// Walk into symlinked directories instead of recording them as leaves.
    #[builder(default = "false")]
    #[serde(default)]
    pub follow_symlinks: bool,

    /// Spaces per nesting level in written output.
    #[builder(default = "DEFAULT_INDENT")]
    #[serde(default = "default_indent")]
    pub indent: usize,
}

fn default_indent() -> usize {
    DEFAULT_INDENT
}

impl SchemaConfigBuilder {
    fn validate(&self) -> Result<(), String> {
        match self.root {
            Some(ref root) if root.as_os_str().is_empty() => {
                return Err("Root path cannot be empty".to_string());
            }
            Some(_) => {}
            None => return Err("Root path is required".to_string()),
        }
        if let Some(indent) = self.indent {
            if indent > MAX_INDENT {
                return Err(format!("Indent must be at most {MAX_INDENT}, got {indent}"));
            }
        }
        Ok(())
    }
}

impl From<SchemaConfigBuilderError> for SchemaError {
    fn from(err: SchemaConfigBuilderError) -> Self {
        SchemaError::InvalidConfig {
            message: err.to_string(),
        }
    }
}

impl SchemaConfig {
    /// Create a new config builder.
    pub fn builder() -> SchemaConfigBuilder {
        SchemaConfigBuilder::default()
    }

    /// Create a simple config for a root path.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            follow_symlinks: false,
            indent: DEFAULT_INDENT,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_builder() {
        let config = SchemaConfig::builder()
            .root("/home/user/repo")
            .follow_symlinks(true)
            .indent(2usize)
            .build()
            .unwrap();

        assert_eq!(config.root, PathBuf::from("/home/user/repo"));
        assert!(config.follow_symlinks);
        assert_eq!(config.indent, 2);
    }

    #[test]
    fn test_config_simple() {
        let config = SchemaConfig::new("/home/user/repo");
        assert!(!config.follow_symlinks);
        assert_eq!(config.indent, DEFAULT_INDENT);
    }

    #[test]
    fn test_builder_requires_root() {
        let err = SchemaConfig::builder().build().unwrap_err();
        assert!(err.to_string().contains("Root path is required"));

        let err = SchemaConfig::builder().root("").build().unwrap_err();
        assert!(err.to_string().contains("cannot be empty"));
    }

    #[test]
    fn test_builder_rejects_wide_indent() {
        let err: SchemaError = SchemaConfig::builder()
            .root("/repo")
            .indent(64usize)
            .build()
            .unwrap_err()
            .into();
        assert!(matches!(err, SchemaError::InvalidConfig { .. }));
    }

    #[test]
    fn test_deserialize_defaults() {
        let config: SchemaConfig = serde_json::from_str(r#"{"root":"/repo"}"#).unwrap();
        assert_eq!(config.indent, DEFAULT_INDENT);
        assert!(!config.follow_symlinks);
    }
}
