//! Core types for reposchema.
//!
//! This crate provides the data structures shared by the walker and the
//! serializer: the snapshot node, the tree container, configuration and
//! errors.

mod config;
mod error;
mod node;
mod tree;

pub use config::{
    DEFAULT_INDENT, MAX_INDENT, SchemaConfig, SchemaConfigBuilder, SchemaConfigBuilderError,
};
pub use error::SchemaError;
pub use node::{Children, DirectoryNode};
pub use tree::{SchemaTree, TreeStats};
