//! Directory tree walker for reposchema.
//!
//! This crate walks a directory and builds the nested
//! [`DirectoryNode`] snapshot that the export crate writes out.
//!
//! # Overview
//!
//! - **Sequential, depth-first** traversal via walkdir
//! - **Discovery order** is kept; siblings are not sorted
//! - **Fail fast**: the first filesystem error aborts the walk
//! - **Symlinks** are leaves unless `follow_symlinks` is set
//!
//! # Example
//!
//! ```rust,no_run
//! use reposchema_scan::{SchemaConfig, TreeWalker};
//!
//! let config = SchemaConfig::new("/path/to/repo");
//! let tree = TreeWalker::new(config).walk().unwrap();
//!
//! println!("Files: {}", tree.total_files());
//! println!("Directories: {}", tree.total_dirs());
//! ```

mod walker;

pub use walker::{TreeWalker, walk};

// Re-export core types for convenience
pub use reposchema_core::{
    Children, DirectoryNode, SchemaConfig, SchemaError, SchemaTree, TreeStats,
};
