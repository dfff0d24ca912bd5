//! JSON serializer for reposchema snapshots.
//!
//! Directories become objects keyed by entry name in discovery order and
//! files become `null`. Output is indented, four spaces per level unless
//! configured otherwise, and parses back into an equal [`DirectoryNode`].
//!
//! ```rust,no_run
//! use reposchema_export::save_schema;
//! use reposchema_scan::walk;
//!
//! let root = walk("/path/to/repo").unwrap();
//! save_schema(&root, "repo_schema.json", 4).unwrap();
//! ```

mod writer;

pub use writer::{SchemaWriter, save_schema, write_schema};

pub use reposchema_core::{DEFAULT_INDENT, DirectoryNode, SchemaError};
