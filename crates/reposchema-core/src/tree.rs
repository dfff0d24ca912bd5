//! Snapshot container and statistics.

use std::path::PathBuf;
use std::time::{Duration, SystemTime};

use serde::{Deserialize, Serialize};

use crate::node::DirectoryNode;

/// Summary statistics for a walked tree.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeStats {
    /// Total number of file markers.
    pub total_files: u64,
    /// Total number of directories below the root.
    pub total_dirs: u64,
    /// Symbolic links recorded as leaves.
    pub total_symlinks: u64,
    /// Depth of the deepest entry (root children are at depth 1).
    pub max_depth: u32,
}

impl TreeStats {
    /// Create new empty stats.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a leaf entry.
    pub fn record_file(&mut self, depth: u32) {
        self.total_files += 1;
        self.max_depth = self.max_depth.max(depth);
    }

    /// Record a directory.
    pub fn record_dir(&mut self, depth: u32) {
        self.total_dirs += 1;
        self.max_depth = self.max_depth.max(depth);
    }

    /// Record a symlink that was not walked into.
    pub fn record_symlink(&mut self) {
        self.total_symlinks += 1;
    }
}

/// A complete snapshot of one directory tree.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchemaTree {
    /// Root node of the tree.
    pub root: DirectoryNode,

    /// Canonical root path that was walked.
    pub root_path: PathBuf,

    /// When this walk was performed.
    pub scanned_at: SystemTime,

    /// Duration of the walk.
    pub scan_duration: Duration,

    /// Summary statistics.
    pub stats: TreeStats,
}

impl SchemaTree {
    /// Create a new snapshot.
    pub fn new(
        root: DirectoryNode,
        root_path: PathBuf,
        stats: TreeStats,
        scan_duration: Duration,
    ) -> Self {
        Self {
            root,
            root_path,
            scanned_at: SystemTime::now(),
            scan_duration,
            stats,
        }
    }

    /// Get the total number of files.
    pub fn total_files(&self) -> u64 {
        self.stats.total_files
    }

    /// Get the total number of directories.
    pub fn total_dirs(&self) -> u64 {
        self.stats.total_dirs
    }

    /// Take the root node, dropping the metadata.
    pub fn into_root(self) -> DirectoryNode {
        self.root
    }
}
