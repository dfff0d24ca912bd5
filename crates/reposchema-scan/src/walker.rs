//! Depth-first directory walker.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::time::Instant;

use compact_str::CompactString;
use walkdir::WalkDir;

use reposchema_core::{Children, DirectoryNode, SchemaConfig, SchemaError, SchemaTree, TreeStats};

/// Builds a [`DirectoryNode`] tree from a real directory.
///
/// The walk is sequential and depth-first. Entries are recorded in the order
/// the filesystem lists them. Directories that are still being filled live on
/// an explicit stack, so deep trees never grow the call stack.
#[derive(Debug, Clone)]
pub struct TreeWalker {
    config: SchemaConfig,
}

impl TreeWalker {
    /// Create a walker for the given config.
    pub fn new(config: SchemaConfig) -> Self {
        Self { config }
    }

    /// Get the walker's config.
    pub fn config(&self) -> &SchemaConfig {
        &self.config
    }

    /// Walk the configured root.
    ///
    /// Any filesystem error aborts the walk; no partial tree is returned.
    pub fn walk(&self) -> Result<SchemaTree, SchemaError> {
        let start = Instant::now();
        let root_path = self
            .config
            .root
            .canonicalize()
            .map_err(|e| SchemaError::io(&self.config.root, e))?;

        if !root_path.is_dir() {
            return Err(SchemaError::NotADirectory { path: root_path });
        }

        let mut stats = TreeStats::new();
        let root = self.build_root(&root_path, &mut stats)?;
        let scan_duration = start.elapsed();

        tracing::info!(
            root = %root_path.display(),
            files = stats.total_files,
            dirs = stats.total_dirs,
            max_depth = stats.max_depth,
            elapsed_ms = scan_duration.as_millis() as u64,
            "walk complete"
        );

        Ok(SchemaTree::new(root, root_path, stats, scan_duration))
    }

    /// Fold the pre-order entry stream into nested directory nodes.
    fn build_root(&self, root_path: &Path, stats: &mut TreeStats) -> Result<DirectoryNode, SchemaError> {
        let walker = WalkDir::new(root_path)
            .follow_links(self.config.follow_symlinks)
            .min_depth(1);

        // Index 0 is the root; an entry at depth d belongs to open[d - 1].
        let mut open = vec![OpenDir::new(CompactString::default(), root_path.to_path_buf())];

        for entry_result in walker {
            let entry = entry_result.map_err(walk_error)?;
            let depth = entry.depth();
            close_dirs(&mut open, depth)?;

            let name = entry_name(entry.file_name());
            let file_type = entry.file_type();

            if file_type.is_dir() {
                tracing::debug!(path = %entry.path().display(), depth, "entering directory");
                stats.record_dir(depth as u32);
                open.push(OpenDir::new(name, entry.into_path()));
            } else {
                if file_type.is_symlink() {
                    stats.record_symlink();
                }
                stats.record_file(depth as u32);
                if let Some(parent) = open.last_mut() {
                    parent.attach(name, DirectoryNode::File, entry.path())?;
                }
            }
        }

        close_dirs(&mut open, 1)?;
        let children = open.pop().map(|dir| dir.children).unwrap_or_default();
        Ok(DirectoryNode::Directory(children))
    }
}

/// Walk `path` with default settings and return the root node.
pub fn walk(path: impl AsRef<Path>) -> Result<DirectoryNode, SchemaError> {
    TreeWalker::new(SchemaConfig::new(path.as_ref()))
        .walk()
        .map(SchemaTree::into_root)
}

/// A directory whose children are still being collected.
struct OpenDir {
    name: CompactString,
    path: PathBuf,
    children: Children,
}

impl OpenDir {
    fn new(name: CompactString, path: PathBuf) -> Self {
        Self {
            name,
            path,
            children: Children::new(),
        }
    }

    /// Bind `name` to `node`; a name that is already taken is an error.
    fn attach(&mut self, name: CompactString, node: DirectoryNode, path: &Path) -> Result<(), SchemaError> {
        if self.children.contains_key(&name) {
            return Err(SchemaError::NameCollision {
                path: path.to_path_buf(),
            });
        }
        self.children.insert(name, node);
        Ok(())
    }
}

/// Pop open directories until only `keep` remain, attaching each to its parent.
fn close_dirs(open: &mut Vec<OpenDir>, keep: usize) -> Result<(), SchemaError> {
    while open.len() > keep {
        let Some(dir) = open.pop() else {
            break;
        };
        if let Some(parent) = open.last_mut() {
            parent.attach(dir.name, DirectoryNode::Directory(dir.children), &dir.path)?;
        }
    }
    Ok(())
}

/// Convert an entry name into a map key.
///
/// Bytes that are not valid UTF-8 are written as `\xNN`, so distinct raw
/// names stay distinct keys.
#[cfg(unix)]
fn entry_name(name: &OsStr) -> CompactString {
    use std::fmt::Write;
    use std::os::unix::ffi::OsStrExt;

    let mut key = CompactString::default();
    for chunk in name.as_bytes().utf8_chunks() {
        key.push_str(chunk.valid());
        for byte in chunk.invalid() {
            let _ = write!(key, "\\x{byte:02x}");
        }
    }
    key
}

#[cfg(not(unix))]
fn entry_name(name: &OsStr) -> CompactString {
    CompactString::new(name.to_string_lossy())
}

fn walk_error(err: walkdir::Error) -> SchemaError {
    let path = err.path().map(Path::to_path_buf).unwrap_or_default();
    if let Some(ancestor) = err.loop_ancestor() {
        return SchemaError::SymlinkLoop {
            path,
            ancestor: ancestor.to_path_buf(),
        };
    }
    SchemaError::io(path, std::io::Error::from(err))
}
