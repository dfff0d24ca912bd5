//! Directory snapshot node types.

use std::fmt;

use compact_str::CompactString;
use indexmap::IndexMap;
use serde::de::{self, Deserialize, Deserializer, MapAccess, Visitor};
use serde::ser::{Serialize, SerializeMap, Serializer};

/// Children of a directory, keyed by entry name in discovery order.
pub type Children = IndexMap<CompactString, DirectoryNode>;

/// One entry of a directory snapshot.
///
/// A file is a bare marker with no further data. A directory owns an
/// insertion-ordered mapping from child name to child node, so sibling
/// names are unique and keep the order the walker found them in.
///
/// Serializes as `null` for files and as an object for directories.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DirectoryNode {
    /// Leaf entry (regular file, or anything that is not walked into).
    #[default]
    File,
    /// Directory with its children.
    Directory(Children),
}

impl DirectoryNode {
    /// Create an empty directory node.
    pub fn new_directory() -> Self {
        Self::Directory(Children::new())
    }

    /// Check if this node is a file marker.
    pub fn is_file(&self) -> bool {
        matches!(self, Self::File)
    }

    /// Check if this node is a directory.
    pub fn is_dir(&self) -> bool {
        matches!(self, Self::Directory(_))
    }

    /// Get the children of a directory (`None` for files).
    pub fn children(&self) -> Option<&Children> {
        match self {
            Self::Directory(children) => Some(children),
            Self::File => None,
        }
    }

    /// Look up a direct child by name.
    pub fn child(&self, name: &str) -> Option<&DirectoryNode> {
        self.children().and_then(|children| children.get(name))
    }

    /// Bind `name` to `node` inside this directory.
    ///
    /// Returns the node previously bound to `name`, if any. Inserting into a
    /// file marker is a no-op that hands `node` back.
    pub fn insert(
        &mut self,
        name: impl Into<CompactString>,
        node: DirectoryNode,
    ) -> Option<DirectoryNode> {
        match self {
            Self::Directory(children) => children.insert(name.into(), node),
            Self::File => Some(node),
        }
    }

    /// Number of direct children (0 for files).
    pub fn len(&self) -> usize {
        self.children().map_or(0, IndexMap::len)
    }

    /// Check if this node has no children.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Total number of files in this subtree.
    pub fn file_count(&self) -> u64 {
        match self {
            Self::File => 1,
            Self::Directory(children) => children.values().map(DirectoryNode::file_count).sum(),
        }
    }

    /// Total number of directories below this node (not counting itself).
    pub fn dir_count(&self) -> u64 {
        match self {
            Self::File => 0,
            Self::Directory(children) => children
                .values()
                .filter(|child| child.is_dir())
                .map(|child| child.dir_count() + 1)
                .sum(),
        }
    }

    /// Depth of the subtree: 0 for a file or an empty directory,
    /// otherwise one more than the deepest child.
    pub fn depth(&self) -> u32 {
        match self {
            Self::File => 0,
            Self::Directory(children) => children
                .values()
                .map(|child| child.depth() + 1)
                .max()
                .unwrap_or(0),
        }
    }
}

impl Serialize for DirectoryNode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::File => serializer.serialize_unit(),
            Self::Directory(children) => {
                let mut map = serializer.serialize_map(Some(children.len()))?;
                for (name, child) in children {
                    map.serialize_entry(name.as_str(), child)?;
                }
                map.end()
            }
        }
    }
}

impl<'de> Deserialize<'de> for DirectoryNode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(NodeVisitor)
    }
}

struct NodeVisitor;

impl<'de> Visitor<'de> for NodeVisitor {
    type Value = DirectoryNode;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("null for a file or a map for a directory")
    }

    fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(DirectoryNode::File)
    }

    fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(DirectoryNode::File)
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut children = Children::with_capacity(access.size_hint().unwrap_or(0));
        while let Some((name, child)) = access.next_entry::<CompactString, DirectoryNode>()? {
            if children.insert(name.clone(), child).is_some() {
                return Err(de::Error::custom(format!("duplicate entry name `{name}`")));
            }
        }
        Ok(DirectoryNode::Directory(children))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> DirectoryNode {
        let mut sub = DirectoryNode::new_directory();
        sub.insert("y", DirectoryNode::File);

        let mut root = DirectoryNode::new_directory();
        root.insert("x", DirectoryNode::File);
        root.insert("sub", sub);
        root
    }

    #[test]
    fn test_default_is_file() {
        assert!(DirectoryNode::default().is_file());
        assert!(DirectoryNode::new_directory().is_dir());
    }

    #[test]
    fn test_counts_and_depth() {
        let root = sample();
        assert_eq!(root.len(), 2);
        assert_eq!(root.file_count(), 2);
        assert_eq!(root.dir_count(), 1);
        assert_eq!(root.depth(), 2);
        assert_eq!(DirectoryNode::new_directory().depth(), 0);
    }

    #[test]
    fn test_insert_into_file_is_rejected() {
        let mut file = DirectoryNode::File;
        assert_eq!(file.insert("a", DirectoryNode::File), Some(DirectoryNode::File));
        assert!(file.is_file());
    }

    #[test]
    fn test_serialize_shape() {
        let json = serde_json::to_string(&sample()).unwrap();
        assert_eq!(json, r#"{"x":null,"sub":{"y":null}}"#);
    }

    #[test]
    fn test_deserialize_keeps_order() {
        let node: DirectoryNode = serde_json::from_str(r#"{"b":null,"a":{}}"#).unwrap();
        let names: Vec<_> = node.children().unwrap().keys().map(|k| k.as_str()).collect();
        assert_eq!(names, ["b", "a"]);
        assert!(node.child("a").unwrap().is_dir());
    }

    #[test]
    fn test_deserialize_rejects_scalars() {
        assert!(serde_json::from_str::<DirectoryNode>("42").is_err());
        assert!(serde_json::from_str::<DirectoryNode>(r#"{"a":"b"}"#).is_err());
    }
}
