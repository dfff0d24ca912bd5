//! Indented JSON writer.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};

use reposchema_core::{DEFAULT_INDENT, DirectoryNode, SchemaError};

/// Writes [`DirectoryNode`] trees as indented JSON.
#[derive(Debug, Clone)]
pub struct SchemaWriter {
    indent: Vec<u8>,
}

impl SchemaWriter {
    /// Create a writer using `indent` spaces per nesting level.
    pub fn new(indent: usize) -> Self {
        Self {
            indent: vec![b' '; indent],
        }
    }

    /// Spaces per nesting level.
    pub fn indent(&self) -> usize {
        self.indent.len()
    }

    /// Encode `node` into `writer`.
    ///
    /// I/O failures are reported against an empty path; use
    /// [`SchemaWriter::save`] to get the destination in the error.
    pub fn write<W: Write>(&self, node: &DirectoryNode, writer: W) -> Result<(), SchemaError> {
        let formatter = PrettyFormatter::with_indent(&self.indent);
        let mut serializer = Serializer::with_formatter(writer, formatter);
        node.serialize(&mut serializer).map_err(|e| encode_error("", e))
    }

    /// Encode `node` to an in-memory string.
    pub fn to_json(&self, node: &DirectoryNode) -> Result<String, SchemaError> {
        let mut buf = Vec::new();
        self.write(node, &mut buf)?;
        String::from_utf8(buf).map_err(|e| SchemaError::Serialize {
            message: e.to_string(),
        })
    }

    /// Create or truncate `path` and write `node` to it, ending with a newline.
    ///
    /// A failure partway through can leave the file truncated.
    pub fn save(&self, node: &DirectoryNode, path: impl AsRef<Path>) -> Result<(), SchemaError> {
        let path = path.as_ref();
        let file = File::create(path).map_err(|e| SchemaError::write(path, e))?;
        let mut out = BufWriter::new(file);

        let formatter = PrettyFormatter::with_indent(&self.indent);
        let mut serializer = Serializer::with_formatter(&mut out, formatter);
        node.serialize(&mut serializer).map_err(|e| encode_error(path, e))?;

        out.write_all(b"\n").map_err(|e| SchemaError::write(path, e))?;
        out.flush().map_err(|e| SchemaError::write(path, e))?;

        tracing::debug!(path = %path.display(), "schema written");
        Ok(())
    }
}

impl Default for SchemaWriter {
    fn default() -> Self {
        Self::new(DEFAULT_INDENT)
    }
}

/// Write `node` to `writer` with `indent` spaces per level.
pub fn write_schema<W: Write>(node: &DirectoryNode, writer: W, indent: usize) -> Result<(), SchemaError> {
    SchemaWriter::new(indent).write(node, writer)
}

/// Write `node` to the file at `path` with `indent` spaces per level.
pub fn save_schema(node: &DirectoryNode, path: impl AsRef<Path>, indent: usize) -> Result<(), SchemaError> {
    SchemaWriter::new(indent).save(node, path)
}

fn encode_error(path: impl AsRef<Path>, err: serde_json::Error) -> SchemaError {
    if err.is_io() {
        SchemaError::write(path.as_ref(), std::io::Error::from(err))
    } else {
        SchemaError::Serialize {
            message: err.to_string(),
        }
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
    fn test_four_space_indent() {
        let out = SchemaWriter::default().to_json(&sample()).unwrap();
        let expected = "{\n    \"x\": null,\n    \"sub\": {\n        \"y\": null\n    }\n}";
        assert_eq!(out, expected);
    }

    #[test]
    fn test_custom_indent() {
        let out = SchemaWriter::new(2).to_json(&sample()).unwrap();
        assert!(out.contains("\n  \"x\": null"));
        assert!(out.contains("\n    \"y\": null"));
    }

    #[test]
    fn test_empty_directory() {
        let out = SchemaWriter::default()
            .to_json(&DirectoryNode::new_directory())
            .unwrap();
        assert_eq!(out, "{}");
    }

    #[test]
    fn test_io_failure_maps_to_write() {
        struct Broken;
        impl Write for Broken {
            fn write(&mut self, _: &[u8]) -> std::io::Result<usize> {
                Err(std::io::Error::other("broken pipe"))
            }
            fn flush(&mut self) -> std::io::Result<()> {
                Ok(())
            }
        }

        let err = write_schema(&sample(), Broken, 4).unwrap_err();
        assert!(matches!(err, SchemaError::Write { .. }));
    }
}
