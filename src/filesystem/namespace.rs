use std::fmt;
use std::time::SystemTime;

use snafu::{OptionExt, ensure};
use tracing::debug;

use super::error::{
    AlreadyExistsSnafu, InvalidPathSnafu, NamespaceError, NodeType, NotFoundSnafu,
    RootProtectedSnafu, TypeConflictSnafu,
};
use super::node::{Node, TreeStyle};
use super::path::{self, SEPARATOR};

/// An in-memory tree of directories and files addressed by absolute paths.
///
/// The root is a directory named `/` that can be neither replaced nor
/// deleted. All operations run to completion on the calling thread; callers
/// sharing a namespace across threads must hold one lock around each
/// lookup-then-mutate call.
#[derive(Debug, Clone)]
pub struct Namespace {
    root: Node,
}

impl Default for Namespace {
    fn default() -> Self {
        Self::new()
    }
}

impl Namespace {
    pub fn new() -> Self {
        Self { root: Node::root() }
    }

    pub fn root(&self) -> &Node {
        &self.root
    }

    /// Creates `path`, making every missing intermediate directory on the
    /// way (`mkdir -p`).
    ///
    /// The final component becomes a file when its name contains a `.` and a
    /// directory otherwise. Intermediate components are always directories.
    pub fn create_path(&mut self, path: &str) -> Result<(), NamespaceError> {
        ensure!(path::is_valid_path(path), InvalidPathSnafu { path });
        let components = path::split_components(path);
        let Some((&name, intermediate)) = components.split_last() else {
            return InvalidPathSnafu { path }.fail();
        };

        let mut walked = String::new();
        let mut current = &mut self.root;
        for &component in intermediate {
            let Node::Directory(dir) = current else {
                return TypeConflictSnafu {
                    path: walked,
                    expected: NodeType::Directory,
                }
                .fail();
            };
            walked.push_str(SEPARATOR);
            walked.push_str(component);
            current = dir.child_or_insert_directory(component);
        }

        let Node::Directory(parent) = current else {
            return TypeConflictSnafu {
                path: walked,
                expected: NodeType::Directory,
            }
            .fail();
        };
        ensure!(!parent.has_child(name), AlreadyExistsSnafu { path });

        let node = Node::from_name(name);
        debug!("Creating {} '{path}'", node.node_type());
        parent.add_child(name, node);
        Ok(())
    }

    /// Detaches the node at `path` together with everything below it.
    pub fn delete_path(&mut self, path: &str) -> Result<(), NamespaceError> {
        ensure!(path::is_valid_path(path), InvalidPathSnafu { path });
        ensure!(path != SEPARATOR, RootProtectedSnafu);

        let parent_path = path::parent_path(path);
        let name = path::final_component(path);
        let parent = match path::resolve_mut(&mut self.root, parent_path) {
            Ok(Node::Directory(dir)) => dir,
            _ => return NotFoundSnafu { path: parent_path }.fail(),
        };
        ensure!(parent.remove_child(name), NotFoundSnafu { path });

        debug!("Deleted '{path}'");
        Ok(())
    }

    /// Overwrites the content of the file at `path`.
    pub fn set_file_content(
        &mut self,
        path: &str,
        content: impl Into<String>,
    ) -> Result<(), NamespaceError> {
        let file = path::resolve_mut(&mut self.root, path)?
            .as_file_mut()
            .context(TypeConflictSnafu {
                path,
                expected: NodeType::File,
            })?;
        file.set_content(content);

        debug!("Wrote content to '{path}'");
        Ok(())
    }

    /// Content of the file at `path`; `None` if it was never written.
    pub fn get_file_content(&self, path: &str) -> Result<Option<&str>, NamespaceError> {
        let file = path::resolve(&self.root, path)?
            .as_file()
            .context(TypeConflictSnafu {
                path,
                expected: NodeType::File,
            })?;
        Ok(file.content())
    }

    /// Names of the immediate children of the directory at `path`, in
    /// insertion order.
    pub fn list(&self, path: &str) -> Result<Vec<String>, NamespaceError> {
        let dir = path::resolve(&self.root, path)?
            .as_directory()
            .context(TypeConflictSnafu {
                path,
                expected: NodeType::Directory,
            })?;
        Ok(dir.child_names().map(str::to_string).collect())
    }

    pub fn metadata(&self, path: &str) -> Result<NodeMetadata, NamespaceError> {
        path::resolve(&self.root, path).map(NodeMetadata::from)
    }

    /// The whole tree, one line per node.
    pub fn display(&self) -> String {
        self.display_styled(TreeStyle::Plain)
    }

    pub fn display_styled(&self, style: TreeStyle) -> String {
        TreeDump {
            root: &self.root,
            style,
        }
        .to_string()
    }
}

struct TreeDump<'a> {
    root: &'a Node,
    style: TreeStyle,
}

impl fmt::Display for TreeDump<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.root.render(0, self.style, f)
    }
}

/// Point-in-time description of a single node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeMetadata {
    pub name: String,
    pub node_type: NodeType,
    /// Set for files only.
    pub extension: Option<String>,
    pub created_at: SystemTime,
    pub modified_at: SystemTime,
    /// Child count for directories, content length in bytes for files.
    pub size: usize,
}

impl From<&Node> for NodeMetadata {
    fn from(node: &Node) -> Self {
        let (extension, size) = match node {
            Node::Directory(dir) => (None, dir.len()),
            Node::File(file) => (
                Some(file.extension().to_string()),
                file.content().map_or(0, str::len),
            ),
        };
        let timestamps = node.timestamps();
        Self {
            name: node.name().to_string(),
            node_type: node.node_type(),
            extension,
            created_at: timestamps.created_at(),
            modified_at: timestamps.modified_at(),
            size,
        }
    }
}
