use std::fmt;
use std::time::SystemTime;

use colored::Colorize;
use derive_more::IsVariant;
use hashlink::LinkedHashMap;

use super::error::NodeType;
use super::path::SEPARATOR;

/// Number of spaces per nesting level in tree dumps.
pub const INDENT_WIDTH: usize = 2;

/// Creation and last-modification times of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timestamps {
    created_at: SystemTime,
    modified_at: SystemTime,
}

impl Timestamps {
    fn now() -> Self {
        let now = SystemTime::now();
        Self {
            created_at: now,
            modified_at: now,
        }
    }

    fn touch(&mut self) {
        self.modified_at = SystemTime::now();
    }

    pub fn created_at(&self) -> SystemTime {
        self.created_at
    }

    pub fn modified_at(&self) -> SystemTime {
        self.modified_at
    }
}

/// How a tree dump decorates node names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TreeStyle {
    #[default]
    Plain,
    Colored,
}

impl TreeStyle {
    fn directory_name(self, name: &str) -> String {
        match self {
            TreeStyle::Plain => name.to_string(),
            TreeStyle::Colored => name.blue().bold().to_string(),
        }
    }
}

/// An element of the namespace tree.
///
/// Only the `Directory` variant owns children, so adding a child to a file
/// cannot be expressed: [`Directory::add_child`] is the only way in.
#[derive(Debug, Clone, PartialEq, Eq, IsVariant)]
pub enum Node {
    Directory(Directory),
    File(File),
}

impl Node {
    /// The root directory, named after the path separator.
    pub fn root() -> Self {
        Node::Directory(Directory::new(SEPARATOR))
    }

    /// Builds a leaf for `name`, classifying it purely by shape: a name
    /// containing a `.` becomes a file, anything else a directory.
    ///
    /// A directory deliberately named with a dot (`v1.2`) is therefore
    /// created as a file. This is a known limitation.
    pub fn from_name(name: &str) -> Self {
        if name.contains('.') {
            Node::File(File::new(name))
        } else {
            Node::Directory(Directory::new(name))
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Node::Directory(dir) => dir.name(),
            Node::File(file) => file.name(),
        }
    }

    pub fn node_type(&self) -> NodeType {
        match self {
            Node::Directory(_) => NodeType::Directory,
            Node::File(_) => NodeType::File,
        }
    }

    pub fn is_container(&self) -> bool {
        self.is_directory()
    }

    pub fn timestamps(&self) -> &Timestamps {
        match self {
            Node::Directory(dir) => &dir.timestamps,
            Node::File(file) => &file.timestamps,
        }
    }

    pub fn has_child(&self, name: &str) -> bool {
        self.as_directory().is_some_and(|dir| dir.has_child(name))
    }

    pub fn get_child(&self, name: &str) -> Option<&Node> {
        self.as_directory().and_then(|dir| dir.get_child(name))
    }

    pub fn get_child_mut(&mut self, name: &str) -> Option<&mut Node> {
        self.as_directory_mut()
            .and_then(|dir| dir.get_child_mut(name))
    }

    pub fn remove_child(&mut self, name: &str) -> bool {
        self.as_directory_mut()
            .is_some_and(|dir| dir.remove_child(name))
    }

    pub fn as_directory(&self) -> Option<&Directory> {
        match self {
            Node::Directory(dir) => Some(dir),
            Node::File(_) => None,
        }
    }

    pub fn as_directory_mut(&mut self) -> Option<&mut Directory> {
        match self {
            Node::Directory(dir) => Some(dir),
            Node::File(_) => None,
        }
    }

    pub fn as_file(&self) -> Option<&File> {
        match self {
            Node::File(file) => Some(file),
            Node::Directory(_) => None,
        }
    }

    pub fn as_file_mut(&mut self) -> Option<&mut File> {
        match self {
            Node::File(file) => Some(file),
            Node::Directory(_) => None,
        }
    }

    /// Writes this node and, for directories, its whole subtree, one line
    /// per node, indented by `depth` levels.
    pub fn display(&self, depth: usize, out: &mut impl fmt::Write) -> fmt::Result {
        self.render(depth, TreeStyle::Plain, out)
    }

    pub fn render(&self, depth: usize, style: TreeStyle, out: &mut impl fmt::Write) -> fmt::Result {
        let indent = " ".repeat(depth * INDENT_WIDTH);
        match self {
            Node::Directory(dir) => {
                writeln!(
                    out,
                    "{indent}📁 {} ({} items)",
                    style.directory_name(dir.name()),
                    dir.len()
                )?;
                for child in dir.children() {
                    child.render(depth + 1, style, out)?;
                }
                Ok(())
            }
            Node::File(file) => writeln!(out, "{indent}📄 {}", file.name()),
        }
    }
}

/// A container node. Children are kept in insertion order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Directory {
    name: String,
    children: LinkedHashMap<String, Node>,
    timestamps: Timestamps,
}

impl Directory {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            children: LinkedHashMap::new(),
            timestamps: Timestamps::now(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn timestamps(&self) -> &Timestamps {
        &self.timestamps
    }

    /// Sets the entry for `name` unconditionally. Rejecting duplicates is
    /// up to the caller.
    pub fn add_child(&mut self, name: impl Into<String>, node: Node) {
        self.children.insert(name.into(), node);
        self.timestamps.touch();
    }

    pub fn has_child(&self, name: &str) -> bool {
        self.children.contains_key(name)
    }

    pub fn get_child(&self, name: &str) -> Option<&Node> {
        self.children.get(name)
    }

    pub fn get_child_mut(&mut self, name: &str) -> Option<&mut Node> {
        self.children.get_mut(name)
    }

    pub fn remove_child(&mut self, name: &str) -> bool {
        self.children.remove(name).is_some()
    }

    /// Returns the child called `name`, first attaching an empty directory
    /// under that name if there is none.
    pub fn child_or_insert_directory(&mut self, name: &str) -> &mut Node {
        let mut inserted = false;
        let child = self
            .children
            .entry(name.to_string())
            .or_insert_with(|| {
                inserted = true;
                Node::Directory(Directory::new(name))
            });
        if inserted {
            self.timestamps.touch();
        }
        child
    }

    pub fn children(&self) -> impl Iterator<Item = &Node> {
        self.children.values()
    }

    pub fn child_names(&self) -> impl Iterator<Item = &str> {
        self.children.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }
}

/// A leaf node holding opaque text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct File {
    name: String,
    content: Option<String>,
    extension: String,
    timestamps: Timestamps,
}

impl File {
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        let extension = extract_extension(&name);
        Self {
            name,
            content: None,
            extension,
            timestamps: Timestamps::now(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn extension(&self) -> &str {
        &self.extension
    }

    pub fn timestamps(&self) -> &Timestamps {
        &self.timestamps
    }

    /// `None` until the file is first written.
    pub fn content(&self) -> Option<&str> {
        self.content.as_deref()
    }

    pub fn set_content(&mut self, content: impl Into<String>) {
        self.content = Some(content.into());
        self.timestamps.touch();
    }
}

// Text after the last dot, empty when there is no dot or the name starts with it.
fn extract_extension(name: &str) -> String {
    match name.rfind('.') {
        Some(index) if index > 0 => name[index + 1..].to_string(),
        _ => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::*;
    use std::thread;
    use std::time::Duration;

    #[rstest]
    #[case("notes.txt", "txt")]
    #[case("archive.tar.gz", "gz")]
    #[case(".bashrc", "")]
    #[case("trailing.", "")]
    #[case("README", "")]
    fn test_file_extension(#[case] name: &str, #[case] expected: &str) {
        assert_eq!(File::new(name).extension(), expected);
    }

    #[rstest]
    #[case("c.txt", NodeType::File)]
    #[case(".hidden", NodeType::File)]
    #[case("v1.2", NodeType::File)]
    #[case("design", NodeType::Directory)]
    fn test_node_classified_by_name(#[case] name: &str, #[case] expected: NodeType) {
        assert_eq!(Node::from_name(name).node_type(), expected);
    }

    #[test]
    fn test_root_is_directory_named_separator() {
        let root = Node::root();
        assert!(root.is_container());
        assert_eq!(root.name(), "/");
    }

    #[test]
    fn test_add_child_refreshes_modified_time() {
        let mut dir = Directory::new("docs");
        let before = *dir.timestamps();
        thread::sleep(Duration::from_millis(10));

        dir.add_child("a.txt", Node::from_name("a.txt"));

        assert!(dir.has_child("a.txt"));
        assert!(dir.timestamps().modified_at() > before.modified_at());
        assert_eq!(dir.timestamps().created_at(), before.created_at());
    }

    #[test]
    fn test_child_or_insert_directory_touches_only_on_insert() {
        let mut dir = Directory::new("/");
        let before = *dir.timestamps();
        thread::sleep(Duration::from_millis(10));

        dir.child_or_insert_directory("a");
        let after_insert = *dir.timestamps();
        thread::sleep(Duration::from_millis(10));
        dir.child_or_insert_directory("a");

        assert!(after_insert.modified_at() > before.modified_at());
        assert_eq!(*dir.timestamps(), after_insert);
    }

    #[test]
    fn test_set_content_refreshes_modified_time() {
        let mut file = File::new("a.txt");
        let before = *file.timestamps();
        thread::sleep(Duration::from_millis(10));

        file.set_content("hello");

        assert!(file.timestamps().modified_at() > before.modified_at());
        assert_eq!(file.timestamps().created_at(), before.created_at());
    }

    #[test]
    fn test_add_child_overwrites_existing_entry() {
        let mut dir = Directory::new("docs");
        dir.add_child("a", Node::Directory(Directory::new("a")));
        dir.add_child("a", Node::File(File::new("a")));

        assert_eq!(dir.len(), 1);
        assert!(dir.get_child("a").is_some_and(Node::is_file));
    }

    #[test]
    fn test_remove_child_reports_presence() {
        let mut node = Node::root();
        if let Some(dir) = node.as_directory_mut() {
            dir.add_child("a", Node::from_name("a"));
        }

        assert!(node.remove_child("a"));
        assert!(!node.remove_child("a"));
        assert!(!node.has_child("a"));
    }

    #[test]
    fn test_file_has_no_children() {
        let mut file = Node::from_name("a.txt");

        assert!(!file.is_container());
        assert!(!file.has_child("anything"));
        assert!(file.get_child("anything").is_none());
        assert!(!file.remove_child("anything"));
    }

    #[test]
    fn test_child_or_insert_directory_reuses_existing() {
        let mut dir = Directory::new("/");
        dir.child_or_insert_directory("a");
        dir.child_or_insert_directory("a");

        assert_eq!(dir.len(), 1);
        assert!(dir.get_child("a").is_some_and(Node::is_directory));
    }

    #[test]
    fn test_file_content_starts_absent() {
        let mut file = File::new("a.txt");
        assert_eq!(file.content(), None);

        file.set_content("hello");
        assert_eq!(file.content(), Some("hello"));
    }

    #[test]
    fn test_display_indents_and_counts_in_insertion_order() {
        let mut inner = Directory::new("b");
        inner.add_child("z.txt", Node::from_name("z.txt"));
        inner.add_child("a.md", Node::from_name("a.md"));

        let mut root = Directory::new("/");
        root.add_child("b", Node::Directory(inner));
        root.add_child("empty", Node::from_name("empty"));

        let mut out = String::new();
        Node::Directory(root).display(0, &mut out).unwrap();

        let expected = "\
📁 / (2 items)
  📁 b (2 items)
    📄 z.txt
    📄 a.md
  📁 empty (0 items)
";
        assert_eq!(out, expected);
    }
}
