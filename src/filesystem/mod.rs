//! In-memory hierarchical namespace.
//!
//! This module provides a tree of directories and files addressed by
//! absolute, slash-delimited paths, with creation (`mkdir -p` style),
//! deletion, content access and a human-readable tree dump.

mod error;
mod namespace;
mod node;
pub mod path;

pub use error::{ErrorKind, NamespaceError, NodeType};
pub use namespace::{Namespace, NodeMetadata};
pub use node::{Directory, File, INDENT_WIDTH, Node, Timestamps, TreeStyle};
