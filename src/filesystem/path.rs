//! Stateless path handling: validation, splitting and resolution against a
//! root node.
//!
//! Paths are absolute and `/`-delimited. Runs of separators are treated as
//! one; no other normalization (`.`, `..`) takes place.

use snafu::ensure;
use tracing::debug;

use super::error::{InvalidPathSnafu, NamespaceError, NotFoundSnafu};
use super::node::Node;

pub const SEPARATOR: &str = "/";

/// The only syntactic gate: non-empty and starting with the separator.
pub fn is_valid_path(path: &str) -> bool {
    !path.is_empty() && path.starts_with(SEPARATOR)
}

/// Splits on the separator, dropping empty components.
pub fn split_components(path: &str) -> Vec<&str> {
    path.split(SEPARATOR)
        .filter(|component| !component.is_empty())
        .collect()
}

/// Everything before the last separator, or the root path when the last
/// separator is the leading one (or absent).
///
/// Computed from the string alone; nodes keep no parent reference.
pub fn parent_path(path: &str) -> &str {
    match path.rfind(SEPARATOR) {
        Some(index) if index > 0 => &path[..index],
        _ => SEPARATOR,
    }
}

/// Everything after the last separator. Empty for a path ending in `/`.
pub fn final_component(path: &str) -> &str {
    path.rfind(SEPARATOR)
        .map_or(path, |index| &path[index + SEPARATOR.len()..])
}

/// Walks `root` through the components of `path`.
///
/// Fails with `NotFound` at the first component that is missing, including
/// any component that would have to be looked up inside a file.
pub fn resolve<'a>(root: &'a Node, path: &str) -> Result<&'a Node, NamespaceError> {
    ensure!(is_valid_path(path), InvalidPathSnafu { path });
    if path == SEPARATOR {
        return Ok(root);
    }

    let mut current = root;
    for component in split_components(path) {
        current = match current.get_child(component) {
            Some(child) => child,
            None => {
                debug!("Component '{component}' of '{path}' does not exist");
                return NotFoundSnafu { path }.fail();
            }
        };
    }
    Ok(current)
}

/// Mutable counterpart of [`resolve`].
pub fn resolve_mut<'a>(root: &'a mut Node, path: &str) -> Result<&'a mut Node, NamespaceError> {
    ensure!(is_valid_path(path), InvalidPathSnafu { path });
    if path == SEPARATOR {
        return Ok(root);
    }

    let mut current = root;
    for component in split_components(path) {
        current = match current.get_child_mut(component) {
            Some(child) => child,
            None => {
                debug!("Component '{component}' of '{path}' does not exist");
                return NotFoundSnafu { path }.fail();
            }
        };
    }
    Ok(current)
}
