use derive_more::Display;
use snafu::Snafu;

/// The two shapes a node can take.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum NodeType {
    #[display("directory")]
    Directory,
    #[display("file")]
    File,
}

/// Failure outcomes of namespace operations.
///
/// These are expected, recoverable results: every operation on
/// [`Namespace`](super::Namespace) returns one of them instead of panicking.
#[derive(Debug, Clone, PartialEq, Eq, Snafu)]
#[snafu(visibility(pub(super)))]
pub enum NamespaceError {
    #[snafu(display("Invalid path '{}'", path))]
    InvalidPath { path: String },
    #[snafu(display("No such path '{}'", path))]
    NotFound { path: String },
    #[snafu(display("'{}' is not a {}", path, expected))]
    TypeConflict { path: String, expected: NodeType },
    #[snafu(display("'{}' already exists", path))]
    AlreadyExists { path: String },
    #[snafu(display("The root directory cannot be deleted"))]
    RootProtected,
}

/// Payload-free discriminant of [`NamespaceError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidPath,
    NotFound,
    TypeConflict,
    AlreadyExists,
    RootProtected,
}

impl NamespaceError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            NamespaceError::InvalidPath { .. } => ErrorKind::InvalidPath,
            NamespaceError::NotFound { .. } => ErrorKind::NotFound,
            NamespaceError::TypeConflict { .. } => ErrorKind::TypeConflict,
            NamespaceError::AlreadyExists { .. } => ErrorKind::AlreadyExists,
            NamespaceError::RootProtected => ErrorKind::RootProtected,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_names_path_and_expected_type() {
        let err = NamespaceError::TypeConflict {
            path: "/x.txt".to_string(),
            expected: NodeType::Directory,
        };

        assert_eq!(err.to_string(), "'/x.txt' is not a directory");
        assert_eq!(err.kind(), ErrorKind::TypeConflict);
    }

    #[test]
    fn test_root_protected_kind() {
        assert_eq!(NamespaceError::RootProtected.kind(), ErrorKind::RootProtected);
        assert!(
            NamespaceError::RootProtected
                .to_string()
                .contains("root directory")
        );
    }
}
