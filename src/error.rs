use thiserror::Error;

/// Errors raised while compiling a glob into a [`crate::Pattern`].
///
/// These can only occur at compile time: once a [`crate::Pattern`] exists it can be matched
/// against any directory or file name without failing.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PatternError {
    /// The glob contained a `..` element.
    ///
    /// Ant globs cannot reference a parent directory: there is no filesystem notion of "go up"
    /// once the walker has already descended into a subtree.
    #[error("glob '{glob}' contains a '..' element, which is not allowed")]
    ParentDirNotAllowed {
        /// The original, unmodified glob string.
        glob: String,
    },

    /// The glob normalized down to nothing at all (e.g. an empty string).
    #[error("glob '{glob}' is empty after normalization")]
    EmptyGlob {
        /// The original, unmodified glob string.
        glob: String,
    },
}
