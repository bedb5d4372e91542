use thiserror::Error;

/// Per-renderer reduction failures.
///
/// A failed reduction never leaves partially-modified output: all validation
/// runs before any array is rewritten.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReduceError {
    #[error("bone '{0}' is not part of this renderer's bone list")]
    BoneNotFound(String),

    #[error("merge target equals the bone being removed: '{0}'")]
    AmbiguousMergeTarget(String),
}

/// Host UIs report failures as plain strings.
impl From<ReduceError> for String {
    fn from(error: ReduceError) -> Self {
        error.to_string()
    }
}
