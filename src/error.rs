use thiserror::Error;

/// Errors surfaced by [`AvlTree`](crate::AvlTree) operations.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum AvlError {
    /// `remove` was asked for a key that no node compares equal to.
    #[error("key not found in tree")]
    NotFound,
}

pub type Result<T> = std::result::Result<T, AvlError>;
