//! An AVL tree that keeps its height logarithmic by rebalancing on every
//! insert and remove.
//!
//! The tree stores unique keys. Structure can be inspected through
//! [`AvlTree::root`], which exposes each node's key, children, cached height
//! and balance factor.
//!
//! # Example
//!
//! ```
//! use avl_tree::{AvlError, AvlTree};
//!
//! let mut tree = AvlTree::new();
//! for key in [1, 2, 3] {
//!     tree.insert(key);
//! }
//!
//! // Ascending inserts rotate 2 up to the root.
//! let root = tree.root().unwrap();
//! assert_eq!(*root.key(), 2);
//! assert_eq!(root.height(), 1);
//! assert_eq!(root.balance_factor(), 0);
//!
//! assert_eq!(tree.remove(&2), Ok(2));
//! assert_eq!(tree.remove(&2), Err(AvlError::NotFound));
//! assert_eq!(tree.size(), 2);
//! ```

mod avl;
mod error;

pub use avl::{AvlTree, Node};
pub use error::{AvlError, Result};
