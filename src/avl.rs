use std::cmp::{Ord, Ordering, max};
use std::mem;

use tracing::{debug, trace};

use crate::error::{AvlError, Result};

type Link<K> = Option<Box<Node<K>>>;

/// Node in the AVL tree.
///
/// Nodes are only created and restructured by [`AvlTree`]; from the outside
/// they are read-only.
#[derive(Debug)]
pub struct Node<K> {
    key: K,
    left: Link<K>,
    right: Link<K>,
    height: i32,
    balance_factor: i32,
}

/// AVL tree of unique keys.
#[derive(Debug)]
pub struct AvlTree<K> {
    root: Link<K>,
    size: usize,
}

impl<K> Node<K> {
    fn leaf(key: K) -> Self {
        Node {
            key,
            left: None,
            right: None,
            height: 0,
            balance_factor: 0,
        }
    }

    pub fn key(&self) -> &K {
        &self.key
    }

    pub fn left(&self) -> Option<&Node<K>> {
        self.left.as_deref()
    }

    pub fn right(&self) -> Option<&Node<K>> {
        self.right.as_deref()
    }

    /// Height of the subtree rooted here. A leaf has height 0.
    pub fn height(&self) -> i32 {
        self.height
    }

    /// Left subtree height minus right subtree height.
    pub fn balance_factor(&self) -> i32 {
        self.balance_factor
    }

    // Absent subtrees count as -1.
    fn height_of(link: &Link<K>) -> i32 {
        link.as_ref().map_or(-1, |n| n.height)
    }

    /// Recomputes the cached height and balance factor from the children.
    /// Both children must already be up to date.
    fn update_height_and_bf(&mut self) {
        let left = Node::height_of(&self.left);
        let right = Node::height_of(&self.right);
        self.height = 1 + max(left, right);
        self.balance_factor = left - right;
    }
}

impl<K> Default for AvlTree<K> {
    fn default() -> Self {
        AvlTree {
            root: None,
            size: 0,
        }
    }
}

impl<K> AvlTree<K> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of keys stored.
    pub fn size(&self) -> usize {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    pub fn root(&self) -> Option<&Node<K>> {
        self.root.as_deref()
    }

    fn rotate_left(mut node: Box<Node<K>>) -> Box<Node<K>> {
        let Some(mut pivot) = node.right.take() else {
            return node;
        };
        trace!(height = node.height, "rotate left");
        node.right = pivot.left.take();
        node.update_height_and_bf();
        pivot.left = Some(node);
        pivot.update_height_and_bf();
        pivot
    }

    fn rotate_right(mut node: Box<Node<K>>) -> Box<Node<K>> {
        let Some(mut pivot) = node.left.take() else {
            return node;
        };
        trace!(height = node.height, "rotate right");
        node.left = pivot.right.take();
        node.update_height_and_bf();
        pivot.right = Some(node);
        pivot.update_height_and_bf();
        pivot
    }

    /// Restores the AVL property at `node`, assuming both subtrees already
    /// satisfy it. Returns the new root of the subtree.
    fn balance(mut node: Box<Node<K>>) -> Box<Node<K>> {
        node.update_height_and_bf();

        // Right heavy
        if node.balance_factor < -1 {
            if node.right.as_ref().is_some_and(|r| r.balance_factor > 0) {
                trace!("right-left case");
                node.right = node.right.take().map(Self::rotate_right);
            }
            return Self::rotate_left(node);
        }
        // Left heavy
        if node.balance_factor > 1 {
            if node.left.as_ref().is_some_and(|l| l.balance_factor < 0) {
                trace!("left-right case");
                node.left = node.left.take().map(Self::rotate_left);
            }
            return Self::rotate_right(node);
        }

        node
    }

    fn rebalance(link: &mut Link<K>) {
        *link = link.take().map(Self::balance);
    }
}

impl<K: Ord> AvlTree<K> {
    /// Inserts `key`. Inserting a key that is already present leaves the tree
    /// untouched.
    pub fn insert(&mut self, key: K) {
        let mut inserted = false;
        self.root = Some(Self::insert_rec(self.root.take(), key, &mut inserted));
        if inserted {
            self.size += 1;
        }
        debug!(inserted, size = self.size, "insert");
    }

    // Returns the new root of the subtree
    fn insert_rec(node: Link<K>, key: K, inserted: &mut bool) -> Box<Node<K>> {
        let mut node = match node {
            Some(n) => n,
            None => {
                *inserted = true;
                return Box::new(Node::leaf(key));
            }
        };

        match key.cmp(&node.key) {
            Ordering::Less => {
                node.left = Some(Self::insert_rec(node.left.take(), key, inserted));
            }
            Ordering::Greater => {
                node.right = Some(Self::insert_rec(node.right.take(), key, inserted));
            }
            Ordering::Equal => return node,
        }

        Self::balance(node)
    }

    /// Removes the node matching `key` and returns the key it stored.
    ///
    /// A node with two children keeps its place in the tree: it takes over
    /// the key of its in-order successor, and the successor's node is
    /// removed instead.
    ///
    /// # Errors
    ///
    /// [`AvlError::NotFound`] if no key compares equal to `key`. The tree is
    /// left unchanged in that case.
    pub fn remove(&mut self, key: &K) -> Result<K> {
        let removed = Self::remove_rec(&mut self.root, key);
        match &removed {
            Ok(_) => {
                self.size -= 1;
                debug!(size = self.size, "remove");
            }
            Err(_) => debug!(size = self.size, "remove: key not found"),
        }
        removed
    }

    fn remove_rec(link: &mut Link<K>, key: &K) -> Result<K> {
        let Some(node) = link else {
            return Err(AvlError::NotFound);
        };

        let removed = match key.cmp(&node.key) {
            Ordering::Less => Self::remove_rec(&mut node.left, key)?,
            Ordering::Greater => Self::remove_rec(&mut node.right, key)?,
            Ordering::Equal if node.left.is_some() && node.right.is_some() => {
                let successor = Self::remove_min(&mut node.right).ok_or(AvlError::NotFound)?;
                mem::replace(&mut node.key, successor)
            }
            Ordering::Equal => {
                // Zero or one child: splice the child into our slot.
                let mut spliced = node.left.take().or_else(|| node.right.take());
                mem::swap(link, &mut spliced);
                return spliced.map(|n| n.key).ok_or(AvlError::NotFound);
            }
        };

        Self::rebalance(link);
        Ok(removed)
    }

    /// Detaches the leftmost node of the subtree and returns its key,
    /// rebalancing every node on the way back up.
    fn remove_min(link: &mut Link<K>) -> Option<K> {
        let node = link.as_mut()?;
        if node.left.is_some() {
            let min = Self::remove_min(&mut node.left);
            Self::rebalance(link);
            min
        } else {
            let right = node.right.take();
            mem::replace(link, right).map(|n| n.key)
        }
    }
}
