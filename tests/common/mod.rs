use avl_tree::{AvlTree, Node};
use std::fmt::Debug;

/// Keys in order, collected through the structural accessors.
#[allow(dead_code)]
pub fn in_order<K: Clone>(tree: &AvlTree<K>) -> Vec<K> {
    fn walk<K: Clone>(node: Option<&Node<K>>, out: &mut Vec<K>) {
        if let Some(n) = node {
            walk(n.left(), out);
            out.push(n.key().clone());
            walk(n.right(), out);
        }
    }

    let mut out = Vec::with_capacity(tree.size());
    walk(tree.root(), &mut out);
    out
}

/// Tree height, -1 for an empty tree.
#[allow(dead_code)]
pub fn height<K>(tree: &AvlTree<K>) -> i32 {
    tree.root().map_or(-1, |n| n.height())
}

/// Upper bound on the height of an AVL tree holding `size` keys.
#[allow(dead_code)]
pub fn avl_height_bound(size: usize) -> f64 {
    1.44 * ((size + 2) as f64).log2()
}

/// Checks ordering, balance, cached metadata and the size counter.
pub fn check_invariants<K: Ord + Debug>(tree: &AvlTree<K>) {
    // Returns (height, node count) of the subtree.
    fn check<'a, K: Ord + Debug>(
        node: Option<&'a Node<K>>,
        lo: Option<&'a K>,
        hi: Option<&'a K>,
    ) -> (i32, usize) {
        let Some(n) = node else {
            return (-1, 0);
        };
        if let Some(lo) = lo {
            assert!(lo < n.key(), "{:?} not above {:?}", n.key(), lo);
        }
        if let Some(hi) = hi {
            assert!(n.key() < hi, "{:?} not below {:?}", n.key(), hi);
        }

        let (lh, lc) = check(n.left(), lo, Some(n.key()));
        let (rh, rc) = check(n.right(), Some(n.key()), hi);
        assert_eq!(n.height(), 1 + lh.max(rh), "stale height at {:?}", n.key());
        assert_eq!(n.balance_factor(), lh - rh, "stale bf at {:?}", n.key());
        assert!(
            n.balance_factor().abs() <= 1,
            "unbalanced at {:?}: {}",
            n.key(),
            n.balance_factor()
        );
        (n.height(), lc + rc + 1)
    }

    let (_, count) = check(tree.root(), None, None);
    assert_eq!(tree.size(), count);
    assert_eq!(tree.is_empty(), count == 0);
}
