use avl_tree::{AvlTree, Node};
use rand::prelude::*;
use std::error::Error;
use std::time::Instant;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

// Constants for i32 keys
const I32_TREE_SIZE: i32 = 100_000;
const I32_REMOVALS: usize = 50_000;

// Constants for [u8; 16] keys
const BYTES_TREE_SIZE: i32 = 10_000;

const SEED: u64 = 54783;

fn generate_random_bytes(rng: &mut StdRng) -> [u8; 16] {
    let mut bytes = [0u8; 16];
    rng.fill(&mut bytes);
    bytes
}

// Walks the whole tree and returns (height, node count), or a description of
// the first broken invariant.
fn audit<K: Ord>(
    node: Option<&Node<K>>,
    lo: Option<&K>,
    hi: Option<&K>,
) -> Result<(i32, usize), String> {
    let Some(n) = node else {
        return Ok((-1, 0));
    };
    if lo.is_some_and(|lo| lo >= n.key()) || hi.is_some_and(|hi| hi <= n.key()) {
        return Err("keys out of order".into());
    }
    let (lh, lc) = audit(n.left(), lo, Some(n.key()))?;
    let (rh, rc) = audit(n.right(), Some(n.key()), hi)?;
    if n.height() != 1 + lh.max(rh) || n.balance_factor() != lh - rh {
        return Err(format!("stale metadata at height {}", n.height()));
    }
    if n.balance_factor().abs() > 1 {
        return Err(format!("balance factor {}", n.balance_factor()));
    }
    Ok((n.height(), lc + rc + 1))
}

fn verify<K: Ord>(label: &str, tree: &AvlTree<K>) -> Result<(), Box<dyn Error>> {
    let (height, count) = audit(tree.root(), None, None).inspect_err(|e| {
        error!(label, "invariant violated: {e}");
    })?;
    if count != tree.size() {
        error!(label, count, size = tree.size(), "size mismatch");
        return Err(format!("{label}: size {} but {count} nodes", tree.size()).into());
    }
    let bound = 1.44 * ((count + 2) as f64).log2();
    info!(label, size = count, height, bound, "tree verified");
    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!("*** AVL tree stress run ***");

    // Ascending keys, the worst case for an unbalanced BST
    let mut tree_seq = AvlTree::new();
    let start = Instant::now();
    for key in 0..I32_TREE_SIZE {
        tree_seq.insert(key);
    }
    info!(elapsed = ?start.elapsed(), "ascending inserts (i32 keys)");
    verify("ascending", &tree_seq)?;

    // Shuffled i32 keys
    let mut tree_i32 = AvlTree::new();
    let mut rng_i32 = StdRng::seed_from_u64(SEED);
    let mut keys_i32: Vec<i32> = (0..I32_TREE_SIZE).collect();
    keys_i32.shuffle(&mut rng_i32);

    let start = Instant::now();
    for &key in &keys_i32 {
        tree_i32.insert(key);
    }
    info!(elapsed = ?start.elapsed(), "shuffled inserts (i32 keys)");
    verify("shuffled", &tree_i32)?;

    // Re-inserting is a no-op
    for &key in keys_i32.iter().take(1_000) {
        tree_i32.insert(key);
    }
    verify("duplicates", &tree_i32)?;

    keys_i32.shuffle(&mut rng_i32);
    let start = Instant::now();
    for key in keys_i32.iter().take(I32_REMOVALS) {
        tree_i32.remove(key)?;
    }
    info!(elapsed = ?start.elapsed(), count = I32_REMOVALS, "random removals (i32 keys)");
    verify("half removed", &tree_i32)?;

    let misses = (I32_TREE_SIZE..I32_TREE_SIZE + 1_000)
        .filter(|key| tree_i32.remove(key).is_err())
        .count();
    info!(misses, "removals of absent keys");

    for key in keys_i32.iter().skip(I32_REMOVALS) {
        tree_i32.remove(key)?;
    }
    verify("drained", &tree_i32)?;
    if !tree_i32.is_empty() {
        return Err("tree not empty after removing every key".into());
    }

    // Random [u8; 16] keys
    let mut tree_bytes = AvlTree::new();
    let mut rng_bytes = StdRng::seed_from_u64(SEED);
    let keys_bytes: Vec<[u8; 16]> = (0..BYTES_TREE_SIZE)
        .map(|_| generate_random_bytes(&mut rng_bytes))
        .collect();

    let start = Instant::now();
    for &key in &keys_bytes {
        tree_bytes.insert(key);
    }
    info!(elapsed = ?start.elapsed(), "random inserts ([u8; 16] keys)");
    verify("bytes", &tree_bytes)?;

    let start = Instant::now();
    for key in keys_bytes.iter().rev() {
        // A colliding key was only stored once.
        if tree_bytes.remove(key).is_err() {
            info!("duplicate [u8; 16] key skipped");
        }
    }
    info!(elapsed = ?start.elapsed(), "reverse-order removals ([u8; 16] keys)");
    verify("bytes drained", &tree_bytes)?;

    Ok(())
}
