use anchor_lang::prelude::*;
use solana_program::keccak;

use crate::constants::{MERKLE_DEPTH, ROOT_HISTORY_SIZE};
use crate::errors::SnowrailError;

/// Domain separation prefixes.
/// Prevents second pre-image attacks by distinguishing leaves from internal nodes.
const LEAF_PREFIX: [u8; 1] = [0x00];
const NODE_PREFIX: [u8; 1] = [0x01];

/// Value of an unoccupied leaf slot.
pub const EMPTY_LEAF: [u8; 32] = [0u8; 32];

/// Hash a leaf node with domain separation.
/// leaf_hash = keccak256(0x00 || data)
pub fn hash_leaf(data: &[u8]) -> [u8; 32] {
    let mut input = Vec::with_capacity(1 + data.len());
    input.extend_from_slice(&LEAF_PREFIX);
    input.extend_from_slice(data);
    keccak::hash(&input).to_bytes()
}

/// Hash two child nodes into a parent node with domain separation.
/// node_hash = keccak256(0x01 || left || right)
pub fn hash_nodes(left: &[u8; 32], right: &[u8; 32]) -> [u8; 32] {
    keccak::hashv(&[&NODE_PREFIX, left, right]).to_bytes()
}

/// Empty-subtree hash for every level: zeros[0] is an empty leaf,
/// zeros[i + 1] = hash_nodes(zeros[i], zeros[i]).
pub fn zero_hashes<const D: usize>() -> [[u8; 32]; D] {
    let mut zeros = [EMPTY_LEAF; D];
    for level in 1..D {
        zeros[level] = hash_nodes(&zeros[level - 1], &zeros[level - 1]);
    }
    zeros
}

/// Walk one leaf from the bottom level to the root, updating `filled_subtrees`
/// along the way. Returns the new root.
///
/// `filled_subtrees` and `zeros` must have the same length (the tree height).
pub fn insert_leaf(
    filled_subtrees: &mut [[u8; 32]],
    zeros: &[[u8; 32]],
    index: u32,
    leaf: [u8; 32],
) -> [u8; 32] {
    let mut current_index = index;
    let mut current = leaf;

    for (level, zero) in zeros.iter().enumerate() {
        let (left, right) = if current_index % 2 == 0 {
            filled_subtrees[level] = current;
            (current, *zero)
        } else {
            (filled_subtrees[level], current)
        };
        current = hash_nodes(&left, &right);
        current_index /= 2;
    }

    current
}

/// Append-only commitment tree of height `MERKLE_DEPTH`. Only the right-most
/// filled node per level is stored, so each insertion is O(depth).
/// Lives inside the zero-copy pool account; padding keeps the layout explicit.
#[zero_copy(unsafe)]
#[repr(C)]
pub struct IncrementalMerkleTree {
    pub filled_subtrees: [[u8; 32]; MERKLE_DEPTH],
    pub zeros: [[u8; 32]; MERKLE_DEPTH],
    pub current_root: [u8; 32],
    pub next_index: u32,
    pub _padding: [u8; 4],
}

impl IncrementalMerkleTree {
    pub const SIZE: usize = 32 * MERKLE_DEPTH + // filled_subtrees
        32 * MERKLE_DEPTH +                     // zeros
        32 +                                    // current_root
        4 +                                     // next_index
        4;                                      // padding

    pub const CAPACITY: u64 = 1u64 << MERKLE_DEPTH;

    pub fn new() -> Self {
        let zeros = zero_hashes::<MERKLE_DEPTH>();
        let top = zeros[MERKLE_DEPTH - 1];
        Self {
            filled_subtrees: zeros,
            zeros,
            current_root: hash_nodes(&top, &top),
            next_index: 0,
            _padding: [0u8; 4],
        }
    }

    /// Reset to the empty tree without building a temporary on the stack.
    pub fn reset(&mut self) {
        self.zeros[0] = EMPTY_LEAF;
        for level in 1..MERKLE_DEPTH {
            self.zeros[level] = hash_nodes(&self.zeros[level - 1], &self.zeros[level - 1]);
        }
        self.filled_subtrees = self.zeros;
        let top = self.zeros[MERKLE_DEPTH - 1];
        self.current_root = hash_nodes(&top, &top);
        self.next_index = 0;
    }

    pub fn is_full(&self) -> bool {
        u64::from(self.next_index) >= Self::CAPACITY
    }

    /// Insert a leaf, returning `(leaf_index, new_root)`.
    pub fn insert(&mut self, leaf: [u8; 32]) -> Result<(u32, [u8; 32])> {
        require!(!self.is_full(), SnowrailError::MerkleTreeFull);

        let index = self.next_index;
        let root = insert_leaf(&mut self.filled_subtrees, &self.zeros, index, leaf);
        self.current_root = root;
        self.next_index = index.checked_add(1).ok_or(SnowrailError::MathOverflow)?;

        Ok((index, root))
    }
}

impl Default for IncrementalMerkleTree {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixed-capacity ring of the most recent roots. A root is withdrawable
/// against only while it remains inside this window.
#[zero_copy(unsafe)]
#[repr(C)]
pub struct RootHistory {
    pub roots: [[u8; 32]; ROOT_HISTORY_SIZE],
    /// Slot the next root is written to.
    pub cursor: u8,
    /// Number of populated slots, saturating at ROOT_HISTORY_SIZE.
    pub len: u8,
    pub _padding: [u8; 6],
}

impl RootHistory {
    pub const SIZE: usize = 32 * ROOT_HISTORY_SIZE + 1 + 1 + 6;

    pub fn new() -> Self {
        Self {
            roots: [[0u8; 32]; ROOT_HISTORY_SIZE],
            cursor: 0,
            len: 0,
            _padding: [0u8; 6],
        }
    }

    pub fn reset(&mut self) {
        self.roots.fill([0u8; 32]);
        self.cursor = 0;
        self.len = 0;
    }

    /// Record a new root, overwriting the oldest once the window is full.
    pub fn push(&mut self, root: [u8; 32]) {
        let slot = self.cursor as usize;
        self.roots[slot] = root;
        self.cursor = ((slot + 1) % ROOT_HISTORY_SIZE) as u8;
        if (self.len as usize) < ROOT_HISTORY_SIZE {
            self.len += 1;
        }
    }

    pub fn contains(&self, root: &[u8; 32]) -> bool {
        self.roots[..self.len as usize].iter().any(|known| known == root)
    }

    /// Most recently pushed root, if any.
    pub fn latest(&self) -> Option<[u8; 32]> {
        if self.len == 0 {
            return None;
        }
        let slot = (self.cursor as usize + ROOT_HISTORY_SIZE - 1) % ROOT_HISTORY_SIZE;
        Some(self.roots[slot])
    }

    /// Roots from oldest to newest.
    pub fn window(&self) -> Vec<[u8; 32]> {
        let len = self.len as usize;
        let start = (self.cursor as usize + ROOT_HISTORY_SIZE - len) % ROOT_HISTORY_SIZE;
        (0..len)
            .map(|offset| self.roots[(start + offset) % ROOT_HISTORY_SIZE])
            .collect()
    }
}

impl Default for RootHistory {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Walks a sibling path from `leaf` up to a root; roots built by
    /// `insert_leaf` are checked against it.
    fn verify_proof(proof: &[[u8; 32]], root: &[u8; 32], leaf: &[u8; 32], index: u32) -> bool {
        let mut computed = *leaf;
        let mut idx = index;

        for sibling in proof.iter() {
            if idx % 2 == 0 {
                computed = hash_nodes(&computed, sibling);
            } else {
                computed = hash_nodes(sibling, &computed);
            }
            idx /= 2;
        }

        computed == *root
    }

    fn leaf(n: u8) -> [u8; 32] {
        hash_leaf(&[n])
    }

    #[test]
    fn test_layout_has_no_hidden_padding() {
        assert_eq!(
            std::mem::size_of::<IncrementalMerkleTree>(),
            IncrementalMerkleTree::SIZE
        );
        assert_eq!(std::mem::size_of::<RootHistory>(), RootHistory::SIZE);
    }

    #[test]
    fn test_leaf_hash_domain_separation() {
        let data = b"test_data";
        let leaf = hash_leaf(data);
        let raw = keccak::hash(data).to_bytes();
        assert_ne!(leaf, raw);
    }

    #[test]
    fn test_node_hash_domain_separation() {
        let left = [1u8; 32];
        let right = [2u8; 32];
        let node = hash_nodes(&left, &right);
        let mut raw_input = Vec::new();
        raw_input.extend_from_slice(&left);
        raw_input.extend_from_slice(&right);
        let raw = keccak::hash(&raw_input).to_bytes();
        assert_ne!(node, raw);
    }

    #[test]
    fn test_verify_two_leaf_tree() {
        let leaf0 = leaf(0);
        let leaf1 = leaf(1);
        let root = hash_nodes(&leaf0, &leaf1);

        assert!(verify_proof(&[leaf1], &root, &leaf0, 0));
        assert!(verify_proof(&[leaf0], &root, &leaf1, 1));
        assert!(!verify_proof(&[[0u8; 32]], &root, &leaf0, 0));
    }

    #[test]
    fn test_incremental_matches_full_tree() {
        // Height 2: four leaves, built level by level for comparison.
        let zeros = zero_hashes::<2>();
        let mut filled = zeros;
        let leaves = [leaf(0), leaf(1), leaf(2)];

        let mut root = [0u8; 32];
        for (i, l) in leaves.iter().enumerate() {
            root = insert_leaf(&mut filled, &zeros, i as u32, *l);
        }

        let node01 = hash_nodes(&leaves[0], &leaves[1]);
        let node23 = hash_nodes(&leaves[2], &EMPTY_LEAF);
        assert_eq!(root, hash_nodes(&node01, &node23));

        // The third leaf proves against the incremental root.
        assert!(verify_proof(&[EMPTY_LEAF, node01], &root, &leaves[2], 2));
    }

    #[test]
    fn test_first_insert_proves_against_zero_path() {
        let mut tree = IncrementalMerkleTree::new();
        let (index, root) = tree.insert(leaf(7)).unwrap();

        assert_eq!(index, 0);
        assert_eq!(tree.next_index, 1);
        assert_eq!(tree.current_root, root);
        assert!(verify_proof(&tree.zeros, &root, &leaf(7), 0));
    }

    #[test]
    fn test_reset_matches_new() {
        let mut tree = IncrementalMerkleTree::new();
        tree.insert(leaf(1)).unwrap();
        tree.reset();

        let fresh = IncrementalMerkleTree::new();
        assert_eq!(tree.next_index, 0);
        assert_eq!(tree.current_root, fresh.current_root);
        assert_eq!(tree.filled_subtrees, fresh.filled_subtrees);
    }

    #[test]
    fn test_each_insert_produces_new_root() {
        let mut tree = IncrementalMerkleTree::new();
        let empty_root = tree.current_root;
        let (_, r0) = tree.insert(leaf(1)).unwrap();
        let (i1, r1) = tree.insert(leaf(2)).unwrap();

        assert_eq!(i1, 1);
        assert_ne!(r0, empty_root);
        assert_ne!(r0, r1);
    }

    #[test]
    fn test_full_tree_rejects_insert() {
        let mut tree = IncrementalMerkleTree::new();
        tree.next_index = IncrementalMerkleTree::CAPACITY as u32;
        let before = tree.current_root;

        assert!(tree.insert(leaf(1)).is_err());
        assert_eq!(tree.current_root, before);
    }

    #[test]
    fn test_root_history_window() {
        let mut history = RootHistory::new();
        assert!(history.latest().is_none());
        assert!(!history.contains(&[0u8; 32]));

        let roots: Vec<[u8; 32]> = (0..=ROOT_HISTORY_SIZE as u8).map(leaf).collect();
        for root in &roots {
            history.push(*root);
        }

        // R + 1 pushes: the first root has aged out, the last R remain.
        assert!(!history.contains(&roots[0]));
        for root in &roots[1..] {
            assert!(history.contains(root));
        }
        assert_eq!(history.latest(), roots.last().copied());
        assert_eq!(history.window(), roots[1..].to_vec());
    }

    #[test]
    fn test_root_history_partial_window_order() {
        let mut history = RootHistory::new();
        history.push(leaf(1));
        history.push(leaf(2));

        assert_eq!(history.len, 2);
        assert_eq!(history.window(), vec![leaf(1), leaf(2)]);
    }
}
