use anchor_lang::prelude::*;

use crate::utils::hashes_equal;

/// Domain separation prefixes. A leaf can never be replayed as an internal
/// node because the two are hashed under different prefixes.
const LEAF_PREFIX: [u8; 1] = [0x00];
const NODE_PREFIX: [u8; 1] = [0x01];

/// How a running hash and its sibling are ordered before hashing. Fixed per
/// presale round and stored next to the root, since the verifier has to use
/// the same rule as whoever built the tree.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq, InitSpace)]
pub enum SiblingOrder {
    /// The lexicographically smaller hash goes first; the leaf index is ignored.
    Sorted,
    /// Bit `k` of the leaf index picks the side at level `k`
    /// (0 = running hash on the left).
    LeafIndex,
}

impl SiblingOrder {
    fn combine(self, current: &[u8; 32], sibling: &[u8; 32], current_is_right: bool) -> [u8; 32] {
        match self {
            SiblingOrder::Sorted => {
                if current <= sibling {
                    hash_nodes(current, sibling)
                } else {
                    hash_nodes(sibling, current)
                }
            }
            SiblingOrder::LeafIndex => {
                if current_is_right {
                    hash_nodes(sibling, current)
                } else {
                    hash_nodes(current, sibling)
                }
            }
        }
    }
}

/// leaf_hash = blake3(0x00 || data)
pub fn hash_leaf(data: &[u8]) -> [u8; 32] {
    let mut hasher = blake3::Hasher::new();
    hasher.update(&LEAF_PREFIX);
    hasher.update(data);
    *hasher.finalize().as_bytes()
}

/// node_hash = blake3(0x01 || left || right)
pub fn hash_nodes(left: &[u8; 32], right: &[u8; 32]) -> [u8; 32] {
    let mut hasher = blake3::Hasher::new();
    hasher.update(&NODE_PREFIX);
    hasher.update(left);
    hasher.update(right);
    *hasher.finalize().as_bytes()
}

/// Walks the proof bottom-up from `leaf`. Every sibling is consumed, there
/// is no early exit.
pub fn compute_root(proof: &[[u8; 32]], leaf: &[u8; 32], index: u32, order: SiblingOrder) -> [u8; 32] {
    let mut computed = *leaf;
    let mut idx = index;

    for sibling in proof.iter() {
        computed = order.combine(&computed, sibling, idx % 2 == 1);
        idx /= 2;
    }

    computed
}

/// Verify a Merkle proof against a known root.
///
/// # Arguments
/// * `proof` - The sibling hashes along the path from leaf to root
/// * `root` - The expected Merkle root
/// * `leaf` - The leaf hash to verify
/// * `index` - The leaf's position in the tree, only read under [`SiblingOrder::LeafIndex`]
/// * `order` - The pairing rule the tree was built with
pub fn verify_proof(
    proof: &[[u8; 32]],
    root: &[u8; 32],
    leaf: &[u8; 32],
    index: u32,
    order: SiblingOrder,
) -> bool {
    hashes_equal(&compute_root(proof, leaf, index, order), root)
}

fn next_level(level: &[[u8; 32]], order: SiblingOrder) -> Vec<[u8; 32]> {
    level
        .chunks(2)
        .map(|pair| {
            // An odd node is paired with itself
            let right = pair.get(1).unwrap_or(&pair[0]);
            order.combine(&pair[0], right, false)
        })
        .collect()
}

/// Root of the tree over `leaves`, or `None` for an empty list.
/// Used off-chain to publish a presale round.
pub fn merkle_root(leaves: &[[u8; 32]], order: SiblingOrder) -> Option<[u8; 32]> {
    let mut level = leaves.to_vec();
    if level.is_empty() {
        return None;
    }
    while level.len() > 1 {
        level = next_level(&level, order);
    }
    Some(level[0])
}

/// Sibling path for the leaf at `index`, or `None` if it is out of range.
pub fn merkle_proof(leaves: &[[u8; 32]], index: usize, order: SiblingOrder) -> Option<Vec<[u8; 32]>> {
    if index >= leaves.len() {
        return None;
    }

    let mut proof = Vec::new();
    let mut level = leaves.to_vec();
    let mut idx = index;
    while level.len() > 1 {
        let sibling = level.get(idx ^ 1).unwrap_or(&level[idx]);
        proof.push(*sibling);
        level = next_level(&level, order);
        idx /= 2;
    }
    Some(proof)
}
