//! Recursive Feistel key table and cascade.
//!
//! The cascade applies one Feistel round at the current width, then recurses
//! independently into both new halves with fresh sub-keys, building a binary
//! tree of narrower rounds instead of one wide round. Nodes are identified
//! by heap index (root 1, children `2*id` and `2*id + 1`), which doubles as
//! a (depth, position) encoding: `id = 2^depth + position`.

use crate::source::UniformSource;

/// Narrowest half-width that still receives its own cascade round.
pub(crate) const MIN_CASCADE_WIDTH: u32 = 2;

/// Per-node key table for the cascade.
///
/// Recursion depth is bounded by `log2` of the starting width, so the table
/// is a flat vector sized once at construction and indexed directly by node
/// id. Immutable after construction.
#[derive(Debug, Clone)]
pub(crate) struct KeyTree {
    keys: Vec<u64>,
}

impl KeyTree {
    /// Draw an independent key for every node, preorder, halving the width
    /// at each depth down to the floor.
    pub(crate) fn build(source: &mut UniformSource, width: u32) -> Self {
        let mut levels = 1u32;
        let mut w = width;
        while w >= MIN_CASCADE_WIDTH {
            w /= 2;
            levels += 1;
        }
        let mut keys = vec![0u64; 1usize << levels];
        fill(source, &mut keys, width, 1);
        Self { keys }
    }

    #[inline]
    fn key(&self, id: usize) -> u64 {
        self.keys[id]
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.keys.len()
    }
}

fn fill(source: &mut UniformSource, keys: &mut [u64], width: u32, id: usize) {
    keys[id] = if width < 64 {
        source.raw64() & ((1u64 << width) - 1)
    } else {
        source.raw64()
    };
    if width >= MIN_CASCADE_WIDTH {
        fill(source, keys, width / 2, 2 * id);
        fill(source, keys, width / 2, 2 * id + 1);
    }
}

/// One cascade pass: a Feistel round at `width` keyed by this node, then,
/// above the floor, independent recursion into the two new halves.
pub(crate) fn cascade(x: u64, id: usize, width: u32, tree: &KeyTree) -> u64 {
    let mask = (1u64 << width) - 1;
    let l = x >> width;
    let r = x & mask;

    let r_next = l ^ r ^ tree.key(id);
    let l_next = r;

    if width <= MIN_CASCADE_WIDTH {
        (r_next << width) | l_next
    } else {
        let l_sub = cascade(l_next, 2 * id, width / 2, tree);
        let r_sub = cascade(r_next, 2 * id + 1, width / 2, tree);
        (r_sub << width) | l_sub
    }
}
