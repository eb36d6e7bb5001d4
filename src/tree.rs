//! Huffman tree construction
//!
//! Nodes are merged lowest weight first. Ties go to the node that entered the
//! queue earliest: leaves enter in ascending symbol order, and each merged
//! node enters after everything already queued. This fixes the tree shape for
//! a given frequency table.
//!
//! A table with a single counted symbol (only the end-of-stream marker, for
//! empty input) still yields an internal root: the lone leaf is paired with a
//! zero-weight filler leaf on the 1 branch.

use crate::error::CompressError;
use crate::frequency::FrequencyTable;
use std::cmp::Ordering;
use std::collections::BinaryHeap;

#[derive(Debug, Clone)]
pub enum HuffNode {
    Leaf {
        symbol: u16,
        weight: u64,
    },
    Internal {
        weight: u64,
        left: Box<HuffNode>,
        right: Box<HuffNode>,
    },
}

impl HuffNode {
    pub fn leaf(symbol: u16, weight: u64) -> Self {
        HuffNode::Leaf { symbol, weight }
    }

    /// Join two subtrees; `left` takes the 0 branch.
    pub fn merge(left: Self, right: Self) -> Self {
        HuffNode::Internal {
            weight: left.weight() + right.weight(),
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn weight(&self) -> u64 {
        match self {
            HuffNode::Leaf { weight, .. } | HuffNode::Internal { weight, .. } => *weight,
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, HuffNode::Leaf { .. })
    }

    pub fn leaf_count(&self) -> usize {
        match self {
            HuffNode::Leaf { .. } => 1,
            HuffNode::Internal { left, right, .. } => left.leaf_count() + right.leaf_count(),
        }
    }

    /// Longest root-to-leaf path, in edges.
    pub fn depth(&self) -> usize {
        match self {
            HuffNode::Leaf { .. } => 0,
            HuffNode::Internal { left, right, .. } => 1 + left.depth().max(right.depth()),
        }
    }
}

/// Trees are equal when they have the same shape and the same symbol at
/// every leaf. Weights are not serialized, so they do not take part.
impl PartialEq for HuffNode {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (HuffNode::Leaf { symbol: a, .. }, HuffNode::Leaf { symbol: b, .. }) => a == b,
            (
                HuffNode::Internal { left: l1, right: r1, .. },
                HuffNode::Internal { left: l2, right: r2, .. },
            ) => l1 == l2 && r1 == r2,
            _ => false,
        }
    }
}

impl Eq for HuffNode {}

struct QueueEntry {
    weight: u64,
    seq: usize,
    node: HuffNode,
}

impl Eq for QueueEntry {}
impl PartialEq for QueueEntry {
    fn eq(&self, other: &Self) -> bool {
        self.weight == other.weight && self.seq == other.seq
    }
}
impl PartialOrd for QueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
impl Ord for QueueEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // min-heap on (weight, seq)
        other
            .weight
            .cmp(&self.weight)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

/// Build the tree for `table`. Fails only when no symbol has a count.
pub fn build(table: &FrequencyTable) -> Result<HuffNode, CompressError> {
    let mut heap = BinaryHeap::new();
    let mut seq = 0;
    for (symbol, count) in table.nonzero() {
        heap.push(QueueEntry {
            weight: count,
            seq,
            node: HuffNode::leaf(symbol, count),
        });
        seq += 1;
    }

    loop {
        let first = heap.pop().ok_or(CompressError::EmptyInput)?;
        let Some(second) = heap.pop() else {
            let root = if let HuffNode::Leaf { symbol, .. } = first.node {
                let filler = if symbol == 0 { 1 } else { 0 };
                HuffNode::merge(first.node, HuffNode::leaf(filler, 0))
            } else {
                first.node
            };
            tracing::debug!(
                leaves = root.leaf_count(),
                depth = root.depth(),
                weight = root.weight(),
                "built tree"
            );
            return Ok(root);
        };
        let node = HuffNode::merge(first.node, second.node);
        heap.push(QueueEntry {
            weight: node.weight(),
            seq,
            node,
        });
        seq += 1;
    }
}
