//! Object pool for ART node recycling.
//!
//! One [`NodePool`] is owned by each [`crate::art::ArtMap`], so no arena
//! is shared across maps. Each node variant gets its own bounded free
//! list — a pooled node is a distinct Rust type per variant, so a single
//! homogeneous slab doesn't apply here; four small stacks do the same job.

use crate::art::node::{Node4, Node16, Node48, Node256};

/// Per-variant capacity caps for a [`NodePool`]. Defaults are generous
/// enough that churn-heavy workloads rarely allocate past warm-up.
#[derive(Clone, Copy, Debug)]
pub struct NodePoolConfig {
    pub node4_cap: usize,
    pub node16_cap: usize,
    pub node48_cap: usize,
    pub node256_cap: usize,
    /// Node256 shrinks to Node48 once `num_children` falls to or below
    /// this threshold. The source left this ambiguous between two
    /// divergent implementations (`<= 48` in one, a named constant of 37
    /// in another); this crate exposes it and defaults to 37, the
    /// documented hysteresis value kept below the 48 grow boundary.
    pub node256_shrink_threshold: u16,
}

impl Default for NodePoolConfig {
    fn default() -> Self {
        Self {
            node4_cap: 4096,
            node16_cap: 2048,
            node48_cap: 1024,
            node256_cap: 256,
            node256_shrink_threshold: 37,
        }
    }
}

/// Bounded free-lists for the four ART node variants.
///
/// `get_*` pops a recycled instance or lazily constructs a fresh one;
/// `put_*` pushes a freshly [`recycle`](super::art::node::ArtNode::recycle)d
/// instance back, dropping it instead if the variant's free list is
/// already at capacity.
pub struct NodePool<V> {
    node4: Vec<Box<Node4<V>>>,
    node16: Vec<Box<Node16<V>>>,
    node48: Vec<Box<Node48<V>>>,
    node256: Vec<Box<Node256<V>>>,
    config: NodePoolConfig,
}

impl<V> NodePool<V> {
    pub fn new(config: NodePoolConfig) -> Self {
        Self {
            node4: Vec::new(),
            node16: Vec::new(),
            node48: Vec::new(),
            node256: Vec::new(),
            config,
        }
    }

    pub fn config(&self) -> &NodePoolConfig {
        &self.config
    }

    pub fn get_node4(&mut self) -> Box<Node4<V>> {
        self.node4.pop().unwrap_or_else(|| Box::new(Node4::empty()))
    }

    pub fn put_node4(&mut self, mut node: Box<Node4<V>>) {
        node.recycle();
        if self.node4.len() < self.config.node4_cap {
            self.node4.push(node);
        }
    }

    pub fn get_node16(&mut self) -> Box<Node16<V>> {
        self.node16
            .pop()
            .unwrap_or_else(|| Box::new(Node16::empty()))
    }

    pub fn put_node16(&mut self, mut node: Box<Node16<V>>) {
        node.recycle();
        if self.node16.len() < self.config.node16_cap {
            self.node16.push(node);
        }
    }

    pub fn get_node48(&mut self) -> Box<Node48<V>> {
        self.node48
            .pop()
            .unwrap_or_else(|| Box::new(Node48::empty()))
    }

    pub fn put_node48(&mut self, mut node: Box<Node48<V>>) {
        node.recycle();
        if self.node48.len() < self.config.node48_cap {
            self.node48.push(node);
        }
    }

    pub fn get_node256(&mut self) -> Box<Node256<V>> {
        self.node256
            .pop()
            .unwrap_or_else(|| Box::new(Node256::empty()))
    }

    pub fn put_node256(&mut self, mut node: Box<Node256<V>>) {
        node.recycle();
        if self.node256.len() < self.config.node256_cap {
            self.node256.push(node);
        }
    }

    /// Number of pre-cleared instances currently parked, per variant —
    /// exposed for tests that exercise pool reuse.
    #[cfg(test)]
    pub(crate) fn parked_counts(&self) -> (usize, usize, usize, usize) {
        (
            self.node4.len(),
            self.node16.len(),
            self.node48.len(),
            self.node256.len(),
        )
    }
}
