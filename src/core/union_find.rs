//! Disjoint sets keyed by body id
//!
//! Nodes are created lazily on first `find`/`union`. Union by rank keeps the
//! trees shallow and `find` compresses paths, so repeated lookups inside one
//! merge pass are effectively O(1).

use std::collections::HashMap;

use crate::systems::shapes::BodyId;

#[derive(Clone, Copy, Debug)]
struct Node {
    parent: BodyId,
    rank: u32,
}

#[derive(Debug, Default)]
pub struct UnionFind {
    nodes: HashMap<BodyId, Node>,
}

impl UnionFind {
    pub fn new() -> Self {
        Self { nodes: HashMap::new() }
    }

    /// Number of ids seen so far.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Returns the root id of the set containing `id`.
    pub fn find(&mut self, id: BodyId) -> BodyId {
        let mut root = self.node(id).parent;
        if root == id {
            return id;
        }
        while self.nodes[&root].parent != root {
            root = self.nodes[&root].parent;
        }

        // second pass: point everything on the path straight at the root
        let mut current = id;
        while current != root {
            let next = self.nodes[&current].parent;
            if let Some(node) = self.nodes.get_mut(&current) {
                node.parent = root;
            }
            current = next;
        }
        root
    }

    /// Joins the sets of `x` and `y`. On equal rank `x`'s root wins.
    pub fn union(&mut self, x: BodyId, y: BodyId) {
        let root_x = self.find(x);
        let root_y = self.find(y);
        if root_x == root_y {
            return;
        }

        let rank_x = self.nodes[&root_x].rank;
        let rank_y = self.nodes[&root_y].rank;
        match rank_x.cmp(&rank_y) {
            std::cmp::Ordering::Less => self.set_parent(root_x, root_y),
            std::cmp::Ordering::Greater => self.set_parent(root_y, root_x),
            std::cmp::Ordering::Equal => {
                self.set_parent(root_y, root_x);
                if let Some(node) = self.nodes.get_mut(&root_x) {
                    node.rank += 1;
                }
            }
        }
    }

    pub fn connected(&mut self, x: BodyId, y: BodyId) -> bool {
        self.find(x) == self.find(y)
    }

    fn node(&mut self, id: BodyId) -> Node {
        *self.nodes.entry(id).or_insert(Node { parent: id, rank: 0 })
    }

    fn set_parent(&mut self, child: BodyId, parent: BodyId) {
        if let Some(node) = self.nodes.get_mut(&child) {
            node.parent = parent;
        }
    }
}
