use std::iter::FusedIterator;

use crate::slab::{Ptr, Slab};

use super::InnerNode;

/// A pre-order (root first) iterator over the entries of a `TreeMap`
///
/// The order depends on the shape of the tree, not just on its keys.
pub struct IterPreorder<'a, K, V> {
    nodes: &'a Slab<InnerNode<K, V>>,
    stack: Vec<Ptr>,
}

impl<'a, K, V> IterPreorder<'a, K, V> {
    pub(super) fn new(nodes: &'a Slab<InnerNode<K, V>>, root: Option<Ptr>) -> Self {
        Self {
            nodes,
            stack: root.into_iter().collect(),
        }
    }
}

// See: https://www.geeksforgeeks.org/iterative-preorder-traversal/
impl<'a, K, V> Iterator for IterPreorder<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let top = self.stack.pop()?;
        let nodes = self.nodes;
        let node = &nodes[top];
        self.stack.extend(node.right);
        self.stack.extend(node.left);
        Some((&node.key, &node.value))
    }
}

impl<'a, K, V> FusedIterator for IterPreorder<'a, K, V> {}
