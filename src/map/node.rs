use std::ptr;
use std::fmt;

use crate::slab::{Ptr, Slab};

use super::InnerNode;

/// A single node of the binary search tree
///
/// Only gives read access: changing a key in place could break the ordering of the tree.
pub struct Node<'a, K, V> {
    nodes: &'a Slab<InnerNode<K, V>>,
    ptr: Ptr,
}

impl<'a, K, V> fmt::Debug for Node<'a, K, V>
    where K: fmt::Debug,
          V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Neighbours are shown by key only, so the output does not grow with the subtree
        f.debug_struct("Node")
            .field("key", self.key())
            .field("value", self.value())
            .field("left", &self.left().map(|node| node.key()))
            .field("right", &self.right().map(|node| node.key()))
            .field("parent", &self.parent().map(|node| node.key()))
            .finish()
    }
}

impl<'a, K, V> Clone for Node<'a, K, V> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<'a, K, V> Copy for Node<'a, K, V> {}

impl<'a, K: PartialEq, V: PartialEq> PartialEq for Node<'a, K, V> {
    fn eq(&self, other: &Self) -> bool {
        // The same node of the same tree is trivially equal (similar to `Arc` using `ptr_eq` to
        // optimize its `PartialEq` impl)
        let same_node = ptr::eq(self.nodes, other.nodes) && self.ptr == other.ptr;
        same_node || (self.key().eq(other.key()) && self.value().eq(other.value()))
    }
}

impl<'a, K: Eq, V: Eq> Eq for Node<'a, K, V> {}

impl<'a, K, V> Node<'a, K, V> {
    /// `ptr` must refer to a node in `nodes`
    pub(super) fn new(nodes: &'a Slab<InnerNode<K, V>>, ptr: Ptr) -> Self {
        debug_assert!(nodes.get(ptr).is_some());
        Self {nodes, ptr}
    }

    fn inner(&self) -> &'a InnerNode<K, V> {
        let nodes = self.nodes;
        &nodes[self.ptr]
    }

    /// Returns the key of this node
    pub fn key(&self) -> &'a K {
        &self.inner().key
    }

    /// Returns the value of this node
    pub fn value(&self) -> &'a V {
        &self.inner().value
    }

    /// Returns true if this node has a left subtree
    pub fn has_left(&self) -> bool {
        self.inner().left.is_some()
    }

    /// Returns true if this node has a right subtree
    pub fn has_right(&self) -> bool {
        self.inner().right.is_some()
    }

    /// Returns the left child node (subtree) of this node, if any
    pub fn left(&self) -> Option<Self> {
        self.inner().left.map(|ptr| Self::new(self.nodes, ptr))
    }

    /// Returns the right child node (subtree) of this node, if any
    pub fn right(&self) -> Option<Self> {
        self.inner().right.map(|ptr| Self::new(self.nodes, ptr))
    }

    /// Returns the parent of this node, or `None` for the root
    pub fn parent(&self) -> Option<Self> {
        self.inner().parent.map(|ptr| Self::new(self.nodes, ptr))
    }
}

#[cfg(test)]
mod tests {
    use crate::TreeMap;

    #[test]
    fn test_custom_traversal() {
        #[derive(Debug, PartialEq, Eq)]
        struct Stats {
            pub score: u32,
        }

        // Custom traversal through the values in the map
        fn find_score<'a>(node: Option<super::Node<'a, i32, Stats>>, target_score: u32) -> Option<super::Node<'a, i32, Stats>> {
            let node = node?;
            if node.value().score == target_score {
                Some(node)
            } else {
                find_score(node.left(), target_score)
                    .or_else(|| find_score(node.right(), target_score))
            }
        }

        let mut map = TreeMap::new();

        map.place(1, Stats {score: 39382});
        map.place(0, Stats {score: 400});
        map.place(40, Stats {score: 999});
        map.place(42, Stats {score: 33});

        assert_eq!(find_score(map.root(), 500), None);
        assert_eq!(find_score(map.root(), 39382).map(|node| *node.key()), Some(1));
        assert_eq!(find_score(map.root(), 999).map(|node| *node.key()), Some(40));
        assert_eq!(find_score(map.root(), 33).map(|node| *node.key()), Some(42));
    }

    #[test]
    fn parent_links() {
        let mut map = TreeMap::new();
        //      4
        //   2     5
        // 1   3
        for &key in &[4, 5, 2, 3, 1] {
            map.place(key, ());
        }

        let root = map.root().unwrap();
        assert!(root.parent().is_none());

        let two = root.left().unwrap();
        assert_eq!(*two.key(), 2);
        assert_eq!(two.parent(), Some(root));

        let three = two.right().unwrap();
        assert_eq!(*three.key(), 3);
        assert!(!three.has_left() && !three.has_right());
        assert_eq!(three.parent().and_then(|node| node.parent()), Some(root));
    }

    #[test]
    fn debug_shows_neighbour_keys() {
        let map: TreeMap<_, _> = vec![(2, 'b'), (1, 'a'), (3, 'c')].into_iter().collect();

        let root = map.root().unwrap();
        assert_eq!(
            format!("{:?}", root),
            "Node { key: 2, value: 'b', left: Some(1), right: Some(3), parent: None }",
        );
        assert_eq!(
            format!("{:?}", root.right().unwrap()),
            "Node { key: 3, value: 'c', left: None, right: None, parent: Some(2) }",
        );
    }

    #[test]
    fn debug_of_a_long_chain() {
        // Sorted insertions make a chain as deep as the map is long
        let map: TreeMap<_, _> = (0..10_000).map(|i| (i, ())).collect();

        let text = format!("{:?}", map.root());
        assert_eq!(text, "Some(Node { key: 0, value: (), left: None, right: Some(1), parent: None })");
    }
}
