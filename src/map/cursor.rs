use std::ptr;
use std::fmt;

use crate::slab::{Ptr, Slab};

use super::{InnerNode, Node};

/// Returns the node with the least key in the subtree rooted at `ptr`
pub(super) fn leftmost<K, V>(nodes: &Slab<InnerNode<K, V>>, mut ptr: Ptr) -> Ptr {
    while let Some(left) = nodes[ptr].left {
        ptr = left;
    }
    ptr
}

/// Returns the node with the greatest key in the subtree rooted at `ptr`
pub(super) fn rightmost<K, V>(nodes: &Slab<InnerNode<K, V>>, mut ptr: Ptr) -> Ptr {
    while let Some(right) = nodes[ptr].right {
        ptr = right;
    }
    ptr
}

/// Returns the in-order successor of `ptr`, or `None` if it holds the greatest key
pub(super) fn successor<K, V>(nodes: &Slab<InnerNode<K, V>>, ptr: Ptr) -> Option<Ptr> {
    if let Some(right) = nodes[ptr].right {
        return Some(leftmost(nodes, right));
    }

    // Climb until we come up out of a left subtree
    let mut current = ptr;
    while let Some(parent) = nodes[current].parent {
        if nodes[parent].left == Some(current) {
            return Some(parent);
        }
        current = parent;
    }

    None
}

/// Returns the in-order predecessor of `ptr`, or `None` if it holds the least key
pub(super) fn predecessor<K, V>(nodes: &Slab<InnerNode<K, V>>, ptr: Ptr) -> Option<Ptr> {
    if let Some(left) = nodes[ptr].left {
        return Some(rightmost(nodes, left));
    }

    // Climb until we come up out of a right subtree
    let mut current = ptr;
    while let Some(parent) = nodes[current].parent {
        if nodes[parent].right == Some(current) {
            return Some(parent);
        }
        current = parent;
    }

    None
}

/// A position in the in-order sequence of a map's entries
///
/// A cursor either points at an entry or is at the end (exhausted). It can step in both
/// directions by following child and parent links, without any extra storage. Stepping an
/// exhausted cursor leaves it exhausted.
///
/// Two cursors are equal if they point at the same entry or are both at the end. Comparing cursors
/// that point into different maps is a logic error.
///
/// # Examples
///
/// ```
/// use treemap::TreeMap;
///
/// let map: TreeMap<_, _> = vec![(1, 'a'), (2, 'b')].into_iter().collect();
/// let view = map.entries();
///
/// let mut cursor = view.cursor();
/// assert_eq!(cursor.key_value(), Some((&1, &'a')));
/// cursor.move_next();
/// assert_eq!(cursor.key(), Some(&2));
/// cursor.move_next();
/// assert!(cursor.is_end());
/// assert_eq!(cursor, view.end());
/// ```
pub struct Cursor<'a, K, V> {
    nodes: &'a Slab<InnerNode<K, V>>,
    current: Option<Ptr>,
}

impl<'a, K, V> Clone for Cursor<'a, K, V> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<'a, K, V> Copy for Cursor<'a, K, V> {}

impl<'a, K, V> fmt::Debug for Cursor<'a, K, V>
    where K: fmt::Debug,
          V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Cursor")
            .field(&self.key_value())
            .finish()
    }
}

impl<'a, K, V> PartialEq for Cursor<'a, K, V> {
    fn eq(&self, other: &Self) -> bool {
        debug_assert!(self.current.is_none() || other.current.is_none()
            || ptr::eq(self.nodes, other.nodes), "compared cursors of different maps");

        self.current == other.current
    }
}

impl<'a, K, V> Eq for Cursor<'a, K, V> {}

impl<'a, K, V> Cursor<'a, K, V> {
    /// A cursor at the least key, or at the end if the tree is empty
    pub(super) fn front(nodes: &'a Slab<InnerNode<K, V>>, root: Option<Ptr>) -> Self {
        Self {
            nodes,
            current: root.map(|root| leftmost(nodes, root)),
        }
    }

    /// A cursor at the greatest key, or at the end if the tree is empty
    pub(super) fn back(nodes: &'a Slab<InnerNode<K, V>>, root: Option<Ptr>) -> Self {
        Self {
            nodes,
            current: root.map(|root| rightmost(nodes, root)),
        }
    }

    /// An exhausted cursor
    pub(super) fn end(nodes: &'a Slab<InnerNode<K, V>>) -> Self {
        Self {nodes, current: None}
    }

    /// Returns true if the cursor does not point at an entry
    pub fn is_end(&self) -> bool {
        self.current.is_none()
    }

    /// Returns the key at the cursor, or `None` at the end
    pub fn key(&self) -> Option<&'a K> {
        self.key_value().map(|(key, _)| key)
    }

    /// Returns the value at the cursor, or `None` at the end
    pub fn value(&self) -> Option<&'a V> {
        self.key_value().map(|(_, value)| value)
    }

    /// Returns the entry at the cursor, or `None` at the end
    pub fn key_value(&self) -> Option<(&'a K, &'a V)> {
        let nodes = self.nodes;
        self.current.map(|ptr| {
            let node = &nodes[ptr];
            (&node.key, &node.value)
        })
    }

    /// Returns the tree node at the cursor, or `None` at the end
    pub fn node(&self) -> Option<Node<'a, K, V>> {
        let nodes = self.nodes;
        self.current.map(|ptr| Node::new(nodes, ptr))
    }

    /// Moves to the entry with the next greater key, or to the end if there is none
    pub fn move_next(&mut self) {
        if let Some(ptr) = self.current {
            self.current = successor(self.nodes, ptr);
        }
    }

    /// Moves to the entry with the next lesser key, or to the end if there is none
    pub fn move_prev(&mut self) {
        if let Some(ptr) = self.current {
            self.current = predecessor(self.nodes, ptr);
        }
    }
}
