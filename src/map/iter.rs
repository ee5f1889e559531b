use std::fmt;
use std::iter::FusedIterator;

use crate::slab::{Ptr, Slab};

use super::{InnerNode, Start};
use super::cursor::{leftmost, rightmost, successor, predecessor};

/// An in-order iterator over the entries of a `TreeMap`
///
/// Walks away from its start (the least key for `Start::Front`, the greatest for `Start::Back`).
/// It is double-ended: the other end of the sequence can be consumed with `next_back`, and the two
/// ends never cross.
pub struct Iter<'a, K, V> {
    nodes: &'a Slab<InnerNode<K, V>>,
    /// The next entry at the least end of the remaining sequence
    front: Option<Ptr>,
    /// The next entry at the greatest end of the remaining sequence
    back: Option<Ptr>,
    /// The number of entries not yet yielded from either end
    len: usize,
    start: Start,
}

impl<'a, K, V> Clone for Iter<'a, K, V> {
    fn clone(&self) -> Self {
        Self {..*self}
    }
}

impl<'a, K, V> fmt::Debug for Iter<'a, K, V>
    where K: fmt::Debug,
          V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

impl<'a, K, V> Iter<'a, K, V> {
    pub(super) fn new(nodes: &'a Slab<InnerNode<K, V>>, root: Option<Ptr>, start: Start) -> Self {
        Self {
            nodes,
            front: root.map(|root| leftmost(nodes, root)),
            back: root.map(|root| rightmost(nodes, root)),
            len: nodes.len(),
            start,
        }
    }

    fn entry(&self, ptr: Ptr) -> (&'a K, &'a V) {
        let nodes = self.nodes;
        let node = &nodes[ptr];
        (&node.key, &node.value)
    }

    fn pop_front(&mut self) -> Option<(&'a K, &'a V)> {
        if self.len == 0 {
            return None;
        }

        let ptr = self.front?;
        self.front = successor(self.nodes, ptr);
        self.len -= 1;
        Some(self.entry(ptr))
    }

    fn pop_back(&mut self) -> Option<(&'a K, &'a V)> {
        if self.len == 0 {
            return None;
        }

        let ptr = self.back?;
        self.back = predecessor(self.nodes, ptr);
        self.len -= 1;
        Some(self.entry(ptr))
    }
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        match self.start {
            Start::Front => self.pop_front(),
            Start::Back => self.pop_back(),
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.len, Some(self.len))
    }
}

impl<'a, K, V> DoubleEndedIterator for Iter<'a, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        match self.start {
            Start::Front => self.pop_back(),
            Start::Back => self.pop_front(),
        }
    }
}

impl<'a, K, V> ExactSizeIterator for Iter<'a, K, V> {}

impl<'a, K, V> FusedIterator for Iter<'a, K, V> {}

/// An in-order iterator over the keys of a `TreeMap`
pub struct Keys<'a, K, V> {
    inner: Iter<'a, K, V>,
}

impl<'a, K, V> Clone for Keys<'a, K, V> {
    fn clone(&self) -> Self {
        Self {inner: self.inner.clone()}
    }
}

impl<'a, K: fmt::Debug, V> fmt::Debug for Keys<'a, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

impl<'a, K, V> Keys<'a, K, V> {
    pub(super) fn new(inner: Iter<'a, K, V>) -> Self {
        Self {inner}
    }
}

impl<'a, K, V> Iterator for Keys<'a, K, V> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(key, _)| key)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<'a, K, V> DoubleEndedIterator for Keys<'a, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|(key, _)| key)
    }
}

impl<'a, K, V> ExactSizeIterator for Keys<'a, K, V> {}

impl<'a, K, V> FusedIterator for Keys<'a, K, V> {}

/// An in-order iterator over the values of a `TreeMap`
pub struct Values<'a, K, V> {
    inner: Iter<'a, K, V>,
}

impl<'a, K, V> Clone for Values<'a, K, V> {
    fn clone(&self) -> Self {
        Self {inner: self.inner.clone()}
    }
}

impl<'a, K, V: fmt::Debug> fmt::Debug for Values<'a, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

impl<'a, K, V> Values<'a, K, V> {
    pub(super) fn new(inner: Iter<'a, K, V>) -> Self {
        Self {inner}
    }
}

impl<'a, K, V> Iterator for Values<'a, K, V> {
    type Item = &'a V;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(_, value)| value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<'a, K, V> DoubleEndedIterator for Values<'a, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|(_, value)| value)
    }
}

impl<'a, K, V> ExactSizeIterator for Values<'a, K, V> {}

impl<'a, K, V> FusedIterator for Values<'a, K, V> {}

/// An in-order iterator over the entries of a `TreeMap`, with mutable values
///
/// Keys stay immutable since changing one could break the ordering of the tree.
///
/// Creating this iterator allocates a table with one slot per arena entry (`O(n)`), holding each
/// node's child links next to the borrowed entry. The walk itself is lazy: each end keeps a stack
/// of the nodes still to visit on its side.
#[derive(Debug)]
pub struct IterMut<'a, K, V> {
    slots: Vec<Slot<'a, K, V>>,
    /// Nodes still to visit from the least end, the next one on top
    front: Vec<Ptr>,
    /// Nodes still to visit from the greatest end, the next one on top
    back: Vec<Ptr>,
    /// The number of entries not yet yielded from either end
    len: usize,
}

/// A copy of a node's child links along with its entry, until the entry is handed out
#[derive(Debug)]
struct Slot<'a, K, V> {
    left: Option<Ptr>,
    right: Option<Ptr>,
    entry: Option<(&'a K, &'a mut V)>,
}

impl<'a, K, V> IterMut<'a, K, V> {
    pub(super) fn new(nodes: &'a mut Slab<InnerNode<K, V>>, root: Option<Ptr>) -> Self {
        let len = nodes.len();
        let slots = nodes.slots_mut().map(|node| match node {
            Some(node) => {
                let InnerNode {key, value, left, right, ..} = node;
                Slot {left: *left, right: *right, entry: Some((&*key, value))}
            },
            None => Slot {left: None, right: None, entry: None},
        }).collect();

        let mut iter = Self {
            slots,
            front: Vec::new(),
            back: Vec::new(),
            len,
        };
        iter.push_left_spine(root);
        iter.push_right_spine(root);
        iter
    }

    /// Pushes `ptr` and its chain of left children onto the front stack
    fn push_left_spine(&mut self, mut current: Option<Ptr>) {
        while let Some(ptr) = current {
            self.front.push(ptr);
            current = self.slots[ptr.into_index()].left;
        }
    }

    /// Pushes `ptr` and its chain of right children onto the back stack
    fn push_right_spine(&mut self, mut current: Option<Ptr>) {
        while let Some(ptr) = current {
            self.back.push(ptr);
            current = self.slots[ptr.into_index()].right;
        }
    }
}

impl<'a, K, V> Iterator for IterMut<'a, K, V> {
    type Item = (&'a K, &'a mut V);

    fn next(&mut self) -> Option<Self::Item> {
        if self.len == 0 {
            return None;
        }

        let ptr = self.front.pop()?;
        let right = self.slots[ptr.into_index()].right;
        self.push_left_spine(right);
        self.len -= 1;
        self.slots[ptr.into_index()].entry.take()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.len, Some(self.len))
    }
}

impl<'a, K, V> DoubleEndedIterator for IterMut<'a, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.len == 0 {
            return None;
        }

        let ptr = self.back.pop()?;
        let left = self.slots[ptr.into_index()].left;
        self.push_right_spine(left);
        self.len -= 1;
        self.slots[ptr.into_index()].entry.take()
    }
}

impl<'a, K, V> ExactSizeIterator for IterMut<'a, K, V> {}

impl<'a, K, V> FusedIterator for IterMut<'a, K, V> {}

/// An in-order iterator over the mutable values of a `TreeMap`
#[derive(Debug)]
pub struct ValuesMut<'a, K, V> {
    inner: IterMut<'a, K, V>,
}

impl<'a, K, V> ValuesMut<'a, K, V> {
    pub(super) fn new(inner: IterMut<'a, K, V>) -> Self {
        Self {inner}
    }
}

impl<'a, K, V> Iterator for ValuesMut<'a, K, V> {
    type Item = &'a mut V;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(_, value)| value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<'a, K, V> DoubleEndedIterator for ValuesMut<'a, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|(_, value)| value)
    }
}

impl<'a, K, V> ExactSizeIterator for ValuesMut<'a, K, V> {}

impl<'a, K, V> FusedIterator for ValuesMut<'a, K, V> {}
