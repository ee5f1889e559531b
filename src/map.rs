mod node;
mod cursor;
mod iter;
mod view;
mod preorder;

pub use node::*;
pub use cursor::*;
pub use iter::*;
pub use view::*;
pub use preorder::*;

use std::fmt;
use std::mem;
use std::cmp::Ordering;
use std::iter::FromIterator;

use compare::{Compare, Natural, natural};
use log::{debug, trace};

use crate::error::Error;
use crate::slab::{Ptr, Slab};

#[derive(Debug, Clone)]
pub(crate) struct InnerNode<K, V> {
    pub(crate) key: K,
    pub(crate) value: V,
    /// Back-reference to the node whose child slot owns this node. Never an owner itself.
    pub(crate) parent: Option<Ptr>,
    pub(crate) left: Option<Ptr>,
    pub(crate) right: Option<Ptr>,
}

impl<K, V> InnerNode<K, V> {
    fn new(key: K, value: V, parent: Option<Ptr>) -> Self {
        Self {
            key,
            value,
            parent,
            left: None,
            right: None,
        }
    }

    fn child(&self, side: Side) -> Option<Ptr> {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }

    fn child_mut(&mut self, side: Side) -> &mut Option<Ptr> {
        match side {
            Side::Left => &mut self.left,
            Side::Right => &mut self.right,
        }
    }
}

/// The child slot of a parent that a node hangs from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Side {
    Left,
    Right,
}

/// The result of descending the tree in search of a key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Search {
    /// A node with an equal key exists
    Found(Ptr),
    /// No such node: a new node for the key belongs in this (empty) child slot of `parent`, or at
    /// the root if `parent` is `None`
    Vacant {
        parent: Option<Ptr>,
        side: Side,
    },
}

/// An ordered map backed by a binary search tree (BST)
///
/// BST properties: For each node with key `k`:
/// - The key of each node in the left subtree compares less than `k`
/// - The key of each node in the right subtree compares greater than `k`
///
/// Keys are ordered by the comparator `C` bound when the map is created. By default this is the
/// natural order of `K`, but any `Fn(&K, &K) -> Ordering` works. The comparator must be a strict
/// total order that gives the same answer every time it is asked. A comparator that breaks these
/// rules results in an unspecified tree shape and wrong lookup results, but never in memory
/// unsafety.
///
/// The tree is **not** balanced. Its shape depends entirely on the order of insertions and
/// removals, so inserting keys in sorted order produces a chain and every operation that descends
/// the tree becomes `O(n)` in the worst case.
///
/// Nodes are allocated in an arena owned by the map. Every node is owned by exactly one child slot
/// (or by the map, for the root) and also keeps a non-owning link to its parent so that cursors can
/// walk upwards.
///
/// # Examples
///
/// ```
/// use treemap::TreeMap;
///
/// let mut map = TreeMap::new();
/// assert!(!map.place(2, "b"));
/// assert!(!map.place(1, "a"));
/// assert!(map.place(2, "B"));
///
/// let pairs: Vec<_> = map.iter().collect();
/// assert_eq!(pairs, [(&1, &"a"), (&2, &"B")]);
/// ```
///
/// A custom ordering:
///
/// ```
/// use treemap::TreeMap;
///
/// let mut map = TreeMap::with_comparator(|a: &i32, b: &i32| b.cmp(a));
/// map.extend(vec![(1, 'a'), (3, 'c'), (2, 'b')]);
///
/// let keys: Vec<_> = map.keys().into_iter().copied().collect();
/// assert_eq!(keys, [3, 2, 1]);
/// ```
#[derive(Clone)]
pub struct TreeMap<K, V, C = Natural<K>> {
    nodes: Slab<InnerNode<K, V>>,
    root: Option<Ptr>,
    comparator: C,
}

impl<K: Ord, V> Default for TreeMap<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V, C> fmt::Debug for TreeMap<K, V, C>
    where K: fmt::Debug,
          V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K: PartialEq, V: PartialEq, C> PartialEq for TreeMap<K, V, C> {
    fn eq(&self, other: &Self) -> bool {
        // Two trees may be shaped differently while holding the same entries (e.g. if insertion
        // order is different). In-order traversal produces entries in sorted order regardless of
        // shape, so compare that instead.
        if self.len() != other.len() {
            return false;
        }

        self.iter().zip(other.iter()).all(|((k1, v1), (k2, v2))| {
            k1.eq(k2) && v1.eq(v2)
        })
    }
}

impl<K: Eq, V: Eq, C> Eq for TreeMap<K, V, C> {}

impl<K: Ord, V> TreeMap<K, V> {
    /// Creates an empty `TreeMap` ordered by the natural order of `K`
    ///
    /// The map is initially created with a capacity of 0, so it will not allocate until it is first
    /// inserted into.
    ///
    /// # Examples
    ///
    /// ```
    /// use treemap::TreeMap;
    /// let mut map: TreeMap<&str, i32> = TreeMap::new();
    /// ```
    pub fn new() -> Self {
        Self::with_comparator(natural())
    }

    /// Creates an empty map, ordered by the natural order of `K`, with space for at least
    /// `capacity` entries
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity_and_comparator(capacity, natural())
    }
}

impl<K, V, C> TreeMap<K, V, C> {
    /// Creates an empty map that orders its keys with `comparator` for its entire lifetime
    pub fn with_comparator(comparator: C) -> Self {
        Self {
            nodes: Slab::new(),
            root: None,
            comparator,
        }
    }

    /// Creates an empty map that orders its keys with `comparator`, with space for at least
    /// `capacity` entries
    pub fn with_capacity_and_comparator(capacity: usize, comparator: C) -> Self {
        Self {
            nodes: Slab::with_capacity(capacity),
            root: None,
            comparator,
        }
    }

    /// Returns the comparator that orders this map's keys
    pub fn comparator(&self) -> &C {
        &self.comparator
    }

    /// Returns the number of entries in the map (i.e. the number of nodes in the tree)
    ///
    /// Time complexity: `O(1)`
    ///
    /// # Examples
    ///
    /// ```
    /// use treemap::TreeMap;
    ///
    /// let mut map = TreeMap::new();
    /// assert_eq!(map.len(), 0);
    /// map.place(1, "a");
    /// assert_eq!(map.len(), 1);
    /// ```
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns true if the map is empty
    ///
    /// Time complexity: `O(1)`
    pub fn is_empty(&self) -> bool {
        debug_assert_eq!(self.nodes.is_empty(), self.root.is_none());
        self.nodes.is_empty()
    }

    /// Returns the number of entries the map can hold without reallocating
    pub fn capacity(&self) -> usize {
        self.nodes.capacity()
    }

    /// Reserves capacity for at least `additional` more entries
    ///
    /// # Panics
    ///
    /// Panics if the new allocation size overflows `usize`.
    pub fn reserve(&mut self, additional: usize) {
        self.nodes.reserve(additional)
    }

    /// Reserves capacity for at least `additional` more entries, reporting allocation failure
    /// instead of aborting
    pub fn try_reserve(&mut self, additional: usize) -> Result<(), Error> {
        Ok(self.nodes.try_reserve(additional)?)
    }

    /// Shrinks the capacity of the map as much as possible
    pub fn shrink_to_fit(&mut self) {
        self.nodes.shrink_to_fit()
    }

    /// Clears the map, releasing every node
    ///
    /// Clearing an empty map does nothing. Note that this method has no effect on the allocated
    /// capacity of the map.
    ///
    /// # Examples
    ///
    /// ```
    /// use treemap::TreeMap;
    ///
    /// let mut map = TreeMap::new();
    /// map.place(1, "a");
    /// map.clear();
    /// assert!(map.is_empty());
    /// assert_eq!(map.iter().count(), 0);
    /// ```
    pub fn clear(&mut self) {
        let len = self.len();
        self.nodes.clear();
        self.root = None;

        debug!("cleared map, released {} nodes", len);
    }

    /// Returns an iterator over the entries of the map, in ascending key order
    ///
    /// The iterator is double-ended: `.rev()` walks from the greatest key down.
    pub fn iter(&self) -> Iter<K, V> {
        self.entries().iter()
    }

    /// Returns an iterator over the entries of the map with mutable values, in ascending key order
    ///
    /// Unlike `iter`, this allocates an `O(n)` table up front so that each value can be handed out
    /// mutably exactly once.
    pub fn iter_mut(&mut self) -> IterMut<K, V> {
        IterMut::new(&mut self.nodes, self.root)
    }

    /// Returns an iterator over mutable values, in ascending key order
    ///
    /// # Examples
    ///
    /// ```
    /// use treemap::TreeMap;
    ///
    /// let mut map: TreeMap<_, _> = vec![(1, 10), (2, 20)].into_iter().collect();
    /// for value in map.values_mut() {
    ///     *value += 1;
    /// }
    /// assert_eq!(map.get(&2), Some(&21));
    /// ```
    pub fn values_mut(&mut self) -> ValuesMut<K, V> {
        ValuesMut::new(self.iter_mut())
    }

    /// Returns a view over the keys, starting at the least key
    pub fn keys(&self) -> KeyView<K, V> {
        self.keys_at(Start::Front)
    }

    /// Returns a view over the keys starting from either end of the map
    ///
    /// # Examples
    ///
    /// ```
    /// use treemap::{TreeMap, Start};
    ///
    /// let map: TreeMap<_, _> = vec![(1, 'a'), (2, 'b'), (3, 'c')].into_iter().collect();
    /// let keys: Vec<_> = map.keys_at(Start::Back).into_iter().copied().collect();
    /// assert_eq!(keys, [3, 2, 1]);
    /// ```
    pub fn keys_at(&self, start: Start) -> KeyView<K, V> {
        KeyView::new(self.entries_at(start))
    }

    /// Returns a view over the values, starting at the value of the least key
    pub fn values(&self) -> ValueView<K, V> {
        self.values_at(Start::Front)
    }

    /// Returns a view over the values starting from either end of the map
    pub fn values_at(&self, start: Start) -> ValueView<K, V> {
        ValueView::new(self.entries_at(start))
    }

    /// Returns a view over the entries, starting at the least key
    pub fn entries(&self) -> EntryView<K, V> {
        self.entries_at(Start::Front)
    }

    /// Returns a view over the entries starting from either end of the map
    pub fn entries_at(&self, start: Start) -> EntryView<K, V> {
        EntryView::new(&self.nodes, self.root, start)
    }

    /// Returns the entry with the least key, if any
    pub fn first_key_value(&self) -> Option<(&K, &V)> {
        self.entries_at(Start::Front).cursor().key_value()
    }

    /// Returns the entry with the greatest key, if any
    pub fn last_key_value(&self) -> Option<(&K, &V)> {
        self.entries_at(Start::Back).cursor().key_value()
    }

    /// Performs a pre-order traversal of the tree
    ///
    /// Unlike the other traversals, the order of this one depends on the shape of the tree.
    pub fn iter_preorder(&self) -> IterPreorder<K, V> {
        IterPreorder::new(&self.nodes, self.root)
    }

    /// Returns the root node of the tree, or `None` if the tree is empty
    ///
    /// The root can be **any** node inserted into the tree, depending on the order of insertions
    /// and removals. For a guaranteed ordering, use the iteration methods.
    ///
    /// This is a low-level API meant to be used for implementing custom traversals.
    ///
    /// # Examples
    ///
    /// ```
    /// use treemap::{TreeMap, map::Node};
    ///
    /// // Depth of the deepest node below (and including) `node`
    /// fn depth<K, V>(node: Option<Node<K, V>>) -> usize {
    ///     match node {
    ///         Some(node) => 1 + depth(node.left()).max(depth(node.right())),
    ///         None => 0,
    ///     }
    /// }
    ///
    /// let map: TreeMap<_, _> = (0..10).map(|i| (i, ())).collect();
    /// // Sorted insertions produce a chain
    /// assert_eq!(depth(map.root()), 10);
    /// ```
    pub fn root(&self) -> Option<Node<K, V>> {
        self.root.map(|ptr| Node::new(&self.nodes, ptr))
    }

    /// Puts `child` into the given child slot of `parent` (or the root slot) and points the
    /// child's parent link back at `parent`
    fn set_child(&mut self, parent: Option<Ptr>, side: Side, child: Option<Ptr>) {
        match parent {
            Some(parent) => *self.nodes[parent].child_mut(side) = child,
            None => self.root = child,
        }

        if let Some(child) = child {
            self.nodes[child].parent = parent;
        }
    }

    /// Returns the side of `parent` that `child` hangs from
    fn side_of(&self, parent: Option<Ptr>, child: Ptr) -> Side {
        match parent {
            Some(parent) if self.nodes[parent].right == Some(child) => Side::Right,
            _ => Side::Left,
        }
    }
}

impl<K, V, C: Compare<K>> TreeMap<K, V, C> {
    /// Descends from the root looking for `key`
    fn search(&self, key: &K) -> Search {
        let mut parent = None;
        let mut side = Side::Left;
        let mut current = self.root;
        while let Some(ptr) = current {
            let node = &self.nodes[ptr];
            match self.comparator.compare(key, &node.key) {
                Ordering::Less => side = Side::Left,
                Ordering::Greater => side = Side::Right,
                Ordering::Equal => return Search::Found(ptr),
            }

            parent = Some(ptr);
            current = node.child(side);
        }

        Search::Vacant {parent, side}
    }

    /// Returns `true` if the map contains a value for the specified key
    ///
    /// Time complexity: `O(depth)`, which is `O(n)` in the worst case
    ///
    /// # Examples
    ///
    /// ```
    /// use treemap::TreeMap;
    ///
    /// let mut map = TreeMap::new();
    /// map.place(1, "a");
    /// assert!(map.contains_key(&1));
    /// assert!(!map.contains_key(&2));
    /// ```
    pub fn contains_key(&self, key: &K) -> bool {
        matches!(self.search(key), Search::Found(_))
    }

    /// Returns a reference to the value corresponding to the given key, or `None` if no such key
    /// exists in the map
    ///
    /// Time complexity: `O(depth)`, which is `O(n)` in the worst case
    ///
    /// # Examples
    ///
    /// ```
    /// use treemap::TreeMap;
    ///
    /// let mut map = TreeMap::new();
    /// map.place(1, "a");
    /// assert_eq!(map.get(&1), Some(&"a"));
    /// assert_eq!(map.get(&2), None);
    /// ```
    pub fn get(&self, key: &K) -> Option<&V> {
        self.get_key_value(key).map(|(_, value)| value)
    }

    /// Returns a mutable reference to the value corresponding to the given key, or `None` if no
    /// such key exists in the map
    ///
    /// # Examples
    ///
    /// ```
    /// use treemap::TreeMap;
    ///
    /// let mut map = TreeMap::new();
    /// map.place(1, "a");
    /// if let Some(x) = map.get_mut(&1) {
    ///     *x = "b";
    /// }
    /// assert_eq!(map.get(&1), Some(&"b"));
    /// assert_eq!(map.get_mut(&2), None);
    /// ```
    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        match self.search(key) {
            Search::Found(ptr) => Some(&mut self.nodes[ptr].value),
            Search::Vacant {..} => None,
        }
    }

    /// Returns the key-value pair corresponding to the given key, or `None` if no such key exists
    /// in the map
    pub fn get_key_value(&self, key: &K) -> Option<(&K, &V)> {
        match self.search(key) {
            Search::Found(ptr) => {
                let node = &self.nodes[ptr];
                Some((&node.key, &node.value))
            },
            Search::Vacant {..} => None,
        }
    }

    /// Returns a mutable reference to the value of `key`, inserting `V::default()` first if the key
    /// is absent
    ///
    /// Note that this **mutates** the map even when used only to read: a missing key is inserted
    /// and from then on counts toward `len`, shows up in traversals and is found by lookups.
    ///
    /// # Examples
    ///
    /// ```
    /// use treemap::TreeMap;
    ///
    /// let mut map: TreeMap<i32, String> = TreeMap::new();
    /// *map.get_or_insert_default(7) = "G".to_string();
    /// assert_eq!(map.get(&7).map(String::as_str), Some("G"));
    ///
    /// // Reading a missing key inserts it
    /// assert_eq!(map.get_or_insert_default(8), "");
    /// assert_eq!(map.len(), 2);
    /// ```
    pub fn get_or_insert_default(&mut self, key: K) -> &mut V
        where V: Default,
    {
        self.get_or_insert_with(key, V::default)
    }

    /// Returns a mutable reference to the value of `key`, inserting the result of `default` first
    /// if the key is absent
    ///
    /// `default` is only called if the key is absent.
    pub fn get_or_insert_with<F>(&mut self, key: K, default: F) -> &mut V
        where F: FnOnce() -> V,
    {
        let ptr = match self.search(&key) {
            Search::Found(ptr) => ptr,
            Search::Vacant {parent, side} => {
                let ptr = self.nodes.push(InnerNode::new(key, default(), parent));
                self.link_new(ptr, parent, side);
                ptr
            },
        };

        &mut self.nodes[ptr].value
    }

    /// Places a value into the map under `key`
    ///
    /// Returns `true` if the key was already present, in which case its value is overwritten in
    /// place and the length is unchanged. Returns `false` if a new entry was inserted.
    ///
    /// # Examples
    ///
    /// ```
    /// use treemap::TreeMap;
    ///
    /// let mut map = TreeMap::new();
    /// assert!(!map.place(37, "a"));
    /// assert!(map.place(37, "b"));
    /// assert_eq!(map.get(&37), Some(&"b"));
    /// assert_eq!(map.len(), 1);
    /// ```
    pub fn place(&mut self, key: K, value: V) -> bool {
        self.insert(key, value).is_some()
    }

    /// Like `place`, but reports failure to allocate the new node instead of aborting
    ///
    /// On error the map is left unchanged.
    pub fn try_place(&mut self, key: K, value: V) -> Result<bool, Error> {
        match self.search(&key) {
            Search::Found(ptr) => {
                self.nodes[ptr].value = value;
                Ok(true)
            },

            Search::Vacant {parent, side} => {
                let ptr = self.nodes.try_push(InnerNode::new(key, value, parent))?;
                self.link_new(ptr, parent, side);
                Ok(false)
            },
        }
    }

    /// Inserts a value into the map under `key`
    ///
    /// Returns the previous value if the key was already present or `None` if a new node was
    /// inserted.
    ///
    /// # Examples
    ///
    /// ```
    /// use treemap::TreeMap;
    ///
    /// let mut map = TreeMap::new();
    /// assert_eq!(map.insert(37, "a"), None);
    /// assert_eq!(map.insert(37, "b"), Some("a"));
    /// assert_eq!(map.get(&37), Some(&"b"));
    /// ```
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        match self.search(&key) {
            Search::Found(ptr) => {
                // Replacing, so the length does not change
                Some(mem::replace(&mut self.nodes[ptr].value, value))
            },

            Search::Vacant {parent, side} => {
                let ptr = self.nodes.push(InnerNode::new(key, value, parent));
                self.link_new(ptr, parent, side);
                None
            },
        }
    }

    fn link_new(&mut self, ptr: Ptr, parent: Option<Ptr>, side: Side) {
        self.set_child(parent, side, Some(ptr));

        trace!("linked node {} under {:?} on the {:?} side", ptr.into_index(),
            parent.map(Ptr::into_index), side);
    }

    /// Removes a key from the map. Returns whether the key was present.
    ///
    /// # Examples
    ///
    /// ```
    /// use treemap::TreeMap;
    ///
    /// let mut map = TreeMap::new();
    /// map.place(1, "a");
    /// assert!(map.remove(&1));
    /// assert!(!map.remove(&1));
    /// assert!(map.is_empty());
    /// ```
    pub fn remove(&mut self, key: &K) -> bool {
        self.remove_entry(key).is_some()
    }

    /// Removes a key from the map, returning the stored key and value if the key was present
    ///
    /// The removed node's slot is taken over by its left subtree if it has one. The right subtree
    /// is then grafted, whole, under that left subtree at the leaf position found by descending
    /// from the left subtree's root with the right subtree root's key. Without a left subtree, the
    /// right subtree takes the slot directly.
    ///
    /// This is not the textbook "promote the in-order successor" deletion, and it can make the
    /// tree deeper than that would.
    ///
    /// # Examples
    ///
    /// ```
    /// use treemap::TreeMap;
    ///
    /// let mut map = TreeMap::new();
    /// map.place(1, "a");
    /// assert_eq!(map.remove_entry(&1), Some((1, "a")));
    /// assert_eq!(map.remove_entry(&1), None);
    /// ```
    pub fn remove_entry(&mut self, key: &K) -> Option<(K, V)> {
        let target = match self.search(key) {
            Search::Found(ptr) => ptr,
            Search::Vacant {..} => return None,
        };

        let side = self.side_of(self.nodes[target].parent, target);
        let InnerNode {key, value, parent, left, right} = self.nodes.remove(target);

        match left {
            Some(left) => {
                self.set_child(parent, side, Some(left));
                if let Some(right) = right {
                    self.graft(left, right);
                }
            },

            None => self.set_child(parent, side, right),
        }

        trace!("removed node {}, {} nodes remain", target.into_index(), self.len());

        Some((key, value))
    }

    /// Attaches the subtree rooted at `branch` as a leaf link somewhere below `subtree`, at the
    /// position reached by descending from `subtree` with `branch`'s key
    ///
    /// Only `branch`'s parent link changes. Its own children come along untouched.
    fn graft(&mut self, subtree: Ptr, branch: Ptr) {
        let mut current = subtree;
        loop {
            let node = &self.nodes[current];
            let side = match self.comparator.compare(&self.nodes[branch].key, &node.key) {
                Ordering::Less => Side::Left,
                Ordering::Greater => Side::Right,
                Ordering::Equal => {
                    // Keys in disjoint subtrees never compare equal under a valid comparator
                    debug_assert!(false, "comparator is not a strict total order");
                    Side::Right
                },
            };

            match node.child(side) {
                Some(next) => current = next,
                None => {
                    self.set_child(Some(current), side, Some(branch));

                    trace!("grafted subtree {} under node {} on the {:?} side",
                        branch.into_index(), current.into_index(), side);
                    return;
                },
            }
        }
    }
}

impl<K, V, C: Compare<K>> Extend<(K, V)> for TreeMap<K, V, C> {
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<K: Ord, V> FromIterator<(K, V)> for TreeMap<K, V> {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut map = Self::new();
        map.extend(iter);
        map
    }
}

impl<'a, K, V, C> IntoIterator for &'a TreeMap<K, V, C> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, K, V, C> IntoIterator for &'a mut TreeMap<K, V, C> {
    type Item = (&'a K, &'a mut V);
    type IntoIter = IterMut<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}
