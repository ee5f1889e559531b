use std::fmt;

use crate::slab::{Ptr, Slab};

use super::{InnerNode, Cursor, Iter, Keys, Values};

/// The end of a map that a view starts from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Start {
    /// Start at the least key and walk towards greater keys
    Front,
    /// Start at the greatest key and walk towards lesser keys
    Back,
}

impl Default for Start {
    fn default() -> Self {
        Start::Front
    }
}

/// A re-creatable traversal over the entries of a `TreeMap`
///
/// A view remembers where the traversal starts (either end of the map) and produces a fresh
/// iterator or cursor from there every time it is asked. It borrows the map, so the map cannot be
/// changed while the view is around.
///
/// # Examples
///
/// ```
/// use treemap::{TreeMap, Start};
///
/// let map: TreeMap<_, _> = vec![(1, "a"), (2, "b")].into_iter().collect();
///
/// let view = map.entries_at(Start::Back);
/// for _ in 0..2 {
///     let entries: Vec<_> = view.iter().collect();
///     assert_eq!(entries, [(&2, &"b"), (&1, &"a")]);
/// }
/// ```
pub struct EntryView<'a, K, V> {
    nodes: &'a Slab<InnerNode<K, V>>,
    root: Option<Ptr>,
    start: Start,
}

impl<'a, K, V> Clone for EntryView<'a, K, V> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<'a, K, V> Copy for EntryView<'a, K, V> {}

impl<'a, K, V> fmt::Debug for EntryView<'a, K, V>
    where K: fmt::Debug,
          V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<'a, K, V> EntryView<'a, K, V> {
    pub(super) fn new(nodes: &'a Slab<InnerNode<K, V>>, root: Option<Ptr>, start: Start) -> Self {
        Self {nodes, root, start}
    }

    /// Returns the end this view starts from
    pub fn start(&self) -> Start {
        self.start
    }

    /// Returns the number of entries the view walks over
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns true if the view has no entries to walk over
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Returns a fresh iterator walking away from the view's start
    pub fn iter(&self) -> Iter<'a, K, V> {
        Iter::new(self.nodes, self.root, self.start)
    }

    /// Returns a cursor at the view's start, or at the end if the map is empty
    pub fn cursor(&self) -> Cursor<'a, K, V> {
        match self.start {
            Start::Front => Cursor::front(self.nodes, self.root),
            Start::Back => Cursor::back(self.nodes, self.root),
        }
    }

    /// Returns the exhausted cursor that every traversal of this view finishes at
    pub fn end(&self) -> Cursor<'a, K, V> {
        Cursor::end(self.nodes)
    }
}

impl<'a, K, V> IntoIterator for EntryView<'a, K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, 'b, K, V> IntoIterator for &'b EntryView<'a, K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// A re-creatable traversal over the keys of a `TreeMap`
///
/// See [`EntryView`].
pub struct KeyView<'a, K, V> {
    inner: EntryView<'a, K, V>,
}

impl<'a, K, V> Clone for KeyView<'a, K, V> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<'a, K, V> Copy for KeyView<'a, K, V> {}

impl<'a, K: fmt::Debug, V> fmt::Debug for KeyView<'a, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<'a, K, V> KeyView<'a, K, V> {
    pub(super) fn new(inner: EntryView<'a, K, V>) -> Self {
        Self {inner}
    }

    /// Returns the end this view starts from
    pub fn start(&self) -> Start {
        self.inner.start()
    }

    /// Returns the number of keys the view walks over
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Returns true if the view has no keys to walk over
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Returns a fresh iterator walking away from the view's start
    pub fn iter(&self) -> Keys<'a, K, V> {
        Keys::new(self.inner.iter())
    }

    /// Returns a cursor at the view's start, or at the end if the map is empty
    pub fn cursor(&self) -> Cursor<'a, K, V> {
        self.inner.cursor()
    }

    /// Returns the exhausted cursor that every traversal of this view finishes at
    pub fn end(&self) -> Cursor<'a, K, V> {
        self.inner.end()
    }
}

impl<'a, K, V> IntoIterator for KeyView<'a, K, V> {
    type Item = &'a K;
    type IntoIter = Keys<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, 'b, K, V> IntoIterator for &'b KeyView<'a, K, V> {
    type Item = &'a K;
    type IntoIter = Keys<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// A re-creatable traversal over the values of a `TreeMap`, in the order of their keys
///
/// See [`EntryView`].
pub struct ValueView<'a, K, V> {
    inner: EntryView<'a, K, V>,
}

impl<'a, K, V> Clone for ValueView<'a, K, V> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<'a, K, V> Copy for ValueView<'a, K, V> {}

impl<'a, K, V: fmt::Debug> fmt::Debug for ValueView<'a, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<'a, K, V> ValueView<'a, K, V> {
    pub(super) fn new(inner: EntryView<'a, K, V>) -> Self {
        Self {inner}
    }

    /// Returns the end this view starts from
    pub fn start(&self) -> Start {
        self.inner.start()
    }

    /// Returns the number of values the view walks over
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Returns true if the view has no values to walk over
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Returns a fresh iterator walking away from the view's start
    pub fn iter(&self) -> Values<'a, K, V> {
        Values::new(self.inner.iter())
    }

    /// Returns a cursor at the view's start, or at the end if the map is empty
    pub fn cursor(&self) -> Cursor<'a, K, V> {
        self.inner.cursor()
    }

    /// Returns the exhausted cursor that every traversal of this view finishes at
    pub fn end(&self) -> Cursor<'a, K, V> {
        self.inner.end()
    }
}

impl<'a, K, V> IntoIterator for ValueView<'a, K, V> {
    type Item = &'a V;
    type IntoIter = Values<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, 'b, K, V> IntoIterator for &'b ValueView<'a, K, V> {
    type Item = &'a V;
    type IntoIter = Values<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use crate::{TreeMap, Start};

    #[test]
    fn views_are_restartable() {
        let map: TreeMap<_, _> = vec![(2, 'b'), (3, 'c'), (1, 'a')].into_iter().collect();
        let keys = map.keys();

        let first: Vec<_> = keys.iter().collect();
        let second: Vec<_> = keys.into_iter().collect();
        assert_eq!(first, second);
        assert_eq!(first, [&1, &2, &3]);
    }

    #[test]
    fn start_selects_direction() {
        let map: TreeMap<_, _> = vec![(2, 'b'), (3, 'c'), (1, 'a')].into_iter().collect();

        assert_eq!(map.keys().start(), Start::Front);
        assert_eq!(map.values_at(Start::Back).start(), Start::Back);

        let values: Vec<_> = map.values_at(Start::Back).into_iter().copied().collect();
        assert_eq!(values, ['c', 'b', 'a']);

        let entries: Vec<_> = map.entries_at(Start::Back).iter().rev().collect();
        assert_eq!(entries, [(&1, &'a'), (&2, &'b'), (&3, &'c')]);

        assert_eq!(map.keys_at(Start::Back).cursor().key(), Some(&3));
        assert_eq!(map.keys().cursor().key(), Some(&1));
    }

    #[test]
    fn empty_views() {
        let map: TreeMap<u8, u8> = TreeMap::new();

        for &start in &[Start::Front, Start::Back] {
            let view = map.entries_at(start);
            assert!(view.is_empty());
            assert_eq!(view.len(), 0);
            assert_eq!(view.iter().next(), None);
            assert_eq!(view.cursor(), view.end());
        }
    }

    #[test]
    fn view_debug() {
        let map: TreeMap<_, _> = vec![(1, 'a'), (2, 'b')].into_iter().collect();

        assert_eq!(format!("{:?}", map.keys()), "[1, 2]");
        assert_eq!(format!("{:?}", map.values_at(Start::Back)), "['b', 'a']");
        assert_eq!(format!("{:?}", map.entries()), "[(1, 'a'), (2, 'b')]");
    }
}
