use std::mem;
use std::num::NonZeroUsize;
use std::ops::{Index, IndexMut};
use std::collections::TryReserveError;

#[cfg(test)]
use static_assertions::const_assert_eq;

/// A handle to an occupied entry of a [`Slab`]
///
/// Internally this stores `index + 1` so that `Option<Ptr>` fits in a single word. Every link in
/// the tree (left, right, parent) is an `Option<Ptr>`, so this halves the size of each node's
/// link fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct Ptr(NonZeroUsize);

// Links are stored as `Option<Ptr>` in every node, keep them one word wide
#[cfg(test)]
const_assert_eq!(mem::size_of::<Option<Ptr>>(), mem::size_of::<usize>());

impl Ptr {
    /// Returns a pointer to the given index, or `None` if the index cannot be represented
    #[inline(always)]
    pub fn new(index: usize) -> Option<Self> {
        index.checked_add(1).and_then(NonZeroUsize::new).map(Ptr)
    }

    #[inline(always)]
    pub fn into_index(self) -> usize {
        self.0.get() - 1
    }
}

#[derive(Debug, Clone)]
enum Entry<T> {
    Occupied(T),
    Vacant {
        /// The next entry in the free list, if any
        next: Option<Ptr>,
    },
}

/// An allocation primitive similar to `Vec`, but implemented to reuse space from removed entries.
///
/// Entries never move: a `Ptr` returned from `push` stays valid until that entry is removed or the
/// slab is cleared, no matter how many other entries are pushed or removed. Removed entries are
/// threaded onto a free list and their space is handed out again by later pushes.
#[derive(Debug, Clone)]
pub struct Slab<T> {
    entries: Vec<Entry<T>>,
    /// The first entry in the free list, which is used as a stack
    free_head: Option<Ptr>,
    /// The length of the free list
    free_len: usize,
}

impl<T> Default for Slab<T> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            free_head: None,
            free_len: 0,
        }
    }
}

impl<T> Slab<T> {
    /// Creates an empty slab
    ///
    /// The slab is initially created with a capacity of 0, so it will not allocate until it is
    /// first pushed into.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty slab with space for at least `capacity` entries
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
            ..Self::default()
        }
    }

    /// Returns the number of occupied entries
    ///
    /// This is the number of items pushed minus the number of items removed
    pub fn len(&self) -> usize {
        self.entries.len() - self.free_len
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the number of entries the slab can hold without reallocating
    pub fn capacity(&self) -> usize {
        self.entries.capacity()
    }

    /// Returns a reference to the value behind `ptr`, or `None` if that entry is vacant
    pub fn get(&self, ptr: Ptr) -> Option<&T> {
        match self.entries.get(ptr.into_index())? {
            Entry::Occupied(value) => Some(value),
            Entry::Vacant {..} => None,
        }
    }

    /// Returns a mutable reference to the value behind `ptr`, or `None` if that entry is vacant
    pub fn get_mut(&mut self, ptr: Ptr) -> Option<&mut T> {
        match self.entries.get_mut(ptr.into_index())? {
            Entry::Occupied(value) => Some(value),
            Entry::Vacant {..} => None,
        }
    }

    /// Returns every entry in index order: `Some` for occupied entries, `None` for vacant ones
    ///
    /// The entry for a pointer `ptr` is at position `ptr.into_index()`. This hands out mutable
    /// references to all occupied values at once.
    pub fn slots_mut(&mut self) -> impl Iterator<Item = Option<&mut T>> + '_ {
        self.entries.iter_mut().map(|entry| match entry {
            Entry::Occupied(value) => Some(value),
            Entry::Vacant {..} => None,
        })
    }

    /// Pushes a value into the slab and returns a pointer to it.
    ///
    /// The value is placed in the most recently vacated entry if there is one, otherwise it is
    /// appended.
    pub fn push(&mut self, value: T) -> Ptr {
        if let Some(ptr) = self.free_head {
            let entry = &mut self.entries[ptr.into_index()];
            let next = match *entry {
                Entry::Vacant {next} => next,
                Entry::Occupied(_) => unreachable!("free list points at an occupied entry"),
            };
            *entry = Entry::Occupied(value);

            self.free_head = next;
            self.free_len -= 1;

            return ptr;
        }

        let index = self.entries.len();
        let ptr = match Ptr::new(index) {
            Some(ptr) => ptr,
            None => panic!("cannot have more than usize::MAX - 1 entries in slab"),
        };
        self.entries.push(Entry::Occupied(value));

        ptr
    }

    /// Like `push`, but reports allocation failure instead of aborting
    ///
    /// On error the slab is left unchanged.
    pub fn try_push(&mut self, value: T) -> Result<Ptr, TryReserveError> {
        if self.free_head.is_none() {
            self.entries.try_reserve(1)?;
        }

        Ok(self.push(value))
    }

    /// Removes the value behind `ptr` and returns it
    ///
    /// The entry's space will be reused by a future `push`. No other entry moves.
    ///
    /// # Panics
    ///
    /// Panics if `ptr` does not refer to an occupied entry.
    pub fn remove(&mut self, ptr: Ptr) -> T {
        let entry = &mut self.entries[ptr.into_index()];
        let prev = mem::replace(entry, Entry::Vacant {next: self.free_head});

        match prev {
            Entry::Occupied(value) => {
                self.free_head = Some(ptr);
                self.free_len += 1;
                value
            },

            Entry::Vacant {next} => {
                // Put the entry back the way it was before reporting the bad pointer
                *entry = Entry::Vacant {next};
                panic!("attempt to remove a vacant slab entry");
            },
        }
    }

    /// Removes every value from the slab, dropping each one exactly once.
    ///
    /// Has no effect on the allocated capacity. Invalidates every previously returned `Ptr`.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.free_head = None;
        self.free_len = 0;
    }

    /// Reserves capacity for at least `additional` more entries
    pub fn reserve(&mut self, additional: usize) {
        self.entries.reserve(additional.saturating_sub(self.free_len))
    }

    /// Fallible version of `reserve`
    pub fn try_reserve(&mut self, additional: usize) -> Result<(), TryReserveError> {
        self.entries.try_reserve(additional.saturating_sub(self.free_len))
    }

    /// Shrinks the capacity as close to the number of entries (occupied or vacant) as possible
    pub fn shrink_to_fit(&mut self) {
        self.entries.shrink_to_fit()
    }
}

impl<T> Index<Ptr> for Slab<T> {
    type Output = T;

    fn index(&self, ptr: Ptr) -> &T {
        match self.get(ptr) {
            Some(value) => value,
            None => panic!("slab pointer {} does not refer to an occupied entry", ptr.into_index()),
        }
    }
}

impl<T> IndexMut<Ptr> for Slab<T> {
    fn index_mut(&mut self, ptr: Ptr) -> &mut T {
        match self.get_mut(ptr) {
            Some(value) => value,
            None => panic!("slab pointer {} does not refer to an occupied entry", ptr.into_index()),
        }
    }
}
