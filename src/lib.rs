//! An ordered map backed by an unbalanced binary search tree.
//!
//! [`TreeMap`] keeps its entries sorted by a comparator chosen when the map is created and offers
//! in-order traversal from either end through key, value and entry views. The tree is never
//! rebalanced, so its shape (and cost) follows the order in which entries were placed and removed.
//!
//! ```
//! use treemap::{TreeMap, Start};
//!
//! let mut map = TreeMap::new();
//! map.place(2, "two");
//! map.place(1, "one");
//! *map.get_or_insert_default(3) = "three";
//!
//! let keys: Vec<_> = map.keys().into_iter().collect();
//! assert_eq!(keys, [&1, &2, &3]);
//!
//! let values: Vec<_> = map.values_at(Start::Back).into_iter().collect();
//! assert_eq!(values, [&"three", &"two", &"one"]);
//!
//! assert!(map.remove(&2));
//! map.clear();
//! assert!(map.is_empty());
//! ```

mod slab;
mod error;

pub mod map;

pub use compare::{Compare, Natural, natural};

pub use error::Error;
pub use map::{TreeMap, Start};

#[macro_export(local_inner_macros)]
macro_rules! treemap {
    // trailing comma case
    ($($key:expr => $value:expr,)+) => (treemap!($($key => $value),+));

    ( $($key:expr => $value:expr),* ) => {
        {
            let mut _map = $crate::TreeMap::new();
            $(
                let _ = _map.insert($key, $value);
            )*
            _map
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn treemap_macro() {
        let map = treemap! {
            1 => 2,
            3 => 4,
            2 => 3, // trailing comma
        };

        let pairs: Vec<(_, _)> = map.iter()
            .map(|(&key, &value)| (key, value))
            .collect();
        assert_eq!(&pairs, &[(1, 2), (2, 3), (3, 4)]);

        // No trailing comma
        let map = treemap![3 => 4];

        let pairs: Vec<(_, _)> = map.iter()
            .map(|(&key, &value)| (key, value))
            .collect();
        assert_eq!(&pairs, &[(3, 4)]);

        // Zero items
        let map = treemap!();

        let pairs: Vec<(i32, i32)> = map.iter()
            .map(|(&key, &value)| (key, value))
            .collect();
        assert_eq!(&pairs, &[]);
    }

    #[test]
    fn first_and_last() {
        let map = treemap! {5 => 'e', 1 => 'a', 9 => 'i'};
        assert_eq!(map.first_key_value(), Some((&1, &'a')));
        assert_eq!(map.last_key_value(), Some((&9, &'i')));

        let empty: TreeMap<i32, char> = TreeMap::new();
        assert_eq!(empty.first_key_value(), None);
        assert_eq!(empty.last_key_value(), None);
    }
}
