use std::collections::BTreeMap;

use proptest::prelude::*;

use treemap::{TreeMap, Start};

#[derive(Debug, Clone)]
enum Op {
    Place(u8, u16),
    Remove(u8),
    GetOrInsertDefault(u8),
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => (any::<u8>(), any::<u16>()).prop_map(|(key, value)| Op::Place(key, value)),
        2 => any::<u8>().prop_map(Op::Remove),
        1 => any::<u8>().prop_map(Op::GetOrInsertDefault),
    ]
}

/// Runs `ops` against both a `TreeMap` and the standard library's ordered map
fn apply(ops: &[Op]) -> (TreeMap<u8, u16>, BTreeMap<u8, u16>) {
    let mut map = TreeMap::new();
    let mut model = BTreeMap::new();

    for op in ops {
        match *op {
            Op::Place(key, value) => {
                assert_eq!(map.place(key, value), model.insert(key, value).is_some());
            },
            Op::Remove(key) => {
                assert_eq!(map.remove(&key), model.remove(&key).is_some());
            },
            Op::GetOrInsertDefault(key) => {
                assert_eq!(map.get_or_insert_default(key), model.entry(key).or_default());
            },
        }
    }

    (map, model)
}

fn ops() -> impl Strategy<Value = Vec<Op>> {
    prop::collection::vec(op(), 0..200)
}

proptest! {
    #[test]
    fn traversal_is_ordered_both_ways(ops in ops()) {
        let (map, _) = apply(&ops);

        let keys: Vec<_> = map.keys().into_iter().copied().collect();
        prop_assert!(keys.windows(2).all(|pair| pair[0] < pair[1]));

        let mut reversed: Vec<_> = map.keys_at(Start::Back).into_iter().copied().collect();
        prop_assert!(reversed.windows(2).all(|pair| pair[0] > pair[1]));

        reversed.reverse();
        prop_assert_eq!(keys, reversed);
    }

    #[test]
    fn len_is_number_of_cursor_steps(ops in ops()) {
        let (map, _) = apply(&ops);

        let mut steps = 0;
        let mut cursor = map.entries().cursor();
        while !cursor.is_end() {
            steps += 1;
            cursor.move_next();
        }
        prop_assert_eq!(steps, map.len());

        let mut steps = 0;
        let mut cursor = map.entries_at(Start::Back).cursor();
        while !cursor.is_end() {
            steps += 1;
            cursor.move_prev();
        }
        prop_assert_eq!(steps, map.len());
    }

    #[test]
    fn matches_ordered_model(ops in ops()) {
        let (map, model) = apply(&ops);

        prop_assert_eq!(map.len(), model.len());
        prop_assert!(map.iter().eq(model.iter()));
        for key in 0..=u8::MAX {
            prop_assert_eq!(map.get(&key), model.get(&key));
        }
    }

    #[test]
    fn overwrite_keeps_len(ops in ops(), key: u8, first: u16, second: u16) {
        let (mut map, _) = apply(&ops);

        map.place(key, first);
        let len = map.len();
        prop_assert!(map.place(key, second));
        prop_assert_eq!(map.len(), len);
        prop_assert_eq!(map.get(&key), Some(&second));
    }

    #[test]
    fn removal_shrinks_by_one(ops in ops(), key: u8) {
        let (mut map, _) = apply(&ops);
        let len = map.len();
        let shape: Vec<_> = map.iter_preorder().map(|(k, v)| (*k, *v)).collect();

        if map.contains_key(&key) {
            prop_assert!(map.remove(&key));
            prop_assert_eq!(map.len(), len - 1);
            prop_assert!(!map.contains_key(&key));
        } else {
            prop_assert!(!map.remove(&key));
            prop_assert_eq!(map.len(), len);
            let after: Vec<_> = map.iter_preorder().map(|(k, v)| (*k, *v)).collect();
            prop_assert_eq!(shape, after);
        }
    }

    #[test]
    fn clear_resets(ops in ops()) {
        let (mut map, _) = apply(&ops);

        map.clear();
        prop_assert_eq!(map.len(), 0);
        prop_assert_eq!(map.iter().count(), 0);

        map.clear();
        prop_assert!(map.is_empty());
    }

    #[test]
    fn custom_comparator_orders_keys(keys in prop::collection::vec(any::<i16>(), 0..100)) {
        let mut map = TreeMap::with_comparator(|a: &i16, b: &i16| b.cmp(a));
        for &key in &keys {
            map.place(key, ());
        }

        let mut expected = keys.clone();
        expected.sort_unstable_by(|a, b| b.cmp(a));
        expected.dedup();

        let actual: Vec<_> = map.keys().into_iter().copied().collect();
        prop_assert_eq!(actual, expected);
    }
}
