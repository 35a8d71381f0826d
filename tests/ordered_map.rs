use std::collections::BTreeMap;

use ordtree::order::Natural;
use ordtree::{OrderedMap, Strategy as Balancing, UnknownStrategy};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

/// The number of operations to perform in each proptest case.
const TEST_SIZE: usize = 2_000;

fn key_strategy() -> impl Strategy<Value = i64> {
    -1_000i64..1_000i64
}

fn value_strategy() -> impl Strategy<Value = i64> {
    any::<i64>()
}

fn balancing_strategy() -> impl Strategy<Value = Balancing> {
    prop_oneof![Just(Balancing::Avl), Just(Balancing::RedBlack)]
}

// ─── Operations enum for driving randomized tests ────────────────────────────

#[derive(Debug, Clone)]
enum MapOp {
    Insert(i64, i64),
    ReplaceOrInsert(i64, i64),
    Remove(i64),
    Get(i64),
    GetMut(i64),
    Greater(i64),
    LowerOrEqual(i64),
    First,
    Last,
    PopFirst,
    PopLast,
}

fn map_op_strategy() -> impl Strategy<Value = MapOp> {
    prop_oneof![
        4 => (key_strategy(), value_strategy()).prop_map(|(k, v)| MapOp::Insert(k, v)),
        2 => (key_strategy(), value_strategy()).prop_map(|(k, v)| MapOp::ReplaceOrInsert(k, v)),
        3 => key_strategy().prop_map(MapOp::Remove),
        2 => key_strategy().prop_map(MapOp::Get),
        1 => key_strategy().prop_map(MapOp::GetMut),
        1 => key_strategy().prop_map(MapOp::Greater),
        1 => key_strategy().prop_map(MapOp::LowerOrEqual),
        1 => Just(MapOp::First),
        1 => Just(MapOp::Last),
        1 => Just(MapOp::PopFirst),
        1 => Just(MapOp::PopLast),
    ]
}

// ─── Core CRUD operations ────────────────────────────────────────────────────

proptest! {
    #![proptest_config(ProptestConfig::with_cases(20))]

    /// Replays a random sequence of operations on both OrderedMap and
    /// BTreeMap and asserts identical results at every step.
    #[test]
    fn map_ops_match_btreemap(
        balancing in balancing_strategy(),
        ops in proptest::collection::vec(map_op_strategy(), TEST_SIZE),
    ) {
        let mut map: OrderedMap<i64, i64> = OrderedMap::with_strategy(balancing, Natural);
        let mut model: BTreeMap<i64, i64> = BTreeMap::new();

        for op in &ops {
            match op {
                MapOp::Insert(k, v) => {
                    prop_assert_eq!(map.insert(*k, *v), model.insert(*k, *v), "insert({}, {})", k, v);
                }
                MapOp::ReplaceOrInsert(k, v) => {
                    let expected = model.remove_entry(k);
                    model.insert(*k, *v);
                    prop_assert_eq!(map.replace_or_insert(*k, *v), expected, "replace_or_insert({}, {})", k, v);
                }
                MapOp::Remove(k) => {
                    prop_assert_eq!(map.remove_entry(k), model.remove_entry(k), "remove_entry({})", k);
                }
                MapOp::Get(k) => {
                    prop_assert_eq!(map.get_key_value(k), model.get_key_value(k), "get_key_value({})", k);
                }
                MapOp::GetMut(k) => {
                    if let Some(v) = map.get_mut(k) {
                        *v = v.wrapping_neg();
                    }
                    if let Some(v) = model.get_mut(k) {
                        *v = v.wrapping_neg();
                    }
                }
                MapOp::Greater(k) => {
                    prop_assert_eq!(map.get_greater(k), model.range(k + 1..).next(), "get_greater({})", k);
                }
                MapOp::LowerOrEqual(k) => {
                    prop_assert_eq!(map.get_lower_or_equal(k), model.range(..=k).next_back(), "get_lower_or_equal({})", k);
                }
                MapOp::First => {
                    prop_assert_eq!(map.first(), model.first_key_value(), "first()");
                }
                MapOp::Last => {
                    prop_assert_eq!(map.last(), model.last_key_value(), "last()");
                }
                MapOp::PopFirst => {
                    prop_assert_eq!(map.pop_first(), model.pop_first(), "pop_first()");
                }
                MapOp::PopLast => {
                    prop_assert_eq!(map.pop_last(), model.pop_last(), "pop_last()");
                }
            }
            prop_assert_eq!(map.len(), model.len(), "len mismatch after {:?}", op);
            prop_assert_eq!(map.is_empty(), model.is_empty(), "is_empty mismatch after {:?}", op);
        }

        prop_assert!(map.iter().eq(model.iter()), "iter() mismatch");
        prop_assert!(map.keys().rev().eq(model.keys().rev()), "keys().rev() mismatch");
        prop_assert!(map.values().eq(model.values()), "values() mismatch");
        prop_assert!(map.clone().into_iter().eq(model.clone().into_iter()), "into_iter() mismatch");
    }

    /// Tests ExactSizeIterator and DoubleEndedIterator behavior.
    #[test]
    fn iter_size_and_double_ended(entries in proptest::collection::vec((key_strategy(), value_strategy()), 1..TEST_SIZE)) {
        let map: OrderedMap<i64, i64> = entries.iter().copied().collect();
        prop_assert_eq!(map.iter().len(), map.len());

        let mut iter = map.iter();
        let mut seen = 0;
        while let Some((front, _)) = iter.next() {
            seen += 1;
            if let Some((back, _)) = iter.next_back() {
                prop_assert!(front < back);
                seen += 1;
            }
        }
        prop_assert_eq!(seen, map.len());
    }
}

// ─── Construction ────────────────────────────────────────────────────────────

#[test]
fn strategy_tags_parse_case_insensitively() {
    let map: OrderedMap<u8, u8> = OrderedMap::with_tag("Red-Black", Natural);
    assert_eq!(map.strategy(), Balancing::RedBlack);
    assert_eq!("AVL".parse::<Balancing>(), Ok(Balancing::Avl));
    assert!("splay".parse::<Balancing>().is_err());
}

#[test]
fn unknown_strategy_is_an_error_value() {
    fn validate(tag: &str) -> Result<Balancing, Box<dyn std::error::Error>> {
        Ok(tag.parse::<Balancing>()?)
    }
    let err = validate("btree").unwrap_err();
    assert!(err.is::<UnknownStrategy>());
    assert!(err.to_string().contains("unknown balancing strategy"));
}

#[test]
#[should_panic(expected = "`OrderedMap::with_tag()` - unknown balancing strategy")]
fn unknown_tag_panics() {
    let _: OrderedMap<u8, u8> = OrderedMap::with_tag("skiplist", Natural);
}

// ─── Scenarios ───────────────────────────────────────────────────────────────

#[test]
fn neighbour_queries_and_delete() {
    for balancing in [Balancing::Avl, Balancing::RedBlack] {
        let mut map = OrderedMap::with_strategy(balancing, Natural);
        for key in [5, 2, 3, 11, 7] {
            map.insert(key, key * 100);
        }
        assert_eq!(map.get(&2), Some(&200));
        assert_eq!(map.get_greater(&2), Some((&3, &300)));
        assert_eq!(map.get_lower_or_equal(&5), Some((&5, &500)));
        assert_eq!(map.get_lower(&2), None);
        assert_eq!(map.get_greater_or_equal(&8), Some((&11, &1100)));
        assert_eq!(map.last(), Some((&11, &1100)));

        assert_eq!(map.remove(&2), Some(200));
        assert_eq!(map.get(&2), None);
        assert!(!map.contains_key(&2));
        assert_eq!(map.len(), 4);
    }
}

#[test]
fn reverse_cursor_updates_and_removes() {
    let mut map: OrderedMap<u32, String> = (1..=6).map(|k| (k, k.to_string())).collect();
    let mut cursor = map.cursor_back_mut();
    while let Some(&key) = cursor.key() {
        if key % 2 == 0 {
            let ((removed, _), _) = cursor.remove();
            assert_eq!(removed, key);
        } else {
            if let Some(value) = cursor.value_mut() {
                value.push('!');
            }
            cursor.advance();
        }
    }
    assert_eq!(
        map.iter().map(|(k, v)| (*k, v.as_str())).collect::<Vec<_>>(),
        [(1, "1!"), (3, "3!"), (5, "5!")]
    );
}

#[test]
fn clear_then_reuse() {
    let mut map = OrderedMap::from([(1, 'a'), (2, 'b')]);
    map.clear();
    assert!(map.is_empty());
    assert_eq!(map.first(), None);
    map.insert(3, 'c');
    assert_eq!(map[&3], 'c');
}
