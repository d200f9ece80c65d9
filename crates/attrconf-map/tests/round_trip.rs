//! Export/construct round-trip properties.

use attrconf_map::{AttributeMap, Key, PlainMap, PlainValue};
use proptest::prelude::*;

fn key_strategy() -> impl Strategy<Value = Key> {
    prop_oneof![
        4 => "[a-z][a-z0-9_-]{0,8}".prop_map(Key::Str),
        1 => any::<i64>().prop_map(Key::Int),
        1 => any::<bool>().prop_map(Key::Bool),
    ]
}

fn value_strategy() -> impl Strategy<Value = PlainValue> {
    let leaf = prop_oneof![
        Just(PlainValue::Null),
        any::<bool>().prop_map(PlainValue::Bool),
        any::<i64>().prop_map(PlainValue::Int),
        (-1.0e9f64..1.0e9).prop_map(PlainValue::Float),
        "[ -~]{0,12}".prop_map(PlainValue::Str),
    ];
    leaf.prop_recursive(4, 48, 6, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(PlainValue::List),
            prop::collection::vec(inner.clone(), 0..4)
                .prop_map(|items| PlainValue::Tuple(items.into())),
            prop::collection::vec((key_strategy(), inner), 0..5)
                .prop_map(|entries| PlainValue::Map(entries.into_iter().collect())),
        ]
    })
}

fn map_strategy() -> impl Strategy<Value = PlainMap> {
    prop::collection::vec((key_strategy(), value_strategy()), 0..6)
        .prop_map(|entries| entries.into_iter().collect())
}

proptest! {
    /// Exporting a freshly built map reproduces the input.
    #[test]
    fn to_plain_inverts_construction(plain in map_strategy()) {
        let map = AttributeMap::from_plain(plain.clone());
        prop_assert_eq!(map.to_plain(), plain);
    }

    /// Rebuilding from an export yields an equal map.
    #[test]
    fn construction_inverts_to_plain(plain in map_strategy()) {
        let map = AttributeMap::from_plain(plain);
        let rebuilt = AttributeMap::from_plain(map.to_plain());
        prop_assert_eq!(rebuilt, map);
    }

    /// A deep copy is equal to the original.
    #[test]
    fn deep_copy_is_equal(plain in map_strategy()) {
        let map = AttributeMap::from_plain(plain);
        prop_assert_eq!(map.deep_copy(), map);
    }
}
