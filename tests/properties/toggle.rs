//! Property tests for the favorite set

use proptest::prelude::*;

use favmark::{FavoriteStore, MemoryStorage};

fn path_id() -> impl Strategy<Value = String> {
    // Printable path-ish identifiers, short enough to keep cases fast.
    proptest::string::string_regex("[a-z0-9/_.\\-]{1,24}").unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: toggling any path twice restores the original membership
    /// and the original persisted array.
    #[test]
    fn property_double_toggle_is_identity(
        seed in proptest::collection::hash_set(path_id(), 0..16),
        path in path_id(),
    ) {
        let storage = MemoryStorage::new();
        let mut store = FavoriteStore::load(Box::new(storage.clone()));
        for p in &seed {
            store.toggle(p);
        }

        let was_favorite = store.is_favorite(&path);
        let persisted_before = storage.snapshot().map(|s| s.favorites);

        let first = store.toggle(&path);
        prop_assert_eq!(first, !was_favorite);

        let second = store.toggle(&path);
        prop_assert_eq!(second, was_favorite);
        prop_assert_eq!(store.is_favorite(&path), was_favorite);

        // Seeded stores always persisted at least once, so compare arrays
        // whenever a before-snapshot exists.
        if let Some(before) = persisted_before {
            prop_assert_eq!(storage.snapshot().unwrap().favorites, before);
        }
    }

    /// PROPERTY: removing an absent path never changes the persisted set.
    #[test]
    fn property_remove_absent_is_noop(
        seed in proptest::collection::hash_set(path_id(), 1..16),
        absent in path_id(),
    ) {
        let storage = MemoryStorage::new();
        let mut store = FavoriteStore::load(Box::new(storage.clone()));
        for p in &seed {
            store.toggle(p);
        }
        prop_assume!(!store.is_favorite(&absent));

        let before = storage.snapshot().unwrap().favorites;
        store.remove(&absent);
        prop_assert_eq!(storage.snapshot().unwrap().favorites, before);
    }

    /// PROPERTY: membership equals the persisted array, sorted, after any
    /// toggle sequence.
    #[test]
    fn property_persisted_array_mirrors_membership(
        ops in proptest::collection::vec(path_id(), 1..32),
    ) {
        let storage = MemoryStorage::new();
        let mut store = FavoriteStore::load(Box::new(storage.clone()));
        for p in &ops {
            store.toggle(p);
        }

        let persisted = storage.snapshot().unwrap().favorites;
        prop_assert_eq!(persisted.len(), store.len());
        for p in &persisted {
            prop_assert!(store.is_favorite(p));
        }
        let mut sorted = persisted.clone();
        sorted.sort();
        prop_assert_eq!(persisted, sorted);
    }
}
