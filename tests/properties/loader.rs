//! Property tests for the persistence loader

use proptest::prelude::*;

use favmark::{FavoriteStore, JsonFileStorage};
use tempfile::tempdir;

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 64,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: loading never panics on arbitrary file content; malformed
    /// documents degrade to the default state.
    #[test]
    fn property_load_never_panics(content in "(?s).{0,512}") {
        let dir = tempdir().unwrap();
        let path = dir.path().join("favorites.json");
        std::fs::write(&path, content).unwrap();

        let store = FavoriteStore::load(Box::new(JsonFileStorage::new(path)));
        // Either the content parsed as our document, or we got defaults.
        let _ = store.len();
    }

    /// PROPERTY: any favorites array of strings round-trips through the
    /// file backend.
    #[test]
    fn property_string_arrays_round_trip(
        favorites in proptest::collection::btree_set("[a-z0-9/._\\-]{1,16}", 0..12),
    ) {
        let dir = tempdir().unwrap();
        let path = dir.path().join("favorites.json");

        let mut store = FavoriteStore::load(Box::new(JsonFileStorage::new(path.clone())));
        for p in &favorites {
            store.toggle(p);
        }
        store.save();

        let reloaded = FavoriteStore::load(Box::new(JsonFileStorage::new(path)));
        prop_assert_eq!(reloaded.len(), favorites.len());
        for p in &favorites {
            prop_assert!(reloaded.is_favorite(p));
        }
    }
}
