//! Property tests for marker rendering

use proptest::prelude::*;

use favmark::{Marker, StyleConfig};

fn style() -> impl Strategy<Value = StyleConfig> {
    ("[a-z]{1,12}", any::<bool>()).prop_map(|(icon, filled)| StyleConfig { icon, filled })
}

proptest! {
    /// PROPERTY: the filled flag never appears on a non-favorited marker,
    /// for any style.
    #[test]
    fn property_filled_requires_favorited(status in any::<bool>(), style in style()) {
        let marker = Marker::render(status, &style);
        prop_assert_eq!(marker.favorited, status);
        prop_assert_eq!(marker.filled, status && style.filled);
    }

    /// PROPERTY: update_in_place converges to the same state as a fresh
    /// render, whatever the marker looked like before.
    #[test]
    fn property_update_matches_fresh_render(
        old_status in any::<bool>(),
        old_style in style(),
        status in any::<bool>(),
        new_style in style(),
    ) {
        let mut updated = Marker::render(old_status, &old_style);
        updated.update_in_place(status, &new_style);
        prop_assert_eq!(updated, Marker::render(status, &new_style));
    }
}
