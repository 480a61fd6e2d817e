//! Marker rendering for decorated tree rows
//!
//! A `Marker` is the visual decoration attached to exactly one item node.
//! It carries two independent flags: `favorited` (base highlight) and
//! `filled` (secondary emphasis). Filled is only meaningful on a favorited
//! marker; rendering clears it whenever the status is off, even if the
//! style asks for fill.

use crate::models::StyleConfig;

/// Decoration attached to a single item node
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Marker {
    /// Icon name the host's icon primitive should draw
    pub icon: String,
    /// Base highlight: the path is currently a favorite
    pub favorited: bool,
    /// Secondary emphasis; never set when `favorited` is false
    pub filled: bool,
}

impl Marker {
    /// Build a marker for the given favorite status and style
    pub fn render(favorited: bool, style: &StyleConfig) -> Self {
        Self {
            icon: style.icon.clone(),
            favorited,
            filled: favorited && style.filled,
        }
    }

    /// Mutate an existing marker without recreating it.
    ///
    /// Keeps whatever the host has hung off the marker (listeners, layout)
    /// intact; only the visual flags and icon change.
    pub fn update_in_place(&mut self, favorited: bool, style: &StyleConfig) {
        self.icon.clone_from(&style.icon);
        self.favorited = favorited;
        self.filled = favorited && style.filled;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled_style() -> StyleConfig {
        StyleConfig {
            icon: "star".to_string(),
            filled: true,
        }
    }

    #[test]
    fn render_favorited_outline() {
        let marker = Marker::render(true, &StyleConfig::default());
        assert!(marker.favorited);
        assert!(!marker.filled);
    }

    #[test]
    fn render_favorited_filled() {
        let marker = Marker::render(true, &filled_style());
        assert!(marker.favorited);
        assert!(marker.filled);
    }

    #[test]
    fn filled_never_set_without_favorited() {
        let marker = Marker::render(false, &filled_style());
        assert!(!marker.favorited);
        assert!(!marker.filled);
    }

    #[test]
    fn update_in_place_clears_filled_on_unfavorite() {
        let style = filled_style();
        let mut marker = Marker::render(true, &style);
        assert!(marker.filled);

        marker.update_in_place(false, &style);
        assert!(!marker.favorited);
        assert!(!marker.filled);
    }

    #[test]
    fn update_in_place_tracks_icon_change() {
        let mut marker = Marker::render(true, &StyleConfig::default());
        let new_style = StyleConfig {
            icon: "heart".to_string(),
            filled: false,
        };

        marker.update_in_place(true, &new_style);
        assert_eq!(marker.icon, "heart");
    }
}
