//! Core data models for favmark
//!
//! Defines the fundamental data structures used throughout favmark:
//! - `StyleConfig`: user-configurable marker style (icon + fill mode)
//! - `PersistedState`: the single JSON document written to storage
//! - `KNOWN_ICONS`: the icon table offered by the style picker

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Default marker icon
pub const DEFAULT_ICON: &str = "star";

/// Icon names accepted for markers.
///
/// Kept small on purpose; the host's icon primitive is free to support more,
/// but the picker only offers these.
pub const KNOWN_ICONS: &[&str] = &[
    "star", "heart", "bookmark", "flag", "pin", "tag", "bell", "gem", "sun", "zap",
];

/// Check an icon name against the known icon table
pub fn is_known_icon(name: &str) -> bool {
    KNOWN_ICONS.contains(&name)
}

/// Marker style shared by every decoration in the process.
///
/// `filled` is secondary emphasis: it only ever shows on a marker whose
/// favorited flag is set, regardless of this setting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StyleConfig {
    /// Icon name rendered inside each marker
    #[serde(default = "default_icon")]
    pub icon: String,

    /// Render favorited markers filled instead of outlined
    #[serde(default)]
    pub filled: bool,
}

fn default_icon() -> String {
    DEFAULT_ICON.to_string()
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            icon: default_icon(),
            filled: false,
        }
    }
}

/// The persisted settings document.
///
/// Serialized as one flat JSON object: `{"icon": ..., "filled": ...,
/// "favorites": [...]}`. Fields written by newer versions (or other tools
/// sharing the file) survive a load/save round-trip through `extra`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PersistedState {
    #[serde(flatten)]
    pub style: StyleConfig,

    #[serde(default)]
    pub favorites: Vec<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_style_config_default() {
        let style = StyleConfig::default();
        assert_eq!(style.icon, "star");
        assert!(!style.filled);
    }

    #[test]
    fn test_persisted_state_flat_layout() {
        let state = PersistedState {
            style: StyleConfig {
                icon: "heart".to_string(),
                filled: true,
            },
            favorites: vec!["a.md".to_string()],
            extra: Map::new(),
        };

        let json = serde_json::to_value(&state).unwrap();
        assert_eq!(json["icon"], "heart");
        assert_eq!(json["filled"], true);
        assert_eq!(json["favorites"][0], "a.md");
    }

    #[test]
    fn test_persisted_state_defaults_on_empty_object() {
        let state: PersistedState = serde_json::from_str("{}").unwrap();
        assert_eq!(state.style.icon, "star");
        assert!(!state.style.filled);
        assert!(state.favorites.is_empty());
    }

    #[test]
    fn test_persisted_state_preserves_unknown_fields() {
        let state: PersistedState =
            serde_json::from_str(r#"{"icon":"pin","favorites":[],"theme":"dark"}"#).unwrap();
        assert_eq!(state.extra.get("theme").unwrap(), "dark");

        let json = serde_json::to_value(&state).unwrap();
        assert_eq!(json["theme"], "dark");
    }

    #[test]
    fn test_known_icon_table() {
        assert!(is_known_icon("star"));
        assert!(!is_known_icon("dragon"));
    }
}
