//! Remembered window geometry, kept in local settings storage per feature kind.

use desktop_window_contract::{FeatureWindowKind, WindowDimensions};
use platform_host::{
    storage::local_settings::{load_json_with, save_json_with},
    LocalSettingsStore,
};

use crate::{
    floating::fit_to_viewport,
    model::{Viewport, WindowConstraints},
};

const WINDOW_DIMENSIONS_KEY_PREFIX: &str = "window-dimensions:";

/// Storage key holding the last committed geometry for `kind`.
pub fn window_dimensions_key(kind: FeatureWindowKind) -> String {
    format!("{WINDOW_DIMENSIONS_KEY_PREFIX}{}", kind.token())
}

/// Loads remembered geometry for `kind`. Missing or undecodable entries read as `None`.
pub fn load_window_dimensions(
    store: &dyn LocalSettingsStore,
    kind: FeatureWindowKind,
) -> Option<WindowDimensions> {
    let dimensions: WindowDimensions = load_json_with(store, &window_dimensions_key(kind))?;
    (dimensions.width > 0 && dimensions.height > 0).then_some(dimensions)
}

/// Loads remembered geometry for `kind` fitted into the current `viewport`.
pub fn restore_window_dimensions(
    store: &dyn LocalSettingsStore,
    kind: FeatureWindowKind,
    constraints: &WindowConstraints,
    viewport: Viewport,
) -> Option<WindowDimensions> {
    load_window_dimensions(store, kind)
        .map(|dimensions| fit_to_viewport(dimensions, constraints, viewport))
}

/// Persists geometry for the next window of `kind`.
pub fn save_window_dimensions(
    store: &dyn LocalSettingsStore,
    kind: FeatureWindowKind,
    dimensions: &WindowDimensions,
) -> Result<(), String> {
    save_json_with(store, &window_dimensions_key(kind), dimensions)
}

#[cfg(test)]
mod tests {
    use desktop_window_contract::WindowRect;
    use platform_host::MemoryLocalSettingsStore;
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn dimensions_round_trip_per_kind() {
        let store = MemoryLocalSettingsStore::default();
        let dims = WindowDimensions::from_rect(WindowRect {
            x: 10,
            y: 20,
            width: 500,
            height: 400,
        });
        save_window_dimensions(&store, FeatureWindowKind::Photos, &dims).expect("save");

        assert_eq!(
            load_window_dimensions(&store, FeatureWindowKind::Photos),
            Some(dims)
        );
        assert_eq!(load_window_dimensions(&store, FeatureWindowKind::Audio), None);
        assert!(store.load_raw("window-dimensions:photos").is_some());
    }

    #[test]
    fn restored_geometry_fits_the_current_viewport() {
        let store = MemoryLocalSettingsStore::default();
        let saved = WindowDimensions::from_rect(WindowRect {
            x: 2400,
            y: 1300,
            width: 1800,
            height: 1000,
        });
        save_window_dimensions(&store, FeatureWindowKind::Contacts, &saved).expect("save");
        let constraints = WindowConstraints {
            default_width: 600,
            default_height: 400,
            min_width: 300,
            min_height: 200,
            max_width_percent: 90,
            max_height_percent: 90,
        };

        let restored = restore_window_dimensions(
            &store,
            FeatureWindowKind::Contacts,
            &constraints,
            Viewport::new(1000, 800),
        )
        .expect("remembered");
        assert_eq!(
            restored.rect(),
            WindowRect {
                x: 100,
                y: 80,
                width: 900,
                height: 720,
            }
        );
        assert_eq!(
            restore_window_dimensions(
                &store,
                FeatureWindowKind::Audio,
                &constraints,
                Viewport::new(1000, 800),
            ),
            None
        );
    }

    #[test]
    fn degenerate_or_garbage_entries_are_ignored() {
        let store = MemoryLocalSettingsStore::with_entries([
            ("window-dimensions:help", "not json"),
            (
                "window-dimensions:email",
                r#"{"x":0,"y":0,"width":0,"height":300}"#,
            ),
        ]);
        assert_eq!(load_window_dimensions(&store, FeatureWindowKind::Help), None);
        assert_eq!(load_window_dimensions(&store, FeatureWindowKind::Email), None);
    }
}
