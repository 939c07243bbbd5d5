//! Shared contract types between the desktop window manager and the feature windows it hosts.
//!
//! Feature windows never talk to the manager directly. They receive a [`WindowController`]
//! bundling the lifecycle callbacks for their window, plus the [`WindowDimensions`] they were
//! opened with, and declare what they need from the shell through [`FeatureCapabilities`].

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

use leptos::{Callable, Callback};
use serde::{Deserialize, Serialize};

/// Stable identifier for a managed window instance.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct WindowInstanceId(String);

impl WindowInstanceId {
    /// Wraps a caller-supplied id.
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Returns the string form of the identifier.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// DOM id used for the window root element.
    pub fn dom_id(&self) -> String {
        format!("floating-window-{}", self.0)
    }
}

impl std::fmt::Display for WindowInstanceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Feature areas that can be opened as floating windows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FeatureWindowKind {
    /// Audio library and player.
    Audio,
    /// Email client.
    Email,
    /// Help and documentation.
    Help,
    /// Local model management.
    Models,
    /// Encrypted backup and restore.
    Backup,
    /// Business records.
    Businesses,
    /// Classic (legacy) notes view.
    Classic,
    /// Cross-device sync.
    Sync,
    /// Camera capture.
    Camera,
    /// AI assistant.
    Ai,
    /// Contacts.
    Contacts,
    /// Photos.
    Photos,
    /// Health tracking.
    Health,
    /// Wallet.
    Wallet,
    /// Shell settings.
    Settings,
    /// Notification center.
    Notifications,
    /// Admin: organizations.
    AdminOrganizations,
    /// Admin: groups.
    AdminGroups,
    /// Admin: active sessions.
    AdminSessions,
}

impl FeatureWindowKind {
    /// Every kind, in launcher order.
    pub const ALL: [Self; 19] = [
        Self::Contacts,
        Self::Photos,
        Self::Email,
        Self::Audio,
        Self::Camera,
        Self::Health,
        Self::Wallet,
        Self::Businesses,
        Self::Classic,
        Self::Ai,
        Self::Models,
        Self::Backup,
        Self::Sync,
        Self::Help,
        Self::Settings,
        Self::Notifications,
        Self::AdminOrganizations,
        Self::AdminGroups,
        Self::AdminSessions,
    ];

    /// Stable kebab-case token used in the feature catalog, window ids and storage keys.
    pub const fn token(self) -> &'static str {
        match self {
            Self::Audio => "audio",
            Self::Email => "email",
            Self::Help => "help",
            Self::Models => "models",
            Self::Backup => "backup",
            Self::Businesses => "businesses",
            Self::Classic => "classic",
            Self::Sync => "sync",
            Self::Camera => "camera",
            Self::Ai => "ai",
            Self::Contacts => "contacts",
            Self::Photos => "photos",
            Self::Health => "health",
            Self::Wallet => "wallet",
            Self::Settings => "settings",
            Self::Notifications => "notifications",
            Self::AdminOrganizations => "admin-organizations",
            Self::AdminGroups => "admin-groups",
            Self::AdminSessions => "admin-sessions",
        }
    }

    /// Parses a catalog token.
    pub fn from_token(token: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.token() == token)
    }
}

/// Shell preconditions a feature window needs before its content may render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FeatureCapabilities {
    /// Requires the encrypted database to be unlocked.
    pub needs_database: bool,
    /// Requires an authenticated server session.
    pub needs_auth: bool,
}

impl FeatureCapabilities {
    /// No preconditions.
    pub const NONE: Self = Self {
        needs_database: false,
        needs_auth: false,
    };

    /// Requires an unlocked database only.
    pub const DATABASE: Self = Self {
        needs_database: true,
        needs_auth: false,
    };

    /// Requires both an unlocked database and an authenticated session.
    pub const DATABASE_AND_AUTH: Self = Self {
        needs_database: true,
        needs_auth: true,
    };
}

/// Plain window rectangle in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowRect {
    /// Left edge.
    pub x: i32,
    /// Top edge.
    pub y: i32,
    /// Width.
    pub width: i32,
    /// Height.
    pub height: i32,
}

/// Geometry of one floating window.
///
/// `pre_maximize_dimensions` is only populated while `is_maximized` is true.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WindowDimensions {
    /// Left edge.
    pub x: i32,
    /// Top edge.
    pub y: i32,
    /// Width.
    pub width: i32,
    /// Height.
    pub height: i32,
    /// Whether the window currently fills the viewport.
    #[serde(default)]
    pub is_maximized: bool,
    /// Geometry to restore when leaving the maximized state.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pre_maximize_dimensions: Option<WindowRect>,
}

impl WindowDimensions {
    /// Builds non-maximized dimensions from a rectangle.
    pub const fn from_rect(rect: WindowRect) -> Self {
        Self {
            x: rect.x,
            y: rect.y,
            width: rect.width,
            height: rect.height,
            is_maximized: false,
            pre_maximize_dimensions: None,
        }
    }

    /// Returns the current rectangle.
    pub const fn rect(&self) -> WindowRect {
        WindowRect {
            x: self.x,
            y: self.y,
            width: self.width,
            height: self.height,
        }
    }

    /// Returns these dimensions maximized into `viewport`, remembering the current rectangle.
    ///
    /// Maximizing twice keeps the originally remembered rectangle.
    pub fn maximized_into(self, viewport: WindowRect) -> Self {
        let remembered = if self.is_maximized {
            self.pre_maximize_dimensions.unwrap_or(self.rect())
        } else {
            self.rect()
        };
        Self {
            x: viewport.x,
            y: viewport.y,
            width: viewport.width,
            height: viewport.height,
            is_maximized: true,
            pre_maximize_dimensions: Some(remembered),
        }
    }

    /// Returns these dimensions restored from the maximized state.
    ///
    /// Non-maximized dimensions are returned unchanged.
    pub fn restored(self) -> Self {
        if !self.is_maximized {
            return self;
        }
        match self.pre_maximize_dimensions {
            Some(rect) => Self::from_rect(rect),
            None => Self {
                is_maximized: false,
                pre_maximize_dimensions: None,
                ..self
            },
        }
    }
}

/// Lifecycle callbacks the window manager hands to one managed window.
///
/// Replaces passing `on_close`, `on_minimize`, `on_focus` and `on_dimensions_change`
/// separately through every wrapper.
#[derive(Clone)]
pub struct WindowController {
    /// Window this controller belongs to.
    pub window_id: WindowInstanceId,
    on_close: Callback<()>,
    on_minimize: Callback<()>,
    on_focus: Callback<()>,
    on_dimensions_change: Option<Callback<WindowDimensions>>,
}

impl WindowController {
    /// Creates a controller from the manager callbacks.
    pub fn new(
        window_id: WindowInstanceId,
        on_close: Callback<()>,
        on_minimize: Callback<()>,
        on_focus: Callback<()>,
    ) -> Self {
        Self {
            window_id,
            on_close,
            on_minimize,
            on_focus,
            on_dimensions_change: None,
        }
    }

    /// Adds a geometry-change hook.
    pub fn with_dimensions_change(mut self, callback: Callback<WindowDimensions>) -> Self {
        self.on_dimensions_change = Some(callback);
        self
    }

    /// Requests the manager close this window.
    pub fn close(&self) {
        self.on_close.call(());
    }

    /// Requests the manager minimize this window.
    pub fn minimize(&self) {
        self.on_minimize.call(());
    }

    /// Requests the manager raise and focus this window.
    pub fn focus(&self) {
        self.on_focus.call(());
    }

    /// Reports committed geometry after a drag, resize, maximize or restore.
    pub fn report_dimensions(&self, dimensions: WindowDimensions) {
        if let Some(callback) = self.on_dimensions_change.as_ref() {
            callback.call(dimensions);
        }
    }
}

impl std::fmt::Debug for WindowController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WindowController")
            .field("window_id", &self.window_id)
            .field("reports_dimensions", &self.on_dimensions_change.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rect(x: i32, y: i32, width: i32, height: i32) -> WindowRect {
        WindowRect {
            x,
            y,
            width,
            height,
        }
    }

    #[test]
    fn kind_tokens_round_trip() {
        for kind in FeatureWindowKind::ALL {
            assert_eq!(FeatureWindowKind::from_token(kind.token()), Some(kind));
        }
        assert_eq!(FeatureWindowKind::from_token("photos-v2"), None);
    }

    #[test]
    fn maximize_then_restore_returns_original_rect_verbatim() {
        let original = WindowDimensions::from_rect(rect(40, 60, 500, 380));
        let viewport = rect(0, 0, 1280, 760);

        let maximized = original.maximized_into(viewport);
        assert!(maximized.is_maximized);
        assert_eq!(maximized.rect(), viewport);
        assert_eq!(maximized.pre_maximize_dimensions, Some(original.rect()));

        let restored = maximized.restored();
        assert_eq!(restored, original);
        assert_eq!(restored.pre_maximize_dimensions, None);
    }

    #[test]
    fn maximizing_twice_keeps_first_remembered_rect() {
        let original = WindowDimensions::from_rect(rect(10, 10, 400, 300));
        let twice = original
            .maximized_into(rect(0, 0, 1000, 700))
            .maximized_into(rect(0, 0, 1200, 800));
        assert_eq!(twice.pre_maximize_dimensions, Some(original.rect()));
        assert_eq!(twice.restored(), original);
    }

    #[test]
    fn dimensions_serialize_in_camel_case() {
        let dims = WindowDimensions::from_rect(rect(1, 2, 3, 4)).maximized_into(rect(0, 0, 9, 9));
        let json = serde_json::to_value(dims).expect("serialize");
        assert_eq!(json["isMaximized"], true);
        assert_eq!(json["preMaximizeDimensions"]["width"], 3);
    }
}
