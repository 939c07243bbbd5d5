//! Desktop shell runtime: window manager, floating window geometry, feature gating, dialogs,
//! settings, notifications and the Leptos components that render them.

pub mod admin;
pub mod capture;
pub mod components;
pub mod dialog;
mod effect_executor;
pub mod features;
pub mod floating;
pub mod menus;
pub mod model;
pub mod notifications;
pub mod persistence;
pub mod reducer;
mod runtime_context;
pub mod settings;
pub mod subscription;
mod window_manager;

pub use components::{
    use_desktop_runtime, use_feature_window, ConfirmDialog, CreateDialog, DesktopProvider,
    DesktopRuntimeContext, DesktopShell, DialogVariant, FeatureWindow, FeatureWindowContext,
    FloatingWindow,
};
pub use features::{feature_catalog, feature_descriptor, resolve_feature_gate, FeatureGate};
pub use model::*;
pub use notifications::{NotificationAction, NotificationLevel, NotificationStore};
pub use reducer::{reduce_desktop, DesktopAction, ReducerError, RuntimeEffect};
pub use settings::{SettingKey, SettingsStore};
