//! Runtime provider and context wiring for the desktop shell.
//!
//! This module owns the long-lived reducer container, the runtime effect queue, the per-root
//! settings and notification stores, and the database/auth status snapshots consumed by feature
//! gating. UI composition stays in [`crate::components`].
#![allow(clippy::clone_on_copy)]

use std::rc::Rc;

use desktop_window_contract::FeatureWindowKind;
use leptos::*;
use platform_host::{unix_time_ms_now, AuthStatus, DatabaseStatus, HostServices};

use crate::{
    effect_executor,
    features::feature_descriptor,
    model::{DesktopState, Viewport, TASKBAR_HEIGHT_PX},
    notifications::{
        Notification, NotificationAction, NotificationLevel, NotificationState, NotificationStore,
    },
    persistence::restore_window_dimensions,
    reducer::{reduce_desktop, DesktopAction, RuntimeEffect},
    settings::{SettingKey, SettingsStore, SyncOutcome},
};

#[derive(Clone, Copy)]
/// Leptos context for reading desktop runtime state and dispatching [`DesktopAction`] values.
pub struct DesktopRuntimeContext {
    /// Host service bundle injected by the entry layer.
    pub host: StoredValue<HostServices>,
    /// Reactive desktop state signal.
    pub state: RwSignal<DesktopState>,
    /// Queue of runtime effects emitted by the reducer and processed by the executor.
    pub effects: RwSignal<Vec<RuntimeEffect>>,
    /// Reducer dispatch callback.
    pub dispatch: Callback<DesktopAction>,
    /// Last observed database handle state.
    pub database_status: RwSignal<DatabaseStatus>,
    /// Last observed auth state.
    pub auth_status: RwSignal<AuthStatus>,
    /// Settings store for this root.
    pub settings: StoredValue<SettingsStore>,
    /// Bumped whenever the settings store publishes an event.
    pub settings_revision: RwSignal<u64>,
    /// Notification store for this root.
    pub notifications: StoredValue<NotificationStore>,
    /// Mirror of the notification store state for rendering.
    pub notification_state: RwSignal<NotificationState>,
    notification_seq: StoredValue<u64>,
}

impl DesktopRuntimeContext {
    /// Dispatches a reducer action through the runtime context callback.
    pub fn dispatch_action(&self, action: DesktopAction) {
        self.dispatch.call(action);
    }

    /// Reads a setting, tracking settings changes.
    pub fn setting(&self, key: SettingKey) -> String {
        let _ = self.settings_revision.get();
        self.settings.with_value(|settings| settings.get_setting(key))
    }

    /// Writes a setting and starts its database mirror write in the background.
    pub fn set_setting(&self, key: SettingKey, value: &str) {
        match self.settings.with_value(|settings| settings.set_setting(key, value)) {
            Ok(mirror_write) => spawn_local(mirror_write),
            Err(err) => logging::warn!("settings write rejected: {err}"),
        }
    }

    /// Opens a feature window, reusing the geometry remembered for its kind.
    pub fn open_feature(&self, kind: FeatureWindowKind) {
        let constraints = feature_descriptor(kind).constraints;
        let viewport = self.state.with_untracked(|state| state.viewport);
        let initial_dimensions = self.host.with_value(|host| {
            restore_window_dimensions(host.local_settings.as_ref(), kind, &constraints, viewport)
        });
        self.dispatch_action(DesktopAction::OpenWindow {
            kind,
            initial_dimensions,
        });
    }

    /// Adds a notification to this root's store.
    pub fn push_notification(
        &self,
        title: impl Into<String>,
        message: impl Into<String>,
        level: NotificationLevel,
    ) {
        let Some(seq) = self.notification_seq.try_update_value(|seq| {
            *seq += 1;
            *seq
        }) else {
            return;
        };
        let now = unix_time_ms_now();
        let notification = Notification {
            id: format!("notification-{now}-{seq}"),
            title: title.into(),
            message: message.into(),
            level,
            created_at_ms: now,
            read: false,
        };
        self.notifications
            .with_value(|store| store.dispatch(NotificationAction::Ingest(notification)));
    }

    /// Re-reads database and auth status from the host.
    pub fn refresh_host_status(&self) {
        let Some((database, auth)) = self
            .host
            .try_with_value(|host| (host.database.status(), host.auth.status()))
        else {
            return;
        };
        if self
            .database_status
            .try_get_untracked()
            .is_some_and(|current| current != database)
        {
            self.database_status.try_set(database);
        }
        if self
            .auth_status
            .try_get_untracked()
            .is_some_and(|current| current != auth)
        {
            self.auth_status.try_set(auth);
        }
    }

    /// Unlocks the database and pulls mirrored settings.
    pub async fn unlock_database(self, password: String) -> Result<(), String> {
        let database = self
            .host
            .try_with_value(|host| Rc::clone(&host.database))
            .ok_or_else(|| "desktop runtime disposed".to_string())?;
        let result = database.unlock(&password).await;
        self.refresh_host_status();
        result?;

        if let Some(settings) = self.settings.try_get_value() {
            if settings.sync_from_database().await == SyncOutcome::Failed {
                self.push_notification(
                    "Settings not synced",
                    "Settings could not be loaded from the database and will sync on next unlock.",
                    NotificationLevel::Warning,
                );
            }
        }
        Ok(())
    }

    /// Locks the database; the next unlock syncs settings again.
    pub async fn lock_database(self) -> Result<(), String> {
        let database = self
            .host
            .try_with_value(|host| Rc::clone(&host.database))
            .ok_or_else(|| "desktop runtime disposed".to_string())?;
        let result = database.lock().await;
        if result.is_ok() {
            self.settings.try_with_value(SettingsStore::on_lock);
        }
        self.refresh_host_status();
        result
    }

    pub async fn login(self, email: String, password: String) -> Result<(), String> {
        let auth = self
            .host
            .try_with_value(|host| Rc::clone(&host.auth))
            .ok_or_else(|| "desktop runtime disposed".to_string())?;
        let result = auth.login(&email, &password).await;
        self.refresh_host_status();
        result
    }

    pub async fn logout(self) -> Result<(), String> {
        let auth = self
            .host
            .try_with_value(|host| Rc::clone(&host.auth))
            .ok_or_else(|| "desktop runtime disposed".to_string())?;
        let result = auth.logout().await;
        self.refresh_host_status();
        result
    }
}

/// Desktop area currently available to windows.
pub(crate) fn browser_viewport() -> Viewport {
    let Some(window) = web_sys::window() else {
        return Viewport::default();
    };
    let dimension = |value: Result<wasm_bindgen::JsValue, wasm_bindgen::JsValue>| {
        value.ok().and_then(|value| value.as_f64()).map(|px| px as i32)
    };
    match (dimension(window.inner_width()), dimension(window.inner_height())) {
        (Some(width), Some(height)) => Viewport::new(width, (height - TASKBAR_HEIGHT_PX).max(0)),
        _ => Viewport::default(),
    }
}

fn install_store_bridges(runtime: DesktopRuntimeContext) {
    let settings_subscription = runtime.settings.with_value(|settings| {
        settings.subscribe(move |_| {
            runtime.settings_revision.try_update(|revision| *revision += 1);
        })
    });
    let notification_subscription = runtime.notifications.with_value(|store| {
        store.subscribe(move |state| {
            runtime.notification_state.try_set(state.clone());
        })
    });
    on_cleanup(move || {
        drop(settings_subscription);
        drop(notification_subscription);
    });

    let resize_listener = window_event_listener(ev::resize, move |_| {
        runtime.dispatch_action(DesktopAction::ViewportChanged {
            viewport: browser_viewport(),
        });
    });
    on_cleanup(move || resize_listener.remove());
}

#[component]
/// Provides [`DesktopRuntimeContext`] to descendant components.
pub fn DesktopProvider(
    /// Injected browser or stub host bundle assembled by the entry layer.
    host_services: HostServices,
    children: Children,
) -> impl IntoView {
    let settings = SettingsStore::new(
        Rc::clone(&host_services.local_settings),
        Rc::clone(&host_services.settings_mirror),
    );
    let notifications = NotificationStore::default();
    let database_status = create_rw_signal(host_services.database.status());
    let auth_status = create_rw_signal(host_services.auth.status());
    let notification_state = create_rw_signal(notifications.state());
    let host = store_value(host_services);
    let state = create_rw_signal(DesktopState {
        viewport: browser_viewport(),
        ..DesktopState::default()
    });
    let effects = create_rw_signal(Vec::<RuntimeEffect>::new());

    let dispatch = Callback::new(move |action: DesktopAction| {
        let mut desktop = state.get_untracked();
        let previous = desktop.clone();

        match reduce_desktop(&mut desktop, action) {
            Ok(new_effects) => {
                if desktop != previous {
                    state.set(desktop);
                }
                if !new_effects.is_empty() {
                    let mut queue = effects.get_untracked();
                    queue.extend(new_effects);
                    effects.set(queue);
                }
            }
            Err(err) => logging::warn!("desktop reducer error: {err}"),
        }
    });

    let runtime = DesktopRuntimeContext {
        host,
        state,
        effects,
        dispatch,
        database_status,
        auth_status,
        settings: store_value(settings),
        settings_revision: create_rw_signal(0),
        notifications: store_value(notifications),
        notification_state,
        notification_seq: store_value(0),
    };

    provide_context(runtime.clone());

    install_store_bridges(runtime);
    effect_executor::install(runtime);
    logging::log!(
        "desktop runtime ready (host strategy: {})",
        runtime.host.with_value(|host| host.host_strategy.as_str())
    );

    children().into_view()
}

/// Returns the current [`DesktopRuntimeContext`].
///
/// # Panics
///
/// Panics if called outside [`DesktopProvider`].
pub fn use_desktop_runtime() -> DesktopRuntimeContext {
    use_context::<DesktopRuntimeContext>().expect("DesktopRuntimeContext not provided")
}
