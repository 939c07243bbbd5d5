//! Shell settings: a fixed key space read through cache, local storage and defaults, and mirrored
//! into the encrypted database while it is unlocked.

use std::{
    cell::{Cell, RefCell},
    collections::HashMap,
    rc::Rc,
};

use futures::future::{FutureExt, LocalBoxFuture};
use leptos::logging;
use platform_host::{LocalSettingsStore, SettingsMirror};
use thiserror::Error;

use crate::subscription::{ListenerSet, Subscription};

/// Every setting the shell understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SettingKey {
    Theme,
    Language,
    Tooltips,
    Font,
    IconDepth,
    IconBackground,
    WindowOpacity,
    BorderRadius,
    DesktopPattern,
    DesktopIconDepth,
    DesktopIconBackground,
}

impl SettingKey {
    pub const ALL: [Self; 11] = [
        Self::Theme,
        Self::Language,
        Self::Tooltips,
        Self::Font,
        Self::IconDepth,
        Self::IconBackground,
        Self::WindowOpacity,
        Self::BorderRadius,
        Self::DesktopPattern,
        Self::DesktopIconDepth,
        Self::DesktopIconBackground,
    ];

    /// Key used in local storage and in the database mirror.
    pub const fn storage_key(self) -> &'static str {
        match self {
            Self::Theme => "theme",
            Self::Language => "language",
            Self::Tooltips => "tooltips",
            Self::Font => "font",
            Self::IconDepth => "iconDepth",
            Self::IconBackground => "iconBackground",
            Self::WindowOpacity => "windowOpacity",
            Self::BorderRadius => "borderRadius",
            Self::DesktopPattern => "desktopPattern",
            Self::DesktopIconDepth => "desktopIconDepth",
            Self::DesktopIconBackground => "desktopIconBackground",
        }
    }

    pub fn from_storage_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|setting| setting.storage_key() == key)
    }

    pub const fn default_value(self) -> &'static str {
        match self {
            Self::Theme => "monochrome",
            Self::Language => "en",
            Self::Tooltips => "enabled",
            Self::Font => "system",
            Self::IconDepth => "embossed",
            Self::IconBackground => "colored",
            Self::WindowOpacity => "translucent",
            Self::BorderRadius => "rounded",
            Self::DesktopPattern => "solid",
            Self::DesktopIconDepth => "debossed",
            Self::DesktopIconBackground => "colored",
        }
    }

    pub const fn allowed_values(self) -> &'static [&'static str] {
        match self {
            Self::Theme => &["light", "dark", "tokyo-night", "monochrome", "system"],
            Self::Language => &["en", "es", "ua", "pt"],
            Self::Tooltips => &["enabled", "disabled"],
            Self::Font => &["system", "monospace"],
            Self::IconDepth | Self::DesktopIconDepth => &["embossed", "debossed"],
            Self::IconBackground | Self::DesktopIconBackground => &["colored", "transparent"],
            Self::WindowOpacity => &["translucent", "opaque"],
            Self::BorderRadius => &["rounded", "square"],
            Self::DesktopPattern => &["solid", "honeycomb", "isometric", "triangles", "diamonds"],
        }
    }

    pub fn is_allowed(self, value: &str) -> bool {
        self.allowed_values().contains(&value)
    }

    /// Human label for the settings window.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Theme => "Theme",
            Self::Language => "Language",
            Self::Tooltips => "Tooltips",
            Self::Font => "Font",
            Self::IconDepth => "Icon depth",
            Self::IconBackground => "Icon background",
            Self::WindowOpacity => "Window opacity",
            Self::BorderRadius => "Border radius",
            Self::DesktopPattern => "Desktop pattern",
            Self::DesktopIconDepth => "Desktop icon depth",
            Self::DesktopIconBackground => "Desktop icon background",
        }
    }

    /// The "on" value when the key is a two-state toggle.
    pub const fn toggle_on_value(self) -> Option<&'static str> {
        match self {
            Self::Tooltips => Some("enabled"),
            Self::WindowOpacity => Some("translucent"),
            Self::BorderRadius => Some("rounded"),
            _ => None,
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
/// Errors returned by [`SettingsStore::set_setting`].
pub enum SettingsError {
    /// The value is not in the key's allowed set.
    #[error("`{value}` is not a valid value for `{key}`")]
    InvalidValue {
        /// Storage key.
        key: &'static str,
        /// Rejected value.
        value: String,
    },
}

/// Notifications published by [`SettingsStore`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettingsEvent {
    /// A setting was written locally.
    Changed { key: SettingKey, value: String },
    /// Settings were replaced from the database mirror after unlock.
    Synced { applied: usize },
}

/// Result of [`SettingsStore::sync_from_database`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncOutcome {
    /// This unlock already synced.
    AlreadySynced,
    /// Mirror values were applied.
    Synced { applied: usize },
    /// Another sync for this unlock is still loading.
    InFlight,
    /// The database was locked while loading; the loaded values were dropped.
    Superseded,
    /// The mirror could not be read; the next unlock retries.
    Failed,
}

struct SettingsInner {
    cache: RefCell<HashMap<SettingKey, String>>,
    local: Rc<dyn LocalSettingsStore>,
    mirror: Rc<dyn SettingsMirror>,
    unlocked: Cell<bool>,
    synced: Cell<bool>,
    /// Bumped on every lock.
    lock_epoch: Cell<u64>,
    /// Epoch of the sync currently loading, if any.
    loading_epoch: Cell<Option<u64>>,
    listeners: ListenerSet<SettingsEvent>,
}

/// Settings store for one application root. Clones share state.
#[derive(Clone)]
pub struct SettingsStore {
    inner: Rc<SettingsInner>,
}

impl SettingsStore {
    pub fn new(local: Rc<dyn LocalSettingsStore>, mirror: Rc<dyn SettingsMirror>) -> Self {
        Self {
            inner: Rc::new(SettingsInner {
                cache: RefCell::new(HashMap::new()),
                local,
                mirror,
                unlocked: Cell::new(false),
                synced: Cell::new(false),
                lock_epoch: Cell::new(0),
                loading_epoch: Cell::new(None),
                listeners: ListenerSet::default(),
            }),
        }
    }

    /// Reads `key` from the cache, then local storage, then the default.
    ///
    /// Stored values outside the allowed set are ignored.
    pub fn get_setting(&self, key: SettingKey) -> String {
        if let Some(value) = self.inner.cache.borrow().get(&key) {
            return value.clone();
        }
        match self.inner.local.load_raw(key.storage_key()) {
            Some(value) if key.is_allowed(&value) => {
                self.inner.cache.borrow_mut().insert(key, value.clone());
                value
            }
            _ => key.default_value().to_string(),
        }
    }

    /// Writes `key` to the cache and local storage and notifies subscribers.
    ///
    /// Returns the database mirror write, which never fails: errors are logged. It resolves
    /// immediately while the database is locked.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::InvalidValue`] without writing anything when `value` is not allowed.
    pub fn set_setting(
        &self,
        key: SettingKey,
        value: &str,
    ) -> Result<LocalBoxFuture<'static, ()>, SettingsError> {
        if !key.is_allowed(value) {
            return Err(SettingsError::InvalidValue {
                key: key.storage_key(),
                value: value.to_string(),
            });
        }

        self.inner.cache.borrow_mut().insert(key, value.to_string());
        if let Err(err) = self.inner.local.save_raw(key.storage_key(), value) {
            logging::warn!("settings local write failed for {}: {err}", key.storage_key());
        }
        self.inner.listeners.notify(&SettingsEvent::Changed {
            key,
            value: value.to_string(),
        });

        if !self.inner.unlocked.get() {
            return Ok(futures::future::ready(()).boxed_local());
        }
        let mirror = Rc::clone(&self.inner.mirror);
        let value = value.to_string();
        Ok(async move {
            if let Err(err) = mirror.save(key.storage_key(), &value).await {
                logging::error!("settings mirror write failed for {}: {err}", key.storage_key());
            }
        }
        .boxed_local())
    }

    /// Pulls mirrored settings after an unlock, once per unlock.
    ///
    /// Mirror values overwrite local storage and the cache. Unknown keys and disallowed values are
    /// skipped. Subscribers receive [`SettingsEvent::Synced`] on success.
    ///
    /// Overlapping calls for the same unlock load once. A lock while loading drops the result and
    /// leaves the store unsynced.
    pub async fn sync_from_database(&self) -> SyncOutcome {
        self.inner.unlocked.set(true);
        if self.inner.synced.get() {
            return SyncOutcome::AlreadySynced;
        }
        let epoch = self.inner.lock_epoch.get();
        if self.inner.loading_epoch.get() == Some(epoch) {
            return SyncOutcome::InFlight;
        }
        self.inner.loading_epoch.set(Some(epoch));

        let mirror = Rc::clone(&self.inner.mirror);
        let loaded = mirror.load_all().await;
        if self.inner.loading_epoch.get() == Some(epoch) {
            self.inner.loading_epoch.set(None);
        }
        if self.inner.lock_epoch.get() != epoch {
            logging::log!("settings sync dropped: database locked while loading");
            return SyncOutcome::Superseded;
        }
        let values = match loaded {
            Ok(values) => values,
            Err(err) => {
                logging::error!("settings sync from database failed: {err}");
                return SyncOutcome::Failed;
            }
        };

        let mut applied = 0;
        for (raw_key, value) in values {
            let Some(key) = SettingKey::from_storage_key(&raw_key) else {
                continue;
            };
            if !key.is_allowed(&value) {
                logging::warn!("ignoring mirrored `{raw_key}` value `{value}`");
                continue;
            }
            if let Err(err) = self.inner.local.save_raw(key.storage_key(), &value) {
                logging::warn!("settings local write failed for {raw_key}: {err}");
            }
            self.inner.cache.borrow_mut().insert(key, value);
            applied += 1;
        }

        self.inner.synced.set(true);
        self.inner
            .listeners
            .notify(&SettingsEvent::Synced { applied });
        SyncOutcome::Synced { applied }
    }

    /// Marks the database locked; the next unlock syncs again.
    pub fn on_lock(&self) {
        self.inner.unlocked.set(false);
        self.inner.synced.set(false);
        self.inner.lock_epoch.set(self.inner.lock_epoch.get() + 1);
    }

    pub fn is_synced(&self) -> bool {
        self.inner.synced.get()
    }

    pub fn subscribe(&self, listener: impl Fn(&SettingsEvent) + 'static) -> Subscription {
        self.inner.listeners.subscribe(listener)
    }
}

impl std::fmt::Debug for SettingsStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SettingsStore")
            .field("cache", &self.inner.cache.borrow())
            .field("unlocked", &self.inner.unlocked.get())
            .field("synced", &self.inner.synced.get())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use futures::executor::block_on;
    use platform_host::{DatabaseService, MemoryDatabase, MemoryLocalSettingsStore};
    use pretty_assertions::assert_eq;

    use super::*;

    fn store_with(local: &MemoryLocalSettingsStore, db: &MemoryDatabase) -> SettingsStore {
        SettingsStore::new(Rc::new(local.clone()), Rc::new(db.clone()))
    }

    fn recorded_events(store: &SettingsStore) -> (Rc<RefCell<Vec<SettingsEvent>>>, Subscription) {
        let events = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&events);
        let subscription = store.subscribe(move |event| sink.borrow_mut().push(event.clone()));
        (events, subscription)
    }

    #[test]
    fn reads_fall_back_from_cache_to_local_storage_to_default() {
        let local = MemoryLocalSettingsStore::default();
        let store = store_with(&local, &MemoryDatabase::default());

        assert_eq!(store.get_setting(SettingKey::Tooltips), "enabled");
        assert_eq!(store.get_setting(SettingKey::WindowOpacity), "translucent");

        local.save_raw("tooltips", "disabled").expect("seed");
        local.save_raw("windowOpacity", "opaque").expect("seed");
        let fresh = store_with(&local, &MemoryDatabase::default());
        assert_eq!(fresh.get_setting(SettingKey::Tooltips), "disabled");
        assert_eq!(fresh.get_setting(SettingKey::WindowOpacity), "opaque");

        let _ = fresh
            .set_setting(SettingKey::WindowOpacity, "translucent")
            .expect("valid");
        local.save_raw("windowOpacity", "opaque").expect("external write");
        assert_eq!(fresh.get_setting(SettingKey::WindowOpacity), "translucent");
    }

    #[test]
    fn invalid_stored_values_fall_through_to_default() {
        let local = MemoryLocalSettingsStore::with_entries([("desktopPattern", "plaid")]);
        let store = store_with(&local, &MemoryDatabase::default());
        assert_eq!(store.get_setting(SettingKey::DesktopPattern), "solid");
    }

    #[test]
    fn invalid_writes_are_rejected_before_any_layer() {
        let local = MemoryLocalSettingsStore::default();
        let store = store_with(&local, &MemoryDatabase::default());
        let err = store
            .set_setting(SettingKey::Tooltips, "sometimes")
            .err()
            .expect("invalid");
        assert_eq!(
            err,
            SettingsError::InvalidValue {
                key: "tooltips",
                value: "sometimes".to_string(),
            }
        );
        assert!(local.is_empty());
    }

    #[test]
    fn writes_hit_local_storage_synchronously_and_mirror_only_when_unlocked() {
        let local = MemoryLocalSettingsStore::default();
        let db = MemoryDatabase::default();
        let store = store_with(&local, &db);
        let (events, _subscription) = recorded_events(&store);

        block_on(store.set_setting(SettingKey::Theme, "dark").expect("valid"));
        assert_eq!(local.load_raw("theme").as_deref(), Some("dark"));
        assert_eq!(db.mirrored_setting("theme"), None);

        block_on(db.unlock("pw")).expect("unlock");
        block_on(store.sync_from_database());
        block_on(store.set_setting(SettingKey::Theme, "light").expect("valid"));
        assert_eq!(db.mirrored_setting("theme").as_deref(), Some("light"));

        assert_eq!(
            events.borrow()[0],
            SettingsEvent::Changed {
                key: SettingKey::Theme,
                value: "dark".to_string(),
            }
        );
    }

    #[test]
    fn mirror_failures_are_swallowed() {
        let local = MemoryLocalSettingsStore::default();
        let db = MemoryDatabase::default();
        let store = store_with(&local, &db);
        block_on(db.unlock("pw")).expect("unlock");
        block_on(store.sync_from_database());
        block_on(db.lock()).expect("lock");

        block_on(store.set_setting(SettingKey::Font, "monospace").expect("valid"));
        assert_eq!(store.get_setting(SettingKey::Font), "monospace");
        assert_eq!(local.load_raw("font").as_deref(), Some("monospace"));
    }

    #[test]
    fn unlock_sync_overwrites_local_storage_once_and_repeats_after_lock() {
        let local = MemoryLocalSettingsStore::with_entries([("language", "en")]);
        let db = MemoryDatabase::default();
        db.seed_setting("language", "es");
        db.seed_setting("tooltips", "disabled");
        db.seed_setting("unknownKey", "x");
        db.seed_setting("theme", "neon");
        let store = store_with(&local, &db);
        assert_eq!(store.get_setting(SettingKey::Language), "en");
        let (events, _subscription) = recorded_events(&store);

        block_on(db.unlock("pw")).expect("unlock");
        assert_eq!(
            block_on(store.sync_from_database()),
            SyncOutcome::Synced { applied: 2 }
        );
        assert_eq!(local.load_raw("language").as_deref(), Some("es"));
        assert_eq!(store.get_setting(SettingKey::Language), "es");
        assert_eq!(store.get_setting(SettingKey::Tooltips), "disabled");
        assert_eq!(store.get_setting(SettingKey::Theme), "monochrome");

        assert_eq!(block_on(store.sync_from_database()), SyncOutcome::AlreadySynced);
        assert_eq!(
            events
                .borrow()
                .iter()
                .filter(|event| matches!(event, SettingsEvent::Synced { .. }))
                .count(),
            1
        );

        store.on_lock();
        assert!(!store.is_synced());
        db.seed_setting("language", "pt");
        assert_eq!(
            block_on(store.sync_from_database()),
            SyncOutcome::Synced { applied: 2 }
        );
        assert_eq!(store.get_setting(SettingKey::Language), "pt");
    }

    #[test]
    fn failed_sync_leaves_flag_unset_for_retry() {
        let local = MemoryLocalSettingsStore::default();
        let db = MemoryDatabase::default();
        let store = store_with(&local, &db);

        assert_eq!(block_on(store.sync_from_database()), SyncOutcome::Failed);
        assert!(!store.is_synced());

        block_on(db.unlock("pw")).expect("unlock");
        assert!(matches!(
            block_on(store.sync_from_database()),
            SyncOutcome::Synced { .. }
        ));
    }

    /// Mirror whose loads wait until the test releases them, oldest first.
    #[derive(Default)]
    struct GatedMirror {
        pending: RefCell<Vec<futures::channel::oneshot::Sender<HashMap<String, String>>>>,
        loads: Cell<usize>,
    }

    impl GatedMirror {
        fn release(&self, values: &[(&str, &str)]) {
            let sender = self.pending.borrow_mut().remove(0);
            let values = values
                .iter()
                .map(|(key, value)| (key.to_string(), value.to_string()))
                .collect();
            sender.send(values).expect("load still awaited");
        }
    }

    impl SettingsMirror for GatedMirror {
        fn load_all<'a>(
            &'a self,
        ) -> platform_host::SettingsMirrorFuture<'a, Result<HashMap<String, String>, String>> {
            let (sender, receiver) = futures::channel::oneshot::channel();
            self.pending.borrow_mut().push(sender);
            self.loads.set(self.loads.get() + 1);
            Box::pin(async move { receiver.await.map_err(|_| "load cancelled".to_string()) })
        }

        fn save<'a>(
            &'a self,
            _key: &'a str,
            _value: &'a str,
        ) -> platform_host::SettingsMirrorFuture<'a, Result<(), String>> {
            Box::pin(async { Ok(()) })
        }
    }

    fn spawn_sync(
        pool: &futures::executor::LocalPool,
        store: &SettingsStore,
    ) -> Rc<Cell<Option<SyncOutcome>>> {
        use futures::task::LocalSpawnExt;

        let outcome = Rc::new(Cell::new(None));
        let slot = Rc::clone(&outcome);
        let store = store.clone();
        pool.spawner()
            .spawn_local(async move { slot.set(Some(store.sync_from_database().await)) })
            .expect("spawn");
        outcome
    }

    #[test]
    fn lock_during_load_drops_the_result_and_next_unlock_resyncs() {
        let local = MemoryLocalSettingsStore::default();
        let mirror = Rc::new(GatedMirror::default());
        let store = SettingsStore::new(Rc::new(local.clone()), mirror.clone());
        let (events, _subscription) = recorded_events(&store);
        let mut pool = futures::executor::LocalPool::new();

        let first = spawn_sync(&pool, &store);
        pool.run_until_stalled();
        store.on_lock();
        mirror.release(&[("language", "es")]);
        pool.run_until_stalled();

        assert_eq!(first.get(), Some(SyncOutcome::Superseded));
        assert!(!store.is_synced());
        assert_eq!(store.get_setting(SettingKey::Language), "en");
        assert_eq!(local.load_raw("language"), None);

        let second = spawn_sync(&pool, &store);
        pool.run_until_stalled();
        assert_eq!(mirror.loads.get(), 2);
        mirror.release(&[("language", "pt")]);
        pool.run_until_stalled();

        assert_eq!(second.get(), Some(SyncOutcome::Synced { applied: 1 }));
        assert_eq!(store.get_setting(SettingKey::Language), "pt");
        assert_eq!(
            events
                .borrow()
                .iter()
                .filter(|event| matches!(event, SettingsEvent::Synced { .. }))
                .count(),
            1
        );
    }

    #[test]
    fn overlapping_unlocks_load_and_notify_once() {
        let local = MemoryLocalSettingsStore::default();
        let mirror = Rc::new(GatedMirror::default());
        let store = SettingsStore::new(Rc::new(local), mirror.clone());
        let (events, _subscription) = recorded_events(&store);
        let mut pool = futures::executor::LocalPool::new();

        let first = spawn_sync(&pool, &store);
        let second = spawn_sync(&pool, &store);
        pool.run_until_stalled();
        assert_eq!(mirror.loads.get(), 1);
        assert_eq!(second.get(), Some(SyncOutcome::InFlight));

        mirror.release(&[("tooltips", "disabled")]);
        pool.run_until_stalled();

        assert_eq!(first.get(), Some(SyncOutcome::Synced { applied: 1 }));
        assert_eq!(
            events
                .borrow()
                .iter()
                .filter(|event| matches!(event, SettingsEvent::Synced { .. }))
                .count(),
            1
        );
        assert_eq!(block_on(store.sync_from_database()), SyncOutcome::AlreadySynced);
    }

    #[test]
    fn key_table_defaults_are_allowed() {
        for key in SettingKey::ALL {
            assert!(key.is_allowed(key.default_value()), "{key:?}");
            assert_eq!(SettingKey::from_storage_key(key.storage_key()), Some(key));
        }
    }
}
