//! Host service bundle injected into the desktop runtime.

use std::rc::Rc;

use crate::{
    AdminApi, AuthService, AuthSessionsApi, DatabaseService, LocalSettingsStore, MemoryApi,
    MemoryAuthService, MemoryDatabase, MemoryLocalSettingsStore, MemoryVfs, SettingsMirror,
    VfsService,
};

/// Host strategy selected for the current build.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostStrategy {
    /// Browser adapters (`localStorage`, `fetch`).
    Browser,
    /// In-memory adapters for development and tests.
    Stub,
}

impl HostStrategy {
    /// Returns a stable string token for diagnostics.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Browser => "browser",
            Self::Stub => "stub",
        }
    }
}

/// Host service bundle injected into the shared desktop runtime.
///
/// Every environment-specific choice is made before this bundle crosses into
/// `desktop_runtime`, so the runtime never names a concrete adapter.
#[derive(Clone)]
pub struct HostServices {
    /// Synchronous settings storage.
    pub local_settings: Rc<dyn LocalSettingsStore>,
    /// Encrypted database handle.
    pub database: Rc<dyn DatabaseService>,
    /// Settings copy inside the encrypted database.
    pub settings_mirror: Rc<dyn SettingsMirror>,
    /// Server authentication.
    pub auth: Rc<dyn AuthService>,
    /// Admin endpoints.
    pub admin_api: Rc<dyn AdminApi>,
    /// Session endpoints.
    pub sessions_api: Rc<dyn AuthSessionsApi>,
    /// Virtual filesystem.
    pub vfs: Rc<dyn VfsService>,
    /// Strategy identifier for diagnostics.
    pub host_strategy: HostStrategy,
}

impl HostServices {
    /// Builds a bundle entirely from in-memory adapters.
    ///
    /// The database instance doubles as the settings mirror so unlock state is shared.
    pub fn in_memory(
        local_settings: MemoryLocalSettingsStore,
        database: MemoryDatabase,
        auth: MemoryAuthService,
        api: MemoryApi,
        vfs: MemoryVfs,
    ) -> Self {
        Self {
            local_settings: Rc::new(local_settings),
            database: Rc::new(database.clone()),
            settings_mirror: Rc::new(database),
            auth: Rc::new(auth),
            admin_api: Rc::new(api.clone()),
            sessions_api: Rc::new(api),
            vfs: Rc::new(vfs),
            host_strategy: HostStrategy::Stub,
        }
    }
}

impl Default for HostServices {
    fn default() -> Self {
        Self::in_memory(
            MemoryLocalSettingsStore::default(),
            MemoryDatabase::default(),
            MemoryAuthService::default(),
            MemoryApi::default(),
            MemoryVfs::default(),
        )
    }
}

impl std::fmt::Debug for HostServices {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HostServices")
            .field("host_strategy", &self.host_strategy)
            .field("database", &self.database.status())
            .field("auth", &self.auth.status())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use futures::executor::block_on;

    use super::*;

    #[test]
    fn in_memory_bundle_shares_database_with_mirror() {
        let database = MemoryDatabase::default();
        let services = HostServices::in_memory(
            MemoryLocalSettingsStore::default(),
            database.clone(),
            MemoryAuthService::default(),
            MemoryApi::default(),
            MemoryVfs::default(),
        );

        assert!(block_on(services.settings_mirror.save("theme", "dark")).is_err());
        block_on(services.database.unlock("pw")).expect("unlock");
        block_on(services.settings_mirror.save("theme", "dark")).expect("save");
        assert_eq!(database.mirrored_setting("theme").as_deref(), Some("dark"));
        assert_eq!(services.host_strategy.as_str(), "stub");
    }
}
