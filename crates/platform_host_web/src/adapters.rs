use std::rc::Rc;

use platform_host::{
    HostServices, HostStrategy, MemoryApi, MemoryAuthService, MemoryDatabase,
    MemoryLocalSettingsStore, MemoryVfs,
};

use crate::{WebApiClient, WebAuthService, WebLocalSettingsStore};

/// Returns the compile-time selected host strategy for the active build.
pub const fn selected_host_strategy() -> HostStrategy {
    #[cfg(feature = "host-stub")]
    {
        HostStrategy::Stub
    }

    #[cfg(not(feature = "host-stub"))]
    {
        HostStrategy::Browser
    }
}

/// Returns the selected host strategy as a stable string token.
pub fn host_strategy_name() -> &'static str {
    selected_host_strategy().as_str()
}

/// Builds the host service bundle for the compile-time selected strategy.
///
/// The encrypted database and virtual filesystem are provided by external packages; this layer
/// wires the in-memory implementations for both strategies.
pub fn build_host_services() -> HostServices {
    match selected_host_strategy() {
        HostStrategy::Stub => HostServices::in_memory(
            MemoryLocalSettingsStore::default(),
            MemoryDatabase::default(),
            MemoryAuthService::default(),
            MemoryApi::default(),
            MemoryVfs::default(),
        ),
        HostStrategy::Browser => {
            let database = MemoryDatabase::default();
            HostServices {
                local_settings: Rc::new(WebLocalSettingsStore),
                database: Rc::new(database.clone()),
                settings_mirror: Rc::new(database),
                auth: Rc::new(WebAuthService::default()),
                admin_api: Rc::new(WebApiClient),
                sessions_api: Rc::new(WebApiClient),
                vfs: Rc::new(MemoryVfs::default()),
                host_strategy: HostStrategy::Browser,
            }
        }
    }
}
